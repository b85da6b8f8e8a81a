//! Flat translation tables between code spaces.

use crate::{Error, Result, Width, format::format_numbers};

/// A fixed-size array mapping source codes (the index) to target codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
    /// C identifier of the array.
    name: String,
    /// Declared element width.
    width: Width,
    /// One value per source code.
    values: Vec<u32>,
}

impl TranslationTable {
    /// Create a table with an explicit element width.
    ///
    /// Every value must fit `width`; the width is never widened to fit.
    pub fn new(name: impl Into<String>, width: Width, values: Vec<u32>) -> Result<Self> {
        let name = name.into();
        if let Some(&value) = values.iter().find(|&&v| !width.holds(v)) {
            return Err(Error::ValueOverflow {
                table: name,
                value,
                width,
            });
        }
        Ok(Self {
            name,
            width,
            values,
        })
    }

    /// Declared element width.
    pub fn width(&self) -> Width {
        self.width
    }

    /// Render the array definition.
    pub fn to_c(&self) -> String {
        format!(
            "const {ctype} {name}[{size}] = {{\n{data}\n}};\n",
            ctype = self.width.c_type(),
            name = self.name,
            size = self.values.len(),
            data = format_numbers(&self.values, "    "),
        )
    }

    /// Render an `extern` declaration of the array for a header.
    pub fn declaration(&self) -> String {
        format!(
            "extern const {} {}[{}];\n",
            self.width.c_type(),
            self.name,
            self.values.len()
        )
    }
}
