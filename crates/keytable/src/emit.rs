//! Emission of the generated source files for a keymap.

use tracing::info;

use crate::{Keymap, NameMap, OutputDir, Result, TranslationTable};

/// Header included by every generated `.c` file unless configured otherwise.
pub const DEFAULT_INCLUDE: &str = "keytable.h";

/// Names of everything generated for one keymap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapNames {
    /// Lower-case keymap name.
    pub lower: String,
    /// Upper-case keymap name.
    pub upper: String,
}

impl KeymapNames {
    /// Derive names from a keymap name.
    pub fn new(name: &str) -> Self {
        Self {
            lower: name.to_ascii_lowercase(),
            upper: name.to_ascii_uppercase(),
        }
    }

    /// Accessor function returning the SDK name of a code.
    pub fn rawname_fn(&self) -> String {
        format!("keycode_{}_rawname", self.lower)
    }

    /// Accessor function returning the display name of a code.
    pub fn name_fn(&self) -> String {
        format!("keycode_{}_name", self.lower)
    }

    /// Array translating platform codes to HID codes.
    pub fn to_hid_array(&self) -> String {
        format!("KEYCODE_{}_TO_HID", self.upper)
    }

    /// Array translating HID codes to platform codes.
    pub fn from_hid_array(&self) -> String {
        format!("KEYCODE_{}_FROM_HID", self.upper)
    }

    /// Include guard of the keymap header.
    pub fn guard(&self) -> String {
        format!("KEYCODE_{}_H", self.upper)
    }

    /// The file names written for this keymap, in emission order.
    pub fn files(&self) -> [String; 5] {
        let n = &self.lower;
        [
            format!("{n}_rawname.c"),
            format!("{n}_name.c"),
            format!("{n}_tohid.c"),
            format!("{n}_fromhid.c"),
            format!("{n}_keytable.h"),
        ]
    }
}

/// Write the source files for `keymap` into `out`.
///
/// Each artifact is built completely before its file is created. Emission
/// stops at the first error; files already written are kept, and the failing
/// one is removed.
pub fn emit_keymap(out: &OutputDir, keymap: &Keymap, include: &str) -> Result<()> {
    let names = KeymapNames::new(&keymap.name);
    let [rawname_file, name_file, to_hid_file, from_hid_file, header_file] = names.files();
    let head = format!("#include \"{include}\"\n");

    let rawname = NameMap::build(&rawname_file, &keymap.scancodes)
        .map_err(|e| e.in_file(&rawname_file))?;
    write_c(out, &rawname_file, &head, &rawname.to_c(&names.rawname_fn()))?;

    let display = NameMap::build(&name_file, &keymap.display_names)
        .map_err(|e| e.in_file(&name_file))?;
    write_c(out, &name_file, &head, &display.to_c(&names.name_fn()))?;

    let to_hid = TranslationTable::new(
        names.to_hid_array(),
        keymap.translation_width,
        keymap.to_hid.clone(),
    )
    .map_err(|e| e.in_file(&to_hid_file))?;
    write_c(out, &to_hid_file, &head, &to_hid.to_c())?;

    let from_hid = TranslationTable::new(
        names.from_hid_array(),
        keymap.translation_width,
        keymap.from_hid.clone(),
    )
    .map_err(|e| e.in_file(&from_hid_file))?;
    write_c(out, &from_hid_file, &head, &from_hid.to_c())?;

    let header = format!(
        "const char *{}(unsigned index);\nconst char *{}(unsigned index);\n{}{}",
        names.rawname_fn(),
        names.name_fn(),
        to_hid.declaration(),
        from_hid.declaration(),
    );
    out.write(&header_file, Some(&names.guard()), |w| {
        Ok(w.write_all(header.as_bytes())?)
    })?;

    info!(keymap = %keymap.name, "generated keymap");
    Ok(())
}

/// Write one `.c` artifact: the include line followed by `body`.
fn write_c(out: &OutputDir, filename: &str, head: &str, body: &str) -> Result<()> {
    out.write(filename, None, |w| {
        w.write_all(head.as_bytes())?;
        w.write_all(body.as_bytes())?;
        Ok(())
    })
}
