//! Error types for table construction, input parsing, and output.

use std::{io, path::PathBuf, result};

use thiserror::Error;

use crate::Width;

/// Result type used throughout the crate.
pub type Result<T> = result::Result<T, Error>;

/// Errors produced while reading input tables or emitting generated source.
#[derive(Debug, Error)]
pub enum Error {
    /// A record in an input table could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending record.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// The same code is mapped to two different names in one table.
    #[error("Name conflict: code {code} is {first:?} and {second:?}")]
    NameConflict {
        /// The conflicting code.
        code: u32,
        /// The name seen first.
        first: String,
        /// The name that disagrees with it.
        second: String,
    },

    /// A table that must contain at least one entry was empty.
    #[error("table {table} has no entries")]
    EmptyTable {
        /// Name of the table.
        table: String,
    },

    /// A mapping table refers to a name that is not defined.
    #[error("unknown name {name:?} in table {table}")]
    UnknownName {
        /// Name of the table the name was looked up in.
        table: String,
        /// The unresolved name.
        name: String,
    },

    /// A translation value does not fit the declared element width.
    #[error("value {value} in table {table} does not fit {width}")]
    ValueOverflow {
        /// Name of the table.
        table: String,
        /// The value that does not fit.
        value: u32,
        /// The declared element width.
        width: Width,
    },

    /// No key definitions were found in an SDK header.
    #[error("could not find keycode definitions in input file")]
    NoDefinitions,

    /// An SDK header could not be located.
    #[error("{0}")]
    HeaderNotFound(String),

    /// A header-scraping pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The build manifest could not be parsed.
    #[error("invalid manifest: {message}")]
    Config {
        /// Parser diagnostic.
        message: String,
    },

    /// An output file could not be created.
    #[error("could not create output file: {source}")]
    Create {
        /// The underlying error.
        source: io::Error,
    },

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Another error, decorated with the file it relates to.
    #[error("{}: {source}", .file.display())]
    InFile {
        /// File name, relative to the directory it was opened in.
        file: PathBuf,
        /// The decorated error.
        source: Box<Self>,
    },
}

impl Error {
    /// Attach `file` to this error unless a file name is already attached.
    pub fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::InFile { .. } => self,
            other => Self::InFile {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }

    /// The file name attached to this error, if any.
    pub fn file(&self) -> Option<&PathBuf> {
        match self {
            Self::InFile { file, .. } => Some(file),
            _ => None,
        }
    }

    /// The underlying error with any file decoration removed.
    pub fn inner(&self) -> &Self {
        match self {
            Self::InFile { source, .. } => source.inner(),
            other => other,
        }
    }
}
