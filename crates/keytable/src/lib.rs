#![warn(missing_docs)]
//! keytable: compact keycode name tables, generated as C source.
//!
//! - [`StringPool`]: packs names into one buffer, sharing suffixes.
//! - [`NameMap`]: a dense code-to-name table over a pool, with minimal-width
//!   offsets ([`Width`]).
//! - [`TranslationTable`]: a flat code-to-code array.
//! - [`Keymap`] and [`emit_keymap`]: the four tables (and a header) generated
//!   for one platform.
//! - [`Platform`]: scraping of key codes from platform SDK headers.
//! - [`Manifest`]: a RON description of what to generate.

mod error;
pub use error::{Error, Result};

pub mod format;

mod width;
pub use width::Width;

mod pool;
pub use pool::StringPool;

mod namemap;
pub use namemap::{MAX_CODE, NameMap};

mod xtable;
pub use xtable::TranslationTable;

pub mod output;
pub use output::OutputDir;

pub mod records;

pub mod keymap;
pub use keymap::Keymap;

mod emit;
pub use emit::{DEFAULT_INCLUDE, KeymapNames, emit_keymap};

mod extract;
pub use extract::{Platform, extract_to_file};

mod manifest;
pub use manifest::{DEFAULT_PLATFORMS, KeymapSpec, Manifest};
