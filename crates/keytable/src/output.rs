//! Scoped writing of generated files.
//!
//! Every file starts with a marker comment and, for headers, an include
//! guard. A file is only left on disk if its body was written completely;
//! on failure it is removed and the error names the file.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

use tracing::{info, warn};

use crate::{Error, Result};

/// First line of every generated file.
pub const MARKER: &str = "/* This file is automatically generated. */\n";

/// A directory that generated files are written into.
#[derive(Debug, Clone)]
pub struct OutputDir {
    /// Directory all file names are relative to.
    root: PathBuf,
}

impl OutputDir {
    /// Write files into `root`, which must exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create `filename` and fill it with `body`.
    ///
    /// The marker comment and, if `guard` is set, the include guard are
    /// written around the body. Any error is returned decorated with
    /// `filename`, and the partial file is deleted.
    pub fn write<F>(&self, filename: &str, guard: Option<&str>, body: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        info!(file = filename, "writing");
        let path = self.root.join(filename);
        let file =
            File::create(&path).map_err(|source| Error::Create { source }.in_file(filename))?;
        let mut out = BufWriter::new(file);
        let res = write_artifact(&mut out, guard, body).and_then(|()| {
            out.into_inner()
                .map_err(|e| Error::Io(e.into_error()))
                .map(drop)
        });
        if let Err(err) = res {
            if let Err(e) = fs::remove_file(&path) {
                warn!(file = filename, error = %e, "could not remove partial output");
            }
            return Err(err.in_file(filename));
        }
        Ok(())
    }
}

/// Write the marker, optional guard, `body`, and guard footer to `out`.
///
/// The footer is only written if `body` succeeds.
pub fn write_artifact<W, F>(out: &mut W, guard: Option<&str>, body: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    out.write_all(MARKER.as_bytes())?;
    if let Some(guard) = guard {
        write!(out, "#ifndef {guard}\n#define {guard}\n")?;
    }
    body(out)?;
    if guard.is_some() {
        out.write_all(b"#endif\n")?;
    }
    out.flush()?;
    Ok(())
}
