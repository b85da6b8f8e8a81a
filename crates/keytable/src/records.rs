//! Two-column `code,name` records, one per line.
//!
//! Blank lines and lines starting with `#` are skipped. Names must be
//! non-empty printable ASCII.

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use crate::{Error, Result};

/// A key code and its name.
pub type Record = (u32, String);

/// Parse an integer literal in decimal, `0x` hex, or leading-zero octal.
pub fn parse_code(lit: &str) -> Option<u32> {
    let s = lit.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(oct) = s.strip_prefix('0') {
        if oct.is_empty() {
            Some(0)
        } else {
            u32::from_str_radix(oct, 8).ok()
        }
    } else {
        s.parse().ok()
    }
}

/// Check that `name` can be stored in a string pool.
fn validate_name(name: &str, line: usize) -> Result<&str> {
    if name.is_empty() {
        return Err(Error::Parse {
            line,
            message: "empty name".to_string(),
        });
    }
    if !name.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(Error::Parse {
            line,
            message: format!("name {name:?} is not printable ASCII"),
        });
    }
    Ok(name)
}

/// Iterate over the non-comment lines of `reader` as `(line number, left, right)`.
fn columns<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String, String)>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(n, line)| {
            let lineno = n + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(Error::Io(e))),
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            Some(match line.split_once(',') {
                Some((a, b)) => Ok((lineno, a.trim().to_string(), b.trim().to_string())),
                None => Err(Error::Parse {
                    line: lineno,
                    message: format!("expected two comma-separated columns, got {line:?}"),
                }),
            })
        })
}

/// Read `code,name` records.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>> {
    columns(reader)
        .map(|row| {
            let (line, code, name) = row?;
            let code = parse_code(&code).ok_or_else(|| Error::Parse {
                line,
                message: format!("invalid code {code:?}"),
            })?;
            Ok((code, validate_name(&name, line)?.to_string()))
        })
        .collect()
}

/// Read `name,name` pairs, such as a platform-to-HID name mapping.
pub fn read_name_pairs<R: BufRead>(reader: R) -> Result<Vec<(String, String)>> {
    columns(reader)
        .map(|row| {
            let (line, a, b) = row?;
            validate_name(&a, line)?;
            validate_name(&b, line)?;
            Ok((a, b))
        })
        .collect()
}

/// Open `dir/filename` and parse it with `parse`, decorating errors with
/// the file name.
pub fn read_file<T, F>(dir: &Path, filename: &str, parse: F) -> Result<T>
where
    F: FnOnce(BufReader<File>) -> Result<T>,
{
    let file = File::open(dir.join(filename)).map_err(|e| Error::Io(e).in_file(filename))?;
    parse(BufReader::new(file)).map_err(|e| e.in_file(filename))
}

/// Write `records` as `code,name` lines.
pub fn write_records<W: Write>(out: &mut W, records: &[Record]) -> Result<()> {
    for (code, name) in records {
        writeln!(out, "{code},{name}")?;
    }
    Ok(())
}
