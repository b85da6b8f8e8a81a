//! Integer-to-name lookup tables backed by a packed string pool.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    Error, Result, StringPool, Width,
    format::{format_data, format_numbers},
};

/// Largest code a dense table may be indexed by.
pub const MAX_CODE: u32 = 0xFFFF;

/// Length of a dense table indexed by codes up to `max_code`.
///
/// Codes above [`MAX_CODE`] are rejected so a stray record cannot size a
/// table in the gigabytes.
pub fn dense_len(table: &str, max_code: u32) -> Result<usize> {
    if max_code > MAX_CODE {
        return Err(Error::ValueOverflow {
            table: table.to_string(),
            value: max_code,
            width: Width::U16,
        });
    }
    Ok(max_code as usize + 1)
}

/// A dense code-to-name table: a string pool plus one offset per code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMap {
    /// Packed names.
    pool: StringPool,
    /// Offset of each code's name in the pool, 0 for codes without a name.
    offsets: Vec<u32>,
}

impl NameMap {
    /// Build a table from `(code, name)` pairs.
    ///
    /// Fails if a code is given two different names, or if `pairs` is empty.
    pub fn build(table: &str, pairs: &[(u32, String)]) -> Result<Self> {
        let mut names: BTreeMap<u32, &str> = BTreeMap::new();
        for (code, name) in pairs {
            match names.get(code) {
                Some(&prev) if prev != name.as_str() => {
                    return Err(Error::NameConflict {
                        code: *code,
                        first: prev.to_string(),
                        second: name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    names.insert(*code, name.as_str());
                }
            }
        }
        let Some((&max_code, _)) = names.last_key_value() else {
            return Err(Error::EmptyTable {
                table: table.to_string(),
            });
        };

        let pool = StringPool::build(names.values());
        let mut offsets = vec![0u32; dense_len(table, max_code)?];
        for (&code, name) in &names {
            offsets[code as usize] = pool.offset(name).unwrap_or_default();
        }
        let map = Self { pool, offsets };
        debug!(
            table,
            entries = names.len(),
            count = map.count(),
            pool_bytes = map.pool.data().len(),
            width = %map.width(),
            "built name map"
        );
        Ok(map)
    }

    /// Number of entries in the offset table, `max(code) + 1`.
    pub fn count(&self) -> usize {
        self.offsets.len()
    }

    /// The packed string pool.
    pub fn pool(&self) -> &StringPool {
        &self.pool
    }

    /// The offset table.
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Narrowest element width for the offset table.
    pub fn width(&self) -> Width {
        Width::for_max(self.offsets.iter().copied().max().unwrap_or_default())
    }

    /// The name for `index`, or `None` if it is out of range or unnamed.
    pub fn get(&self, index: u32) -> Option<&str> {
        match self.offsets.get(index as usize) {
            Some(0) | None => None,
            Some(&offset) => self.pool.read(offset),
        }
    }

    /// Render the table as C source defining `fname`, a function from
    /// `unsigned` to `const char *`.
    ///
    /// The data and offset arrays are named after `fname` in upper case.
    pub fn to_c(&self, fname: &str) -> String {
        let lname = fname.to_ascii_lowercase();
        let uname = fname.to_ascii_uppercase();
        let count = self.count();
        format!(
            "static const char {uname}_DATA[] =\n\
             {data};\n\
             static const {otype} {uname}_OFFSET[] = {{\n\
             {odata}\n\
             }};\n\
             const char *{lname}(unsigned index) {{\n\
             \x20   unsigned offset;\n\
             \x20   if ({count} <= index)\n\
             \x20       return 0;\n\
             \x20   offset = {uname}_OFFSET[index];\n\
             \x20   if (offset == 0)\n\
             \x20       return 0;\n\
             \x20   return {uname}_DATA + offset;\n\
             }}\n",
            data = format_data(self.pool.data(), "    "),
            otype = self.width().c_type(),
            odata = format_numbers(&self.offsets, "    "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(u32, &str)]) -> Vec<(u32, String)> {
        items.iter().map(|(c, n)| (*c, n.to_string())).collect()
    }

    #[test]
    fn end_to_end_small_table() {
        let map = NameMap::build("t", &pairs(&[(0, "A"), (1, "B"), (2, "AB")])).unwrap();
        let pool = map.pool();
        let ab = pool.offset("AB").unwrap();
        assert_eq!(pool.data(), b"\0A\0AB\0");
        assert_eq!(pool.offset("B"), Some(ab + 1));
        assert_eq!(
            map.offsets(),
            &[pool.offset("A").unwrap(), ab + 1, ab][..]
        );
        assert_eq!(map.width(), Width::U8);
    }

    #[test]
    fn conflicting_names_fail() {
        let err = NameMap::build("t", &pairs(&[(1, "A"), (1, "B")])).unwrap_err();
        match err {
            Error::NameConflict {
                code,
                first,
                second,
            } => {
                assert_eq!(code, 1);
                assert_eq!(first, "A");
                assert_eq!(second, "B");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn repeated_identical_pairs_succeed() {
        let map = NameMap::build("t", &pairs(&[(1, "A"), (1, "A")])).unwrap();
        assert_eq!(map.count(), 2);
        assert_eq!(map.get(1), Some("A"));
    }

    #[test]
    fn empty_table_fails() {
        assert!(matches!(
            NameMap::build("t", &[]),
            Err(Error::EmptyTable { .. })
        ));
    }

    #[test]
    fn huge_code_is_rejected() {
        let err = NameMap::build("t", &pairs(&[(0, "A"), (u32::MAX, "X")])).unwrap_err();
        assert!(matches!(
            err,
            Error::ValueOverflow {
                value: u32::MAX,
                width: Width::U16,
                ..
            }
        ));
        let map = NameMap::build("t", &pairs(&[(MAX_CODE, "Last")])).unwrap();
        assert_eq!(map.get(MAX_CODE), Some("Last"));
    }

    #[test]
    fn accessor_contract() {
        let map = NameMap::build("t", &pairs(&[(0, "Zero"), (3, "Three")])).unwrap();
        assert_eq!(map.get(0), Some("Zero"));
        assert_eq!(map.get(1), None);
        assert_eq!(map.get(3), Some("Three"));
        assert_eq!(map.get(4), None);
        assert_eq!(map.get(u32::MAX), None);
    }

    #[test]
    fn wide_offsets_pick_wider_type() {
        let items: Vec<(u32, String)> = (0..100).map(|i| (i, format!("Key{i:04}"))).collect();
        let map = NameMap::build("t", &items).unwrap();
        assert_eq!(map.width(), Width::U16);
        assert!(map.to_c("keycode_x_name").contains("static const unsigned short"));
    }

    #[test]
    fn renders_c_function() {
        let map = NameMap::build("t", &pairs(&[(0, "A"), (1, "B"), (2, "AB")])).unwrap();
        let expected = "\
static const char KEYCODE_TEST_RAWNAME_DATA[] =
    \"\\0A\\0AB\";
static const unsigned char KEYCODE_TEST_RAWNAME_OFFSET[] = {
    1,4,3
};
const char *keycode_test_rawname(unsigned index) {
    unsigned offset;
    if (3 <= index)
        return 0;
    offset = KEYCODE_TEST_RAWNAME_OFFSET[index];
    if (offset == 0)
        return 0;
    return KEYCODE_TEST_RAWNAME_DATA + offset;
}
";
        assert_eq!(map.to_c("keycode_test_rawname"), expected);
    }
}
