//! Packed string pool with suffix sharing.
//!
//! All strings are stored NUL-terminated in one buffer. A string that is a
//! suffix of a longer stored string is not stored again; its offset points
//! into the longer string instead. Offset 0 always holds a lone NUL, the empty
//! string.

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    str,
};

/// An immutable packed string buffer and the offset of every input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringPool {
    /// Packed NUL-terminated strings, starting with a lone NUL.
    data: Vec<u8>,
    /// Offset of each distinct input string in `data`.
    offsets: BTreeMap<String, u32>,
}

impl StringPool {
    /// Pack `strings` into a single buffer.
    ///
    /// Strings must be free of NUL bytes. Repeated strings share one offset.
    pub fn build<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = strings
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        debug_assert!(
            distinct.iter().all(|s| !s.contains('\0')),
            "pool strings must not contain NUL"
        );

        // Longest first, so every string is seen after anything it is a suffix of.
        let mut by_len: Vec<&str> = distinct.iter().map(String::as_str).collect();
        by_len.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut covered: HashSet<&str> = HashSet::new();
        let mut stored: Vec<&str> = Vec::new();
        for s in by_len {
            // The empty string is the NUL at offset 0.
            if s.is_empty() || covered.contains(s) {
                continue;
            }
            stored.push(s);
            covered.extend(s.char_indices().map(|(n, _)| &s[n..]));
        }
        stored.sort_unstable();

        let mut data = vec![0u8];
        for s in &stored {
            data.extend_from_slice(s.as_bytes());
            data.push(0);
        }

        let offsets = distinct
            .iter()
            .map(|s| (s.clone(), locate(&data, s)))
            .collect();
        Self { data, offsets }
    }

    /// The packed buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Offset of `s` in the buffer, if `s` was one of the input strings.
    pub fn offset(&self, s: &str) -> Option<u32> {
        self.offsets.get(s).copied()
    }

    /// Read the NUL-terminated string starting at `offset`.
    pub fn read(&self, offset: u32) -> Option<&str> {
        let tail = self.data.get(offset as usize..)?;
        let len = tail.iter().position(|&b| b == 0)?;
        str::from_utf8(&tail[..len]).ok()
    }
}

/// Find the offset of `s` followed by a NUL terminator in `data`.
fn locate(data: &[u8], s: &str) -> u32 {
    let mut needle = Vec::with_capacity(s.len() + 1);
    needle.extend_from_slice(s.as_bytes());
    needle.push(0);
    let pos = data
        .windows(needle.len())
        .position(|w| w == needle.as_slice())
        .unwrap_or_default();
    debug_assert_eq!(&data[pos..pos + needle.len()], needle.as_slice());
    pos as u32
}
