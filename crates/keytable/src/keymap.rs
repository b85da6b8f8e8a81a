//! Assembly of a platform keymap from its data tables.
//!
//! A keymap joins three tables: the canonical HID table (`code,display
//! name`), the platform's scancode table (`code,raw name`), and a mapping
//! from platform raw names to HID display names.

use std::{collections::BTreeMap, path::Path};

use tracing::{debug, warn};

use crate::{
    Error, Result, Width,
    namemap::dense_len,
    records::{Record, read_file, read_name_pairs, read_records},
};

/// File name of the canonical HID table in the data directory.
pub const HID_FILE: &str = "hid.csv";

/// File name of a platform's scancode table.
pub fn scancodes_file(platform: &str) -> String {
    format!("{platform}_scancodes.csv")
}

/// File name of a platform's raw-name to HID-name mapping.
pub fn mapping_file(platform: &str) -> String {
    format!("{platform}_hid.csv")
}

/// All tables generated for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    /// Keymap name, used in generated file and symbol names.
    pub name: String,
    /// Platform code to raw SDK name.
    pub scancodes: Vec<Record>,
    /// Platform code to HID display name.
    pub display_names: Vec<Record>,
    /// Platform code to HID code, 0 where unmapped.
    pub to_hid: Vec<u32>,
    /// HID code to platform code, 0 where unmapped.
    pub from_hid: Vec<u32>,
    /// Declared element width of the translation tables.
    pub translation_width: Width,
}

impl Keymap {
    /// Join the tables of one platform.
    pub fn assemble(
        name: &str,
        hid: &[Record],
        scancodes: Vec<Record>,
        mapping: &[(String, String)],
        translation_width: Width,
    ) -> Result<Self> {
        let scancodes_table = format!("{name} scancodes");
        let Some(max_code) = scancodes.iter().map(|(c, _)| *c).max() else {
            return Err(Error::EmptyTable {
                table: scancodes_table,
            });
        };
        let Some(max_hid) = hid.iter().map(|(c, _)| *c).max() else {
            return Err(Error::EmptyTable {
                table: HID_FILE.to_string(),
            });
        };

        let mut code_by_raw: BTreeMap<&str, u32> = BTreeMap::new();
        for (code, raw) in &scancodes {
            code_by_raw.entry(raw.as_str()).or_insert(*code);
        }
        let mut hid_by_name: BTreeMap<&str, u32> = BTreeMap::new();
        for (code, hid_name) in hid {
            hid_by_name.entry(hid_name.as_str()).or_insert(*code);
        }

        let mut display_names = Vec::with_capacity(mapping.len());
        // Slots stay `None` until assigned, since 0 is a valid code.
        let mut to_hid: Vec<Option<u32>> = vec![None; dense_len(&scancodes_table, max_code)?];
        let mut from_hid: Vec<Option<u32>> = vec![None; dense_len(HID_FILE, max_hid)?];
        for (raw, hid_name) in mapping {
            let code = *code_by_raw
                .get(raw.as_str())
                .ok_or_else(|| Error::UnknownName {
                    table: scancodes_table.clone(),
                    name: raw.clone(),
                })?;
            let hid_code = *hid_by_name
                .get(hid_name.as_str())
                .ok_or_else(|| Error::UnknownName {
                    table: HID_FILE.to_string(),
                    name: hid_name.clone(),
                })?;
            display_names.push((code, hid_name.clone()));

            match to_hid[code as usize] {
                None => to_hid[code as usize] = Some(hid_code),
                Some(prev) if prev != hid_code => {
                    warn!(keymap = name, raw = %raw, "code {code} already maps to HID {prev}");
                }
                Some(_) => {}
            }
            match from_hid[hid_code as usize] {
                None => from_hid[hid_code as usize] = Some(code),
                Some(prev) if prev != code => {
                    warn!(
                        keymap = name,
                        hid = %hid_name,
                        "HID {hid_code} already maps to code {prev}"
                    );
                }
                Some(_) => {}
            }
        }
        let to_hid: Vec<u32> = to_hid.into_iter().map(Option::unwrap_or_default).collect();
        let from_hid: Vec<u32> = from_hid.into_iter().map(Option::unwrap_or_default).collect();

        debug!(
            keymap = name,
            scancodes = scancodes.len(),
            mapped = display_names.len(),
            "assembled keymap"
        );
        Ok(Self {
            name: name.to_string(),
            scancodes,
            display_names,
            to_hid,
            from_hid,
            translation_width,
        })
    }

    /// Read the tables for `platform` from `data_dir` and join them.
    pub fn load(
        data_dir: &Path,
        name: &str,
        platform: &str,
        hid: &[Record],
        translation_width: Width,
    ) -> Result<Self> {
        let scancodes = read_file(data_dir, &scancodes_file(platform), read_records)?;
        let mapping_name = mapping_file(platform);
        let mapping = read_file(data_dir, &mapping_name, read_name_pairs)?;
        Self::assemble(name, hid, scancodes, &mapping, translation_width)
            .map_err(|e| e.in_file(mapping_name))
    }
}

/// Read the canonical HID table from `data_dir`.
pub fn load_hid(data_dir: &Path) -> Result<Vec<Record>> {
    read_file(data_dir, HID_FILE, read_records)
}
