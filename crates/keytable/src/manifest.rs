//! The build manifest: which keymaps to generate, and where.
//!
//! Manifests are RON files:
//!
//! ```ron
//! (
//!     data_dir: "data",
//!     out_dir: "src",
//!     include: "keytable.h",
//!     keymaps: [
//!         (name: "linux", platform: linux),
//!         (name: "windows", platform: windows, translation_width: U8),
//!     ],
//! )
//! ```
//!
//! Relative directories are resolved against the manifest's own directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::info;

use crate::{
    Error, Keymap, OutputDir, Platform, Result, Width,
    emit::{DEFAULT_INCLUDE, emit_keymap},
    keymap::load_hid,
};

/// Platforms generated when no manifest lists keymaps: those whose tables
/// ship in `data/`. Other platforms need `keytable extract` and a mapping
/// table first.
pub const DEFAULT_PLATFORMS: &[Platform] = &[Platform::Windows];

/// One keymap to generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeymapSpec {
    /// Keymap name, used in file and symbol names.
    pub name: String,
    /// Platform whose data files describe the keymap.
    pub platform: Platform,
    /// Element width of the translation arrays.
    #[serde(default)]
    pub translation_width: Width,
}

impl KeymapSpec {
    /// A keymap named after its platform with 8-bit translation tables.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            name: platform.name().to_string(),
            platform,
            translation_width: Width::U8,
        }
    }
}

/// Top-level build description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory containing the input CSV tables.
    pub data_dir: PathBuf,
    /// Directory generated sources are written to.
    pub out_dir: PathBuf,
    /// Header included by every generated `.c` file.
    pub include: String,
    /// Keymaps to generate, in order.
    pub keymaps: Vec<KeymapSpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("src"),
            include: DEFAULT_INCLUDE.to_string(),
            keymaps: DEFAULT_PLATFORMS
                .iter()
                .copied()
                .map(KeymapSpec::for_platform)
                .collect(),
        }
    }
}

impl Manifest {
    /// Parse a manifest from RON text.
    pub fn parse(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Config {
            message: e.to_string(),
        })
    }

    /// Load a manifest from `path`, resolving relative directories against
    /// the directory containing it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::Io(e).in_file(path))?;
        let mut manifest = Self::parse(&text).map_err(|e| e.in_file(path))?;
        if let Some(base) = path.parent() {
            manifest.data_dir = base.join(&manifest.data_dir);
            manifest.out_dir = base.join(&manifest.out_dir);
        }
        Ok(manifest)
    }

    /// Generate every keymap, stopping at the first error.
    pub fn generate(&self) -> Result<()> {
        fs::create_dir_all(&self.out_dir)
            .map_err(|source| Error::Create { source }.in_file(&self.out_dir))?;
        let out = OutputDir::new(&self.out_dir);
        let hid = load_hid(&self.data_dir)?;
        for spec in &self.keymaps {
            let keymap = Keymap::load(
                &self.data_dir,
                &spec.name,
                spec.platform.name(),
                &hid,
                spec.translation_width,
            )?;
            emit_keymap(&out, &keymap, &self.include)?;
        }
        info!(
            keymaps = self.keymaps.len(),
            out_dir = %self.out_dir.display(),
            "generation complete"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let m = Manifest::parse(
            r#"(
                data_dir: "tables",
                out_dir: "gen",
                include: "keys.h",
                keymaps: [
                    (name: "linux", platform: linux, translation_width: U16),
                    (name: "mac", platform: macos),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(m.data_dir, PathBuf::from("tables"));
        assert_eq!(m.include, "keys.h");
        assert_eq!(m.keymaps.len(), 2);
        assert_eq!(m.keymaps[0].translation_width, Width::U16);
        assert_eq!(m.keymaps[1].platform, Platform::Macos);
        assert_eq!(m.keymaps[1].translation_width, Width::U8);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let m = Manifest::parse("(out_dir: \"build\")").unwrap();
        assert_eq!(m.out_dir, PathBuf::from("build"));
        assert_eq!(m.data_dir, PathBuf::from("data"));
        assert_eq!(m.include, DEFAULT_INCLUDE);
        assert_eq!(m.keymaps, Manifest::default().keymaps);
    }

    #[test]
    fn default_covers_shipped_platforms() {
        let names: Vec<String> = Manifest::default()
            .keymaps
            .into_iter()
            .map(|k| k.name)
            .collect();
        assert_eq!(names, ["windows"]);
    }

    #[test]
    fn invalid_manifest_is_config_error() {
        assert!(matches!(
            Manifest::parse("(keymaps: [(name: 1)])"),
            Err(Error::Config { .. })
        ));
    }
}
