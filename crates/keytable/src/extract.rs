//! Extraction of keycode tables from platform SDK headers.

use std::{
    fmt,
    fs::{self, File},
    path::{Path, PathBuf},
    result,
    str::FromStr,
};

use regex::bytes::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    Error, Result,
    records::{Record, parse_code, write_records},
};

/// Linux input event header installed with the kernel headers.
const LINUX_HEADER: &str = "/usr/include/linux/input-event-codes.h";

/// Roots that may contain the macOS SDK.
const MACOS_SDK_ROOTS: &[&str] = &[
    "/",
    "/Applications/Xcode.app/Contents/Developer/Platforms/MacOSX.platform/Developer/SDKs/MacOSX.sdk",
    "/Library/Developer/CommandLineTools/SDKs/MacOSX.sdk",
];

/// Location of the Carbon `Events.h` header under an SDK root.
const MACOS_EVENTS_H: &str =
    "System/Library/Frameworks/Carbon.framework/Frameworks/HIToolbox.framework/Headers/Events.h";

/// A platform whose SDK headers define key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// `KEY_*` constants from `linux/input-event-codes.h`.
    Linux,
    /// `kVK_*` constants from Carbon `Events.h`.
    Macos,
    /// `VK_*` constants from `WinUser.h`.
    Windows,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Self; 3] = [Self::Linux, Self::Macos, Self::Windows];

    /// Lower-case platform name, as used in data file names.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
        }
    }

    /// Pattern capturing the key name and its value.
    const fn pattern(self) -> &'static str {
        match self {
            Self::Linux => r"#define\s+KEY_(\w+)\s+(\w+)",
            Self::Macos => r"kVK_(\w+)\s*=\s*(\w+)",
            Self::Windows => r"#define\s+VK_(\w+)\s+(\w+)",
        }
    }

    /// Locate the platform's SDK header on this machine.
    pub fn default_header(self) -> Result<PathBuf> {
        match self {
            Self::Linux => Ok(PathBuf::from(LINUX_HEADER)),
            Self::Macos => MACOS_SDK_ROOTS
                .iter()
                .map(|root| Path::new(root).join(MACOS_EVENTS_H))
                .find(|p| p.is_file())
                .ok_or_else(|| {
                    Error::HeaderNotFound(
                        "Could not find Carbon Events.h. Are the developer tools installed?"
                            .to_string(),
                    )
                }),
            Self::Windows => Err(Error::HeaderNotFound(
                "Cannot find WinUser.h automatically, use --input.".to_string(),
            )),
        }
    }

    /// Scrape `(code, name)` records from header text.
    ///
    /// Definitions whose value is not a numeric literal, such as Linux
    /// aliases defined in terms of another `KEY_` constant, are skipped.
    pub fn extract(self, text: &[u8]) -> Result<Vec<Record>> {
        let re = Regex::new(self.pattern())?;
        let mut out = Vec::new();
        for caps in re.captures_iter(text) {
            let name = String::from_utf8_lossy(&caps[1]);
            let value = String::from_utf8_lossy(&caps[2]);
            match parse_code(&value) {
                Some(code) => out.push((code, name.into_owned())),
                None => debug!(platform = self.name(), %name, %value, "skipping non-literal"),
            }
        }
        Ok(out)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown platform {s:?} (expected linux, macos, or windows)"))
    }
}

/// Extract the table for `platform` from `input`, or from the platform's
/// default header, and write it as records to `output`.
pub fn extract_to_file(platform: Platform, input: Option<&Path>, output: &Path) -> Result<usize> {
    let input = match input {
        Some(p) => p.to_path_buf(),
        None => platform.default_header()?,
    };
    let text = fs::read(&input).map_err(|e| Error::Io(e).in_file(&input))?;
    let table = platform.extract(&text).map_err(|e| e.in_file(&input))?;
    if table.is_empty() {
        return Err(Error::NoDefinitions.in_file(&input));
    }
    info!(
        platform = %platform,
        input = %input.display(),
        output = %output.display(),
        keys = table.len(),
        "extracted"
    );
    let mut file =
        File::create(output).map_err(|source| Error::Create { source }.in_file(output))?;
    write_records(&mut file, &table).map_err(|e| e.in_file(output))?;
    Ok(table.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_skips_aliases() {
        let text = b"#define KEY_RESERVED\t\t0\n\
                     #define KEY_ESC\t\t\t1\n\
                     #define KEY_SCREENLOCK\t\tKEY_COFFEE\n\
                     #define KEY_MAX\t\t\t0x2ff\n\
                     #define KEY_CNT\t\t\t(KEY_MAX+1)\n";
        let table = Platform::Linux.extract(text).unwrap();
        assert_eq!(
            table,
            vec![
                (0, "RESERVED".to_string()),
                (1, "ESC".to_string()),
                (0x2ff, "MAX".to_string())
            ]
        );
    }

    #[test]
    fn macos_enum_constants() {
        let text = b"enum {\n  kVK_ANSI_A                    = 0x00,\n  kVK_Return = 0x24,\n};\n";
        let table = Platform::Macos.extract(text).unwrap();
        assert_eq!(
            table,
            vec![(0, "ANSI_A".to_string()), (0x24, "Return".to_string())]
        );
    }

    #[test]
    fn windows_defines() {
        let text = b"#define VK_BACK           0x08\n#define VK_TAB            0x09\n";
        let table = Platform::Windows.extract(text).unwrap();
        assert_eq!(table, vec![(8, "BACK".to_string()), (9, "TAB".to_string())]);
    }

    #[test]
    fn platform_names_parse() {
        assert_eq!("linux".parse::<Platform>(), Ok(Platform::Linux));
        assert_eq!("MacOS".parse::<Platform>(), Ok(Platform::Macos));
        assert!("beos".parse::<Platform>().is_err());
        assert_eq!(Platform::Windows.to_string(), "windows");
    }

    #[test]
    fn windows_needs_explicit_input() {
        assert!(matches!(
            Platform::Windows.default_header(),
            Err(Error::HeaderNotFound(_))
        ));
    }
}
