//! Unsigned integer widths for generated arrays.

use std::fmt;

use serde::Deserialize;

/// One of the three unsigned element widths a generated array can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum Width {
    /// `unsigned char`
    #[default]
    U8,
    /// `unsigned short`
    U16,
    /// `unsigned`
    U32,
}

impl Width {
    /// The narrowest width able to hold every value in `0..=maxval`.
    pub const fn for_max(maxval: u32) -> Self {
        if maxval < (1 << 8) {
            Self::U8
        } else if maxval < (1 << 16) {
            Self::U16
        } else {
            Self::U32
        }
    }

    /// The C type name for this width.
    pub const fn c_type(self) -> &'static str {
        match self {
            Self::U8 => "unsigned char",
            Self::U16 => "unsigned short",
            Self::U32 => "unsigned",
        }
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u32 {
        match self {
            Self::U8 => u8::MAX as u32,
            Self::U16 => u16::MAX as u32,
            Self::U32 => u32::MAX,
        }
    }

    /// True if `value` fits in this width.
    pub const fn holds(self, value: u32) -> bool {
        value <= self.max_value()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds() {
        assert_eq!(Width::for_max(0), Width::U8);
        assert_eq!(Width::for_max(255), Width::U8);
        assert_eq!(Width::for_max(256), Width::U16);
        assert_eq!(Width::for_max(65535), Width::U16);
        assert_eq!(Width::for_max(65536), Width::U32);
        assert_eq!(Width::for_max(u32::MAX), Width::U32);
    }

    #[test]
    fn selected_width_holds_its_max() {
        for v in [0, 1, 255, 256, 65535, 65536, u32::MAX] {
            assert!(Width::for_max(v).holds(v));
        }
        assert!(!Width::U8.holds(256));
        assert!(!Width::U16.holds(65536));
    }

    #[test]
    fn c_types() {
        assert_eq!(Width::U8.to_string(), "unsigned char");
        assert_eq!(Width::U16.c_type(), "unsigned short");
        assert_eq!(Width::U32.c_type(), "unsigned");
    }
}
