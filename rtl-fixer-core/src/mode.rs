//! Display modes cycled by the toolbar toggle
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ClassNames;

/// Three-way display state controlling style application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Fixer disabled, every element is left as the host page renders it.
    Off,
    /// Arabic elements are flipped to RTL and right aligned.
    #[default]
    RightAlign,
    /// Arabic elements are flipped to RTL and justified.
    Justify,
}

impl Mode {
    pub const ALL: [Self; 3] = [Self::Off, Self::RightAlign, Self::Justify];

    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::RightAlign => 1,
            Self::Justify => 2,
        }
    }

    /// Map any counter value onto the cycle.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 3 {
            0 => Self::Off,
            1 => Self::RightAlign,
            _ => Self::Justify,
        }
    }

    /// The mode a click advances to.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Alignment class applied next to the base typography class, `None` when off.
    #[must_use]
    pub fn alignment_class(self, classes: &ClassNames) -> Option<&str> {
        match self {
            Self::Off => None,
            Self::RightAlign => Some(classes.align_right.as_str()),
            Self::Justify => Some(classes.align_justify.as_str()),
        }
    }

    /// Button caption for this mode.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "ع",
            Self::RightAlign => "ع ⇥",
            Self::Justify => "ع ☰",
        }
    }

    /// Tooltip shown on the toggle button.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Off => "RTL fixer: off",
            Self::RightAlign => "RTL fixer: right aligned",
            Self::Justify => "RTL fixer: justified",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::RightAlign => "right-align",
            Self::Justify => "justify",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cycles_through_all_modes() {
        assert_eq!(Mode::Off.next(), Mode::RightAlign);
        assert_eq!(Mode::RightAlign.next(), Mode::Justify);
        assert_eq!(Mode::Justify.next(), Mode::Off);
    }

    #[test]
    fn from_index_wraps() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(mode.index()), mode);
            assert_eq!(Mode::from_index(mode.index() + 3), mode);
        }
    }

    #[test]
    fn default_is_enabled() {
        assert_eq!(Mode::default(), Mode::RightAlign);
        assert!(Mode::default().is_enabled());
        assert!(!Mode::Off.is_enabled());
    }

    #[test]
    fn alignment_class_follows_mode() {
        let classes = ClassNames::default();
        assert_eq!(Mode::Off.alignment_class(&classes), None);
        assert_eq!(
            Mode::RightAlign.alignment_class(&classes),
            Some("rtl-align-right")
        );
        assert_eq!(
            Mode::Justify.alignment_class(&classes),
            Some("rtl-align-justify")
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Mode::RightAlign).unwrap();
        assert_eq!(json, "\"right_align\"");
        let parsed: Mode = serde_json::from_str("\"justify\"").unwrap();
        assert_eq!(parsed, Mode::Justify);
    }
}
