//! Theme modes and their color palettes.

use std::fmt;

use crate::value::{CssValue, TrustedValue};

/// Light or dark rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    /// Dark surfaces, light text.
    #[default]
    Dark,
    /// Light surfaces, dark text.
    Light,
}

impl ThemeMode {
    /// All modes, in attribute order.
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Dark, ThemeMode::Light];

    /// Parse an attribute value (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name.trim()))
    }

    /// Attribute spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The palette for this mode.
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &Palette::DARK,
            Self::Light => &Palette::LIGHT,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Theme colors shared by all widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Page-level background.
    pub background: TrustedValue,
    /// Card/panel surface.
    pub surface: TrustedValue,
    /// Primary text.
    pub text: TrustedValue,
    /// Secondary text.
    pub muted: TrustedValue,
    /// Form control fill.
    pub input_bg: TrustedValue,
    /// Borders and dividers.
    pub border: TrustedValue,
    /// Accent (buttons, links, focus rings).
    pub accent: TrustedValue,
    /// Accent when hovered.
    pub accent_hover: TrustedValue,
}

impl Palette {
    /// The dark palette.
    pub const DARK: Palette = Palette {
        background: CssValue::trusted("#0f172a"),
        surface: CssValue::trusted("rgba(30, 41, 59, 0.8)"),
        text: CssValue::trusted("#f1f5f9"),
        muted: CssValue::trusted("#cbd5e1"),
        input_bg: CssValue::trusted("rgba(15, 23, 42, 0.6)"),
        border: CssValue::trusted("rgba(51, 65, 85, 0.6)"),
        accent: CssValue::trusted("#3b82f6"),
        accent_hover: CssValue::trusted("#2563eb"),
    };

    /// The light palette.
    pub const LIGHT: Palette = Palette {
        background: CssValue::trusted("#f8fafc"),
        surface: CssValue::trusted("#ffffff"),
        text: CssValue::trusted("#1e293b"),
        muted: CssValue::trusted("#64748b"),
        input_bg: CssValue::trusted("#f8fafc"),
        border: CssValue::trusted("#e2e8f0"),
        accent: CssValue::trusted("#6366f1"),
        accent_hover: CssValue::trusted("#4f46e5"),
    };
}

/// Semantic status colors, independent of theme mode.
pub mod status {
    use crate::value::{CssValue, TrustedValue};

    /// Success.
    pub const SUCCESS: TrustedValue = CssValue::trusted("#10b981");
    /// Error.
    pub const ERROR: TrustedValue = CssValue::trusted("#ef4444");
    /// Warning.
    pub const WARNING: TrustedValue = CssValue::trusted("#f59e0b");
    /// Informational.
    pub const INFO: TrustedValue = CssValue::trusted("#3b82f6");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ThemeMode::from_name("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::from_name(" DARK "), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_name("sepia"), None);
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_ne!(ThemeMode::Dark.palette(), ThemeMode::Light.palette());
    }
}
