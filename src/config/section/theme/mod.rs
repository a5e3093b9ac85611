//! `[theme]` section configuration.
//!
//! Design tokens the stylesheet is generated from.
//!
//! # Example
//!
//! ```toml
//! [theme.palette]
//! purple_500 = "#8257E5"
//!
//! [theme.typography]
//! font_family = "Inter, sans-serif"
//!
//! [[theme.breakpoints]]
//! max_width = 1080
//! font_size = "93.75%"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Theme section configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSectionConfig {
    pub palette: Palette,
    pub typography: Typography,
    /// Root font-size steps, applied below each `max_width`.
    pub breakpoints: Vec<Breakpoint>,
}

/// Color tokens, each a `#RGB` or `#RRGGBB` hex string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub white: String,
    pub gray_50: String,
    pub gray_100: String,
    pub gray_200: String,
    pub gray_500: String,
    pub gray_800: String,
    pub green_500: String,
    pub purple_300: String,
    pub purple_400: String,
    pub purple_500: String,
    pub purple_800: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub font_family: String,
    pub font_weight: u16,
    pub base_size: String,
    pub h1_size: String,
    pub h2_size: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub max_width: u32,
    pub font_size: String,
}

impl Palette {
    /// `(css variable name, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("white", &self.white),
            ("gray-50", &self.gray_50),
            ("gray-100", &self.gray_100),
            ("gray-200", &self.gray_200),
            ("gray-500", &self.gray_500),
            ("gray-800", &self.gray_800),
            ("green-500", &self.green_500),
            ("purple-300", &self.purple_300),
            ("purple-400", &self.purple_400),
            ("purple-500", &self.purple_500),
            ("purple-800", &self.purple_800),
        ]
    }
}

impl Typography {
    /// Text-valued settings, by config key.
    fn text_values(&self) -> [(&'static str, &str); 4] {
        [
            ("font_family", &self.font_family),
            ("base_size", &self.base_size),
            ("h1_size", &self.h1_size),
            ("h2_size", &self.h2_size),
        ]
    }
}

impl ThemeSectionConfig {
    pub const PALETTE: FieldPath = FieldPath::new("theme.palette");
    pub const TYPOGRAPHY: FieldPath = FieldPath::new("theme.typography");
    pub const FONT_WEIGHT: FieldPath = FieldPath::new("theme.typography.font_weight");
    pub const BREAKPOINTS: FieldPath = FieldPath::new("theme.breakpoints");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (name, value) in self.palette.entries() {
            if !is_hex_color(value) {
                diag.error_with_hint(
                    Self::PALETTE,
                    format!("`{}` is not a hex color: {value:?}", name.replace('-', "_")),
                    "use #RGB or #RRGGBB",
                );
            }
        }

        for (name, value) in self.typography.text_values() {
            if value.trim().is_empty() {
                diag.error(Self::TYPOGRAPHY, format!("`{name}` must not be empty"));
            }
        }

        let weight = self.typography.font_weight;
        if !(100..=900).contains(&weight) {
            diag.error(Self::FONT_WEIGHT, format!("{weight} is outside 100..=900"));
        }

        for bp in &self.breakpoints {
            if bp.max_width == 0 || bp.font_size.trim().is_empty() {
                diag.error(
                    Self::BREAKPOINTS,
                    format!("invalid breakpoint ({}px, {:?})", bp.max_width, bp.font_size),
                );
            }
        }
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

impl Default for ThemeSectionConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            typography: Typography::default(),
            breakpoints: vec![
                Breakpoint {
                    max_width: 1080,
                    font_size: "93.75%".into(),
                },
                Breakpoint {
                    max_width: 720,
                    font_size: "87.5%".into(),
                },
            ],
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            white: "#FFF".into(),
            gray_50: "#F7F8FA".into(),
            gray_100: "#E6E8EB".into(),
            gray_200: "#AFB2B1".into(),
            gray_500: "#808080".into(),
            gray_800: "#494D4B".into(),
            green_500: "#04D361".into(),
            purple_300: "#9F75FF".into(),
            purple_400: "#9164FA".into(),
            purple_500: "#8257E5".into(),
            purple_800: "#6F48C9".into(),
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".into(),
            font_weight: 500,
            base_size: "1rem".into(),
            h1_size: "2rem".into(),
            h2_size: "1.5rem".into(),
        }
    }
}
