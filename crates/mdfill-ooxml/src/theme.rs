//! Presentation theme
//!
//! All styling decisions for the generated document live here: heading
//! sizes, the accent color, the body font and the table style. A theme is
//! plain configuration, loadable from TOML, so alternate looks need no
//! code change.
//!
//! # Example
//!
//! ```
//! use mdfill_ooxml::Theme;
//!
//! let theme = Theme::from_toml_str(r#"
//! accent_color = "1F6F43"
//! heading_sizes = [28.0, 20.0, 15.0]
//! "#)?;
//! assert_eq!(theme.heading_size(1), Some(28.0));
//! assert_eq!(theme.table_style_id, "LightShading-Accent1");
//! # Ok::<(), mdfill_ooxml::OoxmlError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OoxmlError, Result};

/// Styling configuration applied when the package is assembled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Point sizes for heading levels 1, 2 and 3
    pub heading_sizes: [f32; 3],
    /// Heading color as a six-digit hex RGB value, without `#`
    pub accent_color: String,
    /// Body font family
    pub font_family: String,
    /// Body text point size
    pub body_size: f32,
    /// Style ID applied to every table
    pub table_style_id: String,
    /// Display name of the table style
    pub table_style_name: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading_sizes: [24.0, 18.0, 14.0],
            accent_color: "2E4C6B".to_string(),
            font_family: "Calibri".to_string(),
            body_size: 11.0,
            table_style_id: "LightShading-Accent1".to_string(),
            table_style_name: "Light Shading Accent 1".to_string(),
        }
    }
}

impl Theme {
    /// Parse and validate a theme from a TOML string.
    /// Missing keys keep their default values.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let theme: Theme = toml::from_str(toml_str)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Load and validate a theme from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Serialize the theme to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| OoxmlError::InvalidTheme(e.to_string()))
    }

    /// Point size for a heading level (1-3)
    pub fn heading_size(&self, level: u8) -> Option<f32> {
        let index = usize::from(level).checked_sub(1)?;
        self.heading_sizes.get(index).copied()
    }

    /// Check that every value can be written into a package
    pub fn validate(&self) -> Result<()> {
        let color = self.accent_color.trim_start_matches('#');
        if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(OoxmlError::InvalidTheme(format!(
                "accent_color must be six hex digits, got {:?}",
                self.accent_color
            )));
        }

        let sizes = self.heading_sizes.iter().chain(std::iter::once(&self.body_size));
        if let Some(bad) = sizes.copied().find(|s| !s.is_finite() || *s <= 0.0) {
            return Err(OoxmlError::InvalidTheme(format!(
                "font sizes must be positive, got {}",
                bad
            )));
        }

        if self.table_style_id.is_empty() || self.table_style_id.contains(char::is_whitespace) {
            return Err(OoxmlError::InvalidTheme(format!(
                "table_style_id must be a non-empty identifier, got {:?}",
                self.table_style_id
            )));
        }

        Ok(())
    }

    /// Accent color normalised to upper-case hex without `#`
    pub fn accent_hex(&self) -> String {
        self.accent_color.trim_start_matches('#').to_ascii_uppercase()
    }
}

/// Convert a point size to OOXML half-points
pub fn half_points(points: f32) -> u32 {
    (points * 2.0).round() as u32
}
