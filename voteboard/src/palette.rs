//! Deterministic party colors derived from display names.
//!
//! Two variants exist. [`simple_color_for`] maps the name hue straight onto
//! a fixed saturation and lightness. [`color_for`] searches a
//! lightness/saturation grid for the first color readable against the
//! reference background. New call sites should use [`color_for`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{contrast_ratio, Hsl};
use crate::config::{ConfigError, PaletteConfig};
use crate::hash::hue_for_name;

const SIMPLE_SATURATION: u8 = 70;
const SIMPLE_LIGHTNESS: u8 = 60;

/// Color search parameterized by a validated [`PaletteConfig`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorAssigner {
    config: PaletteConfig,
}

impl ColorAssigner {
    pub fn new(config: PaletteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Returns the first grid candidate for `name` that meets the contrast
    /// threshold, or the configured fallback.
    pub fn assign(&self, name: &str) -> Hsl {
        let hue = hue_for_name(name);
        let PaletteConfig {
            min_contrast,
            reference,
            lightness,
            saturation,
            fallback,
        } = &self.config;

        for l in lightness.values() {
            for s in saturation.values() {
                let candidate = Hsl::new(hue, s, l);
                if contrast_ratio(candidate.to_rgb(), *reference) >= *min_contrast {
                    return candidate;
                }
            }
        }

        debug!(name, hue, min_contrast, "no grid color met contrast, using fallback");
        *fallback
    }

    pub fn color_for(&self, name: &str) -> String {
        self.assign(name).to_string()
    }
}

/// Contrast-checked color for `name` against black, as a CSS `hsl()` string.
pub fn color_for(name: &str) -> String {
    ColorAssigner::default().color_for(name)
}

/// Hue-only color for `name`: `hsl(hue, 70%, 60%)`.
pub fn simple_color_for(name: &str) -> String {
    simple_hsl(name).to_string()
}

fn simple_hsl(name: &str) -> Hsl {
    Hsl::new(hue_for_name(name), SIMPLE_SATURATION, SIMPLE_LIGHTNESS)
}

/// Which color variant a chart uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    Plain,
    #[default]
    Accessible,
}

impl ColorScheme {
    pub fn color(self, assigner: &ColorAssigner, name: &str) -> Hsl {
        match self {
            ColorScheme::Plain => simple_hsl(name),
            ColorScheme::Accessible => assigner.assign(name),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorScheme::Plain => "plain",
            ColorScheme::Accessible => "accessible",
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown color scheme {0:?}, expected `plain` or `accessible`")]
pub struct UnknownColorScheme(pub String);

impl FromStr for ColorScheme {
    type Err = UnknownColorScheme;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(ColorScheme::Plain),
            "accessible" => Ok(ColorScheme::Accessible),
            _ => Err(UnknownColorScheme(input.to_string())),
        }
    }
}
