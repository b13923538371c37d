use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::{contrast_ratio, Hsl, Rgb};

pub const CONFIG_PATH_ENV: &str = "VOTEBOARD_PALETTE_CONFIG";

/// Inclusive sweep over percentages. Runs downward when `from > to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sweep {
    pub from: u8,
    pub to: u8,
    pub step: u8,
}

impl Sweep {
    pub const fn new(from: u8, to: u8, step: u8) -> Self {
        Self { from, to, step }
    }

    pub fn values(self) -> Box<dyn Iterator<Item = u8>> {
        let step = usize::from(self.step.max(1));
        if self.from <= self.to {
            Box::new((self.from..=self.to).step_by(step))
        } else {
            Box::new((self.to..=self.from).rev().step_by(step))
        }
    }
}

/// Tuning for the contrast-checked color search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Minimum WCAG contrast ratio against `reference`.
    pub min_contrast: f64,
    pub reference: Rgb,
    /// Outer loop of the search.
    pub lightness: Sweep,
    /// Inner loop of the search.
    pub saturation: Sweep,
    pub fallback: Hsl,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            min_contrast: 4.5,
            reference: Rgb::BLACK,
            lightness: Sweep::new(70, 80, 2),
            saturation: Sweep::new(60, 30, 10),
            fallback: Hsl::new(0, 0, 90),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid palette config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl PaletteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_contrast.is_finite() || self.min_contrast < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "min_contrast must be a finite ratio >= 1, got {}",
                self.min_contrast
            )));
        }

        for (name, sweep) in [("lightness", self.lightness), ("saturation", self.saturation)] {
            if sweep.step == 0 {
                return Err(ConfigError::Invalid(format!("{name} step must be positive")));
            }
            if sweep.from > 100 || sweep.to > 100 {
                return Err(ConfigError::Invalid(format!(
                    "{name} sweep {}..={} exceeds 100%",
                    sweep.from, sweep.to
                )));
            }
        }

        let Hsl {
            hue,
            saturation,
            lightness,
        } = self.fallback;
        if hue >= 360 || saturation > 100 || lightness > 100 {
            return Err(ConfigError::Invalid(format!(
                "fallback {} is out of range",
                self.fallback
            )));
        }

        let fallback_contrast = contrast_ratio(self.fallback.to_rgb(), self.reference);
        if fallback_contrast < self.min_contrast {
            return Err(ConfigError::Invalid(format!(
                "fallback {} has contrast {fallback_contrast:.2} against {}, below min_contrast {}",
                self.fallback, self.reference, self.min_contrast
            )));
        }

        Ok(())
    }

    /// Loads the config named by `VOTEBOARD_PALETTE_CONFIG`, or the defaults
    /// when the variable is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: Self = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };

        if let Err(err) = config.validate() {
            tracing::warn!(path = %path.display(), %err, "rejecting palette config");
            return Err(err);
        }

        Ok(config)
    }
}

pub fn config_path() -> Option<PathBuf> {
    env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_sweeps_match_search_order() {
        let config = PaletteConfig::default();
        let lightness: Vec<u8> = config.lightness.values().collect();
        let saturation: Vec<u8> = config.saturation.values().collect();

        assert_eq!(lightness, vec![70, 72, 74, 76, 78, 80]);
        assert_eq!(saturation, vec![60, 50, 40, 30]);
    }

    #[test]
    fn single_value_sweep() {
        let values: Vec<u8> = Sweep::new(55, 55, 5).values().collect();
        assert_eq!(values, vec![55]);
    }

    #[test]
    fn default_config_is_valid() {
        PaletteConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn zero_step_is_rejected() {
        let config = PaletteConfig {
            saturation: Sweep::new(60, 30, 0),
            ..PaletteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn sub_unity_contrast_is_rejected() {
        let config = PaletteConfig {
            min_contrast: 0.5,
            ..PaletteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unreadable_fallback_is_rejected() {
        let light_on_white = PaletteConfig {
            reference: Rgb::WHITE,
            ..PaletteConfig::default()
        };
        let err = light_on_white.validate().expect_err("fallback too light");
        assert!(err.to_string().contains("fallback hsl(0, 0%, 90%)"), "{err}");

        let unreachable = PaletteConfig {
            min_contrast: 21.0,
            ..PaletteConfig::default()
        };
        assert!(matches!(unreachable.validate(), Err(ConfigError::Invalid(_))));

        let dark_on_white = PaletteConfig {
            reference: Rgb::WHITE,
            fallback: Hsl::new(0, 0, 20),
            ..PaletteConfig::default()
        };
        dark_on_white.validate().expect("dark fallback is readable on white");
    }

    #[test]
    fn load_from_path_fills_missing_fields_with_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("palette.json");
        fs::write(&path, r#"{"min_contrast": 7.0}"#).expect("write config");

        let config = PaletteConfig::load_from_path(&path).expect("load config");

        assert_eq!(config.min_contrast, 7.0);
        assert_eq!(config.lightness, PaletteConfig::default().lightness);
        assert_eq!(config.fallback, Hsl::new(0, 0, 90));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempdir().expect("tempdir");
        let config =
            PaletteConfig::load_from_path(dir.path().join("absent.json")).expect("load config");
        assert_eq!(config, PaletteConfig::default());
    }

    #[test]
    fn load_from_path_rejects_invalid_values() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("palette.json");
        fs::write(&path, r#"{"lightness": {"from": 70, "to": 120, "step": 2}}"#)
            .expect("write config");

        let err = PaletteConfig::load_from_path(&path).expect_err("invalid sweep");
        assert!(err.to_string().contains("lightness"));
    }

    #[test]
    fn load_from_path_reports_malformed_json() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("palette.json");
        fs::write(&path, "{not json").expect("write config");

        let err = PaletteConfig::load_from_path(&path).expect_err("malformed");
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn load_uses_env_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("palette.json");
        fs::write(&path, r#"{"reference": {"r": 255, "g": 255, "b": 255}, "fallback": {"hue": 0, "saturation": 0, "lightness": 20}}"#)
            .expect("write config");
        env::set_var(CONFIG_PATH_ENV, &path);
        struct Reset;
        impl Drop for Reset {
            fn drop(&mut self) {
                env::remove_var(CONFIG_PATH_ENV);
            }
        }
        let _reset = Reset;

        let config = PaletteConfig::load().expect("load config");
        assert_eq!(config.reference, Rgb::WHITE);
    }
}
