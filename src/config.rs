//! Session configuration.
//!
//! A session is fixed at startup: tempo, random seed and how keys behave.
//! Values come from defaults, an optional TOML file, then command-line
//! flags, and are validated once before anything is built.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// How a key press affects its voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Each press flips the voice on or off; releases do nothing.
    #[default]
    Toggle,
    /// The voice sounds while the key is held.
    Hold,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub bpm: f64,
    pub seed: u64,
    pub mode: KeyMode,
    /// Preferred output rate; the device default is used when the device
    /// cannot run at it.
    pub sample_rate_hint: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bpm: 125.0,
            seed: 0,
            mode: KeyMode::Toggle,
            sample_rate_hint: 48_000.0,
        }
    }
}

impl SessionConfig {
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        info!(bpm = config.bpm, seed = config.seed, mode = ?config.mode, "loaded session config");
        Ok(config)
    }

    /// Same rules the clock network enforces, checked up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(ConfigError::InvalidTempo(self.bpm));
        }
        if !self.sample_rate_hint.is_finite() || self.sample_rate_hint <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate_hint));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.bpm, 125.0);
        assert_eq!(config.mode, KeyMode::Toggle);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_tempo() {
        let config = SessionConfig {
            bpm: 0.0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTempo(0.0)));

        let config = SessionConfig {
            bpm: f64::NAN,
            ..SessionConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTempo(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parses_partial_toml() {
        let config = SessionConfig::from_toml_str("bpm = 130.0\nmode = \"hold\"\n").unwrap();
        assert_eq!(config.bpm, 130.0);
        assert_eq!(config.mode, KeyMode::Hold);
        assert_eq!(config.seed, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn parse_errors_are_reported() {
        let err = SessionConfig::from_toml_str("bpm = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = SessionConfig::from_toml_str("bpm = -4.0").unwrap_err();
        assert_eq!(err, ConfigError::InvalidTempo(-4.0));
    }
}
