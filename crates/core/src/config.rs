//! Engine configuration: defaults, optional TOML file, env overrides.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::GlassWeights;

pub const DEFAULT_TOP_N_MATERIALS: usize = 3;
pub const DEFAULT_TOP_N_GLASS: usize = 5;
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_PREDICTION_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for the ranking pipelines. Weight changes must keep the glass
/// coefficients summing to 1.0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub top_n_materials: usize,
    pub top_n_glass: usize,
    pub acoustic_rw_floor: f64,
    pub glass_weights: GlassWeights,
    pub prediction: PredictionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Upper bound on in-flight predictor calls per request.
    pub max_concurrency: usize,
    /// Per-prediction deadline; a record whose prediction misses it is
    /// dropped from consideration.
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n_materials: DEFAULT_TOP_N_MATERIALS,
            top_n_glass: DEFAULT_TOP_N_GLASS,
            acoustic_rw_floor: crate::filter::ACOUSTIC_RW_FLOOR,
            glass_weights: GlassWeights::default(),
            prediction: PredictionConfig::default(),
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_ms: DEFAULT_PREDICTION_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    /// Load from an optional TOML file, apply `ENVELOP_*` env overrides,
    /// then validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config: Self = match path {
            Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };

        if let Some(value) = env_override("ENVELOP_TOP_N_MATERIALS")? {
            config.top_n_materials = value;
        }
        if let Some(value) = env_override("ENVELOP_TOP_N_GLASS")? {
            config.top_n_glass = value;
        }
        if let Some(value) = env_override("ENVELOP_PREDICTION_MAX_CONCURRENCY")? {
            config.prediction.max_concurrency = value;
        }
        if let Some(value) = env_override("ENVELOP_PREDICTION_TIMEOUT_MS")? {
            config.prediction.timeout_ms = value;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n_materials == 0 {
            return Err(ConfigError::Invalid("top_n_materials must be at least 1".to_owned()));
        }
        if self.top_n_glass == 0 {
            return Err(ConfigError::Invalid("top_n_glass must be at least 1".to_owned()));
        }
        if self.acoustic_rw_floor < 0.0 {
            return Err(ConfigError::Invalid("acoustic_rw_floor must not be negative".to_owned()));
        }
        let weight_sum = self.glass_weights.sum();
        if (weight_sum - 1.0).abs() > 1e-9 {
            return Err(ConfigError::Invalid(format!(
                "glass weights sum to {weight_sum}, expected 1.0"
            )));
        }
        if self.prediction.max_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "prediction.max_concurrency must be at least 1".to_owned(),
            ));
        }
        if self.prediction.timeout_ms == 0 {
            return Err(ConfigError::Invalid("prediction.timeout_ms must be positive".to_owned()));
        }
        Ok(())
    }
}

fn env_override<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{key} could not be parsed from {raw:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{ConfigError, EngineConfig};

    #[test]
    fn default_config_is_valid() {
        EngineConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let config = EngineConfig { top_n_materials: 0, ..EngineConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unbalanced_glass_weights_are_rejected() {
        let mut config = EngineConfig::default();
        config.glass_weights.thermal = 0.5;
        let error = config.validate().expect_err("weights no longer sum to 1.0");
        assert!(error.to_string().contains("glass weights"));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "top_n_materials = 5\n\n[prediction]\nmax_concurrency = 2\ntimeout_ms = 750"
        )
        .expect("write config");

        let config = EngineConfig::load(Some(file.path())).expect("loads");
        assert_eq!(config.top_n_materials, 5);
        assert_eq!(config.prediction.max_concurrency, 2);
        assert_eq!(config.prediction.timeout_ms, 750);
        // Untouched sections keep their defaults.
        assert_eq!(config.top_n_glass, 5);
    }

    #[test]
    fn file_with_bad_weights_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[glass_weights]\nthermal = 0.9\nsolar = 0.9\nclarity = 0.1\ndurability = 0.1\nacoustic = 0.1\ncost = 0.1"
        )
        .expect("write config");

        assert!(matches!(EngineConfig::load(Some(file.path())), Err(ConfigError::Invalid(_))));
    }
}
