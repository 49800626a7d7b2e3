//! Loading assumptions and a starting scenario from YAML or JSON files.

use crate::{validate_assumptions, validate_inputs, Assumptions, ScenarioInputs, ValidationError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Contents of a studio config file. Missing sections fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub assumptions: Assumptions,
    pub scenario: ScenarioInputs,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(String),
    #[error("yaml error: {0}")]
    Yaml(String),
    #[error("json error: {0}")]
    Json(String),
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

/// On-disk encoding of a config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.json` selects JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Parse and validate config text.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<StudioConfig, ConfigError> {
    let cfg: StudioConfig = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    validate_assumptions(&cfg.assumptions)?;
    validate_inputs(&cfg.scenario)?;
    Ok(cfg)
}

/// Read, parse and validate a config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<StudioConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let cfg = parse_config(&text, ConfigFormat::from_path(path))?;
    info!(
        path = %path.display(),
        curve_points = cfg.assumptions.willingness.len(),
        competitors = cfg.assumptions.competitors.len(),
        "loaded studio config"
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_yaml_is_all_defaults() {
        let cfg = parse_config("{}", ConfigFormat::Yaml).unwrap();
        assert_eq!(cfg, StudioConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_only_named_fields() {
        let text = "
scenario:
  price: 119
  direct_mix_pct: 70
assumptions:
  costs:
    payment_fee_pct: 0.025
";
        let cfg = parse_config(text, ConfigFormat::Yaml).unwrap();
        assert_eq!(cfg.scenario.price, Decimal::new(119, 0));
        assert_eq!(cfg.scenario.direct_mix_pct, 70);
        assert_eq!(cfg.scenario.bundle_qty, 3);
        assert_eq!(cfg.assumptions.costs.payment_fee_pct, Decimal::new(25, 3));
        assert_eq!(cfg.assumptions.costs.direct_fulfillment, Decimal::new(45, 0));
        assert_eq!(cfg.assumptions.willingness.len(), 4);
    }

    #[test]
    fn json_is_selected_by_extension() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("studio.JSON")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("studio.yaml")),
            ConfigFormat::Yaml
        );
        let cfg = parse_config(r#"{"scenario":{"target_buyers":1000}}"#, ConfigFormat::Json)
            .unwrap();
        assert_eq!(cfg.scenario.target_buyers, 1000);
    }

    #[test]
    fn invalid_scenario_is_rejected() {
        let err = parse_config("scenario:\n  direct_mix_pct: 150\n", ConfigFormat::Yaml)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::OutOfRange("direct_mix_pct"))
        ));
    }

    #[test]
    fn short_curve_is_rejected() {
        let text = "
assumptions:
  willingness:
    - price: 99
      fraction_willing: 0.6
";
        let err = parse_config(text, ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::CurveTooShort(1))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
