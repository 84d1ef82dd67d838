//! JSON-based configuration loader
//!
//! Any field left out of the file keeps its default, so a file holding only
//! `{"financing": {"dscr_rate": 0.07}}` is valid.

use super::EngineConfig;
use crate::error::EngineResult;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default location of the engine configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/engine.json";

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> EngineResult<EngineConfig> {
    let file = File::open(path)?;
    load_config_from_reader(BufReader::new(file))
}

/// Load configuration from any reader (e.g., string buffer)
pub fn load_config_from_reader<R: Read>(reader: R) -> EngineResult<EngineConfig> {
    let config: EngineConfig = serde_json::from_reader(reader)?;
    log::debug!(
        "Loaded engine config: dscr_rate={}, max_iterations={}",
        config.financing.dscr_rate,
        config.solver.max_iterations
    );
    Ok(config)
}

/// Load configuration from the default path, falling back to defaults when absent
pub fn load_default_config() -> EngineResult<EngineConfig> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if path.exists() {
        load_config(path)
    } else {
        log::debug!("{} not found, using built-in defaults", DEFAULT_CONFIG_PATH);
        Ok(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_partial_override() {
        let json = r#"{"financing": {"dscr_rate": 0.07}, "solver": {"max_iterations": 80}}"#;
        let config = load_config_from_reader(json.as_bytes()).unwrap();

        assert_eq!(config.financing.dscr_rate, 0.07);
        assert_eq!(config.solver.max_iterations, 80);
        // Untouched fields keep their defaults
        assert_eq!(config.financing.dscr_amortization_years, 30.0);
        assert_eq!(config.solver.tolerance, 0.001);
        assert_eq!(config.income.str_rental.noi_margin, 0.55);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = load_config_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let result = load_config_from_reader("{ not json".as_bytes());
        assert!(matches!(result, Err(EngineError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join("property_metrics_loader_test.json");
        std::fs::write(&path, r#"{"fees": {"assignment_fee_percent": 0.03}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.fees.assignment_fee_percent, 0.03);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config = load_default_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/engine.json"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
