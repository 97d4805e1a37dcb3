//! Configuration and constants for the analysis.
//!
//! Tick model constants were estimated from earlier benchmark runs and
//! should only be updated when the benchmarks are executed again.

use crate::model::LinearModel;
use crate::report::CostCategory;
use crate::utils::error::ConfigError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// The minimum amount of gas for an ethereum transaction (a plain transfer).
pub const BASE_GAS: f64 = 21_000.0;

/// Fixed dispatch overhead of `run_transaction`, observed on transfers.
pub const RUN_TRANSACTION_OVERHEAD: f64 = 560_000.0;

/// Storing the transaction object above this many ticks is taken as a
/// contract creation when the record carries no explicit kind.
pub const CREATE_STORE_TICKS_CUTOFF: f64 = 600_000.0;

// Output file names, written in the output directory
pub const FETCH_DATA_FILE: &str = "fetch_data.csv";
pub const TX_REGISTER_FILE: &str = "tx_register.csv";
pub const BLOCK_FINALIZATION_FILE: &str = "block_finalization.csv";
pub const TX_OVERHEAD_FILE: &str = "tx_overhead.csv";

/// Reference fetch model: 165000 + 600 * size + 0 * nb_tx
pub const FETCH_MODEL_INTERCEPT: f64 = 165_000.0;
pub const FETCH_MODEL_COEF_SIZE: f64 = 600.0;
pub const FETCH_MODEL_COEF_NB_TX: f64 = 0.0;

pub const TX_REGISTER_MODEL_INTERCEPT: f64 = 200_000.0;
pub const TX_REGISTER_MODEL_COEF_SIZE: f64 = 880.0;

pub const BLOCK_FINALIZATION_MODEL_INTERCEPT: f64 = 550_000.0;
pub const BLOCK_FINALIZATION_MODEL_COEF_NB_TX: f64 = 250_000.0;

pub const TX_OVERHEAD_MODEL_INTERCEPT: f64 = 560_000.0;
pub const TX_OVERHEAD_MODEL_COEF_SIZE: f64 = 0.0;

/// Complete analysis configuration
///
/// Every field has a default, so a TOML file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Gas of a plain value transfer
    pub base_gas: f64,

    /// Ticks subtracted from `run_transaction_ticks` of contract calls
    pub run_transaction_overhead: f64,

    /// Store-object tick threshold of the create heuristic
    pub create_store_ticks_cutoff: f64,

    /// Directory receiving the per-category CSV dumps
    pub output_dir: PathBuf,

    /// Previously accepted cost models, checked against the observations
    pub models: ReferenceModels,
}

/// Reference models, one per cost category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceModels {
    /// Predictors: size, nb_tx
    pub fetch: LinearModel,

    /// Predictor: tx_size
    pub tx_register: LinearModel,

    /// Predictor: nb_tx
    pub block_finalization: LinearModel,

    /// Predictor: tx_size
    pub tx_overhead: LinearModel,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_gas: BASE_GAS,
            run_transaction_overhead: RUN_TRANSACTION_OVERHEAD,
            create_store_ticks_cutoff: CREATE_STORE_TICKS_CUTOFF,
            output_dir: PathBuf::from("."),
            models: ReferenceModels::default(),
        }
    }
}

impl Default for ReferenceModels {
    fn default() -> Self {
        Self {
            fetch: LinearModel::new(
                FETCH_MODEL_INTERCEPT,
                vec![FETCH_MODEL_COEF_SIZE, FETCH_MODEL_COEF_NB_TX],
            ),
            tx_register: LinearModel::new(
                TX_REGISTER_MODEL_INTERCEPT,
                vec![TX_REGISTER_MODEL_COEF_SIZE],
            ),
            block_finalization: LinearModel::new(
                BLOCK_FINALIZATION_MODEL_INTERCEPT,
                vec![BLOCK_FINALIZATION_MODEL_COEF_NB_TX],
            ),
            tx_overhead: LinearModel::new(
                TX_OVERHEAD_MODEL_INTERCEPT,
                vec![TX_OVERHEAD_MODEL_COEF_SIZE],
            ),
        }
    }
}

impl AnalysisConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Check every reference model has one coefficient per predictor
    ///
    /// # Errors
    /// * `ConfigError::InvalidModel` - coefficient count differs from the
    ///   category's predictor count
    pub fn validate(&self) -> Result<(), ConfigError> {
        let models = &self.models;
        let entries = [
            ("fetch", &models.fetch, CostCategory::Fetch),
            ("tx_register", &models.tx_register, CostCategory::TxRegister),
            (
                "block_finalization",
                &models.block_finalization,
                CostCategory::BlockFinalization,
            ),
            ("tx_overhead", &models.tx_overhead, CostCategory::TxOverhead),
        ];
        for (name, model, category) in entries {
            let expected = category.predictor_names().len();
            if model.coefficients.len() != expected {
                return Err(ConfigError::InvalidModel {
                    model: name.to_string(),
                    expected,
                    got: model.coefficients.len(),
                });
            }
        }
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Load an analysis configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::InvalidModel` - If a reference model has the wrong arity
///
/// # Example
/// ```ignore
/// let config = load_config("tick_models.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let contents = std::fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
            base_gas = 30000.0

            [models.fetch]
            intercept = 1.0
            coefficients = [2.0, 3.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.base_gas, 30_000.0);
        assert_eq!(config.run_transaction_overhead, RUN_TRANSACTION_OVERHEAD);
        assert_eq!(config.models.fetch.coefficients, vec![2.0, 3.0]);
        assert_eq!(config.models.tx_register, ReferenceModels::default().tx_register);
    }

    #[test]
    fn test_reference_model_arity_is_checked() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analysis.toml");
        std::fs::write(&path, "[models.fetch]\nintercept = 165000.0\ncoefficients = [600.0]\n")
            .unwrap();

        let err = load_config(&path).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidModel { ref model, expected: 2, got: 1 } if model == "fetch"
        ));
    }

    #[test]
    fn test_valid_file_loads() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analysis.toml");
        std::fs::write(&path, "[models.tx_overhead]\nintercept = 1.0\ncoefficients = [2.0]\n")
            .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.models.tx_overhead, LinearModel::new(1.0, vec![2.0]));
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = AnalysisConfig::default();
        let rendered = config.to_toml().unwrap();
        let parsed: AnalysisConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
