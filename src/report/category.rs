//! Cost categories: which samples feed which model.

use crate::aggregator::Accumulator;
use crate::model::{LinearModel, Observation};
use crate::utils::config::{
    AnalysisConfig, BLOCK_FINALIZATION_FILE, FETCH_DATA_FILE, TX_OVERHEAD_FILE, TX_REGISTER_FILE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tick cost fitted and checked separately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Fetching a new batch of input: ticks ~ size + nb_tx
    Fetch,
    /// Storing a transaction object: ticks ~ tx_size
    TxRegister,
    /// Finalizing a block: ticks ~ nb_tx
    BlockFinalization,
    /// Executing a transfer: ticks ~ tx_size
    TxOverhead,
}

impl CostCategory {
    pub const ALL: [CostCategory; 4] = [
        CostCategory::Fetch,
        CostCategory::TxRegister,
        CostCategory::BlockFinalization,
        CostCategory::TxOverhead,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CostCategory::Fetch => "Fetch Analysis",
            CostCategory::TxRegister => "Transaction Registering Analysis",
            CostCategory::BlockFinalization => "Block Finalization Analysis",
            CostCategory::TxOverhead => "Transaction Overhead Analysis",
        }
    }

    pub fn predictor_names(self) -> &'static [&'static str] {
        match self {
            CostCategory::Fetch => &["size", "nb_tx"],
            CostCategory::TxRegister | CostCategory::TxOverhead => &["tx_size"],
            CostCategory::BlockFinalization => &["nb_tx"],
        }
    }

    /// Single-predictor variants fitted for information only
    pub fn variants(self) -> &'static [usize] {
        match self {
            // nb_tx alone, size alone
            CostCategory::Fetch => &[1, 0],
            _ => &[],
        }
    }

    pub fn reference_model(self, config: &AnalysisConfig) -> &LinearModel {
        let models = &config.models;
        match self {
            CostCategory::Fetch => &models.fetch,
            CostCategory::TxRegister => &models.tx_register,
            CostCategory::BlockFinalization => &models.block_finalization,
            CostCategory::TxOverhead => &models.tx_overhead,
        }
    }

    pub fn csv_file(self) -> &'static str {
        match self {
            CostCategory::Fetch => FETCH_DATA_FILE,
            CostCategory::TxRegister => TX_REGISTER_FILE,
            CostCategory::BlockFinalization => BLOCK_FINALIZATION_FILE,
            CostCategory::TxOverhead => TX_OVERHEAD_FILE,
        }
    }

    pub fn csv_columns(self) -> &'static [&'static str] {
        match self {
            CostCategory::Fetch => &["benchmark_name", "size", "nb_tx", "ticks"],
            CostCategory::TxRegister | CostCategory::TxOverhead => {
                &["benchmark_name", "tx_size", "ticks"]
            }
            CostCategory::BlockFinalization => &["benchmark_name", "nb_tx", "size", "ticks"],
        }
    }

    /// Complete samples of this category, in input order
    pub fn observations(self, acc: &Accumulator) -> Vec<Observation> {
        match self {
            CostCategory::Fetch => acc
                .fetch
                .iter()
                .map(|s| Observation::new(vec![s.size, s.nb_tx], s.ticks))
                .collect(),
            CostCategory::TxRegister => acc
                .tx_register
                .iter()
                .map(|s| Observation::new(vec![s.tx_size], s.ticks))
                .collect(),
            CostCategory::BlockFinalization => acc
                .blocks
                .iter()
                .filter_map(|b| b.finalize_ticks.map(|t| Observation::new(vec![b.nb_tx], t)))
                .collect(),
            CostCategory::TxOverhead => acc
                .transfers
                .iter()
                .filter_map(|s| s.tx_size.map(|size| Observation::new(vec![size], s.ticks)))
                .collect(),
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfinalized_blocks_are_not_observed() {
        let mut acc = Accumulator::new();
        acc.open_block(None, "a", 2.0, None).unwrap();
        acc.finalize_block(None, 700_000.0).unwrap();
        acc.open_block(None, "a", 4.0, None).unwrap();

        let observations = CostCategory::BlockFinalization.observations(&acc);

        assert_eq!(observations, vec![Observation::new(vec![2.0], 700_000.0)]);
    }

    #[test]
    fn test_reference_model_arity_matches_predictors() {
        let config = AnalysisConfig::default();
        for category in CostCategory::ALL {
            assert_eq!(
                category.reference_model(&config).coefficients.len(),
                category.predictor_names().len()
            );
        }
    }
}
