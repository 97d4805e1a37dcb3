//! Check a cost model against observed ticks.
//!
//! A cost model bounds tick budgets, so predicting fewer ticks than the
//! kernel consumed (an underestimate) is the failure being counted.

use crate::model::{CostModel, Observation};
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of checking one model against a sample set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Number of samples checked
    pub samples: usize,

    /// Samples where the model predicted fewer ticks than observed
    pub error_count: usize,

    /// Largest `observed - predicted` over all samples, 0 when empty
    pub max_error: f64,
}

impl Evaluation {
    pub fn has_underestimates(&self) -> bool {
        self.error_count > 0
    }
}

/// Evaluate a model on a sample set
///
/// **Public** - main entry point for model checking
///
/// `error = observed - predicted`; an error above zero is an underestimate.
pub fn evaluate<M: CostModel + ?Sized>(observations: &[Observation], model: &M) -> Evaluation {
    let errors: Vec<f64> = observations
        .iter()
        .map(|o| o.observed - model.predict(&o.predictors))
        .collect();

    let error_count = errors.iter().filter(|e| **e > 0.0).count();
    let max_error = errors.iter().copied().reduce(f64::max).unwrap_or(0.0);

    debug!(
        "Evaluated {} samples: {} underestimates, max error {}",
        errors.len(),
        error_count,
        max_error
    );

    Evaluation {
        samples: errors.len(),
        error_count,
        max_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinearModel;

    #[test]
    fn test_max_error_is_signed() {
        let model = LinearModel::new(100.0, vec![]);
        let observations = vec![
            Observation::new(vec![], 40.0),
            Observation::new(vec![], 90.0),
        ];

        let evaluation = evaluate(&observations, &model);

        assert_eq!(evaluation.error_count, 0);
        assert_eq!(evaluation.max_error, -10.0);
        assert!(!evaluation.has_underestimates());
    }

    #[test]
    fn test_empty_samples() {
        let evaluation = evaluate(&[], &LinearModel::new(1.0, vec![1.0]));
        assert_eq!(evaluation.samples, 0);
        assert_eq!(evaluation.error_count, 0);
        assert_eq!(evaluation.max_error, 0.0);
    }
}
