//! Cost models predicting ticks from numeric predictors.

use serde::{Deserialize, Serialize};

/// Anything that predicts a tick count from predictors
pub trait CostModel {
    /// Predicted ticks; `predictors` are in the model's declaration order
    fn predict(&self, predictors: &[f64]) -> f64;
}

/// One sample: predictor values and the observed tick count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub predictors: Vec<f64>,
    pub observed: f64,
}

impl Observation {
    pub fn new(predictors: Vec<f64>, observed: f64) -> Self {
        Self {
            predictors,
            observed,
        }
    }
}

/// `ticks = intercept + sum(coefficients[i] * predictors[i])`
///
/// Used both for reference models loaded from configuration and as the
/// result of a regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    /// Formula with named predictors, e.g. `Y = 165000 + 600 * size`
    pub fn describe(&self, predictor_names: &[&str]) -> String {
        let mut formula = format!("Y = {}", format_coefficient(self.intercept));
        for (i, coefficient) in self.coefficients.iter().enumerate() {
            let name = predictor_names.get(i).copied().unwrap_or("x");
            formula.push_str(&format!(" + {} * {}", format_coefficient(*coefficient), name));
        }
        formula
    }
}

impl CostModel for LinearModel {
    fn predict(&self, predictors: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(predictors)
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }
}

/// A model produced by least squares, with its goodness of fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub model: LinearModel,

    /// 1.0 is a perfect linear fit
    pub r_squared: f64,

    /// Number of observations the model was fitted on
    pub samples: usize,
}

impl CostModel for FittedModel {
    fn predict(&self, predictors: &[f64]) -> f64 {
        self.model.predict(predictors)
    }
}

fn format_coefficient(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
    }
}
