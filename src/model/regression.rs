//! Ordinary least squares with an implicit intercept.
//!
//! Predictors are centred on their means before being handed to
//! `linregress`; the intercept is recovered from the means afterwards.

use super::cost_model::{CostModel, FittedModel, LinearModel, Observation};
use crate::utils::error::FitError;
use linregress::{FormulaRegressionBuilder, RegressionDataBuilder};
use log::debug;

/// Below this value `1 - r^2` between two predictors counts as collinear
const COLLINEARITY_TOLERANCE: f64 = 1e-10;

const PREDICTOR_COLUMNS: [&str; 2] = ["x0", "x1"];

/// Fit a linear model of `observed` against one or two predictors
///
/// **Public** - main entry point for regression
///
/// # Errors
/// * `FitError::UnsupportedArity` - zero or more than two predictors, or
///   observations with differing predictor counts
/// * `FitError::InsufficientData` - fewer observations than predictors + 1
/// * `FitError::SingularMatrix` - a predictor has zero variance, or the two
///   predictors are collinear
/// * `FitError::Regression` - the solver rejected the data
pub fn fit(observations: &[Observation]) -> Result<FittedModel, FitError> {
    let arity = observations.first().map_or(1, |o| o.predictors.len());
    if !(1..=2).contains(&arity) {
        return Err(FitError::UnsupportedArity(arity));
    }
    if let Some(ragged) = observations.iter().find(|o| o.predictors.len() != arity) {
        return Err(FitError::UnsupportedArity(ragged.predictors.len()));
    }

    let n = observations.len();
    if n < arity + 1 {
        return Err(FitError::InsufficientData {
            required: arity + 1,
            got: n,
        });
    }

    let count = n as f64;
    let mean_y = observations.iter().map(|o| o.observed).sum::<f64>() / count;
    let means: Vec<f64> = (0..arity)
        .map(|j| observations.iter().map(|o| o.predictors[j]).sum::<f64>() / count)
        .collect();
    let columns: Vec<Vec<f64>> = means
        .iter()
        .enumerate()
        .map(|(j, mean)| observations.iter().map(|o| o.predictors[j] - mean).collect())
        .collect();

    check_conditioning(observations, &columns)?;

    let mut table = vec![("Y", observations.iter().map(|o| o.observed).collect::<Vec<f64>>())];
    for (name, column) in PREDICTOR_COLUMNS.iter().zip(&columns) {
        table.push((*name, column.clone()));
    }
    let formula = format!("Y ~ {}", PREDICTOR_COLUMNS[..arity].join(" + "));
    debug!("Fitting {} observations with formula: {}", n, formula);

    let data = RegressionDataBuilder::new()
        .build_from(table)
        .map_err(|e| FitError::Regression(e.to_string()))?;
    let parameters = FormulaRegressionBuilder::new()
        .data(&data)
        .formula(formula.as_str())
        .fit_without_statistics()
        .map_err(|e| FitError::Regression(e.to_string()))?;

    if parameters.len() != arity + 1 || parameters.iter().any(|p| !p.is_finite()) {
        return Err(FitError::SingularMatrix);
    }

    let coefficients = parameters[1..].to_vec();
    let intercept = parameters[0]
        - coefficients
            .iter()
            .zip(&means)
            .map(|(c, m)| c * m)
            .sum::<f64>();

    let model = LinearModel::new(intercept, coefficients);
    let r_squared = r_squared(observations, &model, mean_y);

    Ok(FittedModel {
        model,
        r_squared,
        samples: n,
    })
}

/// Reject constant predictors and collinear predictor pairs
///
/// `columns` are the centred predictors.
fn check_conditioning(observations: &[Observation], columns: &[Vec<f64>]) -> Result<(), FitError> {
    let constant = (0..columns.len()).find(|&j| {
        let first = observations[0].predictors[j];
        observations.iter().all(|o| o.predictors[j] == first)
    });
    if let Some(j) = constant {
        debug!("Predictor {} has zero variance", j);
        return Err(FitError::SingularMatrix);
    }

    if let [a, b] = columns {
        let saa: f64 = a.iter().map(|x| x * x).sum();
        let sbb: f64 = b.iter().map(|x| x * x).sum();
        let sab: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let correlation = sab * sab / (saa * sbb);
        if 1.0 - correlation <= COLLINEARITY_TOLERANCE {
            debug!("Predictors are collinear (r^2 = {})", correlation);
            return Err(FitError::SingularMatrix);
        }
    }

    Ok(())
}

/// R^2 = 1 - SSE / SST, a perfect fit when the observations are constant
fn r_squared(observations: &[Observation], model: &LinearModel, mean_y: f64) -> f64 {
    let sse: f64 = observations
        .iter()
        .map(|o| (o.observed - model.predict(&o.predictors)).powi(2))
        .sum();
    let sst: f64 = observations
        .iter()
        .map(|o| (o.observed - mean_y).powi(2))
        .sum();
    if sst == 0.0 {
        1.0
    } else {
        1.0 - sse / sst
    }
}
