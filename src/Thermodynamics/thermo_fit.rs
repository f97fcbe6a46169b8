//! # Inverse CJ fit
//!
//! Recovers the effective `{γ, Qf, cp_g}` of a spray from three measured detonation
//! observables (CJ velocity, von Neumann temperature, CJ temperature). The three residuals
//! are relative differences between the CJ algebra of [`super::cj_detonation`] and the
//! targets; they are driven to zero by RustedSciThe's Levenberg-Marquardt solver, projected
//! onto the box `γ ∈ [1.1, 1.6]`, `Qf ∈ [1e5, 9e8]`, `cp_g ∈ [500, 2000]`.
#![allow(non_snake_case)]
use super::cj_detonation::{CjMixture, CjObservables, ThermoParams};
use crate::Solvers::levenberg_marquardt::{LmOptions, levenberg_marquardt};
use RustedSciThe::numerical::Nonlinear_systems::least_squares::{
    LeastSquaresError, LeastSquaresTerminationReason,
};
use log::{error, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("invalid fit target: {0}")]
    InvalidTarget(String),
    #[error(transparent)]
    Solver(#[from] LeastSquaresError),
    #[error("least squares did not converge ({termination:?}), max relative residual {residual:e}")]
    NotConverged {
        termination: LeastSquaresTerminationReason,
        residual: f64,
    },
    #[error("max relative residual {residual:e} above tolerance {tolerance:e}")]
    ResidualTooLarge { residual: f64, tolerance: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermoFitConfig {
    pub mixture: CjMixture,
    pub initial_guess: ThermoParams,
    pub lower: ThermoParams,
    pub upper: ThermoParams,
    /// accepted max relative residual
    pub tolerance: f64,
    pub solver: LmOptions,
}

impl Default for ThermoFitConfig {
    fn default() -> Self {
        Self {
            mixture: CjMixture::default(),
            initial_guess: ThermoParams {
                gamma: 1.30,
                Qf: 4.4e7,
                cp_g: 1000.0,
            },
            lower: ThermoParams {
                gamma: 1.1,
                Qf: 1e5,
                cp_g: 500.0,
            },
            upper: ThermoParams {
                gamma: 1.6,
                Qf: 9e8,
                cp_g: 2000.0,
            },
            tolerance: 1e-6,
            solver: LmOptions::default(),
        }
    }
}

/// Relative residuals of the CJ algebra against `targets`.
pub fn cj_residuals(mix: &CjMixture, p: &ThermoParams, targets: &CjObservables) -> [f64; 3] {
    let calc = mix.observables(p).to_array();
    let t = targets.to_array();
    [
        (calc[0] - t[0]) / t[0],
        (calc[1] - t[1]) / t[1],
        (calc[2] - t[2]) / t[2],
    ]
}

/// Fits `{γ, Qf, cp_g}` to the targets; returns the parameters and the observables they
/// produce, for comparison against the targets.
pub fn thermo_fit(
    targets: &CjObservables,
    config: &ThermoFitConfig,
) -> Result<(ThermoParams, CjObservables), FitError> {
    if targets.to_array().iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return Err(FitError::InvalidTarget(format!("{:?}", targets)));
    }
    let mix = config.mixture;
    let residuals = |x: &DVector<f64>| {
        let p = ThermoParams::from_slice(x.as_slice());
        DVector::from_row_slice(&cj_residuals(&mix, &p, targets))
    };
    let report = levenberg_marquardt(
        residuals,
        &DVector::from_row_slice(&config.initial_guess.to_array()),
        &DVector::from_row_slice(&config.lower.to_array()),
        &DVector::from_row_slice(&config.upper.to_array()),
        &config.solver,
    )?;
    let residual = report.residuals.amax();
    if !report.termination.was_successful() {
        error!(
            "thermo fit failed: {:?} after {} iterations",
            report.termination, report.iterations
        );
        return Err(FitError::NotConverged {
            termination: report.termination,
            residual,
        });
    }
    if !(residual <= config.tolerance) {
        error!("thermo fit residual {:e} above tolerance", residual);
        return Err(FitError::ResidualTooLarge {
            residual,
            tolerance: config.tolerance,
        });
    }
    let params = ThermoParams::from_slice(report.x.as_slice());
    let calc = mix.observables(&params);
    info!(
        "thermo fit converged in {} iterations: gamma = {:.5}, Qf = {:.5e} J/kg, cp_g = {:.2} J/kg/K",
        report.iterations, params.gamma, params.Qf, params.cp_g
    );
    Ok((params, calc))
}
