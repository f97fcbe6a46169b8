//! Two-point Arrhenius fit of an induction time `τ = A·exp(Ea/(R·T))`:
//! ```text
//! Ea = R·ln(τ2/τ1)/(1/T2 - 1/T1)
//! ```
#![allow(non_snake_case)]
use approx::relative_eq;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const R_G: f64 = 8.314;

#[derive(Debug, Error, PartialEq)]
pub enum ArrheniusError {
    #[error("induction times must be positive and finite, got tau1 = {0}, tau2 = {1}")]
    NonPositiveTime(f64, f64),
    #[error("temperatures must be positive and finite, got T1 = {0}, T2 = {1}")]
    NonPositiveTemperature(f64, f64),
    #[error("both points have the same temperature {0} K")]
    EqualTemperatures(f64),
}

/// Two measured (induction time, temperature) points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InductionTimePair {
    /// s
    pub tau1: f64,
    /// s
    pub tau2: f64,
    /// K
    pub T1: f64,
    /// K
    pub T2: f64,
}

impl Default for InductionTimePair {
    fn default() -> Self {
        Self {
            tau1: 6.470e-5,
            tau2: 6.549e-5,
            T1: 1723.0,
            T2: 1670.0,
        }
    }
}

impl InductionTimePair {
    /// activation energy, J/mol
    pub fn activation_energy(&self) -> Result<f64, ArrheniusError> {
        activation_energy(self.tau1, self.tau2, self.T1, self.T2)
    }
}

/// Activation energy (J/mol) from two induction time/temperature points.
pub fn activation_energy(tau1: f64, tau2: f64, T1: f64, T2: f64) -> Result<f64, ArrheniusError> {
    if !(tau1 > 0.0 && tau2 > 0.0 && tau1.is_finite() && tau2.is_finite()) {
        return Err(ArrheniusError::NonPositiveTime(tau1, tau2));
    }
    if !(T1 > 0.0 && T2 > 0.0 && T1.is_finite() && T2.is_finite()) {
        return Err(ArrheniusError::NonPositiveTemperature(T1, T2));
    }
    if relative_eq!(T1, T2, max_relative = 1e-12) {
        return Err(ArrheniusError::EqualTemperatures(T1));
    }
    Ok(R_G * (tau2 / tau1).ln() / (1.0 / T2 - 1.0 / T1))
}
