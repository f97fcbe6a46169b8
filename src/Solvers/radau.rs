//! # Stiff marching with RustedSciThe Radau
//!
//! Thin layer over [`RadauNativeSolver`] for right-hand sides given as plain closures
//! `dy/dx = f(x, y)`. The solver runs with dense output and per-step telemetry switched on,
//! and the accepted step grid is rebuilt from the telemetry trace, so the returned
//! [`OdeSolution`] holds the state at every accepted integrator point. Post-processing
//! that looks for extrema along the profile (e.g. the peak reaction rate) works on exactly
//! these samples.
//!
//! [`OdeOptions`] is the serialisable part of the setup kept in the settings file; it maps
//! one to one onto [`RadauConfig`].
use RustedSciThe::numerical::Radau::{
    RadauConfig, RadauError, RadauErrorKind, RadauMatrixLayout, RadauNativeSolver,
    RadauOutputPolicy, RadauTelemetryMode,
};
use log::warn;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum OdeError {
    #[error("invalid integration setup: {0}")]
    InvalidInput(String),
    #[error("Radau solver failed: {0}")]
    Solver(#[from] RadauError),
}

impl OdeError {
    /// category of the underlying solver failure
    pub fn kind(&self) -> RadauErrorKind {
        match self {
            OdeError::InvalidInput(_) => RadauErrorKind::Configuration,
            OdeError::Solver(e) => e.kind(),
        }
    }
}

/// Integrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdeOptions {
    pub rtol: f64,
    pub atol: f64,
    /// first step; chosen automatically when `None`
    pub first_step: Option<f64>,
    /// upper bound on the step; unbounded when `None`
    pub max_step: Option<f64>,
    /// budget of step attempts, rejected ones included
    pub max_steps: usize,
}

impl Default for OdeOptions {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-6,
            first_step: None,
            max_step: None,
            max_steps: 100_000,
        }
    }
}

impl OdeOptions {
    pub fn validate(&self) -> Result<(), OdeError> {
        if !self.rtol.is_finite() || self.rtol <= 0.0 {
            return Err(OdeError::InvalidInput("rtol must be finite and > 0".into()));
        }
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(OdeError::InvalidInput("atol must be finite and > 0".into()));
        }
        if self.max_steps == 0 {
            return Err(OdeError::InvalidInput("max_steps must be > 0".into()));
        }
        if let Some(h) = self.first_step {
            if !(h > 0.0) {
                return Err(OdeError::InvalidInput("first_step must be > 0".into()));
            }
        }
        if let Some(h) = self.max_step {
            if !(h > 0.0) {
                return Err(OdeError::InvalidInput("max_step must be > 0".into()));
            }
        }
        Ok(())
    }

    /// Radau configuration for `[x0, x_end]`.
    pub fn radau_config(&self, x0: f64, x_end: f64) -> RadauConfig {
        RadauConfig {
            t0: x0,
            t_bound: x_end,
            rtol: self.rtol,
            atol: self.atol,
            // the first step may not overshoot the interval
            first_step: self.first_step.map(|h| h.min((x_end - x0).abs())),
            max_step: self.max_step.unwrap_or(f64::INFINITY),
            max_steps: self.max_steps,
            matrix_layout: RadauMatrixLayout::Dense,
            telemetry: RadauTelemetryMode::Timings,
            output: RadauOutputPolicy::Dense,
            ..RadauConfig::default()
        }
    }
}

/// Counters of one integration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OdeStats {
    pub n_steps: usize,
    pub n_rejected: usize,
    pub n_attempts: usize,
}

/// States at the accepted integrator points, `x[0] = x0`.
#[derive(Debug, Clone)]
pub struct OdeSolution {
    pub x: Vec<f64>,
    pub y: Vec<DVector<f64>>,
    pub stats: OdeStats,
}

impl OdeSolution {
    pub fn last(&self) -> Option<(f64, &DVector<f64>)> {
        self.x.last().copied().zip(self.y.last())
    }
}

/// Integrates `dy/dx = rhs(x, y)` from `x0` to `x_end` with a finite-difference Jacobian.
pub fn integrate<F>(
    rhs: F,
    x0: f64,
    x_end: f64,
    y0: &DVector<f64>,
    opts: &OdeOptions,
) -> Result<OdeSolution, OdeError>
where
    F: Fn(f64, &DVector<f64>) -> DVector<f64> + Send + Sync + 'static,
{
    opts.validate()?;
    if !(x0.is_finite() && x_end.is_finite()) || x0 == x_end {
        return Err(OdeError::InvalidInput(format!(
            "empty integration interval [{}, {}]",
            x0, x_end
        )));
    }
    if y0.is_empty() || y0.iter().any(|v| !v.is_finite()) {
        return Err(OdeError::InvalidInput("initial state must be finite and non-empty".into()));
    }
    let mut solver = RadauNativeSolver::prepare(
        opts.radau_config(x0, x_end),
        rhs,
        None::<fn(f64, &DVector<f64>) -> DMatrix<f64>>,
    )?;
    let result = solver.solve(y0.as_slice()).inspect_err(|e| {
        warn!("Radau stopped on [{}, {}]: {} ({:?})", x0, x_end, e, e.kind());
    })?;

    let direction = (x_end - x0).signum();
    let mut x = vec![x0];
    let mut t = x0;
    for step in result.telemetry().adaptive_steps.iter().filter(|s| s.accepted) {
        t += direction * step.h_abs;
        x.push(t);
    }
    // the last accepted point is the returned one
    if x.len() > 1 {
        x.pop();
    }
    let n = y0.len();
    let interior = &x[1..];
    let values = result.sample_many(interior)?;
    let mut y = Vec::with_capacity(x.len() + 1);
    y.push(y0.clone());
    y.extend(values.chunks(n).map(DVector::from_column_slice));
    x.push(result.t);
    y.push(DVector::from_column_slice(&result.y));

    Ok(OdeSolution {
        x,
        y,
        stats: OdeStats {
            n_steps: result.accepted_steps,
            n_rejected: result.rejected_steps,
            n_attempts: result.attempts,
        },
    })
}
