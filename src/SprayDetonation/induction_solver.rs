//! # Induction length and the rate constant calibration
//!
//! The induction length is the position of the peak heat release rate along the marched
//! profile: `li = x[argmax ω]` over the accepted integrator samples. The pre-exponential
//! factor `B` is tuned until `li(B)` matches the measured value with a damped secant
//! iteration
//! ```text
//! B_next = B1 - err1·(B1 - B0)/((err1 - err0)·D),   err = li(B) - li_target
//! ```
//! where `D` (1e6 by default) slows the textbook secant step down, as `B` spans several
//! orders of magnitude while `li` varies weakly.
#![allow(non_snake_case)]
use super::drag_coefficient::DragLaw;
use super::post_shock::{ShockState, initial_state, post_shock_state};
use super::spray_errors::CalibrationError;
use super::spray_ode::{RD, SprayOde, TG, UD};
use super::spray_parameters::SimulationParams;
use crate::Solvers::radau::{OdeOptions, OdeSolution, integrate};
use log::{debug, info, warn};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Anything that maps a rate constant to an induction length (m).
pub trait InductionModel {
    fn induction_length(&self, B: f64) -> Result<f64, CalibrationError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecantSettings {
    /// first bracketing guess
    pub B0: f64,
    /// second bracketing guess
    pub B1: f64,
    /// accepted |li - li_target|, m
    pub tolerance: f64,
    pub max_iterations: usize,
    /// divisor of the secant step
    pub damping: f64,
    /// |err1 - err0| below this stops the iteration
    pub stall_tolerance: f64,
}

impl Default for SecantSettings {
    fn default() -> Self {
        Self {
            B0: 1e5,
            B1: 1e7,
            tolerance: 1e-3,
            max_iterations: 25,
            damping: 1e6,
            stall_tolerance: 1e-15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecantStatus {
    Converged,
    /// iteration cap reached, last iterate returned
    IterationLimit,
    /// two consecutive errors coincide, last successful iterate returned
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecantIterate {
    /// 0 for the two starting guesses
    pub iteration: usize,
    pub B: f64,
    /// m
    pub li: f64,
    pub err: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecantOutcome {
    pub B: f64,
    pub status: SecantStatus,
    /// secant updates performed
    pub iterations: usize,
    pub history: Vec<SecantIterate>,
}

/// Damped secant search for `B` with `model.induction_length(B) = li_target`.
///
/// Any failed evaluation aborts the search.
pub fn secant_calibrate<M: InductionModel + ?Sized>(
    model: &M,
    li_target: f64,
    settings: &SecantSettings,
) -> Result<SecantOutcome, CalibrationError> {
    let (mut B0, mut B1) = (settings.B0, settings.B1);
    let li0 = model.induction_length(B0)?;
    let li1 = model.induction_length(B1)?;
    let mut err0 = li0 - li_target;
    let mut err1 = li1 - li_target;
    info!("B0 = {:.3e} -> li = {:.6} m (err = {:.3e})", B0, li0, err0);
    info!("B1 = {:.3e} -> li = {:.6} m (err = {:.3e})", B1, li1, err1);
    let mut history = vec![
        SecantIterate {
            iteration: 0,
            B: B0,
            li: li0,
            err: err0,
        },
        SecantIterate {
            iteration: 0,
            B: B1,
            li: li1,
            err: err1,
        },
    ];

    for i in 0..settings.max_iterations {
        if err1.abs() < settings.tolerance {
            info!("secant converged after {} iterations, B = {:.4e}", i, B1);
            return Ok(SecantOutcome {
                B: B1,
                status: SecantStatus::Converged,
                iterations: i,
                history,
            });
        }
        let denominator = err1 - err0;
        if denominator.abs() < settings.stall_tolerance {
            warn!("secant stalled at iteration {}: err1 - err0 = {:e}", i, denominator);
            return Ok(SecantOutcome {
                B: B1,
                status: SecantStatus::Stalled,
                iterations: i,
                history,
            });
        }
        let B_next = B1 - err1 * (B1 - B0) / (denominator * settings.damping);
        B0 = B1;
        B1 = B_next;
        err0 = err1;
        let li = model.induction_length(B_next)?;
        err1 = li - li_target;
        info!(
            "iter {}: B = {:.4e} -> li = {:.6} m (err = {:.3e})",
            i + 1,
            B_next,
            li,
            err1
        );
        history.push(SecantIterate {
            iteration: i + 1,
            B: B_next,
            li,
            err: err1,
        });
    }
    let status = if err1.abs() < settings.tolerance {
        SecantStatus::Converged
    } else {
        warn!(
            "secant did not converge within {} iterations, keeping B = {:.4e}",
            settings.max_iterations, B1
        );
        SecantStatus::IterationLimit
    };
    Ok(SecantOutcome {
        B: B1,
        status,
        iterations: settings.max_iterations,
        history,
    })
}

/// Induction lengths for a set of rate constants, evaluated one after another.
pub fn sweep_rate_constant<M: InductionModel + ?Sized>(
    model: &M,
    rate_constants: &[f64],
) -> Vec<(f64, Result<f64, CalibrationError>)> {
    rate_constants
        .iter()
        .map(|&B| (B, model.induction_length(B)))
        .collect()
}

/// One solved spray detonation profile.
#[derive(Debug, Clone)]
pub struct SprayProfile {
    pub B: f64,
    pub shock: ShockState,
    pub solution: OdeSolution,
    /// reaction rate at every accepted sample
    pub omega: Vec<f64>,
    /// index of the first maximum of `omega`
    pub peak_index: usize,
}

impl SprayProfile {
    /// position of the peak reaction rate, m
    pub fn induction_length(&self) -> f64 {
        self.solution.x[self.peak_index]
    }

    pub fn final_state(&self) -> Option<&DVector<f64>> {
        self.solution.y.last()
    }

    /// gas temperature at the end of the domain
    pub fn final_temperature(&self) -> Option<f64> {
        self.final_state().map(|y| y[TG])
    }

    /// First sample where the droplets count as evaporated, if they ever do.
    pub fn evaporation_point(&self, ode: &SprayOde) -> Option<f64> {
        self.solution
            .x
            .iter()
            .zip(self.solution.y.iter())
            .find(|(_, y)| !ode.droplet_active(y))
            .map(|(x, _)| *x)
    }
}

/// Induction length from the full two-phase marching problem.
#[derive(Debug, Clone)]
pub struct SprayInductionModel {
    pub params: SimulationParams,
    pub drag: DragLaw,
    pub ode: OdeOptions,
    /// end of the marching domain, m
    pub x_max: f64,
}

impl SprayInductionModel {
    pub fn new(params: SimulationParams, drag: DragLaw, ode: OdeOptions, x_max: f64) -> Self {
        Self {
            params,
            drag,
            ode,
            x_max,
        }
    }

    /// Right-hand side for one rate constant; the shock state is rebuilt every time.
    pub fn system(&self, B: f64) -> SprayOde {
        let params = self.params.with_rate_constant(B);
        let shock = post_shock_state(&params);
        SprayOde::new(params, shock, self.drag)
    }

    /// Integrates the profile for the rate constant `B`.
    pub fn profile(&self, B: f64) -> Result<SprayProfile, CalibrationError> {
        let ode = self.system(B);
        let y0 = initial_state(&ode.shock, &ode.params);
        let solution = integrate(ode.rhs(), 0.0, self.x_max, &y0, &self.ode)
            .map_err(|source| CalibrationError::Integration { B, source })?;
        let omega: Vec<f64> = solution.y.iter().map(|y| ode.reaction_rate(y)).collect();
        let mut peak_index = 0;
        for (i, w) in omega.iter().enumerate() {
            if *w > omega[peak_index] {
                peak_index = i;
            }
        }
        if !(omega[peak_index] > 0.0) {
            return Err(CalibrationError::DegenerateReaction { B });
        }
        debug!(
            "B = {:e}: {} steps, peak omega {:e} at x = {:e}, droplets at x_max: rd = {:e}, ud = {:e}",
            B,
            solution.stats.n_steps,
            omega[peak_index],
            solution.x[peak_index],
            solution.y.last().map_or(f64::NAN, |y| y[RD]),
            solution.y.last().map_or(f64::NAN, |y| y[UD]),
        );
        Ok(SprayProfile {
            B,
            shock: ode.shock,
            solution,
            omega,
            peak_index,
        })
    }
}

impl InductionModel for SprayInductionModel {
    fn induction_length(&self, B: f64) -> Result<f64, CalibrationError> {
        self.profile(B).map(|p| p.induction_length())
    }
}
