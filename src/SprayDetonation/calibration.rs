//! Full calibration pipeline: CJ fit of the effective gas properties, secant search for the
//! rate constant, final profile and readout of the predicted detonation metrics.
#![allow(non_snake_case)]
use super::induction_solver::{SecantOutcome, SprayInductionModel, SprayProfile, secant_calibrate};
use super::post_shock::ShockState;
use super::spray_errors::CalibrationError;
use super::spray_parameters::{SimulationParams, TargetSpec};
use crate::Thermodynamics::cj_detonation::{CjObservables, ThermoParams};
use crate::Thermodynamics::thermo_fit::thermo_fit;
use crate::settings::CalibrationSettings;
use log::info;
use serde::{Deserialize, Serialize};

/// Detonation metrics predicted by the calibrated model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// m/s
    pub DCJ_pred: f64,
    /// K
    pub TvN_pred: f64,
    /// gas temperature at the end of the domain, K
    pub TCJ_pred: f64,
    /// m
    pub li_pred: f64,
}

impl Prediction {
    pub fn from_profile(profile: &SprayProfile) -> Self {
        Self {
            DCJ_pred: profile.shock.Dcj,
            TvN_pred: profile.shock.Tvn,
            TCJ_pred: profile.final_temperature().unwrap_or(f64::NAN),
            li_pred: profile.induction_length(),
        }
    }

    pub fn li_pred_mm(&self) -> f64 {
        self.li_pred * 1000.0
    }
}

#[derive(Debug, Clone)]
pub struct CalibrationOutcome {
    pub prediction: Prediction,
    pub thermo: ThermoParams,
    /// CJ observables reproduced by the fitted gas properties
    pub cj_fit: CjObservables,
    pub shock: ShockState,
    pub secant: SecantOutcome,
}

/// Fits the gas properties to the CJ targets and builds the marching model from them.
pub fn build_model(
    targets: &TargetSpec,
    settings: &CalibrationSettings,
) -> Result<(SprayInductionModel, ThermoParams, CjObservables), CalibrationError> {
    targets.validate().map_err(CalibrationError::InvalidTarget)?;
    let (thermo, cj_fit) = thermo_fit(&targets.cj_targets(), &settings.thermo_fit)?;
    let params = SimulationParams::new(&thermo, targets.Ea, &settings.spray);
    let model = SprayInductionModel::new(params, settings.drag, settings.ode.clone(), settings.x_max);
    Ok((model, thermo, cj_fit))
}

/// Calibrates the rate constant against the measured induction length and predicts the
/// detonation metrics with it. Fails on the first fit or integration failure.
pub fn calibrate(
    targets: &TargetSpec,
    settings: &CalibrationSettings,
) -> Result<CalibrationOutcome, CalibrationError> {
    let (model, thermo, cj_fit) = build_model(targets, settings)?;
    info!(
        "solving for B to match li_target = {:.6} m",
        targets.li_target()
    );
    let secant = secant_calibrate(&model, targets.li_target(), &settings.secant)?;
    info!(
        "final simulation with B = {:.4e} ({:?})",
        secant.B, secant.status
    );
    let profile = model.profile(secant.B)?;
    let prediction = Prediction::from_profile(&profile);
    Ok(CalibrationOutcome {
        prediction,
        thermo,
        cj_fit,
        shock: profile.shock,
        secant,
    })
}
