#![allow(non_snake_case)]
use crate::Solvers::radau::OdeError;
use crate::Thermodynamics::thermo_fit::FitError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalibrationError {
    #[error("invalid calibration target: {0}")]
    InvalidTarget(String),
    #[error("thermodynamic fit failed: {0}")]
    Fit(#[from] FitError),
    #[error("integration failed for B = {B:e}: {source}")]
    Integration { B: f64, source: OdeError },
    #[error("no positive reaction rate along the profile for B = {B:e}")]
    DegenerateReaction { B: f64 },
}
