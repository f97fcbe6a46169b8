//! # Settings Module
//!
//! ## Purpose
//! Everything a calibration run needs besides the measured targets: spray properties,
//! setup of the inverse CJ fit, integrator tolerances, the drag law and the secant search.
//! The whole set is serialisable, so a run can be reproduced from one JSON file.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "spray": { "phi": 0.956, "Lv": 260628.0, "rd0": 5e-6, ... },
//!   "thermo_fit": { "mixture": { "alpha0": 0.06667, ... }, "tolerance": 1e-6, ... },
//!   "ode": { "rtol": 1e-6, "atol": 1e-6, "first_step": null, "max_step": null, "max_steps": 100000 },
//!   "x_max": 0.1,
//!   "drag": { "Stokes": null },
//!   "secant": { "B0": 1e5, "B1": 1e7, "tolerance": 1e-3, "max_iterations": 25, ... }
//! }
//! ```
//! Missing files fall back to the defaults; malformed files are an error.
use crate::Solvers::radau::OdeOptions;
use crate::SprayDetonation::drag_coefficient::DragLaw;
use crate::SprayDetonation::induction_solver::SecantSettings;
use crate::SprayDetonation::spray_parameters::{SprayProperties, TargetSpec};
use crate::Thermodynamics::thermo_fit::ThermoFitConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    pub spray: SprayProperties,
    pub thermo_fit: ThermoFitConfig,
    pub ode: OdeOptions,
    /// length of the marching domain, m
    pub x_max: f64,
    pub drag: DragLaw,
    pub secant: SecantSettings,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            spray: SprayProperties::default(),
            thermo_fit: ThermoFitConfig::default(),
            ode: OdeOptions::default(),
            x_max: 0.1,
            drag: DragLaw::default(),
            secant: SecantSettings::default(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

impl CalibrationSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings: Self = read_json(path.as_ref())?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads the settings, or returns the defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let settings = Self::load(path)?;
            info!("settings loaded from {}", path.display());
            Ok(settings)
        } else {
            warn!("{} not found, using default settings", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_json(self, path.as_ref())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ode
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if !(self.x_max.is_finite() && self.x_max > 0.0) {
            return Err(ConfigError::Invalid(format!("x_max must be > 0, got {}", self.x_max)));
        }
        let s = &self.secant;
        if !(s.B0 > 0.0 && s.B1 > 0.0 && s.B0 != s.B1) {
            return Err(ConfigError::Invalid(format!(
                "secant needs two distinct positive guesses, got {} and {}",
                s.B0, s.B1
            )));
        }
        if !(s.damping > 0.0 && s.tolerance > 0.0) {
            return Err(ConfigError::Invalid(
                "secant damping and tolerance must be > 0".into(),
            ));
        }
        if !(self.spray.phi > 0.0 && self.spray.rd0 > 0.0 && self.spray.mu > 0.0) {
            return Err(ConfigError::Invalid(
                "phi, rd0 and mu must be > 0".into(),
            ));
        }
        Ok(())
    }
}

impl TargetSpec {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let targets: Self = read_json(path.as_ref())?;
        targets.validate().map_err(ConfigError::Invalid)?;
        Ok(targets)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        write_json(self, path.as_ref())
    }
}
