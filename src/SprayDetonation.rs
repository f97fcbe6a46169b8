//! # Spray Detonation Module
//!
//! Steady one-dimensional structure of a detonation in a fuel spray, and the calibration of
//! its global reaction rate against measured detonation metrics.
//!
//! ## Mathematical Model
//!
//! ### Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `γ` | ratio of specific heats of the gas | - |
//! | `Qf` | heat of combustion of the fuel | J/kg |
//! | `cp_g`, `cpd` | specific heat of gas and liquid | J/(kg·K) |
//! | `B` | pre-exponential factor of the global reaction | 1/s |
//! | `Ea` | activation energy | J/mol |
//! | `rd`, `nd` | droplet radius and number density | m, 1/m³ |
//! | `li` | induction length, position of peak heat release | m |
//!
//! ### Pipeline
//!
//! 1. `{γ, Qf, cp_g}` are fitted once to the measured `DCJ`, `TvN`, `TCJ`
//!    (see [`crate::Thermodynamics::thermo_fit`])
//! 2. for a given `B`, the von Neumann state is computed from the CJ Mach number
//!    ([`post_shock`]) and the two-phase balance equations ([`spray_ode`]) are marched from the
//!    shock over `x ∈ [0, x_max]` with the stiff Radau integrator
//! 3. the induction length is read off the profile and `B` is tuned by a damped secant
//!    search until it matches the measured one ([`induction_solver`])
//! 4. a final profile at the calibrated `B` gives the predicted `DCJ`, `TvN`, `TCJ`, `li`
//!    ([`calibration`]), scored by [`loss`]
//!
//! # Examples
//! ```no_run
//! use spray_detonation::SprayDetonation::calibration::calibrate;
//! use spray_detonation::SprayDetonation::spray_parameters::TargetSpec;
//! use spray_detonation::settings::CalibrationSettings;
//! let targets = TargetSpec::default();
//! let outcome = calibrate(&targets, &CalibrationSettings::default()).unwrap();
//! outcome.pretty_print(&targets);
//! ```
pub mod calibration;
pub mod drag_coefficient;
pub mod induction_solver;
pub mod loss;
pub mod post_shock;
pub mod spray_errors;
pub mod spray_ode;
pub mod spray_parameters;
pub mod spray_pretty_print;
mod spray_tests;
