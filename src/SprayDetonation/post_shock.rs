//! # Post-shock (von Neumann) state
//!
//! The CJ Mach number of the spray follows from the heat release parameter
//! ```text
//! Qs = (γ+1)·α1/(2·cp_g·T1)·(Qf - Lv + cpd·T1),   α1 = 1/s
//! M0 = sqrt((Qs+1)/(1+α1)) + sqrt(Qs/(1+α1))
//! ```
//! (the detonation branch of the quadratic), and the gas state behind the leading shock is
//! given by the ideal gas Rankine-Hugoniot relations at `M0`. The droplets cross the shock
//! unchanged, so the liquid volume fraction is compressed with the gas.
#![allow(non_snake_case)]
use super::spray_parameters::SimulationParams;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Gas and droplet state right behind the leading shock, in the shock frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockState {
    /// post-shock Mach number
    pub Mvn: f64,
    pub Pvn: f64,
    pub Tvn: f64,
    pub rhovn: f64,
    /// post-shock gas velocity
    pub uvn: f64,
    /// CJ detonation velocity
    pub Dcj: f64,
    pub YF0: f64,
    pub YO0: f64,
    /// droplet number density, 1/m³
    pub nd0: f64,
    /// liquid volume fraction
    pub alpha0: f64,
    /// CJ Mach number of the leading shock
    pub M0: f64,
    /// pre-shock gas density
    pub rho0: f64,
    /// pre-shock sound speed
    pub c0: f64,
}

/// Rankine-Hugoniot state behind a CJ-strength shock.
///
/// Assumes `γ > 1` and a supersonic solution `M0 > 1`; weaker shocks are not guarded.
pub fn post_shock_state(p: &SimulationParams) -> ShockState {
    let g = p.gamma;
    let rho0 = p.P1 / (p.R * p.T1);
    let c0 = (g * p.R * p.T1).sqrt();
    let alpha1 = 1.0 / p.s;
    let Qs = (g + 1.0) * alpha1 / (2.0 * p.cp_g * p.T1) * (p.Qf - p.Lv + p.cpd * p.T1);
    let M0 = ((Qs + 1.0) / (1.0 + alpha1)).sqrt() + (Qs / (1.0 + alpha1)).sqrt();
    let M2 = M0 * M0;
    let Dcj = M0 * c0;

    let Mvn = ((1.0 + 0.5 * (g - 1.0) * M2) / (g * M2 - 0.5 * (g - 1.0))).sqrt();
    let Pvn = p.P1 * (1.0 + 2.0 * g / (g + 1.0) * (M2 - 1.0));
    let Tvn = p.T1 * (1.0 + 2.0 * (g - 1.0) / (g + 1.0).powi(2) * (g * (M2 - 1.0) + 1.0 - 1.0 / M2));
    let rhovn = rho0 * M2 * (g + 1.0) / (2.0 + (g - 1.0) * M2);
    let uvn = Dcj * rho0 / rhovn;

    let alpha0 = p.phi / (p.s * rhovn / rho0);
    let nd0 = alpha0 / (4.0 / 3.0 * PI * p.rd0.powi(3) * p.rhod / rhovn);
    ShockState {
        Mvn,
        Pvn,
        Tvn,
        rhovn,
        uvn,
        Dcj,
        YF0: 0.0,
        YO0: 1.0,
        nd0,
        alpha0,
        M0,
        rho0,
        c0,
    }
}

/// Initial state vector `[ug, ud, Tg, Td, rhog, rd, YF, YO]` of the marching problem:
/// shocked gas, droplets still at the free-stream velocity and temperature.
pub fn initial_state(shock: &ShockState, p: &SimulationParams) -> DVector<f64> {
    DVector::from_vec(vec![
        shock.uvn,
        shock.Dcj,
        shock.Tvn,
        p.T1,
        shock.rhovn,
        p.rd0,
        shock.YF0,
        shock.YO0,
    ])
}
