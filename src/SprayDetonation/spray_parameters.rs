//! Inputs of a spray detonation calibration: the measured targets, the fixed physical
//! properties of the fuel spray and the merged parameter set used by the marching problem.
#![allow(non_snake_case)]
use crate::Thermodynamics::cj_detonation::{CjObservables, ThermoParams};
use serde::{Deserialize, Serialize};

/// Measured detonation metrics the model is calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// CJ velocity, m/s
    pub DCJ_target: f64,
    /// von Neumann temperature, K
    pub TvN_target: f64,
    /// CJ temperature, K
    pub TCJ_target: f64,
    /// activation energy, J/mol
    pub Ea: f64,
    /// induction length, mm
    pub Lind_target: f64,
    /// detonation cell size, cm
    pub cell_size_target: f64,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            DCJ_target: 1805.0,
            TvN_target: 1689.0,
            TCJ_target: 2875.0,
            Ea: 5546.0,
            Lind_target: 20.096,
            cell_size_target: 17.0,
        }
    }
}

impl TargetSpec {
    pub fn cj_targets(&self) -> CjObservables {
        CjObservables {
            DCJ: self.DCJ_target,
            TvN: self.TvN_target,
            TCJ: self.TCJ_target,
        }
    }

    /// induction length target in m
    pub fn li_target(&self) -> f64 {
        self.Lind_target / 1000.0
    }

    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("DCJ_target", self.DCJ_target),
            ("TvN_target", self.TvN_target),
            ("TCJ_target", self.TCJ_target),
            ("Lind_target", self.Lind_target),
            ("cell_size_target", self.cell_size_target),
        ];
        for (name, value) in fields {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        if !(self.Ea.is_finite() && self.Ea >= 0.0) {
            return Err(format!("Ea must be non-negative, got {}", self.Ea));
        }
        Ok(())
    }
}

/// Fixed properties of the fuel spray and the carrier gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SprayProperties {
    /// equivalence ratio
    pub phi: f64,
    /// latent heat of vaporisation, J/kg
    pub Lv: f64,
    /// placeholder rate constant, replaced on every evaluation
    pub B: f64,
    /// initial droplet radius, m
    pub rd0: f64,
    /// initial temperature, K
    pub T1: f64,
    /// initial pressure, Pa
    pub P1: f64,
    /// fuel molar mass, kg/mol
    pub Wf: f64,
    /// liquid density, kg/m³
    pub rhod: f64,
    /// fuel boiling temperature, K
    pub Tb: f64,
    /// mixture molar mass, kg/mol
    pub Wmix: f64,
    /// liquid specific heat, J/kg/K
    pub cpd: f64,
    /// gas thermal conductivity, W/m/K
    pub k: f64,
    /// gas viscosity, Pa·s
    pub mu: f64,
    /// Lewis number
    pub Le: f64,
    /// oxidiser molar mass, kg/mol
    pub Wo: f64,
    /// universal gas constant, J/mol/K
    pub Ru: f64,
}

impl Default for SprayProperties {
    fn default() -> Self {
        Self {
            phi: 0.956,
            Lv: 260628.0,
            B: 5e6,
            rd0: 5e-6,
            T1: 298.0,
            P1: 1e5,
            Wf: 0.170,
            rhod: 750.0,
            Tb: 489.0,
            Wmix: 0.0304,
            cpd: 2176.0,
            k: 0.08,
            mu: 8e-4,
            Le: 1.0,
            Wo: 0.029,
            Ru: 8.314,
        }
    }
}

/// Parameter set of one evaluation of the spray model.
///
/// Built once from the fitted [`ThermoParams`]; only the rate constant `B` changes between
/// evaluations, through [`SimulationParams::with_rate_constant`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub gamma: f64,
    /// heat of combustion, J/kg of fuel
    pub Qf: f64,
    pub cp_g: f64,
    pub phi: f64,
    /// oxidiser-to-fuel mass ratio `15/phi`
    pub s: f64,
    /// heat release per unit mass of mixture
    pub Qmix: f64,
    pub Lv: f64,
    /// pre-exponential factor
    pub B: f64,
    pub Ea: f64,
    pub rd0: f64,
    pub T1: f64,
    pub P1: f64,
    pub Wf: f64,
    pub rhod: f64,
    pub Tb: f64,
    pub Wmix: f64,
    pub cpd: f64,
    pub k: f64,
    pub mu: f64,
    pub Le: f64,
    /// Prandtl number `cp_g·mu/k`
    pub Pr: f64,
    pub Wo: f64,
    pub Ru: f64,
    /// specific gas constant `cp_g·(γ-1)/γ`
    pub R: f64,
}

impl SimulationParams {
    pub fn new(thermo: &ThermoParams, Ea: f64, spray: &SprayProperties) -> Self {
        let ThermoParams { gamma, Qf, cp_g } = *thermo;
        let s = 15.0 / spray.phi;
        Self {
            gamma,
            Qf,
            cp_g,
            phi: spray.phi,
            s,
            Qmix: Qf / (1.0 + s),
            Lv: spray.Lv,
            B: spray.B,
            Ea,
            rd0: spray.rd0,
            T1: spray.T1,
            P1: spray.P1,
            Wf: spray.Wf,
            rhod: spray.rhod,
            Tb: spray.Tb,
            Wmix: spray.Wmix,
            cpd: spray.cpd,
            k: spray.k,
            mu: spray.mu,
            Le: spray.Le,
            Pr: cp_g * spray.mu / spray.k,
            Wo: spray.Wo,
            Ru: spray.Ru,
            R: cp_g * (gamma - 1.0) / gamma,
        }
    }

    /// Copy with the pre-exponential factor replaced.
    pub fn with_rate_constant(&self, B: f64) -> Self {
        Self { B, ..*self }
    }

    pub fn thermo(&self) -> ThermoParams {
        ThermoParams {
            gamma: self.gamma,
            Qf: self.Qf,
            cp_g: self.cp_g,
        }
    }
}
