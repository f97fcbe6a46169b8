//! # Chapman-Jouguet algebra for a spray with effective gas properties
//!
//! Closed-form ideal CJ detonation of a two-phase mixture with mass loading `alpha0`:
//! the droplets carry the heat of combustion `Qf` but spend `Lv - cp_d·T0` on
//! vaporisation, so the net heat release is
//! ```text
//! Qnet = Qf - (Lv - cp_d·T0)
//! q    = alpha0·(γ+1)·Qnet/(cp_g·T0)
//! MCJ  = (1+alpha0)^(-1/2)·sqrt(1 + q + sqrt(max(q² + 2q, 0)))
//! DCJ  = MCJ·sqrt((γ-1)·cp_g·T0)
//! TCJ  = T0·((1 + (alpha0+1)·γ·MCJ²)/((1+γ)·(alpha0+1)·MCJ))²
//! TvN  = T0·(1 + 2(γ-1)/(γ+1)²·(γ·(MCJ²-1) + 1 - 1/MCJ²))
//! ```
#![allow(non_snake_case)]
use serde::{Deserialize, Serialize};

/// Effective gas properties of the detonation products.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoParams {
    /// ratio of specific heats
    pub gamma: f64,
    /// heat of combustion, J/kg
    pub Qf: f64,
    /// gas specific heat, J/kg/K
    pub cp_g: f64,
}

impl ThermoParams {
    pub fn to_array(&self) -> [f64; 3] {
        [self.gamma, self.Qf, self.cp_g]
    }

    pub fn from_slice(x: &[f64]) -> Self {
        Self {
            gamma: x[0],
            Qf: x[1],
            cp_g: x[2],
        }
    }
}

/// Macroscopic detonation observables: CJ velocity and the von Neumann and CJ temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CjObservables {
    /// m/s
    pub DCJ: f64,
    /// K
    pub TvN: f64,
    /// K
    pub TCJ: f64,
}

impl CjObservables {
    pub fn to_array(&self) -> [f64; 3] {
        [self.DCJ, self.TvN, self.TCJ]
    }
}

/// Fixed mixture data entering the CJ algebra.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CjMixture {
    /// droplet-to-gas mass loading
    pub alpha0: f64,
    /// initial temperature, K
    pub T0: f64,
    /// latent heat of vaporisation, J/kg
    pub Lv: f64,
    /// liquid specific heat, J/kg/K
    pub cp_d: f64,
}

impl Default for CjMixture {
    fn default() -> Self {
        Self {
            alpha0: 0.06667,
            T0: 298.0,
            Lv: 260628.0,
            cp_d: 2176.0,
        }
    }
}

impl CjMixture {
    /// CJ Mach number; the negative discriminant of the quadratic is clamped to zero.
    pub fn cj_mach(&self, p: &ThermoParams) -> f64 {
        let Qnet = p.Qf - (self.Lv - self.cp_d * self.T0);
        let q = self.alpha0 * (p.gamma + 1.0) * Qnet / (p.cp_g * self.T0);
        let disc = (q * q + 2.0 * q).max(0.0);
        (1.0 + q + disc.sqrt()).sqrt() / (1.0 + self.alpha0).sqrt()
    }

    pub fn observables(&self, p: &ThermoParams) -> CjObservables {
        let g = p.gamma;
        let T0 = self.T0;
        let M = self.cj_mach(p);
        let a0 = ((g - 1.0) * p.cp_g * T0).sqrt();
        let DCJ = M * a0;
        let TCJ = T0
            * ((1.0 + (self.alpha0 + 1.0) * g * M * M) / ((1.0 + g) * (self.alpha0 + 1.0) * M))
                .powi(2);
        let TvN = T0
            * (1.0
                + 2.0 * (g - 1.0) / (g + 1.0).powi(2) * (g * (M * M - 1.0) + 1.0 - 1.0 / (M * M)));
        CjObservables { DCJ, TvN, TCJ }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fitted_properties_reproduce_reference_detonation() {
        let p = ThermoParams {
            gamma: 1.345444492,
            Qf: 2.9654996e7,
            cp_g: 1134.07086,
        };
        let obs = CjMixture::default().observables(&p);
        assert_relative_eq!(obs.DCJ, 1805.0, max_relative = 1e-6);
        assert_relative_eq!(obs.TvN, 1689.0, max_relative = 1e-6);
        assert_relative_eq!(obs.TCJ, 2875.0, max_relative = 1e-6);
    }

    #[test]
    fn discriminant_is_clamped_for_endothermic_mixture() {
        // Qnet < 0 gives q in (-2, 0), the root argument would be negative
        let mix = CjMixture::default();
        let p = ThermoParams {
            gamma: 1.4,
            Qf: -1e6,
            cp_g: 1000.0,
        };
        let m = mix.cj_mach(&p);
        assert!(m.is_finite());
        let q = mix.alpha0 * 2.4 * (-1e6 - (mix.Lv - mix.cp_d * mix.T0)) / (1000.0 * mix.T0);
        assert_relative_eq!(m, ((1.0 + q) / (1.0 + mix.alpha0)).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn more_heat_means_faster_and_hotter() {
        let mix = CjMixture::default();
        let low = mix.observables(&ThermoParams {
            gamma: 1.3,
            Qf: 2e7,
            cp_g: 1100.0,
        });
        let high = mix.observables(&ThermoParams {
            gamma: 1.3,
            Qf: 4e7,
            cp_g: 1100.0,
        });
        assert!(high.DCJ > low.DCJ);
        assert!(high.TCJ > low.TCJ);
        assert!(high.TvN > low.TvN);
    }
}
