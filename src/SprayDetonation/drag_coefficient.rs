//! # Droplet drag
//!
//! Drag coefficient of a sphere over the full Reynolds/Mach range (Loth correlation,
//! compressible and rarefied corrections folded into `Gm`, `Cm`, `Hm`), and the drag laws
//! available to the two-phase model.
//!
//! | regime | Cd |
//! |--------|----|
//! | Re < 0.1 | 24/Re |
//! | 0.1 ≤ Re < 45 | 24/Re·(1 + 0.15·Re^0.687) |
//! | Re ≥ 45 | Hm·24/Re·(1 + 0.15·Re^0.687) + 0.42·Cm/(1 + 42500·Gm·Re^-1.16) |
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const RE_STOKES_LIMIT: f64 = 0.1;
pub const RE_INERTIAL_LIMIT: f64 = 45.0;
pub const MA_SUBSONIC_LIMIT: f64 = 0.89;
pub const MA_SUPERSONIC_LIMIT: f64 = 1.45;

/// droplet Reynolds number based on diameter
pub fn reynolds(rhog: f64, ug: f64, ud: f64, mu: f64, rd: f64) -> f64 {
    2.0 * rd * (ud - ug).abs() * rhog / mu
}

/// Mach number of the slip velocity
pub fn slip_mach(ug: f64, ud: f64, c: f64) -> f64 {
    (ud - ug).abs() / c
}

fn g_m(ma: f64) -> f64 {
    if ma < MA_SUBSONIC_LIMIT {
        1.0 - 1.525 * ma.powi(4)
    } else {
        1e-4 * (2.0 + 8.0 * (12.77 * (ma - 2.02)).tanh())
    }
}

fn c_m(ma: f64) -> f64 {
    if ma < MA_SUPERSONIC_LIMIT {
        (5.0 + 2.0 * (3.0 * (ma + 0.1).ln()).tanh()) / 3.0
    } else {
        2.044 + 0.2 * (-1.8 * (ma / 1.5).ln().powi(2)).exp()
    }
}

/// Drag coefficient from the local Reynolds and slip Mach numbers; `re` must be positive.
pub fn drag_coefficient_re_ma(re: f64, ma: f64) -> f64 {
    let stokes = 24.0 / re;
    if re < RE_STOKES_LIMIT {
        return stokes;
    }
    let schiller_naumann = stokes * (1.0 + 0.15 * re.powf(0.687));
    if re < RE_INERTIAL_LIMIT {
        return schiller_naumann;
    }
    let gm = g_m(ma);
    let cm = c_m(ma);
    let hm = 1.0 - 0.258 * cm / (1.0 + 514.0 * gm);
    hm * schiller_naumann + 0.42 * cm / (1.0 + 42500.0 * gm * re.powf(-1.16))
}

/// Drag coefficient of a droplet of radius `rd` moving at `ud` in gas moving at `ug`.
///
/// The caller guards `ug == ud`, where Re = 0.
pub fn drag_coefficient(rhog: f64, ug: f64, ud: f64, mu: f64, rd: f64, c: f64) -> f64 {
    let re = reynolds(rhog, ug, ud, mu, rd);
    let ma = slip_mach(ug, ud, c);
    drag_coefficient_re_ma(re, ma)
}

/// Local gas/droplet state seen by a drag law.
#[derive(Debug, Clone, Copy)]
pub struct SlipState {
    pub rhog: f64,
    pub ug: f64,
    pub ud: f64,
    pub mu: f64,
    pub rd: f64,
    /// local sound speed
    pub c: f64,
}

#[enum_dispatch]
pub trait DragModel {
    /// Ratio of the drag force to the Stokes force `6π·mu·rd·(ug-ud)`.
    fn stokes_correction(&self, state: &SlipState) -> f64;

    /// Drag force on one droplet, positive when the gas is faster than the droplet.
    fn force(&self, state: &SlipState) -> f64 {
        if state.ug == state.ud {
            return 0.0;
        }
        6.0 * PI * state.mu * state.rd * (state.ug - state.ud) * self.stokes_correction(state)
    }
}

/// Creeping flow drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stokes;

impl DragModel for Stokes {
    fn stokes_correction(&self, _state: &SlipState) -> f64 {
        1.0
    }
}

/// Stokes drag scaled by `Cd·Re/24` of the full-range correlation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Loth;

impl DragModel for Loth {
    fn stokes_correction(&self, state: &SlipState) -> f64 {
        let re = reynolds(state.rhog, state.ug, state.ud, state.mu, state.rd);
        if re == 0.0 {
            return 1.0;
        }
        let ma = slip_mach(state.ug, state.ud, state.c);
        drag_coefficient_re_ma(re, ma) * re / 24.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[enum_dispatch(DragModel)]
pub enum DragLaw {
    Stokes(Stokes),
    Loth(Loth),
}

impl Default for DragLaw {
    fn default() -> Self {
        DragLaw::Stokes(Stokes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn creeping_flow_is_stokes() {
        assert_relative_eq!(drag_coefficient_re_ma(0.01, 0.1), 2400.0, epsilon = 1e-9);
        assert_relative_eq!(drag_coefficient_re_ma(0.05, 2.0), 480.0, epsilon = 1e-9);
    }

    #[test]
    fn continuous_at_re_45() {
        for ma in [0.05, 0.1, 0.2, 0.3] {
            let below = drag_coefficient_re_ma(45.0 * (1.0 - 1e-12), ma);
            let above = drag_coefficient_re_ma(45.0, ma);
            assert_relative_eq!(below, above, max_relative = 1e-5);
        }
    }

    #[test]
    fn continuous_at_ma_1_45() {
        for re in [50.0, 200.0, 1e3, 1e4] {
            let below = drag_coefficient_re_ma(re, 1.45 - 1e-12);
            let above = drag_coefficient_re_ma(re, 1.45);
            assert_relative_eq!(below, above, max_relative = 1e-3);
        }
    }

    #[test]
    fn supersonic_drag_exceeds_subsonic() {
        let sub = drag_coefficient_re_ma(1e4, 0.3);
        let sup = drag_coefficient_re_ma(1e4, 2.0);
        assert!(sup > sub, "sub {} sup {}", sub, sup);
    }

    #[test]
    fn dimensional_entry_point() {
        let (rhog, ug, ud, mu, rd, c) = (1.2, 10.0, 12.0, 1.8e-5, 5e-6, 340.0);
        let re = reynolds(rhog, ug, ud, mu, rd);
        assert_relative_eq!(re, 2.0 * 5e-6 * 2.0 * 1.2 / 1.8e-5, max_relative = 1e-14);
        assert_relative_eq!(
            drag_coefficient(rhog, ug, ud, mu, rd, c),
            drag_coefficient_re_ma(re, 2.0 / 340.0),
            max_relative = 1e-14
        );
    }

    #[test]
    fn drag_laws() {
        let mut state = SlipState {
            rhog: 6.4,
            ug: 317.0,
            ud: 1770.0,
            mu: 8e-4,
            rd: 5e-6,
            c: 800.0,
        };
        let stokes = DragLaw::default();
        let loth = DragLaw::Loth(Loth);
        let f_stokes = stokes.force(&state);
        assert_relative_eq!(
            f_stokes,
            6.0 * PI * 8e-4 * 5e-6 * (317.0 - 1770.0),
            max_relative = 1e-14
        );
        // the droplet is faster, so drag decelerates it
        assert!(f_stokes < 0.0);
        assert!(loth.force(&state) < f_stokes);

        state.ud = state.ug;
        assert_eq!(stokes.force(&state), 0.0);
        assert_eq!(loth.force(&state), 0.0);

        // creeping flow: both laws coincide
        state.ud = state.ug + 1e-3;
        assert_relative_eq!(
            loth.force(&state),
            stokes.force(&state),
            max_relative = 1e-12
        );
    }
}
