//! # Two-phase reactive flow behind the shock
//!
//! Steady one-dimensional conservation laws of a gas carrying evaporating fuel droplets,
//! marched in the shock-attached coordinate `x`. State vector:
//!
//! | index | variable | meaning |
//! |-------|----------|---------|
//! | 0 | ug | gas velocity |
//! | 1 | ud | droplet velocity |
//! | 2 | Tg | gas temperature |
//! | 3 | Td | droplet temperature |
//! | 4 | rhog | gas density |
//! | 5 | rd | droplet radius |
//! | 6 | YF | fuel vapour mass fraction |
//! | 7 | YO | oxidiser mass fraction |
//!
//! Gas phase chemistry is a single global step
//! `ω = B·ρg·YF·YO·exp(-Ea/(Ru·Tg))`; droplets exchange mass (`md`), heat (`qd`) and momentum
//! (`fx`) with the gas as long as they are present. Once the droplets have shrunk below 1% of
//! their initial radius, or their number density has dropped below 1e-4 of the post-shock
//! value, all exchange terms vanish and the droplet variables are frozen.
#![allow(non_snake_case)]
use super::drag_coefficient::{DragLaw, DragModel, SlipState};
use super::post_shock::ShockState;
use super::spray_parameters::SimulationParams;
use nalgebra::DVector;
use std::f64::consts::PI;

pub const UG: usize = 0;
pub const UD: usize = 1;
pub const TG: usize = 2;
pub const TD: usize = 3;
pub const RHOG: usize = 4;
pub const RD: usize = 5;
pub const YF: usize = 6;
pub const YO: usize = 7;
pub const STATE_NAMES: [&str; 8] = ["ug", "ud", "Tg", "Td", "rhog", "rd", "YF", "YO"];

/// droplets count as evaporated below this fraction of the initial radius
pub const RADIUS_CUTOFF: f64 = 1e-2;
/// and below this fraction of the post-shock number density
pub const NUMBER_DENSITY_CUTOFF: f64 = 1e-4;
/// floor of `|ρg·ug - γ·Pg/ug|` near the sonic point
pub const SONIC_DENOMINATOR_FLOOR: f64 = 1e-9;

/// Antoine fit of the fuel saturation pressure, `log10(P/bar) = A - B/(T + C)`.
const ANTOINE_A: f64 = 4.10549;
const ANTOINE_B: f64 = 1625.928;
const ANTOINE_C: f64 = -92.839;

/// Fuel saturation vapour pressure, Pa.
pub fn saturation_pressure(Td: f64) -> f64 {
    10f64.powf(ANTOINE_A - ANTOINE_B / (Td + ANTOINE_C)) * 1e5
}

/// Interphase and chemical source terms at one state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SourceTerms {
    /// reaction rate, kg/m³/s
    pub omega: f64,
    pub droplet_active: bool,
    /// evaporation rate of one droplet, kg/s
    pub md: f64,
    /// heat flux into one droplet, W
    pub qd: f64,
    /// drag force on one droplet, N
    pub fx: f64,
    pub drd: f64,
    pub dud: f64,
    pub dTd: f64,
    /// droplet number density
    pub nd: f64,
}

/// Right-hand side of the marching problem for one rate constant.
#[derive(Debug, Clone)]
pub struct SprayOde {
    pub params: SimulationParams,
    pub shock: ShockState,
    pub drag: DragLaw,
}

impl SprayOde {
    pub fn new(params: SimulationParams, shock: ShockState, drag: DragLaw) -> Self {
        Self {
            params,
            shock,
            drag,
        }
    }

    /// Global reaction rate; negative mass fractions from solver overshoot count as zero.
    pub fn reaction_rate(&self, y: &DVector<f64>) -> f64 {
        let p = &self.params;
        p.B * y[RHOG] * y[YF].max(0.0) * y[YO].max(0.0) * (-p.Ea / (p.Ru * y[TG])).exp()
    }

    pub fn droplet_active(&self, y: &DVector<f64>) -> bool {
        let nd = self.shock.nd0 * self.shock.Dcj / y[UD];
        y[RD] / self.params.rd0 > RADIUS_CUTOFF && nd / self.shock.nd0 > NUMBER_DENSITY_CUTOFF
    }

    pub fn source_terms(&self, y: &DVector<f64>) -> SourceTerms {
        let p = &self.params;
        let (ug, ud, Tg, Td, rhog, rd, YFv) = (y[UG], y[UD], y[TG], y[TD], y[RHOG], y[RD], y[YF]);
        let omega = self.reaction_rate(y);
        let nd = self.shock.nd0 * self.shock.Dcj / ud;
        if !self.droplet_active(y) {
            return SourceTerms {
                omega,
                nd,
                ..SourceTerms::default()
            };
        }
        let Pg = rhog * p.R * Tg;
        let Xfs = saturation_pressure(Td) / Pg;
        let YFs = Xfs * p.Wf / (Xfs * p.Wf + (1.0 - Xfs) * p.Wmix);
        // Spalding transfer number in log form
        let ratio = (1.0 - YFv) / (1.0 - YFs);
        let lamda = if ratio <= 0.0 { 0.0 } else { ratio.ln() / p.Le };

        let md = 4.0 * PI * rd * p.k / p.cp_g * lamda;
        let qd = 4.0 * PI * p.k * rd * ((Tg - Td) / (lamda.exp() - 1.0) - p.Lv / p.cp_g) * lamda;
        let slip = SlipState {
            rhog,
            ug,
            ud,
            mu: p.mu,
            rd,
            c: (p.gamma * p.R * Tg).sqrt(),
        };
        let correction = if ug == ud {
            0.0
        } else {
            self.drag.stokes_correction(&slip)
        };
        let fx = self.drag.force(&slip);

        let Dt = p.k / (rhog * p.cp_g);
        let drd = -(rhog * Dt) / (p.rhod * rd * ud) * lamda;
        let dud = 4.5 * p.mu / (p.rhod * rd * rd * ud) * (ug - ud) * correction;
        let dTd = 3.0 * (rhog * p.cp_g * Dt) / (p.rhod * p.cpd * rd * rd * ud) * qd
            / (4.0 * PI * p.k * rd);
        SourceTerms {
            omega,
            droplet_active: true,
            md,
            qd,
            fx,
            drd,
            dud,
            dTd,
            nd,
        }
    }

    /// Derivatives in state order.
    pub fn derivatives(&self, y: &DVector<f64>) -> DVector<f64> {
        let p = &self.params;
        let g = p.gamma;
        let (ug, ud, Tg, rhog, YFv, YOv) = (y[UG], y[UD], y[TG], y[RHOG], y[YF], y[YO]);
        let src = self.source_terms(y);
        let SourceTerms {
            omega,
            md,
            qd,
            fx,
            nd,
            ..
        } = src;
        let Pg = rhog * p.R * Tg;

        let E = if src.droplet_active {
            (nd * md * ud - nd * fx) * (ud - ug) - nd * (md * (p.Lv - p.cp_g * Tg) + qd)
                + p.Qf * omega
        } else {
            p.Qf * omega
        };
        let mut den = rhog * ug - g * Pg / ug;
        if den.abs() < SONIC_DENOMINATOR_FLOOR {
            den = SONIC_DENOMINATOR_FLOOR;
        }
        let dug = ((1.0 - g) * E / ug + nd * md * (ud - ug) - nd * fx) / den;
        let dTg = g / (p.cp_g * rhog * ug) * (E - Pg * dug) - Tg / (ug * rhog) * nd * md;
        let drhog = nd * md / ug - rhog / ug * dug;
        let dYF = (nd * md - omega) / (rhog * ug) - YFv / rhog * drhog - YFv / ug * dug;
        let dYO = -p.s * omega / (rhog * ug) - YOv / rhog * drhog - YOv / ug * dug;

        DVector::from_vec(vec![dug, src.dud, dTg, src.dTd, drhog, src.drd, dYF, dYO])
    }

    /// `f(x, y)` for the integrator; the system is autonomous.
    pub fn rhs(&self) -> impl Fn(f64, &DVector<f64>) -> DVector<f64> + Send + Sync + 'static {
        let ode = self.clone();
        move |_x, y| ode.derivatives(y)
    }
}
