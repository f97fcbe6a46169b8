#[cfg(test)]
mod tests {
    use crate::SprayDetonation::calibration::build_model;
    use crate::SprayDetonation::drag_coefficient::{DragLaw, Loth};
    use crate::SprayDetonation::induction_solver::*;
    use crate::SprayDetonation::post_shock::initial_state;
    use crate::SprayDetonation::spray_errors::CalibrationError;
    use crate::SprayDetonation::spray_ode::*;
    use crate::SprayDetonation::spray_parameters::TargetSpec;
    use crate::settings::CalibrationSettings;
    use RustedSciThe::numerical::Radau::RadauErrorKind;
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use std::cell::Cell;

    fn default_model() -> SprayInductionModel {
        let (model, _, _) =
            build_model(&TargetSpec::default(), &CalibrationSettings::default()).unwrap();
        model
    }

    /// li(B) = a - k·B
    struct LinearModel {
        a: f64,
        k: f64,
        calls: Cell<usize>,
    }

    impl LinearModel {
        fn new(a: f64, k: f64) -> Self {
            Self {
                a,
                k,
                calls: Cell::new(0),
            }
        }
    }

    impl InductionModel for LinearModel {
        fn induction_length(&self, b: f64) -> Result<f64, CalibrationError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.a - self.k * b)
        }
    }

    struct ConstantModel(f64);

    impl InductionModel for ConstantModel {
        fn induction_length(&self, _b: f64) -> Result<f64, CalibrationError> {
            Ok(self.0)
        }
    }

    /// linear response that cannot be evaluated above `limit`
    struct BoundedModel {
        inner: LinearModel,
        limit: f64,
    }

    impl InductionModel for BoundedModel {
        fn induction_length(&self, b: f64) -> Result<f64, CalibrationError> {
            if b > self.limit {
                return Err(CalibrationError::DegenerateReaction { B: b });
            }
            self.inner.induction_length(b)
        }
    }

    ////////////////////////// right-hand side //////////////////////////

    #[test]
    fn droplets_heat_up_slow_down_and_evaporate_behind_the_shock() {
        let model = default_model();
        let ode = model.system(1e7);
        let y0 = initial_state(&ode.shock, &ode.params);
        let src = ode.source_terms(&y0);
        assert!(src.droplet_active);
        // no fuel vapour yet
        assert_eq!(src.omega, 0.0);
        assert!(src.md > 0.0);
        assert!(src.qd > 0.0);
        assert!(src.drd < 0.0);
        assert!(src.dud < 0.0);
        assert!(src.dTd > 0.0);
        assert_relative_eq!(src.nd, ode.shock.nd0, max_relative = 1e-14);

        let dy = ode.derivatives(&y0);
        assert_eq!(dy.len(), 8);
        assert!(dy.iter().all(|v| v.is_finite()));
        assert_eq!(dy[RD], src.drd);
        assert_eq!(dy[UD], src.dud);
        assert_eq!(dy[TD], src.dTd);
        // evaporation feeds fuel vapour
        assert!(dy[YF] > 0.0);
    }

    #[test]
    fn evaporated_droplets_freeze() {
        let model = default_model();
        let ode = model.system(1e7);
        let mut y = initial_state(&ode.shock, &ode.params);
        y[RD] = 0.5 * RADIUS_CUTOFF * ode.params.rd0;
        y[YF] = 0.05;
        y[YO] = 0.9;
        assert!(!ode.droplet_active(&y));
        let src = ode.source_terms(&y);
        assert_eq!((src.md, src.qd, src.fx), (0.0, 0.0, 0.0));
        let dy = ode.derivatives(&y);
        assert_eq!(dy[UD], 0.0);
        assert_eq!(dy[TD], 0.0);
        assert_eq!(dy[RD], 0.0);
        assert!(src.omega > 0.0);
        // the reaction consumes fuel and oxidiser
        assert!(dy[YF] < 0.0 && dy[YO] < 0.0);

        // a fast droplet stream is diluted below the number density cutoff
        let mut y = initial_state(&ode.shock, &ode.params);
        y[UD] = ode.shock.Dcj / (0.5 * NUMBER_DENSITY_CUTOFF);
        assert!(!ode.droplet_active(&y));
    }

    #[test]
    fn negative_mass_fractions_do_not_react() {
        let ode = default_model().system(1e7);
        let mut y = initial_state(&ode.shock, &ode.params);
        y[YF] = -1e-3;
        assert_eq!(ode.reaction_rate(&y), 0.0);
        y[YF] = 0.01;
        y[YO] = -1e-3;
        assert_eq!(ode.reaction_rate(&y), 0.0);
    }

    #[test]
    fn sonic_point_is_regularised() {
        let ode = default_model().system(1e7);
        let mut y = initial_state(&ode.shock, &ode.params);
        y[UG] = (ode.params.gamma * ode.params.R * y[TG]).sqrt();
        let dy = ode.derivatives(&y);
        assert!(dy.iter().all(|v| v.is_finite()), "{:?}", dy);
    }

    #[test]
    fn saturation_pressure_near_boiling_point_is_one_bar() {
        let p = default_model().params;
        assert_relative_eq!(saturation_pressure(p.Tb), 1e5, max_relative = 2e-2);
        assert!(saturation_pressure(298.0) < saturation_pressure(400.0));
    }

    #[test]
    fn integrator_rhs_matches_derivatives() {
        let ode = default_model().system(3e6);
        let y = initial_state(&ode.shock, &ode.params);
        let rhs = ode.rhs();
        assert_eq!(rhs(0.05, &y), ode.derivatives(&y));
        assert_eq!(rhs(0.0, &y).len(), STATE_NAMES.len());
    }

    ////////////////////////// profiles //////////////////////////

    #[test]
    fn faster_chemistry_shortens_induction() {
        let model = default_model();
        let slow = model.induction_length(1e5).unwrap();
        let fast = model.induction_length(1e7).unwrap();
        assert!(fast < slow, "li(1e7) = {} li(1e5) = {}", fast, slow);
        assert_relative_eq!(slow, 0.0317, max_relative = 0.05);
        assert_relative_eq!(fast, 0.0284, max_relative = 0.05);
    }

    #[test]
    fn induction_length_over_the_bracket() {
        let model = default_model();
        let rates: Vec<f64> = (0..=20).map(|i| 10f64.powf(5.0 + 0.1 * i as f64)).collect();
        let li: Vec<f64> = sweep_rate_constant(&model, &rates)
            .into_iter()
            .map(|(b, res)| res.unwrap_or_else(|e| panic!("B = {:e}: {}", b, e)))
            .collect();
        assert!(li.iter().all(|l| *l > 0.025 && *l < 0.035), "{:?}", li);
        // the drop from B0 happens in the first decade, past 1e6 the response is flat
        assert!(li[20] < li[0] && li[10] < li[0]);
        assert!((li[20] - li[10]).abs() < 2e-3, "{} {}", li[10], li[20]);
        // li is the argmax over accepted steps, so neighbouring B can step up by a
        // fraction of a millimetre (e.g. 28.19 mm at 1.585e6, 28.78 mm at 1.995e6)
        let rises: Vec<f64> = li.windows(2).map(|w| w[1] - w[0]).filter(|d| *d > 0.0).collect();
        assert!(rises.len() < 10, "{} rises", rises.len());
        assert!(rises.iter().all(|d| *d < 2e-3), "{:?}", rises);
    }

    #[test]
    fn profile_spans_the_domain_and_burns_out() {
        let model = default_model();
        let profile = model.profile(1e7).unwrap();
        let sol = &profile.solution;
        assert_eq!(sol.x[0], 0.0);
        assert_relative_eq!(*sol.x.last().unwrap(), model.x_max, max_relative = 1e-12);
        assert!(sol.x.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(sol.x.len(), sol.stats.n_steps + 1);
        assert_eq!(profile.omega.len(), sol.x.len());
        assert!(profile.omega.iter().filter(|w| **w > 0.0).count() > 10);
        let peak = profile.omega[profile.peak_index];
        assert!(profile.omega.iter().all(|w| *w <= peak));
        let tg = profile.final_temperature().unwrap();
        assert!(tg > 2600.0 && tg < 3000.0, "Tg at x_max = {}", tg);
        let y_end: &DVector<f64> = profile.final_state().unwrap();
        // droplets are gone, the mixture is hotter than behind the shock
        assert!(!model.system(1e7).droplet_active(y_end));
        assert!(y_end[TG] > profile.shock.Tvn);
    }

    #[test]
    fn evaporation_cutoff_is_one_way() {
        let model = default_model();
        for b in [1e5, 1e7] {
            let profile = model.profile(b).unwrap();
            let ode = model.system(b);
            let x_cut = profile
                .evaporation_point(&ode)
                .expect("droplets evaporate inside the domain");
            assert!(x_cut > 0.0 && x_cut < model.x_max);
            for (x, y) in profile.solution.x.iter().zip(profile.solution.y.iter()) {
                if *x >= x_cut {
                    assert!(!ode.droplet_active(y), "droplets reappear at x = {}", x);
                }
            }
        }
    }

    #[test]
    fn no_reaction_is_degenerate() {
        let mut model = default_model();
        model.x_max = 1e-4;
        assert_eq!(
            model.induction_length(0.0),
            Err(CalibrationError::DegenerateReaction { B: 0.0 })
        );
    }

    #[test]
    fn integration_failure_is_reported_with_rate_constant() {
        let mut model = default_model();
        model.ode.max_steps = 3;
        match model.induction_length(1e7) {
            Err(CalibrationError::Integration { B, source }) => {
                assert_eq!(B, 1e7);
                assert_eq!(source.kind(), RadauErrorKind::StepBudget);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn loth_drag_shortens_induction() {
        let stokes = default_model();
        let mut loth = stokes.clone();
        loth.drag = DragLaw::Loth(Loth);
        let li_stokes = stokes.induction_length(1e7).unwrap();
        let li_loth = loth.induction_length(1e7).unwrap();
        assert!(li_loth < li_stokes, "loth {} stokes {}", li_loth, li_stokes);
    }

    ////////////////////////// secant search //////////////////////////

    #[test]
    fn undamped_secant_solves_linear_response_in_one_step() {
        let model = LinearModel::new(0.04, 2e-9);
        let settings = SecantSettings {
            damping: 1.0,
            tolerance: 1e-9,
            ..SecantSettings::default()
        };
        let out = secant_calibrate(&model, 0.03, &settings).unwrap();
        assert_eq!(out.status, SecantStatus::Converged);
        assert_eq!(out.iterations, 1);
        assert_relative_eq!(out.B, 5e6, max_relative = 1e-6);
        assert_eq!(out.history.len(), 3);
        assert_eq!(model.calls.get(), 3);
    }

    #[test]
    fn converged_guess_needs_no_update() {
        let model = LinearModel::new(0.04, 2e-9);
        // li(1e7) = 0.02
        let out = secant_calibrate(&model, 0.0205, &SecantSettings::default()).unwrap();
        assert_eq!(out.status, SecantStatus::Converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.B, 1e7);
    }

    #[test]
    fn flat_response_stalls_on_last_guess() {
        let out = secant_calibrate(&ConstantModel(0.03), 0.02, &SecantSettings::default()).unwrap();
        assert_eq!(out.status, SecantStatus::Stalled);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.B, 1e7);
    }

    #[test]
    fn damped_secant_hits_iteration_limit() {
        let model = LinearModel::new(0.04, 2e-9);
        let settings = SecantSettings::default();
        let out = secant_calibrate(&model, 0.03, &settings).unwrap();
        assert_eq!(out.status, SecantStatus::IterationLimit);
        assert_eq!(out.iterations, settings.max_iterations);
        assert_eq!(out.history.len(), settings.max_iterations + 2);
        assert_eq!(model.calls.get(), settings.max_iterations + 2);
        // each step is a millionth of the secant step
        assert!((out.B - 1e7).abs() < 1e3);
        assert_eq!(out.B, out.history.last().unwrap().B);
    }

    #[test]
    fn failed_evaluation_aborts_the_search() {
        let model = BoundedModel {
            inner: LinearModel::new(0.04, 2e-9),
            limit: 1.5e7,
        };
        let settings = SecantSettings {
            damping: 1.0,
            ..SecantSettings::default()
        };
        // exact root at B = 2e7 is outside the evaluable range
        let err = secant_calibrate(&model, 0.0, &settings).unwrap_err();
        assert!(matches!(err, CalibrationError::DegenerateReaction { .. }));
    }

    #[test]
    fn sweep_keeps_failures_per_point() {
        let model = BoundedModel {
            inner: LinearModel::new(0.04, 2e-9),
            limit: 1.5e7,
        };
        let res = sweep_rate_constant(&model, &[1e5, 1e7, 1e8]);
        assert_eq!(res.len(), 3);
        assert_relative_eq!(*res[0].1.as_ref().unwrap(), 0.0398, max_relative = 1e-12);
        assert_relative_eq!(*res[1].1.as_ref().unwrap(), 0.02, max_relative = 1e-12);
        assert!(res[2].1.is_err());
        assert_eq!(res[2].0, 1e8);
    }
}
