#[cfg(test)]
mod tests {
    use crate::Solvers::levenberg_marquardt::*;
    use crate::Solvers::radau::*;
    use RustedSciThe::numerical::Nonlinear_systems::least_squares::LeastSquaresError;
    use RustedSciThe::numerical::Radau::RadauErrorKind;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    fn decay() -> impl Fn(f64, &DVector<f64>) -> DVector<f64> + Send + Sync + 'static {
        |_x, y| -y
    }

    #[test]
    fn accepted_grid_is_monotone_and_matches_the_step_count() {
        let y0 = DVector::from_vec(vec![1.0]);
        let sol = integrate(decay(), 0.0, 2.0, &y0, &OdeOptions::default()).unwrap();
        assert_eq!(sol.x.len(), sol.y.len());
        assert_eq!(sol.x.len(), sol.stats.n_steps + 1);
        assert_eq!(sol.x[0], 0.0);
        assert!(sol.x.windows(2).all(|w| w[1] > w[0]));
        assert_relative_eq!(*sol.x.last().unwrap(), 2.0, max_relative = 1e-12);
        for (x, y) in sol.x.iter().zip(sol.y.iter()) {
            assert_relative_eq!(y[0], (-x).exp(), epsilon = 1e-5);
        }
    }

    #[test]
    fn stiff_relaxation_takes_few_steps() {
        // y' = -1e4·(y - cos x)
        let rhs = |x: f64, y: &DVector<f64>| DVector::from_vec(vec![-1e4 * (y[0] - x.cos())]);
        let y0 = DVector::from_vec(vec![0.0]);
        let sol = integrate(rhs, 0.0, 1.0, &y0, &OdeOptions::default()).unwrap();
        let (_, y) = sol.last().unwrap();
        assert_relative_eq!(y[0], 1.0_f64.cos(), epsilon = 1e-3);
        assert!(sol.stats.n_steps < 500, "{} steps", sol.stats.n_steps);
    }

    #[test]
    fn robertson_conserves_mass() {
        let rhs = |_x: f64, y: &DVector<f64>| {
            let r1 = 0.04 * y[0];
            let r2 = 1e4 * y[1] * y[2];
            let r3 = 3e7 * y[1] * y[1];
            DVector::from_vec(vec![-r1 + r2, r1 - r2 - r3, r3])
        };
        let y0 = DVector::from_vec(vec![1.0, 0.0, 0.0]);
        let opts = OdeOptions {
            rtol: 1e-6,
            atol: 1e-10,
            ..OdeOptions::default()
        };
        let sol = integrate(rhs, 0.0, 40.0, &y0, &opts).unwrap();
        let (_, y) = sol.last().unwrap();
        assert_relative_eq!(y.sum(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(y[0], 0.7158, epsilon = 1e-3);
    }

    #[test]
    fn step_budget_is_an_error() {
        let opts = OdeOptions {
            max_steps: 2,
            first_step: Some(1e-6),
            ..OdeOptions::default()
        };
        let err = integrate(decay(), 0.0, 10.0, &DVector::from_vec(vec![1.0]), &opts).unwrap_err();
        assert_eq!(err.kind(), RadauErrorKind::StepBudget);
    }

    #[test]
    fn bad_setup_is_rejected_before_solving() {
        let y0 = DVector::from_vec(vec![1.0]);
        let opts = OdeOptions {
            rtol: 0.0,
            ..OdeOptions::default()
        };
        assert!(matches!(
            integrate(decay(), 0.0, 1.0, &y0, &opts),
            Err(OdeError::InvalidInput(_))
        ));
        assert!(matches!(
            integrate(decay(), 1.0, 1.0, &y0, &OdeOptions::default()),
            Err(OdeError::InvalidInput(_))
        ));
        let nan = DVector::from_vec(vec![f64::NAN]);
        assert!(matches!(
            integrate(decay(), 0.0, 1.0, &nan, &OdeOptions::default()),
            Err(OdeError::InvalidInput(_))
        ));
    }

    #[test]
    fn config_carries_the_options() {
        let opts = OdeOptions {
            first_step: Some(5.0),
            max_step: Some(0.1),
            ..OdeOptions::default()
        };
        let config = opts.radau_config(0.0, 1.0);
        assert_eq!(config.rtol, 1e-6);
        assert_eq!(config.atol, 1e-6);
        assert_eq!(config.first_step, Some(1.0));
        assert_eq!(config.max_step, 0.1);
        assert_eq!(config.max_steps, 100_000);
    }

    ////////////////////////// least squares //////////////////////////

    #[test]
    fn rosenbrock_residuals_reach_the_minimum() {
        let r = |x: &DVector<f64>| DVector::from_vec(vec![10.0 * (x[1] - x[0] * x[0]), 1.0 - x[0]]);
        let report = levenberg_marquardt(
            r,
            &DVector::from_vec(vec![-1.2, 1.0]),
            &DVector::from_vec(vec![-5.0, -5.0]),
            &DVector::from_vec(vec![5.0, 5.0]),
            &LmOptions::default(),
        )
        .unwrap();
        assert!(report.termination.was_successful(), "{:?}", report.termination);
        assert_relative_eq!(report.x[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(report.x[1], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn active_bound_holds_the_solution() {
        // unconstrained root x = 3 lies above the box
        let r = |x: &DVector<f64>| DVector::from_vec(vec![x[0] - 3.0]);
        let report = levenberg_marquardt(
            r,
            &DVector::from_vec(vec![0.5]),
            &DVector::from_vec(vec![0.0]),
            &DVector::from_vec(vec![2.0]),
            &LmOptions::default(),
        )
        .unwrap();
        assert_eq!(report.x[0], 2.0);
        assert_relative_eq!(report.residuals[0], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverted_box_is_rejected() {
        let r = |x: &DVector<f64>| x.clone();
        let err = levenberg_marquardt(
            r,
            &DVector::from_vec(vec![0.5]),
            &DVector::from_vec(vec![1.0]),
            &DVector::from_vec(vec![0.0]),
            &LmOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LeastSquaresError::InvalidConfiguration { .. }));
    }
}
