/// Least squares on a box, projected onto RustedSciThe's Levenberg-Marquardt.
/// Used by the CJ thermodynamic fit.
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use spray_detonation::Solvers::levenberg_marquardt::{LmOptions, levenberg_marquardt};
/// // x² = 2 on [0, 10]
/// let report = levenberg_marquardt(
///     |x: &DVector<f64>| DVector::from_vec(vec![x[0] * x[0] - 2.0]),
///     &DVector::from_vec(vec![1.0]),
///     &DVector::from_vec(vec![0.0]),
///     &DVector::from_vec(vec![10.0]),
///     &LmOptions::default(),
/// )
/// .unwrap();
/// assert!(report.termination.was_successful());
/// assert!((report.x[0] - 2.0_f64.sqrt()).abs() < 1e-8);
/// ```
pub mod levenberg_marquardt;
/// Stiff marching with RustedSciThe's Radau, keeping every accepted step
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use spray_detonation::Solvers::radau::{OdeOptions, integrate};
/// let sol = integrate(
///     |_x, y: &DVector<f64>| -y,
///     0.0,
///     1.0,
///     &DVector::from_vec(vec![1.0]),
///     &OdeOptions::default(),
/// )
/// .unwrap();
/// let (x, y) = sol.last().unwrap();
/// assert!((x - 1.0).abs() < 1e-12);
/// assert!((y[0] - (-1.0_f64).exp()).abs() < 1e-5);
/// ```
pub mod radau;
mod solvers_tests;
