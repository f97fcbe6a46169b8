//! # Box-constrained least squares
//!
//! Minimises `½‖r(x)‖²` subject to `lower ≤ x ≤ upper` with the RustedSciThe
//! Levenberg-Marquardt solver. The solver itself is unconstrained, so the residual it sees is
//! `r(P(x))` with `P` the projection onto the box; components pinned at a bound get a zero
//! Jacobian column and stay there. The Jacobian is built by forward differences.
use RustedSciThe::numerical::Nonlinear_systems::least_squares::{
    ClosureLeastSquaresProblem, LeastSquaresError, LeastSquaresProblem, LeastSquaresStage,
    LeastSquaresTerminationReason, LevenbergMarquardt,
};
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LmOptions {
    /// relative reduction of the sum of squares
    pub ftol: f64,
    /// relative step length
    pub xtol: f64,
    /// cosine between residual and Jacobian columns
    pub gtol: f64,
    pub max_iterations: usize,
    /// residual evaluations allowed per unknown
    pub patience: usize,
}

impl Default for LmOptions {
    fn default() -> Self {
        Self {
            ftol: 1e-12,
            xtol: 1e-12,
            gtol: 1e-12,
            max_iterations: 200,
            patience: 200,
        }
    }
}

impl LmOptions {
    pub fn solver(&self) -> Result<LevenbergMarquardt, LeastSquaresError> {
        LevenbergMarquardt::new()
            .try_with_ftol(self.ftol)?
            .try_with_xtol(self.xtol)?
            .try_with_gtol(self.gtol)?
            .try_with_max_iterations(self.max_iterations)?
            .try_with_patience(self.patience)
    }
}

#[derive(Debug)]
pub struct LmReport {
    /// minimiser, inside the box
    pub x: DVector<f64>,
    pub residuals: DVector<f64>,
    pub iterations: usize,
    pub evaluations: usize,
    pub termination: LeastSquaresTerminationReason,
}

fn project(x: &DVector<f64>, lower: &DVector<f64>, upper: &DVector<f64>) -> DVector<f64> {
    x.zip_zip_map(lower, upper, |v, lo, hi| v.max(lo).min(hi))
}

fn forward_difference<R>(r: &R, x: &DVector<f64>) -> DMatrix<f64>
where
    R: Fn(&DVector<f64>) -> DVector<f64>,
{
    let f0 = r(x);
    let mut jac = DMatrix::zeros(f0.len(), x.len());
    let mut xp = x.clone();
    for j in 0..x.len() {
        let orig = x[j];
        xp[j] = orig + f64::EPSILON.sqrt() * orig.abs().max(1.0);
        let step = xp[j] - orig;
        jac.set_column(j, &((r(&xp) - &f0) / step));
        xp[j] = orig;
    }
    jac
}

/// Least squares on the box `[lower, upper]`, starting from `x0` projected onto it.
///
/// Evaluation failures and exhausted budgets come back as [`LeastSquaresError`]; any other
/// stop is reported in [`LmReport::termination`] for the caller to judge.
pub fn levenberg_marquardt<R>(
    residuals: R,
    x0: &DVector<f64>,
    lower: &DVector<f64>,
    upper: &DVector<f64>,
    opts: &LmOptions,
) -> Result<LmReport, LeastSquaresError>
where
    R: Fn(&DVector<f64>) -> DVector<f64>,
{
    let n = x0.len();
    for bound in [lower, upper] {
        if bound.len() != n {
            return Err(LeastSquaresError::DimensionMismatch {
                stage: LeastSquaresStage::Parameters,
                expected: n,
                actual: bound.len(),
            });
        }
    }
    if let Some(i) = (0..n).find(|&i| !(lower[i] <= upper[i])) {
        return Err(LeastSquaresError::InvalidConfiguration {
            field: "lower bound above upper bound",
            value: lower[i] - upper[i],
        });
    }
    let projected = |x: &DVector<f64>| residuals(&project(x, lower, upper));
    let problem = ClosureLeastSquaresProblem::new(
        project(x0, lower, upper),
        &projected,
        |x: &DVector<f64>| forward_difference(&projected, x),
    );
    let (problem, report) = opts.solver()?.try_minimize(problem)?;
    let x = project(&problem.params(), lower, upper);
    debug!(
        "LM stopped with {:?} after {} iterations, {} residual evaluations",
        report.termination, report.statistics.iterations, report.number_of_evaluations
    );
    Ok(LmReport {
        residuals: residuals(&x),
        x,
        iterations: report.statistics.iterations,
        evaluations: report.number_of_evaluations,
        termination: report.termination,
    })
}
