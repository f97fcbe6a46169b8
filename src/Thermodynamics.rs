/// closed-form Chapman-Jouguet algebra of a spray detonation with effective gas properties
/// # Examples
/// ```
/// use spray_detonation::Thermodynamics::cj_detonation::{CjMixture, ThermoParams};
/// let mix = CjMixture::default();
/// let obs = mix.observables(&ThermoParams { gamma: 1.345444, Qf: 2.96550e7, cp_g: 1134.07 });
/// assert!((obs.DCJ - 1805.0).abs() < 1.0);
/// ```
pub mod cj_detonation;
/// inverse problem: effective {gamma, Qf, cp_g} from measured DCJ, TvN and TCJ
/// # Examples
/// ```
/// use spray_detonation::Thermodynamics::cj_detonation::CjObservables;
/// use spray_detonation::Thermodynamics::thermo_fit::{ThermoFitConfig, thermo_fit};
/// let targets = CjObservables { DCJ: 1805.0, TvN: 1689.0, TCJ: 2875.0 };
/// let (params, calc) = thermo_fit(&targets, &ThermoFitConfig::default()).unwrap();
/// println!("gamma = {}, Qf = {}, cp_g = {}", params.gamma, params.Qf, params.cp_g);
/// assert!((calc.TCJ - 2875.0).abs() < 1e-3);
/// ```
pub mod thermo_fit;
