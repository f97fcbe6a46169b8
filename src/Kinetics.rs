/// Activation energy of a global reaction from two measured induction times,
/// used to seed the calibration target.
/// # Examples
/// ```
/// use spray_detonation::Kinetics::arrhenius_fit::activation_energy;
/// let Ea = activation_energy(6.470e-5, 6.549e-5, 1723.0, 1670.0).unwrap();
/// println!("Ea = {} J/mol", Ea);
/// ```
pub mod arrhenius_fit;
