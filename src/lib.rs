#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod Solvers;
#[allow(non_snake_case)]
pub mod SprayDetonation;
#[allow(non_snake_case)]
pub mod Thermodynamics;
pub mod cli;
pub mod settings;
