//! Interactive text front end: main menu, calibration dialogs and the two-point
//! activation energy fit.
pub mod cli_arrhenius;
pub mod cli_calibration;
pub mod cli_main;
