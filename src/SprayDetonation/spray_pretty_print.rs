//! # Pretty Printing Module for Spray Detonation Results
//!
//! Tabular console output of the calibration: fitted gas properties, the von Neumann state,
//! the secant history, the final prediction and the loss.

use super::calibration::CalibrationOutcome;
use super::induction_solver::SecantOutcome;
use super::loss::LossBreakdown;
use super::post_shock::ShockState;
use super::spray_errors::CalibrationError;
use super::spray_parameters::TargetSpec;
use crate::Thermodynamics::cj_detonation::{CjObservables, ThermoParams};
use prettytable::{Table, row};

pub fn print_thermo_fit(params: &ThermoParams, calc: &CjObservables, targets: &CjObservables) {
    let mut table = Table::new();
    table.add_row(row!["Parameter", "Value", "Units"]);
    table.add_row(row!["gamma", format!("{:.5}", params.gamma), "-"]);
    table.add_row(row!["Qf", format!("{:.5e}", params.Qf), "J/kg"]);
    table.add_row(row!["cp_g", format!("{:.2}", params.cp_g), "J/kg/K"]);
    println!("\nFitted gas properties:");
    table.printstd();

    let mut cmp = Table::new();
    cmp.add_row(row!["Observable", "Target", "Calculated", "Rel. error"]);
    for ((name, t), c) in ["DCJ, m/s", "TvN, K", "TCJ, K"]
        .iter()
        .zip(targets.to_array())
        .zip(calc.to_array())
    {
        cmp.add_row(row![
            name,
            format!("{:.2}", t),
            format!("{:.2}", c),
            format!("{:.2e}", (c - t) / t)
        ]);
    }
    cmp.printstd();
}

impl ShockState {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Quantity", "Value", "Units"]);
        table.add_row(row!["M0 (CJ)", format!("{:.5}", self.M0), "-"]);
        table.add_row(row!["Dcj", format!("{:.2}", self.Dcj), "m/s"]);
        table.add_row(row!["rho0", format!("{:.5}", self.rho0), "kg/m3"]);
        table.add_row(row!["c0", format!("{:.2}", self.c0), "m/s"]);
        table.add_row(row!["Mvn", format!("{:.5}", self.Mvn), "-"]);
        table.add_row(row!["Pvn", format!("{:.4e}", self.Pvn), "Pa"]);
        table.add_row(row!["Tvn", format!("{:.2}", self.Tvn), "K"]);
        table.add_row(row!["rhovn", format!("{:.5}", self.rhovn), "kg/m3"]);
        table.add_row(row!["uvn", format!("{:.2}", self.uvn), "m/s"]);
        table.add_row(row!["nd0", format!("{:.4e}", self.nd0), "1/m3"]);
        table.add_row(row!["alpha0", format!("{:.4e}", self.alpha0), "-"]);
        println!("\nVon Neumann state:");
        table.printstd();
    }
}

impl SecantOutcome {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Iteration", "B", "li, m", "err, m"]);
        for it in &self.history {
            table.add_row(row![
                it.iteration,
                format!("{:.4e}", it.B),
                format!("{:.6}", it.li),
                format!("{:.3e}", it.err)
            ]);
        }
        println!(
            "\nSecant search: {:?} after {} iterations, B = {:.4e}",
            self.status, self.iterations, self.B
        );
        table.printstd();
    }
}

impl CalibrationOutcome {
    pub fn pretty_print(&self, targets: &TargetSpec) {
        print_thermo_fit(&self.thermo, &self.cj_fit, &targets.cj_targets());
        self.shock.pretty_print();
        self.secant.pretty_print();

        let p = &self.prediction;
        let mut table = Table::new();
        table.add_row(row!["Prediction", "Value", "Target"]);
        table.add_row(row![
            "DCJ, m/s",
            format!("{:.2}", p.DCJ_pred),
            format!("{:.2}", targets.DCJ_target)
        ]);
        table.add_row(row![
            "TvN, K",
            format!("{:.2}", p.TvN_pred),
            format!("{:.2}", targets.TvN_target)
        ]);
        table.add_row(row![
            "TCJ, K",
            format!("{:.2}", p.TCJ_pred),
            format!("{:.2}", targets.TCJ_target)
        ]);
        table.add_row(row![
            "li, mm",
            format!("{:.4}", p.li_pred_mm()),
            format!("{:.4}", targets.Lind_target)
        ]);
        println!("\nFinal prediction:");
        table.printstd();
    }
}

impl LossBreakdown {
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        table.add_row(row!["Channel", "Squared rel. error"]);
        for (name, value) in self.channels() {
            table.add_row(row![name, format!("{:.6}", value)]);
        }
        table.add_row(row!["Combined", format!("{:.6}", self.total())]);
        println!("\nLoss:");
        table.printstd();
    }
}

pub fn print_sweep(results: &[(f64, Result<f64, CalibrationError>)]) {
    let mut table = Table::new();
    table.add_row(row!["B", "li, mm"]);
    for (rate, li) in results {
        let value = match li {
            Ok(li) => format!("{:.4}", li * 1000.0),
            Err(e) => format!("failed: {}", e),
        };
        table.add_row(row![format!("{:.4e}", rate), value]);
    }
    println!("\nInduction length vs rate constant:");
    table.printstd();
}
