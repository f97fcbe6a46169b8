use super::cli_main::{Session, get_user_input, prompt, read_f64};
use crate::SprayDetonation::calibration::{build_model, calibrate};
use crate::SprayDetonation::induction_solver::sweep_rate_constant;
use crate::SprayDetonation::loss::{MeasuredCellSize, evaluate_loss};
use crate::SprayDetonation::post_shock::post_shock_state;
use crate::SprayDetonation::spray_parameters::SimulationParams;
use crate::SprayDetonation::spray_pretty_print::{print_sweep, print_thermo_fit};
use crate::Thermodynamics::thermo_fit::thermo_fit;
use log::{error, info};
use std::path::PathBuf;

pub fn calibration_dialog(session: &mut Session) {
    println!("\n=== Full calibration ===");
    let cell = MeasuredCellSize {
        mean: read_f64("measured mean cell size, cm", session.targets.cell_size_target),
    };
    match calibrate(&session.targets, &session.settings) {
        Ok(outcome) => {
            outcome.pretty_print(&session.targets);
            let loss = evaluate_loss(&outcome.prediction, &session.targets, &cell);
            loss.pretty_print();
        }
        Err(e) => error!("calibration failed: {}", e),
    }
}

pub fn thermo_fit_dialog(session: &mut Session) {
    println!("\n=== Thermo fit ===");
    let targets = session.targets.cj_targets();
    match thermo_fit(&targets, &session.settings.thermo_fit) {
        Ok((params, calc)) => {
            print_thermo_fit(&params, &calc, &targets);
            let sim = SimulationParams::new(&params, session.targets.Ea, &session.settings.spray);
            post_shock_state(&sim).pretty_print();
        }
        Err(e) => error!("thermo fit failed: {}", e),
    }
}

/// `n` points spread evenly in log scale over `[from, to]`.
pub fn log_spaced(from: f64, to: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![from];
    }
    let (a, b) = (from.log10(), to.log10());
    (0..n)
        .map(|i| 10f64.powf(a + (b - a) * i as f64 / (n - 1) as f64))
        .collect()
}

pub fn sweep_dialog(session: &mut Session) {
    println!("\n=== Induction length vs rate constant ===");
    let from = read_f64("smallest B, 1/s", session.settings.secant.B0);
    let to = read_f64("largest B, 1/s", session.settings.secant.B1);
    let n = read_f64("number of points", 5.0);
    if !(from > 0.0 && to > from && n >= 1.0) {
        error!("need 0 < smallest B < largest B and at least one point");
        return;
    }
    let (model, _, _) = match build_model(&session.targets, &session.settings) {
        Ok(built) => built,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };
    let rates = log_spaced(from, to, n as usize);
    info!("integrating {} profiles", rates.len());
    print_sweep(&sweep_rate_constant(&model, &rates));
}

pub fn save_config_dialog(session: &mut Session) {
    prompt(&format!(
        "Save settings to [{}]: ",
        session.config_path.display()
    ));
    let input = get_user_input();
    let path = match input.trim() {
        "" => session.config_path.clone(),
        other => PathBuf::from(other),
    };
    match session.settings.save(&path) {
        Ok(()) => info!("settings written to {}", path.display()),
        Err(e) => error!("{}", e),
    }
    prompt("Save targets to (empty to skip): ");
    let input = get_user_input();
    if !input.trim().is_empty() {
        match session.targets.save(input.trim()) {
            Ok(()) => info!("targets written to {}", input.trim()),
            Err(e) => error!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn log_spacing_covers_the_bracket() {
        let b = log_spaced(1e5, 1e7, 3);
        assert_eq!(b.len(), 3);
        assert_relative_eq!(b[0], 1e5, max_relative = 1e-12);
        assert_relative_eq!(b[1], 1e6, max_relative = 1e-12);
        assert_relative_eq!(b[2], 1e7, max_relative = 1e-12);
        assert_eq!(log_spaced(3e6, 1e7, 1), vec![3e6]);
    }
}
