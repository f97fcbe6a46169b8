use super::cli_main::{Session, get_user_input, prompt, read_f64};
use crate::Kinetics::arrhenius_fit::InductionTimePair;
use log::{error, info};

pub fn arrhenius_menu(session: &mut Session) {
    println!("\n=== Activation energy from two induction times ===");
    println!("Press Enter to keep the value in brackets.");
    let default = InductionTimePair::default();
    let pair = InductionTimePair {
        tau1: read_f64("tau1, s", default.tau1),
        tau2: read_f64("tau2, s", default.tau2),
        T1: read_f64("T1, K", default.T1),
        T2: read_f64("T2, K", default.T2),
    };
    match pair.activation_energy() {
        Ok(ea) => {
            println!("Ea = {:.2} J/mol", ea);
            prompt("Use it as the calibration target? (y/n): ");
            let choice = get_user_input();
            if matches!(choice.trim().to_lowercase().as_str(), "y" | "yes") {
                session.targets.Ea = ea;
                info!("Ea target set to {:.2} J/mol", ea);
            }
        }
        Err(e) => error!("{}", e),
    }
}
