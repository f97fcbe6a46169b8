use spray_detonation::cli::cli_main::run_cli;

pub fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    run_cli(&args);
}
