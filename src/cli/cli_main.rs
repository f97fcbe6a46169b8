use super::cli_arrhenius::arrhenius_menu;
use super::cli_calibration::{calibration_dialog, save_config_dialog, sweep_dialog, thermo_fit_dialog};
use crate::SprayDetonation::spray_parameters::TargetSpec;
use crate::settings::CalibrationSettings;
use log::{error, info};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "spray_config.json";

/// Command line: `spray_detonation [CONFIG] [--targets FILE] [--log FILE]`
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config: PathBuf,
    pub targets: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG),
            targets: None,
            log_file: None,
        }
    }
}

impl CliArgs {
    /// `args` without the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let mut parsed = Self::default();
        let mut config_given = false;
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--targets" => {
                    let path = iter.next().ok_or("--targets needs a file name")?;
                    parsed.targets = Some(PathBuf::from(path));
                }
                "--log" => {
                    let path = iter.next().ok_or("--log needs a file name")?;
                    parsed.log_file = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
                path if !config_given => {
                    parsed.config = PathBuf::from(path);
                    config_given = true;
                }
                extra => return Err(format!("unexpected argument {}", extra)),
            }
        }
        Ok(parsed)
    }
}

/// Terminal logger at info level, plus a debug level log file when requested.
pub fn init_logging(log_file: Option<&PathBuf>) -> Result<(), String> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path)
            .map_err(|e| format!("cannot create log file {}: {}", path.display(), e))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    CombinedLogger::init(loggers).map_err(|e| e.to_string())
}

/// Settings and targets shared by all menu entries.
pub struct Session {
    pub config_path: PathBuf,
    pub settings: CalibrationSettings,
    pub targets: TargetSpec,
}

impl Session {
    pub fn open(args: &CliArgs) -> Result<Self, String> {
        let settings =
            CalibrationSettings::load_or_default(&args.config).map_err(|e| e.to_string())?;
        let targets = match &args.targets {
            Some(path) => TargetSpec::load(path).map_err(|e| e.to_string())?,
            None => TargetSpec::default(),
        };
        Ok(Self {
            config_path: args.config.clone(),
            settings,
            targets,
        })
    }
}

pub fn run_cli(args: &[String]) {
    let args = match CliArgs::parse(args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: spray_detonation [CONFIG] [--targets FILE] [--log FILE]");
            return;
        }
    };
    if let Err(e) = init_logging(args.log_file.as_ref()) {
        eprintln!("logging disabled: {}", e);
    }
    match Session::open(&args) {
        Ok(mut session) => run_interactive_menu(&mut session),
        Err(e) => error!("{}", e),
    }
}

pub fn run_interactive_menu(session: &mut Session) {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => calibration_dialog(session),
            "2" => thermo_fit_dialog(session),
            "3" => arrhenius_menu(session),
            "4" => sweep_dialog(session),
            "5" => save_config_dialog(session),
            "0" => {
                info!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!("\x1b[34m\n Spray detonation: CJ fit and rate constant calibration \n\x1b[0m");
    println!("\x1b[33m1. Full calibration\x1b[0m");
    println!("\x1b[33m2. Thermo fit only\x1b[0m");
    println!("\x1b[33m3. Activation energy from two induction times\x1b[0m");
    println!("\x1b[33m4. Induction length vs rate constant\x1b[0m");
    println!("\x1b[33m5. Save configuration\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    let _ = io::stdout().flush();
}

/// One line from stdin; empty on a read failure.
pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_line(&mut input) {
        error!("failed to read input: {}", e);
        input.clear();
    }
    input
}

/// Parses `input` as a number, an empty line keeps `default`.
pub(crate) fn parse_or_default(input: &str, default: f64) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    input
        .parse::<f64>()
        .map_err(|_| format!("not a number: {}", input))
}

/// Asks for a number until a valid one (or an empty line) is given.
pub(crate) fn read_f64(name: &str, default: f64) -> f64 {
    loop {
        prompt(&format!("{} [{}]: ", name, default));
        match parse_or_default(&get_user_input(), default) {
            Ok(value) => return value,
            Err(e) => println!("{}", e),
        }
    }
}
