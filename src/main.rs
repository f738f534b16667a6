// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::process::{self, ExitCode};

use srtshift::app_config::{self, Config};
use srtshift::{AppError, Controller, ShiftRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// srtshift - shift SRT subtitle timestamps by a fixed offset
#[derive(Parser, Debug)]
#[command(name = "srtshift")]
#[command(version)]
#[command(about = "Shift SRT subtitle timestamps by a specified offset")]
#[command(long_about = "srtshift moves every timestamp of an SRT file by the same number of milliseconds.
Timestamps that would become negative are clamped to 00:00:00,000.

EXAMPLES:
    srtshift input.srt --offset 2000 --output output.srt  # Shift forward 2 seconds
    srtshift input.srt -o -1500 --backup                  # Shift back 1.5s with backup
    srtshift input.srt -o 500                             # Shift forward 0.5s in-place
    srtshift --completions bash > srtshift.bash           # Generate bash completions

EXIT CODES:
    0 success, 1 file error, 2 SRT format error, 3 timestamp error,
    4 offset error, 5 configuration error, 130 cancelled by user,
    99 unexpected error")]
struct CommandLineOptions {
    /// Input SRT file path
    #[arg(value_name = "INPUT_FILE", required_unless_present = "completions")]
    input_file: Option<PathBuf>,

    /// Time offset in milliseconds (positive=forward, negative=backward)
    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        required_unless_present = "completions"
    )]
    offset: Option<String>,

    /// Output file path (default: modify input file in-place)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Create backup of input file before modification
    #[arg(short, long)]
    backup: bool,

    /// Configuration file path (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, exclusive = true)]
    completions: Option<Shell>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and label for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", colour, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // The logger accepts everything; the effective level is set through max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    if let Err(e) = ctrlc::set_handler(on_interrupt) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "srtshift", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run_shift(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

// @handles: Ctrl-C; reports the cancellation and exits with its own status
fn on_interrupt() {
    let cancelled = AppError::Cancelled;
    error!("{}", cancelled);
    log::logger().flush();
    process::exit(i32::from(cancelled.exit_code()));
}

fn run_shift(options: CommandLineOptions) -> Result<(), AppError> {
    // Command line log level wins over the config file
    if let Some(level) = options.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let config = match &options.config {
        Some(path) => Config::load(path).map_err(|e| AppError::Config(format!("{:#}", e)))?,
        None => Config::default(),
    };
    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let input = options
        .input_file
        .ok_or_else(|| AppError::Unknown("INPUT_FILE is required".to_string()))?;
    let offset = options
        .offset
        .ok_or_else(|| AppError::Unknown("--offset is required".to_string()))?;

    let mut request = ShiftRequest::new(input, offset.clone()).with_backup(options.backup);
    if let Some(output) = options.output {
        request = request.with_output(output);
    }

    let controller = Controller::with_config(config);
    let report = controller.run(&request)?;

    if request.is_in_place() {
        info!("Shifted timestamps by {}ms in-place", offset.trim());
    } else {
        info!(
            "Shifted timestamps by {}ms and saved to {}",
            offset.trim(),
            report.output_path.display()
        );
    }

    Ok(())
}
