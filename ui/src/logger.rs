use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

/// Maps a configured level name onto a filter, defaulting to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Installs the global logger.
///
/// Records go to the configured log file. When the file cannot be opened
/// they go to stderr instead, so a read-only working directory still gets
/// diagnostics.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let log_level = parse_level(config.level());

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    // Base configuration for all outputs
    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(log_level);

    let file_path = config.file();
    match OpenOptions::new().create(true).append(true).open(file_path) {
        Ok(file) => {
            base_config.chain(file).apply()?;
        }
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{file_path}': {e}");
            eprintln!("Logging to stderr instead.");
            base_config.chain(std::io::stderr()).apply()?;
        }
    }

    log::info!("Logger initialized with level: {}", config.level());
    Ok(())
}
