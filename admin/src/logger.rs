use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info, // Default to Info for any other value
    }
}

/// Install the global logger. `verbose` forces debug level regardless of
/// configuration.
pub fn setup_logger(logging: &LoggingConfig, verbose: bool) -> Result<(), log::SetLoggerError> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        level_filter(logging.level())
    };

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

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

    match logging.file() {
        Some(file_path) => match OpenOptions::new().create(true).append(true).open(file_path) {
            Ok(file) => base_config.chain(file).apply()?,
            Err(e) => {
                eprintln!("Warning: Failed to open log file '{file_path}': {e}");
                eprintln!("Continuing with logging to stderr.");
                base_config.chain(std::io::stderr()).apply()?;
            }
        },
        // Stdout carries command output, so logs stay on stderr.
        None => base_config.chain(std::io::stderr()).apply()?,
    }

    log::debug!("Logger initialized with level: {log_level}");
    Ok(())
}
