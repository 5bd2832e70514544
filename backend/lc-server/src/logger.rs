use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, info};

/// Initialize logger with fern
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stdout, Some = file output
/// * `colored` - Enable colored output (ignored when logging to file)
pub fn initialize(
    log_level: lc_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let output = match log_file {
        Some(ref log_path) => {
            if let Some(parent) = log_path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ServerError::io(parent.to_path_buf(), e))?;
            }

            let file = fern::log_file(log_path)
                .map_err(|e| ServerError::io(log_path.clone(), e))?;

            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, None))
                .chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);

            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, Some(&colors))
                })
                .chain(std::io::stdout())
        }
        // Plain output for systemd / docker logs
        None => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, None))
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        // hyper is chatty at debug
        .level_for("hyper", log::LevelFilter::Info)
        .level_for("rustls", log::LevelFilter::Info)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    Ok(())
}

fn write_line(
    out: FormatCallback,
    message: &std::fmt::Arguments,
    record: &Record,
    colors: Option<&ColoredLevelConfig>,
) {
    let date = humantime::format_rfc3339(SystemTime::now());
    let file = record.file().unwrap_or("unknown");
    let line = record.line().unwrap_or(0);

    match colors {
        Some(colors) => out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            level = colors.color(record.level()),
        )),
        None => out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            level = record.level(),
        )),
    }
}
