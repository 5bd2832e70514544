use log::{LevelFilter, SetLoggerError};

/// `--verbose` logging: level and message on stderr, stdout stays for results.
pub fn init_stderr(level: LevelFilter) -> Result<(), SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}", record.level(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
