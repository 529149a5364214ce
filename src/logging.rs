use std::time::SystemTime;

use log::LevelFilter;

use crate::config::LoggingConfig;

/// sets up the global logger. Must only be called once, before rocket is built
pub fn init_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let level = config.level.parse::<LevelFilter>().unwrap_or_else(|_| {
        eprintln!(
            "unrecognized log level {}, falling back to info",
            config.level
        );
        LevelFilter::Info
    });
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // rocket is chatty at info
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()
}
