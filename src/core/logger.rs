use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;

pub struct LogLine {
    pub level: Level,
    pub msg: String,
}

impl From<&Record<'_>> for LogLine {
    fn from(record: &Record) -> Self {
        Self {
            level: record.level(),
            msg: record.args().to_string(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.level, self.msg)
    }
}

/// Prints records at or above `level` to stderr. Stdout is left to command
/// output.
pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Install as the global logger.
    pub fn install(level: LevelFilter) -> anyhow::Result<()> {
        log::set_boxed_logger(Box::new(Self::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", LogLine::from(record));
        }
    }

    fn flush(&self) {}
}
