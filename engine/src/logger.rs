use chrono::Local;
use std::sync::OnceLock;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        }
    }
}

pub struct Logger {
    prefix: Option<String>,
    min_level: LogLevel,
}

impl Logger {
    fn new(prefix: Option<String>, min_level: LogLevel) -> Self {
        Self { prefix, min_level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let line = format_line(&timestamp, level, self.prefix.as_deref(), message);
        if level == LogLevel::Warn {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

fn format_line(timestamp: &str, level: LogLevel, prefix: Option<&str>, message: &str) -> String {
    match prefix {
        Some(prefix) => format!("[{}][{}][{}] {}", timestamp, level.label(), prefix, message),
        None => format!("[{}][{}] {}", timestamp, level.label(), message),
    }
}

/// Installs the process-wide logger. Later calls keep the first configuration.
pub fn init_logger(prefix: Option<String>, min_level: LogLevel) {
    LOGGER.get_or_init(|| Logger::new(prefix, min_level));
}

/// Messages logged before `init_logger` are dropped, so library users are not
/// forced to set up logging.
pub fn log(level: LogLevel, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, message);
    }
}

pub fn is_enabled(level: LogLevel) -> bool {
    LOGGER.get().is_some_and(|logger| logger.enabled(level))
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled($crate::logger::LogLevel::Info) {
            $crate::logger::log($crate::logger::LogLevel::Info, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled($crate::logger::LogLevel::Debug) {
            $crate::logger::log($crate::logger::LogLevel::Debug, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        if $crate::logger::is_enabled($crate::logger::LogLevel::Warn) {
            $crate::logger::log($crate::logger::LogLevel::Warn, &format!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn test_logger_filters_below_min_level() {
        let logger = Logger::new(None, LogLevel::Info);
        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn test_format_line_with_prefix() {
        let line = format_line("2026-01-01 10:00:00.000", LogLevel::Info, Some("Runner"), "started");
        assert_eq!(line, "[2026-01-01 10:00:00.000][INFO][Runner] started");
    }

    #[test]
    fn test_format_line_without_prefix() {
        let line = format_line("2026-01-01 10:00:00.000", LogLevel::Warn, None, "no runtime");
        assert_eq!(line, "[2026-01-01 10:00:00.000][WARN] no runtime");
    }
}
