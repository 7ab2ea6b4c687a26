use std::sync::OnceLock;

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
}

pub struct Logger {
    prefix: Option<String>,
    verbose: bool,
}

impl Logger {
    fn new(prefix: Option<String>, verbose: bool) -> Self {
        Self { prefix, verbose }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level == LogLevel::Info || self.verbose
    }

    pub fn log(&self, level: LogLevel, file: &str, line: u32, message: &str) {
        if !self.enabled(level) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let file_name = file.rsplit(['/', '\\']).next().unwrap_or(file);
        let level_tag = match level {
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        if let Some(ref prefix) = self.prefix {
            println!(
                "[{}][{}][{}][{}:{}] {}",
                timestamp, prefix, level_tag, file_name, line, message
            );
        } else {
            println!("[{}][{}][{}:{}] {}", timestamp, level_tag, file_name, line, message);
        }
    }
}

/// First call wins; later calls are ignored.
pub fn init_logger(prefix: Option<String>, verbose: bool) {
    LOGGER.get_or_init(|| Logger::new(prefix, verbose));
}

/// Messages logged before `init_logger` are dropped.
pub fn log(level: LogLevel, file: &str, line: u32, message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(level, file, line, message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Info, file!(), line!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logger::log($crate::logger::LogLevel::Debug, file!(), line!(), &format!($($arg)*))
    };
}
