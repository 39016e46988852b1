//! Opt-in file logger.
//!
//! Lines go to `~/.config/runclean/logs/runclean.log`. Past the configured
//! size the file is moved to `runclean.log.1` and a fresh one started.
//! Until [`init`] succeeds every macro is a no-op.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

const LOG_FILE_NAME: &str = "runclean.log";
const BACKUP_FILE_NAME: &str = "runclean.log.1";

/// `[logging]` section of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Size in megabytes at which the file is rotated.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Parses a level name. Unknown names fall back to `Info`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

struct Logger {
    file: File,
    dir: PathBuf,
    min_level: Level,
    max_bytes: u64,
    written: u64,
}

/// Sets up the global logger from config. Call once at startup.
///
/// Does nothing when logging is disabled or the log directory cannot be
/// created.
pub fn init(config: &LogConfig) {
    if !config.enabled {
        return;
    }
    let Some(dir) = crate::config::config_dir() else {
        return;
    };
    let _ = init_in(&dir.join("logs"), config);
}

fn init_in(log_dir: &Path, config: &LogConfig) -> std::io::Result<()> {
    fs::create_dir_all(log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))?;
    let written = file.metadata().map(|m| m.len()).unwrap_or(0);

    let logger = Logger {
        file,
        dir: log_dir.to_path_buf(),
        min_level: Level::parse(&config.level),
        max_bytes: config.max_file_mb.saturating_mul(1024 * 1024),
        written,
    };
    let _ = LOGGER.set(Mutex::new(logger));
    Ok(())
}

/// Writes one line if `level` passes the configured minimum.
pub fn write(level: Level, args: fmt::Arguments<'_>) {
    let Some(mutex) = LOGGER.get() else {
        return;
    };
    let Ok(mut logger) = mutex.lock() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let line = format_line(&timestamp(), level, args);

    let _ = logger.file.write_all(line.as_bytes());
    logger.written += line.len() as u64;

    if logger.max_bytes > 0 && logger.written >= logger.max_bytes {
        logger.rotate();
    }
}

fn format_line(time: &str, level: Level, args: fmt::Arguments<'_>) -> String {
    format!("{time} [{}] {args}\n", level.as_str())
}

impl Logger {
    fn rotate(&mut self) {
        let current = self.dir.join(LOG_FILE_NAME);
        let _ = fs::rename(&current, self.dir.join(BACKUP_FILE_NAME));
        if let Ok(f) = OpenOptions::new().create(true).append(true).open(&current) {
            self.file = f;
        }
        self.written = 0;
    }
}

/// UTC wall-clock time as `HH:MM:SS`.
fn timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (h, m, s) = (secs / 3600 % 24, secs / 60 % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Logs at DEBUG level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Debug, format_args!($($arg)*)) };
}

/// Logs at INFO level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Info, format_args!($($arg)*)) };
}

/// Logs at WARN level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Warn, format_args!($($arg)*)) };
}

/// Logs at ERROR level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log::write($crate::log::Level::Error, format_args!($($arg)*)) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_and_unknown_levels() {
        // Act / Assert
        assert_eq!(Level::parse("debug"), Level::Debug);
        assert_eq!(Level::parse(" WARN "), Level::Warn);
        assert_eq!(Level::parse("warning"), Level::Warn);
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        // Assert
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn line_has_time_level_and_message() {
        // Act
        let line = format_line("12:34:56", Level::Warn, format_args!("deleted {}", 3));

        // Assert
        assert_eq!(line, "12:34:56 [WARN] deleted 3\n");
    }

    #[test]
    fn write_before_init_is_a_no_op() {
        // Act / Assert: must not panic
        write(Level::Error, format_args!("nobody is listening"));
    }
}
