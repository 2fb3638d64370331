//! `log` backend for the host binary.
//!
//! - `MCU_TETRIS_LOG`: level filter (`off`, `error`, `warn`, `info`, `debug`, `trace`; default `warn`)
//! - `MCU_TETRIS_LOG_PATH`: append to this file instead of stderr
//!
//! Live mode owns the terminal: without a log file only errors reach stderr.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    pub path: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Warn,
            path: None,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Result<Self> {
        let level = match std::env::var("MCU_TETRIS_LOG") {
            Ok(v) => parse_level(&v)?,
            Err(_) => LevelFilter::Warn,
        };
        let path = std::env::var_os("MCU_TETRIS_LOG_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Ok(Self { level, path })
    }

    /// Caps the level at `error` when records would land on stderr.
    pub fn for_terminal(self) -> Self {
        match self.path {
            Some(_) => self,
            None => Self {
                level: self.level.min(LevelFilter::Error),
                path: None,
            },
        }
    }
}

pub fn parse_level(s: &str) -> Result<LevelFilter> {
    s.trim()
        .parse::<LevelFilter>()
        .map_err(|_| anyhow!("invalid log level: {}", s))
}

enum Sink {
    Stderr,
    File(File),
}

struct Logger {
    level: LevelFilter,
    sink: Mutex<Sink>,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = match &mut *sink {
                Sink::Stderr => io::stderr().write_all(line.as_bytes()),
                Sink::File(file) => file.write_all(line.as_bytes()),
            };
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = match &mut *sink {
                Sink::Stderr => io::stderr().flush(),
                Sink::File(file) => file.flush(),
            };
        }
    }
}

fn format_record(record: &Record) -> String {
    format!(
        "[{} {}] {}\n",
        record.level().as_str().to_ascii_lowercase(),
        record.target(),
        record.args()
    )
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Install the backend. Fails if a logger is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let sink = match &config.path {
        Some(path) => Sink::File(open_log_file(path)?),
        None => Sink::Stderr,
    };
    let logger = Logger {
        level: config.level,
        sink: Mutex::new(sink),
    };
    log::set_boxed_logger(Box::new(logger)).map_err(|e| anyhow!("logger init failed: {}", e))?;
    log::set_max_level(config.level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn parses_levels() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::Warn);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::Off);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn formats_level_and_target() {
        let line = format_record(
            &Record::builder()
                .level(Level::Info)
                .target("mcu_tetris_engine::game_loop")
                .args(format_args!("new game at tick {}", 0))
                .build(),
        );
        assert_eq!(line, "[info mcu_tetris_engine::game_loop] new game at tick 0\n");
    }

    #[test]
    fn default_is_warn_to_stderr() {
        let config = LogConfig::default();
        assert_eq!(config.level, LevelFilter::Warn);
        assert!(config.path.is_none());
    }

    #[test]
    fn terminal_mode_keeps_stderr_quiet() {
        let capped = LogConfig::default().for_terminal();
        assert_eq!(capped.level, LevelFilter::Error);

        let off = LogConfig {
            level: LevelFilter::Off,
            path: None,
        };
        assert_eq!(off.for_terminal().level, LevelFilter::Off);

        let to_file = LogConfig {
            level: LevelFilter::Debug,
            path: Some(PathBuf::from("mcu-tetris.log")),
        };
        assert_eq!(to_file.clone().for_terminal(), to_file);
    }
}
