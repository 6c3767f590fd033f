//! Logging setup for the dashboard.
//!
//! All modules log through `tracing`. [`init_logging`] installs a
//! `tracing-subscriber` registry once per process, writing to stdout and/or a
//! daily rolling file. The interactive dialog owns the terminal, so the CLI
//! turns the console layer off while it runs and logs to the file instead.
//!
//! ```rust,no_run
//! use bittensor_dash::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::new()
//!     .with_debug(true)
//!     .with_format(LogFormat::Compact);
//! init_logging(&config);
//! ```

pub mod format;

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::wallet::expand_home;

pub use format::{CompactFormatter, DashFormatter};

static INIT: Once = Once::new();

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Keeps the non-blocking file writer flushing until process exit.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Log file name prefix inside the logging directory.
const LOG_FILE_PREFIX: &str = "btdash.log";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `YYYY-MM-DD HH:MM:SS | LEVEL | target | message`
    #[default]
    Text,
    /// Newline-delimited JSON
    Json,
    /// `[LEVEL] message`
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!(
                "Invalid log format '{}'. Valid options: text, json, compact",
                s
            )),
        }
    }
}

/// Logging configuration, stored under `logging` in the dashboard config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level DEBUG
    pub debug: bool,
    /// Minimum level TRACE (overrides `debug`)
    pub trace: bool,
    /// Also write to a daily rolling file in `logging_dir`
    pub record_log: bool,
    /// Directory for log files (`~` is expanded)
    pub logging_dir: String,
    /// Write to stdout
    pub console: bool,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            trace: false,
            record_log: false,
            logging_dir: "~/.bittensor/logs".to_string(),
            console: true,
            format: LogFormat::Text,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_file_logging(mut self, enabled: bool) -> Self {
        self.record_log = enabled;
        self
    }

    pub fn with_logging_dir(mut self, dir: impl Into<String>) -> Self {
        self.logging_dir = dir.into();
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Apply environment overrides on top of this configuration.
    ///
    /// - `BITTENSOR_DEBUG`: enable debug level (any value)
    /// - `BITTENSOR_TRACE`: enable trace level (any value)
    /// - `BITTENSOR_LOG_FORMAT`: text, json or compact
    /// - `BITTENSOR_LOG_DIR`: log directory, also enables file logging
    pub fn apply_env(mut self) -> Self {
        if std::env::var("BITTENSOR_DEBUG").is_ok() {
            self.debug = true;
        }

        if std::env::var("BITTENSOR_TRACE").is_ok() {
            self.trace = true;
        }

        if let Ok(format) = std::env::var("BITTENSOR_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.format = f;
            }
        }

        if let Ok(dir) = std::env::var("BITTENSOR_LOG_DIR") {
            self.logging_dir = dir;
            self.record_log = true;
        }

        self
    }

    fn level(&self) -> Level {
        if self.trace {
            Level::TRACE
        } else if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    fn log_dir(&self) -> PathBuf {
        expand_home(&self.logging_dir)
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Build one formatting layer for the configured format over `writer`.
fn format_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => fmt::layer()
            .event_format(DashFormatter)
            .with_writer(writer)
            .with_ansi(ansi)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .event_format(CompactFormatter)
            .with_writer(writer)
            .with_ansi(ansi)
            .boxed(),
    }
}

/// Initialize the logging system. Only the first call has any effect.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        init_logging_internal(config);
        INITIALIZED.store(true, Ordering::SeqCst);
    });
}

/// Initialize logging with defaults (INFO, text, stdout).
pub fn init_default_logging() {
    init_logging(&LoggingConfig::default());
}

pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}

fn init_logging_internal(config: &LoggingConfig) {
    // RUST_LOG wins over the configured level
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level().to_string().to_lowercase())
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if config.console {
        layers.push(format_layer(config.format, io::stdout, true));
    }

    if config.record_log {
        let log_dir = config.log_dir();
        match std::fs::create_dir_all(&log_dir) {
            Ok(()) => {
                let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                layers.push(format_layer(config.format, writer, false));
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to create log directory {:?}: {}",
                    log_dir, e
                );
            }
        }
    }

    // Another subscriber may already be installed (e.g. by a host application)
    let _ = tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("COMPACT".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
        assert_eq!(LogFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_level_precedence() {
        assert_eq!(LoggingConfig::new().level(), Level::INFO);
        assert_eq!(LoggingConfig::new().with_debug(true).level(), Level::DEBUG);
        assert_eq!(
            LoggingConfig::new()
                .with_debug(true)
                .with_trace(true)
                .level(),
            Level::TRACE
        );
    }

    #[test]
    fn test_init_logging_once() {
        init_logging(&LoggingConfig::new().with_console(false));
        init_default_logging();
        assert!(is_initialized());
    }

    #[test]
    fn test_config_deserializes_partial() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{"debug": true, "format": "json"}"#).unwrap();
        assert!(config.debug);
        assert!(config.console);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.logging_dir, "~/.bittensor/logs");
    }
}
