//! Logging infrastructure - structured tracing for calls and state lifecycle
//!
//! Design: `tracing` events with one target per concern (`luacall::call`,
//! `luacall::marshal`, `luacall::state`). Nothing is installed until the host
//! calls [`init`] or [`init_with_config`]; hosts with their own subscriber
//! simply skip that.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Deserializer};
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::ConfigError;
use crate::error::MarshalError;
use crate::interop::CallStatus;

pub use tracing::{debug, error, info, trace, warn};

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level for the `luacall` targets
    #[serde(deserialize_with = "deserialize_level")]
    pub level: Level,
    /// Write to this file instead of stderr
    pub log_path: Option<String>,
    /// Emit JSON lines instead of compact text
    pub json_format: bool,
    /// Show span enter/close events
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_path: None,
            json_format: false,
            show_spans: false,
        }
    }
}

fn deserialize_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Level, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Level::from_str(&raw).map_err(serde::de::Error::custom)
}

impl LogConfig {
    /// Create config from environment variables
    ///
    /// An unknown `LUACALL_LOG_LEVEL` is an error, as it is in a config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // LUACALL_LOG_LEVEL: trace, debug, info, warn, error
        if let Some(level) = var("LUACALL_LOG_LEVEL") {
            config.level = Level::from_str(&level).map_err(|_| ConfigError::Env {
                var: "LUACALL_LOG_LEVEL",
                value: level,
            })?;
        }

        config.log_path = var("LUACALL_LOG_FILE");
        config.json_format = var("LUACALL_LOG_JSON").is_some();
        config.show_spans = var("LUACALL_LOG_SPANS").is_some();

        Ok(config)
    }

    /// Verbose config for debugging a host integration
    pub fn debug() -> Self {
        Self {
            level: Level::TRACE,
            show_spans: true,
            ..Self::default()
        }
    }

    /// Filter directive used when `RUST_LOG` is not set
    pub fn directive(&self) -> String {
        format!("luacall={}", self.level.as_str().to_lowercase())
    }
}

/// Initialize logging from the environment
pub fn init() -> Result<(), ConfigError> {
    init_with_config(LogConfig::from_env()?);
    Ok(())
}

/// Appender writing to exactly `path`, creating its directory if needed
fn file_appender(path: &Path) -> Result<RollingFileAppender, InitError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("luacall.log");
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file)
        .build(dir)
}

/// Initialize logging with a custom configuration; later calls are no-ops
///
/// A log file that cannot be opened falls back to stderr with a warning.
pub fn init_with_config(config: LogConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directive()));

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let mut unopened = None;
        let writer = match config.log_path.as_deref() {
            Some(path) => match file_appender(Path::new(path)) {
                Ok(appender) => BoxMakeWriter::new(appender),
                Err(err) => {
                    unopened = Some((path, err));
                    BoxMakeWriter::new(io::stderr)
                }
            },
            None => BoxMakeWriter::new(io::stderr),
        };

        let layer = fmt::layer()
            .with_writer(writer)
            .with_span_events(span_events)
            .with_target(true)
            .with_line_number(cfg!(debug_assertions));

        let registry = tracing_subscriber::registry().with(env_filter);
        // Another subscriber may already be installed by the host
        let _ = if config.json_format {
            registry.with(layer.json()).try_init()
        } else {
            registry.with(layer.compact()).try_init()
        };

        if let Some((path, err)) = unopened {
            warn!(target: "luacall", path, error = %err, "cannot open log file, logging to stderr");
        }
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER_INITIALIZED.get().is_some()
}

/// Log the start of a call
#[inline]
pub fn log_call(function: &str, nargs: i32, nresults: i32) {
    trace!(
        target: "luacall::call",
        function,
        nargs,
        nresults,
        "calling Lua function"
    );
}

/// Log a completed call
#[inline]
pub fn log_call_return(function: &str, success: bool) {
    trace!(
        target: "luacall::call",
        function,
        success,
        "Lua function returned"
    );
}

/// Log a protected call that reported an error status
#[inline]
pub fn log_script_error(function: &str, status: CallStatus) {
    warn!(
        target: "luacall::call",
        function,
        status = %status,
        "Lua function raised an error"
    );
}

/// Log a result that did not match the declared type
#[inline]
pub fn log_marshal_error(function: &str, err: &MarshalError) {
    warn!(
        target: "luacall::marshal",
        function,
        index = err.index,
        error = %err,
        "result does not match signature"
    );
}

/// Log a broken depth postcondition
#[inline]
pub fn log_unbalanced(function: &str, expected: i32, found: i32) {
    error!(
        target: "luacall::call",
        function,
        expected,
        found,
        "stack depth changed across call"
    );
}

/// Log a state being opened or adopted
#[inline]
pub fn log_state_open(owned: bool, stdlib: bool) {
    debug!(target: "luacall::state", owned, stdlib, "Lua state ready");
}

/// Log an owned state being closed
#[inline]
pub fn log_state_close() {
    debug!(target: "luacall::state", "closing Lua state");
}

/// Log a chunk that failed to load or run
#[inline]
pub fn log_chunk_error(stage: &str, status: CallStatus) {
    warn!(
        target: "luacall::state",
        stage,
        status = %status,
        "chunk failed"
    );
}
