//! `app_logger` provides a leveled, structured logging facade.
//!
//! It offers:
//! - A [`Logger`] facade exposing `error`/`warn`/`info`/`debug` over a
//!   configurable minimum [`Severity`].
//! - Call-site enrichment: every record carries the `file:line` of the
//!   application code that issued the call.
//! - Argument normalization via [`LogParam`] and [`serialize_params`]:
//!   heterogeneous arguments (text, numbers, structured values, errors with
//!   their source chains) collapse into one flat payload without ever
//!   failing the caller.
//! - Console and size/time-rotated file sinks, rendered either as a
//!   pipe-delimited text line or as a structured JSON record.
//!
//! Logging is a no-throw contract: a failure anywhere in the pipeline
//! degrades the log line or reports to stderr, but never interrupts the
//! application's control flow.
//!
//! # Example
//!
//! ```no_run
//! use std::num::NonZeroUsize;
//!
//! use app_logger::{
//!     ConsoleSinkConfig, FileSinkConfig, Logger, LoggerConfig, RecordFormat, Rotation, Severity,
//!     params,
//! };
//!
//! let logger = Logger::new(LoggerConfig {
//!     service: "billing".to_string(),
//!     environment: "staging".to_string(),
//!     min_level: Severity::Info,
//!     flatten_newlines: false,
//!     file_config: Some(FileSinkConfig {
//!         directory: "/tmp/logs".to_string(),
//!         file_name_prefix: "billing".to_string(),
//!         rotation: Rotation::HOURLY,
//!         max_log_files: NonZeroUsize::new(3),
//!         format: RecordFormat::Structured,
//!     }),
//!     console_config: Some(ConsoleSinkConfig {
//!         format: RecordFormat::PipeDelimited,
//!     }),
//! });
//!
//! logger.warn(&params!["disk low", serde_json::json!({"pct": 91})]);
//! logger.set_minimal_level(Severity::Debug);
//! logger.debug(&params!["now visible"]);
//! ```

mod logger;
mod origin;
mod params;
mod record;
mod severity;
mod sink;

use std::num::NonZeroUsize;

pub use tracing_appender::rolling::Rotation;

pub use self::{
    logger::Logger,
    origin::{ORIGIN_UNAVAILABLE, parse_frame},
    params::{LogParam, serialize_params},
    record::{LogRecord, RecordFormat},
    severity::Severity,
    sink::{Sink, WriterSink, console_sink, rolling_file_sink},
};

/// Comprehensive configuration for a [`Logger`] instance.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Logical service name, included in every record.
    pub service: String,

    /// Deployment environment tag, included in every record.
    pub environment: String,

    /// Minimum severity that passes the gate. Defaults to
    /// [`Severity::Warn`].
    pub min_level: Severity,

    /// If `true`, embedded newlines in the message payload are replaced with
    /// `".\t"` so the payload stays single-line-safe for line-oriented
    /// files.
    pub flatten_newlines: bool,

    /// Configuration for the rotating file sink. If `None`, file logging is
    /// disabled.
    pub file_config: Option<FileSinkConfig>,

    /// Configuration for the console sink. If `None`, console logging is
    /// disabled.
    pub console_config: Option<ConsoleSinkConfig>,
}

impl LoggerConfig {
    /// Creates a configuration with the default minimum severity and no
    /// sinks.
    pub fn new(service: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
            min_level: Severity::default(),
            flatten_newlines: false,
            file_config: None,
            console_config: None,
        }
    }
}

/// Configuration for the rotating file sink.
///
/// Rotation cadence, file naming, and retention are executed by the
/// underlying [`tracing_appender`] backend.
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Directory where log files will be stored.
    pub directory: String,

    /// Prefix for log file names.
    pub file_name_prefix: String,

    /// Rotation strategy for log files.
    pub rotation: Rotation,

    /// Maximum number of log files to keep. If `None`, all files are kept.
    pub max_log_files: Option<NonZeroUsize>,

    /// Output shape for records written to the file.
    pub format: RecordFormat,
}

/// Configuration for the console sink.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSinkConfig {
    /// Output shape for records written to the console.
    pub format: RecordFormat,
}

/// Errors that can occur while building logging components.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Represents an error in configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Represents an error during JSON serialization.
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Represents an error during initialization of the rolling file
    /// appender.
    #[error("Failed to initialize rolling file appender: {0}")]
    FileAppenderInitialization(#[from] tracing_appender::rolling::InitError),
}
