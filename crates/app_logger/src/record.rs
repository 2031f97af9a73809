//! The structured log record and its two output shapes.

use serde::Serialize;
use time::{UtcDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{LoggerError, severity::Severity};

/// ISO-8601 UTC with millisecond precision, e.g. `2024-01-01T00:00:00.000Z`.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Sentinel timestamp used if formatting the current instant fails; the
/// `time` field is never empty.
const TIME_UNAVAILABLE: &str = "TimestampError";

/// Output shape for a rendered record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordFormat {
    /// A JSON object with the external field names
    /// `level, time, service_name, environment, path, message`.
    Structured,

    /// A single line `level|time|service|environment|origin|message|`.
    /// Field order and the trailing delimiter are part of the contract;
    /// text-sink consumers parse on `|`.
    PipeDelimited,
}

/// A fully-formed log record, handed to sinks and then discarded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogRecord {
    /// Severity label of the call.
    pub level: Severity,

    /// ISO-8601 UTC instant, generated when the record was created.
    pub time: String,

    /// Logical service name.
    #[serde(rename = "service_name")]
    pub service: String,

    /// Deployment environment tag.
    pub environment: String,

    /// Originating `file:line` of the application call, or the
    /// [`ORIGIN_UNAVAILABLE`][crate::ORIGIN_UNAVAILABLE] sentinel.
    #[serde(rename = "path")]
    pub origin: String,

    /// Flattened message payload.
    pub message: String,
}

impl LogRecord {
    /// Builds a record stamped with the current time.
    pub(crate) fn new(
        level: Severity,
        service: String,
        environment: String,
        origin: String,
        message: String,
    ) -> Self {
        Self {
            level,
            time: timestamp_now(),
            service,
            environment,
            origin,
            message,
        }
    }

    /// Renders the record in the requested output shape.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::JsonSerialization`] if the structured shape
    /// cannot be serialized.
    pub fn render(&self, format: RecordFormat) -> Result<String, LoggerError> {
        match format {
            RecordFormat::Structured => Ok(serde_json::to_string(self)?),
            RecordFormat::PipeDelimited => Ok(self.pipe_line()),
        }
    }

    /// The pipe-delimited text shape, including the trailing delimiter.
    pub fn pipe_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}|",
            self.level, self.time, self.service, self.environment, self.origin, self.message
        )
    }
}

fn timestamp_now() -> String {
    UtcDateTime::now()
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| TIME_UNAVAILABLE.to_string())
}
