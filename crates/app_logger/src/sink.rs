//! Sink construction and dispatch: where fully-formed records get written.
//!
//! Rotation and retention of log files are owned entirely by
//! [`tracing_appender`]; this module only renders records and hands the
//! bytes to a writer.

use std::{fmt, io::Write};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;

use crate::{
    ConsoleSinkConfig, FileSinkConfig, LoggerError,
    record::{LogRecord, RecordFormat},
};

/// A destination for fully-formed log records.
///
/// Sinks are fire-and-forget: `write` returns nothing, and failures stay
/// inside the sink. A logger method call must never surface a sink error to
/// the application.
pub trait Sink: Send + Sync {
    /// Accepts one record.
    fn write(&self, record: &LogRecord);
}

/// A sink that renders records in a fixed [`RecordFormat`] and writes them
/// through a [`MakeWriter`] factory, one line per record.
pub struct WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    writer: W,
    format: RecordFormat,
}

impl<W> WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    /// Creates a sink over the given writer factory.
    pub fn new(writer: W, format: RecordFormat) -> Self {
        Self { writer, format }
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl<W> Sink for WriterSink<W>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    fn write(&self, record: &LogRecord) {
        let Ok(line) = record.render(self.format) else {
            return;
        };
        let mut buffer = line.into_bytes();
        buffer.push(b'\n');

        // Single `write_all` call so concurrent writers do not interleave
        // records.
        let _ = self.writer.make_writer().write_all(&buffer);
    }
}

/// Builds a console sink writing to stdout through a buffered worker thread.
///
/// Records are written as long as the returned [`WorkerGuard`] is in scope.
pub fn console_sink(config: ConsoleSinkConfig) -> (WriterSink<NonBlocking>, WorkerGuard) {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    (WriterSink::new(writer, config.format), guard)
}

/// Builds a rotating file sink from the given configuration.
///
/// Records are written as long as the returned [`WorkerGuard`] is in scope.
///
/// # Errors
///
/// Returns [`LoggerError::Configuration`] if the target directory is empty,
/// or [`LoggerError::FileAppenderInitialization`] if the rolling file
/// appender cannot be created.
pub fn rolling_file_sink(
    config: FileSinkConfig,
) -> Result<(WriterSink<NonBlocking>, WorkerGuard), LoggerError> {
    if config.directory.trim().is_empty() {
        return Err(LoggerError::Configuration(
            "file sink directory must not be empty".to_string(),
        ));
    }

    let mut appender_builder = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(config.rotation)
        .filename_prefix(config.file_name_prefix);

    if let Some(max_log_files) = config.max_log_files {
        appender_builder = appender_builder.max_log_files(usize::from(max_log_files));
    }

    let appender = appender_builder.build(&config.directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((WriterSink::new(writer, config.format), guard))
}
