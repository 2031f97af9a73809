//! The logging facade: gating, call-site enrichment, and sink dispatch.

use std::{
    panic::Location,
    sync::atomic::{AtomicU8, Ordering},
};

use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    LoggerConfig, origin,
    params::{self, LogParam, serialize_params},
    record::LogRecord,
    severity::Severity,
    sink::{self, Sink},
};

/// A leveled, structured logging facade.
///
/// Each instance carries a fixed service/environment identity and owns its
/// sinks; the minimum severity may be changed at any time with
/// [`set_minimal_level`][Self::set_minimal_level] and applies to subsequent
/// calls on this instance only. Logging methods never panic and never
/// surface sink failures to the application.
#[allow(missing_debug_implementations)] // Sinks are `dyn Trait` objects
pub struct Logger {
    service: String,
    environment: String,
    min_level: AtomicU8,
    flatten_newlines: bool,
    sinks: Vec<Box<dyn Sink>>,
    _guards: Vec<WorkerGuard>,
}

impl Logger {
    /// Constructs a logger with the configured console and file sinks.
    ///
    /// A sink that fails to initialize is reported to stderr and skipped;
    /// the logger continues with whichever sinks remain. This keeps
    /// construction infallible at the call site, matching the no-throw
    /// contract of the logging methods.
    pub fn new(config: LoggerConfig) -> Self {
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        let mut guards = Vec::new();

        if let Some(console_config) = config.console_config {
            let (console, guard) = sink::console_sink(console_config);
            sinks.push(Box::new(console));
            guards.push(guard);
        }

        if let Some(file_config) = config.file_config {
            match sink::rolling_file_sink(file_config) {
                Ok((file, guard)) => {
                    sinks.push(Box::new(file));
                    guards.push(guard);
                }
                #[allow(clippy::print_stderr)]
                Err(error) => {
                    eprintln!(
                        "[ERROR] {}: failed to initialize file sink: {error}",
                        env!("CARGO_PKG_NAME")
                    );
                }
            }
        }

        Self {
            service: config.service,
            environment: config.environment,
            min_level: AtomicU8::new(config.min_level.rank()),
            flatten_newlines: config.flatten_newlines,
            sinks,
            _guards: guards,
        }
    }

    /// Constructs a logger over caller-supplied sinks.
    pub fn with_sinks(
        service: impl Into<String>,
        environment: impl Into<String>,
        min_level: Severity,
        sinks: Vec<Box<dyn Sink>>,
    ) -> Self {
        Self {
            service: service.into(),
            environment: environment.into(),
            min_level: AtomicU8::new(min_level.rank()),
            flatten_newlines: false,
            sinks,
            _guards: Vec::new(),
        }
    }

    /// Enables or disables newline flattening of the message payload.
    #[must_use]
    pub fn flatten_newlines(mut self, enabled: bool) -> Self {
        self.flatten_newlines = enabled;
        self
    }

    /// Logs at ERROR severity.
    #[track_caller]
    pub fn error(&self, params: &[LogParam]) {
        self.log(Severity::Error, params);
    }

    /// Logs at WARN severity.
    #[track_caller]
    pub fn warn(&self, params: &[LogParam]) {
        self.log(Severity::Warn, params);
    }

    /// Logs at INFO severity.
    #[track_caller]
    pub fn info(&self, params: &[LogParam]) {
        self.log(Severity::Info, params);
    }

    /// Logs at DEBUG severity.
    #[track_caller]
    pub fn debug(&self, params: &[LogParam]) {
        self.log(Severity::Debug, params);
    }

    /// Sets the minimum severity for subsequent calls on this instance.
    ///
    /// Updates are last-writer-wins; a concurrent in-flight call may observe
    /// either the old or the new minimum.
    pub fn set_minimal_level(&self, level: Severity) {
        self.min_level.store(level.rank(), Ordering::Relaxed);
    }

    /// The currently configured minimum severity.
    pub fn minimal_level(&self) -> Severity {
        Severity::from_rank(self.min_level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// The crate version baked in at build time.
    pub fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// The number of sinks that initialized successfully.
    ///
    /// After a degraded construction this is smaller than the number of
    /// configured sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    #[track_caller]
    fn log(&self, level: Severity, params: &[LogParam]) {
        // Gating is first and cheap: a rejected call allocates nothing.
        if !self.minimal_level().allows(level) {
            return;
        }

        let origin = origin::from_caller(Location::caller());
        let payload = serialize_params(params, false);

        // The interactive mirror keeps multi-line traces readable; the
        // single-line flattening applies only to what sinks receive.
        self.mirror(level, &payload);

        let message = if self.flatten_newlines {
            params::flatten(&payload)
        } else {
            payload
        };
        let record = LogRecord::new(
            level,
            self.service.clone(),
            self.environment.clone(),
            origin,
            message,
        );

        for sink in &self.sinks {
            sink.write(&record);
        }
    }

    /// Best-effort interactive echo of the payload, independent of sink
    /// configuration.
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn mirror(&self, level: Severity, payload: &str) {
        match level {
            Severity::Error => eprintln!("{level} {payload}"),
            _ => println!("{level} {payload}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::Logger;
    use crate::{
        ConsoleSinkConfig, FileSinkConfig, LogParam, LogRecord, LoggerConfig, RecordFormat,
        Rotation, Severity, params, sink::Sink,
    };

    #[derive(Clone, Default)]
    struct SpySink {
        records: Arc<Mutex<Vec<LogRecord>>>,
        writes: Arc<AtomicUsize>,
    }

    impl SpySink {
        fn records(&self) -> Vec<LogRecord> {
            self.records.lock().map(|inner| inner.clone()).unwrap_or_default()
        }

        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl Sink for SpySink {
        fn write(&self, record: &LogRecord) {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut inner) = self.records.lock() {
                inner.push(record.clone());
            }
        }
    }

    fn spy_logger(min_level: Severity) -> (Logger, SpySink) {
        let spy = SpySink::default();
        let logger = Logger::with_sinks("svc", "test", min_level, vec![Box::new(spy.clone())]);
        (logger, spy)
    }

    #[test]
    fn below_minimum_calls_produce_no_writes() {
        let (logger, spy) = spy_logger(Severity::Error);
        logger.debug(&params!["dropped"]);
        logger.warn(&params!["dropped"]);
        logger.info(&params!["dropped"]);
        assert_eq!(spy.write_count(), 0);
    }

    #[test]
    fn at_or_above_minimum_calls_write_once_per_sink() {
        let first = SpySink::default();
        let second = SpySink::default();
        let logger = Logger::with_sinks(
            "svc",
            "test",
            Severity::Warn,
            vec![Box::new(first.clone()), Box::new(second.clone())],
        );

        logger.warn(&params!["once"]);

        assert_eq!(first.write_count(), 1);
        assert_eq!(second.write_count(), 1);
    }

    #[test]
    fn record_carries_identity_and_origin() {
        let (logger, spy) = spy_logger(Severity::Debug);
        logger.info(&params!["ready"]);

        let records = spy.records();
        assert_eq!(records.len(), 1);
        let record = records.first().cloned().expect("one record written");
        assert_eq!(record.level, Severity::Info);
        assert_eq!(record.service, "svc");
        assert_eq!(record.environment, "test");
        assert_eq!(record.message, "ready");
        assert!(record.origin.starts_with("logger.rs:"));
        assert!(!record.time.is_empty());
    }

    #[test]
    fn set_minimal_level_applies_to_subsequent_calls_only_on_this_instance() {
        let (gated, gated_spy) = spy_logger(Severity::Error);
        let (open, open_spy) = spy_logger(Severity::Error);

        gated.set_minimal_level(Severity::Debug);
        gated.debug(&params!["now visible"]);
        open.debug(&params!["still gated"]);

        assert_eq!(gated_spy.write_count(), 1);
        assert_eq!(open_spy.write_count(), 0);
    }

    #[test]
    fn flatten_newlines_mode_produces_single_line_payloads() {
        let spy = SpySink::default();
        let logger = Logger::with_sinks("svc", "test", Severity::Debug, vec![Box::new(spy.clone())])
            .flatten_newlines(true);

        logger.error(&[LogParam::Trace("first\nsecond".to_string())]);

        let records = spy.records();
        let message = records.first().map(|r| r.message.clone()).unwrap_or_default();
        assert!(!message.contains('\n'));
        assert!(message.contains(".\t"));
    }

    fn failing_file_config() -> FileSinkConfig {
        FileSinkConfig {
            directory: String::new(),
            file_name_prefix: "svc".to_string(),
            rotation: Rotation::DAILY,
            max_log_files: None,
            format: RecordFormat::Structured,
        }
    }

    #[test]
    fn construction_with_failing_file_sink_degrades_to_no_sinks() {
        let logger = Logger::new(LoggerConfig {
            service: "svc".to_string(),
            environment: "test".to_string(),
            min_level: Severity::Debug,
            flatten_newlines: false,
            file_config: Some(failing_file_config()),
            console_config: None,
        });

        assert_eq!(logger.sink_count(), 0);

        // Calls are still accepted in the degraded state.
        logger.error(&params!["still accepted"]);
        logger.set_minimal_level(Severity::Error);
        logger.error(&params!["still accepted"]);
    }

    #[test]
    fn construction_with_failing_file_sink_keeps_surviving_sinks() {
        let logger = Logger::new(LoggerConfig {
            service: "svc".to_string(),
            environment: "test".to_string(),
            min_level: Severity::Debug,
            flatten_newlines: false,
            file_config: Some(failing_file_config()),
            console_config: Some(ConsoleSinkConfig {
                format: RecordFormat::PipeDelimited,
            }),
        });

        assert_eq!(logger.sink_count(), 1);
        logger.info(&params!["console only"]);
    }

    #[test]
    fn version_reports_the_build_version() {
        let (logger, _spy) = spy_logger(Severity::Debug);
        assert_eq!(logger.version(), env!("CARGO_PKG_VERSION"));
    }
}
