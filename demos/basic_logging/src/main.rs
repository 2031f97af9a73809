use std::num::NonZeroUsize;

use app_logger::{
    ConsoleSinkConfig, FileSinkConfig, Logger, LoggerConfig, RecordFormat, Rotation, Severity,
    params,
};

fn main() {
    let logger = Logger::new(LoggerConfig {
        service: "billing".to_string(),
        environment: "staging".to_string(),
        min_level: Severity::Info,
        flatten_newlines: true,
        file_config: Some(FileSinkConfig {
            directory: "/tmp/logs".to_string(),
            file_name_prefix: "billing".to_string(),
            rotation: Rotation::HOURLY,
            max_log_files: NonZeroUsize::new(3),
            format: RecordFormat::Structured,
        }),
        console_config: Some(ConsoleSinkConfig {
            format: RecordFormat::PipeDelimited,
        }),
    });

    println!("app_logger version: {}", logger.version());

    logger.info(&params!["service started"]);
    logger.warn(&params!["disk low", serde_json::json!({"pct": 91})]);

    // Gated out under the INFO minimum.
    logger.debug(&params!["connection pool state", serde_json::json!({"idle": 4})]);

    // Visible after lowering the minimum severity.
    logger.set_minimal_level(Severity::Debug);
    logger.debug(&params!["connection pool state", serde_json::json!({"idle": 4})]);

    let io_error = std::io::Error::other("connection reset by peer");
    logger.error(&[
        "upstream call failed".into(),
        app_logger::LogParam::from_error(&io_error),
    ]);
}
