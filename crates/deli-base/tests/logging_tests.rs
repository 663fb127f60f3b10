use deli_base::logging::{default_max_level, parse_level, StdoutLogger};
use log::{LevelFilter, Log};

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger;

    let record = log::RecordBuilder::new()
        .level(log::Level::Error)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(format_args!("test message"))
        .build();

    // This should not panic
    logger.log(&record);
    logger.flush();
}

#[test]
fn test_format_record_contains_location_and_message() {
    let record = log::RecordBuilder::new()
        .level(log::Level::Warn)
        .target("test")
        .file(Some("decoder.rs"))
        .line(Some(7))
        .args(format_args!("volume rejected"))
        .build();

    let line = StdoutLogger::format_record(&record);
    assert!(line.contains("[WARN]"));
    assert!(line.contains("decoder.rs:7"));
    assert!(line.ends_with("volume rejected"));
}

#[test]
fn test_parse_level_known_names() {
    assert_eq!(parse_level("off"), LevelFilter::Off);
    assert_eq!(parse_level("error"), LevelFilter::Error);
    assert_eq!(parse_level("WARN"), LevelFilter::Warn);
    assert_eq!(parse_level(" info "), LevelFilter::Info);
    assert_eq!(parse_level("trace"), LevelFilter::Trace);
}

#[test]
fn test_parse_level_unknown_falls_back_to_default() {
    assert_eq!(parse_level("loud"), default_max_level());
    assert_eq!(parse_level(""), default_max_level());
}

#[test]
fn test_init_stdout_logger_twice_is_harmless() {
    deli_base::init_stdout_logger();
    deli_base::init_stdout_logger();
    log::info!("logger initialized");
}
