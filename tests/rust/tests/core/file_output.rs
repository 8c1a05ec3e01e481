//! File transport behavior through the factory

use poplog_core::{Environment, Level, LogRecord, LoggerFactory, LoggerOptions};
use tests::fixtures::{read_log, TestLogging};
use tests::helpers::{has_ansi, line_count};

#[test]
fn test_file_floor_is_warn() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", false);

    logger.info("info stays on the console", &[]);
    logger.debug("debug too", &[]);
    logger.warn("disk at %d%%", &[&93]);
    logger.error("disk full", &[]);
    drop(logger);

    let (console, dir) = logging.finish();
    let file = read_log(dir.path(), "myapp-app");

    assert_eq!(line_count(&console.contents()), 4);
    assert_eq!(line_count(&file), 2);
    assert!(file.contains("disk at 93%"));
    assert!(file.contains("disk full"));
    assert!(!file.contains("info stays"));
}

#[test]
fn test_file_lines_are_pretty_without_ansi() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", true);
    logger.error("boom", &[]);
    drop(logger);

    let (console, dir) = logging.finish();
    let file = read_log(dir.path(), "myapp-app");

    assert!(has_ansi(&console.contents()));
    assert!(!has_ansi(&file));
    assert!(file.contains("ERROR: myapp: boom +"));
}

#[test]
fn test_unknown_level_is_dropped() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", false);

    logger.log(LogRecord::new(Level::Error, "kept"));
    logger.log(LogRecord::with_level_name("fatal", "lost"));
    drop(logger);

    let (console, dir) = logging.finish();
    assert_eq!(line_count(&console.contents()), 1);
    assert_eq!(line_count(&read_log(dir.path(), "myapp-app")), 1);
}

#[test]
fn test_log_directory_is_created_on_first_write() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("nested").join("logs");
    let factory = LoggerFactory::with_console_writer(
        LoggerOptions::new("myapp", &log_dir),
        Environment::Production,
        std::io::sink,
    )
    .unwrap();

    let logger = factory.create_logger_instance("app", false);
    assert!(!log_dir.exists());

    logger.error("first", &[]);
    drop(logger);
    drop(factory);

    assert_eq!(line_count(&read_log(&log_dir, "myapp-app")), 1);
}
