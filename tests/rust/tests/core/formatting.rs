//! Console formatting through the factory

use poplog_core::{color_for, Environment, Level};
use pretty_assertions::assert_eq;
use tests::fixtures::{read_log, TestLogging};
use tests::helpers::{has_ansi, line_count};

#[test]
fn test_level_colors_are_distinct() {
    let colors: Vec<_> = Level::ALL.iter().map(|level| level.color()).collect();
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(color_for(None), Some(Level::Info.color()));
    assert_eq!(color_for(Some("verbose")), None);
}

#[test]
fn test_pretty_console_line() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", true);

    logger.info("user %s signed in", &[&"alice"]);
    drop(logger);

    let (console, _dir) = logging.finish();
    let output = console.contents();

    assert_eq!(line_count(&output), 1);
    assert!(output.starts_with("\x1b[0m["));
    assert!(output.contains("\x1b[36m INFO:\x1b[0m myapp: \x1b[36muser alice signed in\x1b[0m \x1b[37m+"));

    // timestamp, level, name, message, elapsed
    let ts_end = output.find(']').unwrap();
    let level_at = output.find(" INFO:").unwrap();
    let name_at = output.find("myapp").unwrap();
    let message_at = output.find("user alice").unwrap();
    let elapsed_at = output.rfind('+').unwrap();
    assert!(ts_end < level_at && level_at < name_at);
    assert!(name_at < message_at && message_at < elapsed_at);
}

#[test]
fn test_plain_console_line() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", false);

    logger.warn("queue depth %d", &[&42]);
    logger.debug("tick", &[]);
    drop(logger);

    let (console, _dir) = logging.finish();
    let output = console.contents();

    assert!(!has_ansi(&output));
    assert_eq!(output, "warn: queue depth 42\ndebug: tick\n");
}

#[test]
fn test_first_record_has_zero_elapsed() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", true);

    logger.info("first", &[]);
    logger.info("second", &[]);
    drop(logger);

    let (console, _dir) = logging.finish();
    let output = console.contents();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("\x1b[37m+0ms"));
    assert!(lines[1].contains("\x1b[37m+"));
}

/// `[<timestamp>]` at the start of a pretty line, with or without color codes
fn timestamp_of(line: &str) -> &str {
    let end = line.find(']').unwrap();
    let start = line[..end].rfind('[').unwrap() + 1;
    &line[start..end]
}

#[test]
fn test_elapsed_and_timestamp_are_per_logger() {
    let logging = TestLogging::new(Environment::Production);
    let logger = logging.factory.create_logger_instance("app", true);

    logger.info("warming up", &[]);
    std::thread::sleep(std::time::Duration::from_millis(300));
    logger.warn("cache cold", &[]);
    drop(logger);

    let (console, dir) = logging.finish();
    let output = console.contents();
    let console_lines: Vec<&str> = output.lines().collect();
    let file = read_log(dir.path(), "myapp-app");
    let file_lines: Vec<&str> = file.lines().collect();

    assert_eq!(console_lines.len(), 2);
    assert_eq!(file_lines.len(), 1);

    let file_line = file_lines[0];
    assert!(file_line.contains("cache cold"));
    assert!(!file_line.ends_with("+0ms"));

    let console_elapsed = console_lines[1].rsplit('+').next().unwrap();
    let file_elapsed = file_line.rsplit('+').next().unwrap();
    assert_eq!(console_elapsed, file_elapsed);
    assert_eq!(timestamp_of(console_lines[1]), timestamp_of(file_line));
}
