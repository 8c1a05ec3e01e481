//! Pretty formatter pipeline
//!
//! Every record goes through the same stages, in order:
//!
//! 1. timestamp
//! 2. elapsed time since the previous record
//! 3. enrichment (argument list + colored template)
//! 4. interpolation
//! 5. extraction of the final line
//!
//! Stages take the record by value and hand it on; only the elapsed clock
//! carries state between records.

use std::time::Instant;

use chrono::{Local, SecondsFormat};
use parking_lot::Mutex;

use crate::format::interpolate::interpolate;
use crate::level::{color_for, ColorCode, CYAN, RESET, WHITE};
use crate::record::LogRecord;

const SECOND: u64 = 1000;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Milliseconds since the previous record seen by this clock
#[derive(Debug, Default)]
pub struct ElapsedClock {
    previous: Mutex<Option<Instant>>,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick and return the time since the last one (0 for the first).
    pub fn tick(&self) -> u64 {
        let now = Instant::now();
        let mut previous = self.previous.lock();
        let elapsed = previous
            .map(|p| now.duration_since(p).as_millis() as u64)
            .unwrap_or(0);
        *previous = Some(now);
        elapsed
    }
}

/// Human-friendly elapsed suffix: `+12ms`, `+3s`, `+2m`, `+1h`, `+1d`
pub fn humanize_elapsed(ms: u64) -> String {
    let rounded = |unit: u64| (ms + unit / 2) / unit;
    if ms >= DAY {
        format!("+{}d", rounded(DAY))
    } else if ms >= HOUR {
        format!("+{}h", rounded(HOUR))
    } else if ms >= MINUTE {
        format!("+{}m", rounded(MINUTE))
    } else if ms >= SECOND {
        format!("+{}s", rounded(SECOND))
    } else {
        format!("+{}ms", ms)
    }
}

/// Colorized, aligned formatter
#[derive(Debug)]
pub struct PrettyFormatter {
    /// Base logger name shown in every line
    name: String,
    /// Emit ANSI escape codes
    ansi: bool,
    clock: ElapsedClock,
}

impl PrettyFormatter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ansi: true,
            clock: ElapsedClock::new(),
        }
    }

    /// Same layout without escape codes, for files
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    pub fn render(&self, record: LogRecord) -> String {
        let record = stamp_timestamp(record);
        let record = self.stamp_elapsed(record);
        let record = self.enrich(record);
        let record = interpolate_message(record);
        extract_message(record)
    }

    /// Records stamped by their logger keep the logger's value; the
    /// formatter's own clock only covers records rendered directly.
    fn stamp_elapsed(&self, mut record: LogRecord) -> LogRecord {
        if record.elapsed_ms.is_none() {
            record.elapsed_ms = Some(self.clock.tick());
        }
        record
    }

    /// Replace the message with the line template and the splat with the
    /// values that fill it. The caller's own placeholders are resolved first
    /// so their arguments survive the swap.
    fn enrich(&self, mut record: LogRecord) -> LogRecord {
        let color = color_for(Some(&record.level));
        let message = interpolate(&record.message, &record.splat);

        record.splat = vec![
            record.timestamp.clone().unwrap_or_default(),
            format!("{:>5}", record.level.to_uppercase()),
            format!("{:>2}", self.name),
            message,
            humanize_elapsed(record.elapsed_ms.unwrap_or(0)),
        ];
        record.message = self.template(color);
        record
    }

    fn template(&self, color: Option<ColorCode>) -> String {
        if !self.ansi {
            return "[%s] %s: %s: %s %s".to_string();
        }
        format!(
            "{RESET}[%s] {}%s:{RESET} %s: {CYAN}%s{RESET} {WHITE}%s",
            color.unwrap_or_default()
        )
    }
}

/// Stage 1: local time, millisecond precision. An existing timestamp wins.
pub fn stamp_timestamp(mut record: LogRecord) -> LogRecord {
    if record.timestamp.is_none() {
        record.timestamp = Some(Local::now().to_rfc3339_opts(SecondsFormat::Millis, false));
    }
    record
}

/// Stage 4
pub fn interpolate_message(mut record: LogRecord) -> LogRecord {
    record.message = interpolate(&record.message, &record.splat);
    record.splat.clear();
    record
}

/// Stage 5
pub fn extract_message(record: LogRecord) -> String {
    record.message
}
