//! Level scheme and console colors

use serde::{Deserialize, Serialize};

/// ANSI escape sequence selecting a foreground color.
pub type ColorCode = &'static str;

pub const RESET: ColorCode = "\x1b[0m";
pub const RED: ColorCode = "\x1b[31m";
pub const YELLOW: ColorCode = "\x1b[33m";
pub const BLUE: ColorCode = "\x1b[34m";
pub const CYAN: ColorCode = "\x1b[36m";
pub const WHITE: ColorCode = "\x1b[37m";

/// Log level
///
/// The discriminant is the numeric severity: lower is more severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    /// Every level of the scheme, most severe first.
    pub const ALL: [Level; 4] = [Level::Error, Level::Warn, Level::Info, Level::Debug];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    pub fn severity(&self) -> u8 {
        *self as u8
    }

    /// Whether a record at this level passes a `floor` (minimum level).
    pub fn allows(&self, floor: Level) -> bool {
        self.severity() <= floor.severity()
    }

    pub fn color(&self) -> ColorCode {
        match self {
            Self::Error => RED,
            Self::Warn => YELLOW,
            Self::Info => CYAN,
            Self::Debug => BLUE,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Console color for a level name. A missing level is treated as `info`;
/// names outside the scheme have no color.
pub fn color_for(level: Option<&str>) -> Option<ColorCode> {
    Level::parse(level.unwrap_or("info")).map(|l| l.color())
}
