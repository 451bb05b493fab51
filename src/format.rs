use std::fmt;

use time::OffsetDateTime;

/// Severity of a single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders one log line: `<timestamp> <LEVEL> <message>\n`.
pub fn render_line(level: Level, message: &str, now: OffsetDateTime) -> String {
    format!("{} {} {}\n", line_stamp(now), level, message)
}

fn line_stamp(now: OffsetDateTime) -> String {
    let date = now.date();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        date.year(),
        date.month() as u8,
        date.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}

/// Minute-resolution stamp embedded in active file names.
pub fn file_stamp(now: OffsetDateTime) -> String {
    let date = now.date();
    format!(
        "{:04}-{:02}-{:02}_{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day(),
        now.hour(),
        now.minute()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn when() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).expect("timestamp")
    }

    #[test]
    fn renders_stamp_level_and_message() {
        let line = render_line(Level::Warn, "disk almost full", when());
        assert_eq!(line, "2023-11-14T22:13:20Z WARN disk almost full\n");
    }

    #[test]
    fn file_stamp_has_minute_resolution() {
        assert_eq!(file_stamp(when()), "2023-11-14_22-13");
    }
}
