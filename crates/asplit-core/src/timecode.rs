//! `HH:MM:SS` timestamps: parsing user input and formatting offsets.
//!
//! Hours are unbounded; minutes and seconds must each be in `0..=59`.
//! Fields are plain ASCII digits and need no zero-padding (`1:2:3` is valid).

use thiserror::Error;

/// Which field of an `HH:MM:SS` timestamp an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TimeField::Hours => "hours",
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// Error returned for a malformed `HH:MM:SS` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimecodeError {
    #[error("badly formatted time \"{input}\": expected HH:MM:SS, found {found} field(s)")]
    FieldCount { input: String, found: usize },

    #[error("badly formatted time \"{input}\": {field} is not a non-negative integer")]
    NotANumber { input: String, field: TimeField },

    #[error("badly formatted time \"{input}\": {field} must be between 0 and 59, got {value}")]
    OutOfRange {
        input: String,
        field: TimeField,
        value: u64,
    },
}

/// Parses `HH:MM:SS` into a number of whole seconds.
pub fn parse_timecode(input: &str) -> Result<u64, TimecodeError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() != 3 {
        return Err(TimecodeError::FieldCount {
            input: input.to_string(),
            found: parts.len(),
        });
    }

    let fields = [TimeField::Hours, TimeField::Minutes, TimeField::Seconds];
    let mut values = [0u64; 3];
    for ((part, field), slot) in parts.iter().zip(fields).zip(values.iter_mut()) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimecodeError::NotANumber {
                input: input.to_string(),
                field,
            });
        }
        // All-digit strings only fail to parse on overflow.
        *slot = part.parse::<u64>().map_err(|_| TimecodeError::NotANumber {
            input: input.to_string(),
            field,
        })?;
    }

    let [hours, minutes, seconds] = values;
    for (field, value) in [(TimeField::Minutes, minutes), (TimeField::Seconds, seconds)] {
        if value > 59 {
            return Err(TimecodeError::OutOfRange {
                input: input.to_string(),
                field,
                value,
            });
        }
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or(TimecodeError::NotANumber {
            input: input.to_string(),
            field: TimeField::Hours,
        })
}

/// Formats an offset in seconds as `HH:MM:SS`, truncating any fraction.
/// Negative or non-finite offsets are shown as `00:00:00`.
pub fn format_hms(secs: f64) -> String {
    let total = whole_millis(secs) / 1000;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Formats an offset in seconds as `HH:MM:SS.mmm` (millisecond precision),
/// the form handed to the player so fractional probe results are kept.
pub fn format_precise(secs: f64) -> String {
    let millis = whole_millis(secs);
    let total = millis / 1000;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        total / 3600,
        (total / 60) % 60,
        total % 60,
        millis % 1000
    )
}

fn whole_millis(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * 1000.0).round() as u64
}
