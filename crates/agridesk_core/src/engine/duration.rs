//! Snooze duration parsing and formatting.
//!
//! # Responsibility
//! - Accept durations as minutes or as UI strings (`3 hours`, `45 min`).
//! - Render the human-readable label recorded in history entries.
//!
//! # Invariants
//! - A duration is at least one minute.
//! - Parsing is strict: text outside `<count> <unit>` form is rejected,
//!   never coerced.

use crate::model::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*(minutes?|mins?|m|hours?|hrs?|h|days?|d)\s*$")
        .expect("valid duration regex")
});

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * 60;

/// Validated snooze length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnoozeDuration {
    minutes: u32,
}

impl SnoozeDuration {
    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::ZeroDuration);
        }
        Ok(Self { minutes })
    }

    /// Parses UI text such as `3 hours`, `45 minutes` or `2d`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let normalized = text.to_ascii_lowercase();
        let captures = DURATION_RE
            .captures(&normalized)
            .ok_or_else(|| ValidationError::UnparseableDuration(text.to_string()))?;

        let count: u32 = captures[1]
            .parse()
            .map_err(|_| ValidationError::UnparseableDuration(text.to_string()))?;
        let per_unit = match &captures[2] {
            "m" | "min" | "mins" | "minute" | "minutes" => 1,
            "h" | "hr" | "hrs" | "hour" | "hours" => MINUTES_PER_HOUR,
            _ => MINUTES_PER_DAY,
        };
        let minutes = count
            .checked_mul(per_unit)
            .ok_or_else(|| ValidationError::UnparseableDuration(text.to_string()))?;
        Self::from_minutes(minutes)
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    pub fn to_chrono(self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.minutes))
    }

    /// Largest whole unit rendering, e.g. `3 hours`, `90 minutes`, `1 day`.
    pub fn label(self) -> String {
        let (count, unit) = if self.minutes % MINUTES_PER_DAY == 0 {
            (self.minutes / MINUTES_PER_DAY, "day")
        } else if self.minutes % MINUTES_PER_HOUR == 0 {
            (self.minutes / MINUTES_PER_HOUR, "hour")
        } else {
            (self.minutes, "minute")
        };
        if count == 1 {
            format!("1 {unit}")
        } else {
            format!("{count} {unit}s")
        }
    }
}
