//! Notification settings model.
//!
//! # Responsibility
//! - Hold the process-wide channel toggles, quiet-hours window and
//!   priority→channel eligibility matrix.
//! - Validate settings before they replace the active configuration.
//!
//! # Invariants
//! - The eligibility matrix is total over the five priority tiers.
//! - Quiet-hours windows may wrap across midnight; a zero-length window
//!   is rejected while enabled.
//! - Routing reads the current value on every decision; nothing caches.

use crate::model::{Channel, ChannelSet, PriorityTier, ValidationError};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Time-of-day window during which non-critical push/SMS is suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuietHours {
    pub enabled: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl QuietHours {
    /// True when `at` falls inside the half-open window `[start, end)`.
    ///
    /// A window with `start > end` wraps across midnight, e.g.
    /// 22:00–06:00 covers 23:00 and 05:59 but not 06:00.
    pub fn contains(&self, at: NaiveTime) -> bool {
        if self.start < self.end {
            self.start <= at && at < self.end
        } else if self.start > self.end {
            at >= self.start || at < self.end
        } else {
            false
        }
    }
}

/// Channel eligibility per priority tier.
///
/// Kept as one field per tier so the mapping stays total by
/// construction; an exhaustive `match` does the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityMatrix {
    pub critical: ChannelSet,
    pub high: ChannelSet,
    pub medium: ChannelSet,
    pub low: ChannelSet,
    pub informational: ChannelSet,
}

impl PriorityMatrix {
    pub fn channels_for(&self, tier: PriorityTier) -> &ChannelSet {
        match tier {
            PriorityTier::Critical => &self.critical,
            PriorityTier::High => &self.high,
            PriorityTier::Medium => &self.medium,
            PriorityTier::Low => &self.low,
            PriorityTier::Informational => &self.informational,
        }
    }
}

impl Default for PriorityMatrix {
    fn default() -> Self {
        Self {
            critical: ChannelSet::from([Channel::InApp, Channel::Push, Channel::Sms, Channel::Email]),
            high: ChannelSet::from([Channel::InApp, Channel::Push, Channel::Email]),
            medium: ChannelSet::from([Channel::InApp, Channel::Push]),
            low: ChannelSet::from([Channel::InApp]),
            informational: ChannelSet::from([Channel::InApp]),
        }
    }
}

/// Process-wide notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Globally enabled channels; a channel absent here never fires.
    pub enabled_channels: ChannelSet,
    pub quiet_hours: QuietHours,
    pub matrix: PriorityMatrix,
    /// Applied when a snooze command carries no explicit duration.
    pub default_snooze_minutes: u32,
}

impl NotificationSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quiet_hours.enabled && self.quiet_hours.start == self.quiet_hours.end {
            return Err(ValidationError::EmptyQuietWindow);
        }
        if self.default_snooze_minutes == 0 {
            return Err(ValidationError::ZeroDefaultSnooze);
        }
        Ok(())
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enabled_channels: ChannelSet::from([
                Channel::InApp,
                Channel::Push,
                Channel::Sms,
                Channel::Email,
            ]),
            quiet_hours: QuietHours {
                enabled: false,
                start: NaiveTime::from_hms_opt(22, 0, 0).expect("valid quiet start"),
                end: NaiveTime::from_hms_opt(6, 0, 0).expect("valid quiet end"),
            },
            matrix: PriorityMatrix::default(),
            default_snooze_minutes: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuietHours;
    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn plain_window_is_half_open() {
        let window = QuietHours {
            enabled: true,
            start: at(12, 0),
            end: at(14, 0),
        };
        assert!(window.contains(at(12, 0)));
        assert!(window.contains(at(13, 59)));
        assert!(!window.contains(at(14, 0)));
        assert!(!window.contains(at(11, 59)));
    }

    #[test]
    fn wrapping_window_crosses_midnight() {
        let window = QuietHours {
            enabled: true,
            start: at(22, 0),
            end: at(6, 0),
        };
        assert!(window.contains(at(23, 0)));
        assert!(window.contains(at(0, 30)));
        assert!(window.contains(at(5, 59)));
        assert!(!window.contains(at(6, 0)));
        assert!(!window.contains(at(12, 0)));
    }

    #[test]
    fn zero_length_window_contains_nothing() {
        let window = QuietHours {
            enabled: true,
            start: at(8, 0),
            end: at(8, 0),
        };
        assert!(!window.contains(at(8, 0)));
        assert!(!window.contains(at(20, 0)));
    }
}
