//! Domain model for the reminder/warning lifecycle engine.
//!
//! # Responsibility
//! - Define canonical entity records and their closed enumerations.
//! - Own entity-level invariant checks (`validate()`).
//!
//! # Invariants
//! - Every entity is identified by a stable non-nil UUID.
//! - Status/timestamp pairs stay consistent (`completed` ⇔ `completed_at`).
//! - Timestamps are naive and interpreted in the caller's timezone
//!   convention; the model never samples a clock.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod history;
pub mod reminder;
pub mod settings;
pub mod warning;

/// Ordinal priority classification shared by reminders (all five tiers)
/// and warning severities (top four, via [`warning::Severity::tier`]).
///
/// Drives ranking weight and notification-channel eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl PriorityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Informational => "informational",
        }
    }

    /// Parses a loosely-typed UI token into a tier.
    ///
    /// Unknown tokens are rejected, never coerced to a default.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "informational" => Ok(Self::Informational),
            _ => Err(ValidationError::UnknownToken {
                field: "priority",
                value: value.to_string(),
            }),
        }
    }
}

/// Notification delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[serde(rename = "inapp")]
    InApp,
    Push,
    Sms,
    Email,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InApp => "inapp",
            Self::Push => "push",
            Self::Sms => "sms",
            Self::Email => "email",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inapp" => Ok(Self::InApp),
            "push" => Ok(Self::Push),
            "sms" => Ok(Self::Sms),
            "email" => Ok(Self::Email),
            _ => Err(ValidationError::UnknownToken {
                field: "channel",
                value: value.to_string(),
            }),
        }
    }
}

/// Ordered channel subset. `BTreeSet` keeps iteration deterministic.
pub type ChannelSet = BTreeSet<Channel>;

/// Origin of an entity: user action or an external trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub auto_generated: bool,
    /// Trigger identifier, e.g. `manual`, `recurrence`, `weather_detector`.
    pub source: String,
}

impl Provenance {
    pub fn manual() -> Self {
        Self {
            auto_generated: false,
            source: "manual".to_string(),
        }
    }

    pub fn generated(source: impl Into<String>) -> Self {
        Self {
            auto_generated: true,
            source: source.into(),
        }
    }
}

/// Malformed create input or an entity that violates a model invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trimming.
    BlankTitle,
    /// Identifier is the nil UUID.
    NilId,
    /// A loosely-typed token does not name a known enum value.
    UnknownToken { field: &'static str, value: String },
    /// Warning priority score is outside 0–100.
    ScoreOutOfRange { value: u8 },
    /// Date range end precedes its start.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// `status=completed` and `completed_at` disagree.
    CompletedStateMismatch,
    /// `status=snoozed` and `snoozed_until` disagree.
    SnoozedStateMismatch,
    /// Recurring flag and recurrence pattern disagree.
    RecurrenceMismatch,
    /// Warning status and resolution timestamps disagree.
    ResolutionStateMismatch,
    /// Warning expires before it was created.
    ExpiryBeforeCreation {
        created_at: NaiveDateTime,
        expires_at: NaiveDateTime,
    },
    /// Snooze duration of zero length.
    ZeroDuration,
    /// Snooze duration text not in `<count> <unit>` form.
    UnparseableDuration(String),
    /// Quiet hours enabled with `start == end`.
    EmptyQuietWindow,
    /// Default snooze duration of zero minutes.
    ZeroDefaultSnooze,
    /// History record must carry exactly one terminal timestamp.
    HistoryTimestampCardinality { populated: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::NilId => write!(f, "identifier must not be the nil uuid"),
            Self::UnknownToken { field, value } => {
                write!(f, "unknown {field} value `{value}`")
            }
            Self::ScoreOutOfRange { value } => {
                write!(f, "priority score {value} is outside 0-100")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "date range end ({end}) precedes start ({start})")
            }
            Self::CompletedStateMismatch => {
                write!(f, "completed status and completed_at must be set together")
            }
            Self::SnoozedStateMismatch => {
                write!(f, "snoozed status and snoozed_until must be set together")
            }
            Self::RecurrenceMismatch => {
                write!(f, "recurring flag and recurrence pattern must agree")
            }
            Self::ResolutionStateMismatch => write!(
                f,
                "non-active warning must carry exactly one resolution timestamp"
            ),
            Self::ExpiryBeforeCreation {
                created_at,
                expires_at,
            } => write!(f, "expiry {expires_at} precedes creation {created_at}"),
            Self::ZeroDuration => write!(f, "snooze duration must be at least one minute"),
            Self::UnparseableDuration(text) => {
                write!(f, "cannot parse snooze duration `{text}`")
            }
            Self::EmptyQuietWindow => {
                write!(f, "quiet hours start and end must differ when enabled")
            }
            Self::ZeroDefaultSnooze => {
                write!(f, "default snooze duration must be at least one minute")
            }
            Self::HistoryTimestampCardinality { populated } => write!(
                f,
                "history record must carry exactly one terminal timestamp, found {populated}"
            ),
        }
    }
}

impl Error for ValidationError {}
