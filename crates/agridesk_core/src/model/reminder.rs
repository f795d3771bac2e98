//! Reminder domain model.
//!
//! # Responsibility
//! - Define the time-triggered obligation record tracked to completion.
//! - Derive effective status (`overdue`, elapsed snooze) from a caller
//!   supplied reference time.
//!
//! # Invariants
//! - `status == Completed` ⇔ `completed_at` is set.
//! - `status == Snoozed` ⇔ `snoozed_until` is set.
//! - `overdue` is never stored; it is a read-time derivation.
//! - `recurring` ⇔ `recurrence != RecurrencePattern::None`.

use crate::model::{ChannelSet, PriorityTier, Provenance, ValidationError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a reminder.
pub type ReminderId = Uuid;

/// Functional grouping of a reminder, mirroring the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    Activity,
    Custom,
    Financial,
    Resource,
}

impl ReminderCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Custom => "custom",
            Self::Financial => "financial",
            Self::Resource => "resource",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "activity" => Ok(Self::Activity),
            "custom" => Ok(Self::Custom),
            "financial" => Ok(Self::Financial),
            "resource" => Ok(Self::Resource),
            _ => Err(ValidationError::UnknownToken {
                field: "reminder category",
                value: value.to_string(),
            }),
        }
    }
}

/// Stored reminder lifecycle state.
///
/// `Overdue` appears in storage only when a caller chooses to materialize
/// a derivation; [`Reminder::effective_status`] is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Overdue,
    Snoozed,
    Completed,
}

impl ReminderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Overdue => "overdue",
            Self::Snoozed => "snoozed",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "overdue" => Ok(Self::Overdue),
            "snoozed" => Ok(Self::Snoozed),
            "completed" => Ok(Self::Completed),
            _ => Err(ValidationError::UnknownToken {
                field: "reminder status",
                value: value.to_string(),
            }),
        }
    }
}

/// Repeat cadence for recurring reminders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    None,
}

impl RecurrencePattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::None => "none",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "none" => Ok(Self::None),
            _ => Err(ValidationError::UnknownToken {
                field: "recurrence pattern",
                value: value.to_string(),
            }),
        }
    }
}

/// Create input for a reminder. Defaults that the engine owns (id,
/// status, timestamps, read flag) are not part of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub category: ReminderCategory,
    /// Free-form refinement under the category, e.g. `irrigation`.
    pub subtype: String,
    /// Optional crop/field reference this reminder is about.
    pub crop: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: NaiveTime,
    pub priority: PriorityTier,
    pub recurrence: RecurrencePattern,
    pub channels: ChannelSet,
    pub notes: String,
    /// `None` defaults to a manual user action.
    pub provenance: Option<Provenance>,
}

/// A time-triggered obligation tracked to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub category: ReminderCategory,
    pub subtype: String,
    pub crop: Option<String>,
    pub due_date: NaiveDate,
    pub due_time: NaiveTime,
    pub priority: PriorityTier,
    pub status: ReminderStatus,
    pub recurring: bool,
    pub recurrence: RecurrencePattern,
    pub snoozed_until: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub channels: ChannelSet,
    pub is_read: bool,
    pub notes: String,
    pub provenance: Provenance,
}

impl Reminder {
    /// Creates a pending reminder from validated draft input.
    ///
    /// # Contract
    /// - Assigns a fresh id, `status = Pending`, `created_at = now`,
    ///   `is_read = false`.
    /// - Provenance defaults to `{auto_generated: false, source: "manual"}`.
    /// - Creation produces no history record.
    pub fn from_draft(draft: NewReminder, now: NaiveDateTime) -> Result<Self, ValidationError> {
        Self::from_draft_with_id(Uuid::new_v4(), draft, now)
    }

    /// Creates a reminder with a caller-provided stable id.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn from_draft_with_id(
        id: ReminderId,
        draft: NewReminder,
        now: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if id.is_nil() {
            return Err(ValidationError::NilId);
        }
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::BlankTitle);
        }

        Ok(Self {
            id,
            title,
            description: draft.description,
            category: draft.category,
            subtype: draft.subtype,
            crop: draft.crop,
            due_date: draft.due_date,
            due_time: draft.due_time,
            priority: draft.priority,
            status: ReminderStatus::Pending,
            recurring: draft.recurrence != RecurrencePattern::None,
            recurrence: draft.recurrence,
            snoozed_until: None,
            completed_at: None,
            created_at: now,
            channels: draft.channels,
            is_read: false,
            notes: draft.notes,
            provenance: draft.provenance.unwrap_or_else(Provenance::manual),
        })
    }

    /// Checks stored-state invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_nil() {
            return Err(ValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        if (self.status == ReminderStatus::Completed) != self.completed_at.is_some() {
            return Err(ValidationError::CompletedStateMismatch);
        }
        if (self.status == ReminderStatus::Snoozed) != self.snoozed_until.is_some() {
            return Err(ValidationError::SnoozedStateMismatch);
        }
        if self.recurring != (self.recurrence != RecurrencePattern::None) {
            return Err(ValidationError::RecurrenceMismatch);
        }
        Ok(())
    }

    /// Combined due timestamp.
    pub fn due_at(&self) -> NaiveDateTime {
        self.due_date.and_time(self.due_time)
    }

    /// Resolves the status as of `now` without mutating the entity.
    ///
    /// - `Pending` with `due_at <= now` reads as `Overdue`.
    /// - `Snoozed` with an elapsed `snoozed_until` reads as `Pending`
    ///   (or `Overdue` when also past due); the stored hop never happens.
    pub fn effective_status(&self, now: NaiveDateTime) -> ReminderStatus {
        match self.status {
            ReminderStatus::Pending => {
                if self.due_at() <= now {
                    ReminderStatus::Overdue
                } else {
                    ReminderStatus::Pending
                }
            }
            ReminderStatus::Snoozed => match self.snoozed_until {
                Some(until) if until <= now => {
                    if self.due_at() <= now {
                        ReminderStatus::Overdue
                    } else {
                        ReminderStatus::Pending
                    }
                }
                _ => ReminderStatus::Snoozed,
            },
            // Materialized or terminal states read back unchanged.
            ReminderStatus::Overdue => ReminderStatus::Overdue,
            ReminderStatus::Completed => ReminderStatus::Completed,
        }
    }

    /// True when the due date falls on `now`'s calendar day and the
    /// reminder still reads as `Pending` or `Overdue`.
    pub fn is_due_today(&self, now: NaiveDateTime) -> bool {
        self.due_date == now.date()
            && matches!(
                self.effective_status(now),
                ReminderStatus::Pending | ReminderStatus::Overdue
            )
    }

    /// Marks the reminder as seen. Not a lifecycle transition.
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}
