//! Audit history domain model.
//!
//! # Responsibility
//! - Define the append-only record produced by every state transition.
//! - Keep per-action payload and terminal timestamp consistent.
//!
//! # Invariants
//! - Exactly one terminal timestamp is populated per record.
//! - Records are immutable once appended; history is most-recent-first.
//! - Creation of an entity writes no history; only transitions do.

use crate::model::reminder::Reminder;
use crate::model::warning::Warning;
use crate::model::ValidationError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which entity collection a history record refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Reminder,
    Warning,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Warning => "warning",
        }
    }
}

/// Audited action. Creation and read-marking are intentionally absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    Completed,
    Snoozed,
    Rescheduled,
    Dismissed,
    Resolved,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Snoozed => "snoozed",
            Self::Rescheduled => "rescheduled",
            Self::Dismissed => "dismissed",
            Self::Resolved => "resolved",
        }
    }
}

/// Append-only audit entry synthesized by the transition engine.
///
/// The entity title is denormalized so the audit trail stays readable
/// after the source entity is removed from the active set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub entity_kind: EntityKind,
    pub entity_id: Uuid,
    pub action: HistoryAction,
    pub title: String,
    pub actor: String,
    pub note: Option<String>,
    /// Human-readable snooze length, e.g. `3 hours`. Snooze only.
    pub snooze_duration: Option<String>,
    /// Previous due timestamp. Reschedule only.
    pub rescheduled_from: Option<NaiveDateTime>,
    /// New due timestamp. Reschedule only.
    pub rescheduled_to: Option<NaiveDateTime>,
    pub completed_at: Option<NaiveDateTime>,
    pub snoozed_at: Option<NaiveDateTime>,
    pub rescheduled_at: Option<NaiveDateTime>,
    pub dismissed_at: Option<NaiveDateTime>,
    pub resolved_at: Option<NaiveDateTime>,
}

impl HistoryRecord {
    /// Record for a completed reminder.
    pub fn completed(reminder: &Reminder, actor: &str, note: Option<String>, now: NaiveDateTime) -> Self {
        let mut record = Self::blank(EntityKind::Reminder, reminder.id, HistoryAction::Completed, &reminder.title, actor, note);
        record.completed_at = Some(now);
        record
    }

    /// Record for a snoozed reminder with its human-readable duration.
    pub fn snoozed(
        reminder: &Reminder,
        actor: &str,
        duration_label: String,
        now: NaiveDateTime,
    ) -> Self {
        let mut record = Self::blank(EntityKind::Reminder, reminder.id, HistoryAction::Snoozed, &reminder.title, actor, None);
        record.snooze_duration = Some(duration_label);
        record.snoozed_at = Some(now);
        record
    }

    /// Record for a rescheduled reminder carrying both due timestamps.
    pub fn rescheduled(
        reminder: &Reminder,
        actor: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Self {
        let mut record = Self::blank(EntityKind::Reminder, reminder.id, HistoryAction::Rescheduled, &reminder.title, actor, None);
        record.rescheduled_from = Some(from);
        record.rescheduled_to = Some(to);
        record.rescheduled_at = Some(now);
        record
    }

    /// Record for a resolved warning.
    pub fn resolved(warning: &Warning, actor: &str, note: Option<String>, now: NaiveDateTime) -> Self {
        let mut record = Self::blank(EntityKind::Warning, warning.id, HistoryAction::Resolved, &warning.title, actor, note);
        record.resolved_at = Some(now);
        record
    }

    /// Record for a dismissed warning.
    pub fn dismissed(warning: &Warning, actor: &str, note: Option<String>, now: NaiveDateTime) -> Self {
        let mut record = Self::blank(EntityKind::Warning, warning.id, HistoryAction::Dismissed, &warning.title, actor, note);
        record.dismissed_at = Some(now);
        record
    }

    /// The single populated action timestamp; ordering key for history.
    pub fn terminal_timestamp(&self) -> Option<NaiveDateTime> {
        self.completed_at
            .or(self.snoozed_at)
            .or(self.rescheduled_at)
            .or(self.dismissed_at)
            .or(self.resolved_at)
    }

    /// Checks the exactly-one-terminal-timestamp invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let populated = [
            self.completed_at,
            self.snoozed_at,
            self.rescheduled_at,
            self.dismissed_at,
            self.resolved_at,
        ]
        .iter()
        .filter(|stamp| stamp.is_some())
        .count();
        if populated != 1 {
            return Err(ValidationError::HistoryTimestampCardinality { populated });
        }
        Ok(())
    }

    fn blank(
        entity_kind: EntityKind,
        entity_id: Uuid,
        action: HistoryAction,
        title: &str,
        actor: &str,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_kind,
            entity_id,
            action,
            title: title.to_string(),
            actor: actor.to_string(),
            note,
            snooze_duration: None,
            rescheduled_from: None,
            rescheduled_to: None,
            completed_at: None,
            snoozed_at: None,
            rescheduled_at: None,
            dismissed_at: None,
            resolved_at: None,
        }
    }
}
