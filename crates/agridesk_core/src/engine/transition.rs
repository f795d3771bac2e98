//! Validated state transitions for reminders and warnings.
//!
//! # Responsibility
//! - Apply lifecycle transitions and synthesize the matching history
//!   record in one step.
//! - Reject transitions from states that do not permit them.
//!
//! # Invariants
//! - One successful transition returns exactly one history record.
//! - Source states are checked against the *effective* status, so an
//!   elapsed snooze transitions like `pending`/`overdue`.
//! - Terminal entities (`completed`, `resolved`, `dismissed`) reject
//!   every further transition; the engine never silently no-ops.

use crate::engine::duration::SnoozeDuration;
use crate::model::history::{HistoryAction, HistoryRecord};
use crate::model::reminder::{RecurrencePattern, Reminder, ReminderId, ReminderStatus};
use crate::model::warning::{Warning, WarningId, WarningStatus};
use crate::model::Provenance;
use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// A transition attempted from a state that does not permit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    InvalidReminderTransition {
        id: ReminderId,
        action: HistoryAction,
        status: ReminderStatus,
    },
    InvalidWarningTransition {
        id: WarningId,
        action: HistoryAction,
        status: WarningStatus,
    },
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReminderTransition { id, action, status } => write!(
                f,
                "invalid transition: cannot apply `{}` to reminder {id} in status `{}`",
                action.as_str(),
                status.as_str()
            ),
            Self::InvalidWarningTransition { id, action, status } => write!(
                f,
                "invalid transition: cannot apply `{}` to warning {id} in status `{}`",
                action.as_str(),
                status.as_str()
            ),
        }
    }
}

impl Error for TransitionError {}

/// Marks a reminder completed. Terminal.
pub fn complete_reminder(
    reminder: &Reminder,
    actor: &str,
    note: Option<String>,
    now: NaiveDateTime,
) -> Result<(Reminder, HistoryRecord), TransitionError> {
    ensure_reminder_open(reminder, HistoryAction::Completed, now)?;

    let mut updated = reminder.clone();
    updated.status = ReminderStatus::Completed;
    updated.completed_at = Some(now);
    updated.snoozed_until = None;

    let record = HistoryRecord::completed(&updated, actor, note, now);
    Ok((updated, record))
}

/// Snoozes a reminder until `now + duration`.
pub fn snooze_reminder(
    reminder: &Reminder,
    duration: SnoozeDuration,
    actor: &str,
    now: NaiveDateTime,
) -> Result<(Reminder, HistoryRecord), TransitionError> {
    ensure_reminder_open(reminder, HistoryAction::Snoozed, now)?;

    let mut updated = reminder.clone();
    updated.status = ReminderStatus::Snoozed;
    updated.snoozed_until = Some(now + duration.to_chrono());

    let record = HistoryRecord::snoozed(&updated, actor, duration.label(), now);
    Ok((updated, record))
}

/// Moves a reminder to a new due date/time and back to `pending`,
/// clearing any snooze and the overdue derivation with it.
pub fn reschedule_reminder(
    reminder: &Reminder,
    due_date: NaiveDate,
    due_time: NaiveTime,
    actor: &str,
    now: NaiveDateTime,
) -> Result<(Reminder, HistoryRecord), TransitionError> {
    ensure_reminder_open(reminder, HistoryAction::Rescheduled, now)?;

    let previous_due = reminder.due_at();
    let mut updated = reminder.clone();
    updated.due_date = due_date;
    updated.due_time = due_time;
    updated.status = ReminderStatus::Pending;
    updated.snoozed_until = None;

    let record = HistoryRecord::rescheduled(&updated, actor, previous_due, updated.due_at(), now);
    Ok((updated, record))
}

/// Next occurrence of a recurring reminder, advanced one pattern step
/// from its due date.
///
/// Returns `None` for non-recurring reminders (or on calendar
/// overflow). The successor is a fresh `pending` entity with
/// provenance `{auto_generated: true, source: "recurrence"}`; the
/// completed original stays terminal.
pub fn next_occurrence(reminder: &Reminder, now: NaiveDateTime) -> Option<Reminder> {
    let due_date = match reminder.recurrence {
        RecurrencePattern::Daily => reminder
            .due_date
            .checked_add_signed(chrono::Duration::days(1))?,
        RecurrencePattern::Weekly => reminder
            .due_date
            .checked_add_signed(chrono::Duration::days(7))?,
        RecurrencePattern::Monthly => reminder.due_date.checked_add_months(Months::new(1))?,
        RecurrencePattern::None => return None,
    };

    Some(Reminder {
        id: Uuid::new_v4(),
        due_date,
        status: ReminderStatus::Pending,
        snoozed_until: None,
        completed_at: None,
        created_at: now,
        is_read: false,
        provenance: Provenance::generated("recurrence"),
        ..reminder.clone()
    })
}

/// Resolves an active warning. Terminal.
pub fn resolve_warning(
    warning: &Warning,
    actor: &str,
    note: Option<String>,
    now: NaiveDateTime,
) -> Result<(Warning, HistoryRecord), TransitionError> {
    ensure_warning_active(warning, HistoryAction::Resolved)?;

    let mut updated = warning.clone();
    updated.status = WarningStatus::Resolved;
    updated.resolved_at = Some(now);

    let record = HistoryRecord::resolved(&updated, actor, note, now);
    Ok((updated, record))
}

/// Dismisses an active warning. Terminal.
pub fn dismiss_warning(
    warning: &Warning,
    actor: &str,
    note: Option<String>,
    now: NaiveDateTime,
) -> Result<(Warning, HistoryRecord), TransitionError> {
    ensure_warning_active(warning, HistoryAction::Dismissed)?;

    let mut updated = warning.clone();
    updated.status = WarningStatus::Dismissed;
    updated.dismissed_at = Some(now);

    let record = HistoryRecord::dismissed(&updated, actor, note, now);
    Ok((updated, record))
}

fn ensure_reminder_open(
    reminder: &Reminder,
    action: HistoryAction,
    now: NaiveDateTime,
) -> Result<(), TransitionError> {
    match reminder.effective_status(now) {
        ReminderStatus::Pending | ReminderStatus::Overdue => Ok(()),
        status => Err(TransitionError::InvalidReminderTransition {
            id: reminder.id,
            action,
            status,
        }),
    }
}

fn ensure_warning_active(warning: &Warning, action: HistoryAction) -> Result<(), TransitionError> {
    if warning.is_active() {
        Ok(())
    } else {
        Err(TransitionError::InvalidWarningTransition {
            id: warning.id,
            action,
            status: warning.status,
        })
    }
}
