//! Alert board: the in-memory container for reminders, warnings,
//! history and settings.
//!
//! # Responsibility
//! - Resolve entity ids against the live collections.
//! - Apply one transition and prepend its history record in one call.
//! - Expose filtered/ranked views and dashboard statistics.
//!
//! # Invariants
//! - Every successful transition grows history by exactly one record.
//! - Failed operations leave all collections untouched.
//! - Creation and read-marking write no history.

use crate::engine::duration::SnoozeDuration;
use crate::engine::filter::{filter_reminders, filter_warnings, ReminderFilter, WarningFilter};
use crate::engine::rank::{sort_history, sort_reminders, sort_warnings, SortDirection};
use crate::engine::routing;
use crate::engine::stats::DashboardStats;
use crate::engine::transition::{self, TransitionError};
use crate::model::history::HistoryRecord;
use crate::model::reminder::{NewReminder, Reminder, ReminderId};
use crate::model::settings::NotificationSettings;
use crate::model::warning::{NewWarning, Warning, WarningId};
use crate::model::{ChannelSet, ValidationError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Reminder id is absent from the active set.
    ReminderNotFound(ReminderId),
    /// Warning id is absent from the collection.
    WarningNotFound(WarningId),
    /// Create input or settings failed validation.
    Validation(ValidationError),
    /// Transition attempted from a state that does not permit it.
    Transition(TransitionError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReminderNotFound(id) => write!(f, "reminder not found: {id}"),
            Self::WarningNotFound(id) => write!(f, "warning not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Transition(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Transition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TransitionError> for BoardError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}

/// Result of completing a reminder: the terminal entity, its audit
/// record, and the auto-generated successor for recurring reminders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub reminder: Reminder,
    pub record: HistoryRecord,
    pub next_occurrence: Option<Reminder>,
}

/// In-memory state container behind the warnings/reminders screen.
///
/// Collections are public: the board is caller-owned state, not hidden
/// storage. Hosts that keep their own collections can drive the pure
/// functions in [`crate::engine`] directly instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBoard {
    pub reminders: Vec<Reminder>,
    pub warnings: Vec<Warning>,
    pub history: Vec<HistoryRecord>,
    pub settings: NotificationSettings,
}

impl AlertBoard {
    pub fn new(settings: NotificationSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Creates a pending reminder. No history record is written.
    pub fn create_reminder(
        &mut self,
        draft: NewReminder,
        now: NaiveDateTime,
    ) -> Result<Reminder, BoardError> {
        let reminder = Reminder::from_draft(draft, now)?;
        info!(
            "event=reminder_created module=board status=ok id={} priority={}",
            reminder.id,
            reminder.priority.as_str()
        );
        self.reminders.push(reminder.clone());
        Ok(reminder)
    }

    /// Registers a new active warning. No history record is written.
    pub fn create_warning(
        &mut self,
        draft: NewWarning,
        now: NaiveDateTime,
    ) -> Result<Warning, BoardError> {
        let warning = Warning::from_draft(draft, now)?;
        info!(
            "event=warning_created module=board status=ok id={} severity={} score={}",
            warning.id,
            warning.severity.as_str(),
            warning.priority_score
        );
        self.warnings.push(warning.clone());
        Ok(warning)
    }

    /// Completes a reminder and, for recurring ones, schedules the next
    /// occurrence in the same call.
    pub fn complete_reminder(
        &mut self,
        id: ReminderId,
        actor: &str,
        note: Option<String>,
        now: NaiveDateTime,
    ) -> Result<CompletionOutcome, BoardError> {
        let index = self.reminder_index(id)?;
        let (updated, record) =
            transition::complete_reminder(&self.reminders[index], actor, note, now)?;
        let next_occurrence = transition::next_occurrence(&updated, now);

        self.reminders[index] = updated.clone();
        if let Some(next) = next_occurrence.clone() {
            info!(
                "event=reminder_recurred module=board status=ok id={} source_id={}",
                next.id, updated.id
            );
            self.reminders.push(next);
        }
        self.history.insert(0, record.clone());
        info!(
            "event=reminder_completed module=board status=ok id={}",
            updated.id
        );

        Ok(CompletionOutcome {
            reminder: updated,
            record,
            next_occurrence,
        })
    }

    /// Snoozes a reminder. `duration = None` applies the configured
    /// default snooze length.
    pub fn snooze_reminder(
        &mut self,
        id: ReminderId,
        duration: Option<SnoozeDuration>,
        actor: &str,
        now: NaiveDateTime,
    ) -> Result<(Reminder, HistoryRecord), BoardError> {
        let duration = match duration {
            Some(value) => value,
            None => SnoozeDuration::from_minutes(self.settings.default_snooze_minutes)?,
        };
        let index = self.reminder_index(id)?;
        let (updated, record) =
            transition::snooze_reminder(&self.reminders[index], duration, actor, now)?;

        self.reminders[index] = updated.clone();
        self.history.insert(0, record.clone());
        info!(
            "event=reminder_snoozed module=board status=ok id={} minutes={}",
            updated.id,
            duration.minutes()
        );

        Ok((updated, record))
    }

    /// Moves a reminder to a new due date/time.
    pub fn reschedule_reminder(
        &mut self,
        id: ReminderId,
        due_date: NaiveDate,
        due_time: NaiveTime,
        actor: &str,
        now: NaiveDateTime,
    ) -> Result<(Reminder, HistoryRecord), BoardError> {
        let index = self.reminder_index(id)?;
        let (updated, record) =
            transition::reschedule_reminder(&self.reminders[index], due_date, due_time, actor, now)?;

        self.reminders[index] = updated.clone();
        self.history.insert(0, record.clone());
        info!(
            "event=reminder_rescheduled module=board status=ok id={}",
            updated.id
        );

        Ok((updated, record))
    }

    /// Resolves an active warning.
    pub fn resolve_warning(
        &mut self,
        id: WarningId,
        actor: &str,
        note: Option<String>,
        now: NaiveDateTime,
    ) -> Result<(Warning, HistoryRecord), BoardError> {
        let index = self.warning_index(id)?;
        let (updated, record) =
            transition::resolve_warning(&self.warnings[index], actor, note, now)?;

        self.warnings[index] = updated.clone();
        self.history.insert(0, record.clone());
        info!(
            "event=warning_resolved module=board status=ok id={}",
            updated.id
        );

        Ok((updated, record))
    }

    /// Dismisses an active warning.
    pub fn dismiss_warning(
        &mut self,
        id: WarningId,
        actor: &str,
        note: Option<String>,
        now: NaiveDateTime,
    ) -> Result<(Warning, HistoryRecord), BoardError> {
        let index = self.warning_index(id)?;
        let (updated, record) =
            transition::dismiss_warning(&self.warnings[index], actor, note, now)?;

        self.warnings[index] = updated.clone();
        self.history.insert(0, record.clone());
        info!(
            "event=warning_dismissed module=board status=ok id={}",
            updated.id
        );

        Ok((updated, record))
    }

    /// Removes a reminder from the active set on behalf of a
    /// collaborator-level delete. Writes no history.
    pub fn remove_reminder(&mut self, id: ReminderId) -> Result<Reminder, BoardError> {
        let index = self.reminder_index(id)?;
        let removed = self.reminders.remove(index);
        info!(
            "event=reminder_removed module=board status=ok id={}",
            removed.id
        );
        Ok(removed)
    }

    /// Marks one reminder as read. Allowed in any status.
    pub fn mark_reminder_read(&mut self, id: ReminderId) -> Result<(), BoardError> {
        let index = self.reminder_index(id)?;
        self.reminders[index].mark_read();
        Ok(())
    }

    /// Marks one warning as read. Allowed in any status.
    pub fn mark_warning_read(&mut self, id: WarningId) -> Result<(), BoardError> {
        let index = self.warning_index(id)?;
        self.warnings[index].mark_read();
        Ok(())
    }

    /// Marks everything read; returns how many entities changed.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for reminder in &mut self.reminders {
            if !reminder.is_read {
                reminder.mark_read();
                changed += 1;
            }
        }
        for warning in &mut self.warnings {
            if !warning.is_read {
                warning.mark_read();
                changed += 1;
            }
        }
        changed
    }

    /// Validates and atomically replaces the notification settings.
    pub fn save_settings(&mut self, settings: NotificationSettings) -> Result<(), BoardError> {
        settings.validate()?;
        self.settings = settings;
        info!("event=settings_saved module=board status=ok");
        Ok(())
    }

    /// Filtered, ranked reminder view for the dashboard list.
    pub fn reminders_view(
        &self,
        filter: &ReminderFilter,
        direction: SortDirection,
        now: NaiveDateTime,
    ) -> Vec<Reminder> {
        let mut items = filter_reminders(&self.reminders, filter, now);
        sort_reminders(&mut items, direction);
        items
    }

    /// Filtered, score-ranked warning view.
    pub fn warnings_view(&self, filter: &WarningFilter) -> Vec<Warning> {
        let mut items = filter_warnings(&self.warnings, filter);
        sort_warnings(&mut items);
        items
    }

    /// History view, most recent action first.
    pub fn history_view(&self) -> Vec<HistoryRecord> {
        let mut items = self.history.clone();
        sort_history(&mut items);
        items
    }

    /// Dashboard counters as of `now`.
    pub fn stats(&self, now: NaiveDateTime) -> DashboardStats {
        DashboardStats::collect(&self.reminders, &self.warnings, now)
    }

    /// Channels that would fire for a reminder right now. Consults the
    /// current settings on every call.
    pub fn reminder_channels(
        &self,
        id: ReminderId,
        now: NaiveDateTime,
    ) -> Result<ChannelSet, BoardError> {
        let index = self.reminder_index(id)?;
        Ok(routing::reminder_channels(
            &self.reminders[index],
            &self.settings,
            now,
        ))
    }

    /// Channels that would fire for a warning right now.
    pub fn warning_channels(
        &self,
        id: WarningId,
        now: NaiveDateTime,
    ) -> Result<ChannelSet, BoardError> {
        let index = self.warning_index(id)?;
        Ok(routing::warning_channels(
            &self.warnings[index],
            &self.settings,
            now,
        ))
    }

    fn reminder_index(&self, id: ReminderId) -> Result<usize, BoardError> {
        self.reminders
            .iter()
            .position(|reminder| reminder.id == id)
            .ok_or(BoardError::ReminderNotFound(id))
    }

    fn warning_index(&self, id: WarningId) -> Result<usize, BoardError> {
        self.warnings
            .iter()
            .position(|warning| warning.id == id)
            .ok_or(BoardError::WarningNotFound(id))
    }
}
