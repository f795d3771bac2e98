//! Multi-criteria filtering over reminder and warning collections.
//!
//! # Responsibility
//! - Compose optional criteria into one AND predicate per entity kind.
//! - Match the reminder status criterion against *effective* status.
//!
//! # Invariants
//! - An unset criterion imposes no constraint.
//! - Output preserves input order; filtering twice with identical inputs
//!   yields identical ordered output.

use crate::model::reminder::{Reminder, ReminderCategory, ReminderStatus};
use crate::model::warning::{Severity, Warning, WarningCategory, WarningStatus};
use crate::model::{PriorityTier, ValidationError};
use chrono::{NaiveDate, NaiveDateTime};

/// Inclusive calendar-day range; construction rejects reversed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

/// Reminder list criteria. All set fields must hold at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderFilter {
    /// Exact crop/field reference match.
    pub crop: Option<String>,
    pub category: Option<ReminderCategory>,
    pub priority: Option<PriorityTier>,
    /// Matched against [`Reminder::effective_status`], so `Overdue`
    /// selects derived-overdue entries.
    pub status: Option<ReminderStatus>,
    /// Due-date window.
    pub due_range: Option<DateRange>,
}

/// Warning list criteria. The crop criterion matches any affected target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningFilter {
    pub crop: Option<String>,
    pub category: Option<WarningCategory>,
    pub severity: Option<Severity>,
    pub status: Option<WarningStatus>,
    /// Generation-date window.
    pub created_range: Option<DateRange>,
}

/// Returns reminders matching every set criterion, in input order.
pub fn filter_reminders(
    reminders: &[Reminder],
    filter: &ReminderFilter,
    now: NaiveDateTime,
) -> Vec<Reminder> {
    reminders
        .iter()
        .filter(|reminder| reminder_matches(reminder, filter, now))
        .cloned()
        .collect()
}

/// Returns warnings matching every set criterion, in input order.
pub fn filter_warnings(warnings: &[Warning], filter: &WarningFilter) -> Vec<Warning> {
    warnings
        .iter()
        .filter(|warning| warning_matches(warning, filter))
        .cloned()
        .collect()
}

fn reminder_matches(reminder: &Reminder, filter: &ReminderFilter, now: NaiveDateTime) -> bool {
    if let Some(crop) = filter.crop.as_deref() {
        if reminder.crop.as_deref() != Some(crop) {
            return false;
        }
    }
    if let Some(category) = filter.category {
        if reminder.category != category {
            return false;
        }
    }
    if let Some(priority) = filter.priority {
        if reminder.priority != priority {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if reminder.effective_status(now) != status {
            return false;
        }
    }
    if let Some(range) = filter.due_range {
        if !range.contains(reminder.due_date) {
            return false;
        }
    }
    true
}

fn warning_matches(warning: &Warning, filter: &WarningFilter) -> bool {
    if let Some(crop) = filter.crop.as_deref() {
        let affected = warning
            .affected_targets
            .iter()
            .any(|target| target.reference == crop);
        if !affected {
            return false;
        }
    }
    if let Some(category) = filter.category {
        if warning.category != category {
            return false;
        }
    }
    if let Some(severity) = filter.severity {
        if warning.severity != severity {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if warning.status != status {
            return false;
        }
    }
    if let Some(range) = filter.created_range {
        if !range.contains(warning.created_at.date()) {
            return false;
        }
    }
    true
}
