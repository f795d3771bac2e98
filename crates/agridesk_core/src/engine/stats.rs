//! Dashboard counters derived from the live collections.
//!
//! # Responsibility
//! - Reduce the reminder/warning collections into the header counters.
//!
//! # Invariants
//! - Counters are recomputed per query from current state; nothing is
//!   cached or incrementally maintained.

use crate::model::reminder::{Reminder, ReminderStatus};
use crate::model::warning::{Severity, Warning, WarningStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Counter block rendered at the top of the warnings/reminders screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Reminders reading as `pending` or `overdue`.
    pub pending_reminders: usize,
    /// Reminders reading as exactly `overdue`.
    pub overdue_reminders: usize,
    /// Warnings with stored status `active`.
    pub active_warnings: usize,
    /// Active warnings with `critical` severity.
    pub critical_warnings: usize,
    /// Reminders and warnings not yet read.
    pub unread: usize,
    /// Reminders due on `now`'s calendar day and not completed.
    pub due_today: usize,
}

impl DashboardStats {
    pub fn collect(reminders: &[Reminder], warnings: &[Warning], now: NaiveDateTime) -> Self {
        let mut stats = Self::default();

        for reminder in reminders {
            match reminder.effective_status(now) {
                ReminderStatus::Pending => stats.pending_reminders += 1,
                ReminderStatus::Overdue => {
                    stats.pending_reminders += 1;
                    stats.overdue_reminders += 1;
                }
                ReminderStatus::Snoozed | ReminderStatus::Completed => {}
            }
            if !reminder.is_read {
                stats.unread += 1;
            }
            if reminder.is_due_today(now) {
                stats.due_today += 1;
            }
        }

        for warning in warnings {
            if warning.status == WarningStatus::Active {
                stats.active_warnings += 1;
                if warning.severity == Severity::Critical {
                    stats.critical_warnings += 1;
                }
            }
            if !warning.is_read {
                stats.unread += 1;
            }
        }

        stats
    }
}
