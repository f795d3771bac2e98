//! Stable ranking for reminders, warnings and history.
//!
//! # Responsibility
//! - Order reminders by priority weight, then due date.
//! - Order warnings by priority score, history by action timestamp.
//!
//! # Invariants
//! - All sorts are stable: equal keys preserve input order.
//! - The weight table collapses `critical` and `high` to the same value;
//!   this matches the shipped dashboard behavior and is kept pending
//!   product clarification (see DESIGN.md).

use crate::model::history::HistoryRecord;
use crate::model::reminder::Reminder;
use crate::model::warning::Warning;
use crate::model::PriorityTier;

/// Secondary-key direction for the reminder sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Ranking weight per priority tier; higher sorts first.
pub fn priority_weight(tier: PriorityTier) -> u8 {
    match tier {
        PriorityTier::Critical => 3,
        PriorityTier::High => 3,
        PriorityTier::Medium => 2,
        PriorityTier::Low => 1,
        PriorityTier::Informational => 0,
    }
}

/// Sorts by descending priority weight, then by due timestamp in the
/// requested direction.
pub fn sort_reminders(reminders: &mut [Reminder], direction: SortDirection) {
    reminders.sort_by(|a, b| {
        priority_weight(b.priority)
            .cmp(&priority_weight(a.priority))
            .then_with(|| match direction {
                SortDirection::Ascending => a.due_at().cmp(&b.due_at()),
                SortDirection::Descending => b.due_at().cmp(&a.due_at()),
            })
    });
}

/// Sorts by descending priority score; ties keep input order.
pub fn sort_warnings(warnings: &mut [Warning]) {
    warnings.sort_by(|a, b| b.priority_score.cmp(&a.priority_score));
}

/// Sorts most-recent-first by the populated terminal timestamp.
/// Records missing one (invalid by construction) sort last.
pub fn sort_history(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| b.terminal_timestamp().cmp(&a.terminal_timestamp()));
}

#[cfg(test)]
mod tests {
    use super::priority_weight;
    use crate::model::PriorityTier;

    #[test]
    fn critical_and_high_share_the_top_weight() {
        assert_eq!(
            priority_weight(PriorityTier::Critical),
            priority_weight(PriorityTier::High)
        );
        assert!(priority_weight(PriorityTier::High) > priority_weight(PriorityTier::Medium));
        assert!(priority_weight(PriorityTier::Medium) > priority_weight(PriorityTier::Low));
        assert!(priority_weight(PriorityTier::Low) > priority_weight(PriorityTier::Informational));
    }
}
