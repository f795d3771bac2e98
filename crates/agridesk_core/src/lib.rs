//! Core lifecycle engine for farm reminders and warnings.
//! This crate is the single source of truth for lifecycle invariants:
//! effective status is derived, transitions are validated, and every
//! transition leaves exactly one audit record.

pub mod delivery;
pub mod engine;
pub mod logging;
pub mod model;
pub mod service;

pub use delivery::{DeliveryAdapter, DeliveryError, DeliveryRegistry, DispatchRequest};
pub use engine::duration::SnoozeDuration;
pub use engine::filter::{filter_reminders, filter_warnings, DateRange, ReminderFilter, WarningFilter};
pub use engine::rank::{priority_weight, sort_history, sort_reminders, sort_warnings, SortDirection};
pub use engine::routing::{reminder_channels, resolve_channels, warning_channels};
pub use engine::stats::DashboardStats;
pub use engine::transition::TransitionError;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::history::{EntityKind, HistoryAction, HistoryRecord};
pub use model::reminder::{
    NewReminder, RecurrencePattern, Reminder, ReminderCategory, ReminderId, ReminderStatus,
};
pub use model::settings::{NotificationSettings, PriorityMatrix, QuietHours};
pub use model::warning::{
    AffectedTarget, NewWarning, Severity, Warning, WarningCategory, WarningId, WarningStatus,
};
pub use model::{Channel, ChannelSet, PriorityTier, Provenance, ValidationError};
pub use service::board::{AlertBoard, BoardError, CompletionOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
