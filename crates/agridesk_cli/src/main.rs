//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `agridesk_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use agridesk_core::{
    AlertBoard, ChannelSet, NewReminder, PriorityTier, RecurrencePattern, ReminderCategory,
};
use chrono::{NaiveDate, NaiveTime};

fn main() {
    println!("agridesk_core ping={}", agridesk_core::ping());
    println!("agridesk_core version={}", agridesk_core::core_version());

    // Fixed timestamps keep the probe output stable across runs.
    let now = NaiveDate::from_ymd_opt(2026, 3, 2)
        .expect("valid probe date")
        .and_hms_opt(8, 0, 0)
        .expect("valid probe time");

    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(
            NewReminder {
                title: "Irrigate north field".to_string(),
                description: String::new(),
                category: ReminderCategory::Activity,
                subtype: "irrigation".to_string(),
                crop: Some("wheat-n1".to_string()),
                due_date: now.date(),
                due_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid due time"),
                priority: PriorityTier::High,
                recurrence: RecurrencePattern::None,
                channels: ChannelSet::from([agridesk_core::Channel::InApp]),
                notes: String::new(),
                provenance: None,
            },
            now,
        )
        .expect("probe reminder should validate");
    board
        .complete_reminder(reminder.id, "probe", None, now)
        .expect("probe reminder should complete");

    let stats = board.stats(now);
    println!(
        "agridesk_core probe pending={} history={}",
        stats.pending_reminders,
        board.history.len()
    );
}
