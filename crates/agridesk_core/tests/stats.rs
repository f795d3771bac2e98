use agridesk_core::{
    AlertBoard, Channel, ChannelSet, DashboardStats, NewReminder, NewWarning, PriorityTier,
    RecurrencePattern, ReminderCategory, Severity, SnoozeDuration, WarningCategory,
};
use chrono::{NaiveDate, NaiveDateTime};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn reminder_draft(title: &str, due: NaiveDateTime) -> NewReminder {
    NewReminder {
        title: title.to_string(),
        description: String::new(),
        category: ReminderCategory::Activity,
        subtype: String::new(),
        crop: None,
        due_date: due.date(),
        due_time: due.time(),
        priority: PriorityTier::Medium,
        recurrence: RecurrencePattern::None,
        channels: ChannelSet::from([Channel::InApp]),
        notes: String::new(),
        provenance: None,
    }
}

fn warning_draft(title: &str, severity: Severity, now: NaiveDateTime) -> NewWarning {
    NewWarning {
        title: title.to_string(),
        description: String::new(),
        category: WarningCategory::CropHealth,
        severity,
        affected_targets: vec![],
        recommended_actions: vec![],
        expires_at: now + chrono::Duration::days(5),
        priority_score: 50,
        provenance: None,
        reporter: None,
    }
}

#[test]
fn counters_reduce_the_live_collections() {
    let created = dt(2026, 3, 1, 8, 0);
    let now = dt(2026, 3, 2, 10, 0);
    let mut board = AlertBoard::default();

    // Due yesterday: overdue. Counts as pending and overdue.
    board
        .create_reminder(reminder_draft("late", dt(2026, 3, 1, 9, 0)), created)
        .unwrap();
    // Due later today at 14:00: pending and due today.
    board
        .create_reminder(reminder_draft("today", dt(2026, 3, 2, 14, 0)), created)
        .unwrap();
    // Due tomorrow: pending only.
    board
        .create_reminder(reminder_draft("tomorrow", dt(2026, 3, 3, 9, 0)), created)
        .unwrap();
    // Completed earlier today: out of every open counter.
    let done = board
        .create_reminder(reminder_draft("done", dt(2026, 3, 2, 9, 0)), created)
        .unwrap();
    board
        .complete_reminder(done.id, "worker-7", None, dt(2026, 3, 2, 9, 30))
        .unwrap();
    // Snoozed past `now`: neither pending nor overdue.
    let napping = board
        .create_reminder(reminder_draft("napping", dt(2026, 3, 2, 11, 0)), created)
        .unwrap();
    board
        .snooze_reminder(
            napping.id,
            Some(SnoozeDuration::from_minutes(240).unwrap()),
            "worker-7",
            dt(2026, 3, 2, 9, 0),
        )
        .unwrap();

    let active_critical = board
        .create_warning(warning_draft("blight", Severity::Critical, created), created)
        .unwrap();
    board
        .create_warning(warning_draft("aphids", Severity::Medium, created), created)
        .unwrap();
    let dismissed = board
        .create_warning(warning_draft("noise", Severity::Low, created), created)
        .unwrap();
    board
        .dismiss_warning(dismissed.id, "supervisor-1", None, dt(2026, 3, 1, 9, 0))
        .unwrap();
    board.mark_warning_read(active_critical.id).unwrap();

    let stats = board.stats(now);
    assert_eq!(stats.pending_reminders, 3); // late, today, tomorrow
    assert_eq!(stats.overdue_reminders, 1); // late
    assert_eq!(stats.active_warnings, 2); // blight, aphids
    assert_eq!(stats.critical_warnings, 1); // blight
    assert_eq!(stats.due_today, 1); // today
    assert_eq!(stats.unread, 7); // 5 reminders + 2 unread warnings
}

#[test]
fn due_today_requires_the_calendar_day_and_an_open_status() {
    let created = dt(2026, 3, 2, 6, 0);
    let now = dt(2026, 3, 2, 10, 0);
    let mut board = AlertBoard::default();

    // Due earlier today: overdue, still due today.
    board
        .create_reminder(reminder_draft("morning", dt(2026, 3, 2, 8, 0)), created)
        .unwrap();
    // Due later today.
    board
        .create_reminder(reminder_draft("afternoon", dt(2026, 3, 2, 15, 0)), created)
        .unwrap();
    // Due today but completed: excluded.
    let done = board
        .create_reminder(reminder_draft("done", dt(2026, 3, 2, 9, 0)), created)
        .unwrap();
    board
        .complete_reminder(done.id, "worker-7", None, dt(2026, 3, 2, 9, 30))
        .unwrap();
    // Due tomorrow: excluded.
    board
        .create_reminder(reminder_draft("tomorrow", dt(2026, 3, 3, 9, 0)), created)
        .unwrap();

    let stats = board.stats(now);
    assert_eq!(stats.due_today, 2);
    assert_eq!(stats.pending_reminders, 3);
    assert_eq!(stats.overdue_reminders, 1);
}

#[test]
fn elapsed_snooze_counts_as_pending_again() {
    let created = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(reminder_draft("nap", dt(2026, 3, 3, 9, 0)), created)
        .unwrap();
    board
        .snooze_reminder(
            reminder.id,
            Some(SnoozeDuration::from_minutes(60).unwrap()),
            "worker-7",
            dt(2026, 3, 1, 9, 0),
        )
        .unwrap();

    let during_snooze = board.stats(dt(2026, 3, 1, 9, 30));
    assert_eq!(during_snooze.pending_reminders, 0);

    let after_snooze = board.stats(dt(2026, 3, 1, 10, 0));
    assert_eq!(after_snooze.pending_reminders, 1);
}

#[test]
fn empty_collections_reduce_to_zeroed_stats() {
    let board = AlertBoard::default();
    let stats = board.stats(dt(2026, 3, 1, 8, 0));
    assert_eq!(stats, DashboardStats::default());
}
