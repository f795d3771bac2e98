use agridesk_core::{
    AlertBoard, BoardError, Channel, ChannelSet, HistoryAction, NewReminder, PriorityTier,
    RecurrencePattern, ReminderCategory, ReminderStatus, SnoozeDuration, TransitionError,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn draft(title: &str, due: NaiveDateTime) -> NewReminder {
    NewReminder {
        title: title.to_string(),
        description: String::new(),
        category: ReminderCategory::Activity,
        subtype: "irrigation".to_string(),
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

#[test]
fn creation_writes_no_history() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    board
        .create_reminder(draft("Irrigate", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();

    assert_eq!(board.reminders.len(), 1);
    assert!(board.history.is_empty());
}

#[test]
fn complete_is_terminal_and_audited_once() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Irrigate", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();

    let outcome = board
        .complete_reminder(reminder.id, "farm-manager", Some("done early".to_string()), now)
        .unwrap();
    assert_eq!(outcome.reminder.status, ReminderStatus::Completed);
    assert_eq!(outcome.reminder.completed_at, Some(now));
    assert_eq!(outcome.next_occurrence, None);
    assert_eq!(board.history.len(), 1);

    let record = &board.history[0];
    assert_eq!(record.action, HistoryAction::Completed);
    assert_eq!(record.actor, "farm-manager");
    assert_eq!(record.note.as_deref(), Some("done early"));
    assert_eq!(record.completed_at, Some(now));
    record.validate().unwrap();

    // Completion is irreversible: every further transition must fail and
    // leave the collections untouched.
    let later = now + chrono::Duration::hours(1);
    let complete_again = board.complete_reminder(reminder.id, "farm-manager", None, later);
    assert!(matches!(
        complete_again,
        Err(BoardError::Transition(
            TransitionError::InvalidReminderTransition {
                status: ReminderStatus::Completed,
                ..
            }
        ))
    ));
    let snooze_after = board.snooze_reminder(reminder.id, None, "farm-manager", later);
    assert!(matches!(snooze_after, Err(BoardError::Transition(_))));
    let reschedule_after = board.reschedule_reminder(
        reminder.id,
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        "farm-manager",
        later,
    );
    assert!(matches!(reschedule_after, Err(BoardError::Transition(_))));
    assert_eq!(board.history.len(), 1);
}

#[test]
fn snooze_sets_window_and_records_duration_label() {
    let now = dt(2026, 3, 1, 10, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Check pump", dt(2026, 3, 1, 9, 0)), now)
        .unwrap();

    let duration = SnoozeDuration::parse("3 hours").unwrap();
    let (updated, record) = board
        .snooze_reminder(reminder.id, Some(duration), "worker-7", now)
        .unwrap();

    assert_eq!(updated.status, ReminderStatus::Snoozed);
    assert_eq!(updated.snoozed_until, Some(dt(2026, 3, 1, 13, 0)));
    assert_eq!(record.action, HistoryAction::Snoozed);
    assert_eq!(record.snooze_duration.as_deref(), Some("3 hours"));
    assert_eq!(record.snoozed_at, Some(now));
    assert_eq!(board.history.len(), 1);
    assert_eq!(board.history[0], record);
}

#[test]
fn snooze_without_duration_uses_settings_default() {
    let now = dt(2026, 3, 1, 10, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Check pump", dt(2026, 3, 1, 9, 0)), now)
        .unwrap();

    let (updated, record) = board
        .snooze_reminder(reminder.id, None, "worker-7", now)
        .unwrap();
    assert_eq!(updated.snoozed_until, Some(dt(2026, 3, 1, 11, 0)));
    assert_eq!(record.snooze_duration.as_deref(), Some("1 hour"));
}

#[test]
fn unelapsed_snooze_rejects_transitions_until_it_elapses() {
    let now = dt(2026, 3, 1, 10, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Check pump", dt(2026, 3, 1, 9, 0)), now)
        .unwrap();
    board
        .snooze_reminder(
            reminder.id,
            Some(SnoozeDuration::from_minutes(120).unwrap()),
            "worker-7",
            now,
        )
        .unwrap();

    // Still snoozed at 11:00: complete and re-snooze are refused.
    let mid_snooze = dt(2026, 3, 1, 11, 0);
    assert!(matches!(
        board.complete_reminder(reminder.id, "worker-7", None, mid_snooze),
        Err(BoardError::Transition(
            TransitionError::InvalidReminderTransition {
                status: ReminderStatus::Snoozed,
                ..
            }
        ))
    ));
    assert_eq!(board.history.len(), 1);

    // At 12:00 the snooze has elapsed; the reminder transitions again.
    let elapsed = dt(2026, 3, 1, 12, 0);
    let outcome = board
        .complete_reminder(reminder.id, "worker-7", None, elapsed)
        .unwrap();
    assert_eq!(outcome.reminder.status, ReminderStatus::Completed);
    assert_eq!(outcome.reminder.snoozed_until, None);
    assert_eq!(board.history.len(), 2);
}

#[test]
fn reschedule_returns_to_pending_and_records_both_dates() {
    let now = dt(2026, 3, 3, 8, 0);
    let mut board = AlertBoard::default();
    // Due yesterday: reads as overdue at `now`.
    let reminder = board
        .create_reminder(draft("Soil test", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();

    let new_date = NaiveDate::from_ymd_opt(2026, 3, 6).unwrap();
    let new_time = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    let (updated, record) = board
        .reschedule_reminder(reminder.id, new_date, new_time, "farm-manager", now)
        .unwrap();

    assert_eq!(updated.status, ReminderStatus::Pending);
    assert_eq!(updated.effective_status(now), ReminderStatus::Pending);
    assert_eq!(updated.due_date, new_date);
    assert_eq!(updated.due_time, new_time);
    assert_eq!(record.action, HistoryAction::Rescheduled);
    assert_eq!(record.rescheduled_from, Some(dt(2026, 3, 2, 9, 0)));
    assert_eq!(record.rescheduled_to, Some(dt(2026, 3, 6, 14, 0)));
    assert_eq!(record.rescheduled_at, Some(now));
}

#[test]
fn every_transition_appends_exactly_one_record_at_the_head() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Walk fences", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();

    let t1 = dt(2026, 3, 1, 9, 0);
    board
        .snooze_reminder(
            reminder.id,
            Some(SnoozeDuration::from_minutes(30).unwrap()),
            "worker-7",
            t1,
        )
        .unwrap();
    assert_eq!(board.history.len(), 1);

    let t2 = dt(2026, 3, 1, 10, 0);
    board
        .reschedule_reminder(
            reminder.id,
            NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            "worker-7",
            t2,
        )
        .unwrap();
    assert_eq!(board.history.len(), 2);

    let t3 = dt(2026, 3, 1, 11, 0);
    board
        .complete_reminder(reminder.id, "worker-7", None, t3)
        .unwrap();
    assert_eq!(board.history.len(), 3);

    // Most recent action sits at the head.
    assert_eq!(board.history[0].action, HistoryAction::Completed);
    assert_eq!(board.history[1].action, HistoryAction::Rescheduled);
    assert_eq!(board.history[2].action, HistoryAction::Snoozed);
}

#[test]
fn completing_a_recurring_reminder_schedules_the_next_occurrence() {
    let now = dt(2026, 3, 2, 10, 0);
    let mut board = AlertBoard::default();
    let mut input = draft("Refill water troughs", dt(2026, 3, 2, 9, 0));
    input.recurrence = RecurrencePattern::Daily;
    let reminder = board.create_reminder(input, now).unwrap();

    let outcome = board
        .complete_reminder(reminder.id, "worker-7", None, now)
        .unwrap();
    let next = outcome.next_occurrence.expect("daily reminder should recur");

    assert_eq!(board.reminders.len(), 2);
    assert_ne!(next.id, reminder.id);
    assert_eq!(next.status, ReminderStatus::Pending);
    assert_eq!(next.due_date, NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    assert_eq!(next.due_time, reminder.due_time);
    assert!(next.provenance.auto_generated);
    assert_eq!(next.provenance.source, "recurrence");
    // Only the completion is audited; the successor is a creation.
    assert_eq!(board.history.len(), 1);
}

#[test]
fn scenario_due_today_becomes_overdue_after_two_hours() {
    let now = dt(2026, 3, 2, 8, 0);
    let mut board = AlertBoard::default();
    let mut input = draft("Inspect greenhouse vents", dt(2026, 3, 2, 9, 0));
    input.priority = PriorityTier::Critical;
    let reminder = board.create_reminder(input, now).unwrap();

    assert!(reminder.is_due_today(now));
    assert_eq!(reminder.effective_status(now), ReminderStatus::Pending);

    let later = now + chrono::Duration::hours(2);
    assert_eq!(reminder.effective_status(later), ReminderStatus::Overdue);
    assert!(reminder.is_due_today(later));
}

#[test]
fn unknown_ids_are_rejected_without_side_effects() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let missing = Uuid::new_v4();

    assert_eq!(
        board.complete_reminder(missing, "worker-7", None, now),
        Err(BoardError::ReminderNotFound(missing))
    );
    assert_eq!(
        board.remove_reminder(missing),
        Err(BoardError::ReminderNotFound(missing))
    );
    assert!(board.history.is_empty());
}

#[test]
fn remove_reminder_drops_it_from_the_active_set_without_history() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Old task", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();

    let removed = board.remove_reminder(reminder.id).unwrap();
    assert_eq!(removed.id, reminder.id);
    assert!(board.reminders.is_empty());
    assert!(board.history.is_empty());
}

#[test]
fn mark_read_is_not_a_transition() {
    let now = dt(2026, 3, 1, 8, 0);
    let mut board = AlertBoard::default();
    let reminder = board
        .create_reminder(draft("Read me", dt(2026, 3, 2, 9, 0)), now)
        .unwrap();
    board
        .complete_reminder(reminder.id, "worker-7", None, now)
        .unwrap();

    // Read-marking works even on terminal entities and writes no history.
    board.mark_reminder_read(reminder.id).unwrap();
    assert!(board.reminders[0].is_read);
    assert_eq!(board.history.len(), 1);
}
