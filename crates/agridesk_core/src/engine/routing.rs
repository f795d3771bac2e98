//! Notification channel routing policy.
//!
//! # Responsibility
//! - Resolve which channels may fire for an entity given its priority
//!   tier and the current notification settings.
//!
//! # Invariants
//! - Result ⊆ declared ∩ matrix entry ∩ globally enabled channels.
//! - Quiet hours strip `push`/`sms` except for `critical` priority.
//! - Settings are consulted per call; an empty result is a valid outcome.

use crate::model::reminder::Reminder;
use crate::model::settings::NotificationSettings;
use crate::model::warning::Warning;
use crate::model::{Channel, ChannelSet, PriorityTier};
use chrono::NaiveDateTime;

/// Resolves the eligible channel set for one notification decision.
pub fn resolve_channels(
    declared: &ChannelSet,
    tier: PriorityTier,
    settings: &NotificationSettings,
    now: NaiveDateTime,
) -> ChannelSet {
    let mut eligible: ChannelSet = declared
        .intersection(settings.matrix.channels_for(tier))
        .copied()
        .collect();
    eligible.retain(|channel| settings.enabled_channels.contains(channel));

    if settings.quiet_hours.enabled
        && settings.quiet_hours.contains(now.time())
        && tier != PriorityTier::Critical
    {
        eligible.remove(&Channel::Push);
        eligible.remove(&Channel::Sms);
    }

    eligible
}

/// Routing decision for a reminder, starting from its declared channels.
pub fn reminder_channels(
    reminder: &Reminder,
    settings: &NotificationSettings,
    now: NaiveDateTime,
) -> ChannelSet {
    resolve_channels(&reminder.channels, reminder.priority, settings, now)
}

/// Routing decision for a warning.
///
/// Warnings carry no per-entity channel set; the severity's matrix
/// entry is the declared set.
pub fn warning_channels(
    warning: &Warning,
    settings: &NotificationSettings,
    now: NaiveDateTime,
) -> ChannelSet {
    let tier = warning.severity.tier();
    resolve_channels(settings.matrix.channels_for(tier), tier, settings, now)
}
