//! Free-trial bookkeeping. Every function takes `now` so callers control the clock.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const TRIAL_LENGTH_DAYS: i64 = 7;

/// How long after expiry the "your trial ended" reminder keeps showing
const REMINDER_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TrialStatus {
    /// No trial on record
    None,
    Active { remaining_secs: i64 },
    Expired { days_since: i64 },
}

/// End of a trial started at `now`
pub fn trial_end_from(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(TRIAL_LENGTH_DAYS)
}

pub fn trial_status(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> TrialStatus {
    match end {
        None => TrialStatus::None,
        Some(end) if now < end => TrialStatus::Active {
            remaining_secs: (end - now).num_seconds(),
        },
        Some(end) => TrialStatus::Expired {
            days_since: (now - end).num_days(),
        },
    }
}

pub fn format_time_remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = end - now;
    if diff <= Duration::zero() {
        return "Trial expired".to_string();
    }

    let days = diff.num_days();
    let hours = (diff - Duration::days(days)).num_hours();

    if days > 0 {
        format!("{} day{} remaining", days, plural(days))
    } else if hours > 0 {
        format!("{} hour{} remaining", hours, plural(hours))
    } else {
        "Less than 1 hour remaining".to_string()
    }
}

/// Whole days since the trial ended; 0 while active or without a trial
pub fn days_since_expiration(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match trial_status(end, now) {
        TrialStatus::Expired { days_since } => days_since,
        _ => 0,
    }
}

pub fn should_show_reminder(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(
        trial_status(end, now),
        TrialStatus::Expired { days_since } if days_since <= REMINDER_WINDOW_DAYS
    )
}

pub fn expiration_message(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let days = days_since_expiration(end, now);
    match days {
        d if d <= 0 => String::new(),
        1 => "Your free trial ended yesterday. Continue enjoying premium features by subscribing today!"
            .to_string(),
        d if d <= 3 => format!(
            "Your free trial ended {} days ago. Don't lose access to your premium features!",
            d
        ),
        d => format!(
            "Your free trial ended {} days ago. Subscribe now to continue using all features.",
            d
        ),
    }
}

pub fn encouragement_message(end: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(end_at) = end else {
        return String::new();
    };

    // Partial days count as a full day left
    let secs = (end_at - now).num_seconds();
    let days_remaining = if secs > 0 { (secs + 86_399) / 86_400 } else { 0 };

    if days_remaining > 3 {
        format!(
            "Enjoy your free trial! {} days remaining to explore all features.",
            days_remaining
        )
    } else if days_remaining > 0 {
        format!(
            "Trial ending soon! Only {} day{} left to experience the full benefits.",
            days_remaining,
            plural(days_remaining)
        )
    } else {
        expiration_message(end, now)
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 { "s" } else { "" }
}
