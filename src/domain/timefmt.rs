//! Relative-time labels for task rows and archive rows.
//!
//! Pure functions of a signed delta in seconds; the clock is always an
//! input, never read here. The presentation layer gets both the exact
//! wording and a coarse [`Urgency`] signal from one call.

use super::enums::Urgency;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_DAY: i64 = 86_400;

/// Round a second count to the nearest whole number of `unit`s.
fn rounded(delta: i64, unit: i64) -> i64 {
    (delta as f64 / unit as f64).round() as i64
}

/// Label and urgency for an active task, given `deadline - now` in seconds.
///
/// Positive deltas read "N <unit>s left", negative ones "N <unit>s late!".
/// Each bucket rounds to the nearest whole unit and clamps to the singular
/// form when the rounded count lands below 2.
pub fn deadline_label(delta: i64) -> (String, Urgency) {
    if delta > SECS_PER_DAY {
        let days = rounded(delta, SECS_PER_DAY);
        let text = if days < 2 {
            "1 day left".to_string()
        } else {
            format!("{} days left", days)
        };
        (text, Urgency::Normal)
    } else if delta > SECS_PER_HOUR {
        let hours = rounded(delta, SECS_PER_HOUR);
        let text = if hours < 2 {
            "1 hour left".to_string()
        } else {
            format!("{} hours left", hours)
        };
        (text, Urgency::Normal)
    } else if delta > 0 {
        let minutes = rounded(delta, SECS_PER_MINUTE);
        let text = if minutes < 2 {
            "1 minute left".to_string()
        } else {
            format!("{} minutes left", minutes)
        };
        (text, Urgency::Warning)
    } else if delta > -SECS_PER_HOUR {
        let minutes = rounded(delta, SECS_PER_MINUTE).abs();
        let text = if minutes < 2 {
            "1 minute late!".to_string()
        } else {
            format!("{} minutes late!", minutes)
        };
        (text, Urgency::Overdue)
    } else if delta > -SECS_PER_DAY {
        let hours = rounded(delta, SECS_PER_HOUR).abs();
        let text = if hours < 2 {
            "1 hour late!".to_string()
        } else {
            format!("{} hours late!", hours)
        };
        (text, Urgency::Overdue)
    } else {
        let days = rounded(delta, SECS_PER_DAY).abs();
        let text = if days < 2 {
            "1 day late!".to_string()
        } else {
            format!("{} days late!", days)
        };
        (text, Urgency::Overdue)
    }
}

/// Label for an archive row, given `now - completed_at` in seconds.
/// Elapsed time only, so no urgency and no "late" wording.
pub fn finished_label(delta: i64) -> String {
    if delta > SECS_PER_DAY {
        format!("{} days ago", rounded(delta, SECS_PER_DAY))
    } else if delta > SECS_PER_HOUR {
        format!("{} hours ago", rounded(delta, SECS_PER_HOUR))
    } else if delta > SECS_PER_MINUTE {
        format!("{} minutes ago", rounded(delta, SECS_PER_MINUTE))
    } else {
        "1 minute ago".to_string()
    }
}
