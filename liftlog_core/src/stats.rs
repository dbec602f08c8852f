//! Workout statistics.
//!
//! Pure functions over a snapshot of the completion log; the caller loads
//! the history and supplies today's date.

use crate::WorkoutSession;
use chrono::{Datelike, Duration, NaiveDate};

/// Headline numbers for the history view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutStats {
    pub total: usize,
    pub this_week: usize,
    pub streak: usize,
    pub days_since_last: Option<i64>,
}

pub fn summarize(history: &[WorkoutSession], today: NaiveDate) -> WorkoutStats {
    WorkoutStats {
        total: history.len(),
        this_week: count_this_week(history, today),
        streak: calculate_streak(history, today),
        days_since_last: calculate_days_since_last(history, today),
    }
}

/// Most recent Sunday on or before `today`
fn start_of_week(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// Sessions dated on or after the start of the current Sunday-based week
pub fn count_this_week(history: &[WorkoutSession], today: NaiveDate) -> usize {
    let start = start_of_week(today);
    history.iter().filter(|s| s.date >= start).count()
}

/// Consecutive training days ending today or yesterday
///
/// Zero unless the most recent session is dated today or yesterday. The walk
/// stops at the first session not dated exactly one day before the previous
/// one, so a second session on the same day also ends the streak.
pub fn calculate_streak(history: &[WorkoutSession], today: NaiveDate) -> usize {
    let mut dates: Vec<NaiveDate> = history.iter().map(|s| s.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let Some(&latest) = dates.first() else {
        return 0;
    };
    let yesterday = today - Duration::days(1);
    if latest != today && latest != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut anchor = latest;
    for &date in &dates[1..] {
        let previous = anchor - Duration::days(1);
        if date != previous {
            break;
        }
        streak += 1;
        anchor = previous;
    }
    streak
}

/// Whole days between the most recent session and today; `None` if empty
pub fn calculate_days_since_last(history: &[WorkoutSession], today: NaiveDate) -> Option<i64> {
    let latest = history.iter().map(|s| s.date).max()?;
    Some((today - latest).num_days())
}

/// Sessions sorted newest first, at most `limit` of them
pub fn recent_sessions(history: &[WorkoutSession], limit: usize) -> Vec<&WorkoutSession> {
    let mut sorted: Vec<&WorkoutSession> = history.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
