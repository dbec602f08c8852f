//! Completed workout log.
//!
//! Holds at most one [`WorkoutSession`] per calendar day, in insertion order.
//! Recording a session for a day that already has one replaces it in place.

use crate::store::{keys, load_document, save_document, KvStore};
use crate::{EngineContext, Result, WorkoutSession};

/// All stored sessions in insertion order
pub fn get_history<S: KvStore + ?Sized>(store: &S) -> Vec<WorkoutSession> {
    load_document(store, keys::WORKOUT_HISTORY)
}

fn save_history<S: KvStore + ?Sized>(store: &mut S, history: &[WorkoutSession]) -> Result<()> {
    save_document(store, keys::WORKOUT_HISTORY, history)
}

/// Upsert a session by date, then drop sessions outside the retention window
pub fn record_session<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &EngineContext,
    session: WorkoutSession,
) -> Result<()> {
    let mut history = get_history(store);
    let date = session.date;

    match history.iter_mut().find(|s| s.date == date) {
        Some(existing) => {
            tracing::info!("Replacing workout recorded on {}", date);
            *existing = session;
        }
        None => {
            tracing::info!("Recording {} workout on {}", session.workout_id, date);
            history.push(session);
        }
    }

    history.retain(|s| ctx.retains(s.date));
    save_history(store, &history)
}

/// Session dated today, if any
pub fn get_today_session<S: KvStore + ?Sized>(
    store: &S,
    ctx: &EngineContext,
) -> Option<WorkoutSession> {
    get_history(store).into_iter().find(|s| s.date == ctx.today)
}

pub fn has_completed_today<S: KvStore + ?Sized>(store: &S, ctx: &EngineContext) -> bool {
    get_today_session(store, ctx).is_some()
}

/// Remove today's session so the workout can be redone
pub fn clear_today<S: KvStore + ?Sized>(store: &mut S, ctx: &EngineContext) -> Result<()> {
    let mut history = get_history(store);
    let before = history.len();
    history.retain(|s| s.date != ctx.today);

    if history.len() != before {
        tracing::info!("Cleared workout recorded on {}", ctx.today);
    }
    save_history(store, &history)
}
