//! Exercise history ledger.
//!
//! Keeps one series of [`PerformanceEntry`] per exercise id, stored together
//! as a single document. Entries are appended in chronological order and a
//! same-day write replaces that day's entry in place, so the last element of
//! a series is always the most recent performance. Readers rely on that
//! ordering and never re-sort.

use crate::store::{keys, load_document, save_document, KvStore};
use crate::{EngineContext, PerformanceEntry, Result, SetRecord};
use std::collections::BTreeMap;

/// Exercise id to its performance series (oldest first)
pub type ExerciseHistories = BTreeMap<String, Vec<PerformanceEntry>>;

fn load_all<S: KvStore + ?Sized>(store: &S) -> ExerciseHistories {
    load_document(store, keys::EXERCISE_HISTORY)
}

/// Record today's performance for an exercise
///
/// Replaces an existing entry dated today, otherwise appends. Entries outside
/// the retention window are then dropped from this exercise's series.
pub fn record_set<S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &EngineContext,
    exercise_id: &str,
    record: SetRecord,
) -> Result<()> {
    let mut all = load_all(store);
    let series = all.entry(exercise_id.to_string()).or_default();
    let entry = PerformanceEntry::new(ctx.today, record);

    match series.iter_mut().find(|e| e.date == ctx.today) {
        Some(existing) => *existing = entry,
        None => series.push(entry),
    }

    let before = series.len();
    series.retain(|e| ctx.retains(e.date));
    let evicted = before - series.len();
    if evicted > 0 {
        tracing::debug!("Evicted {} old entries for {}", evicted, exercise_id);
    }

    save_document(store, keys::EXERCISE_HISTORY, &all)?;
    tracing::debug!(
        "Recorded {} kg x {} reps x {} sets for {}",
        record.weight_kg,
        record.reps,
        record.sets,
        exercise_id
    );
    Ok(())
}

/// Stored series for an exercise, oldest first; empty if none
pub fn get_history<S: KvStore + ?Sized>(store: &S, exercise_id: &str) -> Vec<PerformanceEntry> {
    load_all(store).remove(exercise_id).unwrap_or_default()
}

pub fn get_all_histories<S: KvStore + ?Sized>(store: &S) -> ExerciseHistories {
    load_all(store)
}

/// Last element of the stored series
pub fn get_last_performance<S: KvStore + ?Sized>(
    store: &S,
    exercise_id: &str,
) -> Option<PerformanceEntry> {
    get_history(store, exercise_id).pop()
}

/// Entry recorded for an exercise on the given day, if any
pub fn entry_on<S: KvStore + ?Sized>(
    store: &S,
    exercise_id: &str,
    date: chrono::NaiveDate,
) -> Option<PerformanceEntry> {
    get_history(store, exercise_id)
        .into_iter()
        .find(|e| e.date == date)
}

/// Progress overview for one exercise
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressSummary {
    pub exercise_id: String,
    pub latest: PerformanceEntry,
    pub session_count: usize,
    /// Latest weight minus first weight; zero for a single entry
    pub improvement_kg: f64,
}

/// Summaries for every exercise with at least one entry, most recently
/// trained first
pub fn progress_summaries(histories: &ExerciseHistories) -> Vec<ProgressSummary> {
    let mut summaries: Vec<ProgressSummary> = histories
        .iter()
        .filter_map(|(id, series)| {
            let first = series.first()?;
            let latest = series.last()?;
            let improvement_kg = if series.len() > 1 {
                latest.weight - first.weight
            } else {
                0.0
            };
            Some(ProgressSummary {
                exercise_id: id.clone(),
                latest: latest.clone(),
                session_count: series.len(),
                improvement_kg,
            })
        })
        .collect();

    summaries.sort_by(|a, b| b.latest.date.cmp(&a.latest.date));
    summaries
}

/// Human-readable name from an exercise id: `"bench_press"` -> `"Bench Press"`
pub fn display_name(exercise_id: &str) -> String {
    exercise_id
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
