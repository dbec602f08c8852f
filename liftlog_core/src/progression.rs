//! Progressive overload advice.
//!
//! Looks only at the last recorded performance of an exercise:
//! - No history: start light, the caller picks a starting weight
//! - Reps at or above the target: add a fixed increment
//! - Otherwise: keep the weight and chase the target reps

use crate::ledger::get_last_performance;
use crate::store::KvStore;
use crate::{EngineContext, PerformanceEntry, RepTarget};

/// Weight added once the rep target is reached
pub const DEFAULT_INCREMENT_KG: f64 = 2.5;

/// Suggested load for the next session of an exercise
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    /// Suggested weight in kg; `None` for an exercise with no history
    pub weight: Option<f64>,
    pub reps: RepTarget,
    pub sets: u32,
    pub is_new: bool,
    pub is_progression: bool,
    pub message: String,
}

/// Suggest the next weight for an exercise from its last recorded performance
pub fn suggest<S: KvStore + ?Sized>(
    store: &S,
    ctx: &EngineContext,
    exercise_id: &str,
    default_sets: u32,
    default_reps: RepTarget,
) -> Suggestion {
    let last = get_last_performance(store, exercise_id);
    let suggestion = suggest_from(last.as_ref(), default_sets, default_reps, ctx.increment_kg);
    tracing::debug!("Suggestion for {}: {}", exercise_id, suggestion.message);
    suggestion
}

/// Progression rule applied to a single last performance
pub fn suggest_from(
    last: Option<&PerformanceEntry>,
    default_sets: u32,
    default_reps: RepTarget,
    increment_kg: f64,
) -> Suggestion {
    let Some(last) = last else {
        return Suggestion {
            weight: None,
            reps: default_reps,
            sets: default_sets,
            is_new: true,
            is_progression: false,
            message: "First time - start light!".into(),
        };
    };

    let target_reps = default_reps.target();

    if last.reps >= target_reps {
        Suggestion {
            weight: Some(last.weight + increment_kg),
            reps: default_reps,
            sets: default_sets,
            is_new: false,
            is_progression: true,
            message: format!("Progress! +{}kg from last time", increment_kg),
        }
    } else {
        Suggestion {
            weight: Some(last.weight),
            reps: default_reps,
            sets: default_sets,
            is_new: false,
            is_progression: false,
            message: format!("Same weight, aim for {} reps", target_reps),
        }
    }
}
