//! Core domain types for liftlog.
//!
//! This module defines the records the engine persists:
//! - Per-exercise performance entries
//! - Completed workout sessions
//! - Display preferences and the weekly alternation counter
//! - Rep targets supplied by the exercise catalog

use crate::{Error, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Days of history kept by the ledger and the completion log
pub const RETENTION_DAYS: i64 = 90;

/// Largest retention window accepted from configuration
pub const MAX_RETENTION_DAYS: i64 = 36_500;

/// Whether `date` still falls inside a retention window of `days` ending at `today`.
///
/// Entries dated exactly `days` before today are outside the window. A
/// window reaching past the representable date range keeps everything.
pub fn within_retention(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    match Duration::try_days(days).and_then(|window| today.checked_sub_signed(window)) {
        Some(cutoff) => date > cutoff,
        None => true,
    }
}

/// Calendar and tuning context supplied by the caller on every stateful call
///
/// `today` is injected rather than read from the system clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineContext {
    pub today: NaiveDate,
    pub retention_days: i64,
    pub increment_kg: f64,
}

impl EngineContext {
    /// Context with the built-in retention window and progression step
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            retention_days: RETENTION_DAYS,
            increment_kg: crate::progression::DEFAULT_INCREMENT_KG,
        }
    }

    pub fn from_config(today: NaiveDate, config: &crate::Config) -> Self {
        Self {
            today,
            retention_days: config.retention.days,
            increment_kg: config.progression.increment_kg,
        }
    }

    pub fn retains(&self, date: NaiveDate) -> bool {
        within_retention(date, self.today, self.retention_days)
    }
}

// ============================================================================
// Units
// ============================================================================

/// Mass unit used for display and input
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Kg,
    Lbs,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Lbs => "lbs",
        }
    }

    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Unit::Kg => Unit::Lbs,
            Unit::Lbs => Unit::Kg,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" => Ok(Unit::Kg),
            "lb" | "lbs" => Ok(Unit::Lbs),
            other => Err(Error::InvalidInput(format!("unknown unit: {}", other))),
        }
    }
}

// ============================================================================
// Exercise Ledger Types
// ============================================================================

/// Values recorded for one exercise in one session (weight in kg)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SetRecord {
    pub weight_kg: f64,
    pub reps: u32,
    pub sets: u32,
}

/// One day's performance of one exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PerformanceEntry {
    pub date: NaiveDate,
    /// Always kilograms
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
}

impl PerformanceEntry {
    pub fn new(date: NaiveDate, record: SetRecord) -> Self {
        Self {
            date,
            weight: record.weight_kg,
            reps: record.reps,
            sets: record.sets,
        }
    }
}

// ============================================================================
// Workout Session Types
// ============================================================================

/// Kind of workout session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Gym,
    Run,
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            WorkoutKind::Gym => "gym",
            WorkoutKind::Run => "run",
        })
    }
}

impl FromStr for WorkoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gym" => Ok(WorkoutKind::Gym),
            "run" => Ok(WorkoutKind::Run),
            other => Err(Error::InvalidInput(format!("unknown workout type: {}", other))),
        }
    }
}

/// Outcome of a single exercise within a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseResult {
    pub id: String,
    pub completed: bool,
    /// Always kilograms
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
}

/// A completed workout, at most one per calendar day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: WorkoutKind,
    #[serde(rename = "workout")]
    pub workout_id: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseResult>,
}

impl WorkoutSession {
    /// Number of exercises marked completed
    pub fn completed_count(&self) -> usize {
        self.exercises.iter().filter(|e| e.completed).count()
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }
}

// ============================================================================
// Preference and Counter Types
// ============================================================================

/// User display preferences
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub unit: Unit,
}

/// Weekly alternation state
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekCounter {
    #[serde(default)]
    pub parity: u8,
    #[serde(default)]
    pub last_week_key: Option<String>,
}

// ============================================================================
// Rep Targets
// ============================================================================

/// Rep prescription from the exercise catalog: a fixed count or a range
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepTarget {
    Count(u32),
    Range { low: u32, high: u32 },
}

impl RepTarget {
    /// Reps that must be reached before the weight goes up (upper bound of a range)
    pub fn target(&self) -> u32 {
        match self {
            RepTarget::Count(n) => *n,
            RepTarget::Range { high, .. } => *high,
        }
    }
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::Range { low, high } => write!(f, "{}-{}", low, high),
        }
    }
}

impl FromStr for RepTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| Error::InvalidInput(format!("invalid rep target: {}", s)))
        };

        match s.split_once('-') {
            Some((low, high)) => Ok(RepTarget::Range {
                low: parse(low)?,
                high: parse(high)?,
            }),
            None => Ok(RepTarget::Count(parse(s)?)),
        }
    }
}
