use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use liftlog_core::preferences::{self, to_kg};
use liftlog_core::{completion_log, ledger, stats, week_counter};
use liftlog_core::*;
use std::path::PathBuf;

/// Number of sessions listed by `stats`
const RECENT_LIMIT: usize = 20;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Workout progression and history tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show, set or toggle the display unit
    Unit {
        /// New unit (kg or lbs)
        unit: Option<String>,

        /// Switch between kg and lbs
        #[arg(long, conflicts_with = "unit")]
        toggle: bool,
    },

    /// Record today's weight/reps/sets for an exercise
    Log {
        exercise: String,

        /// Weight in the current display unit
        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: u32,

        #[arg(long, default_value_t = 1)]
        sets: u32,
    },

    /// Suggest the next weight for an exercise
    Suggest {
        exercise: String,

        #[arg(long, default_value_t = 3)]
        sets: u32,

        /// Rep target: a count (10) or a range (8-12)
        #[arg(long, default_value = "8-12")]
        reps: String,
    },

    /// Mark today's workout as completed
    Complete {
        /// Workout type (gym or run)
        kind: String,

        /// Workout identifier (e.g. push)
        workout: String,

        /// Exercise ids that belong to this workout
        #[arg(long = "exercise")]
        exercises: Vec<String>,
    },

    /// Clear today's completed workout
    Redo,

    /// Show today's completed workout
    Today,

    /// Show the weekly alternation
    Week {
        /// Pick one of two workouts for this week
        #[arg(long, num_args = 2, value_names = ["PRIMARY", "ALTERNATE"])]
        variants: Option<Vec<String>>,
    },

    /// Show workout statistics and recent sessions
    Stats,

    /// Show per-exercise progress
    Progress,

    /// Export the exercise history to CSV
    Export { path: PathBuf },

    /// Delete all stored data
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date {:?}: {}", s, e))
}

fn main() -> Result<()> {
    liftlog_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_or_default(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let ctx = EngineContext::from_config(today, &config);
    let mut store = FileStore::new(data_dir);

    tracing::debug!("Using data dir {:?}, today {}", store.dir(), today);

    match cli.command {
        Commands::Unit { unit, toggle } => cmd_unit(&mut store, unit, toggle),
        Commands::Log {
            exercise,
            weight,
            reps,
            sets,
        } => cmd_log(&mut store, &ctx, &exercise, weight, reps, sets),
        Commands::Suggest {
            exercise,
            sets,
            reps,
        } => cmd_suggest(&store, &ctx, &exercise, sets, &reps),
        Commands::Complete {
            kind,
            workout,
            exercises,
        } => cmd_complete(&mut store, &ctx, &kind, workout, exercises),
        Commands::Redo => cmd_redo(&mut store, &ctx),
        Commands::Today => cmd_today(&store, &ctx),
        Commands::Week { variants } => cmd_week(&mut store, &ctx, variants),
        Commands::Stats => cmd_stats(&store, &ctx),
        Commands::Progress => cmd_progress(&store),
        Commands::Export { path } => cmd_export(&store, &path),
        Commands::Reset { yes } => cmd_reset(&mut store, yes),
    }
}

fn cmd_unit(store: &mut FileStore, unit: Option<String>, toggle: bool) -> Result<()> {
    let unit = if toggle {
        preferences::toggle_unit(store)?
    } else if let Some(unit) = unit {
        let unit: Unit = unit.parse()?;
        preferences::set_unit(store, unit)?;
        unit
    } else {
        preferences::get_unit(store)
    };

    println!("Display unit: {}", unit);
    Ok(())
}

fn cmd_log(
    store: &mut FileStore,
    ctx: &EngineContext,
    exercise: &str,
    weight: f64,
    reps: u32,
    sets: u32,
) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(Error::InvalidInput(format!("invalid weight: {}", weight)));
    }

    let prefs = Preferences::load(store);
    let weight_kg = to_kg(weight, prefs.unit);
    ledger::record_set(
        store,
        ctx,
        exercise,
        SetRecord {
            weight_kg,
            reps,
            sets,
        },
    )?;

    println!(
        "✓ Logged {}: {} x {} reps x {} sets",
        ledger::display_name(exercise),
        prefs.format_weight(weight_kg),
        reps,
        sets
    );
    Ok(())
}

fn cmd_suggest(
    store: &FileStore,
    ctx: &EngineContext,
    exercise: &str,
    sets: u32,
    reps: &str,
) -> Result<()> {
    let reps: RepTarget = reps.parse()?;
    let prefs = Preferences::load(store);
    let suggestion = suggest(store, ctx, exercise, sets, reps);

    println!("{}", ledger::display_name(exercise));
    match suggestion.weight {
        Some(weight) => println!(
            "  → {} x {} reps x {} sets",
            prefs.format_weight(weight),
            suggestion.reps,
            suggestion.sets
        ),
        None => println!("  → {} reps x {} sets", suggestion.reps, suggestion.sets),
    }
    println!("  {}", suggestion.message);

    if let Some(last) = ledger::get_last_performance(store, exercise) {
        println!(
            "  Last: {} x {} reps ({})",
            prefs.format_weight(last.weight),
            last.reps,
            last.date
        );
    }
    Ok(())
}

fn cmd_complete(
    store: &mut FileStore,
    ctx: &EngineContext,
    kind: &str,
    workout: String,
    exercises: Vec<String>,
) -> Result<()> {
    let kind: WorkoutKind = kind.parse()?;

    let results = exercises
        .into_iter()
        .map(|id| match ledger::entry_on(store, &id, ctx.today) {
            Some(entry) => ExerciseResult {
                id,
                completed: true,
                weight: entry.weight,
                reps: entry.reps,
                sets: entry.sets,
            },
            None => ExerciseResult {
                id,
                completed: false,
                weight: 0.0,
                reps: 0,
                sets: 0,
            },
        })
        .collect();

    let session = WorkoutSession {
        date: ctx.today,
        kind,
        workout_id: workout,
        exercises: results,
    };
    let replaced = completion_log::has_completed_today(store, ctx);
    let summary = format!(
        "{}/{} exercises",
        session.completed_count(),
        session.exercise_count()
    );
    completion_log::record_session(store, ctx, session)?;

    if replaced {
        println!("✓ Workout updated for {} ({})", ctx.today, summary);
    } else {
        println!("✓ Workout completed for {} ({})", ctx.today, summary);
    }
    Ok(())
}

fn cmd_redo(store: &mut FileStore, ctx: &EngineContext) -> Result<()> {
    if !completion_log::has_completed_today(store, ctx) {
        println!("No workout recorded for {}.", ctx.today);
        return Ok(());
    }

    completion_log::clear_today(store, ctx)?;
    println!("✓ Workout reset - ready to go again!");
    Ok(())
}

fn cmd_today(store: &FileStore, ctx: &EngineContext) -> Result<()> {
    let Some(session) = completion_log::get_today_session(store, ctx) else {
        println!("No workout recorded for {}.", ctx.today);
        return Ok(());
    };

    let prefs = Preferences::load(store);
    println!(
        "{} ({}) on {}: {}/{} exercises",
        session.workout_id,
        session.kind,
        session.date,
        session.completed_count(),
        session.exercise_count()
    );
    for exercise in &session.exercises {
        let mark = if exercise.completed { "✓" } else { "·" };
        println!(
            "  {} {}: {} x {} reps x {} sets",
            mark,
            ledger::display_name(&exercise.id),
            prefs.format_weight(exercise.weight),
            exercise.reps,
            exercise.sets
        );
    }
    Ok(())
}

fn cmd_week(
    store: &mut FileStore,
    ctx: &EngineContext,
    variants: Option<Vec<String>>,
) -> Result<()> {
    let week = week_counter::week_key(ctx.today);

    match variants.as_deref() {
        Some([primary, alternate]) => {
            let chosen = week_counter::select_variant(store, ctx, primary, alternate)?;
            println!("Week {}: {}", week, chosen);
        }
        _ => {
            let parity = week_counter::current_parity(store, ctx)?;
            println!("Week {}: parity {}", week, parity);
        }
    }
    Ok(())
}

fn cmd_stats(store: &FileStore, ctx: &EngineContext) -> Result<()> {
    let history = completion_log::get_history(store);
    let summary = summarize(&history, ctx.today);

    println!("Total workouts:  {}", summary.total);
    println!("This week:       {}", summary.this_week);
    println!("Current streak:  {}", summary.streak);
    match summary.days_since_last {
        Some(days) => println!("Days since last: {}", days),
        None => println!("Days since last: -"),
    }

    let recent = stats::recent_sessions(&history, RECENT_LIMIT);
    if !recent.is_empty() {
        println!();
        for session in recent {
            println!(
                "  {} {:<4} {} ({}/{} exercises)",
                session.date.format("%a %b %-d"),
                session.kind,
                session.workout_id.replace('_', " "),
                session.completed_count(),
                session.exercise_count()
            );
        }
    }
    Ok(())
}

fn cmd_progress(store: &FileStore) -> Result<()> {
    let summaries = ledger::progress_summaries(&ledger::get_all_histories(store));
    if summaries.is_empty() {
        println!("No exercise data yet. Complete some workouts to track progress!");
        return Ok(());
    }

    let prefs = Preferences::load(store);
    for summary in summaries {
        println!(
            "{} ({} sessions)",
            ledger::display_name(&summary.exercise_id),
            summary.session_count
        );
        print!(
            "  Current: {} x {} reps",
            prefs.format_weight(summary.latest.weight),
            summary.latest.reps
        );
        if summary.session_count > 1 {
            let sign = if summary.improvement_kg > 0.0 { "+" } else { "" };
            print!(
                "  {}{} since start",
                sign,
                prefs.format_weight(summary.improvement_kg)
            );
        }
        println!();
    }
    Ok(())
}

fn cmd_export(store: &FileStore, path: &std::path::Path) -> Result<()> {
    let count = export_exercise_history(store, path)?;
    println!("✓ Exported {} entries to {}", count, path.display());
    Ok(())
}

fn cmd_reset(store: &mut FileStore, yes: bool) -> Result<()> {
    if !yes {
        println!("Refusing to delete all workout data without --yes.");
        return Ok(());
    }

    clear_all_data(store)?;
    println!("✓ All workout data cleared");
    Ok(())
}
