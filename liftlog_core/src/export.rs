//! CSV export of the exercise ledger.

use crate::ledger::get_all_histories;
use crate::store::KvStore;
use crate::Result;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    exercise_id: &'a str,
    date: String,
    weight_kg: f64,
    reps: u32,
    sets: u32,
}

/// Column names written as the first line of every export
const HEADERS: [&str; 5] = ["exercise_id", "date", "weight_kg", "reps", "sets"];

/// Write every ledger entry to `path` as CSV, replacing any existing file
///
/// The header line is always written, even for an empty ledger. Rows are
/// grouped by exercise id and keep each series' stored order.
/// Returns the number of rows written.
pub fn export_exercise_history<S: KvStore + ?Sized>(store: &S, path: &Path) -> Result<usize> {
    let histories = get_all_histories(store);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADERS)?;
    let mut count = 0;

    for (exercise_id, series) in &histories {
        for entry in series {
            writer.serialize(CsvRow {
                exercise_id,
                date: entry.date.format("%Y-%m-%d").to_string(),
                weight_kg: entry.weight,
                reps: entry.reps,
                sets: entry.sets,
            })?;
            count += 1;
        }
    }

    writer.flush()?;
    tracing::info!("Exported {} ledger entries to {:?}", count, path);
    Ok(count)
}
