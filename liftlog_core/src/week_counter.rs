//! Weekly A/B alternation.
//!
//! The counter flips its parity the first time it is consulted in a new ISO
//! week and stays put for the rest of that week. A gap of several weeks still
//! flips it only once.

use crate::store::{keys, load_document, save_document, KvStore};
use crate::{EngineContext, Result, WeekCounter};
use chrono::{Datelike, Duration, NaiveDate};

/// ISO-8601 (year, week) of a date
///
/// Shifts to the Thursday of the date's Monday-based week; that Thursday's
/// year is the ISO year and its ordinal day gives the week number.
pub fn iso_week(date: NaiveDate) -> (i32, u32) {
    let weekday = i64::from(date.weekday().number_from_monday());
    let thursday = date + Duration::days(4 - weekday);
    let week = (thursday.ordinal() + 6) / 7;
    (thursday.year(), week)
}

/// Key identifying the ISO week of a date, e.g. `"2024-W01"`
pub fn week_key(date: NaiveDate) -> String {
    let (year, week) = iso_week(date);
    format!("{}-W{:02}", year, week)
}

impl WeekCounter {
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let mut counter: WeekCounter = load_document(store, keys::WEEK_COUNTER);
        if counter.parity > 1 {
            tracing::warn!("Week counter parity {} out of range, reducing", counter.parity);
            counter.parity %= 2;
        }
        counter
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_document(store, keys::WEEK_COUNTER, self)
    }
}

/// Parity (0 or 1) for the current ISO week, flipping it on the first call
/// of a new week
pub fn current_parity<S: KvStore + ?Sized>(store: &mut S, ctx: &EngineContext) -> Result<u8> {
    let mut counter = WeekCounter::load(store);
    let key = week_key(ctx.today);

    if counter.last_week_key.as_deref() != Some(key.as_str()) {
        counter.parity = (counter.parity + 1) % 2;
        counter.last_week_key = Some(key);
        counter.save(store)?;
        tracing::info!(
            "New week {:?}, alternation parity now {}",
            counter.last_week_key,
            counter.parity
        );
    }

    Ok(counter.parity)
}

/// Pick `primary` on parity 0 and `alternate` on parity 1
pub fn select_variant<'a, S: KvStore + ?Sized>(
    store: &mut S,
    ctx: &EngineContext,
    primary: &'a str,
    alternate: &'a str,
) -> Result<&'a str> {
    Ok(match current_parity(store, ctx)? {
        0 => primary,
        _ => alternate,
    })
}
