//! Display unit preference.
//!
//! Weights are always stored in kilograms; the preference only controls how
//! they are shown and how user input is interpreted.

use crate::store::{keys, load_document, save_document, KvStore};
use crate::units::{kg_to_lbs, lbs_to_kg};
use crate::{Preferences, Result, Unit};

impl Preferences {
    /// Load preferences, defaulting to kilograms
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        load_document(store, keys::PREFERENCES)
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        save_document(store, keys::PREFERENCES, self)
    }

    /// Weight in the preferred unit
    pub fn display_weight(&self, weight_kg: f64) -> f64 {
        match self.unit {
            Unit::Kg => weight_kg,
            Unit::Lbs => kg_to_lbs(weight_kg),
        }
    }

    /// Weight followed by the unit, e.g. `"22.1 lbs"`
    pub fn format_weight(&self, weight_kg: f64) -> String {
        format!("{} {}", self.display_weight(weight_kg), self.unit)
    }
}

pub fn get_unit<S: KvStore + ?Sized>(store: &S) -> Unit {
    Preferences::load(store).unit
}

pub fn set_unit<S: KvStore + ?Sized>(store: &mut S, unit: Unit) -> Result<()> {
    let mut prefs = Preferences::load(store);
    prefs.unit = unit;
    prefs.save(store)?;
    tracing::info!("Display unit set to {}", unit);
    Ok(())
}

/// Switch between kg and lbs, returning the new unit
pub fn toggle_unit<S: KvStore + ?Sized>(store: &mut S) -> Result<Unit> {
    let unit = get_unit(store).toggled();
    set_unit(store, unit)?;
    Ok(unit)
}

pub fn display_weight<S: KvStore + ?Sized>(store: &S, weight_kg: f64) -> f64 {
    Preferences::load(store).display_weight(weight_kg)
}

pub fn format_weight<S: KvStore + ?Sized>(store: &S, weight_kg: f64) -> String {
    Preferences::load(store).format_weight(weight_kg)
}

/// Convert a value entered in `from_unit` to kilograms
pub fn to_kg(value: f64, from_unit: Unit) -> f64 {
    match from_unit {
        Unit::Kg => value,
        Unit::Lbs => lbs_to_kg(value),
    }
}
