//! Mass unit conversion.
//!
//! Uses the fixed factor 1 kg = 2.205 lbs and rounds every result to one
//! decimal place, halves rounding up. Conversions are therefore not exact
//! inverses of each other.

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.205;

/// Round to one decimal place, halves toward positive infinity
fn round_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    round_tenth(kg * LBS_PER_KG)
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    round_tenth(lbs / LBS_PER_KG)
}
