//! Serialization of physical measures (`gsd_m`, `revisit_days`, `swath_km`).
//!
//! Whole numbers are written as JSON integers, so `"gsd_m": 10` in a model
//! reply comes back out as `10` rather than `10.0`.

use serde::Serializer;

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

pub(crate) fn serialize<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match *value {
        Some(number) if number.fract() == 0.0 && number.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_some(&(number as i64))
        }
        Some(number) => serializer.serialize_some(&number),
        None => serializer.serialize_none(),
    }
}
