//! License plate formatting
//!
//! Plates are compared in their formatted form: alphanumeric characters only,
//! upper-cased.

use super::error::{ParkingError, ParkingResult};
use super::types::{PLATE_MAX_LEN, PLATE_MIN_LEN};

/// Strips every non-alphanumeric character and upper-cases the rest
pub fn format_plate(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Formats `raw` and checks the length of the result
pub fn validate_plate(raw: &str) -> ParkingResult<String> {
    let formatted = format_plate(raw);
    if (PLATE_MIN_LEN..=PLATE_MAX_LEN).contains(&formatted.len()) {
        Ok(formatted)
    } else {
        Err(ParkingError::InvalidPlate {
            raw: raw.to_string(),
            formatted,
        })
    }
}
