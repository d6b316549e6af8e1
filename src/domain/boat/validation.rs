use once_cell::sync::Lazy;
use regex::Regex;

use super::relations::Seat;

// ============================================================================
// Seat Phone Number Validation
// ============================================================================

/// Accepted seat phone number: 8 to 11 ASCII digits, nothing else.
pub const PHONE_NUMBER_PATTERN: &str = r"^[0-9]{8,11}$";

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_NUMBER_PATTERN).expect("valid regex"));

/// A missing number is valid; a present one must match [`PHONE_NUMBER_PATTERN`].
pub fn is_valid_phone_number(phone: Option<&str>) -> bool {
    match phone {
        None => true,
        Some(number) => PHONE_NUMBER_RE.is_match(number),
    }
}

/// True iff every seat carries a valid (or no) phone number.
///
/// Stops at the first offending seat.
pub fn validate_all<'a, I>(seats: I) -> bool
where
    I: IntoIterator<Item = &'a Seat>,
{
    seats.into_iter().all(|seat| {
        let valid = is_valid_phone_number(seat.number().map(|n| n.as_str()));
        if !valid {
            tracing::debug!(seat = %seat.key(), "Seat phone number rejected");
        }
        valid
    })
}

// ============================================================================
// Unit Tests
// ============================================================================
