//! Integer addition behind the boundary smoke-test exports.
//!
//! # Invariants
//! - Accepts the full `i32` range without pre-validation.
//! - Never panics, in debug or release builds.
//! - Overflow policy: `add_two_numbers` wraps (two's complement);
//!   `checked_add` reports `ArithError::Overflow` instead of a value.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithError {
    /// `x + y` does not fit in `i32`; carries both operands.
    Overflow { x: i32, y: i32 },
}

impl Display for ArithError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overflow { x, y } => write!(f, "{x} + {y} overflows i32"),
        }
    }
}

impl Error for ArithError {}

/// Adds two numbers, wrapping on overflow.
pub fn add_two_numbers(x: i32, y: i32) -> i32 {
    x.wrapping_add(y)
}

/// Adds two numbers, rejecting results outside the `i32` range.
pub fn checked_add(x: i32, y: i32) -> Result<i32, ArithError> {
    x.checked_add(y).ok_or(ArithError::Overflow { x, y })
}

#[cfg(test)]
mod tests {
    use super::{add_two_numbers, checked_add, ArithError};

    #[test]
    fn adds_small_numbers() {
        assert_eq!(add_two_numbers(2, 3), 5);
        assert_eq!(checked_add(2, 3), Ok(5));
    }

    #[test]
    fn wraps_at_upper_bound() {
        assert_eq!(add_two_numbers(i32::MAX, 1), i32::MIN);
    }

    #[test]
    fn wraps_at_lower_bound() {
        assert_eq!(add_two_numbers(i32::MIN, -1), i32::MAX);
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(
            checked_add(i32::MAX, 1),
            Err(ArithError::Overflow { x: i32::MAX, y: 1 })
        );
        assert!(checked_add(i32::MIN, -1).is_err());
        assert_eq!(checked_add(i32::MAX, i32::MIN), Ok(-1));
    }

    #[test]
    fn edge_grid_never_panics_and_agrees_when_in_range() {
        let edges = [i32::MIN, i32::MIN + 1, -1, 0, 1, i32::MAX - 1, i32::MAX];
        for x in edges {
            for y in edges {
                let wrapped = add_two_numbers(x, y);
                match checked_add(x, y) {
                    Ok(sum) => assert_eq!(sum, wrapped),
                    Err(err) => assert!(err.to_string().contains("overflows")),
                }
            }
        }
    }
}
