//! Sentinel status codes returned by status-returning exports.

use crate::arith::ArithError;
use crate::limits::LimitError;
use std::fmt::{Display, Formatter};

/// Stable status codes that cross the FFI boundary.
///
/// Codes are append-only: existing discriminants never change meaning.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundaryStatus {
    Ok = 0,
    /// Arithmetic result does not fit in the return type.
    Overflow = 1,
    /// Payload exceeds `MAX_MESSAGE_SIZE`.
    MessageTooLarge = 2,
    /// Server limit and compiled-in limit diverge.
    LimitMismatch = 3,
    /// Required out-parameter was null.
    NullPointer = 4,
    /// A panic was caught before reaching the caller.
    Panicked = -1,
}

impl BoundaryStatus {
    /// Raw code handed to the foreign caller.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a raw code back to a status, if known.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::Overflow),
            2 => Some(Self::MessageTooLarge),
            3 => Some(Self::LimitMismatch),
            4 => Some(Self::NullPointer),
            -1 => Some(Self::Panicked),
            _ => None,
        }
    }

    /// Stable label used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Overflow => "overflow",
            Self::MessageTooLarge => "message_too_large",
            Self::LimitMismatch => "limit_mismatch",
            Self::NullPointer => "null_pointer",
            Self::Panicked => "panicked",
        }
    }

    /// Collapses a limit check into its status code.
    pub fn from_limit_result(result: Result<(), LimitError>) -> Self {
        match result {
            Ok(()) => Self::Ok,
            Err(err) => err.into(),
        }
    }
}

impl Display for BoundaryStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<LimitError> for BoundaryStatus {
    fn from(value: LimitError) -> Self {
        match value {
            LimitError::MessageTooLarge { .. } => Self::MessageTooLarge,
            LimitError::Mismatch { .. } => Self::LimitMismatch,
        }
    }
}

impl From<ArithError> for BoundaryStatus {
    fn from(value: ArithError) -> Self {
        match value {
            ArithError::Overflow { .. } => Self::Overflow,
        }
    }
}
