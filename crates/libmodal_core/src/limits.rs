//! Message-size ceiling shared with the API server.
//!
//! # Responsibility
//! - Own the single in-process definition of the gRPC message-size limit.
//! - Validate payload sizes and the server-advertised limit against it.
//!
//! # Invariants
//! - `MAX_MESSAGE_SIZE` must equal the limit configured on the API server.
//! - Nothing in this module mutates the limit at runtime.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// 100 MiB limit on gRPC messages, set to be the same as the API server.
pub const MAX_MESSAGE_SIZE: usize = 100 * 1024 * 1024;

const _: () = assert!(MAX_MESSAGE_SIZE > 0);
const _: () = assert!(MAX_MESSAGE_SIZE == 104_857_600);

/// Result alias for size and parity checks.
pub type LimitResult<T> = Result<T, LimitError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitError {
    /// Payload exceeds the shared ceiling.
    MessageTooLarge { len: usize, max: usize },
    /// Server-side limit differs from the compiled-in ceiling.
    Mismatch { server_limit: usize, local_limit: usize },
}

impl Display for LimitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MessageTooLarge { len, max } => {
                write!(f, "message of {len} bytes exceeds limit of {max} bytes")
            }
            Self::Mismatch {
                server_limit,
                local_limit,
            } => write!(
                f,
                "server message limit {server_limit} does not match local limit {local_limit}"
            ),
        }
    }
}

impl Error for LimitError {}

/// Checks that a payload of `len` bytes fits under `MAX_MESSAGE_SIZE`.
///
/// A payload of exactly `MAX_MESSAGE_SIZE` bytes is accepted.
pub fn check_message_size(len: usize) -> LimitResult<()> {
    if len > MAX_MESSAGE_SIZE {
        return Err(LimitError::MessageTooLarge {
            len,
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(())
}

/// Compares the API server's configured limit with the compiled-in ceiling.
///
/// Intended for startup and integration checks: any difference fails fast
/// instead of surfacing later as truncated or rejected messages.
///
/// # Side effects
/// - Emits a `limit_parity` logging event with the outcome.
pub fn verify_server_limit(server_limit: usize) -> LimitResult<()> {
    if server_limit != MAX_MESSAGE_SIZE {
        error!(
            "event=limit_parity module=limits status=error server_limit={} local_limit={}",
            server_limit, MAX_MESSAGE_SIZE
        );
        return Err(LimitError::Mismatch {
            server_limit,
            local_limit: MAX_MESSAGE_SIZE,
        });
    }
    info!(
        "event=limit_parity module=limits status=ok limit={}",
        MAX_MESSAGE_SIZE
    );
    Ok(())
}
