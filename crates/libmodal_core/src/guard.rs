//! Unwind barrier for exported functions.
//!
//! # Responsibility
//! - Run export bodies so that no panic reaches the foreign caller.
//! - Convert caught panics into the export's sentinel value.
//!
//! # Invariants
//! - `catch_boundary` never unwinds, whatever the closure does.
//! - The fallback is returned unchanged when the closure panics.

use crate::abi::BoundaryStatus;
use crate::logging::log_boundary_panic;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs `f`, returning `fallback` if it panics.
///
/// `op` names the export in the `ffi_panic` log event.
///
/// Closures must not leave shared state half-updated on panic.
pub fn catch_boundary<T>(op: &'static str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(payload) => {
            log_boundary_panic(op, payload.as_ref());
            fallback
        }
    }
}

/// Runs a status-returning body, mapping panics to `BoundaryStatus::Panicked`.
pub fn catch_status(op: &'static str, f: impl FnOnce() -> BoundaryStatus) -> i32 {
    catch_boundary(op, BoundaryStatus::Panicked, f).code()
}
