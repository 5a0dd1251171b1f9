//! C ABI export table.
//!
//! # Responsibility
//! - Expose the unmangled `extern "C"` symbols described by
//!   `libmodal_core::EXPORT_TABLE`.
//! - Convert every failure into a sentinel or status code before returning.
//!
//! # Invariants
//! - Every body runs inside `catch_boundary`; no panic crosses into the caller.
//! - Parameters and returns are fixed-width primitives. The only pointer is a
//!   caller-owned out-parameter, written on success only.
//! - Published signatures never change; new behavior gets a new `_vN` symbol.
//! - `include/libmodal.h` and `abi/exports.txt` mirror this file.

use libmodal_core::{
    add_two_numbers as wrapping_add, catch_boundary, catch_status, check_message_size,
    checked_add, verify_server_limit, BoundaryStatus, ABI_VERSION, MAX_MESSAGE_SIZE,
};
use log::trace;

/// Message-size ceiling, readable as data by C callers.
#[no_mangle]
pub static LIBMODAL_MAX_MESSAGE_SIZE: usize = MAX_MESSAGE_SIZE;

/// Add two numbers.
///
/// Link/interop smoke test: the sum is computed with wrapping semantics and
/// discarded. Never fails.
#[no_mangle]
pub extern "C" fn add_two_numbers(x: i32, y: i32) {
    catch_boundary("add_two_numbers", (), || {
        let sum = wrapping_add(x, y);
        trace!("event=ffi_call module=c_abi op=add_two_numbers status=ok sum={sum}");
    });
}

/// Adds two numbers and returns the sum, wrapping on overflow.
///
/// `(INT32_MAX, 1)` returns `INT32_MIN`.
#[no_mangle]
pub extern "C" fn libmodal_add_two_numbers_v1(x: i32, y: i32) -> i32 {
    catch_boundary("libmodal_add_two_numbers_v1", 0, || wrapping_add(x, y))
}

/// Adds two numbers, writing the sum to `out` when it fits in `int32_t`.
///
/// Returns `Ok`, `Overflow` (out untouched) or `NullPointer`.
///
/// # Safety
/// `out` must be null or valid for an aligned `int32_t` write.
#[no_mangle]
pub unsafe extern "C" fn libmodal_checked_add_v1(x: i32, y: i32, out: *mut i32) -> i32 {
    catch_status("libmodal_checked_add_v1", || {
        if out.is_null() {
            return BoundaryStatus::NullPointer;
        }
        match checked_add(x, y) {
            Ok(sum) => {
                // SAFETY: non-null checked above; validity is the caller's contract.
                unsafe { out.write(sum) };
                BoundaryStatus::Ok
            }
            Err(err) => err.into(),
        }
    })
}

/// ABI version to coordinate with foreign callers.
#[no_mangle]
pub extern "C" fn libmodal_abi_version() -> u32 {
    ABI_VERSION
}

/// Returns `MAX_MESSAGE_SIZE` (100 MiB).
#[no_mangle]
pub extern "C" fn libmodal_max_message_size() -> usize {
    MAX_MESSAGE_SIZE
}

/// Checks whether a `len`-byte payload fits the shared ceiling.
///
/// Returns `Ok` or `MessageTooLarge`.
#[no_mangle]
pub extern "C" fn libmodal_check_message_size_v1(len: usize) -> i32 {
    catch_status("libmodal_check_message_size_v1", || {
        BoundaryStatus::from_limit_result(check_message_size(len))
    })
}

/// Compares the API server's configured limit with the compiled-in one.
///
/// Returns `Ok` or `LimitMismatch`. Callers should run this at startup.
#[no_mangle]
pub extern "C" fn libmodal_verify_server_limit_v1(server_limit: usize) -> i32 {
    catch_status("libmodal_verify_server_limit_v1", || {
        BoundaryStatus::from_limit_result(verify_server_limit(server_limit))
    })
}
