//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the boundary contract to Dart via FRB alongside the C table.
//! - Keep error semantics simple: empty string on success, message on failure.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Values mirror the C exports in `c_abi` exactly.

use libmodal_core::{
    add_two_numbers as wrapping_add, catch_boundary, core_version as core_version_inner,
    init_logging as init_logging_inner, ping as ping_inner, verify_server_limit, BoundaryStatus,
    ABI_VERSION, MAX_MESSAGE_SIZE,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// ABI version of the C export table.
#[flutter_rust_bridge::frb(sync)]
pub fn abi_version() -> u32 {
    ABI_VERSION
}

/// Shared message-size ceiling in bytes.
///
/// Dart integers are 64-bit, so the value is widened to `u64`.
#[flutter_rust_bridge::frb(sync)]
pub fn max_message_size() -> u64 {
    MAX_MESSAGE_SIZE as u64
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    catch_boundary(
        "init_logging",
        "init_logging panicked".to_string(),
        || match init_logging_inner(level.as_str(), log_dir.as_str()) {
            Ok(()) => String::new(),
            Err(err) => err,
        },
    )
}

/// Adds two numbers with the wrapping overflow policy.
///
/// # FFI contract
/// - Sync call, pure.
/// - Same result as `libmodal_add_two_numbers_v1`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_numbers(x: i32, y: i32) -> i32 {
    catch_boundary("add_numbers", 0, || wrapping_add(x, y))
}

/// Compares the API server's configured message limit with the local one.
///
/// # FFI contract
/// - Sync call, pure apart from one log event.
/// - Values above the native word size are reported as a mismatch.
/// - Never panics; returns empty string on match and error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn check_server_limit(server_limit: u64) -> String {
    catch_boundary(
        "check_server_limit",
        "check_server_limit panicked".to_string(),
        || {
            let Ok(server_limit) = usize::try_from(server_limit) else {
                return format!(
                    "server message limit {server_limit} does not match local limit {MAX_MESSAGE_SIZE}"
                );
            };
            match verify_server_limit(server_limit) {
                Ok(()) => String::new(),
                Err(err) => err.to_string(),
            }
        },
    )
}

/// Stable label for a status code returned by a C export.
///
/// # FFI contract
/// - Sync call, pure.
/// - Codes this build does not know map to `unknown`.
#[flutter_rust_bridge::frb(sync)]
pub fn status_label(code: i32) -> String {
    BoundaryStatus::from_code(code)
        .map_or("unknown", BoundaryStatus::as_str)
        .to_string()
}
