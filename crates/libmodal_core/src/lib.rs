//! Core boundary logic for libmodal.
//! This crate is the single source of truth for the FFI contract and the
//! message-size ceiling shared with the API server.

pub mod abi;
pub mod arith;
pub mod config;
pub mod guard;
pub mod limits;
pub mod logging;

pub use abi::{
    diff_export_tables, find_export, render_export_table, requires_version_bump, AbiChange,
    AbiType, BoundaryFunction, BoundaryStatus, CallingConvention, ExportedStatic, ExportedSymbol,
    ABI_VERSION, EXPORTED_STATICS, EXPORT_TABLE,
};
pub use arith::{add_two_numbers, checked_add, ArithError};
pub use config::{ConfigError, ConfigResult, Profile};
pub use guard::{catch_boundary, catch_status};
pub use limits::{
    check_message_size, verify_server_limit, LimitError, LimitResult, MAX_MESSAGE_SIZE,
};
pub use logging::{default_log_level, init_logging};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
