//! Foreign-callable surface of libmodal.
//!
//! - `c_abi`: unmangled `extern "C"` export table for C-compatible callers.
//! - `api`: sync use-case functions exposed to Dart through FRB.
//!
//! Both layers delegate to `libmodal_core` and absorb every failure before
//! returning to the foreign runtime.

#![deny(unsafe_op_in_unsafe_fn)]

pub mod api;
pub mod c_abi;
