//! ABI contract for the exported C surface.
//!
//! # Responsibility
//! - Describe every exported function and data symbol as data so signatures can be rendered,
//!   diffed and checked against a committed golden copy.
//! - Define the sentinel status codes returned across the boundary.
//!
//! # Invariants
//! - A published `BoundaryFunction` is never edited in place; changed behavior
//!   ships under a new, version-suffixed symbol.
//! - Only fixed-width primitive types (and caller-owned out-parameters) appear
//!   in signatures.
//! - `ABI_VERSION` is bumped whenever a published signature changes or is removed.

pub mod signature;
pub mod status;
pub mod table;

pub use signature::{AbiType, BoundaryFunction, CallingConvention, ExportedStatic};
pub use status::BoundaryStatus;
pub use table::{
    diff_export_tables, find_export, render_export_table, requires_version_bump, AbiChange,
    ExportedSymbol, ABI_VERSION, EXPORTED_STATICS, EXPORT_TABLE,
};
