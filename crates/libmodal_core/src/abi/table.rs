//! Published export table and signature diffing.

use super::signature::{AbiType, BoundaryFunction, CallingConvention, ExportedStatic};
use std::fmt::{Display, Formatter};

/// Current ABI version of the export table.
pub const ABI_VERSION: u32 = 1;

/// Every function exported by `libmodal_ffi`, in publication order.
pub static EXPORT_TABLE: &[BoundaryFunction] = &[
    BoundaryFunction {
        name: "add_two_numbers",
        params: &[AbiType::I32, AbiType::I32],
        ret: AbiType::Void,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_add_two_numbers_v1",
        params: &[AbiType::I32, AbiType::I32],
        ret: AbiType::I32,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_checked_add_v1",
        params: &[AbiType::I32, AbiType::I32, AbiType::I32OutPtr],
        ret: AbiType::I32,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_abi_version",
        params: &[],
        ret: AbiType::U32,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_max_message_size",
        params: &[],
        ret: AbiType::Usize,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_check_message_size_v1",
        params: &[AbiType::Usize],
        ret: AbiType::I32,
        convention: CallingConvention::C,
        since: 1,
    },
    BoundaryFunction {
        name: "libmodal_verify_server_limit_v1",
        params: &[AbiType::Usize],
        ret: AbiType::I32,
        convention: CallingConvention::C,
        since: 1,
    },
];

/// Every immutable data symbol exported by `libmodal_ffi`.
pub static EXPORTED_STATICS: &[ExportedStatic] = &[ExportedStatic {
    name: "LIBMODAL_MAX_MESSAGE_SIZE",
    ty: AbiType::Usize,
    since: 1,
}];

/// A published symbol of either kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportedSymbol {
    Function(&'static BoundaryFunction),
    Static(&'static ExportedStatic),
}

impl ExportedSymbol {
    /// Unmangled symbol name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Function(export) => export.name,
            Self::Static(export) => export.name,
        }
    }
}

impl Display for ExportedSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function(export) => write!(f, "{export}"),
            Self::Static(export) => write!(f, "{export}"),
        }
    }
}

/// Looks up a published function or data symbol by name.
pub fn find_export(name: &str) -> Option<ExportedSymbol> {
    EXPORT_TABLE
        .iter()
        .find(|export| export.name == name)
        .map(ExportedSymbol::Function)
        .or_else(|| {
            EXPORTED_STATICS
                .iter()
                .find(|export| export.name == name)
                .map(ExportedSymbol::Static)
        })
}

/// Renders the tables in the line format used by the committed golden file.
///
/// The first line carries `abi_version=<n>`, then one line per function and
/// one per data symbol, each in its `Display` form. Output ends with a newline.
pub fn render_export_table(
    version: u32,
    functions: &[BoundaryFunction],
    statics: &[ExportedStatic],
) -> String {
    let mut rendered = format!("abi_version={version}\n");
    for export in functions {
        rendered.push_str(&export.to_string());
        rendered.push('\n');
    }
    for export in statics {
        rendered.push_str(&export.to_string());
        rendered.push('\n');
    }
    rendered
}

/// One difference between two published function tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiChange {
    Added(&'static str),
    Removed(&'static str),
    SignatureChanged {
        name: &'static str,
        before: String,
        after: String,
    },
}

impl AbiChange {
    /// Returns `true` when existing caller binaries would break.
    pub fn is_breaking(&self) -> bool {
        !matches!(self, Self::Added(_))
    }
}

/// Computes the symbol-level differences from `before` to `after`.
pub fn diff_export_tables(
    before: &[BoundaryFunction],
    after: &[BoundaryFunction],
) -> Vec<AbiChange> {
    let mut changes = Vec::new();
    for old in before {
        match after.iter().find(|candidate| candidate.name == old.name) {
            None => changes.push(AbiChange::Removed(old.name)),
            Some(new) if !old.same_signature(new) => changes.push(AbiChange::SignatureChanged {
                name: old.name,
                before: old.to_string(),
                after: new.to_string(),
            }),
            Some(_) => {}
        }
    }
    for new in after {
        if !before.iter().any(|candidate| candidate.name == new.name) {
            changes.push(AbiChange::Added(new.name));
        }
    }
    changes
}

/// Returns `true` when `changes` demand a new `ABI_VERSION`.
pub fn requires_version_bump(changes: &[AbiChange]) -> bool {
    changes.iter().any(AbiChange::is_breaking)
}
