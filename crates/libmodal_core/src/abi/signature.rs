//! Signature descriptors for exported boundary functions.

use std::fmt::{Display, Formatter};

/// Calling convention an export is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallingConvention {
    /// Platform C convention (`extern "C"`), no name mangling.
    C,
}

impl CallingConvention {
    /// Stable string id used in rendered signatures.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
        }
    }
}

/// Primitive types permitted on the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// No value; only valid as a return type.
    Void,
    /// `int32_t`.
    I32,
    /// `uint32_t`.
    U32,
    /// `uintptr_t`, pointer-sized.
    Usize,
    /// Caller-owned `int32_t *` written on success only.
    I32OutPtr,
}

impl AbiType {
    /// Rust spelling used in rendered signatures.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::Usize => "usize",
            Self::I32OutPtr => "*mut i32",
        }
    }

    /// C spelling used by the header.
    pub fn c_name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::I32 => "int32_t",
            Self::U32 => "uint32_t",
            Self::Usize => "uintptr_t",
            Self::I32OutPtr => "int32_t *",
        }
    }

}

/// Descriptor for one exported symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryFunction {
    /// Unmangled symbol name.
    pub name: &'static str,
    /// Ordered parameter types.
    pub params: &'static [AbiType],
    /// Return type; `AbiType::Void` for none.
    pub ret: AbiType,
    /// Calling convention the symbol is compiled with.
    pub convention: CallingConvention,
    /// ABI version that first published this symbol.
    pub since: u32,
}

impl BoundaryFunction {
    /// Returns `true` when both descriptors agree on the byte-level contract.
    ///
    /// `since` is metadata and does not participate.
    pub fn same_signature(&self, other: &Self) -> bool {
        self.name == other.name
            && self.params == other.params
            && self.ret == other.ret
            && self.convention == other.convention
    }

    /// Renders the C prototype, e.g. `void add_two_numbers(int32_t, int32_t);`.
    pub fn c_prototype(&self) -> String {
        let params = if self.params.is_empty() {
            "void".to_string()
        } else {
            self.params
                .iter()
                .map(|ty| ty.c_name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("{} {}({params});", self.ret.c_name(), self.name)
    }
}

impl Display for BoundaryFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(|ty| ty.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "v{} extern \"{}\" {}({params}) -> {}",
            self.since,
            self.convention.as_str(),
            self.name,
            self.ret.as_str()
        )
    }
}

/// Descriptor for one exported immutable data symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportedStatic {
    /// Unmangled symbol name.
    pub name: &'static str,
    /// Value type; a plain integer, never `Void` or a pointer.
    pub ty: AbiType,
    /// ABI version that first published this symbol.
    pub since: u32,
}

impl ExportedStatic {
    /// Renders the C declaration, e.g. `extern const uintptr_t LIMIT;`.
    pub fn c_declaration(&self) -> String {
        format!("extern const {} {};", self.ty.c_name(), self.name)
    }
}

impl Display for ExportedStatic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} static {}: {}", self.since, self.name, self.ty.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{AbiType, BoundaryFunction, CallingConvention, ExportedStatic};

    const PAIR: BoundaryFunction = BoundaryFunction {
        name: "pair",
        params: &[AbiType::I32, AbiType::I32],
        ret: AbiType::Void,
        convention: CallingConvention::C,
        since: 1,
    };

    #[test]
    fn renders_rust_signature() {
        assert_eq!(PAIR.to_string(), "v1 extern \"C\" pair(i32, i32) -> void");
    }

    #[test]
    fn renders_c_prototype() {
        assert_eq!(PAIR.c_prototype(), "void pair(int32_t, int32_t);");
        let nullary = BoundaryFunction {
            name: "nullary",
            params: &[],
            ret: AbiType::U32,
            ..PAIR
        };
        assert_eq!(nullary.c_prototype(), "uint32_t nullary(void);");
    }

    #[test]
    fn same_signature_ignores_since_metadata() {
        let republished = BoundaryFunction { since: 7, ..PAIR };
        assert!(PAIR.same_signature(&republished));

        let reordered = BoundaryFunction {
            params: &[AbiType::I32, AbiType::U32],
            ..PAIR
        };
        assert!(!PAIR.same_signature(&reordered));
    }

    #[test]
    fn renders_exported_static() {
        let limit = ExportedStatic {
            name: "LIMIT",
            ty: AbiType::Usize,
            since: 1,
        };
        assert_eq!(limit.to_string(), "v1 static LIMIT: usize");
        assert_eq!(limit.c_declaration(), "extern const uintptr_t LIMIT;");
    }
}
