//! Arena handles for context-owned nodes.
//!
//! Every node a [`Context`](crate::Context) owns is addressed by a 32-bit
//! index into one of its arenas. Handles are only meaningful inside the
//! context that produced them; crossing contexts always goes through an
//! importer's identity map.

use std::fmt;

use crate::BuiltinKind;

macro_rules! define_index {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw arena index.
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index into the owning arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_index!(
    /// Handle to a declaration in a context's declaration arena.
    DeclId,
    "Decl"
);

define_index!(
    /// Handle to an expression in a context's expression arena.
    ExprId,
    "Expr"
);

define_index!(
    /// Handle to an interned Objective-C selector.
    SelectorId,
    "Sel"
);

define_index!(
    /// Handle to an interned nested-name-specifier (`a::b::`).
    NestedNameId,
    "Nns"
);

impl DeclId {
    /// The translation unit is always the first declaration of a context.
    pub const TRANSLATION_UNIT: DeclId = DeclId(0);
}

/// Handle to an interned, unqualified type node.
///
/// Builtin types are pre-interned at fixed indices equal to their
/// [`BuiltinKind`] discriminant, so `TypeId::INT` is valid in every context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: Self = Self::builtin(BuiltinKind::Void);
    pub const BOOL: Self = Self::builtin(BuiltinKind::Bool);
    /// Plain `char`; its signedness belongs to the owning context.
    pub const CHAR: Self = Self::builtin(BuiltinKind::Char);
    pub const SCHAR: Self = Self::builtin(BuiltinKind::SChar);
    pub const UCHAR: Self = Self::builtin(BuiltinKind::UChar);
    pub const SHORT: Self = Self::builtin(BuiltinKind::Short);
    pub const INT: Self = Self::builtin(BuiltinKind::Int);
    pub const UINT: Self = Self::builtin(BuiltinKind::UInt);
    pub const LONG: Self = Self::builtin(BuiltinKind::Long);
    pub const FLOAT: Self = Self::builtin(BuiltinKind::Float);
    pub const DOUBLE: Self = Self::builtin(BuiltinKind::Double);

    /// Number of pre-interned builtin types.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "builtin kind count is fixed and small"
    )]
    pub const BUILTIN_COUNT: u32 = BuiltinKind::ALL.len() as u32;

    /// Sentinel for "no type". Only ever appears inside [`QualType::NULL`].
    ///
    /// [`QualType::NULL`]: crate::QualType::NULL
    pub const NONE: Self = Self(u32::MAX);

    /// The pre-interned handle for a builtin kind.
    #[inline]
    pub const fn builtin(kind: BuiltinKind) -> Self {
        Self(kind as u32)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this handle points into the pre-interned builtin range.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "TypeId::NONE");
        }
        match BuiltinKind::from_index(self.0) {
            Some(kind) => write!(f, "TypeId({})", kind.spelling()),
            None => write!(f, "TypeId#{}", self.0),
        }
    }
}

/// A byte offset into the source buffer of one context.
///
/// Offset 0 is reserved as the invalid location, matching the convention
/// that compiler-synthesized nodes carry no position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SourceLocation(u32);

impl SourceLocation {
    pub const INVALID: SourceLocation = SourceLocation(0);

    #[inline]
    pub const fn new(offset: u32) -> Self {
        SourceLocation(offset)
    }

    #[inline]
    pub const fn offset(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "@{}", self.0)
        } else {
            write!(f, "@<invalid>")
        }
    }
}

/// A half-open pair of locations, e.g. the brackets of an array declarator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub begin: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    #[inline]
    pub const fn new(begin: SourceLocation, end: SourceLocation) -> Self {
        SourceRange { begin, end }
    }
}

#[cfg(test)]
mod tests;
