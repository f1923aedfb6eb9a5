//! Type representation.
//!
//! Types are split in two layers:
//! - [`TypeKind`]: the interned, unqualified shape addressed by a
//!   [`TypeId`]. Structurally identical shapes share one id per context.
//! - [`QualType`]: a `TypeId` plus a [`Qualifiers`] set. Qualifiers never
//!   take part in interning, so `const T` and `volatile T` share `T`.

mod builtin;
mod kind;

pub use builtin::BuiltinKind;
pub use kind::{
    ArrayShape, ArraySizeModifier, CallingConv, ExceptionSpec, FunctionExt, FunctionProto,
    TagKind, TypeClass, TypeFlags, TypeKind, VectorFlavor,
};

use bitflags::bitflags;

use crate::TypeId;

bitflags! {
    /// The const/volatile/restrict qualifier bits.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Cvr: u8 {
        const CONST = 1 << 0;
        const VOLATILE = 1 << 1;
        const RESTRICT = 1 << 2;
    }
}

/// Objective-C garbage-collection ownership qualifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjCGc {
    #[default]
    None,
    Weak,
    Strong,
}

/// Full qualifier set applied on top of an unqualified type node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Qualifiers {
    pub cvr: Cvr,
    /// Target address space; 0 is the generic space.
    pub address_space: u32,
    pub gc: ObjCGc,
}

impl Qualifiers {
    pub const NONE: Qualifiers = Qualifiers {
        cvr: Cvr::empty(),
        address_space: 0,
        gc: ObjCGc::None,
    };

    pub const fn from_cvr(cvr: Cvr) -> Self {
        Qualifiers {
            cvr,
            address_space: 0,
            gc: ObjCGc::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Union of two qualifier sets. The outer set wins on address space and
    /// GC ownership when both specify one.
    #[must_use]
    pub fn union(self, outer: Qualifiers) -> Qualifiers {
        Qualifiers {
            cvr: self.cvr | outer.cvr,
            address_space: if outer.address_space == 0 {
                self.address_space
            } else {
                outer.address_space
            },
            gc: if outer.gc == ObjCGc::None {
                self.gc
            } else {
                outer.gc
            },
        }
    }
}

impl Default for Qualifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A possibly-qualified reference to an interned type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualType {
    pub ty: TypeId,
    pub quals: Qualifiers,
}

impl QualType {
    /// The null type. Importing it yields it back unchanged.
    pub const NULL: QualType = QualType {
        ty: TypeId::NONE,
        quals: Qualifiers::NONE,
    };

    #[inline]
    pub const fn new(ty: TypeId, quals: Qualifiers) -> Self {
        QualType { ty, quals }
    }

    #[inline]
    pub const fn unqualified(ty: TypeId) -> Self {
        QualType {
            ty,
            quals: Qualifiers::NONE,
        }
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.ty.is_none()
    }

    pub fn is_const(self) -> bool {
        self.quals.cvr.contains(Cvr::CONST)
    }

    #[must_use]
    pub fn with_cvr(mut self, cvr: Cvr) -> Self {
        self.quals.cvr |= cvr;
        self
    }

    #[must_use]
    pub fn with_const(self) -> Self {
        self.with_cvr(Cvr::CONST)
    }

    #[must_use]
    pub fn with_volatile(self) -> Self {
        self.with_cvr(Cvr::VOLATILE)
    }

    /// Drop all qualifiers.
    #[must_use]
    pub const fn unqualify(self) -> Self {
        Self::unqualified(self.ty)
    }
}

impl From<TypeId> for QualType {
    fn from(ty: TypeId) -> Self {
        QualType::unqualified(ty)
    }
}
