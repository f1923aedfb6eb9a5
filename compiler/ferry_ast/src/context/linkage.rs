//! Linkage computation and type compatibility.

use super::Context;
use crate::{DeclId, DeclKind, Linkage, QualType, StorageClass, TypeKind};

impl Context {
    /// Compute the linkage of a declaration from its scope, storage class
    /// and earlier declarations of the same name.
    pub fn linkage(&self, id: DeclId) -> Linkage {
        let decl = self.decl(id);
        match &decl.kind {
            DeclKind::Var(var) => {
                if var.is_param {
                    return Linkage::None;
                }
                if !self.is_file_context(decl.context) {
                    // Block-scope `extern` refers to the file-scope entity.
                    return if var.storage == StorageClass::Extern {
                        Linkage::External
                    } else {
                        Linkage::None
                    };
                }
                if var.storage == StorageClass::Static {
                    return Linkage::Internal;
                }
                if self.lang.cplusplus && var.ty.is_const() && var.storage != StorageClass::Extern {
                    return Linkage::Internal;
                }
                if self.has_prior_static(id) {
                    return Linkage::Internal;
                }
                self.scope_linkage(decl.context)
            }
            DeclKind::Function { storage, .. } => {
                if *storage == StorageClass::Static || self.has_prior_static(id) {
                    Linkage::Internal
                } else {
                    self.scope_linkage(decl.context)
                }
            }
            DeclKind::Typedef { .. } | DeclKind::TranslationUnit => Linkage::None,
            DeclKind::Namespace
            | DeclKind::Record { .. }
            | DeclKind::Enum
            | DeclKind::ObjCInterface
            | DeclKind::ObjCProtocol
            | DeclKind::ClassTemplate { .. } => {
                if decl.name.is_empty() {
                    Linkage::None
                } else {
                    self.scope_linkage(decl.context)
                }
            }
        }
    }

    /// Linkage granted by the enclosing scope to an otherwise external name.
    fn scope_linkage(&self, dc: DeclId) -> Linkage {
        if self.is_in_anonymous_namespace(dc) {
            Linkage::UniqueExternal
        } else {
            Linkage::External
        }
    }

    /// Whether an earlier declaration of the same name in the same scope was
    /// declared `static`. A later redeclaration inherits internal linkage.
    fn has_prior_static(&self, id: DeclId) -> bool {
        let decl = self.decl(id);
        self.lookup(decl.context, decl.name)
            .iter()
            .take_while(|&&prior| prior != id)
            .any(|&prior| match &self.decl(prior).kind {
                DeclKind::Var(var) => var.storage == StorageClass::Static,
                DeclKind::Function { storage, .. } => *storage == StorageClass::Static,
                _ => false,
            })
    }

    /// Whether two types of this context may denote the same entity.
    ///
    /// Identical canonical types are always compatible. C additionally
    /// treats an incomplete array as compatible with any array of a
    /// compatible element type, and an unprototyped function as compatible
    /// with any non-variadic prototype returning a compatible type.
    pub fn types_are_compatible(&self, lhs: QualType, rhs: QualType) -> bool {
        let lhs = self.canonical_type(lhs);
        let rhs = self.canonical_type(rhs);
        if lhs == rhs {
            return true;
        }
        if self.lang.cplusplus || lhs.is_null() || rhs.is_null() || lhs.quals != rhs.quals {
            return false;
        }

        match (self.type_kind(lhs.ty), self.type_kind(rhs.ty)) {
            (TypeKind::Pointer(a), TypeKind::Pointer(b)) => self.types_are_compatible(*a, *b),
            (
                TypeKind::IncompleteArray(a),
                TypeKind::IncompleteArray(b) | TypeKind::ConstantArray { shape: b, .. },
            )
            | (TypeKind::ConstantArray { shape: a, .. }, TypeKind::IncompleteArray(b)) => {
                self.types_are_compatible(a.element, b.element)
            }
            (TypeKind::FunctionNoProto { result: a, .. }, TypeKind::FunctionNoProto { result: b, .. }) => {
                self.types_are_compatible(*a, *b)
            }
            (TypeKind::FunctionNoProto { result, .. }, TypeKind::FunctionProto(proto))
            | (TypeKind::FunctionProto(proto), TypeKind::FunctionNoProto { result, .. }) => {
                !proto.variadic && self.types_are_compatible(*result, proto.result)
            }
            (TypeKind::FunctionProto(a), TypeKind::FunctionProto(b)) => {
                a.variadic == b.variadic
                    && a.params.len() == b.params.len()
                    && self.types_are_compatible(a.result, b.result)
                    && a
                        .params
                        .iter()
                        .zip(b.params.iter())
                        .all(|(x, y)| self.types_are_compatible(*x, *y))
            }
            _ => false,
        }
    }
}
