//! Type interning, canonicalization and the per-kind constructors.

use rustc_hash::FxHashMap;

use super::Context;
use crate::{
    ArrayShape, BuiltinKind, DeclId, DeclKind, ExprId, FunctionExt, FunctionProto, Name,
    NestedNameId, QualType, SourceRange, TagKind, TypeFlags, TypeId, TypeKind, VectorFlavor,
};

/// An interned type node with its pre-computed canonical form.
#[derive(Clone, Debug)]
pub struct TypeNode {
    pub kind: TypeKind,
    /// Sugar-free representative. Equal to the node itself when the node is
    /// already canonical.
    pub canonical: QualType,
    pub flags: TypeFlags,
}

pub(super) struct TypePool {
    nodes: Vec<TypeNode>,
    map: FxHashMap<TypeKind, TypeId>,
}

impl TypePool {
    /// Pool with every builtin pre-interned at its discriminant index.
    pub(super) fn with_builtins() -> Self {
        let mut pool = TypePool {
            nodes: Vec::with_capacity(256),
            map: FxHashMap::default(),
        };
        for kind in BuiltinKind::ALL {
            let id = TypeId::builtin(kind);
            let kind = TypeKind::Builtin(kind);
            pool.map.insert(kind.clone(), id);
            pool.nodes.push(TypeNode {
                flags: kind.own_flags(),
                kind,
                canonical: QualType::unqualified(id),
            });
        }
        pool
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "type count bounded well below u32::MAX"
    )]
    fn push(&mut self, node: TypeNode, canonical: Option<QualType>) -> TypeId {
        let id = TypeId::from_raw(self.nodes.len() as u32);
        self.map.insert(node.kind.clone(), id);
        self.nodes.push(TypeNode {
            canonical: canonical.unwrap_or(QualType::unqualified(id)),
            ..node
        });
        id
    }
}

impl Context {
    /// Get an interned type node.
    ///
    /// # Panics
    /// Panics on [`TypeId::NONE`] or on an id from another context.
    #[inline]
    pub fn type_node(&self, id: TypeId) -> &TypeNode {
        &self.types.nodes[id.index()]
    }

    #[inline]
    pub fn type_kind(&self, id: TypeId) -> &TypeKind {
        &self.type_node(id).kind
    }

    /// Number of interned type nodes, builtins included.
    pub fn type_count(&self) -> usize {
        self.types.nodes.len()
    }

    /// Look up a shape without interning it.
    pub fn find_type(&self, kind: &TypeKind) -> Option<TypeId> {
        self.types.map.get(kind).copied()
    }

    /// The canonical form of `ty`: sugar removed, qualifiers merged.
    pub fn canonical_type(&self, ty: QualType) -> QualType {
        if ty.is_null() {
            return ty;
        }
        let canonical = self.type_node(ty.ty).canonical;
        QualType::new(canonical.ty, canonical.quals.union(ty.quals))
    }

    pub fn is_dependent_type(&self, ty: QualType) -> bool {
        !ty.is_null() && self.type_node(ty.ty).flags.contains(TypeFlags::IS_DEPENDENT)
    }

    /// Intern a type shape.
    ///
    /// Structurally identical shapes return the same id. The canonical form
    /// and flags are computed once, here.
    pub fn intern_type(&mut self, kind: TypeKind) -> TypeId {
        if let Some(id) = self.find_type(&kind) {
            return id;
        }

        let mut flags = kind.own_flags();
        kind.for_each_child(|child| {
            if !child.is_none() {
                flags |= self.type_node(child).flags.inherited();
            }
        });

        let canonical = self.canonical_of(&kind);
        self.types.push(
            TypeNode {
                kind,
                canonical: QualType::NULL,
                flags,
            },
            canonical,
        )
    }

    /// Canonical form of a shape about to be interned, or `None` when the
    /// shape is its own canonical form.
    fn canonical_of(&mut self, kind: &TypeKind) -> Option<QualType> {
        let sugar_target = match kind {
            TypeKind::Typedef(decl) => match &self.decl(*decl).kind {
                DeclKind::Typedef { underlying } => Some(*underlying),
                _ => None,
            },
            TypeKind::TypeOfExpr(expr) | TypeKind::Decltype(expr) => Some(self.expr(*expr).ty),
            TypeKind::TypeOf(inner)
            | TypeKind::Elaborated {
                underlying: inner, ..
            }
            | TypeKind::QualifiedName { named: inner, .. }
            | TypeKind::SubstTemplateTypeParm {
                replacement: inner, ..
            } => Some(*inner),
            _ => None,
        };
        if let Some(target) = sugar_target {
            return Some(self.canonical_type(target));
        }

        let canonical_kind = self.canonicalize_children(kind)?;
        Some(QualType::unqualified(self.intern_type(canonical_kind)))
    }

    /// Rebuild a composite shape over canonical children, or `None` when
    /// every child is already canonical.
    fn canonicalize_children(&self, kind: &TypeKind) -> Option<TypeKind> {
        let canon = |ty: QualType| self.canonical_type(ty);
        let rebuilt = match kind {
            TypeKind::Complex(inner) => TypeKind::Complex(canon(*inner)),
            TypeKind::Pointer(inner) => TypeKind::Pointer(canon(*inner)),
            TypeKind::BlockPointer(inner) => TypeKind::BlockPointer(canon(*inner)),
            TypeKind::LValueReference(inner) => TypeKind::LValueReference(canon(*inner)),
            TypeKind::RValueReference(inner) => TypeKind::RValueReference(canon(*inner)),
            TypeKind::MemberPointer { pointee, class } => TypeKind::MemberPointer {
                pointee: canon(*pointee),
                class: canon(QualType::unqualified(*class)).ty,
            },
            TypeKind::ConstantArray { shape, size } => TypeKind::ConstantArray {
                shape: shape.with_element(canon(shape.element)),
                size: *size,
            },
            TypeKind::IncompleteArray(shape) => {
                TypeKind::IncompleteArray(shape.with_element(canon(shape.element)))
            }
            TypeKind::Vector {
                element,
                len,
                flavor,
            } => TypeKind::Vector {
                element: canon(*element),
                len: *len,
                flavor: *flavor,
            },
            TypeKind::ExtVector { element, len } => TypeKind::ExtVector {
                element: canon(*element),
                len: *len,
            },
            TypeKind::FunctionNoProto { result, ext } => TypeKind::FunctionNoProto {
                result: canon(*result),
                ext: *ext,
            },
            TypeKind::FunctionProto(proto) => {
                let mut proto = proto.clone();
                proto.result = canon(proto.result);
                for param in &mut *proto.params {
                    *param = canon(*param);
                }
                for exception in &mut *proto.exceptions.types {
                    *exception = canon(*exception);
                }
                TypeKind::FunctionProto(proto)
            }
            TypeKind::ObjCObjectPointer { pointee, protocols } => TypeKind::ObjCObjectPointer {
                pointee: canon(*pointee),
                protocols: protocols.clone(),
            },
            _ => return None,
        };
        (rebuilt != *kind).then_some(rebuilt)
    }

    // Per-kind constructors. Each interns and returns the unqualified node.

    #[inline]
    pub fn builtin_type(&self, kind: BuiltinKind) -> TypeId {
        TypeId::builtin(kind)
    }

    pub fn complex_type(&mut self, element: QualType) -> TypeId {
        self.intern_type(TypeKind::Complex(element))
    }

    pub fn pointer_type(&mut self, pointee: QualType) -> TypeId {
        self.intern_type(TypeKind::Pointer(pointee))
    }

    pub fn block_pointer_type(&mut self, pointee: QualType) -> TypeId {
        self.intern_type(TypeKind::BlockPointer(pointee))
    }

    pub fn lvalue_reference_type(&mut self, pointee: QualType) -> TypeId {
        self.intern_type(TypeKind::LValueReference(pointee))
    }

    pub fn rvalue_reference_type(&mut self, pointee: QualType) -> TypeId {
        self.intern_type(TypeKind::RValueReference(pointee))
    }

    pub fn member_pointer_type(&mut self, pointee: QualType, class: TypeId) -> TypeId {
        self.intern_type(TypeKind::MemberPointer { pointee, class })
    }

    pub fn constant_array_type(&mut self, shape: ArrayShape, size: u64) -> TypeId {
        self.intern_type(TypeKind::ConstantArray { shape, size })
    }

    pub fn incomplete_array_type(&mut self, shape: ArrayShape) -> TypeId {
        self.intern_type(TypeKind::IncompleteArray(shape))
    }

    pub fn variable_array_type(
        &mut self,
        shape: ArrayShape,
        size: ExprId,
        brackets: SourceRange,
    ) -> TypeId {
        self.intern_type(TypeKind::VariableArray {
            shape,
            size,
            brackets,
        })
    }

    pub fn dependent_sized_array_type(&mut self, shape: ArrayShape, size: ExprId) -> TypeId {
        self.intern_type(TypeKind::DependentSizedArray { shape, size })
    }

    pub fn vector_type(&mut self, element: QualType, len: u32, flavor: VectorFlavor) -> TypeId {
        self.intern_type(TypeKind::Vector {
            element,
            len,
            flavor,
        })
    }

    pub fn ext_vector_type(&mut self, element: QualType, len: u32) -> TypeId {
        self.intern_type(TypeKind::ExtVector { element, len })
    }

    pub fn dependent_sized_ext_vector_type(&mut self, element: QualType, size: ExprId) -> TypeId {
        self.intern_type(TypeKind::DependentSizedExtVector { element, size })
    }

    pub fn function_no_proto_type(&mut self, result: QualType, ext: FunctionExt) -> TypeId {
        self.intern_type(TypeKind::FunctionNoProto { result, ext })
    }

    pub fn function_type(&mut self, proto: FunctionProto) -> TypeId {
        self.intern_type(TypeKind::FunctionProto(Box::new(proto)))
    }

    pub fn typedef_type(&mut self, decl: DeclId) -> TypeId {
        self.intern_type(TypeKind::Typedef(decl))
    }

    pub fn typeof_expr_type(&mut self, expr: ExprId) -> TypeId {
        self.intern_type(TypeKind::TypeOfExpr(expr))
    }

    pub fn typeof_type(&mut self, underlying: QualType) -> TypeId {
        self.intern_type(TypeKind::TypeOf(underlying))
    }

    pub fn decltype_type(&mut self, expr: ExprId) -> TypeId {
        self.intern_type(TypeKind::Decltype(expr))
    }

    pub fn dependent_decltype_type(&mut self, expr: ExprId) -> TypeId {
        self.intern_type(TypeKind::DependentDecltype(expr))
    }

    pub fn record_type(&mut self, decl: DeclId) -> TypeId {
        self.intern_type(TypeKind::Record(decl))
    }

    pub fn enum_type(&mut self, decl: DeclId) -> TypeId {
        self.intern_type(TypeKind::Enum(decl))
    }

    pub fn elaborated_type(&mut self, underlying: QualType, tag: TagKind) -> TypeId {
        self.intern_type(TypeKind::Elaborated { underlying, tag })
    }

    pub fn qualified_name_type(&mut self, qualifier: NestedNameId, named: QualType) -> TypeId {
        self.intern_type(TypeKind::QualifiedName { qualifier, named })
    }

    pub fn typename_type(&mut self, qualifier: NestedNameId, name: Name) -> TypeId {
        self.intern_type(TypeKind::Typename { qualifier, name })
    }

    pub fn template_type_parm_type(&mut self, depth: u32, index: u32, pack: bool, name: Name) -> TypeId {
        self.intern_type(TypeKind::TemplateTypeParm {
            depth,
            index,
            pack,
            name,
        })
    }

    pub fn subst_template_type_parm_type(&mut self, parm: TypeId, replacement: QualType) -> TypeId {
        self.intern_type(TypeKind::SubstTemplateTypeParm { parm, replacement })
    }

    pub fn template_specialization_type(&mut self, template: Name, args: Vec<QualType>) -> TypeId {
        self.intern_type(TypeKind::TemplateSpecialization {
            template,
            args: args.into_boxed_slice(),
        })
    }

    pub fn unresolved_using_type(&mut self, decl: DeclId) -> TypeId {
        self.intern_type(TypeKind::UnresolvedUsing(decl))
    }

    pub fn objc_interface_type(&mut self, decl: DeclId, protocols: Vec<DeclId>) -> TypeId {
        self.intern_type(TypeKind::ObjCInterface {
            decl,
            protocols: protocols.into_boxed_slice(),
        })
    }

    pub fn objc_object_pointer_type(&mut self, pointee: QualType, protocols: Vec<DeclId>) -> TypeId {
        self.intern_type(TypeKind::ObjCObjectPointer {
            pointee,
            protocols: protocols.into_boxed_slice(),
        })
    }
}
