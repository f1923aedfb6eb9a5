//! Interned type shapes.

use std::fmt;

use bitflags::bitflags;

use super::{BuiltinKind, Cvr, QualType};
use crate::{DeclId, ExprId, Name, NestedNameId, SourceRange, TypeId};

/// How an array bound was written: `T[N]`, `T[static N]` or `T[*]`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ArraySizeModifier {
    #[default]
    Normal,
    Static,
    Star,
}

/// Element type plus declarator details shared by every array kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArrayShape {
    pub element: QualType,
    pub size_modifier: ArraySizeModifier,
    /// Qualifiers written inside the brackets (`int a[const 4]`).
    pub index_quals: Cvr,
}

impl ArrayShape {
    pub fn new(element: QualType) -> Self {
        ArrayShape {
            element,
            size_modifier: ArraySizeModifier::Normal,
            index_quals: Cvr::empty(),
        }
    }

    #[must_use]
    pub fn with_element(self, element: QualType) -> Self {
        ArrayShape { element, ..self }
    }
}

/// Vector flavor for `__attribute__((vector_size))` types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum VectorFlavor {
    #[default]
    Generic,
    AltiVec,
    AltiVecPixel,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CallingConv {
    #[default]
    Default,
    C,
    StdCall,
    FastCall,
    ThisCall,
}

/// Function-type bits shared by prototyped and unprototyped functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FunctionExt {
    pub no_return: bool,
    pub calling_conv: CallingConv,
}

/// Dynamic exception specification: `throw(A, B)` or `throw(...)`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ExceptionSpec {
    pub has_spec: bool,
    pub has_any: bool,
    pub types: Box<[QualType]>,
}

/// A prototyped function signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionProto {
    pub result: QualType,
    pub params: Box<[QualType]>,
    pub variadic: bool,
    /// Method qualifiers (`void f() const`).
    pub method_quals: Cvr,
    pub exceptions: ExceptionSpec,
    pub ext: FunctionExt,
}

impl FunctionProto {
    pub fn new(result: QualType, params: impl Into<Box<[QualType]>>) -> Self {
        FunctionProto {
            result,
            params: params.into(),
            variadic: false,
            method_quals: Cvr::empty(),
            exceptions: ExceptionSpec::default(),
            ext: FunctionExt::default(),
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// Tag keyword of an elaborated type or record.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagKind {
    Struct,
    Union,
    Class,
    Enum,
}

impl TagKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            TagKind::Struct => "struct",
            TagKind::Union => "union",
            TagKind::Class => "class",
            TagKind::Enum => "enum",
        }
    }
}

/// The closed set of type shapes a context can intern.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Builtin(BuiltinKind),
    Complex(QualType),
    Pointer(QualType),
    BlockPointer(QualType),
    LValueReference(QualType),
    RValueReference(QualType),
    MemberPointer {
        pointee: QualType,
        class: TypeId,
    },
    ConstantArray {
        shape: ArrayShape,
        size: u64,
    },
    IncompleteArray(ArrayShape),
    VariableArray {
        shape: ArrayShape,
        size: ExprId,
        brackets: SourceRange,
    },
    DependentSizedArray {
        shape: ArrayShape,
        size: ExprId,
    },
    Vector {
        element: QualType,
        len: u32,
        flavor: VectorFlavor,
    },
    ExtVector {
        element: QualType,
        len: u32,
    },
    DependentSizedExtVector {
        element: QualType,
        size: ExprId,
    },
    FunctionNoProto {
        result: QualType,
        ext: FunctionExt,
    },
    FunctionProto(Box<FunctionProto>),
    Typedef(DeclId),
    TypeOfExpr(ExprId),
    TypeOf(QualType),
    Decltype(ExprId),
    DependentDecltype(ExprId),
    Record(DeclId),
    Enum(DeclId),
    Elaborated {
        underlying: QualType,
        tag: TagKind,
    },
    QualifiedName {
        qualifier: NestedNameId,
        named: QualType,
    },
    Typename {
        qualifier: NestedNameId,
        name: Name,
    },
    TemplateTypeParm {
        depth: u32,
        index: u32,
        pack: bool,
        name: Name,
    },
    SubstTemplateTypeParm {
        parm: TypeId,
        replacement: QualType,
    },
    TemplateSpecialization {
        template: Name,
        args: Box<[QualType]>,
    },
    UnresolvedUsing(DeclId),
    ObjCInterface {
        decl: DeclId,
        protocols: Box<[DeclId]>,
    },
    ObjCObjectPointer {
        pointee: QualType,
        protocols: Box<[DeclId]>,
    },
}

impl TypeKind {
    pub fn class(&self) -> TypeClass {
        match self {
            TypeKind::Builtin(_) => TypeClass::Builtin,
            TypeKind::Complex(_) => TypeClass::Complex,
            TypeKind::Pointer(_) => TypeClass::Pointer,
            TypeKind::BlockPointer(_) => TypeClass::BlockPointer,
            TypeKind::LValueReference(_) => TypeClass::LValueReference,
            TypeKind::RValueReference(_) => TypeClass::RValueReference,
            TypeKind::MemberPointer { .. } => TypeClass::MemberPointer,
            TypeKind::ConstantArray { .. } => TypeClass::ConstantArray,
            TypeKind::IncompleteArray(_) => TypeClass::IncompleteArray,
            TypeKind::VariableArray { .. } => TypeClass::VariableArray,
            TypeKind::DependentSizedArray { .. } => TypeClass::DependentSizedArray,
            TypeKind::Vector { .. } => TypeClass::Vector,
            TypeKind::ExtVector { .. } => TypeClass::ExtVector,
            TypeKind::DependentSizedExtVector { .. } => TypeClass::DependentSizedExtVector,
            TypeKind::FunctionNoProto { .. } => TypeClass::FunctionNoProto,
            TypeKind::FunctionProto(_) => TypeClass::FunctionProto,
            TypeKind::Typedef(_) => TypeClass::Typedef,
            TypeKind::TypeOfExpr(_) => TypeClass::TypeOfExpr,
            TypeKind::TypeOf(_) => TypeClass::TypeOf,
            TypeKind::Decltype(_) => TypeClass::Decltype,
            TypeKind::DependentDecltype(_) => TypeClass::DependentDecltype,
            TypeKind::Record(_) => TypeClass::Record,
            TypeKind::Enum(_) => TypeClass::Enum,
            TypeKind::Elaborated { .. } => TypeClass::Elaborated,
            TypeKind::QualifiedName { .. } => TypeClass::QualifiedName,
            TypeKind::Typename { .. } => TypeClass::Typename,
            TypeKind::TemplateTypeParm { .. } => TypeClass::TemplateTypeParm,
            TypeKind::SubstTemplateTypeParm { .. } => TypeClass::SubstTemplateTypeParm,
            TypeKind::TemplateSpecialization { .. } => TypeClass::TemplateSpecialization,
            TypeKind::UnresolvedUsing(_) => TypeClass::UnresolvedUsing,
            TypeKind::ObjCInterface { .. } => TypeClass::ObjCInterface,
            TypeKind::ObjCObjectPointer { .. } => TypeClass::ObjCObjectPointer,
        }
    }

    /// Visit every directly referenced type node.
    pub fn for_each_child(&self, mut f: impl FnMut(TypeId)) {
        match self {
            TypeKind::Complex(inner)
            | TypeKind::Pointer(inner)
            | TypeKind::BlockPointer(inner)
            | TypeKind::LValueReference(inner)
            | TypeKind::RValueReference(inner)
            | TypeKind::TypeOf(inner)
            | TypeKind::Elaborated {
                underlying: inner, ..
            }
            | TypeKind::QualifiedName { named: inner, .. }
            | TypeKind::ObjCObjectPointer { pointee: inner, .. } => f(inner.ty),
            TypeKind::MemberPointer { pointee, class } => {
                f(pointee.ty);
                f(*class);
            }
            TypeKind::ConstantArray { shape, .. }
            | TypeKind::IncompleteArray(shape)
            | TypeKind::VariableArray { shape, .. }
            | TypeKind::DependentSizedArray { shape, .. } => f(shape.element.ty),
            TypeKind::Vector { element, .. }
            | TypeKind::ExtVector { element, .. }
            | TypeKind::DependentSizedExtVector { element, .. } => f(element.ty),
            TypeKind::FunctionNoProto { result, .. } => f(result.ty),
            TypeKind::FunctionProto(proto) => {
                f(proto.result.ty);
                for param in &*proto.params {
                    f(param.ty);
                }
                for exception in &*proto.exceptions.types {
                    f(exception.ty);
                }
            }
            TypeKind::SubstTemplateTypeParm { parm, replacement } => {
                f(*parm);
                f(replacement.ty);
            }
            TypeKind::TemplateSpecialization { args, .. } => {
                for arg in &**args {
                    f(arg.ty);
                }
            }
            TypeKind::Builtin(_)
            | TypeKind::Typedef(_)
            | TypeKind::TypeOfExpr(_)
            | TypeKind::Decltype(_)
            | TypeKind::DependentDecltype(_)
            | TypeKind::Record(_)
            | TypeKind::Enum(_)
            | TypeKind::Typename { .. }
            | TypeKind::TemplateTypeParm { .. }
            | TypeKind::UnresolvedUsing(_)
            | TypeKind::ObjCInterface { .. } => {}
        }
    }

    /// Flags that follow from the kind alone, before children are folded in.
    pub(crate) fn own_flags(&self) -> TypeFlags {
        match self {
            TypeKind::Builtin(BuiltinKind::Dependent)
            | TypeKind::DependentSizedArray { .. }
            | TypeKind::DependentSizedExtVector { .. }
            | TypeKind::DependentDecltype(_)
            | TypeKind::Typename { .. }
            | TypeKind::TemplateTypeParm { .. }
            | TypeKind::TemplateSpecialization { .. }
            | TypeKind::UnresolvedUsing(_) => TypeFlags::IS_DEPENDENT,
            TypeKind::Builtin(_) => TypeFlags::IS_BUILTIN,
            TypeKind::Typedef(_)
            | TypeKind::TypeOfExpr(_)
            | TypeKind::TypeOf(_)
            | TypeKind::Decltype(_)
            | TypeKind::Elaborated { .. }
            | TypeKind::QualifiedName { .. }
            | TypeKind::SubstTemplateTypeParm { .. } => TypeFlags::IS_SUGAR,
            TypeKind::VariableArray { .. } => {
                TypeFlags::IS_ARRAY | TypeFlags::IS_VARIABLY_MODIFIED
            }
            TypeKind::ConstantArray { .. } | TypeKind::IncompleteArray(_) => TypeFlags::IS_ARRAY,
            TypeKind::FunctionNoProto { .. } | TypeKind::FunctionProto(_) => {
                TypeFlags::IS_FUNCTION
            }
            _ => TypeFlags::empty(),
        }
    }
}

bitflags! {
    /// Pre-computed type properties, fixed at interning time.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        const IS_BUILTIN = 1 << 0;
        /// Depends on a template parameter somewhere in its structure.
        const IS_DEPENDENT = 1 << 1;
        /// Written-form wrapper whose canonical type is something else.
        const IS_SUGAR = 1 << 2;
        const IS_ARRAY = 1 << 3;
        const IS_FUNCTION = 1 << 4;
        /// Contains a variable-length array.
        const IS_VARIABLY_MODIFIED = 1 << 5;
    }
}

impl TypeFlags {
    /// Flags a parent inherits from a child.
    pub(crate) fn inherited(self) -> TypeFlags {
        self & (TypeFlags::IS_DEPENDENT | TypeFlags::IS_VARIABLY_MODIFIED)
    }
}

/// Fieldless mirror of [`TypeKind`], used in errors and traces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeClass {
    Builtin,
    Complex,
    Pointer,
    BlockPointer,
    LValueReference,
    RValueReference,
    MemberPointer,
    ConstantArray,
    IncompleteArray,
    VariableArray,
    DependentSizedArray,
    Vector,
    ExtVector,
    DependentSizedExtVector,
    FunctionNoProto,
    FunctionProto,
    Typedef,
    TypeOfExpr,
    TypeOf,
    Decltype,
    DependentDecltype,
    Record,
    Enum,
    Elaborated,
    QualifiedName,
    Typename,
    TemplateTypeParm,
    SubstTemplateTypeParm,
    TemplateSpecialization,
    UnresolvedUsing,
    ObjCInterface,
    ObjCObjectPointer,
}

impl TypeClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            TypeClass::Builtin => "builtin",
            TypeClass::Complex => "complex",
            TypeClass::Pointer => "pointer",
            TypeClass::BlockPointer => "block pointer",
            TypeClass::LValueReference => "lvalue reference",
            TypeClass::RValueReference => "rvalue reference",
            TypeClass::MemberPointer => "member pointer",
            TypeClass::ConstantArray => "constant array",
            TypeClass::IncompleteArray => "incomplete array",
            TypeClass::VariableArray => "variable array",
            TypeClass::DependentSizedArray => "dependent-sized array",
            TypeClass::Vector => "vector",
            TypeClass::ExtVector => "ext vector",
            TypeClass::DependentSizedExtVector => "dependent-sized ext vector",
            TypeClass::FunctionNoProto => "unprototyped function",
            TypeClass::FunctionProto => "function",
            TypeClass::Typedef => "typedef",
            TypeClass::TypeOfExpr => "typeof expression",
            TypeClass::TypeOf => "typeof",
            TypeClass::Decltype => "decltype",
            TypeClass::DependentDecltype => "dependent decltype",
            TypeClass::Record => "record",
            TypeClass::Enum => "enum",
            TypeClass::Elaborated => "elaborated",
            TypeClass::QualifiedName => "qualified name",
            TypeClass::Typename => "typename",
            TypeClass::TemplateTypeParm => "template type parameter",
            TypeClass::SubstTemplateTypeParm => "substituted template type parameter",
            TypeClass::TemplateSpecialization => "template specialization",
            TypeClass::UnresolvedUsing => "unresolved using",
            TypeClass::ObjCInterface => "Objective-C interface",
            TypeClass::ObjCObjectPointer => "Objective-C object pointer",
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
