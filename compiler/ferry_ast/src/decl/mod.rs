//! Declarations.
//!
//! Declarations live in a per-context arena and are owned by exactly one
//! declaration context (the translation unit, a namespace, a function...).
//! Linkage is never stored: [`Context::linkage`](crate::Context::linkage)
//! derives it from the scope, storage class and prior declarations.

use std::fmt;

use bitflags::bitflags;

use crate::{DeclId, DeclarationName, ExprId, QualType, SourceLocation, TagKind};

/// Storage-class specifier as written.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageClass {
    #[default]
    None,
    Extern,
    Static,
    PrivateExtern,
    Auto,
    Register,
}

/// Linkage of a declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Linkage {
    None,
    Internal,
    /// External linkage inside an anonymous namespace: visible across the
    /// translation unit, but not mergeable with other translation units.
    UniqueExternal,
    External,
}

impl Linkage {
    pub const fn is_external(self) -> bool {
        matches!(self, Linkage::External)
    }
}

bitflags! {
    /// Identifier namespaces a declaration is visible in.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct IdentifierNamespace: u8 {
        /// Variables, functions, typedefs, Objective-C classes.
        const ORDINARY = 1 << 0;
        /// `struct`/`union`/`enum` tags.
        const TAG = 1 << 1;
        const MEMBER = 1 << 2;
        const NAMESPACE = 1 << 3;
        const OBJC_PROTOCOL = 1 << 4;
    }
}

/// The type of a declarator as written, with its location.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeSourceInfo {
    pub ty: QualType,
    pub loc: SourceLocation,
}

/// Variable payload.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VarDecl {
    pub ty: QualType,
    pub type_source: Option<TypeSourceInfo>,
    pub storage: StorageClass,
    pub init: Option<ExprId>,
    /// Function parameter rather than an ordinary variable.
    pub is_param: bool,
}

impl VarDecl {
    /// A variable is a definition here when it carries an initializer.
    pub fn has_definition(&self) -> bool {
        self.init.is_some()
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    TranslationUnit,
    Namespace,
    Var(VarDecl),
    Function {
        ty: QualType,
        storage: StorageClass,
        params: Vec<DeclId>,
    },
    Typedef {
        underlying: QualType,
    },
    Record {
        tag: TagKind,
    },
    Enum,
    ObjCInterface,
    ObjCProtocol,
    ClassTemplate {
        pattern: DeclId,
    },
}

impl DeclKind {
    pub fn class(&self) -> DeclClass {
        match self {
            DeclKind::TranslationUnit => DeclClass::TranslationUnit,
            DeclKind::Namespace => DeclClass::Namespace,
            DeclKind::Var(var) if var.is_param => DeclClass::ParmVar,
            DeclKind::Var(_) => DeclClass::Var,
            DeclKind::Function { .. } => DeclClass::Function,
            DeclKind::Typedef { .. } => DeclClass::Typedef,
            DeclKind::Record { .. } => DeclClass::Record,
            DeclKind::Enum => DeclClass::Enum,
            DeclKind::ObjCInterface => DeclClass::ObjCInterface,
            DeclKind::ObjCProtocol => DeclClass::ObjCProtocol,
            DeclKind::ClassTemplate { .. } => DeclClass::ClassTemplate,
        }
    }
}

/// A declaration node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub name: DeclarationName,
    /// Owning declaration context. The translation unit owns itself.
    pub context: DeclId,
    pub loc: SourceLocation,
    pub kind: DeclKind,
}

impl Decl {
    pub fn class(&self) -> DeclClass {
        self.kind.class()
    }

    pub fn as_var(&self) -> Option<&VarDecl> {
        match &self.kind {
            DeclKind::Var(var) => Some(var),
            _ => None,
        }
    }

    pub fn identifier_namespace(&self) -> IdentifierNamespace {
        match self.kind {
            DeclKind::Var(_)
            | DeclKind::Function { .. }
            | DeclKind::Typedef { .. }
            | DeclKind::ObjCInterface
            | DeclKind::ClassTemplate { .. } => IdentifierNamespace::ORDINARY,
            DeclKind::Record { .. } | DeclKind::Enum => IdentifierNamespace::TAG,
            DeclKind::Namespace => IdentifierNamespace::NAMESPACE,
            DeclKind::ObjCProtocol => IdentifierNamespace::OBJC_PROTOCOL,
            DeclKind::TranslationUnit => IdentifierNamespace::empty(),
        }
    }

    pub fn is_in_identifier_namespace(&self, idns: IdentifierNamespace) -> bool {
        self.identifier_namespace().intersects(idns)
    }
}

/// Fieldless mirror of [`DeclKind`], used in errors and traces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclClass {
    TranslationUnit,
    Namespace,
    Var,
    ParmVar,
    Function,
    Typedef,
    Record,
    Enum,
    ObjCInterface,
    ObjCProtocol,
    ClassTemplate,
}

impl DeclClass {
    /// Whether declarations of this class can own other declarations.
    pub const fn is_decl_context(self) -> bool {
        matches!(
            self,
            DeclClass::TranslationUnit
                | DeclClass::Namespace
                | DeclClass::Function
                | DeclClass::Record
                | DeclClass::Enum
                | DeclClass::ObjCInterface
                | DeclClass::ObjCProtocol
        )
    }

    /// Whether declarations in a context of this class live at file scope.
    pub const fn is_file_context(self) -> bool {
        matches!(self, DeclClass::TranslationUnit | DeclClass::Namespace)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeclClass::TranslationUnit => "translation unit",
            DeclClass::Namespace => "namespace",
            DeclClass::Var => "variable",
            DeclClass::ParmVar => "parameter",
            DeclClass::Function => "function",
            DeclClass::Typedef => "typedef",
            DeclClass::Record => "record",
            DeclClass::Enum => "enum",
            DeclClass::ObjCInterface => "Objective-C interface",
            DeclClass::ObjCProtocol => "Objective-C protocol",
            DeclClass::ClassTemplate => "class template",
        }
    }
}

impl fmt::Display for DeclClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
