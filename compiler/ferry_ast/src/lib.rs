//! Context-owned program graphs for the Ferry importer.
//!
//! A [`Context`] holds one analyzed program: interned types, declarations,
//! expressions and the tables that give them names. Two contexts never
//! share handles; moving nodes between them is the job of `ferry_import`.
//!
//! # Type Interning
//!
//! Types are interned per context by structural shape ([`TypeKind`]), with
//! qualifiers kept outside the node in a [`QualType`]. Builtins are
//! pre-interned at fixed [`TypeId`] indices, so `TypeId::INT` is valid in
//! every context.

mod context;
mod decl;
mod expr;
mod ids;
mod interner;
mod lang;
mod name;
mod ty;

pub use context::{Context, TypeNode};
pub use decl::{
    Decl, DeclClass, DeclKind, IdentifierNamespace, Linkage, StorageClass, TypeSourceInfo,
    VarDecl,
};
pub use expr::{BinaryOp, CastKind, Expr, ExprKind, UnaryOp};
pub use ids::{DeclId, ExprId, NestedNameId, SelectorId, SourceLocation, SourceRange, TypeId};
pub use interner::{IdentifierTable, InternError, Name, SelectorData, SelectorTable};
pub use lang::{Dialect, LangOptions};
pub use name::{DeclarationName, NestedNameSpecifier, OverloadedOperator};
pub use ty::{
    ArrayShape, ArraySizeModifier, BuiltinKind, CallingConv, Cvr, ExceptionSpec, FunctionExt,
    FunctionProto, ObjCGc, QualType, Qualifiers, TagKind, TypeClass, TypeFlags, TypeKind,
    VectorFlavor,
};
