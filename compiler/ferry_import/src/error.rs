//! Import failures.

use ferry_ast::{DeclClass, Dialect, TypeClass};
use thiserror::Error;

/// Result of any import entry point.
pub type ImportResult<T> = Result<T, ImportError>;

/// Why an import failed.
///
/// Sub-import failures propagate unchanged, so the reason always names the
/// innermost construct that could not be translated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Dependent and template-parameterized type kinds.
    #[error("cannot import {0} type: dependent types need an instantiation context")]
    UnsupportedType(TypeClass),

    #[error("cannot import {0} declaration")]
    UnsupportedDecl(DeclClass),

    /// Expressions that only resolve at instantiation time.
    #[error("cannot import dependent expression")]
    UnsupportedExpr,

    /// The target context does not enable a dialect the construct needs.
    /// Only reported under [`DialectPolicy::Strict`](crate::DialectPolicy::Strict).
    #[error("{construct} requires {dialect} support in the target context")]
    DialectMismatch {
        construct: &'static str,
        dialect: Dialect,
    },

    /// The name-conflict hook returned an empty name.
    #[error("conflicting declarations of `{0}`: import rejected")]
    NameConflictRejected(String),
}
