//! Expressions.
//!
//! Only the shapes that appear in initializers, array bounds and
//! `typeof`/`decltype` operands are modeled. Children are arena handles.

use crate::{DeclId, ExprId, Name, QualType, SourceLocation};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    AddrOf,
    Deref,
    Plus,
    Minus,
    Not,
    LNot,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Xor,
    LAnd,
    LOr,
    Assign,
    Comma,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CastKind {
    NoOp,
    LValueToRValue,
    ArrayToPointerDecay,
    FunctionToPointerDecay,
    IntegralCast,
    IntegralToFloating,
    FloatingToIntegral,
    BitCast,
    NullToPointer,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    IntegerLiteral(u128),
    /// IEEE-754 bits of the literal value.
    FloatingLiteral(u64),
    CharacterLiteral(u32),
    StringLiteral(Name),
    DeclRef(DeclId),
    Paren(ExprId),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Cast {
        kind: CastKind,
        operand: ExprId,
    },
    /// `sizeof(T)`.
    SizeOfType(QualType),
    InitList(Box<[ExprId]>),
    /// A name that can only be resolved at instantiation time.
    DependentScopeRef(Name),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: QualType,
    pub loc: SourceLocation,
}

impl Expr {
    pub fn new(kind: ExprKind, ty: QualType, loc: SourceLocation) -> Self {
        Expr { kind, ty, loc }
    }

    /// Check if this expression references `decl` directly.
    pub fn refers_to(&self, decl: DeclId) -> bool {
        matches!(self.kind, ExprKind::DeclRef(d) if d == decl)
    }
}
