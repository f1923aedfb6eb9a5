//! Declaration names.

use crate::{Name, QualType, SelectorId};

/// Overloadable C++ operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OverloadedOperator {
    New,
    Delete,
    ArrayNew,
    ArrayDelete,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Amp,
    Pipe,
    Tilde,
    Exclaim,
    Equal,
    Less,
    Greater,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    CaretEqual,
    AmpEqual,
    PipeEqual,
    LessLess,
    GreaterGreater,
    LessLessEqual,
    GreaterGreaterEqual,
    EqualEqual,
    ExclaimEqual,
    LessEqual,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    PlusPlus,
    MinusMinus,
    Comma,
    ArrowStar,
    Arrow,
    Call,
    Subscript,
}

impl OverloadedOperator {
    pub const fn spelling(self) -> &'static str {
        match self {
            OverloadedOperator::New => "new",
            OverloadedOperator::Delete => "delete",
            OverloadedOperator::ArrayNew => "new[]",
            OverloadedOperator::ArrayDelete => "delete[]",
            OverloadedOperator::Plus => "+",
            OverloadedOperator::Minus => "-",
            OverloadedOperator::Star => "*",
            OverloadedOperator::Slash => "/",
            OverloadedOperator::Percent => "%",
            OverloadedOperator::Caret => "^",
            OverloadedOperator::Amp => "&",
            OverloadedOperator::Pipe => "|",
            OverloadedOperator::Tilde => "~",
            OverloadedOperator::Exclaim => "!",
            OverloadedOperator::Equal => "=",
            OverloadedOperator::Less => "<",
            OverloadedOperator::Greater => ">",
            OverloadedOperator::PlusEqual => "+=",
            OverloadedOperator::MinusEqual => "-=",
            OverloadedOperator::StarEqual => "*=",
            OverloadedOperator::SlashEqual => "/=",
            OverloadedOperator::PercentEqual => "%=",
            OverloadedOperator::CaretEqual => "^=",
            OverloadedOperator::AmpEqual => "&=",
            OverloadedOperator::PipeEqual => "|=",
            OverloadedOperator::LessLess => "<<",
            OverloadedOperator::GreaterGreater => ">>",
            OverloadedOperator::LessLessEqual => "<<=",
            OverloadedOperator::GreaterGreaterEqual => ">>=",
            OverloadedOperator::EqualEqual => "==",
            OverloadedOperator::ExclaimEqual => "!=",
            OverloadedOperator::LessEqual => "<=",
            OverloadedOperator::GreaterEqual => ">=",
            OverloadedOperator::AmpAmp => "&&",
            OverloadedOperator::PipePipe => "||",
            OverloadedOperator::PlusPlus => "++",
            OverloadedOperator::MinusMinus => "--",
            OverloadedOperator::Comma => ",",
            OverloadedOperator::ArrowStar => "->*",
            OverloadedOperator::Arrow => "->",
            OverloadedOperator::Call => "()",
            OverloadedOperator::Subscript => "[]",
        }
    }
}

/// The name of a declaration.
///
/// Constructor, destructor and conversion names embed the *canonical* type
/// of the owning context. Build them through
/// [`Context::constructor_name`](crate::Context::constructor_name) and
/// friends, never by wrapping a type from another context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DeclarationName {
    #[default]
    Empty,
    Identifier(Name),
    ObjCSelector(SelectorId),
    CxxConstructor(QualType),
    CxxDestructor(QualType),
    CxxConversionFunction(QualType),
    CxxOperator(OverloadedOperator),
    CxxLiteralOperator(Name),
    CxxUsingDirective,
}

impl DeclarationName {
    pub fn is_empty(self) -> bool {
        matches!(self, DeclarationName::Empty)
    }

    pub fn as_identifier(self) -> Option<Name> {
        match self {
            DeclarationName::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// The type embedded in a constructor, destructor or conversion name.
    pub fn cxx_name_type(self) -> Option<QualType> {
        match self {
            DeclarationName::CxxConstructor(ty)
            | DeclarationName::CxxDestructor(ty)
            | DeclarationName::CxxConversionFunction(ty) => Some(ty),
            _ => None,
        }
    }
}

impl From<Name> for DeclarationName {
    fn from(name: Name) -> Self {
        if name.is_empty() {
            DeclarationName::Empty
        } else {
            DeclarationName::Identifier(name)
        }
    }
}

/// One component of a nested-name-specifier (`::`, `ns::`, `T::`, `x::`).
///
/// Interned per context; `prefix` points at the component to the left.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NestedNameSpecifier {
    Global,
    Namespace {
        prefix: Option<crate::NestedNameId>,
        namespace: crate::DeclId,
    },
    Type {
        prefix: Option<crate::NestedNameId>,
        ty: crate::TypeId,
    },
    /// A dependent identifier component (`T::x::`).
    Identifier {
        prefix: Option<crate::NestedNameId>,
        name: Name,
    },
}
