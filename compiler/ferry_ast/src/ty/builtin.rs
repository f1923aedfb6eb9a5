//! Builtin type kinds.

/// Builtin type kind.
///
/// The discriminant doubles as the pre-interned [`TypeId`](crate::TypeId)
/// index, so the order here is part of the pool layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BuiltinKind {
    Void = 0,
    Bool,
    /// Plain `char`. Signed or unsigned per the owning context's
    /// [`LangOptions::char_is_signed`](crate::LangOptions::char_is_signed).
    Char,
    SChar,
    UChar,
    WChar,
    Char16,
    Char32,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,
    Float,
    Double,
    LongDouble,
    NullPtr,
    Overload,
    Dependent,
    UndeducedAuto,
    ObjCId,
    ObjCClass,
    ObjCSel,
}

impl BuiltinKind {
    /// All builtin kinds in discriminant order.
    pub const ALL: [BuiltinKind; 28] = [
        BuiltinKind::Void,
        BuiltinKind::Bool,
        BuiltinKind::Char,
        BuiltinKind::SChar,
        BuiltinKind::UChar,
        BuiltinKind::WChar,
        BuiltinKind::Char16,
        BuiltinKind::Char32,
        BuiltinKind::Short,
        BuiltinKind::UShort,
        BuiltinKind::Int,
        BuiltinKind::UInt,
        BuiltinKind::Long,
        BuiltinKind::ULong,
        BuiltinKind::LongLong,
        BuiltinKind::ULongLong,
        BuiltinKind::Int128,
        BuiltinKind::UInt128,
        BuiltinKind::Float,
        BuiltinKind::Double,
        BuiltinKind::LongDouble,
        BuiltinKind::NullPtr,
        BuiltinKind::Overload,
        BuiltinKind::Dependent,
        BuiltinKind::UndeducedAuto,
        BuiltinKind::ObjCId,
        BuiltinKind::ObjCClass,
        BuiltinKind::ObjCSel,
    ];

    pub const fn from_index(index: u32) -> Option<BuiltinKind> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    pub const fn spelling(self) -> &'static str {
        match self {
            BuiltinKind::Void => "void",
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::SChar => "signed char",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Char16 => "char16_t",
            BuiltinKind::Char32 => "char32_t",
            BuiltinKind::Short => "short",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::Int => "int",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::Long => "long",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::Int128 => "__int128_t",
            BuiltinKind::UInt128 => "__uint128_t",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
            BuiltinKind::NullPtr => "nullptr_t",
            BuiltinKind::Overload => "<overloaded function type>",
            BuiltinKind::Dependent => "<dependent type>",
            BuiltinKind::UndeducedAuto => "auto",
            BuiltinKind::ObjCId => "id",
            BuiltinKind::ObjCClass => "Class",
            BuiltinKind::ObjCSel => "SEL",
        }
    }

    /// Placeholder kinds that only exist during analysis.
    pub const fn is_placeholder(self) -> bool {
        matches!(
            self,
            BuiltinKind::Overload | BuiltinKind::Dependent | BuiltinKind::UndeducedAuto
        )
    }
}
