use super::*;

#[test]
fn builtin_handles_are_fixed() {
    assert_eq!(TypeId::VOID.raw(), 0);
    assert_eq!(TypeId::builtin(BuiltinKind::Int), TypeId::INT);
    assert!(TypeId::INT.is_builtin());
    assert!(!TypeId::from_raw(TypeId::BUILTIN_COUNT).is_builtin());
}

#[test]
fn none_sentinel() {
    assert!(TypeId::NONE.is_none());
    assert!(!TypeId::NONE.is_builtin());
    assert_eq!(format!("{:?}", TypeId::NONE), "TypeId::NONE");
}

#[test]
fn debug_shows_builtin_spelling() {
    assert_eq!(format!("{:?}", TypeId::UCHAR), "TypeId(unsigned char)");
    assert_eq!(format!("{:?}", DeclId::from_raw(7)), "Decl#7");
}

#[test]
fn location_zero_is_invalid() {
    assert!(!SourceLocation::INVALID.is_valid());
    assert!(SourceLocation::new(12).is_valid());
    assert_eq!(SourceLocation::default(), SourceLocation::INVALID);
}
