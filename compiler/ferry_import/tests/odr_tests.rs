//! End-to-end import sessions between two translation units.
//!
//! Each test builds a small source and target program, runs one or more
//! import sessions, and checks the resulting target graph together with
//! the diagnostics recorded on both sides.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use ferry_ast::{
    Context, DeclId, DeclarationName, Expr, ExprKind, IdentifierNamespace, LangOptions, QualType,
    SourceLocation, StorageClass, TypeId,
};
use ferry_diagnostic::{DiagId, DiagnosticSink, Severity};
use ferry_import::{ImportHooks, ImportedMap, Importer};
use pretty_assertions::assert_eq;

fn int() -> QualType {
    QualType::unqualified(TypeId::INT)
}

fn declare(ctx: &mut Context, name: &str, ty: QualType, storage: StorageClass, offset: u32) -> DeclId {
    let tu = ctx.translation_unit();
    let name = ctx.identifier_name(name);
    ctx.create_var(tu, SourceLocation::new(offset), name, ty, None, storage)
}

fn define(ctx: &mut Context, name: &str, value: u128, offset: u32) -> DeclId {
    let var = declare(ctx, name, int(), StorageClass::None, offset);
    let init = ctx.alloc_expr(Expr::new(
        ExprKind::IntegerLiteral(value),
        int(),
        SourceLocation::new(offset + 4),
    ));
    ctx.set_init(var, init);
    var
}

#[test]
fn three_units_share_one_external_variable() {
    let mut merged = Context::new(LangOptions::c99());
    let mut merged_diags = DiagnosticSink::new();

    let mut unit_a = Context::new(LangOptions::c99());
    let a_x = declare(&mut unit_a, "x", int(), StorageClass::Extern, 1);
    let mut unit_b = Context::new(LangOptions::c99());
    let b_x = define(&mut unit_b, "x", 42, 1);
    let mut unit_c = Context::new(LangOptions::c99());
    let c_x = declare(&mut unit_c, "x", int(), StorageClass::Extern, 1);

    let mut a_diags = DiagnosticSink::new();
    let mut b_diags = DiagnosticSink::new();
    let mut c_diags = DiagnosticSink::new();

    let x = Importer::new(&mut merged, &mut merged_diags, &unit_a, &mut a_diags)
        .import_decl(a_x)
        .expect("declaration imports");
    let x_again = Importer::new(&mut merged, &mut merged_diags, &unit_b, &mut b_diags)
        .import_decl(b_x)
        .expect("definition merges");
    let x_third = Importer::new(&mut merged, &mut merged_diags, &unit_c, &mut c_diags)
        .import_decl(c_x)
        .expect("second declaration merges");

    assert_eq!(x, x_again);
    assert_eq!(x, x_third);
    let x_name = merged.decl(x).name;
    assert_eq!(merged.lookup(merged.translation_unit(), x_name), &[x]);

    let init = merged.var(x).and_then(|var| var.init).expect("definition carried over");
    assert_eq!(merged.expr(init).kind, ExprKind::IntegerLiteral(42));
    assert!(merged_diags.is_empty());
}

#[test]
fn two_definitions_report_once_per_conflict() {
    let mut merged = Context::new(LangOptions::c99());
    let mut merged_diags = DiagnosticSink::new();
    let mut unit_a = Context::new(LangOptions::c99());
    let a_x = define(&mut unit_a, "x", 1, 10);
    let mut unit_b = Context::new(LangOptions::c99());
    let b_x = define(&mut unit_b, "x", 2, 20);
    let mut a_diags = DiagnosticSink::new();
    let mut b_diags = DiagnosticSink::new();

    let x = Importer::new(&mut merged, &mut merged_diags, &unit_a, &mut a_diags)
        .import_decl(a_x)
        .unwrap();
    let same = Importer::new(&mut merged, &mut merged_diags, &unit_b, &mut b_diags)
        .import_decl(b_x)
        .unwrap();

    assert_eq!(x, same);
    assert_eq!(merged_diags.count_of(DiagId::ErrOdrVariableMultipleDef), 1);
    assert_eq!(merged_diags.diagnostics()[0].loc, SourceLocation::new(10));
    assert_eq!(b_diags.count_of(DiagId::NoteOdrDefinedHere), 1);
    assert_eq!(b_diags.diagnostics()[0].loc, SourceLocation::new(20));
    assert!(a_diags.is_empty());

    let init = merged.var(x).and_then(|var| var.init).unwrap();
    assert_eq!(merged.expr(init).kind, ExprKind::IntegerLiteral(1));
}

#[test]
fn type_conflict_is_reported_with_rendered_types() {
    let mut to = Context::new(LangOptions::c99());
    let char_ptr = to.pointer_type(QualType::unqualified(TypeId::CHAR).with_const());
    declare(&mut to, "name", QualType::unqualified(char_ptr), StorageClass::Extern, 30);
    let mut from = Context::new(LangOptions::c99());
    let from_name = declare(&mut from, "name", QualType::unqualified(TypeId::LONG), StorageClass::Extern, 5);
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();

    Importer::new(&mut to, &mut to_diags, &from, &mut from_diags)
        .import_decl(from_name)
        .unwrap();

    let rendered: Vec<String> = to_diags
        .diagnostics()
        .iter()
        .chain(from_diags.diagnostics())
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        rendered,
        vec![
            "@30: error: external variable 'name' declared with incompatible types in different translation units ('long' vs. 'const char *')".to_owned(),
            "@5: note: declared here with type 'long'".to_owned(),
        ]
    );
    assert_eq!(to_diags.diagnostics()[0].severity, Severity::Error);
}

#[test]
fn many_conflicts_are_all_reported() {
    let mut to = Context::new(LangOptions::c99());
    let mut from = Context::new(LangOptions::c99());
    let mut imports = Vec::new();
    for i in 0..25 {
        let name = format!("v{i}");
        declare(&mut to, &name, int(), StorageClass::Extern, 100 + i);
        let long = QualType::unqualified(TypeId::LONG);
        imports.push(declare(&mut from, &name, long, StorageClass::Extern, i));
    }
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();
    let mut importer = Importer::new(&mut to, &mut to_diags, &from, &mut from_diags);

    for from_decl in imports {
        importer.import_decl(from_decl).unwrap();
    }

    assert_eq!(to_diags.count_of(DiagId::ErrOdrVariableTypeInconsistent), 25);
    assert_eq!(from_diags.count_of(DiagId::NoteOdrValueHere), 25);
    assert_eq!(
        to_diags.diagnostics().last().map(|diag| diag.loc),
        Some(SourceLocation::new(124))
    );
}

#[test]
fn cplusplus_const_globals_stay_private() {
    let mut to = Context::new(LangOptions::cplusplus());
    let existing = declare(&mut to, "limit", int().with_const(), StorageClass::None, 8);
    let mut from = Context::new(LangOptions::cplusplus());
    let from_limit = declare(&mut from, "limit", int().with_const(), StorageClass::None, 3);
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();

    let imported = Importer::new(&mut to, &mut to_diags, &from, &mut from_diags)
        .import_decl(from_limit)
        .unwrap();

    assert_ne!(imported, existing);
    assert!(to_diags.is_empty());
}

#[test]
fn session_map_survives_into_later_sessions() {
    let mut to = Context::new(LangOptions::c99());
    let mut from = Context::new(LangOptions::c99());
    let x = declare(&mut from, "x", int(), StorageClass::Extern, 1);
    let y = declare(&mut from, "y", int(), StorageClass::Extern, 2);
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();

    let map: ImportedMap = {
        let mut importer = Importer::new(&mut to, &mut to_diags, &from, &mut from_diags);
        importer.import_decl(x).unwrap();
        importer.into_imported_map()
    };
    assert_eq!(map.decl_count(), 2);

    let mut importer =
        Importer::new(&mut to, &mut to_diags, &from, &mut from_diags).with_imported_map(map);
    importer.import_decl(x).unwrap();
    importer.import_decl(y).unwrap();
    let mut mapped: Vec<_> = importer.imported().decls().map(|(from, _)| from).collect();
    mapped.sort();

    assert_eq!(mapped, vec![DeclId::TRANSLATION_UNIT, x, y]);
    assert_eq!(to.decl_count(), 3);
}

/// Renames clashing declarations to `<name>_<n>` and relocates every
/// location by a fixed offset.
struct RenamingHooks {
    renamed: usize,
    offset: u32,
}

impl ImportHooks for RenamingHooks {
    fn handle_name_conflict(
        &mut self,
        to: &mut Context,
        name: DeclarationName,
        _dc: DeclId,
        _idns: IdentifierNamespace,
        conflicts: &[DeclId],
    ) -> DeclarationName {
        self.renamed += 1;
        let spelling = format!("{}_{}", to.format_name(name), conflicts.len());
        to.identifier_name(&spelling)
    }

    fn import_source_location(&mut self, loc: SourceLocation) -> SourceLocation {
        SourceLocation::new(loc.offset() + self.offset)
    }
}

#[test]
fn custom_hooks_rename_and_relocate() {
    let mut to = Context::new(LangOptions::c99());
    declare(&mut to, "buf", QualType::unqualified(TypeId::DOUBLE), StorageClass::Extern, 4);
    let mut from = Context::new(LangOptions::c99());
    let from_buf = declare(&mut from, "buf", int(), StorageClass::Extern, 6);
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();

    let mut importer = Importer::new(&mut to, &mut to_diags, &from, &mut from_diags).with_hooks(
        RenamingHooks {
            renamed: 0,
            offset: 1000,
        },
    );
    let imported = importer.import_decl(from_buf).unwrap();
    assert_eq!(importer.hooks().renamed, 1);

    assert_eq!(to.format_name(to.decl(imported).name), "buf_1");
    assert_eq!(to.decl(imported).loc, SourceLocation::new(1006));
    // Diagnostics point at the existing target declaration, not through the hook.
    assert_eq!(to_diags.diagnostics()[0].loc, SourceLocation::new(4));
}

#[test]
fn deep_pointer_chain_imports() {
    let mut from = Context::new(LangOptions::c99());
    let mut ty = int();
    for _ in 0..20_000 {
        ty = QualType::unqualified(from.pointer_type(ty));
    }
    let mut to = Context::new(LangOptions::c99());
    let mut to_diags = DiagnosticSink::new();
    let mut from_diags = DiagnosticSink::new();

    let imported = Importer::new(&mut to, &mut to_diags, &from, &mut from_diags)
        .import_type(ty)
        .unwrap();

    assert_eq!(to.type_count(), from.type_count());
    assert!(!imported.is_null());
}
