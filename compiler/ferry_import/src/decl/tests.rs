use ferry_ast::{
    ArrayShape, Context, DeclClass, DeclId, DeclKind, DeclarationName, Expr, ExprKind,
    FunctionProto, IdentifierNamespace, LangOptions, QualType, SourceLocation, StorageClass,
    TagKind, TypeId,
};
use ferry_diagnostic::{DiagId, Severity};
use pretty_assertions::assert_eq;

use crate::importer::tests::{extern_var, int, Fixture};
use crate::{ImportError, ImportHooks};

fn int_literal(ctx: &mut Context, value: u128, offset: u32) -> ferry_ast::ExprId {
    ctx.alloc_expr(Expr::new(
        ExprKind::IntegerLiteral(value),
        int(),
        SourceLocation::new(offset),
    ))
}

#[test]
fn extern_declarations_merge() {
    let mut fx = Fixture::c99();
    let from_x = extern_var(&mut fx.from, "x", int(), 10);
    let to_x = extern_var(&mut fx.to, "x", int(), 50);
    let decls_before = fx.to.decl_count();
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_x), Ok(to_x));
    assert_eq!(importer.to_context().decl_count(), decls_before);
    assert!(fx.to_diags.is_empty());
    assert!(fx.from_diags.is_empty());
}

#[test]
fn incomplete_array_merges_with_sized_array_in_c() {
    let mut fx = Fixture::c99();
    let from_array = fx.from.incomplete_array_type(ArrayShape::new(int()));
    let from_a = extern_var(&mut fx.from, "a", QualType::unqualified(from_array), 10);
    let to_array = fx.to.constant_array_type(ArrayShape::new(int()), 4);
    let to_a = extern_var(&mut fx.to, "a", QualType::unqualified(to_array), 50);
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_a), Ok(to_a));
}

#[test]
fn type_mismatch_reports_both_sides_and_creates_new_decl() {
    let mut fx = Fixture::c99();
    let from_x = extern_var(&mut fx.from, "x", int(), 10);
    let to_x = extern_var(&mut fx.to, "x", QualType::unqualified(TypeId::FLOAT), 50);
    let mut importer = fx.importer();

    let Ok(imported) = importer.import_decl(from_x) else {
        panic!("mismatched variable import failed");
    };

    assert_ne!(imported, to_x);
    assert_eq!(fx.to.lookup(DeclId::TRANSLATION_UNIT, fx.to.decl(to_x).name).len(), 2);

    let errors = fx.to_diags.diagnostics();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].id, DiagId::ErrOdrVariableTypeInconsistent);
    assert_eq!(errors[0].loc, SourceLocation::new(50));
    assert_eq!(
        errors[0].message(),
        "external variable 'x' declared with incompatible types in different translation units ('int' vs. 'float')"
    );

    let notes = fx.from_diags.diagnostics();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Note);
    assert_eq!(notes[0].loc, SourceLocation::new(10));
    assert_eq!(notes[0].message(), "declared here with type 'int'");
}

#[test]
fn static_variables_never_merge() {
    let mut fx = Fixture::c99();
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("x");
    let from_x = fx
        .from
        .create_var(tu, SourceLocation::new(10), name, int(), None, StorageClass::Static);
    let to_x = extern_var(&mut fx.to, "x", int(), 50);
    let mut importer = fx.importer();

    let imported = importer.import_decl(from_x);

    assert!(imported.is_ok());
    assert_ne!(imported, Ok(to_x));
    assert!(fx.to_diags.is_empty());
}

#[test]
fn local_variables_are_always_new() {
    let mut fx = Fixture::c99();
    let from_tu = fx.from.translation_unit();
    let f_name = fx.from.identifier_name("f");
    let fn_ty = fx.from.function_type(FunctionProto::new(int(), Vec::new()));
    let from_f = fx.from.create_function(
        from_tu,
        SourceLocation::new(1),
        f_name,
        QualType::unqualified(fn_ty),
        StorageClass::None,
    );
    let local_name = fx.from.identifier_name("tmp");
    let from_local =
        fx.from
            .create_var(from_f, SourceLocation::new(5), local_name, int(), None, StorageClass::None);

    let mut importer = fx.importer();
    let first = importer.import_decl(from_local);
    let to_f = importer.imported().decl(from_f);

    let Ok(local) = first else {
        panic!("local import failed");
    };
    assert_eq!(Some(fx.to.decl(local).context), to_f);
    assert_eq!(fx.to.decl(local).class(), DeclClass::Var);
}

#[test]
fn duplicate_definition_reports_and_keeps_existing_init() {
    let mut fx = Fixture::c99();
    let from_x = extern_var(&mut fx.from, "x", int(), 10);
    let from_init = int_literal(&mut fx.from, 1, 12);
    fx.from.set_init(from_x, from_init);
    let to_x = extern_var(&mut fx.to, "x", int(), 50);
    let to_init = int_literal(&mut fx.to, 2, 52);
    fx.to.set_init(to_x, to_init);
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_x), Ok(to_x));
    assert_eq!(fx.to.var(to_x).and_then(|var| var.init), Some(to_init));

    assert_eq!(fx.to_diags.count_of(DiagId::ErrOdrVariableMultipleDef), 1);
    assert_eq!(fx.to_diags.diagnostics()[0].loc, SourceLocation::new(50));
    assert_eq!(
        fx.to_diags.diagnostics()[0].message(),
        "external variable 'x' defined in multiple translation units"
    );
    assert_eq!(fx.from_diags.count_of(DiagId::NoteOdrDefinedHere), 1);
    assert_eq!(fx.from_diags.diagnostics()[0].loc, SourceLocation::new(10));
}

#[test]
fn merge_brings_definition_into_declaration() {
    let mut fx = Fixture::c99();
    let from_x = extern_var(&mut fx.from, "x", int(), 10);
    let from_init = int_literal(&mut fx.from, 7, 12);
    fx.from.set_init(from_x, from_init);
    let to_x = extern_var(&mut fx.to, "x", int(), 50);
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_x), Ok(to_x));

    let Some(init) = fx.to.var(to_x).and_then(|var| var.init) else {
        panic!("merged declaration has no initializer");
    };
    assert_eq!(fx.to.expr(init).kind, ExprKind::IntegerLiteral(7));
    assert!(fx.to_diags.is_empty());
}

#[test]
fn definition_found_on_source_redeclaration() {
    let mut fx = Fixture::c99();
    let decl = extern_var(&mut fx.from, "x", int(), 10);
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("x");
    let def = fx
        .from
        .create_var(tu, SourceLocation::new(20), name, int(), None, StorageClass::None);
    let init = int_literal(&mut fx.from, 3, 22);
    fx.from.set_init(def, init);
    let mut importer = fx.importer();

    let Ok(imported) = importer.import_decl(decl) else {
        panic!("declaration import failed");
    };

    assert!(fx.to.var(imported).and_then(|var| var.init).is_some());
}

#[test]
fn declaration_then_definition_in_one_session_is_not_a_redefinition() {
    let mut fx = Fixture::c99();
    let from_decl = extern_var(&mut fx.from, "x", int(), 10);
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("x");
    let from_def = fx
        .from
        .create_var(tu, SourceLocation::new(20), name, int(), None, StorageClass::None);
    let init = int_literal(&mut fx.from, 3, 22);
    fx.from.set_init(from_def, init);
    let to_x = extern_var(&mut fx.to, "x", int(), 50);
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_decl), Ok(to_x));
    assert_eq!(importer.import_decl(from_def), Ok(to_x));

    let Some(to_init) = fx.to.var(to_x).and_then(|var| var.init) else {
        panic!("merged declaration has no initializer");
    };
    assert_eq!(fx.to.expr(to_init).kind, ExprKind::IntegerLiteral(3));
    assert!(fx.to_diags.is_empty());
    assert!(fx.from_diags.is_empty());
}

#[test]
fn self_referential_initializer_resolves_to_new_decl() {
    let mut fx = Fixture::c99();
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("p");
    let void_ptr = fx.from.pointer_type(QualType::unqualified(TypeId::VOID));
    let from_p = fx.from.create_var(
        tu,
        SourceLocation::new(1),
        name,
        QualType::unqualified(void_ptr),
        None,
        StorageClass::None,
    );
    let self_ref = fx.from.alloc_expr(Expr::new(
        ExprKind::DeclRef(from_p),
        QualType::unqualified(void_ptr),
        SourceLocation::new(12),
    ));
    let addr = fx.from.alloc_expr(Expr::new(
        ExprKind::Unary {
            op: ferry_ast::UnaryOp::AddrOf,
            operand: self_ref,
        },
        QualType::unqualified(void_ptr),
        SourceLocation::new(11),
    ));
    fx.from.set_init(from_p, addr);
    let mut importer = fx.importer();

    let Ok(to_p) = importer.import_decl(from_p) else {
        panic!("self-referential import failed");
    };

    let Some(init) = fx.to.var(to_p).and_then(|var| var.init) else {
        panic!("initializer dropped");
    };
    let ExprKind::Unary { operand, .. } = fx.to.expr(init).kind else {
        panic!("expected address-of");
    };
    assert!(fx.to.expr(operand).refers_to(to_p));
}

#[test]
fn failing_initializer_keeps_declaration() {
    let mut fx = Fixture::new(LangOptions::cplusplus(), LangOptions::cplusplus());
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("n");
    let from_n = fx
        .from
        .create_var(tu, SourceLocation::new(1), name, int(), None, StorageClass::None);
    let t = fx.from.ident("T");
    let dependent = fx.from.alloc_expr(Expr::new(
        ExprKind::DependentScopeRef(t),
        int(),
        SourceLocation::new(4),
    ));
    fx.from.set_init(from_n, dependent);
    let mut importer = fx.importer();

    let Ok(to_n) = importer.import_decl(from_n) else {
        panic!("declaration should survive a failing initializer");
    };

    assert_eq!(fx.to.var(to_n).and_then(|var| var.init), None);
}

#[test]
fn class_templates_are_unsupported() {
    let mut fx = Fixture::new(LangOptions::cplusplus(), LangOptions::cplusplus());
    let tu = fx.from.translation_unit();
    let name = fx.from.identifier_name("vector");
    let pattern = fx.from.create_record(tu, SourceLocation::new(1), name, TagKind::Class);
    let template = fx
        .from
        .create_class_template(tu, SourceLocation::new(1), name, pattern);
    let mut importer = fx.importer();

    assert_eq!(
        importer.import_decl(template),
        Err(ImportError::UnsupportedDecl(DeclClass::ClassTemplate))
    );
}

#[test]
fn equivalent_typedef_is_reused_and_different_one_coexists() {
    let mut fx = Fixture::c99();
    let from_tu = fx.from.translation_unit();
    let same_name = fx.from.identifier_name("word");
    let other_name = fx.from.identifier_name("half");
    let from_word = fx.from.create_typedef(from_tu, SourceLocation::new(1), same_name, int());
    let from_half = fx.from.create_typedef(
        from_tu,
        SourceLocation::new(2),
        other_name,
        QualType::unqualified(TypeId::SHORT),
    );

    let to_tu = fx.to.translation_unit();
    let to_word_name = fx.to.identifier_name("word");
    let to_half_name = fx.to.identifier_name("half");
    let to_word = fx.to.create_typedef(to_tu, SourceLocation::new(30), to_word_name, int());
    let to_half = fx.to.create_typedef(to_tu, SourceLocation::new(31), to_half_name, int());
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_word), Ok(to_word));
    let Ok(imported_half) = importer.import_decl(from_half) else {
        panic!("conflicting typedef import failed");
    };

    assert_ne!(imported_half, to_half);
    assert_eq!(fx.to.lookup(to_tu, to_half_name).len(), 2);
}

#[test]
fn struct_and_class_tags_are_equivalent() {
    let mut fx = Fixture::new(LangOptions::cplusplus(), LangOptions::cplusplus());
    let from_tu = fx.from.translation_unit();
    let from_name = fx.from.identifier_name("Widget");
    let from_widget = fx.from.create_record(from_tu, SourceLocation::new(1), from_name, TagKind::Class);
    let to_tu = fx.to.translation_unit();
    let to_name = fx.to.identifier_name("Widget");
    let to_widget = fx.to.create_record(to_tu, SourceLocation::new(9), to_name, TagKind::Struct);
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_widget), Ok(to_widget));
}

#[test]
fn tags_and_ordinary_names_do_not_collide() {
    let mut fx = Fixture::c99();
    let from_tu = fx.from.translation_unit();
    let from_name = fx.from.identifier_name("stat");
    let from_record = fx.from.create_record(from_tu, SourceLocation::new(1), from_name, TagKind::Struct);
    let to_tu = fx.to.translation_unit();
    let to_name = fx.to.identifier_name("stat");
    let fn_ty = fx.to.function_no_proto_type(int(), ferry_ast::FunctionExt::default());
    fx.to.create_function(
        to_tu,
        SourceLocation::new(3),
        to_name,
        QualType::unqualified(fn_ty),
        StorageClass::Extern,
    );

    let mut rejecting = fx.importer().with_hooks(RejectAll::default());
    let imported = rejecting.import_decl(from_record);

    assert!(imported.is_ok());
    assert_eq!(rejecting.hooks().calls, 0);
}

#[test]
fn function_parameters_are_imported_into_the_function() {
    let mut fx = Fixture::c99();
    let from_tu = fx.from.translation_unit();
    let f_name = fx.from.identifier_name("add");
    let fn_ty = fx.from.function_type(FunctionProto::new(int(), vec![int(), int()]));
    let from_f = fx.from.create_function(
        from_tu,
        SourceLocation::new(1),
        f_name,
        QualType::unqualified(fn_ty),
        StorageClass::None,
    );
    let mut params = Vec::new();
    for (name, offset) in [("lhs", 9), ("rhs", 18)] {
        let name = fx.from.identifier_name(name);
        params.push(fx.from.create_param(from_f, SourceLocation::new(offset), name, int(), None));
    }
    fx.from.set_params(from_f, params);
    let mut importer = fx.importer();

    let Ok(to_f) = importer.import_decl(from_f) else {
        panic!("function import failed");
    };

    let DeclKind::Function { params, .. } = &fx.to.decl(to_f).kind else {
        panic!("expected a function");
    };
    assert_eq!(params.len(), 2);
    for &param in params {
        assert_eq!(fx.to.decl(param).context, to_f);
        assert_eq!(fx.to.decl(param).class(), DeclClass::ParmVar);
    }
    assert_eq!(fx.to.format_name(fx.to.decl(params[1]).name), "rhs");
}

#[test]
fn parameter_imported_before_its_function_is_not_duplicated() {
    let mut fx = Fixture::c99();
    let from_tu = fx.from.translation_unit();
    let f_name = fx.from.identifier_name("f");
    let fn_ty = fx.from.function_type(FunctionProto::new(int(), vec![int()]));
    let from_f = fx.from.create_function(
        from_tu,
        SourceLocation::new(1),
        f_name,
        QualType::unqualified(fn_ty),
        StorageClass::None,
    );
    let n_name = fx.from.identifier_name("n");
    let from_n = fx.from.create_param(from_f, SourceLocation::new(7), n_name, int(), None);
    fx.from.set_params(from_f, vec![from_n]);
    let decls_before = fx.to.decl_count();
    let mut importer = fx.importer();

    let Ok(to_n) = importer.import_decl(from_n) else {
        panic!("parameter import failed");
    };
    let Ok(to_f) = importer.import_decl(from_f) else {
        panic!("function import failed");
    };

    assert_eq!(importer.import_decl(from_n), Ok(to_n));
    assert_eq!(importer.imported().decl(from_n), Some(to_n));
    assert_eq!(fx.to.decl_count(), decls_before + 2);
    assert_eq!(fx.to.decl(to_n).context, to_f);
    let DeclKind::Function { params, .. } = &fx.to.decl(to_f).kind else {
        panic!("expected a function");
    };
    assert_eq!(params, &vec![to_n]);
}

#[test]
fn namespaces_are_reused_by_name() {
    let mut fx = Fixture::new(LangOptions::cplusplus(), LangOptions::cplusplus());
    let from_tu = fx.from.translation_unit();
    let from_ns_name = fx.from.identifier_name("io");
    let from_ns = fx.from.create_namespace(from_tu, SourceLocation::new(1), from_ns_name);
    let from_x = {
        let name = fx.from.identifier_name("x");
        fx.from
            .create_var(from_ns, SourceLocation::new(4), name, int(), None, StorageClass::Extern)
    };
    let to_tu = fx.to.translation_unit();
    let to_ns_name = fx.to.identifier_name("io");
    let to_ns = fx.to.create_namespace(to_tu, SourceLocation::new(20), to_ns_name);
    let to_x = {
        let name = fx.to.identifier_name("x");
        fx.to
            .create_var(to_ns, SourceLocation::new(24), name, int(), None, StorageClass::Extern)
    };
    let mut importer = fx.importer();

    assert_eq!(importer.import_decl(from_x), Ok(to_x));
    assert_eq!(importer.imported().decl(from_ns), Some(to_ns));
}

#[test]
fn anonymous_namespace_variables_do_not_merge() {
    let mut fx = Fixture::new(LangOptions::cplusplus(), LangOptions::cplusplus());
    let from_tu = fx.from.translation_unit();
    let from_ns = fx
        .from
        .create_namespace(from_tu, SourceLocation::new(1), DeclarationName::Empty);
    let from_x = {
        let name = fx.from.identifier_name("x");
        fx.from
            .create_var(from_ns, SourceLocation::new(4), name, int(), None, StorageClass::None)
    };
    let mut importer = fx.importer();

    let Ok(first) = importer.import_decl(from_x) else {
        panic!("anonymous namespace import failed");
    };

    assert!(importer.to_context().is_in_anonymous_namespace(importer.to_context().decl(first).context));
    assert!(!importer.to_context().linkage(first).is_external());
}

/// Rejects every conflict and counts how often it was asked.
#[derive(Default)]
struct RejectAll {
    calls: usize,
}

impl ImportHooks for RejectAll {
    fn handle_name_conflict(
        &mut self,
        _to: &mut Context,
        _name: DeclarationName,
        _dc: DeclId,
        _idns: IdentifierNamespace,
        _conflicts: &[DeclId],
    ) -> DeclarationName {
        self.calls += 1;
        DeclarationName::Empty
    }
}

#[test]
fn rejecting_hook_fails_the_import() {
    let mut fx = Fixture::c99();
    let from_x = extern_var(&mut fx.from, "x", int(), 10);
    extern_var(&mut fx.to, "x", QualType::unqualified(TypeId::DOUBLE), 50);
    let mut importer = fx.importer().with_hooks(RejectAll::default());

    assert_eq!(
        importer.import_decl(from_x),
        Err(ImportError::NameConflictRejected("x".to_owned()))
    );
    assert_eq!(importer.hooks().calls, 1);
}
