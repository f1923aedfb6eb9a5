//! The analysis context: one program's type and declaration graphs.
//!
//! A [`Context`] owns four arenas (types, declarations, expressions,
//! nested-name-specifiers), the identifier and selector tables, and the
//! per-scope name lookup used by redeclaration checks. Handles from one
//! context are never valid in another.

mod format;
mod linkage;
mod types;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{
    Decl, DeclClass, DeclId, DeclKind, DeclarationName, Expr, ExprId, IdentifierTable,
    LangOptions, Name, NestedNameId, NestedNameSpecifier, QualType, SelectorData, SelectorId,
    SelectorTable, SourceLocation, StorageClass, TagKind, TypeSourceInfo, VarDecl,
};

pub use types::TypeNode;

/// Declarations sharing one name inside one scope.
type LookupResult = SmallVec<[DeclId; 2]>;

/// One program's analyzed state.
pub struct Context {
    lang: LangOptions,
    idents: IdentifierTable,
    selectors: SelectorTable,
    types: types::TypePool,
    decls: Vec<Decl>,
    exprs: Vec<Expr>,
    nested_names: Vec<NestedNameSpecifier>,
    nested_name_map: FxHashMap<NestedNameSpecifier, NestedNameId>,
    lookup: FxHashMap<(DeclId, DeclarationName), LookupResult>,
}

impl Context {
    /// Create an empty context holding only its translation unit and the
    /// pre-interned builtin types.
    pub fn new(lang: LangOptions) -> Self {
        let translation_unit = Decl {
            name: DeclarationName::Empty,
            context: DeclId::TRANSLATION_UNIT,
            loc: SourceLocation::INVALID,
            kind: DeclKind::TranslationUnit,
        };
        Context {
            lang,
            idents: IdentifierTable::new(),
            selectors: SelectorTable::new(),
            types: types::TypePool::with_builtins(),
            decls: vec![translation_unit],
            exprs: Vec::new(),
            nested_names: Vec::new(),
            nested_name_map: FxHashMap::default(),
            lookup: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn lang(&self) -> &LangOptions {
        &self.lang
    }

    // Identifiers and selectors

    /// Intern an identifier spelling.
    pub fn ident(&mut self, spelling: &str) -> Name {
        self.idents.intern(spelling)
    }

    /// Intern an identifier and wrap it as a declaration name.
    pub fn identifier_name(&mut self, spelling: &str) -> DeclarationName {
        DeclarationName::from(self.ident(spelling))
    }

    pub fn ident_str(&self, name: Name) -> &str {
        self.idents.lookup(name)
    }

    pub fn idents(&self) -> &IdentifierTable {
        &self.idents
    }

    /// Intern a selector from its keyword pieces.
    pub fn selector(&mut self, num_args: u32, pieces: &[Name]) -> SelectorId {
        self.selectors.intern(num_args, pieces)
    }

    pub fn selector_data(&self, id: SelectorId) -> &SelectorData {
        self.selectors.get(id)
    }

    // Special names

    /// The constructor name for a class type. Always built from the
    /// canonical, unqualified form of `class` in this context.
    pub fn constructor_name(&self, class: QualType) -> DeclarationName {
        DeclarationName::CxxConstructor(self.canonical_type(class).unqualify())
    }

    pub fn destructor_name(&self, class: QualType) -> DeclarationName {
        DeclarationName::CxxDestructor(self.canonical_type(class).unqualify())
    }

    pub fn conversion_function_name(&self, target: QualType) -> DeclarationName {
        DeclarationName::CxxConversionFunction(self.canonical_type(target).unqualify())
    }

    // Declarations

    #[inline]
    pub fn translation_unit(&self) -> DeclId {
        DeclId::TRANSLATION_UNIT
    }

    /// Get a declaration.
    ///
    /// # Panics
    /// Panics if `id` did not come from this context.
    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    /// Get a variable declaration, or `None` for any other kind.
    pub fn var(&self, id: DeclId) -> Option<&VarDecl> {
        self.decl(id).as_var()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Declarations named `name` directly inside `dc`, in declaration order.
    pub fn lookup(&self, dc: DeclId, name: DeclarationName) -> &[DeclId] {
        self.lookup.get(&(dc, name)).map_or(&[], |found| found.as_slice())
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "declaration count bounded well below u32::MAX"
    )]
    fn add_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::from_raw(self.decls.len() as u32);
        if !decl.name.is_empty() {
            self.lookup
                .entry((decl.context, decl.name))
                .or_default()
                .push(id);
        }
        self.decls.push(decl);
        id
    }

    pub fn create_var(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        ty: QualType,
        type_source: Option<TypeSourceInfo>,
        storage: StorageClass,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Var(VarDecl {
                ty,
                type_source,
                storage,
                init: None,
                is_param: false,
            }),
        })
    }

    pub fn create_param(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        ty: QualType,
        type_source: Option<TypeSourceInfo>,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Var(VarDecl {
                ty,
                type_source,
                storage: StorageClass::None,
                init: None,
                is_param: true,
            }),
        })
    }

    pub fn create_function(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        ty: QualType,
        storage: StorageClass,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Function {
                ty,
                storage,
                params: Vec::new(),
            },
        })
    }

    pub fn create_typedef(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        underlying: QualType,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Typedef { underlying },
        })
    }

    pub fn create_record(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        tag: TagKind,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Record { tag },
        })
    }

    pub fn create_enum(&mut self, dc: DeclId, loc: SourceLocation, name: DeclarationName) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Enum,
        })
    }

    /// Create a namespace. An empty name makes it anonymous.
    pub fn create_namespace(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::Namespace,
        })
    }

    pub fn create_objc_interface(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::ObjCInterface,
        })
    }

    pub fn create_objc_protocol(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::ObjCProtocol,
        })
    }

    pub fn create_class_template(
        &mut self,
        dc: DeclId,
        loc: SourceLocation,
        name: DeclarationName,
        pattern: DeclId,
    ) -> DeclId {
        self.add_decl(Decl {
            name,
            context: dc,
            loc,
            kind: DeclKind::ClassTemplate { pattern },
        })
    }

    /// Attach an initializer to a variable. No-op for other kinds.
    pub fn set_init(&mut self, var: DeclId, init: ExprId) {
        if let DeclKind::Var(data) = &mut self.decls[var.index()].kind {
            data.init = Some(init);
        }
    }

    /// Attach parameters to a function. No-op for other kinds.
    pub fn set_params(&mut self, function: DeclId, new_params: Vec<DeclId>) {
        if let DeclKind::Function { params, .. } = &mut self.decls[function.index()].kind {
            *params = new_params;
        }
    }

    /// Whether `dc` is a file-level scope (translation unit or namespace).
    pub fn is_file_context(&self, dc: DeclId) -> bool {
        self.decl(dc).class().is_file_context()
    }

    /// Whether `id` names a variable declared at file or namespace scope.
    pub fn is_file_var_decl(&self, id: DeclId) -> bool {
        let decl = self.decl(id);
        match decl.as_var() {
            Some(var) => !var.is_param && self.is_file_context(decl.context),
            None => false,
        }
    }

    /// The redeclaration of variable `id` that carries its initializer.
    ///
    /// File-scope redeclarations share a scope and a name, so the search
    /// only walks that one lookup entry.
    pub fn var_definition(&self, id: DeclId) -> Option<DeclId> {
        let decl = self.decl(id);
        if decl.as_var()?.has_definition() {
            return Some(id);
        }
        if !self.is_file_var_decl(id) {
            return None;
        }
        self.lookup(decl.context, decl.name)
            .iter()
            .copied()
            .find(|&other| self.var(other).is_some_and(VarDecl::has_definition))
    }

    /// Whether `dc` sits inside an anonymous namespace.
    pub fn is_in_anonymous_namespace(&self, mut dc: DeclId) -> bool {
        loop {
            let decl = self.decl(dc);
            if decl.class() == DeclClass::Namespace && decl.name.is_empty() {
                return true;
            }
            if dc == DeclId::TRANSLATION_UNIT {
                return false;
            }
            dc = decl.context;
        }
    }

    // Expressions

    #[allow(
        clippy::cast_possible_truncation,
        reason = "expression count bounded well below u32::MAX"
    )]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::from_raw(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // Nested-name-specifiers

    /// Intern a nested-name-specifier component.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "specifier count bounded well below u32::MAX"
    )]
    pub fn nested_name(&mut self, spec: NestedNameSpecifier) -> NestedNameId {
        if let Some(&id) = self.nested_name_map.get(&spec) {
            return id;
        }
        let id = NestedNameId::from_raw(self.nested_names.len() as u32);
        self.nested_names.push(spec);
        self.nested_name_map.insert(spec, id);
        id
    }

    #[inline]
    pub fn nested_name_specifier(&self, id: NestedNameId) -> NestedNameSpecifier {
        self.nested_names[id.index()]
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(LangOptions::default())
    }
}
