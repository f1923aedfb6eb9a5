//! The import session.

use ferry_ast::{Context, DeclId, Dialect, SourceLocation};
use ferry_diagnostic::{DiagId, DiagnosticBuilder, DiagnosticSink};

use crate::{
    DefaultHooks, DialectPolicy, ImportError, ImportHooks, ImportOptions, ImportResult,
    ImportedMap,
};

/// One import session between a source ("from") and a target ("to")
/// context.
///
/// The session borrows both contexts and both diagnostic sinks for its
/// whole lifetime, so nothing else can mutate the target while scope
/// lookups and insertions are in flight. All entry points are idempotent
/// per source node through the session's [`ImportedMap`].
pub struct Importer<'a, H = DefaultHooks> {
    pub(crate) to: &'a mut Context,
    pub(crate) to_diags: &'a mut DiagnosticSink,
    pub(crate) from: &'a Context,
    pub(crate) from_diags: &'a mut DiagnosticSink,
    pub(crate) imported: ImportedMap,
    pub(crate) options: ImportOptions,
    pub(crate) hooks: H,
}

impl<'a> Importer<'a> {
    pub fn new(
        to: &'a mut Context,
        to_diags: &'a mut DiagnosticSink,
        from: &'a Context,
        from_diags: &'a mut DiagnosticSink,
    ) -> Self {
        Importer {
            to,
            to_diags,
            from,
            from_diags,
            imported: ImportedMap::new(),
            options: ImportOptions::default(),
            hooks: DefaultHooks,
        }
    }
}

impl<'a, H: ImportHooks> Importer<'a, H> {
    /// Replace the session's hooks.
    pub fn with_hooks<H2: ImportHooks>(self, hooks: H2) -> Importer<'a, H2> {
        Importer {
            to: self.to,
            to_diags: self.to_diags,
            from: self.from,
            from_diags: self.from_diags,
            imported: self.imported,
            options: self.options,
            hooks,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Continue from the mappings of an earlier session between the same
    /// two contexts.
    #[must_use]
    pub fn with_imported_map(mut self, imported: ImportedMap) -> Self {
        self.imported = imported;
        self
    }

    /// End the session, keeping its mappings.
    pub fn into_imported_map(self) -> ImportedMap {
        self.imported
    }

    pub fn imported(&self) -> &ImportedMap {
        &self.imported
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub fn to_context(&self) -> &Context {
        &*self.to
    }

    pub fn from_context(&self) -> &Context {
        self.from
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Report a diagnostic against the target context.
    pub fn to_diag(&mut self, loc: SourceLocation, id: DiagId) -> DiagnosticBuilder<'_> {
        self.to_diags.report(loc, id)
    }

    /// Report a diagnostic against the source context.
    pub fn from_diag(&mut self, loc: SourceLocation, id: DiagId) -> DiagnosticBuilder<'_> {
        self.from_diags.report(loc, id)
    }

    /// Import the scope that owns a declaration.
    pub fn import_context(&mut self, dc: DeclId) -> ImportResult<DeclId> {
        let class = self.from.decl(dc).class();
        if !class.is_decl_context() {
            return Err(ImportError::UnsupportedDecl(class));
        }
        self.import_decl(dc)
    }

    /// Check that the target enables `dialect` before importing `construct`.
    pub(crate) fn require_dialect(
        &self,
        construct: &'static str,
        dialect: Dialect,
    ) -> ImportResult<()> {
        if self.to.lang().supports(dialect) {
            return Ok(());
        }
        match self.options.dialect_policy {
            DialectPolicy::Unchecked => {
                tracing::debug!(
                    construct,
                    %dialect,
                    "target context lacks dialect support, importing anyway"
                );
                Ok(())
            }
            DialectPolicy::Strict => Err(ImportError::DialectMismatch { construct, dialect }),
        }
    }
}
