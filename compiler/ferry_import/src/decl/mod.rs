//! Declaration translation.
//!
//! Variables go through the merge engine in [`var`]. Every other supported
//! kind is found by name and shape in the imported scope, or created.

mod other;
mod var;

use ferry_ast::{DeclId, DeclKind, DeclarationName, IdentifierNamespace};

use crate::stack::ensure_sufficient_stack;
use crate::{ImportError, ImportHooks, ImportResult, Importer};

impl<H: ImportHooks> Importer<'_, H> {
    /// Import a declaration.
    ///
    /// Returns the mapped target declaration if this source declaration was
    /// imported (or merged) before in this session.
    #[tracing::instrument(level = "trace", skip_all, fields(decl = ?id))]
    pub fn import_decl(&mut self, id: DeclId) -> ImportResult<DeclId> {
        if let Some(to) = self.imported.decl(id) {
            return Ok(to);
        }
        ensure_sufficient_stack(|| self.import_decl_node(id))
    }

    fn import_decl_node(&mut self, id: DeclId) -> ImportResult<DeclId> {
        let from = self.from;
        let decl = from.decl(id);
        match &decl.kind {
            DeclKind::TranslationUnit => {
                let to = self.to.translation_unit();
                self.imported.insert_decl(id, to);
                Ok(to)
            }
            DeclKind::Var(var) => self.import_var(id, decl, var),
            DeclKind::ClassTemplate { .. } => Err(ImportError::UnsupportedDecl(decl.class())),
            DeclKind::Namespace
            | DeclKind::Function { .. }
            | DeclKind::Typedef { .. }
            | DeclKind::Record { .. }
            | DeclKind::Enum
            | DeclKind::ObjCInterface
            | DeclKind::ObjCProtocol => self.import_named_decl(id, decl),
        }
    }

    /// Ask the hooks to settle a clash between a new declaration and
    /// existing ones. An empty answer rejects the import.
    fn resolve_name_conflict(
        &mut self,
        name: DeclarationName,
        dc: DeclId,
        idns: IdentifierNamespace,
        conflicts: &[DeclId],
    ) -> ImportResult<DeclarationName> {
        tracing::debug!(
            name = %self.to.format_name(name),
            conflicts = conflicts.len(),
            "name conflict in target scope"
        );
        let resolved = self
            .hooks
            .handle_name_conflict(self.to, name, dc, idns, conflicts);
        if resolved.is_empty() {
            return Err(ImportError::NameConflictRejected(self.to.format_name(name)));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests;
