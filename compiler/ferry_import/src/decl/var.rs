//! The variable merge engine.
//!
//! File-scope variables with external linkage are merged with a compatible
//! external variable of the same name already in the target scope, so two
//! translation units declaring `extern int x;` end up sharing one node.
//! Incompatible candidates are reported as ODR violations against both
//! contexts. Local variables never merge.

use ferry_ast::{Decl, DeclId, DeclarationName, IdentifierNamespace, QualType, VarDecl};
use ferry_diagnostic::DiagId;
use smallvec::SmallVec;

use crate::{ImportHooks, ImportResult, Importer};

/// Outcome of scanning the target scope for a variable to merge with.
enum MergeScan {
    Merge(DeclId),
    Conflicts(SmallVec<[DeclId; 4]>),
}

impl<H: ImportHooks> Importer<'_, H> {
    pub(super) fn import_var(
        &mut self,
        id: DeclId,
        decl: &Decl,
        var: &VarDecl,
    ) -> ImportResult<DeclId> {
        let dc = self.import_context(decl.context)?;
        let mut name = self.import_name(decl.name)?;
        let ty = self.import_type(var.ty)?;
        let loc = self.import_source_location(decl.loc);
        // Importing the scope can pull this variable in (a function imports
        // its parameters), and so can a `typeof` in its type.
        if let Some(to) = self.imported.decl(id) {
            return Ok(to);
        }

        if self.from.is_file_var_decl(id) && !name.is_empty() {
            match self.scan_for_merge(id, decl, var, dc, name, ty) {
                MergeScan::Merge(found) => return self.merge_var(id, found, name),
                MergeScan::Conflicts(conflicts) if !conflicts.is_empty() => {
                    name = self.resolve_name_conflict(
                        name,
                        dc,
                        IdentifierNamespace::ORDINARY,
                        &conflicts,
                    )?;
                }
                MergeScan::Conflicts(_) => {}
            }
        }

        let type_source = var
            .type_source
            .map(|info| self.import_type_source_info(info))
            .transpose()?;

        let to_var = if var.is_param {
            self.to.create_param(dc, loc, name, ty, type_source)
        } else {
            self.to
                .create_var(dc, loc, name, ty, type_source, var.storage)
        };
        // Registered before the initializer so a self-reference resolves here.
        self.imported.insert_decl(id, to_var);

        if let Some(init) = self.from.var_definition(id).and_then(|def| self.from.var(def)?.init) {
            match self.import_expr(init) {
                Ok(to_init) => self.to.set_init(to_var, to_init),
                Err(error) => tracing::debug!(
                    %error,
                    var = ?to_var,
                    "initializer not imported, keeping declaration without it"
                ),
            }
        }
        Ok(to_var)
    }

    /// Look for a compatible external variable named `name` in `dc`,
    /// reporting incompatible ones as they are found.
    fn scan_for_merge(
        &mut self,
        id: DeclId,
        decl: &Decl,
        var: &VarDecl,
        dc: DeclId,
        name: DeclarationName,
        ty: QualType,
    ) -> MergeScan {
        let from_external = self.from.linkage(id).is_external();
        let found_decls: SmallVec<[DeclId; 4]> = self.to.lookup(dc, name).iter().copied().collect();
        let mut conflicts = SmallVec::new();

        for found in found_decls {
            let found_decl = self.to.decl(found);
            if !found_decl.is_in_identifier_namespace(IdentifierNamespace::ORDINARY) {
                continue;
            }

            if let Some(found_var) = found_decl.as_var() {
                if from_external && self.to.linkage(found).is_external() {
                    if self.to.types_are_compatible(ty, found_var.ty) {
                        return MergeScan::Merge(found);
                    }

                    let found_ty = found_var.ty;
                    let found_loc = found_decl.loc;
                    let name_text = self.to.format_name(name);
                    let ty_text = self.to.format_type(ty);
                    let found_ty_text = self.to.format_type(found_ty);
                    tracing::debug!(
                        name = %name_text,
                        imported = %ty_text,
                        existing = %found_ty_text,
                        "external variable type mismatch"
                    );
                    self.to_diag(found_loc, DiagId::ErrOdrVariableTypeInconsistent)
                        .arg(name_text)
                        .arg(ty_text)
                        .arg(found_ty_text)
                        .emit();
                    let from_ty_text = self.from.format_type(var.ty);
                    self.from_diag(decl.loc, DiagId::NoteOdrValueHere)
                        .arg(from_ty_text)
                        .emit();
                }
            }
            conflicts.push(found);
        }
        MergeScan::Conflicts(conflicts)
    }

    /// Alias the source variable to `found` and reconcile definitions.
    fn merge_var(&mut self, id: DeclId, found: DeclId, name: DeclarationName) -> ImportResult<DeclId> {
        self.imported.insert_decl(id, found);
        tracing::debug!(from = ?id, to = ?found, "merged external variable");

        let Some(from_def) = self.from.var_definition(id) else {
            return Ok(found);
        };

        let from_init = self.from.var(from_def).and_then(|def| def.init);

        if let Some(existing_def) = self.to.var_definition(found) {
            // A redeclaration imported earlier this session already brought
            // this very initializer over.
            let adopted = from_init.and_then(|init| self.imported.expr(init));
            if adopted.is_some() && adopted == self.to.var(existing_def).and_then(|def| def.init) {
                return Ok(found);
            }
            let existing_loc = self.to.decl(existing_def).loc;
            let name_text = self.to.format_name(name);
            self.to_diag(existing_loc, DiagId::ErrOdrVariableMultipleDef)
                .arg(name_text)
                .emit();
            let from_def_loc = self.from.decl(from_def).loc;
            self.from_diag(from_def_loc, DiagId::NoteOdrDefinedHere).emit();
            return Ok(found);
        }

        if let Some(init) = from_init {
            match self.import_expr(init) {
                Ok(to_init) => self.to.set_init(found, to_init),
                Err(error) => tracing::debug!(
                    %error,
                    var = ?found,
                    "initializer not imported, merged declaration keeps none"
                ),
            }
        }
        Ok(found)
    }
}
