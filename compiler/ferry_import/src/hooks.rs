//! Caller-overridable import policy.

use ferry_ast::{Context, DeclId, DeclarationName, IdentifierNamespace, SourceLocation};

/// Policy hooks consulted during an import session.
///
/// Every method has a default; implement only what needs to change.
pub trait ImportHooks {
    /// Pick the name for a new declaration whose name clashes with
    /// `conflicts` in the target scope `dc`.
    ///
    /// The default keeps `name` and lets the declarations coexist. Returning
    /// [`DeclarationName::Empty`] rejects the import.
    fn handle_name_conflict(
        &mut self,
        to: &mut Context,
        name: DeclarationName,
        dc: DeclId,
        idns: IdentifierNamespace,
        conflicts: &[DeclId],
    ) -> DeclarationName {
        let _ = (to, dc, idns, conflicts);
        name
    }

    /// Translate a valid source location into the target's location space.
    ///
    /// Never fails. The default keeps the offset as is.
    fn import_source_location(&mut self, loc: SourceLocation) -> SourceLocation {
        loc
    }
}

/// Hooks with every default in place.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultHooks;

impl ImportHooks for DefaultHooks {}
