//! Name translation.
//!
//! Identifiers and selectors are re-interned by spelling. Constructor,
//! destructor and conversion names are rebuilt from the *imported* type,
//! canonicalized by the target, since canonical identity is per context.

use ferry_ast::{DeclarationName, Name, SelectorId};
use smallvec::SmallVec;

use crate::{ImportHooks, ImportResult, Importer};

impl<H: ImportHooks> Importer<'_, H> {
    /// Import a declaration name.
    ///
    /// Fails only when the type embedded in a special name fails to import.
    pub fn import_name(&mut self, name: DeclarationName) -> ImportResult<DeclarationName> {
        let imported = match name {
            DeclarationName::Empty => DeclarationName::Empty,
            DeclarationName::Identifier(ident) => {
                DeclarationName::Identifier(self.import_identifier(ident))
            }
            DeclarationName::ObjCSelector(selector) => {
                DeclarationName::ObjCSelector(self.import_selector(selector))
            }
            DeclarationName::CxxConstructor(ty) => {
                let ty = self.import_type(ty)?;
                self.to.constructor_name(ty)
            }
            DeclarationName::CxxDestructor(ty) => {
                let ty = self.import_type(ty)?;
                self.to.destructor_name(ty)
            }
            DeclarationName::CxxConversionFunction(ty) => {
                let ty = self.import_type(ty)?;
                self.to.conversion_function_name(ty)
            }
            DeclarationName::CxxOperator(op) => DeclarationName::CxxOperator(op),
            DeclarationName::CxxLiteralOperator(ident) => {
                DeclarationName::CxxLiteralOperator(self.import_identifier(ident))
            }
            // Stateless marker: nothing context-specific to carry over.
            DeclarationName::CxxUsingDirective => DeclarationName::CxxUsingDirective,
        };
        Ok(imported)
    }

    /// Re-intern an identifier in the target context.
    pub fn import_identifier(&mut self, ident: Name) -> Name {
        if ident.is_empty() {
            return Name::EMPTY;
        }
        let from = self.from;
        self.to.ident(from.ident_str(ident))
    }

    /// Re-intern a selector, piece by piece.
    pub fn import_selector(&mut self, selector: SelectorId) -> SelectorId {
        let from = self.from;
        let data = from.selector_data(selector);
        let pieces: SmallVec<[Name; 4]> = data
            .pieces
            .iter()
            .map(|&piece| self.import_identifier(piece))
            .collect();
        self.to.selector(data.num_args, &pieces)
    }
}
