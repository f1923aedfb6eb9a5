//! Locations, ranges, type-source info and nested-name-specifiers.

use ferry_ast::{NestedNameId, NestedNameSpecifier, QualType, SourceLocation, SourceRange, TypeSourceInfo};

use crate::{ImportHooks, ImportResult, Importer};

impl<H: ImportHooks> Importer<'_, H> {
    /// Translate a source location. Never fails; invalid stays invalid.
    pub fn import_source_location(&mut self, loc: SourceLocation) -> SourceLocation {
        if !loc.is_valid() {
            return SourceLocation::INVALID;
        }
        self.hooks.import_source_location(loc)
    }

    pub fn import_source_range(&mut self, range: SourceRange) -> SourceRange {
        SourceRange::new(
            self.import_source_location(range.begin),
            self.import_source_location(range.end),
        )
    }

    pub fn import_type_source_info(&mut self, info: TypeSourceInfo) -> ImportResult<TypeSourceInfo> {
        let ty = self.import_type(info.ty)?;
        let loc = self.import_source_location(info.loc);
        Ok(TypeSourceInfo { ty, loc })
    }

    /// Import a nested-name-specifier, prefix first.
    pub fn import_nested_name_specifier(&mut self, id: NestedNameId) -> ImportResult<NestedNameId> {
        let spec = match self.from.nested_name_specifier(id) {
            NestedNameSpecifier::Global => NestedNameSpecifier::Global,
            NestedNameSpecifier::Namespace { prefix, namespace } => NestedNameSpecifier::Namespace {
                prefix: self.import_nested_prefix(prefix)?,
                namespace: self.import_decl(namespace)?,
            },
            NestedNameSpecifier::Type { prefix, ty } => NestedNameSpecifier::Type {
                prefix: self.import_nested_prefix(prefix)?,
                ty: self.import_type(QualType::unqualified(ty))?.ty,
            },
            NestedNameSpecifier::Identifier { prefix, name } => NestedNameSpecifier::Identifier {
                prefix: self.import_nested_prefix(prefix)?,
                name: self.import_identifier(name),
            },
        };
        Ok(self.to.nested_name(spec))
    }

    fn import_nested_prefix(&mut self, prefix: Option<NestedNameId>) -> ImportResult<Option<NestedNameId>> {
        prefix
            .map(|prefix| self.import_nested_name_specifier(prefix))
            .transpose()
    }
}
