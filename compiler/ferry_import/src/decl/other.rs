//! Find-or-create for every supported declaration kind other than
//! variables.

use ferry_ast::{Decl, DeclId, DeclKind, QualType, StorageClass, TagKind};
use smallvec::SmallVec;

use crate::{ImportError, ImportHooks, ImportResult, Importer};

/// The imported payload of a declaration, ready to compare or create.
enum Shape {
    Namespace,
    Function { ty: QualType, storage: StorageClass },
    Typedef { underlying: QualType },
    Record { tag: TagKind },
    Enum,
    ObjCInterface,
    ObjCProtocol,
}

impl<H: ImportHooks> Importer<'_, H> {
    pub(super) fn import_named_decl(&mut self, id: DeclId, decl: &Decl) -> ImportResult<DeclId> {
        let dc = self.import_context(decl.context)?;
        let mut name = self.import_name(decl.name)?;
        let loc = self.import_source_location(decl.loc);
        let idns = decl.identifier_namespace();

        let shape = match &decl.kind {
            DeclKind::Namespace => Shape::Namespace,
            DeclKind::Function { ty, storage, .. } => Shape::Function {
                ty: self.import_type(*ty)?,
                storage: *storage,
            },
            DeclKind::Typedef { underlying } => Shape::Typedef {
                underlying: self.import_type(*underlying)?,
            },
            DeclKind::Record { tag } => Shape::Record { tag: *tag },
            DeclKind::Enum => Shape::Enum,
            DeclKind::ObjCInterface => Shape::ObjCInterface,
            DeclKind::ObjCProtocol => Shape::ObjCProtocol,
            DeclKind::TranslationUnit | DeclKind::Var(_) | DeclKind::ClassTemplate { .. } => {
                return Err(ImportError::UnsupportedDecl(decl.class()));
            }
        };
        if let Some(to) = self.imported.decl(id) {
            return Ok(to);
        }

        if !name.is_empty() {
            let found_decls: SmallVec<[DeclId; 4]> =
                self.to.lookup(dc, name).iter().copied().collect();
            let mut conflicts: SmallVec<[DeclId; 4]> = SmallVec::new();
            for found in found_decls {
                if !self.to.decl(found).is_in_identifier_namespace(idns) {
                    continue;
                }
                if self.is_equivalent(found, &shape) {
                    tracing::debug!(from = ?id, to = ?found, "reusing equivalent declaration");
                    self.imported.insert_decl(id, found);
                    return Ok(found);
                }
                conflicts.push(found);
            }
            if !conflicts.is_empty() {
                name = self.resolve_name_conflict(name, dc, idns, &conflicts)?;
            }
        }

        let to = match shape {
            Shape::Namespace => self.to.create_namespace(dc, loc, name),
            Shape::Function { ty, storage } => self.to.create_function(dc, loc, name, ty, storage),
            Shape::Typedef { underlying } => self.to.create_typedef(dc, loc, name, underlying),
            Shape::Record { tag } => self.to.create_record(dc, loc, name, tag),
            Shape::Enum => self.to.create_enum(dc, loc, name),
            Shape::ObjCInterface => self.to.create_objc_interface(dc, loc, name),
            Shape::ObjCProtocol => self.to.create_objc_protocol(dc, loc, name),
        };
        self.imported.insert_decl(id, to);

        if let DeclKind::Function { params, .. } = &decl.kind {
            let params = params
                .iter()
                .map(|&param| self.import_decl(param))
                .collect::<ImportResult<Vec<_>>>()?;
            self.to.set_params(to, params);
        }
        Ok(to)
    }

    /// Whether an existing target declaration already stands for `shape`.
    fn is_equivalent(&self, found: DeclId, shape: &Shape) -> bool {
        match (&self.to.decl(found).kind, shape) {
            (DeclKind::Namespace, Shape::Namespace)
            | (DeclKind::Enum, Shape::Enum)
            | (DeclKind::ObjCInterface, Shape::ObjCInterface)
            | (DeclKind::ObjCProtocol, Shape::ObjCProtocol) => true,
            (DeclKind::Record { tag: found_tag }, Shape::Record { tag }) => {
                same_record_tag(*found_tag, *tag)
            }
            (DeclKind::Typedef { underlying: found_ty }, Shape::Typedef { underlying }) => {
                self.to.canonical_type(*found_ty) == self.to.canonical_type(*underlying)
            }
            (DeclKind::Function { ty: found_ty, .. }, Shape::Function { ty, .. }) => {
                self.to.types_are_compatible(*found_ty, *ty)
            }
            _ => false,
        }
    }
}

/// `struct` and `class` name the same kind of record.
fn same_record_tag(a: TagKind, b: TagKind) -> bool {
    let normalize = |tag| match tag {
        TagKind::Class => TagKind::Struct,
        other => other,
    };
    normalize(a) == normalize(b)
}
