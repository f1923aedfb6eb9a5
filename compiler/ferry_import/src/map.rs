//! The identity map from source nodes to the target nodes they became.

use ferry_ast::{DeclId, ExprId, TypeId};
use rustc_hash::FxHashMap;

/// Source → target node mapping, one table per node family.
///
/// Entries are only ever added. Once a source node has a target, every
/// later import of that source node returns the same target without
/// running any translation logic.
#[derive(Clone, Debug, Default)]
pub struct ImportedMap {
    types: FxHashMap<TypeId, TypeId>,
    decls: FxHashMap<DeclId, DeclId>,
    exprs: FxHashMap<ExprId, ExprId>,
}

impl ImportedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target of an already-imported unqualified type node.
    #[inline]
    pub fn type_of(&self, from: TypeId) -> Option<TypeId> {
        self.types.get(&from).copied()
    }

    #[inline]
    pub fn decl(&self, from: DeclId) -> Option<DeclId> {
        self.decls.get(&from).copied()
    }

    #[inline]
    pub fn expr(&self, from: ExprId) -> Option<ExprId> {
        self.exprs.get(&from).copied()
    }

    pub(crate) fn insert_type(&mut self, from: TypeId, to: TypeId) {
        self.types.insert(from, to);
    }

    /// Map `from` to `to`. An existing mapping is never replaced.
    pub(crate) fn insert_decl(&mut self, from: DeclId, to: DeclId) {
        let mapped = *self.decls.entry(from).or_insert(to);
        debug_assert_eq!(mapped, to, "{from:?} already imported as {mapped:?}");
    }

    pub(crate) fn insert_expr(&mut self, from: ExprId, to: ExprId) {
        self.exprs.insert(from, to);
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.decls.is_empty() && self.exprs.is_empty()
    }

    /// All declaration mappings, in no particular order.
    pub fn decls(&self) -> impl Iterator<Item = (DeclId, DeclId)> + '_ {
        self.decls.iter().map(|(&from, &to)| (from, to))
    }
}
