//! Expression translation: a structural copy into the target arena.
//!
//! Declaration references go back through [`Importer::import_decl`], which
//! is what lets a self-referential initializer resolve to the declaration
//! registered just before it.

use ferry_ast::{Expr, ExprId, ExprKind};

use crate::stack::ensure_sufficient_stack;
use crate::{ImportError, ImportHooks, ImportResult, Importer};

impl<H: ImportHooks> Importer<'_, H> {
    #[tracing::instrument(level = "trace", skip_all, fields(expr = ?id))]
    pub fn import_expr(&mut self, id: ExprId) -> ImportResult<ExprId> {
        if let Some(to) = self.imported.expr(id) {
            return Ok(to);
        }
        let to = ensure_sufficient_stack(|| self.import_expr_node(id))?;
        self.imported.insert_expr(id, to);
        Ok(to)
    }

    fn import_expr_node(&mut self, id: ExprId) -> ImportResult<ExprId> {
        let from = self.from;
        let expr = from.expr(id);
        let kind = match &expr.kind {
            ExprKind::IntegerLiteral(value) => ExprKind::IntegerLiteral(*value),
            ExprKind::FloatingLiteral(bits) => ExprKind::FloatingLiteral(*bits),
            ExprKind::CharacterLiteral(value) => ExprKind::CharacterLiteral(*value),
            ExprKind::StringLiteral(text) => ExprKind::StringLiteral(self.import_identifier(*text)),
            ExprKind::DeclRef(decl) => ExprKind::DeclRef(self.import_decl(*decl)?),
            ExprKind::Paren(inner) => ExprKind::Paren(self.import_expr(*inner)?),
            ExprKind::Unary { op, operand } => ExprKind::Unary {
                op: *op,
                operand: self.import_expr(*operand)?,
            },
            ExprKind::Binary { op, lhs, rhs } => ExprKind::Binary {
                op: *op,
                lhs: self.import_expr(*lhs)?,
                rhs: self.import_expr(*rhs)?,
            },
            ExprKind::Cast { kind, operand } => ExprKind::Cast {
                kind: *kind,
                operand: self.import_expr(*operand)?,
            },
            ExprKind::SizeOfType(ty) => ExprKind::SizeOfType(self.import_type(*ty)?),
            ExprKind::InitList(elements) => ExprKind::InitList(
                elements
                    .iter()
                    .map(|&element| self.import_expr(element))
                    .collect::<ImportResult<_>>()?,
            ),
            ExprKind::DependentScopeRef(_) => return Err(ImportError::UnsupportedExpr),
        };
        let ty = self.import_type(expr.ty)?;
        let loc = self.import_source_location(expr.loc);
        Ok(self.to.alloc_expr(Expr::new(kind, ty, loc)))
    }
}
