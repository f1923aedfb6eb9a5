//! Cross-context importer.
//!
//! Copies types, declarations, names and expressions from one analysis
//! [`Context`](ferry_ast::Context) into another, keeping the target's
//! invariants intact:
//!
//! - every imported node is interned through the target, so importing the
//!   same source node twice yields the same target node;
//! - file-scope variables with external linkage merge with a compatible
//!   declaration already present in the target, and ODR violations are
//!   reported against both contexts;
//! - anything the importer cannot express (dependent types, class
//!   templates) fails with an [`ImportError`] instead of a partial node.
//!
//! ```text
//! let mut importer = Importer::new(&mut to, &mut to_diags, &from, &from_diags);
//! let imported = importer.import_decl(var)?;
//! ```

mod decl;
mod error;
mod expr;
mod hooks;
mod importer;
mod map;
mod name;
mod options;
mod stack;
mod support;
mod ty;

pub use error::{ImportError, ImportResult};
pub use hooks::{DefaultHooks, ImportHooks};
pub use importer::Importer;
pub use map::ImportedMap;
pub use options::{DialectPolicy, ImportOptions};
