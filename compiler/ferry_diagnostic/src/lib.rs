//! Diagnostics reported while importing between contexts.
//!
//! Each context gets its own [`DiagnosticSink`]. Reporting follows a
//! builder flow: `sink.report(loc, id)` starts a diagnostic, `.arg(..)`
//! fills the `%N` placeholders of the id's template, and `.emit()` records
//! it. Diagnostics are advisory: recording one never aborts an import.

mod diag_id;
mod diagnostic;
mod sink;

pub use diag_id::DiagId;
pub use diagnostic::{Diagnostic, Severity};
pub use sink::{DiagnosticBuilder, DiagnosticSink, SinkConfig};
