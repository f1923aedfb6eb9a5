//! Per-context diagnostic sink.
//!
//! A sink accepts `(location, id)` and hands back a builder for the
//! message arguments. Nothing is recorded until the builder is emitted.

use ferry_ast::SourceLocation;

use crate::{DiagId, Diagnostic};

/// Configuration for diagnostic collection.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct SinkConfig {
    /// Maximum number of errors to record (0 = unlimited, the default).
    /// Notes attached to a dropped error are dropped with it.
    pub error_limit: usize,
}

impl SinkConfig {
    /// A config that records every diagnostic.
    pub fn unlimited() -> Self {
        SinkConfig { error_limit: 0 }
    }

    /// Stop recording errors after the first `limit`.
    pub fn with_error_limit(limit: usize) -> Self {
        SinkConfig { error_limit: limit }
    }
}

/// Collects the diagnostics reported against one context.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    /// Set while the last error was dropped, so its notes follow it.
    suppressing: bool,
    config: SinkConfig,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SinkConfig) -> Self {
        DiagnosticSink {
            config,
            ..Self::default()
        }
    }

    /// Start a diagnostic at `loc`.
    pub fn report(&mut self, loc: SourceLocation, id: DiagId) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: self,
            diag: Diagnostic::new(id, loc),
        }
    }

    /// Record a finished diagnostic.
    ///
    /// Returns `true` if the diagnostic was kept, `false` if it was filtered.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if diag.is_error() {
            self.suppressing = self.limit_reached();
            if self.suppressing {
                return false;
            }
            self.error_count += 1;
        } else if self.suppressing {
            return false;
        }
        self.diagnostics.push(diag);
        true
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of recorded diagnostics with the given id.
    pub fn count_of(&self, id: DiagId) -> usize {
        self.diagnostics.iter().filter(|d| d.id == id).count()
    }

    /// Drain all recorded diagnostics and reset the counters.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.suppressing = false;
        std::mem::take(&mut self.diagnostics)
    }
}

/// Builder for the arguments of one diagnostic.
#[must_use = "a diagnostic is only recorded once `emit` is called"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut DiagnosticSink,
    diag: Diagnostic,
}

impl DiagnosticBuilder<'_> {
    /// Append the next `%N` argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.diag.args.push(arg.into());
        self
    }

    /// Record the diagnostic in its sink.
    pub fn emit(self) -> bool {
        self.sink.push(self.diag)
    }
}
