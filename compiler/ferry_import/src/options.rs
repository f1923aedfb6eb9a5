//! Per-session import configuration.

/// What to do when a construct needs a dialect the target does not enable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DialectPolicy {
    /// Import anyway and record the gap in a `tracing` event.
    #[default]
    Unchecked,
    /// Fail with [`ImportError::DialectMismatch`](crate::ImportError::DialectMismatch).
    Strict,
}

/// Configuration for one [`Importer`](crate::Importer) session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ImportOptions {
    pub dialect_policy: DialectPolicy,
}

impl ImportOptions {
    /// Options that reject dialect mismatches.
    pub fn strict() -> Self {
        ImportOptions {
            dialect_policy: DialectPolicy::Strict,
        }
    }
}
