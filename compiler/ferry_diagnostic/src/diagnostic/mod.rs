//! Recorded diagnostics.

use std::fmt;

use ferry_ast::SourceLocation;
use smallvec::SmallVec;

use crate::DiagId;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic as recorded by a sink: identifier, location and the
/// rendered message arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub id: DiagId,
    pub severity: Severity,
    pub loc: SourceLocation,
    pub args: SmallVec<[String; 3]>,
}

impl Diagnostic {
    pub fn new(id: DiagId, loc: SourceLocation) -> Self {
        Diagnostic {
            id,
            severity: id.severity(),
            loc,
            args: SmallVec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Render the message template with the attached arguments.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn message(&self) -> String {
        let template = self.id.template();
        let mut out = String::with_capacity(template.len() + 32);
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek().and_then(|d| d.to_digit(10)) {
                Some(n) => {
                    chars.next();
                    match self.args.get(n as usize) {
                        Some(arg) => {
                            out.push('\'');
                            out.push_str(arg);
                            out.push('\'');
                        }
                        None => {
                            out.push('%');
                            out.push_str(&n.to_string());
                        }
                    }
                }
                None => out.push('%'),
            }
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}: {}", self.loc, self.severity, self.message())
    }
}
