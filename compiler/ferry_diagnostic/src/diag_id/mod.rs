//! Diagnostic identifiers.
//!
//! Each identifier fixes a severity and a message template. Templates use
//! `%N` placeholders filled from the arguments attached by the builder.

use std::fmt;

use crate::Severity;

/// Every diagnostic the importer can report.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagId {
    /// An external variable has different types in two translation units.
    ErrOdrVariableTypeInconsistent,
    /// Points at the other declaration of an inconsistent variable.
    NoteOdrValueHere,
    /// An external variable is defined in two translation units.
    ErrOdrVariableMultipleDef,
    /// Points at the other definition of a multiply-defined variable.
    NoteOdrDefinedHere,
}

impl DiagId {
    pub const ALL: [DiagId; 4] = [
        DiagId::ErrOdrVariableTypeInconsistent,
        DiagId::NoteOdrValueHere,
        DiagId::ErrOdrVariableMultipleDef,
        DiagId::NoteOdrDefinedHere,
    ];

    pub const fn severity(self) -> Severity {
        match self {
            DiagId::ErrOdrVariableTypeInconsistent | DiagId::ErrOdrVariableMultipleDef => {
                Severity::Error
            }
            DiagId::NoteOdrValueHere | DiagId::NoteOdrDefinedHere => Severity::Note,
        }
    }

    /// Stable searchable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagId::ErrOdrVariableTypeInconsistent => "err_odr_variable_type_inconsistent",
            DiagId::NoteOdrValueHere => "note_odr_value_here",
            DiagId::ErrOdrVariableMultipleDef => "err_odr_variable_multiple_def",
            DiagId::NoteOdrDefinedHere => "note_odr_defined_here",
        }
    }

    /// Message template with `%N` argument placeholders.
    pub const fn template(self) -> &'static str {
        match self {
            DiagId::ErrOdrVariableTypeInconsistent => {
                "external variable %0 declared with incompatible types in different translation units (%1 vs. %2)"
            }
            DiagId::NoteOdrValueHere => "declared here with type %0",
            DiagId::ErrOdrVariableMultipleDef => {
                "external variable %0 defined in multiple translation units"
            }
            DiagId::NoteOdrDefinedHere => "also defined here",
        }
    }

    /// Number of `%N` arguments the template expects.
    pub const fn arg_count(self) -> usize {
        match self {
            DiagId::ErrOdrVariableTypeInconsistent => 3,
            DiagId::NoteOdrValueHere | DiagId::ErrOdrVariableMultipleDef => 1,
            DiagId::NoteOdrDefinedHere => 0,
        }
    }
}

impl fmt::Display for DiagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
