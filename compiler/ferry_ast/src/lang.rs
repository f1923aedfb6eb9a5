//! Language configuration carried by each context.
//!
//! Two contexts built from the same sources can still disagree here (e.g.
//! `-funsigned-char` on one side), and the importer reads both sides'
//! options explicitly rather than any ambient global state.

use std::fmt;

/// A language dialect a construct may depend on.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    CPlusPlus,
    CPlusPlus0x,
    ObjC,
    Blocks,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::CPlusPlus => write!(f, "C++"),
            Dialect::CPlusPlus0x => write!(f, "C++0x"),
            Dialect::ObjC => write!(f, "Objective-C"),
            Dialect::Blocks => write!(f, "blocks"),
        }
    }
}

/// Per-context language options.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(
    clippy::struct_excessive_bools,
    reason = "mirrors independent front-end switches"
)]
pub struct LangOptions {
    /// Whether plain `char` is signed in this context.
    pub char_is_signed: bool,
    pub cplusplus: bool,
    pub cplusplus0x: bool,
    pub objc: bool,
    pub blocks: bool,
}

impl Default for LangOptions {
    fn default() -> Self {
        Self::c99()
    }
}

impl LangOptions {
    /// Plain C with a signed `char`.
    pub const fn c99() -> Self {
        LangOptions {
            char_is_signed: true,
            cplusplus: false,
            cplusplus0x: false,
            objc: false,
            blocks: false,
        }
    }

    pub const fn cplusplus() -> Self {
        LangOptions {
            cplusplus: true,
            ..Self::c99()
        }
    }

    pub const fn cplusplus0x() -> Self {
        LangOptions {
            cplusplus0x: true,
            ..Self::cplusplus()
        }
    }

    /// Objective-C with blocks enabled.
    pub const fn objc() -> Self {
        LangOptions {
            objc: true,
            blocks: true,
            ..Self::c99()
        }
    }

    #[must_use]
    pub const fn with_char_signed(mut self, signed: bool) -> Self {
        self.char_is_signed = signed;
        self
    }

    pub const fn supports(&self, dialect: Dialect) -> bool {
        match dialect {
            Dialect::CPlusPlus => self.cplusplus,
            Dialect::CPlusPlus0x => self.cplusplus0x,
            Dialect::ObjC => self.objc,
            Dialect::Blocks => self.blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_layer() {
        let opts = LangOptions::cplusplus0x();
        assert!(opts.supports(Dialect::CPlusPlus));
        assert!(opts.supports(Dialect::CPlusPlus0x));
        assert!(!opts.supports(Dialect::ObjC));
        assert!(opts.char_is_signed);
    }

    #[test]
    fn char_signedness_override() {
        let opts = LangOptions::c99().with_char_signed(false);
        assert!(!opts.char_is_signed);
        assert!(!opts.supports(Dialect::CPlusPlus));
    }
}
