//! Per-context identifier and selector tables.
//!
//! Unlike a process-wide interner, each [`Context`](crate::Context) owns its
//! own tables: a [`Name`] from one context means nothing in another, which is
//! exactly why importing an identifier re-interns its text.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::SelectorId;

/// Interned identifier, local to one context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}", self.0)
    }
}

/// Error when a table runs out of 32-bit handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// More than `u32::MAX` distinct entries.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => {
                write!(f, "intern table exceeded capacity: {count} entries")
            }
        }
    }
}

impl std::error::Error for InternError {}

/// Identifier table: text to [`Name`] and back.
#[derive(Clone, Debug)]
pub struct IdentifierTable {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::from(""), Name::EMPTY);
        IdentifierTable {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let name = Name(raw);
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), name);
        Ok(name)
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if the table exceeds `u32::MAX` entries. Use `try_intern` for
    /// fallible interning.
    pub fn intern(&mut self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up an already-interned string without inserting it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Text of an interned name. Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.0 as usize).map_or("", |s| &**s)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::new()
    }
}

/// An Objective-C selector: `count` (zero-arg), `setX:` (one-arg) or
/// `initWithX:y:` (multi-arg).
///
/// A zero-arg selector has one piece and `num_args == 0`; otherwise there
/// is one piece per argument, with empty pieces allowed (`foo::`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SelectorData {
    pub num_args: u32,
    pub pieces: Box<[Name]>,
}

/// Selector table: uniques selectors by their pieces.
#[derive(Clone, Debug, Default)]
pub struct SelectorTable {
    map: FxHashMap<SelectorData, SelectorId>,
    selectors: Vec<SelectorData>,
}

impl SelectorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a selector. Pieces must already be interned in the owning
    /// context's identifier table.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "selector counts stay far below u32::MAX"
    )]
    pub fn intern(&mut self, num_args: u32, pieces: &[Name]) -> SelectorId {
        let data = SelectorData {
            num_args,
            pieces: pieces.into(),
        };
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = SelectorId::from_raw(self.selectors.len() as u32);
        self.selectors.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// # Panics
    /// Panics if `id` was not produced by this table.
    pub fn get(&self, id: SelectorId) -> &SelectorData {
        &self.selectors[id.index()]
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}
