//! The per-backend capability flag set and its parser.
//!
//! A [`CapabilitySet`] holds one boolean per [`CapabilityId`]. Sets are built fresh from a capability string for each
//! backend; there is no way to parse "into" an existing set, so a previous backend's flags can never leak into the
//! next one.
//!
//! ## Examples
//! ```rust
//! use crossrun_core::{CapabilityId, CapabilitySet};
//!
//! let caps = CapabilitySet::parse(",backend,,writable,").unwrap();
//! assert_eq!(caps, CapabilitySet::parse("backend,writable").unwrap());
//! assert!(caps.contains(CapabilityId::Writable));
//! assert!(CapabilitySet::parse("backend,bogus").is_err());
//! ```

use std::fmt;

use crate::capabilities::{self, CAPABILITIES, CapabilityId};
use crate::errors::UnrecognizedProperty;

/// Separator between tokens in a capability string.
pub const SEPARATOR: char = ',';

/// A set of capability flags. The empty set means every flag is false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    bits: u16,
}

impl CapabilitySet {
    /// The all-false set.
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Parse a comma-separated capability string.
    ///
    /// Empty tokens (from leading, trailing or doubled separators) are skipped. Repeated tokens are harmless.
    ///
    /// ## Errors
    /// - [`UnrecognizedProperty`] for the first token that is not in [`CAPABILITIES`]. No set is returned in that
    ///   case, so a failed parse never yields partially applied flags.
    pub fn parse(properties: &str) -> Result<Self, UnrecognizedProperty> {
        let mut set = Self::empty();
        for token in properties.split(SEPARATOR).filter(|t| !t.is_empty()) {
            let id = capabilities::from_str(token).ok_or_else(|| UnrecognizedProperty {
                name: token.to_string(),
            })?;
            set.insert(id);
        }
        Ok(set)
    }

    /// Set a flag. Inserting an already-set flag is a no-op.
    pub fn insert(&mut self, id: CapabilityId) {
        self.bits |= Self::bit(id);
    }

    pub fn contains(&self, id: CapabilityId) -> bool {
        self.bits & Self::bit(id) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterate over the set flags in registry order.
    pub fn iter(&self) -> impl Iterator<Item = CapabilityId> + '_ {
        CAPABILITIES.iter().map(|c| c.id).filter(|id| self.contains(*id))
    }

    const fn bit(id: CapabilityId) -> u16 {
        1 << (id as u16)
    }
}

impl FromIterator<CapabilityId> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = CapabilityId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Formats the set back into canonical capability-string form (registry order, no empty tokens).
impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            f.write_str(capabilities::as_str(id))?;
        }
        Ok(())
    }
}
