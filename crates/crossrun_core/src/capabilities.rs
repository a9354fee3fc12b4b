//! Define the closed capability vocabulary a backend may declare.
//!
//! This module is the single source of truth for capability names: a stable identifier ([`CapabilityId`]) plus a
//! const metadata table ([`CAPABILITIES`]) that records the canonical spelling and a short description.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and exact; there are no aliases.
//! - Adding a capability is a data change: add a variant and a table row. The guardrail tests in
//!   `tests/capability_registry_guardrails.rs` fail if the two drift apart.
//!
//! ## Examples
//! ```rust
//! use crossrun_core::capabilities::{self, CapabilityId};
//!
//! assert_eq!(capabilities::from_str("spelling"), Some(CapabilityId::Spelling));
//! assert_eq!(capabilities::as_str(CapabilityId::ValueStats), "valuestats");
//! assert_eq!(capabilities::from_str("Spelling"), None);
//! ```

/// Stable identifier for every capability a backend can declare.
///
/// ## Notes
/// - The discriminant doubles as the bit index inside [`crate::CapabilitySet`], so there must never be more than 16
///   variants without widening the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityId {
    // Generic properties
    Backend,
    Remote,
    Transactions,
    Positional,
    Writable,
    Multi,
    Spelling,
    Synonyms,
    Metadata,
    Replicas,
    ValueStats,

    // Implementation identity
    InMemory,
    Flint,
    Chert,
}

/// Metadata for a single capability.
///
/// This type is `Copy` so the registry can live in a `const` table.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityInfo {
    pub id: CapabilityId,
    pub canonical: &'static str,
    pub description: &'static str,
}

/// Registry of every capability name accepted in a capability string, in declaration order.
pub const CAPABILITIES: &[CapabilityInfo] = &[
    info(
        CapabilityId::Backend,
        "backend",
        "A real database backend is available (absent only for the `none` pseudo-backend).",
    ),
    info(
        CapabilityId::Remote,
        "remote",
        "The database is accessed through the remote protocol.",
    ),
    info(
        CapabilityId::Transactions,
        "transactions",
        "Writable databases support explicit transactions.",
    ),
    info(
        CapabilityId::Positional,
        "positional",
        "Term positions are stored, so phrase and proximity queries work.",
    ),
    info(CapabilityId::Writable, "writable", "Databases can be opened for writing."),
    info(
        CapabilityId::Multi,
        "multi",
        "Searches run over several sub-databases combined into one.",
    ),
    info(CapabilityId::Spelling, "spelling", "Spelling correction data is supported."),
    info(CapabilityId::Synonyms, "synonyms", "Synonym data is supported."),
    info(
        CapabilityId::Metadata,
        "metadata",
        "User metadata can be stored alongside documents.",
    ),
    info(
        CapabilityId::Replicas,
        "replicas",
        "Databases can be replicated.",
    ),
    info(
        CapabilityId::ValueStats,
        "valuestats",
        "Per-slot value statistics (frequency, bounds) are maintained.",
    ),
    info(
        CapabilityId::InMemory,
        "inmemory",
        "The backend is the in-memory implementation.",
    ),
    info(CapabilityId::Flint, "flint", "The backend is the flint on-disk format."),
    info(CapabilityId::Chert, "chert", "The backend is the chert on-disk format."),
];

/// Resolve a spelling to a [`CapabilityId`].
///
/// ## Parameters
/// - `name`: Candidate capability name, exactly as it appears in a capability string.
///
/// ## Returns
/// - `Some(CapabilityId)` if `name` matches a known capability.
/// - `None` otherwise.
pub fn from_str(name: &str) -> Option<CapabilityId> {
    CAPABILITIES.iter().find(|c| c.canonical == name).map(|c| c.id)
}

/// Return the canonical spelling for a capability.
pub fn as_str(id: CapabilityId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for a capability.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: CapabilityId) -> &'static CapabilityInfo {
    CAPABILITIES
        .iter()
        .find(|c| c.id == id)
        .expect("capability info missing")
}

const fn info(id: CapabilityId, canonical: &'static str, description: &'static str) -> CapabilityInfo {
    CapabilityInfo {
        id,
        canonical,
        description,
    }
}
