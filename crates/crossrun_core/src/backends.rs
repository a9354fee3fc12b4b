//! The backend property registry: which capabilities each backend name declares.
//!
//! Each entry pairs an exact backend name with its capability string. Compound backends (`multi_*`, `remoteprog_*`,
//! `remotetcp_*`) have their own entries because wrapping a database changes what it can do (a multi database is
//! not writable, for example).
//!
//! ## Notes
//! - Lookup is an exact, linear scan. The table is small and its order is not observable through [`BackendRegistry`].
//! - Capability strings are stored verbatim and only validated when parsed; the guardrail tests parse every entry.

use crate::errors::UnknownBackend;

/// A (name, capability string) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendProperties {
    pub name: &'static str,
    pub properties: &'static str,
}

impl BackendProperties {
    pub const fn new(name: &'static str, properties: &'static str) -> Self {
        Self { name, properties }
    }
}

/// Properties of every backend the dispatcher knows how to construct.
pub const BACKEND_PROPERTIES: &[BackendProperties] = &[
    BackendProperties::new("none", ""),
    BackendProperties::new("inmemory", "backend,positional,writable,valuestats,inmemory"),
    BackendProperties::new(
        "chert",
        "backend,transactions,positional,writable,spelling,metadata,synonyms,replicas,valuestats,chert",
    ),
    BackendProperties::new(
        "flint",
        "backend,transactions,positional,writable,spelling,metadata,synonyms,replicas,flint",
    ),
    BackendProperties::new("multi_flint", "backend,positional,multi"),
    BackendProperties::new("multi_chert", "backend,positional,valuestats,multi"),
    BackendProperties::new("remoteprog_flint", "backend,remote,transactions,positional,writable"),
    BackendProperties::new("remotetcp_flint", "backend,remote,transactions,positional,writable"),
    BackendProperties::new(
        "remoteprog_chert",
        "backend,remote,transactions,positional,valuestats,writable",
    ),
    BackendProperties::new(
        "remotetcp_chert",
        "backend,remote,transactions,positional,valuestats,writable",
    ),
];

/// Read-only view over a property table.
///
/// The dispatcher normally uses [`BackendRegistry::builtin`]; tests substitute their own tables via
/// [`BackendRegistry::new`].
#[derive(Debug, Clone, Copy)]
pub struct BackendRegistry {
    entries: &'static [BackendProperties],
}

impl BackendRegistry {
    pub const fn new(entries: &'static [BackendProperties]) -> Self {
        Self { entries }
    }

    /// Registry over [`BACKEND_PROPERTIES`].
    pub const fn builtin() -> Self {
        Self::new(BACKEND_PROPERTIES)
    }

    /// Return the capability string declared for `name`.
    ///
    /// ## Errors
    /// - [`UnknownBackend`] if no entry has exactly this name.
    pub fn lookup(&self, name: &str) -> Result<&'static str, UnknownBackend> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.properties)
            .ok_or_else(|| UnknownBackend { name: name.to_string() })
    }

    pub fn entries(&self) -> &'static [BackendProperties] {
        self.entries
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: &[BackendProperties] = &[BackendProperties::new("inmemory", "backend,writable,inmemory")];

    #[test]
    fn test_lookup_exact_name() {
        let registry = BackendRegistry::new(TINY);
        assert_eq!(registry.lookup("inmemory"), Ok("backend,writable,inmemory"));
    }

    #[test]
    fn test_lookup_does_not_match_prefixes() {
        let registry = BackendRegistry::builtin();
        assert_eq!(
            registry.lookup("multi"),
            Err(UnknownBackend {
                name: "multi".to_string()
            })
        );
        assert!(registry.lookup("chert_extra").is_err());
    }

    #[test]
    fn test_none_backend_declares_nothing() {
        assert_eq!(BackendRegistry::builtin().lookup("none"), Ok(""));
    }

    #[test]
    fn test_unknown_backend_message() {
        let err = BackendRegistry::new(TINY).lookup("chert").unwrap_err();
        assert_eq!(err.to_string(), "Unknown backend chert");
    }
}
