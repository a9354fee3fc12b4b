//! Error types raised while resolving a backend's capabilities.
//!
//! These are plain structs so the crate stays dependency-free; the dispatcher wraps them in its own error enum.

use std::fmt;

/// A capability string contained a token outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedProperty {
    /// The offending token, verbatim.
    pub name: String,
}

impl fmt::Display for UnrecognizedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown property '{}' found in proplist", self.name)
    }
}

impl std::error::Error for UnrecognizedProperty {}

/// A backend reported a name that has no entry in the property registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBackend {
    pub name: String,
}

impl fmt::Display for UnknownBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown backend {}", self.name)
    }
}

impl std::error::Error for UnknownBackend {}
