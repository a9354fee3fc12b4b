//! Provide the capability vocabulary and backend property registry shared by the crossrun dispatcher.
//!
//! This crate is intentionally small and dependency-free. It answers two questions, both as pure functions over
//! `const` data:
//! - which capability names exist (and what each one means), and
//! - which capabilities a backend with a given name declares.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no knowledge of how suites are executed.
//! - Callers work with stable ids ([`CapabilityId`]) and flag sets ([`CapabilitySet`]) rather than comparing strings.
//!
//! ## Examples
//! ```rust
//! use crossrun_core::{BackendRegistry, CapabilityId, CapabilitySet};
//!
//! let registry = BackendRegistry::builtin();
//! let props = registry.lookup("multi_chert").unwrap();
//! let caps = CapabilitySet::parse(props).unwrap();
//! assert!(caps.contains(CapabilityId::Multi));
//! assert!(!caps.contains(CapabilityId::Writable));
//! ```

pub mod backends;
pub mod capabilities;
pub mod errors;
pub mod flags;

pub use backends::{BACKEND_PROPERTIES, BackendProperties, BackendRegistry};
pub use capabilities::{CAPABILITIES, CapabilityId, CapabilityInfo};
pub use errors::{UnknownBackend, UnrecognizedProperty};
pub use flags::CapabilitySet;
