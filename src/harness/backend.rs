//! Backends the dispatcher can exercise.
//!
//! A [`Backend`] is anything with a name and a data-source directory. The built-in [`BuiltinBackend`] descriptors
//! cover the database formats this build knows about; compound backends wrap a database name in a family
//! (`multi_chert`, `remoteprog_flint`).
//!
//! Which backends exist is decided once, by [`available_backends`], from cargo features. The dispatch loop only
//! ever sees the resulting list of factories.

use std::fmt;
use std::path::{Path, PathBuf};

/// A storage backend under test.
pub trait Backend {
    /// Declared name. This is the key into the property registry and what the user filter matches against.
    fn name(&self) -> String;

    /// Point the backend at the directory holding its source data.
    fn set_datadir(&mut self, datadir: &Path);

    /// The directory set by [`Backend::set_datadir`], if any.
    fn datadir(&self) -> Option<&Path>;
}

/// Builds one candidate backend. Construction is deferred so a run aborted early never builds the rest.
pub type BackendFactory = Box<dyn Fn() -> Box<dyn Backend>>;

/// Shape of a built-in backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// No database at all; exercises code paths that need no storage.
    None,
    /// A database used directly (`inmemory`, `chert`, `flint`).
    Local(&'static str),
    /// Several sub-databases of one format searched as one.
    Multi(&'static str),
    /// A database served by a remote server spawned as a child program.
    RemoteProg(&'static str),
    /// A database served by a remote server over TCP.
    RemoteTcp(&'static str),
}

impl BackendKind {
    /// Family prefix for compound kinds.
    pub fn family(&self) -> Option<&'static str> {
        match self {
            BackendKind::None | BackendKind::Local(_) => None,
            BackendKind::Multi(_) => Some("multi"),
            BackendKind::RemoteProg(_) => Some("remoteprog"),
            BackendKind::RemoteTcp(_) => Some("remotetcp"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::None => f.write_str("none"),
            BackendKind::Local(db) => f.write_str(db),
            BackendKind::Multi(db) | BackendKind::RemoteProg(db) | BackendKind::RemoteTcp(db) => {
                let family = self.family().unwrap_or_default();
                write!(f, "{family}_{db}")
            }
        }
    }
}

/// A backend descriptor built into the dispatcher.
#[derive(Debug, Clone)]
pub struct BuiltinBackend {
    kind: BackendKind,
    datadir: Option<PathBuf>,
}

impl BuiltinBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self { kind, datadir: None }
    }

    /// Factory producing a fresh descriptor of `kind` on every call.
    pub fn factory(kind: BackendKind) -> BackendFactory {
        Box::new(move || Box::new(BuiltinBackend::new(kind)) as Box<dyn Backend>)
    }
}

impl Backend for BuiltinBackend {
    fn name(&self) -> String {
        self.kind.to_string()
    }

    fn set_datadir(&mut self, datadir: &Path) {
        self.datadir = Some(datadir.to_path_buf());
    }

    fn datadir(&self) -> Option<&Path> {
        self.datadir.as_deref()
    }
}

/// Backend kinds compiled into this build, in dispatch order.
///
/// Order: the storage-less `none` backend, the plain databases, then multi, then remote variants (program before
/// TCP, chert before flint).
pub fn available_kinds() -> Vec<BackendKind> {
    let mut kinds = vec![BackendKind::None];

    #[cfg(feature = "inmemory")]
    kinds.push(BackendKind::Local("inmemory"));

    #[allow(unused_mut)]
    let mut databases: Vec<&'static str> = Vec::new();
    #[cfg(feature = "chert")]
    databases.push("chert");
    #[cfg(feature = "flint")]
    databases.push("flint");

    kinds.extend(databases.iter().map(|&db| BackendKind::Local(db)));
    kinds.extend(databases.iter().map(|&db| BackendKind::Multi(db)));

    #[cfg(feature = "remote")]
    for &db in &databases {
        kinds.push(BackendKind::RemoteProg(db));
        kinds.push(BackendKind::RemoteTcp(db));
    }

    kinds
}

/// Factories for every backend compiled into this build, in dispatch order.
pub fn available_backends() -> Vec<BackendFactory> {
    available_kinds().into_iter().map(BuiltinBackend::factory).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(BackendKind::None.to_string(), "none");
        assert_eq!(BackendKind::Local("inmemory").to_string(), "inmemory");
        assert_eq!(BackendKind::Multi("chert").to_string(), "multi_chert");
        assert_eq!(BackendKind::RemoteProg("flint").to_string(), "remoteprog_flint");
        assert_eq!(BackendKind::RemoteTcp("chert").to_string(), "remotetcp_chert");
    }

    #[test]
    fn test_datadir_starts_unset() {
        let mut backend = BuiltinBackend::new(BackendKind::Local("chert"));
        assert_eq!(backend.datadir(), None);
        backend.set_datadir(Path::new("src/testdata"));
        assert_eq!(backend.datadir(), Some(Path::new("src/testdata")));
    }

    #[test]
    fn test_none_backend_always_first() {
        assert_eq!(available_kinds().first(), Some(&BackendKind::None));
    }

    #[test]
    fn test_every_available_backend_is_registered() {
        let registry = crossrun_core::BackendRegistry::builtin();
        for make in available_backends() {
            let backend = make();
            assert!(
                registry.lookup(&backend.name()).is_ok(),
                "{} has no registry entry",
                backend.name()
            );
        }
    }

    #[cfg(all(feature = "inmemory", feature = "chert", feature = "flint", feature = "remote"))]
    #[test]
    fn test_default_dispatch_order() {
        let names: Vec<String> = available_kinds().iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "none",
                "inmemory",
                "chert",
                "flint",
                "multi_chert",
                "multi_flint",
                "remoteprog_chert",
                "remotetcp_chert",
                "remoteprog_flint",
                "remotetcp_flint",
            ]
        );
    }
}
