//! Source-root resolution
//!
//! The source root is where test data lives (`<srcdir>/testdata`). It is resolved once at startup, in order:
//!
//! 1. an explicit `--srcdir`
//! 2. `CROSSRUN_SRCDIR`
//! 3. `srcdir` (set by automake-style test drivers)
//! 4. the directory containing the running executable
//! 5. the current directory

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the source root.
pub const SRCDIR_ENV: &str = "CROSSRUN_SRCDIR";

/// Fallback environment variable used by automake-style test drivers.
pub const AUTOMAKE_SRCDIR_ENV: &str = "srcdir";

/// Resolve the source root from the process environment.
pub fn resolve_srcdir(explicit: Option<PathBuf>) -> PathBuf {
    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    resolve_srcdir_with(explicit, |key| env::var_os(key), exe_dir)
}

/// Resolve the source root with injected environment lookup and executable directory.
pub fn resolve_srcdir_with(
    explicit: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<OsString>,
    exe_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    for key in [SRCDIR_ENV, AUTOMAKE_SRCDIR_ENV] {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            return PathBuf::from(value);
        }
    }
    exe_dir.unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<OsString> {
        None
    }

    #[test]
    fn test_explicit_wins() {
        let dir = resolve_srcdir_with(
            Some(PathBuf::from("explicit")),
            |_| Some(OsString::from("from-env")),
            Some(PathBuf::from("exe")),
        );
        assert_eq!(dir, PathBuf::from("explicit"));
    }

    #[test]
    fn test_crossrun_env_before_automake_env() {
        let dir = resolve_srcdir_with(
            None,
            |key| Some(OsString::from(format!("dir-{key}"))),
            None,
        );
        assert_eq!(dir, PathBuf::from("dir-CROSSRUN_SRCDIR"));
    }

    #[test]
    fn test_automake_env() {
        let dir = resolve_srcdir_with(
            None,
            |key| (key == "srcdir").then(|| OsString::from("../tests")),
            None,
        );
        assert_eq!(dir, PathBuf::from("../tests"));
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let dir = resolve_srcdir_with(None, |_| Some(OsString::new()), Some(PathBuf::from("exe")));
        assert_eq!(dir, PathBuf::from("exe"));
    }

    #[test]
    fn test_falls_back_to_current_dir() {
        assert_eq!(resolve_srcdir_with(None, no_env, None), PathBuf::from("."));
    }
}
