//! Layering guardrails to keep the vocabulary crate free of dependencies.
//!
//! `crossrun_core` holds only the capability vocabulary and backend property table, so any tool can link it without
//! pulling in the dispatcher's CLI, logging or serialization stack. This test scans its `Cargo.toml` and fails if a
//! `[dependencies]` table with entries appears.

#[test]
fn vocabulary_crate_has_no_dependencies() {
    let manifest = include_str!("../crates/crossrun_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        assert!(
            line_no_comment.is_empty(),
            "`crossrun_core` must not declare dependencies, found `{line_no_comment}`"
        );
    }
}
