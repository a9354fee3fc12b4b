use std::collections::HashMap;

use crossrun_core::capabilities::{self, CAPABILITIES, CapabilityId};
use crossrun_core::{BACKEND_PROPERTIES, BackendRegistry, CapabilitySet};

#[test]
fn capability_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, CapabilityId> = HashMap::new();

    for info in CAPABILITIES {
        assert_eq!(
            capabilities::from_str(info.canonical),
            Some(info.id),
            "capability canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            capabilities::as_str(info.id),
            info.canonical,
            "capability as_str mismatch for {:?}",
            info.id
        );
        assert!(
            !info.canonical.is_empty() && !info.canonical.contains(','),
            "capability spelling must be a single non-empty token: {:?}",
            info.canonical
        );
        assert!(!info.description.is_empty(), "missing description for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate capability spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn capability_ids_unique_in_table() {
    let mut ids: Vec<CapabilityId> = CAPABILITIES.iter().map(|c| c.id).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total, "a capability id appears twice in CAPABILITIES");
}

#[test]
fn every_builtin_backend_declares_a_valid_capability_string() {
    for entry in BACKEND_PROPERTIES {
        let caps = CapabilitySet::parse(entry.properties);
        assert!(
            caps.is_ok(),
            "backend {:?} has an invalid capability string: {:?}",
            entry.name,
            caps.unwrap_err()
        );
    }
}

#[test]
fn builtin_backend_names_unique() {
    let mut seen = HashMap::new();
    for entry in BACKEND_PROPERTIES {
        if let Some(prev) = seen.insert(entry.name, entry.properties) {
            panic!("duplicate backend entry {:?} (previous properties {:?})", entry.name, prev);
        }
    }
}

#[test]
fn every_real_backend_declares_backend_flag() {
    let registry = BackendRegistry::builtin();
    for entry in registry.entries() {
        let caps = CapabilitySet::parse(entry.properties).unwrap();
        assert_eq!(
            caps.contains(CapabilityId::Backend),
            entry.name != "none",
            "unexpected `backend` flag for {:?}",
            entry.name
        );
    }
}

#[test]
fn compound_backends_carry_family_flags() {
    let registry = BackendRegistry::builtin();
    for entry in registry.entries() {
        let caps = CapabilitySet::parse(entry.properties).unwrap();
        if entry.name.starts_with("multi_") {
            assert!(caps.contains(CapabilityId::Multi), "{} should be multi", entry.name);
        }
        if entry.name.starts_with("remoteprog_") || entry.name.starts_with("remotetcp_") {
            assert!(caps.contains(CapabilityId::Remote), "{} should be remote", entry.name);
        }
    }
}
