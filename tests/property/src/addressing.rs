use anchor_lang::prelude::Pubkey;
use credential_registry::RegistrySeeds;
use credential_registry_sdk::{find_credential_address, find_registry_address};
use proptest::prelude::*;

/// Property: derivation is a pure function of (program, identifier)
#[test]
fn prop_derivation_is_deterministic() {
    proptest!(|(diploma_id in "[A-Za-z0-9-]{1,32}")| {
        let program_id = credential_registry::ID;
        let first = find_credential_address(&program_id, &diploma_id).unwrap();
        let second = find_credential_address(&program_id, &diploma_id).unwrap();
        let on_chain = RegistrySeeds::credential(&diploma_id, &program_id).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first, on_chain);
    });
}

/// Property: distinct identifiers never share a slot, nor the registry's
#[test]
fn prop_distinct_identifiers_get_distinct_addresses() {
    proptest!(|(
        a in "[A-Za-z0-9-]{1,32}",
        b in "[A-Za-z0-9-]{1,32}",
    )| {
        prop_assume!(a != b);
        let program_id = credential_registry::ID;
        let (registry, _) = find_registry_address(&program_id).unwrap();
        let (addr_a, _) = find_credential_address(&program_id, &a).unwrap();
        let (addr_b, _) = find_credential_address(&program_id, &b).unwrap();

        prop_assert_ne!(addr_a, addr_b);
        prop_assert_ne!(addr_a, registry);
    });
}

/// Property: the namespace tag separates identifiers that look like it
#[test]
fn prop_namespace_is_part_of_the_address() {
    proptest!(|(suffix in "[a-z]{0,8}")| {
        let program_id = credential_registry::ID;
        let (registry, _) = find_registry_address(&program_id).unwrap();
        let diploma_id = format!("registry{suffix}");
        let (credential, _) = find_credential_address(&program_id, &diploma_id).unwrap();

        prop_assert_ne!(credential, registry);
        prop_assert!(!credential.is_on_curve());
    });
}

#[test]
fn test_derivation_ignores_other_programs() {
    let a = find_credential_address(&Pubkey::new_unique(), "D-1").unwrap();
    let b = find_credential_address(&Pubkey::new_unique(), "D-1").unwrap();
    assert_ne!(a.0, b.0);
}
