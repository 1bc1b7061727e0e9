use anchor_lang::prelude::Pubkey;
use credential_registry_sdk::{LocalRegistry, RegistryError, SdkError, Verification};
use credential_registry_property_tests::{apply, diploma_id, op, Op, CALLERS, IDENTIFIERS};
use proptest::prelude::*;

fn callers() -> Vec<Pubkey> {
    (0..CALLERS).map(|_| Pubkey::new_unique()).collect()
}

/// Snapshot of everything observable, for "state unchanged" checks
fn snapshot(ledger: &LocalRegistry) -> (Option<(Pubkey, u64)>, Vec<(String, bool, Option<String>)>) {
    let registry = ledger.registry().map(|r| (r.authority, r.count));
    let credentials = ledger
        .credentials()
        .map(|c| (c.diploma_id.clone(), c.is_verified(), c.content_reference.clone()))
        .collect();
    (registry, credentials)
}

/// Property: the registry count always equals the number of valid records
#[test]
fn prop_count_matches_valid_records() {
    proptest!(|(ops in prop::collection::vec(op(), 1..80))| {
        let callers = callers();
        let mut ledger = LocalRegistry::new(credential_registry::ID).unwrap();

        for op in &ops {
            let _ = apply(&mut ledger, &callers, op);

            let valid = ledger.credentials().filter(|c| c.is_verified()).count() as u64;
            let count = ledger.registry().map_or(0, |r| r.count);
            prop_assert_eq!(count, valid, "count drifted after {:?}", op);
        }
    });
}

/// Property: a failed operation leaves every record unchanged
#[test]
fn prop_failed_operations_are_atomic() {
    proptest!(|(ops in prop::collection::vec(op(), 1..80))| {
        let callers = callers();
        let mut ledger = LocalRegistry::new(credential_registry::ID).unwrap();

        for op in &ops {
            let before = snapshot(&ledger);
            if apply(&mut ledger, &callers, op).is_err() {
                prop_assert_eq!(snapshot(&ledger), before, "failed {:?} changed state", op);
            }
        }
    });
}

/// Property: only the first initializer ever mutates the registry
#[test]
fn prop_only_authority_mutates() {
    proptest!(|(ops in prop::collection::vec(op(), 1..80))| {
        let callers = callers();
        let mut ledger = LocalRegistry::new(credential_registry::ID).unwrap();
        let mut authority: Option<Pubkey> = None;

        for op in &ops {
            let result = apply(&mut ledger, &callers, op);
            match (op, &result) {
                (Op::Initialize { caller }, Ok(())) => {
                    prop_assert!(authority.is_none(), "initialized twice");
                    authority = Some(callers[*caller]);
                }
                (Op::Initialize { .. }, Err(err)) => {
                    prop_assert!(matches!(err, SdkError::Registry(RegistryError::AlreadyInitialized)));
                }
                (Op::Add { caller, .. } | Op::Revoke { caller, .. }, Ok(())) => {
                    prop_assert_eq!(Some(callers[*caller]), authority);
                }
                (Op::Add { caller, .. } | Op::Revoke { caller, .. }, Err(err)) => {
                    if let Some(authority) = authority {
                        if callers[*caller] != authority {
                            prop_assert!(matches!(err, SdkError::Registry(RegistryError::Unauthorized)));
                        }
                    } else {
                        prop_assert!(matches!(err, SdkError::RegistryNotInitialized));
                    }
                }
            }
        }
    });
}

/// Property: an identifier is issued at most once, and revocation is final
#[test]
fn prop_identifier_lifecycle_is_monotonic() {
    proptest!(|(ops in prop::collection::vec(op(), 1..80))| {
        let callers = callers();
        let mut ledger = LocalRegistry::new(credential_registry::ID).unwrap();
        let mut seen = vec![Verification::NeverIssued; IDENTIFIERS];

        for op in &ops {
            let _ = apply(&mut ledger, &callers, op);

            for (id, previous) in seen.iter_mut().enumerate() {
                let current = ledger.verify(&diploma_id(id)).unwrap();
                let allowed = match *previous {
                    Verification::NeverIssued => true,
                    Verification::Valid => current != Verification::NeverIssued,
                    Verification::Revoked => current == Verification::Revoked,
                };
                prop_assert!(allowed, "{} went from {:?} to {:?}", diploma_id(id), previous, current);
                *previous = current;
            }
        }

        let issued = seen.iter().filter(|v| **v != Verification::NeverIssued).count();
        prop_assert_eq!(ledger.credentials().count(), issued);
    });
}
