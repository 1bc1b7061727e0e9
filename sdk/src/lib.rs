//! Credential registry SDK
//!
//! Off-chain companion to the `credential_registry` program:
//! - Address derivation for registry and credential records
//! - Instruction builders
//! - The read path (`verify`) over any account source
//! - An in-memory host for dry runs and tests
//! - An RPC client for a deployed registry

pub mod addresses;
pub mod client;
pub mod config;
pub mod content;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod verification;

pub use addresses::*;
pub use client::{RegistryClient, RegistryReader};
pub use config::ClientConfig;
pub use error::{SdkError, SdkResult};
pub use instructions::*;
pub use ledger::LocalRegistry;
pub use verification::{verify, AccountSource};

// Re-export program types callers need to interpret results
pub use credential_registry::{
    CredentialRecord, CredentialStatus, RegistryError, RegistryRecord, Verification,
};
