//! Address derivation helpers
//!
//! Thin wrappers over the program's own seed definitions, so off-chain
//! callers always derive the same addresses the program checks.

use anchor_lang::prelude::Pubkey;
use credential_registry::RegistrySeeds;

use crate::error::SdkResult;

/// Find the registry record PDA
pub fn find_registry_address(program_id: &Pubkey) -> SdkResult<(Pubkey, u8)> {
    Ok(RegistrySeeds::registry(program_id)?)
}

/// Find the credential record PDA for a diploma
pub fn find_credential_address(program_id: &Pubkey, diploma_id: &str) -> SdkResult<(Pubkey, u8)> {
    Ok(RegistrySeeds::credential(diploma_id, program_id)?)
}
