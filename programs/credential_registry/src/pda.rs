// Deterministic addressing for registry records
use anchor_lang::prelude::*;

use crate::error::RegistryError;

/// Seed tag of the singleton registry record
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Seed tag shared by every credential record
pub const CREDENTIAL_SEED: &[u8] = b"credential";

/// Standard PDA seeds for the credential registry program
pub struct RegistrySeeds;

impl RegistrySeeds {
    /// Derive the registry record address
    pub fn registry(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        Self::derive(&[REGISTRY_SEED], program_id)
    }

    /// Derive the credential record address from its diploma identifier
    pub fn credential(diploma_id: &str, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        Self::derive(&[CREDENTIAL_SEED, diploma_id.as_bytes()], program_id)
    }

    /// Derivation fails when no bump yields an off-curve address, or when a
    /// seed exceeds the runtime's per-seed length limit.
    fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        Pubkey::try_find_program_address(seeds, program_id)
            .ok_or_else(|| error!(RegistryError::AddressDerivationFailed))
    }
}
