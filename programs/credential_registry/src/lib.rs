//! Credential registry - Authority-issued diploma records
//!
//! A single registry record, claimed once by its authority, counts the
//! credentials that are currently valid. Each diploma lives at an address
//! derived from its identifier, so anyone can locate and verify it:
//! - Absent record: never issued
//! - Record with `Valid` status: currently valid
//! - Record with `Revoked` status: issued, then revoked (kept as a tombstone)

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

declare_id!("ABfRNYSdQxCuAi5HAmLE5fQPbDcyd8RqVbZKPLdZ4gu7");

pub mod error;
pub mod events;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod validation;

pub use error::*;
pub use events::*;
pub use instructions::*;
pub use pda::*;
pub use state::*;

#[program]
pub mod credential_registry {
    use super::*;

    /// Claim the registry; the signer becomes its authority
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Issue a diploma under a new identifier. The content reference is
    /// optional so that callers without off-chain documents can omit it.
    pub fn add_credential(
        ctx: Context<AddCredential>,
        diploma_id: String,
        content_reference: Option<String>,
    ) -> Result<()> {
        instructions::add_credential::handler(ctx, diploma_id, content_reference)
    }

    /// Revoke a valid diploma; the record remains as a tombstone
    pub fn revoke_credential(ctx: Context<RevokeCredential>, diploma_id: String) -> Result<()> {
        msg!("Revoking credential: {}", diploma_id);
        instructions::revoke_credential::handler(ctx, &diploma_id)
    }

    /// Report whether a diploma is valid, revoked or was never issued
    pub fn verify_credential(
        ctx: Context<VerifyCredential>,
        diploma_id: String,
    ) -> Result<Verification> {
        instructions::verify_credential::handler(ctx, &diploma_id)
    }
}
