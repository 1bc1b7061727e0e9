use anchor_lang::prelude::*;

use crate::error::RegistryError;
use crate::events::CredentialRevoked;
use crate::pda::{RegistrySeeds, REGISTRY_SEED};
use crate::state::{CredentialRecord, RegistryRecord};

pub fn handler(ctx: Context<RevokeCredential>, diploma_id: &str) -> Result<()> {
    let caller = ctx.accounts.authority.key();
    let credential_info = ctx.accounts.credential.to_account_info();

    let (address, _) = RegistrySeeds::credential(diploma_id, ctx.program_id)?;
    require_keys_eq!(*credential_info.key, address, anchor_lang::error::ErrorCode::ConstraintSeeds);

    let mut credential = CredentialRecord::load(&credential_info, ctx.program_id)?
        .ok_or(RegistryError::NotFound)?;

    let revoked_at = Clock::get()?.unix_timestamp;
    let registry = &mut ctx.accounts.registry;
    credential.revoke(registry, &caller, revoked_at)?;
    credential.store(&credential_info)?;

    emit!(CredentialRevoked {
        credential: address,
        diploma_id: credential.diploma_id.clone(),
        authority: caller,
        count: registry.count,
        revoked_at,
    });
    msg!("Credential revoked: {}", credential.diploma_id);
    Ok(())
}

#[derive(Accounts)]
pub struct RevokeCredential<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.authority == authority.key() @ RegistryError::Unauthorized
    )]
    pub registry: Account<'info, RegistryRecord>,

    /// CHECK: Address is derived and checked by the handler. The slot may
    /// be empty, which is reported as `NotFound` instead of a
    /// deserialization error.
    #[account(mut)]
    pub credential: UncheckedAccount<'info>,

    pub authority: Signer<'info>,
}
