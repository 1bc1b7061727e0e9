use anchor_lang::prelude::*;

use crate::pda::RegistrySeeds;
use crate::state::{CredentialRecord, Verification};

/// Read-only: any caller, no signer, no state change
pub fn handler(ctx: Context<VerifyCredential>, diploma_id: &str) -> Result<Verification> {
    let (address, _) = RegistrySeeds::credential(diploma_id, ctx.program_id)?;
    require_keys_eq!(ctx.accounts.credential.key(), address, anchor_lang::error::ErrorCode::ConstraintSeeds);

    let record = CredentialRecord::load(&ctx.accounts.credential, ctx.program_id)?;
    let verification = Verification::of(record.as_ref());

    msg!("Credential {}: {:?}", diploma_id, verification);
    Ok(verification)
}

#[derive(Accounts)]
pub struct VerifyCredential<'info> {
    /// CHECK: Address is derived and checked by the handler; an empty slot
    /// reads as never issued
    pub credential: UncheckedAccount<'info>,
}
