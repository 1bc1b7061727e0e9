use anchor_lang::prelude::*;

use crate::events::RegistryInitialized;
use crate::pda::REGISTRY_SEED;
use crate::state::RegistryRecord;

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let authority = ctx.accounts.authority.key();
    let registry = &mut ctx.accounts.registry;

    registry.initialize(authority, ctx.bumps.registry)?;

    emit!(RegistryInitialized {
        registry: registry.key(),
        authority,
    });
    msg!("Credential registry initialized by: {}", authority);
    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Singleton registry record. Created on first call; a second call
    /// finds it claimed and fails with `AlreadyInitialized`.
    #[account(
        init_if_needed,
        payer = authority,
        space = RegistryRecord::SIZE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, RegistryRecord>,

    /// Becomes the registry authority
    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
