use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};

use crate::error::RegistryError;
use crate::events::CredentialIssued;
use crate::pda::{RegistrySeeds, CREDENTIAL_SEED, REGISTRY_SEED};
use crate::state::{CredentialRecord, RegistryRecord};

pub fn handler(
    ctx: Context<AddCredential>,
    diploma_id: String,
    content_reference: Option<String>,
) -> Result<()> {
    let issuer = ctx.accounts.authority.key();
    let credential_info = ctx.accounts.credential.to_account_info();

    let (address, bump) = RegistrySeeds::credential(&diploma_id, ctx.program_id)?;
    require_keys_eq!(*credential_info.key, address, anchor_lang::error::ErrorCode::ConstraintSeeds);

    let existing = CredentialRecord::load(&credential_info, ctx.program_id)?;
    let needs_slot = existing.is_none();
    let mut credential = existing.unwrap_or_default();

    let issued_at = Clock::get()?.unix_timestamp;
    let registry = &mut ctx.accounts.registry;
    credential.issue(
        registry,
        issuer,
        diploma_id,
        content_reference,
        issued_at,
        bump,
    )?;

    if needs_slot {
        let signer_seeds: &[&[u8]] = &[CREDENTIAL_SEED, credential.diploma_id.as_bytes(), &[bump]];
        allocate_slot(
            &ctx.accounts.authority,
            &credential_info,
            &ctx.accounts.system_program,
            signer_seeds,
            ctx.program_id,
        )?;
    }
    credential.store(&credential_info)?;

    emit!(CredentialIssued {
        credential: address,
        diploma_id: credential.diploma_id.clone(),
        content_reference: credential.content_reference.clone(),
        authority: issuer,
        count: registry.count,
        issued_at,
    });
    msg!("Credential added: {}", credential.diploma_id);
    if let Some(reference) = &credential.content_reference {
        msg!("Content reference: {}", reference);
    }
    Ok(())
}

/// Create the credential PDA owned by this program. A slot that already
/// holds lamports cannot go through `create_account`, so it is topped up to
/// rent exemption, then allocated and assigned.
fn allocate_slot<'info>(
    payer: &Signer<'info>,
    slot: &AccountInfo<'info>,
    system: &Program<'info, System>,
    signer_seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<()> {
    let space = CredentialRecord::SIZE as u64;
    let rent = Rent::get()?.minimum_balance(CredentialRecord::SIZE);
    let signer = &[signer_seeds];
    let current = slot.lamports();

    if current == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system.to_account_info(),
                CreateAccount {
                    from: payer.to_account_info(),
                    to: slot.clone(),
                },
                signer,
            ),
            rent,
            space,
            program_id,
        );
    }

    let shortfall = rent.saturating_sub(current);
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system.to_account_info(),
                Transfer {
                    from: payer.to_account_info(),
                    to: slot.clone(),
                },
            ),
            shortfall,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.to_account_info(),
            Allocate {
                account_to_allocate: slot.clone(),
            },
            signer,
        ),
        space,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.to_account_info(),
            Assign {
                account_to_assign: slot.clone(),
            },
            signer,
        ),
        program_id,
    )
}

#[derive(Accounts)]
pub struct AddCredential<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED],
        bump = registry.bump,
        constraint = registry.authority == authority.key() @ RegistryError::Unauthorized
    )]
    pub registry: Account<'info, RegistryRecord>,

    /// CHECK: Slot for this diploma ID. The handler derives its address,
    /// so an underivable ID fails with `AddressDerivationFailed`. An
    /// occupied slot (including a revoked tombstone) is rejected with
    /// `DuplicateIdentifier`; an empty one is created here.
    #[account(mut)]
    pub credential: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}
