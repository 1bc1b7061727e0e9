//! Instruction builders for the credential registry program

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::{system_program, InstructionData, ToAccountMetas};
use credential_registry::validation::{validate_content_reference, validate_diploma_id};

use crate::addresses::{find_credential_address, find_registry_address};
use crate::error::SdkResult;

/// Build the `initialize` instruction; `authority` signs and pays
pub fn build_initialize_instruction(program_id: &Pubkey, authority: &Pubkey) -> SdkResult<Instruction> {
    let (registry, _) = find_registry_address(program_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: credential_registry::accounts::Initialize {
            registry,
            authority: *authority,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: credential_registry::instruction::Initialize {}.data(),
    })
}

/// Build the `add_credential` instruction. Inputs are validated here so
/// that an unusable identifier is reported before any fee is spent.
pub fn build_add_credential_instruction(
    program_id: &Pubkey,
    authority: &Pubkey,
    diploma_id: &str,
    content_reference: Option<&str>,
) -> SdkResult<Instruction> {
    validate_diploma_id(diploma_id)?;
    if let Some(reference) = content_reference {
        validate_content_reference(reference)?;
    }

    let (registry, _) = find_registry_address(program_id)?;
    let (credential, _) = find_credential_address(program_id, diploma_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: credential_registry::accounts::AddCredential {
            registry,
            credential,
            authority: *authority,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: credential_registry::instruction::AddCredential {
            diploma_id: diploma_id.to_string(),
            content_reference: content_reference.map(str::to_string),
        }
        .data(),
    })
}

/// Build the `revoke_credential` instruction
pub fn build_revoke_credential_instruction(
    program_id: &Pubkey,
    authority: &Pubkey,
    diploma_id: &str,
) -> SdkResult<Instruction> {
    let (registry, _) = find_registry_address(program_id)?;
    let (credential, _) = find_credential_address(program_id, diploma_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: credential_registry::accounts::RevokeCredential {
            registry,
            credential,
            authority: *authority,
        }
        .to_account_metas(None),
        data: credential_registry::instruction::RevokeCredential {
            diploma_id: diploma_id.to_string(),
        }
        .data(),
    })
}

/// Build the read-only `verify_credential` instruction, for simulation
pub fn build_verify_credential_instruction(program_id: &Pubkey, diploma_id: &str) -> SdkResult<Instruction> {
    let (credential, _) = find_credential_address(program_id, diploma_id)?;

    Ok(Instruction {
        program_id: *program_id,
        accounts: credential_registry::accounts::VerifyCredential { credential }.to_account_metas(None),
        data: credential_registry::instruction::VerifyCredential {
            diploma_id: diploma_id.to_string(),
        }
        .data(),
    })
}
