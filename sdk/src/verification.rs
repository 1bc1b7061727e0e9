//! Read path: locate and classify credentials without any authority
//!
//! Verification is a pure function of what is stored at the derived
//! address: no record means never issued, a `Revoked` record means
//! issued then revoked. The two are never conflated.

use anchor_lang::prelude::Pubkey;
use anchor_lang::{system_program, AccountDeserialize};
use credential_registry::{CredentialRecord, RegistryRecord, Verification};
use solana_client::rpc_client::RpcClient;
use solana_sdk::account::Account;

use crate::addresses::{find_credential_address, find_registry_address};
use crate::error::{SdkError, SdkResult};

/// Anything that can read an account by address
pub trait AccountSource {
    /// `Ok(None)` when nothing is stored at `address`
    fn fetch_account(&self, address: &Pubkey) -> SdkResult<Option<Account>>;
}

impl AccountSource for RpcClient {
    fn fetch_account(&self, address: &Pubkey) -> SdkResult<Option<Account>> {
        let response = self.get_account_with_commitment(address, self.commitment())?;
        Ok(response.value)
    }
}

/// An address funded by a third party but never allocated stays with the
/// system program; that still counts as "nothing stored".
fn is_unallocated(account: &Account) -> bool {
    account.owner == system_program::ID && account.data.is_empty()
}

/// Decode a credential record, `None` for an unallocated slot
pub fn decode_credential(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> SdkResult<Option<CredentialRecord>> {
    if is_unallocated(account) {
        return Ok(None);
    }
    if account.owner != *program_id {
        return Err(SdkError::UnexpectedOwner(*address));
    }

    let record = CredentialRecord::try_deserialize(&mut account.data.as_slice())?;
    Ok(record.is_occupied().then_some(record))
}

/// Decode the registry record, `None` for an unallocated slot
pub fn decode_registry(
    address: &Pubkey,
    account: &Account,
    program_id: &Pubkey,
) -> SdkResult<Option<RegistryRecord>> {
    if is_unallocated(account) {
        return Ok(None);
    }
    if account.owner != *program_id {
        return Err(SdkError::UnexpectedOwner(*address));
    }

    let record = RegistryRecord::try_deserialize(&mut account.data.as_slice())?;
    Ok(record.is_initialized().then_some(record))
}

/// Fetch the credential record for a diploma
pub fn fetch_credential<S: AccountSource + ?Sized>(
    source: &S,
    program_id: &Pubkey,
    diploma_id: &str,
) -> SdkResult<Option<CredentialRecord>> {
    let (address, _) = find_credential_address(program_id, diploma_id)?;
    match source.fetch_account(&address)? {
        Some(account) => decode_credential(&address, &account, program_id),
        None => Ok(None),
    }
}

/// Fetch the registry record
pub fn fetch_registry<S: AccountSource + ?Sized>(
    source: &S,
    program_id: &Pubkey,
) -> SdkResult<Option<RegistryRecord>> {
    let (address, _) = find_registry_address(program_id)?;
    match source.fetch_account(&address)? {
        Some(account) => decode_registry(&address, &account, program_id),
        None => Ok(None),
    }
}

/// Classify a diploma as never issued, valid or revoked
pub fn verify<S: AccountSource + ?Sized>(
    source: &S,
    program_id: &Pubkey,
    diploma_id: &str,
) -> SdkResult<Verification> {
    let record = fetch_credential(source, program_id, diploma_id)?;
    let verification = Verification::of(record.as_ref());

    tracing::debug!(diploma_id, ?verification, "verified credential");
    Ok(verification)
}
