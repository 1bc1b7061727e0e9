//! In-memory registry host
//!
//! Applies each operation the way the runtime applies a transaction: the
//! affected records are copied, the program's own state transitions run on
//! the copies, and the copies are committed only if every check passed.
//! Useful for dry runs and as a test harness.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;
use anchor_lang::AccountSerialize;
use credential_registry::{CredentialRecord, RegistryRecord, Verification};
use solana_sdk::account::Account;

use crate::addresses::{find_credential_address, find_registry_address};
use crate::error::{SdkError, SdkResult};
use crate::verification::{self, AccountSource};

pub struct LocalRegistry {
    program_id: Pubkey,
    registry_address: Pubkey,
    registry_bump: u8,
    registry: Option<RegistryRecord>,
    credentials: BTreeMap<Pubkey, CredentialRecord>,
    unix_timestamp: i64,
}

impl LocalRegistry {
    pub fn new(program_id: Pubkey) -> SdkResult<Self> {
        let (registry_address, registry_bump) = find_registry_address(&program_id)?;
        Ok(Self {
            program_id,
            registry_address,
            registry_bump,
            registry: None,
            credentials: BTreeMap::new(),
            unix_timestamp: 0,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn registry_address(&self) -> &Pubkey {
        &self.registry_address
    }

    /// Timestamp stamped on records by subsequent operations
    pub fn set_clock(&mut self, unix_timestamp: i64) {
        self.unix_timestamp = unix_timestamp;
    }

    pub fn registry(&self) -> Option<&RegistryRecord> {
        self.registry.as_ref()
    }

    pub fn credential(&self, diploma_id: &str) -> SdkResult<Option<&CredentialRecord>> {
        let (address, _) = find_credential_address(&self.program_id, diploma_id)?;
        Ok(self.credentials.get(&address))
    }

    /// Every stored credential record, tombstones included
    pub fn credentials(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.credentials.values()
    }

    pub fn initialize(&mut self, caller: &Pubkey) -> SdkResult<Pubkey> {
        let mut registry = self.registry.clone().unwrap_or_default();
        registry.initialize(*caller, self.registry_bump)?;

        self.registry = Some(registry);
        tracing::info!(authority = %caller, registry = %self.registry_address, "registry initialized");
        Ok(self.registry_address)
    }

    pub fn add_credential(
        &mut self,
        caller: &Pubkey,
        diploma_id: &str,
        content_reference: Option<&str>,
    ) -> SdkResult<Pubkey> {
        let mut registry = self.registry.clone().ok_or(SdkError::RegistryNotInitialized)?;
        // Account constraints run before the slot address is derived on-chain
        registry.require_authority(caller)?;
        let (address, bump) = find_credential_address(&self.program_id, diploma_id)?;
        let mut credential = self.credentials.get(&address).cloned().unwrap_or_default();

        credential.issue(
            &mut registry,
            *caller,
            diploma_id.to_string(),
            content_reference.map(str::to_string),
            self.unix_timestamp,
            bump,
        )?;

        tracing::info!(diploma_id, credential = %address, count = registry.count, "credential added");
        self.registry = Some(registry);
        self.credentials.insert(address, credential);
        Ok(address)
    }

    pub fn revoke_credential(&mut self, caller: &Pubkey, diploma_id: &str) -> SdkResult<()> {
        let mut registry = self.registry.clone().ok_or(SdkError::RegistryNotInitialized)?;
        // Account constraints run before the slot address is derived on-chain
        registry.require_authority(caller)?;
        let (address, _) = find_credential_address(&self.program_id, diploma_id)?;

        let mut credential = self
            .credentials
            .get(&address)
            .cloned()
            .ok_or(credential_registry::RegistryError::NotFound)?;

        credential.revoke(&mut registry, caller, self.unix_timestamp)?;

        tracing::info!(diploma_id, credential = %address, count = registry.count, "credential revoked");
        self.registry = Some(registry);
        self.credentials.insert(address, credential);
        Ok(())
    }

    pub fn verify(&self, diploma_id: &str) -> SdkResult<Verification> {
        verification::verify(self, &self.program_id, diploma_id)
    }

    fn to_account<T: AccountSerialize>(&self, record: &T, space: usize) -> SdkResult<Account> {
        let mut data = Vec::with_capacity(space);
        record.try_serialize(&mut data)?;
        data.resize(space, 0);
        Ok(Account {
            lamports: 1,
            data,
            owner: self.program_id,
            executable: false,
            rent_epoch: 0,
        })
    }
}

impl AccountSource for LocalRegistry {
    fn fetch_account(&self, address: &Pubkey) -> SdkResult<Option<Account>> {
        if *address == self.registry_address {
            return self
                .registry
                .as_ref()
                .map(|r| self.to_account(r, RegistryRecord::SIZE))
                .transpose();
        }
        self.credentials
            .get(address)
            .map(|c| self.to_account(c, CredentialRecord::SIZE))
            .transpose()
    }
}
