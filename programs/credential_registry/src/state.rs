use anchor_lang::prelude::*;

use crate::error::RegistryError;
use crate::validation::{validate_content_reference, validate_diploma_id};

// ================================
// Limits
// ================================

/// Longest diploma identifier, bounded by the runtime's 32-byte seed limit
pub const MAX_DIPLOMA_ID_LEN: usize = 32;

/// Longest content reference (fits a CIDv1 or a hex-encoded SHA-256 digest)
pub const MAX_CONTENT_REFERENCE_LEN: usize = 64;

// ================================
// Registry Record
// ================================

/// Root state of a deployment. A default (all-zero) record is an
/// unclaimed slot: the authority is only ever set by `initialize`.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct RegistryRecord {
    /// Identity allowed to issue and revoke credentials
    pub authority: Pubkey,
    /// Number of credentials currently in the `Valid` state
    pub count: u64,
    /// Bump seed for PDA
    pub bump: u8,
}

impl RegistryRecord {
    pub const SIZE: usize = 8 + Self::INIT_SPACE;

    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    /// Claim the registry for `authority`
    pub fn initialize(&mut self, authority: Pubkey, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), RegistryError::AlreadyInitialized);

        self.authority = authority;
        self.count = 0;
        self.bump = bump;
        Ok(())
    }

    /// Instruction contexts already pin the authority through an account
    /// constraint. `issue` and `revoke` check it again here so the state
    /// transitions hold on any host, not only behind those constraints.
    pub fn require_authority(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *caller, RegistryError::Unauthorized);
        Ok(())
    }
}

// ================================
// Credential Record
// ================================

/// Lifecycle state of an issued credential. Revocation is a tombstone:
/// the record stays behind so "revoked" never reads as "never issued".
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum CredentialStatus {
    #[default]
    Valid,
    Revoked,
}

/// One issued diploma. A record with an empty `diploma_id` is an
/// unoccupied slot, since issuance rejects empty identifiers.
#[account]
#[derive(Default, Debug, InitSpace)]
pub struct CredentialRecord {
    /// Registry authority at the time of issuance
    pub authority: Pubkey,
    /// Caller-chosen identifier, also the address seed
    #[max_len(32)]
    pub diploma_id: String,
    /// Opaque pointer to the off-chain document (e.g. an IPFS CID)
    #[max_len(64)]
    pub content_reference: Option<String>,
    pub status: CredentialStatus,
    pub issued_at: i64,
    pub revoked_at: Option<i64>,
    /// Bump seed for PDA
    pub bump: u8,
}

impl CredentialRecord {
    pub const SIZE: usize = 8 + Self::INIT_SPACE;

    pub fn is_occupied(&self) -> bool {
        !self.diploma_id.is_empty()
    }

    pub fn is_verified(&self) -> bool {
        self.status == CredentialStatus::Valid
    }

    /// Issue a credential into this (empty) slot and count it in `registry`.
    /// Nothing is written unless every check passes.
    pub fn issue(
        &mut self,
        registry: &mut RegistryRecord,
        issuer: Pubkey,
        diploma_id: String,
        content_reference: Option<String>,
        issued_at: i64,
        bump: u8,
    ) -> Result<()> {
        registry.require_authority(&issuer)?;
        require!(!self.is_occupied(), RegistryError::DuplicateIdentifier);
        validate_diploma_id(&diploma_id)?;
        if let Some(reference) = &content_reference {
            validate_content_reference(reference)?;
        }

        let count = registry
            .count
            .checked_add(1)
            .ok_or(RegistryError::CountOverflow)?;

        self.authority = issuer;
        self.diploma_id = diploma_id;
        self.content_reference = content_reference;
        self.status = CredentialStatus::Valid;
        self.issued_at = issued_at;
        self.revoked_at = None;
        self.bump = bump;
        registry.count = count;
        Ok(())
    }

    /// Tombstone this credential and uncount it in `registry`
    pub fn revoke(
        &mut self,
        registry: &mut RegistryRecord,
        caller: &Pubkey,
        revoked_at: i64,
    ) -> Result<()> {
        registry.require_authority(caller)?;
        require!(self.is_occupied(), RegistryError::NotFound);
        require!(self.is_verified(), RegistryError::AlreadyRevoked);

        let count = registry
            .count
            .checked_sub(1)
            .ok_or(RegistryError::CountUnderflow)?;

        self.status = CredentialStatus::Revoked;
        self.revoked_at = Some(revoked_at);
        registry.count = count;
        Ok(())
    }

    /// Read the record stored in `info`. `None` means the slot was never
    /// allocated by this program.
    pub fn load(info: &AccountInfo, program_id: &Pubkey) -> Result<Option<Self>> {
        if info.owner != program_id || info.data_is_empty() {
            return Ok(None);
        }

        let data = info.try_borrow_data()?;
        let record = Self::try_deserialize(&mut &data[..])?;
        Ok(record.is_occupied().then_some(record))
    }

    /// Write the record back into `info`
    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        self.try_serialize(&mut writer)
    }
}

// ================================
// Verification
// ================================

/// Answer to "is this diploma currently valid?"
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
    NeverIssued,
    Valid,
    Revoked,
}

impl Verification {
    pub fn of(record: Option<&CredentialRecord>) -> Self {
        match record {
            None => Verification::NeverIssued,
            Some(r) if !r.is_occupied() => Verification::NeverIssued,
            Some(r) => match r.status {
                CredentialStatus::Valid => Verification::Valid,
                CredentialStatus::Revoked => Verification::Revoked,
            },
        }
    }
}
