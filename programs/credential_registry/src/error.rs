//! Registry errors

use anchor_lang::prelude::*;

/// Error codes are assigned in declaration order; new variants go at the end.
#[error_code]
pub enum RegistryError {
    // --- State machine errors

    #[msg("Registry is already initialized")]
    AlreadyInitialized,

    #[msg("Caller is not the registry authority")]
    Unauthorized,

    #[msg("A credential with this diploma ID already exists")]
    DuplicateIdentifier,

    #[msg("Credential not found")]
    NotFound,

    #[msg("Credential is already revoked")]
    AlreadyRevoked,

    #[msg("Could not derive a program address for the given seeds")]
    AddressDerivationFailed,

    // --- Input validation errors

    #[msg("Diploma ID cannot be empty")]
    EmptyDiplomaId,

    #[msg("Diploma ID is too long")]
    DiplomaIdTooLong,

    #[msg("Content reference cannot be empty")]
    EmptyContentReference,

    #[msg("Content reference is too long")]
    ContentReferenceTooLong,

    // --- Arithmetic errors

    #[msg("Credential count overflow")]
    CountOverflow,

    #[msg("Credential count underflow")]
    CountUnderflow,
}

impl RegistryError {
    /// Every variant, in code order
    pub const ALL: [RegistryError; 12] = [
        RegistryError::AlreadyInitialized,
        RegistryError::Unauthorized,
        RegistryError::DuplicateIdentifier,
        RegistryError::NotFound,
        RegistryError::AlreadyRevoked,
        RegistryError::AddressDerivationFailed,
        RegistryError::EmptyDiplomaId,
        RegistryError::DiplomaIdTooLong,
        RegistryError::EmptyContentReference,
        RegistryError::ContentReferenceTooLong,
        RegistryError::CountOverflow,
        RegistryError::CountUnderflow,
    ];

    /// Recover a variant from its on-chain custom error code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|e| u32::from(*e) == code)
    }
}
