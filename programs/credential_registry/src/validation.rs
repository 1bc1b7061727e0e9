// Input validation for credential issuance
use anchor_lang::prelude::*;

use crate::error::RegistryError;
use crate::state::{MAX_CONTENT_REFERENCE_LEN, MAX_DIPLOMA_ID_LEN};

/// Diploma identifiers double as address seeds, so they are measured in bytes
pub fn validate_diploma_id(diploma_id: &str) -> Result<()> {
    require!(!diploma_id.is_empty(), RegistryError::EmptyDiplomaId);
    require!(
        diploma_id.len() <= MAX_DIPLOMA_ID_LEN,
        RegistryError::DiplomaIdTooLong
    );
    Ok(())
}

pub fn validate_content_reference(reference: &str) -> Result<()> {
    require!(!reference.is_empty(), RegistryError::EmptyContentReference);
    require!(
        reference.len() <= MAX_CONTENT_REFERENCE_LEN,
        RegistryError::ContentReferenceTooLong
    );
    Ok(())
}
