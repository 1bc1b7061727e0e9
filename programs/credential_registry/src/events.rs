use anchor_lang::prelude::*;

// ================================
// Registry Events
// ================================

/// Emitted once, when a deployment's registry is claimed
#[event]
pub struct RegistryInitialized {
    pub registry: Pubkey,
    pub authority: Pubkey,
}

/// Emitted when a diploma is issued
#[event]
pub struct CredentialIssued {
    pub credential: Pubkey,
    pub diploma_id: String,
    pub content_reference: Option<String>,
    pub authority: Pubkey,
    pub count: u64,                        // Registry count after issuance
    pub issued_at: i64,
}

/// Emitted when a diploma is revoked; the record itself is kept
#[event]
pub struct CredentialRevoked {
    pub credential: Pubkey,
    pub diploma_id: String,
    pub authority: Pubkey,
    pub count: u64,                        // Registry count after revocation
    pub revoked_at: i64,
}
