//! Error types for the credential registry SDK
//!
//! Program failures are surfaced as `SdkError::Registry` with the exact
//! on-chain variant, whether they come from a submitted transaction, from
//! the in-memory ledger, or from client-side validation.

use anchor_lang::prelude::Pubkey;
use credential_registry::RegistryError;
use solana_client::client_error::ClientError;
use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
use thiserror::Error;

pub type SdkResult<T> = std::result::Result<T, SdkError>;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Registry error: {0}")]
    Registry(RegistryError),

    #[error("Registry has not been initialized")]
    RegistryNotInitialized,

    #[error("Account {0} is not owned by the registry program")]
    UnexpectedOwner(Pubkey),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Keypair error: {0}")]
    Keypair(String),

    #[error("Anchor error: {0}")]
    Anchor(anchor_lang::error::Error),

    #[error("Solana client error: {0}")]
    Client(Box<ClientError>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SdkError {
    /// The registry variant behind this error, if any
    pub fn registry_error(&self) -> Option<RegistryError> {
        match self {
            SdkError::Registry(e) => Some(*e),
            _ => None,
        }
    }
}

impl From<RegistryError> for SdkError {
    fn from(err: RegistryError) -> Self {
        SdkError::Registry(err)
    }
}

impl From<anchor_lang::error::Error> for SdkError {
    fn from(err: anchor_lang::error::Error) -> Self {
        if let anchor_lang::error::Error::AnchorError(anchor_err) = &err {
            if let Some(registry_err) = RegistryError::from_code(anchor_err.error_code_number) {
                return SdkError::Registry(registry_err);
            }
        }
        SdkError::Anchor(err)
    }
}

impl From<ClientError> for SdkError {
    fn from(err: ClientError) -> Self {
        if let Some(TransactionError::InstructionError(_, InstructionError::Custom(code))) =
            err.get_transaction_error()
        {
            if let Some(registry_err) = RegistryError::from_code(code) {
                return SdkError::Registry(registry_err);
            }
        }
        SdkError::Client(Box::new(err))
    }
}
