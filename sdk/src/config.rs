//! Client configuration

use std::{fs, path::Path, str::FromStr};

use anchor_lang::prelude::Pubkey;
use serde::Deserialize;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::error::{SdkError, SdkResult};

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Solana RPC URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Path to the authority keypair (`~` is expanded)
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,

    /// Deployed registry program ID
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Commitment level for reads and confirmations
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            keypair_path: default_keypair_path(),
            program_id: default_program_id(),
            commitment: default_commitment(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, or from the environment when no
    /// path is given. A `.env` file is honored if present.
    pub fn load(config_path: Option<&Path>) -> SdkResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }

        let config = match config_path {
            Some(path) => Self::from_toml_str(&fs::read_to_string(path)?)?,
            None => Self::from_env(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> SdkResult<Self> {
        Ok(toml::from_str(content)?)
    }

    fn from_env() -> Self {
        Self {
            rpc_url: std::env::var("RPC_URL").unwrap_or_else(|_| default_rpc_url()),
            keypair_path: std::env::var("KEYPAIR_PATH").unwrap_or_else(|_| default_keypair_path()),
            program_id: std::env::var("PROGRAM_ID").unwrap_or_else(|_| default_program_id()),
            commitment: std::env::var("COMMITMENT").unwrap_or_else(|_| default_commitment()),
        }
    }

    pub fn validate(&self) -> SdkResult<()> {
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(SdkError::Config(format!("RPC URL must be http(s): {}", self.rpc_url)));
        }
        if self.keypair_path.is_empty() {
            return Err(SdkError::Config("Keypair path cannot be empty".to_string()));
        }
        self.program_id()?;
        self.commitment_config()?;
        Ok(())
    }

    pub fn program_id(&self) -> SdkResult<Pubkey> {
        Pubkey::from_str(&self.program_id)
            .map_err(|e| SdkError::Config(format!("Invalid program ID {}: {}", self.program_id, e)))
    }

    pub fn commitment_config(&self) -> SdkResult<CommitmentConfig> {
        let commitment = CommitmentLevel::from_str(&self.commitment)
            .map_err(|e| SdkError::Config(format!("Invalid commitment {}: {}", self.commitment, e)))?;
        Ok(CommitmentConfig { commitment })
    }

    /// Keypair path with `~` and environment variables expanded
    pub fn expanded_keypair_path(&self) -> SdkResult<String> {
        shellexpand::full(&self.keypair_path)
            .map(|p| p.into_owned())
            .map_err(|e| SdkError::Config(format!("Invalid keypair path: {e}")))
    }
}

fn default_rpc_url() -> String {
    "http://localhost:8899".to_string()
}

fn default_keypair_path() -> String {
    "~/.config/solana/id.json".to_string()
}

fn default_program_id() -> String {
    credential_registry::ID.to_string()
}

fn default_commitment() -> String {
    "confirmed".to_string()
}
