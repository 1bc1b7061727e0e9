//! RPC client for a deployed credential registry

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::instruction::Instruction;
use credential_registry::{CredentialRecord, RegistryRecord, Verification};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    signature::{read_keypair_file, Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};
use crate::instructions::{
    build_add_credential_instruction, build_initialize_instruction,
    build_revoke_credential_instruction,
};
use crate::verification;

/// Read-only view of a deployed registry. Needs no keypair: verification
/// is open to anyone.
pub struct RegistryReader {
    rpc: RpcClient,
    program_id: Pubkey,
}

impl RegistryReader {
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment_config()?);
        Ok(Self {
            rpc,
            program_id: config.program_id()?,
        })
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn verify(&self, diploma_id: &str) -> SdkResult<Verification> {
        verification::verify(&self.rpc, &self.program_id, diploma_id)
    }

    pub fn registry(&self) -> SdkResult<Option<RegistryRecord>> {
        verification::fetch_registry(&self.rpc, &self.program_id)
    }

    pub fn credential(&self, diploma_id: &str) -> SdkResult<Option<CredentialRecord>> {
        verification::fetch_credential(&self.rpc, &self.program_id, diploma_id)
    }
}

/// Submits registry operations signed by a single authority keypair
pub struct RegistryClient {
    reader: RegistryReader,
    payer: Keypair,
}

impl RegistryClient {
    pub fn new(config: &ClientConfig) -> SdkResult<Self> {
        let keypair_path = config.expanded_keypair_path()?;
        let payer = read_keypair_file(&keypair_path)
            .map_err(|e| SdkError::Keypair(format!("{keypair_path}: {e}")))?;

        Self::with_keypair(config, payer)
    }

    pub fn with_keypair(config: &ClientConfig, payer: Keypair) -> SdkResult<Self> {
        Ok(Self {
            reader: RegistryReader::new(config)?,
            payer,
        })
    }

    /// Identity that signs every submitted operation
    pub fn authority(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn program_id(&self) -> &Pubkey {
        self.reader.program_id()
    }

    pub fn reader(&self) -> &RegistryReader {
        &self.reader
    }

    pub fn initialize(&self) -> SdkResult<Signature> {
        let ix = build_initialize_instruction(self.program_id(), &self.authority())?;
        let signature = self.send(ix)?;

        tracing::info!(authority = %self.authority(), %signature, "registry initialized");
        Ok(signature)
    }

    pub fn add_credential(&self, diploma_id: &str, content_reference: Option<&str>) -> SdkResult<Signature> {
        let ix = build_add_credential_instruction(
            self.program_id(),
            &self.authority(),
            diploma_id,
            content_reference,
        )?;
        let signature = self.send(ix)?;

        tracing::info!(diploma_id, %signature, "credential added");
        Ok(signature)
    }

    pub fn revoke_credential(&self, diploma_id: &str) -> SdkResult<Signature> {
        let ix = build_revoke_credential_instruction(self.program_id(), &self.authority(), diploma_id)?;
        let signature = self.send(ix)?;

        tracing::info!(diploma_id, %signature, "credential revoked");
        Ok(signature)
    }

    pub fn verify(&self, diploma_id: &str) -> SdkResult<Verification> {
        self.reader.verify(diploma_id)
    }

    pub fn registry(&self) -> SdkResult<Option<RegistryRecord>> {
        self.reader.registry()
    }

    pub fn credential(&self, diploma_id: &str) -> SdkResult<Option<CredentialRecord>> {
        self.reader.credential(diploma_id)
    }

    fn send(&self, ix: Instruction) -> SdkResult<Signature> {
        let rpc = &self.reader.rpc;
        let blockhash = rpc.get_latest_blockhash()?;
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer.pubkey()),
            &[&self.payer],
            blockhash,
        );

        tracing::debug!(payer = %self.payer.pubkey(), "submitting transaction");
        Ok(rpc.send_and_confirm_transaction(&tx)?)
    }
}
