#![allow(dead_code)]

use anchor_lang::solana_program::{account_info::AccountInfo, entrypoint::ProgramResult};
use anchor_lang::{AccountDeserialize, AnchorDeserialize, Event, InstructionData, ToAccountMetas};
use base64::{engine::general_purpose::STANDARD, Engine};
use solana_program_test::{processor, BanksClient, ProgramTest, ProgramTestBanksClientExt};
use solana_sdk::{
    hash::Hash,
    instruction::{Instruction, InstructionError},
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction, system_program,
    transaction::{Transaction, TransactionError},
};

use credential_registry::{CredentialRecord, RegistryError, RegistryRecord, RegistrySeeds, Verification};

/// Program logs on success, the transaction error otherwise
pub type TxResult = Result<Vec<String>, TransactionError>;

// `entry` ties the account slice to the accounts' own lifetime, which the
// builtin processor signature cannot express.
fn process_instruction(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let accounts = Box::leak(Box::new(accounts.to_vec()));
    credential_registry::entry(program_id, accounts, data)
}

pub struct TestContext {
    pub banks_client: BanksClient,
    pub payer: Keypair,
    pub authority: Keypair,
    pub recent_blockhash: Hash,
    pub program_id: Pubkey,
}

impl TestContext {
    pub async fn new() -> Self {
        let program_id = credential_registry::ID;
        let program_test = ProgramTest::new(
            "credential_registry",
            program_id,
            processor!(process_instruction),
        );

        let (banks_client, payer, recent_blockhash) = program_test.start().await;
        let mut context = Self {
            banks_client,
            payer,
            authority: Keypair::new(),
            recent_blockhash,
            program_id,
        };

        let authority = context.authority.pubkey();
        context.fund(&authority, 10_000_000_000).await; // 10 SOL
        context
    }

    /// A fresh keypair with enough lamports to pay fees and rent
    pub async fn funded_keypair(&mut self) -> Keypair {
        let keypair = Keypair::new();
        self.fund(&keypair.pubkey(), 1_000_000_000).await;
        keypair
    }

    /// Transfer lamports from the bank payer to any address
    pub async fn fund(&mut self, address: &Pubkey, lamports: u64) {
        let payer = self.payer.insecure_clone();
        let ix = system_instruction::transfer(&payer.pubkey(), address, lamports);
        self.send_transaction(&[ix], &[&payer]).await.unwrap();
    }

    pub fn registry_address(&self) -> Pubkey {
        RegistrySeeds::registry(&self.program_id).unwrap().0
    }

    /// Underivable identifiers get an arbitrary address; the program
    /// rejects them before looking at the account.
    pub fn credential_address(&self, diploma_id: &str) -> Pubkey {
        RegistrySeeds::credential(diploma_id, &self.program_id)
            .map_or_else(|_| Pubkey::new_unique(), |(address, _)| address)
    }

    pub async fn initialize(&mut self, authority: &Keypair) -> TxResult {
        let ix = Instruction {
            program_id: self.program_id,
            accounts: credential_registry::accounts::Initialize {
                registry: self.registry_address(),
                authority: authority.pubkey(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: credential_registry::instruction::Initialize {}.data(),
        };

        self.send_transaction(&[ix], &[authority]).await
    }

    pub async fn add_credential(
        &mut self,
        authority: &Keypair,
        diploma_id: &str,
        content_reference: Option<&str>,
    ) -> TxResult {
        let credential = self.credential_address(diploma_id);
        self.add_credential_at(authority, credential, diploma_id, content_reference).await
    }

    /// `add_credential` against an explicit slot address
    pub async fn add_credential_at(
        &mut self,
        authority: &Keypair,
        credential: Pubkey,
        diploma_id: &str,
        content_reference: Option<&str>,
    ) -> TxResult {
        let ix = Instruction {
            program_id: self.program_id,
            accounts: credential_registry::accounts::AddCredential {
                registry: self.registry_address(),
                credential,
                authority: authority.pubkey(),
                system_program: system_program::ID,
            }
            .to_account_metas(None),
            data: credential_registry::instruction::AddCredential {
                diploma_id: diploma_id.to_string(),
                content_reference: content_reference.map(str::to_string),
            }
            .data(),
        };

        self.send_transaction(&[ix], &[authority]).await
    }

    pub async fn revoke_credential(&mut self, authority: &Keypair, diploma_id: &str) -> TxResult {
        let ix = Instruction {
            program_id: self.program_id,
            accounts: credential_registry::accounts::RevokeCredential {
                registry: self.registry_address(),
                credential: self.credential_address(diploma_id),
                authority: authority.pubkey(),
            }
            .to_account_metas(None),
            data: credential_registry::instruction::RevokeCredential {
                diploma_id: diploma_id.to_string(),
            }
            .data(),
        };

        self.send_transaction(&[ix], &[authority]).await
    }

    /// Simulate `verify_credential` and decode its return data
    pub async fn verify_credential(&mut self, diploma_id: &str) -> Result<Verification, TransactionError> {
        let ix = Instruction {
            program_id: self.program_id,
            accounts: credential_registry::accounts::VerifyCredential {
                credential: self.credential_address(diploma_id),
            }
            .to_account_metas(None),
            data: credential_registry::instruction::VerifyCredential {
                diploma_id: diploma_id.to_string(),
            }
            .data(),
        };

        let blockhash = self.banks_client.get_latest_blockhash().await.unwrap();
        let tx = Transaction::new_signed_with_payer(
            &[ix],
            Some(&self.payer.pubkey()),
            &[&self.payer],
            blockhash,
        );
        let simulation = self.banks_client.simulate_transaction(tx).await.unwrap();
        if let Some(Err(err)) = simulation.result {
            return Err(err);
        }

        let return_data = simulation
            .simulation_details
            .and_then(|details| details.return_data);
        if let Some(return_data) = &return_data {
            assert_eq!(return_data.program_id, self.program_id);
        }
        // Trailing zero bytes of return data are trimmed by the runtime
        let mut data = return_data.map(|r| r.data).unwrap_or_default();
        data.resize(1, 0);
        Ok(Verification::try_from_slice(&data).unwrap())
    }

    pub async fn registry(&mut self) -> Option<RegistryRecord> {
        let address = self.registry_address();
        let account = self.banks_client.get_account(address).await.unwrap()?;
        Some(RegistryRecord::try_deserialize(&mut account.data.as_slice()).unwrap())
    }

    pub async fn credential(&mut self, diploma_id: &str) -> Option<CredentialRecord> {
        let address = self.credential_address(diploma_id);
        let account = self.banks_client.get_account(address).await.unwrap()?;
        if account.owner != self.program_id {
            return None;
        }
        Some(CredentialRecord::try_deserialize(&mut account.data.as_slice()).unwrap())
    }

    pub async fn count(&mut self) -> u64 {
        self.registry().await.map_or(0, |r| r.count)
    }

    async fn send_transaction(&mut self, instructions: &[Instruction], signers: &[&Keypair]) -> TxResult {
        // A fresh blockhash keeps repeated identical operations distinct
        self.recent_blockhash = self
            .banks_client
            .get_new_latest_blockhash(&self.recent_blockhash)
            .await
            .unwrap();

        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&signers[0].pubkey()),
            signers,
            self.recent_blockhash,
        );
        let outcome = self
            .banks_client
            .process_transaction_with_metadata(transaction)
            .await
            .unwrap();

        outcome.result?;
        Ok(outcome.metadata.map(|m| m.log_messages).unwrap_or_default())
    }
}

/// Custom program error code carried by a failed transaction
pub fn custom_code(err: &TransactionError) -> Option<u32> {
    match err {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(*code),
        _ => None,
    }
}

pub fn assert_registry_error<T: std::fmt::Debug>(result: Result<T, TransactionError>, expected: RegistryError) {
    let err = result.unwrap_err();
    assert_eq!(custom_code(&err), Some(u32::from(expected)), "unexpected error: {err:?}");
}

pub fn assert_anchor_error<T: std::fmt::Debug>(
    result: Result<T, TransactionError>,
    expected: anchor_lang::error::ErrorCode,
) {
    let err = result.unwrap_err();
    assert_eq!(custom_code(&err), Some(expected as u32), "unexpected error: {err:?}");
}

/// Events of type `E` emitted through `emit!` in the given logs
pub fn events<E: Event>(logs: &[String]) -> Vec<E> {
    logs.iter()
        .filter_map(|line| line.strip_prefix("Program data: "))
        .filter_map(|encoded| STANDARD.decode(encoded).ok())
        .filter(|data| data.starts_with(E::DISCRIMINATOR))
        .filter_map(|data| E::try_from_slice(&data[E::DISCRIMINATOR.len()..]).ok())
        .collect()
}
