//! Credential registry CLI
//!
//! Issue, revoke and verify diploma credentials against a deployed registry.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use credential_registry_sdk::{
    content::{document_reference, matches_document},
    find_credential_address, find_registry_address, ClientConfig, RegistryClient, RegistryReader,
    Verification,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "credential-cli")]
#[command(about = "Issue, revoke and verify diploma credentials")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML config file; the environment is used when omitted
    #[arg(long, env = "CREDENTIAL_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// RPC endpoint URL
    #[arg(long)]
    rpc_url: Option<String>,

    /// Path to the authority keypair file
    #[arg(long)]
    keypair: Option<String>,

    /// Registry program ID
    #[arg(long)]
    program_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim the registry with the configured keypair
    Init,
    /// Issue a credential
    Add {
        diploma_id: String,
        /// Opaque content reference, e.g. an IPFS CID
        #[arg(long, conflicts_with = "document")]
        reference: Option<String>,
        /// Document to hash into the content reference
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Revoke a valid credential
    Revoke { diploma_id: String },
    /// Check whether a credential is valid, revoked or never issued
    Verify {
        diploma_id: String,
        /// Also check a document against the stored content reference
        #[arg(long)]
        document: Option<PathBuf>,
    },
    /// Show the registry authority and live credential count
    Status,
    /// Print derived addresses without touching the network
    Address { diploma_id: Option<String> },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(keypair) = cli.keypair {
        config.keypair_path = keypair;
    }
    if let Some(program_id) = cli.program_id {
        config.program_id = program_id;
    }
    config.validate()?;

    match cli.command {
        Commands::Address { diploma_id } => {
            let program_id = config.program_id()?;
            let (registry, bump) = find_registry_address(&program_id)?;
            println!("registry:   {registry} (bump {bump})");
            if let Some(diploma_id) = diploma_id {
                let (credential, bump) = find_credential_address(&program_id, &diploma_id)?;
                println!("credential: {credential} (bump {bump})");
            }
        }
        Commands::Init => {
            let client = connect(&config)?;
            let signature = client.initialize()?;
            println!("Registry initialized by {} ({signature})", client.authority());
        }
        Commands::Add { diploma_id, reference, document } => {
            let reference = match document {
                Some(path) => {
                    let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                    Some(document_reference(&bytes))
                }
                None => reference,
            };
            let client = connect(&config)?;
            let signature = client.add_credential(&diploma_id, reference.as_deref())?;
            println!("Added {diploma_id} ({signature})");
        }
        Commands::Revoke { diploma_id } => {
            let client = connect(&config)?;
            let signature = client.revoke_credential(&diploma_id)?;
            println!("Revoked {diploma_id} ({signature})");
        }
        Commands::Verify { diploma_id, document } => {
            let reader = RegistryReader::new(&config).context("creating registry reader")?;
            let verification = reader.verify(&diploma_id)?;
            let label = match verification {
                Verification::NeverIssued => "never issued",
                Verification::Valid => "valid",
                Verification::Revoked => "revoked",
            };
            println!("{diploma_id}: {label}");

            if let (Some(path), Some(record)) = (document, reader.credential(&diploma_id)?) {
                let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
                let matches = matches_document(&record, &bytes);
                println!("document {}: {}", path.display(), if matches { "matches" } else { "does not match" });
            }
        }
        Commands::Status => match RegistryReader::new(&config)
            .context("creating registry reader")?
            .registry()?
        {
            Some(registry) => {
                println!("authority: {}", registry.authority);
                println!("valid credentials: {}", registry.count);
            }
            None => println!("registry not initialized"),
        },
    }

    Ok(())
}

fn connect(config: &ClientConfig) -> Result<RegistryClient> {
    let client = RegistryClient::new(config).context("creating registry client")?;
    tracing::debug!(program_id = %client.program_id(), rpc_url = %config.rpc_url, "client ready");
    Ok(client)
}
