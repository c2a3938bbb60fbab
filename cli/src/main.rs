// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # stellar-kit
//!
//! Entry point for the `stellar-kit` binary. Parses CLI arguments, resolves
//! the network configuration, initializes logging and runs one command.
//!
//! Everything except `submit` works offline:
//!
//! - `keygen`       — new keypair, optionally passphrase-protected
//! - `strkey`       — StrKey encode/decode
//! - `sign-payment` — build and sign a payment envelope
//! - `decode`       — envelope XDR to JSON
//! - `hash`         — transaction hash of an envelope
//! - `submit`       — post an envelope to Horizon
//! - `version`      — print build version information

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{json, Value};

use stellar_kit::account::ProtectedAccount;
use stellar_kit::config::NetworkConfig;
use stellar_kit::crypto::strkey::{self, VersionByte};
use stellar_kit::crypto::Keypair;
use stellar_kit::horizon::HorizonClient;
use stellar_kit::transaction::{sign_transaction, transaction_hash, TransactionBuilder};
use stellar_kit::types::{
    Asset, Memo, Operation, OperationBody, PublicKey, Transaction, TransactionEnvelope,
};
use stellar_kit::xdr::Xdr;

use cli::{Commands, KeyRole, NetworkArgs, SignPaymentArgs, StellarKitCli, StrkeyCommand};

/// The library and this binary are both named `stellar_kit`, so one
/// directive covers both.
const DEFAULT_LOG_FILTER: &str = "stellar_kit=info";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = StellarKitCli::parse();
    logging::init_logging(DEFAULT_LOG_FILTER, cli.log_format);

    let config = resolve_config(&cli.network)?;
    tracing::debug!(
        horizon = %config.horizon_url,
        base_fee = config.base_fee,
        "network configuration resolved"
    );

    match cli.command {
        Commands::Keygen(args) => keygen(args.passphrase.as_deref()),
        Commands::Strkey(cmd) => strkey_command(cmd),
        Commands::SignPayment(args) => {
            println!("{}", sign_payment(&args, &config)?);
            Ok(())
        }
        Commands::Decode(arg) => {
            let envelope = parse_envelope(&arg.envelope)?;
            println!("{}", serde_json::to_string_pretty(&envelope_json(&envelope))?);
            Ok(())
        }
        Commands::Hash(arg) => {
            let envelope = parse_envelope(&arg.envelope)?;
            println!("{}", hex::encode(transaction_hash(envelope.tx(), &config.passphrase)));
            Ok(())
        }
        Commands::Submit(arg) => submit(&arg.envelope, &config).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Testnet defaults, then the `--config` file, then individual flags.
fn resolve_config(args: &NetworkArgs) -> Result<NetworkConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid network config in {}", path.display()))?
        }
        None => NetworkConfig::testnet(),
    };
    if let Some(passphrase) = &args.network_passphrase {
        config.passphrase = passphrase.clone();
    }
    if let Some(url) = &args.horizon_url {
        config.horizon_url = url.clone();
    }
    if let Some(base_fee) = args.base_fee {
        config.base_fee = base_fee;
    }
    Ok(config)
}

fn keygen(passphrase: Option<&str>) -> Result<()> {
    match passphrase {
        Some(passphrase) => {
            let account =
                ProtectedAccount::create(passphrase).context("failed to protect new seed")?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }
        None => {
            let keypair = Keypair::generate();
            println!("account_id: {}", keypair.account_id());
            println!("secret_seed: {}", keypair.secret_seed());
        }
    }
    Ok(())
}

fn strkey_command(cmd: StrkeyCommand) -> Result<()> {
    match cmd {
        StrkeyCommand::Decode { key } => {
            let (version, payload) =
                strkey::decode_any(&key).with_context(|| format!("invalid StrKey {key:?}"))?;
            let role = match version {
                VersionByte::AccountId => "account",
                VersionByte::Seed => "seed",
            };
            println!("role: {role}");
            println!("hex: {}", hex::encode(payload));
        }
        StrkeyCommand::Encode { role, hex } => {
            let payload: [u8; 32] = hex::decode(hex.trim())
                .context("payload is not valid hex")?
                .try_into()
                .map_err(|bytes: Vec<u8>| {
                    anyhow::anyhow!("payload must be 32 bytes, got {}", bytes.len())
                })?;
            let version = match role {
                KeyRole::Account => VersionByte::AccountId,
                KeyRole::Seed => VersionByte::Seed,
            };
            println!("{}", strkey::encode(version, &payload));
        }
    }
    Ok(())
}

/// Builds and signs the payment, returning the envelope as base64 XDR.
fn sign_payment(args: &SignPaymentArgs, config: &NetworkConfig) -> Result<String> {
    let keypair = Keypair::from_secret_seed(&args.secret).context("invalid secret seed")?;
    let destination: PublicKey = args
        .destination
        .parse()
        .with_context(|| format!("invalid destination {:?}", args.destination))?;
    let asset: Asset = args
        .asset
        .parse()
        .with_context(|| format!("invalid asset {:?}", args.asset))?;
    if args.amount <= 0 {
        bail!("amount must be positive, got {}", args.amount);
    }

    let mut builder = TransactionBuilder::new()
        .source(keypair.public_key())
        .current_sequence(args.sequence)
        .base_fee(config.base_fee)
        .operation(Operation::payment(destination, asset, args.amount));
    if let Some(text) = &args.memo {
        builder = builder.memo(Memo::text(text).context("invalid memo")?);
    }
    let tx = builder.build().context("failed to build transaction")?;

    let envelope =
        sign_transaction(&tx, &keypair, &config.passphrase).context("failed to sign")?;
    tracing::info!(
        source = %keypair.account_id(),
        seq = tx.seq_num(),
        fee = tx.fee(),
        "payment signed"
    );
    Ok(envelope.to_xdr_base64())
}

fn parse_envelope(base64: &str) -> Result<TransactionEnvelope> {
    TransactionEnvelope::from_xdr_base64(base64).context("invalid envelope XDR")
}

async fn submit(base64: &str, config: &NetworkConfig) -> Result<()> {
    let envelope = parse_envelope(base64)?;
    let horizon = HorizonClient::new(config).context("failed to build HTTP client")?;
    let response = horizon
        .post_transaction(&envelope)
        .await
        .with_context(|| format!("submission to {} failed", horizon.base_url()))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "hash": response.hash,
            "ledger": response.ledger,
        }))?
    );
    Ok(())
}

fn envelope_json(envelope: &TransactionEnvelope) -> Value {
    let signatures: Vec<Value> = envelope
        .signatures()
        .iter()
        .map(|s| json!({ "hint": hex::encode(s.hint()), "signature": hex::encode(s.signature()) }))
        .collect();
    json!({
        "tx": transaction_json(envelope.tx()),
        "signatures": signatures,
    })
}

fn transaction_json(tx: &Transaction) -> Value {
    let time_bounds = tx
        .time_bounds()
        .map(|b| json!({ "min_time": b.min_time, "max_time": b.max_time }));
    let operations: Vec<Value> = tx.operations().iter().map(operation_json).collect();
    json!({
        "source_account": tx.source_account().account_id(),
        "fee": tx.fee(),
        "seq_num": tx.seq_num().to_string(),
        "time_bounds": time_bounds,
        "memo": memo_json(tx.memo()),
        "operations": operations,
    })
}

fn memo_json(memo: &Memo) -> Value {
    match memo {
        Memo::None => json!({ "type": "none" }),
        Memo::Text(text) => json!({ "type": "text", "value": text.as_str() }),
        Memo::Id(id) => json!({ "type": "id", "value": id.to_string() }),
        Memo::Hash(hash) => json!({ "type": "hash", "value": hex::encode(hash) }),
        Memo::Return(hash) => json!({ "type": "return", "value": hex::encode(hash) }),
    }
}

fn operation_json(op: &Operation) -> Value {
    let source = op.source_account().map(PublicKey::account_id);
    match op.body() {
        OperationBody::Payment(p) => json!({
            "type": "payment",
            "source_account": source,
            "destination": p.destination.account_id(),
            "asset": p.asset.to_string(),
            "amount": p.amount.to_string(),
        }),
        OperationBody::ChangeTrust(t) => json!({
            "type": "change_trust",
            "source_account": source,
            "line": t.line.to_string(),
            "limit": t.limit.to_string(),
        }),
    }
}

fn print_version() {
    println!("stellar-kit {}", env!("CARGO_PKG_VERSION"));
    println!("default network: {}", NetworkConfig::default().passphrase);
}
