//! # CLI Interface
//!
//! Command-line structure for `stellar-kit`, built with `clap` derive.
//! Network parameters come from flags, their `STELLAR_*` environment
//! fallbacks, or a JSON file passed with `--config`.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Keys, envelopes and submissions for Stellar-compatible ledgers.
#[derive(Parser, Debug)]
#[command(
    name = "stellar-kit",
    about = "Keys, envelopes and submissions for Stellar-compatible ledgers",
    version,
    propagate_version = true
)]
pub struct StellarKitCli {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Which network to sign for and which Horizon to talk to.
///
/// Flags override the `--config` file, which overrides the testnet defaults.
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    /// JSON file holding a network configuration.
    #[arg(long, short = 'c', global = true, env = "STELLAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Network passphrase hashed into every signature.
    #[arg(long, global = true, env = "STELLAR_NETWORK_PASSPHRASE")]
    pub network_passphrase: Option<String>,

    /// Horizon base URL.
    #[arg(long, global = true, env = "STELLAR_HORIZON_URL")]
    pub horizon_url: Option<String>,

    /// Fee per operation, in stroops.
    #[arg(long, global = true, env = "STELLAR_BASE_FEE")]
    pub base_fee: Option<u32>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new keypair.
    Keygen(KeygenArgs),
    /// Convert between StrKey text and raw key bytes.
    #[command(subcommand)]
    Strkey(StrkeyCommand),
    /// Build and sign a single-payment transaction offline.
    SignPayment(SignPaymentArgs),
    /// Print a base64 envelope as JSON.
    Decode(EnvelopeArg),
    /// Print the transaction hash of a base64 envelope.
    Hash(EnvelopeArg),
    /// Submit a base64 envelope to Horizon.
    Submit(EnvelopeArg),
    /// Print version information and exit.
    Version,
}

/// Arguments for `keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Encrypt the seed under this passphrase and print a protected account
    /// as JSON instead of the plain secret seed.
    #[arg(long, env = "STELLAR_KEY_PASSPHRASE")]
    pub passphrase: Option<String>,
}

/// `strkey` subcommands.
#[derive(Subcommand, Debug)]
pub enum StrkeyCommand {
    /// Decode a `G...` or `S...` key and print its role and hex payload.
    Decode {
        /// The StrKey text.
        key: String,
    },
    /// Encode 32 hex-encoded bytes as a StrKey.
    Encode {
        /// What the bytes are.
        #[arg(long, value_enum)]
        role: KeyRole,
        /// 64 hex characters.
        #[arg(long)]
        hex: String,
    },
}

/// StrKey roles exposed on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRole {
    /// Ed25519 public key (`G...`).
    Account,
    /// Ed25519 seed (`S...`).
    Seed,
}

/// Arguments for `sign-payment`.
#[derive(Args, Debug)]
pub struct SignPaymentArgs {
    /// Secret seed of the paying account (`S...`).
    #[arg(long, env = "STELLAR_SECRET_SEED")]
    pub secret: String,

    /// Account id receiving the payment (`G...`).
    #[arg(long)]
    pub destination: String,

    /// Amount in stroops.
    #[arg(long)]
    pub amount: i64,

    /// The source account's current sequence number. The transaction uses
    /// the next one.
    #[arg(long)]
    pub sequence: u64,

    /// `native` or `CODE:ISSUER`.
    #[arg(long, default_value = "native")]
    pub asset: String,

    /// Optional text memo (at most 28 bytes).
    #[arg(long)]
    pub memo: Option<String>,
}

/// A base64-encoded transaction envelope.
#[derive(Args, Debug)]
pub struct EnvelopeArg {
    /// Envelope XDR, base64.
    pub envelope: String,
}
