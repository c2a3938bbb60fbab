//! # Protocol Configuration & Constants
//!
//! Every magic number the wire format and the key layer depend on lives here.
//! Most of them are not ours to choose: the network publishes them, and a
//! single wrong byte means the network silently rejects everything we sign.
//!
//! The one value that *is* a policy decision, the per-operation base fee, is
//! carried in [`NetworkConfig`] so callers can follow the network when it
//! changes instead of waiting for a new release.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Passphrase of the public test network. Its SHA-256 is the network id that
/// every testnet signature commits to.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Passphrase of the production network.
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Default Horizon endpoint for the test network.
pub const TESTNET_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

/// Default Horizon endpoint for the production network.
pub const PUBLIC_HORIZON_URL: &str = "https://horizon.stellar.org";

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Flat fee per operation, in stroops. The network raised this floor in the
/// past and may again, which is why [`NetworkConfig::base_fee`] exists.
pub const DEFAULT_BASE_FEE: u32 = 100;

/// Stroops per lumen. Amounts on the wire are integers at 7-decimal precision.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

// ---------------------------------------------------------------------------
// Wire Bounds
// ---------------------------------------------------------------------------

/// `Operation operations<100>` in the transaction definition.
pub const MAX_OPERATIONS: usize = 100;

/// `DecoratedSignature signatures<20>` in the envelope definition.
pub const MAX_SIGNATURES: usize = 20;

/// `Signature` is `opaque<64>`.
pub const MAX_SIGNATURE_LENGTH: usize = 64;

/// `MEMO_TEXT` carries `string<28>`.
pub const MAX_MEMO_TEXT_LENGTH: usize = 28;

/// Signature hints are the last four bytes of the signer's public key.
pub const SIGNATURE_HINT_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Ed25519 public keys and seeds are both 32 bytes.
pub const KEY_LENGTH: usize = 32;

/// StrKey version byte for account ids. Encodes to a leading `G`.
pub const STRKEY_VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// StrKey version byte for secret seeds. Encodes to a leading `S`.
pub const STRKEY_VERSION_SEED: u8 = 18 << 3;

/// Version byte + payload + CRC-16.
pub const STRKEY_DECODED_LENGTH: usize = 1 + KEY_LENGTH + 2;

/// Length of a StrKey string for a 32-byte payload: ceil(35 * 8 / 5).
pub const STRKEY_ENCODED_LENGTH: usize = 56;

// ---------------------------------------------------------------------------
// Passphrase Protection
// ---------------------------------------------------------------------------

/// Argon2id iterations at the interactive tier.
pub const KDF_OPS_LIMIT: u32 = 2;

/// Argon2id memory at the interactive tier, in KiB (64 MiB).
pub const KDF_MEM_LIMIT_KIB: u32 = 64 * 1024;

/// Argon2id lanes.
pub const KDF_PARALLELISM: u32 = 1;

/// Random salt length for seed encryption, in bytes (hex-encoded externally).
pub const SALT_LENGTH: usize = 16;

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// How long a Horizon request may take before the client gives up.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// Runtime parameters describing which network we sign for and talk to.
///
/// Deserializable so binaries can load it from a file; every field has a
/// testnet default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Network passphrase. Hashed into every signature payload.
    pub passphrase: String,
    /// Base URL of the Horizon query/submission service.
    pub horizon_url: String,
    /// Fee per operation, in stroops.
    pub base_fee: u32,
    /// HTTP request timeout, in seconds.
    pub request_timeout_secs: u64,
}

impl NetworkConfig {
    /// The public test network.
    pub fn testnet() -> Self {
        Self {
            passphrase: TESTNET_PASSPHRASE.to_string(),
            horizon_url: TESTNET_HORIZON_URL.to_string(),
            base_fee: DEFAULT_BASE_FEE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }

    /// The production network.
    pub fn public() -> Self {
        Self {
            passphrase: PUBLIC_PASSPHRASE.to_string(),
            horizon_url: PUBLIC_HORIZON_URL.to_string(),
            ..Self::testnet()
        }
    }

    /// A private or standalone network with its own passphrase and endpoint.
    pub fn custom(passphrase: &str, horizon_url: &str) -> Self {
        Self {
            passphrase: passphrase.to_string(),
            horizon_url: horizon_url.to_string(),
            ..Self::testnet()
        }
    }

    /// Overrides the per-operation fee.
    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// SHA-256 of the passphrase: the 32-byte network id.
    pub fn network_id(&self) -> [u8; 32] {
        crate::crypto::hash::network_id(&self.passphrase)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::testnet()
    }
}
