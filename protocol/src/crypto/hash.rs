//! # Hashing
//!
//! SHA-256 is the only digest the ledger uses: it names networks and it
//! reduces a signature payload to the 32 bytes that actually get signed.

use sha2::{Digest, Sha256};

/// SHA-256 of `data`.
///
/// # Example
///
/// ```
/// use stellar_kit::crypto::sha256;
///
/// let hash = sha256(b"abc");
/// assert_eq!(hash[0], 0xba);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The network id: SHA-256 of the network passphrase.
///
/// Every signature payload starts with this, so a transaction signed for one
/// network is worthless on any other.
pub fn network_id(passphrase: &str) -> [u8; 32] {
    sha256(passphrase.as_bytes())
}
