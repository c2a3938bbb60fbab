//! Signature payloads and the envelope that carries signatures to the network.

use super::Transaction;
use crate::config::{MAX_SIGNATURES, MAX_SIGNATURE_LENGTH, SIGNATURE_HINT_LENGTH};
use crate::error::Error;
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

const ENVELOPE_TYPE_TX: i32 = 2;

/// `union switch (EnvelopeType type)` inside the signature payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaggedTransaction {
    Tx(Transaction),
}

impl TaggedTransaction {
    pub fn discriminant(&self) -> i32 {
        match self {
            TaggedTransaction::Tx(_) => ENVELOPE_TYPE_TX,
        }
    }
}

impl Xdr for TaggedTransaction {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            TaggedTransaction::Tx(tx) => tx.encode(w),
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            ENVELOPE_TYPE_TX => Ok(TaggedTransaction::Tx(Transaction::decode(r)?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "EnvelopeType",
                value,
            }),
        }
    }
}

/// What actually gets hashed and signed: the network id followed by the
/// tagged transaction. Binding the network id into the payload is what stops
/// a testnet signature from being replayed on the public network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSignaturePayload {
    pub network_id: [u8; 32],
    pub tagged_transaction: TaggedTransaction,
}

impl Xdr for TransactionSignaturePayload {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(&self.network_id);
        self.tagged_transaction.encode(w);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            network_id: r.read_fixed_opaque()?,
            tagged_transaction: TaggedTransaction::decode(r)?,
        })
    }
}

/// A signature plus the hint a verifier uses to find the key that made it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecoratedSignature {
    hint: [u8; SIGNATURE_HINT_LENGTH],
    signature: Vec<u8>,
}

impl DecoratedSignature {
    /// Rejects signatures longer than the wire's 64-byte bound.
    pub fn new(hint: [u8; SIGNATURE_HINT_LENGTH], signature: Vec<u8>) -> Result<Self, Error> {
        if signature.len() > MAX_SIGNATURE_LENGTH {
            return Err(Error::EncodingFailed(format!(
                "signature is {} bytes, maximum is {MAX_SIGNATURE_LENGTH}",
                signature.len()
            )));
        }
        Ok(Self { hint, signature })
    }

    pub fn hint(&self) -> &[u8; SIGNATURE_HINT_LENGTH] {
        &self.hint
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl Xdr for DecoratedSignature {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_fixed_opaque(&self.hint);
        w.write_var_opaque(&self.signature);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            hint: r.read_fixed_opaque()?,
            signature: r.read_var_opaque(MAX_SIGNATURE_LENGTH)?,
        })
    }
}

/// A transaction with its signatures: the unit submitted to the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    tx: Transaction,
    signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    /// Rejects more than 20 signatures.
    pub fn new(tx: Transaction, signatures: Vec<DecoratedSignature>) -> Result<Self, Error> {
        if signatures.len() > MAX_SIGNATURES {
            return Err(Error::EncodingFailed(format!(
                "{} signatures, maximum is {MAX_SIGNATURES}",
                signatures.len()
            )));
        }
        Ok(Self { tx, signatures })
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        &self.signatures
    }

    /// A new envelope with `signature` appended. For multi-signature accounts.
    pub fn with_signature(&self, signature: DecoratedSignature) -> Result<Self, Error> {
        let mut signatures = self.signatures.clone();
        signatures.push(signature);
        Self::new(self.tx.clone(), signatures)
    }
}

impl Xdr for TransactionEnvelope {
    fn encode(&self, w: &mut XdrWriter) {
        self.tx.encode(w);
        w.write_array(&self.signatures);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            tx: Transaction::decode(r)?,
            signatures: r.read_array(MAX_SIGNATURES)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Asset, Memo, Operation, PublicKey};

    fn tx() -> Transaction {
        let op = Operation::payment(PublicKey::from_bytes([0x02; 32]), Asset::Native, 1);
        Transaction::new(PublicKey::from_bytes([0x01; 32]), 2, None, Memo::None, vec![op], 100)
            .unwrap()
    }

    #[test]
    fn payload_starts_with_network_id_then_tag() {
        let payload = TransactionSignaturePayload {
            network_id: [0xAA; 32],
            tagged_transaction: TaggedTransaction::Tx(tx()),
        };
        let bytes = payload.to_xdr();
        assert_eq!(&bytes[..32], &[0xAA; 32]);
        assert_eq!(&bytes[32..36], &[0, 0, 0, 2]);
        assert_eq!(&bytes[36..], tx().to_xdr().as_slice());
        assert_eq!(TransactionSignaturePayload::from_xdr(&bytes).unwrap(), payload);
    }

    #[test]
    fn decorated_signature_layout() {
        let sig = DecoratedSignature::new([1, 2, 3, 4], vec![9; 64]).unwrap();
        let bytes = sig.to_xdr();
        assert_eq!(bytes.len(), 4 + 4 + 64);
        assert_eq!(&bytes[..8], &[1, 2, 3, 4, 0, 0, 0, 64]);
        assert_eq!(DecoratedSignature::from_xdr(&bytes).unwrap(), sig);
    }

    #[test]
    fn oversized_signature_is_rejected() {
        assert!(DecoratedSignature::new([0; 4], vec![0; 65]).is_err());
    }

    #[test]
    fn envelope_roundtrip_with_multiple_signatures() {
        let env = TransactionEnvelope::new(tx(), vec![])
            .unwrap()
            .with_signature(DecoratedSignature::new([1; 4], vec![1; 64]).unwrap())
            .unwrap()
            .with_signature(DecoratedSignature::new([2; 4], vec![2; 64]).unwrap())
            .unwrap();
        assert_eq!(env.signatures().len(), 2);
        let decoded = TransactionEnvelope::from_xdr_base64(&env.to_xdr_base64()).unwrap();
        assert_eq!(decoded, env);
    }

    #[test]
    fn at_most_twenty_signatures() {
        let sigs = vec![DecoratedSignature::new([0; 4], vec![0; 64]).unwrap(); 21];
        assert!(TransactionEnvelope::new(tx(), sigs).is_err());
    }

    #[test]
    fn truncated_envelope_is_malformed() {
        let env = TransactionEnvelope::new(
            tx(),
            vec![DecoratedSignature::new([1; 4], vec![1; 64]).unwrap()],
        )
        .unwrap();
        let bytes = env.to_xdr();
        for cut in [0, 10, bytes.len() / 2, bytes.len() - 1] {
            assert!(TransactionEnvelope::from_xdr(&bytes[..cut]).is_err());
        }
    }

    #[test]
    fn unknown_envelope_type_is_malformed() {
        let mut bytes = [0u8; 36];
        bytes[35] = 1; // ENVELOPE_TYPE_SCP
        assert_eq!(
            TransactionSignaturePayload::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { type_name: "EnvelopeType", value: 1 })
        );
    }
}
