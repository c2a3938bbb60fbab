//! End-to-end scenarios: account unlock, sequence lookup, building, signing,
//! submission and decoding, driven through an in-memory Horizon.
//!
//! Each test builds its own `MockHorizon`; nothing is shared between tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use stellar_kit::account::{Account, ProtectedAccount};
use stellar_kit::client::StellarClient;
use stellar_kit::config::{NetworkConfig, TESTNET_PASSPHRASE};
use stellar_kit::crypto::{sha256, verify_signature, Keypair};
use stellar_kit::horizon::{
    Balance, BalanceProvider, HorizonError, SequenceProvider, SubmissionSink,
};
use stellar_kit::transaction::{
    sign_transaction, signature_payload, transaction_hash, verify_envelope, TransactionBuilder,
};
use stellar_kit::types::{Asset, Memo, Operation, OperationBody, PublicKey, TransactionEnvelope};
use stellar_kit::xdr::{Xdr, XdrError};
use stellar_kit::Error;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockHorizon {
    sequences: HashMap<String, u64>,
    balances: HashMap<String, Vec<Balance>>,
    submitted: Mutex<Vec<TransactionEnvelope>>,
    lookups: AtomicUsize,
}

impl MockHorizon {
    fn with_account(mut self, account_id: &str, sequence: u64) -> Self {
        self.sequences.insert(account_id.to_string(), sequence);
        self
    }

    fn with_balance(mut self, account_id: &str, balance: Balance) -> Self {
        self.balances.entry(account_id.to_string()).or_default().push(balance);
        self
    }

    fn submitted(&self) -> Vec<TransactionEnvelope> {
        self.submitted.lock().unwrap().clone()
    }

    /// Sequence and balance requests served so far.
    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SequenceProvider for MockHorizon {
    async fn fetch_sequence(&self, account_id: &str) -> Result<u64, HorizonError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.sequences
            .get(account_id)
            .copied()
            .ok_or_else(|| HorizonError::NotFound(account_id.to_string()))
    }
}

#[async_trait]
impl BalanceProvider for MockHorizon {
    async fn fetch_balances(&self, account_id: &str) -> Result<Vec<Balance>, HorizonError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.balances
            .get(account_id)
            .cloned()
            .ok_or_else(|| HorizonError::NotFound(account_id.to_string()))
    }
}

#[async_trait]
impl SubmissionSink for MockHorizon {
    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<String, HorizonError> {
        self.submitted.lock().unwrap().push(envelope.clone());
        Ok(hex::encode(transaction_hash(envelope.tx(), TESTNET_PASSPHRASE)))
    }
}

fn keypair(byte: u8) -> Keypair {
    Keypair::from_seed(&[byte; 32])
}

fn native_balance() -> Balance {
    Balance {
        balance: "100.0000000".into(),
        asset_type: "native".into(),
        asset_code: None,
        asset_issuer: None,
    }
}

// ---------------------------------------------------------------------------
// Signing scenarios
// ---------------------------------------------------------------------------

/// 1000000-stroop native payment from A (sequence 5) to B on testnet.
#[test]
fn native_payment_scenario() {
    let a = keypair(0xA0);
    let b = keypair(0xB0).public_key();

    let tx = TransactionBuilder::new()
        .source(a.public_key())
        .current_sequence(5)
        .operation(Operation::payment(b, Asset::Native, 1_000_000))
        .build()
        .unwrap();
    assert_eq!(tx.seq_num(), 6);
    assert_eq!(tx.fee(), 100);
    assert_eq!(tx.operations().len(), 1);
    assert!(matches!(
        tx.operations()[0].body(),
        OperationBody::Payment(p) if p.destination == b && p.amount == 1_000_000 && p.asset.is_native()
    ));

    let envelope = sign_transaction(&tx, &a, TESTNET_PASSPHRASE).unwrap();
    let signature = &envelope.signatures()[0];
    assert_eq!(signature.hint(), &a.public_key().as_bytes()[28..]);

    let message = sha256(&signature_payload(&tx, TESTNET_PASSPHRASE).to_xdr());
    assert!(verify_signature(&a.public_key(), &message, signature.signature()));
}

#[test]
fn signed_envelope_survives_base64_transport() {
    let a = keypair(1);
    let tx = TransactionBuilder::new()
        .source(a.public_key())
        .current_sequence(41)
        .memo(Memo::text("invoice 17").unwrap())
        .operation(Operation::payment(keypair(2).public_key(), Asset::Native, 5))
        .operation(Operation::change_trust(
            Asset::issued("USDC", keypair(3).public_key()).unwrap(),
        ))
        .build()
        .unwrap();
    let envelope = sign_transaction(&tx, &a, TESTNET_PASSPHRASE).unwrap();

    let wire = envelope.to_xdr_base64();
    let decoded = TransactionEnvelope::from_xdr_base64(&wire).unwrap();
    assert_eq!(decoded, envelope);
    assert_eq!(decoded.tx().memo(), &Memo::text("invoice 17").unwrap());
    assert_eq!(decoded.tx().fee(), 200);
    assert_eq!(
        verify_envelope(&decoded, &[a.public_key()], TESTNET_PASSPHRASE),
        vec![a.public_key()]
    );
}

#[test]
fn unknown_discriminants_are_malformed_wire_data() {
    let tx = TransactionBuilder::new()
        .source(PublicKey::from_bytes([1; 32]))
        .current_sequence(1)
        .operation(Operation::payment(PublicKey::from_bytes([2; 32]), Asset::Native, 1))
        .build()
        .unwrap();
    let good = TransactionEnvelope::new(tx, vec![]).unwrap().to_xdr();

    // source(36) fee(4) seq(8) time_bounds(4) | memo type at 52
    let mut bad_memo = good.clone();
    bad_memo[55] = 9;
    // ... memo(4) op count(4) op source(4) | op type at 64
    let mut bad_op = good.clone();
    bad_op[67] = 99;
    // ... op type(4) destination(36) | asset type at 104
    let mut bad_asset = good.clone();
    bad_asset[107] = 7;

    for (bytes, type_name, value) in [
        (bad_memo, "Memo", 9),
        (bad_op, "Operation", 99),
        (bad_asset, "Asset", 7),
    ] {
        let err: Error = TransactionEnvelope::from_xdr(&bytes).unwrap_err().into();
        assert!(
            matches!(
                err,
                Error::MalformedWireData(XdrError::UnknownDiscriminant { type_name: t, value: v })
                    if t == type_name && v == value
            ),
            "{type_name}: {err}"
        );
    }
}

// ---------------------------------------------------------------------------
// Client flows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn payment_flow_submits_a_verifiable_envelope() {
    let sender = keypair(0x11);
    let account = ProtectedAccount::protect(&sender, "sender pass").unwrap();
    let dest = keypair(0x22).account_id();

    let horizon = MockHorizon::default()
        .with_account(&account.account_id, 5)
        .with_balance(&dest, native_balance());
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let hash = client
        .payment(&account, &dest, 1_000_000, "sender pass", None)
        .await
        .unwrap();

    let submitted = client.horizon().submitted();
    assert_eq!(submitted.len(), 1);
    let envelope = &submitted[0];
    assert_eq!(envelope.tx().seq_num(), 6);
    assert_eq!(envelope.tx().fee(), 100);
    assert_eq!(hash, hex::encode(transaction_hash(envelope.tx(), TESTNET_PASSPHRASE)));
    assert_eq!(
        verify_envelope(envelope, &[sender.public_key()], TESTNET_PASSPHRASE),
        vec![sender.public_key()]
    );
}

#[tokio::test]
async fn issued_payment_requires_a_trust_line() {
    let sender = keypair(0x31);
    let account = ProtectedAccount::protect(&sender, "pw").unwrap();
    let dest = keypair(0x32).account_id();
    let kin = Asset::issued("KIN", keypair(0x33).public_key()).unwrap();

    let horizon = MockHorizon::default()
        .with_account(&account.account_id, 1)
        .with_balance(&dest, native_balance());
    let client = StellarClient::new(horizon, NetworkConfig::testnet()).with_asset(kin);

    let result = client.payment(&account, &dest, 10, "pw", None).await;
    assert!(matches!(result, Err(Error::DestinationNotReady(asset)) if asset == kin));
    assert!(client.horizon().submitted().is_empty());
}

#[tokio::test]
async fn issued_payment_with_trust_line_goes_through() {
    let sender = keypair(0x41);
    let account = ProtectedAccount::protect(&sender, "pw").unwrap();
    let dest = keypair(0x42).account_id();
    let issuer = keypair(0x43);
    let kin = Asset::issued("KIN", issuer.public_key()).unwrap();

    let horizon = MockHorizon::default()
        .with_account(&account.account_id, 1)
        .with_balance(
            &dest,
            Balance {
                balance: "0.0000000".into(),
                asset_type: "credit_alphanum4".into(),
                asset_code: Some("KIN".into()),
                asset_issuer: Some(issuer.account_id()),
            },
        );
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    client.payment(&account, &dest, 10, "pw", Some(kin)).await.unwrap();
    let submitted = client.horizon().submitted();
    assert!(matches!(
        submitted[0].tx().operations()[0].body(),
        OperationBody::Payment(p) if p.asset == kin
    ));
}

#[tokio::test]
async fn trust_flow_submits_change_trust() {
    let holder = keypair(0x51);
    let account = ProtectedAccount::protect(&holder, "pw").unwrap();
    let usd = Asset::issued("USD", keypair(0x52).public_key()).unwrap();

    let horizon = MockHorizon::default().with_account(&account.account_id, 99);
    let config = NetworkConfig::testnet().with_base_fee(250);
    let client = StellarClient::new(horizon, config);

    client.trust(Some(usd), &account, "pw").await.unwrap();
    let submitted = client.horizon().submitted();
    let envelope = &submitted[0];
    assert_eq!(envelope.tx().seq_num(), 100);
    assert_eq!(envelope.tx().fee(), 250);
    assert!(matches!(
        envelope.tx().operations()[0].body(),
        OperationBody::ChangeTrust(t) if t.line == usd && t.limit == i64::MAX
    ));
}

#[tokio::test]
async fn wrong_passphrase_never_reaches_the_network() {
    let account = ProtectedAccount::protect(&keypair(0x61), "right").unwrap();
    let dest = keypair(0x62).account_id();
    let horizon = MockHorizon::default().with_account(&account.account_id, 1);
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let result = client.payment(&account, &dest, 1, "wrong", None).await;
    assert!(matches!(result, Err(Error::PassphraseIncorrect)));
    assert!(client.horizon().submitted().is_empty());
}

#[tokio::test]
async fn compose_transaction_returns_decodable_xdr() {
    let kp = keypair(0x71);
    let account = ProtectedAccount::protect(&kp, "pw").unwrap();
    let horizon = MockHorizon::default().with_account(&account.account_id, 7);
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let op = client
        .payment_op(&keypair(0x72).account_id(), 3, None, None)
        .unwrap();
    let bytes = client.compose_transaction(&account, vec![op], "pw").await.unwrap();
    let envelope = TransactionEnvelope::from_xdr(&bytes).unwrap();
    assert_eq!(envelope.tx().seq_num(), 8);
    assert_eq!(envelope.tx().source_account(), &kp.public_key());
    assert_eq!(account.public_key().as_deref(), Some(kp.account_id().as_str()));
}

#[tokio::test]
async fn native_payment_to_missing_destination_is_not_submitted() {
    let account = ProtectedAccount::protect(&keypair(0x81), "pw").unwrap();
    let missing = keypair(0x82).account_id();
    let horizon = MockHorizon::default().with_account(&account.account_id, 1);
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let result = client.payment(&account, &missing, 1_000, "pw", None).await;
    assert!(matches!(result, Err(Error::DestinationNotReady(Asset::Native))));
    assert!(client.horizon().submitted().is_empty());
}

#[tokio::test]
async fn issued_payment_to_missing_destination_is_not_ready() {
    let account = ProtectedAccount::protect(&keypair(0x91), "pw").unwrap();
    let missing = keypair(0x92).account_id();
    let kin = Asset::issued("KIN", keypair(0x93).public_key()).unwrap();
    let horizon = MockHorizon::default().with_account(&account.account_id, 1);
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let result = client.payment(&account, &missing, 10, "pw", Some(kin)).await;
    assert!(matches!(result, Err(Error::DestinationNotReady(asset)) if asset == kin));
    assert!(client.horizon().submitted().is_empty());
}

#[tokio::test]
async fn wrong_passphrase_fails_before_any_lookup() {
    let account = ProtectedAccount::protect(&keypair(0xA1), "right").unwrap();
    let missing = keypair(0xA2).account_id();
    let kin = Asset::issued("KIN", keypair(0xA3).public_key()).unwrap();
    let horizon = MockHorizon::default().with_account(&account.account_id, 1);
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    let result = client.payment(&account, &missing, 10, "wrong", Some(kin)).await;
    assert!(matches!(result, Err(Error::PassphraseIncorrect)));
    assert_eq!(client.horizon().lookups(), 0);

    let result = client.trust(Some(kin), &account, "wrong").await;
    assert!(matches!(result, Err(Error::PassphraseIncorrect)));
    assert_eq!(client.horizon().lookups(), 0);
}

#[tokio::test]
async fn balance_reports_stroops_per_asset() {
    let holder = keypair(0xB1).account_id();
    let issuer = keypair(0xB2);
    let kin = Asset::issued("KIN", issuer.public_key()).unwrap();
    let horizon = MockHorizon::default()
        .with_balance(&holder, native_balance())
        .with_balance(
            &holder,
            Balance {
                balance: "3.1415926".into(),
                asset_type: "credit_alphanum4".into(),
                asset_code: Some("KIN".into()),
                asset_issuer: Some(issuer.account_id()),
            },
        );
    let client = StellarClient::new(horizon, NetworkConfig::testnet());

    assert_eq!(client.balance(&holder, None).await.unwrap(), 1_000_000_000);
    assert_eq!(client.balance(&holder, Some(kin)).await.unwrap(), 31_415_926);

    let stranger = keypair(0xB3).account_id();
    assert!(matches!(
        client.balance(&stranger, None).await,
        Err(Error::DestinationNotReady(Asset::Native))
    ));
}
