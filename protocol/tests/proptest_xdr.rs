use proptest::prelude::*;

use stellar_kit::crypto::strkey::{self, VersionByte};
use stellar_kit::crypto::Keypair;
use stellar_kit::transaction::{sign_transaction, TransactionBuilder};
use stellar_kit::types::{
    Asset, DecoratedSignature, Memo, MemoText, Operation, PublicKey, TimeBounds, Transaction,
    TransactionEnvelope,
};
use stellar_kit::xdr::Xdr;

fn arb_public_key() -> impl Strategy<Value = PublicKey> {
    prop::array::uniform32(any::<u8>()).prop_map(PublicKey::from_bytes)
}

fn arb_asset() -> impl Strategy<Value = Asset> {
    prop_oneof![
        Just(Asset::Native),
        ("[A-Z0-9]{1,12}", arb_public_key())
            .prop_map(|(code, issuer)| Asset::issued(&code, issuer).unwrap()),
    ]
}

/// Text that fits in `string<28>`: ASCII up to and including the limit, plus
/// multi-byte text trimmed to whole characters within 28 bytes.
fn arb_memo_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,28}",
        "[a-z]{28}",
        "[a-zé€😀]{0,28}".prop_map(|text| {
            let mut end = 0;
            for (i, c) in text.char_indices() {
                if i + c.len_utf8() > 28 {
                    break;
                }
                end = i + c.len_utf8();
            }
            text[..end].to_string()
        }),
    ]
}

fn arb_memo() -> impl Strategy<Value = Memo> {
    prop_oneof![
        Just(Memo::None),
        arb_memo_text().prop_map(|text| Memo::text(&text).unwrap()),
        any::<u64>().prop_map(Memo::Id),
        prop::array::uniform32(any::<u8>()).prop_map(Memo::Hash),
        prop::array::uniform32(any::<u8>()).prop_map(Memo::Return),
    ]
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    let body = prop_oneof![
        (arb_public_key(), arb_asset(), any::<i64>())
            .prop_map(|(dest, asset, amount)| Operation::payment(dest, asset, amount)),
        arb_asset().prop_map(Operation::change_trust),
    ];
    (body, prop::option::of(arb_public_key())).prop_map(|(op, source)| match source {
        Some(source) => op.with_source(source),
        None => op,
    })
}

fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        arb_public_key(),
        any::<u64>(),                                         // seq num
        prop::option::of((any::<u64>(), any::<u64>())),       // time bounds
        arb_memo(),
        prop::collection::vec(arb_operation(), 0..5),
        0u32..=10_000,                                        // base fee
    )
        .prop_map(|(source, seq, bounds, memo, ops, base_fee)| {
            let bounds = bounds.map(|(min, max)| TimeBounds::new(min, max));
            Transaction::new(source, seq, bounds, memo, ops, base_fee).unwrap()
        })
}

fn arb_envelope() -> impl Strategy<Value = TransactionEnvelope> {
    let sig = (any::<[u8; 4]>(), prop::collection::vec(any::<u8>(), 0..=64))
        .prop_map(|(hint, bytes)| DecoratedSignature::new(hint, bytes).unwrap());
    (arb_transaction(), prop::collection::vec(sig, 0..4))
        .prop_map(|(tx, sigs)| TransactionEnvelope::new(tx, sigs).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn asset_roundtrip(asset in arb_asset()) {
        let bytes = asset.to_xdr();
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(Asset::from_xdr(&bytes).unwrap(), asset);
    }

    #[test]
    fn memo_roundtrip(memo in arb_memo()) {
        let bytes = memo.to_xdr();
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(Memo::from_xdr(&bytes).unwrap(), memo);
    }

    #[test]
    fn memo_text_accepts_exactly_what_fits(text in "[a-z€]{0,40}") {
        match MemoText::try_from(text.as_str()) {
            Ok(memo_text) => {
                prop_assert!(text.len() <= 28);
                let memo = Memo::Text(memo_text);
                prop_assert_eq!(Memo::from_xdr(&memo.to_xdr()).unwrap(), memo);
            }
            Err(_) => prop_assert!(text.len() > 28),
        }
    }

    #[test]
    fn operation_roundtrip(op in arb_operation()) {
        prop_assert_eq!(Operation::from_xdr(&op.to_xdr()).unwrap(), op);
    }

    #[test]
    fn envelope_roundtrip(env in arb_envelope()) {
        let bytes = env.to_xdr();
        prop_assert_eq!(bytes.len() % 4, 0);
        prop_assert_eq!(TransactionEnvelope::from_xdr(&bytes).unwrap(), env.clone());
        prop_assert_eq!(TransactionEnvelope::from_xdr_base64(&env.to_xdr_base64()).unwrap(), env);
    }

    #[test]
    fn fee_is_base_fee_times_count(base_fee in 0u32..=10_000, n in 0usize..=100) {
        let ops = vec![Operation::payment(PublicKey::from_bytes([1; 32]), Asset::Native, 1); n];
        let tx = Transaction::new(PublicKey::from_bytes([2; 32]), 1, None, Memo::None, ops, base_fee)
            .unwrap();
        prop_assert_eq!(tx.fee(), base_fee * n as u32);
    }

    #[test]
    fn decoding_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = TransactionEnvelope::from_xdr(&bytes);
        let _ = Transaction::from_xdr(&bytes);
        let _ = Memo::from_xdr(&bytes);
    }

    #[test]
    fn strkey_roundtrip(payload in prop::array::uniform32(any::<u8>())) {
        for version in [VersionByte::AccountId, VersionByte::Seed] {
            let text = strkey::encode(version, &payload);
            prop_assert_eq!(text.len(), 56);
            prop_assert_eq!(strkey::decode(version, &text).unwrap(), payload);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn signing_sets_sequence_and_hint(seed in prop::array::uniform32(any::<u8>()), current in 0u64..u64::MAX) {
        let kp = Keypair::from_seed(&seed);
        let tx = TransactionBuilder::new()
            .source(kp.public_key())
            .current_sequence(current)
            .operation(Operation::payment(PublicKey::from_bytes([3; 32]), Asset::Native, 10))
            .build()
            .unwrap();
        prop_assert_eq!(tx.seq_num(), current + 1);

        let env = sign_transaction(&tx, &kp, "Test SDF Network ; September 2015").unwrap();
        prop_assert_eq!(env.signatures()[0].hint(), &public_key_suffix(&kp));
    }
}

fn public_key_suffix(kp: &Keypair) -> [u8; 4] {
    let bytes = kp.public_key();
    let bytes = bytes.as_bytes();
    [bytes[28], bytes[29], bytes[30], bytes[31]]
}
