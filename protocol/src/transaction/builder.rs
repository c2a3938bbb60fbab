//! Transaction construction via the builder pattern.
//!
//! The builder takes the account's *current* sequence number, as Horizon
//! reports it, and does the `+ 1` itself. Forgetting that increment is the
//! classic way to get `tx_bad_seq` back from the network.
//!
//! The builder does not sign; that happens in [`super::signing`], so
//! construction stays testable without key material.

use crate::config::DEFAULT_BASE_FEE;
use crate::error::Error;
use crate::types::{Memo, Operation, PublicKey, TimeBounds, Transaction};

/// Fluent builder for unsigned [`Transaction`]s.
///
/// ```
/// use stellar_kit::transaction::TransactionBuilder;
/// use stellar_kit::types::{Asset, Operation, PublicKey};
///
/// let source = PublicKey::from_bytes([1; 32]);
/// let tx = TransactionBuilder::new()
///     .source(source)
///     .current_sequence(5)
///     .operation(Operation::payment(PublicKey::from_bytes([2; 32]), Asset::Native, 1_000_000))
///     .build()
///     .unwrap();
/// assert_eq!(tx.seq_num(), 6);
/// assert_eq!(tx.fee(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: Option<PublicKey>,
    current_sequence: Option<u64>,
    operations: Vec<Operation>,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    base_fee: u32,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    /// Empty builder with the default base fee of 100 stroops.
    pub fn new() -> Self {
        Self {
            source: None,
            current_sequence: None,
            operations: Vec::new(),
            memo: Memo::None,
            time_bounds: None,
            base_fee: DEFAULT_BASE_FEE,
        }
    }

    pub fn source(mut self, source: PublicKey) -> Self {
        self.source = Some(source);
        self
    }

    /// The source account's sequence number as last seen on the ledger.
    pub fn current_sequence(mut self, sequence: u64) -> Self {
        self.current_sequence = Some(sequence);
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = Some(time_bounds);
        self
    }

    /// Fee per operation, in stroops.
    pub fn base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    /// Produce the transaction.
    ///
    /// Fails with [`Error::MissingPublicKey`] or [`Error::MissingSequence`]
    /// when either input was never supplied, [`Error::SequenceOverflow`]
    /// when the current sequence is `u64::MAX`, and
    /// [`Error::TooManyOperations`] past 100 operations.
    pub fn build(self) -> Result<Transaction, Error> {
        let source = self.source.ok_or(Error::MissingPublicKey)?;
        let current = self.current_sequence.ok_or(Error::MissingSequence)?;
        let seq_num = current.checked_add(1).ok_or(Error::SequenceOverflow)?;
        Transaction::new(
            source,
            seq_num,
            self.time_bounds,
            self.memo,
            self.operations,
            self.base_fee,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Asset;

    fn source() -> PublicKey {
        PublicKey::from_bytes([0xA1; 32])
    }

    fn pay(amount: i64) -> Operation {
        Operation::payment(PublicKey::from_bytes([0xB2; 32]), Asset::Native, amount)
    }

    #[test]
    fn sequence_is_current_plus_one() {
        for current in [0u64, 5, 1 << 40, u64::MAX - 1] {
            let tx = TransactionBuilder::new()
                .source(source())
                .current_sequence(current)
                .operation(pay(1))
                .build()
                .unwrap();
            assert_eq!(tx.seq_num(), current + 1);
        }
    }

    #[test]
    fn fee_scales_with_operations_and_base_fee() {
        let tx = TransactionBuilder::new()
            .source(source())
            .current_sequence(1)
            .operations((1..=3).map(pay))
            .base_fee(200)
            .build()
            .unwrap();
        assert_eq!(tx.fee(), 600);
        assert_eq!(tx.operations().len(), 3);
    }

    #[test]
    fn missing_inputs_are_reported() {
        let no_source = TransactionBuilder::new().current_sequence(1).build();
        assert!(matches!(no_source, Err(Error::MissingPublicKey)));

        let no_sequence = TransactionBuilder::new().source(source()).build();
        assert!(matches!(no_sequence, Err(Error::MissingSequence)));
    }

    #[test]
    fn sequence_overflow() {
        let result = TransactionBuilder::new()
            .source(source())
            .current_sequence(u64::MAX)
            .build();
        assert!(matches!(result, Err(Error::SequenceOverflow)));
    }

    #[test]
    fn too_many_operations() {
        let result = TransactionBuilder::new()
            .source(source())
            .current_sequence(1)
            .operations((0..101).map(pay))
            .build();
        assert!(matches!(result, Err(Error::TooManyOperations { count: 101, .. })));
    }

    #[test]
    fn memo_and_time_bounds_are_carried() {
        let tx = TransactionBuilder::new()
            .source(source())
            .current_sequence(9)
            .memo(Memo::Id(77))
            .time_bounds(TimeBounds::new(10, 20))
            .operation(pay(1))
            .build()
            .unwrap();
        assert_eq!(tx.memo(), &Memo::Id(77));
        assert_eq!(tx.time_bounds(), Some(&TimeBounds::new(10, 20)));
    }
}
