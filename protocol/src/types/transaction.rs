//! The transaction body that gets signed.

use chrono::{Duration, Utc};

use super::{Memo, Operation, PublicKey};
use crate::config::MAX_OPERATIONS;
use crate::error::Error;
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

/// Validity window in Unix seconds. `max_time == 0` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    pub fn new(min_time: u64, max_time: u64) -> Self {
        Self { min_time, max_time }
    }

    /// Valid from now until `window` from now.
    pub fn valid_for(window: Duration) -> Self {
        let now = Utc::now();
        let min_time = now.timestamp().max(0) as u64;
        let max_time = (now + window).timestamp().max(0) as u64;
        Self { min_time, max_time }
    }
}

impl Xdr for TimeBounds {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_u64(self.min_time);
        w.write_u64(self.max_time);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            min_time: r.read_u64()?,
            max_time: r.read_u64()?,
        })
    }
}

/// A transaction: who pays, which sequence slot it consumes, and what it does.
///
/// The fee is not settable; [`Transaction::new`] derives it as
/// `base_fee * operations.len()`. Decoding keeps whatever fee the bytes
/// carry, since a received transaction may have been built under a
/// different fee policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    source_account: PublicKey,
    fee: u32,
    seq_num: u64,
    time_bounds: Option<TimeBounds>,
    memo: Memo,
    operations: Vec<Operation>,
}

/// The only arm of the trailing `ext` union.
const TRANSACTION_EXT_V0: i32 = 0;

impl Transaction {
    /// Assemble a transaction, deriving its fee.
    ///
    /// `seq_num` is the number this transaction consumes, i.e. the account's
    /// current sequence plus one; [`TransactionBuilder`](crate::transaction::TransactionBuilder)
    /// does that arithmetic for you.
    pub fn new(
        source_account: PublicKey,
        seq_num: u64,
        time_bounds: Option<TimeBounds>,
        memo: Memo,
        operations: Vec<Operation>,
        base_fee: u32,
    ) -> Result<Self, Error> {
        if operations.len() > MAX_OPERATIONS {
            return Err(Error::TooManyOperations {
                count: operations.len(),
                max: MAX_OPERATIONS,
            });
        }
        // At most 100 operations, so the count always fits in a u32.
        let fee = base_fee
            .checked_mul(operations.len() as u32)
            .ok_or_else(|| Error::EncodingFailed(format!(
                "fee overflow: {base_fee} x {} operations",
                operations.len()
            )))?;
        Ok(Self {
            source_account,
            fee,
            seq_num,
            time_bounds,
            memo,
            operations,
        })
    }

    pub fn source_account(&self) -> &PublicKey {
        &self.source_account
    }

    pub fn fee(&self) -> u32 {
        self.fee
    }

    pub fn seq_num(&self) -> u64 {
        self.seq_num
    }

    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        self.time_bounds.as_ref()
    }

    pub fn memo(&self) -> &Memo {
        &self.memo
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl Xdr for Transaction {
    fn encode(&self, w: &mut XdrWriter) {
        self.source_account.encode(w);
        w.write_u32(self.fee);
        w.write_u64(self.seq_num);
        self.time_bounds.encode(w);
        self.memo.encode(w);
        w.write_array(&self.operations);
        w.write_i32(TRANSACTION_EXT_V0);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        let tx = Self {
            source_account: PublicKey::decode(r)?,
            fee: r.read_u32()?,
            seq_num: r.read_u64()?,
            time_bounds: Option::<TimeBounds>::decode(r)?,
            memo: Memo::decode(r)?,
            operations: r.read_array(MAX_OPERATIONS)?,
        };
        match r.read_i32()? {
            TRANSACTION_EXT_V0 => Ok(tx),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "TransactionExt",
                value,
            }),
        }
    }
}
