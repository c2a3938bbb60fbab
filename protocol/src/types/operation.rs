//! Operations: the individual actions a transaction carries.
//!
//! Only payments and trust-line changes are modelled. Other operation types
//! slot in as further [`OperationBody`] arms with their own discriminant.

use super::{Asset, PublicKey};
use crate::xdr::{Xdr, XdrError, XdrReader, XdrWriter};

const PAYMENT: i32 = 1;
const CHANGE_TRUST: i32 = 6;

/// Send `amount` stroops of `asset` to `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentOp {
    pub destination: PublicKey,
    pub asset: Asset,
    pub amount: i64,
}

/// Create, update or (with `limit == 0`) remove a trust line to `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeTrustOp {
    pub line: Asset,
    pub limit: i64,
}

impl ChangeTrustOp {
    /// Trust `line` up to the maximum representable amount.
    pub fn new(line: Asset) -> Self {
        Self { line, limit: i64::MAX }
    }
}

/// `union switch (OperationType type)` inside `Operation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationBody {
    Payment(PaymentOp),
    ChangeTrust(ChangeTrustOp),
}

impl OperationBody {
    pub fn discriminant(&self) -> i32 {
        match self {
            OperationBody::Payment(_) => PAYMENT,
            OperationBody::ChangeTrust(_) => CHANGE_TRUST,
        }
    }
}

impl Xdr for OperationBody {
    fn encode(&self, w: &mut XdrWriter) {
        w.write_i32(self.discriminant());
        match self {
            OperationBody::Payment(op) => {
                op.destination.encode(w);
                op.asset.encode(w);
                w.write_i64(op.amount);
            }
            OperationBody::ChangeTrust(op) => {
                op.line.encode(w);
                w.write_i64(op.limit);
            }
        }
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        match r.read_i32()? {
            PAYMENT => Ok(OperationBody::Payment(PaymentOp {
                destination: PublicKey::decode(r)?,
                asset: Asset::decode(r)?,
                amount: r.read_i64()?,
            })),
            CHANGE_TRUST => Ok(OperationBody::ChangeTrust(ChangeTrustOp {
                line: Asset::decode(r)?,
                limit: r.read_i64()?,
            })),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "Operation",
                value,
            }),
        }
    }
}

/// One operation, optionally run on behalf of an account other than the
/// transaction's source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    source_account: Option<PublicKey>,
    body: OperationBody,
}

impl Operation {
    pub fn new(source_account: Option<PublicKey>, body: OperationBody) -> Self {
        Self { source_account, body }
    }

    /// A payment with no overriding source account.
    pub fn payment(destination: PublicKey, asset: Asset, amount: i64) -> Self {
        Self::new(
            None,
            OperationBody::Payment(PaymentOp { destination, asset, amount }),
        )
    }

    /// A maximum-limit trust line with no overriding source account.
    pub fn change_trust(line: Asset) -> Self {
        Self::new(None, OperationBody::ChangeTrust(ChangeTrustOp::new(line)))
    }

    /// The same operation, run on behalf of `source`.
    pub fn with_source(self, source: PublicKey) -> Self {
        Self::new(Some(source), self.body)
    }

    pub fn source_account(&self) -> Option<&PublicKey> {
        self.source_account.as_ref()
    }

    pub fn body(&self) -> &OperationBody {
        &self.body
    }
}

impl Xdr for Operation {
    fn encode(&self, w: &mut XdrWriter) {
        self.source_account.encode(w);
        self.body.encode(w);
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self {
            source_account: Option::<PublicKey>::decode(r)?,
            body: OperationBody::decode(r)?,
        })
    }
}
