//! Horizon JSON payloads.
//!
//! Only the fields this crate reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

use super::HorizonError;
use crate::config::STROOPS_PER_UNIT;
use crate::types::Asset;

/// Digits after the decimal point in Horizon amounts.
const AMOUNT_DECIMALS: usize = 7;

/// `GET /accounts/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDetails {
    pub id: String,
    pub account_id: String,
    /// Decimal string; Horizon quotes it because it exceeds 2^53.
    pub sequence: String,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl AccountDetails {
    pub fn sequence_number(&self) -> Result<u64, HorizonError> {
        self.sequence
            .parse()
            .map_err(|_| HorizonError::Malformed(format!("sequence {:?}", self.sequence)))
    }
}

/// One entry of an account's `balances` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Decimal units with seven fractional digits, e.g. `"100.0000000"`.
    pub balance: String,
    /// `native`, `credit_alphanum4` or `credit_alphanum12`.
    pub asset_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
}

impl Balance {
    /// Whether this balance line holds `asset`.
    pub fn is_for(&self, asset: &Asset) -> bool {
        if self.asset_type != asset.type_name() {
            return false;
        }
        match (asset.code(), asset.issuer()) {
            (None, None) => true,
            (Some(code), Some(issuer)) => {
                self.asset_code.as_deref() == Some(code.as_str())
                    && self.asset_issuer.as_deref() == Some(issuer.account_id().as_str())
            }
            _ => false,
        }
    }

    /// The balance in stroops, parsed exactly from the decimal string.
    pub fn amount(&self) -> Result<i64, HorizonError> {
        parse_amount(&self.balance)
    }
}

/// `"12.5"` -> `125_000_000`. At most seven fractional digits, no sign, no
/// exponent; anything else is `Malformed`.
pub fn parse_amount(text: &str) -> Result<i64, HorizonError> {
    let malformed = || HorizonError::Malformed(format!("amount {text:?}"));

    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || frac.len() > AMOUNT_DECIMALS || !all_digits(whole) || !all_digits(frac)
    {
        return Err(malformed());
    }

    let whole: i64 = whole.parse().map_err(|_| malformed())?;
    let frac: i64 = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<width$}", width = AMOUNT_DECIMALS).parse().map_err(|_| malformed())?
    };
    whole
        .checked_mul(STROOPS_PER_UNIT)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(malformed)
}

/// Successful `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: Option<u64>,
    #[serde(default)]
    pub result_xdr: Option<String>,
}

/// RFC 7807 problem document Horizon returns on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub instance: Option<String>,
    #[serde(default)]
    pub extras: Option<ProblemExtras>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemExtras {
    #[serde(default)]
    pub envelope_xdr: Option<String>,
    #[serde(default)]
    pub result_xdr: Option<String>,
    #[serde(default)]
    pub result_codes: Option<ResultCodes>,
}

/// e.g. `{"transaction": "tx_failed", "operations": ["op_no_trust"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultCodes {
    #[serde(default)]
    pub transaction: Option<String>,
    #[serde(default)]
    pub operations: Vec<String>,
}

impl ResultCodes {
    /// Transaction code first, then operation codes.
    pub fn flatten(&self) -> Vec<String> {
        self.transaction
            .iter()
            .cloned()
            .chain(self.operations.iter().cloned())
            .collect()
    }
}

impl From<Problem> for HorizonError {
    fn from(problem: Problem) -> Self {
        let extras = problem.extras.unwrap_or(ProblemExtras {
            envelope_xdr: None,
            result_xdr: None,
            result_codes: None,
        });
        HorizonError::Rejected {
            status: problem.status,
            title: problem.title,
            result_codes: extras.result_codes.unwrap_or_default().flatten(),
            result_xdr: extras.result_xdr,
        }
    }
}
