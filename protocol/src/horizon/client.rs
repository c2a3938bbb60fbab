//! HTTP implementation of the Horizon collaborators.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use tracing::{debug, info, warn};

use super::responses::{AccountDetails, Balance, Problem, TransactionResponse};
use super::{BalanceProvider, HorizonError, SequenceProvider, SubmissionSink};
use crate::config::NetworkConfig;
use crate::types::TransactionEnvelope;

/// Horizon REST client.
#[derive(Debug, Clone)]
pub struct HorizonClient {
    base_url: String,
    client: reqwest::Client,
}

impl HorizonClient {
    /// Client for `config.horizon_url`, with the configured request timeout.
    pub fn new(config: &NetworkConfig) -> Result<Self, HorizonError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.horizon_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /accounts/{account_id}`.
    pub async fn account(&self, account_id: &str) -> Result<AccountDetails, HorizonError> {
        let url = format!("{}/accounts/{account_id}", self.base_url);
        debug!(%url, "fetching account");
        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(HorizonError::NotFound(account_id.to_string()));
        }
        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }
        Ok(resp.json().await?)
    }

    /// `POST /transactions`.
    pub async fn post_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<TransactionResponse, HorizonError> {
        let url = format!("{}/transactions", self.base_url);
        let body = super::submission_body(envelope)
            .map_err(|e| HorizonError::Malformed(e.to_string()))?;
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        if !resp.status().is_success() {
            let err = error_from_response(resp).await;
            warn!(error = %err, "transaction rejected");
            return Err(err);
        }
        let accepted: TransactionResponse = resp.json().await?;
        info!(hash = %accepted.hash, ledger = ?accepted.ledger, "transaction accepted");
        Ok(accepted)
    }
}

/// Map a non-2xx response to an error. Server-side failures and rate
/// limiting are transport errors; anything else carries Horizon's problem
/// document when it sent one.
async fn error_from_response(resp: Response) -> HorizonError {
    let status = resp.status();
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return HorizonError::Transport(format!("HTTP {status}"));
    }
    match resp.json::<Problem>().await {
        Ok(problem) => problem.into(),
        Err(_) => HorizonError::Malformed(format!("HTTP {status} without a problem document")),
    }
}

#[async_trait]
impl SequenceProvider for HorizonClient {
    async fn fetch_sequence(&self, account_id: &str) -> Result<u64, HorizonError> {
        self.account(account_id).await?.sequence_number()
    }
}

#[async_trait]
impl BalanceProvider for HorizonClient {
    async fn fetch_balances(&self, account_id: &str) -> Result<Vec<Balance>, HorizonError> {
        Ok(self.account(account_id).await?.balances)
    }
}

#[async_trait]
impl SubmissionSink for HorizonClient {
    async fn submit(&self, envelope: &TransactionEnvelope) -> Result<String, HorizonError> {
        Ok(self.post_transaction(envelope).await?.hash)
    }
}
