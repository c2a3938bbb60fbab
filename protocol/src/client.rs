//! # Client
//!
//! [`StellarClient`] ties the pieces together: it unlocks an account,
//! checks the destination, asks Horizon for the sequence number, builds and
//! signs the transaction and hands the envelope back to Horizon.
//!
//! Signing stays synchronous; only the collaborator calls are awaited.

use tracing::{debug, info};

use crate::account::Account;
use crate::config::NetworkConfig;
use crate::crypto::Keypair;
use crate::error::Error;
use crate::horizon::{Horizon, HorizonError};
use crate::transaction::{sign_transaction, TransactionBuilder};
use crate::types::{Asset, Operation, PublicKey, TransactionEnvelope};
use crate::xdr::Xdr;

pub struct StellarClient<H> {
    horizon: H,
    config: NetworkConfig,
    asset: Asset,
}

impl<H: Horizon> StellarClient<H> {
    /// Client whose default asset is the native lumen.
    pub fn new(horizon: H, config: NetworkConfig) -> Self {
        Self {
            horizon,
            config,
            asset: Asset::Native,
        }
    }

    /// Use `asset` whenever a call does not name one.
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = asset;
        self
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn horizon(&self) -> &H {
        &self.horizon
    }

    /// A payment of `amount` stroops to `destination` (a `G...` id).
    pub fn payment_op(
        &self,
        destination: &str,
        amount: i64,
        source: Option<&str>,
        asset: Option<Asset>,
    ) -> Result<Operation, Error> {
        let destination = PublicKey::from_account_id(destination)?;
        let op = Operation::payment(destination, asset.unwrap_or(self.asset), amount);
        with_optional_source(op, source)
    }

    /// A maximum-limit trust line to `asset`.
    pub fn trust_op(&self, asset: Option<Asset>, source: Option<&str>) -> Result<Operation, Error> {
        let op = Operation::change_trust(asset.unwrap_or(self.asset));
        with_optional_source(op, source)
    }

    /// Build and sign a transaction for `account` carrying `operations`.
    ///
    /// The account is unlocked before anything is fetched, so a wrong
    /// passphrase fails without touching the network.
    pub async fn compose_envelope<A: Account + ?Sized>(
        &self,
        account: &A,
        operations: Vec<Operation>,
        passphrase: &str,
    ) -> Result<TransactionEnvelope, Error> {
        let keypair = account.keypair(passphrase)?;
        self.sign_operations(&keypair, operations).await
    }

    /// [`compose_envelope`](Self::compose_envelope), returned as XDR bytes.
    pub async fn compose_transaction<A: Account + ?Sized>(
        &self,
        account: &A,
        operations: Vec<Operation>,
        passphrase: &str,
    ) -> Result<Vec<u8>, Error> {
        Ok(self
            .compose_envelope(account, operations, passphrase)
            .await?
            .to_xdr())
    }

    /// How many stroops of `asset` (or the default asset) `account_id` holds.
    ///
    /// An account that does not exist, or has no balance line for the asset,
    /// is [`Error::DestinationNotReady`].
    pub async fn balance(&self, account_id: &str, asset: Option<Asset>) -> Result<i64, Error> {
        let asset = asset.unwrap_or(self.asset);
        let balances = match self.horizon.fetch_balances(account_id).await {
            Ok(balances) => balances,
            Err(HorizonError::NotFound(_)) => return Err(Error::DestinationNotReady(asset)),
            Err(e) => return Err(e.into()),
        };
        let line = balances
            .iter()
            .find(|b| b.is_for(&asset))
            .ok_or(Error::DestinationNotReady(asset))?;
        Ok(line.amount()?)
    }

    /// Pay `amount` stroops of `asset` (or the default asset) to
    /// `destination`, returning the transaction hash.
    ///
    /// Order matters: the account is unlocked first, then the destination
    /// must exist and hold a balance line for the asset
    /// ([`Error::DestinationNotReady`] otherwise), and only then is the
    /// sequence fetched and the transaction signed and submitted.
    pub async fn payment<A: Account + ?Sized>(
        &self,
        account: &A,
        destination: &str,
        amount: i64,
        passphrase: &str,
        asset: Option<Asset>,
    ) -> Result<String, Error> {
        let asset = asset.unwrap_or(self.asset);
        let op = self.payment_op(destination, amount, None, Some(asset))?;
        let keypair = account.keypair(passphrase)?;

        self.balance(destination, Some(asset)).await?;

        let envelope = self.sign_operations(&keypair, vec![op]).await?;
        let hash = self.horizon.submit(&envelope).await?;
        info!(%hash, %destination, amount, asset = %asset, "payment submitted");
        Ok(hash)
    }

    /// Establish a trust line from `account` to `asset`, returning the
    /// transaction hash.
    pub async fn trust<A: Account + ?Sized>(
        &self,
        asset: Option<Asset>,
        account: &A,
        passphrase: &str,
    ) -> Result<String, Error> {
        let asset = asset.unwrap_or(self.asset);
        let op = self.trust_op(Some(asset), None)?;
        let envelope = self.compose_envelope(account, vec![op], passphrase).await?;
        let hash = self.horizon.submit(&envelope).await?;
        info!(%hash, asset = %asset, "trust line submitted");
        Ok(hash)
    }

    async fn sign_operations(
        &self,
        keypair: &Keypair,
        operations: Vec<Operation>,
    ) -> Result<TransactionEnvelope, Error> {
        let account_id = keypair.account_id();
        let sequence = match self.horizon.fetch_sequence(&account_id).await {
            Ok(sequence) => sequence,
            Err(HorizonError::NotFound(_)) => return Err(Error::MissingSequence),
            Err(e) => return Err(e.into()),
        };
        debug!(account = %account_id, sequence, ops = operations.len(), "composing transaction");

        let tx = TransactionBuilder::new()
            .source(keypair.public_key())
            .current_sequence(sequence)
            .operations(operations)
            .base_fee(self.config.base_fee)
            .build()?;
        sign_transaction(&tx, keypair, &self.config.passphrase)
    }
}

fn with_optional_source(op: Operation, source: Option<&str>) -> Result<Operation, Error> {
    match source {
        Some(source) => Ok(op.with_source(PublicKey::from_account_id(source)?)),
        None => Ok(op),
    }
}
