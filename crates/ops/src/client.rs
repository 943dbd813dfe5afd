//! Access to the chain.

use alloy::{
    network::{EthereumWallet, ReceiptResponse, TransactionBuilder},
    primitives::{Address, B256, Bytes},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use eyre::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::{config::ScriptConfig, error::Error};

/// A confirmed contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub transaction_hash: B256,
}

/// Chain operations the scripts depend on.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Account transactions are sent from.
    fn sender(&self) -> Address;

    async fn chain_id(&self) -> Result<u64>;

    /// Submit a transaction, returning its hash once the node accepted it.
    async fn submit(&self, tx: TransactionRequest) -> Result<B256>;

    /// Submit a contract creation and wait until it is confirmed.
    async fn deploy(&self, code: Bytes) -> Result<Deployment>;
}

/// [`ChainClient`] over JSON-RPC with a local wallet.
#[derive(Clone)]
pub struct RpcClient {
    provider: DynProvider,
    sender: Address,
    confirmations: u64,
    timeout: Option<Duration>,
}

impl RpcClient {
    /// Wrap a provider that signs for `sender`.
    pub fn new(provider: DynProvider, sender: Address) -> Self {
        Self {
            provider,
            sender,
            confirmations: 1,
            timeout: None,
        }
    }

    /// Connect to `rpc_url`, signing with `signer`.
    pub async fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self> {
        let sender = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect(rpc_url)
            .await
            .wrap_err_with(|| format!("failed to connect to {rpc_url}"))?
            .erased();

        info!(%sender, rpc_url, "connected");
        Ok(Self::new(provider, sender))
    }

    /// Connect using the RPC URL, signer and confirmation settings of `config`.
    pub async fn from_config(config: &ScriptConfig) -> Result<Self> {
        let signer = config.signer.load()?;
        Ok(Self::connect(&config.rpc_url, signer)
            .await?
            .with_confirmations(config.confirmations)
            .with_timeout(config.confirmation_timeout()))
    }

    /// Number of blocks a deployment must be buried under before it counts as confirmed.
    pub fn with_confirmations(mut self, confirmations: u64) -> Self {
        self.confirmations = confirmations.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ChainClient for RpcClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    #[instrument(skip_all, fields(to = ?tx.to))]
    async fn submit(&self, tx: TransactionRequest) -> Result<B256> {
        let tx = tx.with_from(self.sender);
        let pending = self.provider.send_transaction(tx).await?;
        let hash = *pending.tx_hash();
        debug!(%hash, "transaction submitted");
        Ok(hash)
    }

    #[instrument(skip_all, fields(code_len = code.len()))]
    async fn deploy(&self, code: Bytes) -> Result<Deployment> {
        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_deploy_code(code);
        let pending = self.provider.send_transaction(tx).await?;
        let hash = *pending.tx_hash();
        debug!(%hash, "deployment submitted, waiting for confirmation");

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.timeout)
            .get_receipt()
            .await
            .wrap_err_with(|| format!("failed to confirm transaction {hash}"))?;

        Ok(confirmed_deployment(hash, &receipt)?)
    }
}

/// Check the receipt of contract creation `hash`.
fn confirmed_deployment<R: ReceiptResponse>(
    hash: B256,
    receipt: &R,
) -> Result<Deployment, Error> {
    if !receipt.status() {
        return Err(Error::Reverted(hash));
    }
    let address = receipt
        .contract_address()
        .ok_or(Error::NoContractAddress(hash))?;

    Ok(Deployment {
        address,
        transaction_hash: hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{
        network::Ethereum,
        primitives::{U256, address, b256},
        providers::mock::Asserter,
        rpc::types::TransactionReceipt,
    };

    const DEPLOY_TX: B256 =
        b256!("0x00000000000000000000000000000000000000000000000000000000000d0001");

    /// A creation receipt as returned by `eth_getTransactionReceipt`.
    fn receipt(status: &str, contract_address: Option<&str>) -> TransactionReceipt {
        let bloom = format!("0x{}", "0".repeat(512));
        serde_json::from_value(serde_json::json!({
            "type": "0x2",
            "status": status,
            "cumulativeGasUsed": "0x1e8480",
            "logs": [],
            "logsBloom": bloom,
            "transactionHash": DEPLOY_TX,
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0xbb),
            "blockNumber": "0x1",
            "gasUsed": "0x1e8480",
            "effectiveGasPrice": "0x3b9aca00",
            "from": Address::repeat_byte(0x5e),
            "to": null,
            "contractAddress": contract_address,
        }))
        .unwrap()
    }

    fn mocked(asserter: Asserter) -> RpcClient {
        let provider = ProviderBuilder::<_, _, Ethereum>::default()
            .connect_mocked_client(asserter)
            .erased();
        RpcClient::new(provider, Address::repeat_byte(0x5e))
    }

    #[tokio::test]
    async fn submit_returns_node_reported_hash() -> eyre::Result<()> {
        let asserter = Asserter::new();
        let client = mocked(asserter.clone());

        let hash = b256!("0x00000000000000000000000000000000000000000000000000000000abc12300");
        asserter.push_success(&hash);

        let tx = TransactionRequest::default()
            .with_to(Address::repeat_byte(0x11))
            .with_value(U256::from(1u64));
        assert_eq!(client.submit(tx).await?, hash);
        Ok(())
    }

    #[tokio::test]
    async fn submit_surfaces_node_errors() {
        let asserter = Asserter::new();
        let client = mocked(asserter.clone());
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let err = client
            .submit(TransactionRequest::default())
            .await
            .unwrap_err();
        assert!(format!("{err:?}").contains("insufficient funds"));
    }

    #[tokio::test]
    async fn chain_id_is_read_from_node() -> eyre::Result<()> {
        let asserter = Asserter::new();
        let client = mocked(asserter.clone());
        asserter.push_success(&U256::from(31337u64));

        assert_eq!(client.chain_id().await?, 31337);
        Ok(())
    }

    #[test]
    fn confirmed_creation_yields_deployment() {
        let deployment = confirmed_deployment(
            DEPLOY_TX,
            &receipt("0x1", Some("0x00000000000000000000000000000000000000c1")),
        )
        .unwrap();
        assert_eq!(
            deployment,
            Deployment {
                address: address!("0x00000000000000000000000000000000000000c1"),
                transaction_hash: DEPLOY_TX,
            }
        );
    }

    #[test]
    fn reverted_creation_is_rejected() {
        let err = confirmed_deployment(
            DEPLOY_TX,
            &receipt("0x0", Some("0x00000000000000000000000000000000000000c1")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Reverted(hash) if hash == DEPLOY_TX));
    }

    #[test]
    fn receipt_without_contract_address_is_rejected() {
        let err = confirmed_deployment(DEPLOY_TX, &receipt("0x1", None)).unwrap_err();
        assert!(matches!(err, Error::NoContractAddress(hash) if hash == DEPLOY_TX));
    }

    #[tokio::test]
    async fn deploy_surfaces_rejected_submission() {
        let asserter = Asserter::new();
        let client = mocked(asserter.clone());
        asserter.push_failure_msg("insufficient funds for gas * price + value");

        let err = client.deploy(Bytes::from_static(&[0x60, 0x80])).await.unwrap_err();
        assert!(format!("{err:?}").contains("insufficient funds"));
    }

    #[test]
    fn confirmations_never_drop_below_one() {
        let client = mocked(Asserter::new()).with_confirmations(0);
        assert_eq!(client.confirmations, 1);
    }
}
