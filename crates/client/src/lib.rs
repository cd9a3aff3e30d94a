mod signer;

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::{TransactionReceipt, TransactionRequest};
pub use signer::{get_signer, Deployer, DeployerSigner};
use std::{fmt, time::Duration};
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error returned by the RPC endpoint
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Neither a key nor a connection was supplied
    #[error("Provide at least one of key or provider.")]
    MissingCredentials,

    /// The node behind the connection manages no accounts
    #[error("Node manages no account at index {0}")]
    NoManagedAccount(usize),

    /// The signer has no connection to send through
    #[error("Signer is not connected to a provider")]
    NotConnected,

    /// No receipt within [`RECEIPT_TIMEOUT`]
    #[error("Timed out waiting for receipt of {0}")]
    ReceiptTimeout(TxHash),

    /// The transaction was mined but failed
    #[error("Transaction {0} reverted")]
    Reverted(TxHash),
}

/// Opens connections to RPC endpoints.
pub trait Connector: Send + Sync {
    /// Create a provider for the given endpoint.
    fn connect(&self, rpc_url: &str) -> Result<DynProvider, ClientError>;
}

/// Connects over HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    fn connect(&self, rpc_url: &str) -> Result<DynProvider, ClientError> {
        create_provider(rpc_url)
    }
}

/// Convenience function to create an ethereum rpc provider from url.
pub fn create_provider(rpc_url: &str) -> Result<DynProvider, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new().connect_http(url).erased();

    Ok(provider)
}

/// Upper bound on waiting for a transfer to be mined.
pub const RECEIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Build a fully specified native transfer from `sender`.
///
/// Nonce, chain ID, fees and gas limit are fetched up front so local signers
/// and node-managed accounts send the same request.
pub async fn prepare_transfer(
    provider: &DynProvider,
    sender: Address,
    to: Address,
    amount: U256,
) -> Result<TransactionRequest, ClientError> {
    let nonce = provider.get_transaction_count(sender).await.map_err(rpc)?;
    let chain_id = provider.get_chain_id().await.map_err(rpc)?;
    let fees = provider.estimate_eip1559_fees().await.map_err(rpc)?;

    let mut tx = TransactionRequest::default()
        .with_from(sender)
        .with_to(to)
        .with_value(amount)
        .with_nonce(nonce)
        .with_chain_id(chain_id)
        .with_max_fee_per_gas(fees.max_fee_per_gas)
        .with_max_priority_fee_per_gas(fees.max_priority_fee_per_gas);

    let gas_limit = provider.estimate_gas(tx.clone()).await.map_err(rpc)?;
    tx.set_gas_limit(gas_limit);

    Ok(tx)
}

/// Send `amount` wei of native currency from `from` to `to` and wait for the receipt.
///
/// Local signers sign through a wallet layered on the deployer's connection;
/// node-managed accounts are left to the node (`eth_sendTransaction`).
pub async fn transfer(from: &Deployer, to: Address, amount: U256) -> Result<TxHash, ClientError> {
    let provider = from.provider().ok_or(ClientError::NotConnected)?;
    let sender = from.address().await?;

    debug!("Transferring {} wei from {} to {}", amount, sender, to);

    let tx = prepare_transfer(provider, sender, to, amount).await?;

    let pending = match from.signer() {
        DeployerSigner::Local(signer) => {
            let wallet = alloy_network::EthereumWallet::from(signer.clone());
            ProviderBuilder::new()
                .wallet(wallet)
                .connect_provider(provider.clone())
                .send_transaction(tx)
                .await
        }
        DeployerSigner::Managed { .. } => provider.send_transaction(tx).await,
    }
    .map_err(rpc)?;

    let tx_hash = *pending.tx_hash();
    debug!(%tx_hash, "Transfer sent, waiting for receipt");

    let receipt = wait_for_receipt(provider, tx_hash).await?;
    if !receipt.status() {
        return Err(ClientError::Reverted(tx_hash));
    }

    info!(%tx_hash, "Transferred {} wei to {}", amount, to);

    Ok(tx_hash)
}

async fn wait_for_receipt(
    provider: &DynProvider,
    tx_hash: TxHash,
) -> Result<TransactionReceipt, ClientError> {
    let poll_interval = provider.client().poll_interval();

    timeout(RECEIPT_TIMEOUT, async {
        loop {
            if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await.map_err(rpc)? {
                return Ok::<_, ClientError>(receipt);
            }
            sleep(poll_interval).await;
        }
    })
    .await
    .map_err(|_| ClientError::ReceiptTimeout(tx_hash))?
}

fn rpc(e: impl fmt::Display) -> ClientError {
    ClientError::Rpc(format!("{}", e))
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_primitives::{Address, Bloom, TxHash, B256, U64};
    use alloy_provider::{DynProvider, Provider, ProviderBuilder};
    use alloy_rpc_types_eth::FeeHistory;
    use alloy_transport::mock::Asserter;

    /// Anvil account #0.
    pub const ANVIL_KEY_0: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    pub const CHAIN_ID: u64 = 412346;
    pub const GAS_ESTIMATE: u64 = 21_000;

    /// Provider answering from the asserter's queued responses.
    pub fn mocked_provider(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    /// Queue the answers `prepare_transfer` consumes, in call order.
    pub fn push_transfer_fields(asserter: &Asserter, nonce: u64) {
        asserter.push_success(&U64::from(nonce));
        asserter.push_success(&U64::from(CHAIN_ID));
        asserter.push_success(&FeeHistory {
            oldest_block: 1,
            base_fee_per_gas: vec![1_000_000_000, 1_000_000_000],
            gas_used_ratio: vec![0.5],
            reward: Some(vec![vec![1_000_000]]),
            ..Default::default()
        });
        asserter.push_success(&U64::from(GAS_ESTIMATE));
    }

    /// Queue a whole transfer: fields, the send and a mined receipt.
    pub fn push_transfer(asserter: &Asserter, from: Address, to: Address, tx_hash: TxHash) {
        push_transfer_fields(asserter, 0);
        asserter.push_success(&tx_hash);
        asserter.push_success(&receipt(tx_hash, from, to, true));
    }

    pub fn receipt(tx_hash: TxHash, from: Address, to: Address, success: bool) -> serde_json::Value {
        serde_json::json!({
            "type": "0x2",
            "status": if success { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x5208",
            "logs": [],
            "logsBloom": Bloom::ZERO,
            "transactionHash": tx_hash,
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0xbb),
            "blockNumber": "0x1",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "from": from,
            "to": to,
            "contractAddress": null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use alloy_primitives::{address, b256, TxKind};
    use alloy_transport::mock::Asserter;

    const SENDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const RECIPIENT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
    const TX_HASH: TxHash =
        b256!("0x1111111111111111111111111111111111111111111111111111111111111111");

    fn one_ether() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn test_invalid_url() {
        let result = create_provider("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_connector() {
        let result = HttpConnector.connect("http://localhost:8545");
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_transfer_requires_connection() {
        let deployer = get_signer(None, Some(ANVIL_KEY_0)).unwrap();

        let err = transfer(&deployer, RECIPIENT, U256::from(1u64))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::NotConnected));
    }

    #[tokio::test]
    async fn test_prepare_transfer() {
        let asserter = Asserter::new();
        push_transfer_fields(&asserter, 7);
        let provider = mocked_provider(&asserter);

        let tx = prepare_transfer(&provider, SENDER, RECIPIENT, one_ether())
            .await
            .unwrap();

        assert_eq!(tx.from, Some(SENDER));
        assert_eq!(tx.to, Some(TxKind::Call(RECIPIENT)));
        assert_eq!(tx.value, Some(one_ether()));
        assert_eq!(tx.nonce, Some(7));
        assert_eq!(tx.chain_id, Some(CHAIN_ID));
        assert_eq!(tx.gas, Some(GAS_ESTIMATE));
        assert!(tx.max_fee_per_gas.is_some());
        assert!(tx.max_priority_fee_per_gas.is_some());
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_with_local_signer() {
        let asserter = Asserter::new();
        push_transfer(&asserter, SENDER, RECIPIENT, TX_HASH);
        let deployer = get_signer(Some(mocked_provider(&asserter)), Some(ANVIL_KEY_0)).unwrap();

        let tx_hash = transfer(&deployer, RECIPIENT, one_ether()).await.unwrap();

        assert_eq!(tx_hash, TX_HASH);
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_with_managed_account() {
        let asserter = Asserter::new();
        asserter.push_success(&vec![SENDER]);
        push_transfer(&asserter, SENDER, RECIPIENT, TX_HASH);
        let deployer = get_signer(Some(mocked_provider(&asserter)), None).unwrap();

        let tx_hash = transfer(&deployer, RECIPIENT, one_ether()).await.unwrap();

        assert_eq!(tx_hash, TX_HASH);
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_transfer_reverted() {
        let asserter = Asserter::new();
        push_transfer_fields(&asserter, 0);
        asserter.push_success(&TX_HASH);
        asserter.push_success(&receipt(TX_HASH, SENDER, RECIPIENT, false));
        let deployer = get_signer(Some(mocked_provider(&asserter)), Some(ANVIL_KEY_0)).unwrap();

        let err = transfer(&deployer, RECIPIENT, one_ether())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Reverted(hash) if hash == TX_HASH));
    }

    #[tokio::test]
    async fn test_transfer_send_failure() {
        let asserter = Asserter::new();
        push_transfer_fields(&asserter, 0);
        asserter.push_failure_msg("insufficient funds");
        let deployer = get_signer(Some(mocked_provider(&asserter)), Some(ANVIL_KEY_0)).unwrap();

        let err = transfer(&deployer, RECIPIENT, one_ether())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Rpc(_)));
    }
}
