//! Wallet JSON-RPC client.

use alloy::{
    network::Ethereum,
    primitives::{Address, TxHash},
    providers::{Provider, ProviderBuilder, RootProvider},
};
use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    ethereum::{InjectedWallet, TransactionsContract, TransactionsContractClient},
    types::ValueTransfer,
};

/// Type alias for the HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Wallet reached over JSON-RPC, speaking the same EIP-1193 methods a
/// browser extension answers.
///
/// The wallet owns the keys: transactions go out as `eth_sendTransaction`
/// with a `from` field and the wallet signs them.
#[derive(Clone)]
pub struct Eip1193Wallet {
    /// The underlying provider.
    provider: Arc<HttpProvider>,
    /// RPC URL for logging.
    rpc_url: String,
}

impl Eip1193Wallet {
    /// Create a new wallet client.
    ///
    /// Note: This does NOT make any network calls.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid wallet RPC URL: {}", rpc_url)))?;

        let provider = ProviderBuilder::new().connect_http(url).root().clone();

        tracing::info!(rpc_url = %rpc_url, "Wallet client created");

        Ok(Self { provider: Arc::new(provider), rpc_url: rpc_url.to_string() })
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    async fn account_request(&self, method: &'static str) -> Result<Vec<Address>> {
        tracing::debug!(method, rpc_url = %self.rpc_url, "Wallet account request");
        let accounts: Vec<Address> = self.provider.raw_request(method.into(), ()).await?;
        Ok(accounts)
    }
}

#[async_trait]
impl InjectedWallet for Eip1193Wallet {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.account_request("eth_accounts").await
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.account_request("eth_requestAccounts").await
    }

    async fn send_transaction(&self, transfer: &ValueTransfer) -> Result<TxHash> {
        tracing::debug!(
            from = %transfer.from,
            to = %transfer.to,
            value = %transfer.value,
            "Requesting value transfer"
        );
        let hash: TxHash =
            self.provider.raw_request("eth_sendTransaction".into(), [transfer.clone()]).await?;
        Ok(hash)
    }

    fn contract(
        &self,
        address: Address,
        signer: Option<Address>,
    ) -> Arc<dyn TransactionsContract> {
        Arc::new(TransactionsContractClient::new(address, signer, self.provider().clone()))
    }
}

impl std::fmt::Debug for Eip1193Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Eip1193Wallet").field("rpc_url", &self.rpc_url).finish()
    }
}
