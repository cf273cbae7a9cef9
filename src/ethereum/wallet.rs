//! Injected wallet capability.
//!
//! The adapter never reaches for an ambient wallet object. Whoever builds it
//! hands over an `InjectedWallet`, or nothing when no wallet extension exists.

use std::sync::Arc;

use alloy::primitives::{Address, TxHash};
use async_trait::async_trait;

use crate::{error::Result, ethereum::TransactionsContract, types::ValueTransfer};

/// Wallet extension surface consumed by the adapter.
///
/// Mirrors the EIP-1193 requests a dApp makes against `window.ethereum`.
/// Implementations mediate all signing and broadcasting.
#[async_trait]
pub trait InjectedWallet: Send + Sync {
    /// `eth_accounts`: accounts already authorized, without prompting.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// `eth_requestAccounts`: asks the user for account access.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// `eth_sendTransaction`: submits a native-value transfer.
    async fn send_transaction(&self, transfer: &ValueTransfer) -> Result<TxHash>;

    /// Build a contract handle at `address`, authorized by `signer` for writes.
    ///
    /// Pure construction: no request reaches the wallet.
    fn contract(&self, address: Address, signer: Option<Address>)
        -> Arc<dyn TransactionsContract>;
}
