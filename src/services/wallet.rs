//! Wallet connection service and contract handle factory.

use std::sync::Arc;

use alloy::primitives::Address;

use crate::{
    error::{AppError, Result},
    ethereum::{constants::INSTALL_WALLET_PROMPT, InjectedWallet, TransactionsContract},
    types::WalletStatus,
};

/// User-facing alert channel.
pub trait UserPrompt: Send + Sync {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Prompt that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPrompt;

impl UserPrompt for LogPrompt {
    fn alert(&self, message: &str) {
        tracing::warn!(prompt = message, "User prompt");
    }
}

/// Service for wallet connection and contract access.
#[derive(Clone)]
pub struct WalletService {
    wallet: Option<Arc<dyn InjectedWallet>>,
    contract_address: Address,
    prompt: Arc<dyn UserPrompt>,
}

impl WalletService {
    /// Create a new wallet service. `wallet` is `None` when no wallet is injected.
    pub fn new(
        wallet: Option<Arc<dyn InjectedWallet>>,
        contract_address: Address,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self { wallet, contract_address, prompt }
    }

    /// Whether a wallet is injected.
    pub fn is_installed(&self) -> bool {
        self.wallet.is_some()
    }

    /// The injected wallet, without prompting.
    pub fn wallet(&self) -> Option<&Arc<dyn InjectedWallet>> {
        self.wallet.as_ref()
    }

    /// The injected wallet, or the install prompt when there is none.
    pub fn require_wallet(&self) -> Option<&Arc<dyn InjectedWallet>> {
        if self.wallet.is_none() {
            self.prompt.alert(INSTALL_WALLET_PROMPT);
        }
        self.wallet.as_ref()
    }

    /// Look up accounts the wallet has already authorized. Never prompts
    /// inside the wallet.
    pub async fn check_if_wallet_is_connected(&self) -> Result<WalletStatus> {
        let Some(wallet) = self.require_wallet() else {
            return Ok(WalletStatus::NotInstalled);
        };

        let accounts = wallet.accounts().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to read authorized accounts");
        })?;

        Ok(first_account(&accounts))
    }

    /// Ask the wallet for account access. The user may be prompted.
    pub async fn connect_wallet(&self) -> Result<WalletStatus> {
        let Some(wallet) = self.require_wallet() else {
            return Ok(WalletStatus::NotInstalled);
        };

        let accounts = wallet.request_accounts().await.inspect_err(|e| {
            tracing::error!(error = %e, "Wallet connection failed");
        })?;

        Ok(first_account(&accounts))
    }

    /// Build a handle to the transactions contract, authorized by `signer`.
    pub fn contract_handle(&self, signer: Option<Address>) -> Result<Arc<dyn TransactionsContract>> {
        let wallet = self.wallet.as_ref().ok_or_else(|| {
            AppError::WalletUnavailable("no wallet to back the contract handle".to_string())
        })?;
        Ok(wallet.contract(self.contract_address, signer))
    }

    /// Address the contract handles are bound to.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }
}

fn first_account(accounts: &[Address]) -> WalletStatus {
    match accounts.first() {
        Some(account) => {
            tracing::info!(account = %account, "Wallet connected");
            WalletStatus::Connected(*account)
        }
        None => {
            tracing::info!("No accounts found");
            WalletStatus::NoAccounts
        }
    }
}
