//! Transfer history service.

use crate::{
    error::Result,
    services::WalletService,
    types::{TransactionRecord, TransferRecord},
};

/// Service for listing transfers recorded on the contract.
#[derive(Clone)]
pub struct HistoryService {
    wallet_service: WalletService,
}

impl HistoryService {
    /// Create a new history service.
    pub fn new(wallet_service: WalletService) -> Self {
        Self { wallet_service }
    }

    /// Fetch and project every recorded transfer.
    ///
    /// Without a wallet this logs and returns `Ok(None)`; no prompt is shown.
    /// The result is the full list and replaces whatever the caller held.
    pub async fn get_all_transactions(&self) -> Result<Option<Vec<TransactionRecord>>> {
        if !self.wallet_service.is_installed() {
            tracing::info!("Ethereum is not present");
            return Ok(None);
        }

        self.load()
            .await
            .map(Some)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load transactions"))
    }

    async fn load(&self) -> Result<Vec<TransactionRecord>> {
        let contract = self.wallet_service.contract_handle(None)?;
        let raw = contract.get_all_transactions().await?;

        tracing::debug!(count = raw.len(), "Fetched transfer records");

        project_all(&raw)
    }
}

fn project_all(raw: &[TransferRecord]) -> Result<Vec<TransactionRecord>> {
    raw.iter().map(TransactionRecord::from_transfer).collect()
}
