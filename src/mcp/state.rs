//! UI-local state held by the server on behalf of its client.
//!
//! Services never touch this; the server applies their results here.

use alloy::primitives::Address;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::{
    services::LoadingFlag,
    types::{FormData, FormField, TransactionRecord, WalletStatus},
};

/// Connection, form, loading flag, counter and transfer list.
#[derive(Debug, Default)]
pub struct DappState {
    connected_account: RwLock<Option<Address>>,
    form: RwLock<FormData>,
    loading: LoadingFlag,
    transaction_count: RwLock<Option<u64>>,
    transactions: RwLock<Vec<TransactionRecord>>,
}

/// Point-in-time copy of the state, for display.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    /// Connected account, checksummed.
    pub connected_account: Option<String>,
    pub form: FormData,
    pub is_loading: bool,
    pub transaction_count: Option<u64>,
    /// Number of loaded transfers.
    pub transactions: usize,
}

impl DappState {
    /// Fresh state with the counter seeded from a persisted value.
    pub fn new(initial_count: Option<u64>) -> Self {
        Self { transaction_count: RwLock::new(initial_count), ..Default::default() }
    }

    /// Account of the last successful connection.
    pub async fn connected_account(&self) -> Option<Address> {
        *self.connected_account.read().await
    }

    /// Record the account from a connection attempt. Only a successful
    /// connection changes the state.
    pub async fn apply_wallet_status(&self, status: WalletStatus) {
        if let Some(account) = status.account() {
            *self.connected_account.write().await = Some(account);
        }
    }

    /// Copy of the form, as a submission would see it.
    pub async fn form_snapshot(&self) -> FormData {
        self.form.read().await.clone()
    }

    /// Overwrite one form field.
    pub async fn update_form(&self, field: FormField, value: String) {
        self.form.write().await.set(field, value);
    }

    /// Shared flag raised while a submission awaits confirmation.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Last known transaction count.
    pub async fn transaction_count(&self) -> Option<u64> {
        *self.transaction_count.read().await
    }

    /// Store the count reported by a completed submission.
    pub async fn set_transaction_count(&self, count: u64) {
        *self.transaction_count.write().await = Some(count);
    }

    /// Currently loaded transfer list.
    pub async fn transactions(&self) -> Vec<TransactionRecord> {
        self.transactions.read().await.clone()
    }

    /// Replace the whole list; records are never merged.
    pub async fn replace_transactions(&self, records: Vec<TransactionRecord>) {
        *self.transactions.write().await = records;
    }

    /// Point-in-time copy for display.
    pub async fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            connected_account: self.connected_account().await.map(|a| a.to_string()),
            form: self.form_snapshot().await,
            is_loading: self.loading.is_loading(),
            transaction_count: self.transaction_count().await,
            transactions: self.transactions.read().await.len(),
        }
    }
}
