//! Common utilities for integration tests.
//!
//! In-memory stand-ins for the wallet extension and the transactions contract.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;

use ethereum_transactions_mcp::{
    error::{AppError, Result},
    ethereum::{InjectedWallet, TransactionsContract},
    services::{LoadingFlag, UserPrompt, WalletService},
    types::{TransferRecord, ValueTransfer},
    Config, EthereumTransactionsServer, TRANSACTIONS_CONTRACT_ADDRESS,
};

pub const ALICE: Address = address!("00000000000000000000000000000000000000aa");
pub const BOB: Address = address!("00000000000000000000000000000000000000bb");
pub const CAROL: Address = address!("00000000000000000000000000000000000000cc");

/// Arguments of one `addToBlockchain` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCall {
    pub receiver: Address,
    pub amount: U256,
    pub keyword: String,
    pub message: String,
}

/// Prompt that remembers every alert.
#[derive(Default)]
pub struct RecordingPrompt {
    alerts: Mutex<Vec<String>>,
}

impl RecordingPrompt {
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl UserPrompt for RecordingPrompt {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

/// Contract whose state lives in memory.
#[derive(Default)]
pub struct FakeContract {
    pub records: Mutex<Vec<TransferRecord>>,
    pub record_calls: Mutex<Vec<RecordCall>>,
    pub count: Mutex<U256>,
    pub fail_history: AtomicBool,
    pub fail_record: AtomicBool,
    pub fail_confirmation: AtomicBool,
    /// Flag sampled while a confirmation is awaited.
    pub loading_probe: Mutex<Option<LoadingFlag>>,
    pub loading_during_confirmation: Mutex<Vec<bool>>,
}

impl FakeContract {
    pub fn with_records(records: Vec<TransferRecord>) -> Self {
        let count = U256::from(records.len());
        Self { records: Mutex::new(records), count: Mutex::new(count), ..Default::default() }
    }

    pub fn watch_loading(&self, flag: &LoadingFlag) {
        *self.loading_probe.lock().unwrap() = Some(flag.clone());
    }

    pub fn set_count(&self, count: u64) {
        *self.count.lock().unwrap() = U256::from(count);
    }

    pub fn calls(&self) -> Vec<RecordCall> {
        self.record_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionsContract for FakeContract {
    async fn get_all_transactions(&self) -> Result<Vec<TransferRecord>> {
        if self.fail_history.load(Ordering::SeqCst) {
            return Err(AppError::ContractCall("execution reverted".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        keyword: String,
        message: String,
    ) -> Result<TxHash> {
        if self.fail_record.load(Ordering::SeqCst) {
            return Err(AppError::ContractCall("execution reverted".to_string()));
        }

        let mut calls = self.record_calls.lock().unwrap();
        calls.push(RecordCall { receiver, amount, keyword, message });
        Ok(TxHash::with_last_byte(calls.len() as u8))
    }

    async fn wait_for_confirmation(&self, _tx_hash: TxHash) -> Result<()> {
        let probe = self.loading_probe.lock().unwrap().clone();
        if let Some(flag) = probe {
            self.loading_during_confirmation.lock().unwrap().push(flag.is_loading());
        }

        // Let a concurrent submission interleave here.
        tokio::task::yield_now().await;

        if self.fail_confirmation.load(Ordering::SeqCst) {
            return Err(AppError::PendingTransaction("dropped from mempool".to_string()));
        }

        let mut count = self.count.lock().unwrap();
        *count += U256::from(1u64);
        Ok(())
    }

    async fn get_transaction_count(&self) -> Result<U256> {
        Ok(*self.count.lock().unwrap())
    }
}

/// Wallet extension answering from memory.
pub struct FakeWallet {
    pub accounts: Mutex<Vec<Address>>,
    pub reject_requests: AtomicBool,
    pub fail_accounts: AtomicBool,
    pub transfers: Mutex<Vec<ValueTransfer>>,
    pub contract: Arc<FakeContract>,
    pub contract_requests: Mutex<Vec<(Address, Option<Address>)>>,
}

impl FakeWallet {
    pub fn new(accounts: Vec<Address>, contract: Arc<FakeContract>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            reject_requests: AtomicBool::new(false),
            fail_accounts: AtomicBool::new(false),
            transfers: Mutex::new(Vec::new()),
            contract,
            contract_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<ValueTransfer> {
        self.transfers.lock().unwrap().clone()
    }
}

#[async_trait]
impl InjectedWallet for FakeWallet {
    async fn accounts(&self) -> Result<Vec<Address>> {
        if self.fail_accounts.load(Ordering::SeqCst) {
            return Err(AppError::Transport("connection refused".to_string()));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        if self.reject_requests.load(Ordering::SeqCst) {
            return Err(AppError::UserRejected("User rejected the request.".to_string()));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn send_transaction(&self, transfer: &ValueTransfer) -> Result<TxHash> {
        if self.reject_requests.load(Ordering::SeqCst) {
            return Err(AppError::UserRejected("User denied transaction signature.".to_string()));
        }

        let mut transfers = self.transfers.lock().unwrap();
        transfers.push(transfer.clone());
        Ok(TxHash::with_last_byte(0x80 + transfers.len() as u8))
    }

    fn contract(
        &self,
        address: Address,
        signer: Option<Address>,
    ) -> Arc<dyn TransactionsContract> {
        self.contract_requests.lock().unwrap().push((address, signer));
        self.contract.clone()
    }
}

/// Wallet service over an optional fake wallet.
pub fn wallet_service(wallet: Option<Arc<FakeWallet>>) -> (WalletService, Arc<RecordingPrompt>) {
    let prompt = Arc::new(RecordingPrompt::default());
    let wallet = wallet.map(|w| w as Arc<dyn InjectedWallet>);
    (WalletService::new(wallet, TRANSACTIONS_CONTRACT_ADDRESS, prompt.clone()), prompt)
}

/// Server over an optional fake wallet.
pub fn server(wallet: Option<Arc<FakeWallet>>) -> (EthereumTransactionsServer, Arc<RecordingPrompt>) {
    let prompt = Arc::new(RecordingPrompt::default());
    let wallet = wallet.map(|w| w as Arc<dyn InjectedWallet>);
    let server = EthereumTransactionsServer::with_wallet(Config::default(), wallet, prompt.clone());
    (server, prompt)
}

/// One ether in wei.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}
