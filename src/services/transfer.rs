//! Transfer submission service.

use alloy::primitives::{Address, U256};

use crate::{
    error::{AppError, Result},
    services::{LoadingFlag, WalletService},
    types::{parse_ether, FormData, SubmissionReceipt, ValueTransfer},
};

/// Service that moves value and records it on the transactions contract.
#[derive(Clone)]
pub struct TransferService {
    wallet_service: WalletService,
}

impl TransferService {
    /// Create a new transfer service.
    pub fn new(wallet_service: WalletService) -> Self {
        Self { wallet_service }
    }

    /// Send the transfer described by `form` from `from`, then record it.
    ///
    /// `form` is the caller's snapshot taken at invocation time. `loading` is
    /// raised only while waiting for the record to be mined.
    ///
    /// Returns `Ok(None)` when no wallet is injected (the install prompt is
    /// shown instead). There are no retries: if the value transfer lands and
    /// the record call fails, the two stay inconsistent.
    pub async fn send_transaction(
        &self,
        from: Option<Address>,
        form: FormData,
        loading: &LoadingFlag,
    ) -> Result<Option<SubmissionReceipt>> {
        if self.wallet_service.require_wallet().is_none() {
            return Ok(None);
        }

        self.submit(from, form, loading)
            .await
            .map(Some)
            .inspect_err(|e| tracing::error!(error = %e, "Transaction failed"))
    }

    async fn submit(
        &self,
        from: Option<Address>,
        form: FormData,
        loading: &LoadingFlag,
    ) -> Result<SubmissionReceipt> {
        let wallet = self.wallet_service.wallet().ok_or_else(|| {
            AppError::WalletUnavailable("wallet disappeared during submission".to_string())
        })?;
        let from = from.ok_or(AppError::NotConnected)?;

        let FormData { address_to, amount, keyword, message } = form;
        let to = parse_recipient(&address_to)?;
        let amount = parse_ether(&amount).map_err(AppError::Parse)?;

        let contract = self.wallet_service.contract_handle(Some(from))?;

        tracing::info!(from = %from, to = %to, amount = %amount, "Sending value transfer");
        let transfer_hash = wallet.send_transaction(&ValueTransfer::new(from, to, amount)).await?;

        let record_hash = contract.add_to_blockchain(to, amount, keyword, message).await?;

        {
            let _loading = loading.begin();
            tracing::info!("Loading - {}", record_hash);
            contract.wait_for_confirmation(record_hash).await?;
        }
        tracing::info!("Success - {}", record_hash);

        let count = contract.get_transaction_count().await?;
        let transaction_count = count_to_u64(count)?;

        Ok(SubmissionReceipt { transfer_hash, record_hash, transaction_count })
    }
}

fn parse_recipient(raw: &str) -> Result<Address> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidAddress("recipient cannot be empty".to_string()));
    }
    trimmed.parse::<Address>().map_err(|e| AppError::InvalidAddress(format!("{}: {}", raw, e)))
}

fn count_to_u64(count: U256) -> Result<u64> {
    u64::try_from(count)
        .map_err(|_| AppError::NumericOverflow(format!("transaction count {} exceeds u64", count)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ethereum::constants::{INSTALL_WALLET_PROMPT, TRANSACTIONS_CONTRACT_ADDRESS},
        services::UserPrompt,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct CountingPrompt(Mutex<Vec<String>>);

    impl UserPrompt for CountingPrompt {
        fn alert(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn test_parse_recipient() {
        let addr = parse_recipient(" 0x5FbDB2315678afecb367f032d93F642f64180aa3 ").unwrap();
        assert_eq!(addr, TRANSACTIONS_CONTRACT_ADDRESS);

        assert!(matches!(parse_recipient(""), Err(AppError::InvalidAddress(_))));
        assert!(matches!(parse_recipient("0xB"), Err(AppError::InvalidAddress(_))));
    }

    #[test]
    fn test_count_to_u64() {
        assert_eq!(count_to_u64(U256::from(7u64)).unwrap(), 7);
        assert!(matches!(count_to_u64(U256::MAX), Err(AppError::NumericOverflow(_))));
    }

    #[tokio::test]
    async fn test_send_without_wallet_prompts_and_returns_none() {
        let prompt = Arc::new(CountingPrompt::default());
        let wallet_service = WalletService::new(None, TRANSACTIONS_CONTRACT_ADDRESS, prompt.clone());
        let service = TransferService::new(wallet_service);
        let loading = LoadingFlag::new();

        let result = service.send_transaction(None, FormData::default(), &loading).await;

        assert!(matches!(result, Ok(None)));
        assert!(!loading.is_loading());
        assert_eq!(prompt.0.lock().unwrap().as_slice(), [INSTALL_WALLET_PROMPT]);
    }
}
