//! Configuration management module.
//!
//! Handles loading configuration from environment variables.

use std::{env, path::PathBuf};

use alloy::primitives::Address;

use crate::{error::AppError, ethereum::constants::TRANSACTIONS_CONTRACT_ADDRESS};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the wallet. `None` behaves like a browser
    /// without a wallet extension.
    pub wallet_rpc_url: Option<String>,
    /// Address of the deployed transactions contract.
    pub contract_address: Address,
    /// File holding the last known transaction count, read once at startup.
    pub transaction_count_file: Option<PathBuf>,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wallet_rpc_url: None,
            contract_address: TRANSACTIONS_CONTRACT_ADDRESS,
            transaction_count_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `WALLET_RPC_URL`: wallet JSON-RPC endpoint (unset means no wallet)
    /// - `TRANSACTIONS_CONTRACT_ADDRESS`: overrides the built-in contract address
    /// - `TRANSACTION_COUNT_FILE`: persisted transaction counter
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let wallet_rpc_url = non_empty_var("WALLET_RPC_URL");

        let contract_address = match non_empty_var("TRANSACTIONS_CONTRACT_ADDRESS") {
            Some(raw) => parse_contract_address(&raw)?,
            None => TRANSACTIONS_CONTRACT_ADDRESS,
        };

        let transaction_count_file = non_empty_var("TRANSACTION_COUNT_FILE").map(PathBuf::from);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self { wallet_rpc_url, contract_address, transaction_count_file, log_level })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_contract_address(raw: &str) -> Result<Address, AppError> {
    raw.parse::<Address>().map_err(|e| {
        AppError::Config(format!("Invalid TRANSACTIONS_CONTRACT_ADDRESS '{}': {}", raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_wallet() {
        let config = Config::default();
        assert!(config.wallet_rpc_url.is_none());
        assert_eq!(config.contract_address, TRANSACTIONS_CONTRACT_ADDRESS);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_contract_address() {
        let addr = parse_contract_address("0x5FbDB2315678afecb367f032d93F642f64180aa3").unwrap();
        assert_eq!(addr, TRANSACTIONS_CONTRACT_ADDRESS);

        match parse_contract_address("0x1234") {
            Err(AppError::Config(msg)) => assert!(msg.contains("0x1234")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }
}
