//! Ethereum Transactions MCP Server Library
//!
//! Bridges an injected Ethereum wallet and a transfer-recording contract.
//! Sends ETH transfers, records their metadata on-chain, and lists the
//! recorded history.
//!
//! # Features
//!
//! - **Wallet Connection**: Read authorized accounts or request access
//! - **Transfers**: Send ETH and record recipient, amount, keyword and message on-chain
//! - **History**: Load every recorded transfer in display form
//!
//! # Example
//!
//! ```rust,ignore
//! use ethereum_transactions_mcp::{Config, EthereumTransactionsServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = EthereumTransactionsServer::new(config)?;
//!     server.initialize().await;
//!     // Run server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod mcp;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::{AppError, Result};
pub use ethereum::constants::*;
pub use mcp::EthereumTransactionsServer;
