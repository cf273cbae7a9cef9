//! Ethereum interaction module.
//!
//! Contains the injected wallet capability, its JSON-RPC implementation,
//! and contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod wallet;

pub use client::{Eip1193Wallet, HttpProvider};
pub use contracts::transactions::{TransactionsContract, TransactionsContractClient};
pub use wallet::InjectedWallet;
