//! Ethereum network constants.
//!
//! Contains the deployed contract address and the fixed transfer parameters.

use alloy::primitives::{address, Address};

// ============================================================================
// Contract Addresses
// ============================================================================

/// Transactions contract that records transfer metadata.
pub const TRANSACTIONS_CONTRACT_ADDRESS: Address =
    address!("5FbDB2315678afecb367f032d93F642f64180aa3");

// ============================================================================
// Transfer Parameters
// ============================================================================

/// Gas limit for a plain native-value transfer.
pub const NATIVE_TRANSFER_GAS: u64 = 21_000;

/// Decimals of the native asset (1 ETH = 10^18 wei).
pub const ETHER_DECIMALS: u8 = 18;

// ============================================================================
// User-facing Messages
// ============================================================================

/// Prompt shown when no wallet is injected.
pub const INSTALL_WALLET_PROMPT: &str = "Please Install MetaMask";
