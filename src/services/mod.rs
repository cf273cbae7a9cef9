//! Business logic services module.

pub mod count_store;
pub mod history;
pub mod loading;
pub mod transfer;
pub mod wallet;

pub use count_store::TransactionCountStore;
pub use history::HistoryService;
pub use loading::{LoadingFlag, LoadingGuard};
pub use transfer::TransferService;
pub use wallet::{LogPrompt, UserPrompt, WalletService};
