//! MCP server module.
//!
//! Contains the MCP server implementation with tool handlers and the
//! UI-local state it maintains.

pub mod server;
pub mod state;

pub use server::{EthereumTransactionsServer, UpdateFormInput};
pub use state::{DappState, StateSnapshot};
