//! Error types and handling module.
//!
//! Defines the closed set of failures the wallet adapter can report.

use alloy::transports::{RpcError, TransportError};
use rmcp::ErrorData as McpError;
use thiserror::Error;

/// EIP-1193 error code for a request the user declined in the wallet.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No wallet is injected, or it cannot serve the request.
    #[error("Wallet unavailable: {0}")]
    WalletUnavailable(String),

    /// The user declined the request in the wallet.
    #[error("User rejected request: {0}")]
    UserRejected(String),

    /// The operation needs a connected account and there is none.
    #[error("No connected account")]
    NotConnected,

    /// JSON-RPC error response from the wallet or node.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Contract call or transaction failed.
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric overflow during conversion.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        match &err {
            RpcError::ErrorResp(payload) if payload.code == USER_REJECTED_CODE => {
                AppError::UserRejected(payload.message.to_string())
            }
            RpcError::ErrorResp(_) => AppError::Rpc(err.to_string()),
            _ => AppError::Transport(err.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(inner) => inner.into(),
            other => AppError::ContractCall(other.to_string()),
        }
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<AppError> for McpError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidAddress(_) | AppError::Parse(_) | AppError::NumericOverflow(_) => {
                McpError::invalid_params(err.to_string(), None)
            }
            AppError::Config(_) | AppError::NotConnected => {
                McpError::invalid_request(err.to_string(), None)
            }
            _ => McpError::internal_error(err.to_string(), None),
        }
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    fn error_response(code: i64, message: &'static str) -> TransportError {
        let payload = serde_json::json!({ "code": code, "message": message });
        RpcError::ErrorResp(serde_json::from_value(payload).unwrap())
    }

    #[test]
    fn test_app_error_wallet_unavailable_display() {
        let err = AppError::WalletUnavailable("no injected wallet".to_string());
        assert_eq!(err.to_string(), "Wallet unavailable: no injected wallet");
    }

    #[test]
    fn test_app_error_not_connected_display() {
        assert_eq!(AppError::NotConnected.to_string(), "No connected account");
    }

    #[test]
    fn test_app_error_contract_call_display() {
        let err = AppError::ContractCall("execution reverted".to_string());
        assert_eq!(err.to_string(), "Contract call failed: execution reverted");
    }

    #[test]
    fn test_user_rejection_is_classified() {
        let err: AppError = error_response(4001, "User denied account authorization").into();
        match err {
            AppError::UserRejected(msg) => assert!(msg.contains("User denied")),
            other => panic!("Expected UserRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_other_error_response_is_rpc() {
        let err: AppError = error_response(-32000, "insufficient funds").into();
        match err {
            AppError::Rpc(msg) => assert!(msg.contains("insufficient funds")),
            other => panic!("Expected Rpc, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_is_transport() {
        let err: AppError = TransportError::local_usage_str("connection refused").into();
        match err {
            AppError::Transport(msg) => assert!(msg.contains("connection refused")),
            other => panic!("Expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn test_from_parse_int_error() {
        let parse_result: std::result::Result<u64, _> = "seven".parse();
        let app_err: AppError = parse_result.unwrap_err().into();

        match app_err {
            AppError::Parse(msg) => assert!(msg.contains("invalid")),
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_app_error_to_mcp_error_invalid_params() {
        let err = AppError::InvalidAddress("bad address".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_PARAMS);

        let err = AppError::Parse("parse failed".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_app_error_to_mcp_error_invalid_request() {
        let mcp_err: McpError = AppError::NotConnected.into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_REQUEST);

        let mcp_err: McpError = AppError::Config("config error".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INVALID_REQUEST);
    }

    #[test]
    fn test_app_error_to_mcp_error_internal_error() {
        let mcp_err: McpError = AppError::UserRejected("denied".to_string()).into();
        assert_eq!(mcp_err.code, ErrorCode::INTERNAL_ERROR);
        assert!(mcp_err.message.contains("denied"));
        assert!(mcp_err.data.is_none());
    }
}
