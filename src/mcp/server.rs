//! MCP server implementation.

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{Implementation, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;

use crate::{
    config::Config,
    error::AppError,
    ethereum::{constants::INSTALL_WALLET_PROMPT, Eip1193Wallet, InjectedWallet},
    mcp::state::DappState,
    services::{
        HistoryService, LogPrompt, TransactionCountStore, TransferService, UserPrompt,
        WalletService,
    },
    types::{FormField, SubmissionReceipt, WalletStatus},
};

/// Ethereum Transactions MCP Server.
///
/// Each tool call stands in for a UI event against the wallet adapter.
#[derive(Clone)]
pub struct EthereumTransactionsServer {
    wallet_service: WalletService,
    transfer_service: TransferService,
    history_service: HistoryService,
    state: Arc<DappState>,
    tool_router: ToolRouter<Self>,
}

impl EthereumTransactionsServer {
    /// Create a new server from configuration.
    ///
    /// Note: no network calls are made here. Without `wallet_rpc_url` the
    /// server runs as if no wallet extension were installed.
    pub fn new(config: Config) -> Result<Self, AppError> {
        tracing::info!("Initializing Ethereum Transactions MCP Server");

        let wallet: Option<Arc<dyn InjectedWallet>> = match &config.wallet_rpc_url {
            Some(url) => Some(Arc::new(Eip1193Wallet::new(url)?)),
            None => {
                tracing::warn!("WALLET_RPC_URL not set, running without a wallet");
                None
            }
        };

        Ok(Self::with_wallet(config, wallet, Arc::new(LogPrompt)))
    }

    /// Create a server around an explicitly provided wallet and prompt.
    pub fn with_wallet(
        config: Config,
        wallet: Option<Arc<dyn InjectedWallet>>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        let count_store = TransactionCountStore::new(config.transaction_count_file.clone());
        let state = Arc::new(DappState::new(count_store.load()));

        let wallet_service = WalletService::new(wallet, config.contract_address, prompt);
        let transfer_service = TransferService::new(wallet_service.clone());
        let history_service = HistoryService::new(wallet_service.clone());

        tracing::info!(
            contract = %config.contract_address,
            wallet = wallet_service.is_installed(),
            "Ethereum Transactions MCP Server initialized"
        );

        Self {
            wallet_service,
            transfer_service,
            history_service,
            state,
            tool_router: Self::tool_router(),
        }
    }

    /// UI-local state.
    pub fn state(&self) -> &Arc<DappState> {
        &self.state
    }

    /// Startup check for an already authorized account. Failures are logged.
    pub async fn initialize(&self) {
        match self.wallet_service.check_if_wallet_is_connected().await {
            Ok(status) => self.state.apply_wallet_status(status).await,
            Err(e) => tracing::warn!(error = %e, "Startup wallet check failed"),
        }
    }
}

/// Input parameters for the update_form tool.
#[derive(Debug, Clone, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct UpdateFormInput {
    /// Recipient address (0x...).
    #[serde(default)]
    pub address_to: Option<String>,
    /// Amount in ETH (human-readable, e.g., "0.5").
    #[serde(default)]
    pub amount: Option<String>,
    /// Keyword stored with the transfer.
    #[serde(default)]
    pub keyword: Option<String>,
    /// Message stored with the transfer.
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConnectionReport {
    wallet: WalletStatus,
    connected_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct SubmissionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    receipt: Option<SubmissionReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'static str>,
    transaction_count: Option<u64>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value).map_err(|e| McpError::internal_error(e.to_string(), None))
}

impl EthereumTransactionsServer {
    async fn report_connection(&self, status: WalletStatus) -> Result<String, McpError> {
        self.state.apply_wallet_status(status).await;

        let report = ConnectionReport {
            wallet: status,
            connected_account: self.state.connected_account().await.map(|a| a.to_string()),
            prompt: (status == WalletStatus::NotInstalled).then_some(INSTALL_WALLET_PROMPT),
        };
        to_json(&report)
    }
}

#[tool_router]
impl EthereumTransactionsServer {
    /// Look up an already authorized wallet account without prompting.
    #[tool(description = "Check whether the wallet has already authorized an account")]
    pub async fn check_wallet_connection(&self) -> Result<String, McpError> {
        tracing::info!("check_wallet_connection called");

        let status = self.wallet_service.check_if_wallet_is_connected().await?;
        self.report_connection(status).await
    }

    /// Request account access from the wallet.
    #[tool(description = "Request account access from the wallet and connect the first account")]
    pub async fn connect_wallet(&self) -> Result<String, McpError> {
        tracing::info!("connect_wallet called");

        let status = self.wallet_service.connect_wallet().await?;
        self.report_connection(status).await
    }

    /// Edit the pending transfer form. Fields left out keep their value.
    #[tool(description = "Update fields of the pending transfer form (address_to, amount, keyword, message)")]
    pub async fn update_form(
        &self,
        Parameters(input): Parameters<UpdateFormInput>,
    ) -> Result<String, McpError> {
        tracing::debug!(input = ?input, "update_form called");

        let updates = [
            (FormField::AddressTo, input.address_to),
            (FormField::Amount, input.amount),
            (FormField::Keyword, input.keyword),
            (FormField::Message, input.message),
        ];
        for (field, value) in updates {
            if let Some(value) = value {
                self.state.update_form(field, value).await;
            }
        }

        to_json(&self.state.form_snapshot().await)
    }

    /// Send the form's amount to its recipient and record it on-chain.
    ///
    /// Blocks until the record transaction is mined.
    #[tool(
        description = "Send the pending form as an ETH transfer from the connected account and record it on the transactions contract"
    )]
    pub async fn send_transaction(&self) -> Result<String, McpError> {
        let from = self.state.connected_account().await;
        let form = self.state.form_snapshot().await;

        tracing::info!(
            from = ?from,
            to = %form.address_to,
            amount = %form.amount,
            "send_transaction called"
        );

        let receipt =
            self.transfer_service.send_transaction(from, form, self.state.loading()).await?;

        let prompt = match &receipt {
            Some(receipt) => {
                self.state.set_transaction_count(receipt.transaction_count).await;
                None
            }
            None => Some(INSTALL_WALLET_PROMPT),
        };

        to_json(&SubmissionReport {
            receipt,
            prompt,
            transaction_count: self.state.transaction_count().await,
        })
    }

    /// Reload all recorded transfers from the contract.
    ///
    /// On failure the previously loaded list is returned unchanged.
    #[tool(description = "List every transfer recorded on the transactions contract")]
    pub async fn get_all_transactions(&self) -> Result<String, McpError> {
        tracing::info!("get_all_transactions called");

        match self.history_service.get_all_transactions().await {
            Ok(Some(records)) => self.state.replace_transactions(records).await,
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Keeping previously loaded transactions"),
        }

        to_json(&self.state.transactions().await)
    }

    /// Current connection, form, loading flag and counter.
    #[tool(description = "Show the connected account, pending form, loading flag and transaction count")]
    pub async fn get_state(&self) -> Result<String, McpError> {
        to_json(&self.state.snapshot().await)
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for EthereumTransactionsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ethereum-transactions-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Ethereum Transactions MCP Server. Connects a wallet, sends ETH transfers \
                 recorded on a transactions contract, and lists the recorded history."
                    .to_string(),
            ),
        }
    }
}
