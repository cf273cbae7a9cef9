//! Transactions contract bindings.
//!
//! The contract keeps an append-only list of transfer records and a counter.

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash, U256},
    providers::PendingTransactionBuilder,
    sol,
};
use async_trait::async_trait;

use crate::{
    error::{AppError, Result},
    ethereum::HttpProvider,
    types::TransferRecord,
};

// Transactions contract interface
sol! {
    #[sol(rpc)]
    interface ITransactions {
        struct TransferStruct {
            address sender;
            address receiver;
            uint256 amount;
            string message;
            uint256 timestamp;
            string keyword;
        }

        function addToBlockchain(
            address receiver,
            uint256 amount,
            string memory keyword,
            string memory message
        ) external;

        function getAllTransactions() external view returns (TransferStruct[] memory);

        function getTransactionCount() external view returns (uint256);
    }
}

impl From<ITransactions::TransferStruct> for TransferRecord {
    fn from(raw: ITransactions::TransferStruct) -> Self {
        Self {
            sender: raw.sender,
            receiver: raw.receiver,
            amount: raw.amount,
            message: raw.message,
            timestamp: raw.timestamp,
            keyword: raw.keyword,
        }
    }
}

/// Contract surface consumed by the adapter.
#[async_trait]
pub trait TransactionsContract: Send + Sync {
    /// Every transfer recorded so far, oldest first.
    async fn get_all_transactions(&self) -> Result<Vec<TransferRecord>>;

    /// Record transfer metadata. Returns the hash of the pending transaction.
    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        keyword: String,
        message: String,
    ) -> Result<TxHash>;

    /// Block until `tx_hash` is mined. A reverted transaction is an error.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()>;

    /// Authoritative number of recorded transfers.
    async fn get_transaction_count(&self) -> Result<U256>;
}

/// `TransactionsContract` backed by the wallet's JSON-RPC provider.
#[derive(Clone)]
pub struct TransactionsContractClient {
    address: Address,
    signer: Option<Address>,
    provider: HttpProvider,
}

impl TransactionsContractClient {
    /// Bind to the contract at `address`. Writes are sent from `signer`.
    pub fn new(address: Address, signer: Option<Address>, provider: HttpProvider) -> Self {
        Self { address, signer, provider }
    }

    /// Contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    fn instance(&self) -> ITransactions::ITransactionsInstance<HttpProvider> {
        ITransactions::new(self.address, self.provider.clone())
    }
}

#[async_trait]
impl TransactionsContract for TransactionsContractClient {
    async fn get_all_transactions(&self) -> Result<Vec<TransferRecord>> {
        let raw = self.instance().getAllTransactions().call().await?;
        Ok(raw.into_iter().map(TransferRecord::from).collect())
    }

    async fn add_to_blockchain(
        &self,
        receiver: Address,
        amount: U256,
        keyword: String,
        message: String,
    ) -> Result<TxHash> {
        let signer = self.signer.ok_or(AppError::NotConnected)?;
        let contract = self.instance();
        let pending = contract
            .addToBlockchain(receiver, amount, keyword, message)
            .from(signer)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> Result<()> {
        let receipt =
            PendingTransactionBuilder::new(self.provider.clone(), tx_hash).get_receipt().await?;

        if !receipt.status() {
            return Err(AppError::ContractCall(format!("transaction {tx_hash} reverted")));
        }
        Ok(())
    }

    async fn get_transaction_count(&self) -> Result<U256> {
        let count = self.instance().getTransactionCount().call().await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::{primitives::address, sol_types::SolCall};

    #[test]
    fn test_transfer_struct_conversion() {
        let raw = ITransactions::TransferStruct {
            sender: address!("00000000000000000000000000000000000000aa"),
            receiver: address!("00000000000000000000000000000000000000bb"),
            amount: U256::from(42u64),
            message: "hi".to_string(),
            timestamp: U256::from(1_700_000_000u64),
            keyword: "k".to_string(),
        };

        let record = TransferRecord::from(raw);
        assert_eq!(record.sender, address!("00000000000000000000000000000000000000aa"));
        assert_eq!(record.receiver, address!("00000000000000000000000000000000000000bb"));
        assert_eq!(record.amount, U256::from(42u64));
        assert_eq!(record.keyword, "k");
    }

    #[test]
    fn test_function_signatures() {
        assert_eq!(
            ITransactions::addToBlockchainCall::SIGNATURE,
            "addToBlockchain(address,uint256,string,string)"
        );
        assert_eq!(ITransactions::getAllTransactionsCall::SIGNATURE, "getAllTransactions()");
        assert_eq!(ITransactions::getTransactionCountCall::SIGNATURE, "getTransactionCount()");
    }
}
