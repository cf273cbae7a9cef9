//! Transfer-related types.

use alloy::primitives::{Address, TxHash, U256};
use chrono::TimeZone;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    ethereum::constants::{ETHER_DECIMALS, NATIVE_TRANSFER_GAS},
    types::{format_timestamp, format_timestamp_in, u256_to_decimal},
};

/// Pending transfer form, edited field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    /// Recipient address as typed.
    pub address_to: String,
    /// Decimal ether amount as typed (e.g. "0.5").
    pub amount: String,
    /// Short keyword stored with the record.
    pub keyword: String,
    /// Free-form message stored with the record.
    pub message: String,
}

/// A single editable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    AddressTo,
    Amount,
    Keyword,
    Message,
}

impl FormData {
    /// Replace one field, leaving the others untouched.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::AddressTo => &mut self.address_to,
            FormField::Amount => &mut self.amount,
            FormField::Keyword => &mut self.keyword,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "addressTo" => Ok(FormField::AddressTo),
            "amount" => Ok(FormField::Amount),
            "keyword" => Ok(FormField::Keyword),
            "message" => Ok(FormField::Message),
            _ => Err(format!("Unknown form field: {}", s)),
        }
    }
}

/// `eth_sendTransaction` parameters for a native-value transfer.
///
/// `gas` and `value` travel as hex quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueTransfer {
    pub from: Address,
    pub to: Address,
    #[serde(serialize_with = "serialize_hex_quantity")]
    pub gas: U256,
    #[serde(serialize_with = "serialize_hex_quantity")]
    pub value: U256,
}

impl ValueTransfer {
    /// Plain transfer of `value` wei with the fixed 21000 gas limit.
    pub fn new(from: Address, to: Address, value: U256) -> Self {
        Self { from, to, gas: U256::from(NATIVE_TRANSFER_GAS), value }
    }
}

fn serialize_hex_quantity<S: serde::Serializer>(
    value: &U256,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{value:#x}"))
}

/// Transfer as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub sender: Address,
    pub receiver: Address,
    /// Amount in wei.
    pub amount: U256,
    pub message: String,
    /// Block timestamp, Unix seconds.
    pub timestamp: U256,
    pub keyword: String,
}

/// Display shape of a recorded transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub address_to: String,
    pub address_from: String,
    /// Local date and time of the block.
    pub timestamp: String,
    pub message: String,
    pub keyword: String,
    /// Amount in ether. Serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl TransactionRecord {
    /// Project an on-chain record, rendering its timestamp in local time.
    pub fn from_transfer(record: &TransferRecord) -> Result<Self> {
        Self::project(record, format_timestamp)
    }

    /// Project an on-chain record, rendering its timestamp in `tz`.
    pub fn from_transfer_in<Tz>(record: &TransferRecord, tz: &Tz) -> Result<Self>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self::project(record, |secs| format_timestamp_in(secs, tz))
    }

    fn project(
        record: &TransferRecord,
        render_time: impl FnOnce(u64) -> Option<String>,
    ) -> Result<Self> {
        let timestamp = u64::try_from(record.timestamp)
            .ok()
            .and_then(render_time)
            .ok_or_else(|| {
                AppError::NumericOverflow(format!("timestamp {} out of range", record.timestamp))
            })?;

        let amount = u256_to_decimal(record.amount, ETHER_DECIMALS).ok_or_else(|| {
            AppError::NumericOverflow(format!("amount {} out of range", record.amount))
        })?;

        Ok(Self {
            address_to: record.receiver.to_string(),
            address_from: record.sender.to_string(),
            timestamp,
            message: record.message.clone(),
            keyword: record.keyword.clone(),
            amount,
        })
    }
}

/// Outcome of a wallet connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "account", rename_all = "snake_case")]
pub enum WalletStatus {
    /// No wallet is injected; the install prompt was shown.
    NotInstalled,
    /// The wallet answered with no accounts.
    NoAccounts,
    /// First account reported by the wallet.
    Connected(Address),
}

impl WalletStatus {
    /// The connected account, if any.
    pub fn account(&self) -> Option<Address> {
        match self {
            WalletStatus::Connected(account) => Some(*account),
            _ => None,
        }
    }
}

/// Result of a confirmed submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReceipt {
    /// Hash of the native-value transfer.
    pub transfer_hash: TxHash,
    /// Hash of the `addToBlockchain` transaction.
    pub record_hash: TxHash,
    /// Contract count read after confirmation.
    pub transaction_count: u64,
}
