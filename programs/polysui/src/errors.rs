use std::fmt;

use thiserror::Error;

/// Returns early with the given error when the condition does not hold.
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please connect your wallet first")]
    WalletNotConnected,
    #[error("Please provide at least 2 options")]
    TooFewOptions,
    #[error("A market can have at most 10 options")]
    TooManyOptions,
    #[error("Options cannot be blank")]
    EmptyOption,
    #[error("Please enter a question")]
    EmptyQuestion,
    #[error("Duration must be at least 1 minute")]
    InvalidDuration,
    #[error("Please add at least one address to the whitelist")]
    EmptyWhitelist,
    #[error("Invalid whitelist address: {0}")]
    InvalidWhitelistEntry(String),
    #[error("Please enter a valid Sui address")]
    InvalidAddress,
    #[error("Please enter a Market ID")]
    EmptyMarketId,
    #[error("Invalid Market ID format. Please enter a valid Sui Object ID starting with 0x")]
    InvalidMarketId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Invalid Market ID format. Please enter a valid Sui Object ID starting with 0x")]
    MalformedId,
    #[error("Market not found. Please check the Market ID and try again.")]
    NotFound,
    #[error("This object is not a valid market. Please enter a correct Market ID.")]
    NotAMarket,
    #[error("This object exists but is not a Polysui market. Please enter a valid Market ID.")]
    ForeignObject,
}

impl LookupError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LookupError::MalformedId | LookupError::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("malformed rpc response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("rpc response carried neither result nor error")]
    EmptyResponse,
    #[error("transaction {0} was not confirmed in time")]
    FinalityTimeout(String),
}

/// Opaque failure reported by the wallet while signing or executing.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletFailure {
    pub message: Option<String>,
    pub payload: Option<serde_json::Value>,
}

impl WalletFailure {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            payload: None,
        }
    }

    pub fn payload(payload: serde_json::Value) -> Self {
        Self {
            message: None,
            payload: Some(payload),
        }
    }

    /// Textual form used for abort matching: the message, else the JSON payload.
    pub fn text(&self) -> String {
        match (&self.message, &self.payload) {
            (Some(message), _) if !message.is_empty() => message.clone(),
            (_, Some(serde_json::Value::String(raw))) => raw.clone(),
            (_, Some(payload)) => payload.to_string(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for WalletFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl std::error::Error for WalletFailure {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
