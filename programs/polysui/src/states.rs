use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::config::{MAX_OPTIONS, MIN_OPTIONS};
use crate::errors::ValidationError;
use crate::require;

pub const SUI_ADDRESS_LENGTH: usize = 32;

/// 32-byte Sui object identifier, also the shape of an account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; SUI_ADDRESS_LENGTH]);

impl ObjectId {
    pub const fn new(bytes: [u8; SUI_ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Accepts `0x`-prefixed (or bare) hex of exactly 32 bytes.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        require!(
            digits.len() == SUI_ADDRESS_LENGTH * 2,
            ValidationError::InvalidMarketId
        );
        let mut bytes = [0u8; SUI_ADDRESS_LENGTH];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| ValidationError::InvalidMarketId)?;
        Ok(Self(bytes))
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

impl FromStr for ObjectId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectId::parse(&raw).map_err(de::Error::custom)
    }
}

/// Fields of a `market::VotingMarket` object as returned by `sui_getObject`.
///
/// Addresses stay as the strings the node returned; membership checks compare
/// them verbatim against the connected account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Market {
    pub question: String,
    pub options: Vec<String>,
    #[serde(deserialize_with = "u64_list")]
    pub votes: Vec<u64>,
    #[serde(deserialize_with = "u64_value")]
    pub deadline: u64,
    #[serde(default)]
    pub whitelist_enabled: bool,
    #[serde(default, deserialize_with = "address_list")]
    pub initial_voters: Vec<String>,
    #[serde(default, deserialize_with = "address_list")]
    pub voters: Vec<String>,
    #[serde(default)]
    pub creator: String,
}

impl Market {
    pub fn vote_count(&self, index: usize) -> u64 {
        self.votes.get(index).copied().unwrap_or(0)
    }

    pub fn has_voter(&self, address: &str) -> bool {
        self.voters.iter().any(|voter| voter == address)
    }

    pub fn is_initial_voter(&self, address: &str) -> bool {
        self.initial_voters.iter().any(|voter| voter == address)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Number(u64),
    Text(String),
}

impl U64Repr {
    fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        match self {
            U64Repr::Number(n) => Ok(n),
            U64Repr::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

fn u64_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    U64Repr::deserialize(deserializer)?.into_u64()
}

fn u64_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u64>, D::Error> {
    Vec::<U64Repr>::deserialize(deserializer)?
        .into_iter()
        .map(U64Repr::into_u64)
        .collect()
}

// Anything other than an array of strings reads as an empty list.
fn address_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(address) => Some(address),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Public,
    Whitelist,
}

/// Raw input of the market creation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMarketForm {
    pub question: String,
    pub options: Vec<String>,
    pub duration_minutes: String,
    pub access: Access,
    /// One address per line.
    pub whitelist: String,
}

impl Default for CreateMarketForm {
    fn default() -> Self {
        Self {
            question: String::new(),
            options: vec![String::new(); MIN_OPTIONS],
            duration_minutes: "60".to_string(),
            access: Access::Public,
            whitelist: String::new(),
        }
    }
}

impl CreateMarketForm {
    pub fn add_option(&mut self) -> bool {
        if self.options.len() >= MAX_OPTIONS {
            return false;
        }
        self.options.push(String::new());
        true
    }

    pub fn remove_option(&mut self, index: usize) -> bool {
        if self.options.len() <= MIN_OPTIONS || index >= self.options.len() {
            return false;
        }
        self.options.remove(index);
        true
    }

    pub fn filled_options(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|option| option.trim())
            .filter(|option| !option.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn whitelist_lines(&self) -> Vec<&str> {
        self.whitelist
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}
