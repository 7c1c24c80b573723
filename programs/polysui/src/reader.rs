//! Market reads: classification of a fetched object, search by id and
//! locating the market created by a transaction.

use tracing::{debug, warn};

use crate::config::{NetworkConfig, MARKET_MODULE, MARKET_STRUCT};
use crate::errors::{LookupError, ValidationError};
use crate::rpc::{ChainClient, ObjectChange, SuiObjectResponse, SuiParsedData, TransactionBlockResponse};
use crate::states::{Market, ObjectId};

/// Fetches and parses the market behind `candidate`.
///
/// A malformed id is rejected before any request is made. Transport failures
/// are reported as [`LookupError::NotFound`].
pub async fn fetch_market(
    client: &dyn ChainClient,
    cfg: &NetworkConfig,
    candidate: &str,
) -> Result<Market, LookupError> {
    let id = ObjectId::parse(candidate).map_err(|_| LookupError::MalformedId)?;
    fetch_market_by_id(client, cfg, &id).await
}

pub async fn fetch_market_by_id(
    client: &dyn ChainClient,
    cfg: &NetworkConfig,
    id: &ObjectId,
) -> Result<Market, LookupError> {
    let response = client.get_object(id).await.map_err(|err| {
        warn!(market = %id, ?err, "object read failed");
        LookupError::NotFound
    })?;
    classify(cfg, response)
}

pub fn classify(cfg: &NetworkConfig, response: SuiObjectResponse) -> Result<Market, LookupError> {
    let data = response.data.ok_or(LookupError::NotFound)?;
    let (content_type, fields) = match data.content {
        Some(SuiParsedData::MoveObject { object_type, fields }) => (object_type, fields),
        _ => return Err(LookupError::NotAMarket),
    };

    let expected = cfg.market_type();
    let object_type = data.object_type.unwrap_or(content_type);
    if !object_type.starts_with(&expected) {
        debug!(object = %data.object_id, %object_type, "object is not a market");
        return Err(LookupError::ForeignObject);
    }

    serde_json::from_value(fields).map_err(|err| {
        warn!(object = %data.object_id, ?err, "market fields did not parse");
        LookupError::NotAMarket
    })
}

/// Validates user input from the search box and confirms it names a market.
pub async fn search_market(
    client: &dyn ChainClient,
    cfg: &NetworkConfig,
    input: &str,
) -> Result<ObjectId, SearchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyMarketId.into());
    }
    let id = ObjectId::parse(trimmed).map_err(|_| ValidationError::InvalidMarketId)?;
    fetch_market_by_id(client, cfg, &id).await?;
    Ok(id)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// First market object created by the transaction, if any.
pub fn created_market(block: &TransactionBlockResponse) -> Option<ObjectId> {
    let marker = format!("::{MARKET_MODULE}::{MARKET_STRUCT}");
    block
        .object_changes
        .iter()
        .flatten()
        .find_map(|change| match change {
            ObjectChange::Created {
                object_id,
                object_type,
            } if object_type.contains(&marker) => ObjectId::parse(object_id).ok(),
            _ => None,
        })
}
