use crate::config::NetworkConfig;
use crate::errors::ValidationError;
use crate::instructions::{CallArg, MoveCall, TransactionRequest};
use crate::require;
use crate::states::ObjectId;

pub const FUNCTION: &str = "add_to_whitelist";

pub fn handler(
    cfg: &NetworkConfig,
    market: &ObjectId,
    address: &str,
) -> Result<TransactionRequest, ValidationError> {
    let address = address.trim();
    require!(!address.is_empty(), ValidationError::InvalidAddress);
    let address = ObjectId::parse(address).map_err(|_| ValidationError::InvalidAddress)?;

    let call = MoveCall::market(
        cfg.package_id,
        FUNCTION,
        vec![
            CallArg::Object(market.to_string()),
            CallArg::AddressVector(vec![address]),
            CallArg::Object(cfg.clock_id.clone()),
        ],
    );
    Ok(call.into())
}
