use crate::config::NetworkConfig;
use crate::instructions::{CallArg, MoveCall, TransactionRequest};
use crate::states::ObjectId;

pub const FUNCTION: &str = "vote";

/// Bounds of `option_index` are left to the contract (`EInvalidOption`).
pub fn handler(cfg: &NetworkConfig, market: &ObjectId, option_index: u64) -> TransactionRequest {
    let call = MoveCall::market(
        cfg.package_id,
        FUNCTION,
        vec![
            CallArg::Object(market.to_string()),
            CallArg::U64(option_index),
            CallArg::Object(cfg.clock_id.clone()),
        ],
    );
    TransactionRequest {
        call,
        gas_budget: Some(cfg.vote_gas_budget),
    }
}
