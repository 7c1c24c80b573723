pub mod add_to_whitelist;
pub mod create_market;
pub mod vote;

pub use create_market::CreateMarketArgs;

use serde::Serialize;
use serde_json::Value;

use crate::config::MARKET_MODULE;
use crate::states::ObjectId;

/// A single argument of a Move call, tagged with its Move type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CallArg {
    Object(String),
    String(String),
    StringVector(Vec<String>),
    AddressVector(Vec<ObjectId>),
    U64(u64),
    Bool(bool),
}

impl CallArg {
    /// Sui JSON form of the argument.
    pub fn to_sui_json(&self) -> Value {
        match self {
            CallArg::Object(id) => Value::String(id.clone()),
            CallArg::String(text) => Value::String(text.clone()),
            CallArg::StringVector(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            CallArg::AddressVector(items) => {
                Value::Array(items.iter().map(|id| Value::String(id.to_string())).collect())
            }
            CallArg::U64(n) => Value::String(n.to_string()),
            CallArg::Bool(flag) => Value::Bool(*flag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    pub fn market(package: ObjectId, function: &str, arguments: Vec<CallArg>) -> Self {
        Self {
            package,
            module: MARKET_MODULE.to_string(),
            function: function.to_string(),
            arguments,
        }
    }

    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }

    pub fn rpc_arguments(&self) -> Vec<Value> {
        self.arguments.iter().map(CallArg::to_sui_json).collect()
    }
}

/// Unsigned call handed to the wallet for signing and submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub call: MoveCall,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_budget: Option<u64>,
}

impl From<MoveCall> for TransactionRequest {
    fn from(call: MoveCall) -> Self {
        Self {
            call,
            gas_budget: None,
        }
    }
}
