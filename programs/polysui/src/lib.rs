//! Client for the Polysui voting markets on Sui.
//!
//! Reads `market::VotingMarket` objects, builds the `create_market`, `vote`
//! and `add_to_whitelist` calls for an external wallet to sign, and derives
//! what a viewer may do with a market.

pub mod errors;
pub mod config;
pub mod states;
pub mod instructions;
pub mod rpc;
pub mod wallet;
pub mod reader;
pub mod failure;
pub mod view;
pub mod flows;
pub mod app;

pub use app::{App, Notice, NoticeKind, Page};
pub use config::NetworkConfig;
pub use errors::{ConfigError, LookupError, RpcError, ValidationError, WalletFailure};
pub use failure::{translate, FailureReason};
pub use flows::{CreateFlow, CreateOutcome, MarketScreen, MarketState, Poller, Snapshot};
pub use instructions::{CallArg, MoveCall, TransactionRequest};
pub use reader::{fetch_market, search_market, SearchError};
pub use rpc::{ChainClient, SuiRpcClient};
pub use states::{Access, CreateMarketForm, Market, ObjectId};
pub use view::{MarketView, OptionView};
pub use wallet::{ExecutedTransaction, Wallet};
