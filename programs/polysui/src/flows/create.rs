use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{info, warn};

use super::Busy;
use crate::app::Notice;
use crate::config::NetworkConfig;
use crate::errors::ValidationError;
use crate::failure::{self, FailureReason};
use crate::instructions::{create_market, CreateMarketArgs};
use crate::reader::created_market;
use crate::rpc::ChainClient;
use crate::states::{CreateMarketForm, ObjectId};
use crate::wallet::{current_address, Wallet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Local validation failed; nothing was submitted.
    Rejected(ValidationError),
    Busy,
    Failed(FailureReason),
    Created(ObjectId),
    /// Submitted, but no market object showed up in the object changes.
    Unlocated,
    /// Submitted, but the transaction could not be read back.
    LookupFailed,
}

impl CreateOutcome {
    pub fn market(&self) -> Option<ObjectId> {
        match self {
            CreateOutcome::Created(id) => Some(*id),
            _ => None,
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            CreateOutcome::Rejected(err) => Notice::error(err.to_string()),
            CreateOutcome::Busy => Notice::error("A market is already being created"),
            CreateOutcome::Failed(FailureReason::UserCancelled) => {
                Notice::error(FailureReason::UserCancelled.message())
            }
            CreateOutcome::Failed(_) => Notice::error("Failed to create market. Please try again."),
            CreateOutcome::Created(_) => Notice::success("Market created successfully!"),
            CreateOutcome::Unlocated => Notice::success(
                "Market created but couldn't get ID. Check Sui Explorer with your wallet address.",
            ),
            CreateOutcome::LookupFailed => Notice::success(
                "Market created! Check Sui Explorer with your wallet address for the Market ID.",
            ),
        }
    }
}

pub struct CreateFlow {
    cfg: Arc<NetworkConfig>,
    client: Arc<dyn ChainClient>,
    wallet: Arc<dyn Wallet>,
    creating: AtomicBool,
}

impl CreateFlow {
    pub fn new(cfg: Arc<NetworkConfig>, client: Arc<dyn ChainClient>, wallet: Arc<dyn Wallet>) -> Self {
        Self {
            cfg,
            client,
            wallet,
            creating: AtomicBool::new(false),
        }
    }

    pub fn is_creating(&self) -> bool {
        self.creating.load(Ordering::Acquire)
    }

    /// Validates, submits and then locates the new market. The form is reset
    /// only when the market id was found.
    pub async fn submit(&self, form: &mut CreateMarketForm) -> CreateOutcome {
        if current_address(self.wallet.as_ref()).is_none() {
            return CreateOutcome::Rejected(ValidationError::WalletNotConnected);
        }
        let request = match CreateMarketArgs::try_from(&*form)
            .and_then(|args| create_market::handler(&self.cfg, args))
        {
            Ok(request) => request,
            Err(err) => return CreateOutcome::Rejected(err),
        };
        let Some(_busy) = Busy::claim(&self.creating) else {
            return CreateOutcome::Busy;
        };

        let executed = match self.wallet.sign_and_execute(&request).await {
            Ok(executed) => executed,
            Err(failure) => {
                let reason = failure::translate(&failure);
                warn!(%failure, ?reason, "create_market submission failed");
                return CreateOutcome::Failed(reason);
            }
        };
        info!(digest = %executed.digest, "create_market submitted");

        // Object changes may lag the execution response.
        sleep(self.cfg.creation_grace).await;

        let outcome = match self.client.get_transaction_block(&executed.digest).await {
            Ok(block) => created_market(&block).map_or(CreateOutcome::Unlocated, CreateOutcome::Created),
            Err(err) => {
                warn!(digest = %executed.digest, ?err, "could not read back create_market transaction");
                CreateOutcome::LookupFailed
            }
        };
        if let CreateOutcome::Created(id) = &outcome {
            info!(market = %id, "market created");
            *form = CreateMarketForm::default();
        }
        outcome
    }
}
