use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::WalletFailure;
use crate::instructions::TransactionRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedTransaction {
    pub digest: String,
}

/// Connected account plus its signing capability.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Currently connected address, `None` while disconnected.
    fn account(&self) -> watch::Receiver<Option<String>>;

    async fn sign_and_execute(
        &self,
        request: &TransactionRequest,
    ) -> Result<ExecutedTransaction, WalletFailure>;
}

pub fn current_address(wallet: &dyn Wallet) -> Option<String> {
    wallet.account().borrow().clone()
}
