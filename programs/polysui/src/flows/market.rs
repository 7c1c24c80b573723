use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{lock, Busy};
use crate::app::Notice;
use crate::config::NetworkConfig;
use crate::errors::ValidationError;
use crate::failure::{self, FailureReason};
use crate::instructions::{add_to_whitelist, vote};
use crate::reader;
use crate::rpc::{await_finality, ChainClient};
use crate::states::{Market, ObjectId};
use crate::view::{now_millis, MarketView};
use crate::wallet::{current_address, Wallet};

#[derive(Debug, Clone, PartialEq)]
pub enum MarketState {
    Loading,
    /// First fetch failed; nothing to show.
    Missing,
    Ready(Arc<Market>),
}

/// Last applied fetch. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generation: u64,
    pub state: MarketState,
}

pub struct MarketScreen {
    id: ObjectId,
    cfg: Arc<NetworkConfig>,
    client: Arc<dyn ChainClient>,
    wallet: Arc<dyn Wallet>,
    snapshot: watch::Sender<Snapshot>,
    tickets: AtomicU64,
    last_account: Mutex<Option<String>>,
    voting_for: Mutex<Option<usize>>,
    /// Account whose vote was signed but may not be indexed yet.
    voted_locally: Mutex<Option<String>>,
    adding_address: AtomicBool,
}

impl MarketScreen {
    pub fn new(
        id: ObjectId,
        cfg: Arc<NetworkConfig>,
        client: Arc<dyn ChainClient>,
        wallet: Arc<dyn Wallet>,
    ) -> Self {
        let (snapshot, _) = watch::channel(Snapshot {
            generation: 0,
            state: MarketState::Loading,
        });
        let last_account = Mutex::new(current_address(wallet.as_ref()));
        Self {
            id,
            cfg,
            client,
            wallet,
            snapshot,
            tickets: AtomicU64::new(0),
            last_account,
            voting_for: Mutex::new(None),
            voted_locally: Mutex::new(None),
            adding_address: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn market(&self) -> Option<Arc<Market>> {
        match &self.snapshot.borrow().state {
            MarketState::Ready(market) => Some(Arc::clone(market)),
            _ => None,
        }
    }

    pub fn view(&self) -> Option<MarketView> {
        self.view_at(now_millis())
    }

    pub fn view_at(&self, now_ms: u64) -> Option<MarketView> {
        let user = current_address(self.wallet.as_ref());
        let voted_locally = user.as_deref().is_some_and(|u| self.voted_locally(u));
        self.market().map(|market| {
            let mut view = MarketView::compute(&market, user.as_deref(), now_ms);
            if voted_locally {
                view.mark_voted();
            }
            view
        })
    }

    fn voted_locally(&self, user: &str) -> bool {
        lock(&self.voted_locally).as_deref() == Some(user)
    }

    pub fn voting_for(&self) -> Option<usize> {
        *lock(&self.voting_for)
    }

    pub fn is_adding_address(&self) -> bool {
        self.adding_address.load(Ordering::Acquire)
    }

    /// Fetches the market and installs the result if nothing newer landed
    /// meanwhile. Failures keep the previous snapshot.
    pub async fn refresh(&self) {
        let ticket = self.tickets.fetch_add(1, Ordering::AcqRel) + 1;
        let fetched = reader::fetch_market_by_id(self.client.as_ref(), &self.cfg, &self.id).await;

        self.snapshot.send_if_modified(|current| {
            if ticket <= current.generation {
                debug!(market = %self.id, ticket, "discarding superseded fetch");
                return false;
            }
            match fetched {
                Ok(market) => {
                    *current = Snapshot {
                        generation: ticket,
                        state: MarketState::Ready(Arc::new(market)),
                    };
                    true
                }
                Err(err) if current.state == MarketState::Loading => {
                    info!(market = %self.id, %err, "market unavailable");
                    *current = Snapshot {
                        generation: ticket,
                        state: MarketState::Missing,
                    };
                    true
                }
                Err(err) => {
                    warn!(market = %self.id, %err, "refresh failed, keeping last snapshot");
                    false
                }
            }
        });
    }

    /// Refreshes when the connected account differs from the last one seen.
    pub async fn on_account_changed(&self) -> bool {
        let current = current_address(self.wallet.as_ref());
        let changed = {
            let mut last = lock(&self.last_account);
            if *last == current {
                false
            } else {
                *last = current;
                true
            }
        };
        if changed {
            *lock(&self.voted_locally) = None;
            debug!(market = %self.id, "account changed");
            self.refresh().await;
        }
        changed
    }

    pub async fn vote(&self, option_index: usize) -> Notice {
        let Some(user) = current_address(self.wallet.as_ref()) else {
            return Notice::error(ValidationError::WalletNotConnected.to_string());
        };
        if self.voted_locally(&user) || self.market().is_some_and(|market| market.has_voter(&user)) {
            return Notice::error(FailureReason::AlreadyVoted.message());
        }
        let Some(_in_flight) = VoteInFlight::claim(&self.voting_for, option_index) else {
            return Notice::error("A vote is already being submitted");
        };

        let request = vote::handler(&self.cfg, &self.id, option_index as u64);
        info!(market = %self.id, option_index, "submitting vote");

        match self.wallet.sign_and_execute(&request).await {
            Ok(executed) => {
                *lock(&self.voted_locally) = Some(user);
                let notice =
                    match await_finality(self.client.as_ref(), &self.cfg, &executed.digest).await {
                        Ok(_) => Notice::success("Vote recorded successfully"),
                        Err(err) => {
                            warn!(digest = %executed.digest, ?err, "vote finality not observed");
                            Notice::success("Vote confirmed")
                        }
                    };
                self.refresh().await;
                notice
            }
            Err(failure) => {
                let reason = failure::translate(&failure);
                warn!(market = %self.id, %failure, ?reason, "vote failed");
                Notice::error(reason.message())
            }
        }
    }

    pub async fn add_to_whitelist(&self, address: &str) -> Notice {
        let request = match add_to_whitelist::handler(&self.cfg, &self.id, address) {
            Ok(request) => request,
            Err(err) => return Notice::error(err.to_string()),
        };
        let Some(_busy) = Busy::claim(&self.adding_address) else {
            return Notice::error("An address is already being added");
        };

        match self.wallet.sign_and_execute(&request).await {
            Ok(executed) => {
                info!(market = %self.id, digest = %executed.digest, "whitelist extended");
                self.refresh().await;
                Notice::success("Address added to whitelist")
            }
            Err(failure) => {
                let reason = failure::translate(&failure);
                warn!(market = %self.id, %failure, ?reason, "add_to_whitelist failed");
                match reason {
                    FailureReason::UserCancelled => Notice::error(reason.message()),
                    _ => Notice::error("Failed to add address"),
                }
            }
        }
    }

    /// Refreshes now, then every `poll_interval` and on every account change,
    /// until the returned [`Poller`] is dropped.
    pub fn spawn_poller(self: &Arc<Self>) -> Poller {
        let screen = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut account = screen.wallet.account();
            let mut wallet_alive = true;
            let mut ticker = interval(screen.cfg.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => screen.refresh().await,
                    changed = account.changed(), if wallet_alive => match changed {
                        Ok(()) => {
                            screen.on_account_changed().await;
                        }
                        Err(_) => wallet_alive = false,
                    },
                }
            }
        });
        Poller { handle }
    }
}

struct VoteInFlight<'a>(&'a Mutex<Option<usize>>);

impl<'a> VoteInFlight<'a> {
    fn claim(slot: &'a Mutex<Option<usize>>, option_index: usize) -> Option<Self> {
        let mut current = lock(slot);
        if current.is_some() {
            return None;
        }
        *current = Some(option_index);
        Some(Self(slot))
    }
}

impl Drop for VoteInFlight<'_> {
    fn drop(&mut self) {
        *lock(self.0) = None;
    }
}

/// Background refresh task, aborted on drop.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    pub fn stop(self) {}

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
