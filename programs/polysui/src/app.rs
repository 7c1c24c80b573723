use std::time::Duration;

use tokio::time::Instant;

use crate::config::NetworkConfig;
use crate::states::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Create,
    Markets,
    Market,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Outcome message of a user action, shown as a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Banner {
    notice: Notice,
    expires_at: Instant,
}

#[derive(Debug)]
pub struct App {
    page: Page,
    selected_market: Option<ObjectId>,
    banner: Option<Banner>,
    notification_ttl: Duration,
}

impl App {
    pub fn new(cfg: &NetworkConfig) -> Self {
        Self {
            page: Page::Home,
            selected_market: None,
            banner: None,
            notification_ttl: cfg.notification_ttl,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selected_market(&self) -> Option<&ObjectId> {
        self.selected_market.as_ref()
    }

    /// Switches pages. The market page needs a selection and is ignored without one.
    pub fn navigate(&mut self, page: Page) {
        if page == Page::Market && self.selected_market.is_none() {
            return;
        }
        self.page = page;
    }

    pub fn open_market(&mut self, id: ObjectId) {
        self.selected_market = Some(id);
        self.page = Page::Market;
    }

    pub fn back_to_markets(&mut self) {
        self.page = Page::Markets;
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notify_at(notice, Instant::now());
    }

    pub fn notify_at(&mut self, notice: Notice, now: Instant) {
        self.banner = Some(Banner {
            notice,
            expires_at: now + self.notification_ttl,
        });
    }

    pub fn dismiss(&mut self) {
        self.banner = None;
    }

    /// Current banner, dropping it once its time is up.
    pub fn notification(&mut self) -> Option<&Notice> {
        self.notification_at(Instant::now())
    }

    pub fn notification_at(&mut self, now: Instant) -> Option<&Notice> {
        if self.banner.as_ref().is_some_and(|banner| now >= banner.expires_at) {
            self.banner = None;
        }
        self.banner.as_ref().map(|banner| &banner.notice)
    }
}
