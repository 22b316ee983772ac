//! # Page Navigation
//!
//! The client's stand-in for `window.location`. Navigating resolves the
//! server-supplied target against the dashboard's base URL, loads the page,
//! and makes it the current location.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};

use super::client::SyncError;
use super::http::{build_client, resolve_url};

/// Result of loading a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVisit {
    pub url: String,
    pub status: u16,
    pub bytes: usize,
}

/// Capability to move the client to another page.
///
/// Navigation is split in two: `load` fetches the page without moving,
/// `commit_if` moves there only if the caller still wants it at that moment.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Current location.
    fn location(&self) -> String;

    /// Fetches `target` (resolved against the current location). Does not move.
    async fn load(&self, target: &str) -> Result<PageVisit, SyncError>;

    /// Makes `visit` the current location if `still_wanted()` holds.
    ///
    /// The check and the move happen under one lock, so two commits never
    /// interleave between them. Returns whether the location changed.
    fn commit_if(&self, visit: &PageVisit, still_wanted: &dyn Fn() -> bool) -> bool;
}

/// Navigator that loads pages over HTTP.
pub struct HttpNavigator {
    base_url: String,
    location: Mutex<String>,
    client: reqwest::Client,
}

impl HttpNavigator {
    /// Starts at `start` (resolved against `base_url`).
    pub fn new(base_url: &str, start: &str, timeout: Option<Duration>) -> Result<Self, SyncError> {
        Self::with_client(build_client(timeout)?, base_url, start)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str, start: &str) -> Result<Self, SyncError> {
        let location = resolve_url(base_url, start)?.to_string();
        Ok(Self {
            base_url: base_url.to_string(),
            location: Mutex::new(location),
            client,
        })
    }
}

#[async_trait]
impl Navigator for HttpNavigator {
    fn location(&self) -> String {
        match self.location.lock() {
            Ok(location) => location.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    async fn load(&self, target: &str) -> Result<PageVisit, SyncError> {
        // Relative targets resolve against the current page, like a browser would
        let current = self.location();
        let base = if current.is_empty() { &self.base_url } else { &current };
        let url = resolve_url(base, target)?;

        info!("Loading {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        // The final URL after any HTTP redirects is where we actually are
        let landed = response.url().to_string();
        let body = response.bytes().await?;

        if !(200..300).contains(&status) {
            warn!("Page {} answered HTTP {}", landed, status);
        }

        Ok(PageVisit {
            url: landed,
            status,
            bytes: body.len(),
        })
    }

    fn commit_if(&self, visit: &PageVisit, still_wanted: &dyn Fn() -> bool) -> bool {
        let mut location = match self.location.lock() {
            Ok(location) => location,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !still_wanted() {
            return false;
        }
        info!("Navigated to {}", visit.url);
        *location = visit.url.clone();
        true
    }
}
