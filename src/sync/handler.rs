//! # Dropdown Change Handler
//!
//! Registered once at startup and kept for the life of the process. Every
//! change of the category dropdown becomes one POST to the dashboard; a
//! truthy `redirect_url` in the answer moves the client to that page.
//!
//! ```text
//! Selection ──► POST {"category": text} ──► redirect_url? ──► Navigator
//!                        │                        │
//!                        └── failure: log ────────┴── none: log
//! ```
//!
//! Nothing escapes the handler. A failed request is a log line and a
//! `SyncOutcome::Failed`, never an `Err`.
//!
//! Each change gets a sequence number. With `latest_only` set, a redirect
//! is checked twice against the newest selection: when the answer arrives,
//! and again when the redirected page has loaded, right before the location
//! moves. A slow answer or a slow page cannot yank the user back to an old
//! category.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{error, info};
use tokio::task::JoinHandle;

use super::client::{CategorySync, SyncError};
use super::http::{HttpCategorySync, build_client};
use super::navigator::{HttpNavigator, Navigator, PageVisit};
use super::types::{CategoryRequest, DashboardResponse};
use crate::core::config::ResolvedConfig;
use crate::core::selection::{CategoryKey, Selection};

/// Knobs that change how a response is acted on.
#[derive(Debug, Clone, Copy)]
pub struct HandlerOptions {
    pub latest_only: bool,
    pub follow_redirects: bool,
    pub category_key: CategoryKey,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            latest_only: true,
            follow_redirects: true,
            category_key: CategoryKey::Text,
        }
    }
}

/// How one change event ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Server asked for a redirect and the page was loaded.
    Navigated {
        seq: u64,
        category: String,
        visit: PageVisit,
    },
    /// Server asked for a redirect but loading the page failed.
    NavigationFailed {
        seq: u64,
        category: String,
        target: String,
        error: SyncError,
    },
    /// Success without a (truthy) redirect.
    NoRedirect {
        seq: u64,
        category: String,
        response: DashboardResponse,
    },
    /// A newer selection was made before this redirect could be committed.
    Superseded {
        seq: u64,
        category: String,
        target: String,
    },
    /// Redirect returned but `follow_redirects` is off.
    RedirectSuppressed {
        seq: u64,
        category: String,
        target: String,
    },
    /// The POST itself failed.
    Failed {
        seq: u64,
        category: String,
        error: SyncError,
    },
}

impl SyncOutcome {
    pub fn seq(&self) -> u64 {
        match self {
            SyncOutcome::Navigated { seq, .. }
            | SyncOutcome::NavigationFailed { seq, .. }
            | SyncOutcome::NoRedirect { seq, .. }
            | SyncOutcome::Superseded { seq, .. }
            | SyncOutcome::RedirectSuppressed { seq, .. }
            | SyncOutcome::Failed { seq, .. } => *seq,
        }
    }

    pub fn category(&self) -> &str {
        match self {
            SyncOutcome::Navigated { category, .. }
            | SyncOutcome::NavigationFailed { category, .. }
            | SyncOutcome::NoRedirect { category, .. }
            | SyncOutcome::Superseded { category, .. }
            | SyncOutcome::RedirectSuppressed { category, .. }
            | SyncOutcome::Failed { category, .. } => category,
        }
    }

    /// True if the request reached the server and got a JSON answer.
    pub fn is_success(&self) -> bool {
        !matches!(self, SyncOutcome::Failed { .. })
    }

    /// One-line description for the status bar and stdout.
    pub fn summary(&self) -> String {
        match self {
            SyncOutcome::Navigated { category, visit, .. } => {
                format!("{category}: navigated to {} (HTTP {})", visit.url, visit.status)
            }
            SyncOutcome::NavigationFailed {
                category,
                target,
                error,
                ..
            } => format!("{category}: could not load {target}: {error}"),
            SyncOutcome::NoRedirect { category, .. } => format!("{category}: synced"),
            SyncOutcome::Superseded { category, .. } => {
                format!("{category}: superseded by a newer selection")
            }
            SyncOutcome::RedirectSuppressed {
                category, target, ..
            } => format!("{category}: redirect to {target} not followed"),
            SyncOutcome::Failed { category, error, .. } => format!("{category}: {error}"),
        }
    }
}

struct Inner {
    sync: Arc<dyn CategorySync>,
    navigator: Arc<dyn Navigator>,
    options: HandlerOptions,
    latest: AtomicU64,
}

/// The change handler. Cheap to clone; clones share the sequence counter.
#[derive(Clone)]
pub struct ChangeHandler {
    inner: Arc<Inner>,
}

impl ChangeHandler {
    pub fn new(
        sync: Arc<dyn CategorySync>,
        navigator: Arc<dyn Navigator>,
        options: HandlerOptions,
    ) -> Self {
        info!(
            "Change handler registered (endpoint={}, latest_only={}, key={})",
            sync.endpoint(),
            options.latest_only,
            options.category_key.label()
        );
        Self {
            inner: Arc::new(Inner {
                sync,
                navigator,
                options,
                latest: AtomicU64::new(0),
            }),
        }
    }

    /// Builds the HTTP-backed handler described by `config`.
    ///
    /// The POST client and the navigator share one connection pool. The
    /// client starts out on the dashboard page itself.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, SyncError> {
        let client = build_client(config.timeout)?;
        let sync = HttpCategorySync::with_client(client.clone(), &config.base_url, &config.endpoint)?;
        let navigator = HttpNavigator::with_client(client, &config.base_url, &config.endpoint)?;
        let options = HandlerOptions {
            latest_only: config.latest_only,
            follow_redirects: config.follow_redirects,
            category_key: config.category_key,
        };
        Ok(Self::new(Arc::new(sync), Arc::new(navigator), options))
    }

    pub fn endpoint(&self) -> &str {
        self.inner.sync.endpoint()
    }

    pub fn options(&self) -> HandlerOptions {
        self.inner.options
    }

    pub fn location(&self) -> String {
        self.inner.navigator.location()
    }

    /// Claims the next sequence number, making it the latest selection.
    pub fn next_seq(&self) -> u64 {
        self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.inner.latest.load(Ordering::SeqCst) == seq
    }

    /// Reacts to a change event without waiting for the server.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_selection_change(&self, selection: Selection) -> JoinHandle<SyncOutcome> {
        let seq = self.next_seq();
        let handler = self.clone();
        tokio::spawn(async move { handler.handle(seq, selection).await })
    }

    /// Runs one change event to completion.
    pub async fn handle(&self, seq: u64, selection: Selection) -> SyncOutcome {
        let options = self.inner.options;
        let category = selection.key(options.category_key).to_string();
        let request = CategoryRequest::new(category.clone());

        info!(
            "Selection #{} changed: value={:?} text={:?}",
            seq, selection.value, selection.text
        );

        let response = match self.inner.sync.post_category(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error: {} (selection #{}, category={:?})", e, seq, category);
                return SyncOutcome::Failed {
                    seq,
                    category,
                    error: e,
                };
            }
        };

        info!(
            "Success: {} (selection #{})",
            serde_json::to_string(&response).unwrap_or_else(|_| format!("{response:?}")),
            seq
        );

        let Some(target) = response.redirect_target() else {
            return SyncOutcome::NoRedirect {
                seq,
                category,
                response,
            };
        };

        if options.latest_only && !self.is_latest(seq) {
            info!(
                "Dropping redirect to {} for selection #{} ({}), a newer selection exists",
                target, seq, category
            );
            return SyncOutcome::Superseded {
                seq,
                category,
                target,
            };
        }

        if !options.follow_redirects {
            info!("Redirect to {} not followed (follow_redirects = false)", target);
            return SyncOutcome::RedirectSuppressed {
                seq,
                category,
                target,
            };
        }

        let visit = match self.inner.navigator.load(&target).await {
            Ok(visit) => visit,
            Err(e) => {
                error!("Error: navigation to {} failed: {}", target, e);
                return SyncOutcome::NavigationFailed {
                    seq,
                    category,
                    target,
                    error: e,
                };
            }
        };

        // A newer selection may have been made while the page was loading
        let still_wanted = || !options.latest_only || self.is_latest(seq);
        if !self.inner.navigator.commit_if(&visit, &still_wanted) {
            info!(
                "Discarding loaded page {} for selection #{} ({}), a newer selection exists",
                visit.url, seq, category
            );
            return SyncOutcome::Superseded {
                seq,
                category,
                target,
            };
        }

        SyncOutcome::Navigated {
            seq,
            category,
            visit,
        }
    }
}
