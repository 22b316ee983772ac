//! # Dashboard Sync
//!
//! Everything that talks to the dashboard server: the POST of the selected
//! category, the redirect that may follow, and the handler tying them to
//! dropdown changes.

pub mod client;
pub mod handler;
pub mod http;
pub mod navigator;
pub mod types;

pub use client::{CategorySync, SyncError};
pub use handler::{ChangeHandler, HandlerOptions, SyncOutcome};
pub use http::HttpCategorySync;
pub use navigator::{HttpNavigator, Navigator, PageVisit};
pub use types::{CategoryRequest, DashboardResponse};
