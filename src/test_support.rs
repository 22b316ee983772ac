//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::selection::Selection;
use crate::sync::{CategoryRequest, CategorySync, DashboardResponse, Navigator, PageVisit, SyncError};

pub fn selection(value: &str, text: &str) -> Selection {
    Selection {
        value: value.to_string(),
        text: text.to_string(),
    }
}

/// A dashboard that answers every POST the same way and records requests.
pub struct FakeSync {
    answer: Result<DashboardResponse, SyncError>,
    requests: Mutex<Vec<CategoryRequest>>,
}

impl FakeSync {
    pub fn responding(json: &str) -> Self {
        Self {
            answer: Ok(serde_json::from_str(json).expect("fake response must be valid JSON")),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SyncError) -> Self {
        Self {
            answer: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CategoryRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategorySync for FakeSync {
    fn endpoint(&self) -> &str {
        "fake://dashboard"
    }

    async fn post_category(
        &self,
        request: &CategoryRequest,
    ) -> Result<DashboardResponse, SyncError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone()
    }
}

/// Navigator that records targets instead of loading pages.
pub struct FakeNavigator {
    location: Mutex<String>,
    visited: Mutex<Vec<String>>,
    failure: Mutex<Option<SyncError>>,
    on_load: Mutex<Option<Box<dyn Fn() + Send>>>,
}

impl FakeNavigator {
    pub fn new(start: &str) -> Self {
        Self {
            location: Mutex::new(start.to_string()),
            visited: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
            on_load: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, error: SyncError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Runs `hook` while a page is "loading", e.g. to make another selection.
    pub fn during_load(&self, hook: impl Fn() + Send + 'static) {
        *self.on_load.lock().unwrap() = Some(Box::new(hook));
    }

    /// Targets that were loaded, committed or not.
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    fn location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    async fn load(&self, target: &str) -> Result<PageVisit, SyncError> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.visited.lock().unwrap().push(target.to_string());
        if let Some(hook) = self.on_load.lock().unwrap().as_ref() {
            hook();
        }
        Ok(PageVisit {
            url: target.to_string(),
            status: 200,
            bytes: 0,
        })
    }

    fn commit_if(&self, visit: &PageVisit, still_wanted: &dyn Fn() -> bool) -> bool {
        let mut location = self.location.lock().unwrap();
        if !still_wanted() {
            return false;
        }
        *location = visit.url.clone();
        true
    }
}
