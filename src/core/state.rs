//! # Application State
//!
//! Core business state for dashpick. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── dropdown: Dropdown            // category options + committed selection
//! ├── location: String              // page we are currently on
//! ├── endpoint: String              // where selections are POSTed
//! ├── status_message: String        // status bar text
//! ├── in_flight: usize              // requests awaiting an answer
//! ├── activity: ActivityLog         // console-style log panel
//! ├── last_outcome: Option<...>     // how the most recent request ended
//! ├── latest_only: bool             // older navigations never win
//! └── navigated_seq: u64            // newest selection that moved us
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::core::selection::{CategoryOption, Dropdown};
use crate::sync::SyncOutcome;

/// Maximum number of lines kept in the activity log.
pub const MAX_ACTIVITY_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub at: DateTime<Local>,
    pub level: ActivityLevel,
    pub text: String,
}

/// Bounded log of what the handler did, newest last.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn push(&mut self, level: ActivityLevel, text: impl Into<String>) {
        if self.entries.len() == MAX_ACTIVITY_LINES {
            self.entries.pop_front();
        }
        self.entries.push_back(ActivityEntry {
            at: Local::now(),
            level,
            text: text.into(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(ActivityLevel::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(ActivityLevel::Error, text);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.back()
    }
}

pub struct App {
    pub dropdown: Dropdown,
    pub location: String,
    pub endpoint: String,
    pub status_message: String,
    pub in_flight: usize,
    pub activity: ActivityLog,
    pub last_outcome: Option<SyncOutcome>,
    /// Mirrors the handler option: a navigation from an older selection
    /// never replaces the location set by a newer one.
    pub latest_only: bool,
    /// Sequence number of the selection that set `location` (0 = none yet).
    pub navigated_seq: u64,
}

impl App {
    pub fn new(
        options: Vec<CategoryOption>,
        initial: Option<&str>,
        location: String,
        endpoint: String,
    ) -> Self {
        Self {
            dropdown: Dropdown::new(options, initial),
            location,
            endpoint,
            status_message: String::from("Pick a category"),
            in_flight: 0,
            activity: ActivityLog::default(),
            last_outcome: None,
            latest_only: true,
            navigated_seq: 0,
        }
    }

    /// Display text of the committed selection, or a placeholder.
    pub fn selected_label(&self) -> String {
        self.dropdown
            .selection()
            .map(|s| s.text)
            .unwrap_or_else(|| "(none)".to_string())
    }
}
