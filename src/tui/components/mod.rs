//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: location, pending requests, status
//! - `ActivityPanel`: console-style log of what the change handler did
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `CategoryDropdown`: the category list overlay; emits `DropdownEvent`
//!
//! Components receive external data as "props" (function parameters or
//! struct fields), never by reaching into global state.

pub mod activity_log;
pub mod category_dropdown;
mod title_bar;

pub use activity_log::ActivityPanel;
pub use category_dropdown::{CategoryDropdown, CategoryDropdownState, DropdownEvent};
pub use title_bar::TitleBar;
