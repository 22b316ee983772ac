//! # Category Selection
//!
//! The dropdown the whole client revolves around. Each option carries a
//! machine-oriented `value` and a human-readable `text`; the server only ever
//! sees one of them (the text, unless configured otherwise).
//!
//! `Dropdown::select` mirrors a browser `<select>` change event: committing the
//! option that is already selected fires nothing.

use serde::{Deserialize, Serialize};

/// One entry in the category dropdown (`[[categories]]` in the config file).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryOption {
    pub value: String,
    pub text: String,
    pub description: Option<String>,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            description: None,
        }
    }
}

/// Snapshot of the selected option at the moment of a change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub value: String,
    pub text: String,
}

impl Selection {
    /// Returns the half of the selection that gets transmitted.
    pub fn key(&self, key: CategoryKey) -> &str {
        match key {
            CategoryKey::Text => &self.text,
            CategoryKey::Value => &self.value,
        }
    }
}

impl From<&CategoryOption> for Selection {
    fn from(option: &CategoryOption) -> Self {
        Self {
            value: option.value.clone(),
            text: option.text.clone(),
        }
    }
}

/// Which part of an option is sent as the `category` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    /// The option's display text. What the dashboard page has always sent.
    #[default]
    Text,
    /// The option's value attribute.
    Value,
}

impl CategoryKey {
    pub fn label(self) -> &'static str {
        match self {
            CategoryKey::Text => "text",
            CategoryKey::Value => "value",
        }
    }
}

/// The category dropdown: a list of options and at most one selected index.
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    options: Vec<CategoryOption>,
    selected: Option<usize>,
}

impl Dropdown {
    /// Creates a dropdown, preselecting `initial` if it matches an option and
    /// the first option otherwise, as a `<select>` element does.
    /// Preselection never counts as a change.
    pub fn new(options: Vec<CategoryOption>, initial: Option<&str>) -> Self {
        let mut dropdown = Self {
            options,
            selected: None,
        };
        dropdown.selected = initial
            .and_then(|query| dropdown.find(query))
            .or((!dropdown.options.is_empty()).then_some(0));
        dropdown
    }

    pub fn options(&self) -> &[CategoryOption] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Current selection, if any option is selected.
    pub fn selection(&self) -> Option<Selection> {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(Selection::from)
    }

    /// Commits `index` as the selected option.
    ///
    /// Returns the new selection only if it differs from the previous one,
    /// i.e. only when a change event would fire.
    pub fn select(&mut self, index: usize) -> Option<Selection> {
        if index >= self.options.len() || self.selected == Some(index) {
            return None;
        }
        self.selected = Some(index);
        self.selection()
    }

    /// Finds an option by exact text, then exact value, then case-insensitive text.
    pub fn find(&self, query: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.text == query)
            .or_else(|| self.options.iter().position(|o| o.value == query))
            .or_else(|| {
                self.options
                    .iter()
                    .position(|o| o.text.eq_ignore_ascii_case(query))
            })
    }
}
