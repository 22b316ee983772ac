//! # Category Dropdown Component
//!
//! Overlay list of categories, opened with Enter from the main view.
//! Up/Down move the highlight, Enter commits, Esc closes without changing
//! anything.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CategoryDropdownState` lives in `TuiState` while the overlay is open
//! - `CategoryDropdown` is created each frame with borrowed state
//!
//! Committing only reports an index. Whether that is a change (and so a
//! request) is decided by `core::selection::Dropdown`.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::selection::CategoryOption;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the dropdown overlay.
pub struct CategoryDropdownState {
    len: usize,
    pub highlighted: usize,
    pub list_state: ListState,
}

impl CategoryDropdownState {
    /// Opens the overlay with the highlight on the committed option (or the first).
    pub fn new(len: usize, committed: Option<usize>) -> Self {
        let highlighted = committed.filter(|&i| i < len).unwrap_or(0);
        let mut list_state = ListState::default();
        if len > 0 {
            list_state.select(Some(highlighted));
        }
        Self {
            len,
            highlighted,
            list_state,
        }
    }

    fn move_to(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.highlighted = index.min(self.len - 1);
        self.list_state.select(Some(self.highlighted));
    }
}

impl EventHandler for CategoryDropdownState {
    type Event = DropdownEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DropdownEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Quit => Some(DropdownEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.move_to(self.highlighted.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.move_to(self.highlighted + 1);
                None
            }
            TuiEvent::Home => {
                self.move_to(0);
                None
            }
            TuiEvent::End => {
                self.move_to(self.len.saturating_sub(1));
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(DropdownEvent::Commit(self.highlighted)),
            _ => None,
        }
    }
}

/// Events emitted by the dropdown.
#[derive(Debug, PartialEq, Eq)]
pub enum DropdownEvent {
    Commit(usize),
    Dismiss,
}

/// Transient render wrapper for the dropdown overlay.
pub struct CategoryDropdown<'a> {
    state: &'a mut CategoryDropdownState,
    options: &'a [CategoryOption],
    committed: Option<usize>,
}

impl<'a> CategoryDropdown<'a> {
    pub fn new(
        state: &'a mut CategoryDropdownState,
        options: &'a [CategoryOption],
        committed: Option<usize>,
    ) -> Self {
        Self {
            state,
            options,
            committed,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 60, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Category ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.options.is_empty() {
            let empty = Paragraph::new(
                "No categories configured.\nAdd [[categories]] entries to ~/.dashpick/config.toml",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let is_active = self.committed == Some(i);
                let active_marker = if is_active { " *" } else { "" };
                let value_tag = format!("[{}]", option.value);
                let desc = option
                    .description
                    .as_deref()
                    .map(|d| format!("  {d}"))
                    .unwrap_or_default();

                let fixed_width = value_tag.width() + 2 + active_marker.len() + desc.width();
                let text_width = inner_width.saturating_sub(fixed_width);
                let text = truncate_str(&option.text, text_width);
                let pad = text_width.saturating_sub(text.width());
                let padded_text = format!("{text}{}", " ".repeat(pad));

                let style = if i == self.state.highlighted {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let muted = |color: Color| {
                    if i == self.state.highlighted {
                        style
                    } else {
                        Style::default().fg(color)
                    }
                };

                let mut spans = vec![
                    Span::styled(value_tag, muted(Color::Yellow)),
                    Span::styled("  ", style),
                    Span::styled(padded_text, style),
                ];
                if !desc.is_empty() {
                    spans.push(Span::styled(desc, muted(Color::DarkGray)));
                }
                if !active_marker.is_empty() {
                    spans.push(Span::styled(active_marker, style));
                }

                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
