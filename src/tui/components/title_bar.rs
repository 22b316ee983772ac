//! # TitleBar Component
//!
//! Top status bar: where we are, how many requests are pending, and the
//! latest status message.
//!
//! Purely presentational. It receives all data as props and has no
//! internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.location.clone(), app.status_message.clone(), app.in_flight);
//! title_bar.render(frame, area);
//! ```
//!
//! The title text drops the pending counter when nothing is in flight, and
//! drops the status when it is empty, so narrow terminals keep the location.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Current page URL
    pub location: String,
    /// Status message (e.g. "Sending Water...")
    pub status_message: String,
    /// Requests still waiting for the dashboard
    pub in_flight: usize,
}

impl TitleBar {
    pub fn new(location: String, status_message: String, in_flight: usize) -> Self {
        Self {
            location,
            status_message,
            in_flight,
        }
    }

    fn title_text(&self) -> String {
        let mut title = format!("dashpick | {}", self.location);
        if self.in_flight > 0 {
            title.push_str(&format!(" | {} pending", self.in_flight));
        }
        if !self.status_message.is_empty() {
            title.push_str(&format!(" | {}", self.status_message));
        }
        title
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.in_flight > 0 {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        frame.render_widget(Line::from(Span::styled(self.title_text(), style)), area);
    }
}
