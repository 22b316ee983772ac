//! # ActivityLog Component
//!
//! The console panel. Shows the newest entries of `core::state::ActivityLog`
//! that fit the area, oldest at the top, errors in red.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{ActivityEntry, ActivityLevel, ActivityLog};
use crate::tui::component::Component;

pub struct ActivityPanel<'a> {
    log: &'a ActivityLog,
}

impl<'a> ActivityPanel<'a> {
    pub fn new(log: &'a ActivityLog) -> Self {
        Self { log }
    }
}

fn entry_line(entry: &ActivityEntry) -> Line<'_> {
    let (tag, style) = match entry.level {
        ActivityLevel::Info => ("info ", Style::default().fg(Color::Gray)),
        ActivityLevel::Error => ("error", Style::default().fg(Color::Red)),
    };
    Line::from(vec![
        Span::styled(
            entry.at.format("%H:%M:%S ").to_string(),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(tag, style.add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(entry.text.as_str(), style),
    ])
}

impl Component for ActivityPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = self
            .log
            .iter()
            .rev()
            .take(visible)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(entry_line)
            .collect();

        let block = Block::bordered()
            .title(" Console ")
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
