use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ActivityPanel, CategoryDropdown, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0), Length(1)]);
    let [title_area, select_area, console_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.location.clone(), app.status_message.clone(), app.in_flight)
        .render(frame, title_area);

    // Closed dropdown: shows the committed option like a <select> does
    let selected = Paragraph::new(Line::from(vec![
        Span::styled(app.selected_label(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  ▾", Style::default().fg(Color::DarkGray)),
    ]))
    .block(
        Block::bordered()
            .title(" Category ")
            .border_style(Style::default().fg(if tui.dropdown.is_some() {
                Color::Cyan
            } else {
                Color::DarkGray
            })),
    );
    frame.render_widget(selected, select_area);

    ActivityPanel::new(&app.activity).render(frame, console_area);

    let help = Line::from(" Enter Choose category  q Quit ")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, help_area);

    if let Some(state) = tui.dropdown.as_mut() {
        CategoryDropdown::new(state, app.dropdown.options(), app.dropdown.selected_index())
            .render(frame, frame.area());
    }
}
