//! Placeholder panels shown instead of the dashboard body

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

fn render_centered(f: &mut Frame, area: Rect, text: String, style: Style) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .split(area);

    let panel = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(style),
        );
    f.render_widget(panel, rows[1]);
}

/// Render the failed-load message.
pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    render_centered(
        f,
        area,
        format!("Error: {}", message),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    );
}

/// Render the no-data message.
pub fn render_empty(f: &mut Frame, area: Rect) {
    render_centered(
        f,
        area,
        "No data available".to_string(),
        Style::default().fg(Color::Gray),
    );
}
