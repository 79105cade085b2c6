//! Dashboard header component
//!
//! Renders the title and the data source

use super::super::state::DashboardState;

use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render header with title and source.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let version = env!("CARGO_PKG_VERSION");
    let title = Line::from(Span::styled(
        format!("CHONK STATS v{}", version),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ));

    let source = Line::from(vec![
        Span::styled("Source: ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.source_name.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(vec![title, source])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(header, area);
}
