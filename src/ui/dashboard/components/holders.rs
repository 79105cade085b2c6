//! Dashboard top holders table

use super::super::state::DashboardState;
use crate::table::HEADERS;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

/// Render the ranked holder table, scrolled to keep the selected row visible.
pub fn render_holders(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let rows = state.holder_rows();
    let selected = (!rows.is_empty()).then_some(state.selected_holder);
    let rows = rows.into_iter().map(|row| {
        Row::new(vec![
            Cell::from(row.rank.to_string()),
            Cell::from(row.id),
            Cell::from(Line::from(row.total).alignment(Alignment::Right)),
        ])
        .style(Style::default().fg(Color::Gray))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Fill(1),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .title("Top Chonk Holders")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    let mut table_state = TableState::default().with_selected(selected);
    f.render_stateful_widget(table, area, &mut table_state);
}
