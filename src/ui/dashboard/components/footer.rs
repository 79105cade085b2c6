//! Dashboard footer component
//!
//! Renders key bindings and the latest activity

use super::super::state::DashboardState;
use crate::events::{EventType, format_compact_timestamp};
use crate::logging::LogLevel;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

const KEYS_WIDE: &str =
    "[←/→] Move  [Shift] x10  [Tab] Switch handle  [↑/↓] Holders  [R] Reset  [Q] Quit";
const KEYS_COMPACT: &str = "[←/→] [Tab] [↑/↓] [R] [Q]";

/// Render footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_type(BorderType::Thick);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let keys = if state.layout().compact {
        KEYS_COMPACT
    } else {
        KEYS_WIDE
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Fill(1)])
        .split(inner);

    let keys_widget = Paragraph::new(keys).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(keys_widget, chunks[0]);

    if let Some(event) = state.last_activity() {
        let color = match (event.event_type, event.log_level) {
            (EventType::Success, _) => Color::Green,
            (EventType::Error, LogLevel::Error) => Color::Red,
            (EventType::Error, _) => Color::Yellow,
            (EventType::Refresh, _) => Color::Gray,
        };
        let activity = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{} ", format_compact_timestamp(&event.timestamp)),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(event.msg.clone(), Style::default().fg(color)),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(activity, chunks[1]);
    }
}
