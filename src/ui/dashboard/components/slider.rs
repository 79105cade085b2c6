//! Dashboard date range slider
//!
//! A two-handle track with the first and last date of the timeline as marks

use super::super::state::DashboardState;
use crate::range::{DateRange, Handle};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Rows the slider needs, borders included.
pub const SLIDER_HEIGHT: u16 = 4;

/// Cell positions of the two handles on a track `width` cells wide.
pub fn handle_positions(range: DateRange, width: u16) -> (usize, usize) {
    if width == 0 {
        return (0, 0);
    }
    let last = f64::from(width - 1);
    let to_cell = |percent: f64| (percent / 100.0 * last).round() as usize;
    (to_cell(range.start()), to_cell(range.end()))
}

fn track_line(range: DateRange, width: u16, active: Handle) -> Line<'static> {
    let (start, end) = handle_positions(range, width);
    let handle_style = |handle: Handle| {
        if handle == active {
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let spans = (0..usize::from(width))
        .map(|cell| {
            if cell == start && cell == end {
                Span::styled("●", handle_style(active))
            } else if cell == start {
                Span::styled("●", handle_style(Handle::Start))
            } else if cell == end {
                Span::styled("●", handle_style(Handle::End))
            } else if cell > start && cell < end {
                Span::styled("━", Style::default().fg(Color::Cyan))
            } else {
                Span::styled("─", Style::default().fg(Color::DarkGray))
            }
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

fn marks_line(
    marks: Option<(String, String)>,
    selected: Option<(String, String)>,
    width: u16,
) -> Line<'static> {
    let Some((first, last)) = marks else {
        return Line::from(Span::styled(
            "No dates available",
            Style::default().fg(Color::DarkGray),
        ));
    };
    let middle = selected
        .map(|(from, to)| format!("{} → {}", from, to))
        .unwrap_or_default();

    let used = first.chars().count() + last.chars().count() + middle.chars().count();
    let free = usize::from(width).saturating_sub(used);
    let left_gap = free / 2;
    let right_gap = free - left_gap;

    Line::from(vec![
        Span::styled(first, Style::default().fg(Color::Gray)),
        Span::raw(" ".repeat(left_gap)),
        Span::styled(
            middle,
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_gap)),
        Span::styled(last, Style::default().fg(Color::Gray)),
    ])
}

/// Render the range slider.
pub fn render_slider(f: &mut Frame, area: Rect, state: &DashboardState) {
    let title = if state.range.is_full() {
        "Date Range (all dates)"
    } else {
        "Date Range (filtered)"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    let lines = vec![
        track_line(state.range, inner.width, state.active_handle),
        marks_line(state.slider_marks(), state.selected_dates(), inner.width),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}
