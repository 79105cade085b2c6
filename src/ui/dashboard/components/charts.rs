//! Dashboard chart components
//!
//! Renders the two daily line charts side by side or stacked

use crate::chart::{ChartLayout, ChartSeries};
use crate::table::format_count;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{
    Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, LegendPosition, Padding,
    Paragraph,
};

/// Rows the chart section wants for a given width.
pub fn charts_height(layout: &ChartLayout, width: u16) -> u16 {
    let chart_width = width / layout.grid_columns.max(1);
    let rows = if layout.grid_columns > 1 { 1 } else { 2 };
    layout.chart_height(chart_width) * rows
}

/// Render both charts following the layout's grid.
pub fn render_charts_section(
    f: &mut Frame,
    area: Rect,
    layout: &ChartLayout,
    charts: &(ChartSeries, ChartSeries),
) {
    let direction = if layout.grid_columns > 1 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .spacing(layout.margin)
        .split(area);

    render_chart(f, chunks[0], layout, &charts.0);
    render_chart(f, chunks[1], layout, &charts.1);
}

/// Render one single-series line chart.
pub fn render_chart(f: &mut Frame, area: Rect, layout: &ChartLayout, series: &ChartSeries) {
    let color = series.kind.color();
    let block = Block::default()
        .title(series.kind.title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .padding(Padding::horizontal(layout.legend_padding_cells()));

    if series.is_empty() {
        let empty = Paragraph::new("No data in selected range")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let datasets = vec![
        Dataset::default()
            .name(series.kind.title())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(&series.points),
    ];

    let x_labels: Vec<Span> = series
        .tick_labels(layout.max_ticks)
        .into_iter()
        .map(Span::raw)
        .collect();
    let [y_min, y_max] = series.y_bounds();
    let y_labels = vec![
        Span::raw(format_count(y_min as u64)),
        Span::raw(format_count((y_max / 2.0).round() as u64)),
        Span::raw(format_count(y_max as u64)),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds(series.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::Viewport;

    #[test]
    fn test_charts_height_by_layout() {
        let wide = ChartLayout::for_viewport(&Viewport::from_terminal(140, 50, 0));
        // Two charts of 70 columns side by side, one row.
        assert_eq!(charts_height(&wide, 140), 20);

        let compact = ChartLayout::for_viewport(&Viewport::from_terminal(60, 50, 0));
        // Two stacked charts of 60 columns.
        assert_eq!(charts_height(&compact, 60), 60);
    }
}
