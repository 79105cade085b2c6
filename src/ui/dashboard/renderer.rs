//! Dashboard main renderer

use super::components::{charts, footer, header, holders, slider, status};
use super::state::DashboardState;
use crate::loader::LoadState;
use crate::ui::splash::render_splash;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::Block;

/// Rows always left for the holder table below the charts.
const MIN_TABLE_HEIGHT: u16 = 5;

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let layout = state.layout();
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(2),
        ])
        .margin(layout.margin)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    render_body(f, main_chunks[1], state);
    footer::render_footer(f, main_chunks[2], state);
}

fn render_body(f: &mut Frame, area: Rect, state: &DashboardState) {
    match &state.load_state {
        LoadState::Loading => render_splash(f, area, state.tick),
        LoadState::Failed(message) => status::render_error(f, area, message),
        LoadState::Empty => status::render_empty(f, area),
        LoadState::Ready(_) => render_ready(f, area, state),
    }
}

fn render_ready(f: &mut Frame, area: Rect, state: &DashboardState) {
    let layout = state.layout();
    let Some(series) = state.charts() else {
        return;
    };

    let max_charts = area
        .height
        .saturating_sub(slider::SLIDER_HEIGHT + MIN_TABLE_HEIGHT);
    let charts_height = charts::charts_height(&layout, area.width).min(max_charts);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(charts_height),
            Constraint::Length(slider::SLIDER_HEIGHT),
            Constraint::Min(MIN_TABLE_HEIGHT),
        ])
        .split(area);

    charts::render_charts_section(f, chunks[0], &layout, &series);
    slider::render_slider(f, chunks[1], state);
    holders::render_holders(f, chunks[2], state);
}
