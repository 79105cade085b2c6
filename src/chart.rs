//! Chart shaping
//!
//! Turns filtered series into plot-ready data and picks the chart layout for
//! the current viewport.

use crate::consts::cli_consts::layout;
use crate::model::{DatasetSnapshot, Series, TimeSeriesPoint};
use crate::range::{DateRange, Timeline, filter_by_range};
use crate::viewport::Viewport;
use chrono::TimeZone;
use ratatui::style::Color;
use std::fmt::Display;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_HEIGHT_TO_WIDTH: f64 = 2.0;

/// Layout settings derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub compact: bool,
    /// Width / height of each chart.
    pub aspect_ratio: f64,
    /// Maximum number of date labels on the x axis.
    pub max_ticks: usize,
    /// Legend padding in logical pixels.
    pub legend_padding: u16,
    /// Charts per row.
    pub grid_columns: u16,
    /// Outer margin in cells.
    pub margin: u16,
}

impl ChartLayout {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        if viewport.is_compact() {
            Self {
                compact: true,
                aspect_ratio: layout::COMPACT_ASPECT_RATIO,
                max_ticks: layout::COMPACT_MAX_TICKS,
                legend_padding: layout::COMPACT_LEGEND_PADDING,
                grid_columns: 1,
                margin: 0,
            }
        } else {
            Self {
                compact: false,
                aspect_ratio: layout::WIDE_ASPECT_RATIO,
                max_ticks: layout::WIDE_MAX_TICKS,
                legend_padding: layout::WIDE_LEGEND_PADDING,
                grid_columns: 2,
                margin: 1,
            }
        }
    }

    /// Rows a chart `width` cells wide needs to keep its aspect ratio.
    pub fn chart_height(&self, width: u16) -> u16 {
        let height = f64::from(width) / self.aspect_ratio / CELL_HEIGHT_TO_WIDTH;
        height.round().max(1.0) as u16
    }

    /// Legend padding converted to cells.
    pub fn legend_padding_cells(&self) -> u16 {
        self.legend_padding / 10
    }
}

/// Which of the two charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Transfers,
    TraitTransfers,
}

impl ChartKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Transfers => "Daily Chonk Transfers",
            ChartKind::TraitTransfers => "Daily Trait Transfers",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ChartKind::Transfers => Color::Rgb(33, 150, 243),
            ChartKind::TraitTransfers => Color::Rgb(244, 67, 54),
        }
    }

    pub fn series(&self) -> Series {
        match self {
            ChartKind::Transfers => Series::Transfers,
            ChartKind::TraitTransfers => Series::TraitTransfers,
        }
    }
}

/// One single-series line chart, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    /// `(index, count)`; x is the category index like a date axis.
    pub points: Vec<(f64, f64)>,
    /// Calendar date per point.
    pub dates: Vec<String>,
}

impl ChartSeries {
    pub fn from_points<Tz>(kind: ChartKind, items: &[TimeSeriesPoint], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let points = items
            .iter()
            .enumerate()
            .map(|(i, item)| (i as f64, item.value as f64))
            .collect();
        let dates = items
            .iter()
            .map(|item| format_epoch_date(item.epoch, tz))
            .collect();
        Self {
            kind,
            points,
            dates,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.points.len().saturating_sub(1).max(1) as f64]
    }

    /// The y axis starts at zero; the top is the largest count.
    pub fn y_bounds(&self) -> [f64; 2] {
        let max = self.points.iter().map(|&(_, y)| y).fold(0.0, f64::max);
        [0.0, max.max(1.0)]
    }

    /// At most `max_ticks` dates, evenly spaced, always including both ends.
    pub fn tick_labels(&self, max_ticks: usize) -> Vec<String> {
        tick_indices(self.dates.len(), max_ticks)
            .into_iter()
            .map(|i| self.dates[i].clone())
            .collect()
    }
}

/// Evenly spaced indices into a sequence of `len` items.
pub fn tick_indices(len: usize, max_ticks: usize) -> Vec<usize> {
    if len == 0 || max_ticks == 0 {
        return Vec::new();
    }
    let count = max_ticks.min(len);
    if count == 1 {
        return vec![0];
    }
    let last = (len - 1) as f64;
    let mut indices: Vec<usize> = (0..count)
        .map(|i| (i as f64 * last / (count - 1) as f64).round() as usize)
        .collect();
    indices.dedup();
    indices
}

/// Epoch seconds as a calendar date, e.g. `3/14/2024`.
pub fn format_epoch_date<Tz>(epoch: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(epoch, 0).single() {
        Some(date) => date.format("%-m/%-d/%Y").to_string(),
        None => epoch.to_string(),
    }
}

/// Both charts for the current range, filtered on the transfer timeline.
pub fn build_charts<Tz>(
    snapshot: &DatasetSnapshot,
    range: DateRange,
    tz: &Tz,
) -> (ChartSeries, ChartSeries)
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let timeline = Timeline::from_points(&snapshot.daily_transfers);
    let build = |kind: ChartKind| {
        let filtered = filter_by_range(snapshot.series(kind.series()), range, timeline);
        ChartSeries::from_points(kind, &filtered, tz)
    };
    (build(ChartKind::Transfers), build(ChartKind::TraitTransfers))
}

/// Labels for the two ends of the slider: first and last date of the timeline.
pub fn slider_marks<Tz>(timeline: Option<Timeline>, tz: &Tz) -> Option<(String, String)>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timeline.map(|t| {
        (
            format_epoch_date(t.min_epoch, tz),
            format_epoch_date(t.max_epoch, tz),
        )
    })
}
