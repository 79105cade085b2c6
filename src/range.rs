//! Date range selection and time series filtering.
//!
//! A [`DateRange`] is a pair of percentages over the [`Timeline`] spanned by
//! the transfer series. Both charts are filtered against that one timeline.

use crate::consts::cli_consts::slider;
use crate::model::TimeSeriesPoint;

const MIN_PERCENT: f64 = 0.0;
const MAX_PERCENT: f64 = 100.0;

/// Which end of the slider keyboard input moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handle {
    #[default]
    Start,
    End,
}

impl Handle {
    pub fn toggle(self) -> Self {
        match self {
            Handle::Start => Handle::End,
            Handle::End => Handle::Start,
        }
    }
}

/// Selected range as percentages of the timeline, `0 <= start <= end <= 100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateRange {
    start: f64,
    end: f64,
}

impl Default for DateRange {
    fn default() -> Self {
        Self::full()
    }
}

impl DateRange {
    /// The whole timeline.
    pub fn full() -> Self {
        Self {
            start: MIN_PERCENT,
            end: MAX_PERCENT,
        }
    }

    /// Build a range, clamping both ends into `[0, 100]` and ordering them.
    pub fn new(start: f64, end: f64) -> Self {
        let start = clamp_percent(start);
        let end = clamp_percent(end);
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn is_full(&self) -> bool {
        self.start == MIN_PERCENT && self.end == MAX_PERCENT
    }

    /// Move one handle by `delta` percent. A handle never crosses the other one.
    pub fn nudge(&mut self, handle: Handle, delta: f64) {
        match handle {
            Handle::Start => self.start = clamp_percent(self.start + delta).min(self.end),
            Handle::End => self.end = clamp_percent(self.end + delta).max(self.start),
        }
    }

    pub fn step(&mut self, handle: Handle, forward: bool, large: bool) {
        let size = if large {
            slider::LARGE_STEP
        } else {
            slider::SMALL_STEP
        };
        self.nudge(handle, if forward { size } else { -size });
    }

    pub fn reset(&mut self) {
        *self = Self::full();
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_PERCENT;
    }
    value.clamp(MIN_PERCENT, MAX_PERCENT)
}

/// Earliest and latest epoch of the canonical (transfer) series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub min_epoch: i64,
    pub max_epoch: i64,
}

impl Timeline {
    /// `None` for an empty series.
    pub fn from_points(points: &[TimeSeriesPoint]) -> Option<Self> {
        let min_epoch = points.iter().map(|p| p.epoch).min()?;
        let max_epoch = points.iter().map(|p| p.epoch).max()?;
        Some(Self {
            min_epoch,
            max_epoch,
        })
    }

    /// Epoch at `percent` of the way from `min_epoch` to `max_epoch`.
    pub fn interpolate(&self, percent: f64) -> f64 {
        let span = self.max_epoch as f64 - self.min_epoch as f64;
        self.min_epoch as f64 + span * (percent / MAX_PERCENT)
    }

    /// Absolute `(start, end)` epoch bounds of a range.
    pub fn bounds(&self, range: DateRange) -> (f64, f64) {
        (self.interpolate(range.start), self.interpolate(range.end))
    }
}

/// Items whose epoch falls inside the range, bounds inclusive, in source order.
///
/// Without a timeline (empty transfer series) nothing is selected.
pub fn filter_by_range(
    items: &[TimeSeriesPoint],
    range: DateRange,
    timeline: Option<Timeline>,
) -> Vec<TimeSeriesPoint> {
    let Some(timeline) = timeline else {
        return Vec::new();
    };
    let (start, end) = timeline.bounds(range);
    items
        .iter()
        .filter(|item| {
            let epoch = item.epoch as f64;
            epoch >= start && epoch <= end
        })
        .copied()
        .collect()
}
