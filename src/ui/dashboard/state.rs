//! Dashboard state management
//!
//! Contains the main dashboard state struct and its derived views

use crate::chart::{ChartLayout, ChartSeries, build_charts, slider_marks};
use crate::consts::cli_consts::MAX_ACTIVITY_LOGS;
use crate::events::Event;
use crate::loader::LoadState;
use crate::range::{DateRange, Handle, Timeline};
use crate::table::{HolderRow, holder_rows};
use crate::ui::app::UIConfig;
use crate::viewport::{Viewport, ViewportSubscription};
use chrono::Local;

use std::collections::VecDeque;

/// Dashboard state: the loaded stats plus everything the user controls.
#[derive(Debug)]
pub struct DashboardState {
    /// Where the stats come from, shown in the header.
    pub source_name: String,
    /// Fetch progress and, once loaded, the snapshot.
    pub load_state: LoadState,
    /// Selected date range.
    pub range: DateRange,
    /// Slider handle moved by the arrow keys.
    pub active_handle: Handle,
    /// Highlighted row of the holder table; the table scrolls to keep it visible.
    pub selected_holder: usize,
    /// Viewport as of the last update.
    pub viewport: Viewport,
    /// Activity logs for display
    pub activity_logs: VecDeque<Event>,
    /// Whether to enable background colors
    pub with_background_color: bool,
    /// Animation tick counter
    pub tick: usize,

    /// Registration with the viewport watcher, released on drop.
    viewport_subscription: ViewportSubscription,
}

impl DashboardState {
    pub fn new(mut viewport_subscription: ViewportSubscription, ui_config: UIConfig) -> Self {
        let viewport = viewport_subscription.latest();
        Self {
            source_name: ui_config.source_name,
            load_state: LoadState::Loading,
            range: DateRange::full(),
            active_handle: Handle::Start,
            selected_holder: 0,
            viewport,
            activity_logs: VecDeque::new(),
            with_background_color: ui_config.with_background_color,
            tick: 0,
            viewport_subscription,
        }
    }

    pub(super) fn viewport_subscription_mut(&mut self) -> &mut ViewportSubscription {
        &mut self.viewport_subscription
    }

    /// Add an event to activity logs with size limit
    pub fn add_to_activity_log(&mut self, event: Event) {
        if self.activity_logs.len() >= MAX_ACTIVITY_LOGS {
            self.activity_logs.pop_front();
        }
        self.activity_logs.push_back(event);
    }

    pub fn last_activity(&self) -> Option<&Event> {
        self.activity_logs
            .iter()
            .rev()
            .find(|event| event.should_display())
    }

    pub fn layout(&self) -> ChartLayout {
        ChartLayout::for_viewport(&self.viewport)
    }

    /// Timeline of the transfer series, when loaded and non-empty.
    pub fn timeline(&self) -> Option<Timeline> {
        self.load_state
            .snapshot()
            .and_then(|snapshot| Timeline::from_points(&snapshot.daily_transfers))
    }

    /// Both charts for the selected range.
    pub fn charts(&self) -> Option<(ChartSeries, ChartSeries)> {
        self.load_state
            .snapshot()
            .map(|snapshot| build_charts(snapshot, self.range, &Local))
    }

    pub fn slider_marks(&self) -> Option<(String, String)> {
        slider_marks(self.timeline(), &Local)
    }

    /// Formatted bounds of the selected range.
    pub fn selected_dates(&self) -> Option<(String, String)> {
        let timeline = self.timeline()?;
        let (start, end) = timeline.bounds(self.range);
        Some((
            crate::chart::format_epoch_date(start.floor() as i64, &Local),
            crate::chart::format_epoch_date(end.floor() as i64, &Local),
        ))
    }

    pub fn holder_count(&self) -> usize {
        self.load_state
            .snapshot()
            .map(|snapshot| snapshot.top_holders.len())
            .unwrap_or(0)
    }

    pub fn holder_rows(&self) -> Vec<HolderRow> {
        self.load_state
            .snapshot()
            .map(|snapshot| holder_rows(&snapshot.top_holders))
            .unwrap_or_default()
    }
}
