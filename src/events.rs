//! Event System
//!
//! Activity events shown in the dashboard footer and forwarded to the logger

use crate::logging::{LogLevel, should_log_with_env};
use chrono::Local;

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum Source {
    /// The one-shot stats fetch.
    Loader,
    /// Slider and other user interaction.
    Dashboard,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, strum::Display)]
pub enum EventType {
    Success,
    Error,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub msg: String,
    pub timestamp: String,
    pub event_type: EventType,
    pub log_level: LogLevel,
}

impl Event {
    fn new(source: Source, msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self {
            source,
            msg,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            event_type,
            log_level,
        }
    }

    pub fn loader(msg: String, event_type: EventType, log_level: LogLevel) -> Self {
        Self::new(Source::Loader, msg, event_type, log_level)
    }

    pub fn dashboard(msg: String) -> Self {
        Self::new(Source::Dashboard, msg, EventType::Refresh, LogLevel::Info)
    }

    pub fn should_display(&self) -> bool {
        if self.event_type == EventType::Success || self.log_level >= LogLevel::Info {
            return true;
        }
        should_log_with_env(self.log_level)
    }

    /// Forward the event to the `log` facade.
    pub fn log(&self) {
        log::log!(
            target: "chonk_stats::events",
            log::Level::from(self.log_level),
            "{} {}",
            self.source,
            self.msg
        );
    }
}

/// Format compact timestamp (`MM-DD HH:MM`) from a full `YYYY-MM-DD HH:MM:SS` one.
pub fn format_compact_timestamp(timestamp: &str) -> String {
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    timestamp.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_and_dashboard_sources() {
        let event = Event::loader("Loaded".to_string(), EventType::Success, LogLevel::Info);
        assert_eq!(event.source, Source::Loader);
        assert_eq!(event.msg, "Loaded");

        let event = Event::dashboard("Date range set".to_string());
        assert_eq!(event.source, Source::Dashboard);
        assert_eq!(event.event_type, EventType::Refresh);
    }

    #[test]
    fn test_success_and_errors_are_displayed() {
        let success = Event::loader("ok".to_string(), EventType::Success, LogLevel::Debug);
        let error = Event::loader("bad".to_string(), EventType::Error, LogLevel::Error);
        assert!(success.should_display());
        assert!(error.should_display());
    }

    #[test]
    fn test_format_compact_timestamp() {
        assert_eq!(format_compact_timestamp("2024-03-14 09:26:53"), "03-14 09:26");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }
}
