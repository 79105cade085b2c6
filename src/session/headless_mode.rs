//! Headless snapshot mode
//!
//! Fetches once and prints the filtered series and the holder table to stdout.

use super::messages::{print_session_shutdown, print_session_starting};
use crate::chart::{ChartSeries, build_charts, format_epoch_date};
use crate::graphql::StatsSource;
use crate::loader::{LoadState, fetch_state};
use crate::model::DatasetSnapshot;
use crate::range::{DateRange, Timeline};
use crate::table::{HEADERS, format_count, holder_rows};
use chrono::{Local, TimeZone};
use std::error::Error;
use std::fmt::{Display, Write};

/// Runs one fetch and prints the result
///
/// # Arguments
/// * `source` - Where to fetch the stats from
/// * `range` - Percent range applied to both series
pub async fn run_headless_mode(
    source: &dyn StatsSource,
    range: DateRange,
) -> Result<(), Box<dyn Error>> {
    print_session_starting("snapshot", &source.describe());

    let (state, _) = tokio::select! {
        result = fetch_state(source) => result,
        _ = tokio::signal::ctrl_c() => {
            print_session_shutdown();
            return Ok(());
        }
    };

    match state {
        LoadState::Ready(snapshot) => {
            print!("{}", format_snapshot(&snapshot, range, &Local));
            Ok(())
        }
        LoadState::Empty => {
            println!("No data available");
            Ok(())
        }
        LoadState::Failed(message) => Err(message.into()),
        LoadState::Loading => Err("Stats fetch did not complete".into()),
    }
}

fn write_series(out: &mut String, series: &ChartSeries) {
    let _ = writeln!(out, "{}", series.kind.title());
    if series.is_empty() {
        let _ = writeln!(out, "  No data in selected range");
        return;
    }
    for (date, (_, value)) in series.dates.iter().zip(&series.points) {
        let _ = writeln!(out, "  {:<12}{:>12}", date, format_count(*value as u64));
    }
}

/// Plain-text rendering of the dashboard for `range`.
pub fn format_snapshot<Tz>(snapshot: &DatasetSnapshot, range: DateRange, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    if let Some(timeline) = Timeline::from_points(&snapshot.daily_transfers) {
        let (start, end) = timeline.bounds(range);
        let _ = writeln!(
            out,
            "Date Range: {} - {}\n",
            format_epoch_date(start.floor() as i64, tz),
            format_epoch_date(end.floor() as i64, tz)
        );
    }

    let (transfers, traits) = build_charts(snapshot, range, tz);
    write_series(&mut out, &transfers);
    out.push('\n');
    write_series(&mut out, &traits);
    out.push('\n');

    let _ = writeln!(out, "Top Chonk Holders");
    let _ = writeln!(out, "{:<6}{:<44}{:>14}", HEADERS[0], HEADERS[1], HEADERS[2]);
    for row in holder_rows(&snapshot.top_holders) {
        let [rank, id, total] = row.cells();
        let _ = writeln!(out, "{:<6}{:<44}{:>14}", rank, id, total);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::MockStatsSource;
    use crate::graphql::error::FetchError;
    use crate::model::{HolderRecord, TimeSeriesPoint};
    use chrono::Utc;

    const DAY: i64 = 86_400;
    const MARCH_1: i64 = 1_709_251_200;

    fn sample() -> DatasetSnapshot {
        DatasetSnapshot::new(
            vec![
                TimeSeriesPoint::new(MARCH_1, 1200),
                TimeSeriesPoint::new(MARCH_1 + DAY, 7),
            ],
            vec![TimeSeriesPoint::new(MARCH_1 + DAY, 3)],
            vec![HolderRecord::new("0xA", 1_000_000)],
        )
    }

    #[test]
    fn test_format_full_range() {
        let text = format_snapshot(&sample(), DateRange::full(), &Utc);
        assert!(text.contains("Date Range: 3/1/2024 - 3/2/2024"));
        assert!(text.contains("Daily Chonk Transfers"));
        assert!(text.contains("3/1/2024"));
        assert!(text.contains("1,200"));
        assert!(text.contains("Daily Trait Transfers"));
        assert!(text.contains("1,000,000"));
        assert!(text.contains("Rank"));
    }

    #[test]
    fn test_format_narrow_range() {
        let text = format_snapshot(&sample(), DateRange::new(0.0, 10.0), &Utc);
        let traits = text
            .split("Daily Trait Transfers")
            .nth(1)
            .unwrap_or_default();
        assert!(traits.contains("No data in selected range"));
        assert!(!text.contains("3/2/2024"));
    }

    #[test]
    fn test_format_without_holders() {
        let snapshot = DatasetSnapshot::new(Vec::new(), Vec::new(), Vec::new());
        let text = format_snapshot(&snapshot, DateRange::full(), &Utc);
        assert!(!text.contains("Date Range"));
        assert!(text.contains("Holder ID"));
    }

    #[tokio::test]
    async fn test_failed_fetch_is_an_error() {
        let mut source = MockStatsSource::new();
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source.expect_fetch_snapshot().times(1).returning(|| {
            Err(FetchError::Http {
                status: 500,
                message: "boom".to_string(),
            })
        });
        let result = run_headless_mode(&source, DateRange::full()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_empty_fetch_is_ok() {
        let mut source = MockStatsSource::new();
        source
            .expect_describe()
            .returning(|| "mock".to_string());
        source
            .expect_fetch_snapshot()
            .times(1)
            .returning(|| Ok(None));
        assert!(run_headless_mode(&source, DateRange::full()).await.is_ok());
    }
}
