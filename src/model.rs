//! Collection statistics: the wire schema and the validated snapshot built from it.

use serde::Deserialize;
use thiserror::Error;

/// The two daily time series served by the endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Series {
    #[strum(serialize = "dailyChonkTransfers")]
    Transfers,
    #[strum(serialize = "dailyChonkTraitTransfers")]
    TraitTransfers,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A series item whose `id` is not an integer epoch.
    #[error("Invalid epoch {id:?} in {series}")]
    InvalidEpoch { series: Series, id: String },
}

/// One day of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    /// Seconds since the Unix epoch.
    pub epoch: i64,
    pub value: u64,
}

impl TimeSeriesPoint {
    pub fn new(epoch: i64, value: u64) -> Self {
        Self { epoch, value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRecord {
    /// Wallet address or other holder identifier.
    pub id: String,
    pub total_chonks: u64,
}

impl HolderRecord {
    pub fn new(id: impl Into<String>, total_chonks: u64) -> Self {
        Self {
            id: id.into(),
            total_chonks,
        }
    }
}

/// Everything one fetch returns. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetSnapshot {
    pub daily_transfers: Vec<TimeSeriesPoint>,
    pub daily_trait_transfers: Vec<TimeSeriesPoint>,
    /// In the order received; upstream sorts descending by count.
    pub top_holders: Vec<HolderRecord>,
}

impl DatasetSnapshot {
    pub fn new(
        daily_transfers: Vec<TimeSeriesPoint>,
        daily_trait_transfers: Vec<TimeSeriesPoint>,
        top_holders: Vec<HolderRecord>,
    ) -> Self {
        Self {
            daily_transfers,
            daily_trait_transfers,
            top_holders,
        }
    }

    /// Validate the loosely typed wire payload.
    ///
    /// Every series `id` must parse as an integer epoch; the first one that
    /// does not fails the whole snapshot.
    pub fn from_wire(data: StatsData) -> Result<Self, SchemaError> {
        let daily_transfers = data
            .daily_chonk_transfers
            .items
            .into_iter()
            .map(|item| parse_point(Series::Transfers, &item.id, item.total_transfers))
            .collect::<Result<Vec<_>, _>>()?;

        let daily_trait_transfers = data
            .daily_chonk_trait_transfers
            .items
            .into_iter()
            .map(|item| {
                parse_point(
                    Series::TraitTransfers,
                    &item.id,
                    item.total_traits_transfers,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        let top_holders = data
            .top_chonk_holders
            .items
            .into_iter()
            .map(|item| HolderRecord::new(item.id, item.total_chonks))
            .collect();

        Ok(Self::new(daily_transfers, daily_trait_transfers, top_holders))
    }

    pub fn series(&self, series: Series) -> &[TimeSeriesPoint] {
        match series {
            Series::Transfers => &self.daily_transfers,
            Series::TraitTransfers => &self.daily_trait_transfers,
        }
    }
}

fn parse_point(series: Series, id: &str, value: u64) -> Result<TimeSeriesPoint, SchemaError> {
    let epoch = id
        .trim()
        .parse::<i64>()
        .map_err(|_| SchemaError::InvalidEpoch {
            series,
            id: id.to_string(),
        })?;
    Ok(TimeSeriesPoint::new(epoch, value))
}

// Wire types mirroring the GraphQL selection set.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub daily_chonk_transfers: ItemList<TransferItem>,
    pub top_chonk_holders: ItemList<HolderItem>,
    pub daily_chonk_trait_transfers: ItemList<TraitTransferItem>,
}

#[derive(Debug, Deserialize)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferItem {
    pub id: String,
    pub total_transfers: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitTransferItem {
    pub id: String,
    pub total_traits_transfers: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderItem {
    pub id: String,
    pub total_chonks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(json: serde_json::Value) -> StatsData {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_from_wire_keeps_order_and_values() {
        let data = wire(serde_json::json!({
            "dailyChonkTransfers": { "items": [
                { "id": "2000", "totalTransfers": 9 },
                { "id": "1000", "totalTransfers": 5 }
            ]},
            "topChonkHolders": { "items": [
                { "id": "0xB", "totalChonks": 40 },
                { "id": "0xA", "totalChonks": 12 }
            ]},
            "dailyChonkTraitTransfers": { "items": [
                { "id": "1000", "totalTraitsTransfers": 3 }
            ]}
        }));

        let snapshot = DatasetSnapshot::from_wire(data).unwrap();
        assert_eq!(
            snapshot.daily_transfers,
            vec![TimeSeriesPoint::new(2000, 9), TimeSeriesPoint::new(1000, 5)]
        );
        assert_eq!(
            snapshot.series(Series::TraitTransfers),
            &[TimeSeriesPoint::new(1000, 3)]
        );
        assert_eq!(snapshot.top_holders[0], HolderRecord::new("0xB", 40));
        assert_eq!(snapshot.top_holders[1].id, "0xA");
    }

    #[test]
    // A non-numeric epoch fails the whole snapshot and names the series.
    fn test_from_wire_rejects_bad_epoch() {
        let data = wire(serde_json::json!({
            "dailyChonkTransfers": { "items": [] },
            "topChonkHolders": { "items": [] },
            "dailyChonkTraitTransfers": { "items": [
                { "id": "yesterday", "totalTraitsTransfers": 1 }
            ]}
        }));

        let err = DatasetSnapshot::from_wire(data).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidEpoch {
                series: Series::TraitTransfers,
                id: "yesterday".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid epoch \"yesterday\" in dailyChonkTraitTransfers"
        );
    }

    #[test]
    fn test_wire_requires_all_three_lists() {
        let result = serde_json::from_value::<StatsData>(serde_json::json!({
            "dailyChonkTransfers": { "items": [] }
        }));
        assert!(result.is_err());
    }
}
