//! Top holders table rows.

use crate::model::HolderRecord;
use num_format::{Locale, ToFormattedString};

pub const HEADERS: [&str; 3] = ["Rank", "Holder ID", "Total Chonks"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRow {
    /// 1-based position in the received list.
    pub rank: usize,
    pub id: String,
    /// Count with thousands separators.
    pub total: String,
}

impl HolderRow {
    pub fn cells(&self) -> [String; 3] {
        [self.rank.to_string(), self.id.clone(), self.total.clone()]
    }
}

/// One row per holder, ranked in the order received.
pub fn holder_rows(holders: &[HolderRecord]) -> Vec<HolderRow> {
    holders
        .iter()
        .enumerate()
        .map(|(index, holder)| HolderRow {
            rank: index + 1,
            id: holder.id.clone(),
            total: format_count(holder.total_chonks),
        })
        .collect()
}

pub fn format_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_holder_row() {
        let rows = holder_rows(&[HolderRecord::new("0xA", 1_000_000)]);
        assert_eq!(
            rows,
            vec![HolderRow {
                rank: 1,
                id: "0xA".to_string(),
                total: "1,000,000".to_string(),
            }]
        );
        assert_eq!(rows[0].cells(), ["1", "0xA", "1,000,000"]);
    }

    #[test]
    // Order is trusted from upstream; no local re-sorting.
    fn test_rank_follows_input_order() {
        let holders = vec![
            HolderRecord::new("0xC", 3),
            HolderRecord::new("0xA", 50),
            HolderRecord::new("0xB", 7),
        ];
        let rows = holder_rows(&holders);
        let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(ids, vec!["0xC", "0xA", "0xB"]);
    }

    #[test]
    fn test_empty_holders_have_no_rows() {
        assert!(holder_rows(&[]).is_empty());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_234), "1,234");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }
}
