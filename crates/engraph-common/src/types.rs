//! Core domain types shared across the engraph workspace

use serde::{Deserialize, Serialize};

/// One bucket of the open-frequency distribution: `tally` users opened
/// `frequency` times during the week, making up `percentage` of all users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRow {
    /// Open-count bucket (number of opens per user over the week)
    pub frequency: u32,
    /// Number of distinct users with exactly this open-count
    pub tally: u32,
    /// Share of all observed users, in percent
    pub percentage: f64,
}

/// Distribution of users by weekly open-count, sorted ascending by frequency.
///
/// The sum of all tallies equals `total_users`, the number of distinct user
/// identifiers observed in the week folder. Percentages sum to 100 for any
/// non-empty table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyTable {
    rows: Vec<FrequencyRow>,
    total_users: u32,
}

impl FrequencyTable {
    /// Create an empty table (zero users, zero rows)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from unsorted (frequency, tally) pairs.
    ///
    /// Percentages are computed against the tally sum; an empty input yields
    /// an empty table rather than dividing by zero.
    pub fn from_counts(counts: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut pairs: Vec<(u32, u32)> = counts.into_iter().collect();
        pairs.sort_by_key(|(frequency, _)| *frequency);

        let total_users: u32 = pairs.iter().map(|(_, tally)| tally).sum();
        if total_users == 0 {
            return Self::empty();
        }

        let rows = pairs
            .into_iter()
            .map(|(frequency, tally)| FrequencyRow {
                frequency,
                tally,
                percentage: (f64::from(tally) / f64::from(total_users)) * 100.0,
            })
            .collect();

        Self { rows, total_users }
    }

    /// Rows sorted ascending by frequency
    pub fn rows(&self) -> &[FrequencyRow] {
        &self.rows
    }

    /// Number of distinct users observed
    pub fn total_users(&self) -> u32 {
        self.total_users
    }

    /// True when no users were observed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest open-count bucket present, if any
    pub fn max_frequency(&self) -> Option<u32> {
        self.rows.last().map(|row| row.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.total_users(), 0);
        assert!(table.rows().is_empty());
        assert_eq!(table.max_frequency(), None);
    }

    #[test]
    fn test_from_counts_sorts_and_computes_percentages() {
        let table = FrequencyTable::from_counts(vec![(3, 1), (1, 2)]);

        assert_eq!(table.total_users(), 3);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].frequency, 1);
        assert_eq!(table.rows()[0].tally, 2);
        assert!((table.rows()[0].percentage - 66.666_666).abs() < 0.001);
        assert_eq!(table.rows()[1].frequency, 3);
        assert_eq!(table.rows()[1].tally, 1);
        assert!((table.rows()[1].percentage - 33.333_333).abs() < 0.001);
        assert_eq!(table.max_frequency(), Some(3));
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let table = FrequencyTable::from_counts(vec![(1, 7), (2, 5), (4, 3), (9, 1)]);
        let sum: f64 = table.rows().iter().map(|row| row.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tally_sum_matches_total_users() {
        let table = FrequencyTable::from_counts(vec![(1, 10), (2, 4), (3, 2)]);
        let tally_sum: u32 = table.rows().iter().map(|row| row.tally).sum();
        assert_eq!(tally_sum, table.total_users());
    }

    #[test]
    fn test_zero_tallies_collapse_to_empty() {
        let table = FrequencyTable::from_counts(vec![]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let table = FrequencyTable::from_counts(vec![(1, 2), (3, 1)]);
        let json = serde_json::to_string(&table).unwrap();
        let back: FrequencyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
