//! Weekly open-frequency aggregation
//!
//! The core reduction: concatenated daily identifier lists are counted into
//! per-user open counts, which are then counted again into a
//! frequency-of-frequencies table. Both steps reduce to sums, so the result
//! is independent of file enumeration order.

use std::collections::HashMap;
use std::path::Path;

use engraph_common::{FrequencyTable, Result};
use tracing::{debug, info, instrument};

use crate::reader::read_week_folder;

/// Aggregator turning a week's identifier sequence into a frequency table.
#[derive(Debug, Default)]
pub struct FrequencyAggregator;

impl FrequencyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Count how many times each identifier appears in the week's sequence.
    ///
    /// Repeats within a single day are not deduplicated; each appearance is
    /// one open.
    pub fn count_opens<S: AsRef<str>>(&self, user_ids: &[S]) -> HashMap<String, u32> {
        let mut open_counts: HashMap<String, u32> = HashMap::new();
        for id in user_ids {
            *open_counts.entry(id.as_ref().to_string()).or_insert(0) += 1;
        }
        open_counts
    }

    /// Reduce an identifier sequence to the frequency-of-frequencies table.
    ///
    /// An empty sequence yields an empty table; the percentage division is
    /// never performed against a zero user count.
    pub fn aggregate<S: AsRef<str>>(&self, user_ids: &[S]) -> FrequencyTable {
        let open_counts = self.count_opens(user_ids);

        let mut bucket_tallies: HashMap<u32, u32> = HashMap::new();
        for count in open_counts.into_values() {
            *bucket_tallies.entry(count).or_insert(0) += 1;
        }

        let table = FrequencyTable::from_counts(bucket_tallies);
        debug!(
            buckets = table.rows().len(),
            users = table.total_users(),
            "aggregated open-frequency distribution"
        );
        table
    }

    /// Read a week folder from disk and aggregate it.
    #[instrument(skip(self))]
    pub fn aggregate_week_folder(&self, path: &Path) -> Result<FrequencyTable> {
        let user_ids = read_week_folder(path)?;
        let table = self.aggregate(&user_ids);
        info!(
            folder = %path.display(),
            users = table.total_users(),
            buckets = table.rows().len(),
            "aggregated week folder"
        );
        Ok(table)
    }
}
