//! Deduplicating assembly of collected records into the final table.
//!
//! Duplicates appear when the star ranking shifts between page requests and a
//! repository is served on two pages. The first occurrence wins, so a
//! repository keeps the metrics it had when first seen.

use std::collections::HashSet;

use tracing::debug;

use crate::collect::Record;

/// Ordered table of records, unique by `full_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Record>,
    seen: HashSet<String>,
}

impl Dataset {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` unless its key is already present.
    ///
    /// Returns `true` if the record was added.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.seen.contains(record.key()) {
            return false;
        }
        self.seen.insert(record.key().to_string());
        self.rows.push(record);
        true
    }

    /// Rows in first-seen order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(rows, columns)` for reporting.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), Record::COLUMNS.len())
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut dataset = Self::new();
        for record in iter {
            dataset.insert(record);
        }
        dataset
    }
}

/// Builds the deduplicated table from collected records (stable, first-seen-wins).
#[must_use]
pub fn assemble(records: impl IntoIterator<Item = Record>) -> Dataset {
    let mut input = 0usize;
    let dataset: Dataset = records
        .into_iter()
        .inspect(|_| input += 1)
        .collect();
    debug!(
        input,
        rows = dataset.len(),
        dropped = input - dataset.len(),
        "assembled dataset"
    );
    dataset
}
