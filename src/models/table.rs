//! Partition lookup table.
//!
//! Maps `(element id, representative period)` to a partition. Elements are
//! assets or flows, depending on which table it is; the table itself does
//! not care.

use std::collections::BTreeMap;

use super::{Partition, PartitionSpec};
use crate::error::{PartitionError, Result};

/// Key of a [`PartitionTable`]: element id and representative period.
pub type PartitionKey = (String, usize);

/// Partitions per element and representative period.
///
/// Iteration order is sorted by key, so anything derived from a table
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionTable {
    entries: BTreeMap<PartitionKey, Partition>,
}

impl PartitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a partition (builder style).
    pub fn with_partition(
        mut self,
        id: impl Into<String>,
        period: usize,
        partition: Partition,
    ) -> Self {
        self.insert(id, period, partition);
        self
    }

    /// Builds a partition from a specification and adds it.
    pub fn with_spec(
        mut self,
        id: impl Into<String>,
        period: usize,
        spec: &PartitionSpec,
        span: usize,
    ) -> Result<Self> {
        let id = id.into();
        let partition = spec
            .build(span)
            .map_err(|e| e.for_element(id.clone(), period))?;
        self.insert(id, period, partition);
        Ok(self)
    }

    /// Inserts a partition, returning the previous one for the key.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        period: usize,
        partition: Partition,
    ) -> Option<Partition> {
        self.entries.insert((id.into(), period), partition)
    }

    /// Partition for an element in a period.
    pub fn get(&self, id: &str, period: usize) -> Option<&Partition> {
        // BTreeMap<(String, usize)> can't be queried with (&str, usize).
        self.entries.get(&(id.to_string(), period))
    }

    /// Partition for an element in a period, or an error naming the key.
    pub fn require(&self, id: &str, period: usize) -> Result<&Partition> {
        self.get(id, period)
            .ok_or_else(|| PartitionError::MissingPartition {
                id: id.to_string(),
                period,
            })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `((id, period), partition)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PartitionKey, &Partition)> {
        self.entries.iter()
    }
}

impl FromIterator<(PartitionKey, Partition)> for PartitionTable {
    fn from_iter<I: IntoIterator<Item = (PartitionKey, Partition)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
