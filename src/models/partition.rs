//! Partition model.
//!
//! A partition splits a representative period `1..=N` into consecutive
//! time blocks. Assets and flows each carry their own partition, and the
//! model reconciles them onto a common grid per asset.
//!
//! # Well-formedness
//! A partition is well-formed iff it is non-empty, its first block starts
//! at 1, every block satisfies `start <= end`, and each block starts right
//! after the previous one ends. Partitions arriving from external data are
//! stored as given; [`Partition::try_from_blocks`] and
//! [`crate::validation::validate_partition`] check the full invariant.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::TimeBlock;
use crate::error::{PartitionError, Result};
use crate::validation;

/// An ordered sequence of time blocks covering `1..=span`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition {
    blocks: Vec<TimeBlock>,
}

impl Partition {
    /// Wraps raw blocks without checking well-formedness.
    pub fn from_blocks(blocks: Vec<TimeBlock>) -> Self {
        Self { blocks }
    }

    /// Wraps raw blocks, rejecting anything that is not a well-formed partition.
    pub fn try_from_blocks(blocks: Vec<TimeBlock>) -> Result<Self> {
        let partition = Self { blocks };
        validation::validate_partition(&partition, 0)?;
        Ok(partition)
    }

    /// Builds a partition from `(start, end)` pairs without checking.
    pub fn from_pairs(pairs: &[(usize, usize)]) -> Self {
        Self::from_blocks(pairs.iter().copied().map(TimeBlock::from).collect())
    }

    /// Single block covering the whole span.
    pub fn whole(span: usize) -> Result<Self> {
        Self::from_lengths(&[span])
    }

    /// Consecutive blocks of `block_len` steps covering `1..=span`.
    ///
    /// `span` must be a positive multiple of `block_len`.
    pub fn uniform(block_len: usize, span: usize) -> Result<Self> {
        if block_len == 0 {
            return Err(PartitionError::InvalidSpecification(
                "uniform block length must be positive".to_string(),
            ));
        }
        if span == 0 || span % block_len != 0 {
            return Err(PartitionError::InvalidSpecification(format!(
                "span {span} is not a positive multiple of block length {block_len}"
            )));
        }
        Ok(Self::from_blocks(
            (1..=span)
                .step_by(block_len)
                .map(|start| TimeBlock::new(start, start + block_len - 1))
                .collect(),
        ))
    }

    /// Consecutive blocks with the given lengths, starting at 1.
    pub fn from_lengths(lengths: &[usize]) -> Result<Self> {
        if lengths.is_empty() {
            return Err(PartitionError::InvalidSpecification(
                "no block lengths given".to_string(),
            ));
        }
        let mut blocks = Vec::with_capacity(lengths.len());
        // `None` once the previous block ended at `usize::MAX`.
        let mut next_start = Some(1usize);
        for (i, &len) in lengths.iter().enumerate() {
            if len == 0 {
                return Err(PartitionError::InvalidSpecification(format!(
                    "block {i} has zero length"
                )));
            }
            let (start, end) = next_start
                .and_then(|start| start.checked_add(len - 1).map(|end| (start, end)))
                .ok_or_else(|| {
                    PartitionError::InvalidSpecification(format!(
                        "block {i} of length {len} overflows the time index"
                    ))
                })?;
            blocks.push(TimeBlock::new(start, end));
            next_start = end.checked_add(1);
        }
        Ok(Self { blocks })
    }

    /// Builds a partition whose block ends are the given breakpoints.
    ///
    /// `breakpoints` must be strictly increasing and start above 0.
    pub(crate) fn from_breakpoints(breakpoints: impl IntoIterator<Item = usize>) -> Self {
        let mut start = 1;
        let blocks = breakpoints
            .into_iter()
            .map(|end| {
                let block = TimeBlock::new(start, end);
                start = end + 1;
                block
            })
            .collect();
        Self { blocks }
    }

    /// The blocks in order.
    #[inline]
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Iterates over the blocks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimeBlock> {
        self.blocks.iter()
    }

    /// Number of blocks.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the partition has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// First block's start, if any.
    pub fn first_start(&self) -> Option<usize> {
        self.blocks.first().map(|b| b.start)
    }

    /// Last block's end (the span `N`); 0 for an empty partition.
    pub fn span(&self) -> usize {
        self.blocks.last().map_or(0, |b| b.end)
    }

    /// Block ends, in order.
    pub fn breakpoints(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().map(|b| b.end)
    }

    /// Index of the block containing `step`.
    ///
    /// Assumes a well-formed partition (binary search over block ends).
    pub fn block_of(&self, step: usize) -> Option<usize> {
        let idx = self.blocks.partition_point(|b| b.end < step);
        self.blocks
            .get(idx)
            .filter(|b| b.contains(step))
            .map(|_| idx)
    }

    /// Consumes the partition, returning its blocks.
    pub fn into_blocks(self) -> Vec<TimeBlock> {
        self.blocks
    }
}

impl From<Vec<TimeBlock>> for Partition {
    fn from(blocks: Vec<TimeBlock>) -> Self {
        Self::from_blocks(blocks)
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a TimeBlock;
    type IntoIter = std::slice::Iter<'a, TimeBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{block}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let p = Partition::uniform(4, 12).unwrap();
        assert_eq!(p, Partition::from_pairs(&[(1, 4), (5, 8), (9, 12)]));
        assert_eq!(p.span(), 12);
    }

    #[test]
    fn test_uniform_rejects_remainder() {
        assert!(Partition::uniform(5, 12).is_err());
        assert!(Partition::uniform(0, 12).is_err());
        assert!(Partition::uniform(3, 0).is_err());
    }

    #[test]
    fn test_from_lengths() {
        let p = Partition::from_lengths(&[3, 1, 2]).unwrap();
        assert_eq!(p, Partition::from_pairs(&[(1, 3), (4, 4), (5, 6)]));
        assert!(Partition::from_lengths(&[2, 0, 1]).is_err());
        assert!(Partition::from_lengths(&[]).is_err());
    }

    #[test]
    fn test_from_lengths_overflow() {
        assert!(matches!(
            Partition::from_lengths(&[usize::MAX, 13]),
            Err(PartitionError::InvalidSpecification(_))
        ));
        assert!(Partition::from_lengths(&[2, usize::MAX]).is_err());
    }

    #[test]
    fn test_whole() {
        let p = Partition::whole(24).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.blocks()[0], TimeBlock::new(1, 24));
    }

    #[test]
    fn test_try_from_blocks() {
        assert!(Partition::try_from_blocks(vec![TimeBlock::new(1, 2), TimeBlock::new(3, 6)]).is_ok());
        // Gap between 2 and 4
        assert!(Partition::try_from_blocks(vec![TimeBlock::new(1, 2), TimeBlock::new(4, 6)]).is_err());
    }

    #[test]
    fn test_breakpoints_and_span() {
        let p = Partition::from_pairs(&[(1, 3), (4, 6), (7, 9), (10, 12)]);
        assert_eq!(p.breakpoints().collect::<Vec<_>>(), vec![3, 6, 9, 12]);
        assert_eq!(p.first_start(), Some(1));
        assert_eq!(Partition::default().span(), 0);
    }

    #[test]
    fn test_block_of() {
        let p = Partition::from_pairs(&[(1, 3), (4, 4), (5, 8)]);
        assert_eq!(p.block_of(1), Some(0));
        assert_eq!(p.block_of(4), Some(1));
        assert_eq!(p.block_of(8), Some(2));
        assert_eq!(p.block_of(9), None);
        assert_eq!(p.block_of(0), None);
    }

    #[test]
    fn test_from_breakpoints() {
        let p = Partition::from_breakpoints([3, 4, 6]);
        assert_eq!(p, Partition::from_pairs(&[(1, 3), (4, 4), (5, 6)]));
    }

    #[test]
    fn test_display() {
        let p = Partition::from_pairs(&[(1, 4), (5, 8)]);
        assert_eq!(p.to_string(), "[1:4, 5:8]");
    }

    #[test]
    fn test_serde_transparent() {
        let p = Partition::from_pairs(&[(1, 2), (3, 3)]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"[{"start":1,"end":2},{"start":3,"end":3}]"#);
        let back: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
