//! Input validation for partitions.
//!
//! Checks the preconditions of reconciliation before any output is built:
//! - Non-empty input, non-empty partitions
//! - Every partition starts at 1
//! - Every partition ends at the same span
//! - (strict) Blocks are valid and consecutive
//! - Breakpoints stay within `1..=span`

use std::borrow::Borrow;

use crate::error::{Misalignment, PartitionError, Result};
use crate::models::Partition;

/// Checks that `partition` is well-formed.
///
/// `index` is reported in the error so callers validating a list can tell
/// which partition failed.
///
/// Checks:
/// 1. At least one block
/// 2. First block starts at 1
/// 3. Every block has `start <= end`
/// 4. Each block starts right after the previous one ends
pub fn validate_partition(partition: &Partition, index: usize) -> Result<()> {
    let first = partition
        .first_start()
        .ok_or(PartitionError::EmptyInput {
            partition: Some(index),
        })?;
    if first != 1 {
        return Err(PartitionError::MisalignedPartitions {
            partition: index,
            misalignment: Misalignment::Start { found: first },
        });
    }

    let mut expected_start = 1;
    for (b, block) in partition.iter().enumerate() {
        if block.start != expected_start {
            let reason = if block.start < expected_start {
                format!("block {block} overlaps the previous block")
            } else {
                format!("gap before block {block}")
            };
            return Err(malformed(index, b, reason));
        }
        if block.end < block.start {
            return Err(malformed(index, b, format!("block {block} ends before it starts")));
        }
        expected_start = block.end + 1;
    }
    Ok(())
}

/// Checks that all partitions are non-empty, start at 1, and share one span.
///
/// Only the first and last block of each partition are inspected.
///
/// # Returns
/// The common span `N`.
pub fn check_alignment<P: Borrow<Partition>>(partitions: &[P]) -> Result<usize> {
    let Some(first) = partitions.first() else {
        return Err(PartitionError::EmptyInput { partition: None });
    };
    if let Some(i) = partitions
        .iter()
        .position(|p| Borrow::<Partition>::borrow(p).is_empty())
    {
        return Err(PartitionError::EmptyInput { partition: Some(i) });
    }

    let span = Borrow::<Partition>::borrow(first).span();
    for (i, p) in partitions.iter().enumerate() {
        let p: &Partition = p.borrow();
        if let Some(start) = p.first_start().filter(|&s| s != 1) {
            return Err(PartitionError::MisalignedPartitions {
                partition: i,
                misalignment: Misalignment::Start { found: start },
            });
        }
        if p.span() != span {
            return Err(PartitionError::MisalignedPartitions {
                partition: i,
                misalignment: Misalignment::Span {
                    expected: span,
                    found: p.span(),
                },
            });
        }
    }
    Ok(span)
}

/// Checks that every breakpoint of `partition` lies in `1..=span`.
///
/// Without this, a partition that passed only the boundary checks could
/// drive the sweep past the span or emit a block ending at 0.
pub fn check_breakpoints(partition: &Partition, index: usize, span: usize) -> Result<()> {
    match partition
        .breakpoints()
        .position(|end| end == 0 || end > span)
    {
        Some(b) => Err(malformed(
            index,
            b,
            format!(
                "breakpoint {} outside 1..={span}",
                partition.blocks()[b].end
            ),
        )),
        None => Ok(()),
    }
}

fn malformed(partition: usize, block: usize, reason: String) -> PartitionError {
    PartitionError::MalformedPartition {
        partition,
        block,
        reason,
    }
}
