//! All-breakpoints (finest common refinement) merge.
//!
//! Collects every block end of every input, sorts and deduplicates them,
//! and pairs consecutive breakpoints into blocks. No pairwise comparison
//! between partitions is needed.

use std::borrow::Borrow;

use crate::models::Partition;

/// Merges partitions that passed the alignment and breakpoint checks.
pub(super) fn merge<P: Borrow<Partition>>(partitions: &[P]) -> Partition {
    let mut breakpoints: Vec<usize> = partitions
        .iter()
        .flat_map(|p| Borrow::<Partition>::borrow(p).breakpoints())
        .collect();
    breakpoints.sort_unstable();
    breakpoints.dedup();
    tracing::trace!(breakpoints = breakpoints.len(), "collected breakpoints");
    Partition::from_breakpoints(breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(pairs: &[(usize, usize)]) -> Partition {
        Partition::from_pairs(pairs)
    }

    #[test]
    fn test_union_of_breakpoints() {
        let parts = vec![
            p(&[(1, 4), (5, 8), (9, 12)]),
            p(&[(1, 3), (4, 6), (7, 9), (10, 12)]),
        ];
        assert_eq!(
            merge(&parts),
            p(&[(1, 3), (4, 4), (5, 6), (7, 8), (9, 9), (10, 12)])
        );
    }

    #[test]
    fn test_nested_partitions() {
        // Hourly refines 4-hourly: result is hourly.
        let hourly = Partition::uniform(1, 8).unwrap();
        let four = Partition::uniform(4, 8).unwrap();
        assert_eq!(merge(&[four, hourly.clone()]), hourly);
    }

    #[test]
    fn test_identical_inputs_dedup() {
        let a = p(&[(1, 2), (3, 5)]);
        assert_eq!(merge(&[&a, &a, &a]), a);
    }
}
