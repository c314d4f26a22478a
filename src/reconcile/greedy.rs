//! Greedy (coarsest common alignment) merge.
//!
//! # Algorithm
//! Sweep left to right with a cursor `s`. Every input partition proposes
//! the end of its block containing `s`; the largest proposal `e` closes the
//! output block `[s, e]`, and the sweep continues at `e + 1`. Each output
//! boundary is therefore the end of some input block.
//!
//! Each partition keeps its own scan position, which only moves forward,
//! so the whole sweep is O(total blocks).

use std::borrow::Borrow;

use crate::models::Partition;

/// Merges partitions that passed the alignment and breakpoint checks.
///
/// Every breakpoint must lie in `1..=span` and every partition must end at
/// `span`, which guarantees a candidate block exists for every cursor.
pub(super) fn merge<P: Borrow<Partition>>(partitions: &[P], span: usize) -> Partition {
    let mut cursors = vec![0usize; partitions.len()];
    let mut breakpoints = Vec::new();
    let mut start = 1;

    while start <= span {
        let mut end = start;
        for (partition, cursor) in partitions.iter().zip(cursors.iter_mut()) {
            let blocks = Borrow::<Partition>::borrow(partition).blocks();
            // Last block ends at `span >= start`, so this stops in bounds.
            while blocks[*cursor].end < start {
                *cursor += 1;
            }
            end = end.max(blocks[*cursor].end);
        }
        tracing::trace!(start, end, "greedy block");
        breakpoints.push(end);
        start = end + 1;
    }

    Partition::from_breakpoints(breakpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn p(pairs: &[(usize, usize)]) -> Partition {
        Partition::from_pairs(pairs)
    }

    /// Rescans every partition from the beginning at each step.
    fn rescan(partitions: &[Partition], span: usize) -> Partition {
        let mut breakpoints = Vec::new();
        let mut start = 1;
        while start <= span {
            let end = partitions
                .iter()
                .filter_map(|part| part.iter().find(|b| b.end >= start).map(|b| b.end))
                .max()
                .unwrap();
            breakpoints.push(end);
            start = end + 1;
        }
        Partition::from_breakpoints(breakpoints)
    }

    fn random_partition(rng: &mut SmallRng, span: usize) -> Partition {
        let mut lengths = Vec::new();
        let mut remaining = span;
        while remaining > 0 {
            let len = rng.random_range(1..=remaining.min(6));
            lengths.push(len);
            remaining -= len;
        }
        Partition::from_lengths(&lengths).unwrap()
    }

    #[test]
    fn test_coarser_partition_wins() {
        let parts = vec![
            p(&[(1, 4), (5, 8), (9, 12)]),
            p(&[(1, 3), (4, 6), (7, 9), (10, 12)]),
        ];
        assert_eq!(merge(&parts, 12), p(&[(1, 4), (5, 8), (9, 12)]));
    }

    #[test]
    fn test_interleaved_boundaries() {
        let parts = vec![
            p(&[(1, 1), (2, 3), (4, 6), (7, 10), (11, 12)]),
            p(&[(1, 2), (3, 4), (5, 5), (6, 7), (8, 9), (10, 12)]),
        ];
        assert_eq!(
            merge(&parts, 12),
            p(&[(1, 2), (3, 4), (5, 6), (7, 10), (11, 12)])
        );
    }

    #[test]
    fn test_single_block_input_dominates() {
        let parts = vec![p(&[(1, 24)]), Partition::uniform(1, 24).unwrap()];
        assert_eq!(merge(&parts, 24), p(&[(1, 24)]));
    }

    #[test]
    fn test_borrowed_inputs() {
        let a = p(&[(1, 2), (3, 4)]);
        let b = p(&[(1, 1), (2, 4)]);
        assert_eq!(merge(&[&a, &b], 4), p(&[(1, 2), (3, 4)]));
    }

    #[test]
    fn test_cursor_sweep_matches_rescan() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let span = rng.random_range(1..=48);
            let count = rng.random_range(1..=5);
            let parts: Vec<Partition> = (0..count)
                .map(|_| random_partition(&mut rng, span))
                .collect();
            assert_eq!(merge(&parts, span), rescan(&parts, span));
        }
    }
}
