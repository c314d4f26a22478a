//! Duration-weighted resolution matrices.
//!
//! A resolution matrix maps values defined on one partition's blocks onto
//! another partition's blocks, in proportion to how many time steps they
//! share. Entry `(i, j)` is
//!
//! ```text
//! M[i, j] = scale * |reference_i ∩ target_j| / |target_j|
//! ```
//!
//! so a quantity carried by target block `j` is split over the reference
//! blocks it overlaps. Whenever `target_j` lies inside the reference range,
//! column `j` sums to `scale`: nothing is lost or counted twice.
//!
//! # Example
//!
//! ```
//! use u_timeblocks::models::Partition;
//! use u_timeblocks::resolution::resolution_matrix;
//!
//! let four_hourly = Partition::uniform(4, 12).unwrap();
//! let three_hourly = Partition::uniform(3, 12).unwrap();
//!
//! let m = resolution_matrix(&four_hourly, &three_hourly, 1.0).unwrap();
//! assert_eq!(m.nnz(), 6);
//! assert!((m.get(0, 1) - 1.0 / 3.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PartitionError, Result};
use crate::models::{Partition, TimeBlock};

/// Sparse `rows × cols` matrix stored as `(row, col, value)` triplets.
///
/// Rows index reference blocks and columns index target blocks, both
/// 0-based. Entries are sorted by `(row, col)` and never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl ResolutionMatrix {
    /// Number of rows (reference blocks).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (target blocks).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Non-zero entries sorted by `(row, col)`.
    pub fn entries(&self) -> &[(usize, usize, f64)] {
        &self.entries
    }

    /// Value at `(row, col)`; 0.0 when not stored.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries
            .binary_search_by(|&(r, c, _)| (r, c).cmp(&(row, col)))
            .map_or(0.0, |i| self.entries[i].2)
    }

    /// Non-zero entries of one row as `(col, value)`.
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let from = self.entries.partition_point(|&(r, _, _)| r < row);
        self.entries[from..]
            .iter()
            .take_while(move |&&(r, _, _)| r == row)
            .map(|&(_, c, v)| (c, v))
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for &(_, c, v) in &self.entries {
            sums[c] += v;
        }
        sums
    }

    /// Redistributes one value per target block onto the reference blocks.
    ///
    /// Returns `M · values`, i.e. `out[i] = Σ_j M[i, j] * values[j]`.
    pub fn apply(&self, values: &[f64]) -> Result<Vec<f64>> {
        if values.len() != self.cols {
            return Err(PartitionError::DimensionMismatch {
                expected: self.cols,
                found: values.len(),
            });
        }
        let mut out = vec![0.0; self.rows];
        for &(r, c, v) in &self.entries {
            out[r] += v * values[c];
        }
        Ok(out)
    }

    /// Dense row-major copy.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.cols]; self.rows];
        for &(r, c, v) in &self.entries {
            dense[r][c] = v;
        }
        dense
    }
}

/// Builds the resolution matrix from `target` blocks onto `reference` blocks.
///
/// The partitions need not share breakpoints or even spans; time steps
/// outside the common range simply contribute nothing.
///
/// # Errors
/// [`PartitionError::InvalidScale`] if `scale` is not finite and positive.
pub fn resolution_matrix(
    reference: &Partition,
    target: &Partition,
    scale: f64,
) -> Result<ResolutionMatrix> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(PartitionError::InvalidScale(scale));
    }
    Ok(build(reference.blocks(), target.blocks(), scale))
}

/// [`resolution_matrix`] with `scale = 1.0`.
pub fn resolution_matrix_unit(reference: &Partition, target: &Partition) -> ResolutionMatrix {
    build(reference.blocks(), target.blocks(), 1.0)
}

fn build(reference: &[TimeBlock], target: &[TimeBlock], scale: f64) -> ResolutionMatrix {
    let mut entries = Vec::with_capacity(reference.len() + target.len());

    // Two-pointer sweep: advance whichever block ends first.
    let (mut i, mut j) = (0, 0);
    while i < reference.len() && j < target.len() {
        let (r, t) = (&reference[i], &target[j]);
        let overlap = r.overlap_len(t);
        if overlap > 0 {
            entries.push((i, j, scale * overlap as f64 / t.len() as f64));
        }
        if r.end <= t.end {
            i += 1;
        } else {
            j += 1;
        }
    }

    debug!(
        rows = reference.len(),
        cols = target.len(),
        nnz = entries.len(),
        "built resolution matrix"
    );
    ResolutionMatrix {
        rows: reference.len(),
        cols: target.len(),
        entries,
    }
}
