//! Time-block partitions for multi-resolution energy models.
//!
//! Assets and flows of the same representative period may each be
//! discretized into different, unequal-length time blocks. This crate
//! puts them on a common grid and maps quantities between grids without
//! losing or double-counting duration.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeBlock`, `Partition`, `PartitionSpec`,
//!   `PartitionTable`
//! - **`reconcile`**: Merging partitions under the `Greedy` (coarsest common
//!   alignment) or `All` (finest common refinement) strategy
//! - **`resolution`**: Sparse duration-weighted overlap matrices between two
//!   partitions
//! - **`validation`**: Well-formedness and alignment checks
//! - **`error`**: `PartitionError` and the crate `Result` alias
//!
//! # Architecture
//!
//! Everything here is a pure function over borrowed, immutable inputs; no
//! state survives a call. Callers building an optimization model fan out
//! over (asset, representative period) pairs on whatever threads they like.
//! Model construction, data ingestion, and solving live outside this crate.

pub mod error;
pub mod models;
pub mod reconcile;
pub mod resolution;
pub mod validation;

pub use error::{Misalignment, PartitionError, Result};
pub use models::{Partition, PartitionSpec, PartitionTable, TimeBlock};
pub use reconcile::{
    reconcile, reconcile_incident, reconcile_with, ReconcileOptions, Strategy, Strictness,
};
pub use resolution::{resolution_matrix, resolution_matrix_unit, ResolutionMatrix};
