//! Partition reconciliation.
//!
//! Merges several partitions of the same representative period into one
//! common grid. The model calls this once per (asset, period) over the
//! asset's own partition and the partitions of its incident flows, and
//! indexes the asset's balance constraints by the result.
//!
//! # Strategies
//!
//! | Strategy | Result | Boundaries |
//! |----------|--------|------------|
//! | [`Strategy::Greedy`] | Coarsest common alignment | Each is the end of some input block |
//! | [`Strategy::All`] | Finest common refinement | Union of all input block ends |
//!
//! # Usage
//!
//! ```
//! use u_timeblocks::models::Partition;
//! use u_timeblocks::reconcile::{reconcile, Strategy};
//!
//! let a = Partition::uniform(4, 12).unwrap();
//! let b = Partition::uniform(3, 12).unwrap();
//!
//! let grid = reconcile(&[a, b], Strategy::Greedy).unwrap();
//! assert_eq!(grid.to_string(), "[1:4, 5:8, 9:12]");
//! ```

mod all;
mod greedy;

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{PartitionError, Result};
use crate::models::{Partition, PartitionTable};
use crate::validation;

/// Merge policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Strategy {
    /// Coarsest partition whose boundaries are all input boundaries.
    #[default]
    Greedy,
    /// Finest partition containing every input boundary.
    All,
}

impl Strategy {
    /// Identifier used in configuration (`"greedy"` / `"all"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::All => "all",
        }
    }
}

impl FromStr for Strategy {
    type Err = PartitionError;

    /// Parses `greedy` or `all`, ignoring ASCII case. Anything else is rejected.
    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("greedy") {
            Ok(Self::Greedy)
        } else if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Err(PartitionError::InvalidStrategy(s.to_string()))
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = PartitionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Strategy> for &'static str {
    fn from(strategy: Strategy) -> Self {
        strategy.name()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How thoroughly input partitions are checked before merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// First start, common span, and breakpoint range only.
    #[default]
    Boundary,
    /// Every partition must be fully well-formed.
    Strict,
}

/// Reconciliation settings.
///
/// Deserializes from partial input, e.g. `{"strategy": "all"}`; missing
/// fields take their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileOptions {
    /// Merge policy.
    pub strategy: Strategy,
    /// Input checking level.
    pub strictness: Strictness,
}

impl ReconcileOptions {
    /// Options with the given strategy and boundary checks.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the strictness.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Enables full validation of every input partition.
    pub fn strict(self) -> Self {
        self.with_strictness(Strictness::Strict)
    }
}

/// Merges partitions of the same span into one partition.
///
/// Inputs get boundary checks only (see [`Strictness::Boundary`]).
///
/// # Errors
/// - [`PartitionError::EmptyInput`] if `partitions` or any member is empty
/// - [`PartitionError::MisalignedPartitions`] if a partition does not start
///   at 1 or its span differs from the first one
/// - [`PartitionError::MalformedPartition`] if a breakpoint lies outside
///   `1..=span`
pub fn reconcile<P: Borrow<Partition>>(partitions: &[P], strategy: Strategy) -> Result<Partition> {
    reconcile_with(partitions, &ReconcileOptions::new(strategy))
}

/// Merges partitions of the same span into one partition with explicit options.
///
/// All checks run before the merge; on error nothing is produced.
pub fn reconcile_with<P: Borrow<Partition>>(
    partitions: &[P],
    options: &ReconcileOptions,
) -> Result<Partition> {
    let span = validation::check_alignment(partitions)?;
    for (i, partition) in partitions.iter().enumerate() {
        let partition: &Partition = partition.borrow();
        match options.strictness {
            Strictness::Boundary => validation::check_breakpoints(partition, i, span)?,
            Strictness::Strict => validation::validate_partition(partition, i)?,
        }
    }

    debug!(
        strategy = %options.strategy,
        partitions = partitions.len(),
        span,
        "reconciling partitions"
    );
    let merged = match options.strategy {
        Strategy::Greedy => greedy::merge(partitions, span),
        Strategy::All => all::merge(partitions),
    };
    debug_assert!(validation::validate_partition(&merged, 0).is_ok());
    debug_assert_eq!(merged.span(), span);
    debug!(blocks = merged.len(), "reconciled partitions");

    Ok(merged)
}

/// Reconciles every asset's grid with the partitions of its incident flows.
///
/// For each `(asset, period)` in `assets`, merges the asset's partition with
/// `flows[(flow, period)]` for every flow listed in `incidence[asset]`.
/// Flows without a partition for that period are skipped.
///
/// # Errors
/// The first failing `(asset, period)` aborts the call; its error is wrapped
/// in [`PartitionError::Element`] keyed by the asset.
pub fn reconcile_incident(
    assets: &PartitionTable,
    flows: &PartitionTable,
    incidence: &HashMap<String, Vec<String>>,
    options: &ReconcileOptions,
) -> Result<PartitionTable> {
    let mut grids = PartitionTable::new();
    for ((asset, period), own) in assets.iter() {
        let mut inputs: Vec<&Partition> = vec![own];
        if let Some(incident) = incidence.get(asset) {
            inputs.extend(incident.iter().filter_map(|flow| flows.get(flow, *period)));
        }
        let grid = reconcile_with(&inputs, options)
            .map_err(|e| e.for_element(asset.as_str(), *period))?;
        grids.insert(asset.as_str(), *period, grid);
    }
    debug!(grids = grids.len(), "reconciled incident partitions");
    Ok(grids)
}
