//! Error types for partition reconciliation and resolution matrices.
//!
//! Every operation checks its preconditions before building any output,
//! so an `Err` always means nothing was produced.

use std::fmt;

use thiserror::Error;

/// Errors raised by partition construction, reconciliation, and
/// resolution matrix building.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PartitionError {
    /// Strategy identifier is not one of `greedy` / `all`.
    #[error("invalid strategy '{0}': expected 'greedy' or 'all'")]
    InvalidStrategy(String),

    /// No partitions were supplied, or one of them has no blocks.
    #[error("empty input: {}", describe_empty(.partition))]
    EmptyInput {
        /// Index of the empty partition; `None` when the list itself is empty.
        partition: Option<usize>,
    },

    /// A partition does not start at 1 or does not share the common span.
    #[error("misaligned partition {partition}: {misalignment}")]
    MisalignedPartitions {
        /// Index of the offending partition.
        partition: usize,
        /// What was wrong with it.
        misalignment: Misalignment,
    },

    /// A partition is not internally contiguous, or a breakpoint lies
    /// outside `1..=span`.
    #[error("malformed partition {partition} at block {block}: {reason}")]
    MalformedPartition {
        /// Index of the offending partition.
        partition: usize,
        /// Index of the offending block within it.
        block: usize,
        /// Human-readable description.
        reason: String,
    },

    /// Resolution matrix scale must be finite and strictly positive.
    #[error("invalid scale {0}: must be finite and > 0")]
    InvalidScale(f64),

    /// Vector length does not match the matrix dimension.
    #[error("dimension mismatch: expected {expected} values, found {found}")]
    DimensionMismatch {
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },

    /// A textual partition specification could not be parsed or built.
    #[error("invalid partition specification: {0}")]
    InvalidSpecification(String),

    /// A partition table has no entry for an (element, period) key.
    #[error("no partition defined for '{id}' period {period}")]
    MissingPartition {
        /// Asset or flow identifier.
        id: String,
        /// Representative period index.
        period: usize,
    },

    /// Building or reconciling the partition of one (element, period) key
    /// failed. The element is an asset or a flow.
    #[error("'{id}' period {period}: {source}")]
    Element {
        /// Asset or flow identifier.
        id: String,
        /// Representative period index.
        period: usize,
        /// Underlying failure.
        #[source]
        source: Box<PartitionError>,
    },
}

/// How a partition fails to align with the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misalignment {
    /// First block does not start at 1.
    Start {
        /// Actual start of the first block.
        found: usize,
    },
    /// Last block ends somewhere other than the common span.
    Span {
        /// Span of the first partition.
        expected: usize,
        /// Span of this partition.
        found: usize,
    },
}

impl fmt::Display for Misalignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start { found } => write!(f, "first block starts at {found}, expected 1"),
            Self::Span { expected, found } => {
                write!(f, "span is {found}, expected {expected}")
            }
        }
    }
}

fn describe_empty(partition: &Option<usize>) -> String {
    match partition {
        Some(i) => format!("partition {i} has no blocks"),
        None => "no partitions supplied".to_string(),
    }
}

impl PartitionError {
    /// Wraps this error with the (element, period) key it occurred for.
    pub fn for_element(self, id: impl Into<String>, period: usize) -> Self {
        Self::Element {
            id: id.into(),
            period,
            source: Box::new(self),
        }
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, PartitionError>;
