//! Time partition domain models.
//!
//! Provides the data types shared by reconciliation and resolution
//! matrices. Each asset and flow in a representative period is discretized
//! into its own partition; these types describe them.
//!
//! # Domain Mappings
//!
//! | u-timeblocks | Energy model | Meaning |
//! |--------------|--------------|---------|
//! | TimeBlock | Time block | Consecutive time steps sharing one variable |
//! | Partition | Resolution | Blocks covering a representative period |
//! | PartitionSpec | `uniform` / `explicit` / `math` | Textual block layout |
//! | PartitionTable | Asset/flow partitions | `(id, period) → Partition` |

mod block;
mod partition;
mod spec;
mod table;

pub use block::TimeBlock;
pub use partition::Partition;
pub use spec::PartitionSpec;
pub use table::{PartitionKey, PartitionTable};
