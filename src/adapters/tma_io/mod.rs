//! TMA data serialization
//!
//! [`TmaDataWriter`] is the seam commands write through; [`TmaSummaryWriter`]
//! is the default tab-delimited implementation.

pub mod traits;
pub mod writer;

pub use traits::{TmaDataWriter, WriteReport};
pub use writer::TmaSummaryWriter;
