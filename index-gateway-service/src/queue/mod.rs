//! Queue-size aggregation across the configured queue backends.

mod aggregator;
mod source;

pub use aggregator::{QueueAggregator, QueueFailurePolicy};
pub use source::{HttpQueueSizeSource, QueueSizeSource};
