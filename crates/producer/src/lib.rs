//! Fan-in producer binding the three Wikimedia feeds to Kafka topics.

pub mod coordinator;

pub use coordinator::{Coordinator, Lane, PipelineState};
