//! Filtering and normalization pipeline for Wikimedia event streams.
//!
//! Each upstream feed gets an [`EventAdapter`] binding its raw schema to a
//! normalizer, an eligibility gate, and an output topic:
//!
//! ```text
//! Raw frame (SSE) --> EventAdapter --> NormalizedEvent --> Kafka topic
//!                     (normalize & filter)
//! ```
//!
//! Adapters for the three Wikimedia feeds live in [`wikimedia`]. Malformed
//! records are a silent local rejection at every stage; only sink failures
//! surface as errors.

pub mod filter;
pub mod normalize;
pub mod publish;
pub mod schema;
pub mod traits;
pub mod wikimedia;

pub use publish::publish;
pub use schema::{NormalizedEvent, UserType};
pub use traits::EventAdapter;
pub use wikimedia::{PageCreateAdapter, RecentChangeAdapter, RevisionCreateAdapter};
