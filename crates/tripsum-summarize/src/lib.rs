//! Trip summarizers.
//!
//! The Postgres summarizer owns a single connection established through a
//! capped exponential backoff; the in-memory summarizer computes the same
//! aggregates over a list of rows.

pub mod memory;
pub mod options;
pub mod postgres;
pub mod retry;
pub mod summarizer;

pub use memory::MemorySummarizer;
pub use options::SummaryOptions;
pub use postgres::PostgresSummarizer;
pub use retry::retry_with_backoff;
pub use summarizer::Summarizer;

pub use tripsum_core::Summary;
