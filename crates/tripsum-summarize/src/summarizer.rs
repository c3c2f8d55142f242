use async_trait::async_trait;

use tripsum_core::{Result, Summary};

use crate::options::SummaryOptions;

/// Trait implemented by anything that can compute a trip summary.
#[async_trait]
pub trait Summarizer {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Compute the three aggregates over the configured table.
    ///
    /// Fails with [`tripsum_core::Error::MissingTable`] when the table does not exist.
    async fn summarize(&mut self, opts: &SummaryOptions) -> Result<Summary>;
}
