use async_trait::async_trait;
use sqlx::{Connection, PgConnection};

use tripsum_core::{DbSettings, Result, RetryPolicy, Summary};

use crate::options::SummaryOptions;
use crate::summarizer::Summarizer;

mod connect;
mod queries;

pub use connect::{connect_options, connect_with_retry};

/// Summarizer backed by one PostgreSQL connection.
#[derive(Debug)]
pub struct PostgresSummarizer {
    conn: PgConnection,
}

impl PostgresSummarizer {
    /// Wrap an already established connection.
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }

    /// Connect with retries, then wrap the connection.
    pub async fn connect(settings: &DbSettings, policy: &RetryPolicy) -> Result<Self> {
        let conn = connect_with_retry(settings, policy).await?;
        Ok(Self::new(conn))
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|err| tripsum_core::Error::Db(err.to_string()))
    }
}

#[async_trait]
impl Summarizer for PostgresSummarizer {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn summarize(&mut self, opts: &SummaryOptions) -> Result<Summary> {
        summarize(&mut self.conn, opts).await
    }
}

/// Run the three aggregate queries in sequence on `conn`.
pub async fn summarize(conn: &mut PgConnection, opts: &SummaryOptions) -> Result<Summary> {
    let table = &opts.table;

    let total_trips = queries::count_trips(conn, table).await?;
    let avg_fare_by_city = queries::avg_fare_by_city(conn, table).await?;
    let top_by_minutes = queries::top_by_minutes(conn, table, opts.top_n).await?;

    Ok(Summary {
        total_trips,
        avg_fare_by_city,
        top_by_minutes,
    })
}
