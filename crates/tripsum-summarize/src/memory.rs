use std::collections::BTreeMap;

use async_trait::async_trait;

use tripsum_core::{CityFare, Error, Result, Summary, TableName, TopTrip, Trip};

use crate::options::SummaryOptions;
use crate::summarizer::Summarizer;

/// Summarizer over rows held in memory, standing in for a single table.
#[derive(Debug, Clone)]
pub struct MemorySummarizer {
    table: TableName,
    trips: Vec<Trip>,
}

impl MemorySummarizer {
    /// Create a summarizer exposing `trips` under the default table name.
    pub fn new(trips: Vec<Trip>) -> Self {
        Self::with_table(TableName::default(), trips)
    }

    pub fn with_table(table: TableName, trips: Vec<Trip>) -> Self {
        Self { table, trips }
    }
}

#[async_trait]
impl Summarizer for MemorySummarizer {
    fn engine(&self) -> &'static str {
        "memory"
    }

    async fn summarize(&mut self, opts: &SummaryOptions) -> Result<Summary> {
        if opts.table != self.table {
            return Err(Error::MissingTable {
                table: opts.table.to_string(),
            });
        }
        Ok(summarize_trips(&self.trips, opts.top_n))
    }
}

/// Compute the summary of `trips` the way the SQL queries do.
pub fn summarize_trips(trips: &[Trip], top_n: u32) -> Summary {
    let mut by_city: BTreeMap<&str, (f64, u32)> = BTreeMap::new();
    for trip in trips {
        let entry = by_city.entry(trip.city.as_str()).or_insert((0.0, 0));
        entry.0 += trip.fare;
        entry.1 += 1;
    }

    let avg_fare_by_city = by_city
        .into_iter()
        .map(|(city, (sum, count))| CityFare {
            city: city.to_string(),
            avg_fare: sum / f64::from(count),
        })
        .collect();

    let mut longest: Vec<&Trip> = trips.iter().collect();
    // stable: ties keep row order
    longest.sort_by(|left, right| right.minutes.cmp(&left.minutes));
    let top_by_minutes = longest
        .into_iter()
        .take(top_n as usize)
        .cloned()
        .map(TopTrip::from)
        .collect();

    Summary {
        total_trips: trips.len() as i64,
        avg_fare_by_city,
        top_by_minutes,
    }
}
