use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over the trips table, as written to `summary.json`.
///
/// Field order is the key order of the serialized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    /// Number of rows in the table.
    pub total_trips: i64,
    /// Average fare per distinct city, ordered by city ascending.
    pub avg_fare_by_city: Vec<CityFare>,
    /// Longest trips, ordered by minutes descending.
    pub top_by_minutes: Vec<TopTrip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CityFare {
    pub city: String,
    pub avg_fare: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TopTrip {
    pub id: i64,
    pub city: String,
    pub minutes: i64,
    pub fare: f64,
}

/// A single row of the trips table.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: i64,
    pub city: String,
    pub minutes: i64,
    pub fare: f64,
}

impl Trip {
    pub fn new(id: i64, city: impl Into<String>, minutes: i64, fare: f64) -> Self {
        Self {
            id,
            city: city.into(),
            minutes,
            fare,
        }
    }
}

impl From<Trip> for TopTrip {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            city: trip.city,
            minutes: trip.minutes,
            fare: trip.fare,
        }
    }
}

impl Summary {
    /// Render the summary as two-space indented JSON.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
