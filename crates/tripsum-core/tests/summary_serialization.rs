use tripsum_core::{CityFare, Summary, TopTrip};

fn reference_summary() -> Summary {
    Summary {
        total_trips: 3,
        avg_fare_by_city: vec![
            CityFare {
                city: "LA".to_string(),
                avg_fare: 25.0,
            },
            CityFare {
                city: "NYC".to_string(),
                avg_fare: 26.25,
            },
        ],
        top_by_minutes: vec![
            TopTrip {
                id: 2,
                city: "NYC".to_string(),
                minutes: 30,
                fare: 40.0,
            },
            TopTrip {
                id: 3,
                city: "LA".to_string(),
                minutes: 20,
                fare: 25.0,
            },
        ],
    }
}

#[test]
fn serializes_summary_deterministically() {
    let json = reference_summary().to_pretty_json().expect("serialize summary");
    let expected = r#"{
  "total_trips": 3,
  "avg_fare_by_city": [
    {
      "city": "LA",
      "avg_fare": 25.0
    },
    {
      "city": "NYC",
      "avg_fare": 26.25
    }
  ],
  "top_by_minutes": [
    {
      "id": 2,
      "city": "NYC",
      "minutes": 30,
      "fare": 40.0
    },
    {
      "id": 3,
      "city": "LA",
      "minutes": 20,
      "fare": 25.0
    }
  ]
}"#;
    assert_eq!(json, expected);
}

#[test]
fn serializes_empty_summary() {
    let summary = Summary {
        total_trips: 0,
        avg_fare_by_city: Vec::new(),
        top_by_minutes: Vec::new(),
    };
    let json = summary.to_pretty_json().expect("serialize summary");
    assert_eq!(
        json,
        "{\n  \"total_trips\": 0,\n  \"avg_fare_by_city\": [],\n  \"top_by_minutes\": []\n}"
    );
}

#[test]
fn parses_back_from_json() {
    let json = reference_summary().to_pretty_json().expect("serialize summary");
    let parsed: Summary = serde_json::from_str(&json).expect("parse summary");
    assert_eq!(parsed, reference_summary());
}
