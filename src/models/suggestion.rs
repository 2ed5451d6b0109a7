use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A generated activity proposal. Not persisted; identity is its position
/// in the returned sequence until a caller writes selected items into
/// storage.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivitySuggestion {
    pub title: String,
    pub category: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_lon: Option<f64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenerateActivitiesRequest {
    pub destination: String,
    pub trip_type: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub pace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_index: Option<u32>,
    pub total_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_coords: Option<Coordinates>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeneratePackingListRequest {
    pub destination: String,
    pub trip_type: String,
    pub duration_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Raw point-of-interest record from the place lookup collaborator,
/// before interest-based categorization.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CandidatePlace {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}
