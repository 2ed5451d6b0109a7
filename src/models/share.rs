use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::day::DayWithActivities;
use crate::models::trip::Trip;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ShareLink {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ShareSubmission {
    #[serde(default)]
    pub expires_in_days: Option<i64>,
}

/// Read-only itinerary view resolved from a public slug.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SharedTrip {
    pub trip: Trip,
    pub days: Vec<DayWithActivities>,
}
