use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::activity::Activity;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Day {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub date: NaiveDate,
    pub day_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

/// A day plus its activities in position order, as returned by the
/// itinerary and shared-trip views.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DayWithActivities {
    #[serde(flatten)]
    pub day: Day,
    pub activities: Vec<Activity>,
}
