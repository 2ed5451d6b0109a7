use mongodb::bson::{oid::ObjectId, DateTime, Document};
use mongodb::{Client, Collection};

use crate::db::mongo::DATABASE;
use crate::models::analytics::LogEntry;

/// Records a product analytics event in the Logs collection. Fire and
/// forget: a failed write is printed and swallowed so analytics can never
/// break a user-facing flow.
pub async fn track_event(
    client: &Client,
    event_name: &str,
    trip_id: Option<ObjectId>,
    user_id: Option<ObjectId>,
    metadata: Option<Document>,
) {
    let collection: Collection<LogEntry> = client.database(DATABASE).collection("Logs");

    let entry = LogEntry {
        id: None,
        event_name: event_name.to_string(),
        trip_id,
        user_id,
        metadata,
        created_at: DateTime::now(),
    };

    if let Err(err) = collection.insert_one(&entry).await {
        eprintln!("Failed to track {} event: {:?}", event_name, err);
    }
}
