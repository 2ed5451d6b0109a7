use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::activity::Activity;
use crate::models::suggestion::{ActivitySuggestion, GenerateActivitiesRequest};
use crate::models::trip::Trip;
use crate::routes::activity::next_position;
use crate::routes::day::collect_days;
use crate::services::analytics::track_event;
use crate::services::suggestions::SuggestionGenerator;

// In all-days mode the selected suggestions are spread over the trip as
// consecutive pairs, two per day.
const SUGGESTIONS_PER_DAY: usize = 2;

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionsRequest {
    #[serde(default)]
    pub day_id: Option<String>,
    pub suggestions: Vec<ActivitySuggestion>,
}

/*
    POST /api/suggestions/activities
    Runs the generator. Always answers 200 with a (possibly empty) list;
    lookup failures degrade to fewer or zero suggestions.
*/
pub async fn generate(
    data: web::Data<Arc<Client>>,
    input: web::Json<GenerateActivitiesRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let request = input.into_inner();

    let generator = SuggestionGenerator::new();
    let suggestions = generator.generate_activities(&request).await;

    let metadata = doc! {
        "type": "activities",
        "pace": request.pace.as_str(),
        "interests": request.interests.clone(),
    };
    track_event(&client, "ai_generate", None, None, Some(metadata)).await;

    HttpResponse::Ok().json(suggestions)
}

/*
    POST /api/trips/{id}/suggestions/apply
    Persists selected suggestions: all of them onto the target day, or
    pairs across every day of the trip when no day is given.
*/
pub async fn apply(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ApplySuggestionsRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let trips: mongodb::Collection<Trip> = db.collection("Trips");
    let activities: mongodb::Collection<Activity> = db.collection("Activities");

    let trip_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match trips.find_one(doc! { "_id": trip_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve trip");
        }
    }

    let request = input.into_inner();

    let all_days = match collect_days(&client, trip_id).await {
        Ok(days) => days,
        Err(err) => {
            eprintln!("Failed to load days: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load days");
        }
    };

    let target_days: Vec<ObjectId> = match &request.day_id {
        Some(day_id) => {
            let day_id = match ObjectId::parse_str(day_id) {
                Ok(id) => id,
                Err(_) => return HttpResponse::BadRequest().body("Invalid day ID"),
            };
            if !all_days.iter().any(|entry| entry.day.id == Some(day_id)) {
                return HttpResponse::NotFound().body("Day not found");
            }
            vec![day_id]
        }
        None => all_days.iter().filter_map(|entry| entry.day.id).collect(),
    };

    let spread_across_trip = request.day_id.is_none();
    let mut inserted: usize = 0;

    for (index, day_id) in target_days.iter().enumerate() {
        let batch: Vec<&ActivitySuggestion> = if spread_across_trip {
            request
                .suggestions
                .iter()
                .skip(index * SUGGESTIONS_PER_DAY)
                .take(SUGGESTIONS_PER_DAY)
                .collect()
        } else {
            request.suggestions.iter().collect()
        };

        if batch.is_empty() {
            continue;
        }

        let mut position = match next_position(&activities, *day_id).await {
            Ok(position) => position,
            Err(err) => {
                eprintln!("Failed to determine next position: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to apply suggestions");
            }
        };

        for suggestion in batch {
            let activity = Activity {
                id: None,
                day_id: *day_id,
                title: suggestion.title.clone(),
                start_time: suggestion.start_time.clone(),
                end_time: suggestion.end_time.clone(),
                duration_minutes: suggestion.duration_minutes,
                category: Some(suggestion.category.clone()),
                notes: Some(suggestion.notes.clone()),
                position: Some(position),
                created_at: Some(DateTime::now()),
            };

            if let Err(err) = activities.insert_one(&activity).await {
                eprintln!("Failed to insert activity: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to apply suggestions");
            }

            position += 1;
            inserted += 1;
        }
    }

    HttpResponse::Ok().json(json!({ "inserted": inserted }))
}
