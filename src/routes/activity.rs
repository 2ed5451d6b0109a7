use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::activity::{Activity, ActivityInput};
use crate::models::day::Day;

/*
    POST /api/days/{id}/activities
    Appends the activity at the day's next free position.
*/
pub async fn create(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ActivityInput>,
) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let days: mongodb::Collection<Day> = db.collection("Days");
    let activities: mongodb::Collection<Activity> = db.collection("Activities");

    let day_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match days.find_one(doc! { "_id": day_id }).await {
        Ok(Some(_)) => {}
        Ok(None) => return HttpResponse::NotFound().body("Day not found"),
        Err(err) => {
            eprintln!("Failed to retrieve day: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve day");
        }
    }

    let position = match next_position(&activities, day_id).await {
        Ok(position) => position,
        Err(err) => {
            eprintln!("Failed to determine next position: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to add activity");
        }
    };

    let submission = input.into_inner();
    let mut activity = Activity {
        id: None,
        day_id,
        title: submission.title,
        start_time: submission.start_time,
        end_time: submission.end_time,
        duration_minutes: submission.duration_minutes,
        category: submission.category,
        notes: submission.notes,
        position: Some(position),
        created_at: Some(DateTime::now()),
    };

    match activities.insert_one(&activity).await {
        Ok(result) => {
            activity.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(activity)
        }
        Err(err) => {
            eprintln!("Failed to insert activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to add activity")
        }
    }
}

/*
    PUT /api/activities/{id}
*/
pub async fn update(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ActivityInput>,
) -> impl Responder {
    let client = data.into_inner();
    let activities: mongodb::Collection<Activity> =
        client.database(DATABASE).collection("Activities");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let submission = input.into_inner();
    let update = doc! {
        "$set": {
            "title": submission.title,
            "start_time": submission.start_time,
            "end_time": submission.end_time,
            "duration_minutes": submission.duration_minutes.map(|d| d as i64),
            "category": submission.category,
            "notes": submission.notes,
        }
    };

    match activities.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => HttpResponse::NotFound().body("Activity not found"),
        Ok(_) => match activities.find_one(doc! { "_id": id }).await {
            Ok(Some(activity)) => HttpResponse::Ok().json(activity),
            Ok(None) => HttpResponse::NotFound().body("Activity not found"),
            Err(err) => {
                eprintln!("Failed to reload activity: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to update activity")
            }
        },
        Err(err) => {
            eprintln!("Failed to update activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update activity")
        }
    }
}

/*
    DELETE /api/activities/{id}
*/
pub async fn delete(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let activities: mongodb::Collection<Activity> =
        client.database(DATABASE).collection("Activities");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match activities.delete_one(doc! { "_id": id }).await {
        Ok(result) if result.deleted_count == 0 => HttpResponse::NotFound().body("Activity not found"),
        Ok(_) => HttpResponse::Ok().body("Activity deleted"),
        Err(err) => {
            eprintln!("Failed to delete activity: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete activity")
        }
    }
}

/// Highest stored position for the day plus one, or 0 for the first
/// activity.
pub(crate) async fn next_position(
    activities: &mongodb::Collection<Activity>,
    day_id: ObjectId,
) -> mongodb::error::Result<i32> {
    let cursor = activities
        .find(doc! { "day_id": day_id })
        .sort(doc! { "position": -1 })
        .limit(1)
        .await?;

    let last: Vec<Activity> = cursor.try_collect().await?;
    Ok(match last.first() {
        Some(activity) => activity.position.unwrap_or(0) + 1,
        None => 0,
    })
}
