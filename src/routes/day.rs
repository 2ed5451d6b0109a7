use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::activity::Activity;
use crate::models::day::{Day, DayWithActivities};
use crate::models::trip::Trip;

/*
    POST /api/trips/{id}/days
    Creates one Day row per calendar date of the trip, day_index from 1.
*/
pub async fn generate(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let trips: mongodb::Collection<Trip> = db.collection("Trips");
    let days: mongodb::Collection<Day> = db.collection("Days");

    let trip_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let trip = match trips.find_one(doc! { "_id": trip_id }).await {
        Ok(Some(trip)) => trip,
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve trip");
        }
    };

    match days.count_documents(doc! { "trip_id": trip_id }).await {
        Ok(0) => {}
        Ok(_) => return HttpResponse::Conflict().body("Days already generated"),
        Err(err) => {
            eprintln!("Failed to count days: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to generate days");
        }
    }

    let curr_time = DateTime::now();
    let mut day_docs = Vec::new();
    let mut date = trip.start_date;
    let mut day_index: u32 = 1;

    while date <= trip.end_date {
        day_docs.push(Day {
            id: None,
            trip_id,
            date,
            day_index,
            notes: Some(String::new()),
            created_at: Some(curr_time),
        });

        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
        day_index += 1;
    }

    if let Err(err) = days.insert_many(&day_docs).await {
        eprintln!("Failed to insert days: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to generate days");
    }

    respond_with_days(&client, trip_id).await
}

/*
    GET /api/trips/{id}/days
    Days in day_index order, each with its activities in position order.
*/
pub async fn get_days(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let trips: mongodb::Collection<Trip> = client.database(DATABASE).collection("Trips");

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

    respond_with_days(&client, trip_id).await
}

async fn respond_with_days(client: &Client, trip_id: ObjectId) -> HttpResponse {
    match collect_days(client, trip_id).await {
        Ok(days) => HttpResponse::Ok().json(days),
        Err(err) => {
            eprintln!("Failed to load days: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to load days")
        }
    }
}

/// Loads a trip's days with their activities, both in display order.
pub(crate) async fn collect_days(
    client: &Client,
    trip_id: ObjectId,
) -> mongodb::error::Result<Vec<DayWithActivities>> {
    let db = client.database(DATABASE);
    let days: mongodb::Collection<Day> = db.collection("Days");
    let activities: mongodb::Collection<Activity> = db.collection("Activities");

    let cursor = days
        .find(doc! { "trip_id": trip_id })
        .sort(doc! { "day_index": 1 })
        .await?;
    let day_docs: Vec<Day> = cursor.try_collect().await?;

    let mut result = Vec::with_capacity(day_docs.len());
    for day in day_docs {
        let day_id = match day.id {
            Some(id) => id,
            None => continue,
        };

        let cursor = activities
            .find(doc! { "day_id": day_id })
            .sort(doc! { "position": 1 })
            .await?;
        let day_activities: Vec<Activity> = cursor.try_collect().await?;

        result.push(DayWithActivities {
            day,
            activities: day_activities,
        });
    }

    Ok(result)
}
