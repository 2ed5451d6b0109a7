use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::activity::Activity;
use crate::models::day::Day;
use crate::models::packing::PackingList;
use crate::models::share::ShareLink;
use crate::models::trip::{Trip, TripSubmission};
use crate::services::analytics::track_event;

#[derive(Debug, Deserialize)]
pub struct TripListQuery {
    pub owner_id: String,
}

/*
    POST /api/trips
*/
pub async fn create(
    data: web::Data<Arc<Client>>,
    input: web::Json<TripSubmission>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database(DATABASE).collection("Trips");

    let submission = input.into_inner();
    if submission.end_date < submission.start_date {
        return HttpResponse::BadRequest().body("End date must be after start date");
    }

    let curr_time = DateTime::now();
    let mut trip = Trip {
        id: None,
        owner_id: submission.owner_id,
        title: submission.title,
        primary_destination: submission.primary_destination,
        trip_type: submission.trip_type,
        start_date: submission.start_date,
        end_date: submission.end_date,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&trip).await {
        Ok(result) => {
            trip.id = result.inserted_id.as_object_id();
            track_event(&client, "trip_create", trip.id, Some(trip.owner_id), None).await;
            HttpResponse::Ok().json(trip)
        }
        Err(err) => {
            eprintln!("Failed to insert trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create trip.")
        }
    }
}

/*
    GET /api/trips?owner_id={id}
    Newest trips first, matching the dashboard ordering.
*/
pub async fn get_all(
    data: web::Data<Arc<Client>>,
    query: web::Query<TripListQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database(DATABASE).collection("Trips");

    let owner_id = match ObjectId::parse_str(&query.owner_id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid owner ID"),
    };

    let cursor = collection
        .find(doc! { "owner_id": owner_id })
        .sort(doc! { "created_at": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect trips.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find trips.")
        }
    }
}

/*
    GET /api/trips/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Trip> = client.database(DATABASE).collection("Trips");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    DELETE /api/trips/{id}
    Removes the trip along with its days, activities, packing lists and
    share links.
*/
pub async fn delete(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let trips: mongodb::Collection<Trip> = db.collection("Trips");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let trip = match trips.find_one(doc! { "_id": id }).await {
        Ok(Some(trip)) => trip,
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve trip");
        }
    };

    let days: mongodb::Collection<Day> = db.collection("Days");
    let day_ids: Vec<ObjectId> = match days.find(doc! { "trip_id": id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Day>>().await {
            Ok(day_docs) => day_docs.into_iter().filter_map(|day| day.id).collect(),
            Err(err) => {
                eprintln!("Failed to collect days: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to delete trip");
            }
        },
        Err(err) => {
            eprintln!("Failed to find days: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to delete trip");
        }
    };

    let activities: mongodb::Collection<Activity> = db.collection("Activities");
    let packing_lists: mongodb::Collection<PackingList> = db.collection("PackingLists");
    let share_links: mongodb::Collection<ShareLink> = db.collection("ShareLinks");

    if !day_ids.is_empty() {
        if let Err(err) = activities
            .delete_many(doc! { "day_id": { "$in": day_ids } })
            .await
        {
            eprintln!("Failed to delete activities: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to delete trip");
        }
    }

    if let Err(err) = days.delete_many(doc! { "trip_id": id }).await {
        eprintln!("Failed to delete days: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to delete trip");
    }
    if let Err(err) = packing_lists.delete_many(doc! { "trip_id": id }).await {
        eprintln!("Failed to delete packing lists: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to delete trip");
    }
    if let Err(err) = share_links.delete_many(doc! { "trip_id": id }).await {
        eprintln!("Failed to delete share links: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to delete trip");
    }

    match trips.delete_one(doc! { "_id": id }).await {
        Ok(_) => {
            track_event(&client, "trip_delete", Some(id), Some(trip.owner_id), None).await;
            HttpResponse::Ok().body("Trip deleted")
        }
        Err(err) => {
            eprintln!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete trip")
        }
    }
}
