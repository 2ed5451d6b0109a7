use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::share::{ShareLink, SharedTrip, ShareSubmission};
use crate::models::trip::Trip;
use crate::routes::day::collect_days;
use crate::services::analytics::track_event;

const SLUG_LENGTH: usize = 10;
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/*
    POST /api/trips/{id}/share
*/
pub async fn create(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<ShareSubmission>,
) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let trips: mongodb::Collection<Trip> = db.collection("Trips");
    let share_links: mongodb::Collection<ShareLink> = db.collection("ShareLinks");

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

    let now = DateTime::now();
    let expires_at = input.expires_in_days.map(|days| {
        DateTime::from_millis(now.timestamp_millis() + days * MILLIS_PER_DAY)
    });

    let mut link = ShareLink {
        id: None,
        trip_id,
        slug: generate_slug(),
        expires_at,
        created_at: Some(now),
    };

    match share_links.insert_one(&link).await {
        Ok(result) => {
            link.id = result.inserted_id.as_object_id();
            track_event(&client, "share_create", Some(trip_id), Some(trip.owner_id), None).await;
            HttpResponse::Ok().json(link)
        }
        Err(err) => {
            eprintln!("Failed to insert share link: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create share link")
        }
    }
}

/*
    GET /api/share/{slug}
    Public read-only itinerary view. Unknown and expired slugs are both
    reported as not found.
*/
pub async fn get_by_slug(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let share_links: mongodb::Collection<ShareLink> = db.collection("ShareLinks");
    let trips: mongodb::Collection<Trip> = db.collection("Trips");

    let slug = path.into_inner();
    if !is_valid_slug(&slug) {
        return HttpResponse::BadRequest().body("Invalid share link");
    }

    let link = match share_links.find_one(doc! { "slug": &slug }).await {
        Ok(Some(link)) => link,
        Ok(None) => return HttpResponse::NotFound().body("Share link not found"),
        Err(err) => {
            eprintln!("Failed to retrieve share link: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve share link");
        }
    };

    if let Some(expires_at) = link.expires_at {
        if expires_at < DateTime::now() {
            return HttpResponse::NotFound().body("Share link not found");
        }
    }

    let trip = match trips.find_one(doc! { "_id": link.trip_id }).await {
        Ok(Some(trip)) => trip,
        Ok(None) => return HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve trip");
        }
    };

    match collect_days(&client, link.trip_id).await {
        Ok(days) => HttpResponse::Ok().json(SharedTrip { trip, days }),
        Err(err) => {
            eprintln!("Failed to load days: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to load shared trip")
        }
    }
}

fn generate_slug() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

fn is_valid_slug(slug: &str) -> bool {
    let re = regex::Regex::new(r"^[a-z0-9]+$");
    re.unwrap().is_match(slug)
}
