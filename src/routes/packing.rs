use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::packing::{PackingContent, PackingEdit, PackingList};
use crate::models::suggestion::GeneratePackingListRequest;
use crate::models::trip::Trip;
use crate::services::analytics::track_event;
use crate::services::packing::PackingListService;

/*
    POST /api/trips/{id}/packing-list
    Runs the rules engine over the trip and stores the result.
*/
pub async fn generate(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let db = client.database(DATABASE);
    let trips: mongodb::Collection<Trip> = db.collection("Trips");
    let packing_lists: mongodb::Collection<PackingList> = db.collection("PackingLists");

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

    let request = GeneratePackingListRequest {
        destination: trip.primary_destination.clone(),
        trip_type: trip.trip_type.clone(),
        duration_days: trip.duration_days().max(1) as u32,
        start_date: trip.start_date,
        end_date: trip.end_date,
    };
    let content = PackingListService::generate(&request);

    let curr_time = DateTime::now();
    let mut list = PackingList {
        id: None,
        trip_id,
        content,
        generated_by: "ai".to_string(),
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match packing_lists.insert_one(&list).await {
        Ok(result) => {
            list.id = result.inserted_id.as_object_id();
            track_event(
                &client,
                "packing_list_generate",
                Some(trip_id),
                Some(trip.owner_id),
                None,
            )
            .await;
            HttpResponse::Ok().json(list)
        }
        Err(err) => {
            eprintln!("Failed to insert packing list: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to save packing list")
        }
    }
}

/*
    GET /api/trips/{id}/packing-list
    Newest stored list for the trip.
*/
pub async fn get_latest(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let packing_lists: mongodb::Collection<PackingList> =
        client.database(DATABASE).collection("PackingLists");

    let trip_id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match packing_lists
        .find_one(doc! { "trip_id": trip_id })
        .sort(doc! { "created_at": -1 })
        .await
    {
        Ok(Some(list)) => HttpResponse::Ok().json(list),
        Ok(None) => HttpResponse::NotFound().body("No packing list found"),
        Err(err) => {
            eprintln!("Failed to retrieve packing list: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve packing list")
        }
    }
}

/*
    PUT /api/packing-lists/{id}
    Replaces the stored content wholesale.
*/
pub async fn update(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<PackingContent>,
) -> impl Responder {
    let client = data.into_inner();
    let packing_lists: mongodb::Collection<PackingList> =
        client.database(DATABASE).collection("PackingLists");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    save_content(&packing_lists, id, input.into_inner()).await
}

/*
    POST /api/packing-lists/{id}/edit
    Applies one edit operation to the stored content.
*/
pub async fn edit(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<PackingEdit>,
) -> impl Responder {
    let client = data.into_inner();
    let packing_lists: mongodb::Collection<PackingList> =
        client.database(DATABASE).collection("PackingLists");

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let mut list = match packing_lists.find_one(doc! { "_id": id }).await {
        Ok(Some(list)) => list,
        Ok(None) => return HttpResponse::NotFound().body("Packing list not found"),
        Err(err) => {
            eprintln!("Failed to retrieve packing list: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve packing list");
        }
    };

    match input.into_inner() {
        PackingEdit::AddItem { category, item } => list.content.add_item(&category, &item),
        PackingEdit::RemoveItem { category, index } => {
            if !list.content.remove_item(&category, index) {
                return HttpResponse::BadRequest().body("Unknown category or item index");
            }
        }
        PackingEdit::AddCategory { name } => list.content.add_category(&name),
    }

    save_content(&packing_lists, id, list.content).await
}

async fn save_content(
    packing_lists: &mongodb::Collection<PackingList>,
    id: ObjectId,
    content: PackingContent,
) -> HttpResponse {
    let content_bson = match mongodb::bson::to_bson(&content) {
        Ok(bson) => bson,
        Err(err) => {
            eprintln!("Failed to serialize packing content: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update packing list");
        }
    };

    let update = doc! {
        "$set": {
            "content": content_bson,
            "updated_at": DateTime::now(),
        }
    };

    match packing_lists.update_one(doc! { "_id": id }, update).await {
        Ok(result) if result.matched_count == 0 => {
            HttpResponse::NotFound().body("Packing list not found")
        }
        Ok(_) => match packing_lists.find_one(doc! { "_id": id }).await {
            Ok(Some(list)) => HttpResponse::Ok().json(list),
            Ok(None) => HttpResponse::NotFound().body("Packing list not found"),
            Err(err) => {
                eprintln!("Failed to reload packing list: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to update packing list")
            }
        },
        Err(err) => {
            eprintln!("Failed to update packing list: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update packing list")
        }
    }
}
