use actix_web::{web, HttpResponse, Responder};
use mongodb::bson::{doc, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DATABASE;
use crate::models::user::User;

const DEMO_EMAIL: &str = "demo@smarttrip.com";
const DEMO_NAME: &str = "Demo User";

/*
    /api/users/bootstrap
    Returns the first stored user, creating the demo user on first run.
*/
pub async fn bootstrap(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<User> = client.database(DATABASE).collection("Users");

    match collection.find_one(doc! {}).await {
        Ok(Some(user)) => HttpResponse::Ok().json(user),
        Ok(None) => {
            let mut user = User {
                id: None,
                email: DEMO_EMAIL.to_string(),
                name: DEMO_NAME.to_string(),
                created_at: Some(DateTime::now()),
            };

            match collection.insert_one(&user).await {
                Ok(result) => {
                    user.id = result.inserted_id.as_object_id();
                    HttpResponse::Ok().json(user)
                }
                Err(err) => {
                    eprintln!("Failed to create demo user: {:?}", err);
                    HttpResponse::InternalServerError().body("Failed to create user")
                }
            }
        }
        Err(err) => {
            eprintln!("Failed to look up users: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to look up users")
        }
    }
}
