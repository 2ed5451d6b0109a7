use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, Responder};
use std::sync::Arc;

use smarttrip_api::db::mongo::create_mongo_client;

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = create_mongo_client(&mongo_uri).await;

        Self { client }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(actix_web::middleware::Compat::new(Logger::default()))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .service(web::scope("/users").route("/bootstrap", web::post().to(bootstrap)))
                    .service(
                        web::scope("/trips")
                            .route("", web::post().to(create_trip))
                            .route("", web::get().to(list_trips))
                            .route("/{id}", web::get().to(not_found))
                            .route("/{id}", web::delete().to(not_found))
                            .route("/{id}/days", web::post().to(not_found))
                            .route("/{id}/days", web::get().to(empty_array))
                            .route("/{id}/suggestions/apply", web::post().to(apply_suggestions))
                            .route("/{id}/packing-list", web::post().to(not_found))
                            .route("/{id}/packing-list", web::get().to(not_found))
                            .route("/{id}/share", web::post().to(not_found)),
                    )
                    .service(
                        web::scope("/days").route("/{id}/activities", web::post().to(not_found)),
                    )
                    .service(
                        web::scope("/activities")
                            .route("/{id}", web::put().to(not_found))
                            .route("/{id}", web::delete().to(not_found)),
                    )
                    .service(
                        web::scope("/suggestions")
                            .route("/activities", web::post().to(generate_suggestions)),
                    )
                    .service(
                        web::scope("/packing-lists")
                            .route("/{id}", web::put().to(not_found))
                            .route("/{id}/edit", web::post().to(not_found)),
                    )
                    .service(web::scope("/share").route("/{slug}", web::get().to(not_found))),
            )
    }
}

// Mock handler functions for testing the route surface without a database.
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn bootstrap() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "email": "demo@smarttrip.com",
        "name": "Demo User"
    }))
}

async fn create_trip() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "title": "Test Trip",
        "trip_type": "Leisure"
    }))
}

async fn list_trips() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn generate_suggestions() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn apply_suggestions() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"inserted": 0}))
}

async fn empty_array() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!([]))
}

async fn not_found() -> impl Responder {
    HttpResponse::NotFound().json(serde_json::json!({"error": "Not found"}))
}
