use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use smarttrip_api::{db, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/users")
                            .route("/bootstrap", web::post().to(routes::user::bootstrap)),
                    )
                    .service(
                        web::scope("/trips")
                            .route("", web::post().to(routes::trip::create))
                            .route("", web::get().to(routes::trip::get_all))
                            .route("/{id}", web::get().to(routes::trip::get_by_id))
                            .route("/{id}", web::delete().to(routes::trip::delete))
                            .route("/{id}/days", web::post().to(routes::day::generate))
                            .route("/{id}/days", web::get().to(routes::day::get_days))
                            .route(
                                "/{id}/suggestions/apply",
                                web::post().to(routes::suggestion::apply),
                            )
                            .route(
                                "/{id}/packing-list",
                                web::post().to(routes::packing::generate),
                            )
                            .route(
                                "/{id}/packing-list",
                                web::get().to(routes::packing::get_latest),
                            )
                            .route("/{id}/share", web::post().to(routes::share::create)),
                    )
                    .service(
                        web::scope("/days")
                            .route("/{id}/activities", web::post().to(routes::activity::create)),
                    )
                    .service(
                        web::scope("/activities")
                            .route("/{id}", web::put().to(routes::activity::update))
                            .route("/{id}", web::delete().to(routes::activity::delete)),
                    )
                    .service(
                        web::scope("/suggestions")
                            .route("/activities", web::post().to(routes::suggestion::generate)),
                    )
                    .service(
                        web::scope("/packing-lists")
                            .route("/{id}", web::put().to(routes::packing::update))
                            .route("/{id}/edit", web::post().to(routes::packing::edit)),
                    )
                    .service(
                        web::scope("/share")
                            .route("/{slug}", web::get().to(routes::share::get_by_slug)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
