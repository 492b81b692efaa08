use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use travelai_api::{db, middleware, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    log::info!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    log::info!("Starting HTTP server...");

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
            .route("/health", web::get().to(|| async { "OK" }))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(routes::health::health_check))
                    // Public routes
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::signup))
                            .route("/signin", web::post().to(routes::account::signin))
                            .service(
                                web::scope("").wrap(middleware::auth::AuthMiddleware).route(
                                    "/session",
                                    web::get().to(routes::account::user_session),
                                ),
                            ),
                    )
                    .service(
                        web::scope("/ai")
                            .route("/chat", web::post().to(routes::ai::chat))
                            .route("/itinerary", web::post().to(routes::ai::generate_itinerary))
                            .route("/budget", web::post().to(routes::ai::validate_budget))
                            .route("/gems", web::post().to(routes::ai::hidden_gems))
                            .route("/translate", web::post().to(routes::ai::translate)),
                    )
                    // Protected routes
                    .service(
                        web::scope("")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/knowledge/seed", web::post().to(routes::knowledge::seed))
                            .route("/account", web::get().to(routes::account::get_profile))
                            .route("/account", web::put().to(routes::account::update_profile))
                            .service(
                                web::scope("/trips")
                                    .route("", web::post().to(routes::trip::create))
                                    .route("", web::get().to(routes::trip::get_all))
                                    .route("/{id}", web::get().to(routes::trip::get_by_id))
                                    .route("/{id}", web::put().to(routes::trip::update))
                                    .route("/{id}", web::delete().to(routes::trip::delete))
                                    .route("/{id}/days", web::put().to(routes::trip::update_days))
                                    .route(
                                        "/{id}/expenses",
                                        web::post().to(routes::expense::add),
                                    )
                                    .route(
                                        "/{id}/expenses",
                                        web::get().to(routes::expense::get_for_trip),
                                    ),
                            )
                            .route("/expenses/{id}", web::delete().to(routes::expense::delete))
                            .service(
                                web::scope("/bookings")
                                    .route("", web::post().to(routes::booking::create))
                                    .route("", web::get().to(routes::booking::get_all))
                                    .route(
                                        "/{id}/status",
                                        web::put().to(routes::booking::update_status),
                                    )
                                    .route("/{id}", web::delete().to(routes::booking::delete)),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
