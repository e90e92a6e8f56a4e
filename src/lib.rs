use actix_web::{http, web, App, HttpResponse, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use sqlx::SqlitePool;
use std::net::TcpListener;
use actix_cors::Cors;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod errors;
mod middleware;
pub mod db;
pub mod telemetry;
pub mod client;
pub mod chart;
pub mod flows;
use crate::routes::init_routes;
use crate::config::settings::{ApiKeySettings, CorsSettings};
use crate::errors::ErrorBody;
use crate::middleware::api_key::{ApiKeyMiddleware, API_KEY_HEADER};

pub fn run(
    listener: TcpListener,
    db_pool: SqlitePool,
    api_key_settings: ApiKeySettings,
    cors_settings: CorsSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);

    let server = HttpServer::new( move || {
        let cors = cors_settings.allowed_origins.iter().fold(
            Cors::default()
                .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                .allowed_headers(vec![
                    http::header::ACCEPT,
                    http::header::CONTENT_TYPE,
                    http::header::HeaderName::from_static(API_KEY_HEADER),
                ])
                .max_age(3600),
            |cors, origin| cors.allowed_origin(origin),
        );

        // Malformed bodies get the same `{error}` shape as every other failure
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            let body = ErrorBody { error: err.to_string() };
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest().json(body),
            )
            .into()
        });

        App::new()
            .wrap(ApiKeyMiddleware::new(api_key_settings.clone()))
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(db_pool_data.clone())
            .app_data(json_config)
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
