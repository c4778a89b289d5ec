use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

mod config;
mod handlers;
mod middleware;
mod models;
mod services;

use config::Config;

async fn index(state: web::Data<models::AppState>) -> actix_web::Result<NamedFile> {
    let static_path = state.config.static_files_path.as_deref().unwrap_or("./static");
    Ok(NamedFile::open(format!("{}/index.html", static_path))?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().expect("Failed to load configuration");

    log::info!("Starting server at {}:{}", config.host, config.port);

    if let Some(ref path) = config.static_files_path {
        log::info!("Serving static files from: {}", path);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    log::info!("Database migrations completed");

    // Rate limiter for login (5 attempts per 15 minutes)
    let login_rate_limiter = Arc::new(middleware::RateLimiter::new(5, 15 * 60));

    let app_state = web::Data::new(models::AppState {
        db: pool,
        config: config.clone(),
        login_rate_limiter,
    });

    let static_files_path = config.static_files_path.clone();
    let cors_origins = config.cors_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
            .max_age(3600);

        if cors_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let mut app = App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure_routes);

        // Serve the built frontend if a path is configured
        if let Some(ref path) = static_files_path {
            app = app
                .service(Files::new("/assets", format!("{}/assets", path)))
                .default_service(web::route().to(index));
        }

        app
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
