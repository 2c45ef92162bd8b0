//! Main entry point for the Taskdeck backend.
//!
//! This file initializes the Axum web server, sets up database connections,
//! and registers all API routes and middleware.
//! It orchestrates the application's startup and defines its overall structure.

use axum::{Extension, Router, response::Json, routing::get};
use backend::api;
use backend::api::common::ApiResponse;
use backend::auth;
use backend::config::Config;
use backend::database::Database;
use backend::utils::jwt::JwtUtils;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() {
    init();

    let config = Config::from_env().unwrap();
    let db = Database::new(&config).await.unwrap();
    db.migrate().await.unwrap();
    let pool = db.pool().clone();
    let jwt_utils = JwtUtils::new(&config);

    // Process-wide state is built once here and injected; no component looks
    // anything up globally after this point.
    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/users", auth::routes::auth_router())
        .nest("/lists", api::list::routes::list_router().await)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(pool))
                .layer(Extension(config.clone()))
                .layer(Extension(jwt_utils)),
        );

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();

    info!("Starting Taskdeck server on port {}", config.server_port);
    axum::serve(listener, app).await.unwrap();
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "Taskdeck Backend",
            "version": "0.1.0"
        }),
        "Welcome to Taskdeck API",
    ))
}
