// Eventms API server
// Decision: single process, one MongoDB client established at startup, fatal exit if unreachable

mod error;
mod events;
mod services;
mod users;

use anyhow::{Context, Result};
use axum::{http::StatusCode, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use eventms_core::{
    AddAttendeeRequest, CreateEventRequest, CreateUserRequest, Event, EventSummary, LoginRequest,
    UpdateEventRequest, User, UserRef,
};
use eventms_storage::Database;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Serialize)]
struct HealthResponse {
    message: &'static str,
    timestamp: DateTime<Utc>,
}

/// GET / - health check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Eventms API server is running!",
        timestamp: Utc::now(),
    })
}

/// Fallback for unmatched routes
async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        users::create_user,
        users::login,
        users::get_user,
        users::list_users,
        events::create_event,
        events::list_events,
        events::list_events_by_user,
        events::get_event,
        events::update_event,
        events::delete_event,
        events::add_attendee,
    ),
    components(
        schemas(
            User, UserRef,
            CreateUserRequest, LoginRequest,
            Event, EventSummary,
            CreateEventRequest, UpdateEventRequest, AddAttendeeRequest,
            users::UserResponse, users::UserListResponse, users::LoginResponse,
            events::EventResponse, events::EventListResponse,
            events::UpdateEventResponse, events::DeleteEventResponse,
        )
    ),
    tags(
        (name = "users", description = "User signup, login, and lookup endpoints"),
        (name = "events", description = "Event management and attendee endpoints")
    ),
    info(
        title = "Eventms API",
        version = "0.1.0",
        description = "API for managing events, users, and attendee rosters",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventms_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    tracing::info!("eventms-api starting...");

    // Initialize database
    let mongodb_uri =
        std::env::var("MONGODB_URI").context("MONGODB_URI environment variable required")?;
    let db = Database::from_url(&mongodb_uri)
        .await
        .context("Failed to connect to database")?;
    db.ensure_indexes()
        .await
        .context("Failed to create database indexes")?;
    tracing::info!("Connected to database");

    // Create module-specific states
    let db = Arc::new(db);
    let users_state = users::AppState::new(db.clone());
    let events_state = events::AppState::new(db.clone());

    let app = build_router(users_state, events_state);

    // Start server
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Assemble the full router (extracted for testing)
fn build_router(users_state: users::AppState, events_state: events::AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .merge(users::routes(users_state))
        .merge(events::routes(events_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
