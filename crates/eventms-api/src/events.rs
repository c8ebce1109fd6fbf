// Event CRUD and attendee HTTP routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use eventms_core::{
    AddAttendeeRequest, CreateEventRequest, Event, EventSummary, UpdateEventRequest,
};
use eventms_storage::Database;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::services::EventService;

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            service: Arc::new(EventService::new(db)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/events", post(create_event).get(list_events))
        .route("/api/events/userid/{userid}", get(list_events_by_user))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route("/api/events/{id}/attendees", post(add_attendee))
        .with_state(state)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    pub message: String,
    pub event: Event,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    pub message: String,
    pub count: usize,
    pub events: Vec<EventSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateEventResponse {
    pub success: bool,
    pub message: String,
    pub event: Event,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteEventResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// POST /api/events - Create a new event
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation error or malformed owner ID"),
        (status = 404, description = "Owning user not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateEventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let event = state.service.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(EventResponse {
            message: "Event created successfully".to_string(),
            event,
        }),
    ))
}

/// GET /api/events - List all events in ascending date order
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List of events", body = EventListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events(State(state): State<AppState>) -> ApiResult<Json<EventListResponse>> {
    let events = state.service.list().await?;
    Ok(Json(EventListResponse {
        message: "Events retrieved successfully".to_string(),
        count: events.len(),
        events,
    }))
}

/// GET /api/events/userid/{userid} - List events owned by a user
#[utoipa::path(
    get,
    path = "/api/events/userid/{userid}",
    params(
        ("userid" = String, Path, description = "Owning user ID")
    ),
    responses(
        (status = 200, description = "List of events for the user", body = EventListResponse),
        (status = 400, description = "Malformed user ID"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events_by_user(
    State(state): State<AppState>,
    Path(userid): Path<String>,
) -> ApiResult<Json<EventListResponse>> {
    let events = state.service.list_by_user(&userid).await?;
    Ok(Json(EventListResponse {
        message: "Events retrieved successfully".to_string(),
        count: events.len(),
        events,
    }))
}

/// GET /api/events/{id} - Get event by ID
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 400, description = "Malformed event ID"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<EventResponse>> {
    let event = state.service.get(&id).await?;
    Ok(Json(EventResponse {
        message: "Event retrieved successfully".to_string(),
        event,
    }))
}

/// PUT /api/events/{id} - Update event fields present in the body
#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated successfully", body = UpdateEventResponse),
        (status = 400, description = "Validation error or malformed ID"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateEventRequest>,
) -> ApiResult<Json<UpdateEventResponse>> {
    let event = state.service.update(&id, req).await?;
    Ok(Json(UpdateEventResponse {
        success: true,
        message: "Event updated successfully".to_string(),
        event,
    }))
}

/// DELETE /api/events/{id} - Delete event
#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted successfully", body = DeleteEventResponse),
        (status = 400, description = "Malformed event ID"),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteEventResponse>> {
    let event_id = state.service.delete(&id).await?;
    Ok(Json(DeleteEventResponse {
        success: true,
        message: "Event deleted successfully".to_string(),
        event_id,
    }))
}

/// POST /api/events/{id}/attendees - Add an attendee to an event
#[utoipa::path(
    post,
    path = "/api/events/{id}/attendees",
    params(
        ("id" = String, Path, description = "Event ID")
    ),
    request_body = AddAttendeeRequest,
    responses(
        (status = 200, description = "Attendee added successfully", body = EventResponse),
        (status = 400, description = "User is already an attendee or malformed ID"),
        (status = 404, description = "User or event not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn add_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddAttendeeRequest>,
) -> ApiResult<Json<EventResponse>> {
    let event = state.service.add_attendee(&id, req).await?;
    Ok(Json(EventResponse {
        message: "Attendee added successfully".to_string(),
        event,
    }))
}
