// Event DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::user::UserRef;

/// An event with its owner and attendee references expanded.
/// Returned by the single-event operations (create, get, update, add-attendee).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Organizer name (free text, not a user reference).
    pub name: String,
    #[serde(rename = "userId")]
    pub owner: UserRef,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub description: String,
    pub attendees: Vec<UserRef>,
    #[serde(rename = "attendeeCount")]
    pub attendee_count: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// An event as returned by the list operations: owner expanded
/// (including `photoURL`), attendees left as raw id references.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub name: String,
    #[serde(rename = "userId")]
    pub owner: UserRef,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub description: String,
    pub attendees: Vec<String>,
    #[serde(rename = "attendeeCount")]
    pub attendee_count: i64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    /// Organizer name.
    pub name: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Request to update an event. Only fields present in the body overwrite
/// the stored values; the merged document is re-validated before save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full replacement of the attendee id list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<String>>,
}

/// Request to add a single attendee to an event.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddAttendeeRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}
