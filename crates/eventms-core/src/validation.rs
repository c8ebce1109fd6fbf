// Declarative constraint structs, evaluated before persistence.
//
// Drafts mirror the entity schemas with every field optional: a create request
// converts into a draft directly, an update merges the stored values with the
// provided overrides and re-validates the result. Blank strings are normalized
// to `None` so the `required` rules fire for them too.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::event::{CreateEventRequest, UpdateEventRequest};
use crate::user::CreateUserRequest;

/// 24-hour `HH:MM`, leading zero optional.
static TIME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("time format regex"));

/// Draft of a user record awaiting validation.
#[derive(Debug, Clone, Validate)]
pub struct UserDraft {
    #[validate(
        required(message = "Name is required"),
        length(max = 100, message = "Name cannot exceed 100 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Please enter a valid email address")
    )]
    pub email: Option<String>,
    #[validate(
        required(message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: Option<String>,
    pub photo_url: Option<String>,
}

/// User fields that passed validation, ready for hashing and persistence.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub photo_url: Option<String>,
}

impl From<CreateUserRequest> for UserDraft {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: normalize(req.name),
            email: normalize(req.email),
            password: req.password.filter(|p| !p.is_empty()),
            photo_url: normalize(req.photo_url),
        }
    }
}

impl UserDraft {
    /// Run the constraint set; on success hand back the unwrapped fields.
    pub fn into_validated(self) -> Result<NewUser, Vec<String>> {
        if let Err(errors) = self.validate() {
            return Err(error_messages(&errors));
        }
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) => Ok(NewUser {
                name,
                email,
                password,
                photo_url: self.photo_url,
            }),
            _ => Err(vec!["Validation failed".to_string()]),
        }
    }
}

/// Draft of an event's validated attributes. The owner reference and the
/// attendee list are checked separately by the service (they are lookups,
/// not field constraints).
#[derive(Debug, Clone, Validate)]
pub struct EventDraft {
    #[validate(
        required(message = "Title is required"),
        length(max = 200, message = "Title cannot exceed 200 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Organizer name is required"),
        length(max = 100, message = "Name cannot exceed 100 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Date is required"),
        custom(function = validate_future_date)
    )]
    pub date: Option<DateTime<Utc>>,
    #[validate(
        required(message = "Time is required"),
        regex(path = *TIME_FORMAT, message = "Please enter time in HH:MM format")
    )]
    pub time: Option<String>,
    #[validate(
        required(message = "Location is required"),
        length(max = 200, message = "Location cannot exceed 200 characters")
    )]
    pub location: Option<String>,
    #[validate(
        required(message = "Description is required"),
        length(max = 1000, message = "Description cannot exceed 1000 characters")
    )]
    pub description: Option<String>,
}

/// Event attributes that passed validation.
#[derive(Debug, Clone)]
pub struct EventFields {
    pub title: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub description: String,
}

impl From<CreateEventRequest> for EventDraft {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: normalize(req.title),
            name: normalize(req.name),
            date: req.date,
            time: normalize(req.time),
            location: normalize(req.location),
            description: normalize(req.description),
        }
    }
}

impl EventDraft {
    /// Draft seeded from an already-stored event, for update merging.
    pub fn from_existing(fields: EventFields) -> Self {
        Self {
            title: Some(fields.title),
            name: Some(fields.name),
            date: Some(fields.date),
            time: Some(fields.time),
            location: Some(fields.location),
            description: Some(fields.description),
        }
    }

    /// Overwrite the fields present in the update request.
    pub fn apply(&mut self, req: UpdateEventRequest) {
        if let Some(title) = normalize(req.title) {
            self.title = Some(title);
        }
        if let Some(name) = normalize(req.name) {
            self.name = Some(name);
        }
        if let Some(date) = req.date {
            self.date = Some(date);
        }
        if let Some(time) = normalize(req.time) {
            self.time = Some(time);
        }
        if let Some(location) = normalize(req.location) {
            self.location = Some(location);
        }
        if let Some(description) = normalize(req.description) {
            self.description = Some(description);
        }
    }

    pub fn into_validated(self) -> Result<EventFields, Vec<String>> {
        if let Err(errors) = self.validate() {
            return Err(error_messages(&errors));
        }
        match (
            self.title,
            self.name,
            self.date,
            self.time,
            self.location,
            self.description,
        ) {
            (
                Some(title),
                Some(name),
                Some(date),
                Some(time),
                Some(location),
                Some(description),
            ) => Ok(EventFields {
                title,
                name,
                date,
                time,
                location,
                description,
            }),
            _ => Err(vec!["Validation failed".to_string()]),
        }
    }
}

fn validate_future_date(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date < Utc::now() {
        let mut error = ValidationError::new("future_date");
        error.message = Some("Event date must be in the future".into());
        return Err(error);
    }
    Ok(())
}

/// Trim whitespace and treat blank strings as absent.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Flatten a `ValidationErrors` into the human-readable message list carried
/// by the error response body.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .collect()
}
