// Persisted document shapes (internal, distinct from the public DTOs)

use chrono::{DateTime, Utc};
use eventms_core::EventFields;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// A user as stored in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    /// Argon2id hash of the password, never the raw value.
    pub password: String,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        photo_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name,
            email,
            password: password_hash,
            photo_url,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An event as stored in the `events` collection. Attendees are embedded
/// user references; `attendeeCount` is derived from them on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    /// Organizer name (free text).
    pub name: String,
    #[serde(rename = "userId")]
    pub user_id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub time: String,
    pub location: String,
    pub description: String,
    pub attendees: Vec<ObjectId>,
    #[serde(rename = "attendeeCount")]
    pub attendee_count: i64,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl EventDocument {
    pub fn new(owner: ObjectId, fields: EventFields) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            title: fields.title,
            name: fields.name,
            user_id: owner,
            date: fields.date,
            time: fields.time,
            location: fields.location,
            description: fields.description,
            attendees: Vec::new(),
            attendee_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Snapshot of the validated attributes, used to seed an update draft.
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            name: self.name.clone(),
            date: self.date,
            time: self.time.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
        }
    }

    /// Overwrite the validated attributes after an update merge.
    pub fn apply_fields(&mut self, fields: EventFields) {
        self.title = fields.title;
        self.name = fields.name;
        self.date = fields.date;
        self.time = fields.time;
        self.location = fields.location;
        self.description = fields.description;
    }

    /// Re-derive `attendeeCount` from the attendee list. Must be called in
    /// every write path that touches `attendees` so the count never drifts.
    pub fn recount_attendees(&mut self) {
        self.attendee_count = self.attendees.len() as i64;
    }
}
