// Event service for business logic
//
// Reference expansion is an explicit fetch step after the primary read, and
// attendeeCount is recomputed in every write path that touches the roster.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use eventms_core::{
    AddAttendeeRequest, CreateEventRequest, Event, EventDraft, EventSummary, UpdateEventRequest,
    UserRef,
};
use eventms_storage::models::{EventDocument, UserDocument};
use eventms_storage::Database;
use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;
use crate::services::parse_object_id;

pub struct EventService {
    db: Arc<Database>,
}

impl EventService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create an event after resolving its owner and validating every field.
    /// Nothing is persisted when either step fails.
    pub async fn create(&self, req: CreateEventRequest) -> Result<Event, ApiError> {
        let owner = match req.user_id.as_deref() {
            Some(id) => {
                let oid = parse_object_id(id, "user")?;
                self.db.get_user(oid).await?
            }
            None => None,
        };
        let owner = owner.ok_or_else(|| ApiError::not_found("User not found"))?;

        let fields = EventDraft::from(req)
            .into_validated()
            .map_err(ApiError::Validation)?;

        let event = self
            .db
            .create_event(EventDocument::new(owner.id, fields))
            .await?;

        Ok(Self::to_event(event, &owner, Vec::new()))
    }

    pub async fn get(&self, id: &str) -> Result<Event, ApiError> {
        let oid = parse_object_id(id, "event")?;
        let event = self
            .db
            .get_event(oid)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;
        self.expand(event).await
    }

    /// All events in ascending date order, owners expanded.
    pub async fn list(&self) -> Result<Vec<EventSummary>, ApiError> {
        let events = self.db.list_events().await?;
        self.summarize(events).await
    }

    /// Events owned by the given user, ascending date order.
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<EventSummary>, ApiError> {
        let oid = parse_object_id(user_id, "user")?;
        let events = self.db.list_events_by_user(oid).await?;
        self.summarize(events).await
    }

    /// Partial update: only fields present in the request overwrite stored
    /// values, and the merged result is re-validated before save.
    pub async fn update(&self, id: &str, mut req: UpdateEventRequest) -> Result<Event, ApiError> {
        let oid = parse_object_id(id, "event")?;
        let mut event = self
            .db
            .get_event(oid)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;

        let attendees = match req.attendees.take() {
            Some(ids) => Some(
                ids.iter()
                    .map(|id| parse_object_id(id, "user"))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        let mut draft = EventDraft::from_existing(event.fields());
        draft.apply(req);
        let fields = draft.into_validated().map_err(ApiError::Validation)?;
        event.apply_fields(fields);

        if let Some(attendees) = attendees {
            event.attendees = attendees;
            event.recount_attendees();
        }

        let event = self.db.replace_event(event).await?;
        self.expand(event).await
    }

    /// Delete by id, returning the deleted id for the response body.
    pub async fn delete(&self, id: &str) -> Result<String, ApiError> {
        let oid = parse_object_id(id, "event")?;
        let deleted = self.db.delete_event(oid).await?;
        if !deleted {
            return Err(ApiError::not_found("Event not found"));
        }
        Ok(id.to_string())
    }

    /// Append a user to the roster, rejecting repeats, then recompute the
    /// derived count and persist.
    pub async fn add_attendee(
        &self,
        event_id: &str,
        req: AddAttendeeRequest,
    ) -> Result<Event, ApiError> {
        let user = match req.user_id.as_deref() {
            Some(id) => {
                let oid = parse_object_id(id, "user")?;
                self.db.get_user(oid).await?
            }
            None => None,
        };
        let user = user.ok_or_else(|| ApiError::not_found("User not found"))?;

        let oid = parse_object_id(event_id, "event")?;
        let mut event = self
            .db
            .get_event(oid)
            .await?
            .ok_or_else(|| ApiError::not_found("Event not found"))?;

        if event.attendees.contains(&user.id) {
            return Err(ApiError::duplicate("User is already an attendee"));
        }

        event.attendees.push(user.id);
        event.recount_attendees();

        let event = self.db.replace_event(event).await?;
        self.expand(event).await
    }

    /// Expansion step: swap the stored owner and attendee references for
    /// `{name, email}` subsets of the referenced users.
    async fn expand(&self, event: EventDocument) -> Result<Event, ApiError> {
        let owner = self
            .db
            .get_user(event.user_id)
            .await?
            .ok_or_else(|| ApiError::Internal(anyhow!("owner missing for event {}", event.id)))?;

        let attendee_docs = self.db.get_users_by_ids(&event.attendees).await?;
        let by_id: HashMap<ObjectId, &UserDocument> =
            attendee_docs.iter().map(|d| (d.id, d)).collect();

        // Preserve roster order; a dangling reference is simply skipped.
        let attendees = event
            .attendees
            .iter()
            .filter_map(|id| by_id.get(id))
            .map(|doc| Self::user_ref(doc))
            .collect();

        Ok(Self::to_event(event, &owner, attendees))
    }

    /// List-shape expansion: one batch owner lookup for the whole page,
    /// attendees left as raw ids.
    async fn summarize(&self, events: Vec<EventDocument>) -> Result<Vec<EventSummary>, ApiError> {
        let mut seen = HashSet::new();
        let owner_ids: Vec<ObjectId> = events
            .iter()
            .map(|e| e.user_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let owners = self.db.get_users_by_ids(&owner_ids).await?;
        let by_id: HashMap<ObjectId, &UserDocument> = owners.iter().map(|d| (d.id, d)).collect();

        events
            .into_iter()
            .map(|event| {
                let owner = by_id.get(&event.user_id).ok_or_else(|| {
                    ApiError::Internal(anyhow!("owner missing for event {}", event.id))
                })?;
                Ok(Self::to_summary(event, owner))
            })
            .collect()
    }

    fn to_event(event: EventDocument, owner: &UserDocument, attendees: Vec<UserRef>) -> Event {
        Event {
            id: event.id.to_hex(),
            title: event.title,
            name: event.name,
            owner: Self::user_ref(owner),
            date: event.date,
            time: event.time,
            location: event.location,
            description: event.description,
            attendees,
            attendee_count: event.attendee_count,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }

    fn to_summary(event: EventDocument, owner: &UserDocument) -> EventSummary {
        EventSummary {
            id: event.id.to_hex(),
            title: event.title,
            name: event.name,
            owner: Self::user_ref_with_photo(owner),
            date: event.date,
            time: event.time,
            location: event.location,
            description: event.description,
            attendees: event.attendees.iter().map(|id| id.to_hex()).collect(),
            attendee_count: event.attendee_count,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }

    fn user_ref(doc: &UserDocument) -> UserRef {
        UserRef {
            id: doc.id.to_hex(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            photo_url: None,
        }
    }

    fn user_ref_with_photo(doc: &UserDocument) -> UserRef {
        UserRef {
            id: doc.id.to_hex(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            photo_url: doc.photo_url.clone(),
        }
    }
}
