// Repository layer for database operations
//
// One method per query. All writes are single-document and rely on the
// store's native atomicity; there is no cross-document coordination.

use anyhow::Result;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};

use crate::models::{EventDocument, UserDocument};

/// Database name used when the connection string does not carry one.
const DEFAULT_DATABASE: &str = "eventms";

#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    pub fn new(db: mongodb::Database) -> Self {
        Self { db }
    }

    /// Create a database connection from a MongoDB connection string and
    /// verify it with a ping. The target database is taken from the URI.
    pub async fn from_url(uri: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(Self { db })
    }

    /// Create the unique email index. Backstops the pre-insert duplicate
    /// check so a race cannot register the same email twice.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let email_unique = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users().create_index(email_unique, None).await?;
        tracing::debug!("unique email index ensured on users");
        Ok(())
    }

    fn users(&self) -> Collection<UserDocument> {
        self.db.collection("users")
    }

    fn events(&self) -> Collection<EventDocument> {
        self.db.collection("events")
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, user: UserDocument) -> Result<UserDocument> {
        self.users().insert_one(&user, None).await?;
        Ok(user)
    }

    pub async fn get_user(&self, id: ObjectId) -> Result<Option<UserDocument>> {
        let user = self.users().find_one(doc! { "_id": id }, None).await?;
        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserDocument>> {
        let user = self.users().find_one(doc! { "email": email }, None).await?;
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<UserDocument>> {
        let cursor = self.users().find(doc! {}, None).await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }

    /// Batch lookup for reference expansion.
    pub async fn get_users_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<UserDocument>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self
            .users()
            .find(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, event: EventDocument) -> Result<EventDocument> {
        self.events().insert_one(&event, None).await?;
        Ok(event)
    }

    pub async fn get_event(&self, id: ObjectId) -> Result<Option<EventDocument>> {
        let event = self.events().find_one(doc! { "_id": id }, None).await?;
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<EventDocument>> {
        let options = FindOptions::builder().sort(doc! { "date": 1 }).build();
        let cursor = self.events().find(doc! {}, options).await?;
        let events = cursor.try_collect().await?;
        Ok(events)
    }

    pub async fn list_events_by_user(&self, user_id: ObjectId) -> Result<Vec<EventDocument>> {
        let options = FindOptions::builder().sort(doc! { "date": 1 }).build();
        let cursor = self
            .events()
            .find(doc! { "userId": user_id }, options)
            .await?;
        let events = cursor.try_collect().await?;
        Ok(events)
    }

    /// Persist a mutated event as a whole-document write, bumping
    /// `updatedAt`. Callers recompute `attendeeCount` before this.
    pub async fn replace_event(&self, mut event: EventDocument) -> Result<EventDocument> {
        event.updated_at = Utc::now();
        self.events()
            .replace_one(doc! { "_id": event.id }, &event, None)
            .await?;
        Ok(event)
    }

    pub async fn delete_event(&self, id: ObjectId) -> Result<bool> {
        let result = self.events().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count > 0)
    }
}

/// True when the error is a MongoDB unique-index violation (code 11000).
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we))
            if we.code == 11000
    )
}
