// User service for business logic

use std::sync::Arc;

use eventms_core::{CreateUserRequest, LoginRequest, User, UserDraft};
use eventms_storage::{hash_password, is_duplicate_key_error, verify_password, Database};
use eventms_storage::models::UserDocument;

use crate::error::ApiError;
use crate::services::parse_object_id;

pub struct UserService {
    db: Arc<Database>,
}

impl UserService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Signup: validate, reject duplicate emails, hash, persist.
    pub async fn create(&self, req: CreateUserRequest) -> Result<User, ApiError> {
        let new_user = UserDraft::from(req)
            .into_validated()
            .map_err(ApiError::Validation)?;

        if self.db.get_user_by_email(&new_user.email).await?.is_some() {
            return Err(ApiError::duplicate("User already exists with this email"));
        }

        let hash = hash_password(&new_user.password)?;
        let user = UserDocument::new(new_user.name, new_user.email, hash, new_user.photo_url);

        // The unique index closes the lookup-then-insert race.
        let user = match self.db.create_user(user).await {
            Ok(user) => user,
            Err(e)
                if e.downcast_ref::<mongodb::error::Error>()
                    .is_some_and(is_duplicate_key_error) =>
            {
                return Err(ApiError::duplicate("User already exists with this email"));
            }
            Err(e) => return Err(ApiError::Internal(e)),
        };

        Ok(Self::doc_to_user(&user))
    }

    /// Login by email and password. The returned record never carries the
    /// password hash.
    pub async fn login(&self, req: LoginRequest) -> Result<User, ApiError> {
        let user = self
            .db
            .get_user_by_email(&req.email)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found with this email"))?;

        if !verify_password(&req.password, &user.password)? {
            return Err(ApiError::auth("Password doesn't match"));
        }

        Ok(Self::doc_to_user(&user))
    }

    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        let oid = parse_object_id(id, "user")?;
        let user = self
            .db
            .get_user(oid)
            .await?
            .ok_or_else(|| ApiError::not_found("User not found"))?;
        Ok(Self::doc_to_user(&user))
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let users = self.db.list_users().await?;
        Ok(users.iter().map(Self::doc_to_user).collect())
    }

    fn doc_to_user(doc: &UserDocument) -> User {
        User {
            id: doc.id.to_hex(),
            name: doc.name.clone(),
            email: doc.email.clone(),
            photo_url: doc.photo_url.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
