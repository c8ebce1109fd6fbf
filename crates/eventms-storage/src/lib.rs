// MongoDB storage layer
//
// This crate owns the database handle, the persisted document shapes, and
// password hashing. Reference expansion is NOT done here; services perform
// the follow-up lookups explicitly.

pub mod models;
pub mod password;
pub mod repositories;

pub use models::{EventDocument, UserDocument};
pub use password::{hash_password, verify_password};
pub use repositories::{is_duplicate_key_error, Database};
