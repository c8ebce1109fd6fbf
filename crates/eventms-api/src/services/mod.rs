// Services layer for business logic
// Services own validation, reference checks, and expansion, calling storage directly

pub mod event;
pub mod user;

pub use event::EventService;
pub use user::UserService;

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse a path or body identifier, rejecting malformed values before any
/// lookup happens.
pub(crate) fn parse_object_id(id: &str, entity: &'static str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidId(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_id_parses() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "user").unwrap(), id);
    }

    #[test]
    fn malformed_id_is_invalid_id_error() {
        let err = parse_object_id("definitely-not-hex", "event").unwrap_err();
        assert!(matches!(err, ApiError::InvalidId("event")));
    }
}
