// Integration tests for the Eventms API
// Run with a server and database up: cargo test --test integration_test -- --ignored

use chrono::{Duration, Utc};
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};

const API_BASE_URL: &str = "http://localhost:5000";

fn unique_email(tag: &str) -> String {
    format!("{tag}+{}@example.com", ObjectId::new().to_hex())
}

#[tokio::test]
#[ignore] // Run with: cargo test --test integration_test -- --ignored
async fn test_full_event_workflow() {
    let client = reqwest::Client::new();

    // Step 1: Create a user
    let email = unique_email("organizer");
    let create_user_response = client
        .post(format!("{API_BASE_URL}/api/users"))
        .json(&json!({
            "name": "Ada Lovelace",
            "email": email,
            "password": "secret1",
            "photoURL": "https://example.com/ada.png"
        }))
        .send()
        .await
        .expect("Failed to create user");

    assert_eq!(create_user_response.status(), 201);
    let body: Value = create_user_response.json().await.expect("user body");
    assert_eq!(body["message"], "User created successfully");
    let user = &body["user"];
    assert_eq!(user["email"], email.as_str());
    assert!(
        user.get("password").is_none(),
        "password must never be serialized"
    );
    let user_id = user["id"].as_str().expect("user id").to_string();

    // Step 2: Duplicate email is rejected without creating a second record
    let duplicate_response = client
        .post(format!("{API_BASE_URL}/api/users"))
        .json(&json!({
            "name": "Imposter",
            "email": email,
            "password": "secret2"
        }))
        .send()
        .await
        .expect("Failed to send duplicate signup");
    assert_eq!(duplicate_response.status(), 400);
    let body: Value = duplicate_response.json().await.expect("duplicate body");
    assert_eq!(body["error"], "User already exists with this email");

    // Step 3: Login succeeds and the response carries no credential material
    let login_response = client
        .post(format!("{API_BASE_URL}/api/users/login"))
        .json(&json!({ "email": email, "password": "secret1" }))
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(login_response.status(), 200);
    let body: Value = login_response.json().await.expect("login body");
    assert_eq!(body["success"], true);
    assert!(body["user"].get("password").is_none());

    // Wrong password is a 401
    let bad_login = client
        .post(format!("{API_BASE_URL}/api/users/login"))
        .json(&json!({ "email": email, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to send bad login");
    assert_eq!(bad_login.status(), 401);

    // Step 4: Create an event owned by the user
    let future_date = (Utc::now() + Duration::days(30)).to_rfc3339();
    let create_event_response = client
        .post(format!("{API_BASE_URL}/api/events"))
        .json(&json!({
            "title": "Analytical Engines Meetup",
            "name": "Ada Lovelace",
            "userId": user_id,
            "date": future_date,
            "time": "18:30",
            "location": "London",
            "description": "Monthly gathering"
        }))
        .send()
        .await
        .expect("Failed to create event");
    assert_eq!(create_event_response.status(), 201);
    let body: Value = create_event_response.json().await.expect("event body");
    let event = &body["event"];
    assert_eq!(event["attendeeCount"], 0);
    assert_eq!(event["userId"]["email"], email.as_str());
    let event_id = event["id"].as_str().expect("event id").to_string();

    // Past date always fails validation
    let past_date = (Utc::now() - Duration::days(1)).to_rfc3339();
    let past_event = client
        .post(format!("{API_BASE_URL}/api/events"))
        .json(&json!({
            "title": "Yesterday",
            "name": "Ada Lovelace",
            "userId": user_id,
            "date": past_date,
            "time": "18:30",
            "location": "London",
            "description": "Too late"
        }))
        .send()
        .await
        .expect("Failed to send past event");
    assert_eq!(past_event.status(), 400);
    let body: Value = past_event.json().await.expect("past event body");
    assert_eq!(body["error"], "Validation Error");

    // Unknown owner id fails with 404 and persists nothing
    let orphan_event = client
        .post(format!("{API_BASE_URL}/api/events"))
        .json(&json!({
            "title": "Orphan",
            "name": "Nobody",
            "userId": ObjectId::new().to_hex(),
            "date": future_date,
            "time": "18:30",
            "location": "Nowhere",
            "description": "No owner"
        }))
        .send()
        .await
        .expect("Failed to send orphan event");
    assert_eq!(orphan_event.status(), 404);

    // Step 5: Get the event, owner expanded
    let get_response = client
        .get(format!("{API_BASE_URL}/api/events/{event_id}"))
        .send()
        .await
        .expect("Failed to get event");
    assert_eq!(get_response.status(), 200);
    let body: Value = get_response.json().await.expect("get body");
    assert_eq!(body["event"]["userId"]["name"], "Ada Lovelace");
    assert_eq!(body["event"]["userId"]["email"], email.as_str());

    // Step 6: Add the user as an attendee
    let add_response = client
        .post(format!("{API_BASE_URL}/api/events/{event_id}/attendees"))
        .json(&json!({ "userId": user_id }))
        .send()
        .await
        .expect("Failed to add attendee");
    assert_eq!(add_response.status(), 200);
    let body: Value = add_response.json().await.expect("attendee body");
    assert_eq!(body["message"], "Attendee added successfully");
    assert_eq!(body["event"]["attendeeCount"], 1);
    assert_eq!(body["event"]["attendees"][0]["email"], email.as_str());

    // Step 7: Adding the same attendee twice is rejected
    let repeat_response = client
        .post(format!("{API_BASE_URL}/api/events/{event_id}/attendees"))
        .json(&json!({ "userId": user_id }))
        .send()
        .await
        .expect("Failed to repeat attendee");
    assert_eq!(repeat_response.status(), 400);
    let body: Value = repeat_response.json().await.expect("repeat body");
    assert_eq!(body["error"], "User is already an attendee");

    // Roster unchanged
    let get_again: Value = client
        .get(format!("{API_BASE_URL}/api/events/{event_id}"))
        .send()
        .await
        .expect("Failed to re-get event")
        .json()
        .await
        .expect("re-get body");
    assert_eq!(get_again["event"]["attendeeCount"], 1);

    // Step 8: Partial update overwrites only the provided fields
    let update_response = client
        .put(format!("{API_BASE_URL}/api/events/{event_id}"))
        .json(&json!({ "location": "Cambridge" }))
        .send()
        .await
        .expect("Failed to update event");
    assert_eq!(update_response.status(), 200);
    let body: Value = update_response.json().await.expect("update body");
    assert_eq!(body["event"]["location"], "Cambridge");
    assert_eq!(body["event"]["title"], "Analytical Engines Meetup");
    assert_eq!(body["event"]["attendeeCount"], 1);

    // Step 9: Listing returns events in non-decreasing date order
    let list_response = client
        .get(format!("{API_BASE_URL}/api/events"))
        .send()
        .await
        .expect("Failed to list events");
    assert_eq!(list_response.status(), 200);
    let body: Value = list_response.json().await.expect("list body");
    let events = body["events"].as_array().expect("events array");
    let dates: Vec<chrono::DateTime<chrono::FixedOffset>> = events
        .iter()
        .map(|e| {
            chrono::DateTime::parse_from_rfc3339(e["date"].as_str().expect("date"))
                .expect("rfc3339 date")
        })
        .collect();
    assert!(
        dates.windows(2).all(|w| w[0] <= w[1]),
        "events must be date-ascending"
    );

    // Step 10: Events-by-owner listing contains the event
    let by_user: Value = client
        .get(format!("{API_BASE_URL}/api/events/userid/{user_id}"))
        .send()
        .await
        .expect("Failed to list by user")
        .json()
        .await
        .expect("by-user body");
    assert!(by_user["events"]
        .as_array()
        .expect("events array")
        .iter()
        .any(|e| e["id"] == event_id.as_str()));

    // Step 11: Delete the event
    let delete_response = client
        .delete(format!("{API_BASE_URL}/api/events/{event_id}"))
        .send()
        .await
        .expect("Failed to delete event");
    assert_eq!(delete_response.status(), 200);
    let body: Value = delete_response.json().await.expect("delete body");
    assert_eq!(body["eventId"], event_id.as_str());

    let gone = client
        .get(format!("{API_BASE_URL}/api/events/{event_id}"))
        .send()
        .await
        .expect("Failed to re-get deleted event");
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_malformed_ids_are_rejected_not_500() {
    let client = reqwest::Client::new();

    for path in [
        format!("{API_BASE_URL}/api/users/not-a-valid-id"),
        format!("{API_BASE_URL}/api/events/not-a-valid-id"),
        format!("{API_BASE_URL}/api/events/userid/not-a-valid-id"),
    ] {
        let response = client.get(&path).send().await.expect("request failed");
        assert_eq!(response.status(), 400, "expected 400 for {path}");
        let body: Value = response.json().await.expect("error body");
        assert!(body["error"]
            .as_str()
            .expect("error string")
            .contains("ID format"));
    }
}

#[tokio::test]
#[ignore]
async fn test_unknown_route_and_health() {
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{API_BASE_URL}/"))
        .send()
        .await
        .expect("health request failed")
        .json()
        .await
        .expect("health body");
    assert!(health["message"].as_str().is_some());
    assert!(health["timestamp"].as_str().is_some());

    let missing = client
        .get(format!("{API_BASE_URL}/api/nope"))
        .send()
        .await
        .expect("fallback request failed");
    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.expect("fallback body");
    assert_eq!(body["error"], "Route not found");
}
