mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

fn session_body(member_id: i64, activity: &str) -> serde_json::Value {
    json!({
        "member_id": member_id,
        "session_date": "2024-03-18",
        "session_time": "18:00",
        "activity": activity
    })
}

#[tokio::test]
async fn test_create_session_for_existing_member() {
    let app = TestApp::new();
    let member_id = app.create_member("Alice", 30).await;

    let (status, body) = app
        .post("/workout-sessions", session_body(member_id, "Yoga"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New workout session added successfully!");
    assert_eq!(
        body["data"],
        json!({
            "session_id": 1,
            "member_id": member_id,
            "session_date": "2024-03-18",
            "session_time": "18:00",
            "activity": "Yoga"
        })
    );
}

#[tokio::test]
async fn test_create_session_for_unknown_member_stores_nothing() {
    let app = TestApp::new();

    let (status, body) = app.post("/workout-sessions", session_body(42, "Yoga")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");

    let (_, sessions) = app.get("/workout-sessions").await;
    assert_eq!(sessions, json!([]));
}

#[tokio::test]
async fn test_session_for_deleted_member_is_rejected() {
    let app = TestApp::new();
    let member_id = app.create_member("Bob", 41).await;
    app.create_session(member_id, "2024-03-18", "Rowing").await;

    let (status, _) = app.delete(&format!("/member/{member_id}")).await;
    assert_eq!(status, StatusCode::OK);

    // Cascade removed the existing session
    let (_, sessions) = app.get("/workout-sessions").await;
    assert_eq!(sessions, json!([]));

    let (status, body) = app
        .post("/workout-sessions", session_body(member_id, "Rowing"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");
}

#[tokio::test]
async fn test_invalid_session_payload() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/workout-sessions",
            json!({
                "session_id": 3,
                "member_id": null,
                "session_date": "2024-13-01",
                "session_time": "",
                "activity": 7
            }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = &body["field_errors"];
    assert_eq!(fields["session_id"][0], "Unknown field.");
    assert_eq!(fields["member_id"][0], "Field may not be null.");
    assert_eq!(fields["session_date"][0], "Not a valid date.");
    assert_eq!(fields["session_time"][0], "Shorter than minimum length 1.");
    assert_eq!(fields["activity"][0], "Not a valid string.");
}

#[tokio::test]
async fn test_get_session_by_id() {
    let app = TestApp::new();
    let member_id = app.create_member("Carol", 28).await;
    let session_id = app.create_session(member_id, "2024-04-01", "Pilates").await;

    let (status, body) = app.get(&format!("/workout-session/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activity"], "Pilates");
    assert_eq!(body["session_date"], "2024-04-01");

    let (status, body) = app.get("/workout-session/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workout session not found");
}

#[tokio::test]
async fn test_update_session() {
    let app = TestApp::new();
    let first = app.create_member("Dan", 35).await;
    let second = app.create_member("Erin", 36).await;
    let session_id = app.create_session(first, "2024-04-01", "Boxing").await;

    let (status, body) = app
        .put(&format!("/workout-session/{session_id}"), session_body(second, "Swimming"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Workout session updated successfully!");
    assert_eq!(body["data"]["session_id"], session_id);
    assert_eq!(body["data"]["member_id"], second);
    assert_eq!(body["data"]["activity"], "Swimming");
}

#[tokio::test]
async fn test_update_session_not_found_cases() {
    let app = TestApp::new();
    let member_id = app.create_member("Finn", 22).await;
    let session_id = app.create_session(member_id, "2024-04-01", "Boxing").await;

    let (status, body) = app.put("/workout-session/999", session_body(member_id, "Boxing")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workout session not found");

    let (status, body) = app
        .put(&format!("/workout-session/{session_id}"), session_body(777, "Boxing"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");

    let (status, _) = app.put("/workout-session/999", json!({"activity": "Boxing"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_session() {
    let app = TestApp::new();
    let member_id = app.create_member("Gus", 60).await;
    let session_id = app.create_session(member_id, "2024-05-05", "Walking").await;

    let (status, body) = app.delete(&format!("/workout-session/{session_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Workout session successfully removed!"}));

    let (status, _) = app.delete(&format!("/workout-session/{session_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_by_member() {
    let app = TestApp::new();
    let alice = app.create_member("Alice", 30).await;
    let bob = app.create_member("Bob", 31).await;
    let first = app.create_session(alice, "2024-03-18", "Yoga").await;
    app.create_session(bob, "2024-03-18", "Rowing").await;
    let third = app.create_session(alice, "2024-03-19", "Spin").await;

    let (status, body) = app.get("/workout-sessions/by-member?member=Alice").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["session_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, third]);
}

#[tokio::test]
async fn test_sessions_by_member_edge_cases() {
    let app = TestApp::new();
    app.create_member("Idle", 44).await;

    let (status, body) = app.get("/workout-sessions/by-member?member=Idle").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = app.get("/workout-sessions/by-member?member=Nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Member not found");

    let (status, body) = app.get("/workout-sessions/by-member").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["member"][0], "Missing data for required field.");
}

#[tokio::test]
async fn test_repeated_member_uses_first_value() {
    let app = TestApp::new();
    let alice = app.create_member("Alice", 30).await;
    app.create_member("Bob", 35).await;
    app.create_session(alice, "2024-06-01", "Rowing").await;

    let (status, body) = app.get("/workout-sessions/by-member?member=Alice&member=Bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["activity"], "Rowing");

    let (status, body) = app.get("/workout-sessions/by-member?member=&member=Alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["member"][0], "Shorter than minimum length 1.");
}

#[tokio::test]
async fn test_list_sessions_in_id_order() {
    let app = TestApp::new();
    let member_id = app.create_member("Hana", 27).await;
    app.create_session(member_id, "2024-06-02", "Climbing").await;
    app.create_session(member_id, "2024-06-01", "Running").await;

    let (status, body) = app.get("/workout-sessions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["activity"], "Climbing");
    assert_eq!(body[1]["activity"], "Running");
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}
