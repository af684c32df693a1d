use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::types::{Failure, Success, team::TeamResponse, user::LoginResponse};

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(engine)
}

async fn call(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, body).await
}

async fn app_with_team() -> Router {
    let app = test_app().await;
    let (status, _) = post(
        &app,
        "/addTeam",
        json!({"teamCode": "CHEESY", "teamNum": 254, "teamName": "Cheesy Poofs"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    app
}

async fn add_user(app: &Router, email: &str, name: &str, role: &str) -> StatusCode {
    call(
        app,
        Method::PUT,
        "/addUser",
        json!({
            "email": email,
            "name": name,
            "teamCode": "CHEESY",
            "Password": "hunter2",
            "Role": role,
        }),
    )
    .await
    .0
}

#[tokio::test]
async fn register_then_login() {
    let app = app_with_team().await;

    assert_eq!(
        add_user(&app, "ada@example.com", "Ada", "Scouter").await,
        StatusCode::OK
    );

    let (status, body) = post(
        &app,
        "/getUser",
        json!({"email": "ada@example.com", "Password": "hunter2"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let login: Success<LoginResponse> = serde_json::from_value(body).unwrap();
    assert!(login.success);
    assert_eq!(login.payload.data.team_code, "CHEESY");
    assert_eq!(login.payload.data.role.as_deref(), Some("Scouter"));
}

#[tokio::test]
async fn add_user_status_codes() {
    let app = app_with_team().await;

    let (status, body) = call(
        &app,
        Method::PUT,
        "/addUser",
        json!({"email": "ada@example.com", "name": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));

    assert_eq!(
        add_user(&app, "ada@example.com", "Ada", "Scouter").await,
        StatusCode::OK
    );
    assert_eq!(
        add_user(&app, "ada@example.com", "Someone", "Captain").await,
        StatusCode::CONFLICT
    );

    let (status, _) = call(
        &app,
        Method::PUT,
        "/addUser",
        json!({
            "email": "bob@example.com",
            "name": "Bob",
            "teamCode": "NOPE",
            "Password": "pw",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_password_is_401_without_hash() {
    let app = app_with_team().await;
    add_user(&app, "ada@example.com", "Ada", "Scouter").await;

    let (status, body) = post(
        &app,
        "/getUser",
        json!({"email": "ada@example.com", "Password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let failure: Failure = serde_json::from_value(body).unwrap();
    assert!(!failure.success);
    assert!(!failure.error.contains("$argon2"));

    let (status, body) = post(
        &app,
        "/getUser",
        json!({"email": "nobody@example.com", "Password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn reports_update_registered_team() {
    let app = app_with_team().await;

    for value in [2, 5] {
        let (status, body) = post(
            &app,
            "/addReport",
            json!({"TeamNumber": 254, "NumberOfDataSets": 1, "One": ["number", value]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], json!("added new dataset(s)"));
    }

    let (status, body) = post(&app, "/getStatsOfTeam", json!({"teamNum": "254"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["DataSetOne"], json!("7"));
    assert_eq!(body["DataSetTwo"], json!(""));

    let (_, body) = post(&app, "/getTeam", json!({"teamNum": 254})).await;
    let team: Success<TeamResponse> = serde_json::from_value(body).unwrap();
    assert!(team.payload.team.registered);
    assert_eq!(team.payload.team.data_sets.data_set_one.as_deref(), Some("7"));
}

#[tokio::test]
async fn reports_for_unknown_team_are_staged() {
    let app = test_app().await;

    let (status, _) = post(
        &app,
        "/addReport",
        json!({
            "TeamNumber": 1678,
            "NumberOfDataSets": 3,
            "One": ["text", "defense"],
            "Three": ["avg", 8],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/getTeam", json!({"teamNum": 1678})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["Registered"], json!(false));
    assert_eq!(body["team"]["DataSetOne"], json!("defense"));
    assert_eq!(body["team"]["DataSetTwo"], json!(null));
    assert_eq!(body["team"]["DataSetThree"], json!("4"));
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let app = test_app().await;

    let (status, _) = post(&app, "/getTeam", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post(&app, "/getTeam", json!({"teamNum": 9999})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));

    let (status, _) = post(&app, "/addReport", json!({"TeamNumber": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/addReport",
        json!({"TeamNumber": 1, "One": ["median", 1]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(
        &app,
        "/addTeam",
        json!({"teamCode": "CHEESY", "teamName": "Cheesy Poofs"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roster_endpoints() {
    let app = app_with_team().await;
    add_user(&app, "ada@example.com", "Ada", "Scouter").await;
    add_user(&app, "bob@example.com", "Bob", "Mentor").await;

    let (status, body) = post(
        &app,
        "/getAllMembersOfTeamThatAreScoutersAndCaptains",
        json!({"teamCode": "CHEESY"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["members"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["members"][0]["Email"], json!("ada@example.com"));

    let (status, body) = post(
        &app,
        "/updateMemberRole",
        json!({"email": "bob@example.com", "name": "Bob", "old": "Mentor", "new": "Captain"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(1));

    let (status, _) = post(
        &app,
        "/updateMemberName",
        json!({"old": "Nobody", "email": "bob@example.com", "new": "Robert"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/updateMemberTimeTable",
        json!({"Time": "10:30", "Date": "2026-03-14", "Team": "1678", "member": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &app,
        "/updateTimeTable",
        json!({"name": "Bob", "teamCode": "CHEESY", "timetable": {"Q1": "red"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post(
        &app,
        "/getAllMembersOfTeamThatAreScoutersAndCaptains",
        json!({"teamCode": "CHEESY"}),
    )
    .await;
    assert_eq!(body["members"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["members"][1]["TimeTable"], json!("{\"Q1\":\"red\"}"));

    let (status, _) = post(&app, "/updateMemberPass", json!({"name": "Ada"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_member_removes_namesakes() {
    let app = app_with_team().await;
    add_user(&app, "sam1@example.com", "Sam", "Scouter").await;
    add_user(&app, "sam2@example.com", "Sam", "Scouter").await;

    let (status, body) = post(&app, "/deleteMember", json!({"name": "Sam"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(2));

    let (status, _) = post(&app, "/deleteMember", json!({"name": "Sam"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/getTeam")
        .header(header::ORIGIN, "https://scouting.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn malformed_bodies_use_failure_envelope() {
    let app = app_with_team().await;

    for (uri, body) in [
        ("/addReport", json!({"TeamNumber": 254, "One": ["number"]})),
        ("/getTeam", json!("254")),
        ("/updateMemberRole", json!({"email": 5, "name": "Ada"})),
        ("/getUser", json!({"email": ["ada@example.com"], "Password": "pw"})),
    ] {
        let (status, body) = post(&app, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");

        let failure: Failure = serde_json::from_value(body).unwrap();
        assert!(!failure.success);
        assert!(failure.error.starts_with("Invalid JSON"), "{}", failure.error);
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/getTeam")
        .body(Body::from(r#"{"teamNum": 254}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn loosely_typed_numbers_are_accepted() {
    let app = app_with_team().await;
    add_user(&app, "ada@example.com", "Ada", "Scouter").await;

    let (status, body) = post(&app, "/getTeam", json!({"teamNum": 254.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["Team Code"], json!("CHEESY"));

    let (status, _) = post(
        &app,
        "/addReport",
        json!({
            "TeamNumber": "254",
            "NumberOfDataSets": "1",
            "One": ["number", 3],
            "Two": ["number", 4],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post(&app, "/getStatsOfTeam", json!({"teamNum": 254})).await;
    assert_eq!(body["DataSetOne"], json!("3"));
    assert_eq!(body["DataSetTwo"], json!(""));

    let (status, _) = post(
        &app,
        "/updateMemberTimeTable",
        json!({"Time": "10:30", "Date": "2026-03-14", "Team": 1678, "member": "Ada"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post(
        &app,
        "/getAllMembersOfTeamThatAreScoutersAndCaptains",
        json!({"teamCode": "CHEESY"}),
    )
    .await;
    let time_table: Value =
        serde_json::from_str(body["members"][0]["TimeTable"].as_str().unwrap()).unwrap();
    assert_eq!(time_table["Team"], json!("1678"));
    assert_eq!(time_table["Time"], json!("10:30"));
}

#[tokio::test]
async fn duplicate_team_registration_conflicts() {
    let app = app_with_team().await;

    let (status, body) = post(
        &app,
        "/addTeam",
        json!({"teamCode": "OTHER", "teamNum": 254, "teamName": "Impostors"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));

    let (status, _) = post(
        &app,
        "/addTeam",
        json!({"teamCode": "CHEESY", "teamNum": 971, "teamName": "Spartan Robotics"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn member_email_password_and_team_changes() {
    let app = app_with_team().await;
    add_user(&app, "ada@example.com", "Ada", "Scouter").await;
    add_user(&app, "bob@example.com", "Bob", "Scouter").await;

    let (status, _) = post(
        &app,
        "/updateMemberEmail",
        json!({"name": "Ada", "oldEmail": "ada@example.com", "new": "bob@example.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post(
        &app,
        "/updateMemberEmail",
        json!({"name": "Ada", "oldEmail": "ada@example.com", "new": "ada@scouting.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(1));

    let (status, _) = post(
        &app,
        "/updateMemberPass",
        json!({"name": "Ada", "email": "ada@scouting.org", "new": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &app,
        "/getUser",
        json!({"email": "ada@scouting.org", "Password": "hunter2"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(
        &app,
        "/addTeam",
        json!({"teamCode": "POOFS", "teamNum": "1678", "teamName": "Citrus Circuits"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &app,
        "/updateMemberTeam",
        json!({"old": "CHEESY", "new": "NOPE", "name": "Ada", "email": "ada@scouting.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/updateMemberTeam",
        json!({"old": "CHEESY", "new": "POOFS", "name": "Ada", "email": "ada@scouting.org"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &app,
        "/getUser",
        json!({"email": "ada@scouting.org", "Password": "s3cret"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let login: Success<LoginResponse> = serde_json::from_value(body).unwrap();
    assert_eq!(login.payload.data.team_code, "POOFS");
}
