mod common;

use axum::http::StatusCode;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_list_skills_ordered_by_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let user = factory.create_user().await;

    factory.create_skill().await;
    factory.create_skill().await;

    let response = app
        .server
        .get("/api/skills")
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();

    assert!(names.len() >= 2);
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn test_get_skill_by_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let user = factory.create_user().await;
    let skill = factory.create_skill().await;

    let response = app
        .server
        .get(&format!("/api/skills/{}", skill.name))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), skill.id.to_string());
    assert_eq!(body["name"].as_str().unwrap(), skill.name);
}

#[tokio::test]
async fn test_get_skill_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let user = factory.create_user().await;

    let response = app
        .server
        .get(&format!("/api/skills/no-such-skill-{}", Uuid::new_v4()))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_skills_require_authentication() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/skills").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
