mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_create_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "title": "Web application development"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(
        body["title"].as_str().unwrap(),
        "Web application development"
    );
    assert!(body["id"].as_str().is_some());
    assert_eq!(
        body["creator_id"].as_str().unwrap(),
        admin.user_id.to_string()
    );
    assert_eq!(body["skills"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_project_with_skills() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let skill_a = factory.create_skill().await;
    let skill_b = factory.create_skill().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "title": "Project with skills",
            "description": "Needs two specific skills",
            "price": 500000,
            "skill_names": [skill_a.name, skill_b.name]
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["skills"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_project_unknown_skill() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "title": "Project with a bogus skill",
            "skill_names": [format!("no-such-skill-{}", Uuid::new_v4())]
        }))
        .await;

    // Skills are referenced by name and must exist ahead of time
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_project_requires_admin() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let user = factory.create_user().await;

    let response = app
        .server
        .post("/api/projects")
        .add_header("Authorization", user.auth_header())
        .json(&json!({
            "title": "Should not exist"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_project_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/projects")
        .json(&json!({
            "title": "My Project"
        }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_projects_visible_to_users() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;

    let project = factory.create_project(admin.user_id).await;

    let response = app
        .server
        .get("/api/projects?limit=100")
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&project.title.as_str()));
}

#[tokio::test]
async fn test_get_project_success() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;
    let project = factory.create_project(admin.user_id).await;

    let response = app
        .server
        .get(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["id"].as_str().unwrap(), project.id.to_string());
    assert_eq!(body["title"].as_str().unwrap(), project.title);
}

#[tokio::test]
async fn test_get_project_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let user = factory.create_user().await;

    let fake_id = Uuid::new_v4();
    let response = app
        .server
        .get(&format!("/api/projects/{}", fake_id))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_project_partial() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let project = factory.create_project(admin.user_id).await;

    // Update only the description
    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "description": "New description only"
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["title"].as_str().unwrap(), project.title);
    assert_eq!(
        body["description"].as_str().unwrap(),
        "New description only"
    );
}

#[tokio::test]
async fn test_update_project_requires_admin() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;
    let project = factory.create_project(admin.user_id).await;

    let response = app
        .server
        .put(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", user.auth_header())
        .json(&json!({
            "title": "Hacked!"
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_replaces_skill_set() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let skill_a = factory.create_skill().await;
    let skill_b = factory.create_skill().await;
    let skill_c = factory.create_skill().await;

    let project = factory
        .create_project_with_skills(admin.user_id, &[&skill_a.name, &skill_b.name])
        .await;

    // Replace {a, b} with {b, c}: a is removed, c added, b kept
    let response = app
        .server
        .put(&format!("/api/projects/{}/skills", project.id))
        .add_header("Authorization", admin.auth_header())
        .json(&json!({
            "skill_names": [skill_b.name, skill_c.name]
        }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let mut names: Vec<&str> = body["skills"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();

    let mut expected = vec![skill_b.name.as_str(), skill_c.name.as_str()];
    expected.sort_unstable();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn test_update_skills_to_empty_set() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let skill = factory.create_skill().await;

    let project = factory
        .create_project_with_skills(admin.user_id, &[&skill.name])
        .await;

    let response = app
        .server
        .put(&format!("/api/projects/{}/skills", project.id))
        .add_header("Authorization", admin.auth_header())
        .json(&json!({ "skill_names": [] }))
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["skills"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_project_skills() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;
    let skill = factory.create_skill().await;

    let project = factory
        .create_project_with_skills(admin.user_id, &[&skill.name])
        .await;

    let response = app
        .server
        .get(&format!("/api/projects/{}/skills", project.id))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["skills"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["skills"][0]["name"].as_str().unwrap(),
        skill.name.as_str()
    );
}

#[tokio::test]
async fn test_delete_project() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let project = factory.create_project(admin.user_id).await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::OK);

    // Verify it's deleted
    let get_response = app
        .server
        .get(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    get_response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_project_cascades_to_entries() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;
    let project = factory.create_project(admin.user_id).await;

    app.server
        .post(&format!("/api/projects/{}/entries", project.id))
        .add_header("Authorization", user.auth_header())
        .json(&json!({}))
        .await;

    app.server
        .delete(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    let response = app
        .server
        .get(&format!("/api/entries?project_id={}", project.id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_delete_project_requires_admin() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;
    let user = factory.create_user().await;
    let project = factory.create_project(admin.user_id).await;

    let response = app
        .server
        .delete(&format!("/api/projects/{}", project.id))
        .add_header("Authorization", user.auth_header())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_project_not_found() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.state);
    let admin = factory.create_admin().await;

    let fake_id = Uuid::new_v4();
    let response = app
        .server
        .delete(&format!("/api/projects/{}", fake_id))
        .add_header("Authorization", admin.auth_header())
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
