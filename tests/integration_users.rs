#![allow(clippy::unwrap_used, clippy::missing_panics_doc, unreachable_pub)]
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_create_user_returns_summary() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("runner");

    let resp = app.create_user(&username).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["username"], username.as_str());
    assert!(!body["_id"].as_str().unwrap().is_empty());
    assert_eq!(body.as_object().unwrap().len(), 2, "summary must only carry username and _id");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("dup");

    app.register(&username).await;
    let resp = app.create_user(&username).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp.text().await.unwrap(), "User already exists!");

    let users: Vec<serde_json::Value> = app
        .client
        .get(format!("{}/api/exercise/users", app.server_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_username_is_stored_as_given() {
    let app = common::TestApp::spawn().await;
    let username = common::generate_username("padded");
    let padded = format!(" {username}");

    app.register(&username).await;
    let resp = app.create_user(&padded).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["username"], padded.as_str());
}

#[tokio::test]
async fn test_missing_username_is_bad_request() {
    let app = common::TestApp::spawn().await;

    let resp = app.create_user("   ").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.text().await.unwrap(), "username is required");
}

#[tokio::test]
async fn test_list_users_in_creation_order() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/api/exercise/users", app.server_url)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let empty: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(empty.is_empty());

    let first = common::generate_username("a");
    let second = common::generate_username("b");
    let first_id = app.register(&first).await;
    let second_id = app.register(&second).await;

    // Give the first user a log so we can check it is not leaked into the listing.
    let resp = app.add_exercise(&first_id, "run", "30", Some("2023-5-4")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let users: Vec<serde_json::Value> = app
        .client
        .get(format!("{}/api/exercise/users", app.server_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0], serde_json::json!({ "username": first, "_id": first_id }));
    assert_eq!(users[1], serde_json::json!({ "username": second, "_id": second_id }));
}
