//! End-to-end tests that boot the real router on an ephemeral port and
//! drive it over HTTP.
//!
//! Fixtures stand in for the system account database and the daemon's
//! working directory: a passwd/shadow pair with `root`(0), `alice`(1001),
//! `bob`(1002), and `carol`(1003), UID bounds of (1000, 60000), and
//! `alice` acting as the operator where a test needs one.

use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use st_api::hydra::Links;
use st_api::{AppState, router};
use st_store::{StatusService, StatusStore, UserDirectory};

const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
alice:x:1001:1001::/home/alice:/bin/bash
bob:x:1002:1002::/home/bob:/bin/bash
carol:x:1003:1003::/home/carol:/bin/bash
";

const SHADOW: &str = "\
root:*:19000:0:99999:7:::
alice:*:19000:0:99999:7:::
bob:*:19000:0:99999:7:::
carol:*:19000:0:99999:7:::
";

struct TestServer {
    base: String,
    work_dir: PathBuf,
    _temp: TempDir,
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

/// Boots the service against temp fixtures and returns its base URL.
async fn spawn_server(operator: Option<&str>, login_defs: Option<&str>) -> TestServer {
    let temp = TempDir::new().unwrap();
    let work_dir = temp.path().join("work");
    std::fs::create_dir_all(&work_dir).unwrap();

    std::fs::write(temp.path().join("passwd"), PASSWD).unwrap();
    std::fs::write(temp.path().join("shadow"), SHADOW).unwrap();
    if let Some(content) = login_defs {
        std::fs::write(temp.path().join("login.defs"), content).unwrap();
    }

    let directory = UserDirectory::new(
        temp.path().join("shadow"),
        temp.path().join("passwd"),
        temp.path().join("login.defs"),
        operator.map(String::from),
    );
    let service = StatusService::new(directory, StatusStore::new(work_dir.clone()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let state = AppState::new(service, Links::new(base.clone()));
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    TestServer {
        base,
        work_dir,
        _temp: temp,
    }
}

async fn get_json(url: &str) -> Value {
    reqwest::get(url).await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn index_lists_only_normal_users() {
    let server = spawn_server(Some("alice"), Some("UID_MIN 1000\nUID_MAX 60000\n")).await;

    let body = get_json(&server.url("/")).await;
    assert_eq!(body["@type"], "Index");
    let usernames: Vec<&str> = body["user"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, ["bob", "carol"]);

    // Envelope shape shared by every document.
    assert_eq!(body["start"], server.url("/"));
    assert_eq!(body["@context"]["hydra"], "http://www.w3.org/ns/hydra/core#");
    assert_eq!(body["@context"]["vocab"], format!("{}#", server.url("/vocab")));
}

#[tokio::test]
async fn index_fails_open_without_uid_bounds() {
    let server = spawn_server(None, None).await;

    let body = get_json(&server.url("/")).await;
    let usernames: Vec<&str> = body["user"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, ["root", "alice", "bob", "carol"]);
}

#[tokio::test]
async fn unknown_user_is_404_with_empty_body() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;

    for path in ["/user/nosuch", "/user/nosuch/timestatus", "/user/root"] {
        let response = reqwest::get(server.url(path)).await.unwrap();
        assert_eq!(response.status(), 404, "{path}");
        assert_eq!(response.text().await.unwrap(), "", "{path}");
    }
}

#[tokio::test]
async fn fresh_user_has_default_status() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;

    let body = get_json(&server.url("/user/bob/timestatus")).await;
    assert_eq!(body["@type"], "TimeStatus");
    assert_eq!(body["time"], 0);
    assert_eq!(body["locked"], false);
    assert_eq!(body["user"], server.url("/user/bob"));
    assert_eq!(body["operation"][0]["method"], "PUT");
}

#[tokio::test]
async fn update_then_read_back() {
    let server = spawn_server(Some("alice"), Some("UID_MIN 1000\nUID_MAX 60000\n")).await;
    let client = reqwest::Client::new();

    // No prior state for carol.
    let response = client
        .put(server.url("/user/carol/timestatus"))
        .json(&json!({ "time": 120, "locked": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert_eq!(response.text().await.unwrap(), "");

    // The sentinel files the daemon expects are in place.
    let counter = std::fs::read_to_string(server.work_dir.join("carol.time")).unwrap();
    assert_eq!(counter, "120");
    assert!(server.work_dir.join("carol.lock").is_file());

    let body = get_json(&server.url("/user/carol/timestatus")).await;
    assert_eq!(body["time"], 120);
    assert_eq!(body["locked"], true);

    // The user document embeds the same status.
    let body = get_json(&server.url("/user/carol")).await;
    assert_eq!(body["@type"], "User");
    assert_eq!(body["username"], "carol");
    assert_eq!(body["timestatus"]["time"], 120);
    assert_eq!(body["timestatus"]["locked"], true);
}

#[tokio::test]
async fn unlock_clears_markers_but_keeps_time() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;
    let client = reqwest::Client::new();

    client
        .put(server.url("/user/bob/timestatus"))
        .json(&json!({ "time": 300, "locked": true }))
        .send()
        .await
        .unwrap();
    // A marker left by the daemon for an independent reason.
    std::fs::write(server.work_dir.join("bob.logout"), "").unwrap();

    let response = client
        .put(server.url("/user/bob/timestatus"))
        .json(&json!({ "locked": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);

    let body = get_json(&server.url("/user/bob/timestatus")).await;
    assert_eq!(body["time"], 300);
    assert_eq!(body["locked"], false);
    for suffix in ["lock", "logout", "late"] {
        assert!(
            !server.work_dir.join(format!("bob.{suffix}")).exists(),
            "unlock must remove the {suffix} marker"
        );
    }
}

#[tokio::test]
async fn put_rejects_ill_typed_bodies() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;
    let client = reqwest::Client::new();

    for body in [
        json!({ "time": "lots" }),
        json!({ "time": -1 }),
        json!({ "locked": 1 }),
    ] {
        let response = client
            .put(server.url("/user/bob/timestatus"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert!(
            response.status().is_client_error(),
            "{body} should be rejected"
        );
    }

    // Nothing was written for bob.
    assert!(!server.work_dir.join("bob.time").exists());
}

#[tokio::test]
async fn put_for_unlisted_account_still_succeeds() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/user/mallory/timestatus"))
        .json(&json!({ "time": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert!(server.work_dir.join("mallory.time").is_file());

    // Reading it back is still a 404: mallory is not a listed account.
    let response = reqwest::get(server.url("/user/mallory/timestatus"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn put_rejects_path_escaping_usernames() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;
    let client = reqwest::Client::new();

    let response = client
        .put(server.url("/user/%2e%2e%2fescape/timestatus"))
        .json(&json!({ "time": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn vocab_and_health_respond() {
    let server = spawn_server(None, Some("UID_MIN 1000\nUID_MAX 60000\n")).await;

    let body = get_json(&server.url("/vocab")).await;
    assert!(body["hydra:supportedClass"].is_array());
    assert_eq!(body["start"], server.url("/"));

    let body = get_json(&server.url("/health")).await;
    assert_eq!(body["status"], "ok");
}
