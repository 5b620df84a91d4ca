mod common;

use std::time::Duration;

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::Method;
use axum::http::StatusCode;
use common::TestApp;

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::with_users(&["alice", "wonderland"]);

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_whoami_with_valid_credentials() {
    let app = TestApp::with_users(&["alice", "wonderland", "bob", "builder"]);

    let response = app.get("/api/whoami", Some(("bob", "builder"))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status_code"], 200);
    assert_eq!(response.body["data"]["username"], "bob");
}

#[tokio::test]
async fn test_missing_credentials_are_challenged() {
    let app = TestApp::with_users(&["alice", "wonderland"]);

    let response = app.get("/api/whoami", None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers.get(WWW_AUTHENTICATE).unwrap(),
        "Basic realm=\"Restricted\""
    );
    assert_eq!(response.body["data"]["message"], "Authentication required");
}

#[tokio::test]
async fn test_wrong_password_is_challenged() {
    let app = TestApp::with_users(&["alice", "wonderland"]);

    let response = app.get("/api/whoami", Some(("alice", "looking-glass"))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.contains_key(WWW_AUTHENTICATE));
}

#[tokio::test]
async fn test_malformed_authorization_headers_are_challenged() {
    let app = TestApp::with_users(&["alice", "wonderland"]);

    for header in ["Bearer abc", "Basic", "Basic ***", "Digest username=alice"] {
        let response = app.send_raw(Method::GET, "/api/whoami", header).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "header {}", header);
        assert!(response.headers.contains_key(WWW_AUTHENTICATE));
    }
}

#[tokio::test]
async fn test_logout_forces_one_challenge() {
    let app = TestApp::with_users(&["alice", "wonderland"]);
    let credentials = Some(("alice", "wonderland"));

    let response = app.post("/api/logout", credentials).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");

    let response = app.get("/api/whoami", credentials).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.contains_key(WWW_AUTHENTICATE));

    let response = app.get("/api/whoami", credentials).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_credential_file_changes_are_picked_up() {
    let app = TestApp::with_htpasswd(&[("alice", "wonderland")], false);

    let response = app.get("/api/whoami", Some(("carol", "secret"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.replace_htpasswd(
        &[("alice", "wonderland"), ("carol", "secret")],
        Duration::from_secs(60),
    );

    let response = app.get("/api/whoami", Some(("carol", "secret"))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "carol");
}

#[tokio::test]
async fn test_removed_record_is_rejected_after_reload() {
    let app = TestApp::with_htpasswd(&[("alice", "wonderland"), ("bob", "builder")], false);

    app.replace_htpasswd(&[("alice", "wonderland")], Duration::from_secs(60));

    let response = app.get("/api/whoami", Some(("bob", "builder"))).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unreadable_file_serves_last_credentials() {
    let app = TestApp::with_htpasswd(&[("alice", "wonderland")], false);

    app.remove_htpasswd();

    let response = app.get("/api/whoami", Some(("alice", "wonderland"))).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "alice");
}

#[tokio::test]
async fn test_unreadable_file_is_rejected_in_strict_mode() {
    let app = TestApp::with_htpasswd(&[("alice", "wonderland")], true);

    app.remove_htpasswd();

    let response = app.get("/api/whoami", Some(("alice", "wonderland"))).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.body["data"]["message"],
        "Credential store unavailable"
    );
}

#[tokio::test]
async fn test_logout_survives_unavailable_file_in_strict_mode() {
    let app = TestApp::with_htpasswd(&[("alice", "wonderland")], true);
    let credentials = Some(("alice", "wonderland"));

    let response = app.post("/api/logout", credentials).await;
    assert_eq!(response.status, StatusCode::OK);

    app.remove_htpasswd();
    let response = app.get("/api/whoami", credentials).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);

    app.replace_htpasswd(&[("alice", "wonderland")], Duration::from_secs(60));

    let response = app.get("/api/whoami", credentials).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.headers.contains_key(WWW_AUTHENTICATE));

    let response = app.get("/api/whoami", credentials).await;
    assert_eq!(response.status, StatusCode::OK);
}
