use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use basic_auth::htpasswd;
use basic_auth::PasswordHasher;
use gate_service::authenticator::build_authenticator;
use gate_service::config::AuthConfig;
use http_body_util::BodyExt;
use tempfile::NamedTempFile;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test application driving the router in-process
pub struct TestApp {
    pub router: Router,
    pub htpasswd: Option<PathBuf>,
    _dir: TempDir,
}

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestApp {
    /// Router backed by an alternating username/password list
    pub fn with_users(users: &[&str]) -> Self {
        let config = AuthConfig {
            realm: "Restricted".to_string(),
            htpasswd_file: None,
            users: users.iter().map(|u| u.to_string()).collect(),
            strict_reload: false,
        };
        let authenticator =
            build_authenticator(&config, &hasher()).expect("Failed to build authenticator");

        Self {
            router: gate_service::inbound::http::router::create_router(authenticator, false),
            htpasswd: None,
            _dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Router backed by a credential file containing the given users
    pub fn with_htpasswd(users: &[(&str, &str)], strict_reload: bool) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("htpasswd");
        write_htpasswd(&path, users, SystemTime::now());

        let config = AuthConfig {
            realm: "Restricted".to_string(),
            htpasswd_file: Some(path.clone()),
            users: Vec::new(),
            strict_reload,
        };
        let authenticator =
            build_authenticator(&config, &hasher()).expect("Failed to build authenticator");

        Self {
            router: gate_service::inbound::http::router::create_router(
                authenticator,
                strict_reload,
            ),
            htpasswd: Some(path),
            _dir: dir,
        }
    }

    /// Rewrite the credential file with a modification time in the future
    pub fn replace_htpasswd(&self, users: &[(&str, &str)], ahead: Duration) {
        let path = self.htpasswd.as_ref().expect("App has no credential file");
        write_htpasswd(path, users, SystemTime::now() + ahead);
    }

    pub fn remove_htpasswd(&self) {
        let path = self.htpasswd.as_ref().expect("App has no credential file");
        std::fs::remove_file(path).expect("Failed to remove credential file");
    }

    pub async fn get(&self, uri: &str, credentials: Option<(&str, &str)>) -> TestResponse {
        self.send(Method::GET, uri, credentials).await
    }

    pub async fn post(&self, uri: &str, credentials: Option<(&str, &str)>) -> TestResponse {
        self.send(Method::POST, uri, credentials).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, authorization: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, authorization)
            .body(Body::empty())
            .expect("Failed to build request");
        self.call(request).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        credentials: Option<(&str, &str)>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some((username, password)) = credentials {
            builder = builder.header(AUTHORIZATION, basic(username, password));
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

pub fn basic(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

fn hasher() -> PasswordHasher {
    PasswordHasher::with_params(8, 1, 1).expect("Failed to build hasher")
}

/// Write via a temporary file and rename so the server never reads a partial file
fn write_htpasswd(path: &std::path::Path, users: &[(&str, &str)], modified: SystemTime) {
    let hasher = hasher();
    let dir = path.parent().expect("Credential file has no parent");
    let mut file = NamedTempFile::new_in(dir).expect("Failed to create temp file");

    for (username, password) in users {
        let digest = hasher.hash(password).expect("Failed to hash password");
        writeln!(file, "{}", htpasswd::format_record(username, &digest))
            .expect("Failed to write record");
    }

    file.as_file()
        .set_modified(modified)
        .expect("Failed to set modification time");
    file.persist(path).expect("Failed to persist credential file");
}
