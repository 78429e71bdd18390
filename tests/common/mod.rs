#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gdocdown::services::auth::ClientSecret;
use gdocdown::services::docs::DocsClient;

pub fn read_mock(name: &str) -> String {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    fs::read_to_string(root.join("tests/resources/mocks").join(name)).unwrap()
}

pub async fn mount_document(server: &MockServer, document_id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/documents/{}", document_id)))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_document_error(server: &MockServer, document_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/documents/{}", document_id)))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(server)
        .await;
}

pub async fn mount_image(server: &MockServer, image_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(image_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

pub async fn mount_image_with_status(
    server: &MockServer,
    image_path: &str,
    status: u16,
    bytes: &[u8],
) {
    Mock::given(method("GET"))
        .and(path(image_path.to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(bytes.to_vec()))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts an image that the scenario must never request.
pub async fn mount_unexpected_image(server: &MockServer, image_path: &str) {
    Mock::given(method("GET"))
        .and(path(image_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"unexpected".to_vec()))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn mount_token(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Writes a client secret file whose token endpoint points at `token_uri`.
pub fn write_client_secret(dir: &Path, token_uri: &str) -> PathBuf {
    let json = format!(
        r#"{{
            "installed": {{
                "client_id": "test-client",
                "client_secret": "test-secret",
                "auth_uri": "https://accounts.example.com/o/oauth2/auth",
                "token_uri": "{}",
                "redirect_uris": ["http://localhost"]
            }}
        }}"#,
        token_uri
    );
    let path = dir.join("credentials.json");
    fs::write(&path, json).unwrap();
    path
}

pub fn load_secret(dir: &Path, token_uri: &str) -> ClientSecret {
    let path = write_client_secret(dir, token_uri);
    ClientSecret::load(&path).unwrap()
}

pub fn docs_client(base_url: &str, access_token: &str) -> DocsClient {
    DocsClient::builder()
        .client(reqwest::Client::new())
        .api_base_url(base_url.to_string())
        .access_token(access_token.to_string())
        .build()
}
