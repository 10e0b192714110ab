use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use bytes::Bytes;
use formdrop::config::{AppConfig, DEFAULT_BIND_ADDR, DEFAULT_MAX_FILE_SIZE};
use formdrop::services::storage::StorageService;
use formdrop::{AppState, create_app};
use http_body_util::BodyExt;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

#[derive(Default)]
struct MockStorage {
    puts: Mutex<Vec<String>>,
}

#[async_trait]
impl StorageService for MockStorage {
    async fn put_object(&self, key: &str, _data: Bytes) -> anyhow::Result<()> {
        self.puts.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

fn test_app(storage: Arc<MockStorage>) -> axum::Router {
    create_app(AppState {
        storage,
        config: AppConfig {
            region: "ap-southeast-1".to_string(),
            bucket: "test-bucket".to_string(),
            endpoint_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        },
    })
}

fn upload_request(filename: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_disallowed_extension_rejected() {
    let storage = Arc::new(MockStorage::default());

    for filename in ["malware.exe", "shell.ExE", "page.html", "script.js"] {
        let app = test_app(storage.clone());
        let response = app
            .oneshot(upload_request(filename, b"MZ content"))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{filename} should be rejected"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"File type not allowed.");
    }

    // Zero put calls across all rejections
    assert!(storage.puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_extension_match_is_case_insensitive() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app
        .oneshot(upload_request("photo.Jpg", b"\xFF\xD8\xFF\xE0"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*storage.puts.lock().unwrap(), vec!["photo.Jpg"]);
}

#[tokio::test]
async fn test_filename_without_extension_rejected() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app.oneshot(upload_request("README", b"text")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"File type not allowed.");
    assert!(storage.puts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_path_traversal_is_neutralized() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app
        .oneshot(upload_request("../../etc/passwd.pdf", b"%PDF-1.5"))
        .await
        .unwrap();

    // Stored under the leaf name; the key can never escape the bucket
    assert_eq!(response.status(), StatusCode::OK);
    let puts = storage.puts.lock().unwrap();
    assert_eq!(*puts, vec!["passwd.pdf"]);
    assert!(!puts[0].contains('/'));
    assert!(!puts[0].contains('\\'));
}

#[tokio::test]
async fn test_windows_path_traversal_is_neutralized() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app
        .oneshot(upload_request("..\\..\\boot\\evil.png", b"\x89PNG"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(*storage.puts.lock().unwrap(), vec!["evil.png"]);
}

#[tokio::test]
async fn test_unsafe_characters_replaced_in_key() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app
        .oneshot(upload_request("my report (final).pdf", b"%PDF-1.5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        *storage.puts.lock().unwrap(),
        vec!["my_report__final_.pdf"]
    );
}

#[tokio::test]
async fn test_name_that_sanitizes_away_rejected() {
    let storage = Arc::new(MockStorage::default());
    let app = test_app(storage.clone());

    let response = app.oneshot(upload_request("....", b"dots")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"No valid file provided.");
    assert!(storage.puts.lock().unwrap().is_empty());
}
