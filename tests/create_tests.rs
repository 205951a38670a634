//! Tests for the `POST /create` submission endpoint.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use bytes::Bytes;
use tempfile::TempDir;

use sharekey::api::services::{CreateService, UploadPolicy};
use sharekey::store::{FileStorage, ItemKind, ShareStore, WordPool};

const BOUNDARY: &str = "----TestBoundary12345";

// =============================================================================
// Test Setup
// =============================================================================

async fn test_store(words: &str, dir: &TempDir) -> Arc<ShareStore> {
    let pool = WordPool::from_csv(words).expect("test word list must parse");
    let store = Arc::new(ShareStore::new(
        pool,
        FileStorage::new(dir.path()),
        Duration::from_secs(300),
    ));
    store.files().ensure_root().await.unwrap();
    store
}

fn content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

fn text_part(name: &str, value: &str) -> Vec<u8> {
    format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
         {value}\r\n"
    )
    .into_bytes()
}

fn file_part(filename: &str, content: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(content);
    part.extend_from_slice(b"\r\n");
    part
}

fn close_body(mut body: Vec<u8>) -> Bytes {
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Bytes::from(body)
}

fn form_body(fields: &[(&str, &str)]) -> Bytes {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(&text_part(name, value));
    }
    close_body(body)
}

macro_rules! init_create_app {
    ($store:expr, $max_size:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .app_data(web::Data::new(UploadPolicy {
                    max_size: $max_size,
                }))
                .route("/create", web::post().to(CreateService::create_item)),
        )
        .await
    };
}

macro_rules! post_create {
    ($app:expr, $body:expr) => {{
        let req = TestRequest::post()
            .uri("/create")
            .insert_header(("content-type", content_type()))
            .set_payload($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

// =============================================================================
// URL / text submissions
// =============================================================================

#[actix_rt::test]
async fn test_create_url_returns_key_from_pool() {
    let dir = TempDir::new().unwrap();
    let store = test_store("github", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "url"), ("content", "https://github.com")]));

    assert_eq!(resp.status(), StatusCode::OK);
    let key = test::read_body(resp).await;
    assert_eq!(key, Bytes::from_static(b"github"));

    let item = store.get("github").expect("item stored under the key");
    assert_eq!(item.kind, ItemKind::Url);
    assert_eq!(item.content, "https://github.com");
}

#[actix_rt::test]
async fn test_create_text_stores_exact_content() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let snippet = "fn main() {\n    println!(\"hi\");\n}";
    let resp = post_create!(app, form_body(&[("type", "text"), ("content", snippet)]));

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(store.get("alpha").unwrap().content, snippet);
}

#[actix_rt::test]
async fn test_create_url_rejects_disallowed_scheme() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "url"), ("content", "ftp://x")]));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    // nothing was stored, the key stayed in the pool
    assert_eq!(store.pool_size(), 1);
}

#[actix_rt::test]
async fn test_create_empty_content_rejected() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "text"), ("content", "")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_create!(app, form_body(&[("type", "url")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_create_unknown_or_missing_type_rejected() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "blob"), ("content", "x")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = post_create!(app, form_body(&[("content", "x")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// File submissions
// =============================================================================

#[actix_rt::test]
async fn test_create_file_stores_bytes_under_item_id() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024 * 1024);

    let payload = b"\x00\x01binary payload\xff";
    let mut body = text_part("type", "file");
    body.extend_from_slice(&file_part("report.pdf", payload));

    let resp = post_create!(app, close_body(body));
    assert_eq!(resp.status(), StatusCode::OK);
    let key = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    let item = store.get(&key).expect("file item stored");
    assert_eq!(item.kind, ItemKind::File);
    assert_eq!(item.content, "report.pdf");

    // bytes live under the opaque id, not the client filename
    let stored = std::fs::read(store.files().path_for(&item.id)).unwrap();
    assert_eq!(stored, payload);
    assert!(!dir.path().join("report.pdf").exists());
}

#[actix_rt::test]
async fn test_create_file_missing_part_rejected() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "file")]));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_create_file_unsafe_filename_rejected() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let mut body = text_part("type", "file");
    body.extend_from_slice(&file_part("...", b"contents"));

    let resp = post_create!(app, close_body(body));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(store.pool_size(), 1);
}

#[actix_rt::test]
async fn test_create_file_path_traversal_is_flattened() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 1024);

    let mut body = text_part("type", "file");
    body.extend_from_slice(&file_part("../../etc/passwd", b"haha"));

    let resp = post_create!(app, close_body(body));
    assert_eq!(resp.status(), StatusCode::OK);
    let key = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    // download name keeps only the final segment
    assert_eq!(store.get(&key).unwrap().content, "passwd");
}

#[actix_rt::test]
async fn test_create_oversized_upload_rejected() {
    let dir = TempDir::new().unwrap();
    let store = test_store("alpha", &dir).await;
    let app = init_create_app!(store, 16);

    let mut body = text_part("type", "file");
    body.extend_from_slice(&file_part("big.bin", &[0u8; 64]));

    let resp = post_create!(app, close_body(body));
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(store.live_count(), 0);
}

// =============================================================================
// Key pool behavior
// =============================================================================

#[actix_rt::test]
async fn test_create_fails_when_pool_is_dry() {
    let dir = TempDir::new().unwrap();
    let store = test_store("only", &dir).await;
    let app = init_create_app!(store, 1024);

    let resp = post_create!(app, form_body(&[("type", "url"), ("content", "https://example.com")]));
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_create!(app, form_body(&[("type", "url"), ("content", "https://example.org")]));
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
