//! Integration tests for the XLIFF converter HTTP surface
//!
//! These tests drive the full router with `oneshot` requests: multipart
//! parsing, language validation, project lifecycle and the response envelope.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method
use xliff_converter::engine::{ConversionEngine, EngineError};
use xliff_converter::handler::ConversionHandler;
use xliff_converter::i18n::Locale;
use xliff_converter::xliff::XliffGenerator;
use xliff_converter::{build_router, AppState};

const BOUNDARY: &str = "xliff-test-boundary";

// ==================== Test Helpers ====================

/// Engine stub that always answers with the same classified failure
struct RejectingEngine {
    calls: AtomicUsize,
}

impl ConversionEngine for RejectingEngine {
    fn generate(&self, _: &Locale, _: &Locale, _: &Path) -> Result<PathBuf, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::UnsupportedFormat(
            "The file format '.bin' is not supported".to_string(),
        ))
    }
}

/// Create an app backed by the built-in engine
fn setup_app(storage: &TempDir) -> Router {
    setup_app_with(Arc::new(XliffGenerator::new()), storage)
}

fn setup_app_with(engine: Arc<dyn ConversionEngine>, storage: &TempDir) -> Router {
    let handler = ConversionHandler::new(engine, storage.path());
    build_router(AppState::new(handler), 1024 * 1024)
}

/// Multipart body with one part per `(name, filename, content)`
fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        write!(body, "--{}\r\n", BOUNDARY).unwrap();
        write!(
            body,
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            name, filename
        )
        .unwrap();
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    write!(body, "--{}--\r\n", BOUNDARY).unwrap();
    body
}

fn convert_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Minimal .docx package with two paragraphs
fn docx_bytes() -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut cursor);
        zip.start_file(
            "word/document.xml",
            zip::write::SimpleFileOptions::default(),
        )
        .unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Annual report</w:t></w:r></w:p>
    <w:p><w:r><w:t>Revenue grew by 12%</w:t></w:r></w:p>
  </w:body>
</w:document>"#,
        )
        .unwrap();
        zip.finish().unwrap();
    }
    cursor.into_inner()
}

/// Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Number of entries left in the storage root
fn leftover_entries(storage: &TempDir) -> usize {
    match std::fs::read_dir(storage.path()) {
        Ok(entries) => entries.count(),
        Err(_) => 0,
    }
}

// ==================== Health Endpoint ====================

#[tokio::test]
async fn test_health_endpoint() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "xliff-converter");
    assert!(body["version"].is_string());
}

// ==================== Successful Conversion ====================

#[tokio::test]
async fn test_convert_docx_to_xliff() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);
    let docx = docx_bytes();

    let body = multipart_body(&[("file", "report.docx", docx.as_slice())]);
    let response = app
        .oneshot(convert_request("/convert/en/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["isSuccess"], true);
    assert_eq!(body["filename"], "report.docx.xlf");

    let xliff = body["xliffContent"].as_str().unwrap();
    assert!(xliff.contains("<xliff version=\"1.2\""));
    assert!(xliff.contains("source-language=\"en\""));
    assert!(xliff.contains("target-language=\"fr\""));
    assert!(xliff.contains("<source>Annual report</source>"));
    assert!(xliff.contains("<source>Revenue grew by 12%</source>"));
    assert_eq!(body["size"].as_u64().unwrap() as usize, xliff.len());

    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_convert_plain_text_with_regions() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[("file", "notes.txt", &b"One\n\nTwo & three"[..])]);
    let response = app
        .oneshot(convert_request("/convert/en-us/PT-br", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let xliff = body["xliffContent"].as_str().unwrap();
    assert!(xliff.contains("source-language=\"en-US\""));
    assert!(xliff.contains("target-language=\"pt-BR\""));
    assert!(xliff.contains("<source>Two &amp; three</source>"));
}

#[tokio::test]
async fn test_other_parts_are_ignored() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[
        ("comment", "note.txt", &b"ignored"[..]),
        ("file", "doc.txt", &b"Translate me"[..]),
    ]);
    let response = app
        .oneshot(convert_request("/convert/en/it", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["filename"], "doc.txt.xlf");
}

#[tokio::test]
async fn test_traversal_filename_is_contained() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[("file", "../../etc/passwd.txt", &b"root"[..])]);
    let response = app
        .oneshot(convert_request("/convert/en/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["filename"], "passwd.txt.xlf");
    assert_eq!(leftover_entries(&storage), 0);
}

// ==================== Failures ====================

#[tokio::test]
async fn test_invalid_source_language() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[("file", "notes.txt", &b"Hello"[..])]);
    let response = app
        .oneshot(convert_request("/convert/xx/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(
        body,
        serde_json::json!({ "message": "The language 'xx' is not valid" })
    );
    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_missing_file_part() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[("attachment", "notes.txt", &b"Hello"[..])]);
    let response = app
        .oneshot(convert_request("/convert/en/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "The input file has not been sent");
    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_non_multipart_body_counts_as_missing_file() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let request = Request::builder()
        .method("POST")
        .uri("/convert/en/fr")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("Hello"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "The input file has not been sent");
}

#[tokio::test]
async fn test_unsupported_format_from_builtin_engine() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let body = multipart_body(&[("file", "slides.pptx", &b"PK"[..])]);
    let response = app
        .oneshot(convert_request("/convert/en/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "The file format '.pptx' is not supported");
    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_unsupported_format_from_injected_engine() {
    let storage = TempDir::new().unwrap();
    let engine = Arc::new(RejectingEngine {
        calls: AtomicUsize::new(0),
    });
    let app = setup_app_with(engine.clone(), &storage);

    let body = multipart_body(&[("file", "blob.bin", &b"\x00\x01"[..])]);
    let response = app
        .oneshot(convert_request("/convert/de/en", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "The file format '.bin' is not supported");
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected_without_leaks() {
    let storage = TempDir::new().unwrap();
    let handler = ConversionHandler::new(Arc::new(XliffGenerator::new()), storage.path());
    let app = build_router(AppState::new(handler), 16);

    let body = multipart_body(&[("file", "big.txt", &[b'a'; 4096][..])]);
    let response = app
        .oneshot(convert_request("/convert/en/fr", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert!(body["message"].is_string());
    assert_eq!(leftover_entries(&storage), 0);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let storage = TempDir::new().unwrap();
    let app = setup_app(&storage);

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let content = format!("Document number {}", i);
                let body = multipart_body(&[("file", "same.txt", content.as_bytes())]);
                let response = app
                    .oneshot(convert_request("/convert/en/es", body))
                    .await
                    .unwrap();
                let body = extract_json(response.into_body()).await;
                (i, body)
            })
        })
        .collect();

    for task in tasks {
        let (i, body) = task.await.unwrap();
        let xliff = body["xliffContent"].as_str().unwrap();
        assert!(xliff.contains(&format!("<source>Document number {}</source>", i)));
    }

    assert_eq!(leftover_entries(&storage), 0);
}
