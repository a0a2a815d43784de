//! HTTP surface.
//!
//! `POST /convert/:source_lang/:target_lang` takes a multipart body with a
//! single `file` part. `GET /health` reports liveness.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::io;
use tokio_util::io::StreamReader;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handler::{ConversionHandler, ConversionRequest};
use crate::response::ResponseEnvelope;

/// Name of the multipart part carrying the document.
pub const FILE_FIELD: &str = "file";

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: ConversionHandler,
}

impl AppState {
    pub fn new(handler: ConversionHandler) -> Self {
        Self { handler }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/convert/:source_lang/:target_lang", post(convert))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn convert(
    State(state): State<AppState>,
    Path((source_lang, target_lang)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ResponseEnvelope {
    let mut multipart = match multipart {
        Ok(multipart) => Some(multipart),
        Err(rejection) => {
            warn!("Request body is not multipart: {}", rejection);
            None
        }
    };

    if let Some(multipart) = multipart.as_mut() {
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read multipart body: {}", e);
                    break;
                }
            };

            if field.name() != Some(FILE_FIELD) {
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            let reader = StreamReader::new(Box::pin(
                field.map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
            ));

            let request = ConversionRequest::new(filename, source_lang, target_lang, Some(reader));
            return state.handler.handle(request).await;
        }
    }

    let request = ConversionRequest::<tokio::io::Empty>::new("", source_lang, target_lang, None);
    state.handler.handle(request).await
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "xliff-converter",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
