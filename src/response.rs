//! JSON response envelopes.

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

/// A produced XLIFF document, read out of the project before it is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

impl Artifact {
    /// Read the engine's output file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read generated file {}", path.display()))?;

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { filename, content })
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Body of a successful conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SuccessBody<'a> {
    is_success: bool,
    filename: &'a str,
    size: usize,
    xliff_content: &'a str,
}

/// Success payload referencing the artifact.
pub fn success_body(artifact: &Artifact) -> Value {
    json!(SuccessBody {
        is_success: true,
        filename: &artifact.filename,
        size: artifact.size(),
        xliff_content: &artifact.content,
    })
}

/// Error payload: `{ "message": ... }`.
pub fn error_body(message: &str) -> Value {
    json!({ "message": message })
}

/// Status plus JSON body returned for every conversion request.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: StatusCode,
    body: Value,
}

impl ResponseEnvelope {
    pub fn success(artifact: &Artifact) -> Self {
        Self {
            status: StatusCode::OK,
            body: success_body(artifact),
        }
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: error_body(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
