//! Conversion request handling.
//!
//! A request moves through validation, language resolution, project creation
//! and conversion. Each step returns early on failure; cleanup of the input
//! stream and the project happens once, after the steps, on every path.

use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncRead;
use tracing::{error, info};

use crate::engine::ConversionEngine;
use crate::error::ConversionError;
use crate::i18n::Locale;
use crate::project::{sanitize_filename, ConversionProject};
use crate::response::{Artifact, ResponseEnvelope};
use crate::upload::Upload;

/// One incoming conversion request.
pub struct ConversionRequest<R> {
    pub filename: String,
    pub source_language: String,
    pub target_language: String,
    /// `None` when the client did not send a file.
    pub input: Option<R>,
}

impl<R> ConversionRequest<R> {
    pub fn new(
        filename: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        input: Option<R>,
    ) -> Self {
        Self {
            filename: filename.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            input,
        }
    }
}

/// Runs conversion requests against an engine.
///
/// Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct ConversionHandler {
    engine: Arc<dyn ConversionEngine>,
    storage_dir: PathBuf,
    internal_errors_as_server_errors: bool,
}

impl ConversionHandler {
    pub fn new(engine: Arc<dyn ConversionEngine>, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            storage_dir: storage_dir.into(),
            internal_errors_as_server_errors: false,
        }
    }

    /// Report unclassified internal failures as 500 instead of 400.
    pub fn with_internal_errors_as_server_errors(mut self, enabled: bool) -> Self {
        self.internal_errors_as_server_errors = enabled;
        self
    }

    /// Handle a request and build its response envelope.
    ///
    /// Never fails: every error becomes an error envelope. The input stream is
    /// closed and the project released before this returns.
    pub async fn handle<R>(&self, request: ConversionRequest<R>) -> ResponseEnvelope
    where
        R: AsyncRead + Unpin + Send,
    {
        let ConversionRequest {
            filename,
            source_language,
            target_language,
            input,
        } = request;

        let filename = sanitize_filename(&filename);
        info!(
            "[CONVERSION REQUEST] {}: {} to {}",
            filename, source_language, target_language
        );

        let mut input = input.map(Upload::new);
        let mut project: Option<ConversionProject> = None;

        let outcome = self
            .convert(
                &filename,
                &source_language,
                &target_language,
                input.as_mut(),
                &mut project,
            )
            .await;

        if let Some(input) = input.as_mut() {
            input.close();
        }
        if let Some(project) = project.as_mut() {
            project.release();
        }

        match outcome {
            Ok(artifact) => {
                info!("[CONVERSION REQUEST FINISHED] {}", artifact.filename);
                ResponseEnvelope::success(&artifact)
            }
            Err(e) => {
                if e.is_expected() {
                    error!("[CONVERSION REQUEST FAILED] {}", e);
                } else {
                    error!(error = ?e, "[CONVERSION REQUEST FAILED] {}", e);
                }
                ResponseEnvelope::error(
                    e.status_code(self.internal_errors_as_server_errors),
                    &e.to_string(),
                )
            }
        }
    }

    async fn convert<R>(
        &self,
        filename: &str,
        source_language: &str,
        target_language: &str,
        input: Option<&mut Upload<R>>,
        project: &mut Option<ConversionProject>,
    ) -> Result<Artifact, ConversionError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let input = input.ok_or(ConversionError::MissingInput)?;

        let source = Locale::resolve(source_language)?;
        let target = Locale::resolve(target_language)?;

        let opened = ConversionProject::open(&self.storage_dir, filename, input).await?;

        // The blocking task owns the project until the engine returns
        let engine = Arc::clone(&self.engine);
        let (opened, generated) = tokio::task::spawn_blocking(move || {
            let generated = engine.generate(&source, &target, opened.file());
            (opened, generated)
        })
        .await
        .context("Conversion task failed")?;
        *project = Some(opened);
        let generated = generated?;

        // Read the artifact now; it lives in the project directory
        let artifact = Artifact::load(&generated).await?;
        Ok(artifact)
    }
}
