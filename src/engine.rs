//! Conversion engine capability.
//!
//! The request handler only knows this trait. The built-in implementation is
//! [`crate::xliff::XliffGenerator`]; tests substitute stubs.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::ConversionError;
use crate::i18n::Locale;

/// Failures reported by a conversion engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input's format or content cannot be converted.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// Anything else went wrong inside the engine.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl From<EngineError> for ConversionError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::UnsupportedFormat(message) => ConversionError::UnsupportedFormat(message),
            EngineError::Failed(source) => ConversionError::Internal(source),
        }
    }
}

/// Produces an XLIFF artifact from a materialized input file.
///
/// Implementations are called from the blocking thread pool and may do
/// synchronous I/O. The artifact must be written inside the input file's
/// directory so that it is removed together with the project.
pub trait ConversionEngine: Send + Sync {
    fn generate(
        &self,
        source: &Locale,
        target: &Locale,
        input: &Path,
    ) -> Result<PathBuf, EngineError>;
}
