//! Conversion request errors.
//!
//! Every stage of a conversion request returns `Result<T, ConversionError>`.
//! The handler turns the error into a JSON envelope; nothing propagates past
//! the request boundary.

use axum::http::StatusCode;
use thiserror::Error;

/// All failures a conversion request can end in.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The multipart body carried no `file` part.
    #[error("The input file has not been sent")]
    MissingInput,

    /// A language tag does not denote a real language.
    #[error("The language '{tag}' is not valid")]
    InvalidLanguage { tag: String },

    /// The engine recognised the input as something it cannot convert.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// Any other failure: I/O, engine faults, panicked tasks.
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ConversionError {
    /// Whether this is a classified outcome rather than a malfunction.
    ///
    /// Expected failures are logged with their message only; unexpected ones
    /// are logged with full diagnostic detail.
    pub fn is_expected(&self) -> bool {
        !matches!(self, ConversionError::Internal(_))
    }

    /// HTTP status for this failure.
    ///
    /// Every failure is a 400 unless `internal_as_server_error` is set, in
    /// which case unclassified internal failures become a 500.
    pub fn status_code(&self, internal_as_server_error: bool) -> StatusCode {
        match self {
            ConversionError::Internal(_) if internal_as_server_error => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
