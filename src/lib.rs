//! XLIFF conversion service.
//!
//! Accepts a document over HTTP, materializes it in a per-request project
//! directory, hands it to a [`engine::ConversionEngine`] and answers with a
//! JSON envelope. See [`handler::ConversionHandler`] for the request flow.

pub mod config;
pub mod engine;
pub mod error;
pub mod handler;
pub mod i18n;
pub mod project;
pub mod response;
pub mod server;
pub mod upload;
pub mod xliff;

pub use server::{build_router, AppState};
