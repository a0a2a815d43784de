//! Language-tag handling.
//!
//! # Architecture
//!
//! - `registry`: ISO 639 table, the single source of truth for real languages
//! - `locale`: BCP 47 tag parsing and resolution into a canonical `Locale`
//!
//! # Example
//!
//! ```rust,ignore
//! use xliff_converter::i18n::Locale;
//!
//! let locale = Locale::resolve("en-US")?;
//! assert_eq!(locale.iso3_language(), Some("eng"));
//! ```

mod locale;
mod registry;

pub use locale::Locale;
pub use registry::{IsoLanguage, LanguageRegistry};
