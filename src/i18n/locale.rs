//! Locale type: parsed, canonical language identity.
//!
//! Parsing a tag never fails: anything that is not a well-formed BCP 47
//! language tag degrades to the undetermined locale. Validation happens
//! afterwards, when the ISO 639 three-letter code is requested.

use std::fmt;

use crate::error::ConversionError;
use crate::i18n::LanguageRegistry;

/// A language identity parsed from a BCP 47 tag.
///
/// Subtags are stored in canonical case: lowercase language, titlecase
/// script, uppercase region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locale {
    language: String,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// Parse a language tag.
    ///
    /// Parsing stops at the first ill-formed subtag; whatever was parsed up to
    /// that point is kept. Variants and extensions are accepted but dropped.
    /// An ill-formed primary language subtag yields the undetermined locale.
    pub fn parse(tag: &str) -> Locale {
        let mut subtags = tag.trim().split('-').peekable();

        let language = match subtags.next() {
            Some(sub) if is_language_subtag(sub) => sub.to_ascii_lowercase(),
            _ => return Locale::default(),
        };

        // "und" is the explicit spelling of the undetermined language
        if language == "und" {
            return Locale::default();
        }

        let mut locale = Locale {
            language,
            script: None,
            region: None,
        };

        if let Some(sub) = subtags.peek() {
            if sub.len() == 4 && sub.bytes().all(|b| b.is_ascii_alphabetic()) {
                let mut script = sub.to_ascii_lowercase();
                script[..1].make_ascii_uppercase();
                locale.script = Some(script);
                subtags.next();
            }
        }

        if let Some(sub) = subtags.peek() {
            let alpha_region = sub.len() == 2 && sub.bytes().all(|b| b.is_ascii_alphabetic());
            let numeric_region = sub.len() == 3 && sub.bytes().all(|b| b.is_ascii_digit());
            if alpha_region || numeric_region {
                locale.region = Some(sub.to_ascii_uppercase());
            }
        }

        locale
    }

    /// Parse a tag and require that it names a real language.
    ///
    /// # Errors
    /// Returns [`ConversionError::InvalidLanguage`] carrying the original tag
    /// when the language has no ISO 639 three-letter code.
    pub fn resolve(tag: &str) -> Result<Locale, ConversionError> {
        let locale = Locale::parse(tag);
        match locale.iso3_language() {
            Some(_) => Ok(locale),
            None => Err(ConversionError::InvalidLanguage {
                tag: tag.to_string(),
            }),
        }
    }

    /// Primary language subtag in lowercase, empty when undetermined.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Script subtag (e.g., "Latn"), if present.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Region subtag (e.g., "US", "419"), if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether the tag did not carry a usable language subtag.
    pub fn is_undetermined(&self) -> bool {
        self.language.is_empty()
    }

    /// ISO 639-2/T three-letter code of the language.
    ///
    /// Returns `None` for the undetermined locale and for codes absent from
    /// the ISO 639 registry.
    pub fn iso3_language(&self) -> Option<&'static str> {
        LanguageRegistry::get()
            .lookup(&self.language)
            .map(|lang| lang.alpha3)
    }

    /// Canonical BCP 47 form (e.g., "en-US", "zh-Hant-TW", "und").
    pub fn to_tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undetermined() {
            return f.write_str("und");
        }
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "-{}", script)?;
        }
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

/// Primary language subtags are 2-3 letters, or 5-8 letters for registered
/// languages. Four letters are reserved.
fn is_language_subtag(sub: &str) -> bool {
    let len_ok = matches!(sub.len(), 2 | 3 | 5..=8);
    len_ok && sub.bytes().all(|b| b.is_ascii_alphabetic())
}
