//! Built-in conversion engine.
//!
//! Extracts translatable paragraphs from plain text and Word documents and
//! writes them as an XLIFF 1.2 file next to the input.

use anyhow::{Context, Result};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

use crate::engine::{ConversionEngine, EngineError};
use crate::i18n::Locale;

/// Extension appended to the original filename for the generated file.
pub const XLIFF_EXTENSION: &str = "xlf";

/// Input formats the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    PlainText,
    Docx,
}

impl DocumentFormat {
    /// Detect the format from the file extension (case-insensitive).
    pub fn detect(path: &Path) -> Result<Self, EngineError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt" | "text" | "md" | "markdown") => Ok(DocumentFormat::PlainText),
            Some("docx") => Ok(DocumentFormat::Docx),
            Some(other) => Err(EngineError::UnsupportedFormat(format!(
                "The file format '.{}' is not supported",
                other
            ))),
            None => Err(EngineError::UnsupportedFormat(format!(
                "Unable to detect the format of '{}'",
                display_name(path)
            ))),
        }
    }

    /// Value of the XLIFF `datatype` attribute.
    pub fn datatype(self) -> &'static str {
        match self {
            DocumentFormat::PlainText => "plaintext",
            DocumentFormat::Docx => "x-docx",
        }
    }
}

/// Native XLIFF generator.
#[derive(Debug, Default, Clone)]
pub struct XliffGenerator;

impl XliffGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ConversionEngine for XliffGenerator {
    fn generate(
        &self,
        source: &Locale,
        target: &Locale,
        input: &Path,
    ) -> Result<PathBuf, EngineError> {
        let format = DocumentFormat::detect(input)?;

        let segments = match format {
            DocumentFormat::PlainText => extract_plain_text(input)?,
            DocumentFormat::Docx => extract_docx(input)?,
        };

        debug!(
            "Extracted {} segments from {}",
            segments.len(),
            input.display()
        );

        let document = render_xliff(&display_name(input), format, source, target, &segments);
        let output = output_path(input);
        std::fs::write(&output, document)
            .with_context(|| format!("Failed to write {}", output.display()))?;

        Ok(output)
    }
}

/// `<input>.xlf` in the same directory as the input.
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = input.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(XLIFF_EXTENSION);
    input.with_file_name(name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ==================== Extraction ====================

/// Split text into paragraphs separated by blank lines.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}

fn extract_plain_text(path: &Path) -> Result<Vec<String>, EngineError> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let text = String::from_utf8(bytes).map_err(|_| {
        EngineError::UnsupportedFormat(format!(
            "The file '{}' is not valid UTF-8 text",
            display_name(path)
        ))
    })?;

    // A leading byte-order mark is not content
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(split_paragraphs(text))
}

fn extract_docx(path: &Path) -> Result<Vec<String>, EngineError> {
    let not_a_document = || {
        EngineError::UnsupportedFormat(format!(
            "The file '{}' is not a valid Word document",
            display_name(path)
        ))
    };

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut archive = ZipArchive::new(file).map_err(|_| not_a_document())?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| not_a_document())?
        .read_to_string(&mut xml)
        .map_err(|_| not_a_document())?;

    parse_document_xml(&xml).map_err(|_| not_a_document())
}

/// Collect the text of every `w:p` paragraph in a WordprocessingML body.
///
/// Paragraphs nested inside another paragraph (text boxes, for instance) are
/// emitted on their own, before the enclosing one.
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                if let Some(current) = open.last_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => current.push('\t'),
                        b"w:br" | b"w:cr" => current.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(e) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(current) = open.pop() {
                        let text = current.trim();
                        if !text.is_empty() {
                            paragraphs.push(text.to_string());
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

// ==================== Rendering ====================

/// Render segments as an XLIFF 1.2 document.
pub fn render_xliff(
    original: &str,
    format: DocumentFormat,
    source: &Locale,
    target: &Locale,
    segments: &[String],
) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<xliff version=\"1.2\" xmlns=\"urn:oasis:names:tc:xliff:document:1.2\">\n");
    let _ = writeln!(
        out,
        "  <file original=\"{}\" source-language=\"{}\" target-language=\"{}\" datatype=\"{}\">",
        escape(&xml_safe(original)),
        source,
        target,
        format.datatype()
    );
    out.push_str("    <body>\n");
    for (index, segment) in segments.iter().enumerate() {
        let _ = writeln!(
            out,
            "      <trans-unit id=\"{}\" xml:space=\"preserve\">",
            index + 1
        );
        let _ = writeln!(out, "        <source>{}</source>", escape(&xml_safe(segment)));
        out.push_str("      </trans-unit>\n");
    }
    out.push_str("    </body>\n");
    out.push_str("  </file>\n");
    out.push_str("</xliff>\n");
    out
}

/// Drop characters that XML 1.0 does not allow, even as references.
///
/// Tab, line feed and carriage return are the only C0 controls kept.
pub fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| match c {
            '\t' | '\n' | '\r' => true,
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => false,
            _ => true,
        })
        .collect()
}
