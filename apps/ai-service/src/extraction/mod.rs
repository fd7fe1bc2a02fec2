//! Text Extraction — converts uploaded resume documents into plain text.
//!
//! Format is decided by the declared filename extension alone; the bytes are
//! never sniffed. `.pdf` and `.docx` are the only accepted formats.

use std::io::Cursor;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Client-class failure: the caller uploaded a format we do not accept.
    /// Carries the offending extension verbatim (dot included).
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Server-class failure: the document claimed a supported format but
    /// could not be decoded.
    #[error("Error parsing file: {0}")]
    Parse(String),
}

/// Successful extraction output. An empty `text` with `warning` set is a
/// valid result (scanned or image-only documents), never a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub warning: Option<String>,
}

const NO_TEXT_WARNING: &str = "No text could be extracted from the file.";

/// Extracts plain text from an uploaded document based on its filename
/// extension (case-insensitive).
pub fn extract(bytes: &[u8], filename: &str) -> Result<ExtractedText, ExtractError> {
    let extension = file_extension(filename);

    let text = match extension.to_lowercase().as_str() {
        ".pdf" => extract_pdf(bytes)?,
        ".docx" => extract_docx(bytes)?,
        _ => {
            return Err(ExtractError::UnsupportedFormat {
                extension: extension.to_string(),
            })
        }
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Ok(ExtractedText {
            text,
            warning: Some(NO_TEXT_WARNING.to_string()),
        });
    }

    Ok(ExtractedText {
        text,
        warning: None,
    })
}

/// Returns the extension including its dot, or "" when the filename has none.
fn file_extension(filename: &str) -> &str {
    filename
        .rfind('.')
        .map(|idx| &filename[idx..])
        .unwrap_or("")
}

/// Extracts text page by page in document order, newline-joining pages that
/// yield text. A page with no extractable text contributes nothing.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let doc = lopdf::Document::load_from(Cursor::new(bytes))
        .map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut segments: Vec<String> = Vec::new();

    // get_pages is keyed by page number, so iteration follows document order.
    for page_num in doc.get_pages().keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                let page_text = page_text.trim();
                if !page_text.is_empty() {
                    segments.push(page_text.to_string());
                }
            }
            Err(e) => {
                // Image-only or malformed pages are skipped, not fatal.
                warn!("No text extracted from PDF page {page_num}: {e}");
            }
        }
    }

    Ok(segments.join("\n"))
}

/// Extracts every paragraph's run text in document order, skipping empty
/// paragraphs, newline-joined.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Parse(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();

    for child in docx.document.children {
        if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
            let text = paragraph_text(&paragraph);
            if !text.is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}
