// ABOUTME: PDF text and metadata extraction from base64 payloads
// ABOUTME: Also builds browser-ready data URLs for stored PDFs

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use lopdf::{Document as PdfDocument, Object};
use serde::Serialize;
use tracing::debug;

const DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("Invalid base64 string: {0}")]
    InvalidBase64(String),

    #[error("Error extracting PDF content: {0}")]
    Parse(String),

    #[error("Error extracting text from page {page}: {message}")]
    PageText { page: u32, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PdfMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PdfContent {
    pub text: String,
    pub page_count: usize,
    pub metadata: PdfMetadata,
}

/// Decode a base64 payload, tolerating a `data:...;base64,` prefix and line breaks.
pub fn decode_base64_payload(content: &str) -> Result<Vec<u8>, PdfError> {
    let raw = strip_data_url(content);
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    BASE64
        .decode(cleaned.as_bytes())
        .map_err(|e| PdfError::InvalidBase64(e.to_string()))
}

pub fn extract_pdf_content(content_base64: &str) -> Result<PdfContent, PdfError> {
    let bytes = decode_base64_payload(content_base64)?;
    extract_pdf_bytes(&bytes)
}

/// Parse raw PDF bytes; page texts are joined with a blank line.
pub fn extract_pdf_bytes(bytes: &[u8]) -> Result<PdfContent, PdfError> {
    let doc = PdfDocument::load_mem(bytes).map_err(|e| PdfError::Parse(e.to_string()))?;
    let pages = doc.get_pages();

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = doc
            .extract_text(&[*page_number])
            .map_err(|e| PdfError::PageText {
                page: *page_number,
                message: e.to_string(),
            })?;
        text.push_str(page_text.trim_end());
        text.push_str("\n\n");
    }

    debug!("Extracted {} chars from {} pages", text.len(), pages.len());

    Ok(PdfContent {
        text,
        page_count: pages.len(),
        metadata: read_metadata(&doc),
    })
}

/// Data URL for a stored payload. Idempotent on input that is already a data URL.
pub fn pdf_data_url(content_base64: &str) -> String {
    format!("{}{}", DATA_URL_PREFIX, strip_data_url(content_base64))
}

fn strip_data_url(content: &str) -> &str {
    match content.split_once(',') {
        Some((_, payload)) => payload,
        None => content,
    }
}

fn read_metadata(doc: &PdfDocument) -> PdfMetadata {
    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_dictionary(*id).ok(),
        Ok(Object::Dictionary(dict)) => Some(dict),
        _ => None,
    };

    let Some(info) = info else {
        return PdfMetadata::default();
    };

    let field = |key: &[u8]| -> Option<String> {
        match info.get(key).ok()? {
            Object::String(bytes, _) => decode_pdf_string(bytes),
            Object::Reference(id) => match doc.get_object(*id).ok()? {
                Object::String(bytes, _) => decode_pdf_string(bytes),
                _ => None,
            },
            _ => None,
        }
    };

    PdfMetadata {
        title: field(b"Title"),
        author: field(b"Author"),
        subject: field(b"Subject"),
        creator: field(b"Creator"),
        producer: field(b"Producer"),
        creation_date: field(b"CreationDate"),
    }
}

/// Text strings are either UTF-16BE with a BOM or single-byte.
fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    let text = if bytes.starts_with(&[0xFE, 0xFF]) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    let trimmed = text.trim_matches(char::from(0)).trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
