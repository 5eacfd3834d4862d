// ABOUTME: Uploaded PDF documents for the Financial Advisor API
// ABOUTME: Storage for document rows, on-disk uploads, and PDF text/metadata extraction

pub mod pdf;
pub mod storage;
pub mod types;
pub mod uploads;

pub use pdf::{extract_pdf_bytes, extract_pdf_content, pdf_data_url, PdfContent, PdfError, PdfMetadata};
pub use storage::DocumentStorage;
pub use types::{Document, DocumentAnalysis, DocumentUpdateInput, DocumentUpload, NewDocument};
