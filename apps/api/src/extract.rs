//! Document extractor adapter: uploaded binary document to plain text.

use crate::errors::AppError;

/// Extracts plain text from an uploaded document.
///
/// Only PDF input is wired to a parser. Anything else (including the
/// DOC/DOCX types the upload UI offers) fails here as an extraction error,
/// which surfaces as a 4xx so the user can re-upload a readable file.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Could not read the uploaded document: {e}")))
}
