//! Text Extractor — turns an uploaded résumé payload into plain text.
//!
//! Wraps `pdf-extract` for PDFs; plain text passes through. DOCX payloads are
//! rejected with a validation error (see DESIGN.md).

use crate::errors::AppError;

/// Extracts plain text from an uploaded file, dispatching on the filename
/// extension. Empty extraction output is an error — scoring and tailoring
/// both require non-empty text.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<String, AppError> {
    let lower = filename.to_lowercase();

    let text = if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("could not read PDF: {e}")))?
    } else if lower.ends_with(".txt") {
        String::from_utf8_lossy(bytes).into_owned()
    } else {
        let ext = filename.rsplit('.').next().unwrap_or("unknown");
        return Err(AppError::Validation(format!(
            "unsupported file type '.{ext}' — upload a .pdf or .txt resume"
        )));
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "no text could be extracted from the uploaded file".to_string(),
        ));
    }

    Ok(text)
}
