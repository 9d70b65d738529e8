use crate::error::AppError;

/// Writes the export text to the system clipboard. Failure is reported to
/// the caller but never aborts the run; the computed text is not retried.
pub fn copy_text(text: &str) -> Result<(), AppError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AppError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| AppError::ClipboardError(e.to_string()))
}
