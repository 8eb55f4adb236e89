//! Summarization of pasted text and uploaded documents.

use serde::Serialize;
use thiserror::Error;

use crate::assistant::prompts::{SUMMARIZE_PROMPT_TEMPLATE, SUMMARIZE_SYSTEM};
use crate::llm_client::prompts::fill;
use crate::llm_client::{LanguageModel, LlmError, Turn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Unsupported file type: {0}. Upload a PDF or plain-text file")]
    Unsupported(String),

    #[error("Could not extract text from PDF: {0}")]
    Pdf(String),

    #[error("Text file is not valid UTF-8")]
    NotUtf8,

    #[error("Uploaded file contains no text")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub summary: String,
    /// True when the content was cut to the configured limit first.
    pub truncated: bool,
}

/// Returns the first `max_chars` characters of `text` and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

pub async fn summarize_content(
    llm: &dyn LanguageModel,
    content: &str,
    max_chars: usize,
) -> Result<Summary, LlmError> {
    let (content, truncated) = truncate_chars(content.trim(), max_chars);
    let prompt = fill(SUMMARIZE_PROMPT_TEMPLATE, &[("content", content)]);
    let summary = llm.complete(SUMMARIZE_SYSTEM, &[Turn::user(&prompt)]).await?;
    Ok(Summary { summary, truncated })
}

const TEXT_EXTENSIONS: &[&str] = &[".txt", ".md", ".csv", ".json"];

/// Extracts plain text from an uploaded file. PDFs are recognised by content
/// type, file extension or magic bytes. CPU-bound for PDFs.
pub fn extract_upload_text(
    content_type: Option<&str>,
    file_name: Option<&str>,
    data: &[u8],
) -> Result<String, UploadError> {
    let content_type = content_type.map(str::to_ascii_lowercase);
    let file_name = file_name.map(str::to_ascii_lowercase);
    let is_pdf = content_type.as_deref() == Some("application/pdf")
        || has_extension(file_name.as_deref(), &[".pdf"])
        || data.starts_with(b"%PDF-");
    let is_text = content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("text/"))
        || has_extension(file_name.as_deref(), TEXT_EXTENSIONS);

    let text = if is_pdf {
        pdf_extract::extract_text_from_mem(data).map_err(|e| UploadError::Pdf(e.to_string()))?
    } else if is_text {
        String::from_utf8(data.to_vec()).map_err(|_| UploadError::NotUtf8)?
    } else {
        let label = content_type
            .or(file_name)
            .unwrap_or_else(|| "unknown".to_string());
        return Err(UploadError::Unsupported(label));
    };

    if text.trim().is_empty() {
        return Err(UploadError::Empty);
    }
    Ok(text)
}

fn has_extension(file_name: Option<&str>, extensions: &[&str]) -> bool {
    file_name.is_some_and(|name| extensions.iter().any(|ext| name.ends_with(ext)))
}
