use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assistant::chat::{chat_response, HistoryTurn};
use crate::assistant::knowledge::{answer_question, KnowledgeAnswer};
use crate::assistant::summarize::{extract_upload_text, summarize_content, Summary};
use crate::errors::AppError;
use crate::preferences::settings::load_settings;
use crate::state::AppState;

const CHAT_FAILED: &str = "Failed to get response from AI.";
const KNOWLEDGE_FAILED: &str = "Failed to get answer from knowledge base.";
const SUMMARIZE_FAILED: &str = "Failed to summarize content.";

/// Multipart field holding the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    pub conversation_id: Option<String>,
    /// Starts a stored conversation when no `conversation_id` is given.
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KnowledgeRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub content: String,
}

fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let query = require_text(&req.query, "query")?;
    let settings = load_settings(state.store.as_ref()).await?;

    // Fall back to the stored transcript when the client sends no history.
    let history = match (&req.conversation_id, req.history.is_empty()) {
        (Some(id), true) => state
            .conversations
            .get(id)
            .await?
            .map(|c| c.messages.iter().map(HistoryTurn::from).collect())
            .unwrap_or_default(),
        _ => req.history,
    };

    let response = chat_response(state.llm.as_ref(), &settings, &history, query)
        .await
        .map_err(|e| AppError::llm(CHAT_FAILED, e))?;

    // Exchanges in a known conversation are always recorded.
    let conversation_id = if req.persist || req.conversation_id.is_some() {
        let conversation = state
            .conversations
            .append_exchange(req.conversation_id.as_deref(), query, &response)
            .await?;
        Some(conversation.id)
    } else {
        req.conversation_id
    };

    Ok(Json(ChatResponse {
        response,
        conversation_id,
    }))
}

/// POST /api/v1/knowledge
pub async fn handle_knowledge(
    State(state): State<AppState>,
    Json(req): Json<KnowledgeRequest>,
) -> Result<Json<KnowledgeAnswer>, AppError> {
    let query = require_text(&req.query, "query")?;
    let answer = answer_question(state.llm.as_ref(), query)
        .await
        .map_err(|e| AppError::llm(KNOWLEDGE_FAILED, e))?;
    Ok(Json(answer))
}

/// POST /api/v1/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<Summary>, AppError> {
    let content = require_text(&req.content, "content")?;
    summarize(&state, content).await
}

/// POST /api/v1/summarize/upload
///
/// Multipart form with a single `file` field (PDF or plain text).
pub async fn handle_summarize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Summary>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        info!("Summarizing upload {:?} ({} bytes)", file_name, data.len());

        let text = tokio::task::spawn_blocking(move || {
            extract_upload_text(content_type.as_deref(), file_name.as_deref(), &data)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Text extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

        return summarize(&state, &text).await;
    }

    Err(AppError::Validation(format!(
        "multipart body must contain a '{UPLOAD_FIELD}' field"
    )))
}

async fn summarize(state: &AppState, content: &str) -> Result<Json<Summary>, AppError> {
    let summary = summarize_content(state.llm.as_ref(), content, state.config.summary_max_chars)
        .await
        .map_err(|e| AppError::llm(SUMMARIZE_FAILED, e))?;
    Ok(Json(summary))
}
