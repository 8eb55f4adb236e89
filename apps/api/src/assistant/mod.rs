// Aura AI assistant tools: chat, knowledge-base Q&A and summarization.

pub mod chat;
pub mod handlers;
pub mod knowledge;
pub mod prompts;
pub mod summarize;
