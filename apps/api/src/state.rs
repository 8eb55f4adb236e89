use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LanguageModel;
use crate::preferences::history::ConversationHistory;
use crate::real_estate::analysis::AnalysisProvider;
use crate::store::KvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation for chat, knowledge-base answers and summaries.
    pub llm: Arc<dyn LanguageModel>,
    /// Property analysis. Default: `LlmAnalysisProvider` over `llm`.
    pub analysis: Arc<dyn AnalysisProvider>,
    /// Persistence port for settings and history.
    pub store: Arc<dyn KvStore>,
    pub conversations: Arc<ConversationHistory>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        analysis: Arc<dyn AnalysisProvider>,
        store: Arc<dyn KvStore>,
        config: Config,
    ) -> Self {
        let conversations = Arc::new(ConversationHistory::new(store.clone()));
        Self {
            llm,
            analysis,
            store,
            conversations,
            config,
        }
    }
}
