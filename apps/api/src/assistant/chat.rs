//! Chat — multi-turn replies shaped by the user's tone and verbosity settings.

use serde::{Deserialize, Serialize};

use crate::assistant::prompts::CHAT_SYSTEM;
use crate::llm_client::prompts::{fill, ASSISTANT_PERSONA};
use crate::llm_client::{LanguageModel, LlmError, Turn};
use crate::models::conversation::{Message, Role};
use crate::models::settings::Settings;

/// Only the most recent turns of a long conversation are forwarded.
pub const MAX_HISTORY_TURNS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for HistoryTurn {
    fn from(m: &Message) -> Self {
        Self {
            role: m.role,
            content: m.content.clone(),
        }
    }
}

/// Generates a reply to `query` given the prior `history`.
pub async fn chat_response(
    llm: &dyn LanguageModel,
    settings: &Settings,
    history: &[HistoryTurn],
    query: &str,
) -> Result<String, LlmError> {
    let style = settings.style_instruction();
    let system = fill(
        CHAT_SYSTEM,
        &[("persona", ASSISTANT_PERSONA), ("style", style.as_str())],
    );
    let turns = build_turns(history, query);
    llm.complete(&system, &turns).await
}

/// Recent non-empty history followed by the query. The model expects the
/// exchange to open with a user turn, so leading assistant turns are dropped.
fn build_turns<'a>(history: &'a [HistoryTurn], query: &'a str) -> Vec<Turn<'a>> {
    let start = history.len().saturating_sub(MAX_HISTORY_TURNS);
    let mut turns: Vec<Turn<'a>> = history[start..]
        .iter()
        .filter(|t| !t.content.trim().is_empty())
        .skip_while(|t| t.role == Role::Assistant)
        .map(|t| Turn {
            role: t.role,
            content: t.content.as_str(),
        })
        .collect();
    turns.push(Turn::user(query));
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{AiTone, ResponseVerbosity};
    use crate::test_support::ScriptedModel;

    fn turn(role: Role, content: &str) -> HistoryTurn {
        HistoryTurn {
            role,
            content: content.to_string(),
        }
    }

    #[test]
    fn test_build_turns_appends_query_last() {
        let history = vec![turn(Role::User, "hi"), turn(Role::Assistant, "hello")];
        let turns = build_turns(&history, "how are you?");
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[2].role, Role::User);
        assert_eq!(turns[2].content, "how are you?");
    }

    #[test]
    fn test_build_turns_drops_leading_assistant_and_empty_turns() {
        let history = vec![
            turn(Role::Assistant, "Welcome!"),
            turn(Role::User, "  "),
            turn(Role::User, "question"),
            turn(Role::Assistant, "answer"),
        ];
        let turns = build_turns(&history, "follow-up");
        let contents: Vec<_> = turns.iter().map(|t| t.content).collect();
        assert_eq!(contents, ["question", "answer", "follow-up"]);
    }

    #[test]
    fn test_build_turns_keeps_only_recent_history() {
        let history: Vec<_> = (0..50)
            .map(|i| {
                let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
                turn(role, &format!("m{i}"))
            })
            .collect();
        let turns = build_turns(&history, "q");
        assert_eq!(turns.len(), MAX_HISTORY_TURNS + 1);
        assert_eq!(turns[0].content, "m30");
    }

    #[tokio::test]
    async fn test_chat_response_uses_settings_in_system_prompt() {
        let model = ScriptedModel::new(["Sure!"]);
        let calls = model.calls();
        let settings = Settings {
            ai_tone: AiTone::Witty,
            response_verbosity: ResponseVerbosity::Concise,
        };

        let reply = chat_response(&model, &settings, &[], "Tell me about budgets")
            .await
            .unwrap();
        assert_eq!(reply, "Sure!");

        let calls = calls.lock().await;
        assert!(calls[0].system.contains("Aura AI"));
        assert!(calls[0].system.contains("witty"));
        assert!(calls[0].system.contains("short"));
        assert_eq!(calls[0].turns.len(), 1);
        assert_eq!(calls[0].turns[0].content, "Tell me about budgets");
    }

    #[tokio::test]
    async fn test_chat_response_forwards_history_roles() {
        let model = ScriptedModel::new(["About 20%."]);
        let calls = model.calls();
        let history = vec![
            turn(Role::User, "What is a jeonse ratio?"),
            turn(Role::Assistant, "Deposit over price."),
        ];

        chat_response(&model, &Settings::default(), &history, "And a safe LTV?")
            .await
            .unwrap();

        let calls = calls.lock().await;
        let roles: Vec<_> = calls[0].turns.iter().map(|t| t.role).collect();
        assert_eq!(roles, [Role::User, Role::Assistant, Role::User]);
        assert_eq!(calls[0].turns[1].content, "Deposit over price.");
    }
}
