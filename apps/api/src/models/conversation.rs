use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to a conversation until its first query arrives.
pub const NEW_CHAT_TITLE: &str = "New Chat";
/// Conversation titles are the first N characters of the opening query.
pub const TITLE_MAX_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: NEW_CHAT_TITLE.to_string(),
            messages: Vec::new(),
            created_at,
        }
    }

    /// Appends a message; the first user message also names the conversation.
    pub fn push(&mut self, role: Role, content: &str) {
        if role == Role::User && !self.messages.iter().any(|m| m.role == Role::User) {
            self.title = content.chars().take(TITLE_MAX_CHARS).collect();
        }
        self.messages.push(Message {
            id: format!("msg-{}", uuid::Uuid::new_v4()),
            role,
            content: content.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_user_message_sets_title() {
        let mut convo = Conversation::new("c1".to_string(), Utc::now());
        convo.push(Role::User, "How much should I keep as an emergency fund?");
        assert_eq!(convo.title, "How much should I keep as an e");
        assert_eq!(convo.title.chars().count(), TITLE_MAX_CHARS);

        convo.push(Role::User, "second question");
        assert_eq!(convo.title, "How much should I keep as an e");
    }

    #[test]
    fn test_assistant_message_does_not_set_title() {
        let mut convo = Conversation::new("c1".to_string(), Utc::now());
        convo.push(Role::Assistant, "Hello!");
        assert_eq!(convo.title, NEW_CHAT_TITLE);
        assert_eq!(convo.messages.len(), 1);
    }

    #[test]
    fn test_title_truncation_respects_multibyte_chars() {
        let mut convo = Conversation::new("c1".to_string(), Utc::now());
        convo.push(Role::User, &"전".repeat(40));
        assert_eq!(convo.title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
