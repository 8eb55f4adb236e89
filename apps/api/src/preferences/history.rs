//! Conversation history — a newest-first list of conversations stored under a
//! single key.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::models::conversation::{Conversation, Role};
use crate::store::{load_json, save_json, KvStore, StoreError};

pub const CONVERSATIONS_KEY: &str = "aura-ai-conversations";

pub struct ConversationHistory {
    store: Arc<dyn KvStore>,
    // Serializes read-modify-write cycles on the conversation list.
    write_lock: Mutex<()>,
}

impl ConversationHistory {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All conversations, newest first.
    pub async fn list(&self) -> Result<Vec<Conversation>, StoreError> {
        load_json(self.store.as_ref(), CONVERSATIONS_KEY).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Conversation>, StoreError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }

    /// Inserts or replaces by id, then re-sorts newest first.
    pub async fn save(&self, conversation: Conversation) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.load_for_update().await?;
        upsert(&mut all, conversation);
        save_json(self.store.as_ref(), CONVERSATIONS_KEY, &all).await
    }

    /// Returns whether a conversation was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.load_for_update().await?;
        let before = all.len();
        all.retain(|c| c.id != id);
        if all.len() == before {
            return Ok(false);
        }
        save_json(self.store.as_ref(), CONVERSATIONS_KEY, &all).await?;
        Ok(true)
    }

    /// The stored list for a read-modify-write. Unlike `list`, a malformed
    /// value is an error so that writing back cannot discard it.
    async fn load_for_update(&self) -> Result<Vec<Conversation>, StoreError> {
        match self.store.get(CONVERSATIONS_KEY).await? {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value).map_err(|e| {
                error!("Stored conversation list is malformed, refusing to overwrite it: {e}");
                StoreError::Serialization(e)
            }),
        }
    }

    /// Records one user/assistant exchange. Creates the conversation when
    /// `id` is `None` or unknown.
    pub async fn append_exchange(
        &self,
        id: Option<&str>,
        query: &str,
        reply: &str,
    ) -> Result<Conversation, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.load_for_update().await?;

        let mut conversation = id
            .and_then(|id| all.iter().find(|c| c.id == id).cloned())
            .unwrap_or_else(|| {
                let id = id
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("chat-{}", uuid::Uuid::new_v4()));
                Conversation::new(id, Utc::now())
            });

        conversation.push(Role::User, query);
        conversation.push(Role::Assistant, reply);
        debug!(
            "Conversation {} now has {} messages",
            conversation.id,
            conversation.messages.len()
        );

        upsert(&mut all, conversation.clone());
        save_json(self.store.as_ref(), CONVERSATIONS_KEY, &all).await?;
        Ok(conversation)
    }
}

fn upsert(all: &mut Vec<Conversation>, conversation: Conversation) {
    match all.iter_mut().find(|c| c.id == conversation.id) {
        Some(existing) => *existing = conversation,
        None => all.push(conversation),
    }
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn history() -> ConversationHistory {
        ConversationHistory::new(Arc::new(MemoryStore::new()))
    }

    fn convo(id: &str, minutes: i64) -> Conversation {
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Conversation::new(id.to_string(), base + Duration::minutes(minutes))
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let h = history();
        h.save(convo("old", 1)).await.unwrap();
        h.save(convo("new", 10)).await.unwrap();
        h.save(convo("mid", 5)).await.unwrap();

        let ids: Vec<_> = h.list().await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_save_replaces_existing_id() {
        let h = history();
        h.save(convo("a", 1)).await.unwrap();

        let mut updated = convo("a", 1);
        updated.push(Role::User, "hello there");
        h.save(updated).await.unwrap();

        let all = h.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "hello there");
        assert_eq!(all[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let h = history();
        h.save(convo("a", 1)).await.unwrap();
        assert!(h.delete("a").await.unwrap());
        assert!(!h.delete("a").await.unwrap());
        assert!(h.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_exchange_creates_then_extends() {
        let h = history();
        let first = h
            .append_exchange(None, "What is a jeonse ratio?", "It is deposit over price.")
            .await
            .unwrap();
        assert!(first.id.starts_with("chat-"));
        assert_eq!(first.title, "What is a jeonse ratio?");
        assert_eq!(first.messages.len(), 2);
        assert_eq!(first.messages[1].role, Role::Assistant);

        let second = h
            .append_exchange(Some(&first.id), "And LTV?", "Loan over price.")
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.messages.len(), 4);
        assert_eq!(second.title, "What is a jeonse ratio?");
        assert_eq!(h.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_append_exchange_with_unknown_id_keeps_that_id() {
        let h = history();
        let c = h.append_exchange(Some("chat-42"), "hi", "hello").await.unwrap();
        assert_eq!(c.id, "chat-42");
        assert!(h.get("chat-42").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_malformed_history_is_not_overwritten() {
        let store = Arc::new(MemoryStore::new());
        let corrupt = serde_json::json!({"not": "a list"});
        store.set(CONVERSATIONS_KEY, corrupt.clone()).await.unwrap();
        let h = ConversationHistory::new(store.clone());

        // Reads still degrade to an empty list.
        assert!(h.list().await.unwrap().is_empty());

        let err = h.append_exchange(None, "hi", "hello").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(h.save(convo("a", 1)).await.is_err());
        assert!(h.delete("a").await.is_err());

        assert_eq!(store.get(CONVERSATIONS_KEY).await.unwrap(), Some(corrupt));
    }
}
