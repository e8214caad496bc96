//! # Conversation Store
//!
//! In-memory list of conversation threads, each an ordered list of messages.
//! The store exclusively owns every `Conversation` and `Message`; all mutation
//! goes through its operations, observed by the renderer on the next frame.
//!
//! Invariant: the store always holds at least one conversation, and exactly
//! one of them is active. Deleting the last conversation auto-creates a fresh
//! empty one; deleting the active conversation re-selects a neighbor
//! (same index if possible, else the previous one).

use std::fmt;

use chrono::{DateTime, Local};

/// Opaque conversation identifier (`conv_<uuid>`).
pub type ConversationId = String;

/// Who authored a message. Messages are immutable once appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: ConversationId,
    pub title: String,
    pub messages: Vec<Message>,
}

/// The requested conversation id does not exist in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound(pub ConversationId);

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conversation not found: {}", self.0)
    }
}

impl std::error::Error for NotFound {}

fn new_conversation_id() -> ConversationId {
    format!("conv_{}", uuid::Uuid::new_v4())
}

pub struct ConversationStore {
    conversations: Vec<Conversation>,
    active_id: ConversationId,
    /// Running total of conversations ever created, used for display titles.
    created: usize,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// Creates a store with exactly one empty conversation, which is active.
    pub fn new() -> Self {
        let initial = Conversation {
            id: new_conversation_id(),
            title: "Conversación nueva".to_string(),
            messages: Vec::new(),
        };
        let active_id = initial.id.clone();
        Self {
            conversations: vec![initial],
            active_id,
            created: 1,
        }
    }

    /// Inserts a new empty conversation at the front of the list and makes it
    /// active. Returns the new id.
    pub fn create(&mut self) -> ConversationId {
        self.created += 1;
        let conv = Conversation {
            id: new_conversation_id(),
            title: format!("Conversación {}", self.created),
            messages: Vec::new(),
        };
        let id = conv.id.clone();
        self.conversations.insert(0, conv);
        self.active_id = id.clone();
        id
    }

    pub fn switch_active(&mut self, id: &str) -> Result<(), NotFound> {
        if !self.conversations.iter().any(|c| c.id == id) {
            return Err(NotFound(id.to_string()));
        }
        self.active_id = id.to_string();
        Ok(())
    }

    /// Removes a conversation. If it was the last one, a fresh empty
    /// conversation is created so the store never becomes empty. If it was
    /// active, the neighbor at the same index (else the previous) is selected.
    pub fn delete(&mut self, id: &str) -> Result<(), NotFound> {
        let idx = self
            .conversations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| NotFound(id.to_string()))?;
        let was_active = self.active_id == id;
        self.conversations.remove(idx);

        if self.conversations.is_empty() {
            let conv = Conversation {
                id: new_conversation_id(),
                title: "Conversación nueva".to_string(),
                messages: Vec::new(),
            };
            self.active_id = conv.id.clone();
            self.conversations.push(conv);
            return Ok(());
        }

        if was_active {
            let neighbor = idx.min(self.conversations.len() - 1);
            self.active_id = self.conversations[neighbor].id.clone();
        }
        Ok(())
    }

    /// Appends a message with the current timestamp. No size cap; growth is
    /// bounded only by the session.
    pub fn append(&mut self, id: &str, sender: Sender, text: String) -> Result<(), NotFound> {
        let conv = self
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| NotFound(id.to_string()))?;
        conv.messages.push(Message {
            sender,
            text,
            timestamp: Local::now(),
        });
        Ok(())
    }

    /// Appends a message to the active conversation.
    pub fn append_active(&mut self, sender: Sender, text: String) {
        let id = self.active_id.clone();
        // The active id always refers to a stored conversation.
        let _ = self.append(&id, sender, text);
    }

    /// Truncates the active conversation's message list to empty.
    pub fn clear_active(&mut self) {
        let id = self.active_id.clone();
        if let Some(conv) = self.conversations.iter_mut().find(|c| c.id == id) {
            conv.messages.clear();
        }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    pub fn active(&self) -> &Conversation {
        self.conversations
            .iter()
            .find(|c| c.id == self.active_id)
            .expect("store invariant: active id always present")
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_one_active_conversation() {
        let store = ConversationStore::new();
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().id, store.active_id());
        assert!(store.active().messages.is_empty());
    }

    #[test]
    fn test_create_inserts_at_front_and_activates() {
        let mut store = ConversationStore::new();
        let first = store.active_id().to_string();
        let id = store.create();
        assert_eq!(store.len(), 2);
        assert_eq!(store.conversations()[0].id, id);
        assert_eq!(store.active_id(), id);
        assert_eq!(store.conversations()[1].id, first);
    }

    #[test]
    fn test_switch_active_unknown_id_is_not_found() {
        let mut store = ConversationStore::new();
        let err = store.switch_active("conv_missing").unwrap_err();
        assert_eq!(err, NotFound("conv_missing".to_string()));
    }

    #[test]
    fn test_delete_last_conversation_auto_creates() {
        let mut store = ConversationStore::new();
        let id = store.active_id().to_string();
        store.delete(&id).unwrap();
        assert_eq!(store.len(), 1);
        assert_ne!(store.active_id(), id);
        assert!(store.active().messages.is_empty());
    }

    #[test]
    fn test_delete_active_selects_same_index_neighbor() {
        let mut store = ConversationStore::new();
        let oldest = store.active_id().to_string();
        let middle = store.create();
        let newest = store.create();
        // Order is [newest, middle, oldest]; delete the active (newest).
        store.delete(&newest).unwrap();
        assert_eq!(store.active_id(), middle);
        // Delete the active again (now at index 0): same-index neighbor is oldest.
        store.delete(&middle).unwrap();
        assert_eq!(store.active_id(), oldest);
    }

    #[test]
    fn test_delete_active_at_end_selects_previous() {
        let mut store = ConversationStore::new();
        let oldest = store.active_id().to_string();
        let newer = store.create();
        store.switch_active(&oldest).unwrap();
        // Active is the last element; deleting it must select the previous one.
        store.delete(&oldest).unwrap();
        assert_eq!(store.active_id(), newer);
    }

    #[test]
    fn test_delete_inactive_keeps_active() {
        let mut store = ConversationStore::new();
        let old = store.active_id().to_string();
        let active = store.create();
        store.delete(&old).unwrap();
        assert_eq!(store.active_id(), active);
    }

    #[test]
    fn test_store_never_empty_under_create_delete_sequences() {
        let mut store = ConversationStore::new();
        for round in 0..20 {
            if round % 3 == 0 {
                store.create();
            }
            let id = store.conversations()[0].id.clone();
            store.delete(&id).unwrap();
            assert!(store.len() >= 1, "store emptied at round {round}");
            // Exactly one conversation is active.
            let active_matches = store
                .conversations()
                .iter()
                .filter(|c| c.id == store.active_id())
                .count();
            assert_eq!(active_matches, 1);
        }
    }

    #[test]
    fn test_append_records_order_and_sender() {
        let mut store = ConversationStore::new();
        let id = store.active_id().to_string();
        store.append(&id, Sender::User, "hola".to_string()).unwrap();
        store.append(&id, Sender::Bot, "buenas".to_string()).unwrap();
        let msgs = &store.active().messages;
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].sender, Sender::User);
        assert_eq!(msgs[0].text, "hola");
        assert_eq!(msgs[1].sender, Sender::Bot);
        assert!(msgs[0].timestamp <= msgs[1].timestamp);
    }

    #[test]
    fn test_append_unknown_id_is_not_found() {
        let mut store = ConversationStore::new();
        assert!(store.append("conv_nope", Sender::User, "x".into()).is_err());
    }

    #[test]
    fn test_clear_active_truncates_only_active() {
        let mut store = ConversationStore::new();
        let old = store.active_id().to_string();
        store.append_active(Sender::User, "keep me".to_string());
        store.create();
        store.append_active(Sender::User, "drop me".to_string());
        store.clear_active();
        assert!(store.active().messages.is_empty());
        store.switch_active(&old).unwrap();
        assert_eq!(store.active().messages.len(), 1);
    }
}
