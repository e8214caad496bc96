//! # Transcript Snapshot
//!
//! The transcript is what the user actually sees: the static welcome entry
//! followed by the active conversation's messages. Renderer, search and
//! export all consume the same snapshot, so they always agree on indices,
//! sender labels and timestamp labels.

use crate::core::state::{App, WELCOME_TEXT};
use crate::core::store::Sender;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    /// Raw message text, formatter markup included.
    pub text: String,
    /// Timestamp exactly as displayed ("Ahora" for the welcome entry).
    pub timestamp_label: String,
}

impl TranscriptEntry {
    pub fn sender_label(&self) -> &'static str {
        match self.sender {
            Sender::User => "Usuario",
            Sender::Bot => "Chatbot",
        }
    }
}

/// Projects the app state into the displayed transcript. Index 0 is always
/// the welcome entry.
pub fn snapshot(app: &App) -> Vec<TranscriptEntry> {
    let mut entries = Vec::with_capacity(app.store.active().messages.len() + 1);
    entries.push(TranscriptEntry {
        sender: Sender::Bot,
        text: WELCOME_TEXT.to_string(),
        timestamp_label: "Ahora".to_string(),
    });
    for msg in &app.store.active().messages {
        entries.push(TranscriptEntry {
            sender: msg.sender,
            text: msg.text.clone(),
            timestamp_label: msg.timestamp.format("%H:%M").to_string(),
        });
    }
    entries
}
