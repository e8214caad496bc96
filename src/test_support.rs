//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::state::{App, Connection};
use crate::core::store::Sender;

/// Creates a test App that believes the backend is reachable.
pub fn connected_app() -> App {
    let mut app = App::new(false);
    app.connection = Connection::Connected;
    app.model_name = Some("test-model".to_string());
    app
}

/// Creates a connected App with alternating user/bot messages in the active
/// conversation.
pub fn app_with_messages(texts: &[&str]) -> App {
    let mut app = connected_app();
    for (i, text) in texts.iter().enumerate() {
        let sender = if i % 2 == 0 { Sender::User } else { Sender::Bot };
        app.store.append_active(sender, text.to_string());
    }
    app
}
