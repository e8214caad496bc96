//! # Application State
//!
//! Core business state for Charla. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── store: ConversationStore      // conversation threads
//! ├── connection: Connection        // backend reachability
//! ├── model_name: Option<String>    // reported by /health
//! ├── user_id: String               // per-session backend identity
//! ├── session_start: DateTime       // for the status bar timer
//! ├── message_count: usize          // messages added this session
//! ├── history_count: usize          // backend-reported history length
//! ├── is_loading: bool              // one in-flight send at a time
//! ├── health_attempts: u32          // health retry accounting
//! ├── dark_mode: bool               // persisted preference
//! └── notifications: Vec            // pending toasts
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{DateTime, Local};

use crate::core::store::ConversationStore;

/// Static first transcript entry. Never searched, always exported.
pub const WELCOME_TEXT: &str = "¡Hola! Soy un chatbot de IA creado como proyecto de portafolio. \
Puedo mantener conversaciones y recordar el contexto. ¿En qué puedo ayudarte hoy?";

/// Backend reachability as last observed by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connection {
    Connecting,
    Connected,
    Disconnected,
}

/// Severity of a user-facing toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
    pub created_at: DateTime<Local>,
}

/// Generates a session-scoped user id of the form `user_<millis>_<random>`.
pub fn generate_user_id() -> String {
    let millis = Local::now().timestamp_millis();
    let suffix: String = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(9)
        .collect();
    format!("user_{millis}_{suffix}")
}

pub struct App {
    pub store: ConversationStore,
    pub connection: Connection,
    /// Model name reported by the backend health check.
    pub model_name: Option<String>,
    pub user_id: String,
    pub session_start: DateTime<Local>,
    /// Messages added this session, user and bot alike.
    pub message_count: usize,
    /// Backend-reported history length for this user.
    pub history_count: usize,
    pub is_loading: bool,
    /// Completed health-check attempts, kept for the status bar and logs.
    pub health_attempts: u32,
    pub dark_mode: bool,
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            store: ConversationStore::new(),
            connection: Connection::Connecting,
            model_name: None,
            user_id: generate_user_id(),
            session_start: Local::now(),
            message_count: 0,
            history_count: 0,
            is_loading: false,
            health_attempts: 0,
            dark_mode,
            notifications: Vec::new(),
        }
    }

    pub fn notify(&mut self, severity: Severity, text: impl Into<String>) {
        self.notifications.push(Notification {
            text: text.into(),
            severity,
            created_at: Local::now(),
        });
    }

    /// Drops notifications older than five seconds. Called on every tick.
    pub fn expire_notifications(&mut self, now: DateTime<Local>) {
        self.notifications
            .retain(|n| (now - n.created_at).num_milliseconds() < 5_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_app_new_defaults() {
        let app = App::new(false);
        assert_eq!(app.connection, Connection::Connecting);
        assert!(!app.is_loading);
        assert!(app.model_name.is_none());
        assert_eq!(app.message_count, 0);
        assert_eq!(app.store.len(), 1);
    }

    #[test]
    fn test_user_id_shape() {
        let id = generate_user_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "user");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_notifications_expire_after_five_seconds() {
        let mut app = App::new(false);
        app.notify(Severity::Info, "reciente");
        app.notifications.push(Notification {
            text: "viejo".to_string(),
            severity: Severity::Error,
            created_at: Local::now() - Duration::seconds(6),
        });
        app.expire_notifications(Local::now());
        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.notifications[0].text, "reciente");
    }
}
