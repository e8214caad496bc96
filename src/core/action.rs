//! # Actions
//!
//! Everything that can happen in Charla becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Backend responds? That's `Action::ReplyReceived`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state and returns an `Effect` describing the I/O the
//! event loop should perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  mutated State + Effect
//! ```
//!
//! This makes everything testable: drive the reducer with a scripted action
//! sequence and assert on the resulting state, no terminal or server needed.

use log::{debug, warn};

use crate::backend::BackendError;
use crate::core::export::ExportFormat;
use crate::core::state::{App, Connection, Severity};
use crate::core::store::Sender;

/// Health-check result as the reducer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub model: String,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// User submitted the input box contents.
    Submit(String),
    NewConversation,
    SwitchConversation(String),
    DeleteConversation(String),
    /// Visual clear: truncates the active conversation, keeps backend history.
    ClearScreen,
    /// User asked the backend to forget its history.
    ClearHistoryRequested,
    ClearHistoryDone,
    ClearHistoryFailed(BackendError),
    /// A health-check attempt is about to run.
    HealthStarted,
    HealthOk(HealthReport),
    HealthFailed(String),
    ReplyReceived {
        reply: String,
        history_length: Option<usize>,
    },
    SendFailed(BackendError),
    ToggleTheme,
    ExportRequested(ExportFormat),
    ExportDone(String),
    ExportFailed(String),
    /// Periodic timer: expires notifications, refreshes the session clock.
    Tick,
    Quit,
}

/// I/O the event loop must perform after a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a `POST /chat` task for the given message text.
    SendChat(String),
    /// Spawn a `POST /clear-history` task.
    ClearHistory,
    /// Spawn a `GET /health` task now.
    CheckHealth,
    /// Sleep for the configured delay, then check health again.
    ScheduleHealthRetry,
    /// Persist the dark-mode preference.
    SavePrefs,
    /// Write the transcript snapshot to a file in the requested format.
    Export(ExportFormat),
    Quit,
}

// Notification texts, verbatim from the product's Spanish UI.
const MSG_EMPTY: &str = "Por favor, escribe un mensaje";
const MSG_DISCONNECTED: &str = "No hay conexión con el backend. Verifica que esté ejecutándose.";
const MSG_SEND_NETWORK: &str =
    "Error de conexión. Verifica tu conexión a internet y que el backend esté ejecutándose.";
const MSG_HEALTH_FAILED: &str =
    "❌ No se puede conectar al backend. Verifica que esté ejecutándose.";
const MSG_CLEAR_NETWORK: &str = "Error de conexión al limpiar historial";

/// Reports an error: always one notification, plus an inline transcript entry
/// when the text points at connectivity (the user should see it in context).
fn show_error(app: &mut App, text: &str) {
    app.notify(Severity::Error, text);
    if text.contains("conexión") || text.contains("backend") {
        app.store
            .append_active(Sender::Bot, format!("Error: {text}"));
        app.message_count += 1;
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(raw) => {
            let message = raw.trim().to_string();
            if message.is_empty() {
                show_error(app, MSG_EMPTY);
                return Effect::None;
            }
            if app.connection != Connection::Connected {
                show_error(app, MSG_DISCONNECTED);
                return Effect::None;
            }
            // One outstanding send at a time.
            if app.is_loading {
                return Effect::None;
            }
            // Record before confirm: the user's message is part of the
            // conversation whether or not the backend answers.
            app.store.append_active(Sender::User, message.clone());
            app.message_count += 1;
            app.is_loading = true;
            Effect::SendChat(message)
        }

        Action::ReplyReceived {
            reply,
            history_length,
        } => {
            app.is_loading = false;
            app.store.append_active(Sender::Bot, reply);
            app.message_count += 1;
            if let Some(len) = history_length {
                app.history_count = len;
            }
            app.notify(Severity::Success, "✅ Respuesta recibida");
            Effect::None
        }

        Action::SendFailed(err) => {
            app.is_loading = false;
            warn!("Send failed: {err}");
            match err {
                BackendError::Server { message, .. } => show_error(app, &message),
                BackendError::Network(_) | BackendError::Parse(_) => {
                    show_error(app, MSG_SEND_NETWORK)
                }
            }
            Effect::None
        }

        Action::NewConversation => {
            app.store.create();
            app.notify(Severity::Info, "✨ Nueva conversación creada");
            Effect::None
        }

        Action::SwitchConversation(id) => {
            match app.store.switch_active(&id) {
                Ok(()) => app.notify(Severity::Info, "🔁 Conversación cargada"),
                Err(e) => warn!("Switch failed: {e}"),
            }
            Effect::None
        }

        Action::DeleteConversation(id) => {
            match app.store.delete(&id) {
                Ok(()) => app.notify(Severity::Info, "🗑️ Conversación eliminada"),
                Err(e) => warn!("Delete failed: {e}"),
            }
            Effect::None
        }

        Action::ClearScreen => {
            app.store.clear_active();
            app.store.append_active(
                Sender::Bot,
                "Conversación visual limpiada. El historial del chatbot se mantiene.".to_string(),
            );
            app.notify(Severity::Info, "🗑️ Chat limpiado");
            Effect::None
        }

        Action::ClearHistoryRequested => Effect::ClearHistory,

        Action::ClearHistoryDone => {
            app.history_count = 0;
            app.store.clear_active();
            app.store.append_active(
                Sender::Bot,
                "Historial de conversación limpiado. Comenzando nueva conversación.".to_string(),
            );
            app.notify(Severity::Success, "✅ Historial limpiado correctamente");
            Effect::None
        }

        Action::ClearHistoryFailed(err) => {
            warn!("Clear history failed: {err}");
            match err {
                BackendError::Server { message, .. } => {
                    show_error(app, &format!("Error al limpiar historial: {message}"))
                }
                BackendError::Network(_) | BackendError::Parse(_) => {
                    show_error(app, MSG_CLEAR_NETWORK)
                }
            }
            Effect::None
        }

        Action::HealthStarted => {
            app.health_attempts += 1;
            debug!("Health check attempt {}", app.health_attempts);
            Effect::None
        }

        Action::HealthOk(report) => {
            let was_connected = app.connection == Connection::Connected;
            app.connection = Connection::Connected;
            app.model_name = Some(report.model);
            if !was_connected {
                app.notify(Severity::Success, "✅ Backend conectado correctamente");
                if report.features.iter().any(|f| f == "historial-conversacion") {
                    app.notify(Severity::Success, "✅ Historial de conversación activado");
                }
            }
            Effect::None
        }

        Action::HealthFailed(reason) => {
            warn!(
                "Health check failed (attempt {}): {reason}",
                app.health_attempts
            );
            app.connection = Connection::Disconnected;
            // Toast only. Inline transcript entries are reserved for
            // send-path errors; with the forever-retry this would flood
            // the conversation.
            app.notify(Severity::Error, MSG_HEALTH_FAILED);
            Effect::ScheduleHealthRetry
        }

        Action::ToggleTheme => {
            app.dark_mode = !app.dark_mode;
            let theme = if app.dark_mode { "oscuro" } else { "claro" };
            app.notify(Severity::Info, format!("🌓 Modo {theme} activado"));
            Effect::SavePrefs
        }

        Action::ExportRequested(format) => Effect::Export(format),

        Action::ExportDone(filename) => {
            app.notify(
                Severity::Success,
                format!("✅ Conversación exportada como {filename}"),
            );
            Effect::None
        }

        Action::ExportFailed(reason) => {
            show_error(app, &format!("Error al exportar: {reason}"));
            Effect::None
        }

        Action::Tick => {
            app.expire_notifications(chrono::Local::now());
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
