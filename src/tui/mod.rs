//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! intention is to swap this out for a different adapter (web, etc.) in the
//! future if needed.
//!
//! ## Event Loop
//!
//! A single synchronous loop owns `App` and `TuiState`. Network calls run on
//! tokio tasks that report back through an mpsc channel of `Action` values;
//! the loop drains that channel between frames, so state mutation stays
//! single-threaded and only one send can be in flight (`App::is_loading`).

mod component;
pub mod components;
pub mod event;
pub mod richtext;
pub mod theme;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use chrono::Local;
use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::{ChatBackend, HttpBackend};
use crate::core::action::{Action, Effect, HealthReport, update};
use crate::core::config::ResolvedConfig;
use crate::core::export::ExportMeta;
use crate::core::prefs::{self, Prefs};
use crate::core::state::App;
use crate::core::{export, search, transcript};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ConversationEvent, ExportDialogState, ExportEvent, InputBox, InputEvent, SearchEvent,
    SearchPanelState, SidebarState, TranscriptViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Active modal overlay. At most one is open; it captures all key events
/// until dismissed.
pub enum Overlay {
    Conversations(SidebarState),
    Search(SearchPanelState),
    Export(ExportDialogState),
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub transcript: TranscriptViewState,
    pub input_box: InputBox,
    // Modal overlay (None = hidden)
    pub overlay: Option<Overlay>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            transcript: TranscriptViewState::new(),
            input_box: InputBox::new(),
            overlay: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable the Kitty keyboard protocol unconditionally. Detection via
        // supports_keyboard_enhancement() fails in WSL, but the protocol is
        // harmlessly ignored by terminals that don't support it.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let saved = prefs::load();
    let mut app = App::new(saved.dark_mode);
    let mut tui = TuiState::new();

    let backend = Arc::new(HttpBackend::new(
        config.backend_url.clone(),
        Duration::from_secs(config.health_timeout_secs),
    ));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // First health check, no delay
    spawn_health_check(backend.clone(), tx.clone(), Duration::ZERO);

    let mut should_quit = false;
    loop {
        // Periodic housekeeping (notification expiry, session clock)
        update(&mut app, Action::Tick);

        terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;

        // Process first event + drain ALL pending events before next draw
        let first_event = poll_event_timeout(Duration::from_millis(250));
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of mode
            if matches!(event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When an overlay is open, it captures everything else
            if tui.overlay.is_some() {
                handle_overlay_event(&event, &mut app, &mut tui, &config, &backend, &tx);
                continue;
            }

            match event {
                TuiEvent::OpenConversations => {
                    let active_index = app
                        .store
                        .conversations()
                        .iter()
                        .position(|c| c.id == app.store.active_id())
                        .unwrap_or(0);
                    tui.overlay = Some(Overlay::Conversations(SidebarState::new(
                        app.store.len(),
                        active_index,
                    )));
                }
                TuiEvent::OpenSearch => {
                    tui.transcript.clear_search();
                    tui.overlay = Some(Overlay::Search(SearchPanelState::new()));
                }
                TuiEvent::OpenExport => {
                    tui.overlay = Some(Overlay::Export(ExportDialogState::new()));
                }
                TuiEvent::ToggleTheme => {
                    dispatch(Action::ToggleTheme, &mut app, &config, &backend, &tx);
                }
                TuiEvent::ClearScreen => {
                    dispatch(Action::ClearScreen, &mut app, &config, &backend, &tx);
                }
                TuiEvent::ClearHistory => {
                    dispatch(Action::ClearHistoryRequested, &mut app, &config, &backend, &tx);
                }
                // Scrolling always goes to the transcript
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::CursorUp
                | TuiEvent::CursorDown => {
                    tui.transcript.handle_event(&event);
                }
                // Everything else belongs to the input box
                _ => {
                    if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&event) {
                        dispatch(Action::Submit(text), &mut app, &config, &backend, &tx);
                    }
                }
            }
        }

        // Handle actions reported by background tasks
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if run_effect(effect, &app, &config, &backend, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    prefs::save(&Prefs {
        dark_mode: app.dark_mode,
    });

    ratatui::restore();
    Ok(())
}

/// Run `update` and immediately execute the resulting effect.
fn dispatch(
    action: Action,
    app: &mut App,
    config: &ResolvedConfig,
    backend: &Arc<HttpBackend>,
    tx: &mpsc::Sender<Action>,
) {
    let effect = update(app, action);
    run_effect(effect, app, config, backend, tx);
}

/// Execute an effect, spawning tasks as needed. Returns true on quit.
fn run_effect(
    effect: Effect,
    app: &App,
    config: &ResolvedConfig,
    backend: &Arc<HttpBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::SendChat(message) => {
            spawn_send(backend.clone(), tx.clone(), message, app.user_id.clone());
        }
        Effect::ClearHistory => {
            spawn_clear_history(backend.clone(), tx.clone(), app.user_id.clone());
        }
        Effect::CheckHealth => {
            spawn_health_check(backend.clone(), tx.clone(), Duration::ZERO);
        }
        Effect::ScheduleHealthRetry => {
            let max = config.max_health_retries;
            if max != 0 && app.health_attempts >= max {
                warn!(
                    "Giving up on the backend after {} health attempts",
                    app.health_attempts
                );
            } else {
                spawn_health_check(
                    backend.clone(),
                    tx.clone(),
                    Duration::from_secs(config.retry_delay_secs),
                );
            }
        }
        Effect::SavePrefs => {
            prefs::save(&Prefs {
                dark_mode: app.dark_mode,
            });
        }
        Effect::Export(fmt) => {
            let entries = transcript::snapshot(app);
            let meta = ExportMeta {
                user_id: app.user_id.clone(),
                model: app
                    .model_name
                    .clone()
                    .unwrap_or_else(|| "desconocido".to_string()),
                message_count: app.message_count,
                session_duration_secs: (Local::now() - app.session_start).num_seconds(),
            };
            let result = std::fs::create_dir_all(&config.export_dir)
                .and_then(|_| export::write_export(&config.export_dir, fmt, &meta, &entries));
            let action = match result {
                Ok(path) => {
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    info!("Exported conversation to {}", path.display());
                    Action::ExportDone(filename)
                }
                Err(e) => {
                    warn!("Export failed: {}", e);
                    Action::ExportFailed(e.to_string())
                }
            };
            if tx.send(action).is_err() {
                warn!("Failed to report export result: receiver dropped");
            }
        }
    }
    false
}

/// Route an event into the open overlay and act on what it emits.
fn handle_overlay_event(
    event: &TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    config: &ResolvedConfig,
    backend: &Arc<HttpBackend>,
    tx: &mpsc::Sender<Action>,
) {
    let Some(overlay) = tui.overlay.as_mut() else {
        return;
    };
    match overlay {
        Overlay::Conversations(state) => {
            // Pressing the open shortcut again closes the overlay.
            if matches!(event, TuiEvent::OpenConversations) {
                tui.overlay = None;
                return;
            }
            let Some(conv_event) = state.handle_event(event, app.store.conversations()) else {
                return;
            };
            match conv_event {
                ConversationEvent::Switch(id) => {
                    dispatch(Action::SwitchConversation(id), app, config, backend, tx);
                    tui.transcript = TranscriptViewState::new();
                    tui.overlay = None;
                }
                ConversationEvent::CreateNew => {
                    dispatch(Action::NewConversation, app, config, backend, tx);
                    tui.transcript = TranscriptViewState::new();
                    tui.overlay = None;
                }
                ConversationEvent::Delete(id) => {
                    let was_active = id == app.store.active_id();
                    dispatch(Action::DeleteConversation(id), app, config, backend, tx);
                    state.clamp_selection(app.store.len());
                    if was_active {
                        tui.transcript = TranscriptViewState::new();
                    }
                }
                ConversationEvent::Dismiss => {
                    tui.overlay = None;
                }
            }
        }
        Overlay::Search(state) => {
            if matches!(event, TuiEvent::OpenSearch) {
                tui.transcript.clear_search();
                tui.overlay = None;
                return;
            }
            let Some(search_event) = state.handle_event(event) else {
                return;
            };
            match search_event {
                SearchEvent::QueryChanged => {
                    if state.query.is_empty() {
                        state.set_results(Vec::new());
                        tui.transcript.clear_search();
                    } else {
                        let entries = transcript::snapshot(app);
                        let hits = search::search(&entries, &state.query);
                        tui.transcript.search_matches =
                            hits.iter().map(|h| h.entry_index).collect();
                        tui.transcript.focused_entry = None;
                        state.set_results(hits);
                    }
                }
                SearchEvent::Jump(entry_index) => {
                    // The jumped-to card keeps its wash until the next search.
                    tui.transcript.scroll_to_entry(entry_index);
                    tui.overlay = None;
                }
                SearchEvent::Dismiss => {
                    tui.transcript.clear_search();
                    tui.overlay = None;
                }
            }
        }
        Overlay::Export(state) => {
            if matches!(event, TuiEvent::OpenExport) {
                tui.overlay = None;
                return;
            }
            let Some(export_event) = state.handle_event(event) else {
                return;
            };
            match export_event {
                ExportEvent::Confirm(fmt) => {
                    dispatch(Action::ExportRequested(fmt), app, config, backend, tx);
                    tui.overlay = None;
                }
                ExportEvent::Dismiss => {
                    tui.overlay = None;
                }
            }
        }
    }
}

/// `GET /health` on a background task, after an optional delay. The attempt
/// is announced first so the reducer can count it.
fn spawn_health_check(backend: Arc<HttpBackend>, tx: mpsc::Sender<Action>, delay: Duration) {
    tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if tx.send(Action::HealthStarted).is_err() {
            return;
        }
        info!("Checking backend health");
        let action = match backend.health().await {
            Ok(info) => Action::HealthOk(HealthReport {
                model: info.model,
                features: info.features,
            }),
            Err(e) => {
                warn!("Health check failed: {}", e);
                Action::HealthFailed(e.to_string())
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report health result: receiver dropped");
        }
    });
}

/// `POST /chat` on a background task.
fn spawn_send(
    backend: Arc<HttpBackend>,
    tx: mpsc::Sender<Action>,
    message: String,
    user_id: String,
) {
    info!("Sending message ({} chars)", message.chars().count());
    tokio::spawn(async move {
        let action = match backend.send_message(&message, &user_id).await {
            Ok(reply) => Action::ReplyReceived {
                reply: reply.reply,
                history_length: reply.history_length,
            },
            Err(e) => {
                warn!("Send failed: {}", e);
                Action::SendFailed(e)
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report chat result: receiver dropped");
        }
    });
}

/// `POST /clear-history` on a background task.
fn spawn_clear_history(backend: Arc<HttpBackend>, tx: mpsc::Sender<Action>, user_id: String) {
    info!("Clearing backend history for {}", user_id);
    tokio::spawn(async move {
        let action = match backend.clear_history(&user_id).await {
            Ok(()) => Action::ClearHistoryDone,
            Err(e) => {
                warn!("Clear history failed: {}", e);
                Action::ClearHistoryFailed(e)
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to report clear result: receiver dropped");
        }
    });
}
