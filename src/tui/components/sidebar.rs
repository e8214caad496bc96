//! # Conversations Sidebar Component
//!
//! Overlay for browsing, switching, creating and deleting conversation
//! threads. Opened with Ctrl+O, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState` while the overlay is open
//! - `Sidebar` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::store::Conversation;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Persistent state for the conversations overlay.
pub struct SidebarState {
    pub selected: usize,
    pub confirm_delete: bool,
    pub list_state: ListState,
}

impl SidebarState {
    pub fn new(conversation_count: usize, active_index: usize) -> Self {
        let mut list_state = ListState::default();
        if conversation_count > 0 {
            list_state.select(Some(active_index));
        }
        Self {
            selected: active_index,
            confirm_delete: false,
            list_state,
        }
    }

    /// Handle a key event against the given conversation list, returning a
    /// ConversationEvent if the overlay should act.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        conversations: &[Conversation],
    ) -> Option<ConversationEvent> {
        // Deleting takes a double-press; any other key resets the arm.
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        match event {
            TuiEvent::Escape => Some(ConversationEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if !conversations.is_empty() {
                    self.selected = (self.selected + 1).min(conversations.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => conversations
                .get(self.selected)
                .map(|conv| ConversationEvent::Switch(conv.id.clone())),
            TuiEvent::InputChar('n') => Some(ConversationEvent::CreateNew),
            TuiEvent::InputChar('d') => {
                let conv = conversations.get(self.selected)?;
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(ConversationEvent::Delete(conv.id.clone()))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }

    /// Keep the cursor valid after the list shrank.
    pub fn clamp_selection(&mut self, conversation_count: usize) {
        if conversation_count == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(conversation_count - 1);
            self.list_state.select(Some(self.selected));
        }
    }
}

/// Events emitted by the conversations overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationEvent {
    Switch(String),
    CreateNew,
    Delete(String),
    Dismiss,
}

/// Transient render wrapper for the conversations overlay.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    conversations: &'a [Conversation],
    active_id: &'a str,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        conversations: &'a [Conversation],
        active_id: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            conversations,
            active_id,
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let help_text = if self.state.confirm_delete {
            " Pulsa d otra vez para borrar | Esc Cancelar "
        } else {
            " n Nueva  d Borrar  Enter Abrir  Esc Volver "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim)
            .title(" Conversaciones ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.conversations.is_empty() {
            let empty = Paragraph::new("Sin conversaciones.")
                .style(self.theme.dim)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .conversations
            .iter()
            .enumerate()
            .map(|(i, conv)| {
                let marker = if conv.id == self.active_id { "● " } else { "  " };
                let count = format!("{} msgs", conv.messages.len());

                // Layout: "  ● <title>   12 msgs  "
                let inner_width = overlay.width.saturating_sub(4) as usize;
                let fixed_width = marker.chars().count() + count.len() + 2;
                let title_width = inner_width.saturating_sub(fixed_width);
                let title = truncate_str(&conv.title, title_width);
                let padded_title = format!("{title:<title_width$}");

                let style = if i == self.state.selected {
                    if self.state.confirm_delete {
                        self.theme
                            .disconnected
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        self.theme.selection
                    }
                } else {
                    self.theme.text
                };

                let line = Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(padded_title, style),
                    Span::styled("  ", style),
                    Span::styled(count, style),
                ]);
                ListItem::new(line)
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    let len = s.chars().count();
    if len <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let prefix: String = s.chars().take(max_width - 3).collect();
        format!("{prefix}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::ConversationStore;

    fn three_conversations() -> ConversationStore {
        let mut store = ConversationStore::new();
        store.create();
        store.create();
        store
    }

    #[test]
    fn test_enter_switches_to_selected() {
        let store = three_conversations();
        let mut state = SidebarState::new(store.len(), 0);
        state.handle_event(&TuiEvent::CursorDown, store.conversations());
        let event = state.handle_event(&TuiEvent::Submit, store.conversations());
        assert_eq!(
            event,
            Some(ConversationEvent::Switch(
                store.conversations()[1].id.clone()
            ))
        );
    }

    #[test]
    fn test_delete_requires_double_press() {
        let store = three_conversations();
        let mut state = SidebarState::new(store.len(), 0);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), store.conversations()), None);
        assert!(state.confirm_delete);
        let event = state.handle_event(&TuiEvent::InputChar('d'), store.conversations());
        assert_eq!(
            event,
            Some(ConversationEvent::Delete(
                store.conversations()[0].id.clone()
            ))
        );
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_other_key_disarms_delete() {
        let store = three_conversations();
        let mut state = SidebarState::new(store.len(), 0);
        state.handle_event(&TuiEvent::InputChar('d'), store.conversations());
        state.handle_event(&TuiEvent::CursorDown, store.conversations());
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_selection_clamps_at_edges() {
        let store = three_conversations();
        let mut state = SidebarState::new(store.len(), 0);
        state.handle_event(&TuiEvent::CursorUp, store.conversations());
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown, store.conversations());
        }
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_clamp_selection_after_shrink() {
        let mut state = SidebarState::new(3, 2);
        state.clamp_selection(2);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_escape_dismisses() {
        let store = three_conversations();
        let mut state = SidebarState::new(store.len(), 0);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape, store.conversations()),
            Some(ConversationEvent::Dismiss)
        );
    }
}
