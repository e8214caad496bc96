//! # Search Panel Component
//!
//! Overlay for searching the visible transcript. Opened with Ctrl+F,
//! dismissed with Esc. The query is recomputed on every edit; Enter jumps
//! the transcript to the selected hit.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchPanelState` lives in `TuiState` while the overlay is open
//! - `SearchPanel` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::search::{SearchHit, results_label};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Events emitted by the search overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query text changed; the parent must re-run the search and hand
    /// the new results back via `set_results`.
    QueryChanged,
    /// Jump the transcript to this entry and close the overlay.
    Jump(usize),
    Dismiss,
}

/// Persistent state for the search overlay.
pub struct SearchPanelState {
    pub query: String,
    /// Cursor position in chars, 0..=query chars.
    pub cursor: usize,
    pub results: Vec<SearchHit>,
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for SearchPanelState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchPanelState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            cursor: 0,
            results: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    /// Replace the result set after the parent re-ran the search.
    pub fn set_results(&mut self, results: Vec<SearchHit>) {
        self.results = results;
        self.selected = 0;
        self.list_state.select(if self.results.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::Escape => Some(SearchEvent::Dismiss),
            TuiEvent::Submit => self
                .results
                .get(self.selected)
                .map(|hit| SearchEvent::Jump(hit.entry_index)),
            TuiEvent::InputChar(c) => {
                let at = self.byte_index(self.cursor);
                self.query.insert(at, *c);
                self.cursor += 1;
                Some(SearchEvent::QueryChanged)
            }
            TuiEvent::Paste(data) => {
                let flat = data.replace(['\r', '\n'], " ");
                let at = self.byte_index(self.cursor);
                self.query.insert_str(at, &flat);
                self.cursor += flat.chars().count();
                Some(SearchEvent::QueryChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.query.remove(at);
                    Some(SearchEvent::QueryChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.query.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.query.remove(at);
                    Some(SearchEvent::QueryChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.query.chars().count());
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.query.chars().count();
                None
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.selected = self.selected.saturating_sub(1);
                if !self.results.is_empty() {
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                if !self.results.is_empty() {
                    self.selected = (self.selected + 1).min(self.results.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the search overlay.
pub struct SearchPanel<'a> {
    state: &'a mut SearchPanelState,
    theme: &'a Theme,
}

impl<'a> SearchPanel<'a> {
    pub fn new(state: &'a mut SearchPanelState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let title = if self.state.query.is_empty() {
            " Buscar ".to_string()
        } else {
            format!(" Buscar · {} ", results_label(self.state.results.len()))
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim)
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Ir  ↑↓ Mover  Esc Volver ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [query_area, results_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        let query_line = Paragraph::new(self.state.query.as_str()).style(self.theme.text);
        frame.render_widget(query_line, query_area);
        let prefix: String = self.state.query.chars().take(self.state.cursor).collect();
        frame.set_cursor_position(ratatui::layout::Position {
            x: query_area.x + prefix.width() as u16,
            y: query_area.y,
        });

        if self.state.results.is_empty() {
            let hint = if self.state.query.is_empty() {
                "Escribe para buscar en la conversación."
            } else {
                "Sin resultados."
            };
            let empty = Paragraph::new(hint)
                .style(self.theme.dim)
                .alignment(Alignment::Center);
            frame.render_widget(empty, results_area);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .results
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let base = if i == self.state.selected {
                    self.theme.selection
                } else {
                    self.theme.text
                };
                let mut spans = vec![
                    Span::styled(format!("{} · {}  ", hit.sender_label, hit.timestamp_label), self.theme.dim),
                ];
                for span in &hit.preview {
                    let style = if span.highlighted {
                        self.theme.search_mark
                    } else {
                        base
                    };
                    spans.push(Span::styled(span.text.clone(), style));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.selection);
        frame.render_stateful_widget(list, results_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::search::PreviewSpan;

    fn hit(entry_index: usize) -> SearchHit {
        SearchHit {
            entry_index,
            sender_label: "Usuario".to_string(),
            timestamp_label: "10:30".to_string(),
            preview: vec![PreviewSpan {
                text: "hola".to_string(),
                highlighted: true,
            }],
        }
    }

    #[test]
    fn test_typing_emits_query_changed() {
        let mut state = SearchPanelState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('h')),
            Some(SearchEvent::QueryChanged)
        );
        assert_eq!(state.query, "h");
    }

    #[test]
    fn test_enter_jumps_to_selected_hit() {
        let mut state = SearchPanelState::new();
        state.set_results(vec![hit(3), hit(5)]);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SearchEvent::Jump(5))
        );
    }

    #[test]
    fn test_enter_without_results_is_noop() {
        let mut state = SearchPanelState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_set_results_resets_selection() {
        let mut state = SearchPanelState::new();
        state.set_results(vec![hit(1), hit(2), hit(3)]);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 2);
        state.set_results(vec![hit(9)]);
        assert_eq!(state.selected, 0);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn test_backspace_at_start_is_silent() {
        let mut state = SearchPanelState::new();
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = SearchPanelState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SearchEvent::Dismiss)
        );
    }
}
