//! # Export Dialog Component
//!
//! Small overlay for choosing an export format. Opened with Ctrl+E,
//! dismissed with Esc; Enter confirms the highlighted format.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::export::ExportFormat;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;

/// Events emitted by the export dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportEvent {
    Confirm(ExportFormat),
    Dismiss,
}

/// Persistent state for the export dialog.
pub struct ExportDialogState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for ExportDialogState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportDialogState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ExportEvent> {
        match event {
            TuiEvent::Escape => Some(ExportEvent::Dismiss),
            TuiEvent::Submit => Some(ExportEvent::Confirm(ExportFormat::ALL[self.selected])),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(ExportFormat::ALL.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the export dialog.
pub struct ExportDialog<'a> {
    state: &'a mut ExportDialogState,
    theme: &'a Theme,
}

impl<'a> ExportDialog<'a> {
    pub fn new(state: &'a mut ExportDialogState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 40, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dim)
            .title(" Exportar conversación ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Exportar  Esc Volver ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = ExportFormat::ALL
            .iter()
            .enumerate()
            .map(|(i, fmt)| {
                let style = if i == self.state.selected {
                    self.theme.selection
                } else {
                    self.theme.text
                };
                ListItem::new(Line::styled(fmt.label(), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
