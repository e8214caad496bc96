//! # UI Layout
//!
//! Top-level frame composition: status bar, transcript, input box, then any
//! open overlay and the toast stack on top. Individual widgets live in
//! `components/`; this module only arranges them.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::App;
use crate::core::transcript;
use crate::tui::component::Component;
use crate::tui::components::{
    ExportDialog, InputBoxView, Notifications, SearchPanel, Sidebar, StatusBar, TranscriptView,
};
use crate::tui::theme::Theme;
use crate::tui::{Overlay, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let theme = Theme::for_mode(app.dark_mode);
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [status_area, transcript_area, input_area] = layout.areas(frame.area());

    StatusBar::new(app, &theme).render(frame, status_area);

    let entries = transcript::snapshot(app);
    TranscriptView::new(&mut tui.transcript, &entries, &theme).render(frame, transcript_area);

    InputBoxView {
        input: &mut tui.input_box,
        theme: &theme,
        is_loading: app.is_loading,
    }
    .render(frame, input_area);

    // Overlays render last so their Clear and cursor placement win.
    match &mut tui.overlay {
        Some(Overlay::Conversations(state)) => {
            let active_id = app.store.active_id().to_string();
            Sidebar::new(state, app.store.conversations(), &active_id, &theme)
                .render(frame, frame.area());
        }
        Some(Overlay::Search(state)) => {
            SearchPanel::new(state, &theme).render(frame, frame.area());
        }
        Some(Overlay::Export(state)) => {
            ExportDialog::new(state, &theme).render(frame, frame.area());
        }
        None => {}
    }

    Notifications::new(&app.notifications, &theme).render(frame, transcript_area);
}

/// Centered overlay rect taking the given percentages of the outer area.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, vertical, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, horizontal, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(vertical);
    horizontal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::connected_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_full_frame() {
        let app = connected_app();
        let mut tui = TuiState::new();
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        let content = buffer_text(&terminal);
        assert!(content.contains("Conectado"));
        assert!(content.contains("Mensaje"));
        // Welcome message visible in the transcript
        assert!(content.contains("Chatbot"));
    }

    #[test]
    fn test_draw_with_conversations_overlay() {
        let app = connected_app();
        let mut tui = TuiState::new();
        tui.overlay = Some(Overlay::Conversations(
            crate::tui::components::SidebarState::new(app.store.len(), 0),
        ));
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui)).unwrap();
        assert!(buffer_text(&terminal).contains("Conversaciones"));
    }

    #[test]
    fn test_centered_rect_is_inside_outer() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(70, 70, outer);
        assert!(inner.width <= 70);
        assert!(inner.x >= 15 - 1);
        assert!(inner.bottom() <= outer.bottom());
    }
}
