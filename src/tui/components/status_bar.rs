//! # Status Bar Component
//!
//! Single top line: connection dot and label, model name, message and
//! context counters, session timer, and the key hints. Everything it shows
//! comes from `App`; it owns no state.

use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::core::state::{App, Connection};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct StatusBar<'a> {
    pub app: &'a App,
    pub theme: &'a Theme,
    pub now: DateTime<Local>,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App, theme: &'a Theme) -> Self {
        Self {
            app,
            theme,
            now: Local::now(),
        }
    }

    fn connection_parts(&self) -> (&'static str, ratatui::style::Style) {
        match self.app.connection {
            Connection::Connected => ("● Conectado", self.theme.connected),
            Connection::Disconnected => ("● Desconectado", self.theme.disconnected),
            Connection::Connecting => ("● Conectando...", self.theme.connecting),
        }
    }
}

/// Formats elapsed whole seconds as `MM:SS`, rolling to `H:MM:SS` past an
/// hour.
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

impl<'a> Component for StatusBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (conn_label, conn_style) = self.connection_parts();
        let model = self.app.model_name.as_deref().unwrap_or("sin modelo");
        let elapsed = (self.now - self.app.session_start).num_seconds();

        let mut spans = vec![
            Span::styled(conn_label, conn_style),
            Span::styled("  ", self.theme.dim),
            Span::styled(model.to_string(), self.theme.text),
            Span::styled("  │  ", self.theme.dim),
            Span::styled(
                format!("Mensajes: {}", self.app.message_count),
                self.theme.text,
            ),
            Span::styled("  │  ", self.theme.dim),
            Span::styled(
                format!("Contexto: {} mensajes", self.app.history_count),
                self.theme.text,
            ),
            Span::styled("  │  ", self.theme.dim),
            Span::styled(format_duration(elapsed), self.theme.text),
        ];
        if self.app.is_loading {
            spans.push(Span::styled("  │  ", self.theme.dim));
            spans.push(Span::styled("Escribiendo...", self.theme.connecting));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::connected_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(-3), "00:00");
    }

    #[test]
    fn test_renders_connection_and_counters() {
        let app = connected_app();
        let theme = Theme::dark();
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut bar = StatusBar::new(&app, &theme);
                bar.render(f, f.area());
            })
            .unwrap();
        let content = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(content.contains("Conectado"));
        assert!(content.contains("test-model"));
        assert!(content.contains("Mensajes: 0"));
        assert!(content.contains("Contexto: 0 mensajes"));
    }
}
