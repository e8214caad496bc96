//! # Notifications Component
//!
//! Transient toast stack in the top-right corner. Expiry is driven by the
//! reducer on Tick; this component only paints whatever is alive.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::Notification;
use crate::tui::component::Component;
use crate::tui::theme::Theme;

const MAX_TOAST_WIDTH: u16 = 50;
const TOAST_HEIGHT: u16 = 3;

pub struct Notifications<'a> {
    pub notifications: &'a [Notification],
    pub theme: &'a Theme,
}

impl<'a> Notifications<'a> {
    pub fn new(notifications: &'a [Notification], theme: &'a Theme) -> Self {
        Self {
            notifications,
            theme,
        }
    }
}

impl<'a> Component for Notifications<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut y = area.y;
        for notification in self.notifications {
            if y + TOAST_HEIGHT > area.bottom() {
                break;
            }
            let width = (notification.text.width() as u16 + 4)
                .min(MAX_TOAST_WIDTH)
                .min(area.width);
            let toast_area = Rect::new(area.right().saturating_sub(width), y, width, TOAST_HEIGHT);

            let style = self.theme.severity(notification.severity);
            frame.render_widget(Clear, toast_area);
            let toast = Paragraph::new(notification.text.as_str())
                .style(style)
                .block(Block::bordered().border_style(style));
            frame.render_widget(toast, toast_area);
            y += TOAST_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Severity;
    use chrono::Local;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_toasts_render_in_top_right() {
        let notifications = vec![Notification {
            text: "✅ Respuesta recibida".to_string(),
            severity: Severity::Success,
            created_at: Local::now(),
        }];
        let theme = Theme::dark();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let mut view = Notifications::new(&notifications, &theme);
                view.render(f, f.area());
            })
            .unwrap();
        let content = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(content.contains("Respuesta recibida"));
    }
}
