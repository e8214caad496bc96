//! # Theme
//!
//! Two palettes, selected by the persisted dark-mode flag. Components take
//! a `&Theme` prop instead of hardcoding colors, so the Ctrl+T toggle
//! repaints everything on the next frame.

use ratatui::style::{Color, Modifier, Style};

use crate::core::state::Severity;
use crate::core::store::Sender;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Style,
    pub dim: Style,
    pub user_border: Style,
    pub bot_border: Style,
    pub inline_code: Style,
    pub code_block: Style,
    pub link: Style,
    pub heading: Style,
    pub list_marker: Style,
    /// Background wash for search-matched messages.
    pub search_match: Style,
    /// The match run inside a preview line.
    pub search_mark: Style,
    pub selection: Style,
    pub connected: Style,
    pub disconnected: Style,
    pub connecting: Style,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            text: Style::default().fg(Color::Gray),
            dim: Style::default().fg(Color::DarkGray),
            user_border: Style::default().fg(Color::Cyan),
            bot_border: Style::default().fg(Color::Green),
            inline_code: Style::default().fg(Color::Yellow),
            code_block: Style::default().fg(Color::Yellow).bg(Color::Black),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            heading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            list_marker: Style::default().fg(Color::Cyan),
            search_match: Style::default().bg(Color::Rgb(60, 54, 20)),
            search_mark: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow),
            selection: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            connected: Style::default().fg(Color::Green),
            disconnected: Style::default().fg(Color::Red),
            connecting: Style::default().fg(Color::Yellow),
        }
    }

    pub fn light() -> Self {
        Self {
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::DarkGray),
            user_border: Style::default().fg(Color::Blue),
            bot_border: Style::default().fg(Color::Green),
            inline_code: Style::default().fg(Color::Red),
            code_block: Style::default().fg(Color::Red).bg(Color::White),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            heading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            list_marker: Style::default().fg(Color::Blue),
            search_match: Style::default().bg(Color::Rgb(255, 243, 205)),
            search_mark: Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow),
            selection: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            connected: Style::default().fg(Color::Green),
            disconnected: Style::default().fg(Color::Red),
            connecting: Style::default().fg(Color::Yellow),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark { Self::dark() } else { Self::light() }
    }

    pub fn sender_border(&self, sender: Sender) -> Style {
        match sender {
            Sender::User => self.user_border,
            Sender::Bot => self.bot_border,
        }
    }

    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Success => self.connected,
            Severity::Error => self.disconnected,
            Severity::Info => self.connecting,
        }
    }
}
