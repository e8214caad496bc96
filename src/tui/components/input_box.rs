//! # InputBox Component
//!
//! Single-line message editor at the bottom of the screen. Holds the buffer
//! and cursor as persistent state; emits `InputEvent::Submit` on Enter and
//! leaves validation to the reducer. Pasted newlines collapse to spaces so
//! the buffer stays one line.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// High-level events emitted by the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    buffer: String,
    /// Cursor position in chars, 0..=buffer chars.
    cursor: usize,
    /// First visible char when the buffer is wider than the box.
    scroll: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn insert(&mut self, text: &str) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert_str(at, text);
        self.cursor += text.chars().count();
    }

    /// Render the visible slice, adjusting scroll so the cursor stays inside
    /// `content_width` columns. Returns (text, cursor column).
    fn visible(&mut self, content_width: usize) -> (String, u16) {
        if content_width == 0 {
            return (String::new(), 0);
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        // Walk the scroll forward until the cursor fits.
        loop {
            let visible: String = self
                .buffer
                .chars()
                .skip(self.scroll)
                .take(self.cursor - self.scroll)
                .collect();
            if visible.width() < content_width || self.cursor == self.scroll {
                break;
            }
            self.scroll += 1;
        }
        let prefix: String = self
            .buffer
            .chars()
            .skip(self.scroll)
            .take(self.cursor - self.scroll)
            .collect();
        let cursor_col = prefix.width() as u16;
        let text: String = self.buffer.chars().skip(self.scroll).collect();
        (text, cursor_col)
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<InputEvent> {
        match event {
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll = 0;
                Some(InputEvent::Submit(text))
            }
            TuiEvent::InputChar(c) => {
                self.insert(&c.to_string());
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(data) => {
                let flat = data.replace(['\r', '\n'], " ");
                self.insert(&flat);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.char_count();
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper, so theme and loading state arrive as props.
pub struct InputBoxView<'a> {
    pub input: &'a mut InputBox,
    pub theme: &'a Theme,
    pub is_loading: bool,
}

impl<'a> Component for InputBoxView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.is_loading {
            " Mensaje (esperando respuesta...) "
        } else {
            " Mensaje "
        };
        let content_width = area.width.saturating_sub(2) as usize;
        let (text, cursor_col) = self.input.visible(content_width);

        let widget = Paragraph::new(text)
            .style(self.theme.text)
            .block(Block::bordered().title(title).border_style(self.theme.dim));
        frame.render_widget(widget, area);
        frame.set_cursor_position(Position {
            x: area.x + 1 + cursor_col,
            y: area.y + 1,
        });
    }
}
