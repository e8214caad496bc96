//! # Message Component
//!
//! A single transcript entry: bordered card titled with the sender and
//! timestamp, body rendered through `richtext`.
//!
//! `Message` is a **transient component**: created fresh each frame with the
//! data it needs to render, no state of its own. Search state arrives as
//! props (`is_match`, `is_focused`) from the parent `TranscriptView`.
//!
//! # Height Calculation
//!
//! Bodies carry styled spans (code, links, bullets), so wrapping is
//! predicted with `Paragraph::line_count` on the exact widget that will be
//! rendered. The parent caches the result to lay out its scroll canvas.

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::TranscriptEntry;
use crate::format;
use crate::tui::richtext;
use crate::tui::theme::Theme;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

pub struct Message<'a> {
    pub entry: &'a TranscriptEntry,
    pub theme: &'a Theme,
    /// Entry matches the current search query.
    pub is_match: bool,
    /// Entry was jumped to from the search results.
    pub is_focused: bool,
}

impl<'a> Message<'a> {
    pub fn new(entry: &'a TranscriptEntry, theme: &'a Theme) -> Self {
        Self {
            entry,
            theme,
            is_match: false,
            is_focused: false,
        }
    }

    pub fn matched(mut self, is_match: bool, is_focused: bool) -> Self {
        self.is_match = is_match;
        self.is_focused = is_focused;
        self
    }

    fn paragraph(&self) -> Paragraph<'static> {
        let doc = format::parse(&self.entry.text);
        let body = richtext::render(&doc, self.theme);

        let title = format!(
            " {} · {} ",
            self.entry.sender_label(),
            self.entry.timestamp_label
        );
        let border_style = if self.is_focused {
            self.theme.selection
        } else {
            self.theme.sender_border(self.entry.sender)
        };

        let mut paragraph = Paragraph::new(body)
            .block(
                Block::bordered()
                    .title(title)
                    .border_style(border_style)
                    .title_style(border_style)
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .wrap(Wrap { trim: false });
        if self.is_match {
            paragraph = paragraph.style(self.theme.search_match);
        }
        paragraph
    }

    /// Height of the rendered card at `width`, borders included.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = self.paragraph().line_count(width) as u16;
        lines.max(VERTICAL_OVERHEAD + 1)
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        self.paragraph().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Sender;

    fn entry(text: &str) -> TranscriptEntry {
        TranscriptEntry {
            sender: Sender::User,
            text: text.to_string(),
            timestamp_label: "10:30".to_string(),
        }
    }

    #[test]
    fn test_single_line_height_includes_borders() {
        let e = entry("hola");
        let theme = Theme::dark();
        let msg = Message::new(&e, &theme);
        assert_eq!(msg.calculate_height(80), 3);
    }

    #[test]
    fn test_long_text_wraps() {
        let e = entry(&"palabra ".repeat(40));
        let theme = Theme::dark();
        let msg = Message::new(&e, &theme);
        assert!(msg.calculate_height(40) > 3);
    }

    #[test]
    fn test_multi_block_message_is_taller() {
        let theme = Theme::dark();
        let short = entry("hola");
        let tall = entry("# Título\n\n- uno\n- dos\n\n```\ncode\n```");
        let h_short = Message::new(&short, &theme).calculate_height(80);
        let h_tall = Message::new(&tall, &theme).calculate_height(80);
        assert!(h_tall > h_short);
    }

    #[test]
    fn test_zero_width_degenerate_case() {
        let e = entry("hola");
        let theme = Theme::dark();
        assert_eq!(Message::new(&e, &theme).calculate_height(3), 1);
    }
}
