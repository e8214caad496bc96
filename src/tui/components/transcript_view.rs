//! # TranscriptView Component
//!
//! Scrollable view of the displayed transcript.
//!
//! ## Responsibilities
//!
//! - Lay out message cards and cache their heights
//! - Scrolling, stick-to-bottom and scroll-to-search-hit
//! - Paint search match washes and the jumped-to entry
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptViewState` (persistent state) and the transcript
//! entries (props). Since `Component::render` takes `&mut self`, the state
//! (layout cache and scroll offset) can be mutated during the render pass,
//! aligning with Ratatui's `StatefulWidget` pattern.

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::TranscriptEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

/// Layout and scroll state for the transcript.
/// Must be persisted in the parent TuiState.
pub struct TranscriptViewState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Per-entry card heights for the current width.
    pub heights: Vec<u16>,
    /// Running sum of heights, for scroll targeting.
    pub prefix_heights: Vec<u16>,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Entry indices matching the current search query.
    pub search_matches: HashSet<usize>,
    /// Entry jumped to from the search results, if any.
    pub focused_entry: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            stick_to_bottom: true, // Start attached to bottom
            search_matches: HashSet::new(),
            focused_entry: None,
            viewport_height: 0,
        }
    }

    /// Forgets match washes and the jumped-to entry. Called when the search
    /// overlay closes or its query empties.
    pub fn clear_search(&mut self) {
        self.search_matches.clear();
        self.focused_entry = None;
    }

    /// Total content height. Saturates at the `u16` canvas limit, which a
    /// long enough transcript can exceed at 3+ rows per card.
    fn content_height(&self) -> u16 {
        self.heights
            .iter()
            .fold(0u16, |acc, &h| acc.saturating_add(h))
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Scroll the viewport so the given entry is fully visible and mark it
    /// as the focused one. If the entry is taller than the viewport, align
    /// its top edge.
    pub fn scroll_to_entry(&mut self, idx: usize) {
        self.focused_entry = Some(idx);
        if idx >= self.prefix_heights.len() {
            return;
        }
        let top = if idx == 0 { 0 } else { self.prefix_heights[idx - 1] };
        let bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: top });
            self.stick_to_bottom = false;
        } else if bottom > offset_y.saturating_add(self.viewport_height) {
            let new_y = bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
            let max_y = self.content_height().saturating_sub(self.viewport_height);
            self.stick_to_bottom = new_y >= max_y;
        }
    }

    /// Re-engage auto-scroll if the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

/// EventHandler lives on the state rather than the transient wrapper: scroll
/// handling needs the persistent offset and stick flag, and the wrapper is
/// recreated each frame.
impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown | TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

/// Scrollable transcript component, created fresh each frame.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub entries: &'a [TranscriptEntry],
    pub theme: &'a Theme,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptViewState,
        entries: &'a [TranscriptEntry],
        theme: &'a Theme,
    ) -> Self {
        Self { state, entries, theme }
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Measure every card at the current width. The transcript is
        // small (one conversation); full remeasure per frame keeps the
        // cache trivially correct across width changes and edits.
        self.state.heights = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Message::new(entry, self.theme)
                    .matched(
                        self.state.search_matches.contains(&i),
                        self.state.focused_entry == Some(i),
                    )
                    .calculate_height(content_width)
            })
            .collect();
        self.state.prefix_heights = self
            .state
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();

        let total_height = self.state.content_height();

        // 2. Clamp scroll offset to prevent overscrolling past content.
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 3. Render the cards into a ScrollView canvas.
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            let height = self.state.heights[i];
            let card_rect = Rect::new(0, y_offset, content_width, height);
            let message = Message::new(entry, self.theme).matched(
                self.state.search_matches.contains(&i),
                self.state.focused_entry == Some(i),
            );
            scroll_view.render_widget(message, card_rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
