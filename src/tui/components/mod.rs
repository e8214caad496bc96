//! # TUI Components
//!
//! All UI pieces for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components here follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `StatusBar`: Top line with connection, counters and session timer
//! - `Message`: Individual transcript card rendering
//! - `Notifications`: Toast stack in the top-right corner
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: Single-line message editor
//! - `TranscriptView`: Scrollable transcript with layout caching
//! - `Sidebar`: Conversations overlay (switch, create, delete)
//! - `SearchPanel`: Transcript search overlay
//! - `ExportDialog`: Export format picker
//!
//! ## Design Philosophy
//!
//! Each component file is self-contained: state types, event types,
//! rendering, event handling and tests live together. Components receive
//! external data as props rather than reading shared state directly, which
//! keeps dependencies explicit and the components testable.
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── status_bar.rs       (Top status line)
//! ├── message.rs          (Single transcript card)
//! ├── transcript_view.rs  (Scrollable transcript container)
//! ├── input_box.rs        (Message editor)
//! ├── notifications.rs    (Toast stack)
//! ├── sidebar.rs          (Conversations overlay)
//! ├── search_panel.rs     (Search overlay)
//! └── export_dialog.rs    (Export format picker)
//! ```

pub mod export_dialog;
pub mod input_box;
pub mod message;
pub mod notifications;
pub mod search_panel;
pub mod sidebar;
pub mod status_bar;
pub mod transcript_view;

pub use export_dialog::{ExportDialog, ExportDialogState, ExportEvent};
pub use input_box::{InputBox, InputBoxView, InputEvent};
pub use notifications::Notifications;
pub use search_panel::{SearchEvent, SearchPanel, SearchPanelState};
pub use sidebar::{ConversationEvent, Sidebar, SidebarState};
pub use status_bar::StatusBar;
pub use transcript_view::{TranscriptView, TranscriptViewState};
