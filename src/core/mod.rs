//! # Core Application Logic
//!
//! This module contains Charla's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Backend   │      │   Files    │
//!     │  Adapter   │      │  Gateway   │      │ (exports,  │
//!     │ (ratatui)  │      │ (reqwest)  │      │   prefs)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and `update()` — everything that can happen
//! - [`store`]: Conversation threads and their invariants
//! - [`transcript`]: The displayed snapshot consumed by render/search/export
//! - [`search`], [`export`]: Features over the transcript snapshot
//! - [`config`], [`prefs`]: Settings and the persisted dark-mode flag

pub mod action;
pub mod config;
pub mod export;
pub mod prefs;
pub mod search;
pub mod state;
pub mod store;
pub mod transcript;
