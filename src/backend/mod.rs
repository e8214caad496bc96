//! # Backend Gateway
//!
//! The only module that talks to the chatbot backend. Three endpoints,
//! request/response JSON bodies, nothing else: the rest of the app sees the
//! [`ChatBackend`] trait and the typed results in [`types`].
//!
//! Failures are translated into the [`BackendError`] taxonomy so the reducer
//! can decide what the user sees without knowing anything about HTTP.

pub mod client;
pub mod types;

pub use client::{BackendError, ChatBackend, HttpBackend};
pub use types::{ChatReply, HealthInfo};
