//! # Courier
//!
//! A terminal HTTP client built on a small retained-mode widget runtime.
//!
//! ## Features
//! - Collections of named requests, sorted case-insensitively
//! - Method picker with prefix matching, scrolling URL editor, Send button
//! - Vim-style `:` command line (`nc`, `nr`, `sc`, `sr`, `send`, `q`)
//! - Non-blocking request execution with per-request results
//! - JSON syntax highlighting
//!
//! ## Architecture
//! - Widgets (ratatui buffers) - each control owns its surface
//! - App layer - modal loop, focus ownership, command dispatch
//! - Network layer (Tokio) - one task per request, results over a channel

pub mod app;
pub mod commands;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod settings;
pub mod ui;
pub mod views;
pub mod widgets;

// Re-export commonly used types
pub use app::{App, EventSource, FocusTarget, Mode, TerminalEvents};
pub use commands::CommandError;
pub use messages::{Action, Completion, ExecError};
pub use models::{Collection, Header, HttpMethod, Request, Response};
pub use network::{Executor, HttpTransport, Transport};
pub use settings::Settings;
pub use ui::Palette;
pub use widgets::{CannotFocus, Widget};
