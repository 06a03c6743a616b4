//! Message types passed between widgets, the App loop and request workers.

pub mod actions;
pub mod network;

pub use actions::{emit, Action, ActionReceiver, ActionSender};
pub use network::{Completion, ExecError};
