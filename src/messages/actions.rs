//! Actions - messages from widget callbacks to the App loop

use tokio::sync::mpsc;

use crate::models::HttpMethod;

/// Requests raised by widget callbacks, handled by the loop after each key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Method box committed a new method
    SetMethod(HttpMethod),
    /// URL field text changed
    SetUrl(String),
    /// Send button clicked or `s` pressed
    Send,
    /// Enter pressed on a row of the request list
    OpenRequest(usize),
}

pub type ActionSender = mpsc::UnboundedSender<Action>;
pub type ActionReceiver = mpsc::UnboundedReceiver<Action>;

/// Send from a callback; the loop owns the receiver for the whole run
pub fn emit(tx: &ActionSender, action: Action) {
    if tx.send(action).is_err() {
        tracing::warn!("Action channel closed");
    }
}
