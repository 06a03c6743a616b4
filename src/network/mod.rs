//! Network layer - HTTP execution off the input loop
//!
//! The [`Executor`] spawns one tokio task per dispatched request and hands
//! completions back through a channel that the loop drains every tick.

pub mod client;
pub mod executor;

pub use client::HttpTransport;
pub use executor::Executor;

use async_trait::async_trait;

use crate::messages::ExecError;
use crate::models::{Request, Response};

/// Performs one request
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, ExecError>;
}
