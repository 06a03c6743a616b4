//! Colon command language: tokenizer, argument binding, registry and built-ins

pub mod args;
pub mod builtin;
pub mod registry;
pub mod tokenizer;

pub use args::{parse_arguments, Arguments, ParamSpec};
pub use registry::{execute, Command, Handler, Registry, REGISTRY};
pub use tokenizer::tokenize;

/// Everything a command line can fail with, shown to the user as `Error: <message>`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Missing closing quote.")]
    MissingClosingQuote,

    #[error("Too many arguments.")]
    TooManyArguments,

    #[error("Missing argument '{0}'.")]
    MissingArgument(String),

    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    #[error("Collection '{0}' already exists.")]
    DuplicateCollection(String),

    #[error("Request '{0}' already exists in this collection.")]
    DuplicateRequest(String),

    #[error("No collection named '{0}'.")]
    NoSuchCollection(String),

    #[error("No request named '{0}' in this collection.")]
    NoSuchRequest(String),

    #[error("No collection is active.")]
    NoActiveCollection,

    #[error("No request is active.")]
    NoActiveRequest,

    #[error("Invalid name '{0}'.")]
    InvalidName(String),
}
