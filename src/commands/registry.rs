//! Name to handler table and the line dispatcher

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::args::{parse_arguments, Arguments, ParamSpec};
use super::{builtin, CommandError};
use crate::app::App;
use crate::constants::COMMAND_PREFIX;

pub type Handler = fn(&Arguments, &mut App) -> Result<(), CommandError>;

pub struct Command {
    pub params: Vec<ParamSpec>,
    pub handler: Handler,
}

#[derive(Default)]
pub struct Registry {
    commands: HashMap<&'static str, Command>,
}

/// Built-in commands, registered on first use
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut registry = Registry::default();
    builtin::register(&mut registry);
    registry
});

impl Registry {
    /// Add a command. Later registrations under the same name replace earlier ones.
    pub fn register(&mut self, name: &'static str, params: &[&str], handler: Handler) {
        let params = params.iter().map(|p| ParamSpec::parse(p)).collect();
        if self.commands.insert(name, Command { params, handler }).is_some() {
            tracing::warn!(name, "Command registered twice");
        }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Parse and run one command line against `app`
    pub fn execute(&self, line: &str, app: &mut App) -> Result<(), CommandError> {
        let line = line.strip_prefix(COMMAND_PREFIX).unwrap_or(line).trim_start();
        if line.is_empty() {
            return Ok(());
        }

        let (name, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let command = self
            .get(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        let args = parse_arguments(rest, &command.params)?;

        tracing::debug!(name, ?args, "Executing command");
        (command.handler)(&args, app)
    }
}

/// Dispatch through the built-in registry
pub fn execute(line: &str, app: &mut App) -> Result<(), CommandError> {
    REGISTRY.execute(line, app)
}
