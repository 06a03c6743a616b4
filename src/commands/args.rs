//! Positional binding of tokens to declared parameters

use std::collections::HashMap;

use super::tokenizer::tokenize;
use super::CommandError;

/// One declared parameter, written `name` or `name:optional`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub optional: bool,
}

impl ParamSpec {
    pub fn parse(spec: &str) -> Self {
        match spec.split_once(':') {
            Some((name, tag)) => ParamSpec {
                name: name.to_string(),
                optional: tag == "optional",
            },
            None => ParamSpec {
                name: spec.to_string(),
                optional: false,
            },
        }
    }
}

/// Values bound to parameter names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, String>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a parameter the binder guarantees to be present
    pub fn required(&self, name: &str) -> Result<&str, CommandError> {
        self.get(name)
            .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Match tokens to parameters by position
pub fn bind(tokens: Vec<String>, params: &[ParamSpec]) -> Result<Arguments, CommandError> {
    if tokens.len() > params.len() {
        return Err(CommandError::TooManyArguments);
    }

    let mut values = HashMap::new();
    let mut tokens = tokens.into_iter();
    for param in params {
        match tokens.next() {
            Some(token) => {
                values.insert(param.name.clone(), token);
            }
            None if param.optional => break,
            None => return Err(CommandError::MissingArgument(param.name.clone())),
        }
    }

    Ok(Arguments { values })
}

/// Tokenize a raw argument string and bind it
pub fn parse_arguments(raw: &str, params: &[ParamSpec]) -> Result<Arguments, CommandError> {
    bind(tokenize(raw)?, params)
}
