//! Quote-aware splitting of a command's argument string

use super::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Expecting,
    BareArgument,
    DoubleQuoted,
    SingleQuoted,
}

/// Split `input` into tokens.
///
/// Whitespace separates bare tokens. A `"` or `'` opens a quoted token that
/// runs to the matching quote and may contain whitespace. A quote directly
/// after a bare token closes that token and opens a new one; there is no
/// escape character.
pub fn tokenize(input: &str) -> Result<Vec<String>, CommandError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut state = State::Expecting;

    for c in input.chars() {
        state = match (state, c) {
            (State::Expecting, c) if c.is_whitespace() => State::Expecting,
            (State::Expecting, '"') => State::DoubleQuoted,
            (State::Expecting, '\'') => State::SingleQuoted,
            (State::Expecting, c) => {
                current.push(c);
                State::BareArgument
            }

            (State::BareArgument, c) if c.is_whitespace() => {
                tokens.push(std::mem::take(&mut current));
                State::Expecting
            }
            (State::BareArgument, '"') => {
                tokens.push(std::mem::take(&mut current));
                State::DoubleQuoted
            }
            (State::BareArgument, '\'') => {
                tokens.push(std::mem::take(&mut current));
                State::SingleQuoted
            }
            (State::BareArgument, c) => {
                current.push(c);
                State::BareArgument
            }

            (State::DoubleQuoted, '"') | (State::SingleQuoted, '\'') => {
                tokens.push(std::mem::take(&mut current));
                State::Expecting
            }
            (quoted, c) => {
                current.push(c);
                quoted
            }
        };
    }

    match state {
        State::Expecting => {}
        State::BareArgument => tokens.push(current),
        State::DoubleQuoted | State::SingleQuoted => return Err(CommandError::MissingClosingQuote),
    }

    Ok(tokens)
}
