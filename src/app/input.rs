//! Terminal input with Escape disambiguation

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

/// Source of terminal events
pub trait EventSource {
    /// Next event, or `None` if nothing arrived within `timeout`
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads from the real terminal through crossterm
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Next key press. An Esc immediately followed by another pending event is
/// the start of an unparsed sequence; both are dropped.
pub fn next_key(source: &mut impl EventSource, timeout: Duration) -> io::Result<Option<KeyEvent>> {
    let Some(Event::Key(key)) = source.poll_event(timeout)? else {
        return Ok(None);
    };
    if key.kind != KeyEventKind::Press {
        return Ok(None);
    }
    if key.code == KeyCode::Esc && continues_sequence(source)? {
        tracing::debug!("Dropped escape sequence");
        return Ok(None);
    }
    Ok(Some(key))
}

fn continues_sequence(source: &mut impl EventSource) -> io::Result<bool> {
    Ok(match source.poll_event(Duration::ZERO)? {
        // Release of the Esc itself
        Some(Event::Key(next)) => next.kind != KeyEventKind::Release,
        Some(_) => true,
        None => false,
    })
}
