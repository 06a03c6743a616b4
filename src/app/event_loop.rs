//! Modal key dispatch, per-tick draining and drawing

use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::input::{next_key, EventSource};
use super::{App, FocusTarget, Mode};
use crate::commands;
use crate::constants::{COMMAND_PREFIX, POLL_INTERVAL};
use crate::messages::Action;
use crate::widgets::Widget;

impl App {
    /// Run until a quit is requested
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut impl EventSource,
    ) -> io::Result<()> {
        tracing::info!("Entering main loop");
        while self.running {
            terminal.draw(|frame| self.draw(frame))?;
            if let Some(key) = next_key(events, POLL_INTERVAL)? {
                self.handle_key(key);
            }
            self.tick();
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match self.mode {
            Mode::Navigation => self.handle_navigation_key(key),
            Mode::CommandEntry => self.handle_command_key(key),
        }
        self.update_focus();
        self.process_actions();
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) {
        let greedy = self
            .focus
            .map(|target| self.widget(target).focus_greedy())
            .unwrap_or(false);
        if key.code == KeyCode::Char(COMMAND_PREFIX) && !greedy {
            self.begin_command();
            return;
        }

        match self.focus {
            Some(target) => self.widget_mut(target).handle_input(key),
            None => {
                if let Some(target) = self.request_view.handle_input(key, &self.actions_tx) {
                    self.set_focus(Some(target));
                }
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_command(),
            KeyCode::Esc => self.end_command(),
            _ => {
                self.command.handle_input(key);
                if !self.command.text().starts_with(COMMAND_PREFIX) {
                    self.end_command();
                }
            }
        }
    }

    fn begin_command(&mut self) {
        self.mode = Mode::CommandEntry;
        self.command.set_text(COMMAND_PREFIX.to_string());
        self.set_focus(Some(FocusTarget::Command));
    }

    fn end_command(&mut self) {
        self.set_focus(None);
        self.command.set_text("");
        self.mode = Mode::Navigation;
    }

    fn submit_command(&mut self) {
        let line = self.command.text().to_string();
        self.end_command();
        match commands::execute(&line, self) {
            Ok(()) => self.status_clear(),
            Err(e) => {
                tracing::debug!(line = %line, error = %e, "Command failed");
                self.status_error(format!("Error: {}", e));
            }
        }
    }

    /// Handle everything widget callbacks queued since the last call
    pub fn process_actions(&mut self) {
        while let Ok(action) = self.actions_rx.try_recv() {
            tracing::debug!(?action, "Processing action");
            match action {
                Action::SetMethod(method) => self.set_method(method),
                Action::SetUrl(url) => self.set_url(url),
                Action::Send => {
                    if let Err(e) = self.execute_request() {
                        self.status_error(format!("Error: {}", e));
                    }
                }
                Action::OpenRequest(row) => self.open_request_row(row),
            }
        }
    }

    /// Idle work: focus bookkeeping, queued actions and finished requests
    pub fn tick(&mut self) {
        self.update_focus();
        self.process_actions();
        for completion in self.executor.collect() {
            self.response_view.set_result(completion);
        }
    }

    /// Merge every retained surface into the frame
    pub fn draw(&self, frame: &mut Frame) {
        let cursor = self.focus.and_then(|target| self.widget(target).cursor());

        let buf = frame.buffer_mut();
        self.collection_view.blit(buf);
        self.request_view.blit(buf);
        self.response_view.blit(buf);
        self.status.surface().blit(buf);
        self.command.surface().blit(buf);

        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::input::tests::ScriptedEvents;
    use crate::app::tests::{run_command, test_app};
    use ratatui::backend::TestBackend;

    fn script(text: &str) -> Vec<KeyCode> {
        text.chars()
            .map(|c| if c == '\n' { KeyCode::Enter } else { KeyCode::Char(c) })
            .collect()
    }

    #[tokio::test]
    async fn test_run_until_quit() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        let mut events = ScriptedEvents::keys(script(":nr Foo\n:nr Foo\n:q\n"));

        app.run(&mut terminal, &mut events).unwrap();
        assert!(!app.is_running());
        assert_eq!(events.remaining(), 0);
        assert_eq!(app.active_request().unwrap().name, "Foo");
    }

    #[tokio::test]
    async fn test_draw_places_status_and_cursor() {
        let mut app = test_app();
        run_command(&mut app, ":bogus");
        app.handle_key(crate::widgets::test_support::ch(':'));

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let status: String = (0..120u16)
            .map(|x| buffer.cell(Position::new(x, 28)).map(|c| c.symbol()).unwrap_or(" "))
            .collect();
        assert_eq!(status.trim_end(), "Error: Unknown command 'bogus'.");
        assert_eq!(buffer.cell(Position::new(0, 29)).unwrap().symbol(), ":");
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(1, 29));
    }
}
