//! App layer - widget tree, focus ownership and the modal input loop
//!
//! The App owns every widget. Widget callbacks cannot reach it directly, so
//! they send [`Action`](crate::messages::Action)s through a channel the loop
//! drains after each key. Request results arrive through the
//! [`Executor`](crate::network::Executor) and are drained every tick.

pub mod event_loop;
pub mod input;
pub mod layout;
pub mod operations;
pub mod state;

pub use input::{EventSource, TerminalEvents};
pub use layout::AppLayout;
pub use state::AppContext;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::constants::DEFAULT_COLLECTION_NAME;
use crate::messages::{ActionReceiver, ActionSender};
use crate::models::{Collection, Request};
use crate::network::Executor;
use crate::ui::Palette;
use crate::views::{CollectionView, RequestView, ResponseView};
use crate::widgets::{CannotFocus, Label, LineEdit, Widget};

/// Interaction mode of the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigation,
    CommandEntry,
}

/// Widgets that can hold focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Collection,
    Method,
    Url,
    Send,
    Command,
}

pub struct App {
    mode: Mode,
    running: bool,
    palette: Palette,
    context: AppContext,
    focus: Option<FocusTarget>,

    collection_view: CollectionView,
    request_view: RequestView,
    response_view: ResponseView,
    status: Label,
    command: LineEdit,

    executor: Executor,
    actions_tx: ActionSender,
    actions_rx: ActionReceiver,
}

impl App {
    /// Build the widget tree for a screen of size `area` and open the default collection
    pub fn new(area: Rect, palette: Palette, executor: Executor) -> Self {
        let layout = AppLayout::new(area);
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        let colors = palette.widget_colors();

        let mut status = Label::new(layout.status, colors, "");
        status.set_background(palette.contrast);
        let mut command = LineEdit::new(layout.command, colors);
        command.repaint();

        let mut app = App {
            mode: Mode::Navigation,
            running: true,
            palette,
            context: AppContext::default(),
            focus: None,
            collection_view: CollectionView::new(layout.collection, &palette, actions_tx.clone()),
            request_view: RequestView::new(layout.request, &palette, actions_tx.clone()),
            response_view: ResponseView::new(layout.response, &palette),
            status,
            command,
            executor,
            actions_tx,
            actions_rx,
        };

        if let Err(e) = app.create_collection(DEFAULT_COLLECTION_NAME, true) {
            tracing::error!(error = %e, "Could not create default collection");
        }
        app
    }

    // ========================
    // Accessors
    // ========================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn focus(&self) -> Option<FocusTarget> {
        self.focus
    }

    pub fn collections(&self) -> &[Collection] {
        &self.context.collections
    }

    pub fn active_collection(&self) -> Option<&Collection> {
        self.context.collection()
    }

    pub fn active_request(&self) -> Option<&Request> {
        self.context.request()
    }

    pub fn status(&self) -> &Label {
        &self.status
    }

    pub fn command_line(&self) -> &LineEdit {
        &self.command
    }

    pub fn collection_view(&self) -> &CollectionView {
        &self.collection_view
    }

    pub fn request_view(&self) -> &RequestView {
        &self.request_view
    }

    pub fn response_view(&self) -> &ResponseView {
        &self.response_view
    }

    // ========================
    // Focus
    // ========================

    fn widget(&self, target: FocusTarget) -> &dyn Widget {
        match target {
            FocusTarget::Collection => self.collection_view.list(),
            FocusTarget::Method => self.request_view.method(),
            FocusTarget::Url => self.request_view.url(),
            FocusTarget::Send => self.request_view.send(),
            FocusTarget::Command => &self.command,
        }
    }

    fn widget_mut(&mut self, target: FocusTarget) -> &mut dyn Widget {
        match target {
            FocusTarget::Collection => self.collection_view.list_mut(),
            FocusTarget::Method => self.request_view.method_mut(),
            FocusTarget::Url => self.request_view.url_mut(),
            FocusTarget::Send => self.request_view.send_mut(),
            FocusTarget::Command => &mut self.command,
        }
    }

    /// Move focus to `target`, releasing the previous holder first.
    /// A widget that refuses focus leaves nothing focused.
    pub fn set_focus(&mut self, target: Option<FocusTarget>) {
        if self.focus == target {
            return;
        }
        if let Some(current) = self.focus.take() {
            self.widget_mut(current).unfocus();
        }
        let Some(target) = target else {
            return;
        };
        match self.widget_mut(target).focus() {
            Ok(()) => self.focus = Some(target),
            Err(CannotFocus) => tracing::debug!(?target, "Widget refused focus"),
        }
    }

    /// Forget the focus target once its widget has released focus on its own
    pub fn update_focus(&mut self) {
        if let Some(target) = self.focus {
            if !self.widget(target).focused() {
                self.focus = None;
            }
        }
    }

    // ========================
    // Status line
    // ========================

    pub fn status_error(&mut self, message: impl Into<String>) {
        let color = self.palette.error;
        let mut status = self.status.pause_repaint();
        status.set_text(message);
        status.set_bold(true);
        status.set_italic(true);
        status.set_foreground(color);
    }

    pub fn status_info(&mut self, message: impl Into<String>) {
        let color = self.palette.foreground;
        let mut status = self.status.pause_repaint();
        status.set_text(message);
        status.set_bold(false);
        status.set_italic(false);
        status.set_foreground(color);
    }

    pub fn status_clear(&mut self) {
        self.status_info("");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::constants::DEFAULT_HTTP_URL;
    use crate::models::HttpMethod;
    use crate::network::executor::tests::EchoTransport;
    use crate::views::response::ResponseState;
    use crate::widgets::test_support::{ch, key};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::runtime::Handle;

    pub(crate) fn test_app() -> App {
        let executor = Executor::new(Arc::new(EchoTransport), Handle::current());
        App::new(Rect::new(0, 0, 120, 30), Palette::default(), executor)
    }

    pub(crate) fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(ch(c));
        }
    }

    pub(crate) fn run_command(app: &mut App, line: &str) {
        type_keys(app, line);
        app.handle_key(key(KeyCode::Enter));
    }

    #[tokio::test]
    async fn test_starts_in_default_collection() {
        let app = test_app();
        assert_eq!(app.mode(), Mode::Navigation);
        assert!(app.is_running());
        assert_eq!(app.active_collection().unwrap().name, DEFAULT_COLLECTION_NAME);
        assert!(app.active_request().is_none());
        assert_eq!(app.collection_view().name(), DEFAULT_COLLECTION_NAME);
    }

    #[tokio::test]
    async fn test_backspace_over_prefix_cancels_command() {
        let mut app = test_app();
        app.handle_key(ch(':'));
        assert_eq!(app.mode(), Mode::CommandEntry);
        assert_eq!(app.command_line().text(), ":");
        assert_eq!(app.focus(), Some(FocusTarget::Command));

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.mode(), Mode::Navigation);
        assert_eq!(app.focus(), None);
        assert_eq!(app.command_line().text(), "");
    }

    #[tokio::test]
    async fn test_escape_cancels_command() {
        let mut app = test_app();
        type_keys(&mut app, ":nr x");
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode(), Mode::Navigation);
        assert!(app.active_request().is_none());
    }

    #[tokio::test]
    async fn test_command_error_styles_status() {
        let mut app = test_app();
        run_command(&mut app, ":nr Foo");
        assert_eq!(app.status().text(), "");
        run_command(&mut app, ":nr Foo");

        assert_eq!(app.mode(), Mode::Navigation);
        assert_eq!(
            app.status().text(),
            "Error: Request 'Foo' already exists in this collection."
        );
        assert!(app.status().bold() && app.status().italic());
        assert_eq!(app.status().colors().foreground, Palette::default().error);
        assert_eq!(app.active_collection().unwrap().requests.len(), 1);

        run_command(&mut app, ":sr Foo");
        assert_eq!(app.status().text(), "");
        assert!(!app.status().bold());
    }

    #[tokio::test]
    async fn test_status_row_uses_contrast_background() {
        let app = test_app();
        assert_eq!(app.status().colors().background, Palette::default().contrast);
        assert_eq!(
            app.status().surface().style_at(0, 0).bg,
            Some(Palette::default().contrast)
        );
    }

    #[tokio::test]
    async fn test_short_terminal_survives_loading_a_request() {
        for height in 3..8 {
            let executor = Executor::new(Arc::new(EchoTransport), Handle::current());
            let mut app = App::new(Rect::new(0, 0, 80, height), Palette::default(), executor);
            run_command(&mut app, ":nr Foo");
            assert_eq!(app.active_request().unwrap().name, "Foo");
            assert_eq!(app.status().text(), "");
        }
    }

    #[tokio::test]
    async fn test_colon_goes_to_greedy_widget() {
        let mut app = test_app();
        run_command(&mut app, ":nr Foo");
        app.handle_key(ch('u'));
        assert_eq!(app.focus(), Some(FocusTarget::Url));

        app.handle_key(ch(':'));
        assert_eq!(app.mode(), Mode::Navigation);
        assert_eq!(app.active_request().unwrap().url, format!("{}:", DEFAULT_HTTP_URL));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.focus(), None);
    }

    #[tokio::test]
    async fn test_colon_from_non_greedy_focus() {
        let mut app = test_app();
        run_command(&mut app, ":nr Foo");
        app.handle_key(ch('c'));
        assert_eq!(app.focus(), Some(FocusTarget::Collection));

        app.handle_key(ch(':'));
        assert_eq!(app.mode(), Mode::CommandEntry);
        assert_eq!(app.focus(), Some(FocusTarget::Command));
        assert!(!app.collection_view().list().focused());
    }

    #[tokio::test]
    async fn test_empty_list_refuses_focus() {
        let mut app = test_app();
        app.handle_key(ch('c'));
        assert_eq!(app.focus(), None);
    }

    #[tokio::test]
    async fn test_method_commit_updates_request() {
        let mut app = test_app();
        run_command(&mut app, ":nr Foo");
        app.handle_key(ch('m'));
        assert_eq!(app.focus(), Some(FocusTarget::Method));
        type_keys(&mut app, "PO");
        assert_eq!(app.focus(), None);
        assert_eq!(app.active_request().unwrap().method, HttpMethod::POST);
    }

    #[tokio::test]
    async fn test_list_activation_opens_request() {
        let mut app = test_app();
        run_command(&mut app, ":nr beta");
        run_command(&mut app, ":nr Alpha");
        run_command(&mut app, ":sr beta");

        app.handle_key(ch('c'));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.active_request().unwrap().name, "Alpha");
        assert_eq!(app.focus(), None);
        assert_eq!(app.response_view().current(), Some("Unsorted Collection/Alpha"));
    }

    #[tokio::test]
    async fn test_send_shows_loading_then_result() {
        let mut app = test_app();
        run_command(&mut app, ":nr Foo");
        app.handle_key(ch('s'));
        let id = "Unsorted Collection/Foo";
        assert!(matches!(
            app.response_view().state(id),
            Some(ResponseState::Loading)
        ));

        for _ in 0..200 {
            app.tick();
            if matches!(app.response_view().state(id), Some(ResponseState::Finished(_))) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        match app.response_view().state(id) {
            Some(ResponseState::Finished(c)) => {
                assert_eq!(c.outcome.as_ref().unwrap().body, DEFAULT_HTTP_URL.as_bytes())
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_command_mode() {
        let mut app = test_app();
        app.handle_key(ch(':'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.is_running());
    }
}
