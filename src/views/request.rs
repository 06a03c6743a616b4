//! Middle pane: method, URL and Send button of the active request

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::app::FocusTarget;
use crate::messages::{emit, Action, ActionSender};
use crate::models::{HttpMethod, Request};
use crate::ui::Palette;
use crate::widgets::{Button, Label, LineEdit, OptionBox, Panel, Widget};

const METHOD_COL: u16 = 9;
const METHOD_WIDTH: u16 = 7;
const URL_COL: u16 = 6;
const SEND_WIDTH: u16 = 8;

pub struct RequestView {
    panel: Panel,
    /// Caption labels; the first of each pair is the underlined hotkey
    captions: Vec<Label>,
    method: OptionBox,
    url: LineEdit,
    send: Button,
    palette: Palette,
    has_request: bool,
}

impl RequestView {
    pub fn new(area: Rect, palette: &Palette, actions: ActionSender) -> Self {
        let colors = palette.widget_colors();
        let mut panel = Panel::new(area, colors);
        panel.set_title("Request");
        let content = panel.content_size();

        let captions = vec![
            hotkey(panel.child_area(1, 1, 1, 1), palette, "M"),
            Label::new(panel.child_area(1, 2, 1, 6), colors, "ethod:"),
            hotkey(panel.child_area(3, 1, 1, 1), palette, "U"),
            Label::new(panel.child_area(3, 2, 1, 3), colors, "RL:"),
        ];

        let mut method = OptionBox::new(panel.child_area(1, METHOD_COL, 1, METHOD_WIDTH), colors);
        for m in HttpMethod::ALL {
            method.add_option(m.as_str(), Style::default().fg(m.color()));
        }
        let tx = actions.clone();
        method.on_select(move |label| {
            if let Some(m) = HttpMethod::from_label(label) {
                emit(&tx, Action::SetMethod(m));
            }
        });

        let url_width = content.width.saturating_sub(URL_COL + 1).max(1);
        let mut url = LineEdit::new(panel.child_area(3, URL_COL, 1, url_width), colors);
        url.set_background(palette.contrast);
        let tx = actions.clone();
        url.on_change(move |text| emit(&tx, Action::SetUrl(text.to_string())));

        let send_area = panel.child_area(
            content.height.saturating_sub(3),
            content.width.saturating_sub(SEND_WIDTH + 1),
            3,
            SEND_WIDTH,
        );
        let mut send = Button::new(send_area, colors, "Send");
        send.on_click(move || emit(&actions, Action::Send));
        send.set_shortcut(Some('S'));

        let mut view = RequestView {
            panel,
            captions,
            method,
            url,
            send,
            palette: *palette,
            has_request: false,
        };
        for caption in &mut view.captions {
            caption.repaint();
        }
        view.method.repaint();
        view
    }

    /// Load `request` into the editors, or blank them
    pub fn show(&mut self, request: Option<&Request>) {
        self.has_request = request.is_some();
        match request {
            Some(request) => {
                self.panel.set_title(format!("Request: {}", request.name));
                if let Err(e) = self.method.set_option(request.method.as_str()) {
                    tracing::error!(error = %e, "Method missing from option box");
                }
                self.url.set_text(request.url.clone());
                self.mark_url(&request.url);
            }
            None => {
                self.panel.set_title("Request");
                self.method.clear_selection();
                self.url.set_text("");
            }
        }
    }

    /// Tint the URL field by whether it holds an http(s) URL
    pub fn mark_url(&mut self, url: &str) {
        let background = if is_valid_url(url) {
            self.palette.contrast
        } else {
            self.palette.error
        };
        if self.url.colors().background != background {
            self.url.set_background(background);
        }
    }

    /// Keys pressed while nothing is focused. Returns the widget to focus, if any.
    pub fn handle_input(&mut self, key: KeyEvent, actions: &ActionSender) -> Option<FocusTarget> {
        match key.code {
            KeyCode::Char('c') => Some(FocusTarget::Collection),
            _ if !self.has_request => None,
            KeyCode::Char('m') => Some(FocusTarget::Method),
            KeyCode::Char('u') => Some(FocusTarget::Url),
            KeyCode::Char('S') => Some(FocusTarget::Send),
            KeyCode::Char('s') => {
                emit(actions, Action::Send);
                None
            }
            _ => None,
        }
    }

    pub fn has_request(&self) -> bool {
        self.has_request
    }

    pub fn method(&self) -> &OptionBox {
        &self.method
    }

    pub fn method_mut(&mut self) -> &mut OptionBox {
        &mut self.method
    }

    pub fn url(&self) -> &LineEdit {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut LineEdit {
        &mut self.url
    }

    pub fn send(&self) -> &Button {
        &self.send
    }

    pub fn send_mut(&mut self) -> &mut Button {
        &mut self.send
    }

    pub fn blit(&self, frame: &mut Buffer) {
        self.panel.surface().blit(frame);
        for caption in &self.captions {
            caption.surface().blit(frame);
        }
        self.method.surface().blit(frame);
        self.url.surface().blit(frame);
        self.send.surface().blit(frame);
    }
}

fn hotkey(area: Rect, palette: &Palette, key: &str) -> Label {
    let mut label = Label::new(area, palette.widget_colors(), key);
    label.set_underline(true);
    label
}

pub fn is_valid_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
