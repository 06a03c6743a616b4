//! Right pane: latest result of the active request

use std::collections::HashMap;

use crossterm::event::KeyEvent;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget as _, Wrap};

use crate::messages::Completion;
use crate::ui::{highlight_json, status_color, Palette};
use crate::widgets::{CannotFocus, Panel, Widget, WidgetBase};

/// What is known about one request id
#[derive(Debug, Clone)]
pub enum ResponseState {
    Loading,
    Finished(Completion),
}

pub struct ResponseView {
    panel: Panel,
    base: WidgetBase,
    palette: Palette,
    results: HashMap<String, ResponseState>,
    current: Option<String>,
}

impl ResponseView {
    pub fn new(area: Rect, palette: &Palette) -> Self {
        let mut panel = Panel::new(area, palette.widget_colors());
        panel.set_title("Response");
        let base = WidgetBase::new(panel.content_area(), palette.widget_colors());
        let mut view = ResponseView {
            panel,
            base,
            palette: *palette,
            results: HashMap::new(),
            current: None,
        };
        view.repaint();
        view
    }

    /// Switch to the result stored under `id`
    pub fn show(&mut self, id: Option<String>) {
        self.current = id;
        self.refresh();
    }

    pub fn set_loading(&mut self, id: &str) {
        self.results.insert(id.to_string(), ResponseState::Loading);
        if self.current.as_deref() == Some(id) {
            self.refresh();
        }
    }

    /// Store a completion, replacing whatever was there for its id
    pub fn set_result(&mut self, completion: Completion) {
        let shown = self.current.as_deref() == Some(completion.id.as_str());
        self.results
            .insert(completion.id.clone(), ResponseState::Finished(completion));
        if shown {
            self.refresh();
        }
    }

    pub fn state(&self, id: &str) -> Option<&ResponseState> {
        self.results.get(id)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn blit(&self, frame: &mut Buffer) {
        self.panel.surface().blit(frame);
        self.surface().blit(frame);
    }

    fn current_state(&self) -> Option<&ResponseState> {
        self.current.as_deref().and_then(|id| self.results.get(id))
    }

    fn refresh(&mut self) {
        let title = match self.current_state() {
            Some(ResponseState::Finished(c)) => match &c.outcome {
                Ok(r) => format!(
                    "Response · {}ms · {}",
                    r.elapsed_ms,
                    c.received_at.format("%H:%M:%S")
                ),
                Err(_) => format!("Response · failed · {}", c.received_at.format("%H:%M:%S")),
            },
            Some(ResponseState::Loading) => String::from("Response · ..."),
            None => String::from("Response"),
        };
        self.panel.set_title(title);
        self.repaint();
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let base = self.base.colors().style();
        let dim = base.fg(self.palette.contrast);
        let error = base.fg(self.palette.error).add_modifier(Modifier::BOLD);

        if self.current.is_none() {
            return Vec::new();
        }
        match self.current_state() {
            None => vec![Line::styled("No response yet. Press 's' to send.", dim)],
            Some(ResponseState::Loading) => vec![Line::styled("Loading...", dim)],
            Some(ResponseState::Finished(completion)) => match &completion.outcome {
                Ok(response) => {
                    let reason = reqwest::StatusCode::from_u16(response.status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("");
                    let mut lines = vec![
                        Line::from(Span::styled(
                            format!("HTTP {} {}", response.status, reason).trim_end().to_string(),
                            base.fg(status_color(response.status))
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::default(),
                    ];
                    match response.body_text() {
                        Some(text) => lines.extend(highlight_json(&text, base)),
                        None => lines.push(Line::styled("[binary data]", dim)),
                    }
                    lines
                }
                Err(e) => vec![
                    Line::styled("Request failed", error),
                    Line::default(),
                    Line::styled(e.to_string(), Style::default().fg(self.palette.error)),
                ],
            },
        }
    }
}

impl Widget for ResponseView {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn try_focus(&mut self) -> Result<(), CannotFocus> {
        Err(CannotFocus)
    }

    fn handle_input(&mut self, _key: KeyEvent) {}

    fn render(&mut self) {
        let area = self.base.area();
        let lines = self.lines();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, self.base.clear());
    }
}
