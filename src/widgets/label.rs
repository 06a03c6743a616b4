//! Static, possibly multi-line text

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{CannotFocus, Widget, WidgetBase, WidgetColors};

pub struct Label {
    base: WidgetBase,
    text: String,
    lines: Vec<String>,
    modifier: Modifier,
}

impl Label {
    pub fn new(area: Rect, colors: WidgetColors, text: impl Into<String>) -> Self {
        let mut label = Label {
            base: WidgetBase::new(area, colors),
            text: text.into(),
            lines: Vec::new(),
            modifier: Modifier::empty(),
        };
        label.produce_lines();
        label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.produce_lines();
        self.repaint();
    }

    pub fn bold(&self) -> bool {
        self.modifier.contains(Modifier::BOLD)
    }

    pub fn set_bold(&mut self, value: bool) {
        self.set_modifier(Modifier::BOLD, value);
    }

    pub fn italic(&self) -> bool {
        self.modifier.contains(Modifier::ITALIC)
    }

    pub fn set_italic(&mut self, value: bool) {
        self.set_modifier(Modifier::ITALIC, value);
    }

    pub fn underline(&self) -> bool {
        self.modifier.contains(Modifier::UNDERLINED)
    }

    pub fn set_underline(&mut self, value: bool) {
        self.set_modifier(Modifier::UNDERLINED, value);
    }

    fn set_modifier(&mut self, modifier: Modifier, value: bool) {
        self.modifier.set(modifier, value);
        self.repaint();
    }

    /// Split on newlines and hard-wrap at the surface width, dropping rows that do not fit
    fn produce_lines(&mut self) {
        let area = self.base.area();
        let width = area.width as usize;
        let height = area.height as usize;
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut length = 0;

        for ch in self.text.chars() {
            if lines.len() >= height {
                break;
            }
            if ch == '\n' {
                lines.push(std::mem::take(&mut line));
                length = 0;
                continue;
            }
            line.push(ch);
            length += 1;
            if length >= width {
                lines.push(std::mem::take(&mut line));
                length = 0;
            }
        }

        if !line.is_empty() && lines.len() < height {
            lines.push(line);
        }
        self.lines = lines;
    }
}

impl Widget for Label {
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
        let style = self.base.colors().style().add_modifier(self.modifier);
        let buf = self.base.clear();
        buf.set_style(area, Style::default().add_modifier(self.modifier));
        for (row, line) in self.lines.iter().enumerate() {
            buf.set_stringn(area.x, area.y + row as u16, line, area.width as usize, style);
        }
    }
}
