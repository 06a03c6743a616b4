//! Bordered push button with an optional underlined shortcut

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget as _};

use super::{Widget, WidgetBase, WidgetColors};

type ClickHandler = Box<dyn FnMut()>;

pub struct Button {
    base: WidgetBase,
    text: String,
    shortcut: Option<char>,
    focus_color: Color,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// Three rows high: border, label, border
    pub fn new(area: Rect, colors: WidgetColors, text: impl Into<String>) -> Self {
        let area = Rect { height: area.height.min(3), ..area };
        Button {
            base: WidgetBase::new(area, colors),
            text: text.into(),
            shortcut: None,
            focus_color: Color::Green,
            on_click: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn shortcut(&self) -> Option<char> {
        self.shortcut
    }

    pub fn set_shortcut(&mut self, shortcut: Option<char>) {
        self.shortcut = shortcut;
        self.repaint();
    }

    pub fn on_click(&mut self, handler: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(handler));
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if let Some(handler) = self.on_click.as_mut() {
                    handler();
                }
                self.unfocus();
            }
            KeyCode::Esc => self.unfocus(),
            _ => {}
        }
    }

    fn render(&mut self) {
        let area = self.base.area();
        let colors = self.base.colors();
        let border = if self.focused() {
            colors.style().fg(self.focus_color)
        } else {
            colors.style()
        };
        let inner_width = area.width.saturating_sub(2) as usize;
        let label: String = self.text.chars().take(inner_width).collect();
        let shortcut_at = self
            .shortcut
            .and_then(|s| label.chars().position(|c| c == s));

        let buf = self.base.clear();
        Block::bordered().border_style(border).render(area, buf);
        if area.height < 3 {
            return;
        }
        let y = area.y + 1;
        buf.set_stringn(area.x + 1, y, &label, inner_width, colors.style());
        if let Some(index) = shortcut_at {
            if let Some(cell) = buf.cell_mut((area.x + 1 + index as u16, y)) {
                cell.set_style(Style::default().add_modifier(Modifier::UNDERLINED));
            }
        }
    }
}
