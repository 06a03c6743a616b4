//! Bordered, non-focusable container

use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect, Size};
use ratatui::widgets::{Block, Widget as _};

use super::{CannotFocus, Widget, WidgetBase, WidgetColors};

pub struct Panel {
    base: WidgetBase,
    title: Option<String>,
}

impl Panel {
    pub fn new(area: Rect, colors: WidgetColors) -> Self {
        Panel {
            base: WidgetBase::new(area, colors),
            title: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
        self.repaint();
    }

    /// Top-left cell inside the border
    pub fn content_origin(&self) -> Position {
        let area = self.content_area();
        Position::new(area.x, area.y)
    }

    /// Surface size minus the border
    pub fn content_size(&self) -> Size {
        let area = self.content_area();
        Size::new(area.width, area.height)
    }

    pub fn content_area(&self) -> Rect {
        let area = self.base.area();
        Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1),
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        )
    }

    /// Rectangle for a child placed at (`row`, `col`) relative to the content origin,
    /// clipped to the content area
    pub fn child_area(&self, row: u16, col: u16, height: u16, width: u16) -> Rect {
        let content = self.content_area();
        Rect::new(
            content.x.saturating_add(col),
            content.y.saturating_add(row),
            width,
            height,
        )
        .intersection(content)
    }
}

impl Widget for Panel {
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
        let style = self.base.colors().style();
        let mut block = Block::bordered().style(style).border_style(style);
        if let Some(title) = &self.title {
            block = block.title(format!(" {} ", title));
        }
        block.render(area, self.base.clear());
    }
}
