//! Scrollable list of labels with a single selected row

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;

use super::{CannotFocus, Widget, WidgetBase, WidgetColors};
use crate::ui::ellipsize;

type ActivateHandler = Box<dyn FnMut(usize)>;

pub struct ListBox {
    base: WidgetBase,
    items: Vec<String>,
    /// Selected row, -1 when nothing is selected
    selection: isize,
    /// First visible row
    scroll: usize,
    on_activate: Option<ActivateHandler>,
}

impl ListBox {
    pub fn new(area: Rect, colors: WidgetColors) -> Self {
        ListBox {
            base: WidgetBase::new(area, colors),
            items: Vec::new(),
            selection: -1,
            scroll: 0,
            on_activate: None,
        }
    }

    /// Called with the selected index when Enter is pressed
    pub fn on_activate(&mut self, handler: impl FnMut(usize) + 'static) {
        self.on_activate = Some(Box::new(handler));
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selection(&self) -> isize {
        self.selection
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn visible_rows(&self) -> usize {
        self.base.area().height as usize
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selection = -1;
        self.scroll = 0;
        self.repaint();
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        let at = self.items.len();
        self.insert_at(at, item);
    }

    pub fn insert_at(&mut self, index: usize, item: impl Into<String>) {
        let index = index.min(self.items.len());
        self.items.insert(index, item.into());
        if self.selection >= 0 && index as isize <= self.selection {
            self.selection += 1;
        }
        self.select_first_if_focused();
        self.adjust_offset();
        self.repaint();
    }

    /// Insert after every item whose key is `<=` the new item's key
    pub fn insert_sorted<K, F>(&mut self, item: impl Into<String>, key: F)
    where
        K: Ord,
        F: Fn(&str) -> K,
    {
        let item = item.into();
        let item_key = key(&item);
        let index = self.items.partition_point(|existing| key(existing.as_str()) <= item_key);
        self.insert_at(index, item);
    }

    fn select_first_if_focused(&mut self) {
        if self.focused() && self.selection == -1 && !self.items.is_empty() {
            self.selection = 0;
        }
    }

    /// Scroll so the selection is visible. Returns true when the viewport moved.
    fn adjust_offset(&mut self) -> bool {
        if self.selection < 0 {
            return false;
        }
        let selection = self.selection as usize;
        let rows = self.visible_rows().max(1);
        if selection < self.scroll {
            self.scroll = selection;
        } else if selection >= self.scroll + rows {
            self.scroll = selection + 1 - rows;
        } else {
            return false;
        }
        true
    }

    fn draw_row(&mut self, row: isize) {
        if row < 0 || row as usize >= self.items.len() {
            return;
        }
        let row = row as usize;
        if row < self.scroll || row >= self.scroll + self.visible_rows() {
            return;
        }
        let area = self.base.area();
        let width = area.width as usize;
        let colors = self.base.colors();
        let style = if row as isize == self.selection {
            colors.inverted()
        } else {
            colors.style()
        };
        let text = format!("{:<width$}", ellipsize(&self.items[row], width), width = width);
        let y = area.y + (row - self.scroll) as u16;
        self.base.buffer_mut().set_stringn(area.x, y, text, width, style);
    }

    /// Redraw only the rows whose selection state changed, unless repaints are batched
    fn redraw_rows(&mut self, previous: isize, current: isize) {
        if self.base.surface().revision() == 0 {
            self.repaint();
            return;
        }
        self.draw_row(previous);
        self.draw_row(current);
    }
}

impl Widget for ListBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn try_focus(&mut self) -> Result<(), CannotFocus> {
        if self.items.is_empty() {
            return Err(CannotFocus);
        }
        if self.selection == -1 {
            self.selection = 0;
            self.adjust_offset();
        }
        Ok(())
    }

    fn on_unfocus(&mut self) {
        if self.selection != -1 {
            let previous = self.selection;
            self.selection = -1;
            self.draw_row(previous);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        let previous = self.selection;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selection = (self.items.len() as isize - 1).min(self.selection + 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selection = (self.selection - 1).max(0);
            }
            KeyCode::Enter => {
                if self.selection >= 0 {
                    let index = self.selection as usize;
                    if let Some(handler) = self.on_activate.as_mut() {
                        handler(index);
                    }
                }
                return;
            }
            KeyCode::Esc => {
                self.unfocus();
                return;
            }
            _ => return,
        }

        if self.items.is_empty() {
            self.selection = -1;
        }

        if self.adjust_offset() {
            self.repaint();
        } else {
            self.redraw_rows(previous, self.selection);
        }
    }

    fn render(&mut self) {
        self.base.clear();
        let end = (self.scroll + self.visible_rows()).min(self.items.len());
        for row in self.scroll..end {
            self.draw_row(row as isize);
        }
    }
}
