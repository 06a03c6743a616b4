//! Single-line text input with a horizontally scrolling viewport

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};

use super::{printable_char, Widget, WidgetBase, WidgetColors};

type ChangeHandler = Box<dyn FnMut(&str)>;

pub struct LineEdit {
    base: WidgetBase,
    text: String,
    /// Cursor as a character index in `0..=len`
    cursor: usize,
    /// First visible character
    offset: usize,
    width: usize,
    on_change: Option<ChangeHandler>,
}

impl LineEdit {
    /// A one-row editor; the viewport width is the width of `area`
    pub fn new(area: Rect, colors: WidgetColors) -> Self {
        let area = Rect { height: area.height.min(1), ..area };
        LineEdit {
            base: WidgetBase::new(area, colors).greedy(),
            text: String::new(),
            cursor: 0,
            offset: 0,
            width: area.width.max(1) as usize,
            on_change: None,
        }
    }

    pub fn on_change(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(handler));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Replace the whole buffer and move the cursor to the end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
        self.pull_offset();
        self.repaint();
    }

    /// The part of the text inside the viewport
    pub fn visible_text(&self) -> String {
        self.text.chars().skip(self.offset).take(self.width).collect()
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Keep the cursor inside `[offset, offset + width)`
    fn pull_offset(&mut self) {
        let width = self.width;
        if self.cursor == self.len() {
            self.offset = self.cursor.max(width - 1) + 1 - width;
        } else if self.cursor >= self.offset + width {
            self.offset = self.cursor + 1 - width;
        } else if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    fn changed(&mut self) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&self.text);
        }
    }
}

impl Widget for LineEdit {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn handle_input(&mut self, key: KeyEvent) {
        let mut edited = false;
        if let Some(c) = printable_char(&key) {
            let at = self.byte_index(self.cursor);
            self.text.insert(at, c);
            self.cursor += 1;
            edited = true;
        } else {
            match key.code {
                KeyCode::Backspace if self.cursor > 0 => {
                    let at = self.byte_index(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                    edited = true;
                }
                KeyCode::Delete if self.cursor < self.len() => {
                    let at = self.byte_index(self.cursor);
                    self.text.remove(at);
                    edited = true;
                }
                KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
                KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
                KeyCode::Home => self.cursor = 0,
                KeyCode::End => self.cursor = self.len(),
                KeyCode::Enter | KeyCode::Esc => {
                    self.unfocus();
                    return;
                }
                _ => return,
            }
        }

        self.pull_offset();
        self.repaint();
        if edited {
            self.changed();
        }
    }

    fn cursor(&self) -> Option<Position> {
        let area = self.base.area();
        Some(Position::new(area.x + (self.cursor - self.offset) as u16, area.y))
    }

    fn render(&mut self) {
        let area = self.base.area();
        let portion = self.visible_text();
        let style = self.base.colors().style();
        self.base.clear().set_stringn(area.x, area.y, portion, self.width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::{ch, key, type_str};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn edit(width: u16) -> LineEdit {
        LineEdit::new(Rect::new(0, 0, width, 1), WidgetColors::default())
    }

    fn assert_viewport(e: &LineEdit) {
        let len = e.text().chars().count();
        if len == 0 {
            assert_eq!((e.cursor_index(), e.offset()), (0, 0));
        } else {
            assert!(e.offset() <= e.cursor_index(), "offset {} cursor {}", e.offset(), e.cursor_index());
            assert!(e.cursor_index() < e.offset() + e.width);
        }
        let expected: String = e.text().chars().skip(e.offset()).take(e.width).collect();
        assert_eq!(e.visible_text(), expected);
        assert_eq!(e.surface().line(0).trim_end(), expected.trim_end());
    }

    #[test]
    fn test_typing_past_width_scrolls() {
        let mut e = edit(5);
        for c in "abcdefgh".chars() {
            e.handle_input(ch(c));
            assert_viewport(&e);
        }
        assert_eq!(e.text(), "abcdefgh");
        assert_eq!(e.offset(), 4);
        assert_eq!(e.visible_text(), "efgh");
        assert_eq!(e.cursor(), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_moving_left_scrolls_back() {
        let mut e = edit(4);
        type_str(&mut e, "abcdefg");
        for _ in 0..7 {
            e.handle_input(key(KeyCode::Left));
            assert_viewport(&e);
        }
        assert_eq!((e.cursor_index(), e.offset()), (0, 0));
        e.handle_input(key(KeyCode::Left));
        assert_eq!(e.cursor_index(), 0);
        for _ in 0..5 {
            e.handle_input(key(KeyCode::Right));
            assert_viewport(&e);
        }
        assert_eq!((e.cursor_index(), e.offset()), (5, 2));
    }

    #[test]
    fn test_mixed_edits_keep_invariant() {
        let mut e = edit(3);
        let script = [
            ch('h'), ch('e'), ch('l'), ch('l'), ch('o'),
            key(KeyCode::Left), key(KeyCode::Left), key(KeyCode::Backspace),
            ch('X'), key(KeyCode::Left), key(KeyCode::Left), key(KeyCode::Left),
            key(KeyCode::Backspace), key(KeyCode::Backspace), key(KeyCode::Right),
            key(KeyCode::Right), key(KeyCode::Right), key(KeyCode::Right),
            key(KeyCode::Backspace), key(KeyCode::Backspace), key(KeyCode::Backspace),
            key(KeyCode::Backspace), key(KeyCode::Backspace),
        ];
        for k in script {
            e.handle_input(k);
            assert_viewport(&e);
        }
        assert_eq!(e.text(), "o");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut e = edit(5);
        e.handle_input(key(KeyCode::Backspace));
        assert_eq!(e.text(), "");
        assert_viewport(&e);
    }

    #[test]
    fn test_set_text_moves_cursor_to_end() {
        let mut e = edit(4);
        e.set_text("abcdefgh");
        assert_eq!(e.cursor_index(), 8);
        assert_eq!(e.offset(), 5);
        assert_viewport(&e);
        e.set_text("ab");
        assert_eq!((e.cursor_index(), e.offset()), (2, 0));
    }

    #[test]
    fn test_multibyte_characters() {
        let mut e = edit(4);
        type_str(&mut e, "héllo");
        e.handle_input(key(KeyCode::Left));
        e.handle_input(key(KeyCode::Backspace));
        assert_eq!(e.text(), "hélo");
        assert_viewport(&e);
    }

    #[test]
    fn test_change_callback_and_release() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut e = edit(10);
        e.on_change(move |text| sink.borrow_mut().push(text.to_string()));
        e.focus().unwrap();
        assert!(e.focus_greedy());
        type_str(&mut e, "ab");
        e.handle_input(key(KeyCode::Left));
        e.handle_input(key(KeyCode::Esc));
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
        assert!(!e.focused());
    }
}
