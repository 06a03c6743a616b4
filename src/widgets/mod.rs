//! Widget layer - retained-surface controls with a shared focus/repaint protocol
//!
//! Every widget owns a [`Surface`]: a ratatui [`Buffer`] covering a fixed
//! rectangle of the screen. `render()` redraws that buffer from scratch; the
//! application loop merges all surfaces into the frame on every tick.
//! Focus changes go through [`Widget::focus`] / [`Widget::unfocus`] so the
//! owner can keep at most one widget focused.

pub mod button;
pub mod label;
pub mod line_edit;
pub mod list_box;
pub mod option_box;
pub mod panel;

pub use button::Button;
pub use label::Label;
pub use line_edit::LineEdit;
pub use list_box::ListBox;
pub use option_box::OptionBox;
pub use panel::Panel;

use std::ops::{Deref, DerefMut};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};

/// Raised by a widget that cannot take focus, either structurally or right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("widget cannot take focus")]
pub struct CannotFocus;

/// Foreground/background pair a widget is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetColors {
    pub foreground: Color,
    pub background: Color,
}

impl WidgetColors {
    pub fn new(foreground: Color, background: Color) -> Self {
        WidgetColors { foreground, background }
    }

    pub fn style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Foreground and background swapped, used for selections
    pub fn inverted(&self) -> Style {
        Style::default().fg(self.background).bg(self.foreground)
    }
}

impl Default for WidgetColors {
    fn default() -> Self {
        WidgetColors::new(Color::White, Color::Black)
    }
}

/// Retained drawing area of one widget
#[derive(Debug, Clone)]
pub struct Surface {
    buffer: Buffer,
    revision: u64,
}

impl Surface {
    pub fn new(area: Rect) -> Self {
        Surface {
            buffer: Buffer::empty(area),
            revision: 0,
        }
    }

    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Number of full renders so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Text of one row, relative to the surface origin
    pub fn line(&self, row: u16) -> String {
        let area = self.area();
        (area.x..area.right())
            .map(|x| {
                self.buffer
                    .cell((x, area.y + row))
                    .map(|c| c.symbol())
                    .unwrap_or(" ")
            })
            .collect()
    }

    /// Style of one cell, relative to the surface origin
    pub fn style_at(&self, col: u16, row: u16) -> Style {
        let area = self.area();
        self.buffer
            .cell((area.x + col, area.y + row))
            .map(|c| c.style())
            .unwrap_or_default()
    }

    /// Copy this surface onto a larger target buffer (the frame)
    pub fn blit(&self, target: &mut Buffer) {
        let area = self.area().intersection(target.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let (Some(src), Some(dst)) = (self.buffer.cell((x, y)), target.cell_mut((x, y))) {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// State shared by every widget
#[derive(Debug)]
pub struct WidgetBase {
    focused: bool,
    focus_greedy: bool,
    colors: WidgetColors,
    surface: Surface,
    paused: u32,
    pending: bool,
}

impl WidgetBase {
    pub fn new(area: Rect, colors: WidgetColors) -> Self {
        WidgetBase {
            focused: false,
            focus_greedy: false,
            colors,
            surface: Surface::new(area),
            paused: 0,
            pending: false,
        }
    }

    pub fn greedy(mut self) -> Self {
        self.focus_greedy = true;
        self
    }

    pub fn colors(&self) -> WidgetColors {
        self.colors
    }

    pub fn area(&self) -> Rect {
        self.surface.area()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Buffer to draw into, cleared to the widget colours
    pub fn clear(&mut self) -> &mut Buffer {
        let area = self.surface.area();
        let style = self.colors.style();
        let buf = self.surface.buffer_mut();
        buf.reset();
        buf.set_style(area, style);
        buf
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.surface.buffer_mut()
    }
}

/// Focus state machine and repaint contract for on-screen controls
pub trait Widget {
    fn base(&self) -> &WidgetBase;
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Draw the whole surface from scratch
    fn render(&mut self);

    fn handle_input(&mut self, key: KeyEvent);

    /// Hook run before focus is granted
    fn try_focus(&mut self) -> Result<(), CannotFocus> {
        Ok(())
    }

    /// Hook run once focus has been granted
    fn on_focus(&mut self) {
        self.repaint();
    }

    /// Hook run before focus is revoked
    fn on_unfocus(&mut self) {}

    /// Terminal cursor position while focused
    fn cursor(&self) -> Option<Position> {
        None
    }

    fn focused(&self) -> bool {
        self.base().focused
    }

    fn focus_greedy(&self) -> bool {
        self.base().focus_greedy
    }

    fn set_focus_greedy(&mut self, greedy: bool) {
        self.base_mut().focus_greedy = greedy;
    }

    fn focus(&mut self) -> Result<(), CannotFocus> {
        if self.focused() {
            return Ok(());
        }
        self.try_focus()?;
        self.base_mut().focused = true;
        self.on_focus();
        Ok(())
    }

    fn unfocus(&mut self) {
        if !self.focused() {
            return;
        }
        self.on_unfocus();
        self.base_mut().focused = false;
        self.repaint();
    }

    fn repaint(&mut self) {
        let base = self.base_mut();
        if base.paused > 0 {
            base.pending = true;
            return;
        }
        // Zero-sized surfaces occur on very small terminals
        if base.area().is_empty() {
            return;
        }
        self.render();
        self.base_mut().surface.revision += 1;
    }

    fn surface(&self) -> &Surface {
        &self.base().surface
    }

    fn colors(&self) -> WidgetColors {
        self.base().colors
    }

    fn set_foreground(&mut self, color: Color) {
        self.base_mut().colors.foreground = color;
        self.repaint();
    }

    fn set_background(&mut self, color: Color) {
        self.base_mut().colors.background = color;
        self.repaint();
    }

    /// Coalesce repaints until the returned guard is dropped
    fn pause_repaint(&mut self) -> RepaintBatch<'_, Self>
    where
        Self: Sized,
    {
        RepaintBatch::new(self)
    }
}

/// Scope guard: repaints requested while alive are folded into one render on drop
pub struct RepaintBatch<'a, W: Widget + ?Sized> {
    widget: &'a mut W,
}

impl<'a, W: Widget + ?Sized> RepaintBatch<'a, W> {
    pub fn new(widget: &'a mut W) -> Self {
        widget.base_mut().paused += 1;
        RepaintBatch { widget }
    }
}

impl<W: Widget + ?Sized> Deref for RepaintBatch<'_, W> {
    type Target = W;

    fn deref(&self) -> &W {
        self.widget
    }
}

impl<W: Widget + ?Sized> DerefMut for RepaintBatch<'_, W> {
    fn deref_mut(&mut self) -> &mut W {
        self.widget
    }
}

impl<W: Widget + ?Sized> Drop for RepaintBatch<'_, W> {
    fn drop(&mut self) {
        let base = self.widget.base_mut();
        base.paused -= 1;
        if base.paused == 0 && base.pending {
            base.pending = false;
            self.widget.repaint();
        }
    }
}

/// Character for a plain printable key press
pub(crate) fn printable_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !c.is_control()
                && !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
