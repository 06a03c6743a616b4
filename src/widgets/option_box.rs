//! Fixed choice picked by typing a unique prefix

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

use super::{printable_char, Widget, WidgetBase, WidgetColors};

type SelectHandler = Box<dyn FnMut(&str)>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no option '{0}'")]
pub struct UnknownOption(pub String);

pub struct OptionBox {
    base: WidgetBase,
    options: Vec<(String, Style)>,
    /// Prefix typed since focus was granted
    candidate: Option<String>,
    selection: Option<usize>,
    on_select: Option<SelectHandler>,
}

impl OptionBox {
    pub fn new(area: Rect, colors: WidgetColors) -> Self {
        let area = Rect { height: area.height.min(1), ..area };
        OptionBox {
            base: WidgetBase::new(area, colors).greedy(),
            options: Vec::new(),
            candidate: None,
            selection: None,
            on_select: None,
        }
    }

    /// Called with the label of every committed option
    pub fn on_select(&mut self, handler: impl FnMut(&str) + 'static) {
        self.on_select = Some(Box::new(handler));
    }

    pub fn add_option(&mut self, label: impl Into<String>, style: Style) {
        self.options.push((label.into(), style));
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.map(|i| self.options[i].0.as_str())
    }

    pub fn candidate(&self) -> Option<&str> {
        self.candidate.as_deref()
    }

    /// Commit an option without typing; does not fire `on_select`
    pub fn set_option(&mut self, label: &str) -> Result<(), UnknownOption> {
        let index = self
            .options
            .iter()
            .position(|(l, _)| l == label)
            .ok_or_else(|| UnknownOption(label.to_string()))?;
        self.selection = Some(index);
        self.candidate = None;
        self.repaint();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.repaint();
    }

    fn matching(&self, prefix: &str) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, (label, _))| label.starts_with(prefix))
            .map(|(i, _)| i)
            .collect()
    }

    fn commit(&mut self, index: usize) {
        self.selection = Some(index);
        self.candidate = None;
        self.repaint();
        let label = self.options[index].0.clone();
        if let Some(handler) = self.on_select.as_mut() {
            handler(&label);
        }
        self.unfocus();
    }
}

impl Widget for OptionBox {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn try_focus(&mut self) -> Result<(), super::CannotFocus> {
        self.candidate = Some(String::new());
        Ok(())
    }

    fn on_unfocus(&mut self) {
        self.candidate = None;
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if let Some(c) = printable_char(&key) {
            let mut typed = self.candidate.clone().unwrap_or_default();
            typed.push(c);
            let matches = self.matching(&typed);
            match matches.as_slice() {
                [] => {
                    tracing::debug!(typed = %typed, "No option matches");
                }
                [only] => self.commit(*only),
                _ => {
                    self.candidate = Some(typed);
                    self.repaint();
                }
            }
            return;
        }

        match key.code {
            KeyCode::Backspace => {
                if let Some(candidate) = self.candidate.as_mut() {
                    candidate.pop();
                    self.repaint();
                }
            }
            KeyCode::Esc => self.unfocus(),
            _ => {}
        }
    }

    fn cursor(&self) -> Option<Position> {
        let area = self.base.area();
        let typed = self.candidate.as_deref().map(|c| c.chars().count()).unwrap_or(0);
        Some(Position::new(area.x + (typed as u16).min(area.width.saturating_sub(1)), area.y))
    }

    fn render(&mut self) {
        let area = self.base.area();
        let width = area.width as usize;
        let base_style = self.base.colors().style();
        let (text, style) = match (&self.candidate, self.selection) {
            (Some(candidate), _) if self.focused() => (candidate.clone(), base_style),
            (_, Some(index)) => {
                let (label, style) = &self.options[index];
                (label.clone(), base_style.patch(*style))
            }
            _ => (String::new(), base_style),
        };
        self.base.clear().set_stringn(area.x, area.y, text, width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::{ch, key};
    use ratatui::style::Color;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn methods(labels: &[&str]) -> OptionBox {
        let mut b = OptionBox::new(Rect::new(0, 0, 7, 1), WidgetColors::default());
        for label in labels {
            b.add_option(*label, Style::default().fg(Color::Green));
        }
        b
    }

    #[test]
    fn test_ambiguous_prefix_waits_then_commits() {
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = picked.clone();
        let mut b = methods(&["GET", "GOTO"]);
        b.on_select(move |label| sink.borrow_mut().push(label.to_string()));
        b.focus().unwrap();

        b.handle_input(ch('G'));
        assert_eq!(b.candidate(), Some("G"));
        assert_eq!(b.selection(), None);
        assert!(b.focused());

        b.handle_input(ch('E'));
        assert_eq!(b.selection(), Some("GET"));
        assert_eq!(b.candidate(), None);
        assert!(!b.focused());
        assert_eq!(*picked.borrow(), vec!["GET".to_string()]);
        assert_eq!(b.surface().line(0).trim_end(), "GET");
    }

    #[test]
    fn test_no_match_leaves_state() {
        let mut b = methods(&["GET", "POST"]);
        b.set_option("POST").unwrap();
        b.focus().unwrap();
        b.handle_input(ch('X'));
        assert_eq!(b.candidate(), Some(""));
        assert_eq!(b.selection(), Some("POST"));
        assert!(b.focused());
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let mut b = methods(&["GET", "PUT", "PATCH"]);
        b.focus().unwrap();
        b.handle_input(ch('p'));
        assert_eq!(b.candidate(), Some(""));
        b.handle_input(ch('P'));
        assert_eq!(b.candidate(), Some("P"));
        b.handle_input(ch('U'));
        assert_eq!(b.selection(), Some("PUT"));
    }

    #[test]
    fn test_escape_cancels_without_commit() {
        let mut b = methods(&["GET", "GOTO", "POST"]);
        b.set_option("POST").unwrap();
        b.focus().unwrap();
        b.handle_input(ch('G'));
        b.handle_input(key(KeyCode::Esc));
        assert!(!b.focused());
        assert_eq!(b.selection(), Some("POST"));
        assert_eq!(b.candidate(), None);
        assert_eq!(b.surface().line(0).trim_end(), "POST");
    }

    #[test]
    fn test_set_option_unknown() {
        let mut b = methods(&["GET"]);
        assert_eq!(b.set_option("BREW"), Err(UnknownOption("BREW".into())));
    }

    #[test]
    fn test_committed_option_uses_its_style() {
        let mut b = methods(&["GET"]);
        b.set_option("GET").unwrap();
        assert_eq!(b.surface().style_at(0, 0).fg, Some(Color::Green));
    }
}
