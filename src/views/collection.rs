//! Left pane: collection name and its requests, sorted case-insensitively

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::messages::{emit, Action, ActionSender};
use crate::models::Collection;
use crate::ui::{ellipsize, Palette};
use crate::widgets::{Label, ListBox, Panel, Widget};

pub struct CollectionView {
    panel: Panel,
    name: Label,
    list: ListBox,
}

impl CollectionView {
    pub fn new(area: Rect, palette: &Palette, actions: ActionSender) -> Self {
        let colors = palette.widget_colors();
        let mut panel = Panel::new(area, colors);
        panel.set_title("Collection");

        let content = panel.content_size();
        let mut name = Label::new(panel.child_area(0, 0, 1, content.width), colors, "");
        {
            let mut batch = name.pause_repaint();
            batch.set_bold(true);
            batch.set_underline(true);
        }

        let list_height = content.height.saturating_sub(2);
        let mut list = ListBox::new(panel.child_area(2, 0, list_height, content.width), colors);
        list.on_activate(move |index| emit(&actions, Action::OpenRequest(index)));
        list.repaint();

        CollectionView { panel, name, list }
    }

    /// Replace the pane contents with `collection`
    pub fn show(&mut self, collection: &Collection) {
        let width = self.name.surface().area().width as usize;
        self.name.set_text(ellipsize(&collection.name, width));

        let mut list = self.list.pause_repaint();
        list.clear();
        for request in &collection.requests {
            list.insert_sorted(request.name.clone(), str::to_lowercase);
        }
    }

    pub fn insert_request(&mut self, name: &str) {
        self.list.insert_sorted(name.to_string(), str::to_lowercase);
    }

    /// Request name shown on list row `index`
    pub fn request_name(&self, index: usize) -> Option<&str> {
        self.list.items().get(index).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        self.name.text()
    }

    pub fn list(&self) -> &ListBox {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListBox {
        &mut self.list
    }

    pub fn blit(&self, frame: &mut Buffer) {
        self.panel.surface().blit(frame);
        self.name.surface().blit(frame);
        self.list.surface().blit(frame);
    }
}
