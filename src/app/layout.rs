//! Fixed screen split: three panes over a status row and the command row

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::constants::COLLECTION_PANE_WIDTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub collection: Rect,
    pub request: Rect,
    pub response: Rect,
    pub status: Rect,
    pub command: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Panes
                Constraint::Length(1), // Status
                Constraint::Length(1), // Command line
            ])
            .split(area);

        let collection_width = COLLECTION_PANE_WIDTH.min(area.width / 3);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(collection_width),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ])
            .split(rows[0]);

        AppLayout {
            collection: panes[0],
            request: panes[1],
            response: panes[2],
            status: rows[1],
            command: rows[2],
        }
    }
}
