use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::Placement;

/// Top-level layout: grid content above a one-line status bar.
pub struct AppLayout {
    pub content: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // grid content
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            content: chunks[0],
            status_bar: chunks[1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Filter,
    Search,
    Pager,
}

/// One-line toolbar rows around the table, stacked in the fixed order
/// filter, search, pager on each side.
pub struct GridLayout {
    pub filter_bar: Option<Rect>,
    pub search_bar: Option<Rect>,
    pub pager_bar: Option<Rect>,
    pub table: Rect,
}

impl GridLayout {
    pub fn new(area: Rect, filter: Placement, search: Placement, pager: Placement) -> Self {
        let bars = [
            (Slot::Filter, filter),
            (Slot::Search, search),
            (Slot::Pager, pager),
        ];

        // None marks the table row
        let mut slots: Vec<Option<Slot>> = Vec::new();
        for (slot, placement) in bars {
            if placement == Placement::Top {
                slots.push(Some(slot));
            }
        }
        let table_index = slots.len();
        slots.push(None);
        for (slot, placement) in bars {
            if placement == Placement::Bottom {
                slots.push(Some(slot));
            }
        }

        let constraints: Vec<Constraint> = slots
            .iter()
            .map(|slot| match slot {
                None => Constraint::Min(3),
                Some(_) => Constraint::Length(1),
            })
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let mut layout = Self {
            filter_bar: None,
            search_bar: None,
            pager_bar: None,
            table: chunks[table_index],
        };
        for (i, slot) in slots.iter().enumerate() {
            match slot {
                Some(Slot::Filter) => layout.filter_bar = Some(chunks[i]),
                Some(Slot::Search) => layout.search_bar = Some(chunks[i]),
                Some(Slot::Pager) => layout.pager_bar = Some(chunks[i]),
                None => {}
            }
        }
        layout
    }
}
