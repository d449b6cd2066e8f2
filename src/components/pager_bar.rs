use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::ui::theme::Theme;

use super::Component;

/// Read-only pager display. The pager keys themselves are bound on the
/// grid, so this component only mirrors the current page state.
pub struct PagerBar {
    page: usize,
    total_pages: usize,
}

impl PagerBar {
    pub fn new() -> Self {
        Self {
            page: 0,
            total_pages: 0,
        }
    }

    pub fn set_pages(&mut self, page: usize, total_pages: usize) {
        self.page = page;
        self.total_pages = total_pages;
    }

    fn count_label(&self) -> String {
        format!(" page {} of {} pages ", self.page, self.total_pages)
    }
}

impl Component for PagerBar {
    fn handle_key(&mut self, _key: KeyEvent) -> Option<Action> {
        None
    }

    fn handle_message(&mut self, _msg: &AppMessage) -> Option<Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let spans = vec![
            Span::styled(" << < ", Theme::pager_button()),
            Span::styled(self.count_label(), Theme::pager_count()),
            Span::styled(" > >> ", Theme::pager_button()),
            Span::styled("  n/p:page  Home/End:first/last", Theme::status_key_hint()),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
