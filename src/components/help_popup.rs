use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::ui::theme::Theme;

use super::Component;

const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 22;
const POPUP_MARGIN: u16 = 4;

pub struct HelpPopup {
    pub visible: bool,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn popup_area(area: Rect) -> Rect {
        let width = POPUP_WIDTH.min(area.width.saturating_sub(POPUP_MARGIN));
        let height = POPUP_HEIGHT.min(area.height.saturating_sub(POPUP_MARGIN));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        Rect::new(area.x + x, area.y + y, width, height)
    }

    fn keybindings() -> Vec<(&'static str, &'static str)> {
        vec![
            ("q", "Quit"),
            ("?", "Toggle this help"),
            ("j/k or Up/Down", "Move the row cursor"),
            ("h/l or Left/Right", "Move the column cursor"),
            ("g / G", "Jump to first / last row"),
            ("s or Enter", "Sort by the highlighted column"),
            ("Space", "Select / deselect the current row"),
            ("f", "Edit the column filter"),
            ("Tab (in filter)", "Cycle the filter column"),
            ("/", "Edit the global search"),
            ("Esc", "Leave filter / search input"),
            ("n / PgDn", "Next page"),
            ("p / PgUp", "Previous page"),
            ("Home / End", "First / last page"),
        ]
    }
}

impl Component for HelpPopup {
    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.visible {
            return None;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.visible = false;
                None
            }
            _ => None, // Consume all keys while help is open
        }
    }

    fn handle_message(&mut self, _msg: &AppMessage) -> Option<Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        if !self.visible {
            return;
        }

        let popup = Self::popup_area(area);
        frame.render_widget(Clear, popup);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::styled(" gridder — Keyboard Shortcuts", Theme::title()));
        lines.push(Line::raw(""));

        for (key, desc) in Self::keybindings() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:20}", key), Theme::help_key()),
                Span::styled(desc, Theme::help_description()),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled(
            " Press ? or Esc to close",
            Theme::status_key_hint(),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Theme::border_focused());

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });

        frame.render_widget(paragraph, popup);
    }
}
