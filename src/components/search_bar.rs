use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::ui::theme::Theme;

use super::Component;

/// Global search input, matching against every field of every record.
/// Re-searches on every keystroke, like the filter bar.
pub struct SearchBar {
    pub text: String,
    cursor: usize,
    editing: bool,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            editing: false,
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.cursor = self.text.len();
    }
}

impl Component for SearchBar {
    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.editing {
            return None;
        }

        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                Some(Action::FocusGrid)
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.text.remove(self.cursor - 1);
                    self.cursor -= 1;
                    return Some(Action::SearchTextChanged(self.text.clone()));
                }
                None
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    return Some(Action::SearchTextChanged(self.text.clone()));
                }
                None
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                None
            }
            KeyCode::Right => {
                if self.cursor < self.text.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.text.len();
                None
            }
            KeyCode::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += 1;
                Some(Action::SearchTextChanged(self.text.clone()))
            }
            _ => None,
        }
    }

    fn handle_message(&mut self, _msg: &AppMessage) -> Option<Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let style = if self.editing {
            Theme::input_active()
        } else {
            Theme::input_inactive()
        };

        let label = " Search: ";
        let hint = if !self.editing && self.text.is_empty() {
            "(press / to search)"
        } else {
            ""
        };

        let spans = vec![
            Span::styled(label, Theme::label()),
            Span::styled(&self.text, style),
            Span::styled(hint, Theme::status_key_hint()),
        ];

        if self.editing {
            let cursor_x = area.x + label.len() as u16 + self.cursor as u16;
            frame.set_cursor_position((cursor_x, area.y));
        }

        let line = Line::from(spans);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn is_input_mode(&self) -> bool {
        self.editing
    }
}
