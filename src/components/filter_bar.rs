use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::model::record::title_case;
use crate::ui::theme::Theme;

use super::Component;

/// Column filter input: a column selector plus a text box. Typing refilters
/// on every keystroke; there is no debouncing.
pub struct FilterBar {
    columns: Vec<String>,
    selected: usize,
    pub text: String,
    cursor: usize,
    editing: bool,
}

impl FilterBar {
    pub fn new() -> Self {
        Self {
            columns: vec![],
            selected: 0,
            text: String::new(),
            cursor: 0,
            editing: false,
        }
    }

    pub fn set_columns(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        self.selected = 0;
        self.text.clear();
        self.cursor = 0;
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.columns.get(self.selected).map(String::as_str)
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.cursor = self.text.len();
    }

    /// Move to the next filter column, clearing the filter text: a filter
    /// typed for one column must not silently apply to another.
    fn cycle_column(&mut self) -> Option<Action> {
        if self.columns.is_empty() {
            return None;
        }
        self.selected = (self.selected + 1) % self.columns.len();
        self.text.clear();
        self.cursor = 0;
        Some(Action::FilterColumnChanged(
            self.columns[self.selected].clone(),
        ))
    }
}

impl Component for FilterBar {
    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if !self.editing {
            return None;
        }

        match key.code {
            KeyCode::Tab => self.cycle_column(),
            KeyCode::Enter | KeyCode::Esc => {
                self.editing = false;
                Some(Action::FocusGrid)
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.text.remove(self.cursor - 1);
                    self.cursor -= 1;
                    return Some(Action::FilterTextChanged(self.text.clone()));
                }
                None
            }
            KeyCode::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                    return Some(Action::FilterTextChanged(self.text.clone()));
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
                Some(Action::FilterTextChanged(self.text.clone()))
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

        let column = self
            .selected_column()
            .map(title_case)
            .unwrap_or_else(|| "-".to_string());
        let label = format!(" Filter [{}]: ", column);
        let hint = if !self.editing && self.text.is_empty() {
            "(press f to filter, Tab cycles the column)"
        } else {
            ""
        };

        let spans = vec![
            Span::styled(label.clone(), Theme::label()),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn bar() -> FilterBar {
        let mut bar = FilterBar::new();
        bar.set_columns(&["name".to_string(), "age".to_string()]);
        bar.start_editing();
        bar
    }

    #[test]
    fn defaults_to_the_first_column() {
        let bar = bar();
        assert_eq!(bar.selected_column(), Some("name"));
    }

    #[test]
    fn typing_emits_the_accumulated_text() {
        let mut bar = bar();
        assert_eq!(
            bar.handle_key(key(KeyCode::Char('a'))),
            Some(Action::FilterTextChanged("a".into()))
        );
        assert_eq!(
            bar.handle_key(key(KeyCode::Char('b'))),
            Some(Action::FilterTextChanged("ab".into()))
        );
    }

    #[test]
    fn backspace_emits_the_shortened_text() {
        let mut bar = bar();
        bar.handle_key(key(KeyCode::Char('a')));
        bar.handle_key(key(KeyCode::Char('b')));
        assert_eq!(
            bar.handle_key(key(KeyCode::Backspace)),
            Some(Action::FilterTextChanged("a".into()))
        );
    }

    #[test]
    fn backspace_at_the_start_emits_nothing() {
        let mut bar = bar();
        assert_eq!(bar.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn tab_cycles_the_column_and_clears_the_text() {
        let mut bar = bar();
        bar.handle_key(key(KeyCode::Char('x')));
        assert_eq!(
            bar.handle_key(key(KeyCode::Tab)),
            Some(Action::FilterColumnChanged("age".into()))
        );
        assert_eq!(bar.text, "");
        assert_eq!(bar.selected_column(), Some("age"));

        // wraps around
        assert_eq!(
            bar.handle_key(key(KeyCode::Tab)),
            Some(Action::FilterColumnChanged("name".into()))
        );
    }

    #[test]
    fn escape_returns_focus_to_the_grid() {
        let mut bar = bar();
        assert_eq!(bar.handle_key(key(KeyCode::Esc)), Some(Action::FocusGrid));
        assert!(!bar.is_input_mode());
    }

    #[test]
    fn keys_are_ignored_when_not_editing() {
        let mut bar = FilterBar::new();
        bar.set_columns(&["name".to_string()]);
        assert_eq!(bar.handle_key(key(KeyCode::Char('a'))), None);
    }
}
