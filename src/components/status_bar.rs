use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::model::format::human_size;
use crate::ui::theme::Theme;

use super::Component;

const ERROR_DISPLAY_MAX_LEN: usize = 60;
const ERROR_TRUNCATED_LEN: usize = ERROR_DISPLAY_MAX_LEN - 3; // room for "..."

/// Bottom status line: row counts, page, source, loading and error messages.
pub struct StatusBar {
    source: String,
    paginate: bool,
    pub total_rows: usize,
    pub working_rows: usize,
    pub shown_rows: usize,
    pub page: usize,
    pub total_pages: usize,
    pub source_bytes: Option<u64>,
    pub loading_message: Option<String>,
    pub error_message: Option<String>,
}

impl StatusBar {
    pub fn new(source: String, paginate: bool) -> Self {
        Self {
            source,
            paginate,
            total_rows: 0,
            working_rows: 0,
            shown_rows: 0,
            page: 0,
            total_pages: 0,
            source_bytes: None,
            loading_message: None,
            error_message: None,
        }
    }

    pub fn set_view(&mut self, shown: usize, working: usize, page: usize, total_pages: usize) {
        self.shown_rows = shown;
        self.working_rows = working;
        self.page = page;
        self.total_pages = total_pages;
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent) -> Option<Action> {
        None
    }

    fn handle_message(&mut self, msg: &AppMessage) -> Option<Action> {
        match msg {
            AppMessage::DataReady {
                records,
                source_bytes,
            } => {
                self.total_rows = records.len();
                self.source_bytes = Some(*source_bytes);
                self.loading_message = None;
            }
            AppMessage::LoadingStarted(msg) => {
                self.loading_message = Some(msg.clone());
                self.error_message = None;
            }
            AppMessage::LoadingFinished => {
                self.loading_message = None;
            }
            AppMessage::Error(err) => {
                self.error_message = Some(err.clone());
                self.loading_message = None;
            }
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _focused: bool) {
        let mut spans = Vec::new();

        let row_text = if self.total_rows == 0 {
            " Rows: -".to_string()
        } else if self.working_rows < self.total_rows {
            format!(
                " Rows: {}/{}/{} (filtered)",
                self.shown_rows, self.working_rows, self.total_rows
            )
        } else {
            format!(" Rows: {}/{}", self.shown_rows, self.total_rows)
        };
        spans.push(Span::styled(row_text, Theme::status_bar()));

        if self.paginate && self.total_pages > 0 {
            spans.push(Span::styled(
                format!(" | Page: {}/{}", self.page, self.total_pages),
                Theme::status_bar(),
            ));
        }

        let source_text = match self.source_bytes {
            Some(bytes) => format!(" | {} ({})", self.source, human_size(bytes)),
            None => format!(" | {}", self.source),
        };
        spans.push(Span::styled(source_text, Theme::status_bar()));

        if let Some(ref err) = self.error_message {
            let err_display = if err.len() > ERROR_DISPLAY_MAX_LEN {
                format!(" | Error: {}...", &err[..ERROR_TRUNCATED_LEN])
            } else {
                format!(" | Error: {}", err)
            };
            spans.push(Span::styled(err_display, Theme::status_error()));
        } else if let Some(ref msg) = self.loading_message {
            spans.push(Span::styled(
                format!(" | {}", msg),
                Theme::status_loading(),
            ));
        }

        // Right-aligned key hints
        let hints = " q:quit ?:help ";
        let used_width: usize = spans.iter().map(|s| s.width()).sum();
        let remaining = area.width as usize - used_width.min(area.width as usize);
        if remaining > hints.len() {
            let padding = " ".repeat(remaining - hints.len());
            spans.push(Span::styled(padding, Theme::status_bar()));
            spans.push(Span::styled(hints, Theme::status_key_hint()));
        }

        let line = Line::from(spans);
        let bar = ratatui::widgets::Paragraph::new(line).style(Theme::status_bar());
        frame.render_widget(bar, area);
    }
}
