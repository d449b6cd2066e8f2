use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::event::{Action, AppMessage};
use crate::model::record::title_case;
use crate::model::view::SortDirection;
use crate::ui::theme::Theme;

use super::Component;

const WIDTH_SAMPLE_ROWS: usize = 100;
const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 40;
const ROW_NUMBER_WIDTH: u16 = 5;
const COLUMN_PADDING: u16 = 2;
const NO_MATCHES: &str = "No matches found";

/// The table itself: header row with sort affordances and a column cursor,
/// striped body rows, row selection.
///
/// The grid owns no pipeline state; the app pushes each new window into it
/// via `set_columns` / `set_window`. Every frame rebuilds the whole body,
/// so striping is always consistent with the current window.
pub struct GridView {
    columns: Vec<String>,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    table_state: TableState,
    cursor_col: usize,
    sort: Option<(String, SortDirection)>,
    unsorted_columns: Vec<String>,
    allow_multiselect: bool,
    selected: HashSet<usize>,
    loaded: bool,
}

impl GridView {
    pub fn new(unsorted_columns: Vec<String>, allow_multiselect: bool) -> Self {
        Self {
            columns: vec![],
            headers: vec![],
            rows: vec![],
            table_state: TableState::default(),
            cursor_col: 0,
            sort: None,
            unsorted_columns,
            allow_multiselect,
            loaded: false,
            selected: HashSet::new(),
        }
    }

    pub fn set_columns(&mut self, columns: &[String]) {
        self.columns = columns.to_vec();
        self.headers = columns.iter().map(|c| title_case(c)).collect();
        self.cursor_col = 0;
        self.loaded = true;
    }

    /// Replace the rendered window. Row selection does not survive a
    /// re-render, exactly like the original widget's selected rows.
    pub fn set_window(&mut self, rows: Vec<Vec<String>>, sort: Option<(String, SortDirection)>) {
        self.rows = rows;
        self.sort = sort;
        self.selected.clear();
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    pub fn selected_rows(&self) -> &HashSet<usize> {
        &self.selected
    }

    fn is_unsortable(&self, column: &str) -> bool {
        self.unsorted_columns.iter().any(|c| c == column)
    }

    fn move_up(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        if i > 0 {
            self.table_state.select(Some(i - 1));
        }
    }

    fn move_down(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        if i + 1 < self.rows.len() {
            self.table_state.select(Some(i + 1));
        }
    }

    fn jump_top(&mut self) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn jump_bottom(&mut self) {
        if !self.rows.is_empty() {
            self.table_state.select(Some(self.rows.len() - 1));
        }
    }

    fn move_col_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        }
    }

    fn move_col_right(&mut self) {
        if self.cursor_col + 1 < self.columns.len() {
            self.cursor_col += 1;
        }
    }

    fn toggle_select(&mut self) {
        let Some(i) = self.table_state.selected() else {
            return;
        };
        if self.rows.is_empty() {
            return;
        }
        if self.selected.contains(&i) {
            self.selected.remove(&i);
        } else {
            if !self.allow_multiselect {
                self.selected.clear();
            }
            self.selected.insert(i);
        }
    }

    fn sort_action(&self) -> Option<Action> {
        let column = self.columns.get(self.cursor_col)?;
        if self.is_unsortable(column) {
            return None;
        }
        Some(Action::ToggleSort(column.clone()))
    }

    fn header_style(&self, col_idx: usize, focused: bool) -> ratatui::style::Style {
        let column = &self.columns[col_idx];
        if self.is_unsortable(column) {
            return Theme::header_unsortable();
        }
        if focused && col_idx == self.cursor_col {
            return Theme::header_cursor();
        }
        if self.sort.as_ref().is_some_and(|(c, _)| c == column) {
            return Theme::header_sorted();
        }
        Theme::header()
    }

    fn header_text(&self, col_idx: usize) -> String {
        let mut text = self.headers[col_idx].clone();
        if let Some((column, direction)) = &self.sort {
            if column == &self.columns[col_idx] {
                text.push_str(match direction {
                    SortDirection::Ascending => " ▲",
                    SortDirection::Descending => " ▼",
                });
            }
        }
        text
    }

    fn column_widths(&self) -> Vec<u16> {
        (0..self.columns.len())
            .map(|col_idx| {
                let header_width = self.header_text(col_idx).chars().count();
                let max_data_width = self
                    .rows
                    .iter()
                    .take(WIDTH_SAMPLE_ROWS)
                    .map(|row| row.get(col_idx).map_or(0, |cell| cell.len()))
                    .max()
                    .unwrap_or(0);
                let mut width = header_width
                    .max(max_data_width)
                    .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
                // make room for the "no matches" message in the first column
                if self.rows.is_empty() && col_idx == 0 {
                    width = width.max(NO_MATCHES.len());
                }
                width as u16
            })
            .collect()
    }
}

impl Component for GridView {
    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_col_left();
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_col_right();
                None
            }
            KeyCode::Char('g') => {
                self.jump_top();
                None
            }
            KeyCode::Char('G') => {
                self.jump_bottom();
                None
            }
            KeyCode::Char('s') | KeyCode::Enter => self.sort_action(),
            KeyCode::Char(' ') => {
                self.toggle_select();
                None
            }
            KeyCode::Char('f') => Some(Action::FocusFilter),
            KeyCode::Char('/') => Some(Action::FocusSearch),
            KeyCode::Char('n') | KeyCode::PageDown => Some(Action::PageNext),
            KeyCode::Char('p') | KeyCode::PageUp => Some(Action::PagePrev),
            KeyCode::Home => Some(Action::PageFirst),
            KeyCode::End => Some(Action::PageLast),
            _ => None,
        }
    }

    fn handle_message(&mut self, _msg: &AppMessage) -> Option<Action> {
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Theme::border_focused()
        } else {
            Theme::border_unfocused()
        };

        if !self.loaded {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Records ")
                .border_style(border_style);
            let empty = Paragraph::new("No data loaded.").block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header_cells: Vec<Cell> = std::iter::once(Cell::from("  #").style(Theme::header()))
            .chain((0..self.columns.len()).map(|col_idx| {
                Cell::from(Text::from(self.header_text(col_idx)))
                    .style(self.header_style(col_idx, focused))
            }))
            .collect();
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = if self.rows.is_empty() {
            let mut cells = vec![Cell::from(""), Cell::from(NO_MATCHES).style(Theme::no_matches())];
            cells.resize_with(self.columns.len() + 1, || Cell::from(""));
            vec![Row::new(cells).height(1)]
        } else {
            self.rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let style = if self.selected.contains(&i) {
                        Theme::row_selected()
                    } else if i % 2 == 0 {
                        Theme::row_normal()
                    } else {
                        Theme::row_alt()
                    };

                    let mut cells = vec![Cell::from(format!("{:>4}", i + 1)).style(style)];
                    for col_idx in 0..self.columns.len() {
                        let text = row.get(col_idx).cloned().unwrap_or_default();
                        cells.push(Cell::from(text).style(style));
                    }
                    Row::new(cells).height(1)
                })
                .collect()
        };

        let mut widths = vec![ratatui::layout::Constraint::Length(ROW_NUMBER_WIDTH)];
        for w in self.column_widths() {
            widths.push(ratatui::layout::Constraint::Length(w + COLUMN_PADDING));
        }

        let title = if self.selected.is_empty() {
            format!(" Records ({} shown) ", self.rows.len())
        } else {
            format!(
                " Records ({} shown, {} selected) ",
                self.rows.len(),
                self.selected.len()
            )
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style);

        let table = Table::new(rows, &widths)
            .header(header)
            .block(block)
            .row_highlight_style(Theme::row_cursor());

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }
}
