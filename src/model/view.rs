use std::ops::Range;

use tracing::debug;

use super::record::{Record, RecordSet};
use super::sort_key::{sort_key, DateFormat};

/// Sort order for the active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The user-controlled parameters driving the current rendered view.
///
/// `page` stays within `[1, total_pages]`, or 0 when `total_pages` is 0
/// (an empty working set).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub page: usize,
    pub total_pages: usize,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub filter_column: Option<String>,
    pub filter_text: String,
    pub search_text: String,
}

/// Grid behavior fixed at construction.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub page_size: usize,
    pub date_format: DateFormat,
    pub unsorted_columns: Vec<String>,
    pub paginate: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            page_size: 25,
            date_format: DateFormat::DayFirst,
            unsorted_columns: vec![],
            paginate: false,
        }
    }
}

/// Keep the records whose `column` value contains `text`, case-insensitively.
/// Empty `text` is the identity. An unknown column matches nothing, because a
/// missing field reads as the empty string.
pub fn apply_filter(data: &RecordSet, indices: Vec<usize>, column: &str, text: &str) -> Vec<usize> {
    if text.is_empty() {
        return indices;
    }
    let needle = text.to_uppercase();
    indices
        .into_iter()
        .filter(|&i| data.records[i].get(column).to_uppercase().contains(&needle))
        .collect()
}

/// Keep the records whose space-joined field values contain `text`,
/// case-insensitively. Empty `text` is the identity.
pub fn apply_search(data: &RecordSet, indices: Vec<usize>, text: &str) -> Vec<usize> {
    if text.is_empty() {
        return indices;
    }
    let needle = text.to_uppercase();
    indices
        .into_iter()
        .filter(|&i| data.records[i].search_text().to_uppercase().contains(&needle))
        .collect()
}

/// Stable-sort ascending by the column's sort key; descending reverses the
/// ascending result. Reversal means ties come out in reversed input order,
/// which is NOT what a flipped comparator would produce. Downstream behavior
/// depends on that tie order, so keep the reversal.
pub fn apply_sort(
    data: &RecordSet,
    mut indices: Vec<usize>,
    column: &str,
    direction: SortDirection,
    date_format: DateFormat,
) -> Vec<usize> {
    indices.sort_by_cached_key(|&i| sort_key(data.records[i].get(column), date_format));
    if direction == SortDirection::Descending {
        indices.reverse();
    }
    indices
}

/// The pagination window over a working set, with the clamped page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub start: usize,
    pub end: usize,
    pub page: usize,
    pub total_pages: usize,
}

/// Clamp `page` into `[1, total_pages]` and window the working set.
/// An empty working set forces `page` to 0 and yields an empty window,
/// which the renderer shows as "no matches".
pub fn apply_pagination(indices: &[usize], page: usize, page_size: usize) -> Pagination {
    let total_pages = indices.len().div_ceil(page_size);
    if total_pages == 0 {
        return Pagination {
            start: 0,
            end: 0,
            page: 0,
            total_pages: 0,
        };
    }
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(indices.len());
    Pagination {
        start,
        end,
        page,
        total_pages,
    }
}

/// Derives the displayed record sequence from the record set and the view
/// state: filter, then global search, then sort, then a pagination window.
///
/// The filtered+searched+sorted working set is cached as record indices and
/// only recomputed when filter, search or sort state changes. Page moves
/// re-window the existing cache.
pub struct ViewPipeline {
    data: RecordSet,
    opts: ViewOptions,
    state: ViewState,
    cache: Vec<usize>,
}

impl ViewPipeline {
    pub fn new(data: RecordSet, opts: ViewOptions) -> Self {
        let opts = ViewOptions {
            page_size: opts.page_size.max(1),
            ..opts
        };
        let state = ViewState {
            page: 1,
            filter_column: data.columns.first().cloned(),
            ..Default::default()
        };
        let mut pipeline = Self {
            data,
            opts,
            state,
            cache: vec![],
        };
        pipeline.recompute();
        pipeline
    }

    pub fn columns(&self) -> &[String] {
        &self.data.columns
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// Size of the working set after filter and search, before pagination.
    pub fn working_len(&self) -> usize {
        self.cache.len()
    }

    /// Records of the current page, in display order.
    pub fn window(&self) -> Vec<&Record> {
        self.cache[self.window_range()]
            .iter()
            .map(|&i| &self.data.records[i])
            .collect()
    }

    /// Window rows as display cells, one cell per column.
    pub fn window_rows(&self) -> Vec<Vec<String>> {
        self.window()
            .iter()
            .map(|record| {
                self.data
                    .columns
                    .iter()
                    .map(|column| record.get(column).to_string())
                    .collect()
            })
            .collect()
    }

    pub fn set_filter_text(&mut self, text: String) {
        if self.state.filter_text == text {
            return;
        }
        self.state.filter_text = text;
        self.recompute();
    }

    /// Changing the filter column clears any active filter text.
    pub fn set_filter_column(&mut self, column: String) {
        if self.state.filter_column.as_deref() == Some(column.as_str()) {
            return;
        }
        self.state.filter_column = Some(column);
        if self.state.filter_text.is_empty() {
            return;
        }
        self.state.filter_text.clear();
        self.recompute();
    }

    pub fn set_search_text(&mut self, text: String) {
        if self.state.search_text == text {
            return;
        }
        self.state.search_text = text;
        self.recompute();
    }

    /// Toggle sorting on `column`: the sorted column flips direction, a new
    /// column starts ascending. Returns false for unsortable columns.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        if self.opts.unsorted_columns.iter().any(|c| c == column) {
            return false;
        }
        match &self.state.sort_column {
            Some(current) if current == column => {
                self.state.sort_direction = self.state.sort_direction.flipped();
            }
            _ => {
                self.state.sort_column = Some(column.to_string());
                self.state.sort_direction = SortDirection::Ascending;
            }
        }
        self.recompute();
        true
    }

    // Page moves re-window the cache; out-of-range targets clamp, so prev on
    // page 1 and next on the last page are no-ops rather than wrap-arounds.

    pub fn first_page(&mut self) {
        self.state.page = 1;
        self.repage();
    }

    pub fn prev_page(&mut self) {
        self.state.page = self.state.page.saturating_sub(1);
        self.repage();
    }

    pub fn next_page(&mut self) {
        self.state.page += 1;
        self.repage();
    }

    pub fn last_page(&mut self) {
        self.state.page = self.state.total_pages;
        self.repage();
    }

    fn window_range(&self) -> Range<usize> {
        if !self.opts.paginate {
            return 0..self.cache.len();
        }
        let window = apply_pagination(&self.cache, self.state.page, self.opts.page_size);
        window.start..window.end
    }

    fn recompute(&mut self) {
        let mut cache: Vec<usize> = (0..self.data.len()).collect();
        if let Some(column) = self.state.filter_column.clone() {
            cache = apply_filter(&self.data, cache, &column, &self.state.filter_text);
        }
        cache = apply_search(&self.data, cache, &self.state.search_text);
        if let Some(column) = self.state.sort_column.clone() {
            cache = apply_sort(
                &self.data,
                cache,
                &column,
                self.state.sort_direction,
                self.opts.date_format,
            );
        }
        self.cache = cache;
        debug!(
            working = self.cache.len(),
            total = self.data.len(),
            "view recomputed"
        );
        self.repage();
    }

    /// Re-derive page/total_pages from the cache. Never touches the cache.
    fn repage(&mut self) {
        if self.opts.paginate {
            let window = apply_pagination(&self.cache, self.state.page, self.opts.page_size);
            self.state.page = window.page;
            self.state.total_pages = window.total_pages;
        } else {
            self.state.total_pages = usize::from(!self.cache.is_empty());
            self.state.page = self.state.total_pages;
        }
    }
}
