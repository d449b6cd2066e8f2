use std::io;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::cli::{Cli, Command, GridOptions};
use crate::components::filter_bar::FilterBar;
use crate::components::grid_view::GridView;
use crate::components::help_popup::HelpPopup;
use crate::components::pager_bar::PagerBar;
use crate::components::search_bar::SearchBar;
use crate::components::status_bar::StatusBar;
use crate::components::Component;
use crate::event::{spawn_event_reader, to_key_event, Action, AppMessage};
use crate::loader::{self, DataSource};
use crate::model::view::{ViewOptions, ViewPipeline};
use crate::ui::layout::{AppLayout, GridLayout};
use crate::ui::Focus;

struct App {
    grid_view: GridView,
    filter_bar: FilterBar,
    search_bar: SearchBar,
    pager_bar: PagerBar,
    status_bar: StatusBar,
    help_popup: HelpPopup,
    pipeline: Option<ViewPipeline>,
    focus: Focus,
    options: GridOptions,
}

impl App {
    fn new(source_label: String, options: GridOptions) -> Self {
        Self {
            grid_view: GridView::new(options.unsorted_columns.clone(), !options.single),
            filter_bar: FilterBar::new(),
            search_bar: SearchBar::new(),
            pager_bar: PagerBar::new(),
            status_bar: StatusBar::new(source_label, options.paginate.enabled()),
            help_popup: HelpPopup::new(),
            pipeline: None,
            focus: Focus::Grid,
            options,
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let layout = AppLayout::new(frame.area());
        let grid = GridLayout::new(
            layout.content,
            self.options.filter,
            self.options.search,
            self.options.paginate,
        );

        if let Some(area) = grid.filter_bar {
            self.filter_bar
                .render(frame, area, self.focus == Focus::FilterBar);
        }
        if let Some(area) = grid.search_bar {
            self.search_bar
                .render(frame, area, self.focus == Focus::SearchBar);
        }
        if let Some(area) = grid.pager_bar {
            self.pager_bar.render(frame, area, false);
        }
        self.grid_view
            .render(frame, grid.table, self.focus == Focus::Grid);
        self.status_bar.render(frame, layout.status_bar, false);

        self.help_popup.render(frame, frame.area(), true);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.help_popup.visible {
            return self.help_popup.handle_key(key);
        }

        match self.focus {
            Focus::FilterBar => return self.filter_bar.handle_key(key),
            Focus::SearchBar => return self.search_bar.handle_key(key),
            Focus::Grid => {}
        }

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => return Some(Action::ToggleHelp),
            _ => {}
        }

        self.grid_view.handle_key(key)
    }

    /// Apply an action. Returns true when the app should quit.
    fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.help_popup.toggle(),
            Action::FocusGrid => self.focus = Focus::Grid,
            Action::FocusFilter => {
                if self.options.filter.enabled() && self.pipeline.is_some() {
                    self.focus = Focus::FilterBar;
                    self.filter_bar.start_editing();
                }
            }
            Action::FocusSearch => {
                if self.options.search.enabled() && self.pipeline.is_some() {
                    self.focus = Focus::SearchBar;
                    self.search_bar.start_editing();
                }
            }
            Action::ToggleSort(column) => {
                if let Some(pipeline) = &mut self.pipeline {
                    if pipeline.toggle_sort(&column) {
                        self.sync_view();
                    }
                }
            }
            Action::FilterColumnChanged(column) => {
                if let Some(pipeline) = &mut self.pipeline {
                    pipeline.set_filter_column(column);
                    self.sync_view();
                }
            }
            Action::FilterTextChanged(text) => {
                if let Some(pipeline) = &mut self.pipeline {
                    pipeline.set_filter_text(text);
                    self.sync_view();
                }
            }
            Action::SearchTextChanged(text) => {
                if let Some(pipeline) = &mut self.pipeline {
                    pipeline.set_search_text(text);
                    self.sync_view();
                }
            }
            Action::PageFirst | Action::PagePrev | Action::PageNext | Action::PageLast => {
                if !self.options.paginate.enabled() {
                    return false;
                }
                if let Some(pipeline) = &mut self.pipeline {
                    match action {
                        Action::PageFirst => pipeline.first_page(),
                        Action::PagePrev => pipeline.prev_page(),
                        Action::PageNext => pipeline.next_page(),
                        Action::PageLast => pipeline.last_page(),
                        _ => unreachable!(),
                    }
                    self.sync_view();
                }
            }
        }
        false
    }

    fn handle_message(&mut self, msg: &AppMessage) {
        self.status_bar.handle_message(msg);

        if let AppMessage::DataReady {
            records,
            source_bytes: _,
        } = msg
        {
            let pipeline = ViewPipeline::new(
                records.clone(),
                ViewOptions {
                    page_size: self.options.page_size.max(1),
                    date_format: self.options.date_format,
                    unsorted_columns: self.options.unsorted_columns.clone(),
                    paginate: self.options.paginate.enabled(),
                },
            );
            self.grid_view.set_columns(pipeline.columns());
            self.filter_bar.set_columns(pipeline.columns());
            self.pipeline = Some(pipeline);
            self.sync_view();
        }
    }

    /// Push the pipeline's current window into the display components.
    fn sync_view(&mut self) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        let rows = pipeline.window_rows();
        let state = pipeline.state();
        let sort = state
            .sort_column
            .clone()
            .map(|column| (column, state.sort_direction));
        let (page, total_pages) = (state.page, state.total_pages);
        let (shown, working) = (rows.len(), pipeline.working_len());

        self.grid_view.set_window(rows, sort);
        self.pager_bar.set_pages(page, total_pages);
        self.status_bar.set_view(shown, working, page, total_pages);
    }
}

// --- Terminal setup ---

pub async fn run(cli: Cli) -> Result<()> {
    let (source, options) = split_command(cli.command);

    if let Some(path) = options.log_file.clone() {
        init_logging(&path)?;
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode().context("failed to enable raw mode")?;
    io::stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, source, options).await;

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

fn split_command(command: Command) -> (DataSource, GridOptions) {
    match command {
        Command::Open { path, options } => (DataSource::File(path), options),
        Command::Fetch {
            url,
            params,
            options,
        } => (DataSource::Url { url, params }, options),
    }
}

fn init_logging(path: &str) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path))?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// --- Event loop ---

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    source: DataSource,
    options: GridOptions,
) -> Result<()> {
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<AppMessage>();

    let mut app = App::new(source.label().to_string(), options);

    spawn_initial_load(msg_tx.clone(), source);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    spawn_event_reader(event_tx);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        tokio::select! {
            Some(event) = event_rx.recv() => {
                let Some(key) = to_key_event(&event) else { continue };
                let Some(action) = app.handle_key(key) else { continue };
                if app.handle_action(action) {
                    return Ok(());
                }
            }
            Some(msg) = msg_rx.recv() => {
                app.handle_message(&msg);
            }
        }
    }
}

// --- Background tasks ---

/// The one and only data load. The loading message is released on every
/// path, success or failure.
fn spawn_initial_load(msg_tx: mpsc::UnboundedSender<AppMessage>, source: DataSource) {
    tokio::spawn(async move {
        let _ = msg_tx.send(AppMessage::LoadingStarted("Loading...".into()));

        match loader::load(&source).await {
            Ok(loaded) => {
                info!(rows = loaded.records.len(), "data ready");
                let _ = msg_tx.send(AppMessage::DataReady {
                    records: loaded.records,
                    source_bytes: loaded.source_bytes,
                });
            }
            Err(e) => {
                error!("load failed: {:#}", e);
                let _ = msg_tx.send(AppMessage::Error(format!("Load error: {:#}", e)));
            }
        }

        let _ = msg_tx.send(AppMessage::LoadingFinished);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::RecordSet;
    use crate::ui::Placement;
    use clap::Parser;
    use crossterm::event::KeyModifiers;
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn options(args: &[&str]) -> GridOptions {
        let mut argv = vec!["gridder", "open", "data.json"];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let Command::Open { options, .. } = cli.command else {
            panic!("expected Open");
        };
        options
    }

    fn loaded_app(args: &[&str]) -> App {
        let mut app = App::new("data.json".into(), options(args));
        let records = RecordSet::from_json(json!([
            {"name": "b", "age": "2"},
            {"name": "a", "age": "1"},
        ]))
        .unwrap();
        app.handle_message(&AppMessage::DataReady {
            records,
            source_bytes: 64,
        });
        app
    }

    #[test]
    fn new_app_default_state() {
        let app = App::new("data.json".into(), options(&[]));
        assert_eq!(app.focus, Focus::Grid);
        assert!(app.pipeline.is_none());
    }

    #[test]
    fn quit_and_help_keys() {
        let mut app = App::new("data.json".into(), options(&[]));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            app.handle_key(key(KeyCode::Char('?'))),
            Some(Action::ToggleHelp)
        );
    }

    #[test]
    fn data_ready_builds_the_pipeline() {
        let app = loaded_app(&[]);
        let pipeline = app.pipeline.as_ref().unwrap();
        assert_eq!(pipeline.columns(), ["name", "age"]);
        assert_eq!(app.status_bar.total_rows, 2);
        assert_eq!(app.status_bar.shown_rows, 2);
    }

    #[test]
    fn sort_action_reorders_the_view() {
        let mut app = loaded_app(&[]);
        app.handle_action(Action::ToggleSort("name".into()));
        let pipeline = app.pipeline.as_ref().unwrap();
        assert_eq!(pipeline.window()[0].get("name"), "a");

        app.handle_action(Action::ToggleSort("name".into()));
        let pipeline = app.pipeline.as_ref().unwrap();
        assert_eq!(pipeline.window()[0].get("name"), "b");
    }

    #[test]
    fn filter_text_narrows_the_view() {
        let mut app = loaded_app(&[]);
        app.handle_action(Action::FilterTextChanged("a".into()));
        assert_eq!(app.status_bar.shown_rows, 1);

        app.handle_action(Action::FilterTextChanged(String::new()));
        assert_eq!(app.status_bar.shown_rows, 2);
    }

    #[test]
    fn focus_filter_requires_the_toolbar() {
        let mut app = loaded_app(&[]);
        app.handle_action(Action::FocusFilter);
        assert_eq!(app.focus, Focus::Grid);

        let mut app = loaded_app(&["--filter", "top"]);
        app.handle_action(Action::FocusFilter);
        assert_eq!(app.focus, Focus::FilterBar);
    }

    #[test]
    fn filter_input_captures_ordinary_keys() {
        let mut app = loaded_app(&["--filter", "top"]);
        app.handle_action(Action::FocusFilter);

        // 'q' types into the filter instead of quitting
        assert_eq!(
            app.handle_key(key(KeyCode::Char('q'))),
            Some(Action::FilterTextChanged("q".into()))
        );
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(Action::FocusGrid));
    }

    #[test]
    fn pager_actions_respect_the_paginate_option() {
        let mut app = loaded_app(&["--paginate", "bottom", "--page-size", "1"]);
        assert_eq!(app.pipeline.as_ref().unwrap().state().total_pages, 2);

        app.handle_action(Action::PageNext);
        assert_eq!(app.pipeline.as_ref().unwrap().state().page, 2);
        assert_eq!(app.status_bar.page, 2);

        // next at the last page is a no-op
        app.handle_action(Action::PageNext);
        assert_eq!(app.pipeline.as_ref().unwrap().state().page, 2);

        // with pagination off the actions are ignored
        let mut app = loaded_app(&["--page-size", "1"]);
        app.handle_action(Action::PageNext);
        assert_eq!(app.pipeline.as_ref().unwrap().state().page, 1);
    }

    #[test]
    fn search_narrows_across_all_fields() {
        let mut app = loaded_app(&["--search", "top"]);
        app.handle_action(Action::SearchTextChanged("2".into()));
        assert_eq!(app.status_bar.shown_rows, 1);
        assert_eq!(
            app.pipeline.as_ref().unwrap().window()[0].get("name"),
            "b"
        );
    }

    #[test]
    fn load_error_reaches_the_status_bar() {
        let mut app = App::new("data.json".into(), options(&[]));
        app.handle_message(&AppMessage::Error("Load error: boom".into()));
        assert_eq!(
            app.status_bar.error_message.as_deref(),
            Some("Load error: boom")
        );
        assert!(app.pipeline.is_none());
    }

    #[test]
    fn split_command_maps_sources() {
        let cli = Cli::parse_from(["gridder", "open", "a.json"]);
        let (source, _) = split_command(cli.command);
        assert!(matches!(source, DataSource::File(ref p) if p == "a.json"));

        let cli = Cli::parse_from(["gridder", "fetch", "http://x/r", "--param", "a=1"]);
        let (source, _) = split_command(cli.command);
        let DataSource::Url { url, params } = source else {
            panic!("expected Url");
        };
        assert_eq!(url, "http://x/r");
        assert_eq!(params, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn placement_gating_matches_options() {
        let opts = options(&["--filter", "top"]);
        assert!(opts.filter.enabled());
        assert_eq!(opts.search, Placement::Off);
    }
}
