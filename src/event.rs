use crossterm::event::{self, Event, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::model::record::RecordSet;

/// What a component wants the app to do in response to input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    ToggleHelp,
    FocusFilter,
    FocusSearch,
    FocusGrid,
    ToggleSort(String),
    FilterColumnChanged(String),
    FilterTextChanged(String),
    SearchTextChanged(String),
    PageFirst,
    PagePrev,
    PageNext,
    PageLast,
}

/// Messages sent from the background loader task back to the UI thread.
#[derive(Debug)]
pub enum AppMessage {
    DataReady {
        records: RecordSet,
        source_bytes: u64,
    },
    LoadingStarted(String),
    LoadingFinished,
    Error(String),
}

pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Event>) {
    tokio::task::spawn_blocking(move || loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break;
                }
            }
        }
    });
}

pub fn to_key_event(ev: &Event) -> Option<KeyEvent> {
    match ev {
        Event::Key(key) => Some(*key),
        _ => None,
    }
}
