use ratatui::style::{Color, Modifier, Style};

/// Color palette and style constants for the TUI.
pub struct Theme;

impl Theme {
    // Header row
    pub fn header() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_sorted() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_cursor() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_unsortable() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // Data rows
    pub fn row_normal() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn row_alt() -> Style {
        Style::default().fg(Color::White).bg(Color::Rgb(25, 25, 30))
    }

    pub fn row_cursor() -> Style {
        Style::default().fg(Color::Black).bg(Color::LightCyan)
    }

    pub fn row_selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn no_matches() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC)
    }

    // Borders and panels
    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn border_unfocused() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // Toolbars
    pub fn label() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_active() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn input_inactive() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn pager_button() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn pager_count() -> Style {
        Style::default().fg(Color::White)
    }

    // Status bar
    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn status_loading() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_error() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn status_key_hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // Help popup
    pub fn help_key() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn help_description() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }
}
