//! View rendering dispatch.

pub mod characters;
pub mod helpers;

pub use helpers::centered_rect;

use crate::nav::Focus;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::widgets::{DetailPanel, FilterBar, FilterField, PaginationBar};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    render_filters(f, app, layout[1]);
    characters::render(f, app, layout[2]);
    render_pagination(f, app, layout[3]);
    render_footer(f, app, layout[4]);

    if app.help_open {
        render_help_modal(f, app);
    } else if app.detail_open {
        render_detail_modal(f, app);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mode = if app.dark_mode { "dark" } else { "light" };
    let title = format!(
        "Rick & Morty — Character Browser | page {} | theme: {}",
        app.query.page(),
        mode
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));
    f.render_widget(block, area);
}

fn render_filters(f: &mut Frame<'_>, app: &App, area: Rect) {
    let select_value = |label: Option<&'static str>| label.unwrap_or("").to_string();
    let fields = [
        FilterField {
            label: Focus::Name.title(),
            value: app.query.name_input().raw().to_string(),
            focused: app.focus == Focus::Name,
            editing: app.editing() && app.focus == Focus::Name,
        },
        FilterField {
            label: Focus::Species.title(),
            value: app.query.species_input().raw().to_string(),
            focused: app.focus == Focus::Species,
            editing: app.editing() && app.focus == Focus::Species,
        },
        FilterField {
            label: Focus::Status.title(),
            value: select_value(app.query.status().map(|s| s.label())),
            focused: app.focus == Focus::Status,
            editing: false,
        },
        FilterField {
            label: Focus::Gender.title(),
            value: select_value(app.query.gender().map(|g| g.label())),
            focused: app.focus == Focus::Gender,
            editing: false,
        },
    ];

    let bar = FilterBar {
        fields: &fields,
        text_style: Style::default().fg(app.theme.text),
        placeholder_style: Style::default().fg(app.theme.text_dim),
        border_style: Style::default().fg(app.theme.border),
        border_focus_style: Style::default().fg(app.theme.border_focus),
    };
    bar.render(f, area);
}

fn render_pagination(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (pages, count) = app
        .results
        .info
        .as_ref()
        .map(|info| (info.pages, info.count))
        .unwrap_or((0, 0));
    let bar = PaginationBar {
        page: app.query.page(),
        pages,
        count,
        loading: app.results.loading,
        style: Style::default().fg(app.theme.text),
        dim_style: Style::default().fg(app.theme.text_dim),
    };
    bar.render(f, area);
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help =
        "Tab focus • type to filter • Space cycle • Enter details • [ ] page • t theme • ? help • q quit";
    let (text, style) = if let Some(note) = app.notifications.last() {
        let label = match note.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
        };
        let color = match note.level {
            NotificationLevel::Info => app.theme.primary,
            NotificationLevel::Warning => app.theme.warning,
            NotificationLevel::Error => app.theme.error,
        };
        (
            format!(
                "{} {}: {}",
                note.created_at.format("%H:%M:%S"),
                label,
                note.message
            ),
            Style::default().fg(color),
        )
    } else {
        (help.to_string(), Style::default().fg(app.theme.text_dim))
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::TOP))
        .style(style);
    f.render_widget(footer, area);
}

fn render_detail_modal(f: &mut Frame<'_>, app: &App) {
    let Some(character) = app.results.selected_character() else {
        return;
    };
    let area = centered_rect(60, 60, f.size());
    f.render_widget(Clear, area);

    let origin = character
        .origin
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    let location = character
        .location
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    let panel = DetailPanel {
        title: &character.name,
        fields: vec![
            ("Status", character.status.label().to_string()),
            ("Species", character.species.clone()),
            ("Gender", character.gender.label().to_string()),
            ("Origin", origin),
            ("Last known location", location),
            ("Image", character.image.clone()),
            ("ID", character.id.clone()),
        ],
        label_style: Style::default().fg(app.theme.secondary),
        value_style: Style::default().fg(app.theme.text),
    };
    panel.render(f, area);
}

fn render_help_modal(f: &mut Frame<'_>, app: &App) {
    let area = centered_rect(50, 60, f.size());
    f.render_widget(Clear, area);

    let panel = DetailPanel {
        title: "Keybindings",
        fields: vec![
            ("Tab / Shift+Tab", "cycle input focus".to_string()),
            ("type / Backspace", "edit the focused text filter".to_string()),
            ("Space or ←/→", "cycle the focused select".to_string()),
            ("↑/↓ or j/k", "move the card selection".to_string()),
            ("Enter", "open character details".to_string()),
            ("[ / ] or PgUp/PgDn", "previous / next page".to_string()),
            ("Ctrl+L", "clear all filters".to_string()),
            ("Ctrl+R", "refresh the current page".to_string()),
            ("t", "toggle dark/light theme".to_string()),
            ("Esc", "close this window".to_string()),
            ("q / Ctrl+C", "quit".to_string()),
        ],
        label_style: Style::default().fg(app.theme.secondary),
        value_style: Style::default().fg(app.theme.text),
    };
    panel.render(f, area);
}
