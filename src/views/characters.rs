//! Character card list.

use crate::api_client::Character;
use crate::state::App;
use crate::theme::status_color;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(error) = &app.results.error {
        let paragraph = Paragraph::new(format!("Something went wrong\n\n{}", error))
            .style(Style::default().fg(app.theme.error))
            .block(Block::default().title("Error").borders(Borders::ALL));
        f.render_widget(paragraph, area);
        return;
    }

    if app.results.loading && app.results.characters.is_empty() {
        let paragraph = Paragraph::new("Loading characters…")
            .style(Style::default().fg(app.theme.text_dim))
            .block(Block::default().title("Characters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
        return;
    }

    if app.results.is_empty_result() {
        let paragraph = Paragraph::new(
            "No results\n\nTry changing the filters and searching again (Ctrl+L clears).",
        )
        .style(Style::default().fg(app.theme.text_dim))
        .block(Block::default().title("Characters").borders(Borders::ALL));
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .results
        .characters
        .iter()
        .map(|c| card_item(c, app))
        .collect();

    let title = if app.results.loading {
        "Characters (refreshing…)"
    } else {
        "Characters"
    };
    let highlight = if app.focus == crate::nav::Focus::Results {
        Style::default()
            .bg(app.theme.bg_highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(app.theme.bg_highlight)
    };
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(highlight);

    let mut list_state = ListState::default();
    list_state.select(app.results.selected_index());
    f.render_stateful_widget(list, area, &mut list_state);
}

fn card_item<'a>(character: &'a Character, app: &App) -> ListItem<'a> {
    let badge = Span::styled(
        format!("[{}]", character.status.label()),
        Style::default().fg(status_color(character.status, &app.theme)),
    );
    let header = Line::from(vec![
        Span::styled(
            character.name.clone(),
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        badge,
    ]);

    let origin = character
        .origin
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown");
    let location = character
        .location
        .as_ref()
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown");
    let detail = Line::from(Span::styled(
        format!(
            "{} • {}   Origin: {}   Location: {}",
            character.species,
            character.gender.label(),
            origin,
            location
        ),
        Style::default().fg(app.theme.text_dim),
    ));

    ListItem::new(vec![header, detail])
}
