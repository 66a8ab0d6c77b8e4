//! Filter bar widget: one box per filter input, focus-aware.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone)]
pub struct FilterField {
    pub label: &'static str,
    pub value: String,
    pub focused: bool,
    pub editing: bool,
}

pub struct FilterBar<'a> {
    pub fields: &'a [FilterField],
    pub text_style: Style,
    pub placeholder_style: Style,
    pub border_style: Style,
    pub border_focus_style: Style,
}

impl<'a> FilterBar<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        if self.fields.is_empty() {
            return;
        }
        let share = 100 / self.fields.len() as u16;
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Percentage(share))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (field, chunk) in self.fields.iter().zip(chunks.iter()) {
            let border = if field.focused {
                self.border_focus_style
            } else {
                self.border_style
            };
            let mut spans = Vec::new();
            if field.value.is_empty() && !field.editing {
                spans.push(Span::styled("any", self.placeholder_style));
            } else {
                spans.push(Span::styled(field.value.clone(), self.text_style));
            }
            if field.editing {
                spans.push(Span::styled("▏", self.border_focus_style));
            }
            let paragraph = Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .title(field.label)
                    .borders(Borders::ALL)
                    .border_style(border),
            );
            f.render_widget(paragraph, *chunk);
        }
    }
}
