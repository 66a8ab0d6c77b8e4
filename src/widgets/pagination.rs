//! Pagination indicator widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct PaginationBar {
    pub page: u32,
    pub pages: u32,
    pub count: u32,
    pub loading: bool,
    pub style: Style,
    pub dim_style: Style,
}

impl PaginationBar {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let summary = if self.loading {
            "Loading…".to_string()
        } else if self.pages == 0 {
            "No pages".to_string()
        } else {
            format!("Page {} / {} • {} characters", self.page, self.pages, self.count)
        };
        let controls_active = !self.loading && self.pages > 1;
        let controls_style = if controls_active { self.style } else { self.dim_style };

        let line = Line::from(vec![
            Span::styled(summary, self.style),
            Span::raw("   "),
            Span::styled("[ prev  ] next", controls_style),
        ]);
        let paragraph = Paragraph::new(line)
            .block(Block::default().title("Pages").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }
}
