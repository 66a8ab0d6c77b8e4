//! Input focus cycling.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Species,
    Status,
    Gender,
    Results,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Name => "Search",
            Focus::Species => "Species",
            Focus::Status => "Status",
            Focus::Gender => "Gender",
            Focus::Results => "Characters",
        }
    }

    pub fn all() -> &'static [Focus] {
        &[
            Focus::Name,
            Focus::Species,
            Focus::Status,
            Focus::Gender,
            Focus::Results,
        ]
    }

    pub fn is_text_input(&self) -> bool {
        matches!(self, Focus::Name | Focus::Species)
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Focus::Status | Focus::Gender)
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Focus {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
