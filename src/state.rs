//! Application state.

use crate::api_client::{ApiClient, Character, CharactersPage, PageInfo};
use crate::config::TuiConfig;
use crate::nav::Focus;
use crate::notifications::{Notification, NotificationLevel};
use crate::query::{CharacterGender, CharacterStatus, QueryController, RequestDescriptor};
use crate::theme::Theme;
use std::time::{Duration, Instant};

/// Result set of the most recent completed fetch, plus the transient
/// loading/error flags around it. An empty result set after a completed
/// fetch is the "no results" condition, not an error.
#[derive(Debug, Clone)]
pub struct ResultsState {
    pub characters: Vec<Character>,
    pub info: Option<PageInfo>,
    pub selected: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ResultsState {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            info: None,
            selected: None,
            loading: false,
            error: None,
        }
    }

    pub fn apply_page(&mut self, page: CharactersPage) {
        self.characters = page.results;
        self.info = Some(page.info);
        self.loading = false;
        self.error = None;
        if let Some(id) = &self.selected {
            if !self.characters.iter().any(|c| &c.id == id) {
                self.selected = None;
            }
        }
        if self.selected.is_none() {
            self.selected = self.characters.first().map(|c| c.id.clone());
        }
    }

    pub fn selected_character(&self) -> Option<&Character> {
        let id = self.selected.as_ref()?;
        self.characters.iter().find(|c| &c.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_ref()?;
        self.characters.iter().position(|c| &c.id == id)
    }

    pub fn select_next(&mut self) {
        if self.characters.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected_index() {
            Some(index) => (index + 1) % self.characters.len(),
            None => 0,
        };
        self.selected = Some(self.characters[next].id.clone());
    }

    pub fn select_previous(&mut self) {
        if self.characters.is_empty() {
            self.selected = None;
            return;
        }
        let prev = match self.selected_index() {
            Some(0) | None => self.characters.len() - 1,
            Some(index) => index - 1,
        };
        self.selected = Some(self.characters[prev].id.clone());
    }

    pub fn is_empty_result(&self) -> bool {
        !self.loading && self.error.is_none() && self.info.is_some() && self.characters.is_empty()
    }
}

impl Default for ResultsState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct App {
    pub config: TuiConfig,
    pub theme: Theme,
    pub dark_mode: bool,
    pub api: ApiClient,
    pub query: QueryController,
    pub focus: Focus,
    pub results: ResultsState,
    pub detail_open: bool,
    pub help_open: bool,
    pub notifications: Vec<Notification>,

    generation: u64,
    last_issued: Option<RequestDescriptor>,
    refresh_requested: bool,
}

impl App {
    pub fn new(config: TuiConfig, api: ApiClient) -> Self {
        let dark_mode = config.theme.dark;
        let query = QueryController::new(Duration::from_millis(config.debounce_ms));
        Self {
            theme: Theme::for_mode(dark_mode),
            dark_mode,
            api,
            query,
            focus: Focus::Name,
            results: ResultsState::new(),
            detail_open: false,
            help_open: false,
            notifications: Vec::new(),
            generation: 0,
            last_issued: None,
            refresh_requested: false,
            config,
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    pub fn toggle_theme(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.theme = Theme::for_mode(self.dark_mode);
    }

    /// Timer pump; settles debounce channels. The resulting descriptor
    /// change is picked up by the next `take_fetch_request`.
    pub fn on_tick(&mut self, now: Instant) {
        self.query.poll(now);
    }

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Issue at most one request per distinct descriptor. Returns the
    /// generation and descriptor to fetch when the current descriptor
    /// differs from the last issued one (or a refresh was requested).
    pub fn take_fetch_request(&mut self) -> Option<(u64, RequestDescriptor)> {
        let descriptor = self.query.descriptor();
        if !self.refresh_requested && self.last_issued.as_ref() == Some(&descriptor) {
            return None;
        }
        self.refresh_requested = false;
        self.generation += 1;
        self.last_issued = Some(descriptor.clone());
        self.results.loading = true;
        self.results.error = None;
        Some((self.generation, descriptor))
    }

    /// Apply a completed fetch. Responses from superseded generations are
    /// dropped so a stale result never overwrites newer state.
    pub fn on_page_loaded(&mut self, generation: u64, page: CharactersPage) {
        if generation != self.generation {
            return;
        }
        self.results.apply_page(page);
    }

    /// A failed fetch surfaces one message and leaves the UI interactive.
    /// No automatic retry; the user re-triggers via filter change or
    /// refresh.
    pub fn on_fetch_failed(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        self.results.loading = false;
        self.results.error = Some(message.clone());
        self.notify(NotificationLevel::Error, message);
    }

    pub fn overlay_open(&self) -> bool {
        self.detail_open || self.help_open
    }

    /// True while printable keys should feed the focused text input.
    pub fn editing(&self) -> bool {
        !self.overlay_open() && self.focus.is_text_input()
    }

    pub fn close_overlay(&mut self) -> bool {
        if self.detail_open {
            self.detail_open = false;
            true
        } else if self.help_open {
            self.help_open = false;
            true
        } else {
            false
        }
    }

    pub fn open_details(&mut self) {
        if self.results.selected_character().is_some() {
            self.detail_open = true;
        } else {
            self.notify(NotificationLevel::Warning, "No character selected");
        }
    }

    pub fn insert_char(&mut self, ch: char, now: Instant) {
        match self.focus {
            Focus::Name => self.query.push_name(ch, now),
            Focus::Species => self.query.push_species(ch, now),
            _ => {}
        }
    }

    pub fn delete_char(&mut self, now: Instant) {
        match self.focus {
            Focus::Name => self.query.pop_name(now),
            Focus::Species => self.query.pop_species(now),
            _ => {}
        }
    }

    pub fn cycle_selection(&mut self, forward: bool) {
        match self.focus {
            Focus::Status => {
                let next = cycle_option(CharacterStatus::all(), self.query.status(), forward);
                self.query.set_status(next);
            }
            Focus::Gender => {
                let next = cycle_option(CharacterGender::all(), self.query.gender(), forward);
                self.query.set_gender(next);
            }
            _ => {}
        }
    }

    pub fn next_page(&mut self) {
        let pages = self.results.info.as_ref().map(|i| i.pages).unwrap_or(0);
        if self.results.loading || pages <= 1 {
            return;
        }
        let page = self.query.page();
        if page < pages {
            self.query.set_page(page + 1);
        }
    }

    pub fn prev_page(&mut self) {
        let pages = self.results.info.as_ref().map(|i| i.pages).unwrap_or(0);
        if self.results.loading || pages <= 1 {
            return;
        }
        let page = self.query.page();
        if page > 1 {
            self.query.set_page(page - 1);
        }
    }

    pub fn clear_filters(&mut self) {
        if self.query.clear() {
            self.notify(NotificationLevel::Info, "Filters cleared");
        }
    }
}

/// Cycle through `None` plus every option, in order. `None` means "any".
fn cycle_option<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = options.len() + 1;
    let position = match current {
        None => 0,
        Some(value) => options.iter().position(|o| *o == value).map_or(0, |i| i + 1),
    };
    let next = if forward {
        (position + 1) % len
    } else if position == 0 {
        len - 1
    } else {
        position - 1
    };
    if next == 0 {
        None
    } else {
        Some(options[next - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::NamedPlace;

    fn test_app() -> App {
        let config = TuiConfig::default();
        let api = ApiClient::new(&config).unwrap();
        App::new(config, api)
    }

    fn character(id: &str, name: &str, status: CharacterStatus) -> Character {
        Character {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("https://example.com/{id}.jpeg"),
            status,
            species: "Human".to_string(),
            gender: CharacterGender::Male,
            origin: Some(NamedPlace {
                name: "Earth".to_string(),
            }),
            location: None,
        }
    }

    fn page_of(results: Vec<Character>) -> CharactersPage {
        CharactersPage {
            info: PageInfo {
                count: results.len() as u32,
                pages: 1,
                next: None,
                prev: None,
            },
            results,
        }
    }

    #[test]
    fn first_fetch_request_is_issued_once() {
        let mut app = test_app();
        let (generation, descriptor) = app.take_fetch_request().unwrap();
        assert_eq!(generation, 1);
        assert_eq!(descriptor.page, 0);
        assert_eq!(descriptor.filter, None);
        assert!(app.results.loading);

        // Unchanged descriptor: no overlapping request.
        assert!(app.take_fetch_request().is_none());
    }

    #[test]
    fn refresh_reissues_the_same_descriptor() {
        let mut app = test_app();
        let _ = app.take_fetch_request().unwrap();
        assert!(app.take_fetch_request().is_none());

        app.request_refresh();
        let (generation, descriptor) = app.take_fetch_request().unwrap();
        assert_eq!(generation, 2);
        assert_eq!(descriptor.page, 0);
    }

    #[test]
    fn stale_generation_never_overwrites_newer_state() {
        let mut app = test_app();
        let (old_gen, _) = app.take_fetch_request().unwrap();

        app.query.set_status(Some(CharacterStatus::Dead));
        let (new_gen, _) = app.take_fetch_request().unwrap();
        assert!(new_gen > old_gen);

        // The superseded response arrives late and is dropped.
        app.on_page_loaded(old_gen, page_of(vec![character("1", "Rick", CharacterStatus::Alive)]));
        assert!(app.results.characters.is_empty());
        assert!(app.results.loading);

        app.on_page_loaded(new_gen, page_of(vec![character("8", "Ghost Rick", CharacterStatus::Dead)]));
        assert!(!app.results.loading);
        assert_eq!(app.results.characters.len(), 1);
    }

    #[test]
    fn stale_failure_is_dropped_too() {
        let mut app = test_app();
        let (old_gen, _) = app.take_fetch_request().unwrap();
        app.query.set_page(2);
        let (new_gen, _) = app.take_fetch_request().unwrap();

        app.on_fetch_failed(old_gen, "timed out".to_string());
        assert!(app.results.error.is_none());

        app.on_fetch_failed(new_gen, "timed out".to_string());
        assert_eq!(app.results.error.as_deref(), Some("timed out"));
        assert!(!app.results.loading);
    }

    #[test]
    fn empty_result_set_is_not_an_error() {
        let mut app = test_app();
        let (generation, _) = app.take_fetch_request().unwrap();
        app.on_page_loaded(
            generation,
            CharactersPage {
                info: PageInfo {
                    count: 0,
                    pages: 0,
                    next: None,
                    prev: None,
                },
                results: Vec::new(),
            },
        );
        assert!(app.results.is_empty_result());
        assert!(app.results.error.is_none());
    }

    #[test]
    fn failure_keeps_the_ui_interactive() {
        let mut app = test_app();
        let (generation, _) = app.take_fetch_request().unwrap();
        app.on_fetch_failed(generation, "boom".to_string());

        // A filter change after the failure issues a fresh request.
        app.query.set_status(Some(CharacterStatus::Alive));
        assert!(app.take_fetch_request().is_some());
    }

    #[test]
    fn selection_wraps_and_survives_reload() {
        let mut results = ResultsState::new();
        results.apply_page(page_of(vec![
            character("1", "Rick", CharacterStatus::Alive),
            character("2", "Morty", CharacterStatus::Alive),
        ]));
        assert_eq!(results.selected.as_deref(), Some("1"));

        results.select_next();
        assert_eq!(results.selected.as_deref(), Some("2"));
        results.select_next();
        assert_eq!(results.selected.as_deref(), Some("1"));
        results.select_previous();
        assert_eq!(results.selected.as_deref(), Some("2"));

        // Reload keeps the selection while the id is still present.
        results.apply_page(page_of(vec![
            character("2", "Morty", CharacterStatus::Alive),
            character("3", "Summer", CharacterStatus::Alive),
        ]));
        assert_eq!(results.selected.as_deref(), Some("2"));

        // Gone id falls back to the first entry.
        results.apply_page(page_of(vec![character("9", "Jerry", CharacterStatus::Alive)]));
        assert_eq!(results.selected.as_deref(), Some("9"));
    }

    #[test]
    fn cycle_option_rings_through_any() {
        let all = CharacterStatus::all();
        let mut current = None;
        current = cycle_option(all, current, true);
        assert_eq!(current, Some(CharacterStatus::Alive));
        current = cycle_option(all, current, true);
        assert_eq!(current, Some(CharacterStatus::Dead));
        current = cycle_option(all, current, true);
        assert_eq!(current, Some(CharacterStatus::Unknown));
        current = cycle_option(all, current, true);
        assert_eq!(current, None);

        current = cycle_option(all, current, false);
        assert_eq!(current, Some(CharacterStatus::Unknown));
    }

    #[test]
    fn page_controls_are_inert_while_loading_or_single_page() {
        let mut app = test_app();
        // No info yet: nothing to page through.
        app.next_page();
        assert_eq!(app.query.page(), 1);

        let (generation, _) = app.take_fetch_request().unwrap();
        let mut page = page_of(vec![character("1", "Rick", CharacterStatus::Alive)]);
        page.info.pages = 3;
        app.on_page_loaded(generation, page);

        app.next_page();
        assert_eq!(app.query.page(), 2);
        app.next_page();
        assert_eq!(app.query.page(), 3);
        app.next_page();
        assert_eq!(app.query.page(), 3);
        app.prev_page();
        assert_eq!(app.query.page(), 2);

        app.results.loading = true;
        app.next_page();
        assert_eq!(app.query.page(), 2);
    }

    #[test]
    fn overlays_suspend_editing() {
        let mut app = test_app();
        assert!(app.editing());

        app.help_open = true;
        assert!(!app.editing());
        assert!(app.close_overlay());
        assert!(app.editing());

        app.focus = Focus::Results;
        assert!(!app.editing());
    }
}
