//! Query parameter controller.
//!
//! Turns raw, rapidly-changing filter input into a stable, minimal request
//! descriptor. Text channels (name, species) settle through a per-channel
//! debounce deadline; discrete selections (status, gender) apply
//! immediately. Pagination resets to page 1 whenever the derived filter
//! changes by value, and only then.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CharacterStatus {
    pub fn all() -> &'static [CharacterStatus] {
        &[
            CharacterStatus::Alive,
            CharacterStatus::Dead,
            CharacterStatus::Unknown,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharacterStatus::Alive => "Alive",
            CharacterStatus::Dead => "Dead",
            CharacterStatus::Unknown => "unknown",
        }
    }

    /// Parse a selection key coming from a UI control. Unrecognized keys
    /// degrade to `None` ("no filter value set") instead of propagating an
    /// invalid filter.
    pub fn from_ui_key(key: &str) -> Option<CharacterStatus> {
        Self::all().iter().copied().find(|s| s.label() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterGender {
    Female,
    Male,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

impl CharacterGender {
    pub fn all() -> &'static [CharacterGender] {
        &[
            CharacterGender::Female,
            CharacterGender::Male,
            CharacterGender::Genderless,
            CharacterGender::Unknown,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharacterGender::Female => "Female",
            CharacterGender::Male => "Male",
            CharacterGender::Genderless => "Genderless",
            CharacterGender::Unknown => "unknown",
        }
    }

    pub fn from_ui_key(key: &str) -> Option<CharacterGender> {
        Self::all().iter().copied().find(|g| g.label() == key)
    }
}

/// Normalized query intent. A field is present iff its source input is
/// non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CharacterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<CharacterGender>,
}

/// What actually goes on the wire. `page` is zero-based; `filter` is
/// omitted entirely (not sent as an empty object) when no field is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestDescriptor {
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<CharacterFilter>,
}

/// Derive the filter object from settled inputs. Pure; the controller
/// compares the result by value against the previous derivation, so an
/// equal-by-value recomputation never counts as a change.
pub fn derive_filter(
    name: &str,
    status: Option<CharacterStatus>,
    gender: Option<CharacterGender>,
    species: &str,
) -> Option<CharacterFilter> {
    let filter = CharacterFilter {
        name: non_empty(name),
        status,
        species: non_empty(species),
        gender,
    };
    if filter.name.is_none()
        && filter.status.is_none()
        && filter.species.is_none()
        && filter.gender.is_none()
    {
        None
    } else {
        Some(filter)
    }
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// One debounce channel: a raw value plus a settled value that catches up
/// once the deadline elapses with no further change. The deadline is a
/// cancellable timer handle, not a task; overwriting or dropping it is the
/// cancellation.
#[derive(Debug, Clone)]
pub struct DebouncedInput {
    raw: String,
    settled: String,
    deadline: Option<Instant>,
    delay: Duration,
}

impl DebouncedInput {
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            settled: String::new(),
            deadline: None,
            delay,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn settled(&self) -> &str {
        &self.settled
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Replace the raw value, re-arming the deadline. Each change cancels
    /// the prior pending deadline (debounce, not throttle).
    pub fn set(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        if value != self.raw {
            self.raw = value;
            self.deadline = Some(now + self.delay);
        }
    }

    pub fn push(&mut self, ch: char, now: Instant) {
        self.raw.push(ch);
        self.deadline = Some(now + self.delay);
    }

    pub fn pop(&mut self, now: Instant) {
        if self.raw.pop().is_some() {
            self.deadline = Some(now + self.delay);
        }
    }

    /// Settle the channel if its deadline has elapsed. Returns whether the
    /// settled value actually changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                if self.settled != self.raw {
                    self.settled = self.raw.clone();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Clear both values and cancel any pending deadline.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.settled.clear();
        self.deadline = None;
    }
}

/// Owns the raw input state, the two debounce channels, and the derived
/// filter + page pair that together form the request descriptor.
#[derive(Debug, Clone)]
pub struct QueryController {
    name: DebouncedInput,
    species: DebouncedInput,
    status: Option<CharacterStatus>,
    gender: Option<CharacterGender>,
    page: u32,
    filter: Option<CharacterFilter>,
}

impl QueryController {
    pub fn new(debounce: Duration) -> Self {
        Self {
            name: DebouncedInput::new(debounce),
            species: DebouncedInput::new(debounce),
            status: None,
            gender: None,
            page: 1,
            filter: None,
        }
    }

    pub fn name_input(&self) -> &DebouncedInput {
        &self.name
    }

    pub fn species_input(&self) -> &DebouncedInput {
        &self.species
    }

    pub fn status(&self) -> Option<CharacterStatus> {
        self.status
    }

    pub fn gender(&self) -> Option<CharacterGender> {
        self.gender
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> Option<&CharacterFilter> {
        self.filter.as_ref()
    }

    pub fn has_any_input(&self) -> bool {
        !self.name.raw().is_empty()
            || !self.species.raw().is_empty()
            || self.status.is_some()
            || self.gender.is_some()
    }

    pub fn set_name(&mut self, value: impl Into<String>, now: Instant) {
        self.name.set(value, now);
    }

    pub fn push_name(&mut self, ch: char, now: Instant) {
        self.name.push(ch, now);
    }

    pub fn pop_name(&mut self, now: Instant) {
        self.name.pop(now);
    }

    pub fn set_species(&mut self, value: impl Into<String>, now: Instant) {
        self.species.set(value, now);
    }

    pub fn push_species(&mut self, ch: char, now: Instant) {
        self.species.push(ch, now);
    }

    pub fn pop_species(&mut self, now: Instant) {
        self.species.pop(now);
    }

    /// Discrete selection: applies immediately, no debounce.
    pub fn set_status(&mut self, status: Option<CharacterStatus>) -> bool {
        self.status = status;
        self.resync()
    }

    pub fn set_gender(&mut self, gender: Option<CharacterGender>) -> bool {
        self.gender = gender;
        self.resync()
    }

    /// Clamp to page >= 1. Changing page never alters filter fields.
    pub fn set_page(&mut self, page: u32) -> bool {
        let clamped = page.max(1);
        if clamped != self.page {
            self.page = clamped;
            true
        } else {
            false
        }
    }

    /// Timer pump, driven by the event-loop tick. Settles elapsed debounce
    /// channels and re-derives the filter. Returns whether the descriptor
    /// changed. The page reset fires here, on settled values only.
    pub fn poll(&mut self, now: Instant) -> bool {
        let name_settled = self.name.poll(now);
        let species_settled = self.species.poll(now);
        if name_settled || species_settled {
            self.resync()
        } else {
            false
        }
    }

    /// Reset all inputs and page, synchronously. Pending debounce
    /// deadlines are cancelled, never left to fire after the clear.
    pub fn clear(&mut self) -> bool {
        let changed = self.filter.is_some() || self.page != 1;
        self.name.reset();
        self.species.reset();
        self.status = None;
        self.gender = None;
        self.page = 1;
        self.filter = None;
        changed
    }

    pub fn descriptor(&self) -> RequestDescriptor {
        RequestDescriptor {
            // The upstream API is zero-based; page is kept >= 1 so this
            // never underflows, and saturating_sub guards the impossible.
            page: self.page.saturating_sub(1),
            filter: self.filter.clone(),
        }
    }

    fn resync(&mut self) -> bool {
        let next = derive_filter(
            self.name.settled(),
            self.status,
            self.gender,
            self.species.settled(),
        );
        if next != self.filter {
            self.filter = next;
            self.page = 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(350);

    fn controller() -> QueryController {
        QueryController::new(DEBOUNCE)
    }

    fn ms(base: Instant, offset: u64) -> Instant {
        base + Duration::from_millis(offset)
    }

    #[test]
    fn rapid_keystrokes_collapse_to_one_settled_update() {
        let t0 = Instant::now();
        let mut query = controller();

        // "Rick" typed with 100ms between keystrokes, no pause long
        // enough for the deadline to elapse.
        for (i, ch) in "Rick".chars().enumerate() {
            query.push_name(ch, ms(t0, 100 * i as u64));
            assert!(!query.poll(ms(t0, 100 * i as u64)));
        }

        // Mid-window polls settle nothing.
        assert!(!query.poll(ms(t0, 500)));
        assert_eq!(query.name_input().settled(), "");

        // One settled update after the last keystroke's delay.
        assert!(query.poll(ms(t0, 650)));
        assert_eq!(query.name_input().settled(), "Rick");
        assert_eq!(
            query.descriptor(),
            RequestDescriptor {
                page: 0,
                filter: Some(CharacterFilter {
                    name: Some("Rick".to_string()),
                    status: None,
                    species: None,
                    gender: None,
                }),
            }
        );

        // No further emission without further change.
        assert!(!query.poll(ms(t0, 2_000)));
    }

    #[test]
    fn derived_filter_omits_blank_fields() {
        assert_eq!(derive_filter("", None, None, ""), None);
        assert_eq!(derive_filter("   ", None, None, "\t"), None);

        let filter = derive_filter(" Rick ", None, None, "").unwrap();
        assert_eq!(filter.name.as_deref(), Some("Rick"));
        assert_eq!(filter.species, None);

        let filter =
            derive_filter("", Some(CharacterStatus::Alive), None, " Human ").unwrap();
        assert_eq!(filter.name, None);
        assert_eq!(filter.status, Some(CharacterStatus::Alive));
        assert_eq!(filter.species.as_deref(), Some("Human"));
    }

    #[test]
    fn status_change_on_later_page_resets_to_page_one() {
        let mut query = controller();
        query.set_page(3);
        assert_eq!(query.descriptor().page, 2);

        assert!(query.set_status(Some(CharacterStatus::Dead)));
        let descriptor = query.descriptor();
        assert_eq!(descriptor.page, 0);
        assert_eq!(
            descriptor.filter.unwrap().status,
            Some(CharacterStatus::Dead)
        );
    }

    #[test]
    fn page_change_never_touches_filter() {
        let mut query = controller();
        query.set_status(Some(CharacterStatus::Alive));
        let before = query.filter().cloned();

        query.set_page(7);
        assert_eq!(query.filter().cloned(), before);
        assert_eq!(query.descriptor().page, 6);
    }

    #[test]
    fn page_reset_waits_for_settled_value_not_keystrokes() {
        let t0 = Instant::now();
        let mut query = controller();
        query.set_page(5);

        query.push_name('R', ms(t0, 0));
        // Raw keystroke alone must not reset the page.
        assert_eq!(query.page(), 5);

        assert!(query.poll(ms(t0, 400)));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn settling_to_equal_filter_does_not_reset_page() {
        let t0 = Instant::now();
        let mut query = controller();

        query.push_name('R', ms(t0, 0));
        assert!(query.poll(ms(t0, 400)));
        query.set_page(4);

        // Append then delete within one window: raw returns to the
        // settled value, so the deadline fires without a change.
        query.push_name('x', ms(t0, 500));
        query.pop_name(ms(t0, 600));
        assert!(!query.poll(ms(t0, 1_000)));
        assert_eq!(query.page(), 4);
    }

    #[test]
    fn trailing_whitespace_settle_is_not_a_filter_change() {
        let t0 = Instant::now();
        let mut query = controller();

        query.set_name("Rick", ms(t0, 0));
        assert!(query.poll(ms(t0, 400)));
        query.set_page(2);

        query.set_name("Rick ", ms(t0, 500));
        // The settled raw value changed but the trimmed filter did not.
        assert!(!query.poll(ms(t0, 900)));
        assert_eq!(query.page(), 2);
    }

    #[test]
    fn clear_cancels_pending_deadline() {
        let t0 = Instant::now();
        let mut query = controller();

        query.set_status(Some(CharacterStatus::Alive));
        query.push_species('H', ms(t0, 0));
        assert!(query.species_input().pending());

        assert!(query.clear());
        assert!(!query.species_input().pending());
        assert_eq!(
            query.descriptor(),
            RequestDescriptor {
                page: 0,
                filter: None,
            }
        );

        // The cancelled deadline must never fire later.
        assert!(!query.poll(ms(t0, 2_000)));
    }

    #[test]
    fn wire_page_never_underflows() {
        let mut query = controller();
        assert_eq!(query.descriptor().page, 0);

        query.set_page(0);
        assert_eq!(query.page(), 1);
        assert_eq!(query.descriptor().page, 0);

        query.set_page(10);
        assert_eq!(query.descriptor().page, 9);
    }

    #[test]
    fn independent_channels_do_not_cancel_each_other() {
        let t0 = Instant::now();
        let mut query = controller();

        query.push_name('R', ms(t0, 0));
        query.push_species('H', ms(t0, 300));

        // Name settles at 350 even though species re-armed at 300.
        assert!(query.poll(ms(t0, 360)));
        let filter = query.filter().unwrap();
        assert_eq!(filter.name.as_deref(), Some("R"));
        assert_eq!(filter.species, None);

        assert!(query.poll(ms(t0, 700)));
        let filter = query.filter().unwrap();
        assert_eq!(filter.species.as_deref(), Some("H"));
    }

    #[test]
    fn unrecognized_selection_key_degrades_to_none() {
        assert_eq!(CharacterStatus::from_ui_key("Alive"), Some(CharacterStatus::Alive));
        assert_eq!(CharacterStatus::from_ui_key("Ghost"), None);
        assert_eq!(
            CharacterGender::from_ui_key("Genderless"),
            Some(CharacterGender::Genderless)
        );
        assert_eq!(CharacterGender::from_ui_key(""), None);
    }

    #[test]
    fn clear_on_pristine_controller_reports_no_change() {
        let mut query = controller();
        assert!(!query.clear());

        query.set_page(3);
        assert!(query.clear());
        assert!(!query.clear());
    }
}
