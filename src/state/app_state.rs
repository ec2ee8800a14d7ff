use crate::app::MenuItem;
use crate::draft::{Draft, ParticipantId};
use mma_api::{Event, Fighter, FighterProfile, RankingDivision};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ---------------------------------------------------------------------------
// Events state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct EventsState {
    pub events: Vec<Event>,
    pub selected_event: usize,
    pub selected_bout: usize,
}

impl EventsState {
    /// Store a freshly loaded event list, keeping the current selection when
    /// the same card is still present after a refresh.
    pub fn load(&mut self, events: Vec<Event>) {
        let selected_id = self.selected_event_ref().map(|e| e.id.clone());
        self.events = events;
        self.selected_event = selected_id
            .and_then(|id| self.events.iter().position(|e| e.id == id))
            .unwrap_or(0);
        self.selected_bout = self.clamp_bout(self.selected_bout);
    }

    pub fn selected_event_ref(&self) -> Option<&Event> {
        self.events.get(self.selected_event)
    }

    pub fn selected_bout_ref(&self) -> Option<&mma_api::Bout> {
        self.selected_event_ref()?.bouts.get(self.selected_bout)
    }

    pub fn navigate_event_next(&mut self) {
        if self.selected_event + 1 < self.events.len() {
            self.selected_event += 1;
            self.selected_bout = 0;
        }
    }

    pub fn navigate_event_prev(&mut self) {
        if self.selected_event > 0 {
            self.selected_event -= 1;
            self.selected_bout = 0;
        }
    }

    pub fn navigate_bout_down(&mut self) {
        self.selected_bout = self.clamp_bout(self.selected_bout + 1);
    }

    pub fn navigate_bout_up(&mut self) {
        self.selected_bout = self.selected_bout.saturating_sub(1);
    }

    fn clamp_bout(&self, idx: usize) -> usize {
        let max = self
            .selected_event_ref()
            .map(|e| e.bouts.len().saturating_sub(1))
            .unwrap_or(0);
        idx.min(max)
    }
}

// ---------------------------------------------------------------------------
// Rankings state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RankingsState {
    pub divisions: Vec<RankingDivision>,
    pub selected_division: usize,
    pub selected_row: usize,
}

impl RankingsState {
    pub fn load(&mut self, divisions: Vec<RankingDivision>) {
        self.divisions = divisions;
        self.selected_division = 0;
        self.selected_row = 0;
    }

    pub fn selected_division_ref(&self) -> Option<&RankingDivision> {
        self.divisions.get(self.selected_division)
    }

    pub fn cycle_division_next(&mut self) {
        if !self.divisions.is_empty() {
            self.selected_division = (self.selected_division + 1) % self.divisions.len();
            self.selected_row = 0;
        }
    }

    pub fn cycle_division_prev(&mut self) {
        if !self.divisions.is_empty() {
            self.selected_division =
                (self.selected_division + self.divisions.len() - 1) % self.divisions.len();
            self.selected_row = 0;
        }
    }

    pub fn navigate_row_down(&mut self) {
        let max = self
            .selected_division_ref()
            .map(|d| d.entries.len().saturating_sub(1))
            .unwrap_or(0);
        if self.selected_row < max {
            self.selected_row += 1;
        }
    }

    pub fn navigate_row_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn selected_fighter_id(&self) -> Option<String> {
        self.selected_division_ref()?
            .entries
            .get(self.selected_row)
            .map(|e| e.fighter.id.clone())
    }
}

// ---------------------------------------------------------------------------
// Fighter roster — assembled client-side from rankings + event cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub fighter: Fighter,
    /// Division when the fighter is ranked; event participants that are
    /// unranked carry their bout's weight class instead.
    pub division: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RosterFilter {
    #[default]
    All,
    Favorites,
    Interested,
}

impl RosterFilter {
    pub fn label(&self) -> &'static str {
        match self {
            RosterFilter::All => "all",
            RosterFilter::Favorites => "favorites",
            RosterFilter::Interested => "interested",
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            RosterFilter::All => RosterFilter::Favorites,
            RosterFilter::Favorites => RosterFilter::Interested,
            RosterFilter::Interested => RosterFilter::All,
        }
    }
}

#[derive(Debug, Default)]
pub struct RosterState {
    pub entries: Vec<RosterEntry>,
    pub query: String,
    pub composing: bool,
    pub filter: RosterFilter,
    pub selected: usize,
}

impl RosterState {
    pub fn rebuild(&mut self, rankings: &[RankingDivision], events: &[Event]) {
        self.entries = build_roster(rankings, events);
        self.selected = 0;
    }

    /// Entries passing the substring query and the visibility filter.
    pub fn visible<'a>(&'a self, marks: &UserMarks) -> Vec<&'a RosterEntry> {
        let query = self.query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                query.is_empty()
                    || e.fighter.name.to_lowercase().contains(&query)
                    || e.fighter.nickname.to_lowercase().contains(&query)
            })
            .filter(|e| match self.filter {
                RosterFilter::All => true,
                RosterFilter::Favorites => marks.favorites.contains(&e.fighter.id),
                RosterFilter::Interested => marks.interested.contains(&e.fighter.id),
            })
            .collect()
    }

    pub fn selected_fighter_id(&self, marks: &UserMarks) -> Option<String> {
        self.visible(marks)
            .get(self.selected)
            .map(|e| e.fighter.id.clone())
    }

    pub fn navigate_down(&mut self, marks: &UserMarks) {
        let max = self.visible(marks).len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.cycle();
        self.selected = 0;
    }
}

/// Flatten rankings and event cards into one deduplicated fighter list,
/// sorted by name. Ranked entries win the dedupe: they carry the division
/// and a curated record.
pub fn build_roster(rankings: &[RankingDivision], events: &[Event]) -> Vec<RosterEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<RosterEntry> = Vec::new();

    for division in rankings {
        for entry in &division.entries {
            if !entry.fighter.id.is_empty() && seen.insert(entry.fighter.id.clone()) {
                entries.push(RosterEntry {
                    fighter: entry.fighter.clone(),
                    division: division.name.clone(),
                });
            }
        }
    }

    for event in events {
        for bout in &event.bouts {
            for slot in [&bout.red, &bout.blue] {
                if let Some(fighter) = &slot.fighter
                    && !fighter.id.is_empty()
                    && seen.insert(fighter.id.clone())
                {
                    entries.push(RosterEntry {
                        fighter: fighter.clone(),
                        division: bout.weight_class.clone(),
                    });
                }
            }
        }
    }

    entries.sort_by(|a, b| a.fighter.name.cmp(&b.fighter.name));
    entries
}

// ---------------------------------------------------------------------------
// Fighter detail state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FighterDetailState {
    pub profile: Option<FighterProfile>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Favorites — per-user marks, persisted as JSON
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMarks {
    pub favorites: HashSet<String>,
    pub interested: HashSet<String>,
}

impl UserMarks {
    pub fn toggle_favorite(&mut self, fighter_id: &str) {
        toggle(&mut self.favorites, fighter_id);
    }

    pub fn toggle_interested(&mut self, fighter_id: &str) {
        toggle(&mut self.interested, fighter_id);
    }
}

fn toggle(set: &mut HashSet<String>, id: &str) {
    if !set.remove(id) {
        set.insert(id.to_owned());
    }
}

#[derive(Debug, Default)]
pub struct FavoritesState {
    pub active_user: ParticipantId,
    pub marks_one: UserMarks,
    pub marks_two: UserMarks,
}

impl FavoritesState {
    pub fn active_marks(&self) -> &UserMarks {
        match self.active_user {
            ParticipantId::One => &self.marks_one,
            ParticipantId::Two => &self.marks_two,
        }
    }

    pub fn active_marks_mut(&mut self) -> &mut UserMarks {
        match self.active_user {
            ParticipantId::One => &mut self.marks_one,
            ParticipantId::Two => &mut self.marks_two,
        }
    }

    pub fn marks_mut(&mut self, user: ParticipantId) -> &mut UserMarks {
        match user {
            ParticipantId::One => &mut self.marks_one,
            ParticipantId::Two => &mut self.marks_two,
        }
    }

    pub fn switch_user(&mut self) {
        self.active_user = self.active_user.other();
    }
}

// ---------------------------------------------------------------------------
// Draft tab state — UI cursor over the pure engine
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DraftTabState {
    pub draft: Option<Draft>,
    /// Cursor into the remaining-bout list while drafting, or into the five
    /// turns during the true-prediction round.
    pub cursor: usize,
    /// One-line feedback: rejected picks, save/load results.
    pub status: Option<String>,
    pub source_event: Option<String>,
}

impl DraftTabState {
    pub fn cursor_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub events: EventsState,
    pub rankings: RankingsState,
    pub roster: RosterState,
    pub fighter_detail: FighterDetailState,
    pub favorites: FavoritesState,
    pub draft: DraftTabState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mma_api::{Bout, CardSegment, FighterSlot, RankingEntry};

    fn fighter(id: &str, name: &str) -> Fighter {
        Fighter { id: id.into(), name: name.into(), ..Default::default() }
    }

    fn ranked_division(name: &str, fighters: &[(&str, &str)]) -> RankingDivision {
        RankingDivision {
            name: name.into(),
            entries: fighters
                .iter()
                .enumerate()
                .map(|(i, (id, n))| RankingEntry { rank: i as u8, fighter: fighter(id, n) })
                .collect(),
        }
    }

    fn event_with(fighters: &[(&str, &str)]) -> Event {
        let mut it = fighters.iter();
        let mut bouts = Vec::new();
        while let (Some(red), blue) = (it.next(), it.next()) {
            bouts.push(Bout {
                id: format!("b{}", bouts.len()),
                red: FighterSlot { fighter: Some(fighter(red.0, red.1)), placeholder: None },
                blue: FighterSlot {
                    fighter: blue.map(|b| fighter(b.0, b.1)),
                    placeholder: None,
                },
                weight_class: "Lightweight".into(),
                segment: CardSegment::MainCard,
                ..Default::default()
            });
        }
        Event { id: "e1".into(), bouts, ..Default::default() }
    }

    #[test]
    fn roster_dedupes_preferring_ranked_entries() {
        let rankings = vec![ranked_division("Lightweight", &[("f1", "Alpha")])];
        let events = vec![event_with(&[("f1", "Alpha"), ("f2", "Bravo")])];
        let roster = build_roster(&rankings, &events);
        assert_eq!(roster.len(), 2);
        let alpha = roster.iter().find(|e| e.fighter.id == "f1").unwrap();
        assert_eq!(alpha.division, "Lightweight");
    }

    #[test]
    fn roster_sorts_by_name() {
        let events = vec![event_with(&[("f3", "Charlie"), ("f1", "Alpha")])];
        let roster = build_roster(&[], &events);
        let names: Vec<&str> = roster.iter().map(|e| e.fighter.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Charlie"]);
    }

    #[test]
    fn visible_applies_substring_query_case_insensitively() {
        let mut roster = RosterState::default();
        roster.rebuild(&[ranked_division("LW", &[("f1", "Islam Makhachev"), ("f2", "Max Holloway")])], &[]);
        roster.query = "makha".into();
        let marks = UserMarks::default();
        let visible = roster.visible(&marks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].fighter.id, "f1");
    }

    #[test]
    fn favorites_filter_narrows_to_marked_fighters() {
        let mut roster = RosterState::default();
        roster.rebuild(&[ranked_division("LW", &[("f1", "A"), ("f2", "B")])], &[]);
        let mut marks = UserMarks::default();
        marks.toggle_favorite("f2");
        roster.filter = RosterFilter::Favorites;
        let visible = roster.visible(&marks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].fighter.id, "f2");

        // Toggling again clears the mark.
        marks.toggle_favorite("f2");
        assert!(roster.visible(&marks).is_empty());
    }

    #[test]
    fn marks_are_tracked_per_user() {
        let mut favorites = FavoritesState::default();
        favorites.active_marks_mut().toggle_interested("f1");
        favorites.switch_user();
        assert!(!favorites.active_marks().interested.contains("f1"));
        favorites.switch_user();
        assert!(favorites.active_marks().interested.contains("f1"));
    }

    #[test]
    fn event_refresh_preserves_selection_by_id() {
        let mut state = EventsState::default();
        let e1 = Event { id: "e1".into(), ..Default::default() };
        let e2 = Event { id: "e2".into(), ..Default::default() };
        state.load(vec![e1.clone(), e2.clone()]);
        state.navigate_event_next();
        assert_eq!(state.selected_event, 1);

        // e1 dropped off the window; e2 keeps its selection at new index 0.
        state.load(vec![e2, Event { id: "e3".into(), ..Default::default() }]);
        assert_eq!(state.selected_event, 0);
        assert_eq!(state.selected_event_ref().map(|e| e.id.as_str()), Some("e2"));
    }
}
