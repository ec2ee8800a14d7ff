use crate::draft::{CandidateBout, Draft, DraftError, FighterRef, OrderChoice, ParticipantId};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, UserMarks};
use log::warn;
use mma_api::{Event, FighterProfile, RankingDivision};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Events,
    Rankings,
    Fighters,
    FighterDetail,
    Draft,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let mut app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app.load_marks_files();
        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dashboard_loaded(&mut self, events: Vec<Event>, rankings: Vec<RankingDivision>) {
        self.state.last_error = None;
        self.state.events.load(events);
        self.state.rankings.load(rankings);
        self.rebuild_roster();
    }

    pub fn on_events_updated(&mut self, events: Vec<Event>) {
        self.state.events.load(events);
        self.rebuild_roster();
    }

    pub fn on_fighter_loaded(&mut self, profile: FighterProfile) {
        self.state.last_error = None;
        let previous_id = self
            .state
            .fighter_detail
            .profile
            .as_ref()
            .map(|p| p.fighter.id.clone());
        let fighter_changed = previous_id.as_deref() != Some(profile.fighter.id.as_str());

        self.state.fighter_detail.profile = Some(profile);
        if fighter_changed {
            self.state.fighter_detail.scroll_offset = 0;
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    fn rebuild_roster(&mut self) {
        self.state
            .roster
            .rebuild(&self.state.rankings.divisions, &self.state.events.events);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Favorites / interested marks
    // -----------------------------------------------------------------------

    pub fn toggle_favorite_selected(&mut self) {
        if let Some(id) = self
            .state
            .roster
            .selected_fighter_id(self.state.favorites.active_marks())
        {
            self.state.favorites.active_marks_mut().toggle_favorite(&id);
            self.save_active_marks();
        }
    }

    pub fn toggle_interested_selected(&mut self) {
        if let Some(id) = self
            .state
            .roster
            .selected_fighter_id(self.state.favorites.active_marks())
        {
            self.state.favorites.active_marks_mut().toggle_interested(&id);
            self.save_active_marks();
        }
    }

    pub fn switch_user(&mut self) {
        self.state.favorites.switch_user();
        self.state.roster.selected = 0;
    }

    pub fn active_user_name(&self) -> &str {
        self.settings.user_name(self.state.favorites.active_user)
    }

    fn save_active_marks(&mut self) {
        let user = self.state.favorites.active_user;
        let name = self.settings.user_name(user).to_owned();
        let marks = self.state.favorites.active_marks().clone();
        if let Err(e) = save_marks_file(&name, &marks) {
            warn!("could not save marks for {name}: {e}");
        }
    }

    fn load_marks_files(&mut self) {
        for user in [ParticipantId::One, ParticipantId::Two] {
            let name = self.settings.user_name(user).to_owned();
            match load_marks_file(&name) {
                Ok(marks) => *self.state.favorites.marks_mut(user) = marks,
                // First run has no file; anything else is worth a log line.
                Err(e) if !e.contains("read failed") => warn!("marks for {name}: {e}"),
                Err(_) => {}
            }
        }
    }

    // -----------------------------------------------------------------------
    // Draft game
    // -----------------------------------------------------------------------

    /// Start a new draft from the selected event's main card. Declines with
    /// a status message unless the card has exactly five announced bouts.
    pub fn start_draft_from_selected_event(&mut self) {
        let Some(event) = self.state.events.selected_event_ref() else {
            self.state.draft.status = Some("No event selected".to_string());
            return;
        };
        let event_name = event.short_name.clone();

        let mut candidates = Vec::new();
        for bout in event.main_card() {
            let (Some(red), Some(blue)) = (&bout.red.fighter, &bout.blue.fighter) else {
                self.state.draft.status =
                    Some(format!("{event_name}: main card not fully announced yet"));
                return;
            };
            candidates.push(CandidateBout {
                id: bout.id.clone(),
                red: FighterRef { id: red.id.clone(), name: red.name.clone() },
                blue: FighterRef { id: blue.id.clone(), name: blue.name.clone() },
            });
        }

        match Draft::new(candidates) {
            Ok(draft) => {
                self.state.draft.draft = Some(draft);
                self.state.draft.cursor = 0;
                self.state.draft.source_event = Some(event_name);
                self.state.draft.status = None;
                self.update_tab(MenuItem::Draft);
            }
            Err(e) => self.state.draft.status = Some(e.to_string()),
        }
    }

    pub fn draft_record_tiebreak(&mut self, winner: ParticipantId) {
        self.with_draft(|draft| draft.record_tiebreak_winner(winner));
    }

    pub fn draft_choose_order(&mut self, choice: OrderChoice) {
        self.with_draft(|draft| draft.choose_order(choice));
        self.state.draft.cursor = 0;
    }

    /// Pick the red or blue fighter of the bout under the cursor.
    pub fn draft_pick_corner(&mut self, red: bool) {
        let Some(draft) = self.state.draft.draft.as_ref() else {
            return;
        };
        let Some(bout) = draft.remaining().nth(self.state.draft.cursor) else {
            return;
        };
        let (bout_id, fighter_id) = (
            bout.id.clone(),
            if red { bout.red.id.clone() } else { bout.blue.id.clone() },
        );
        self.with_draft(|draft| draft.record_pick(&bout_id, &fighter_id));
        self.state.draft.cursor = 0;
    }

    /// During reconciliation: the cursor indexes turns 1..=5.
    pub fn draft_predict_corner(&mut self, red: bool) {
        let turn = (self.state.draft.cursor + 1) as u8;
        let Some(draft) = self.state.draft.draft.as_ref() else {
            return;
        };
        let Some(pick) = draft.picks().iter().find(|p| p.turn == turn) else {
            return;
        };
        let Some(bout) = draft.candidates().iter().find(|b| b.id == pick.bout_id) else {
            return;
        };
        let fighter_id = if red { bout.red.id.clone() } else { bout.blue.id.clone() };
        self.with_draft(|draft| draft.record_true_prediction(turn, &fighter_id));
    }

    pub fn draft_complete_predictions(&mut self) {
        self.with_draft(|draft| draft.complete_true_predictions());
    }

    /// Run one engine operation, routing any rejection to the status line.
    fn with_draft<F>(&mut self, op: F)
    where
        F: FnOnce(&mut Draft) -> Result<(), DraftError>,
    {
        let Some(draft) = self.state.draft.draft.as_mut() else {
            self.state.draft.status = Some("No draft in progress — press g on an event".into());
            return;
        };
        match op(draft) {
            Ok(()) => self.state.draft.status = None,
            Err(e) => self.state.draft.status = Some(e.to_string()),
        }
    }

    pub fn save_draft_file(&mut self) {
        let Some(draft) = self.state.draft.draft.as_ref() else {
            self.state.draft.status = Some("Nothing to save".to_string());
            return;
        };
        let result = (|| -> Result<PathBuf, String> {
            let path = draft_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
            }
            let payload = serde_json::to_string_pretty(draft)
                .map_err(|e| format!("serialize draft failed: {e}"))?;
            std::fs::write(&path, payload).map_err(|e| format!("write draft failed: {e}"))?;
            Ok(path)
        })();
        self.state.draft.status = Some(match result {
            Ok(path) => format!("Draft saved to {}", path.display()),
            Err(e) => e,
        });
    }

    pub fn load_draft_file(&mut self) {
        match load_draft() {
            Ok(draft) => {
                self.state.draft.draft = Some(draft);
                self.state.draft.cursor = 0;
                self.state.draft.status = Some("Draft loaded".to_string());
            }
            Err(e) => self.state.draft.status = Some(e),
        }
    }
}

fn load_draft() -> Result<Draft, String> {
    let path = draft_path();
    let content =
        std::fs::read_to_string(&path).map_err(|e| format!("read draft failed: {e}"))?;
    serde_json::from_str::<Draft>(&content).map_err(|e| format!("parse draft failed: {e}"))
}

fn save_marks_file(user_name: &str, marks: &UserMarks) -> Result<(), String> {
    let path = marks_path(user_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
    }
    let payload =
        serde_json::to_string_pretty(marks).map_err(|e| format!("serialize marks failed: {e}"))?;
    std::fs::write(&path, payload).map_err(|e| format!("write marks failed: {e}"))
}

fn load_marks_file(user_name: &str) -> Result<UserMarks, String> {
    let path = marks_path(user_name);
    let content = std::fs::read_to_string(&path).map_err(|e| format!("read failed: {e}"))?;
    serde_json::from_str::<UserMarks>(&content).map_err(|e| format!("parse marks failed: {e}"))
}

fn marks_path(user_name: &str) -> PathBuf {
    let slug: String = user_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    config_dir().join(format!("marks_{slug}.json"))
}

fn draft_path() -> PathBuf {
    config_dir().join("draft.json")
}

fn config_dir() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("mmatui");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("mmatui");
    }
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_path_slugs_user_names() {
        let path = marks_path("Player One!");
        let file = path.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(file, "marks_player-one-.json");
    }
}
