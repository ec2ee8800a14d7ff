use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use mma_api::{Event, FighterProfile, RankingDivision};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadDashboard,
    RefreshEvents,
    LoadFighter { fighter_id: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    /// Initial load: events and rankings fetched in parallel.
    DashboardLoaded { events: Vec<Event>, rankings: Vec<RankingDivision> },
    /// Periodic refresh: full event list, merged by the app.
    EventsUpdated { events: Vec<Event> },
    FighterLoaded { profile: FighterProfile },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
