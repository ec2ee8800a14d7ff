use crate::app::{App, MenuItem};
use crate::draft::{DraftPhase, OrderChoice, ParticipantId, TURN_COUNT};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let mut load_fighter: Option<String> = None;

    // While composing a roster search query every printable key belongs to
    // the query, so handle that mode before the normal bindings.
    if guard.state.active_tab == MenuItem::Fighters && guard.state.roster.composing {
        match key_event.code {
            KeyCode::Enter | KeyCode::Esc => guard.state.roster.composing = false,
            KeyCode::Backspace => {
                guard.state.roster.query.pop();
                guard.state.roster.selected = 0;
            }
            Char(c) => {
                guard.state.roster.query.push(c);
                guard.state.roster.selected = 0;
            }
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Events),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Rankings),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Fighters),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Draft),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Events navigation
        (MenuItem::Events, Char('l') | KeyCode::Right, _) => guard.state.events.navigate_event_next(),
        (MenuItem::Events, Char('h') | KeyCode::Left, _) => guard.state.events.navigate_event_prev(),
        (MenuItem::Events, Char('j') | KeyCode::Down, _) => guard.state.events.navigate_bout_down(),
        (MenuItem::Events, Char('k') | KeyCode::Up, _) => guard.state.events.navigate_bout_up(),
        (MenuItem::Events, Char('g'), _) => guard.start_draft_from_selected_event(),
        (MenuItem::Events, Char(corner @ ('r' | 'b')), _) => {
            if let Some(bout) = guard.state.events.selected_bout_ref() {
                let slot = if corner == 'r' { &bout.red } else { &bout.blue };
                if let Some(fighter) = &slot.fighter {
                    load_fighter = Some(fighter.id.clone());
                }
            }
        }

        // Rankings navigation
        (MenuItem::Rankings, Char('l') | KeyCode::Right, _) => {
            guard.state.rankings.cycle_division_next();
        }
        (MenuItem::Rankings, Char('h') | KeyCode::Left, _) => {
            guard.state.rankings.cycle_division_prev();
        }
        (MenuItem::Rankings, Char('j') | KeyCode::Down, _) => {
            guard.state.rankings.navigate_row_down();
        }
        (MenuItem::Rankings, Char('k') | KeyCode::Up, _) => guard.state.rankings.navigate_row_up(),
        (MenuItem::Rankings, KeyCode::Enter, _) => {
            load_fighter = guard.state.rankings.selected_fighter_id();
        }

        // Fighter roster
        (MenuItem::Fighters, Char('/'), _) => {
            guard.state.roster.composing = true;
            guard.state.roster.query.clear();
            guard.state.roster.selected = 0;
        }
        (MenuItem::Fighters, Char('j') | KeyCode::Down, _) => {
            let marks = guard.state.favorites.active_marks().clone();
            guard.state.roster.navigate_down(&marks);
        }
        (MenuItem::Fighters, Char('k') | KeyCode::Up, _) => guard.state.roster.navigate_up(),
        (MenuItem::Fighters, Char('f'), _) => guard.toggle_favorite_selected(),
        (MenuItem::Fighters, Char('i'), _) => guard.toggle_interested_selected(),
        (MenuItem::Fighters, Char('u'), _) => guard.switch_user(),
        (MenuItem::Fighters, Char('v'), _) => guard.state.roster.cycle_filter(),
        (MenuItem::Fighters, KeyCode::Enter, _) => {
            let marks = guard.state.favorites.active_marks().clone();
            load_fighter = guard.state.roster.selected_fighter_id(&marks);
        }

        // Fighter detail
        (MenuItem::FighterDetail, Char('j') | KeyCode::Down, _) => {
            guard.state.fighter_detail.scroll_offset =
                guard.state.fighter_detail.scroll_offset.saturating_add(1);
        }
        (MenuItem::FighterDetail, Char('k') | KeyCode::Up, _) => {
            guard.state.fighter_detail.scroll_offset =
                guard.state.fighter_detail.scroll_offset.saturating_sub(1);
        }
        (MenuItem::FighterDetail, KeyCode::Esc, _) => {
            let back = guard.state.previous_tab;
            guard.update_tab(back);
        }

        // Draft game
        (MenuItem::Draft, Char('z'), _) => guard.draft_record_tiebreak(ParticipantId::One),
        (MenuItem::Draft, Char('x'), _) => guard.draft_record_tiebreak(ParticipantId::Two),
        (MenuItem::Draft, Char('e'), _) => guard.draft_choose_order(OrderChoice::Early),
        (MenuItem::Draft, Char('l'), _) => guard.draft_choose_order(OrderChoice::Late),
        (MenuItem::Draft, Char('j') | KeyCode::Down, _) => {
            let len = match guard.state.draft.draft.as_ref().map(|d| d.phase()) {
                Some(DraftPhase::Drafting { .. }) => guard
                    .state
                    .draft
                    .draft
                    .as_ref()
                    .map(|d| d.remaining().count())
                    .unwrap_or(0),
                Some(DraftPhase::AwaitingTruePredictions) => TURN_COUNT as usize,
                _ => 0,
            };
            guard.state.draft.cursor_down(len);
        }
        (MenuItem::Draft, Char('k') | KeyCode::Up, _) => guard.state.draft.cursor_up(),
        (MenuItem::Draft, Char(corner @ ('r' | 'b')), _) => {
            let predicting = matches!(
                guard.state.draft.draft.as_ref().map(|d| d.phase()),
                Some(DraftPhase::AwaitingTruePredictions)
            );
            if predicting {
                guard.draft_predict_corner(corner == 'r');
            } else {
                guard.draft_pick_corner(corner == 'r');
            }
        }
        (MenuItem::Draft, KeyCode::Enter, _) => guard.draft_complete_predictions(),
        (MenuItem::Draft, Char('s'), _) => guard.save_draft_file(),
        (MenuItem::Draft, Char('o'), _) => guard.load_draft_file(),

        // Global
        (_, Char('F'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    if let Some(fighter_id) = load_fighter {
        guard.update_tab(MenuItem::FighterDetail);
        drop(guard);
        let _ = network_requests
            .send(NetworkRequest::LoadFighter { fighter_id })
            .await;
    }
}
