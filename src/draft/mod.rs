//! The fight-pick draft: two players alternately claim a predicted winner in
//! each of the five main-card bouts, then the player who got "stuck" with the
//! leftover fighter in each bout gives their honest prediction.
//!
//! This module is a pure value-type state machine — no rendering, no I/O.
//! The app serializes the whole `Draft` to JSON to save and resume a game.

mod order;

pub use order::{DraftOrder, OrderChoice, ParticipantId, TURN_COUNT};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimal fighter identity the engine needs; records, countries and the
/// rest stay in the api layer and never affect game logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterRef {
    pub id: String,
    pub name: String,
}

/// One of the five bouts eligible for the draft. Immutable once the draft
/// begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateBout {
    pub id: String,
    pub red: FighterRef,
    pub blue: FighterRef,
}

impl CandidateBout {
    pub fn has_fighter(&self, fighter_id: &str) -> bool {
        self.red.id == fighter_id || self.blue.id == fighter_id
    }

    /// The corner that is not `fighter_id`. Caller guarantees membership.
    fn other_fighter(&self, fighter_id: &str) -> &FighterRef {
        if self.red.id == fighter_id { &self.blue } else { &self.red }
    }

    pub fn fighter(&self, fighter_id: &str) -> Option<&FighterRef> {
        [&self.red, &self.blue].into_iter().find(|f| f.id == fighter_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftPhase {
    AwaitingTiebreak,
    AwaitingOrderChoice,
    Drafting { turn: u8 },
    AwaitingTruePredictions,
    Complete,
}

/// A claimed winner: on `turn`, `picked_by` took `fighter_id` in `bout_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePick {
    pub turn: u8,
    pub bout_id: String,
    pub fighter_id: String,
    pub picked_by: ParticipantId,
}

/// Derived per pick: the player who was not on the clock, left holding the
/// fighter the picker did not want.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StuckAssignment {
    pub turn: u8,
    pub bout_id: String,
    pub participant: ParticipantId,
    pub fighter: FighterRef,
}

/// One row of the final reconciliation: the drafted pick against the stuck
/// player's honest prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub turn: u8,
    pub bout_id: String,
    pub picked_by: ParticipantId,
    pub game_pick: FighterRef,
    pub true_pick: FighterRef,
    pub agreement: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    InvalidCandidateSetSize { got: usize },
    UnknownBout(String),
    BoutAlreadyPicked(String),
    InvalidFighterForBout { bout_id: String, fighter_id: String },
    UnknownTurn(u8),
    NotComplete,
    OutOfPhase { operation: &'static str },
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::InvalidCandidateSetSize { got } => {
                write!(f, "draft needs exactly {TURN_COUNT} bouts, got {got}")
            }
            DraftError::UnknownBout(id) => write!(f, "bout {id} is not in this draft"),
            DraftError::BoutAlreadyPicked(id) => write!(f, "bout {id} was already picked"),
            DraftError::InvalidFighterForBout { bout_id, fighter_id } => {
                write!(f, "fighter {fighter_id} is not in bout {bout_id}")
            }
            DraftError::UnknownTurn(turn) => write!(f, "no such turn: {turn}"),
            DraftError::NotComplete => write!(f, "draft is not complete yet"),
            DraftError::OutOfPhase { operation } => {
                write!(f, "{operation} is not valid in the current phase")
            }
        }
    }
}

/// The whole game state for one playthrough. Every mutation goes through the
/// operations below; failed operations never partially apply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    candidates: Vec<CandidateBout>,
    remaining: Vec<String>,
    tiebreak_winner: Option<ParticipantId>,
    order: Option<DraftOrder>,
    picks: Vec<GamePick>,
    /// turn → fighter id, only the predictions entered explicitly.
    true_predictions: BTreeMap<u8, String>,
    phase: DraftPhase,
}

impl Draft {
    /// Start a new playthrough from the five candidate bouts.
    pub fn new(bouts: Vec<CandidateBout>) -> Result<Self, DraftError> {
        if bouts.len() != usize::from(TURN_COUNT) {
            return Err(DraftError::InvalidCandidateSetSize { got: bouts.len() });
        }
        let remaining = bouts.iter().map(|b| b.id.clone()).collect();
        Ok(Self {
            candidates: bouts,
            remaining,
            tiebreak_winner: None,
            order: None,
            picks: Vec::new(),
            true_predictions: BTreeMap::new(),
            phase: DraftPhase::AwaitingTiebreak,
        })
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn candidates(&self) -> &[CandidateBout] {
        &self.candidates
    }

    pub fn remaining(&self) -> impl Iterator<Item = &CandidateBout> {
        self.candidates.iter().filter(|b| self.remaining.contains(&b.id))
    }

    pub fn picks(&self) -> &[GamePick] {
        &self.picks
    }

    pub fn order(&self) -> Option<&DraftOrder> {
        self.order.as_ref()
    }

    pub fn tiebreak_winner(&self) -> Option<ParticipantId> {
        self.tiebreak_winner
    }

    pub fn true_prediction(&self, turn: u8) -> Option<&str> {
        self.true_predictions.get(&turn).map(String::as_str)
    }

    /// The participant currently picking, while drafting.
    pub fn on_the_clock(&self) -> Option<ParticipantId> {
        match (self.phase, self.order.as_ref()) {
            (DraftPhase::Drafting { turn }, Some(order)) => Some(order.on_the_clock(turn)),
            _ => None,
        }
    }

    /// Record who won the coin flip. The flip itself happens outside the
    /// engine — someone calls it at the table.
    pub fn record_tiebreak_winner(&mut self, winner: ParticipantId) -> Result<(), DraftError> {
        if self.phase != DraftPhase::AwaitingTiebreak {
            return Err(DraftError::OutOfPhase { operation: "record_tiebreak_winner" });
        }
        self.tiebreak_winner = Some(winner);
        self.phase = DraftPhase::AwaitingOrderChoice;
        Ok(())
    }

    /// The tiebreak winner commits to early or late turns; drafting begins.
    pub fn choose_order(&mut self, choice: OrderChoice) -> Result<(), DraftError> {
        let DraftPhase::AwaitingOrderChoice = self.phase else {
            return Err(DraftError::OutOfPhase { operation: "choose_order" });
        };
        let winner = self
            .tiebreak_winner
            .expect("tiebreak winner is recorded before the order choice phase");
        self.order = Some(DraftOrder::resolve(winner, choice));
        self.phase = DraftPhase::Drafting { turn: 1 };
        Ok(())
    }

    /// The player on the clock claims `fighter_id` as the winner of
    /// `bout_id`, removing that bout from the pool and advancing the turn.
    pub fn record_pick(&mut self, bout_id: &str, fighter_id: &str) -> Result<(), DraftError> {
        let DraftPhase::Drafting { turn } = self.phase else {
            return Err(DraftError::OutOfPhase { operation: "record_pick" });
        };

        let bout = self
            .candidates
            .iter()
            .find(|b| b.id == bout_id)
            .ok_or_else(|| DraftError::UnknownBout(bout_id.to_owned()))?;
        if !bout.has_fighter(fighter_id) {
            return Err(DraftError::InvalidFighterForBout {
                bout_id: bout_id.to_owned(),
                fighter_id: fighter_id.to_owned(),
            });
        }
        let pool_idx = self
            .remaining
            .iter()
            .position(|id| id == bout_id)
            .ok_or_else(|| DraftError::BoutAlreadyPicked(bout_id.to_owned()))?;

        // All validation passed; now mutate.
        let order = self.order.expect("order is resolved before drafting starts");
        self.remaining.remove(pool_idx);
        self.picks.push(GamePick {
            turn,
            bout_id: bout_id.to_owned(),
            fighter_id: fighter_id.to_owned(),
            picked_by: order.on_the_clock(turn),
        });

        if turn < TURN_COUNT {
            self.phase = DraftPhase::Drafting { turn: turn + 1 };
        } else {
            // Five picks over five bouts must drain the pool; anything else
            // is a bookkeeping defect, not a user mistake.
            assert!(
                self.remaining.is_empty(),
                "pool not empty after final turn: {:?}",
                self.remaining
            );
            self.phase = DraftPhase::AwaitingTruePredictions;
        }
        Ok(())
    }

    /// For each pick so far: who got stuck, and with which fighter.
    pub fn stuck_assignments(&self) -> Result<Vec<StuckAssignment>, DraftError> {
        let Some(order) = self.order else {
            return Ok(Vec::new());
        };
        self.picks
            .iter()
            .map(|pick| {
                let bout = self
                    .candidates
                    .iter()
                    .find(|b| b.id == pick.bout_id)
                    .ok_or_else(|| DraftError::UnknownBout(pick.bout_id.clone()))?;
                Ok(StuckAssignment {
                    turn: pick.turn,
                    bout_id: pick.bout_id.clone(),
                    participant: order.on_the_clock(pick.turn).other(),
                    fighter: bout.other_fighter(&pick.fighter_id).clone(),
                })
            })
            .collect()
    }

    /// The stuck player states who they honestly think wins the bout picked
    /// on `turn`. May agree with the original pick or back the stuck fighter.
    pub fn record_true_prediction(&mut self, turn: u8, fighter_id: &str) -> Result<(), DraftError> {
        if self.phase != DraftPhase::AwaitingTruePredictions {
            return Err(DraftError::OutOfPhase { operation: "record_true_prediction" });
        }
        let pick = self
            .picks
            .iter()
            .find(|p| p.turn == turn)
            .ok_or(DraftError::UnknownTurn(turn))?;
        let bout = self
            .candidates
            .iter()
            .find(|b| b.id == pick.bout_id)
            .ok_or_else(|| DraftError::UnknownBout(pick.bout_id.clone()))?;
        if !bout.has_fighter(fighter_id) {
            return Err(DraftError::InvalidFighterForBout {
                bout_id: bout.id.clone(),
                fighter_id: fighter_id.to_owned(),
            });
        }
        self.true_predictions.insert(turn, fighter_id.to_owned());
        Ok(())
    }

    /// Close the reconciliation round. Turns without an explicit true
    /// prediction default to agreeing with the drafted pick.
    pub fn complete_true_predictions(&mut self) -> Result<(), DraftError> {
        if self.phase != DraftPhase::AwaitingTruePredictions {
            return Err(DraftError::OutOfPhase { operation: "complete_true_predictions" });
        }
        for pick in &self.picks {
            self.true_predictions
                .entry(pick.turn)
                .or_insert_with(|| pick.fighter_id.clone());
        }
        self.phase = DraftPhase::Complete;
        Ok(())
    }

    /// The final pairing of drafted picks against honest predictions.
    pub fn summary(&self) -> Result<Vec<SummaryRow>, DraftError> {
        if self.phase != DraftPhase::Complete {
            return Err(DraftError::NotComplete);
        }
        self.picks
            .iter()
            .map(|pick| {
                let bout = self
                    .candidates
                    .iter()
                    .find(|b| b.id == pick.bout_id)
                    .ok_or_else(|| DraftError::UnknownBout(pick.bout_id.clone()))?;
                let game_pick = bout
                    .fighter(&pick.fighter_id)
                    .ok_or_else(|| DraftError::InvalidFighterForBout {
                        bout_id: bout.id.clone(),
                        fighter_id: pick.fighter_id.clone(),
                    })?
                    .clone();
                let true_id = self
                    .true_predictions
                    .get(&pick.turn)
                    .expect("complete_true_predictions fills every turn");
                let true_pick = bout
                    .fighter(true_id)
                    .ok_or_else(|| DraftError::InvalidFighterForBout {
                        bout_id: bout.id.clone(),
                        fighter_id: true_id.clone(),
                    })?
                    .clone();
                Ok(SummaryRow {
                    turn: pick.turn,
                    bout_id: pick.bout_id.clone(),
                    picked_by: pick.picked_by,
                    agreement: game_pick.id == true_pick.id,
                    game_pick,
                    true_pick,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParticipantId::{One, Two};

    fn fighter(id: &str) -> FighterRef {
        FighterRef { id: id.into(), name: id.to_uppercase() }
    }

    fn five_bouts() -> Vec<CandidateBout> {
        (1..=5)
            .map(|n| CandidateBout {
                id: format!("bout{n}"),
                red: fighter(&format!("red{n}")),
                blue: fighter(&format!("blue{n}")),
            })
            .collect()
    }

    fn drafting(winner: ParticipantId, choice: OrderChoice) -> Draft {
        let mut draft = Draft::new(five_bouts()).unwrap();
        draft.record_tiebreak_winner(winner).unwrap();
        draft.choose_order(choice).unwrap();
        draft
    }

    fn pick_all_red(draft: &mut Draft) {
        for n in 1..=5 {
            draft.record_pick(&format!("bout{n}"), &format!("red{n}")).unwrap();
        }
    }

    #[test]
    fn rejects_candidate_sets_that_are_not_five() {
        let four = five_bouts().into_iter().take(4).collect();
        assert_eq!(
            Draft::new(four).unwrap_err(),
            DraftError::InvalidCandidateSetSize { got: 4 }
        );
        let six: Vec<_> = five_bouts()
            .into_iter()
            .chain(std::iter::once(CandidateBout {
                id: "bout6".into(),
                red: fighter("red6"),
                blue: fighter("blue6"),
            }))
            .collect();
        assert!(matches!(
            Draft::new(six),
            Err(DraftError::InvalidCandidateSetSize { got: 6 })
        ));
    }

    #[test]
    fn concrete_scenario_winner_one_early() {
        let mut draft = drafting(One, OrderChoice::Early);
        assert_eq!(draft.order().unwrap().slots(), &[One, Two, One, Two, Two]);
        assert_eq!(draft.on_the_clock(), Some(One));

        draft.record_pick("bout1", "red1").unwrap();
        let pick = &draft.picks()[0];
        assert_eq!((pick.turn, pick.picked_by), (1, One));
        assert_eq!(pick.fighter_id, "red1");

        let stuck = draft.stuck_assignments().unwrap();
        assert_eq!(stuck.len(), 1);
        assert_eq!(stuck[0].participant, Two);
        assert_eq!(stuck[0].fighter.id, "blue1");
    }

    #[test]
    fn five_picks_partition_the_candidate_set() {
        let mut draft = drafting(Two, OrderChoice::Late);
        // Picks in scrambled bout order still work; order only fixes turns.
        for (bout, corner) in [(3, "blue"), (1, "red"), (5, "red"), (2, "blue"), (4, "red")] {
            draft.record_pick(&format!("bout{bout}"), &format!("{corner}{bout}")).unwrap();
        }
        assert_eq!(draft.phase(), DraftPhase::AwaitingTruePredictions);

        let mut picked: Vec<&str> = draft.picks().iter().map(|p| p.bout_id.as_str()).collect();
        picked.sort_unstable();
        assert_eq!(picked, vec!["bout1", "bout2", "bout3", "bout4", "bout5"]);
        assert_eq!(draft.remaining().count(), 0);
        let turns: Vec<u8> = draft.picks().iter().map(|p| p.turn).collect();
        assert_eq!(turns, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stuck_fighter_is_always_the_unchosen_corner() {
        let mut draft = drafting(One, OrderChoice::Early);
        pick_all_red(&mut draft);
        for (stuck, pick) in draft.stuck_assignments().unwrap().iter().zip(draft.picks()) {
            let bout = draft
                .candidates()
                .iter()
                .find(|b| b.id == pick.bout_id)
                .unwrap();
            assert!(bout.has_fighter(&stuck.fighter.id));
            assert_ne!(stuck.fighter.id, pick.fighter_id);
            assert_eq!(stuck.participant, pick.picked_by.other());
        }
    }

    #[test]
    fn completing_with_no_explicit_predictions_defaults_to_agreement() {
        let mut draft = drafting(One, OrderChoice::Early);
        pick_all_red(&mut draft);
        draft.complete_true_predictions().unwrap();
        let summary = draft.summary().unwrap();
        assert_eq!(summary.len(), 5);
        for row in &summary {
            assert!(row.agreement);
            assert_eq!(row.game_pick, row.true_pick);
        }
    }

    #[test]
    fn explicit_disagreement_shows_in_the_summary() {
        let mut draft = drafting(One, OrderChoice::Early);
        pick_all_red(&mut draft);
        draft.record_true_prediction(2, "blue2").unwrap();
        draft.complete_true_predictions().unwrap();
        let summary = draft.summary().unwrap();
        let row = summary.iter().find(|r| r.turn == 2).unwrap();
        assert!(!row.agreement);
        assert_eq!(row.true_pick.id, "blue2");
        assert!(summary.iter().filter(|r| r.agreement).count() == 4);
    }

    #[test]
    fn malformed_pick_leaves_state_untouched() {
        let mut draft = drafting(One, OrderChoice::Early);
        let err = draft.record_pick("bout1", "blue2").unwrap_err();
        assert_eq!(
            err,
            DraftError::InvalidFighterForBout {
                bout_id: "bout1".into(),
                fighter_id: "blue2".into()
            }
        );
        assert_eq!(draft.phase(), DraftPhase::Drafting { turn: 1 });
        assert_eq!(draft.remaining().count(), 5);
        assert!(draft.picks().is_empty());

        assert_eq!(
            draft.record_pick("nope", "red1").unwrap_err(),
            DraftError::UnknownBout("nope".into())
        );

        draft.record_pick("bout1", "red1").unwrap();
        assert_eq!(
            draft.record_pick("bout1", "blue1").unwrap_err(),
            DraftError::BoutAlreadyPicked("bout1".into())
        );
        assert_eq!(draft.phase(), DraftPhase::Drafting { turn: 2 });
    }

    #[test]
    fn operations_out_of_phase_are_rejected() {
        let mut draft = Draft::new(five_bouts()).unwrap();
        assert!(matches!(
            draft.record_pick("bout1", "red1"),
            Err(DraftError::OutOfPhase { .. })
        ));
        assert!(matches!(draft.choose_order(OrderChoice::Early), Err(DraftError::OutOfPhase { .. })));
        assert_eq!(draft.summary().unwrap_err(), DraftError::NotComplete);

        draft.record_tiebreak_winner(One).unwrap();
        assert!(matches!(
            draft.record_tiebreak_winner(Two),
            Err(DraftError::OutOfPhase { .. })
        ));
        draft.choose_order(OrderChoice::Early).unwrap();
        assert!(matches!(
            draft.record_true_prediction(1, "red1"),
            Err(DraftError::OutOfPhase { .. })
        ));
        assert_eq!(draft.summary().unwrap_err(), DraftError::NotComplete);
    }

    #[test]
    fn true_prediction_validates_turn_and_fighter() {
        let mut draft = drafting(One, OrderChoice::Early);
        pick_all_red(&mut draft);
        assert_eq!(draft.record_true_prediction(9, "red1").unwrap_err(), DraftError::UnknownTurn(9));
        assert!(matches!(
            draft.record_true_prediction(1, "blue3"),
            Err(DraftError::InvalidFighterForBout { .. })
        ));
        draft.record_true_prediction(1, "blue1").unwrap();
        assert_eq!(draft.true_prediction(1), Some("blue1"));
    }

    #[test]
    fn draft_saves_and_resumes_mid_game() {
        let mut draft = drafting(Two, OrderChoice::Early);
        draft.record_pick("bout2", "blue2").unwrap();

        let saved = serde_json::to_string(&draft).unwrap();
        let mut resumed: Draft = serde_json::from_str(&saved).unwrap();
        assert_eq!(resumed.phase(), DraftPhase::Drafting { turn: 2 });
        assert_eq!(resumed.on_the_clock(), Some(One));

        for n in [1, 3, 4, 5] {
            resumed.record_pick(&format!("bout{n}"), &format!("red{n}")).unwrap();
        }
        resumed.complete_true_predictions().unwrap();
        assert_eq!(resumed.summary().unwrap().len(), 5);
    }
}
