use serde::{Deserialize, Serialize};
use std::fmt;

/// Every draft runs exactly five turns, one per main-card bout.
pub const TURN_COUNT: u8 = 5;

/// One of the two players. Display names live in settings; the engine only
/// ever deals in this opaque identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticipantId {
    #[default]
    One,
    Two,
}

impl ParticipantId {
    pub fn other(self) -> Self {
        match self {
            ParticipantId::One => ParticipantId::Two,
            ParticipantId::Two => ParticipantId::One,
        }
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticipantId::One => write!(f, "player one"),
            ParticipantId::Two => write!(f, "player two"),
        }
    }
}

/// The tiebreak winner's draft-order preference: pick first with two picks
/// (turns 1 and 3), or pick later but take three (turns 2, 4 and 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderChoice {
    Early,
    Late,
}

impl OrderChoice {
    pub fn label(&self) -> &'static str {
        match self {
            OrderChoice::Early => "early (turns 1 & 3)",
            OrderChoice::Late => "late (turns 2, 4 & 5)",
        }
    }
}

/// Deterministic assignment of the five turns to the two participants.
/// Generated from (winner, choice); the two choices produce complementary
/// sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrder {
    slots: [ParticipantId; TURN_COUNT as usize],
}

impl DraftOrder {
    pub fn resolve(winner: ParticipantId, choice: OrderChoice) -> Self {
        let early_turn = |i: usize| i == 0 || i == 2; // turns 1 and 3
        let slots = std::array::from_fn(|i| {
            let winner_here = match choice {
                OrderChoice::Early => early_turn(i),
                OrderChoice::Late => !early_turn(i),
            };
            if winner_here { winner } else { winner.other() }
        });
        Self { slots }
    }

    /// The participant picking on `turn` (1-based).
    ///
    /// Panics on turn 0 or > 5; callers hold the Drafting-phase invariant.
    pub fn on_the_clock(&self, turn: u8) -> ParticipantId {
        self.slots[usize::from(turn - 1)]
    }

    pub fn slots(&self) -> &[ParticipantId; TURN_COUNT as usize] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ParticipantId::{One, Two};

    #[test]
    fn early_choice_gives_winner_turns_one_and_three() {
        let order = DraftOrder::resolve(One, OrderChoice::Early);
        assert_eq!(order.slots(), &[One, Two, One, Two, Two]);
    }

    #[test]
    fn late_choice_gives_winner_turns_two_four_five() {
        let order = DraftOrder::resolve(One, OrderChoice::Late);
        assert_eq!(order.slots(), &[Two, One, Two, One, One]);
    }

    #[test]
    fn orders_are_complementary_for_any_winner() {
        for winner in [One, Two] {
            let early = DraftOrder::resolve(winner, OrderChoice::Early);
            let late = DraftOrder::resolve(winner, OrderChoice::Late);
            for turn in 1..=TURN_COUNT {
                let (a, b) = (early.on_the_clock(turn), late.on_the_clock(turn));
                assert_ne!(a, b, "turn {turn} must flip between the two choices");
                assert!(a == winner || b == winner, "winner holds turn {turn} in exactly one order");
            }
        }
    }

    #[test]
    fn resolving_for_player_two_mirrors_player_one() {
        let order = DraftOrder::resolve(Two, OrderChoice::Early);
        assert_eq!(order.slots(), &[Two, One, Two, One, One]);
    }
}
