pub mod client;
pub mod espn;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// A single fight card (e.g. "UFC 311: Makhachev vs. Tsarukyan").
#[derive(Debug, Clone, Default)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub date: Option<DateTime<Utc>>,
    pub venue: Option<String>,
    pub bouts: Vec<Bout>,
}

impl Event {
    /// Find a bout by ID anywhere on the card.
    pub fn find_bout(&self, bout_id: &str) -> Option<&Bout> {
        self.bouts.iter().find(|b| b.id == bout_id)
    }

    /// Main-card bouts in card order. This is the candidate pool the
    /// fight-pick draft game is built from.
    pub fn main_card(&self) -> Vec<&Bout> {
        self.bouts
            .iter()
            .filter(|b| b.segment == CardSegment::MainCard)
            .collect()
    }

    /// Merge refreshed bouts (from a scoreboard poll) into this card.
    pub fn merge_updates(&mut self, updates: Vec<Bout>) {
        for update in updates {
            if let Some(bout) = self.bouts.iter_mut().find(|b| b.id == update.id) {
                *bout = update;
            }
        }
    }
}

/// One scheduled fight between two fighters.
#[derive(Debug, Clone, Default)]
pub struct Bout {
    pub id: String,
    pub red: FighterSlot,  // red corner (listed first by the promotion)
    pub blue: FighterSlot, // blue corner
    pub weight_class: String,
    pub segment: CardSegment,
    pub status: BoutStatus,
    pub winner_id: Option<String>,
    pub is_title: bool,
    /// "KO/TKO", "Submission (rear-naked choke)" etc. — Final bouts only.
    pub method: Option<String>,
    pub round: Option<u8>,
}

impl Bout {
    pub fn is_live(&self) -> bool {
        self.status == BoutStatus::InProgress
    }

    pub fn winner(&self) -> Option<&Fighter> {
        let winner_id = self.winner_id.as_deref()?;
        [&self.red, &self.blue]
            .into_iter()
            .filter_map(|slot| slot.fighter.as_ref())
            .find(|f| f.id == winner_id)
    }
}

/// A corner of a bout. The fighter is `None` when the promotion has not yet
/// announced the matchup ("opponent TBA").
#[derive(Debug, Clone, Default)]
pub struct FighterSlot {
    pub fighter: Option<Fighter>,
    pub placeholder: Option<String>, // "TBA", "Winner of ..." etc.
}

/// Fighter summary as carried on cards and rankings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fighter {
    pub id: String,
    pub name: String,     // "Islam Makhachev"
    pub nickname: String, // may be empty
    pub country: String,  // may be empty
    pub record: FightRecord,
}

/// Professional win/loss/draw tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FightRecord {
    pub wins: u16,
    pub losses: u16,
    pub draws: u16,
}

impl FightRecord {
    pub fn total(&self) -> u16 {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f32::from(self.wins) / f32::from(total)
    }

    /// Display-only annotation: a fighter who wins at least three out of
    /// four fights over a meaningful sample reads as a crowd favorite.
    /// Never consulted by any game or ranking logic.
    pub fn is_crowd_favorite(&self) -> bool {
        self.total() >= 5 && self.win_rate() >= 0.75
    }

    /// "24-3-0" display form.
    pub fn summary(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.draws)
    }

    /// Parse ESPN's "W-L-D" summary string. Missing draws default to 0.
    pub fn parse(summary: &str) -> Option<Self> {
        let mut parts = summary.split('-').map(|p| p.trim().parse::<u16>());
        let wins = parts.next()?.ok()?;
        let losses = parts.next()?.ok()?;
        let draws = parts.next().map(|d| d.ok()).unwrap_or(Some(0))?;
        Some(Self { wins, losses, draws })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardSegment {
    #[default]
    MainCard,
    Prelims,
    EarlyPrelims,
}

impl CardSegment {
    pub fn label(&self) -> &'static str {
        match self {
            CardSegment::MainCard => "Main Card",
            CardSegment::Prelims => "Prelims",
            CardSegment::EarlyPrelims => "Early Prelims",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoutStatus {
    #[default]
    Scheduled,
    InProgress,
    Final,
    Cancelled,
}

// ---------------------------------------------------------------------------
// Rankings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RankingDivision {
    pub name: String, // "Lightweight", "Women's Flyweight", ...
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct RankingEntry {
    /// 0 marks the champion; 1..=15 are the ranked contenders.
    pub rank: u8,
    pub fighter: Fighter,
}

impl RankingEntry {
    pub fn is_champion(&self) -> bool {
        self.rank == 0
    }
}

// ---------------------------------------------------------------------------
// Fighter profile (fetched on demand)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct FighterProfile {
    pub fighter: Fighter,
    pub division: String,
    pub stance: Option<String>,
    pub reach_in: Option<f32>,
    pub height_in: Option<f32>,
    pub history: Vec<FightHistoryEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct FightHistoryEntry {
    pub event_name: String,
    pub date: Option<DateTime<Utc>>,
    pub opponent: String,
    pub result: FightResult,
    pub method: String,
    pub round: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FightResult {
    Win,
    Loss,
    Draw,
    #[default]
    NoContest,
}

impl FightResult {
    pub fn label(&self) -> &'static str {
        match self {
            FightResult::Win => "W",
            FightResult::Loss => "L",
            FightResult::Draw => "D",
            FightResult::NoContest => "NC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bout(id: &str, segment: CardSegment) -> Bout {
        Bout { id: id.into(), segment, ..Default::default() }
    }

    #[test]
    fn main_card_filters_and_preserves_card_order() {
        let event = Event {
            bouts: vec![
                bout("1", CardSegment::MainCard),
                bout("2", CardSegment::Prelims),
                bout("3", CardSegment::MainCard),
                bout("4", CardSegment::EarlyPrelims),
            ],
            ..Default::default()
        };
        let main: Vec<&str> = event.main_card().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(main, vec!["1", "3"]);
    }

    #[test]
    fn merge_updates_replaces_matching_bouts_only() {
        let mut event = Event {
            bouts: vec![bout("1", CardSegment::MainCard), bout("2", CardSegment::MainCard)],
            ..Default::default()
        };
        let mut update = bout("2", CardSegment::MainCard);
        update.status = BoutStatus::Final;
        event.merge_updates(vec![update, bout("99", CardSegment::MainCard)]);
        assert_eq!(event.bouts.len(), 2);
        assert_eq!(event.bouts[1].status, BoutStatus::Final);
        assert_eq!(event.bouts[0].status, BoutStatus::Scheduled);
    }

    #[test]
    fn record_parse_round_trips_summary() {
        let rec = FightRecord::parse("24-3-1").unwrap();
        assert_eq!(rec, FightRecord { wins: 24, losses: 3, draws: 1 });
        assert_eq!(rec.summary(), "24-3-1");
    }

    #[test]
    fn record_parse_defaults_missing_draws_to_zero() {
        let rec = FightRecord::parse("10-2").unwrap();
        assert_eq!(rec.draws, 0);
        assert!(FightRecord::parse("ten-two").is_none());
    }

    #[test]
    fn crowd_favorite_needs_sample_size_and_win_rate() {
        let green = FightRecord { wins: 3, losses: 1, draws: 0 };
        assert!(!green.is_crowd_favorite(), "under 5 fights is never a favorite");

        let journeyman = FightRecord { wins: 10, losses: 10, draws: 0 };
        assert!(!journeyman.is_crowd_favorite());

        let contender = FightRecord { wins: 9, losses: 2, draws: 0 };
        assert!(contender.is_crowd_favorite());
    }

    #[test]
    fn winner_resolves_by_id_not_position() {
        let red = Fighter { id: "a".into(), name: "A".into(), ..Default::default() };
        let blue = Fighter { id: "b".into(), name: "B".into(), ..Default::default() };
        let bout = Bout {
            red: FighterSlot { fighter: Some(red), placeholder: None },
            blue: FighterSlot { fighter: Some(blue), placeholder: None },
            winner_id: Some("b".into()),
            ..Default::default()
        };
        assert_eq!(bout.winner().map(|f| f.id.as_str()), Some("b"));
    }
}
