//! ESPN API raw wire types — serde shapes for deserializing ESPN responses.
//! These map to our clean domain types via the mapping fns in client.rs.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API) — one event per fight card, one competition per bout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub venue: Option<EspnVenue>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub id: Option<String>,
    pub status: Option<EspnStatus>,
    #[serde(rename = "type")]
    pub bout_type: Option<EspnBoutType>,
    #[serde(rename = "cardSegment")]
    pub card_segment: Option<EspnCardSegment>,
    pub competitors: Option<Vec<EspnCompetitor>>,
    /// Set once the bout finishes: "KO/TKO", "Submission" etc.
    #[serde(rename = "resultDisplay")]
    pub result_display: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnBoutType {
    /// Weight class plus championship flag, e.g. "Lightweight Title Bout".
    pub text: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCardSegment {
    pub description: Option<String>, // "Main Card" | "Prelims" | "Early Prelims"
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
    pub period: Option<u8>, // round number while live
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub name: Option<String>, // "STATUS_SCHEDULED", "STATUS_IN_PROGRESS", "STATUS_FINAL"
    pub completed: Option<bool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    pub order: Option<u8>, // 1 = red corner, 2 = blue corner
    pub winner: Option<bool>,
    pub athlete: Option<EspnAthlete>,
    pub records: Option<Vec<EspnRecord>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnAthlete {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub nickname: Option<String>,
    #[serde(rename = "citizenship")]
    pub citizenship: Option<String>,
    #[serde(rename = "weightClass")]
    pub weight_class: Option<EspnWeightClass>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnWeightClass {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRecord {
    #[serde(rename = "type")]
    pub record_type: Option<String>, // "total" is the one we keep
    pub summary: Option<String>,     // "24-3-0" — ESPN sends records as strings
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnVenue {
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    pub address: Option<EspnAddress>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnAddress {
    pub city: Option<String>,
    pub country: Option<String>,
}

// ---------------------------------------------------------------------------
// Rankings  (core v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RankingsResponse {
    pub rankings: Option<Vec<EspnRanking>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRanking {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>, // division name
    /// Champion slot; separate from the numbered contender list.
    pub leaders: Option<Vec<EspnRank>>,
    pub ranks: Option<Vec<EspnRank>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnRank {
    pub current: Option<u8>,
    pub athlete: Option<EspnAthlete>,
    #[serde(rename = "recordSummary")]
    pub record_summary: Option<String>,
}

// ---------------------------------------------------------------------------
// Athlete profile + fight log  (common v3 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AthleteResponse {
    pub athlete: Option<EspnAthleteFull>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnAthleteFull {
    pub id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub nickname: Option<String>,
    pub citizenship: Option<String>,
    #[serde(rename = "weightClass")]
    pub weight_class: Option<EspnWeightClass>,
    pub stance: Option<EspnStance>,
    pub reach: Option<f32>,           // inches
    #[serde(rename = "displayHeight")]
    pub display_height: Option<String>,
    pub height: Option<f32>,          // inches
    pub records: Option<Vec<EspnRecord>>,
    #[serde(rename = "fightHistory")]
    pub fight_history: Option<Vec<EspnFightHistoryItem>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStance {
    pub text: Option<String>, // "Orthodox" | "Southpaw" | "Switch"
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnFightHistoryItem {
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub date: Option<String>, // ISO 8601
    pub opponent: Option<EspnAthlete>,
    /// "W" | "L" | "D" | "NC"
    #[serde(rename = "gameResult")]
    pub game_result: Option<String>,
    #[serde(rename = "resultDisplay")]
    pub result_display: Option<String>, // "KO/TKO", "Decision (unanimous)"...
    pub round: Option<u8>,
}
