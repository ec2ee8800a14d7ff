use crate::espn::{
    AthleteResponse, EspnAthlete, EspnCompetition, EspnCompetitor, EspnEvent, EspnRank,
    EspnRanking, RankingsResponse, ScoreboardResponse,
};
use crate::{
    Bout, BoutStatus, CardSegment, Event, FightHistoryEntry, FightRecord, FightResult, Fighter,
    FighterProfile, FighterSlot, RankingDivision, RankingEntry,
};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/mma/ufc";
const ESPN_WEB_V2: &str = "https://site.web.api.espn.com/apis/v2/sports/mma/ufc";
const ESPN_COMMON_V3: &str = "https://site.web.api.espn.com/apis/common/v3/sports/mma/ufc";
/// Scoreboard window: cards from the past week through the next two months.
const SCOREBOARD_SPAN_DAYS: (i64, i64) = (-7, 62);

/// MMA API client backed by ESPN's public UFC endpoints.
#[derive(Debug, Clone)]
pub struct MmaApi {
    client: Client,
    timeout: Duration,
}

impl Default for MmaApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("mmatui/0.1 (terminal fight tracker)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl MmaApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch recent and upcoming fight cards, soonest first.
    ///
    /// `MMATUI_EVENTS_JSON` overrides the network entirely with a local
    /// ESPN-format scoreboard snapshot (offline use, demos, tests).
    pub async fn fetch_events(&self) -> ApiResult<Vec<Event>> {
        if let Ok(path) = std::env::var("MMATUI_EVENTS_JSON")
            && !path.trim().is_empty()
        {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| ApiError::NotFound(format!("could not read {path}: {e}")))?;
            let raw: ScoreboardResponse = serde_json::from_str(&content)
                .map_err(|e| ApiError::NotFound(format!("invalid scoreboard json at {path}: {e}")))?;
            return Ok(map_scoreboard(raw));
        }

        let (from, to) = scoreboard_window(Utc::now());
        let url = format!("{ESPN_SITE_V2}/scoreboard?dates={from}-{to}&limit=50");
        let raw: ScoreboardResponse = self.get(&url).await?;
        let events = map_scoreboard(raw);
        if events.is_empty() {
            return Err(ApiError::NotFound("no fight cards in the scoreboard window".into()));
        }
        Ok(events)
    }

    /// Fetch the current divisional rankings (champion + top contenders).
    pub async fn fetch_rankings(&self) -> ApiResult<Vec<RankingDivision>> {
        let url = format!("{ESPN_WEB_V2}/rankings");
        let raw: RankingsResponse = self.get(&url).await?;
        Ok(raw
            .rankings
            .unwrap_or_default()
            .iter()
            .map(map_ranking)
            .filter(|d| !d.entries.is_empty())
            .collect())
    }

    /// Fetch a fighter profile with fight history.
    pub async fn fetch_fighter(&self, fighter_id: &str) -> ApiResult<FighterProfile> {
        let url = format!("{ESPN_COMMON_V3}/athletes/{fighter_id}");
        let raw: AthleteResponse = self.get(&url).await?;
        let athlete = raw
            .athlete
            .ok_or_else(|| ApiError::NotFound(format!("no athlete data for {fighter_id}")))?;
        Ok(map_profile(fighter_id, athlete))
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: ESPN wire types → clean domain types
// ---------------------------------------------------------------------------

/// ESPN date range format: YYYYMMDD-YYYYMMDD.
fn scoreboard_window(now: DateTime<Utc>) -> (String, String) {
    let from = now + chrono::Duration::days(SCOREBOARD_SPAN_DAYS.0);
    let to = now + chrono::Duration::days(SCOREBOARD_SPAN_DAYS.1);
    (from.format("%Y%m%d").to_string(), to.format("%Y%m%d").to_string())
}

fn map_scoreboard(raw: ScoreboardResponse) -> Vec<Event> {
    let mut events: Vec<Event> = raw
        .events
        .unwrap_or_default()
        .iter()
        .map(map_event)
        .filter(|e| !e.bouts.is_empty())
        .collect();
    // Soonest first; undated cards sink to the end.
    events.sort_by_key(|e| e.date.map(|d| d.timestamp()).unwrap_or(i64::MAX));
    events
}

fn map_event(event: &EspnEvent) -> Event {
    let date = event
        .date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|dt| dt.with_timezone(&Utc));

    let venue = event.venue.as_ref().and_then(|v| {
        match (&v.full_name, v.address.as_ref().and_then(|a| a.city.clone())) {
            (Some(name), Some(city)) => Some(format!("{name}, {city}")),
            (Some(name), None) => Some(name.clone()),
            (None, Some(city)) => Some(city),
            _ => None,
        }
    });

    let bouts = event
        .competitions
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(map_bout)
        .collect();

    Event {
        id: event.id.clone().unwrap_or_default(),
        name: event.name.clone().unwrap_or_else(|| "UFC Fight Night".into()),
        short_name: event
            .short_name
            .clone()
            .or_else(|| event.name.clone())
            .unwrap_or_default(),
        date,
        venue,
        bouts,
    }
}

fn map_bout(comp: &EspnCompetition) -> Bout {
    let competitors = comp.competitors.as_deref().unwrap_or_default();
    let (red, blue) = split_corners(competitors);

    let winner_id = competitors
        .iter()
        .find(|c| c.winner == Some(true))
        .and_then(|c| c.id.clone().or_else(|| c.athlete.as_ref().and_then(|a| a.id.clone())));

    let status = comp
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.name.as_deref())
        .map(parse_status)
        .unwrap_or_default();

    let type_text = comp
        .bout_type
        .as_ref()
        .and_then(|t| t.text.clone())
        .unwrap_or_default();

    Bout {
        id: comp.id.clone().unwrap_or_default(),
        red,
        blue,
        weight_class: weight_class_of(&type_text),
        segment: parse_segment(
            comp.card_segment
                .as_ref()
                .and_then(|s| s.description.as_deref())
                .unwrap_or_default(),
        ),
        status,
        winner_id,
        is_title: type_text.to_lowercase().contains("title"),
        method: comp.result_display.clone().filter(|m| !m.is_empty()),
        round: comp.status.as_ref().and_then(|s| s.period),
    }
}

fn split_corners(competitors: &[EspnCompetitor]) -> (FighterSlot, FighterSlot) {
    // order 1 is the red corner; fall back to listing order.
    let red = competitors
        .iter()
        .find(|c| c.order == Some(1))
        .or_else(|| competitors.first());
    let blue = competitors
        .iter()
        .find(|c| c.order == Some(2))
        .or_else(|| competitors.get(1));
    (
        red.map(map_competitor).unwrap_or_else(tba_slot),
        blue.map(map_competitor).unwrap_or_else(tba_slot),
    )
}

fn tba_slot() -> FighterSlot {
    FighterSlot { fighter: None, placeholder: Some("TBA".into()) }
}

fn map_competitor(c: &EspnCompetitor) -> FighterSlot {
    let record = c
        .records
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|r| r.record_type.as_deref() == Some("total"))
        .or_else(|| c.records.as_deref().unwrap_or_default().first())
        .and_then(|r| r.summary.as_deref())
        .and_then(FightRecord::parse)
        .unwrap_or_default();

    let fighter = c.athlete.as_ref().map(|a| map_fighter(a, record));
    let placeholder = if fighter.is_none() { Some("TBA".into()) } else { None };
    FighterSlot { fighter, placeholder }
}

fn map_fighter(a: &EspnAthlete, record: FightRecord) -> Fighter {
    Fighter {
        id: a.id.clone().unwrap_or_default(),
        name: a.display_name.clone().unwrap_or_default(),
        nickname: a.nickname.clone().unwrap_or_default(),
        country: a.citizenship.clone().unwrap_or_default(),
        record,
    }
}

fn parse_status(s: &str) -> BoutStatus {
    match s {
        "STATUS_IN_PROGRESS" | "STATUS_END_OF_ROUND" => BoutStatus::InProgress,
        "STATUS_FINAL" | "STATUS_FULL_TIME" => BoutStatus::Final,
        "STATUS_POSTPONED" | "STATUS_CANCELED" | "STATUS_CANCELLED" => BoutStatus::Cancelled,
        _ => BoutStatus::Scheduled,
    }
}

fn parse_segment(description: &str) -> CardSegment {
    match description.to_lowercase().as_str() {
        "prelims" | "prelims 1" | "prelims 2" => CardSegment::Prelims,
        "early prelims" => CardSegment::EarlyPrelims,
        _ => CardSegment::MainCard,
    }
}

/// "Lightweight Title Bout" → "Lightweight"; "Women's Bantamweight Bout" →
/// "Women's Bantamweight".
fn weight_class_of(type_text: &str) -> String {
    type_text
        .trim_end_matches(" Bout")
        .trim_end_matches(" Title")
        .trim()
        .to_string()
}

fn map_ranking(r: &EspnRanking) -> RankingDivision {
    let mut entries: Vec<RankingEntry> = Vec::new();

    // Champion first (rank 0), then the numbered contenders.
    for leader in r.leaders.as_deref().unwrap_or_default() {
        if let Some(entry) = map_rank_entry(leader, 0) {
            entries.push(entry);
        }
    }
    for rank in r.ranks.as_deref().unwrap_or_default() {
        if let Some(entry) = map_rank_entry(rank, rank.current.unwrap_or(0)) {
            entries.push(entry);
        }
    }

    RankingDivision {
        name: r.display_name.clone().unwrap_or_else(|| "Division".into()),
        entries,
    }
}

fn map_rank_entry(rank: &EspnRank, position: u8) -> Option<RankingEntry> {
    let athlete = rank.athlete.as_ref()?;
    let record = rank
        .record_summary
        .as_deref()
        .and_then(FightRecord::parse)
        .unwrap_or_default();
    Some(RankingEntry { rank: position, fighter: map_fighter(athlete, record) })
}

fn map_profile(fighter_id: &str, athlete: crate::espn::EspnAthleteFull) -> FighterProfile {
    let record = athlete
        .records
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|r| r.record_type.as_deref() == Some("total"))
        .or_else(|| athlete.records.as_deref().unwrap_or_default().first())
        .and_then(|r| r.summary.as_deref())
        .and_then(FightRecord::parse)
        .unwrap_or_default();

    let history = athlete
        .fight_history
        .unwrap_or_default()
        .into_iter()
        .map(|h| FightHistoryEntry {
            event_name: h.event_name.unwrap_or_default(),
            date: h
                .date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|dt| dt.with_timezone(&Utc)),
            opponent: h
                .opponent
                .as_ref()
                .and_then(|o| o.display_name.clone())
                .unwrap_or_default(),
            result: parse_result(h.game_result.as_deref().unwrap_or_default()),
            method: h.result_display.unwrap_or_default(),
            round: h.round,
        })
        .collect();

    FighterProfile {
        fighter: Fighter {
            id: athlete.id.clone().unwrap_or_else(|| fighter_id.to_owned()),
            name: athlete.display_name.clone().unwrap_or_default(),
            nickname: athlete.nickname.clone().unwrap_or_default(),
            country: athlete.citizenship.clone().unwrap_or_default(),
            record,
        },
        division: athlete
            .weight_class
            .as_ref()
            .and_then(|w| w.text.clone())
            .unwrap_or_default(),
        stance: athlete.stance.and_then(|s| s.text),
        reach_in: athlete.reach,
        height_in: athlete.height,
        history,
    }
}

fn parse_result(s: &str) -> FightResult {
    match s {
        "W" => FightResult::Win,
        "L" => FightResult::Loss,
        "D" => FightResult::Draw,
        _ => FightResult::NoContest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn scoreboard_window_spans_past_week_to_two_months_out() {
        let dt = Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0).unwrap();
        let (from, to) = scoreboard_window(dt);
        assert_eq!(from, "20260821");
        assert_eq!(to, "20261029");
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("STATUS_IN_PROGRESS"), BoutStatus::InProgress);
        assert_eq!(parse_status("STATUS_FINAL"), BoutStatus::Final);
        assert_eq!(parse_status("STATUS_SCHEDULED"), BoutStatus::Scheduled);
        assert_eq!(parse_status("STATUS_CANCELED"), BoutStatus::Cancelled);
    }

    #[test]
    fn test_parse_segment() {
        assert_eq!(parse_segment("Main Card"), CardSegment::MainCard);
        assert_eq!(parse_segment("Prelims"), CardSegment::Prelims);
        assert_eq!(parse_segment("Early Prelims"), CardSegment::EarlyPrelims);
        // Unknown segments land on the main card rather than vanishing.
        assert_eq!(parse_segment(""), CardSegment::MainCard);
    }

    #[test]
    fn weight_class_strips_bout_and_title_suffixes() {
        assert_eq!(weight_class_of("Lightweight Bout"), "Lightweight");
        assert_eq!(weight_class_of("Lightweight Title Bout"), "Lightweight");
        assert_eq!(weight_class_of("Women's Bantamweight Bout"), "Women's Bantamweight");
    }

    #[test]
    fn bout_with_no_competitors_produces_tba_corners() {
        let comp = EspnCompetition { id: Some("b1".into()), ..Default::default() };
        let bout = map_bout(&comp);
        assert_eq!(bout.id, "b1");
        assert!(bout.red.fighter.is_none());
        assert_eq!(bout.red.placeholder.as_deref(), Some("TBA"));
        assert!(bout.blue.fighter.is_none());
        assert_eq!(bout.status, BoutStatus::Scheduled);
    }

    #[test]
    fn corners_split_by_order_field() {
        let comp = EspnCompetition {
            id: Some("b2".into()),
            competitors: Some(vec![
                EspnCompetitor {
                    id: Some("blue".into()),
                    order: Some(2),
                    athlete: Some(EspnAthlete {
                        id: Some("blue".into()),
                        display_name: Some("Blue Corner".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                EspnCompetitor {
                    id: Some("red".into()),
                    order: Some(1),
                    winner: Some(true),
                    athlete: Some(EspnAthlete {
                        id: Some("red".into()),
                        display_name: Some("Red Corner".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let bout = map_bout(&comp);
        assert_eq!(bout.red.fighter.as_ref().map(|f| f.id.as_str()), Some("red"));
        assert_eq!(bout.blue.fighter.as_ref().map(|f| f.id.as_str()), Some("blue"));
        assert_eq!(bout.winner_id.as_deref(), Some("red"));
    }

    #[test]
    fn title_flag_comes_from_type_text() {
        let comp = EspnCompetition {
            bout_type: Some(crate::espn::EspnBoutType {
                text: Some("Lightweight Title Bout".into()),
                abbreviation: None,
            }),
            ..Default::default()
        };
        let bout = map_bout(&comp);
        assert!(bout.is_title);
        assert_eq!(bout.weight_class, "Lightweight");
    }

    #[test]
    fn ranking_puts_champion_at_rank_zero_before_contenders() {
        let champ = EspnRank {
            current: None,
            athlete: Some(EspnAthlete {
                id: Some("champ".into()),
                display_name: Some("The Champ".into()),
                ..Default::default()
            }),
            record_summary: Some("26-1-0".into()),
        };
        let contender = EspnRank {
            current: Some(1),
            athlete: Some(EspnAthlete {
                id: Some("c1".into()),
                display_name: Some("Contender".into()),
                ..Default::default()
            }),
            record_summary: None,
        };
        let division = map_ranking(&EspnRanking {
            display_name: Some("Lightweight".into()),
            leaders: Some(vec![champ]),
            ranks: Some(vec![contender]),
        });
        assert_eq!(division.entries.len(), 2);
        assert!(division.entries[0].is_champion());
        assert_eq!(division.entries[0].fighter.record.wins, 26);
        assert_eq!(division.entries[1].rank, 1);
    }

    #[test]
    fn rank_entries_without_athletes_are_skipped() {
        let division = map_ranking(&EspnRanking {
            display_name: Some("Heavyweight".into()),
            leaders: Some(vec![EspnRank { current: None, athlete: None, record_summary: None }]),
            ranks: None,
        });
        assert!(division.entries.is_empty());
    }

    #[test]
    fn events_sort_soonest_first_with_undated_last() {
        let dated = |id: &str, day: u32| EspnEvent {
            id: Some(id.into()),
            date: Some(format!("2026-09-{day:02}T22:00:00Z")),
            competitions: Some(vec![EspnCompetition::default()]),
            ..Default::default()
        };
        let undated = EspnEvent {
            id: Some("undated".into()),
            competitions: Some(vec![EspnCompetition::default()]),
            ..Default::default()
        };
        let raw = ScoreboardResponse {
            events: Some(vec![dated("late", 20), undated, dated("early", 5)]),
        };
        let ids: Vec<String> = map_scoreboard(raw).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["early", "late", "undated"]);
    }

    #[tokio::test]
    async fn get_deserializes_a_successful_response() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"rankings":[{"displayName":"Lightweight","leaders":[],"ranks":[]}]}"#;
        let mock = server
            .mock("GET", "/rankings")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let api = MmaApi::new();
        let url = format!("{}/rankings", server.url());
        let raw: RankingsResponse = api.get(&url).await.unwrap();
        mock.assert_async().await;
        assert_eq!(raw.rankings.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_treats_client_errors_as_empty_defaults() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rankings")
            .with_status(404)
            .create_async()
            .await;

        let api = MmaApi::new();
        let url = format!("{}/rankings", server.url());
        let raw: RankingsResponse = api.get(&url).await.unwrap();
        mock.assert_async().await;
        assert!(raw.rankings.is_none());
    }
}
