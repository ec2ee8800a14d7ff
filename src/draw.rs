use chrono::{DateTime, Utc};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};

use crate::app::{App, MenuItem};
use crate::draft::DraftPhase;
use crate::state::app_state::RosterFilter;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use mma_api::{Bout, BoutStatus, CardSegment, FighterSlot};

static TABS: &[&str; 5] = &["Events", "Rankings", "Fighters", "Fighter Detail", "Draft"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
            }

            match app.state.active_tab {
                MenuItem::Events => draw_events(f, layout.main, app),
                MenuItem::Rankings => draw_rankings(f, layout.main, app),
                MenuItem::Fighters => draw_fighters(f, layout.main, app),
                MenuItem::FighterDetail => draw_fighter_detail(f, layout.main, app),
                MenuItem::Draft => draw_draft(f, layout.main, app),
                MenuItem::Help => draw_placeholder(
                    f,
                    layout.main,
                    "Help: q=quit  1=Events  2=Rankings  3=Fighters  4=Draft  ←/→=switch  ↑/↓=move  Enter=select  f=favorite  i=interested  u=user  /=search  g=start draft",
                ),
            }

            if !app.settings.full_screen {
                draw_footer(f, layout.footer, app);
            }

            draw_loading_spinner(f, f.area(), app, loading);

            if app.state.show_logs {
                draw_log_overlay(f, f.area());
            }
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Events => 0,
        MenuItem::Rankings => 1,
        MenuItem::Fighters => 2,
        MenuItem::FighterDetail => 3,
        MenuItem::Draft => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }

    let (text, style) = if let Some(err) = app.state.last_error.as_deref() {
        (err.to_string(), Style::default().fg(Color::Red))
    } else if app.state.active_tab == MenuItem::Draft
        && let Some(status) = app.state.draft.status.as_deref()
    {
        (status.to_string(), Style::default().fg(Color::Yellow))
    } else {
        let hint = match app.state.active_tab {
            MenuItem::Events => "h/l=event  j/k=bout  r/b=corner detail  g=start draft",
            MenuItem::Rankings => "h/l=division  j/k=move  Enter=detail",
            MenuItem::Fighters => "/=search  v=filter  f=favorite  i=interested  u=user  Enter=detail",
            MenuItem::FighterDetail => "j/k=scroll  Esc=back",
            MenuItem::Draft => "z/x=flip  e/l=order  j/k=move  r/b=corner  Enter=finish  s=save  o=load",
            MenuItem::Help => "Esc=back",
        };
        (hint.to_string(), Style::default().fg(Color::DarkGray))
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_events(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Events ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(event) = app.state.events.selected_event_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Event load failed:\n{err}")
        } else {
            "Loading upcoming events...".to_string()
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, sub_header, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    let when = event
        .date
        .map(|d| format!("{} ({})", d.format("%a %b %d, %I:%M%p UTC"), relative_day(d, Utc::now())))
        .unwrap_or_else(|| "date TBA".to_string());
    let header_text = format!(
        "{} ({}/{})  |  {when}",
        event.name,
        app.state.events.selected_event + 1,
        app.state.events.events.len()
    );
    f.render_widget(Paragraph::new(header_text), header);

    let venue = event.venue.as_deref().unwrap_or("venue TBA");
    f.render_widget(
        Paragraph::new(venue.to_string()).style(Style::default().fg(Color::DarkGray)),
        sub_header,
    );

    let selected_id = app.state.events.selected_bout_ref().map(|b| b.id.clone());
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;
    for segment in [CardSegment::MainCard, CardSegment::Prelims, CardSegment::EarlyPrelims] {
        let bouts: Vec<&Bout> = event.bouts.iter().filter(|b| b.segment == segment).collect();
        if bouts.is_empty() {
            continue;
        }
        lines.push(Line::from(Span::styled(
            segment.label().to_string(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )));
        for bout in bouts {
            let selected = selected_id.as_deref() == Some(bout.id.as_str());
            if selected {
                selected_line = lines.len();
            }
            lines.push(bout_line(bout, selected));
        }
        lines.push(Line::from(""));
    }

    let visible = content.height as usize;
    let offset = scroll_window(selected_line, visible);
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), content);
}

fn bout_line(bout: &Bout, selected: bool) -> Line<'static> {
    let marker = if selected { '>' } else { ' ' };
    let title = if bout.is_title { "★ " } else { "" };
    let status = match bout.status {
        BoutStatus::Scheduled => "SCH",
        BoutStatus::InProgress => "LIVE",
        BoutStatus::Final => "FNL",
        BoutStatus::Cancelled => "CXL",
    };

    let red = slot_label(&bout.red);
    let blue = slot_label(&bout.blue);
    let outcome = match (bout.status, bout.winner()) {
        (BoutStatus::Final, Some(winner)) => {
            let method = bout.method.as_deref().unwrap_or("decision");
            format!("  {} by {method}", winner.name)
        }
        _ => String::new(),
    };

    let style = match bout.status {
        BoutStatus::InProgress => Style::default().fg(Color::Yellow),
        BoutStatus::Cancelled => Style::default().fg(Color::DarkGray),
        _ if selected => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::White),
    };

    Line::from(Span::styled(
        format!("{marker} {title}{} | {red} vs {blue}  [{status}]{outcome}", bout.weight_class),
        style,
    ))
}

/// First visible line of a scrolling list, chosen so the selected line
/// always stays inside a window of `visible` lines.
fn scroll_window(selected_line: usize, visible: usize) -> usize {
    selected_line.saturating_sub(visible.saturating_sub(1))
}

/// "today", "tomorrow", "in 12 days", "3 days ago" for the events header.
fn relative_day(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (date.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 1 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

fn slot_label(slot: &FighterSlot) -> String {
    match &slot.fighter {
        Some(fighter) => format!("{} ({})", fighter.name, fighter.record.summary()),
        None => slot.placeholder.clone().unwrap_or_else(|| "TBA".to_string()),
    }
}

fn draw_rankings(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Rankings ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(division) = app.state.rankings.selected_division_ref() else {
        f.render_widget(
            Paragraph::new("Loading rankings...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [header, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    f.render_widget(
        Paragraph::new(format!(
            "{} ({}/{})",
            division.name,
            app.state.rankings.selected_division + 1,
            app.state.rankings.divisions.len()
        )),
        header,
    );

    let mut lines = Vec::with_capacity(division.entries.len());
    for (idx, entry) in division.entries.iter().enumerate() {
        let marker = if idx == app.state.rankings.selected_row { '>' } else { ' ' };
        let rank = if entry.is_champion() {
            " C".to_string()
        } else {
            format!("{:>2}", entry.rank)
        };
        let style = if entry.is_champion() {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker} {rank}  {}  ({})",
                entry.fighter.name,
                entry.fighter.record.summary()
            ),
            style,
        )));
    }

    let visible = content.height as usize;
    let offset = scroll_window(app.state.rankings.selected_row, visible);
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), content);
}

fn draw_fighters(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Fighters ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, filter_line, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    let marks = app.state.favorites.active_marks().clone();
    let entries = app.state.roster.visible(&marks);

    f.render_widget(
        Paragraph::new(format!(
            "User: {}  |  View: {}  |  {} fighters",
            app.active_user_name(),
            app.state.roster.filter.label(),
            entries.len()
        )),
        header,
    );

    let query = if app.state.roster.composing {
        format!("/{}_", app.state.roster.query)
    } else if app.state.roster.query.is_empty() {
        "Press / to search".to_string()
    } else {
        format!("/{}", app.state.roster.query)
    };
    let query_style = if app.state.roster.composing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    f.render_widget(Paragraph::new(query).style(query_style), filter_line);

    if entries.is_empty() {
        let msg = match app.state.roster.filter {
            RosterFilter::All => "No fighters loaded yet",
            RosterFilter::Favorites => "No favorites yet. Press f on a fighter.",
            RosterFilter::Interested => "No interested marks yet. Press i on a fighter.",
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    }

    let mut lines = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        let marker = if idx == app.state.roster.selected { '>' } else { ' ' };
        let fav = if marks.favorites.contains(&entry.fighter.id) { '♥' } else { ' ' };
        let interested = if marks.interested.contains(&entry.fighter.id) { 'i' } else { ' ' };
        let crowd = if entry.fighter.record.is_crowd_favorite() { '*' } else { ' ' };
        let nickname = if entry.fighter.nickname.is_empty() {
            String::new()
        } else {
            format!(" \"{}\"", entry.fighter.nickname)
        };
        lines.push(Line::from(format!(
            "{marker} {fav}{interested}{crowd} {}{nickname}  ({})  {}",
            entry.fighter.name,
            entry.fighter.record.summary(),
            entry.division,
        )));
    }

    let visible = content.height as usize;
    let offset = scroll_window(app.state.roster.selected, visible);
    let window: Vec<Line> = lines.into_iter().skip(offset).take(visible).collect();
    f.render_widget(Paragraph::new(window), content);
}

fn draw_fighter_detail(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Fighter Detail ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(profile) = app.state.fighter_detail.profile.as_ref() else {
        let msg = if let Some(err) = app.state.last_error.as_deref() {
            format!("Load failed:\n{err}")
        } else {
            "Select a fighter in Rankings or Fighters and press Enter".to_string()
        };
        f.render_widget(Paragraph::new(msg), inner);
        return;
    };

    let mut lines = Vec::new();
    let fighter = &profile.fighter;
    let nickname = if fighter.nickname.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", fighter.nickname)
    };
    lines.push(format!("{}{nickname}", fighter.name));
    lines.push(format!(
        "{}  |  {}  |  {}",
        profile.division,
        fighter.record.summary(),
        if fighter.country.is_empty() { "country unknown" } else { &fighter.country }
    ));

    let mut physique = Vec::new();
    if let Some(stance) = profile.stance.as_deref() {
        physique.push(stance.to_string());
    }
    if let Some(height) = profile.height_in {
        physique.push(format!("{height:.0}\" tall"));
    }
    if let Some(reach) = profile.reach_in {
        physique.push(format!("{reach:.0}\" reach"));
    }
    if !physique.is_empty() {
        lines.push(physique.join("  |  "));
    }
    if fighter.record.is_crowd_favorite() {
        lines.push(format!("Crowd favorite ({:.0}% wins)", fighter.record.win_rate() * 100.0));
    }
    lines.push(String::new());
    lines.push("Fight history: (j/k scroll)".to_string());

    let fixed = lines.len();
    let max_lines = (inner.height as usize).saturating_sub(fixed);
    let offset = app.state.fighter_detail.scroll_offset as usize;
    for entry in profile.history.iter().skip(offset).take(max_lines.max(1)) {
        let when = entry
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "????-??-??".to_string());
        let round = entry.round.map(|r| format!(" R{r}")).unwrap_or_default();
        lines.push(format!(
            "{when}  {}  vs {}  ({}{round})  {}",
            entry.result.label(),
            entry.opponent,
            entry.method,
            entry.event_name,
        ));
    }

    f.render_widget(Paragraph::new(lines.join("\n")), inner);
}

// ---------------------------------------------------------------------------
// Draft tab
// ---------------------------------------------------------------------------

fn draw_draft(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.draft.source_event.as_deref() {
        Some(event) => format!(" Draft: {event} "),
        None => " Draft ".to_string(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(draft) = app.state.draft.draft.as_ref() else {
        f.render_widget(
            Paragraph::new("No draft in progress.\n\nSelect an event on the Events tab and press g,\nor press o to load a saved draft.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    match draft.phase() {
        DraftPhase::AwaitingTiebreak => {
            lines.push(Line::from("Flip a coin at the table, then record the winner:"));
            lines.push(Line::from(""));
            lines.push(key_line('z', &format!("{} won the flip", app.settings.user_one)));
            lines.push(key_line('x', &format!("{} won the flip", app.settings.user_two)));
        }
        DraftPhase::AwaitingOrderChoice => {
            let winner = draft
                .tiebreak_winner()
                .map(|p| app.settings.user_name(p))
                .unwrap_or("winner");
            lines.push(Line::from(format!("{winner} chooses their turns:")));
            lines.push(Line::from(""));
            lines.push(key_line('e', "early turns (picks 1, 3)"));
            lines.push(key_line('l', "late turns (picks 2, 4, 5)"));
        }
        DraftPhase::Drafting { turn } => {
            let picker = draft
                .on_the_clock()
                .map(|p| app.settings.user_name(p))
                .unwrap_or("?");
            lines.push(Line::from(Span::styled(
                format!("Turn {turn}/5 — {picker} is on the clock"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(order_line(draft, app)));
            lines.push(Line::from(""));
            lines.push(Line::from("Pick a bout with j/k, then r (red corner) or b (blue corner):"));
            lines.push(Line::from(""));
            for (idx, bout) in draft.remaining().enumerate() {
                let marker = if idx == app.state.draft.cursor { '>' } else { ' ' };
                lines.push(Line::from(format!(
                    "{marker} {} vs {}",
                    bout.red.name, bout.blue.name
                )));
            }
            push_pick_history(&mut lines, draft, app);
        }
        DraftPhase::AwaitingTruePredictions => {
            lines.push(Line::from(Span::styled(
                "Honest predictions".to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(
                "The stuck player says who they really think wins. Silence means agreement.",
            ));
            lines.push(Line::from("j/k=turn  r/b=predict corner  Enter=finish"));
            lines.push(Line::from(""));

            let stuck = draft.stuck_assignments().unwrap_or_default();
            for pick in draft.picks() {
                let marker = if pick.turn as usize == app.state.draft.cursor + 1 { '>' } else { ' ' };
                let Some(bout) = draft.candidates().iter().find(|b| b.id == pick.bout_id) else {
                    continue;
                };
                let picked = bout.fighter(&pick.fighter_id).map(|fr| fr.name.as_str()).unwrap_or("?");
                let stuck_line = stuck
                    .iter()
                    .find(|s| s.turn == pick.turn)
                    .map(|s| format!("{} stuck with {}", app.settings.user_name(s.participant), s.fighter.name))
                    .unwrap_or_default();
                let prediction = match draft.true_prediction(pick.turn) {
                    Some(id) => bout
                        .fighter(id)
                        .map(|fr| format!("predicts {}", fr.name))
                        .unwrap_or_default(),
                    None => "(agrees by default)".to_string(),
                };
                lines.push(Line::from(format!(
                    "{marker} T{}: {} picked {}  |  {stuck_line}  |  {prediction}",
                    pick.turn,
                    app.settings.user_name(pick.picked_by),
                    picked,
                )));
            }
        }
        DraftPhase::Complete => {
            lines.push(Line::from(Span::styled(
                "Draft complete".to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("Press s to save, or g on an event to start over."));
            lines.push(Line::from(""));
            match draft.summary() {
                Ok(rows) => {
                    for row in rows {
                        let verdict = if row.agreement { "agrees" } else { "DISAGREES" };
                        let style = if row.agreement {
                            Style::default().fg(Color::White)
                        } else {
                            Style::default().fg(Color::Red)
                        };
                        lines.push(Line::from(Span::styled(
                            format!(
                                "T{}: {} picked {}  |  truth: {}  ({verdict})",
                                row.turn,
                                app.settings.user_name(row.picked_by),
                                row.game_pick.name,
                                row.true_pick.name,
                            ),
                            style,
                        )));
                    }
                }
                Err(e) => lines.push(Line::from(e.to_string())),
            }
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn key_line(key: char, label: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key}) "),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(label.to_string()),
    ])
}

fn order_line(draft: &crate::draft::Draft, app: &App) -> String {
    let Some(order) = draft.order() else {
        return String::new();
    };
    let slots: Vec<String> = order
        .slots()
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}:{}", i + 1, initial(app.settings.user_name(*p))))
        .collect();
    format!("Order  {}", slots.join("  "))
}

fn initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default()
}

fn push_pick_history(lines: &mut Vec<Line<'static>>, draft: &crate::draft::Draft, app: &App) {
    if draft.picks().is_empty() {
        return;
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Picks so far".to_string(),
        Style::default().fg(Color::Gray),
    )));
    for pick in draft.picks() {
        let name = draft
            .candidates()
            .iter()
            .find(|b| b.id == pick.bout_id)
            .and_then(|b| b.fighter(&pick.fighter_id))
            .map(|fr| fr.name.clone())
            .unwrap_or_else(|| pick.fighter_id.clone());
        lines.push(Line::from(format!(
            "  T{}: {} took {}",
            pick.turn,
            app.settings.user_name(pick.picked_by),
            name
        )));
    }
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn draw_log_overlay(f: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage(15),
        Constraint::Percentage(70),
        Constraint::Percentage(15),
    ])
    .areas(area);
    let [_, overlay, _] = Layout::horizontal([
        Constraint::Percentage(10),
        Constraint::Percentage(80),
        Constraint::Percentage(10),
    ])
    .areas(middle);

    f.render_widget(Clear, overlay);
    let logger = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::Gray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::White))
        .style_debug(Style::default().fg(Color::DarkGray))
        .style_trace(Style::default().fg(Color::DarkGray));
    f.render_widget(logger, overlay);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mma_api::{Fighter, FightRecord};

    #[test]
    fn slot_label_prefers_fighter_over_placeholder() {
        let slot = FighterSlot {
            fighter: Some(Fighter {
                id: "1".into(),
                name: "Islam Makhachev".into(),
                nickname: String::new(),
                country: "Russia".into(),
                record: FightRecord { wins: 26, losses: 1, draws: 0 },
            }),
            placeholder: Some("TBA".into()),
        };
        assert_eq!(slot_label(&slot), "Islam Makhachev (26-1-0)");
    }

    #[test]
    fn slot_label_falls_back_to_placeholder() {
        let slot = FighterSlot { fighter: None, placeholder: Some("Winner of #42".into()) };
        assert_eq!(slot_label(&slot), "Winner of #42");
        let empty = FighterSlot { fighter: None, placeholder: None };
        assert_eq!(slot_label(&empty), "TBA");
    }

    #[test]
    fn initials_use_first_char() {
        assert_eq!(initial("player-one"), "P");
        assert_eq!(initial(""), "");
    }

    #[test]
    fn scroll_window_keeps_the_selected_line_visible() {
        // Fits in the viewport: no scrolling.
        assert_eq!(scroll_window(0, 10), 0);
        assert_eq!(scroll_window(9, 10), 0);
        // Selection past the viewport scrolls just enough to show it.
        assert_eq!(scroll_window(10, 10), 1);
        assert_eq!(scroll_window(25, 10), 16);
        for selected in 0..40 {
            let offset = scroll_window(selected, 10);
            assert!((offset..offset + 10).contains(&selected));
        }
        // Degenerate viewport never underflows.
        assert_eq!(scroll_window(5, 0), 5);
    }

    #[test]
    fn relative_day_counts_calendar_days() {
        use chrono::TimeZone;
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 23, 0, 0).unwrap();
        let at = |y, m, d| Utc.with_ymd_and_hms(y, m, d, 1, 0, 0).unwrap();
        assert_eq!(relative_day(at(2026, 8, 28), now), "today");
        // Early tomorrow is still "tomorrow" even under 24h away.
        assert_eq!(relative_day(at(2026, 8, 29), now), "tomorrow");
        assert_eq!(relative_day(at(2026, 9, 12), now), "in 15 days");
        assert_eq!(relative_day(at(2026, 8, 27), now), "yesterday");
        assert_eq!(relative_day(at(2026, 8, 20), now), "8 days ago");
    }
}
