use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

use crate::fetcher::ApiClient;
use crate::format::{
    format_games_behind, format_odds, format_stat, format_stat_line, format_timestamp, prop_label,
    resolve_line,
};
use crate::state::view::{MatchupView, Remote, Tab, ViewState};
use crate::types::{
    GameOddsResponse, LeaderCategory, LeaderEntry, LeaderScope, MatchupResponse, PlayerMatchup,
    Prop, StandingsResponse, TeamStanding,
};

/// Widget scroll state carried between frames.
#[derive(Debug, Default)]
pub struct Selection {
    props: TableState,
    categories: ListState,
}

fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn header_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(format!(" {title} "), title_style()))
}

/// Message for a region that has nothing to show yet.
fn pending_line<T>(remote: &Remote<T>, what: &str) -> Option<Line<'static>> {
    match remote {
        Remote::NotAsked => Some(Line::from("")),
        Remote::Loading => Some(Line::styled(format!("Loading {what}…"), Style::default().fg(Color::DarkGray))),
        Remote::Failed(e) => Some(Line::styled(
            format!("Unable to load {what}: {e}"),
            Style::default().fg(Color::Red),
        )),
        Remote::Loaded(_) => None,
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

pub fn render(f: &mut Frame, state: &ViewState, api: &ApiClient, selection: &mut Selection) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs
            Constraint::Min(0),    // body
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    render_tabs(f, state, api, chunks[0]);
    match state.tab {
        Tab::Props => render_props_tab(f, state, api, selection, chunks[1]),
        Tab::Standings => render_standings(f, state, chunks[1]),
        Tab::GameOdds => render_game_odds(f, state, chunks[1]),
        Tab::StatLeaders => render_leaders(f, state, selection, chunks[1]),
    }
    render_footer(f, state.tab, chunks[2]);
}

fn render_tabs(f: &mut Frame, state: &ViewState, api: &ApiClient, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(title_style().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(" Propboard ", title_style()))
                .title_bottom(Line::from(Span::styled(
                    format!(" {} ", api.base_url()),
                    Style::default().fg(Color::DarkGray),
                ))),
        );
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, tab: Tab, area: Rect) {
    let key = |k: &str| Span::styled(format!("[{k}] "), Style::default().fg(Color::Yellow));
    let mut spans = vec![
        key(" q"),
        Span::raw("quit  "),
        key("r"),
        Span::raw("refresh  "),
        key("Tab/1-4"),
        Span::raw("switch  "),
        key("↑↓/j k"),
        Span::raw("move  "),
    ];
    match tab {
        Tab::Props => spans.extend([
            key("Enter"),
            Span::raw("matchup  "),
            key("t/p/d"),
            Span::raw("team/prop/date  "),
            key("c"),
            Span::raw("clear"),
        ]),
        Tab::StatLeaders => spans.extend([key("Enter"), Span::raw("leaderboard")]),
        Tab::Standings | Tab::GameOdds => {}
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ---------------------------------------------------------------------------
// Props tab
// ---------------------------------------------------------------------------

fn render_props_tab(
    f: &mut Frame,
    state: &ViewState,
    api: &ApiClient,
    selection: &mut Selection,
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(rows[1]);

    f.render_widget(
        Paragraph::new(filter_bar_line(state)).block(panel("Filters")),
        rows[0],
    );
    render_props_table(f, state, selection, halves[0]);

    let lines = match &state.matchup {
        Some(view) => matchup_lines(view, state.matchup_prop(), api),
        None => vec![Line::styled(
            "Select a prop to see the matchup.",
            Style::default().fg(Color::DarkGray),
        )],
    };
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(panel("Matchup")),
        halves[1],
    );
}

fn filter_bar_line(state: &ViewState) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let value = |v: Option<&str>| match v {
        Some(v) => Span::styled(v.to_string(), Style::default().fg(Color::White)),
        None => Span::styled("All".to_string(), dim),
    };
    let mut spans = vec![
        Span::styled("[t] Team: ", header_style()),
        value(state.filter.team.as_deref()),
        Span::raw("  │  "),
        Span::styled("[p] Prop: ", header_style()),
        value(state.filter.prop_type.as_deref().map(prop_label)),
        Span::raw("  │  "),
        Span::styled("[d] Date: ", header_style()),
        Span::styled(state.filter.date.to_string(), Style::default().fg(Color::White)),
    ];
    if let Some(board) = state.props.loaded() {
        let listed = board.total.unwrap_or(board.canonical.len() as i64);
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("{} shown, {} listed", state.visible_props().len(), listed),
            dim,
        ));
    }
    Line::from(spans)
}

fn render_props_table(f: &mut Frame, state: &ViewState, selection: &mut Selection, area: Rect) {
    let block = panel("Props");
    if let Some(line) = pending_line(&state.props, "props") {
        f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }).block(block), area);
        return;
    }
    let visible = state.visible_props();
    if visible.is_empty() {
        let line = Line::styled("No props match the current filters.", Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let header = Row::new(
        ["Player", "Team", "Prop", "Line", "Odds", "Date"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    )
    .height(1);
    let rows: Vec<Row> = visible.iter().map(|p| prop_row(p)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(11),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    selection.props.select(Some(state.selected));
    f.render_stateful_widget(table, area, &mut selection.props);
}

fn prop_row(p: &Prop) -> Row<'static> {
    let odds = format_odds(&p.odds);
    let odds_color = if odds.starts_with('+') { Color::Green } else { Color::White };
    Row::new(vec![
        Cell::from(truncate(p.player_name.as_deref().unwrap_or("Unknown"), 24)),
        Cell::from(p.player_team_abbr.clone()).style(Style::default().fg(Color::Cyan)),
        Cell::from(prop_label(&p.prop_type).to_string()),
        Cell::from(resolve_line(&p.prop_type, p.line)),
        Cell::from(odds).style(Style::default().fg(odds_color)),
        Cell::from(format_timestamp(p.date.as_deref())).style(Style::default().fg(Color::DarkGray)),
    ])
}

/// Matchup pane body. `prop` is the listing entry the matchup was opened
/// for; it fills in whatever the matchup body leaves blank.
pub fn matchup_lines(view: &MatchupView, prop: Option<&Prop>, api: &ApiClient) -> Vec<Line<'static>> {
    if let Some(line) = pending_line(&view.matchup, "matchup") {
        return vec![line];
    }
    let Some(m) = view.matchup.loaded() else {
        return Vec::new();
    };

    let mut lines = vec![prop_summary_line(m, prop), Line::from("")];

    let batter_fallback = api.headshot_url(prop.and_then(|p| p.player_espn_id.as_ref()));
    match m.batter.as_ref().filter(|b| b.is_announced()) {
        Some(batter) => lines.extend(player_lines("Batter", batter, batter_fallback, api)),
        None => lines.push(Line::from("Batter: TBD")),
    }
    lines.push(Line::from(""));
    match m.pitcher.as_ref().filter(|p| p.is_announced()) {
        Some(pitcher) => lines.extend(player_lines("Pitcher", pitcher, api.headshot_url(None), api)),
        None => lines.push(Line::styled("Pitcher not announced", Style::default().fg(Color::DarkGray))),
    }
    lines
}

fn prop_summary_line(m: &MatchupResponse, listed: Option<&Prop>) -> Line<'static> {
    let prop_type = m
        .prop
        .prop_type
        .clone()
        .or_else(|| listed.map(|p| p.prop_type.clone()))
        .unwrap_or_default();
    let line = m.prop.line.or_else(|| listed.and_then(|p| p.line));
    let odds = if m.prop.odds.is_null() {
        listed.map(|p| format_odds(&p.odds)).unwrap_or_else(|| "N/A".to_string())
    } else {
        format_odds(&m.prop.odds)
    };
    Line::from(vec![
        Span::styled(prop_label(&prop_type).to_string(), title_style()),
        Span::raw(format!("  line {}  odds {}", resolve_line(&prop_type, line), odds)),
    ])
}

fn player_lines(role: &str, player: &PlayerMatchup, fallback_headshot: String, api: &ApiClient) -> Vec<Line<'static>> {
    let name = player.name.clone().unwrap_or_default();
    let mut header = vec![
        Span::styled(format!("{role}: "), header_style()),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(abbr) = player.team.abbr.as_deref().filter(|a| !a.is_empty()) {
        header.push(Span::styled(format!("  ({abbr})"), Style::default().fg(Color::Cyan)));
    }
    let dim = Style::default().fg(Color::DarkGray);

    let headshot = player
        .headshot
        .as_deref()
        .filter(|h| !h.is_empty())
        .map(|h| api.asset_url(h))
        .unwrap_or(fallback_headshot);
    let mut lines = vec![Line::from(header), Line::styled(format!("  headshot {headshot}"), dim)];

    let logo = match (player.team.logo.as_deref(), player.team.id.as_ref()) {
        (Some(logo), _) if !logo.is_empty() => Some(api.asset_url(logo)),
        (_, Some(id)) => Some(api.team_logo_url(id)),
        _ => None,
    };
    if let Some(logo) = logo {
        lines.push(Line::styled(format!("  logo {logo}"), dim));
    }

    if player.season_stats.is_empty() && player.career_stats.is_empty() {
        lines.push(Line::styled("  No stats found.", dim));
        return lines;
    }
    if !player.season_stats.is_empty() {
        lines.push(Line::from(format!("  Season  {}", format_stat_line(&player.season_stats))));
    }
    if !player.career_stats.is_empty() {
        lines.push(Line::from(format!("  Career  {}", format_stat_line(&player.career_stats))));
    }
    lines
}

// ---------------------------------------------------------------------------
// Standings tab
// ---------------------------------------------------------------------------

fn render_standings(f: &mut Frame, state: &ViewState, area: Rect) {
    let lines = match (pending_line(&state.standings, "standings"), state.standings.loaded()) {
        (Some(line), _) => vec![line],
        (None, Some(standings)) => standings_lines(standings),
        (None, None) => Vec::new(),
    };
    f.render_widget(
        Paragraph::new(lines).scroll((state.scroll, 0)).block(panel("Standings")),
        area,
    );
}

fn team_label(t: &TeamStanding) -> &str {
    if t.team_name.is_empty() {
        &t.team_abbr
    } else {
        &t.team_name
    }
}

fn record(t: &TeamStanding) -> String {
    format!("{}-{}", format_stat("wins", &t.wins), format_stat("losses", &t.losses))
}

pub fn standings_lines(standings: &StandingsResponse) -> Vec<Line<'static>> {
    if standings.divisions.is_empty() && standings.playoffs.is_empty() {
        return vec![Line::from("No standings available.")];
    }
    let mut lines = Vec::new();
    for (division, teams) in &standings.divisions {
        lines.push(Line::styled(division.clone(), title_style()));
        lines.push(Line::styled(
            format!("  {:<24}{:>5}{:>5}{:>7}{:>6}  {}", "Team", "W", "L", "PCT", "GB", "STRK"),
            header_style(),
        ));
        for t in teams {
            lines.push(Line::from(format!(
                "  {:<24}{:>5}{:>5}{:>7}{:>6}  {}",
                truncate(team_label(t), 23),
                format_stat("wins", &t.wins),
                format_stat("losses", &t.losses),
                format_stat("winning_pct", &t.winning_pct),
                format_games_behind(&t.games_behind),
                t.streak.as_deref().unwrap_or("-"),
            )));
        }
        lines.push(Line::from(""));
    }

    for (league, picture) in &standings.playoffs {
        lines.push(Line::styled(format!("{league} Playoff Picture"), title_style()));

        lines.push(Line::styled("  Division leaders", header_style()));
        push_or_none(&mut lines, picture.division_leaders.iter().map(|t| {
            format!("    {:<24}{}", truncate(team_label(t), 23), record(t))
        }));

        lines.push(Line::styled("  Wild cards", header_style()));
        push_or_none(&mut lines, picture.wild_cards.iter().enumerate().map(|(i, t)| {
            let rank = t.wildcard_rank.unwrap_or(i as i64 + 1);
            format!("    {rank}. {:<21}{}", truncate(team_label(t), 20), record(t))
        }));

        lines.push(Line::styled("  In the hunt", header_style()));
        push_or_none(&mut lines, picture.in_hunt.iter().map(|t| {
            format!(
                "    {:<24}{}  ({} GB)",
                truncate(team_label(t), 23),
                record(t),
                format_games_behind(&t.games_behind)
            )
        }));
        lines.push(Line::from(""));
    }
    lines
}

fn push_or_none(lines: &mut Vec<Line<'static>>, rows: impl Iterator<Item = String>) {
    let before = lines.len();
    lines.extend(rows.map(Line::from));
    if lines.len() == before {
        lines.push(Line::styled("    none", Style::default().fg(Color::DarkGray)));
    }
}

// ---------------------------------------------------------------------------
// Game odds tab
// ---------------------------------------------------------------------------

fn render_game_odds(f: &mut Frame, state: &ViewState, area: Rect) {
    let block = panel("Game Odds");
    if let Some(line) = pending_line(&state.game_odds, "game odds") {
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }
    let Some(odds) = state.game_odds.loaded() else {
        return;
    };
    if odds.games.is_empty() {
        let line = Line::styled("No games scheduled.", Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(line).block(block), area);
        return;
    }

    let header = Row::new(
        ["Matchup", "Time", "Book", "Away", "Home"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    );
    let table = Table::new(
        game_rows(odds, state.scroll as usize),
        [
            Constraint::Min(20),
            Constraint::Length(11),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .block(block);
    f.render_widget(table, area);
}

fn game_rows(odds: &GameOddsResponse, skip: usize) -> Vec<Row<'static>> {
    odds.games
        .iter()
        .skip(skip)
        .map(|g| {
            Row::new(vec![
                Cell::from(format!("{} @ {}", g.away_team, g.home_team)),
                Cell::from(format_timestamp(g.commence_time.as_deref()))
                    .style(Style::default().fg(Color::DarkGray)),
                Cell::from(g.bookmaker.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(format_odds(&g.away_odds)),
                Cell::from(format_odds(&g.home_odds)),
            ])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Stat leaders tab
// ---------------------------------------------------------------------------

fn render_leaders(f: &mut Frame, state: &ViewState, selection: &mut Selection, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let cats_block = panel("Categories");
    match state.leaders.categories.loaded() {
        Some(cats) => {
            let items: Vec<ListItem> = cats.iter().map(|(scope, c)| ListItem::new(category_label(*scope, c))).collect();
            let list = List::new(items)
                .block(cats_block)
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
            selection.categories.select(Some(state.leaders.cursor));
            f.render_stateful_widget(list, halves[0], &mut selection.categories);
        }
        None => {
            let line = pending_line(&state.leaders.categories, "categories").unwrap_or_default();
            f.render_widget(Paragraph::new(line).wrap(Wrap { trim: false }).block(cats_block), halves[0]);
        }
    }

    let title = state
        .leaders
        .active
        .as_ref()
        .map_or_else(|| "Leaders".to_string(), |(_, c)| c.name.clone());
    let board_block = panel(&title);
    let Some((_, category)) = state.leaders.active.as_ref() else {
        let line = Line::styled("Pick a category and press Enter.", Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(line).block(board_block), halves[1]);
        return;
    };
    if let Some(line) = pending_line(&state.leaders.board, "leaderboard") {
        f.render_widget(Paragraph::new(line).block(board_block), halves[1]);
        return;
    }
    let entries = state.leaders.board.loaded().map(Vec::as_slice).unwrap_or(&[]);
    let header = Row::new(
        ["#", "Name", "Team", "Value"]
            .iter()
            .map(|h| Cell::from(*h).style(header_style())),
    );
    let table = Table::new(
        leader_rows(&category.key, entries),
        [
            Constraint::Length(4),
            Constraint::Min(16),
            Constraint::Length(6),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(board_block);
    f.render_widget(table, halves[1]);
}

fn category_label(scope: LeaderScope, c: &LeaderCategory) -> String {
    match scope {
        LeaderScope::Individual => c.name.clone(),
        LeaderScope::Team => format!("{} (team)", c.name),
    }
}

fn leader_rows(category: &str, entries: &[LeaderEntry]) -> Vec<Row<'static>> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let rank = e.rank.unwrap_or(i as i64 + 1);
            Row::new(vec![
                Cell::from(rank.to_string()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(truncate(e.display_name(), 28)),
                Cell::from(e.team_abbr.clone().unwrap_or_else(|| "-".to_string()))
                    .style(Style::default().fg(Color::Cyan)),
                Cell::from(format_stat(category, &e.value)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::state::view::{update, Msg};
    use crate::types::{EntityId, PropsResponse};
    use serde_json::json;

    fn api() -> ApiClient {
        let cfg = Config::from_lookup(|key| match key {
            "PROPBOARD_API_URL" => Some("http://backend:5000".to_string()),
            _ => None,
        })
        .unwrap();
        ApiClient::new(&cfg).unwrap()
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    fn loaded(m: serde_json::Value) -> MatchupView {
        MatchupView {
            prop_id: EntityId::Int(1),
            matchup: Remote::Loaded(serde_json::from_value(m).unwrap()),
        }
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("Ronald Acuña Jr.", 40), "Ronald Acuña Jr.");
        assert_eq!(truncate("Ronald Acuña Jr.", 10), "Ronald Ac…");
    }

    #[test]
    fn matchup_formats_stats_and_handles_missing_pitcher() {
        let view = loaded(json!({
            "batter": {
                "name": "Juan Soto",
                "team": { "id": 147, "abbr": "NYY" },
                "season_stats": { "avg": 0.288, "hr": 22, "ops": 1.023 },
                "career_stats": {}
            },
            "pitcher": { "name": "N/A" },
            "prop": { "type": "To Record 2+ RBIs", "odds": 320, "line": "" }
        }));
        let lines = text(&matchup_lines(&view, None, &api()));
        assert_eq!(lines[0], "2+ RBIs  line 1.5  odds +320");
        assert_eq!(lines[2], "Batter: Juan Soto  (NYY)");
        assert_eq!(lines[3], "  headshot http://backend:5000/static/headshots/placeholder.png");
        assert_eq!(lines[4], "  logo http://backend:5000/static/team_logos/147.svg");
        assert_eq!(lines[5], "  Season  AVG: .288 | HR: 22 | OPS: 1.023");
        assert_eq!(lines.last().map(String::as_str), Some("Pitcher not announced"));
    }

    #[test]
    fn player_without_stats_says_so() {
        let view = loaded(json!({
            "batter": { "name": "Rookie", "headshot": "/static/headshots/999.png" },
            "pitcher": { "name": "Gerrit Cole", "season_stats": { "era": 3.5 } },
            "prop": { "type": "To Record A Hit", "odds": -180, "line": 0.5 }
        }));
        let lines = text(&matchup_lines(&view, None, &api()));
        assert!(lines.contains(&"  headshot http://backend:5000/static/headshots/999.png".to_string()));
        assert!(lines.contains(&"  No stats found.".to_string()));
        assert!(lines.contains(&"  Season  ERA: 3.50".to_string()));
    }

    #[test]
    fn matchup_keeps_its_own_prop_when_the_cursor_moves() {
        let listed = |id: i64, espn: i64, line: f64, odds: i64| -> Prop {
            serde_json::from_value(json!({
                "prop_id": id,
                "player_id": id * 10,
                "player_espn_id": espn,
                "player_team_abbr": "NYY",
                "prop_type": "Total Bases",
                "line": line,
                "odds": odds,
                "date": "2024-05-02"
            }))
            .unwrap()
        };
        let listing = PropsResponse {
            results: vec![listed(1, 555, 2.5, 110), listed(2, 777, 0.5, -150)],
            total: Some(2),
        };

        let (state, _) = update(ViewState::default(), Msg::Init);
        let (state, _) = update(state, Msg::PropsLoaded { generation: 1, result: Ok(listing) });
        let (state, _) = update(
            state,
            Msg::MatchupLoaded {
                generation: 1,
                prop_id: EntityId::Int(1),
                result: Ok(serde_json::from_value(json!({
                    "batter": { "name": "Giancarlo Stanton" },
                    "prop": { "type": "Total Bases", "odds": null, "line": "" }
                }))
                .unwrap()),
            },
        );
        let (state, _) = update(state, Msg::MoveSelection(1));
        assert_eq!(state.selected, 1);

        let view = state.matchup.as_ref().unwrap();
        let lines = text(&matchup_lines(view, state.matchup_prop(), &api()));
        assert_eq!(lines[0], "Total Bases  line 2.5  odds +110");
        assert_eq!(lines[3], "  headshot http://backend:5000/static/headshots/555.png");
    }

    #[test]
    fn failed_matchup_degrades_the_pane_only() {
        let view = MatchupView {
            prop_id: EntityId::Int(1),
            matchup: Remote::Failed("HTTP 500 from /api/prop/1/matchup".to_string()),
        };
        let lines = text(&matchup_lines(&view, None, &api()));
        assert_eq!(lines, vec!["Unable to load matchup: HTTP 500 from /api/prop/1/matchup"]);
    }

    #[test]
    fn standings_show_records_and_playoff_picture() {
        let standings: StandingsResponse = serde_json::from_value(json!({
            "divisions": {
                "AL East": [
                    { "team_name": "New York Yankees", "team_abbr": "NYY", "wins": 95, "losses": 67,
                      "winning_pct": 0.586, "games_behind": 0, "streak": "W3" },
                    { "team_name": "Baltimore Orioles", "team_abbr": "BAL", "wins": "91", "losses": 71,
                      "winning_pct": ".562", "games_behind": 4.0 }
                ]
            },
            "playoffs": {
                "AL": {
                    "division_leaders": [{ "team_name": "New York Yankees", "wins": 95, "losses": 67 }],
                    "wild_cards": [{ "team_name": "Baltimore Orioles", "wins": 91, "losses": 71, "wildcard_rank": 1 }],
                    "in_hunt": []
                }
            }
        }))
        .unwrap();
        let lines = text(&standings_lines(&standings));
        assert_eq!(lines[0], "AL East");
        let nyy = &lines[2];
        assert!(nyy.contains("New York Yankees"));
        assert!(nyy.contains(".586"));
        assert!(nyy.trim_end().ends_with("-  W3"));
        let bal = &lines[3];
        assert!(bal.contains("   4.0"));
        assert!(bal.contains(".562"));
        assert!(lines.contains(&"AL Playoff Picture".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("    1. Baltimore Orioles") && l.ends_with("91-71")));
        assert!(lines.contains(&"    none".to_string()));
    }

    #[test]
    fn empty_standings_have_a_message() {
        let lines = text(&standings_lines(&StandingsResponse::default()));
        assert_eq!(lines, vec!["No standings available."]);
    }

    #[test]
    fn team_categories_are_marked() {
        let c = LeaderCategory { key: "teamWins".to_string(), name: "Wins".to_string() };
        assert_eq!(category_label(LeaderScope::Team, &c), "Wins (team)");
        assert_eq!(category_label(LeaderScope::Individual, &c), "Wins");
    }
}
