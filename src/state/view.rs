use tracing::{debug, error, warn};

use crate::state::filter::{cycle_option, prop_type_options, team_options, FilterImpact, FilterState};
use crate::state::reconcile::reconcile;
use crate::types::{
    CategoriesResponse, DateFilter, EntityId, GameOddsResponse, LeaderCategory, LeaderEntry,
    LeaderScope, LeadersResponse, MatchupResponse, Prop, PropsResponse, StandingsResponse, Team,
};

// ---------------------------------------------------------------------------
// Remote data
// ---------------------------------------------------------------------------

/// Load state of one independently fetched view region.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Remote<T> {
    #[default]
    NotAsked,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Remote::Loaded(v) => Some(v),
            _ => None,
        }
    }

    /// Regions load lazily, and again after a failure.
    pub fn needs_load(&self) -> bool {
        matches!(self, Remote::NotAsked | Remote::Failed(_))
    }

    fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(v) => Remote::Loaded(v),
            Err(e) => Remote::Failed(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Props,
    Standings,
    GameOdds,
    StatLeaders,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Props, Tab::Standings, Tab::GameOdds, Tab::StatLeaders];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Props => "Props",
            Tab::Standings => "Standings",
            Tab::GameOdds => "Game Odds",
            Tab::StatLeaders => "Stat Leaders",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Request generations
// ---------------------------------------------------------------------------

/// A view region with its own request generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Props,
    Matchup,
    Standings,
    GameOdds,
    Categories,
    Leaders,
}

/// Monotonic request counters. A response is applied only when it carries
/// the current generation of its region; anything older is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generations {
    props: u64,
    matchup: u64,
    standings: u64,
    game_odds: u64,
    categories: u64,
    leaders: u64,
}

impl Generations {
    fn slot(&mut self, region: Region) -> &mut u64 {
        match region {
            Region::Props => &mut self.props,
            Region::Matchup => &mut self.matchup,
            Region::Standings => &mut self.standings,
            Region::GameOdds => &mut self.game_odds,
            Region::Categories => &mut self.categories,
            Region::Leaders => &mut self.leaders,
        }
    }

    pub fn bump(&mut self, region: Region) -> u64 {
        let slot = self.slot(region);
        *slot += 1;
        *slot
    }

    pub fn current(&self, region: Region) -> u64 {
        match region {
            Region::Props => self.props,
            Region::Matchup => self.matchup,
            Region::Standings => self.standings,
            Region::GameOdds => self.game_odds,
            Region::Categories => self.categories,
            Region::Leaders => self.leaders,
        }
    }

    pub fn is_current(&self, region: Region, generation: u64) -> bool {
        self.current(region) == generation
    }
}

// ---------------------------------------------------------------------------
// Region payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropBoard {
    /// Reconciled listing, one prop per (player, prop type).
    pub canonical: Vec<Prop>,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchupView {
    pub prop_id: EntityId,
    pub matchup: Remote<MatchupResponse>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadersView {
    pub categories: Remote<Vec<(LeaderScope, LeaderCategory)>>,
    /// Cursor in the category list.
    pub cursor: usize,
    /// Category whose leaderboard is shown.
    pub active: Option<(LeaderScope, LeaderCategory)>,
    pub board: Remote<Vec<LeaderEntry>>,
}

// ---------------------------------------------------------------------------
// Messages and effects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Init,
    Refresh,
    SwitchTab(Tab),
    NextTab,
    MoveSelection(isize),
    Activate,
    SetTeam(Option<String>),
    SetPropType(Option<String>),
    SetDate(DateFilter),
    CycleTeam,
    CyclePropType,
    CycleDate,
    ClearFilters,
    PropsLoaded {
        generation: u64,
        result: Result<PropsResponse, String>,
    },
    TeamsLoaded(Result<Vec<Team>, String>),
    MatchupLoaded {
        generation: u64,
        prop_id: EntityId,
        result: Result<MatchupResponse, String>,
    },
    StandingsLoaded {
        generation: u64,
        result: Result<StandingsResponse, String>,
    },
    GameOddsLoaded {
        generation: u64,
        result: Result<GameOddsResponse, String>,
    },
    CategoriesLoaded {
        generation: u64,
        result: Result<CategoriesResponse, String>,
    },
    LeadersLoaded {
        generation: u64,
        result: Result<LeadersResponse, String>,
    },
}

/// Fetches requested by `update`, executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadProps { generation: u64, date: DateFilter },
    LoadTeams,
    LoadMatchup { generation: u64, prop_id: EntityId },
    LoadStandings { generation: u64 },
    LoadGameOdds { generation: u64 },
    LoadCategories { generation: u64 },
    LoadLeaders {
        generation: u64,
        scope: LeaderScope,
        category: String,
    },
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub tab: Tab,
    pub filter: FilterState,
    pub props: Remote<PropBoard>,
    pub teams: Remote<Vec<Team>>,
    /// Cursor in the filtered prop list.
    pub selected: usize,
    pub matchup: Option<MatchupView>,
    pub standings: Remote<StandingsResponse>,
    pub game_odds: Remote<GameOddsResponse>,
    pub leaders: LeadersView,
    /// Scroll offset for the standings and game-odds panes.
    pub scroll: u16,
    pub generations: Generations,
}

impl ViewState {
    pub fn new(filter: FilterState) -> Self {
        Self { filter, ..Self::default() }
    }

    /// Canonical props passing the current filter, in canonical order.
    pub fn visible_props(&self) -> Vec<&Prop> {
        self.props
            .loaded()
            .map(|board| self.filter.apply(&board.canonical))
            .unwrap_or_default()
    }

    pub fn selected_prop(&self) -> Option<&Prop> {
        self.visible_props().get(self.selected).copied()
    }

    /// The prop the open matchup belongs to. Independent of the cursor and
    /// of the current filter.
    pub fn matchup_prop(&self) -> Option<&Prop> {
        let prop_id = &self.matchup.as_ref()?.prop_id;
        self.props.loaded()?.canonical.iter().find(|p| &p.prop_id == prop_id)
    }

    pub fn team_options(&self) -> Vec<String> {
        let canonical = self.props.loaded().map(|b| b.canonical.as_slice()).unwrap_or(&[]);
        team_options(self.teams.loaded().map(Vec::as_slice), canonical)
    }

    pub fn prop_type_options(&self) -> Vec<String> {
        self.props
            .loaded()
            .map(|b| prop_type_options(&b.canonical))
            .unwrap_or_default()
    }

    fn load_props(mut self) -> (Self, Vec<Effect>) {
        let generation = self.generations.bump(Region::Props);
        self.props = Remote::Loading;
        self.matchup = None;
        self.selected = 0;
        let date = self.filter.date;
        (self, vec![Effect::LoadProps { generation, date }])
    }

    fn load_matchup(mut self, prop_id: EntityId) -> (Self, Vec<Effect>) {
        let generation = self.generations.bump(Region::Matchup);
        self.matchup = Some(MatchupView { prop_id: prop_id.clone(), matchup: Remote::Loading });
        (self, vec![Effect::LoadMatchup { generation, prop_id }])
    }

    fn load_tab(mut self, tab: Tab, force: bool) -> (Self, Vec<Effect>) {
        match tab {
            Tab::Props => {
                if force || self.props.needs_load() {
                    self.load_props()
                } else {
                    (self, Vec::new())
                }
            }
            Tab::Standings if force || self.standings.needs_load() => {
                let generation = self.generations.bump(Region::Standings);
                self.standings = Remote::Loading;
                (self, vec![Effect::LoadStandings { generation }])
            }
            Tab::GameOdds if force || self.game_odds.needs_load() => {
                let generation = self.generations.bump(Region::GameOdds);
                self.game_odds = Remote::Loading;
                (self, vec![Effect::LoadGameOdds { generation }])
            }
            Tab::StatLeaders if force || self.leaders.categories.needs_load() => {
                let generation = self.generations.bump(Region::Categories);
                self.leaders.categories = Remote::Loading;
                let mut effects = vec![Effect::LoadCategories { generation }];
                if force {
                    if let Some((scope, category)) = self.leaders.active.clone() {
                        let (next, more) = self.load_leaders(scope, category);
                        self = next;
                        effects.extend(more);
                    }
                }
                (self, effects)
            }
            _ => (self, Vec::new()),
        }
    }

    fn load_leaders(mut self, scope: LeaderScope, category: LeaderCategory) -> (Self, Vec<Effect>) {
        let generation = self.generations.bump(Region::Leaders);
        let key = category.key.clone();
        self.leaders.active = Some((scope, category));
        self.leaders.board = Remote::Loading;
        (self, vec![Effect::LoadLeaders { generation, scope, category: key }])
    }

    fn set_filter(mut self, next: FilterState) -> (Self, Vec<Effect>) {
        match self.filter.impact_of(&next) {
            FilterImpact::Unchanged => (self, Vec::new()),
            FilterImpact::Refilter => {
                self.filter = next;
                self.selected = 0;
                (self, Vec::new())
            }
            FilterImpact::Refetch => {
                self.filter = next;
                self.load_props()
            }
        }
    }
}

/// Apply one message, returning the next state and the fetches it needs.
pub fn update(state: ViewState, msg: Msg) -> (ViewState, Vec<Effect>) {
    match msg {
        Msg::Init => {
            let (mut state, mut effects) = state.load_props();
            state.teams = Remote::Loading;
            effects.push(Effect::LoadTeams);
            (state, effects)
        }
        Msg::Refresh => {
            let tab = state.tab;
            let (mut state, mut effects) = state.load_props();
            if state.teams.needs_load() {
                state.teams = Remote::Loading;
                effects.push(Effect::LoadTeams);
            }
            if tab != Tab::Props {
                let (next, more) = state.load_tab(tab, true);
                state = next;
                effects.extend(more);
            }
            (state, effects)
        }
        Msg::SwitchTab(tab) => {
            let mut state = state;
            if state.tab != tab {
                state.scroll = 0;
            }
            state.tab = tab;
            state.load_tab(tab, false)
        }
        Msg::NextTab => {
            let next = state.tab.next();
            update(state, Msg::SwitchTab(next))
        }
        Msg::MoveSelection(delta) => {
            let mut state = state;
            match state.tab {
                Tab::Props => {
                    let len = state.visible_props().len();
                    state.selected = step(state.selected, delta, len);
                }
                Tab::StatLeaders => {
                    let len = state.leaders.categories.loaded().map_or(0, Vec::len);
                    state.leaders.cursor = step(state.leaders.cursor, delta, len);
                }
                Tab::Standings | Tab::GameOdds => {
                    state.scroll = if delta < 0 {
                        state.scroll.saturating_sub(delta.unsigned_abs() as u16)
                    } else {
                        state.scroll.saturating_add(delta as u16)
                    };
                }
            }
            (state, Vec::new())
        }
        Msg::Activate => match state.tab {
            Tab::Props => match state.selected_prop().map(|p| p.prop_id.clone()) {
                Some(prop_id) => state.load_matchup(prop_id),
                None => (state, Vec::new()),
            },
            Tab::StatLeaders => {
                let picked = state
                    .leaders
                    .categories
                    .loaded()
                    .and_then(|cats| cats.get(state.leaders.cursor))
                    .cloned();
                match picked {
                    Some((scope, category)) => state.load_leaders(scope, category),
                    None => (state, Vec::new()),
                }
            }
            Tab::Standings | Tab::GameOdds => (state, Vec::new()),
        },
        Msg::SetTeam(team) => {
            let next = state.filter.clone().with_team(team);
            state.set_filter(next)
        }
        Msg::SetPropType(prop_type) => {
            let next = state.filter.clone().with_prop_type(prop_type);
            state.set_filter(next)
        }
        Msg::SetDate(date) => {
            let next = state.filter.clone().with_date(date);
            state.set_filter(next)
        }
        Msg::CycleTeam => {
            let team = cycle_option(&state.team_options(), state.filter.team.as_deref());
            update(state, Msg::SetTeam(team))
        }
        Msg::CyclePropType => {
            let prop_type =
                cycle_option(&state.prop_type_options(), state.filter.prop_type.as_deref());
            update(state, Msg::SetPropType(prop_type))
        }
        Msg::CycleDate => {
            let date = state.filter.date.next();
            update(state, Msg::SetDate(date))
        }
        Msg::ClearFilters => {
            let next = state.filter.clone().cleared();
            state.set_filter(next)
        }
        Msg::PropsLoaded { generation, result } => {
            if !state.generations.is_current(Region::Props, generation) {
                debug!(generation, "discarding stale prop listing");
                return (state, Vec::new());
            }
            let mut state = state;
            state.selected = 0;
            state.matchup = None;
            match result {
                Ok(listing) => {
                    let canonical = reconcile(listing.results);
                    state.props = Remote::Loaded(PropBoard { canonical, total: listing.total });
                    // The first visible prop's matchup loads without a click.
                    match state.selected_prop().map(|p| p.prop_id.clone()) {
                        Some(prop_id) => state.load_matchup(prop_id),
                        None => (state, Vec::new()),
                    }
                }
                Err(e) => {
                    error!("prop listing failed: {e}");
                    state.props = Remote::Failed(e);
                    (state, Vec::new())
                }
            }
        }
        Msg::TeamsLoaded(result) => {
            let mut state = state;
            if let Err(e) = &result {
                warn!("team directory unavailable, using teams from props: {e}");
            }
            state.teams = Remote::from_result(result);
            (state, Vec::new())
        }
        Msg::MatchupLoaded { generation, prop_id, result } => {
            let current = state.generations.is_current(Region::Matchup, generation)
                && state.matchup.as_ref().is_some_and(|m| m.prop_id == prop_id);
            if !current {
                debug!(generation, %prop_id, "discarding stale matchup");
                return (state, Vec::new());
            }
            let mut state = state;
            if let Err(e) = &result {
                warn!(%prop_id, "matchup unavailable: {e}");
            }
            state.matchup = Some(MatchupView { prop_id, matchup: Remote::from_result(result) });
            (state, Vec::new())
        }
        Msg::StandingsLoaded { generation, result } => {
            if !state.generations.is_current(Region::Standings, generation) {
                debug!(generation, "discarding stale standings");
                return (state, Vec::new());
            }
            let mut state = state;
            if let Err(e) = &result {
                warn!("standings unavailable: {e}");
            }
            state.standings = Remote::from_result(result);
            (state, Vec::new())
        }
        Msg::GameOddsLoaded { generation, result } => {
            if !state.generations.is_current(Region::GameOdds, generation) {
                debug!(generation, "discarding stale game odds");
                return (state, Vec::new());
            }
            let mut state = state;
            if let Err(e) = &result {
                warn!("game odds unavailable: {e}");
            }
            state.game_odds = Remote::from_result(result);
            (state, Vec::new())
        }
        Msg::CategoriesLoaded { generation, result } => {
            if !state.generations.is_current(Region::Categories, generation) {
                debug!(generation, "discarding stale leader categories");
                return (state, Vec::new());
            }
            let mut state = state;
            match result {
                Ok(cats) => {
                    let flat = cats.flatten();
                    state.leaders.cursor = state.leaders.cursor.min(flat.len().saturating_sub(1));
                    let first = flat.first().cloned();
                    state.leaders.categories = Remote::Loaded(flat);
                    match first {
                        Some((scope, category)) if state.leaders.active.is_none() => {
                            state.load_leaders(scope, category)
                        }
                        _ => (state, Vec::new()),
                    }
                }
                Err(e) => {
                    warn!("leader categories unavailable: {e}");
                    state.leaders.categories = Remote::Failed(e);
                    (state, Vec::new())
                }
            }
        }
        Msg::LeadersLoaded { generation, result } => {
            if !state.generations.is_current(Region::Leaders, generation) {
                debug!(generation, "discarding stale leaderboard");
                return (state, Vec::new());
            }
            let mut state = state;
            if let Err(e) = &result {
                warn!("leaderboard unavailable: {e}");
            }
            state.leaders.board = Remote::from_result(result.map(|r| r.results));
            (state, Vec::new())
        }
    }
}

/// Move a cursor by `delta`, clamped to `[0, len)`.
fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = len - 1;
    if delta < 0 {
        cursor.saturating_sub(delta.unsigned_abs()).min(max)
    } else {
        cursor.saturating_add(delta as usize).min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prop(id: i64, player: i64, team: &str, prop_type: &str, date: &str) -> Prop {
        serde_json::from_value(json!({
            "prop_id": id,
            "player_id": player,
            "player_name": format!("Player {player}"),
            "player_team_abbr": team,
            "prop_type": prop_type,
            "odds": 120,
            "date": date
        }))
        .unwrap()
    }

    fn listing() -> PropsResponse {
        PropsResponse {
            results: vec![
                prop(1, 42, "NYY", "To Hit A Home Run", "2024-05-01"),
                prop(2, 7, "BOS", "To Record A Hit", "2024-05-02"),
                prop(3, 42, "NYY", "To Hit A Home Run", "2024-05-02"),
                prop(4, 8, "NYY", "To Record A Hit", "2024-05-02"),
            ],
            total: Some(4),
        }
    }

    /// Init, then deliver the listing for the generation Init asked for.
    fn loaded_state() -> ViewState {
        let (state, effects) = update(ViewState::default(), Msg::Init);
        let Some(Effect::LoadProps { generation, .. }) = effects.first().cloned() else {
            panic!("init must load props first, got {effects:?}");
        };
        let (state, _) = update(state, Msg::PropsLoaded { generation, result: Ok(listing()) });
        state
    }

    #[test]
    fn init_requests_props_and_teams_together() {
        let (state, effects) = update(ViewState::default(), Msg::Init);
        assert_eq!(
            effects,
            vec![
                Effect::LoadProps { generation: 1, date: DateFilter::Upcoming },
                Effect::LoadTeams,
            ]
        );
        assert_eq!(state.props, Remote::Loading);
        assert_eq!(state.teams, Remote::Loading);
    }

    #[test]
    fn loaded_listing_is_reconciled_and_first_matchup_requested() {
        let (state, effects) = update(ViewState::default(), Msg::Init);
        let (state, effects2) = update(
            state,
            Msg::PropsLoaded { generation: 1, result: Ok(listing()) },
        );
        assert_eq!(effects.len(), 2);
        let board = state.props.loaded().unwrap();
        let ids: Vec<String> = board.canonical.iter().map(|p| p.prop_id.to_string()).collect();
        assert_eq!(ids, vec!["3", "2", "4"]);
        assert_eq!(board.total, Some(4));
        assert_eq!(
            effects2,
            vec![Effect::LoadMatchup { generation: 1, prop_id: EntityId::Int(3) }]
        );
    }

    #[test]
    fn stale_listing_is_discarded() {
        let (state, _) = update(ViewState::default(), Msg::Init);
        // Date change issues generation 2 while generation 1 is in flight.
        let (state, effects) = update(state, Msg::SetDate(DateFilter::Tomorrow));
        assert_eq!(
            effects,
            vec![Effect::LoadProps { generation: 2, date: DateFilter::Tomorrow }]
        );
        let (state, effects) = update(
            state,
            Msg::PropsLoaded { generation: 1, result: Ok(listing()) },
        );
        assert!(effects.is_empty());
        assert_eq!(state.props, Remote::Loading);

        let (state, _) = update(
            state,
            Msg::PropsLoaded { generation: 2, result: Ok(PropsResponse::default()) },
        );
        assert_eq!(state.props.loaded().map(|b| b.canonical.len()), Some(0));
    }

    #[test]
    fn listing_failure_drops_old_data_and_matchup() {
        let state = loaded_state();
        let (state, _) = update(state, Msg::Refresh);
        let generation = state.generations.current(Region::Props);
        let (state, _) = update(
            state,
            Msg::PropsLoaded { generation, result: Err("HTTP 500 from /api/props".to_string()) },
        );
        assert_eq!(state.props, Remote::Failed("HTTP 500 from /api/props".to_string()));
        assert!(state.visible_props().is_empty());
        assert!(state.matchup.is_none());
    }

    #[test]
    fn team_directory_failure_does_not_touch_props() {
        let state = loaded_state();
        let before = state.props.clone();
        let (state, effects) = update(state, Msg::TeamsLoaded(Err("timeout".to_string())));
        assert!(effects.is_empty());
        assert_eq!(state.props, before);
        assert_eq!(state.team_options(), vec!["BOS", "NYY"]);
    }

    #[test]
    fn team_filter_refilters_without_fetching() {
        let state = loaded_state();
        let (state, effects) = update(state, Msg::SetTeam(Some("NYY".to_string())));
        assert!(effects.is_empty());
        let ids: Vec<String> = state.visible_props().iter().map(|p| p.prop_id.to_string()).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn cycling_filters_walks_options() {
        let state = loaded_state();
        let (state, _) = update(state, Msg::CycleTeam);
        assert_eq!(state.filter.team.as_deref(), Some("BOS"));
        let (state, _) = update(state, Msg::CyclePropType);
        assert_eq!(state.filter.prop_type.as_deref(), Some("To Hit A Home Run"));
        assert!(state.visible_props().is_empty());
        let (state, effects) = update(state, Msg::ClearFilters);
        assert!(effects.is_empty());
        assert_eq!(state.visible_props().len(), 3);
        let (state, effects) = update(state, Msg::CycleDate);
        assert_eq!(state.filter.date, DateFilter::Today);
        assert!(matches!(effects.as_slice(), [Effect::LoadProps { date: DateFilter::Today, .. }]));
    }

    #[test]
    fn selection_is_clamped_and_activation_loads_matchup() {
        let state = loaded_state();
        let (state, _) = update(state, Msg::MoveSelection(10));
        assert_eq!(state.selected, 2);
        let (state, _) = update(state, Msg::MoveSelection(-1));
        assert_eq!(state.selected, 1);
        let (state, effects) = update(state, Msg::Activate);
        assert_eq!(
            effects,
            vec![Effect::LoadMatchup { generation: 2, prop_id: EntityId::Int(2) }]
        );
    }

    #[test]
    fn matchup_prop_ignores_cursor_and_filter() {
        let state = loaded_state();
        let (state, _) = update(
            state,
            Msg::MatchupLoaded {
                generation: 1,
                prop_id: EntityId::Int(3),
                result: Ok(MatchupResponse::default()),
            },
        );
        let (state, effects) = update(state, Msg::MoveSelection(1));
        assert!(effects.is_empty());
        assert_eq!(state.selected_prop().map(|p| p.prop_id.clone()), Some(EntityId::Int(2)));
        assert_eq!(state.matchup_prop().map(|p| p.prop_id.clone()), Some(EntityId::Int(3)));

        // Prop 3 is filtered out of view but its matchup stays open.
        let (state, _) = update(state, Msg::SetTeam(Some("BOS".to_string())));
        assert_eq!(state.matchup_prop().map(|p| p.prop_id.clone()), Some(EntityId::Int(3)));
    }

    #[test]
    fn stale_matchup_is_discarded() {
        let state = loaded_state();
        // Generation 1 went out for prop 3 on load; the user then opens prop 2.
        let (state, _) = update(state, Msg::MoveSelection(1));
        let (state, _) = update(state, Msg::Activate);
        let (state, _) = update(
            state,
            Msg::MatchupLoaded {
                generation: 1,
                prop_id: EntityId::Int(3),
                result: Ok(MatchupResponse::default()),
            },
        );
        assert_eq!(state.matchup.as_ref().unwrap().matchup, Remote::Loading);

        let (state, _) = update(
            state,
            Msg::MatchupLoaded {
                generation: 2,
                prop_id: EntityId::Int(2),
                result: Err("HTTP 404".to_string()),
            },
        );
        let view = state.matchup.unwrap();
        assert_eq!(view.prop_id, EntityId::Int(2));
        assert_eq!(view.matchup, Remote::Failed("HTTP 404".to_string()));
    }

    #[test]
    fn tabs_load_lazily_and_retry_after_failure() {
        let state = loaded_state();
        let (state, effects) = update(state, Msg::SwitchTab(Tab::Standings));
        assert_eq!(effects, vec![Effect::LoadStandings { generation: 1 }]);
        let (state, _) = update(
            state,
            Msg::StandingsLoaded { generation: 1, result: Err("down".to_string()) },
        );
        let (state, _) = update(state, Msg::SwitchTab(Tab::Props));
        let (state, effects) = update(state, Msg::SwitchTab(Tab::Standings));
        assert_eq!(effects, vec![Effect::LoadStandings { generation: 2 }]);
        let (state, _) = update(
            state,
            Msg::StandingsLoaded { generation: 2, result: Ok(StandingsResponse::default()) },
        );
        let (_, effects) = update(state, Msg::SwitchTab(Tab::Standings));
        assert!(effects.is_empty());
    }

    #[test]
    fn categories_auto_select_first_leaderboard() {
        let state = loaded_state();
        let (state, effects) = update(state, Msg::SwitchTab(Tab::StatLeaders));
        assert_eq!(effects, vec![Effect::LoadCategories { generation: 1 }]);
        let cats: CategoriesResponse = serde_json::from_value(json!({
            "batting": ["battingAverage", "homeRuns"],
            "pitching": ["era"],
            "team": ["teamWins"]
        }))
        .unwrap();
        let (state, effects) = update(
            state,
            Msg::CategoriesLoaded { generation: 1, result: Ok(cats) },
        );
        assert_eq!(
            effects,
            vec![Effect::LoadLeaders {
                generation: 1,
                scope: LeaderScope::Individual,
                category: "battingAverage".to_string(),
            }]
        );

        let (state, _) = update(state, Msg::MoveSelection(3));
        let (state, effects) = update(state, Msg::Activate);
        assert_eq!(
            effects,
            vec![Effect::LoadLeaders {
                generation: 2,
                scope: LeaderScope::Team,
                category: "teamWins".to_string(),
            }]
        );

        // The batting-average board arrives late and is dropped.
        let (state, _) = update(
            state,
            Msg::LeadersLoaded { generation: 1, result: Ok(LeadersResponse::default()) },
        );
        assert_eq!(state.leaders.board, Remote::Loading);
    }

    #[test]
    fn generations_are_independent_per_region() {
        let mut g = Generations::default();
        assert_eq!(g.bump(Region::Props), 1);
        assert_eq!(g.bump(Region::Props), 2);
        assert_eq!(g.bump(Region::Matchup), 1);
        assert!(g.is_current(Region::Props, 2));
        assert!(!g.is_current(Region::Props, 1));
        assert_eq!(g.current(Region::Leaders), 0);
    }
}
