use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Backend identifiers arrive as integers or strings depending on the table
/// they came from. They are opaque: equality and display only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    /// True when the id is all ASCII digits (integers always are).
    pub fn is_numeric(&self) -> bool {
        match self {
            EntityId::Int(_) => true,
            EntityId::Text(s) => !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityId::Int(n) => write!(f, "{n}"),
            EntityId::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

/// Slate selector sent as `date_filter` on the listing endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    Upcoming,
    Today,
    Tomorrow,
}

impl DateFilter {
    pub fn as_query(&self) -> &'static str {
        match self {
            DateFilter::Upcoming => "upcoming",
            DateFilter::Today => "today",
            DateFilter::Tomorrow => "tomorrow",
        }
    }

    /// Next value in the cycle upcoming → today → tomorrow → upcoming.
    pub fn next(self) -> Self {
        match self {
            DateFilter::Upcoming => DateFilter::Today,
            DateFilter::Today => DateFilter::Tomorrow,
            DateFilter::Tomorrow => DateFilter::Upcoming,
        }
    }
}

impl std::fmt::Display for DateFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

impl std::str::FromStr for DateFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(DateFilter::Upcoming),
            "today" => Ok(DateFilter::Today),
            "tomorrow" => Ok(DateFilter::Tomorrow),
            other => Err(format!(
                "date filter must be upcoming, today or tomorrow, got `{other}`"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Props
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub prop_id: EntityId,
    #[serde(default)]
    pub player_id: Option<EntityId>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub player_espn_id: Option<EntityId>,
    #[serde(default)]
    pub player_team_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_default")]
    pub player_team_abbr: String,
    #[serde(default, deserialize_with = "null_default")]
    pub prop_type: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub line: Option<f64>,
    /// American odds as sent: number, numeric string, or null.
    #[serde(default)]
    pub odds: Value,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub event_id: Option<EntityId>,
}

impl Prop {
    /// Slate timestamp, `None` when missing or unparseable.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_timestamp)
    }
}

/// RFC 3339, naive ISO datetimes (read as UTC) and bare dates (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropsResponse {
    pub results: Vec<Prop>,
    pub total: Option<i64>,
}

/// Listing body. Current backends page it; older ones return a bare array.
/// Records stay raw here so one bad record cannot sink the page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PropsPayload {
    Bare(Vec<Value>),
    Paged {
        #[serde(default, deserialize_with = "null_default")]
        results: Vec<Value>,
        #[serde(default)]
        total: Option<i64>,
    },
}

impl From<PropsPayload> for PropsResponse {
    /// Decode each record on its own. Malformed records are dropped with a
    /// warning; the rest of the page survives.
    fn from(payload: PropsPayload) -> Self {
        let (items, total) = match payload {
            PropsPayload::Paged { results, total } => (results, total),
            PropsPayload::Bare(results) => (results, None),
        };

        let received = items.len();
        let mut results = Vec::with_capacity(received);
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<Prop>(item) {
                Ok(prop) => results.push(prop),
                Err(e) => warn!(index, error = %e, "dropping malformed prop record"),
            }
        }

        let skipped = received - results.len();
        if skipped > 0 {
            warn!(skipped, kept = results.len(), "prop listing had malformed records");
        }
        PropsResponse { results, total }
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub abbr: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}

/// Team reference embedded in a matchup. The backend sends `{}` when unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub abbr: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

// ---------------------------------------------------------------------------
// Matchup
// ---------------------------------------------------------------------------

/// Stat key → raw value. Keys keep the backend's short vocabulary (`avg`, `hr`, `era`).
pub type StatRecord = BTreeMap<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub headshot: Option<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub team: TeamRef,
    #[serde(default, deserialize_with = "null_default")]
    pub season_stats: StatRecord,
    #[serde(default, deserialize_with = "null_default")]
    pub career_stats: StatRecord,
}

impl PlayerMatchup {
    /// The backend names an unassigned pitcher `N/A` instead of omitting it.
    pub fn is_announced(&self) -> bool {
        match self.name.as_deref().map(str::trim) {
            None | Some("") | Some("N/A") => false,
            Some(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupProp {
    #[serde(rename = "type", default)]
    pub prop_type: Option<String>,
    #[serde(default)]
    pub odds: Value,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub line: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchupResponse {
    #[serde(default)]
    pub batter: Option<PlayerMatchup>,
    #[serde(default)]
    pub pitcher: Option<PlayerMatchup>,
    #[serde(default, deserialize_with = "null_default")]
    pub prop: MatchupProp,
}

// ---------------------------------------------------------------------------
// Standings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    #[serde(default)]
    pub team_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_default")]
    pub team_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub team_abbr: String,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub wins: Value,
    #[serde(default)]
    pub losses: Value,
    #[serde(default)]
    pub winning_pct: Value,
    #[serde(default)]
    pub games_behind: Value,
    #[serde(default)]
    pub streak: Option<String>,
    #[serde(default)]
    pub wildcard_rank: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayoffPicture {
    #[serde(default, deserialize_with = "null_default")]
    pub division_leaders: Vec<TeamStanding>,
    #[serde(default, deserialize_with = "null_default")]
    pub wild_cards: Vec<TeamStanding>,
    #[serde(default, deserialize_with = "null_default")]
    pub in_hunt: Vec<TeamStanding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandingsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub divisions: BTreeMap<String, Vec<TeamStanding>>,
    /// Keyed by league (`AL`, `NL`).
    #[serde(default, deserialize_with = "null_default")]
    pub playoffs: BTreeMap<String, PlayoffPicture>,
}

// ---------------------------------------------------------------------------
// Game odds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default)]
    pub game_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_default")]
    pub home_team: String,
    #[serde(default, deserialize_with = "null_default")]
    pub away_team: String,
    #[serde(default)]
    pub commence_time: Option<String>,
    #[serde(default)]
    pub bookmaker: Option<String>,
    #[serde(default)]
    pub home_odds: Value,
    #[serde(default)]
    pub away_odds: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameOddsResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub games: Vec<Game>,
    #[serde(default)]
    pub total: Option<i64>,
}

// ---------------------------------------------------------------------------
// Stat leaders
// ---------------------------------------------------------------------------

/// Which leaderboard endpoint a category is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderScope {
    Individual,
    Team,
}

impl LeaderScope {
    pub fn path_segment(&self) -> &'static str {
        match self {
            LeaderScope::Individual => "individual",
            LeaderScope::Team => "teams",
        }
    }
}

impl std::fmt::Display for LeaderScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderScope::Individual => write!(f, "individual"),
            LeaderScope::Team => write!(f, "team"),
        }
    }
}

/// A leaderboard category. Accepts either a bare key string or
/// `{ key, name|label }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr")]
pub struct LeaderCategory {
    pub key: String,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Key(String),
    Full {
        key: String,
        #[serde(default, alias = "label", alias = "display_name")]
        name: Option<String>,
    },
}

impl From<CategoryRepr> for LeaderCategory {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::Key(key) => LeaderCategory { name: key.clone(), key },
            CategoryRepr::Full { key, name } => LeaderCategory {
                name: name.filter(|n| !n.is_empty()).unwrap_or_else(|| key.clone()),
                key,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub batting: Vec<LeaderCategory>,
    #[serde(default, deserialize_with = "null_default")]
    pub pitching: Vec<LeaderCategory>,
    #[serde(default, deserialize_with = "null_default")]
    pub team: Vec<LeaderCategory>,
}

impl CategoriesResponse {
    /// All categories in display order with the scope they are fetched from.
    pub fn flatten(&self) -> Vec<(LeaderScope, LeaderCategory)> {
        self.batting
            .iter()
            .chain(self.pitching.iter())
            .map(|c| (LeaderScope::Individual, c.clone()))
            .chain(self.team.iter().map(|c| (LeaderScope::Team, c.clone())))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderEntry {
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(default)]
    pub player_id: Option<EntityId>,
    #[serde(default)]
    pub player_name: Option<String>,
    #[serde(default)]
    pub team_id: Option<EntityId>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_abbr: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl LeaderEntry {
    pub fn display_name(&self) -> &str {
        self.player_name
            .as_deref()
            .or(self.team_name.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadersResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub results: Vec<LeaderEntry>,
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

/// Treat an explicit `null` like a missing field.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers, numeric strings, `null` and `""` (the matchup endpoint sends `""`
/// for a missing line). Anything else is dropped to `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    })
}
