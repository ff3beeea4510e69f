use crate::error::{AppError, Result};
use crate::types::DateFilter;

pub const API_URL: &str = "http://localhost:5000";

/// Listing page size sent as `per_page` on `/api/props`.
pub const PROPS_PER_PAGE: usize = 200;

/// Leaderboard size sent as `limit` on the stat-leader endpoints.
pub const LEADER_LIMIT: usize = 10;

/// Per-request HTTP timeout (seconds).
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Channel capacity for fetch results flowing back into the event loop.
pub const CHANNEL_CAPACITY: usize = 64;

/// UI poll interval (milliseconds) between input checks and redraws.
pub const TICK_MS: u64 = 100;

/// Static asset conventions served by the backend.
pub mod assets {
    pub const HEADSHOT_DIR: &str = "/static/headshots";
    pub const HEADSHOT_PLACEHOLDER: &str = "/static/headshots/placeholder.png";
    pub const TEAM_LOGO_DIR: &str = "/static/team_logos";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Interactive terminal dashboard.
    Tui,
    /// Load once, print the prop board to stdout, exit.
    Print,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub mode: Mode,
    pub log_level: String,
    /// Log destination while the terminal is owned by the UI (LOG_FILE)
    pub log_file: String,
    pub props_per_page: usize,
    pub leader_limit: usize,
    pub request_timeout_secs: u64,
    /// Initial team filter (FILTER_TEAM), empty means unconstrained
    pub initial_team: Option<String>,
    /// Initial prop-type filter (FILTER_PROP_TYPE), empty means unconstrained
    pub initial_prop_type: Option<String>,
    pub initial_date: DateFilter,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("PROPBOARD_API_URL")
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| API_URL.to_string());

        let mode = match lookup("PROPBOARD_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("tui") => Mode::Tui,
            Some("print") => Mode::Print,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "PROPBOARD_MODE must be `tui` or `print`, got `{other}`"
                )))
            }
        };

        let initial_date = match lookup("FILTER_DATE").as_deref().map(str::trim) {
            None | Some("") => DateFilter::default(),
            Some(s) => s.parse::<DateFilter>().map_err(AppError::Config)?,
        };

        Ok(Self {
            api_url,
            mode,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_file: lookup("LOG_FILE").unwrap_or_else(|| "propboard.log".to_string()),
            props_per_page: parse_positive(&lookup, "PROPS_PER_PAGE", PROPS_PER_PAGE)?,
            leader_limit: parse_positive(&lookup, "LEADER_LIMIT", LEADER_LIMIT)?,
            request_timeout_secs: parse_positive(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                REQUEST_TIMEOUT_SECS as usize,
            )? as u64,
            initial_team: non_empty(lookup("FILTER_TEAM")),
            initial_prop_type: non_empty(lookup("FILTER_PROP_TYPE")),
            initial_date,
        })
    }
}

fn parse_positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(AppError::Config(format!(
                "{key} must be a positive integer, got `{raw}`"
            ))),
        },
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
