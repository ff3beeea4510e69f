use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{assets, Config};
use crate::error::{AppError, Result};
use crate::types::{
    CategoriesResponse, DateFilter, EntityId, GameOddsResponse, LeaderScope, LeadersResponse,
    MatchupResponse, PropsPayload, PropsResponse, StandingsResponse, Team,
};

/// HTTP client for the props backend. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    per_page: usize,
    leader_limit: usize,
}

impl ApiClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: cfg.api_url.clone(),
            per_page: cfg.props_per_page,
            leader_limit: cfg.leader_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL under the base. Each segment is percent-encoded, so text
    /// ids cannot escape their path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Config(format!("invalid API URL `{}`: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("API URL `{}` cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the endpoint at `segments` with `query`, failing on non-2xx and
    /// decoding the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, ?query, "fetching");
        let resp = self.client.get(url.clone()).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Raw prop listing for one date window. Reconciliation happens in the view.
    pub async fn fetch_props(&self, date: DateFilter) -> Result<PropsResponse> {
        let query = [
            ("per_page", self.per_page.to_string()),
            ("date_filter", date.as_query().to_string()),
        ];
        let payload: PropsPayload = self.get_json(&["api", "props"], &query).await?;
        let listing = PropsResponse::from(payload);
        debug!(count = listing.results.len(), total = ?listing.total, %date, "prop listing loaded");
        Ok(listing)
    }

    pub async fn fetch_teams(&self) -> Result<Vec<Team>> {
        self.get_json(&["api", "teams"], &[]).await
    }

    pub async fn fetch_matchup(&self, prop_id: &EntityId) -> Result<MatchupResponse> {
        let id = prop_id.to_string();
        self.get_json(&["api", "prop", id.as_str(), "matchup"], &[]).await
    }

    pub async fn fetch_standings(&self) -> Result<StandingsResponse> {
        self.get_json(&["api", "standings"], &[]).await
    }

    /// Moneyline odds for the upcoming slate.
    pub async fn fetch_game_odds(&self) -> Result<GameOddsResponse> {
        let query = [("date_filter", DateFilter::Upcoming.as_query().to_string())];
        self.get_json(&["api", "game-odds"], &query).await
    }

    pub async fn fetch_leader_categories(&self) -> Result<CategoriesResponse> {
        self.get_json(&["api", "stat-leaders", "categories"], &[]).await
    }

    pub async fn fetch_leaders(&self, scope: LeaderScope, category: &str) -> Result<LeadersResponse> {
        let query = [
            ("category", category.to_string()),
            ("limit", self.leader_limit.to_string()),
        ];
        self.get_json(&["api", "stat-leaders", scope.path_segment()], &query).await
    }

    /// Headshot URL for an ESPN id; the placeholder when the id is missing
    /// or not numeric.
    pub fn headshot_url(&self, espn_id: Option<&EntityId>) -> String {
        match espn_id {
            Some(id) if id.is_numeric() => {
                format!("{}{}/{}.png", self.base_url, assets::HEADSHOT_DIR, id)
            }
            _ => format!("{}{}", self.base_url, assets::HEADSHOT_PLACEHOLDER),
        }
    }

    pub fn team_logo_url(&self, team_id: &EntityId) -> String {
        format!("{}{}/{}.svg", self.base_url, assets::TEAM_LOGO_DIR, team_id)
    }

    /// Backend-relative asset paths (`/static/...`) made absolute; absolute
    /// URLs pass through.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}
