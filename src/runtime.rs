use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::error::{AppError, Result};
use crate::fetcher::ApiClient;
use crate::state::view::{update, Effect, Msg, ViewState};

/// Errors enter the view state as the failed region's message.
fn region_result<T>(what: &str, result: Result<T>) -> std::result::Result<T, String> {
    result.map_err(|e: AppError| {
        if e.is_fetch_failure() {
            warn!("{what} fetch failed: {e}");
        } else {
            error!("{what} response unreadable: {e}");
        }
        e.to_string()
    })
}

/// Execute one effect against the backend and turn the outcome into the
/// message that reports it. Never fails; failures travel inside the message.
pub async fn run_effect(effect: Effect, api: &ApiClient) -> Msg {
    debug!(?effect, "effect start");
    match effect {
        Effect::LoadProps { generation, date } => Msg::PropsLoaded {
            generation,
            result: region_result("prop listing", api.fetch_props(date).await),
        },
        Effect::LoadTeams => Msg::TeamsLoaded(region_result("team directory", api.fetch_teams().await)),
        Effect::LoadMatchup { generation, prop_id } => {
            let result = region_result("matchup", api.fetch_matchup(&prop_id).await);
            Msg::MatchupLoaded { generation, prop_id, result }
        }
        Effect::LoadStandings { generation } => Msg::StandingsLoaded {
            generation,
            result: region_result("standings", api.fetch_standings().await),
        },
        Effect::LoadGameOdds { generation } => Msg::GameOddsLoaded {
            generation,
            result: region_result("game odds", api.fetch_game_odds().await),
        },
        Effect::LoadCategories { generation } => Msg::CategoriesLoaded {
            generation,
            result: region_result("leader categories", api.fetch_leader_categories().await),
        },
        Effect::LoadLeaders { generation, scope, category } => Msg::LeadersLoaded {
            generation,
            result: region_result("leaderboard", api.fetch_leaders(scope, &category).await),
        },
    }
}

/// Run each effect on its own task; results come back to the event loop
/// over `tx`. A closed channel means the loop has exited, so the result is
/// dropped.
pub fn spawn_effects(effects: Vec<Effect>, api: &ApiClient, tx: &mpsc::Sender<Msg>) {
    for effect in effects {
        let api = api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let msg = run_effect(effect, &api).await;
            if tx.send(msg).await.is_err() {
                debug!("event loop gone, dropping fetch result");
            }
        });
    }
}

/// Seed with `init` and drain effects sequentially until none remain.
pub async fn run_until_idle(state: ViewState, init: Msg, api: &ApiClient) -> ViewState {
    let (mut state, mut effects) = update(state, init);
    while !effects.is_empty() {
        let effect = effects.remove(0);
        let msg = run_effect(effect, api).await;
        let (next, more) = update(state, msg);
        state = next;
        effects.extend(more);
    }
    state
}
