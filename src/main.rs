mod config;
mod error;
mod fetcher;
mod format;
mod runtime;
mod state;
mod tui;
mod types;

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Mode};
use crate::error::{AppError, Result};
use crate::fetcher::ApiClient;
use crate::format::{format_odds, format_timestamp, prop_label, resolve_line};
use crate::runtime::run_until_idle;
use crate::state::{FilterState, Msg, Remote, ViewState};
use crate::types::Prop;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&cfg) {
        eprintln!("Logging setup failed: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// The UI owns the terminal, so TUI mode logs to a file; print mode keeps
/// stdout for the board and logs to stderr.
fn init_tracing(cfg: &Config) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::new(&cfg.log_level));
    match cfg.mode {
        Mode::Tui => {
            let file = OpenOptions::new().create(true).append(true).open(&cfg.log_file)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        Mode::Print => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn run(cfg: Config) -> Result<()> {
    let api = ApiClient::new(&cfg)?;
    let filter = FilterState::new(
        cfg.initial_team.clone(),
        cfg.initial_prop_type.clone(),
        cfg.initial_date,
    );
    info!(
        api = %cfg.api_url,
        mode = ?cfg.mode,
        date = %filter.date,
        "starting propboard"
    );

    match cfg.mode {
        Mode::Tui => tui::run(ViewState::new(filter), api).await,
        Mode::Print => print_board(ViewState::new(filter), &api).await,
    }
}

/// Load once, print the filtered board, exit.
async fn print_board(initial: ViewState, api: &ApiClient) -> Result<()> {
    let state = run_until_idle(initial, Msg::Init, api).await;
    if let Remote::Failed(reason) = &state.props {
        return Err(AppError::Unavailable { what: "prop listing", reason: reason.clone() });
    }

    let visible = state.visible_props();
    info!(shown = visible.len(), "printing prop board");
    for prop in visible {
        println!("{}", board_line(prop));
    }
    Ok(())
}

fn board_line(p: &Prop) -> String {
    format!(
        "{:<24} {:<4} {:<10} {:>4} {:>6}  {}",
        p.player_name.as_deref().unwrap_or("Unknown"),
        p.player_team_abbr,
        prop_label(&p.prop_type),
        resolve_line(&p.prop_type, p.line),
        format_odds(&p.odds),
        format_timestamp(p.date.as_deref()),
    )
}
