mod render;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use crate::config::{CHANNEL_CAPACITY, TICK_MS};
use crate::error::Result;
use crate::fetcher::ApiClient;
use crate::runtime::spawn_effects;
use crate::state::view::{update, Msg, Tab, ViewState};

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Own the terminal until the user quits. The terminal is restored on every
/// exit path out of the loop.
pub async fn run(initial: ViewState, api: ApiClient) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, initial, &api).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Quit,
    Msg(Msg),
}

fn map_key(code: KeyCode) -> Option<Input> {
    let msg = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Msg::Refresh,
        KeyCode::Tab => Msg::NextTab,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            Msg::SwitchTab(Tab::ALL[idx])
        }
        KeyCode::Down | KeyCode::Char('j') => Msg::MoveSelection(1),
        KeyCode::Up | KeyCode::Char('k') => Msg::MoveSelection(-1),
        KeyCode::PageDown => Msg::MoveSelection(10),
        KeyCode::PageUp => Msg::MoveSelection(-10),
        KeyCode::Enter => Msg::Activate,
        KeyCode::Char('t') => Msg::CycleTeam,
        KeyCode::Char('p') => Msg::CyclePropType,
        KeyCode::Char('d') => Msg::CycleDate,
        KeyCode::Char('c') => Msg::ClearFilters,
        _ => return None,
    };
    Some(Input::Msg(msg))
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    initial: ViewState,
    api: &ApiClient,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Msg>(CHANNEL_CAPACITY);
    let tick = Duration::from_millis(TICK_MS);
    let mut selection = render::Selection::default();

    let (mut state, effects) = update(initial, Msg::Init);
    spawn_effects(effects, api, &tx);

    loop {
        terminal.draw(|f| render::render(f, &state, api, &mut selection))?;

        if event::poll(tick)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key.code) {
                        Some(Input::Quit) => {
                            info!("quit requested");
                            return Ok(());
                        }
                        Some(Input::Msg(msg)) => {
                            let (next, effects) = update(state, msg);
                            state = next;
                            spawn_effects(effects, api, &tx);
                        }
                        None => {}
                    }
                }
            }
        }

        // Fetch results that arrived while waiting for input.
        while let Ok(msg) = rx.try_recv() {
            let (next, effects) = update(state, msg);
            state = next;
            spawn_effects(effects, api, &tx);
        }
    }
}
