//! Rick and Morty TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rickmorty_tui::api_client::ApiClient;
use rickmorty_tui::config::TuiConfig;
use rickmorty_tui::error::TuiError;
use rickmorty_tui::events::TuiEvent;
use rickmorty_tui::fetch;
use rickmorty_tui::keys::{map_key, Action};
use rickmorty_tui::nav::Focus;
use rickmorty_tui::state::App;
use rickmorty_tui::views::render_view;
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    let api = ApiClient::new(&config)?;
    let mut app = App::new(config, api);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let tick_rate = Duration::from_millis(app.config.tick_interval_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        if let Some((generation, descriptor)) = app.take_fetch_request() {
            fetch::spawn_fetch(app.api.clone(), descriptor, generation, event_tx.clone());
        }

        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {
                app.on_tick(Instant::now());
            }
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

fn handle_event(app: &mut App, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(key, app.editing()) {
                return handle_action(app, action, Instant::now());
            }
        }
        TuiEvent::PageLoaded { generation, page } => {
            app.on_page_loaded(generation, page);
        }
        TuiEvent::FetchFailed { generation, message } => {
            app.on_fetch_failed(generation, message);
        }
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn handle_action(app: &mut App, action: Action, now: Instant) -> bool {
    if app.overlay_open() {
        match action {
            Action::Quit => return true,
            Action::Cancel | Action::Confirm | Action::Select => {
                app.close_overlay();
            }
            _ => {}
        }
        return false;
    }

    match action {
        Action::Quit => return true,
        Action::NextFocus => app.focus = app.focus.next(),
        Action::PrevFocus => app.focus = app.focus.previous(),
        Action::InsertChar(ch) => app.insert_char(ch, now),
        Action::DeleteChar => app.delete_char(now),
        Action::MoveUp => match app.focus {
            Focus::Results => app.results.select_previous(),
            focus if focus.is_select() => app.cycle_selection(false),
            _ => {}
        },
        Action::MoveDown => match app.focus {
            Focus::Results => app.results.select_next(),
            focus if focus.is_select() => app.cycle_selection(true),
            _ => {}
        },
        Action::MoveLeft => match app.focus {
            Focus::Results => app.prev_page(),
            focus if focus.is_select() => app.cycle_selection(false),
            _ => {}
        },
        Action::MoveRight => match app.focus {
            Focus::Results => app.next_page(),
            focus if focus.is_select() => app.cycle_selection(true),
            _ => {}
        },
        Action::Select => match app.focus {
            Focus::Results => app.open_details(),
            focus if focus.is_select() => app.cycle_selection(true),
            _ => {}
        },
        Action::Confirm => {
            if app.focus == Focus::Results {
                app.open_details();
            } else {
                app.focus = app.focus.next();
            }
        }
        Action::Cancel => app.focus = Focus::Results,
        Action::NextPage => app.next_page(),
        Action::PrevPage => app.prev_page(),
        Action::ClearFilters => app.clear_filters(),
        Action::Refresh => app.request_refresh(),
        Action::ToggleTheme => app.toggle_theme(),
        Action::OpenHelp => app.help_open = true,
    }
    false
}
