mod app;
mod components;
mod draw;
mod keys;
mod route;
mod state;
mod ui;

use crate::app::App;
use crate::route::Route;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use hoop_api::client::FilmApi;
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::{Duration, Instant};
use tui::{Terminal, backend::CrosstermBackend};

const PLAYBACK_TICK: Duration = Duration::from_millis(80);

enum CliAction {
    Run(Route),
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let initial_route = match handle_cli_args() {
        CliAction::Run(route) => route,
        CliAction::Exit => return Ok(()),
    };

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let settings = AppSettings::load();
    let api = FilmApi::new(settings.bucket.clone(), settings.roster.clone());
    let app = Arc::new(Mutex::new(App::new(settings)));
    info!("starting at {initial_route}");

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(api, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Playback clock, 80ms
    let tick_tx = ui_event_tx.clone();
    let playback_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(PLAYBACK_TICK);
        loop {
            interval.tick().await;
            if tick_tx.send(UiEvent::PlaybackTick).await.is_err() {
                break;
            }
        }
    });

    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(
        terminal,
        app,
        initial_route,
        ui_event_rx,
        network_req_tx,
        network_resp_rx,
    )
    .await;

    input_handler.abort();
    network_task.abort();
    playback_task.abort();

    Ok(())
}

fn handle_cli_args() -> CliAction {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return CliAction::Run(Route::Roster);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            CliAction::Exit
        }
        "-V" | "--version" => {
            println!("hoop {}", env!("CARGO_PKG_VERSION"));
            CliAction::Exit
        }
        path => match Route::parse(path) {
            Some(route) if args.next().is_none() => CliAction::Run(route),
            _ => {
                eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
                std::process::exit(2);
            }
        },
    }
}

fn usage_text() -> &'static str {
    "hoop - basketball player stats and game film viewer

Usage:
  hoop [PATH]
  hoop --help
  hoop --version

Paths:
  /                             player roster (default)
  /player/<slug>                a player's games
  /player/<slug>/<game-slug>    game film for one player and game

Environment:
  HOOP_BUCKET_ROOT    Film bucket root (default https://f005.backblazeb2.com/file/game-films)
  HOOP_PLAYERS_JSON   Roster URL or local file (default http://localhost:3000/players.json)
  HOOP_VIDEO_PLAYER   Command used to open clips, e.g. mpv
  HOOP_LOG            Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    initial_route: Route,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();
    let mut initial_route = Some(initial_route);
    let mut last_tick = Instant::now();

    loop {
        let should_redraw = tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let changed = handle_ui_event(
                    ui_event,
                    &app,
                    &network_requests,
                    &mut initial_route,
                    &mut last_tick,
                )
                .await;
                // spinner frames drive redraws while a request is in flight
                changed && !loading.is_loading
            }
            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await
            }
            else => break,
        };

        if should_redraw {
            let mut app_guard = app.lock().await;
            draw::draw(&mut terminal, &mut app_guard, loading);
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    initial_route: &mut Option<Route>,
    last_tick: &mut Instant,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let route = initial_route.take().unwrap_or_default();
            let request = app.lock().await.navigate(route);
            keys::dispatch(network_requests, request);
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::PlaybackTick => {
            let now = Instant::now();
            let elapsed = now - *last_tick;
            *last_tick = now;
            app.lock().await.advance_playback(elapsed)
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::RosterLoaded { ticket, players } => {
            app.lock().await.on_roster_loaded(ticket, players);
        }
        NetworkResponse::PlayerGamesLoaded { ticket, player, cards } => {
            app.lock().await.on_player_games_loaded(ticket, player, cards);
        }
        NetworkResponse::GameFilmLoaded { ticket, film } => {
            app.lock().await.on_game_film_loaded(ticket, film);
        }
        NetworkResponse::Error { ticket, message } => {
            error!("Network error: {message}");
            app.lock().await.on_error(ticket, message);
        }
    }
    !loading.is_loading
}

/// Blocking crossterm reads run on the blocking pool so they never stall the
/// runtime's worker threads.
async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    let reader = tokio::task::spawn_blocking(move || {
        while let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => UiEvent::KeyPressed(key_event),
                Event::Resize(_, _) => UiEvent::Resize,
                _ => continue,
            };
            if ui_events.blocking_send(ui_event).is_err() {
                break;
            }
        }
    });
    if let Err(e) = reader.await {
        error!("input reader stopped: {e}");
    }
}

fn setup_terminal() -> io::Result<()> {
    execute!(
        io::stdout(),
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    )?;
    terminal::enable_raw_mode()
}

/// Restore the terminal. Also called from the quit key and the panic hook, so
/// failures are ignored.
pub fn cleanup_terminal() {
    let _ = execute!(
        io::stdout(),
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
