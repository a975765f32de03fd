use crate::app::App;
use crate::state::app_state::View;
use crate::state::messages::NetworkRequest;
use crate::state::playback::SeekDirection;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::warn;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ViewKind {
    Roster,
    PlayerGames,
    GameDetail,
}

impl From<&View> for ViewKind {
    fn from(view: &View) -> Self {
        match view {
            View::Roster(_) => ViewKind::Roster,
            View::PlayerGames(_) => ViewKind::PlayerGames,
            View::GameDetail(_) => ViewKind::GameDetail,
        }
    }
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    if key_event.kind == KeyEventKind::Release {
        return;
    }

    let mut guard = app.lock().await;
    let mut request = None;

    if guard.state.show_help {
        match (key_event.code, key_event.modifiers) {
            (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (Char('?') | KeyCode::Esc, _) => guard.toggle_help(),
            _ => {}
        }
        return;
    }

    let kind = ViewKind::from(&guard.state.view);
    let seek_keys = guard.state.hotkeys.seek_enabled();

    match (kind, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Seek every playing clip while a view holds the binding
        (_, KeyCode::Left, _) if seek_keys => guard.seek_playing_videos(SeekDirection::Back),
        (_, KeyCode::Right, _) if seek_keys => guard.seek_playing_videos(SeekDirection::Forward),

        // Card grids
        (ViewKind::Roster | ViewKind::PlayerGames, Char('h') | KeyCode::Left, _) => {
            grid_move(&mut guard.state.view, GridMove::Left)
        }
        (ViewKind::Roster | ViewKind::PlayerGames, Char('l') | KeyCode::Right, _) => {
            grid_move(&mut guard.state.view, GridMove::Right)
        }
        (ViewKind::Roster | ViewKind::PlayerGames, Char('k') | KeyCode::Up, _) => {
            grid_move(&mut guard.state.view, GridMove::Up)
        }
        (ViewKind::Roster | ViewKind::PlayerGames, Char('j') | KeyCode::Down, _) => {
            grid_move(&mut guard.state.view, GridMove::Down)
        }
        (ViewKind::Roster | ViewKind::PlayerGames, KeyCode::Enter, _) => {
            request = guard.open_selected();
        }

        // Game detail
        (ViewKind::GameDetail, KeyCode::Tab | KeyCode::BackTab | Char('j') | Char('k'), _) => {
            if let View::GameDetail(detail) = &mut guard.state.view {
                detail.toggle_focus();
            }
        }
        (ViewKind::GameDetail, Char('h'), _) => {
            if let View::GameDetail(detail) = &mut guard.state.view {
                detail.cursor_prev();
            }
        }
        (ViewKind::GameDetail, Char('l'), _) => {
            if let View::GameDetail(detail) = &mut guard.state.view {
                detail.cursor_next();
            }
        }
        (ViewKind::GameDetail, KeyCode::Enter, _) => {
            if let View::GameDetail(detail) = &mut guard.state.view {
                detail.activate_cursor();
            }
        }
        (ViewKind::GameDetail, Char(' ') | Char('p'), _) => guard.toggle_focused_video(),
        (ViewKind::GameDetail, Char('o'), _) => guard.open_focused_video(),

        // Global
        (_, Char('r'), _) => request = Some(guard.reload()),
        (_, KeyCode::Esc | KeyCode::Backspace | Char('b'), _) => request = guard.back(),
        (_, Char('?'), _) => guard.toggle_help(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        dispatch(network_requests, request);
    }
}

/// Hand a request to the network worker without parking the UI loop on a
/// full channel. The worker supersedes stale requests, so a dropped one is
/// only logged.
pub fn dispatch(network_requests: &mpsc::Sender<NetworkRequest>, request: NetworkRequest) {
    if let Err(e) = network_requests.try_send(request) {
        warn!("dropped network request: {e}");
    }
}

#[derive(Copy, Clone)]
enum GridMove {
    Left,
    Right,
    Up,
    Down,
}

fn grid_move(view: &mut View, step: GridMove) {
    let (cursor, len) = match view {
        View::Roster(roster) => {
            let len = roster.len();
            (&mut roster.cursor, len)
        }
        View::PlayerGames(games) => {
            let len = games.len();
            (&mut games.cursor, len)
        }
        View::GameDetail(_) => return,
    };
    match step {
        GridMove::Left => cursor.left(),
        GridMove::Right => cursor.right(len),
        GridMove::Up => cursor.up(),
        GridMove::Down => cursor.down(len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::state::app_settings::AppSettings;
    use hoop_api::{GameFilm, Player, Stint};
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn player(slug: &str) -> Player {
        Player {
            name: slug.replace('_', " "),
            slug: slug.into(),
            team: "Duke".into(),
            team_color: None,
            games: vec![],
        }
    }

    fn roster_app() -> Arc<Mutex<App>> {
        let mut app = App::new(AppSettings::default());
        let ticket = app.navigate(Route::Roster).ticket();
        app.on_roster_loaded(ticket, vec![player("A_One"), player("B_Two"), player("C_Three")]);
        Arc::new(Mutex::new(app))
    }

    fn roster_selection(app: &App) -> usize {
        let View::Roster(roster) = &app.state.view else { panic!("expected roster view") };
        roster.cursor.selected
    }

    #[tokio::test]
    async fn arrows_move_the_grid_cursor_outside_the_game_view() {
        let app = roster_app();
        let (tx, _rx) = mpsc::channel(4);

        handle_key_bindings(press(KeyCode::Right), &app, &tx).await;
        assert_eq!(roster_selection(&*app.lock().await), 1);
        handle_key_bindings(press(KeyCode::Down), &app, &tx).await;
        assert_eq!(roster_selection(&*app.lock().await), 2);
        handle_key_bindings(press(Char('h')), &app, &tx).await;
        assert_eq!(roster_selection(&*app.lock().await), 1);
    }

    #[tokio::test]
    async fn key_releases_are_ignored() {
        let app = roster_app();
        let (tx, _rx) = mpsc::channel(4);

        let mut release = press(KeyCode::Right);
        release.kind = KeyEventKind::Release;
        handle_key_bindings(release, &app, &tx).await;
        assert_eq!(roster_selection(&*app.lock().await), 0);
    }

    #[tokio::test]
    async fn arrows_seek_the_playing_clip_in_the_game_view() {
        let mut app = App::new(AppSettings::default());
        let ticket = app
            .navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() })
            .ticket();
        let film = GameFilm {
            stints: vec![Stint { id: 1, half: "1st".into(), start: "20:00".into(), end: "15:00".into() }],
            ..Default::default()
        };
        app.on_game_film_loaded(ticket, film);
        let app = Arc::new(Mutex::new(app));
        let (tx, _rx) = mpsc::channel(4);

        handle_key_bindings(press(Char(' ')), &app, &tx).await;
        handle_key_bindings(press(KeyCode::Right), &app, &tx).await;
        handle_key_bindings(press(KeyCode::Right), &app, &tx).await;
        handle_key_bindings(press(KeyCode::Left), &app, &tx).await;

        let guard = app.lock().await;
        let View::GameDetail(detail) = &guard.state.view else { panic!("expected game view") };
        assert!(detail.primary.is_playing());
        assert_eq!(detail.primary.position(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn enter_on_the_roster_sends_a_player_request() {
        let app = roster_app();
        let (tx, mut rx) = mpsc::channel(4);

        handle_key_bindings(press(KeyCode::Right), &app, &tx).await;
        handle_key_bindings(press(KeyCode::Enter), &app, &tx).await;

        let request = rx.try_recv().unwrap();
        assert!(matches!(request, NetworkRequest::LoadPlayerGames { ref slug, .. } if slug == "B_Two"));
        assert_eq!(app.lock().await.state.route, Route::Player { slug: "B_Two".into() });
    }

    #[test]
    fn dispatch_drops_instead_of_blocking_on_a_full_channel() {
        let (tx, mut rx) = mpsc::channel(1);
        dispatch(&tx, NetworkRequest::LoadRoster { ticket: Default::default() });
        dispatch(&tx, NetworkRequest::LoadRoster { ticket: Default::default() });

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
