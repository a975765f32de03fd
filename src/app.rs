use crate::route::Route;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{
    AppState, GameDetailState, LoadState, PlayerGames, PlayerGamesState, RosterState, Ticket,
    View,
};
use crate::state::messages::NetworkRequest;
use crate::state::playback::SeekDirection;
use chrono::Local;
use hoop_api::{GameCard, GameFilm, Player};
use log::{debug, info, warn};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self { state: AppState::default(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Switch to `route` with fresh state and return the request that loads
    /// it. Every navigation takes a new ticket so late responses for the page
    /// being left are ignored.
    pub fn navigate(&mut self, route: Route) -> NetworkRequest {
        let ticket = self.state.ticket.next();
        self.state.ticket = ticket;
        self.state.status = None;
        debug!("navigating to {route} (ticket {})", ticket.0);

        // Replacing the view drops the old one, and with it any key bindings it
        // held, before the new one subscribes.
        self.state.view = View::default();
        let (view, request) = match &route {
            Route::Roster => (
                View::Roster(RosterState::default()),
                NetworkRequest::LoadRoster { ticket },
            ),
            Route::Player { slug } => (
                View::PlayerGames(PlayerGamesState::new(slug.clone())),
                NetworkRequest::LoadPlayerGames { ticket, slug: slug.clone() },
            ),
            Route::Game { player_slug, game_slug } => (
                View::GameDetail(GameDetailState::new(
                    &self.settings.bucket,
                    player_slug.clone(),
                    game_slug.clone(),
                    &self.state.hotkeys,
                )),
                NetworkRequest::LoadGameFilm {
                    ticket,
                    player_slug: player_slug.clone(),
                    game_slug: game_slug.clone(),
                },
            ),
        };
        self.state.view = view;
        self.state.route = route;
        request
    }

    pub fn reload(&mut self) -> NetworkRequest {
        self.navigate(self.state.route.clone())
    }

    pub fn back(&mut self) -> Option<NetworkRequest> {
        let parent = self.state.route.parent()?;
        Some(self.navigate(parent))
    }

    /// Follow the selected card: roster card to player, game card to game.
    pub fn open_selected(&mut self) -> Option<NetworkRequest> {
        let route = match &self.state.view {
            View::Roster(roster) => Route::Player { slug: roster.selected_player()?.slug.clone() },
            View::PlayerGames(games) => Route::Game {
                player_slug: games.slug.clone(),
                game_slug: games.selected_card()?.game.slug.clone(),
            },
            View::GameDetail(_) => return None,
        };
        Some(self.navigate(route))
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    fn is_current(&self, ticket: Ticket) -> bool {
        if ticket != self.state.ticket {
            debug!("dropping stale response (ticket {} != {})", ticket.0, self.state.ticket.0);
            return false;
        }
        true
    }

    fn mark_loaded(&mut self) {
        self.state.loaded_at = Some(Local::now().format("%H:%M").to_string());
    }

    pub fn on_roster_loaded(&mut self, ticket: Ticket, players: Vec<Player>) {
        if !self.is_current(ticket) {
            return;
        }
        if let View::Roster(roster) = &mut self.state.view {
            info!("loaded {} players", players.len());
            roster.players = LoadState::Ready(players);
            roster.cursor.selected = 0;
            self.mark_loaded();
        }
    }

    pub fn on_player_games_loaded(&mut self, ticket: Ticket, player: Player, cards: Vec<GameCard>) {
        if !self.is_current(ticket) {
            return;
        }
        if let View::PlayerGames(games) = &mut self.state.view {
            info!("loaded {} games for {}", cards.len(), player.slug);
            games.games = LoadState::Ready(PlayerGames { player, cards });
            games.cursor.selected = 0;
            self.mark_loaded();
        }
    }

    pub fn on_game_film_loaded(&mut self, ticket: Ticket, film: GameFilm) {
        if !self.is_current(ticket) {
            return;
        }
        if let View::GameDetail(detail) = &mut self.state.view {
            detail.load(film);
            self.mark_loaded();
        }
    }

    pub fn on_error(&mut self, ticket: Ticket, message: String) {
        if !self.is_current(ticket) {
            return;
        }
        match &mut self.state.view {
            View::Roster(roster) => roster.players = LoadState::Failed(message),
            View::PlayerGames(games) => games.games = LoadState::Failed(message),
            View::GameDetail(detail) => detail.film = LoadState::Failed(message),
        }
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    pub fn seek_playing_videos(&mut self, direction: SeekDirection) {
        if !self.state.hotkeys.seek_enabled() {
            return;
        }
        if let View::GameDetail(detail) = &mut self.state.view {
            detail.seek_playing(direction);
        }
    }

    /// Returns whether any clip position moved, i.e. whether to redraw.
    pub fn advance_playback(&mut self, elapsed: Duration) -> bool {
        match &mut self.state.view {
            View::GameDetail(detail) => detail.advance_playback(elapsed),
            _ => false,
        }
    }

    pub fn toggle_focused_video(&mut self) {
        if let View::GameDetail(detail) = &mut self.state.view {
            detail.focused_player_mut().toggle();
        }
    }

    /// Hand the focused clip to `HOOP_VIDEO_PLAYER`. The in-app transport is
    /// paused so the two clocks don't run side by side.
    pub fn open_focused_video(&mut self) {
        let View::GameDetail(detail) = &mut self.state.view else {
            return;
        };
        let Some(src) = detail.focused_player().src().map(str::to_owned) else {
            return;
        };
        let Some(command) = self.settings.video_player.as_deref() else {
            self.state.status = Some(format!("Set HOOP_VIDEO_PLAYER to open {src}"));
            return;
        };

        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return;
        };
        let spawned = Command::new(program)
            .args(parts)
            .arg(&src)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        self.state.status = match spawned {
            Ok(mut child) => {
                info!("opened {src} with {program}");
                let label = program.to_owned();
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) => debug!("{label} exited with {status}"),
                        Err(e) => warn!("could not wait on {label}: {e}"),
                    }
                });
                let player = detail.focused_player_mut();
                if player.is_playing() {
                    player.toggle();
                }
                Some(format!("Opened in {program}"))
            }
            Err(e) => {
                warn!("could not launch {program}: {e}");
                Some(format!("Could not launch {program}: {e}"))
            }
        };
    }

    // -----------------------------------------------------------------------
    // Chrome
    // -----------------------------------------------------------------------

    pub fn toggle_help(&mut self) {
        self.state.show_help = !self.state.show_help;
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoop_api::{Game, StatClip, StatManifest, Stint};

    fn app() -> App {
        App::new(AppSettings::default())
    }

    fn player() -> Player {
        Player {
            name: "Cooper Flagg".into(),
            slug: "Cooper_Flagg".into(),
            team: "Duke".into(),
            team_color: Some("#003087".into()),
            games: vec![Game { name: "Duke @ UNC".into(), slug: "duke_unc".into() }],
        }
    }

    fn film() -> GameFilm {
        GameFilm {
            manifest: StatManifest {
                clips: vec![StatClip { category: "assists".into(), url: "a.mp4".into() }],
            },
            stints: vec![
                Stint { id: 1, half: "1st".into(), start: "20:00".into(), end: "15:00".into() },
                Stint { id: 2, half: "2nd".into(), start: "20:00".into(), end: "11:00".into() },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn navigation_issues_a_new_ticket_each_time() {
        let mut app = app();
        let first = app.navigate(Route::Roster);
        let second = app.reload();
        assert_ne!(first.ticket(), second.ticket());
        assert_eq!(app.state.ticket, second.ticket());
    }

    #[test]
    fn stale_responses_are_ignored() {
        let mut app = app();
        let old = app.navigate(Route::Player { slug: "Cooper_Flagg".into() }).ticket();
        let new = app.navigate(Route::Player { slug: "Other".into() }).ticket();

        app.on_player_games_loaded(old, player(), vec![]);
        let View::PlayerGames(games) = &app.state.view else { panic!("expected player view") };
        assert_eq!(games.games, LoadState::Loading);

        app.on_error(new, "Not found: no player with slug Other".into());
        let View::PlayerGames(games) = &app.state.view else { panic!("expected player view") };
        assert!(matches!(games.games, LoadState::Failed(_)));
    }

    #[test]
    fn open_selected_walks_roster_to_game() {
        let mut app = app();
        let ticket = app.navigate(Route::Roster).ticket();
        app.on_roster_loaded(ticket, vec![player()]);

        let request = app.open_selected().unwrap();
        assert!(matches!(request, NetworkRequest::LoadPlayerGames { ref slug, .. } if slug == "Cooper_Flagg"));

        let card = GameCard { game: player().games[0].clone(), ..Default::default() };
        app.on_player_games_loaded(request.ticket(), player(), vec![card]);
        app.open_selected().unwrap();
        assert_eq!(
            app.state.route,
            Route::Game { player_slug: "Cooper_Flagg".into(), game_slug: "duke_unc".into() }
        );
        assert!(app.state.hotkeys.seek_enabled());
    }

    #[test]
    fn leaving_the_game_view_releases_seek_keys() {
        let mut app = app();
        app.navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() });
        assert!(app.state.hotkeys.seek_enabled());

        app.back();
        assert_eq!(app.state.route, Route::Player { slug: "p".into() });
        assert!(!app.state.hotkeys.seek_enabled());
    }

    #[test]
    fn reloading_the_game_view_keeps_one_binding() {
        let mut app = app();
        app.navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() });
        app.reload();
        app.back();
        assert!(!app.state.hotkeys.seek_enabled());
    }

    #[test]
    fn switching_stints_leaves_stat_clip_alone() {
        let mut app = app();
        let ticket = app
            .navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() })
            .ticket();
        app.on_game_film_loaded(ticket, film());

        let View::GameDetail(detail) = &mut app.state.view else { panic!("expected game view") };
        detail.select_stint(2);
        assert!(detail.primary.src().unwrap().ends_with("/p/g/stints/stint_2.mp4"));
        assert_eq!(detail.active_stat.as_deref(), Some("assists"));
        assert_eq!(detail.secondary.src(), Some("a.mp4"));
    }

    #[test]
    fn seeking_is_a_no_op_outside_the_game_view() {
        let mut app = app();
        app.navigate(Route::Roster);
        app.seek_playing_videos(SeekDirection::Forward);
        assert!(!app.advance_playback(Duration::from_secs(1)));
    }

    #[test]
    fn open_without_player_command_sets_a_hint() {
        let mut app = app();
        app.navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() });
        app.open_focused_video();
        assert!(app.state.status.as_deref().unwrap().starts_with("Set HOOP_VIDEO_PLAYER"));
    }

    #[tokio::test]
    async fn opened_player_is_reaped_and_pauses_the_in_app_video() {
        let mut app = App::new(AppSettings { video_player: Some("true".into()), ..Default::default() });
        let ticket = app
            .navigate(Route::Game { player_slug: "p".into(), game_slug: "g".into() })
            .ticket();
        app.on_game_film_loaded(ticket, film());
        let View::GameDetail(detail) = &mut app.state.view else { panic!("expected game view") };
        detail.primary.toggle();

        app.open_focused_video();
        assert_eq!(app.state.status.as_deref(), Some("Opened in true"));
        let View::GameDetail(detail) = &app.state.view else { panic!("expected game view") };
        assert!(!detail.primary.is_playing());

        // the waiter task collects the exit status; nothing is left for init to reap
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
