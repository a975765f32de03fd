use crate::route::Route;
use crate::state::hotkeys::{Hotkeys, SeekSubscription};
use crate::state::playback::{SeekDirection, VideoPlayer};
use hoop_api::stats::DISPLAY_STATS;
use hoop_api::storage::{Bucket, GameAssets};
use hoop_api::{GameCard, GameFilm, Player, Stint};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Identifies one navigation. Responses carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

impl Ticket {
    pub fn next(self) -> Self {
        Ticket(self.0.wrapping_add(1))
    }
}

/// Selection in a card grid laid out row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    pub selected: usize,
    /// Cards per row, refreshed on every draw.
    pub columns: usize,
}

impl Default for GridCursor {
    fn default() -> Self {
        Self { selected: 0, columns: 1 }
    }
}

impl GridCursor {
    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn right(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn up(&mut self) {
        if self.selected >= self.columns.max(1) {
            self.selected -= self.columns.max(1);
        }
    }

    pub fn down(&mut self, len: usize) {
        let next = self.selected + self.columns.max(1);
        if next < len {
            self.selected = next;
        }
    }
}

// ---------------------------------------------------------------------------
// Roster view
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RosterState {
    pub players: LoadState<Vec<Player>>,
    pub cursor: GridCursor,
}

impl RosterState {
    pub fn selected_player(&self) -> Option<&Player> {
        self.players.ready()?.get(self.cursor.selected)
    }

    pub fn len(&self) -> usize {
        self.players.ready().map(Vec::len).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Player game view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerGames {
    pub player: Player,
    pub cards: Vec<GameCard>,
}

#[derive(Debug)]
pub struct PlayerGamesState {
    pub slug: String,
    pub games: LoadState<PlayerGames>,
    pub cursor: GridCursor,
}

impl PlayerGamesState {
    pub fn new(slug: String) -> Self {
        Self { slug, games: LoadState::Loading, cursor: GridCursor::default() }
    }

    pub fn selected_card(&self) -> Option<&GameCard> {
        self.games.ready()?.cards.get(self.cursor.selected)
    }

    pub fn len(&self) -> usize {
        self.games.ready().map(|g| g.cards.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Game detail view
// ---------------------------------------------------------------------------

/// Which button strip the cursor keys drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strip {
    #[default]
    Stints,
    Stats,
}

#[derive(Debug)]
pub struct GameDetailState {
    pub player_slug: String,
    pub game_slug: String,
    pub assets: GameAssets,
    pub film: LoadState<GameFilm>,
    pub active_stint: u32,
    pub active_stat: Option<String>,
    pub focus: Strip,
    pub stint_cursor: usize,
    pub stat_cursor: usize,
    /// Stint clip.
    pub primary: VideoPlayer,
    /// Stat clip.
    pub secondary: VideoPlayer,
    _seek_keys: SeekSubscription,
}

impl GameDetailState {
    pub fn new(bucket: &Bucket, player_slug: String, game_slug: String, hotkeys: &Hotkeys) -> Self {
        let assets = bucket.game(&player_slug, &game_slug);
        let mut primary = VideoPlayer::default();
        primary.load(assets.stint_clip(1));
        Self {
            player_slug,
            game_slug,
            assets,
            film: LoadState::Loading,
            active_stint: 1,
            active_stat: None,
            focus: Strip::Stints,
            stint_cursor: 0,
            stat_cursor: 0,
            primary,
            secondary: VideoPlayer::default(),
            _seek_keys: hotkeys.subscribe_seek(),
        }
    }

    /// Store loaded metadata and default the stat clip to the manifest's first
    /// category.
    pub fn load(&mut self, film: GameFilm) {
        let first = film.manifest.first_category().map(str::to_owned);
        self.film = LoadState::Ready(film);
        self.stint_cursor = self
            .stints()
            .iter()
            .position(|s| s.id == self.active_stint)
            .unwrap_or(0);
        if let Some(category) = first {
            self.select_stat(&category);
        }
    }

    pub fn stints(&self) -> &[Stint] {
        self.film.ready().map(|f| f.stints.as_slice()).unwrap_or(&[])
    }

    /// Preferred stat categories present in the manifest, in display order.
    pub fn display_stats(&self) -> Vec<&'static str> {
        let Some(film) = self.film.ready() else {
            return Vec::new();
        };
        DISPLAY_STATS
            .iter()
            .copied()
            .filter(|category| film.manifest.contains(category))
            .collect()
    }

    pub fn select_stint(&mut self, stint_id: u32) {
        self.active_stint = stint_id;
        self.primary.load(self.assets.stint_clip(stint_id));
    }

    pub fn select_stat(&mut self, category: &str) {
        let url = self
            .film
            .ready()
            .and_then(|f| f.manifest.get(category))
            .map(|clip| clip.url.clone())
            .unwrap_or_default();
        self.active_stat = Some(category.to_owned());
        self.secondary.load(url);
        if let Some(idx) = self.display_stats().iter().position(|c| *c == category) {
            self.stat_cursor = idx;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Strip::Stints => Strip::Stats,
            Strip::Stats => Strip::Stints,
        };
    }

    pub fn cursor_prev(&mut self) {
        match self.focus {
            Strip::Stints => self.stint_cursor = self.stint_cursor.saturating_sub(1),
            Strip::Stats => self.stat_cursor = self.stat_cursor.saturating_sub(1),
        }
    }

    pub fn cursor_next(&mut self) {
        match self.focus {
            Strip::Stints => {
                if self.stint_cursor + 1 < self.stints().len() {
                    self.stint_cursor += 1;
                }
            }
            Strip::Stats => {
                if self.stat_cursor + 1 < self.display_stats().len() {
                    self.stat_cursor += 1;
                }
            }
        }
    }

    /// Select whatever the cursor of the focused strip points at.
    pub fn activate_cursor(&mut self) {
        match self.focus {
            Strip::Stints => {
                if let Some(id) = self.stints().get(self.stint_cursor).map(|s| s.id) {
                    self.select_stint(id);
                }
            }
            Strip::Stats => {
                if let Some(category) = self.display_stats().get(self.stat_cursor).copied() {
                    self.select_stat(category);
                }
            }
        }
    }

    pub fn focused_player(&self) -> &VideoPlayer {
        match self.focus {
            Strip::Stints => &self.primary,
            Strip::Stats => &self.secondary,
        }
    }

    pub fn focused_player_mut(&mut self) -> &mut VideoPlayer {
        match self.focus {
            Strip::Stints => &mut self.primary,
            Strip::Stats => &mut self.secondary,
        }
    }

    /// Seek every clip that is currently playing, whichever strip has focus.
    pub fn seek_playing(&mut self, direction: SeekDirection) {
        for player in [&mut self.primary, &mut self.secondary] {
            if player.is_playing() {
                player.seek(direction);
            }
        }
    }

    pub fn advance_playback(&mut self, elapsed: Duration) -> bool {
        let primary = self.primary.advance(elapsed);
        let secondary = self.secondary.advance(elapsed);
        primary || secondary
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum View {
    Roster(RosterState),
    PlayerGames(PlayerGamesState),
    GameDetail(GameDetailState),
}

impl Default for View {
    fn default() -> Self {
        View::Roster(RosterState::default())
    }
}

#[derive(Debug, Default)]
pub struct AppState {
    pub route: Route,
    pub view: View,
    pub ticket: Ticket,
    pub hotkeys: Hotkeys,
    pub show_help: bool,
    pub show_logs: bool,
    /// Transient message for the header (external player launches, ...).
    pub status: Option<String>,
    /// `HH:MM` of the last successful load.
    pub loaded_at: Option<String>,
}
