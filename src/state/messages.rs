use crate::state::app_state::Ticket;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use hoop_api::{GameCard, GameFilm, Player};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadRoster {
        ticket: Ticket,
    },
    LoadPlayerGames {
        ticket: Ticket,
        slug: String,
    },
    LoadGameFilm {
        ticket: Ticket,
        player_slug: String,
        game_slug: String,
    },
}

impl NetworkRequest {
    pub fn ticket(&self) -> Ticket {
        match self {
            NetworkRequest::LoadRoster { ticket }
            | NetworkRequest::LoadPlayerGames { ticket, .. }
            | NetworkRequest::LoadGameFilm { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RosterLoaded { ticket: Ticket, players: Vec<Player> },
    PlayerGamesLoaded { ticket: Ticket, player: Player, cards: Vec<GameCard> },
    GameFilmLoaded { ticket: Ticket, film: GameFilm },
    Error { ticket: Ticket, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    PlaybackTick,
}
