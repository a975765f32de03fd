use crate::state::app_state::Ticket;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use hoop_api::client::{ApiResult, FilmApi};
use log::{debug, error, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';
const SPINNER_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Spinner frames pushed to the UI while a request is in flight. Dropping or
/// finishing it stops the animation task.
struct Spinner {
    task: JoinHandle<()>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl Spinner {
    async fn start(responses: mpsc::Sender<NetworkResponse>) -> Self {
        send_loading_state(&responses, true, SPINNER_CHARS[0]).await;

        let frames = responses.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(SPINNER_INTERVAL);
            interval.tick().await;
            for spinner_char in SPINNER_CHARS.iter().copied().cycle().skip(1) {
                interval.tick().await;
                send_loading_state(&frames, true, spinner_char).await;
            }
        });

        Self { task, responses }
    }

    /// Stop animating and leave either a blank or the error glyph behind.
    async fn finish(mut self, is_ok: bool) {
        self.task.abort();
        let _ = (&mut self.task).await;
        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        send_loading_state(&self.responses, false, spinner_char).await;
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn send_loading_state(
    responses: &mpsc::Sender<NetworkResponse>,
    is_loading: bool,
    spinner_char: char,
) {
    let loading_state = LoadingState { is_loading, spinner_char };
    let _ = responses.send(NetworkResponse::LoadingStateChanged { loading_state }).await;
}

pub struct NetworkWorker {
    client: FilmApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        client: FilmApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
        }
    }

    /// Every request is a new navigation, so a request still in flight when the
    /// next one arrives is stale and gets aborted rather than run to the end.
    pub async fn run(mut self) {
        let mut in_flight: Option<JoinHandle<()>> = None;

        while let Some(request) = self.requests.recv().await {
            if let Some(previous) = in_flight.take()
                && !previous.is_finished()
            {
                debug!("request {} supersedes the one in flight", request.ticket().0);
                previous.abort();
            }

            let client = self.client.clone();
            let responses = self.responses.clone();
            in_flight = Some(tokio::spawn(async move {
                serve(&client, request, &responses).await;
            }));
        }

        if let Some(last) = in_flight {
            last.abort();
        }
    }
}

async fn serve(
    client: &FilmApi,
    request: NetworkRequest,
    responses: &mpsc::Sender<NetworkResponse>,
) {
    let spinner = Spinner::start(responses.clone()).await;

    let ticket = request.ticket();
    let result = match request {
        NetworkRequest::LoadRoster { ticket } => load_roster(client, ticket).await,
        NetworkRequest::LoadPlayerGames { ticket, slug } => {
            load_player_games(client, ticket, slug).await
        }
        NetworkRequest::LoadGameFilm { ticket, player_slug, game_slug } => {
            load_game_film(client, ticket, player_slug, game_slug).await
        }
    };

    debug!("network request {} complete", ticket.0);
    spinner.finish(result.is_ok()).await;

    let response = result.unwrap_or_else(|err| {
        warn!("request {} failed: {err}", ticket.0);
        NetworkResponse::Error { ticket, message: err.to_string() }
    });

    if let Err(e) = responses.send(response).await {
        error!("Failed to send network response: {e}");
    }
}

async fn load_roster(client: &FilmApi, ticket: Ticket) -> ApiResult<NetworkResponse> {
    debug!("loading roster");
    let players = client.fetch_roster().await?;
    Ok(NetworkResponse::RosterLoaded { ticket, players })
}

async fn load_player_games(
    client: &FilmApi,
    ticket: Ticket,
    slug: String,
) -> ApiResult<NetworkResponse> {
    debug!("loading games for {slug}");
    let player = client.fetch_player(&slug).await?;
    let cards = client.fetch_game_cards(&player).await;
    Ok(NetworkResponse::PlayerGamesLoaded { ticket, player, cards })
}

async fn load_game_film(
    client: &FilmApi,
    ticket: Ticket,
    player_slug: String,
    game_slug: String,
) -> ApiResult<NetworkResponse> {
    debug!("loading film for {player_slug} / {game_slug}");
    let film = client.fetch_game_film(&player_slug, &game_slug).await?;
    Ok(NetworkResponse::GameFilmLoaded { ticket, film })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoop_api::client::RosterSource;
    use hoop_api::storage::Bucket;
    use std::time::Duration;

    fn roster_file() -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("hoop-worker-{}.json", std::process::id()));
        std::fs::write(&path, r#"[{"name": "Cooper Flagg", "slug": "Cooper_Flagg", "team": "Duke"}]"#)
            .unwrap();
        path
    }

    #[tokio::test]
    async fn newer_request_does_not_wait_behind_a_stalled_one() {
        let path = roster_file();
        // unroutable bucket: the film request hangs until its own timeout
        let api = FilmApi::new(
            Bucket::parse("http://10.255.255.1/films").unwrap(),
            RosterSource::File(path.clone()),
        );
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx
            .send(NetworkRequest::LoadGameFilm {
                ticket: Ticket(1),
                player_slug: "Cooper_Flagg".into(),
                game_slug: "g1".into(),
            })
            .await
            .unwrap();
        req_tx.send(NetworkRequest::LoadRoster { ticket: Ticket(2) }).await.unwrap();

        let loaded = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(response) = resp_rx.recv().await {
                if let NetworkResponse::RosterLoaded { ticket, players } = response {
                    return Some((ticket, players.len()));
                }
            }
            None
        })
        .await
        .expect("roster response arrived before the film request timed out");

        assert_eq!(loaded, Some((Ticket(2), 1)));
        worker.abort();
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn failures_carry_the_request_ticket() {
        let api = FilmApi::new(
            Bucket::default(),
            RosterSource::File(std::env::temp_dir().join("hoop-missing-roster.json")),
        );
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = tokio::spawn(NetworkWorker::new(api, req_rx, resp_tx).run());

        req_tx.send(NetworkRequest::LoadRoster { ticket: Ticket(7) }).await.unwrap();

        let mut error_ticket = None;
        while let Some(response) = resp_rx.recv().await {
            if let NetworkResponse::Error { ticket, .. } = response {
                error_ticket = Some(ticket);
                break;
            }
        }
        assert_eq!(error_ticket, Some(Ticket(7)));
        worker.abort();
    }
}
