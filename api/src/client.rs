use crate::stints::parse_stints;
use crate::storage::{Bucket, GameAssets};
use crate::wire::{RawManifest, RawPlayByPlay, RawPlayer, RawSummary};
use crate::{
    Game, GameCard, GameFilm, GameSummary, Logos, Play, PlayByPlay, Player, StatClip,
    StatManifest, Stint, Totals,
};
use futures_util::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_PLAYERS_URL: &str = "http://localhost:3000/players.json";

/// Where `players.json` comes from: the site that serves the viewer, or a
/// local snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    Url(String),
    File(PathBuf),
}

impl RosterSource {
    pub fn parse(source: &str) -> Self {
        let source = source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            RosterSource::Url(source.to_owned())
        } else {
            RosterSource::File(PathBuf::from(source))
        }
    }
}

impl Default for RosterSource {
    fn default() -> Self {
        RosterSource::Url(DEFAULT_PLAYERS_URL.to_owned())
    }
}

/// Client for the static film bucket and the roster file.
#[derive(Debug, Clone)]
pub struct FilmApi {
    client: Client,
    timeout: Duration,
    bucket: Bucket,
    roster: RosterSource,
}

impl Default for FilmApi {
    fn default() -> Self {
        Self::new(Bucket::default(), RosterSource::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Csv(csv::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Csv(e, url) => write!(f, "CSV error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FilmApi {
    pub fn new(bucket: Bucket, roster: RosterSource) -> Self {
        Self {
            client: Client::builder()
                .user_agent("hoop-discipline/0.1 (terminal film viewer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            bucket,
            roster,
        }
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    /// Fetch the full roster. Records without a slug are dropped.
    pub async fn fetch_roster(&self) -> ApiResult<Vec<Player>> {
        let raw: Vec<RawPlayer> = match &self.roster {
            RosterSource::Url(url) => self.get_json(url).await?,
            RosterSource::File(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    ApiError::NotFound(format!("could not read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    ApiError::Other(format!("invalid roster json at {}: {e}", path.display()))
                })?
            }
        };
        Ok(map_roster(raw))
    }

    /// Fetch the roster and pick out one player.
    pub async fn fetch_player(&self, slug: &str) -> ApiResult<Player> {
        self.fetch_roster()
            .await?
            .into_iter()
            .find(|p| p.slug == slug)
            .ok_or_else(|| ApiError::NotFound(format!("no player with slug {slug}")))
    }

    /// Build one card per game, fetching summaries and play-by-play for all
    /// games concurrently. A failed sub-fetch only blanks its own field; cards
    /// come back in the player's game order.
    pub async fn fetch_game_cards(&self, player: &Player) -> Vec<GameCard> {
        let loads = player
            .games
            .iter()
            .map(|game| self.fetch_game_card(&player.slug, game));
        join_all(loads).await
    }

    async fn fetch_game_card(&self, player_slug: &str, game: &Game) -> GameCard {
        let assets = self.bucket.game(player_slug, &game.slug);
        let (summary, pbp) = futures_util::join!(
            self.fetch_summary(&assets),
            self.fetch_play_by_play(&assets)
        );

        let (logos, totals) = match summary {
            Ok(s) => (Some(s.logos), Some(s.totals)),
            Err(e) => {
                warn!("summary unavailable for {}: {e}", game.slug);
                (None, None)
            }
        };
        let score = match pbp {
            Ok(pbp) => pbp.final_score(),
            Err(e) => {
                warn!("play-by-play unavailable for {}: {e}", game.slug);
                None
            }
        };

        GameCard { game: game.clone(), logos, totals, score }
    }

    /// Load everything the game detail view shows. Summary, manifest and the
    /// interval table are required; play-by-play only feeds the score and
    /// falls back to 0-0.
    pub async fn fetch_game_film(&self, player_slug: &str, game_slug: &str) -> ApiResult<GameFilm> {
        let assets = self.bucket.game(player_slug, game_slug);
        let metadata = async {
            let summary = self.fetch_summary(&assets).await?;
            let manifest = self.fetch_manifest(&assets).await?;
            let stints = self.fetch_stints(&assets).await?;
            Ok::<_, ApiError>((summary, manifest, stints))
        };
        let (metadata, pbp) = futures_util::join!(metadata, self.fetch_play_by_play(&assets));
        let (summary, manifest, stints) = metadata?;

        let score = match pbp {
            Ok(pbp) => pbp.final_score().unwrap_or_default(),
            Err(e) => {
                warn!("no play-by-play score for {game_slug}: {e}");
                Default::default()
            }
        };

        Ok(GameFilm { summary, manifest, stints, score })
    }

    pub async fn fetch_summary(&self, assets: &GameAssets) -> ApiResult<GameSummary> {
        let raw: RawSummary = self.get_json(&assets.summary()).await?;
        Ok(map_summary(raw))
    }

    pub async fn fetch_manifest(&self, assets: &GameAssets) -> ApiResult<StatManifest> {
        let raw: RawManifest = self.get_json(&assets.manifest()).await?;
        Ok(map_manifest(raw))
    }

    pub async fn fetch_stints(&self, assets: &GameAssets) -> ApiResult<Vec<Stint>> {
        let url = assets.subs_intervals();
        let text = self.get_text(&url).await?;
        parse_stints(&text).map_err(|e| ApiError::Csv(e, url))
    }

    pub async fn fetch_play_by_play(&self, assets: &GameAssets) -> ApiResult<PlayByPlay> {
        let raw: RawPlayByPlay = self.get_json(&assets.play_by_play()).await?;
        Ok(map_play_by_play(raw))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.get(url)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }

    async fn get_text(&self, url: &str) -> ApiResult<String> {
        self.get(url)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }

    async fn get(&self, url: &str) -> ApiResult<reqwest::Response> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        response.error_for_status().map_err(|e| {
            if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                ApiError::NotFound(url.to_owned())
            } else {
                ApiError::Api(e, url.to_owned())
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_roster(raw: Vec<RawPlayer>) -> Vec<Player> {
    raw.into_iter()
        .filter_map(|p| {
            let Some(slug) = p.slug.filter(|s| !s.is_empty()) else {
                warn!("skipping roster entry without slug: {:?}", p.name);
                return None;
            };
            let games = p
                .games
                .into_iter()
                .filter_map(|g| {
                    let slug = g.slug.filter(|s| !s.is_empty())?;
                    Some(Game {
                        name: g.name.unwrap_or_else(|| slug.clone()),
                        slug,
                    })
                })
                .collect();
            Some(Player {
                name: p.name.unwrap_or_default(),
                slug,
                team: p.team.unwrap_or_default(),
                team_color: p.team_color,
                games,
            })
        })
        .collect()
}

fn map_summary(raw: RawSummary) -> GameSummary {
    let logos = raw
        .logos
        .map(|l| Logos { home: l.home, away: l.away })
        .unwrap_or_default();

    let totals: Totals = raw
        .totals
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            _ => None,
        })
        .collect();

    GameSummary {
        logos,
        totals,
        player: raw.player.filter(|p| !p.is_empty()),
    }
}

fn map_manifest(raw: RawManifest) -> StatManifest {
    let clips = raw
        .stats
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(category, entry)| {
            let url = entry.get("url")?.as_str()?.to_owned();
            Some(StatClip { category, url })
        })
        .collect();
    StatManifest { clips }
}

fn map_play_by_play(raw: RawPlayByPlay) -> PlayByPlay {
    let plays = raw
        .plays
        .unwrap_or_default()
        .into_iter()
        .map(|p| Play {
            home_score: p.home_score.as_ref().and_then(score_value),
            away_score: p.away_score.as_ref().and_then(score_value),
        })
        .collect();
    PlayByPlay { plays }
}

/// Scores arrive as numbers or numeric strings.
fn score_value(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u16::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    }
}
