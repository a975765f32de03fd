pub mod accent;
pub mod client;
pub mod stats;
pub mod stints;
pub mod storage;
pub mod wire;

use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the JSON/CSV wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub name: String,
    pub slug: String,
    pub team: String,
    pub team_color: Option<String>, // "#c8102e"
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub name: String, // "Duke @ North Carolina"
    pub slug: String, // unique within a player
}

impl Game {
    /// Split the display name into `(away, home)`. A name without `@` is
    /// treated as the away side only.
    pub fn teams(&self) -> (&str, &str) {
        split_matchup(&self.name)
    }
}

/// Split `"Away @ Home"` into trimmed halves.
pub fn split_matchup(name: &str) -> (&str, &str) {
    match name.split_once('@') {
        Some((away, home)) => (away.trim(), home.trim()),
        None => (name.trim(), ""),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logos {
    pub home: Option<String>,
    pub away: Option<String>,
}

/// Free-form box score totals keyed by stat code ("PTS", "FG%", ...).
pub type Totals = HashMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameSummary {
    pub logos: Logos,
    pub totals: Totals,
    pub player: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Play {
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayByPlay {
    pub plays: Vec<Play>,
}

impl PlayByPlay {
    /// Final score taken from the last play. `None` when there are no plays or
    /// the last play is missing either side.
    pub fn final_score(&self) -> Option<Score> {
        let last = self.plays.last()?;
        Some(Score {
            away: last.away_score?,
            home: last.home_score?,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub away: u16,
    pub home: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatClip {
    pub category: String, // "made_shots", "2pt_made", ...
    pub url: String,
}

/// Stat clips in the order the manifest file lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatManifest {
    pub clips: Vec<StatClip>,
}

impl StatManifest {
    pub fn get(&self, category: &str) -> Option<&StatClip> {
        self.clips.iter().find(|c| c.category == category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn first_category(&self) -> Option<&str> {
        self.clips.first().map(|c| c.category.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stint {
    pub id: u32, // 1-based position in the interval file
    pub half: String,
    pub start: String,
    pub end: String,
}

/// A game card in the player view. Every field other than `game` is optional:
/// a failed sub-fetch leaves its field empty without dropping the card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameCard {
    pub game: Game,
    pub logos: Option<Logos>,
    pub totals: Option<Totals>,
    pub score: Option<Score>,
}

/// Everything the game detail view shows. `score` is 0-0 when play-by-play
/// could not be loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameFilm {
    pub summary: GameSummary,
    pub manifest: StatManifest,
    pub stints: Vec<Stint>,
    pub score: Score,
}
