//! Object storage layout.
//!
//! ```text
//! <root>/<player>/photo/<player>.jpg
//! <root>/<player>/<game>/metadata/{summary.json,manifest.json,pbp.json,subs_intervals.csv}
//! <root>/<player>/<game>/stints/stint_<n>.mp4
//! <root>/<player>/<game>/logos/<team>.png
//! ```
//!
//! Slugs are percent-encoded with `encodeURIComponent` rules, so a game slug
//! such as `Duke@UNC` lands in storage as `Duke%40UNC`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

pub const DEFAULT_BUCKET_ROOT: &str = "https://f005.backblazeb2.com/file/game-films";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn decode_component(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

/// Team name -> logo file stem: `"St. John's"` -> `"stjohns"`.
pub fn clean_team_name(team: &str) -> String {
    team.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Root of the game-film bucket, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    root: String,
}

impl Default for Bucket {
    fn default() -> Self {
        Self { root: DEFAULT_BUCKET_ROOT.to_owned() }
    }
}

impl Bucket {
    pub fn parse(root: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(root.trim())?;
        Ok(Self {
            root: url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn player_photo(&self, player_slug: &str) -> String {
        let player = encode_component(player_slug);
        format!("{}/{player}/photo/{player}.jpg", self.root)
    }

    /// Asset paths for one (player, game) pair. `game_slug` is the decoded slug.
    pub fn game(&self, player_slug: &str, game_slug: &str) -> GameAssets {
        GameAssets {
            base: format!(
                "{}/{}/{}",
                self.root,
                encode_component(player_slug),
                encode_component(game_slug)
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameAssets {
    base: String,
}

impl GameAssets {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn summary(&self) -> String {
        format!("{}/metadata/summary.json", self.base)
    }

    pub fn manifest(&self) -> String {
        format!("{}/metadata/manifest.json", self.base)
    }

    pub fn play_by_play(&self) -> String {
        format!("{}/metadata/pbp.json", self.base)
    }

    pub fn subs_intervals(&self) -> String {
        format!("{}/metadata/subs_intervals.csv", self.base)
    }

    pub fn stint_clip(&self, stint_id: u32) -> String {
        format!("{}/stints/stint_{stint_id}.mp4", self.base)
    }

    /// Fallback logo path used when the summary carries no logo URL.
    pub fn team_logo(&self, team_name: &str) -> String {
        format!("{}/logos/{}.png", self.base, clean_team_name(team_name))
    }
}
