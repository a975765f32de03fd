//! Raw JSON shapes as the offline pipeline writes them.
//! Everything is optional here; client.rs maps these into the domain types
//! with explicit fallbacks.

use serde::Deserialize;
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// players.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlayer {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub team: Option<String>,
    pub team_color: Option<String>,
    #[serde(default)]
    pub games: Vec<RawGame>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawGame {
    pub name: Option<String>,
    pub slug: Option<String>,
}

// ---------------------------------------------------------------------------
// metadata/summary.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawSummary {
    pub logos: Option<RawLogos>,
    /// Values are strings in practice; numbers are tolerated.
    pub totals: Option<Map<String, Value>>,
    pub player: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawLogos {
    pub home: Option<String>,
    pub away: Option<String>,
}

// ---------------------------------------------------------------------------
// metadata/manifest.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawManifest {
    /// Category -> `{ "url": ..., "file": ..., "key": ... }`. Key order is the
    /// file's order (serde_json `preserve_order`).
    pub stats: Option<Map<String, Value>>,
}

// ---------------------------------------------------------------------------
// metadata/pbp.json
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawPlayByPlay {
    pub plays: Option<Vec<RawPlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlay {
    pub home_score: Option<Value>, // "80" or 80
    pub away_score: Option<Value>,
}
