use hoop_api::client::RosterSource;
use hoop_api::storage::Bucket;
use log::{LevelFilter, warn};

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub bucket: Bucket,
    pub roster: RosterSource,
    /// External player command, e.g. `mpv` or `vlc --play-and-exit`.
    pub video_player: Option<String>,
}

impl AppSettings {
    /// Read `HOOP_*` environment variables, falling back to defaults.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bucket = match var("HOOP_BUCKET_ROOT") {
            Some(root) => Bucket::parse(&root).unwrap_or_else(|e| {
                warn!("ignoring HOOP_BUCKET_ROOT={root}: {e}");
                Bucket::default()
            }),
            None => Bucket::default(),
        };

        let log_level = var("HOOP_LOG").and_then(|level| {
            level
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| warn!("ignoring HOOP_LOG={level}"))
                .ok()
        });

        Self {
            full_screen: false,
            log_level,
            bucket,
            roster: var("HOOP_PLAYERS_JSON")
                .map(|source| RosterSource::parse(&source))
                .unwrap_or_default(),
            video_player: var("HOOP_VIDEO_PLAYER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn settings(vars: &[(&str, &str)]) -> AppSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let s = settings(&[]);
        assert_eq!(s.bucket, Bucket::default());
        assert_eq!(s.roster, RosterSource::default());
        assert_eq!(s.log_level, None);
        assert_eq!(s.video_player, None);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("HOOP_BUCKET_ROOT", "https://cdn.example.com/films/"),
            ("HOOP_PLAYERS_JSON", "/srv/players.json"),
            ("HOOP_LOG", "debug"),
            ("HOOP_VIDEO_PLAYER", "mpv"),
        ]);
        assert_eq!(s.bucket.root(), "https://cdn.example.com/films");
        assert_eq!(s.roster, RosterSource::File(PathBuf::from("/srv/players.json")));
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.video_player.as_deref(), Some("mpv"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let s = settings(&[
            ("HOOP_BUCKET_ROOT", "not a url"),
            ("HOOP_LOG", "loud"),
            ("HOOP_VIDEO_PLAYER", "  "),
        ]);
        assert_eq!(s.bucket, Bucket::default());
        assert_eq!(s.log_level, None);
        assert_eq!(s.video_player, None);
    }
}
