use hoop_api::storage::{decode_component, encode_component};
use std::fmt;

/// Navigation target. Paths mirror the web viewer:
/// `/`, `/player/:slug` and `/player/:playerSlug/:gameSlug`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Roster,
    Player {
        slug: String,
    },
    Game {
        player_slug: String,
        game_slug: String,
    },
}

impl Route {
    /// Parse a navigation path. Slugs are percent-decoded.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.trim().split('/').filter(|s| !s.is_empty());
        match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (None, ..) => Some(Route::Roster),
            (Some("player"), Some(slug), None, _) => Some(Route::Player {
                slug: decode_component(slug),
            }),
            (Some("player"), Some(player), Some(game), None) => Some(Route::Game {
                player_slug: decode_component(player),
                game_slug: decode_component(game),
            }),
            _ => None,
        }
    }

    /// One level up: game -> player -> roster.
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::Roster => None,
            Route::Player { .. } => Some(Route::Roster),
            Route::Game { player_slug, .. } => Some(Route::Player {
                slug: player_slug.clone(),
            }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Roster => f.write_str("/"),
            Route::Player { slug } => write!(f, "/player/{}", encode_component(slug)),
            Route::Game { player_slug, game_slug } => write!(
                f,
                "/player/{}/{}",
                encode_component(player_slug),
                encode_component(game_slug)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_views() {
        assert_eq!(Route::parse("/"), Some(Route::Roster));
        assert_eq!(Route::parse(""), Some(Route::Roster));
        assert_eq!(
            Route::parse("/player/Cooper_Flagg"),
            Some(Route::Player { slug: "Cooper_Flagg".into() })
        );
        assert_eq!(
            Route::parse("/player/Cooper_Flagg/Duke%40UNC/"),
            Some(Route::Game {
                player_slug: "Cooper_Flagg".into(),
                game_slug: "Duke@UNC".into(),
            })
        );
    }

    #[test]
    fn rejects_unknown_paths() {
        assert_eq!(Route::parse("/team/duke"), None);
        assert_eq!(Route::parse("/player"), None);
        assert_eq!(Route::parse("/player/a/b/c"), None);
    }

    #[test]
    fn display_encodes_slugs() {
        let route = Route::Game {
            player_slug: "Cooper_Flagg".into(),
            game_slug: "Duke @ UNC".into(),
        };
        assert_eq!(route.to_string(), "/player/Cooper_Flagg/Duke%20%40%20UNC");
        assert_eq!(Route::parse(&route.to_string()), Some(route));
    }

    #[test]
    fn parents_walk_back_to_roster() {
        let game = Route::Game { player_slug: "p".into(), game_slug: "g".into() };
        let player = game.parent().unwrap();
        assert_eq!(player, Route::Player { slug: "p".into() });
        assert_eq!(player.parent(), Some(Route::Roster));
        assert_eq!(Route::Roster.parent(), None);
    }
}
