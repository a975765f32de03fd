pub mod card_grid;
pub mod strip;

use hoop_api::accent::derive_accent;
use tui::style::Color;

/// Terminal color for a team's accent. Missing or malformed colors give the
/// neutral gray fallback.
pub fn accent_color(team_color: Option<&str>) -> Color {
    let (r, g, b) = derive_accent(team_color).rgb();
    Color::Rgb(r, g, b)
}
