//! Compact stat line shared by the game cards and the game detail header.

use crate::Totals;

/// Secondary stats competing for the two middle slots, in tie-break order.
const SECONDARY_STATS: [&str; 3] = ["AST", "BLK", "STL"];

/// Placeholder the game cards use for a missing total.
pub const CARD_PLACEHOLDER: &str = "—";

/// Stat categories the detail view offers clips for, in display order.
pub const DISPLAY_STATS: [&str; 10] = [
    "made_shots",
    "assists",
    "rebounds",
    "steals",
    "blocks",
    "turnovers",
    "fouls",
    "2pt_made",
    "3pt_made",
    "missed_shots",
];

/// The two highest of AST/BLK/STL. Missing or non-numeric values count as 0;
/// ties keep AST, BLK, STL order.
pub fn top_secondary_stats(totals: &Totals) -> [&'static str; 2] {
    let mut ranked: Vec<(&'static str, f64)> = SECONDARY_STATS
        .iter()
        .map(|key| (*key, numeric_total(totals, key)))
        .collect();
    // Vec::sort_by is stable.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    [ranked[0].0, ranked[1].0]
}

/// `PTS: 20 | REB: 10 | STL: 8 | AST: 5 | FG: 8-15 (53%)`, with `missing`
/// substituted for any absent key.
pub fn compact_stat_line(totals: &Totals, missing: &str) -> String {
    let value = |key: &str| totals.get(key).map(String::as_str).unwrap_or(missing);
    let [first, second] = top_secondary_stats(totals);

    [
        format!("PTS: {}", value("PTS")),
        format!("REB: {}", value("REB")),
        format!("{first}: {}", value(first)),
        format!("{second}: {}", value(second)),
        format!("FG: {} ({}%)", value("FG"), value("FG%")),
    ]
    .join(" | ")
}

/// `made_shots` -> `made shots`.
pub fn stat_label(category: &str) -> String {
    category.replace('_', " ")
}

fn numeric_total(totals: &Totals, key: &str) -> f64 {
    totals
        .get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
