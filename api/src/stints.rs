//! Substitution interval table (`subs_intervals.csv`).
//!
//! The file has a header row with at least `start_clock` and `end_clock`; the
//! period label comes from `half`, or `period` when `half` is empty. Extra
//! columns (`player`, ...) are ignored.

use crate::Stint;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct IntervalRow {
    #[serde(default)]
    half: Option<String>,
    #[serde(default)]
    period: Option<String>,
    #[serde(default)]
    start_clock: Option<String>,
    #[serde(default)]
    end_clock: Option<String>,
}

/// Parse the interval table. Rows without both clocks are dropped; the rest
/// are numbered from 1 in file order.
pub fn parse_stints(csv_text: &str) -> Result<Vec<Stint>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut stints = Vec::new();
    for row in reader.deserialize::<IntervalRow>() {
        let row = row?;
        let (Some(start), Some(end)) = (non_empty(row.start_clock), non_empty(row.end_clock)) else {
            continue;
        };
        let half = non_empty(row.half)
            .or_else(|| non_empty(row.period))
            .unwrap_or_default();
        stints.push(Stint {
            id: stints.len() as u32 + 1,
            half,
            start,
            end,
        });
    }
    Ok(stints)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
