//! Team accent colors.
//!
//! Roster colors are usually dark primaries that disappear against a dark
//! background, so the accent keeps the hue and pushes saturation and lightness
//! up before converting back to RGB.

use std::fmt;

/// Used when a player record carries no team color.
pub const DEFAULT_TEAM_COLOR: &str = "#888";

const SATURATION_BOOST: f64 = 1.35;
const LIGHTNESS_SCALE: f64 = 1.5;
const LIGHTNESS_LIFT: f64 = 0.08;
const LIGHTNESS_CAP: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Rgb(u8, u8, u8),
    /// Input could not be parsed. Renders as `#aaa`.
    Fallback,
}

impl Accent {
    pub const FALLBACK_RGB: (u8, u8, u8) = (0xaa, 0xaa, 0xaa);

    pub fn rgb(&self) -> (u8, u8, u8) {
        match *self {
            Accent::Rgb(r, g, b) => (r, g, b),
            Accent::Fallback => Self::FALLBACK_RGB,
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accent::Rgb(r, g, b) => write!(f, "rgb({r}, {g}, {b})"),
            Accent::Fallback => f.write_str("#aaa"),
        }
    }
}

/// Derive the accent for an optional `#rrggbb` team color.
pub fn derive_accent(team_color: Option<&str>) -> Accent {
    let hex = team_color.unwrap_or(DEFAULT_TEAM_COLOR);
    match parse_hex(hex) {
        Some((r, g, b)) => {
            let (h, s, l) = rgb_to_hsl(r, g, b);
            let s = (s * SATURATION_BOOST).min(1.0);
            let l = (l * LIGHTNESS_SCALE + LIGHTNESS_LIFT).min(LIGHTNESS_CAP);
            let (r, g, b) = hsl_to_rgb(h, s, l);
            Accent::Rgb(r, g, b)
        }
        None => Accent::Fallback,
    }
}

/// CSS form of [`derive_accent`].
pub fn accent_css(team_color: Option<&str>) -> String {
    derive_accent(team_color).to_string()
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (rf, gf, bf) = (f64::from(r), f64::from(g), f64::from(b));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (f64::from(max) + f64::from(min)) / 510.0;

    let d = f64::from(max) - f64::from(min);
    if max == min {
        return (0.0, 0.0, l);
    }

    let s = d / (255.0 - (2.0 * l * 255.0 - 255.0).abs());
    let h = if max == r {
        (gf - bf) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (bf - rf) / d + 2.0
    } else {
        (rf - gf) / d + 4.0
    };
    (h / 6.0, s, l)
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let to_byte = |t: f64| (hue_to_channel(p, q, t) * 255.0).round().clamp(0.0, 255.0) as u8;
    (
        to_byte(h + 1.0 / 3.0),
        to_byte(h),
        to_byte(h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red_is_brightened() {
        // l = 0.5 -> 0.83, s = 1 stays capped.
        assert_eq!(accent_css(Some("#ff0000")), "rgb(255, 168, 168)");
    }

    #[test]
    fn black_becomes_dark_gray() {
        // Achromatic: l = 0 -> 0.08.
        assert_eq!(accent_css(Some("#000000")), "rgb(20, 20, 20)");
    }

    #[test]
    fn white_is_capped_at_max_lightness() {
        assert_eq!(accent_css(Some("#ffffff")), "rgb(217, 217, 217)");
    }

    #[test]
    fn malformed_input_returns_fallback() {
        for bad in ["", "red", "#12345", "#gg0000", "ff0000", "#ff00001"] {
            assert_eq!(accent_css(Some(bad)), "#aaa", "input {bad:?}");
        }
    }

    #[test]
    fn missing_color_uses_short_default_which_falls_back() {
        assert_eq!(derive_accent(None), Accent::Fallback);
        assert_eq!(derive_accent(None).rgb(), (0xaa, 0xaa, 0xaa));
    }

    #[test]
    fn valid_colors_produce_rgb_strings_in_range() {
        for hex in ["#c8102e", "#002d62", "#13294b", "#7bafd4", "#ffc72c", "#010203"] {
            let Accent::Rgb(..) = derive_accent(Some(hex)) else {
                panic!("{hex} should parse");
            };
            let css = accent_css(Some(hex));
            assert!(css.starts_with("rgb(") && css.ends_with(')'), "{css}");
            let channels: Vec<u32> = css[4..css.len() - 1]
                .split(", ")
                .map(|c| c.parse().unwrap())
                .collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|c| *c <= 255));
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(accent_css(Some("#13294b")), accent_css(Some("#13294b")));
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert_eq!(accent_css(Some("#FF0000")), accent_css(Some("#ff0000")));
    }
}
