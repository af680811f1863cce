//! Host appearance detection
//!
//! Terminals advertise their palette through `COLORFGBG` ("fg;bg", sometimes
//! "fg;default;bg"). The background index tells us whether the host is
//! running a light or dark scheme. Anything we can't read is unknown.

use crate::types::AppearanceMode;
use tracing::debug;

/// Read the host's color scheme from the environment
pub fn detect() -> Option<AppearanceMode> {
    let value = std::env::var("COLORFGBG").ok()?;
    let mode = parse_colorfgbg(&value);
    debug!(colorfgbg = %value, mode = ?mode, "Detected host appearance");
    mode
}

/// Parse a `COLORFGBG` value into an appearance
pub fn parse_colorfgbg(value: &str) -> Option<AppearanceMode> {
    let bg = value.rsplit(';').next()?.trim();
    let index: u8 = bg.parse().ok()?;
    match index {
        // Black and the dark half of the 16-color palette
        0..=6 | 8 => Some(AppearanceMode::Dark),
        7 | 9..=15 => Some(AppearanceMode::Light),
        _ => None,
    }
}
