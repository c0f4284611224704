use serde::Serialize;

// ─── Calendar-style duration breakdown ───────────────────────────

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_DAY: u64 = 24 * 60 * 60;
const SECS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

/// A duration decomposed into weeks / days / hours / minutes / seconds.
/// Recomputed on every export — never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeSpan {
    pub weeks: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeSpan {
    /// Break a second count down by successive integer division,
    /// largest unit first. Each field is the remainder after all
    /// larger units have been subtracted.
    pub fn from_secs(total: u64) -> Self {
        let weeks = total / SECS_PER_WEEK;
        let rem = total % SECS_PER_WEEK;
        let days = rem / SECS_PER_DAY;
        let rem = rem % SECS_PER_DAY;
        let hours = rem / SECS_PER_HOUR;
        let rem = rem % SECS_PER_HOUR;
        let minutes = rem / SECS_PER_MINUTE;
        let seconds = rem % SECS_PER_MINUTE;

        Self {
            weeks,
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

/// Round half-away-from-zero to `decimals` digits.
/// Used to stabilize a float second count before decomposition.
pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let pow = 10f64.powi(decimals as i32);
    let shifted = value * pow;
    if shifted >= 0.0 {
        (shifted + 0.5).floor() / pow
    } else {
        (shifted - 0.5).ceil() / pow
    }
}

// ─── Tests ───────────────────────────────────────────────────────
