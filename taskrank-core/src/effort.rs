//! Effort evaluator: estimated hours mapped to an "ease" score.
//!
//! Piecewise linear and continuous at the breakpoints:
//! - `[0.5, 2]`  : 100 -> 80
//! - `(2, 6]`    : 80 -> 40
//! - `(6, inf)`  : 40 -> 10 (reached at 12h), never lower

pub const MIN_HOURS: f64 = 0.5;
pub const EFFORT_CEILING: f64 = 100.0;
pub const EFFORT_FLOOR: f64 = 10.0;

/// Floors to [`MIN_HOURS`]. NaN also maps to the minimum.
pub fn floor_hours(hours: f64) -> f64 {
    hours.max(MIN_HOURS)
}

pub fn effort_score(hours: f64) -> f64 {
    let h = floor_hours(hours);
    if h <= 2.0 {
        EFFORT_CEILING - (h - MIN_HOURS) / 1.5 * 20.0
    } else if h <= 6.0 {
        80.0 - (h - 2.0) / 4.0 * 40.0
    } else {
        (40.0 - (h - 6.0) / 6.0 * 30.0).max(EFFORT_FLOOR)
    }
}
