//! Low-precision lunar state for solunar and phase scoring.
//!
//! Phase arithmetic follows Schaefer's 1985 Sky & Telescope routine: a
//! Julian-day offset from the 1900-01-00 12 UT new moon, reduced modulo the
//! mean synodic month. Moonrise/moonset use the classic "50 minutes later per
//! day of age" sailor's rule anchored to sunrise at new moon. Accuracy is on
//! the order of ±1 hour, which is plenty for a feeding-window heuristic.
//! This is not an almanac.

use chrono::{Datelike, NaiveDate};

/// Mean synodic month length in days.
const SYNODIC_MONTH: f64 = 29.530_588_2;
/// Moonrise drifts later by this many hours per day of lunar age.
const RISE_DRIFT_H_PER_DAY: f64 = 0.84;
/// The moon stays up for roughly half a lunar day.
const MOON_UP_HOURS: f64 = 12.42;

/// Everything the engine needs to know about the moon for one date.
#[derive(Debug, Clone, Copy)]
pub struct MoonState {
    /// Position through the synodic cycle, 0-1 (0 = new, 0.5 = full).
    pub phase: f64,
    /// Age in civil days since new moon.
    pub age_days: f64,
    /// Illuminated fraction (0-1), cosine-proxy approximation.
    pub illum_frac: f64,
    /// Approximate moonrise, fractional local hour of day.
    pub moonrise_h: f64,
    /// Approximate moonset, fractional local hour of day.
    pub moonset_h: f64,
}

/// Compute the moon state for a calendar date (evaluated at local noon).
pub fn moon_state(date: NaiveDate) -> MoonState {
    let phase = synodic_phase(date.year(), date.month(), date.day() as f64 + 0.5);
    let age_days = phase * SYNODIC_MONTH;

    // Simple cosine proxy for illuminated fraction: 0 at new, 1 at full
    let half = SYNODIC_MONTH / 2.0;
    let illum_frac = (1.0 - (age_days - half).abs() / half).clamp(0.0, 1.0);

    // At new moon the moon travels with the sun (rise ~06:00, set ~18:00),
    // then lags ~50 minutes further behind each day.
    let moonrise_h = (6.0 + age_days * RISE_DRIFT_H_PER_DAY).rem_euclid(24.0);
    let moonset_h = (moonrise_h + MOON_UP_HOURS).rem_euclid(24.0);

    MoonState {
        phase,
        age_days,
        illum_frac,
        moonrise_h,
        moonset_h,
    }
}

/// Fractional position through the synodic cycle for a proleptic-Gregorian
/// Y-M-D (`day` may be fractional; UTC noon = 0.5).
fn synodic_phase(year: i32, month: u32, day: f64) -> f64 {
    // March-based year simplifies the Julian-day arithmetic: Jan/Feb are
    // treated as months 13/14 of the prior year.
    let (mut y, mut m) = (year, month as i32);
    if m < 3 {
        y -= 1;
        m += 12;
    }
    m += 1;

    // Days since the 1900-01-00 12 UT new moon epoch (S&T 1985)
    let days = (365.25 * y as f64).floor() + (30.6 * m as f64).floor() + day - 694_039.09;

    let cycles = days / SYNODIC_MONTH;
    let frac = cycles - cycles.floor();
    if frac < 0.0 {
        frac + 1.0
    } else {
        frac
    }
}
