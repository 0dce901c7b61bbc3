//! # Shape Functions
//!
//! Reusable numeric curves shared by the context builder and the scorer.
//! Everything here is a pure function on `f64` inputs; the membership-style
//! functions (`fuzzy_trapezoid`, `gaussian_score`) deliberately floor at a
//! small positive constant so that a single bad parameter can never drive a
//! species to exactly zero and exclude it outright.

use crate::region::Region;
use crate::{PressureTrend, SolunarWindow, TimeOfDay};

/// Floor for the trapezoidal membership function.
const TRAPEZOID_FLOOR: f64 = 0.15;
/// Floor for the Gaussian membership function.
const GAUSSIAN_FLOOR: f64 = 0.2;
/// Tolerance around the optimum inside which the Gaussian stays at 1.0 (°C).
const GAUSSIAN_PLATEAU: f64 = 2.0;

/// Wind speed above which conditions are treated as a storm (km/h).
pub const STORM_WIND_KMH: f64 = 45.0;
/// Wind speed above which the wind score starts degrading (km/h).
const MODERATE_WIND_KMH: f64 = 25.0;

/// Trapezoidal fuzzy membership: 1.0 on the plateau `[opt_min, opt_max]`,
/// linear shoulders down to the floor at or beyond `[min, max]`.
///
/// # Example
/// ```
/// use fishcast::shape::fuzzy_trapezoid;
///
/// assert_eq!(fuzzy_trapezoid(15.0, 7.0, 11.0, 19.0, 23.0), 1.0);
/// assert_eq!(fuzzy_trapezoid(30.0, 7.0, 11.0, 19.0, 23.0), 0.15);
/// ```
pub fn fuzzy_trapezoid(value: f64, min: f64, opt_min: f64, opt_max: f64, max: f64) -> f64 {
    if value <= min || value >= max {
        TRAPEZOID_FLOOR
    } else if value >= opt_min && value <= opt_max {
        1.0
    } else if value < opt_min {
        TRAPEZOID_FLOOR + (1.0 - TRAPEZOID_FLOOR) * (value - min) / (opt_min - min)
    } else {
        TRAPEZOID_FLOOR + (1.0 - TRAPEZOID_FLOOR) * (max - value) / (max - opt_max)
    }
}

/// Bell-curve membership peaked at `optimum`, with the half-range of
/// `[min, max]` as the decay scale. Holds 1.0 within ±2 units of the optimum
/// and never drops below the floor, so no species is fully excluded by one
/// out-of-range parameter.
pub fn gaussian_score(value: f64, min: f64, optimum: f64, max: f64) -> f64 {
    let dist = (value - optimum).abs();
    if dist <= GAUSSIAN_PLATEAU {
        return 1.0;
    }
    let half_range = ((max - min) / 2.0).max(f64::EPSILON);
    let score = (-((dist / half_range).powi(2))).exp();
    score.max(GAUSSIAN_FLOOR)
}

/// Classic bell curve with an explicit width parameter, floored like
/// [`gaussian_score`]. Used where the spread is part of the species profile
/// (wave preference) rather than implied by a tolerance range.
pub fn bell_curve(value: f64, ideal: f64, sigma: f64) -> f64 {
    let s = sigma.max(f64::EPSILON);
    let score = (-((value - ideal).powi(2)) / (2.0 * s * s)).exp();
    score.max(GAUSSIAN_FLOOR)
}

/// Direction- and region-aware wind score.
///
/// Storm-force wind short-circuits to a low constant. Otherwise the region's
/// favored arc scores 1.0, the workable arc 0.7, and everything else 0.45;
/// the result then degrades linearly as speed climbs from moderate toward
/// storm force.
pub fn wind_score(dir_deg: f64, speed_kmh: f64, region: Region) -> f64 {
    if speed_kmh >= STORM_WIND_KMH {
        return 0.2;
    }
    let arc_score = if region.favored_wind_arc().contains(dir_deg) {
        1.0
    } else if region.workable_wind_arc().contains(dir_deg) {
        0.7
    } else {
        0.45
    };
    if speed_kmh <= MODERATE_WIND_KMH {
        arc_score
    } else {
        // Fade toward 40% of the arc score as speed approaches storm force
        let over = (speed_kmh - MODERATE_WIND_KMH) / (STORM_WIND_KMH - MODERATE_WIND_KMH);
        arc_score * (1.0 - 0.6 * over)
    }
}

/// Water clarity proxy on a 0-100 scale: waves lift sand, wind churns the
/// surface, rain carries sediment.
pub fn clarity_estimate(wave_m: f64, wind_kmh: f64, rain_mm: f64) -> f64 {
    let clarity = 100.0 - wave_m * 15.0 - wind_kmh * 0.8 - rain_mm * 5.0;
    clarity.clamp(5.0, 100.0)
}

/// Heuristic current speed (m/s) from wave height and wind, amplified by the
/// region multiplier for enclosed basins and straits.
pub fn current_estimate(wave_m: f64, wind_kmh: f64, region_multiplier: f64) -> f64 {
    ((wave_m * 0.35 + wind_kmh * 0.018) * region_multiplier).max(0.05)
}

/// Semidiurnal tidal flow estimate in [0, 1.5].
///
/// A harmonic with two flow peaks per day, scaled by a spring/neap factor:
/// new and full moon line up sun and moon and strengthen the tide, quarter
/// moons weaken it. `moon_phase` is the 0-1 synodic position (0.5 = full);
/// `hour` is the fractional hour of day.
pub fn tide_flow(moon_phase: f64, hour: f64) -> f64 {
    let p = moon_phase.rem_euclid(1.0);
    // Distance to the nearest syzygy (new at 0/1, full at 0.5), 0-0.25
    let d = (p - 0.5).abs().min(p.min(1.0 - p));
    let spring_factor = 1.0 - d * 4.0;
    let harmonic = (std::f64::consts::TAU * hour / 12.0).cos().abs();
    harmonic * (0.5 + spring_factor)
}

/// Daily chaos index in [0, 1]: how unsettled the conditions are.
///
/// Blends wind, wave, and the day-over-day water temperature jump. Feeds the
/// confidence figure and the adaptive noise sigma.
pub fn chaos_index(wind_kmh: f64, wave_m: f64, temp_shock_c: f64) -> f64 {
    ((wind_kmh / 50.0 + wave_m / 4.0 + temp_shock_c / 5.0) / 3.0).clamp(0.0, 1.0)
}

/// Forecast confidence (30-95) implied by the chaos index. A sharp
/// temperature jump costs an extra flat penalty on top of the chaos share.
pub fn confidence(chaos: f64, temp_shock_c: f64) -> f64 {
    let mut conf = 100.0 - chaos.clamp(0.0, 1.0) * 40.0;
    if temp_shock_c > 4.0 {
        conf -= 20.0;
    }
    conf.clamp(30.0, 95.0)
}

/// Classify the pressure movement across a short rolling window of readings
/// (oldest first). Fewer than two readings classifies as stable.
pub fn pressure_trend(history: &[f64]) -> PressureTrend {
    let (first, last) = match (history.first(), history.last()) {
        (Some(f), Some(l)) if history.len() >= 2 => (*f, *l),
        _ => return PressureTrend::Stable,
    };
    let delta = last - first;
    if delta <= -2.0 {
        PressureTrend::FallingFast
    } else if delta <= -0.7 {
        PressureTrend::Falling
    } else if delta < 0.7 {
        PressureTrend::Stable
    } else if delta < 2.0 {
        PressureTrend::Rising
    } else {
        PressureTrend::RisingFast
    }
}

/// Hours (fractional) around the lunar transit proxy that count as a major
/// solunar window.
const MAJOR_WINDOW_H: f64 = 1.75;
/// Hours around moonrise/moonset that count as a minor window.
const MINOR_WINDOW_H: f64 = 1.0;

/// Classify an hour against the solunar windows implied by moonrise and
/// moonset (both fractional hours of day). The transit is approximated as
/// the midpoint of the moon-up interval.
pub fn solunar_window(moonrise_h: f64, moonset_h: f64, hour: f64) -> SolunarWindow {
    // Midpoint along the up-interval, handling sets past midnight
    let span = (moonset_h - moonrise_h).rem_euclid(24.0);
    let transit = (moonrise_h + span / 2.0).rem_euclid(24.0);

    if circular_hour_dist(hour, transit) <= MAJOR_WINDOW_H {
        SolunarWindow::Major
    } else if circular_hour_dist(hour, moonrise_h) <= MINOR_WINDOW_H
        || circular_hour_dist(hour, moonset_h) <= MINOR_WINDOW_H
    {
        SolunarWindow::Minor
    } else {
        SolunarWindow::None
    }
}

/// Shortest distance between two hours on the 24-hour circle.
fn circular_hour_dist(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(24.0);
    d.min(24.0 - d)
}

/// Astronomical day boundaries (fractional hours of day, local time).
#[derive(Clone, Copy, Debug)]
pub struct SunTimes {
    pub sunrise_h: f64,
    pub sunset_h: f64,
}

/// Pad around sunrise/sunset that counts as dawn or dusk (hours).
const TWILIGHT_PAD_H: f64 = 1.0;

/// Bucket an hour into dawn/day/dusk/night around the sun times.
pub fn time_of_day(hour: f64, sun: &SunTimes) -> TimeOfDay {
    if (hour - sun.sunrise_h).abs() <= TWILIGHT_PAD_H {
        TimeOfDay::Dawn
    } else if (hour - sun.sunset_h).abs() <= TWILIGHT_PAD_H {
        TimeOfDay::Dusk
    } else if hour > sun.sunrise_h && hour < sun.sunset_h {
        TimeOfDay::Day
    } else {
        TimeOfDay::Night
    }
}

/// Multiplicative bonus near the lunar phases associated with stronger
/// feeding: new/full moon and, more weakly, the quarters. `phase` is the
/// 0-1 position through the synodic cycle (0.5 = full).
pub fn lunar_phase_multiplier(phase: f64) -> f64 {
    let p = phase.rem_euclid(1.0);
    let near = |target: f64, tol: f64| (p - target).abs() <= tol;
    if near(0.0, 0.06) || near(1.0, 0.06) || near(0.5, 0.06) {
        1.12
    } else if near(0.25, 0.05) || near(0.75, 0.05) {
        1.05
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn trapezoid_plateau_and_floor() {
        assert_eq!(fuzzy_trapezoid(15.0, 7.0, 11.0, 19.0, 23.0), 1.0);
        assert_eq!(fuzzy_trapezoid(11.0, 7.0, 11.0, 19.0, 23.0), 1.0);
        assert_eq!(fuzzy_trapezoid(6.0, 7.0, 11.0, 19.0, 23.0), 0.15);
        assert_eq!(fuzzy_trapezoid(25.0, 7.0, 11.0, 19.0, 23.0), 0.15);
    }

    #[test]
    fn trapezoid_shoulders_interpolate() {
        // Halfway up the rising shoulder
        let mid = fuzzy_trapezoid(9.0, 7.0, 11.0, 19.0, 23.0);
        assert_relative_eq!(mid, 0.15 + 0.85 * 0.5, epsilon = 1e-9);
        // Rising shoulder is monotone
        assert!(
            fuzzy_trapezoid(8.0, 7.0, 11.0, 19.0, 23.0)
                < fuzzy_trapezoid(10.0, 7.0, 11.0, 19.0, 23.0)
        );
    }

    #[test]
    fn gaussian_plateau_floor_and_decay() {
        assert_eq!(gaussian_score(17.0, 10.0, 16.0, 24.0), 1.0);
        assert_eq!(gaussian_score(16.0, 10.0, 16.0, 24.0), 1.0);
        let near = gaussian_score(19.0, 10.0, 16.0, 24.0);
        let far = gaussian_score(23.0, 10.0, 16.0, 24.0);
        assert!(near > far, "decay away from optimum: {near} vs {far}");
        // Absurd value still floors above zero
        assert_eq!(gaussian_score(80.0, 10.0, 16.0, 24.0), 0.2);
    }

    #[test]
    fn bell_curve_peak_and_width() {
        assert_eq!(bell_curve(0.9, 0.9, 0.5), 1.0);
        let tight = bell_curve(1.4, 0.9, 0.2);
        let loose = bell_curve(1.4, 0.9, 0.5);
        assert!(tight < loose, "narrow sigma decays faster: {tight} vs {loose}");
        assert_eq!(bell_curve(10.0, 0.9, 0.2), 0.2);
    }

    #[test]
    fn storm_wind_short_circuits() {
        assert_eq!(wind_score(45.0, 60.0, Region::Aegean), 0.2);
        assert_eq!(wind_score(180.0, 50.0, Region::Marmara), 0.2);
    }

    #[test]
    fn favored_arc_beats_off_arc() {
        // Lodos (SW, 210°) is favored in the Aegean; poyraz (NE, 45°) is not
        let favored = wind_score(210.0, 15.0, Region::Aegean);
        let off = wind_score(45.0, 15.0, Region::Aegean);
        assert_eq!(favored, 1.0);
        assert!(off < favored);
    }

    #[test]
    fn wind_score_fades_past_moderate() {
        let calm = wind_score(210.0, 20.0, Region::Aegean);
        let fresh = wind_score(210.0, 35.0, Region::Aegean);
        assert!(fresh < calm);
        assert!(fresh > 0.2);
    }

    #[test]
    fn clarity_bounds() {
        assert_eq!(clarity_estimate(0.0, 0.0, 0.0), 100.0);
        assert_eq!(clarity_estimate(5.0, 60.0, 20.0), 5.0);
        let mid = clarity_estimate(1.0, 10.0, 1.0);
        assert_relative_eq!(mid, 100.0 - 15.0 - 8.0 - 5.0, epsilon = 1e-9);
    }

    #[test]
    fn current_floor_and_amplification() {
        assert_eq!(current_estimate(0.0, 0.0, 1.0), 0.05);
        let open = current_estimate(1.0, 20.0, 1.0);
        let strait = current_estimate(1.0, 20.0, 1.4);
        assert_relative_eq!(strait, open * 1.4, epsilon = 1e-9);
    }

    #[test]
    fn tide_flow_stronger_at_spring_than_neap() {
        // Peak flow hour for the 12-hour harmonic
        let spring_full = tide_flow(0.5, 0.0);
        let spring_new = tide_flow(0.0, 0.0);
        let neap = tide_flow(0.25, 0.0);
        assert_relative_eq!(spring_full, 1.5, epsilon = 1e-9);
        assert_relative_eq!(spring_new, 1.5, epsilon = 1e-9);
        assert_relative_eq!(neap, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn tide_flow_has_two_slack_tides_per_half_day() {
        // cos crosses zero at hours 3 and 9 regardless of phase
        assert!(tide_flow(0.5, 3.0) < 1e-9);
        assert!(tide_flow(0.5, 9.0) < 1e-9);
        assert!(tide_flow(0.5, 6.0) > 1.0);
    }

    #[test]
    fn chaos_index_bounds_and_blend() {
        assert_eq!(chaos_index(0.0, 0.0, 0.0), 0.0);
        assert_eq!(chaos_index(100.0, 10.0, 20.0), 1.0);
        let mild = chaos_index(15.0, 0.6, 0.0);
        assert!(mild > 0.1 && mild < 0.3, "mild day chaos {mild}");
    }

    #[test]
    fn confidence_penalizes_chaos_and_temp_shock() {
        assert_eq!(confidence(0.0, 0.0), 95.0);
        assert_eq!(confidence(1.0, 0.0), 60.0);
        assert_eq!(confidence(1.0, 5.0), 40.0);
        assert_eq!(confidence(1.0, 20.0), 40.0);
    }

    #[test]
    fn pressure_trend_thresholds() {
        assert_eq!(pressure_trend(&[1015.0, 1012.5]), PressureTrend::FallingFast);
        assert_eq!(pressure_trend(&[1015.0, 1014.0]), PressureTrend::Falling);
        assert_eq!(pressure_trend(&[1015.0, 1015.3]), PressureTrend::Stable);
        assert_eq!(pressure_trend(&[1015.0, 1016.0]), PressureTrend::Rising);
        assert_eq!(pressure_trend(&[1015.0, 1018.0]), PressureTrend::RisingFast);
        assert_eq!(pressure_trend(&[1015.0]), PressureTrend::Stable);
        assert_eq!(pressure_trend(&[]), PressureTrend::Stable);
    }

    #[test]
    fn solunar_major_at_transit() {
        // Moon up 06:00-18:00, transit proxy at noon
        assert_eq!(solunar_window(6.0, 18.0, 12.0), SolunarWindow::Major);
        assert_eq!(solunar_window(6.0, 18.0, 13.5), SolunarWindow::Major);
        assert_eq!(solunar_window(6.0, 18.0, 6.5), SolunarWindow::Minor);
        assert_eq!(solunar_window(6.0, 18.0, 18.9), SolunarWindow::Minor);
        assert_eq!(solunar_window(6.0, 18.0, 22.0), SolunarWindow::None);
    }

    #[test]
    fn solunar_handles_set_after_midnight() {
        // Moon rises 20:00, sets 08:00, transit proxy around 02:00
        assert_eq!(solunar_window(20.0, 8.0, 2.0), SolunarWindow::Major);
        assert_eq!(solunar_window(20.0, 8.0, 14.0), SolunarWindow::None);
    }

    #[test]
    fn time_of_day_buckets() {
        let sun = SunTimes { sunrise_h: 6.5, sunset_h: 19.5 };
        assert_eq!(time_of_day(6.0, &sun), TimeOfDay::Dawn);
        assert_eq!(time_of_day(7.4, &sun), TimeOfDay::Dawn);
        assert_eq!(time_of_day(13.0, &sun), TimeOfDay::Day);
        assert_eq!(time_of_day(19.0, &sun), TimeOfDay::Dusk);
        assert_eq!(time_of_day(23.0, &sun), TimeOfDay::Night);
        assert_eq!(time_of_day(3.0, &sun), TimeOfDay::Night);
    }

    #[test]
    fn lunar_multiplier_bands() {
        assert_eq!(lunar_phase_multiplier(0.0), 1.12);
        assert_eq!(lunar_phase_multiplier(0.5), 1.12);
        assert_eq!(lunar_phase_multiplier(0.97), 1.12);
        assert_eq!(lunar_phase_multiplier(0.25), 1.05);
        assert_eq!(lunar_phase_multiplier(0.75), 1.05);
        assert_eq!(lunar_phase_multiplier(0.15), 1.0);
        assert_eq!(lunar_phase_multiplier(0.62), 1.0);
    }
}
