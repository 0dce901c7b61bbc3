//! # Synthetic Conditions Generator
//!
//! Fetching and parsing the real weather/marine feeds belongs to an external
//! collaborator, not this crate. For the demo binary and for integration
//! tests we still need a plausible 24-hour series, so this module generates
//! one from a few harmonic components: a diurnal sea-breeze cycle for wind
//! and waves, a mild afternoon temperature bump, and a slow pressure drift.
//!
//! The output is deterministic for a given date and location, which keeps
//! the binary's output reproducible and the integration tests stable.

use chrono::{Datelike, NaiveDate};

use crate::context::{ContextBuilder, RawConditions};
use crate::region::Region;
use crate::EnvironmentalSnapshot;

/// Generate raw conditions for one hour of a synthetic day.
///
/// The shapes are tuned to read plausibly for the covered coastline: calm
/// mornings, a breeze peaking mid-afternoon, waves lagging the wind.
pub fn raw_conditions(date: NaiveDate, hour: u32, lat: f64, lon: f64) -> RawConditions {
    let region = Region::from_coords(lat, lon);
    let h = hour as f64;
    let tau = std::f64::consts::TAU;

    // Sea breeze: minimum near dawn, peak around 15:00
    let breeze_phase = ((h - 15.0) / 24.0) * tau;
    let wind_kmh = 10.0 + 7.0 * breeze_phase.cos().max(-1.0);
    // Waves lag the wind by a couple of hours
    let wave_phase = ((h - 17.0) / 24.0) * tau;
    let wave_m = (0.5 + 0.35 * wave_phase.cos()).max(0.05);

    let base_water = region.climatology_water_temp(date.month());
    let water_temp_c = base_water + 0.6 * (((h - 16.0) / 24.0) * tau).cos();
    let air_temp_c = base_water - 2.0 + 5.0 * (((h - 15.0) / 24.0) * tau).cos();

    // Slow falling drift through the day, seeded by day-of-year so different
    // dates produce different trends
    let drift = ((date.ordinal() % 7) as f64 - 3.0) * 0.3;
    let pressure_hpa = 1013.0 + drift - h * 0.05;

    RawConditions {
        water_temp_c,
        air_temp_c,
        wave_m,
        wind_kmh,
        wind_dir_deg: 40.0,
        rain_mm: 0.0,
        pressure_hpa,
    }
}

/// Build the full 24-snapshot day the demo binary evaluates.
pub fn day_series(date: NaiveDate, lat: f64, lon: f64) -> Vec<EnvironmentalSnapshot> {
    (0..24)
        .map(|hour| {
            let raw = raw_conditions(date, hour, lat, lon);
            // Trend window: this hour's pressure against three hours earlier
            let earlier = raw_conditions(date, hour.saturating_sub(3), lat, lon);
            ContextBuilder::new(lat, lon)
                .at(date, hour)
                .pressure_history(&[earlier.pressure_hpa, raw.pressure_hpa])
                .build(&raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 12).unwrap()
    }

    #[test]
    fn generates_full_plausible_day() {
        let day = day_series(date(), 41.1, 29.1);
        assert_eq!(day.len(), 24);
        for (i, snap) in day.iter().enumerate() {
            assert_eq!(snap.hour as usize, i);
            assert!(snap.wave_m >= 0.0 && snap.wave_m < 1.5);
            assert!(snap.wind_kmh >= 0.0 && snap.wind_kmh < 25.0);
            assert!((5.0..=100.0).contains(&snap.clarity));
            assert!(!snap.is_land);
        }
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let a = day_series(date(), 41.1, 29.1);
        let b = day_series(date(), 41.1, 29.1);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.wave_m, y.wave_m);
            assert_eq!(x.wind_kmh, y.wind_kmh);
            assert_eq!(x.water_temp_c, y.water_temp_c);
        }
    }

    #[test]
    fn afternoon_breeze_exceeds_dawn_calm() {
        let day = day_series(date(), 41.1, 29.1);
        assert!(day[15].wind_kmh > day[4].wind_kmh);
    }
}
