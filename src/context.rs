//! # Environmental Context Builder
//!
//! Turns raw, possibly-garbage numeric inputs into a canonical
//! [`EnvironmentalSnapshot`]. Upstream feeds deliver NaN for missing fields
//! and occasionally implausible values; this module is the single place where
//! defaulting and clamping happen, so the scorer downstream can assume clean
//! data.
//!
//! ## Defaulting rules
//! - Missing/implausible water temperature → the region's monthly
//!   climatological value, never zero. A zero here would push every species'
//!   temperature fit to the floor at once and blank the list for no reason.
//! - Missing wave/wind/rain → 0.0; negative values are clamped to 0.
//! - Missing/implausible pressure → 1013.0 hPa (standard atmosphere).
//! - `is_land` is set by the caller when the marine feed had no valid wave
//!   samples for the point; it short-circuits ranking to an empty list.

use chrono::{Datelike, NaiveDate};

use crate::lunar;
use crate::region::Region;
use crate::shape::{self, SunTimes};
use crate::{EnvironmentalSnapshot, Season};

/// Physically plausible sea surface temperature band (°C).
const WATER_TEMP_BAND: std::ops::RangeInclusive<f64> = -2.0..=40.0;
/// Plausible surface pressure band (hPa).
const PRESSURE_BAND: std::ops::RangeInclusive<f64> = 870.0..=1090.0;
/// Standard atmosphere, used when pressure is missing.
const DEFAULT_PRESSURE_HPA: f64 = 1013.0;

/// Raw numeric inputs as they arrive from the weather/marine collaborators.
/// Every field may be NaN (missing); `Default` produces an all-missing set.
#[derive(Clone, Copy, Debug)]
pub struct RawConditions {
    pub water_temp_c: f64,
    pub air_temp_c: f64,
    pub wave_m: f64,
    pub wind_kmh: f64,
    pub wind_dir_deg: f64,
    pub rain_mm: f64,
    pub pressure_hpa: f64,
}

impl Default for RawConditions {
    fn default() -> Self {
        RawConditions {
            water_temp_c: f64::NAN,
            air_temp_c: f64::NAN,
            wave_m: f64::NAN,
            wind_kmh: f64::NAN,
            wind_dir_deg: f64::NAN,
            rain_mm: f64::NAN,
            pressure_hpa: f64::NAN,
        }
    }
}

/// Assembles [`EnvironmentalSnapshot`]s for one location and date.
///
/// The builder holds the slow-changing query context (coordinates, date, sun
/// times, pressure history); `build` is then called once per hour with that
/// hour's raw readings.
#[derive(Clone, Debug)]
pub struct ContextBuilder {
    lat: f64,
    lon: f64,
    date: NaiveDate,
    hour: u32,
    sun: Option<SunTimes>,
    pressure_history: Vec<f64>,
    temp_shock_c: f64,
    is_land: bool,
}

impl ContextBuilder {
    /// Start a builder for a geographic point. Date defaults to 2025-01-01
    /// and hour to noon until [`ContextBuilder::at`] is called.
    pub fn new(lat: f64, lon: f64) -> Self {
        ContextBuilder {
            lat,
            lon,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid constant date"),
            hour: 12,
            sun: None,
            pressure_history: Vec::new(),
            temp_shock_c: 0.0,
            is_land: false,
        }
    }

    /// Set the evaluation date and hour (0-23).
    pub fn at(mut self, date: NaiveDate, hour: u32) -> Self {
        self.date = date;
        self.hour = hour.min(23);
        self
    }

    /// Provide astronomical sun times. Without this, a seasonal estimate for
    /// the mid-latitudes is used.
    pub fn sun_times(mut self, sun: SunTimes) -> Self {
        self.sun = Some(sun);
        self
    }

    /// Provide the rolling pressure window (oldest first) used for trend
    /// classification.
    pub fn pressure_history(mut self, history: &[f64]) -> Self {
        self.pressure_history = history.to_vec();
        self
    }

    /// Day-over-day water temperature jump in °C, when yesterday's reading
    /// is available. Feeds the chaos index and the confidence figure.
    pub fn temp_shock(mut self, shock_c: f64) -> Self {
        self.temp_shock_c = non_negative_or_zero(shock_c);
        self
    }

    /// Mark the point as land (no valid marine samples).
    pub fn land(mut self, is_land: bool) -> Self {
        self.is_land = is_land;
        self
    }

    /// Sanitize raw readings and derive the full snapshot.
    pub fn build(&self, raw: &RawConditions) -> EnvironmentalSnapshot {
        let region = Region::from_coords(self.lat, self.lon);
        let month = self.date.month();
        let season = Season::from_month(month);

        let water_temp_c = if raw.water_temp_c.is_nan() || !WATER_TEMP_BAND.contains(&raw.water_temp_c)
        {
            region.climatology_water_temp(month)
        } else {
            raw.water_temp_c
        };
        let air_temp_c = if raw.air_temp_c.is_nan() {
            water_temp_c
        } else {
            raw.air_temp_c
        };
        let wave_m = non_negative_or_zero(raw.wave_m);
        let wind_kmh = non_negative_or_zero(raw.wind_kmh);
        let rain_mm = non_negative_or_zero(raw.rain_mm);
        let wind_dir_deg = if raw.wind_dir_deg.is_nan() {
            0.0
        } else {
            raw.wind_dir_deg.rem_euclid(360.0)
        };
        let pressure_hpa = if raw.pressure_hpa.is_nan() || !PRESSURE_BAND.contains(&raw.pressure_hpa)
        {
            DEFAULT_PRESSURE_HPA
        } else {
            raw.pressure_hpa
        };

        let pressure_trend = shape::pressure_trend(&self.pressure_history);
        let clarity = shape::clarity_estimate(wave_m, wind_kmh, rain_mm);
        let current_ms = shape::current_estimate(wave_m, wind_kmh, region.current_multiplier());
        let chaos = shape::chaos_index(wind_kmh, wave_m, self.temp_shock_c);
        let confidence = shape::confidence(chaos, self.temp_shock_c);

        let moon = lunar::moon_state(self.date);
        let solunar = shape::solunar_window(moon.moonrise_h, moon.moonset_h, self.hour as f64);
        let tide_flow = shape::tide_flow(moon.phase, self.hour as f64);

        let sun = self.sun.unwrap_or_else(|| seasonal_sun_estimate(season));
        let time_of_day = shape::time_of_day(self.hour as f64, &sun);

        EnvironmentalSnapshot {
            water_temp_c,
            air_temp_c,
            wave_m,
            wind_kmh,
            wind_dir_deg,
            rain_mm,
            pressure_hpa,
            pressure_trend,
            clarity,
            current_ms,
            tide_flow,
            chaos,
            confidence,
            moon_fraction: moon.illum_frac,
            moon_phase: moon.phase,
            solunar,
            time_of_day,
            region,
            season,
            hour: self.hour,
            is_land: self.is_land,
        }
    }
}

fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Mid-latitude sunrise/sunset estimate when no astronomical times are given.
fn seasonal_sun_estimate(season: Season) -> SunTimes {
    match season {
        Season::Winter => SunTimes { sunrise_h: 7.5, sunset_h: 17.5 },
        Season::Spring => SunTimes { sunrise_h: 6.5, sunset_h: 19.0 },
        Season::Summer => SunTimes { sunrise_h: 5.5, sunset_h: 20.0 },
        Season::Autumn => SunTimes { sunrise_h: 6.5, sunset_h: 18.5 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PressureTrend, TimeOfDay};

    fn builder() -> ContextBuilder {
        ContextBuilder::new(41.1, 29.1).at(NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(), 6)
    }

    #[test]
    fn all_missing_inputs_still_produce_a_snapshot() {
        let snap = builder().build(&RawConditions::default());
        assert!(!snap.water_temp_c.is_nan());
        assert_eq!(snap.wave_m, 0.0);
        assert_eq!(snap.wind_kmh, 0.0);
        assert_eq!(snap.rain_mm, 0.0);
        assert_eq!(snap.pressure_hpa, 1013.0);
        // October Black Sea climatology, not zero
        assert!((15.0..22.0).contains(&snap.water_temp_c), "{}", snap.water_temp_c);
    }

    #[test]
    fn implausible_water_temp_replaced_by_climatology() {
        let raw = RawConditions { water_temp_c: 99.0, ..Default::default() };
        let snap = builder().build(&raw);
        assert!(snap.water_temp_c < 40.0);
        let raw = RawConditions { water_temp_c: -15.0, ..Default::default() };
        let snap = builder().build(&raw);
        assert!(snap.water_temp_c > -2.0);
    }

    #[test]
    fn negative_readings_clamp_to_zero() {
        let raw = RawConditions {
            wave_m: -1.0,
            wind_kmh: -5.0,
            rain_mm: -0.1,
            ..Default::default()
        };
        let snap = builder().build(&raw);
        assert_eq!(snap.wave_m, 0.0);
        assert_eq!(snap.wind_kmh, 0.0);
        assert_eq!(snap.rain_mm, 0.0);
    }

    #[test]
    fn derives_clarity_current_and_trend() {
        let raw = RawConditions {
            wave_m: 1.0,
            wind_kmh: 20.0,
            rain_mm: 0.0,
            pressure_hpa: 1010.0,
            ..Default::default()
        };
        let snap = builder()
            .pressure_history(&[1013.0, 1012.0, 1010.0])
            .build(&raw);
        assert!((5.0..=100.0).contains(&snap.clarity));
        assert!(snap.current_ms > 0.05);
        assert_eq!(snap.pressure_trend, PressureTrend::FallingFast);
    }

    #[test]
    fn derives_tide_chaos_and_confidence() {
        let raw = RawConditions {
            wave_m: 0.6,
            wind_kmh: 15.0,
            ..Default::default()
        };
        let calm = builder().build(&raw);
        assert!((0.0..=1.5).contains(&calm.tide_flow));
        assert!((0.0..=1.0).contains(&calm.chaos));
        assert!((30.0..=95.0).contains(&calm.confidence));

        let shocked = builder().temp_shock(6.0).build(&raw);
        assert!(shocked.chaos > calm.chaos);
        assert!(shocked.confidence < calm.confidence);
    }

    #[test]
    fn wind_direction_normalized() {
        let raw = RawConditions { wind_dir_deg: 725.0, ..Default::default() };
        let snap = builder().build(&raw);
        assert!((0.0..360.0).contains(&snap.wind_dir_deg));
        assert!((snap.wind_dir_deg - 5.0).abs() < 1e-9);
    }

    #[test]
    fn hour_six_in_autumn_is_dawn() {
        let snap = builder().build(&RawConditions::default());
        assert_eq!(snap.time_of_day, TimeOfDay::Dawn);
    }

    #[test]
    fn land_flag_carries_through() {
        let snap = builder().land(true).build(&RawConditions::default());
        assert!(snap.is_land);
    }
}
