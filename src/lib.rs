//! # Fishcast Core Library
//!
//! This library implements the suitability scoring engine behind a shore-fishing
//! forecast service: given a normalized snapshot of environmental conditions and a
//! catalog of species profiles, it produces ranked, explained numeric scores for
//! each species worth pursuing at that place and time.
//!
//! ## Design Philosophy
//!
//! ### Pure computation
//! The engine is a set of pure functions over immutable inputs. Every species'
//! score is independent of every other's, so evaluation is a plain map over the
//! catalog (and over hours, for day-level aggregation). There is no shared
//! mutable state, no I/O, and no clock access inside the scoring path; the only
//! intentional non-determinism is an explicit, seedable Gaussian jitter source
//! that callers may inject (see [`noise`]).
//!
//! ### Degrade, don't fail
//! Upstream weather and marine feeds routinely hand back NaN or junk values. A
//! single bad field must not blank the whole recommendation list, so the context
//! builder substitutes documented safe defaults instead of erroring (see
//! [`context`]). The one hard short-circuit is the `is_land` flag: when the
//! marine source has no wave data for the queried point, the result is an
//! explicit empty list rather than nonsense scores.
//!
//! ### Data over branches
//! Species knowledge lives in a declarative TOML catalog, and trigger matching
//! is a uniform list of (predicate, bonus, label) rules evaluated the same way
//! for every species. No per-species special cases are scattered through the
//! scoring code.
//!
//! ## Data Flow
//! 1. Raw numeric inputs → [`context::ContextBuilder`] → [`EnvironmentalSnapshot`]
//! 2. Snapshot × each [`species::SpeciesProfile`] → [`scorer::score_species`]
//! 3. Hourly evaluations → [`aggregate`] (day / instant modes)
//! 4. [`ranking`] entry points → sorted, filtered, truncated [`ScoredRecommendation`] list

use serde::{Deserialize, Serialize};

// Module declarations
pub mod aggregate;
pub mod config;
pub mod context;
pub mod lunar;
pub mod noise;
pub mod ranking;
pub mod region;
pub mod report;
pub mod scorer;
pub mod shape;
pub mod species;
pub mod synthetic;

use region::Region;
use species::SpeciesCategory;

/// Meteorological season, derived from the calendar month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Map a calendar month (1-12) to its meteorological season.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Autumn,
            _ => Season::Winter,
        }
    }
}

/// Coarse daylight bucket used for activity-pattern matching.
///
/// Boundaries come from astronomical sun times with a one-hour pad on each
/// edge, so "dawn" and "dusk" are roughly two-hour windows around sunrise
/// and sunset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

/// Solunar feeding-window classification for a given hour.
///
/// `Major` marks hours near the lunar transit (midpoint between moonrise and
/// moonset); `Minor` marks hours near moonrise or moonset themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolunarWindow {
    Major,
    Minor,
    None,
}

/// Discrete classification of short-term barometric pressure change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTrend {
    FallingFast,
    Falling,
    Stable,
    Rising,
    RisingFast,
}

/// A normalized, immutable view of environmental conditions at one point
/// and hour.
///
/// Built once per evaluation by [`context::ContextBuilder`], which is
/// responsible for all defaulting, clamping, and derivation; downstream
/// scoring code may assume every field here is plausible (no NaN, clarity in
/// 0-100, current non-negative, and so on).
///
/// # Example
/// ```
/// use fishcast::context::{ContextBuilder, RawConditions};
///
/// let snapshot = ContextBuilder::new(41.1, 29.0)
///     .at(chrono::NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(), 6)
///     .build(&RawConditions {
///         water_temp_c: 17.5,
///         wave_m: 0.8,
///         wind_kmh: 12.0,
///         ..Default::default()
///     });
/// assert!(!snapshot.is_land);
/// assert!((0.0..=100.0).contains(&snapshot.clarity));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvironmentalSnapshot {
    /// Sea surface temperature in °C
    pub water_temp_c: f64,
    /// Air temperature in °C
    pub air_temp_c: f64,
    /// Significant wave height in meters
    pub wave_m: f64,
    /// Wind speed in km/h
    pub wind_kmh: f64,
    /// Wind direction in degrees (0 = north, clockwise)
    pub wind_dir_deg: f64,
    /// Rainfall in mm for the hour
    pub rain_mm: f64,
    /// Surface pressure in hPa
    pub pressure_hpa: f64,
    /// Classified short-term pressure movement
    pub pressure_trend: PressureTrend,
    /// Derived water clarity, 0 (mud) to 100 (crystal)
    pub clarity: f64,
    /// Estimated current speed in m/s
    pub current_ms: f64,
    /// Tidal flow estimate, 0 (slack) to 1.5 (spring-tide peak)
    pub tide_flow: f64,
    /// How unsettled the conditions are, 0 (calm) to 1 (chaotic)
    pub chaos: f64,
    /// Forecast confidence (30-95) implied by the chaos index
    pub confidence: f64,
    /// Lunar illuminated fraction, 0 (new) to 1 (full)
    pub moon_fraction: f64,
    /// Phase position through the synodic cycle, 0-1 (0.5 = full)
    pub moon_phase: f64,
    /// Solunar feeding-window flag for this hour
    pub solunar: SolunarWindow,
    /// Daylight bucket for this hour
    pub time_of_day: TimeOfDay,
    /// Geographic region tag for the queried point
    pub region: Region,
    /// Season derived from the query date
    pub season: Season,
    /// Hour of day (0-23) this snapshot describes
    pub hour: u32,
    /// True when the marine source had no valid wave samples (point is on land)
    pub is_land: bool,
}

/// One species' scored, explained recommendation for a single query.
///
/// Created fresh per evaluation and never mutated afterwards; the surrounding
/// service serializes these directly into its response payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    /// Catalog identifier (e.g. "levrek")
    pub species: String,
    /// Display name
    pub name: String,
    /// Emoji/icon tag for UI display
    pub icon: String,
    /// Broad habit category (shore predator, pelagic, ...)
    pub category: SpeciesCategory,
    /// Final bounded score, rounded to one decimal
    pub score: f64,
    /// Forecast confidence for the evaluated conditions, rounded percent
    pub confidence: u32,
    /// Human-readable reason derived from fixed score bands
    pub reason: String,
    /// Labels of the triggers that fired for this evaluation
    pub triggers: Vec<String>,
    /// Region-resolved tackle advice
    pub advice: species::RegionAdvice,
}

impl ScoredRecommendation {
    /// Comma-joined trigger labels, or a standard placeholder when none fired.
    pub fn trigger_summary(&self) -> String {
        if self.triggers.is_empty() {
            "none".to_string()
        } else {
            self.triggers.join(", ")
        }
    }
}
