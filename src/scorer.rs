//! # Suitability Scorer
//!
//! Combines weighted sub-scores for one species against one environmental
//! snapshot into a single bounded score with a reason and an active-trigger
//! list.
//!
//! ## Weighting scheme
//!
//! The weights are design choices, not physics; they are collected here as
//! named constants so they can be tuned without touching the combination
//! logic:
//!
//! | sub-score        | max  | source                                        |
//! |------------------|------|-----------------------------------------------|
//! | seasonal         | 25   | species seasonal-efficiency table             |
//! | temperature      | 25   | Gaussian fit against the tolerance range      |
//! | environmental    | 20   | blend: wave 35%, clarity 25%, wind 25%, region 15% |
//! | activity-time    | 20   | activity pattern × time-of-day matrix         |
//! | trigger bonus    | ±10  | uniform (predicate, bonus, label) rules       |
//!
//! The raw sum is multiplied by the lunar-phase bonus, optionally jittered,
//! then run through penalty multipliers in a fixed order (wave danger, storm
//! wind, rain, boat-category, species overrides) and clamped into
//! [`HOURLY_SCORE_MIN`, `HOURLY_SCORE_MAX`]. Penalties are intentional score
//! suppression, not errors: they report through the reason/trigger fields.

use crate::noise::GaussianNoise;
use crate::shape;
use crate::species::{ClarityPreference, SpeciesCategory, SpeciesProfile};
use crate::{EnvironmentalSnapshot, TimeOfDay};

/// Lower clamp for a single-hour score.
pub const HOURLY_SCORE_MIN: f64 = 5.0;
/// Upper clamp for a single-hour score.
pub const HOURLY_SCORE_MAX: f64 = 98.0;

// Sub-score maxima
const SEASONAL_MAX: f64 = 25.0;
const TEMPERATURE_MAX: f64 = 25.0;
const ENVIRONMENTAL_MAX: f64 = 20.0;
const ACTIVITY_MAX: f64 = 20.0;
/// Net trigger bonus is clamped to ±this band.
const TRIGGER_BAND: f64 = 10.0;

// Environmental composite blend
const ENV_WAVE_WEIGHT: f64 = 0.35;
const ENV_CLARITY_WEIGHT: f64 = 0.25;
const ENV_WIND_WEIGHT: f64 = 0.25;
const ENV_REGION_WEIGHT: f64 = 0.15;
/// Region-match indicator when the species list does not cover the region.
const REGION_MISMATCH_SCORE: f64 = 0.2;

// Penalty thresholds and factors, applied in this order
const WAVE_DANGER_M: f64 = 2.5;
const WAVE_DANGER_FACTOR: f64 = 0.15;
const WAVE_ROUGH_M: f64 = 1.8;
const WAVE_ROUGH_FACTOR: f64 = 0.6;
const STORM_WIND_FACTOR: f64 = 0.25;
const FRESH_WIND_KMH: f64 = 30.0;
const FRESH_WIND_FACTOR: f64 = 0.7;
const HEAVY_RAIN_MM: f64 = 8.0;
const HEAVY_RAIN_FACTOR: f64 = 0.5;
const LIGHT_RAIN_MM: f64 = 3.0;
const LIGHT_RAIN_FACTOR: f64 = 0.8;
/// Deep-water species scored in a shore context.
const BOAT_CATEGORY_FACTOR: f64 = 0.35;
/// Cephalopods shut down in dirty or rain-washed water.
const CEPHALOPOD_DIRTY_FACTOR: f64 = 0.6;

/// Label that replaces reason and triggers when the swell is dangerous.
pub const DANGER_LABEL: &str = "dangerous swell";
const STORM_LABEL: &str = "storm wind";
const BOAT_LABEL: &str = "needs a boat";

/// Per-component contributions, kept for explanation payloads and tests.
#[derive(Clone, Copy, Debug)]
pub struct ScoreBreakdown {
    pub seasonal: f64,
    pub temperature: f64,
    pub environmental: f64,
    pub activity: f64,
    pub trigger_bonus: f64,
}

/// Result of scoring one species for one hour.
#[derive(Clone, Debug)]
pub struct HourlyScore {
    /// Final score, clamped to [`HOURLY_SCORE_MIN`, `HOURLY_SCORE_MAX`]
    pub score: f64,
    /// Reason string derived from fixed score bands (or the danger label)
    pub reason: String,
    /// Labels of triggers that fired (or the single danger label)
    pub triggers: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Score one species against one snapshot.
///
/// `shore_context` is true when the query is evaluated from the shore (the
/// default for this service); deep-water species are penalized there.
/// `noise` injects Gaussian jitter into the raw total; pass `None` for
/// deterministic output.
pub fn score_species(
    snap: &EnvironmentalSnapshot,
    profile: &SpeciesProfile,
    shore_context: bool,
    noise: Option<&mut GaussianNoise>,
) -> HourlyScore {
    // 1. Seasonal baseline
    let seasonal = profile.season_eff.for_season(snap.season).clamp(0.0, 1.0) * SEASONAL_MAX;

    // 2. Temperature fit
    let t = &profile.temp;
    let temperature =
        shape::gaussian_score(snap.water_temp_c, t.min, t.optimum(), t.max) * TEMPERATURE_MAX;

    // 3. Environmental composite
    let wave_fit = shape::bell_curve(snap.wave_m, profile.wave_ideal, profile.wave_sigma);
    let clarity_fit = clarity_fit(profile.clarity_preference, snap.clarity);
    let wind_fit = shape::wind_score(snap.wind_dir_deg, snap.wind_kmh, snap.region);
    let region_fit = if profile.available_in(snap.region) {
        1.0
    } else {
        REGION_MISMATCH_SCORE
    };
    let environmental = (wave_fit * ENV_WAVE_WEIGHT
        + clarity_fit * ENV_CLARITY_WEIGHT
        + wind_fit * ENV_WIND_WEIGHT
        + region_fit * ENV_REGION_WEIGHT)
        * ENVIRONMENTAL_MAX;

    // 4. Activity-time fit
    let activity = activity_fit(profile, snap.time_of_day) * ACTIVITY_MAX;

    // 5. Trigger bonus: uniform rule evaluation, net clamped to ±TRIGGER_BAND
    let mut triggers = Vec::new();
    let mut trigger_bonus = 0.0;
    for kind in &profile.triggers {
        if kind.matches(snap) {
            trigger_bonus += kind.bonus(profile);
            triggers.push(kind.label().to_string());
        }
    }
    let trigger_bonus = trigger_bonus.clamp(-TRIGGER_BAND, TRIGGER_BAND);

    let mut raw = (seasonal + temperature + environmental + activity + trigger_bonus)
        * shape::lunar_phase_multiplier(snap.moon_phase);

    if let Some(noise) = noise {
        raw += noise.sample();
    }

    // Penalty multipliers, fixed order. The wave danger cutoff also
    // overrides the explanation: nothing else matters in a dangerous swell.
    let dangerous_swell = snap.wave_m >= WAVE_DANGER_M;
    if dangerous_swell {
        raw *= WAVE_DANGER_FACTOR;
    } else if snap.wave_m >= WAVE_ROUGH_M {
        raw *= WAVE_ROUGH_FACTOR;
    }

    if snap.wind_kmh >= shape::STORM_WIND_KMH {
        raw *= STORM_WIND_FACTOR;
        triggers.push(STORM_LABEL.to_string());
    } else if snap.wind_kmh >= FRESH_WIND_KMH {
        raw *= FRESH_WIND_FACTOR;
    }

    if snap.rain_mm >= HEAVY_RAIN_MM {
        raw *= HEAVY_RAIN_FACTOR;
    } else if snap.rain_mm >= LIGHT_RAIN_MM {
        raw *= LIGHT_RAIN_FACTOR;
    }

    if shore_context && profile.category == SpeciesCategory::DeepWater {
        raw *= BOAT_CATEGORY_FACTOR;
        triggers.push(BOAT_LABEL.to_string());
    }

    if profile.category == SpeciesCategory::Cephalopod
        && (snap.clarity < 40.0 || snap.rain_mm > 0.5)
    {
        raw *= CEPHALOPOD_DIRTY_FACTOR;
    }

    let score = raw.clamp(HOURLY_SCORE_MIN, HOURLY_SCORE_MAX);

    let (reason, triggers) = if dangerous_swell {
        (DANGER_LABEL.to_string(), vec![DANGER_LABEL.to_string()])
    } else {
        (reason_for(score, &triggers), triggers)
    };

    HourlyScore {
        score,
        reason,
        triggers,
        breakdown: ScoreBreakdown {
            seasonal,
            temperature,
            environmental,
            activity,
            trigger_bonus,
        },
    }
}

/// Fit between a clarity preference and the derived clarity value, using
/// trapezoidal membership over the 0-100 scale.
fn clarity_fit(pref: ClarityPreference, clarity: f64) -> f64 {
    match pref {
        ClarityPreference::Clear => shape::fuzzy_trapezoid(clarity, 30.0, 70.0, 100.0, 120.0),
        ClarityPreference::Turbid => shape::fuzzy_trapezoid(clarity, -10.0, 5.0, 45.0, 70.0),
        ClarityPreference::Moderate => shape::fuzzy_trapezoid(clarity, 20.0, 45.0, 75.0, 95.0),
        ClarityPreference::Any => 0.7,
    }
}

/// Fixed high/medium/low constants keyed by activity pattern and daylight
/// bucket. A night feeder is nearly dormant at midday; an all-day species is
/// steady but never peaks.
fn activity_fit(profile: &SpeciesProfile, tod: TimeOfDay) -> f64 {
    use crate::species::ActivityPattern::*;
    match (profile.activity, tod) {
        (DawnDusk, TimeOfDay::Dawn) | (DawnDusk, TimeOfDay::Dusk) => 1.0,
        (DawnDusk, TimeOfDay::Day) => 0.35,
        (DawnDusk, TimeOfDay::Night) => 0.45,
        (Night, TimeOfDay::Night) => 1.0,
        (Night, TimeOfDay::Dusk) => 0.7,
        (Night, TimeOfDay::Dawn) => 0.6,
        (Night, TimeOfDay::Day) => 0.05,
        (Day, TimeOfDay::Day) => 1.0,
        (Day, TimeOfDay::Dawn) => 0.55,
        (Day, TimeOfDay::Dusk) => 0.5,
        (Day, TimeOfDay::Night) => 0.1,
        (AllDay, _) => 0.8,
    }
}

/// Reason bands over the final score. High scores borrow the first active
/// trigger label as the headline when one exists.
fn reason_for(score: f64, triggers: &[String]) -> String {
    if score < 25.0 {
        "conditions unfavorable".to_string()
    } else if score < 45.0 {
        "low activity".to_string()
    } else if score >= 70.0 {
        triggers
            .first()
            .cloned()
            .unwrap_or_else(|| "favorable conditions".to_string())
    } else {
        "moderate activity".to_string()
    }
}
