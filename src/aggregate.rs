//! # Temporal Aggregation
//!
//! Collapses per-hour scorer output into the two query modes the service
//! exposes:
//!
//! - **Day mode**: one representative score for a calendar day, computed as
//!   an activity-weighted mean of 24 hourly evaluations. A night feeder's
//!   day is judged by its nights; averaging uniformly would drown its peak
//!   hours in irrelevant midday noise.
//! - **Instant mode**: a "right now" score smoothed over a symmetric
//!   three-hour window to damp single-sample noise, while the reason and
//!   trigger text stay those of the centered hour alone.
//!
//! Aggregated scores live in a narrower band than hourly ones: the
//! averaging has already removed the extremes, so the clamp tightens to
//! [`AGGREGATE_SCORE_MIN`, `AGGREGATE_SCORE_MAX`].

use crate::scorer::HourlyScore;
use crate::species::ActivityPattern;
use crate::TimeOfDay;

/// Lower clamp for day/instant scores.
pub const AGGREGATE_SCORE_MIN: f64 = 15.0;
/// Upper clamp for day/instant scores.
pub const AGGREGATE_SCORE_MAX: f64 = 95.0;

/// One hour's scorer output together with the hour it describes.
#[derive(Clone, Debug)]
pub struct HourEvaluation {
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub result: HourlyScore,
}

/// Smoothed "right now" result.
#[derive(Clone, Debug)]
pub struct InstantScore {
    pub score: f64,
    /// Reason from the centered hour, not the window
    pub reason: String,
    /// Triggers from the centered hour
    pub triggers: Vec<String>,
}

/// Weight an hour contributes to a species' day score, keyed by the species'
/// activity pattern and the hour's daylight bucket.
fn hour_weight(pattern: ActivityPattern, tod: TimeOfDay) -> f64 {
    match (pattern, tod) {
        (ActivityPattern::Night, TimeOfDay::Night) => 3.0,
        (ActivityPattern::Night, TimeOfDay::Dawn) | (ActivityPattern::Night, TimeOfDay::Dusk) => {
            2.0
        }
        (ActivityPattern::Night, TimeOfDay::Day) => 0.5,
        (ActivityPattern::DawnDusk, TimeOfDay::Dawn)
        | (ActivityPattern::DawnDusk, TimeOfDay::Dusk) => 3.0,
        (ActivityPattern::DawnDusk, _) => 1.25,
        (ActivityPattern::Day, TimeOfDay::Day) => 1.75,
        (ActivityPattern::Day, TimeOfDay::Dawn) | (ActivityPattern::Day, TimeOfDay::Dusk) => 1.0,
        (ActivityPattern::Day, TimeOfDay::Night) => 0.5,
        (ActivityPattern::AllDay, _) => 1.0,
    }
}

/// Activity-weighted mean over a day of hourly evaluations.
///
/// Returns the aggregate floor when `evals` is empty.
pub fn day_score(evals: &[HourEvaluation], pattern: ActivityPattern) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for eval in evals {
        let w = hour_weight(pattern, eval.time_of_day);
        weighted_sum += eval.result.score * w;
        weight_total += w;
    }
    if weight_total == 0.0 {
        return AGGREGATE_SCORE_MIN;
    }
    (weighted_sum / weight_total).clamp(AGGREGATE_SCORE_MIN, AGGREGATE_SCORE_MAX)
}

/// Symmetric three-hour smoothing around `center_hour`.
///
/// Returns `None` when the centered hour itself is missing from `evals`;
/// absent neighbors (start/end of the series) simply shrink the window.
pub fn instant_score(evals: &[HourEvaluation], center_hour: u32) -> Option<InstantScore> {
    let center = evals.iter().find(|e| e.hour == center_hour)?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for eval in evals {
        let in_window =
            eval.hour == center_hour || eval.hour + 1 == center_hour || eval.hour == center_hour + 1;
        if in_window {
            sum += eval.result.score;
            count += 1;
        }
    }

    let score = (sum / count as f64).clamp(AGGREGATE_SCORE_MIN, AGGREGATE_SCORE_MAX);
    Some(InstantScore {
        score,
        reason: center.result.reason.clone(),
        triggers: center.result.triggers.clone(),
    })
}
