//! # Ranking & Explanation
//!
//! The outermost layer of the engine: runs the scorer across the catalog (and
//! across hours for the aggregated modes), filters, sorts, truncates, and
//! attaches region-resolved advice text.
//!
//! Filtering rules:
//! - `is_land` snapshots yield an empty list; no species is evaluated.
//! - Species whose region list does not cover the query region are excluded
//!   entirely, unless the region is open/unassigned water.
//! - Results below the configured score cutoff are dropped.
//!
//! Sorting is strictly descending by score with catalog order as the
//! deterministic tie-break (a stable sort over a catalog-ordered input).
//!
//! Dominance scaling (keeping the leader's score and discounting everyone
//! else by a fixed factor) shows up in early revisions of this product and
//! is preserved behind an opt-in flag, default off.

use std::cmp::Ordering;

use crate::aggregate::{self, HourEvaluation};
use crate::noise::GaussianNoise;
use crate::scorer;
use crate::species::{SpeciesCatalog, SpeciesProfile};
use crate::{EnvironmentalSnapshot, ScoredRecommendation};

/// Discount applied to every non-leading result when dominance scaling is on.
const DOMINANCE_FACTOR: f64 = 0.85;

/// Knobs for the ranking stage.
#[derive(Clone, Copy, Debug)]
pub struct RankingOptions {
    /// Maximum number of recommendations returned
    pub max_results: usize,
    /// Results scoring below this are dropped
    pub min_score: f64,
    /// Opt-in dominance scaling (see module docs)
    pub dominance_scaling: bool,
}

impl Default for RankingOptions {
    fn default() -> Self {
        RankingOptions {
            max_results: 15,
            min_score: 15.0,
            dominance_scaling: false,
        }
    }
}

/// Score every eligible species against a single snapshot and rank the
/// results. This is the "raw hourly" mode; the service-facing instant and
/// day modes are [`recommend_instant`] and [`recommend_day`].
pub fn recommend_hour(
    catalog: &SpeciesCatalog,
    snap: &EnvironmentalSnapshot,
    shore_context: bool,
    mut noise: Option<&mut GaussianNoise>,
    opts: &RankingOptions,
) -> Vec<ScoredRecommendation> {
    if snap.is_land {
        return Vec::new();
    }
    let entries = catalog
        .species
        .iter()
        .filter(|profile| profile.available_in(snap.region))
        .map(|profile| {
            let result = scorer::score_species(snap, profile, shore_context, noise.as_deref_mut());
            to_recommendation(profile, snap, result.score, result.reason, result.triggers)
        })
        .collect();
    finalize(entries, opts)
}

/// Day mode: 24 hourly snapshots collapse to one activity-weighted score per
/// species. The reason and trigger text come from the species' best hour,
/// which is what an angler planning a session wants to know about.
pub fn recommend_day(
    catalog: &SpeciesCatalog,
    day: &[EnvironmentalSnapshot],
    shore_context: bool,
    mut noise: Option<&mut GaussianNoise>,
    opts: &RankingOptions,
) -> Vec<ScoredRecommendation> {
    let Some(first) = day.first() else {
        return Vec::new();
    };
    if day.iter().any(|s| s.is_land) {
        return Vec::new();
    }

    let entries = catalog
        .species
        .iter()
        .filter(|profile| profile.available_in(first.region))
        .map(|profile| {
            let evals = evaluate_hours(day, profile, shore_context, noise.as_deref_mut());
            let score = aggregate::day_score(&evals, profile.activity);
            let best = evals
                .iter()
                .max_by(|a, b| compare_scores(a.result.score, b.result.score));
            let (reason, triggers) = match best {
                Some(best) => (best.result.reason.clone(), best.result.triggers.clone()),
                None => ("no data".to_string(), Vec::new()),
            };
            to_recommendation(profile, first, score, reason, triggers)
        })
        .collect();
    finalize(entries, opts)
}

/// Instant mode: the score is smoothed over a symmetric three-hour window
/// around `center_hour`, while explanation text stays that of the centered
/// hour itself.
pub fn recommend_instant(
    catalog: &SpeciesCatalog,
    hours: &[EnvironmentalSnapshot],
    center_hour: u32,
    shore_context: bool,
    mut noise: Option<&mut GaussianNoise>,
    opts: &RankingOptions,
) -> Vec<ScoredRecommendation> {
    let Some(center) = hours.iter().find(|s| s.hour == center_hour) else {
        return Vec::new();
    };
    if center.is_land {
        return Vec::new();
    }

    // Only the window hours need evaluating
    let window: Vec<&EnvironmentalSnapshot> = hours
        .iter()
        .filter(|s| s.hour + 1 == center_hour || s.hour == center_hour || s.hour == center_hour + 1)
        .collect();

    let entries = catalog
        .species
        .iter()
        .filter(|profile| profile.available_in(center.region))
        .filter_map(|profile| {
            let evals: Vec<HourEvaluation> = window
                .iter()
                .map(|snap| HourEvaluation {
                    hour: snap.hour,
                    time_of_day: snap.time_of_day,
                    result: scorer::score_species(
                        snap,
                        profile,
                        shore_context,
                        noise.as_deref_mut(),
                    ),
                })
                .collect();
            let instant = aggregate::instant_score(&evals, center_hour)?;
            Some(to_recommendation(
                profile,
                center,
                instant.score,
                instant.reason,
                instant.triggers,
            ))
        })
        .collect();
    finalize(entries, opts)
}

/// Run the scorer for every hour of a day series.
fn evaluate_hours(
    day: &[EnvironmentalSnapshot],
    profile: &SpeciesProfile,
    shore_context: bool,
    mut noise: Option<&mut GaussianNoise>,
) -> Vec<HourEvaluation> {
    day.iter()
        .map(|snap| HourEvaluation {
            hour: snap.hour,
            time_of_day: snap.time_of_day,
            result: scorer::score_species(snap, profile, shore_context, noise.as_deref_mut()),
        })
        .collect()
}

fn to_recommendation(
    profile: &SpeciesProfile,
    snap: &EnvironmentalSnapshot,
    score: f64,
    reason: String,
    triggers: Vec<String>,
) -> ScoredRecommendation {
    ScoredRecommendation {
        species: profile.id.clone(),
        name: profile.name.clone(),
        icon: profile.icon.clone(),
        category: profile.category,
        score: round1(score),
        confidence: snap.confidence.round() as u32,
        reason,
        triggers,
        advice: profile.advice_for(snap.region),
    }
}

/// Filter, sort (stable, catalog order breaks ties), optionally apply
/// dominance scaling, and truncate.
fn finalize(
    mut entries: Vec<ScoredRecommendation>,
    opts: &RankingOptions,
) -> Vec<ScoredRecommendation> {
    entries.retain(|e| e.score >= opts.min_score);
    entries.sort_by(|a, b| compare_scores(b.score, a.score));

    if opts.dominance_scaling && entries.len() > 1 {
        for entry in entries.iter_mut().skip(1) {
            entry.score = round1(entry.score * DOMINANCE_FACTOR);
        }
        entries.sort_by(|a, b| compare_scores(b.score, a.score));
    }

    entries.truncate(opts.max_results);
    entries
}

fn compare_scores(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
