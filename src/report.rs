//! # ASCII Report Rendering
//!
//! Development-mode output: renders a ranked recommendation list as a plain
//! text table with a score bar, for eyeballing engine behavior without any
//! service in front of it.

use crate::{EnvironmentalSnapshot, ScoredRecommendation};

const BAR_WIDTH: usize = 20;

/// Print a conditions header followed by the ranked table to stdout.
pub fn draw_ascii(title: &str, snap: &EnvironmentalSnapshot, list: &[ScoredRecommendation]) {
    println!("\n=== {title} ===");
    println!(
        "{} ({:.0} PSU) | water {:.1}°C | wave {:.1}m | wind {:.0} km/h | clarity {:.0} | {:?} | {:?}",
        snap.region.display_name(),
        snap.region.salinity_psu(),
        snap.water_temp_c,
        snap.wave_m,
        snap.wind_kmh,
        snap.clarity,
        snap.pressure_trend,
        snap.time_of_day,
    );

    if list.is_empty() {
        println!("  (no recommendations: land point or nothing above cutoff)");
        return;
    }

    for rec in list {
        let filled = ((rec.score / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "#".repeat(filled.min(BAR_WIDTH));
        println!(
            "  {:>5.1} [{bar:<width$}] {} {} - {} ({})",
            rec.score,
            rec.icon,
            rec.name,
            rec.reason,
            rec.trigger_summary(),
            width = BAR_WIDTH,
        );
        println!(
            "        conf {:>3}% | bait: {} | rig: {} | depth: {}",
            rec.confidence, rec.advice.bait, rec.advice.rig, rec.advice.depth
        );
    }
}

/// Serialize a recommendation list as pretty JSON, the payload shape the
/// surrounding service hands to its clients.
pub fn render_json(list: &[ScoredRecommendation]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextBuilder, RawConditions};
    use crate::ranking::{recommend_hour, RankingOptions};
    use crate::species::SpeciesCatalog;
    use chrono::NaiveDate;

    #[test]
    fn renders_without_panicking() {
        let snap = ContextBuilder::new(41.1, 29.1)
            .at(NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(), 6)
            .build(&RawConditions {
                water_temp_c: 17.0,
                wave_m: 0.6,
                wind_kmh: 10.0,
                ..Default::default()
            });
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let list = recommend_hour(&catalog, &snap, true, None, &RankingOptions::default());
        draw_ascii("test", &snap, &list);
        draw_ascii("empty", &snap, &[]);
    }

    #[test]
    fn json_payload_round_trips() {
        let snap = ContextBuilder::new(41.1, 29.1)
            .at(NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(), 6)
            .build(&RawConditions {
                water_temp_c: 17.0,
                wave_m: 0.6,
                wind_kmh: 10.0,
                ..Default::default()
            });
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let list = recommend_hour(&catalog, &snap, true, None, &RankingOptions::default());
        assert!(!list.is_empty());

        let json = render_json(&list).unwrap();
        let parsed: Vec<crate::ScoredRecommendation> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), list.len());
        for (a, b) in list.iter().zip(&parsed) {
            assert_eq!(a.species, b.species);
            assert_eq!(a.score, b.score);
            assert_eq!(a.confidence, b.confidence);
            assert_eq!(a.triggers, b.triggers);
            assert_eq!(a.advice, b.advice);
        }
    }
}
