//! # Fishcast Demo Binary
//!
//! Development driver for the scoring engine: builds a synthetic 24-hour
//! environmental series for the configured spot, runs the instant and day
//! recommendation modes, and prints ASCII tables. The real service wires the
//! same library calls to live weather/marine feeds and an HTTP layer; none
//! of that belongs in this crate.

// Test modules
#[cfg(test)]
mod tests;

use anyhow::Result;
use chrono::{Timelike, Utc};

use fishcast::config::Config;
use fishcast::noise::{self, GaussianNoise};
use fishcast::ranking::{recommend_day, recommend_instant};
use fishcast::report::{draw_ascii, render_json};
use fishcast::species::SpeciesCatalog;
use fishcast::synthetic;

fn main() -> Result<()> {
    let config = Config::load();
    let catalog = SpeciesCatalog::load_embedded()?;
    let opts = config.ranking_options();

    let now = Utc::now();
    let date = now.date_naive();
    let hour = now.hour();

    let day = synthetic::day_series(date, config.location.lat, config.location.lon);

    // Noise is opt-in via config; sigma 0 keeps the run deterministic. In
    // adaptive mode the sigma follows how unsettled the day actually is.
    let sigma = if config.engine.adaptive_noise {
        let day_chaos = day.iter().map(|s| s.chaos).sum::<f64>() / day.len() as f64;
        noise::sigma_for_chaos(day_chaos)
    } else {
        config.engine.noise_sigma
    };
    let mut noise = if sigma > 0.0 {
        Some(GaussianNoise::from_entropy(sigma))
    } else {
        None
    };

    let instant = recommend_instant(
        &catalog,
        &day,
        hour,
        config.engine.shore_context,
        noise.as_mut(),
        &opts,
    );
    let daily = recommend_day(
        &catalog,
        &day,
        config.engine.shore_context,
        noise.as_mut(),
        &opts,
    );

    if config.engine.json_output {
        println!("{}", render_json(&instant)?);
        println!("{}", render_json(&daily)?);
        return Ok(());
    }

    let center = day
        .iter()
        .find(|s| s.hour == hour)
        .unwrap_or(&day[0]);
    draw_ascii(
        &format!("{} - right now ({hour:02}:00)", config.location.name),
        center,
        &instant,
    );
    draw_ascii(&format!("{} - today", config.location.name), &day[12], &daily);

    Ok(())
}
