//! # Configuration Management
//!
//! Loads runtime settings from `fishcast.toml`: the query location, the
//! fishing context (shore or boat), and the ranking/noise knobs. Missing or
//! invalid files fall back to a sensible default so the demo binary always
//! starts.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ranking::RankingOptions;

/// Application configuration loaded from fishcast.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Query location
    pub location: LocationConfig,
    /// Engine and ranking knobs
    pub engine: EngineConfig,
}

/// Where the forecast is evaluated
#[derive(Debug, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
    /// Human-readable spot name for reports
    pub name: String,
}

/// Scoring and ranking parameters
#[derive(Debug, Deserialize, Serialize)]
pub struct EngineConfig {
    /// True for shore fishing (penalizes boat-only species)
    pub shore_context: bool,
    /// Maximum recommendations per response
    pub max_results: usize,
    /// Drop results scoring below this
    pub min_score: f64,
    /// Opt-in dominance scaling (legacy behavior, default off)
    pub dominance_scaling: bool,
    /// Gaussian jitter sigma; 0 disables noise entirely
    pub noise_sigma: f64,
    /// Derive the jitter sigma from the day's chaos index instead of
    /// `noise_sigma`
    #[serde(default)]
    pub adaptive_noise: bool,
    /// Emit recommendation lists as JSON instead of ASCII tables
    #[serde(default)]
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                lat: 41.05,
                lon: 29.05,
                name: "Bosphorus, Istanbul".to_string(),
            },
            engine: EngineConfig {
                shore_context: true,
                max_results: 15,
                min_score: 15.0,
                dominance_scaling: false,
                noise_sigma: 0.0,
                adaptive_noise: false,
                json_output: false,
            },
        }
    }
}

impl Config {
    /// Load configuration from fishcast.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path("fishcast.toml")
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    println!("Loaded configuration for spot: {}", config.location.name);
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration (Bosphorus)");
                    Self::default()
                }
            },
            Err(_) => {
                eprintln!("Info: No config file found, using default configuration (Bosphorus)");
                Self::default()
            }
        }
    }

    /// Save current configuration to fishcast.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write("fishcast.toml", contents)?;
        println!("Configuration saved to fishcast.toml");
        Ok(())
    }

    /// Ranking options implied by this configuration.
    pub fn ranking_options(&self) -> RankingOptions {
        RankingOptions {
            max_results: self.engine.max_results,
            min_score: self.engine.min_score,
            dominance_scaling: self.engine.dominance_scaling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.location.name, "Bosphorus, Istanbul");
        assert!(config.engine.shore_context);
        assert_eq!(config.engine.max_results, 15);
        assert_eq!(config.engine.noise_sigma, 0.0);
        assert!(!config.engine.dominance_scaling);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.location.name, parsed.location.name);
        assert_eq!(config.engine.max_results, parsed.engine.max_results);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.location.name, "Bosphorus, Istanbul");
    }

    #[test]
    fn test_load_custom_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [location]
            lat = 38.4
            lon = 26.8
            name = "Izmir Bay"

            [engine]
            shore_context = false
            max_results = 5
            min_score = 20.0
            dominance_scaling = true
            noise_sigma = 2.5
            "#
        )
        .unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config.location.name, "Izmir Bay");
        assert!(!config.engine.shore_context);
        assert_eq!(config.ranking_options().max_results, 5);
        assert!(config.ranking_options().dominance_scaling);
        // Optional knobs absent from the file fall back to their defaults
        assert!(!config.engine.adaptive_noise);
        assert!(!config.engine.json_output);
    }
}
