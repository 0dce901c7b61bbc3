//! # Species Catalog
//!
//! Static, read-only knowledge about each species: tolerance ranges, seasonal
//! efficiency, activity pattern, trigger list, and per-region tackle advice.
//! The catalog is a declarative TOML document embedded at compile time and
//! deserialized once at startup; the scorer treats profiles as pure data and
//! never branches on species identity.
//!
//! Trigger matching is centralized here as [`TriggerKind`]: every trigger is a
//! (predicate, bonus, label) rule evaluated uniformly per species, so adding a
//! trigger means adding one enum variant, not editing the scorer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::region::Region;
use crate::{EnvironmentalSnapshot, PressureTrend, Season, SolunarWindow, TimeOfDay};

/// The embedded catalog document.
const CATALOG_TOML: &str = include_str!("../data/species.toml");

/// Errors raised while loading or validating the species catalog.
///
/// These are startup errors: once a catalog has loaded cleanly, scoring
/// itself never fails.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The TOML document failed to parse
    #[error("catalog parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A profile carried out-of-contract values
    #[error("invalid profile '{species}': {reason}")]
    Invalid { species: String, reason: String },
}

/// Broad daily activity classification, used both for the activity-time
/// sub-score and for hour weighting in day-level aggregation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityPattern {
    DawnDusk,
    Night,
    Day,
    AllDay,
}

/// Preferred water transparency band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarityPreference {
    Clear,
    Turbid,
    Moderate,
    Any,
}

/// Broad habit category. [`SpeciesCategory::DeepWater`] species are
/// penalized in a shore-fishing context (they need a boat).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesCategory {
    ShorePredator,
    Pelagic,
    Demersal,
    DeepWater,
    Cephalopod,
    Schooling,
}

/// One trigger rule: a named environmental predicate with a bonus and a
/// display label. Profiles list the kinds that apply to them; the scorer
/// evaluates each listed kind against the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    PressureDrop,
    /// Adverse: rapid pressure rise shuts feeding down for sensitive species
    PressureSpike,
    Whitewater,
    CalmWater,
    StrongCurrent,
    SteadyCurrent,
    TidalFlow,
    FullMoon,
    NewMoon,
    NightDark,
    StableWeather,
    WarmWater,
    ColdWater,
    ClearWater,
    TurbidWater,
    MurkyWater,
    SolunarMajor,
    SolunarMinor,
}

impl TriggerKind {
    /// Display label used in trigger lists and reason strings.
    pub fn label(&self) -> &'static str {
        match self {
            TriggerKind::PressureDrop => "pressure drop",
            TriggerKind::PressureSpike => "pressure spike",
            TriggerKind::Whitewater => "whitewater",
            TriggerKind::CalmWater => "flat calm",
            TriggerKind::StrongCurrent => "strong current",
            TriggerKind::SteadyCurrent => "steady current",
            TriggerKind::TidalFlow => "tidal flow",
            TriggerKind::FullMoon => "full moon",
            TriggerKind::NewMoon => "new moon",
            TriggerKind::NightDark => "dark night",
            TriggerKind::StableWeather => "stable weather",
            TriggerKind::WarmWater => "warm water",
            TriggerKind::ColdWater => "cold water",
            TriggerKind::ClearWater => "clear water",
            TriggerKind::TurbidWater => "turbid water",
            TriggerKind::MurkyWater => "murky water",
            TriggerKind::SolunarMajor => "solunar major",
            TriggerKind::SolunarMinor => "solunar minor",
        }
    }

    /// Whether this trigger fires for the given snapshot.
    pub fn matches(&self, snap: &EnvironmentalSnapshot) -> bool {
        match self {
            TriggerKind::PressureDrop => matches!(
                snap.pressure_trend,
                PressureTrend::Falling | PressureTrend::FallingFast
            ),
            TriggerKind::PressureSpike => snap.pressure_trend == PressureTrend::RisingFast,
            TriggerKind::Whitewater => snap.wave_m > 0.8,
            TriggerKind::CalmWater => snap.wave_m < 0.4,
            TriggerKind::StrongCurrent => snap.current_ms > 0.6,
            TriggerKind::SteadyCurrent => (0.25..=0.6).contains(&snap.current_ms),
            TriggerKind::TidalFlow => snap.tide_flow > 0.5,
            TriggerKind::FullMoon => snap.moon_fraction > 0.85,
            TriggerKind::NewMoon => snap.moon_fraction < 0.15,
            TriggerKind::NightDark => {
                snap.time_of_day == TimeOfDay::Night && snap.moon_fraction < 0.3
            }
            TriggerKind::StableWeather => {
                snap.pressure_trend == PressureTrend::Stable && snap.rain_mm < 0.2
            }
            TriggerKind::WarmWater => snap.water_temp_c > 22.0,
            TriggerKind::ColdWater => snap.water_temp_c < 14.0,
            TriggerKind::ClearWater => snap.clarity > 70.0,
            TriggerKind::TurbidWater => snap.clarity < 50.0,
            TriggerKind::MurkyWater => snap.clarity < 30.0,
            TriggerKind::SolunarMajor => snap.solunar == SolunarWindow::Major,
            TriggerKind::SolunarMinor => snap.solunar == SolunarWindow::Minor,
        }
    }

    /// Signed bonus contributed when the trigger fires. Current and pressure
    /// triggers scale with the species' own preference/sensitivity.
    pub fn bonus(&self, profile: &SpeciesProfile) -> f64 {
        match self {
            TriggerKind::PressureDrop => 5.0,
            TriggerKind::PressureSpike => -6.0 * profile.pressure_sensitivity,
            TriggerKind::Whitewater => 5.0,
            TriggerKind::CalmWater => 5.0,
            TriggerKind::StrongCurrent => 6.0 * profile.current_preference,
            TriggerKind::SteadyCurrent => 4.0,
            TriggerKind::TidalFlow => 5.0,
            TriggerKind::FullMoon => 5.0,
            TriggerKind::NewMoon => 5.0,
            TriggerKind::NightDark => 5.0,
            TriggerKind::StableWeather => 5.0,
            TriggerKind::WarmWater => 4.0,
            TriggerKind::ColdWater => 4.0,
            TriggerKind::ClearWater => 5.0,
            TriggerKind::TurbidWater => 5.0,
            TriggerKind::MurkyWater => 5.0,
            TriggerKind::SolunarMajor => 4.0,
            TriggerKind::SolunarMinor => 2.0,
        }
    }
}

/// Species efficiency multiplier per season, each in [0, 1].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SeasonalEfficiency {
    pub winter: f64,
    pub spring: f64,
    pub summer: f64,
    pub autumn: f64,
}

impl SeasonalEfficiency {
    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter,
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Autumn => self.autumn,
        }
    }
}

/// Water temperature tolerance: floor, optimal plateau, ceiling (°C).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TempRange {
    pub min: f64,
    pub opt_min: f64,
    pub opt_max: f64,
    pub max: f64,
}

impl TempRange {
    /// Midpoint of the optimal plateau.
    pub fn optimum(&self) -> f64 {
        (self.opt_min + self.opt_max) / 2.0
    }
}

/// Tackle advice resolved for a region: what to throw, how, and where.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionAdvice {
    /// Bait or lure suggestion
    pub bait: String,
    /// Rig/technique suggestion
    pub rig: String,
    /// Preferred depth or structure
    pub depth: String,
}

/// Static profile for one species. Loaded once from the catalog, read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Catalog identifier (stable, lowercase)
    pub id: String,
    /// Display name
    pub name: String,
    /// Emoji/icon tag
    pub icon: String,
    pub category: SpeciesCategory,
    /// Regions this species is worth targeting in. The open-water tag
    /// bypasses this filter.
    pub regions: Vec<Region>,
    pub season_eff: SeasonalEfficiency,
    pub temp: TempRange,
    /// Preferred wave height (m) and tolerance width
    pub wave_ideal: f64,
    pub wave_sigma: f64,
    /// Affinity for moving water, 0 (slack) to 1 (ripping current)
    pub current_preference: f64,
    pub clarity_preference: ClarityPreference,
    pub activity: ActivityPattern,
    /// How strongly barometric swings move this species, 0-1
    pub pressure_sensitivity: f64,
    /// Trigger rules that apply to this species
    pub triggers: Vec<TriggerKind>,
    /// Default tackle advice
    pub advice: RegionAdvice,
    /// Region-specific advice overrides
    #[serde(default)]
    pub advice_overrides: HashMap<Region, RegionAdvice>,
}

impl SpeciesProfile {
    /// Advice text for a query region, falling back to the default.
    pub fn advice_for(&self, region: Region) -> RegionAdvice {
        self.advice_overrides
            .get(&region)
            .cloned()
            .unwrap_or_else(|| self.advice.clone())
    }

    /// Whether this species belongs in results for the given region.
    /// Open/unassigned water never filters anything out.
    pub fn available_in(&self, region: Region) -> bool {
        region == Region::OpenWater || self.regions.contains(&region)
    }
}

/// The loaded, validated catalog. Order is significant: it is the
/// deterministic tie-break for ranking.
#[derive(Clone, Debug, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesProfile>,
}

impl SpeciesCatalog {
    /// Load and validate the embedded catalog.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::from_toml_str(CATALOG_TOML)
    }

    /// Parse a catalog from TOML text and validate every profile.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: SpeciesCatalog = toml::from_str(text)?;
        for profile in &catalog.species {
            catalog.validate(profile)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&SpeciesProfile> {
        self.species.iter().find(|s| s.id == id)
    }

    fn validate(&self, profile: &SpeciesProfile) -> Result<(), CatalogError> {
        let invalid = |reason: String| CatalogError::Invalid {
            species: profile.id.clone(),
            reason,
        };

        let eff = &profile.season_eff;
        for (name, value) in [
            ("winter", eff.winter),
            ("spring", eff.spring),
            ("summer", eff.summer),
            ("autumn", eff.autumn),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!(
                    "seasonal efficiency {name}={value} outside [0, 1]"
                )));
            }
        }

        let t = &profile.temp;
        if !(t.min < t.opt_min && t.opt_min <= t.opt_max && t.opt_max < t.max) {
            return Err(invalid(format!(
                "temperature range not ordered: {} / {} / {} / {}",
                t.min, t.opt_min, t.opt_max, t.max
            )));
        }

        if !(0.0..=1.0).contains(&profile.current_preference) {
            return Err(invalid("current preference outside [0, 1]".to_string()));
        }
        if !(0.0..=1.0).contains(&profile.pressure_sensitivity) {
            return Err(invalid("pressure sensitivity outside [0, 1]".to_string()));
        }
        if profile.wave_sigma <= 0.0 {
            return Err(invalid("wave sigma must be positive".to_string()));
        }
        if profile.regions.is_empty() {
            return Err(invalid("empty region list".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads_and_validates() {
        let catalog = SpeciesCatalog::load_embedded().expect("embedded catalog must be valid");
        assert!(catalog.len() >= 18, "expected full roster, got {}", catalog.len());
        // Spot-check a couple of well-known profiles
        let levrek = catalog.get("levrek").expect("sea bass present");
        assert_eq!(levrek.category, SpeciesCategory::ShorePredator);
        assert!(levrek.triggers.contains(&TriggerKind::PressureDrop));
        let kalamar = catalog.get("kalamar").expect("squid present");
        assert_eq!(kalamar.category, SpeciesCategory::Cephalopod);
        // The tide runners all carry the tidal-flow trigger
        for id in ["levrek", "lufer", "palamut"] {
            let profile = catalog.get(id).unwrap();
            assert!(
                profile.triggers.contains(&TriggerKind::TidalFlow),
                "{id} missing tidal flow"
            );
        }
    }

    #[test]
    fn region_availability_and_open_water() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let kalkan = catalog.get("kalkan").unwrap();
        assert!(kalkan.available_in(Region::BlackSea));
        assert!(!kalkan.available_in(Region::Mediterranean));
        // Open water bypasses the region filter entirely
        assert!(kalkan.available_in(Region::OpenWater));
    }

    #[test]
    fn advice_overrides_fall_back_to_default() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let levrek = catalog.get("levrek").unwrap();
        let default = levrek.advice_for(Region::Mediterranean);
        assert!(!default.bait.is_empty());
        let override_hit = levrek.advice_for(Region::BlackSea);
        // The Black Sea override exists in the shipped catalog
        assert_ne!(override_hit, default);
    }

    #[test]
    fn rejects_unordered_temperature_range() {
        let doc = r#"
            [[species]]
            id = "broken"
            name = "Broken"
            icon = "x"
            category = "demersal"
            regions = ["aegean"]
            season_eff = { winter = 0.5, spring = 0.5, summer = 0.5, autumn = 0.5 }
            temp = { min = 20.0, opt_min = 15.0, opt_max = 18.0, max = 25.0 }
            wave_ideal = 0.5
            wave_sigma = 0.3
            current_preference = 0.5
            clarity_preference = "any"
            activity = "day"
            pressure_sensitivity = 0.5
            triggers = []
            advice = { bait = "worm", rig = "bottom", depth = "5m" }
        "#;
        let err = SpeciesCatalog::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { .. }), "{err}");
    }

    #[test]
    fn rejects_out_of_band_efficiency() {
        let doc = r#"
            [[species]]
            id = "broken"
            name = "Broken"
            icon = "x"
            category = "demersal"
            regions = ["aegean"]
            season_eff = { winter = 1.5, spring = 0.5, summer = 0.5, autumn = 0.5 }
            temp = { min = 10.0, opt_min = 15.0, opt_max = 18.0, max = 25.0 }
            wave_ideal = 0.5
            wave_sigma = 0.3
            current_preference = 0.5
            clarity_preference = "any"
            activity = "day"
            pressure_sensitivity = 0.5
            triggers = []
            advice = { bait = "worm", rig = "bottom", depth = "5m" }
        "#;
        assert!(SpeciesCatalog::from_toml_str(doc).is_err());
    }

    #[test]
    fn trigger_spike_is_adverse_and_scaled() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let levrek = catalog.get("levrek").unwrap();
        assert!(TriggerKind::PressureSpike.bonus(levrek) < 0.0);
        let strong = TriggerKind::StrongCurrent.bonus(levrek);
        assert!(strong > 0.0 && strong <= 6.0);
    }
}
