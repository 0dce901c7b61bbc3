//! # Region Classification and Lookup Tables
//!
//! The engine covers the Turkish seas plus a catch-all open-water tag. Each
//! region carries a small table of physical characteristics that the rest of
//! the engine reads through accessor methods: salinity, a current
//! amplification factor for enclosed/strait waters, preferred wind arcs, and
//! a monthly climatological water temperature used as a safe default when the
//! marine feed hands back garbage.
//!
//! Modeling region as an enum with associated data keeps region knowledge in
//! one place instead of repeated `match` arms scattered through the scoring
//! code.

use serde::{Deserialize, Serialize};

/// Geographic region tag for a queried point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    BlackSea,
    Marmara,
    Aegean,
    Mediterranean,
    /// Outside the covered bounding box, or unassigned coastal water.
    /// Species region filters do not apply here.
    OpenWater,
}

/// An inclusive arc of compass directions, possibly wrapping through north.
///
/// `WindArc { from: 315.0, to: 45.0 }` covers NW through NE.
#[derive(Clone, Copy, Debug)]
pub struct WindArc {
    pub from: f64,
    pub to: f64,
}

impl WindArc {
    /// True if `deg` (0-360) falls inside the arc.
    pub fn contains(&self, deg: f64) -> bool {
        let d = deg.rem_euclid(360.0);
        if self.from <= self.to {
            d >= self.from && d <= self.to
        } else {
            // Arc wraps through 0°
            d >= self.from || d <= self.to
        }
    }
}

impl Region {
    /// Classify a lat/lon point into a region using fixed bounding boxes.
    ///
    /// Anything outside the covered window (lat 35-43, lon 25-46) is tagged
    /// [`Region::OpenWater`].
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        if !(35.0..=43.0).contains(&lat) || !(25.0..=46.0).contains(&lon) {
            return Region::OpenWater;
        }
        if lat > 41.0 {
            Region::BlackSea
        } else if lat > 40.0 && lon < 30.0 {
            Region::Marmara
        } else if lat > 36.0 && lon < 30.0 {
            Region::Aegean
        } else {
            Region::Mediterranean
        }
    }

    /// Typical surface salinity in PSU.
    pub fn salinity_psu(&self) -> f64 {
        match self {
            Region::BlackSea => 18.0,
            Region::Marmara => 22.0,
            Region::Aegean => 38.0,
            Region::Mediterranean => 39.0,
            Region::OpenWater => 35.0,
        }
    }

    /// Current amplification applied on top of the wave/wind estimate.
    ///
    /// Strait and enclosed basins funnel flow; the open sea does not.
    pub fn current_multiplier(&self) -> f64 {
        match self {
            Region::Marmara => 1.4,
            Region::BlackSea => 1.15,
            Region::Aegean => 1.1,
            Region::Mediterranean => 1.0,
            Region::OpenWater => 1.0,
        }
    }

    /// High-scoring wind arc for this region (productive onshore/offshore flow).
    pub fn favored_wind_arc(&self) -> WindArc {
        match self {
            // Poyraz (NE) stirs the Black Sea coast
            Region::BlackSea => WindArc { from: 0.0, to: 90.0 },
            // North through NE funnels through the straits
            Region::Marmara => WindArc { from: 330.0, to: 60.0 },
            // Southerly lodos pushes warm water onshore
            Region::Aegean => WindArc { from: 135.0, to: 240.0 },
            Region::Mediterranean => WindArc { from: 135.0, to: 240.0 },
            Region::OpenWater => WindArc { from: 0.0, to: 360.0 },
        }
    }

    /// Workable (medium-scoring) wind arc; everything else scores low.
    pub fn workable_wind_arc(&self) -> WindArc {
        match self {
            Region::BlackSea => WindArc { from: 270.0, to: 135.0 },
            Region::Marmara => WindArc { from: 270.0, to: 120.0 },
            Region::Aegean => WindArc { from: 90.0, to: 270.0 },
            Region::Mediterranean => WindArc { from: 90.0, to: 270.0 },
            Region::OpenWater => WindArc { from: 0.0, to: 360.0 },
        }
    }

    /// Climatological sea surface temperature for a calendar month (1-12).
    ///
    /// Used by the context builder in place of missing or implausible water
    /// temperature readings, so a dead sensor upstream does not zero out the
    /// temperature fit for every species at once.
    pub fn climatology_water_temp(&self, month: u32) -> f64 {
        let idx = (month.clamp(1, 12) - 1) as usize;
        const BLACK_SEA: [f64; 12] = [
            8.5, 7.5, 8.0, 10.5, 15.0, 20.5, 24.0, 25.0, 22.5, 18.0, 14.0, 10.5,
        ];
        const MARMARA: [f64; 12] = [
            9.5, 8.5, 9.0, 11.5, 16.0, 21.0, 24.5, 25.0, 23.0, 19.0, 15.0, 11.5,
        ];
        const AEGEAN: [f64; 12] = [
            14.5, 14.0, 14.5, 16.0, 19.0, 22.5, 24.5, 25.0, 23.5, 21.0, 18.5, 16.0,
        ];
        const MEDITERRANEAN: [f64; 12] = [
            17.0, 16.5, 16.5, 17.5, 20.0, 24.0, 27.0, 28.0, 27.0, 24.5, 21.0, 18.5,
        ];
        const OPEN: [f64; 12] = [
            15.0, 14.5, 14.5, 15.5, 17.5, 20.5, 23.0, 24.0, 23.0, 21.0, 18.5, 16.5,
        ];
        match self {
            Region::BlackSea => BLACK_SEA[idx],
            Region::Marmara => MARMARA[idx],
            Region::Aegean => AEGEAN[idx],
            Region::Mediterranean => MEDITERRANEAN[idx],
            Region::OpenWater => OPEN[idx],
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::BlackSea => "Black Sea",
            Region::Marmara => "Sea of Marmara",
            Region::Aegean => "Aegean",
            Region::Mediterranean => "Mediterranean",
            Region::OpenWater => "Open water",
        }
    }
}
