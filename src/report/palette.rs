//! Fixed color tables for conditions and the repair gauge.

use crate::core::RoughnessCondition;
use serde::Serialize;

/// Map marker color per condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Green,
    Blue,
    Orange,
    Red,
    Gray,
}

impl MarkerColor {
    pub fn for_condition(condition: &RoughnessCondition) -> Self {
        match condition {
            RoughnessCondition::VeryGood => MarkerColor::Green,
            RoughnessCondition::Good => MarkerColor::Blue,
            RoughnessCondition::Fair => MarkerColor::Orange,
            RoughnessCondition::Poor => MarkerColor::Red,
            RoughnessCondition::Unrecognized(_) => MarkerColor::Gray,
        }
    }

    /// Hex color used for charts
    pub fn hex(&self) -> &'static str {
        match self {
            MarkerColor::Green => "#2ecc71",
            MarkerColor::Blue => "#3498db",
            MarkerColor::Orange => "#f39c12",
            MarkerColor::Red => "#e74c3c",
            MarkerColor::Gray => "#95a5a6",
        }
    }
}

/// Chart color for a condition
pub fn condition_hex(condition: &RoughnessCondition) -> &'static str {
    MarkerColor::for_condition(condition).hex()
}

/// A colored range on the repair gauge (percent of segments)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub lower: f64,
    pub upper: f64,
    pub color: &'static str,
}

pub static GAUGE_BANDS: [GaugeBand; 4] = [
    GaugeBand {
        lower: 0.0,
        upper: 20.0,
        color: "#2ecc71",
    },
    GaugeBand {
        lower: 20.0,
        upper: 40.0,
        color: "#f1c40f",
    },
    GaugeBand {
        lower: 40.0,
        upper: 60.0,
        color: "#f39c12",
    },
    GaugeBand {
        lower: 60.0,
        upper: 100.0,
        color: "#e74c3c",
    },
];

/// Repair share above which the gauge marks the network as critical
pub const GAUGE_THRESHOLD: f64 = 30.0;

/// Band containing `value`; values past the last band clamp to it
pub fn gauge_band(value: f64) -> &'static GaugeBand {
    GAUGE_BANDS
        .iter()
        .find(|band| value < band.upper)
        .unwrap_or(&GAUGE_BANDS[GAUGE_BANDS.len() - 1])
}
