//! Citation frequency heatmap colours.
//!
//! Frequency is normalised against the answer's busiest citation and mapped
//! onto a linear HSL ramp: cool pale blue for unused citations, darker and
//! more saturated toward purple-blue as usage rises.

use serde::{Serialize, Serializer};
use std::fmt;

// ============================================================================
// Scale Endpoints
// ============================================================================

pub const HUE_LOW: f64 = 210.0;
pub const HUE_HIGH: f64 = 180.0;
pub const SATURATION_LOW: f64 = 70.0;
pub const SATURATION_HIGH: f64 = 90.0;
pub const LIGHTNESS_LOW: f64 = 90.0;
pub const LIGHTNESS_HIGH: f64 = 50.0;

// ============================================================================
// Colour
// ============================================================================

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl HslColor {
    fn lerp(intensity: f64) -> Self {
        Self {
            hue: HUE_LOW + (HUE_HIGH - HUE_LOW) * intensity,
            saturation: SATURATION_LOW + (SATURATION_HIGH - SATURATION_LOW) * intensity,
            lightness: LIGHTNESS_LOW + (LIGHTNESS_HIGH - LIGHTNESS_LOW) * intensity,
        }
    }
}

impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            trim_float(self.hue),
            trim_float(self.saturation),
            trim_float(self.lightness)
        )
    }
}

impl Serialize for HslColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One decimal place, without a trailing `.0`.
fn trim_float(v: f64) -> String {
    let s = format!("{:.1}", v);
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// `count / max_frequency`, clamped to `[0, 1]`. A zero maximum counts as 1.
pub fn intensity(count: usize, max_frequency: usize) -> f64 {
    let max = max_frequency.max(1) as f64;
    (count as f64 / max).clamp(0.0, 1.0)
}

pub fn color_for(count: usize, max_frequency: usize) -> HslColor {
    HslColor::lerp(intensity(count, max_frequency))
}

/// Swatches for the "Low" and "High" ends of the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Legend {
    pub low: HslColor,
    pub high: HslColor,
}

impl Legend {
    pub fn new(max_frequency: usize) -> Self {
        Self {
            low: color_for(0, max_frequency),
            high: color_for(max_frequency, max_frequency),
        }
    }
}
