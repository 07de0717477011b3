//! Starfield tunables.

use serde::{Deserialize, Serialize};

use crate::Size;

/// Tunable parameters for a particle field.
///
/// Every field has a default, so a partially written config section only
/// overrides the keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Upper bound of the per-frame pulse step (smaller = slower twinkle).
    pub pulse_speed: f32,
    /// Base star hue in degrees (220 is blue).
    pub hue_base: f32,
    /// Maximum hue deviation either side of `hue_base`, in degrees.
    pub hue_spread: f32,
    /// Star saturation in percent.
    pub saturation: f32,
    /// Star lightness in percent.
    pub lightness: f32,
    /// Upper bound of a star's base radius in device pixels.
    pub max_radius: f32,
    /// Screen area (square device pixels) per star.
    pub pixels_per_star: u32,
    /// Probability that a star drifts and draws a trail.
    pub trail_probability: f32,
    /// Shortest trail in device pixels.
    pub trail_length_min: f32,
    /// Longest trail in device pixels (exclusive).
    pub trail_length_max: f32,
    /// Upper bound of drift speed in device pixels per frame.
    pub max_drift_speed: f32,
    /// Whether to paint the nebula blobs under the stars.
    pub nebula: bool,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            pulse_speed: 0.02,
            hue_base: 220.0,
            hue_spread: 10.0,
            saturation: 85.0,
            lightness: 85.0,
            max_radius: 1.5,
            pixels_per_star: 1000,
            trail_probability: 0.02,
            trail_length_min: 5.0,
            trail_length_max: 15.0,
            max_drift_speed: 0.05,
            nebula: true,
        }
    }
}

impl StarfieldConfig {
    /// Number of stars for a viewport: `floor(area / pixels_per_star)`.
    pub fn star_count(&self, size: Size) -> usize {
        let per_star = u64::from(self.pixels_per_star.max(1));
        usize::try_from(size.area() / per_star).unwrap_or(usize::MAX)
    }
}
