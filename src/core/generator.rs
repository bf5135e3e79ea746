//! Deterministic candidate palette built from a tiered hue ladder.
//!
//! The ladder spreads hues as evenly as it can before saturation and
//! lightness are varied: 12 primary hues, 12 secondary hues half a step
//! between them, then 24 tertiary hues at the quarter steps.

use super::color::{Color, Hsl};
use serde::{Deserialize, Serialize};

pub const PRIMARY_HUES: usize = 12;
pub const LADDER_LEN: usize = PRIMARY_HUES * 4;

pub const SATURATION_LEVELS: [f64; 3] = [0.9, 0.7, 0.5];
pub const LIGHTNESS_LEVELS: [f64; 3] = [0.6, 0.4, 0.8];

/// One palette candidate. Keeps the HSL it was generated from because the
/// perceptual metric works on HSL, not on the quantized color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub index: usize,
    pub hsl: Hsl,
    pub color: Color,
}

/// Primary, then secondary, then tertiary hues, in that fixed order.
pub fn hue_ladder() -> Vec<f64> {
    let steps = PRIMARY_HUES as f64;
    let mut hues = Vec::with_capacity(LADDER_LEN);
    hues.extend((0..PRIMARY_HUES).map(|i| i as f64 / steps));
    hues.extend((0..PRIMARY_HUES).map(|i| (i as f64 + 0.5) / steps));
    for i in 0..PRIMARY_HUES {
        hues.push((i as f64 + 0.25) / steps);
        hues.push((i as f64 + 0.75) / steps);
    }
    hues
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    saturation_levels: Vec<f64>,
    lightness_levels: Vec<f64>,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            saturation_levels: SATURATION_LEVELS.to_vec(),
            lightness_levels: LIGHTNESS_LEVELS.to_vec(),
        }
    }
}

impl Generator {
    pub fn new(saturation_levels: Vec<f64>, lightness_levels: Vec<f64>) -> Self {
        Self {
            saturation_levels,
            lightness_levels,
        }
    }

    /// Produce `min(count, 48)` swatches. Saturation cycles every step,
    /// lightness every `saturation_levels.len()` steps, so neighbours differ
    /// in more than one dimension.
    pub fn generate(&self, count: usize) -> Vec<Swatch> {
        let sat_n = self.saturation_levels.len();
        let light_n = self.lightness_levels.len();
        if sat_n == 0 || light_n == 0 {
            log::warn!("Empty saturation or lightness levels, no swatches generated");
            return vec![];
        }

        let swatches: Vec<Swatch> = hue_ladder()
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, hue)| {
                let saturation = self.saturation_levels[index % sat_n];
                let lightness = self.lightness_levels[(index / sat_n) % light_n];
                let hsl = Hsl::new(hue, saturation, lightness);
                Swatch {
                    index,
                    hsl,
                    color: hsl.to_rgb(),
                }
            })
            .collect();
        if swatches.len() < count {
            log::debug!(
                "Hue ladder exhausted: requested {} colors, generated {}",
                count,
                swatches.len()
            );
        }
        swatches
    }
}

/// [`Generator::generate`] with the default levels.
pub fn generate(count: usize) -> Vec<Swatch> {
    Generator::default().generate(count)
}
