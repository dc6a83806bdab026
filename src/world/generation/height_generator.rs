//! Height generators

use crate::constants::generation::{DEFAULT_SEED, HEIGHT_AMPLITUDE, NOISE_FREQUENCY};
use noise::{NoiseFn, Perlin};
use serde::Deserialize;

/// Terrain height source
///
/// Must be deterministic: the same column always yields the same height.
pub trait HeightGenerator: Send + Sync {
    /// Height of the surface voxel in column (x, z)
    fn height_at(&self, x: i32, z: i32) -> i32;
}

/// Noise settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: u32,
    pub frequency: f64,
    pub amplitude: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            frequency: NOISE_FREQUENCY,
            amplitude: HEIGHT_AMPLITUDE,
        }
    }
}

/// Perlin terrain: `trunc(perlin(x * f, z * f) * amplitude)`
pub struct PerlinHeightGenerator {
    perlin: Perlin,
    frequency: f64,
    amplitude: f64,
}

impl PerlinHeightGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            frequency: config.frequency,
            amplitude: config.amplitude,
        }
    }
}

impl HeightGenerator for PerlinHeightGenerator {
    fn height_at(&self, x: i32, z: i32) -> i32 {
        let sample = self
            .perlin
            .get([x as f64 * self.frequency, z as f64 * self.frequency]);
        (sample * self.amplitude) as i32
    }
}

/// Every column at the same height
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatHeightGenerator {
    pub height: i32,
}

impl HeightGenerator for FlatHeightGenerator {
    fn height_at(&self, _x: i32, _z: i32) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perlin_is_deterministic_and_bounded() {
        let config = GenerationConfig::default();
        let a = PerlinHeightGenerator::new(&config);
        let b = PerlinHeightGenerator::new(&config);

        for x in (-50..50).step_by(7) {
            for z in (-50..50).step_by(11) {
                let h = a.height_at(x, z);
                assert_eq!(h, b.height_at(x, z));
                assert!(h.abs() <= 2 * config.amplitude as i32);
            }
        }
    }

    #[test]
    fn test_flat_generator() {
        let flat = FlatHeightGenerator { height: 4 };
        assert_eq!(flat.height_at(-100, 37), 4);
    }
}
