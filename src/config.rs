//! Configuration for cave generation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CaveError, Result};

/// Marker accepted in place of a numeric seed: `"seed": "random"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandomSeed {
    Random,
}

/// Either an explicit seed or a request for a fresh one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedSetting {
    Fixed(u64),
    Random(RandomSeed),
}

impl SeedSetting {
    pub const RANDOM: SeedSetting = SeedSetting::Random(RandomSeed::Random);

    /// The seed to feed the generator. Random mode derives it from the wall
    /// clock; the value is reported back on the generated cave so a run can
    /// be reproduced.
    pub fn resolve(&self) -> u64 {
        match *self {
            SeedSetting::Fixed(seed) => seed,
            SeedSetting::Random(_) => {
                let now = chrono::Utc::now();
                now.timestamp_nanos_opt()
                    .map(|nanos| nanos as u64)
                    .unwrap_or_else(|| now.timestamp() as u64)
            }
        }
    }
}

impl Default for SeedSetting {
    fn default() -> Self {
        SeedSetting::RANDOM
    }
}

impl From<Option<u64>> for SeedSetting {
    fn from(seed: Option<u64>) -> Self {
        seed.map(SeedSetting::Fixed).unwrap_or(SeedSetting::RANDOM)
    }
}

/// Parameters for a single generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    /// Map width in cells (at least 3).
    pub width: usize,

    /// Map height in cells (at least 3).
    pub height: usize,

    /// Chance (0-100) that an interior cell starts as wall.
    pub fill_percent: u8,

    pub seed: SeedSetting,

    /// Cellular automaton passes applied after the random fill.
    pub smoothing_iterations: u32,

    /// Wall regions smaller than this become floor.
    pub min_wall_region_size: usize,

    /// Floor regions smaller than this become wall.
    pub min_room_region_size: usize,

    /// World-space edge length of one mesh square.
    pub square_size: f32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 72,
            fill_percent: 47,
            seed: SeedSetting::RANDOM,
            smoothing_iterations: 5,
            min_wall_region_size: 50,
            min_room_region_size: 50,
            square_size: 1.0,
        }
    }
}

impl CaveConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedSetting::Fixed(seed);
        self
    }

    /// Check dimensions, fill and square size.
    pub fn validate(&self) -> Result<()> {
        if self.width < 3 || self.height < 3 {
            return Err(CaveError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(CaveError::InvalidFillPercent(self.fill_percent));
        }
        if !self.square_size.is_finite() || self.square_size <= 0.0 {
            return Err(CaveError::InvalidSquareSize(self.square_size));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config file; missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, SeedSetting::RANDOM);
    }

    #[test]
    fn test_validate_rejects_small_dimensions() {
        let config = CaveConfig {
            width: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CaveError::InvalidDimension { width: 2, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_fill_over_100() {
        let config = CaveConfig {
            fill_percent: 101,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CaveError::InvalidFillPercent(101))));
    }

    #[test]
    fn test_validate_rejects_bad_square_size() {
        let config = CaveConfig {
            square_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CaveError::InvalidSquareSize(_))));
    }

    #[test]
    fn test_seed_parses_number_or_random() {
        let fixed = CaveConfig::from_json_str(r#"{"seed": 42}"#).unwrap();
        assert_eq!(fixed.seed, SeedSetting::Fixed(42));
        assert_eq!(fixed.seed.resolve(), 42);

        let random = CaveConfig::from_json_str(r#"{"seed": "random", "width": 20}"#).unwrap();
        assert_eq!(random.seed, SeedSetting::RANDOM);
        assert_eq!(random.width, 20);
        assert_eq!(random.height, CaveConfig::default().height);
    }

    #[test]
    fn test_seed_rejects_unknown_keyword() {
        assert!(matches!(
            CaveConfig::from_json_str(r#"{"seed": "sometimes"}"#),
            Err(CaveError::Json(_))
        ));
    }

    #[test]
    fn test_config_json_roundtrip_keeps_random_keyword() {
        let json = serde_json::to_string(&CaveConfig::default()).unwrap();
        assert!(json.contains(r#""seed":"random""#));
    }
}
