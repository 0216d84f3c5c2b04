// config.rs - Run-time tunables, read once from TOML at startup
//
// Grid geometry, rule-table contents and the shape catalog are compile-time
// constants. Example `trail_life.toml`:
//
//     max_fps = 30.0
//     reseed_count = 3
//     activity_divisor = 25
//     rules = "trails"
//     seed = 42
//     reseed_on_cycle = false

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::rules::RulePreset;

/// Highest accepted `max_fps`; keeps the frame period well above zero.
pub const MAX_FPS: f64 = 1000.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LifeConfig {
    /// Upper bound on cycles per second; enforced by the pacer.
    pub max_fps: f64,
    /// Shapes stamped per reseed.
    pub reseed_count: usize,
    /// Reseed when activity drops below `width * height / activity_divisor`.
    pub activity_divisor: usize,
    pub rules: RulePreset,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
    /// Seeder margin. Derived from the shape library when absent.
    pub inset: Option<usize>,
    /// Also reseed when the grid repeats one of its recent states.
    pub reseed_on_cycle: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            max_fps: 30.0,
            reseed_count: 3,
            activity_divisor: 25,
            rules: RulePreset::Trails,
            seed: None,
            inset: None,
            reseed_on_cycle: false,
        }
    }
}

impl LifeConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.max_fps > 0.0 && self.max_fps <= MAX_FPS) {
            return Err(LifeError::invalid_config(format!(
                "max_fps must be in (0, {MAX_FPS}], got {}",
                self.max_fps
            )));
        }
        if self.activity_divisor == 0 {
            return Err(LifeError::invalid_config("activity_divisor must be non-zero"));
        }
        if self.reseed_count == 0 {
            return Err(LifeError::invalid_config("reseed_count must be non-zero"));
        }
        Ok(())
    }

    /// Activity below this triggers a reseed.
    pub fn activity_threshold(&self, width: usize, height: usize) -> usize {
        width * height / self.activity_divisor
    }
}
