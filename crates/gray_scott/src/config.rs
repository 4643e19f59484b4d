//! TOML configuration of the simulation core.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::params::{ParameterSteps, SimulationParams};
use crate::seeding::CenterSquareSeeder;

/// Grid dimensions, fixed for the lifetime of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
  pub width: u32,
  pub height: u32,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      width: 800,
      height: 800,
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkersConfig {
  /// Worker threads. `0` discovers the hardware thread count.
  pub threads: usize,
}

/// Initial condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
  pub window_divisor: u32,
  /// Fixed RNG seed. Omit for a different texture on every run.
  pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
  fn default() -> Self {
    Self {
      window_divisor: 20,
      rng_seed: None,
    }
  }
}

impl SeedConfig {
  pub fn seeder(&self) -> CenterSquareSeeder {
    let seeder = CenterSquareSeeder::new(self.window_divisor);
    match self.rng_seed {
      Some(seed) => seeder.with_rng_seed(seed),
      None => seeder,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
  /// Stroke half-width in cells.
  pub radius: i64,
}

impl Default for BrushConfig {
  fn default() -> Self {
    Self { radius: 4 }
  }
}

/// Top-level simulation configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
  pub grid: GridConfig,
  pub workers: WorkersConfig,
  pub params: SimulationParams,
  pub seed: SeedConfig,
  pub brush: BrushConfig,
  pub steps: ParameterSteps,
}

impl SimulationConfig {
  /// Parses and validates a TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads, parses and validates the file at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config = Self::from_toml_str(&source)?;
    log::info!("Loaded simulation config from {}", path.display());
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.grid.width == 0 || self.grid.height == 0 {
      return Err(ConfigError::Invalid(format!(
        "grid must be at least 1x1, got {}x{}",
        self.grid.width, self.grid.height
      )));
    }
    if self.seed.window_divisor == 0 {
      return Err(ConfigError::Invalid(
        "seed.window_divisor must be positive".into(),
      ));
    }
    if self.brush.radius < 0 {
      return Err(ConfigError::Invalid(format!(
        "brush.radius must not be negative, got {}",
        self.brush.radius
      )));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_uses_defaults() {
    let config = SimulationConfig::from_toml_str("").unwrap();
    assert_eq!(config, SimulationConfig::default());
    assert_eq!(config.grid.width, 800);
    assert_eq!(config.params.time_step, 4.0);
    assert_eq!(config.seed.rng_seed, None);
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let config = SimulationConfig::from_toml_str(
      r#"
      [grid]
      width = 64

      [params]
      kill_rate = 0.062

      [seed]
      rng_seed = 7
      "#,
    )
    .unwrap();

    assert_eq!(config.grid.width, 64);
    assert_eq!(config.grid.height, 800);
    assert_eq!(config.params.kill_rate, 0.062);
    assert_eq!(config.params.feed_rate, SimulationParams::default().feed_rate);
    assert_eq!(config.seed.rng_seed, Some(7));
    assert_eq!(config.seed.window_divisor, 20);
  }

  #[test]
  fn rejects_invalid_values() {
    for source in [
      "[grid]\nwidth = 0",
      "[seed]\nwindow_divisor = 0",
      "[brush]\nradius = -1",
    ] {
      let err = SimulationConfig::from_toml_str(source).unwrap_err();
      assert!(matches!(err, ConfigError::Invalid(_)), "{source}: {err}");
    }
  }

  #[test]
  fn malformed_toml_is_a_parse_error() {
    let err = SimulationConfig::from_toml_str("[grid\nwidth = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let err = SimulationConfig::load("/nonexistent/gray_scott.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
  }
}
