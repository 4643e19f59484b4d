use std::path::Path;

use bevy::prelude::*;
use gray_scott::{ConfigError, SimulationConfig};
use serde::Deserialize;

/// Default location, relative to the crate directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/viewer.config.toml";

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ViewerConfig {
  pub window: WindowConfig,
  pub render: RenderConfig,
  pub input: InputConfig,
  pub simulation: SimulationConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
  pub title: String,
  /// Screen pixels per grid cell.
  pub scale: f32,
}

impl Default for WindowConfig {
  fn default() -> Self {
    Self {
      title: "Gray-Scott".into(),
      scale: 1.0,
    }
  }
}

/// How cells are turned into colors.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
  /// `(a - b) * 255` on all three channels.
  #[default]
  Grayscale,
  /// Hue ramp from blue (substrate) to red (activator).
  Hue,
}

impl ColorMode {
  pub fn next(self) -> Self {
    match self {
      ColorMode::Grayscale => ColorMode::Hue,
      ColorMode::Hue => ColorMode::Grayscale,
    }
  }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct RenderConfig {
  pub color_mode: ColorMode,
  pub steps_per_frame: u32,
}

impl Default for RenderConfig {
  fn default() -> Self {
    Self {
      color_mode: ColorMode::Grayscale,
      steps_per_frame: 1,
    }
  }
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(default)]
pub struct InputConfig {
  /// Paint only while the left mouse button is held. Otherwise every cursor
  /// move paints.
  pub paint_requires_button: bool,
}

impl ViewerConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let config: Self = toml::from_str(&source)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(self.window.scale.is_finite() && self.window.scale > 0.0) {
      return Err(ConfigError::Invalid(format!(
        "window.scale must be positive, got {}",
        self.window.scale
      )));
    }
    self.simulation.validate()
  }
}

/// Runtime render settings, adjustable from the keyboard.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RenderSettings {
  pub color_mode: ColorMode,
  pub steps_per_frame: u32,
  pub scale: f32,
}

/// Runtime input settings.
#[derive(Resource, Debug, Clone, Copy)]
pub struct InputSettings {
  pub paint_requires_button: bool,
}
