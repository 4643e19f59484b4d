//! Simulation parameters.
//!
//! [`SimulationParams`] is passed by reference into every step. Workers read
//! it concurrently; it only changes between steps, through the mutator.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::ParameterError;

/// Tunables of the Gray-Scott model.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
  /// Feed rate `F`.
  pub feed_rate: f64,
  /// Kill rate `K`.
  pub kill_rate: f64,
  /// Diffusion rate of the substrate `Da`.
  pub diffusion_rate_a: f64,
  /// Diffusion rate of the activator `Db`.
  pub diffusion_rate_b: f64,
  /// Time-step multiplier `dt`.
  pub time_step: f64,
}

impl Default for SimulationParams {
  fn default() -> Self {
    Self {
      feed_rate: 0.0460,
      kill_rate: 0.0594,
      diffusion_rate_a: 0.2097,
      diffusion_rate_b: 0.1050,
      time_step: 4.0,
    }
  }
}

impl SimulationParams {
  /// Returns the current value of one tunable.
  pub fn get(&self, param: Parameter) -> f64 {
    match param {
      Parameter::FeedRate => self.feed_rate,
      Parameter::KillRate => self.kill_rate,
      Parameter::DiffusionRateA => self.diffusion_rate_a,
      Parameter::DiffusionRateB => self.diffusion_rate_b,
      Parameter::TimeStep => self.time_step,
    }
  }

  fn slot_mut(&mut self, param: Parameter) -> &mut f64 {
    match param {
      Parameter::FeedRate => &mut self.feed_rate,
      Parameter::KillRate => &mut self.kill_rate,
      Parameter::DiffusionRateA => &mut self.diffusion_rate_a,
      Parameter::DiffusionRateB => &mut self.diffusion_rate_b,
      Parameter::TimeStep => &mut self.time_step,
    }
  }

  /// Adds `delta` to one tunable and returns the new value.
  ///
  /// No clamping: negative or very large values are accepted.
  pub fn adjust(&mut self, param: Parameter, delta: f64) -> f64 {
    let slot = self.slot_mut(param);
    *slot += delta;
    *slot
  }
}

/// Names one tunable of [`SimulationParams`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
  FeedRate,
  KillRate,
  DiffusionRateA,
  DiffusionRateB,
  TimeStep,
}

impl Parameter {
  pub const ALL: [Parameter; 5] = [
    Parameter::FeedRate,
    Parameter::KillRate,
    Parameter::DiffusionRateA,
    Parameter::DiffusionRateB,
    Parameter::TimeStep,
  ];

  /// Canonical name, as accepted by [`Parameter::from_str`].
  pub const fn name(self) -> &'static str {
    match self {
      Parameter::FeedRate => "feedRate",
      Parameter::KillRate => "killRate",
      Parameter::DiffusionRateA => "diffusionRateA",
      Parameter::DiffusionRateB => "diffusionRateB",
      Parameter::TimeStep => "timeStep",
    }
  }
}

impl std::fmt::Display for Parameter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Parameter {
  type Err = ParameterError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "feedRate" | "feed_rate" | "feed" => Ok(Parameter::FeedRate),
      "killRate" | "kill_rate" | "kill" => Ok(Parameter::KillRate),
      "diffusionRateA" | "diffusion_rate_a" | "da" => Ok(Parameter::DiffusionRateA),
      "diffusionRateB" | "diffusion_rate_b" | "db" => Ok(Parameter::DiffusionRateB),
      "timeStep" | "time_step" | "dt" => Ok(Parameter::TimeStep),
      other => Err(ParameterError::UnknownParameter(other.to_string())),
    }
  }
}

/// Fixed increments the input layer applies per key press.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParameterSteps {
  pub feed: f64,
  pub kill: f64,
  pub diffusion: f64,
  pub time_step: f64,
}

impl Default for ParameterSteps {
  fn default() -> Self {
    Self {
      feed: 0.001,
      kill: 0.001,
      diffusion: 0.001,
      time_step: 0.1,
    }
  }
}

impl ParameterSteps {
  /// Returns the increment used for `param`.
  pub fn for_parameter(&self, param: Parameter) -> f64 {
    match param {
      Parameter::FeedRate => self.feed,
      Parameter::KillRate => self.kill,
      Parameter::DiffusionRateA | Parameter::DiffusionRateB => self.diffusion,
      Parameter::TimeStep => self.time_step,
    }
  }
}
