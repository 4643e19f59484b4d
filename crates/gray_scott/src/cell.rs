//! Simulation cell format.

use crate::surface::Surface;

/// Concentrations of the two species at one grid cell.
///
/// Both values lie in `[0.0, 1.0]` whenever the cell is observable outside
/// the integrator.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
  /// Substrate concentration.
  pub a: f64,
  /// Activator concentration.
  pub b: f64,
}

impl Cell {
  /// Pure substrate, no activator.
  pub const RESTING: Self = Self { a: 1.0, b: 0.0 };

  /// Value written by the brush: activator saturated, substrate consumed.
  pub const ACTIVATED: Self = Self { a: 0.0, b: 1.0 };

  pub const fn new(a: f64, b: f64) -> Self {
    Self { a, b }
  }

  /// Returns the concentration of one species.
  #[inline]
  pub fn species(&self, species: Species) -> f64 {
    match species {
      Species::A => self.a,
      Species::B => self.b,
    }
  }

  /// Clamps both concentrations into `[0.0, 1.0]`. NaN maps to 0.0.
  #[inline]
  pub fn clamped(self) -> Self {
    Self {
      a: unit(self.a),
      b: unit(self.b),
    }
  }
}

// `f64::max` drops a NaN operand, unlike `f64::clamp`
#[inline]
fn unit(value: f64) -> f64 {
  value.max(0.0).min(1.0)
}

impl Default for Cell {
  fn default() -> Self {
    Self::RESTING
  }
}

/// Selects one of the two concentration fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Species {
  /// Substrate.
  A,
  /// Activator.
  B,
}

pub type CellSurface = Surface<Cell>;
