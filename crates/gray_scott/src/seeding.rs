//! Grid seeding - populating the current buffer with an initial condition.
//!
//! The [`GridSeeder`] trait provides a pluggable interface for generating the
//! initial state. [`CenterSquareSeeder`] is the interactive default;
//! [`UniformSeeder`] gives a quiet, fully deterministic field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::blitter::{Blitter, Rect};
use crate::cell::{Cell, CellSurface};

/// Trait for populating a cell surface with its initial state.
pub trait GridSeeder {
  /// Fills every cell of `surface`.
  fn seed(&self, surface: &mut CellSurface);
}

/// Substrate everywhere, a saturated activator square in the middle, and
/// uniformly random activator elsewhere.
///
/// Without an explicit RNG seed every run draws a different texture.
#[derive(Clone, Debug)]
pub struct CenterSquareSeeder {
  window_divisor: u32,
  rng_seed: Option<u64>,
}

impl CenterSquareSeeder {
  /// Creates a seeder whose square has side `min(W, H) / window_divisor`
  /// (at least one cell).
  pub fn new(window_divisor: u32) -> Self {
    Self {
      window_divisor: window_divisor.max(1),
      rng_seed: None,
    }
  }

  /// Draws the random texture from a fixed seed, making runs reproducible.
  pub fn with_rng_seed(mut self, seed: u64) -> Self {
    self.rng_seed = Some(seed);
    self
  }

  /// Returns the seed square for a `width x height` grid.
  pub fn window(&self, width: u32, height: u32) -> Rect {
    let side = (width.min(height) / self.window_divisor).max(1);
    Rect::centered_square(width, height, side)
  }

  fn fill<R: Rng>(&self, surface: &mut CellSurface, rng: &mut R) {
    let window = self.window(surface.width(), surface.height());
    let full = Rect::full(surface.width(), surface.height());
    Blitter::new(surface).blit(full, |x, y| {
      if window.contains(x, y) {
        Cell::new(1.0, 1.0)
      } else {
        Cell::new(1.0, rng.random_range(0.0..=1.0))
      }
    });
  }
}

impl Default for CenterSquareSeeder {
  fn default() -> Self {
    Self::new(20)
  }
}

impl GridSeeder for CenterSquareSeeder {
  fn seed(&self, surface: &mut CellSurface) {
    match self.rng_seed {
      Some(seed) => self.fill(surface, &mut StdRng::seed_from_u64(seed)),
      None => self.fill(surface, &mut rand::rng()),
    }
  }
}

/// Resting substrate everywhere, optionally with activated cells.
#[derive(Clone, Debug, Default)]
pub struct UniformSeeder {
  activated: Vec<(u32, u32)>,
}

impl UniformSeeder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets `b = 1` (keeping `a = 1`) at (x, y) after the fill.
  pub fn with_activator(mut self, x: u32, y: u32) -> Self {
    self.activated.push((x, y));
    self
  }
}

impl GridSeeder for UniformSeeder {
  fn seed(&self, surface: &mut CellSurface) {
    Blitter::new(surface).clear(Cell::RESTING);
    for &(x, y) in &self.activated {
      surface.set(x, y, Cell::new(1.0, 1.0));
    }
  }
}
