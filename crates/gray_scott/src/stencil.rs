//! 9-point discrete Laplacian.
//!
//! Weights: center `-1`, orthogonal neighbors `0.2`, diagonal neighbors
//! `0.05`. They are kept as integer twentieths so the zero sum is exact.
//!
//! # Boundary policy
//!
//! Neighbor coordinates are clamped per axis to the grid before lookup
//! (reflective / Neumann-like edge). The clamp applies to both species. The
//! scheduler only evaluates interior cells, where clamping never changes a
//! coordinate; the outermost ring is never evaluated by a step and keeps its
//! seeded or brushed values.
//!
//! The sum is taken over `weight * (neighbor - center)`. Since the weights
//! sum to zero this equals the plain weighted sum, and a uniform field gives
//! exactly `0.0` regardless of rounding.

use crate::cell::{Cell, CellSurface, Species};
use crate::coords::CellPos;

/// Kernel weights in twentieths, indexed `[dy + 1][dx + 1]`.
pub const KERNEL_TWENTIETHS: [[i32; 3]; 3] = [[1, 4, 1], [4, -20, 4], [1, 4, 1]];

/// Weight of the center cell.
pub const CENTER_WEIGHT: f64 = KERNEL_TWENTIETHS[1][1] as f64 / 20.0;

/// Weight of each orthogonal neighbor.
pub const ORTHOGONAL_WEIGHT: f64 = KERNEL_TWENTIETHS[0][1] as f64 / 20.0;

/// Weight of each diagonal neighbor.
pub const DIAGONAL_WEIGHT: f64 = KERNEL_TWENTIETHS[0][0] as f64 / 20.0;

const ORTHOGONAL: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i64, i64); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Laplacian of one species at (x, y), reading only `field`.
pub fn laplacian(field: &CellSurface, x: u32, y: u32, species: Species) -> f64 {
  let center = field[(x, y)].species(species);
  let sample = |dx: i64, dy: i64| {
    field
      .get_clamped(CellPos::new(x as i64 + dx, y as i64 + dy))
      .species(species)
      - center
  };

  let ortho: f64 = ORTHOGONAL.iter().map(|&(dx, dy)| sample(dx, dy)).sum();
  let diag: f64 = DIAGONAL.iter().map(|&(dx, dy)| sample(dx, dy)).sum();
  ORTHOGONAL_WEIGHT * ortho + DIAGONAL_WEIGHT * diag
}

/// Laplacians of both species at (x, y) in one pass over the neighborhood.
///
/// Returns `(lap_a, lap_b)`; each is bit-identical to [`laplacian`] for the
/// same species.
#[inline]
pub fn laplacian_pair(field: &CellSurface, x: u32, y: u32) -> (f64, f64) {
  let center = field[(x, y)];
  let neighbor = |dx: i64, dy: i64| -> Cell {
    *field.get_clamped(CellPos::new(x as i64 + dx, y as i64 + dy))
  };

  let mut ortho_a = 0.0;
  let mut ortho_b = 0.0;
  for &(dx, dy) in &ORTHOGONAL {
    let n = neighbor(dx, dy);
    ortho_a += n.a - center.a;
    ortho_b += n.b - center.b;
  }

  let mut diag_a = 0.0;
  let mut diag_b = 0.0;
  for &(dx, dy) in &DIAGONAL {
    let n = neighbor(dx, dy);
    diag_a += n.a - center.a;
    diag_b += n.b - center.b;
  }

  (
    ORTHOGONAL_WEIGHT * ortho_a + DIAGONAL_WEIGHT * diag_a,
    ORTHOGONAL_WEIGHT * ortho_b + DIAGONAL_WEIGHT * diag_b,
  )
}
