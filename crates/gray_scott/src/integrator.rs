//! Per-cell reaction-diffusion update.
//!
//! ```text
//! a' = a + dt * (Da * lap_a - a*b^2 + F * (1 - a))
//! b' = b + dt * (Db * lap_b + a*b^2 - (K + F) * b)
//! ```
//!
//! Both results are clamped to `[0, 1]`. The function is pure, so any number
//! of workers may call it at once as long as each writes a distinct cell.

use crate::cell::Cell;
use crate::params::SimulationParams;

/// Computes the next state of one cell.
#[inline]
pub fn integrate_cell(cell: Cell, lap_a: f64, lap_b: f64, params: &SimulationParams) -> Cell {
  let Cell { a, b } = cell;
  let reaction = a * b * b;

  let da = params.diffusion_rate_a * lap_a - reaction + params.feed_rate * (1.0 - a);
  let db = params.diffusion_rate_b * lap_b + reaction - (params.kill_rate + params.feed_rate) * b;

  Cell {
    a: a + params.time_step * da,
    b: b + params.time_step * db,
  }
  .clamped()
}
