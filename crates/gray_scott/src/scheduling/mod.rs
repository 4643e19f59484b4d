//! Band-parallel step execution.
//!
//! Interior rows are split into contiguous bands, one per worker. Every
//! worker reads the whole `current` buffer and writes only its own rows of
//! `next`, so no worker can observe another's output within a step. The
//! buffers are swapped once all bands are done.

mod bands;
mod pool;

use std::sync::atomic::{AtomicUsize, Ordering};

pub use bands::{RowBand, partition_rows};
pub use pool::{WorkerPool, available_workers};

use crate::cell::{Cell, CellSurface};
use crate::grid::Grid;
use crate::integrator::integrate_cell;
use crate::params::SimulationParams;
use crate::stencil::laplacian_pair;

/// Summary of one executed step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
  /// Bands dispatched to the pool.
  pub bands: usize,
  /// Bands that finished before the barrier released.
  pub completed: usize,
  /// Interior cells integrated.
  pub cells_updated: u64,
}

/// Advances `grid` by one step and swaps its buffers.
///
/// The outermost ring is copied through unchanged.
#[cfg_attr(
  feature = "tracy",
  tracing::instrument(skip_all, fields(width = grid.width(), height = grid.height()))
)]
pub fn run_step(pool: &WorkerPool, grid: &mut Grid, params: &SimulationParams) -> StepReport {
  let width = grid.width() as usize;
  let bands = partition_rows(grid.height(), pool.workers());
  let cells_updated =
    bands.iter().map(|b| b.len() as u64).sum::<u64>() * width.saturating_sub(2) as u64;

  let (current, next) = grid.buffers_mut();
  copy_border_rows(current, next);

  let jobs = split_bands(next.as_mut_slice(), width, &bands);
  let completed = AtomicUsize::new(0);

  pool.run_all(jobs, |(band, rows)| {
    integrate_band(current, band, rows, params);
    completed.fetch_add(1, Ordering::Relaxed);
  });

  grid.swap();

  StepReport {
    bands: bands.len(),
    completed: completed.into_inner(),
    cells_updated,
  }
}

/// Copies the first and last rows of `current` into `next`.
fn copy_border_rows(current: &CellSurface, next: &mut CellSurface) {
  let width = current.width() as usize;
  let last = current.height() as usize - 1;
  let src = current.as_slice();
  let dst = next.as_mut_slice();
  dst[..width].copy_from_slice(&src[..width]);
  dst[last * width..].copy_from_slice(&src[last * width..]);
}

/// Hands out one disjoint mutable row range of `next` per band.
fn split_bands<'a>(
  next: &'a mut [Cell],
  width: usize,
  bands: &[RowBand],
) -> Vec<(RowBand, &'a mut [Cell])> {
  let Some(first) = bands.first() else {
    return Vec::new();
  };

  let mut rest = &mut next[first.start as usize * width..];
  let mut out = Vec::with_capacity(bands.len());
  for &band in bands {
    let (rows, tail) = std::mem::take(&mut rest).split_at_mut(band.len() as usize * width);
    out.push((band, rows));
    rest = tail;
  }
  out
}

/// Integrates every interior cell of `band`, writing into `rows`.
///
/// Edge columns are copied from `current`.
fn integrate_band(current: &CellSurface, band: RowBand, rows: &mut [Cell], params: &SimulationParams) {
  let width = current.width() as usize;

  for (y, out) in band.rows().zip(rows.chunks_exact_mut(width)) {
    let src = current.row(y);
    out[0] = src[0];
    out[width - 1] = src[width - 1];

    for x in 1..width.saturating_sub(1) {
      let (lap_a, lap_b) = laplacian_pair(current, x as u32, y);
      out[x] = integrate_cell(src[x], lap_a, lap_b, params);
    }
  }
}
