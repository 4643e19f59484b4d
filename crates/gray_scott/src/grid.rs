//! Grid - the double-buffered simulation state.
//!
//! A grid owns two equally sized [`CellSurface`]s. `current` is the state
//! readers see; `next` is where a step writes. [`Grid::swap`] exchanges the
//! two roles without copying.

use crate::cell::{Cell, CellSurface};
use crate::coords::CellPos;
use crate::error::GridError;

/// Double-buffered grid of cells.
#[derive(Clone, Debug)]
pub struct Grid {
  current: CellSurface,
  next: CellSurface,
}

impl Grid {
  /// Allocates both buffers, every cell set to `fill`.
  pub fn new(width: u32, height: u32, fill: Cell) -> Result<Self, GridError> {
    let current = CellSurface::try_filled(width, height, fill)?;
    let next = CellSurface::try_filled(width, height, fill)?;
    Ok(Self { current, next })
  }

  /// Builds a grid whose `current` buffer is `surface`.
  ///
  /// The `next` buffer starts as a copy so that cells a step never writes
  /// hold the same values in both buffers.
  pub fn from_surface(surface: CellSurface) -> Result<Self, GridError> {
    let mut next = CellSurface::try_filled(surface.width(), surface.height(), Cell::RESTING)?;
    next.as_mut_slice().copy_from_slice(surface.as_slice());
    Ok(Self {
      current: surface,
      next,
    })
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.current.width()
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.current.height()
  }

  /// Reads a cell of the current buffer.
  ///
  /// Out-of-range coordinates are clamped to the nearest edge cell.
  #[inline]
  pub fn get(&self, x: i64, y: i64) -> Cell {
    *self.current.get_clamped(CellPos::new(x, y))
  }

  /// Writes a cell of the current buffer. Returns `false` (and writes
  /// nothing) if the coordinate is outside the grid.
  #[inline]
  pub fn set(&mut self, x: i64, y: i64, cell: Cell) -> bool {
    match CellPos::new(x, y).checked(self.width(), self.height()) {
      Some((x, y)) => self.current.set(x, y, cell),
      None => false,
    }
  }

  /// Read-only view of the current buffer.
  ///
  /// Valid until the next call that takes the grid mutably.
  #[inline]
  pub fn current_view(&self) -> &CellSurface {
    &self.current
  }

  /// Mutable access to the current buffer for seeding and brush strokes.
  #[inline]
  pub fn current_mut(&mut self) -> &mut CellSurface {
    &mut self.current
  }

  /// Read-only view of the next buffer (the output of the last step before
  /// its swap, or stale data after it).
  #[inline]
  pub fn next_view(&self) -> &CellSurface {
    &self.next
  }

  /// Splits the grid into the buffer a step reads and the buffer it writes.
  #[inline]
  pub fn buffers_mut(&mut self) -> (&CellSurface, &mut CellSurface) {
    (&self.current, &mut self.next)
  }

  /// Exchanges the roles of `current` and `next`.
  #[inline]
  pub fn swap(&mut self) {
    std::mem::swap(&mut self.current, &mut self.next);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn get_clamps_and_set_rejects_out_of_range() {
    let mut grid = Grid::new(4, 4, Cell::RESTING).unwrap();
    assert!(grid.set(0, 0, Cell::ACTIVATED));
    assert_eq!(grid.get(-3, -3), Cell::ACTIVATED);
    assert!(!grid.set(4, 0, Cell::ACTIVATED));
    assert!(!grid.set(-1, 2, Cell::ACTIVATED));
    assert_eq!(grid.get(3, 0), Cell::RESTING);
  }

  #[test]
  fn swap_exchanges_buffers_without_copying() {
    let mut grid = Grid::new(3, 3, Cell::RESTING).unwrap();
    grid.current_mut().set(1, 1, Cell::ACTIVATED);

    let current_ptr = grid.current_view().as_slice().as_ptr();
    let next_ptr = grid.next_view().as_slice().as_ptr();
    grid.swap();

    assert_eq!(grid.current_view().as_slice().as_ptr(), next_ptr);
    assert_eq!(grid.next_view().as_slice().as_ptr(), current_ptr);
    assert_eq!(grid.next_view()[(1, 1)], Cell::ACTIVATED);
    assert_eq!(grid.current_view()[(1, 1)], Cell::RESTING);
  }

  #[test]
  fn from_surface_copies_into_next() {
    let mut surface = CellSurface::filled(3, 2, Cell::RESTING);
    surface.set(2, 1, Cell::new(0.5, 0.5));
    let grid = Grid::from_surface(surface).unwrap();
    assert_eq!(grid.next_view()[(2, 1)], Cell::new(0.5, 0.5));
  }

  #[test]
  fn zero_sized_grid_is_rejected() {
    assert!(matches!(
      Grid::new(0, 0, Cell::RESTING),
      Err(GridError::EmptyDimensions { .. })
    ));
  }
}
