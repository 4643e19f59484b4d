//! Coordinate types.
//!
//! - [`CellPos`]: Signed cell position. May lie outside the grid (brush
//!   centers follow the cursor, stencil neighbors step off the edge).
//! - [`GridRect`]: Signed axis-aligned rectangle, clipped against the grid
//!   before any cell is touched.
//!
//! Grid coordinates have `(0, 0)` at the top-left with Y+ pointing down,
//! matching the row-major layout of [`crate::Surface`].

/// Signed cell position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
  pub x: i64,
  pub y: i64,
}

impl CellPos {
  /// Creates a new cell position.
  pub const fn new(x: i64, y: i64) -> Self {
    Self { x, y }
  }

  /// Clamps each axis independently into `[0, width) x [0, height)`.
  ///
  /// `width` and `height` must be non-zero.
  #[inline]
  pub fn clamped(self, width: u32, height: u32) -> (u32, u32) {
    let x = self.x.clamp(0, width as i64 - 1) as u32;
    let y = self.y.clamp(0, height as i64 - 1) as u32;
    (x, y)
  }

  /// Returns the unsigned position if it lies inside `[0, width) x [0, height)`.
  #[inline]
  pub fn checked(self, width: u32, height: u32) -> Option<(u32, u32)> {
    if self.x >= 0 && self.y >= 0 && self.x < width as i64 && self.y < height as i64 {
      Some((self.x as u32, self.y as u32))
    } else {
      None
    }
  }
}

/// Signed axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRect {
  pub x: i64,
  pub y: i64,
  pub width: u32,
  pub height: u32,
}

impl GridRect {
  /// Creates a new rectangle.
  pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Creates a square centered on a cell with the given radius.
  ///
  /// The square spans `[center - radius, center + radius]` on both axes,
  /// so radius 0 covers the center cell alone. Near the ends of the `i64`
  /// range the square saturates instead of wrapping.
  pub fn centered(center_x: i64, center_y: i64, radius: u32) -> Self {
    let diameter = radius.saturating_mul(2).saturating_add(1);
    Self {
      x: center_x.saturating_sub(i64::from(radius)),
      y: center_y.saturating_sub(i64::from(radius)),
      width: diameter,
      height: diameter,
    }
  }

  /// Exclusive right edge, saturated at `i64::MAX`.
  #[inline]
  fn right(&self) -> i64 {
    self.x.saturating_add(i64::from(self.width))
  }

  /// Exclusive bottom edge, saturated at `i64::MAX`.
  #[inline]
  fn bottom(&self) -> i64 {
    self.y.saturating_add(i64::from(self.height))
  }

  /// Returns true if the given position is within this rect.
  pub fn contains(&self, pos: CellPos) -> bool {
    pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
  }

  /// Returns the intersection of two rectangles, or None if they don't overlap.
  pub fn intersection(&self, other: &GridRect) -> Option<GridRect> {
    let x1 = self.x.max(other.x);
    let y1 = self.y.max(other.y);
    let x2 = self.right().min(other.right());
    let y2 = self.bottom().min(other.bottom());

    if x1 < x2 && y1 < y2 {
      Some(GridRect {
        x: x1,
        y: y1,
        width: (x2 - x1) as u32,
        height: (y2 - y1) as u32,
      })
    } else {
      None
    }
  }

  /// Clips this rect to a `width x height` grid and converts it to an
  /// unsigned [`crate::Rect`]. Returns `None` when nothing remains.
  pub fn clamped_to(&self, width: u32, height: u32) -> Option<crate::Rect> {
    let bounds = GridRect::new(0, 0, width, height);
    self
      .intersection(&bounds)
      .map(|r| crate::Rect::new(r.x as u32, r.y as u32, r.width, r.height))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamped_pulls_each_axis_into_range() {
    assert_eq!(CellPos::new(-1, 3).clamped(5, 5), (0, 3));
    assert_eq!(CellPos::new(7, -9).clamped(5, 5), (4, 0));
    assert_eq!(CellPos::new(2, 2).clamped(5, 5), (2, 2));
  }

  #[test]
  fn checked_rejects_out_of_range() {
    assert_eq!(CellPos::new(0, 0).checked(3, 3), Some((0, 0)));
    assert_eq!(CellPos::new(3, 0).checked(3, 3), None);
    assert_eq!(CellPos::new(0, -1).checked(3, 3), None);
  }

  #[test]
  fn centered_covers_inclusive_radius() {
    let rect = GridRect::centered(10, 10, 2);
    assert_eq!(rect, GridRect::new(8, 8, 5, 5));
    assert!(rect.contains(CellPos::new(12, 12)));
    assert!(!rect.contains(CellPos::new(13, 12)));

    let single = GridRect::centered(4, 4, 0);
    assert_eq!(single, GridRect::new(4, 4, 1, 1));
  }

  #[test]
  fn clamped_to_clips_partial_overlap() {
    let rect = GridRect::centered(0, 0, 2);
    assert_eq!(rect.clamped_to(10, 10), Some(crate::Rect::new(0, 0, 3, 3)));

    let outside = GridRect::new(20, 20, 4, 4);
    assert_eq!(outside.clamped_to(10, 10), None);
  }

  #[test]
  fn centers_at_the_ends_of_the_range_saturate() {
    let rect = GridRect::centered(i64::MAX, i64::MIN, 3);
    assert_eq!(rect.x, i64::MAX - 3);
    assert_eq!(rect.y, i64::MIN);
    assert!(rect.contains(CellPos::new(i64::MAX - 1, i64::MIN)));
    assert_eq!(rect.clamped_to(10, 10), None);

    let far = GridRect::centered(i64::MIN, i64::MAX, u32::MAX);
    assert_eq!(far.width, u32::MAX);
    assert_eq!(far.clamped_to(10, 10), None);
  }
}
