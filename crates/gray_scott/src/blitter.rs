//! Rectangle writes into surfaces.
//!
//! Seeding and the brush both go through [`Blitter`], so clipping against
//! the surface edge happens in one place.

use crate::surface::Surface;

/// Unsigned rectangle in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}

impl Rect {
  #[inline]
  pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// The whole `width x height` surface.
  #[inline]
  pub const fn full(width: u32, height: u32) -> Self {
    Self::new(0, 0, width, height)
  }

  /// A `side x side` square centered in a `width x height` area.
  ///
  /// Odd sides sit exactly on the center cell; even sides lean half a cell
  /// towards the origin. The side is capped at the shorter dimension.
  pub fn centered_square(width: u32, height: u32, side: u32) -> Self {
    let side = side.min(width).min(height);
    Self::new(width / 2 - side / 2, height / 2 - side / 2, side, side)
  }

  #[inline]
  pub fn contains(&self, x: u32, y: u32) -> bool {
    x.wrapping_sub(self.x) < self.width && y.wrapping_sub(self.y) < self.height
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  /// The part of this rect inside `[0, width) x [0, height)`.
  fn clipped(&self, width: u32, height: u32) -> Self {
    let x = self.x.min(width);
    let y = self.y.min(height);
    Self::new(
      x,
      y,
      self.width.min(width - x),
      self.height.min(height - y),
    )
  }
}

/// Writes rectangles of values into a surface.
pub struct Blitter<'a, T> {
  surface: &'a mut Surface<T>,
}

impl<'a, T> Blitter<'a, T> {
  pub fn new(surface: &'a mut Surface<T>) -> Self {
    Self { surface }
  }

  /// Writes `f(x, y)` to every in-bounds cell of `rect`, row by row.
  pub fn blit<F>(&mut self, rect: Rect, mut f: F)
  where
    F: FnMut(u32, u32) -> T,
  {
    let rect = rect.clipped(self.surface.width(), self.surface.height());
    if rect.is_empty() {
      return;
    }

    for y in rect.y..rect.y + rect.height {
      let row = &mut self.surface.row_mut(y)[rect.x as usize..(rect.x + rect.width) as usize];
      for (x, slot) in (rect.x..).zip(row) {
        *slot = f(x, y);
      }
    }
  }

  /// Writes `value` to every in-bounds cell of `rect`.
  pub fn fill(&mut self, rect: Rect, value: T)
  where
    T: Clone,
  {
    let rect = rect.clipped(self.surface.width(), self.surface.height());
    if rect.is_empty() {
      return;
    }

    for y in rect.y..rect.y + rect.height {
      self.surface.row_mut(y)[rect.x as usize..(rect.x + rect.width) as usize].fill(value.clone());
    }
  }

  /// Writes `value` everywhere.
  pub fn clear(&mut self, value: T)
  where
    T: Clone,
  {
    self.surface.as_mut_slice().fill(value);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blit_passes_absolute_coordinates() {
    let mut surface = Surface::<(u32, u32)>::filled(10, 10, (0, 0));
    Blitter::new(&mut surface).blit(Rect::new(2, 3, 4, 3), |x, y| (x, y));

    assert_eq!(surface[(2, 3)], (2, 3));
    assert_eq!(surface[(5, 5)], (5, 5));
    assert_eq!(surface[(6, 5)], (0, 0));
    assert_eq!(surface[(2, 6)], (0, 0));
  }

  #[test]
  fn fill_clips_to_surface() {
    let mut surface = Surface::<u8>::filled(10, 10, 0);
    Blitter::new(&mut surface).fill(Rect::new(8, 8, 5, 5), 42);

    assert_eq!(surface.get(8, 8), Some(&42));
    assert_eq!(surface.get(9, 9), Some(&42));
    assert_eq!(surface.get(7, 7), Some(&0));
    assert_eq!(surface.as_slice().iter().filter(|&&v| v == 42).count(), 4);
  }

  #[test]
  fn rect_outside_writes_nothing() {
    let mut surface = Surface::<u8>::filled(10, 10, 0);
    let mut blitter = Blitter::new(&mut surface);
    blitter.fill(Rect::new(20, 20, 5, 5), 42);
    blitter.blit(Rect::new(10, 0, 3, 3), |_, _| 7);
    assert!(surface.as_slice().iter().all(|&v| v == 0));
  }

  #[test]
  fn contains_is_half_open() {
    let rect = Rect::new(2, 2, 3, 1);
    assert!(rect.contains(2, 2));
    assert!(rect.contains(4, 2));
    assert!(!rect.contains(5, 2));
    assert!(!rect.contains(2, 3));
    assert!(!rect.contains(1, 2));
  }

  #[test]
  fn centered_square_is_centered() {
    assert_eq!(Rect::centered_square(800, 800, 40), Rect::new(380, 380, 40, 40));
    assert_eq!(Rect::centered_square(5, 5, 1), Rect::new(2, 2, 1, 1));
    // Never larger than the area
    assert_eq!(Rect::centered_square(3, 2, 10), Rect::new(0, 0, 2, 2));
  }
}
