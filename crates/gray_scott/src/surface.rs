//! Row-major 2D buffer.
//!
//! The grid keeps one [`crate::CellSurface`] per buffer role; renderers keep
//! their own surfaces of color values and upload them with
//! [`Surface::as_bytes`].

use std::ops::{Index, IndexMut};

use crate::coords::CellPos;
use crate::error::GridError;

/// Fixed-size 2D buffer, stored row by row (`y * width + x`).
#[derive(Clone, Debug, PartialEq)]
pub struct Surface<T> {
  data: Box<[T]>,
  width: u32,
  height: u32,
}

impl<T: Clone + Default> Surface<T> {
  /// A surface of default values.
  ///
  /// # Panics
  /// Aborts on allocation failure; use [`Surface::try_filled`] when that
  /// must be reported instead.
  pub fn new(width: u32, height: u32) -> Self {
    Self::filled(width, height, T::default())
  }
}

impl<T: Clone> Surface<T> {
  pub fn filled(width: u32, height: u32, value: T) -> Self {
    let len = width as usize * height as usize;
    Self {
      data: vec![value; len].into_boxed_slice(),
      width,
      height,
    }
  }

  /// Like [`Surface::filled`], but rejects empty dimensions and reports
  /// allocation failure.
  pub fn try_filled(width: u32, height: u32, value: T) -> Result<Self, GridError> {
    if width == 0 || height == 0 {
      return Err(GridError::EmptyDimensions { width, height });
    }

    let requested = u64::from(width) * u64::from(height);
    let cells = usize::try_from(requested).map_err(|_| GridError::Allocation { cells: requested })?;

    let mut data = Vec::new();
    data
      .try_reserve_exact(cells)
      .map_err(|_| GridError::Allocation { cells: requested })?;
    data.resize(cells, value);

    Ok(Self {
      data: data.into_boxed_slice(),
      width,
      height,
    })
  }
}

impl<T> Surface<T> {
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  fn offset(&self, x: u32, y: u32) -> Option<usize> {
    (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
  }

  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<&T> {
    self.offset(x, y).map(|i| &self.data[i])
  }

  #[inline]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut T> {
    self.offset(x, y).map(|i| &mut self.data[i])
  }

  /// The element nearest to `pos`, each axis clamped to the surface edge.
  #[inline]
  pub fn get_clamped(&self, pos: CellPos) -> &T {
    &self[pos.clamped(self.width, self.height)]
  }

  /// Writes `value` at (x, y). Returns `false` and drops the value when the
  /// position is outside the surface.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
    match self.get_mut(x, y) {
      Some(slot) => {
        *slot = value;
        true
      }
      None => false,
    }
  }

  /// Row `y`. Panics if `y >= height`.
  #[inline]
  pub fn row(&self, y: u32) -> &[T] {
    let w = self.width as usize;
    let start = y as usize * w;
    &self.data[start..start + w]
  }

  /// Row `y`, mutably. Panics if `y >= height`.
  #[inline]
  pub fn row_mut(&mut self, y: u32) -> &mut [T] {
    let w = self.width as usize;
    let start = y as usize * w;
    &mut self.data[start..start + w]
  }

  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.data
  }

  #[inline]
  pub fn as_mut_slice(&mut self) -> &mut [T] {
    &mut self.data
  }

  /// Raw bytes of the buffer, for texture upload.
  ///
  /// Only meaningful for `#[repr(C)]` element types without padding.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    let len = std::mem::size_of_val(&*self.data);
    // SAFETY: the buffer is one contiguous allocation of `len` bytes, and u8
    // has no alignment requirement
    unsafe { std::slice::from_raw_parts(self.data.as_ptr().cast::<u8>(), len) }
  }
}

impl<T> Index<(u32, u32)> for Surface<T> {
  type Output = T;

  #[inline]
  fn index(&self, (x, y): (u32, u32)) -> &T {
    &self.row(y)[x as usize]
  }
}

impl<T> IndexMut<(u32, u32)> for Surface<T> {
  #[inline]
  fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut T {
    &mut self.row_mut(y)[x as usize]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn layout_is_row_major() {
    let mut surface: Surface<u16> = Surface::filled(10, 5, 0);
    surface[(3, 2)] = 23;
    surface[(9, 4)] = 49;
    assert_eq!(surface.as_slice()[23], 23);
    assert_eq!(surface.as_slice()[49], 49);
  }

  #[test]
  fn out_of_bounds_access_is_rejected() {
    let mut surface: Surface<u8> = Surface::filled(10, 5, 42);

    assert!(surface.get(10, 0).is_none());
    assert!(surface.get(0, 5).is_none());
    assert!(!surface.set(10, 0, 99));
    assert!(!surface.set(0, 5, 99));

    assert!(surface.set(0, 0, 99));
    assert_eq!(surface.get(0, 0), Some(&99));
    assert_eq!(surface.as_slice().iter().filter(|&&v| v == 99).count(), 1);
  }

  #[test]
  fn get_clamped_snaps_to_edge() {
    let mut surface: Surface<u8> = Surface::filled(4, 3, 0);
    surface.set(0, 0, 1);
    surface.set(3, 2, 2);

    assert_eq!(*surface.get_clamped(CellPos::new(-1, -1)), 1);
    assert_eq!(*surface.get_clamped(CellPos::new(4, 3)), 2);
    assert_eq!(*surface.get_clamped(CellPos::new(100, -5)), 0);
  }

  #[test]
  fn try_filled_rejects_empty_dimensions() {
    let err = Surface::try_filled(0, 10, 0u8).unwrap_err();
    assert!(matches!(err, GridError::EmptyDimensions { width: 0, height: 10 }));
  }

  #[test]
  fn rows_are_contiguous() {
    let mut surface: Surface<u8> = Surface::filled(3, 2, 0);
    surface.set(0, 1, 7);
    surface.row_mut(1)[2] = 9;
    assert_eq!(surface.row(1), &[7, 0, 9]);
    assert_eq!(surface.row(0), &[0, 0, 0]);
  }

  #[test]
  fn bytes_cover_whole_buffer() {
    let surface: Surface<[u8; 4]> = Surface::filled(3, 2, [1, 2, 3, 4]);
    let bytes = surface.as_bytes();
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
  }
}
