//! Row-band partitioning of the integration domain.

use std::ops::Range;

/// A contiguous, half-open range of interior rows owned by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
  pub start: u32,
  pub end: u32,
}

impl RowBand {
  pub const fn new(start: u32, end: u32) -> Self {
    Self { start, end }
  }

  /// Number of rows in the band.
  #[inline]
  pub const fn len(&self) -> u32 {
    self.end - self.start
  }

  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.start >= self.end
  }

  #[inline]
  pub fn rows(&self) -> Range<u32> {
    self.start..self.end
  }
}

/// Splits interior rows `[1, height - 1)` into at most `workers` bands.
///
/// Bands are contiguous, non-overlapping, cover every interior row, and
/// differ in height by at most one row (the first `rows % n` bands take the
/// extra row). Never returns empty bands, so grids with fewer interior rows
/// than workers get one band per row. Grids shorter than three rows have no
/// interior and yield no bands.
pub fn partition_rows(height: u32, workers: usize) -> Vec<RowBand> {
  let interior = height.saturating_sub(2);
  if interior == 0 {
    return Vec::new();
  }

  let count = (workers.max(1) as u64).min(interior as u64) as u32;
  let base = interior / count;
  let extra = interior % count;

  let mut bands = Vec::with_capacity(count as usize);
  let mut start = 1;
  for i in 0..count {
    let len = base + u32::from(i < extra);
    bands.push(RowBand::new(start, start + len));
    start += len;
  }
  bands
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_covers_interior(bands: &[RowBand], height: u32) {
    let mut expected = 1;
    for band in bands {
      assert_eq!(band.start, expected, "bands must be contiguous");
      assert!(!band.is_empty());
      expected = band.end;
    }
    assert_eq!(expected, height - 1, "bands must end at the last interior row");
  }

  #[test]
  fn even_split() {
    let bands = partition_rows(10, 4);
    assert_eq!(
      bands,
      vec![
        RowBand::new(1, 3),
        RowBand::new(3, 5),
        RowBand::new(5, 7),
        RowBand::new(7, 9),
      ]
    );
  }

  #[test]
  fn heights_differ_by_at_most_one() {
    for height in 3..200 {
      for workers in 1..17 {
        let bands = partition_rows(height, workers);
        assert_covers_interior(&bands, height);
        let min = bands.iter().map(RowBand::len).min().unwrap();
        let max = bands.iter().map(RowBand::len).max().unwrap();
        assert!(max - min <= 1, "height {height}, workers {workers}");
        assert!(bands.len() <= workers);
      }
    }
  }

  #[test]
  fn more_workers_than_rows() {
    let bands = partition_rows(5, 16);
    assert_eq!(bands.len(), 3);
    assert_covers_interior(&bands, 5);
  }

  #[test]
  fn zero_workers_means_one_band() {
    assert_eq!(partition_rows(6, 0), vec![RowBand::new(1, 5)]);
  }

  #[test]
  fn no_interior_no_bands() {
    assert!(partition_rows(0, 4).is_empty());
    assert!(partition_rows(1, 4).is_empty());
    assert!(partition_rows(2, 4).is_empty());
  }
}
