//! Rolling window of per-step timings, in milliseconds.

use std::collections::VecDeque;

/// The last `capacity` timings plus their running total.
///
/// The extremes are cached and only rescanned after the sample holding one
/// of them falls out of the window.
#[derive(Clone, Debug)]
pub struct TimeSeries {
  window: VecDeque<f32>,
  capacity: usize,
  total: f32,
  /// `(min, max)` of `window`; `None` when it must be rescanned.
  extremes: Option<(f32, f32)>,
}

impl TimeSeries {
  /// A window holding at most `capacity` timings (at least one).
  pub fn new(capacity: usize) -> Self {
    let capacity = capacity.max(1);
    Self {
      window: VecDeque::with_capacity(capacity),
      capacity,
      total: 0.0,
      extremes: None,
    }
  }

  /// Records one timing, evicting the oldest once the window is full.
  pub fn push(&mut self, millis: f32) {
    if self.window.len() == self.capacity
      && let Some(evicted) = self.window.pop_front()
    {
      self.total -= evicted;
      if let Some((lo, hi)) = self.extremes
        && (evicted <= lo || evicted >= hi)
      {
        self.extremes = None;
      }
    }

    let was_empty = self.window.is_empty();
    self.window.push_back(millis);
    self.total += millis;

    self.extremes = match self.extremes {
      Some((lo, hi)) => Some((lo.min(millis), hi.max(millis))),
      None if was_empty => Some((millis, millis)),
      None => None,
    };
  }

  pub fn len(&self) -> usize {
    self.window.len()
  }

  pub fn is_empty(&self) -> bool {
    self.window.is_empty()
  }

  /// Most recent timing.
  pub fn current(&self) -> Option<f32> {
    self.window.back().copied()
  }

  /// Fastest timing in the window, 0 when empty.
  pub fn min(&mut self) -> f32 {
    self.extremes().0
  }

  /// Slowest timing in the window, 0 when empty.
  pub fn max(&mut self) -> f32 {
    self.extremes().1
  }

  /// Mean timing in the window, 0 when empty.
  pub fn avg(&self) -> f32 {
    match self.window.len() {
      0 => 0.0,
      n => self.total / n as f32,
    }
  }

  fn extremes(&mut self) -> (f32, f32) {
    if self.window.is_empty() {
      return (0.0, 0.0);
    }
    *self.extremes.get_or_insert_with(|| {
      self
        .window
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &t| (lo.min(t), hi.max(t)))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn evicting_the_slowest_step_rescans() {
    let mut series = TimeSeries::new(3);
    for millis in [5.0, 1.0, 3.0] {
      series.push(millis);
    }
    assert_eq!(series.min(), 1.0);
    assert_eq!(series.max(), 5.0);

    // 5.0 falls out of the window
    series.push(2.0);
    assert_eq!(series.len(), 3);
    assert_eq!(series.max(), 3.0);
    assert_eq!(series.min(), 1.0);
    assert!((series.avg() - 2.0).abs() < 1e-6);
    assert_eq!(series.current(), Some(2.0));
  }

  #[test]
  fn empty_window_reports_zero() {
    let mut series = TimeSeries::new(10);
    assert!(series.is_empty());
    assert_eq!(series.avg(), 0.0);
    assert_eq!(series.min(), 0.0);
    assert_eq!(series.max(), 0.0);
  }

  #[test]
  fn capacity_of_one_tracks_latest() {
    let mut series = TimeSeries::new(0);
    series.push(4.0);
    series.push(7.0);
    assert_eq!(series.len(), 1);
    assert_eq!(series.min(), 7.0);
    assert_eq!(series.max(), 7.0);
  }
}
