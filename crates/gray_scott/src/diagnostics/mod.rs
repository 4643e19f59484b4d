mod time_series;

pub use time_series::TimeSeries;

use crate::scheduling::StepReport;

const SAMPLE_CAPACITY: usize = 300;

/// Rolling timing of the simulation loop.
#[derive(Clone, Debug)]
pub struct StepMetrics {
  /// Wall-clock time of the parallel phase, in milliseconds.
  pub step_time: TimeSeries,
  /// Wall-clock time spent applying queued mutations, in milliseconds.
  pub mutation_time: TimeSeries,
  /// Report of the most recent step.
  pub last_report: Option<StepReport>,
  /// Steps executed so far.
  pub steps: u64,
}

impl Default for StepMetrics {
  fn default() -> Self {
    Self {
      step_time: TimeSeries::new(SAMPLE_CAPACITY),
      mutation_time: TimeSeries::new(SAMPLE_CAPACITY),
      last_report: None,
      steps: 0,
    }
  }
}

impl StepMetrics {
  pub(crate) fn record(&mut self, report: StepReport, step_ms: f32, mutation_ms: f32) {
    self.step_time.push(step_ms);
    self.mutation_time.push(mutation_ms);
    self.last_report = Some(report);
    self.steps += 1;
  }
}
