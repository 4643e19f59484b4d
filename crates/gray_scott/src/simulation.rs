//! Simulation facade: the grid, its parameters, the worker pool and the
//! pending-mutation queue, advanced one tick at a time.

use web_time::Instant;

use crate::cell::{Cell, CellSurface};
use crate::config::SimulationConfig;
use crate::diagnostics::StepMetrics;
use crate::error::{GridError, ParameterError};
use crate::grid::Grid;
use crate::mutator::{self, BrushRequest, MutationQueue, MutationSender};
use crate::params::{ParameterSteps, SimulationParams};
use crate::scheduling::{StepReport, WorkerPool, run_step};
use crate::seeding::{CenterSquareSeeder, GridSeeder};

/// Allocates a `width x height` grid and seeds it with the default
/// center-square initial condition.
pub fn initialize(width: u32, height: u32) -> Result<Grid, GridError> {
  initialize_with(width, height, &CenterSquareSeeder::default())
}

/// Allocates a `width x height` grid and seeds it with `seeder`.
///
/// Allocation failure is the only error; the grid is unusable without both
/// buffers.
pub fn initialize_with(
  width: u32,
  height: u32,
  seeder: &impl GridSeeder,
) -> Result<Grid, GridError> {
  let grid = CellSurface::try_filled(width, height, Cell::RESTING)
    .and_then(|mut surface| {
      seeder.seed(&mut surface);
      Grid::from_surface(surface)
    })
    .inspect_err(|e| log::error!("Grid initialization aborted: {e}"))?;
  log::info!("Initialized {width}x{height} grid");
  Ok(grid)
}

/// Advances `grid` by one tick on `pool`.
///
/// Returns after every band has been integrated and the buffers swapped.
pub fn step(grid: &mut Grid, params: &SimulationParams, pool: &WorkerPool) -> StepReport {
  run_step(pool, grid, params)
}

/// A running simulation.
///
/// Mutations sent through [`Simulation::sender`] are applied at the start of
/// the next [`Simulation::tick`], never while a step is in progress.
#[derive(Debug)]
pub struct Simulation {
  grid: Grid,
  params: SimulationParams,
  steps: ParameterSteps,
  brush_radius: i64,
  pool: WorkerPool,
  mutations: MutationQueue,
  metrics: StepMetrics,
}

impl Simulation {
  /// Wraps an existing grid.
  pub fn new(grid: Grid, params: SimulationParams, pool: WorkerPool) -> Self {
    Self {
      grid,
      params,
      steps: ParameterSteps::default(),
      brush_radius: 4,
      pool,
      mutations: MutationQueue::new(),
      metrics: StepMetrics::default(),
    }
  }

  /// Builds a seeded simulation from `config`.
  ///
  /// A worker pool that cannot be built degrades to single-threaded stepping.
  pub fn from_config(config: &SimulationConfig) -> Result<Self, GridError> {
    let grid = initialize_with(config.grid.width, config.grid.height, &config.seed.seeder())?;
    let pool = WorkerPool::with_fallback(config.workers.threads);
    let mut sim = Self::new(grid, config.params, pool);
    sim.steps = config.steps;
    sim.brush_radius = config.brush.radius.max(0);
    Ok(sim)
  }

  /// Applies pending mutations, then runs one barrier-synchronized step.
  #[cfg_attr(feature = "tracy", tracing::instrument(skip_all, fields(step = self.metrics.steps)))]
  pub fn tick(&mut self) -> StepReport {
    let start = Instant::now();
    for mutation in self.mutations.drain() {
      mutation.apply(&mut self.grid, &mut self.params);
    }
    let mutation_ms = start.elapsed().as_secs_f32() * 1000.0;

    let start = Instant::now();
    let report = step(&mut self.grid, &self.params, &self.pool);
    let step_ms = start.elapsed().as_secs_f32() * 1000.0;

    self.metrics.record(report, step_ms, mutation_ms);
    report
  }

  /// Read-only view of the latest completed state.
  #[inline]
  pub fn current_view(&self) -> &CellSurface {
    self.grid.current_view()
  }

  #[inline]
  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  #[inline]
  pub fn params(&self) -> &SimulationParams {
    &self.params
  }

  #[inline]
  pub fn steps(&self) -> &ParameterSteps {
    &self.steps
  }

  #[inline]
  pub fn brush_radius(&self) -> i64 {
    self.brush_radius
  }

  pub fn set_brush_radius(&mut self, radius: i64) {
    self.brush_radius = radius.max(0);
  }

  #[inline]
  pub fn workers(&self) -> usize {
    self.pool.workers()
  }

  pub fn metrics(&self) -> &StepMetrics {
    &self.metrics
  }

  pub fn metrics_mut(&mut self) -> &mut StepMetrics {
    &mut self.metrics
  }

  /// Handle for queuing mutations from input code.
  pub fn sender(&self) -> MutationSender {
    self.mutations.sender()
  }

  /// Mutations waiting for the next tick.
  pub fn pending_mutations(&self) -> usize {
    self.mutations.len()
  }

  /// Adjusts a parameter by name immediately.
  pub fn adjust_parameter(&mut self, name: &str, delta: f64) -> Result<f64, ParameterError> {
    mutator::adjust_parameter(&mut self.params, name, delta)
  }

  /// Paints the activator around `(x, y)` with the configured stroke width,
  /// immediately.
  pub fn apply_brush(&mut self, x: i64, y: i64) -> u64 {
    mutator::apply_brush(&mut self.grid, BrushRequest::new(x, y, self.brush_radius))
  }

  /// Brush request at `(x, y)` with the configured stroke width.
  pub fn brush_at(&self, x: i64, y: i64) -> BrushRequest {
    BrushRequest::new(x, y, self.brush_radius)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::params::Parameter;
  use crate::seeding::UniformSeeder;

  fn quiet(width: u32, height: u32) -> Simulation {
    let grid = initialize_with(width, height, &UniformSeeder::new()).unwrap();
    Simulation::new(grid, SimulationParams::default(), WorkerPool::new(2).unwrap())
  }

  #[test]
  fn initialize_rejects_empty_grid() {
    assert!(matches!(
      initialize(0, 10),
      Err(GridError::EmptyDimensions { .. })
    ));
  }

  #[test]
  fn initialize_seeds_center_square() {
    let grid = initialize(40, 40).unwrap();
    let view = grid.current_view();
    assert_eq!(view[(20, 20)].b, 1.0);
    assert!(view.as_slice().iter().all(|c| c.a == 1.0));
    assert!(view.as_slice().iter().all(|c| (0.0..=1.0).contains(&c.b)));
  }

  #[test]
  fn queued_mutations_wait_for_tick() {
    let mut sim = quiet(12, 12);
    let sender = sim.sender();
    let kill = sim.params().kill_rate;

    assert!(sender.adjust(Parameter::KillRate, 0.01));
    assert!(sender.brush(sim.brush_at(6, 6)));
    assert_eq!(sim.pending_mutations(), 2);
    assert_eq!(sim.params().kill_rate, kill);
    assert_eq!(sim.current_view()[(6, 6)], Cell::RESTING);

    sim.tick();
    assert_eq!(sim.pending_mutations(), 0);
    assert_eq!(sim.params().kill_rate, kill + 0.01);
    // Painted before the step, so the step has already reacted to it
    assert!(sim.current_view()[(6, 6)].b > 0.0);
  }

  #[test]
  fn tick_records_metrics() {
    let mut sim = quiet(8, 8);
    for _ in 0..3 {
      sim.tick();
    }
    assert_eq!(sim.metrics().steps, 3);
    assert_eq!(sim.metrics().step_time.len(), 3);
    let report = sim.metrics().last_report.unwrap();
    assert_eq!(report.cells_updated, 36);
  }

  #[test]
  fn brush_uses_configured_radius() {
    let mut sim = quiet(20, 20);
    sim.set_brush_radius(-3);
    assert_eq!(sim.brush_radius(), 0);
    assert_eq!(sim.apply_brush(5, 5), 1);
    sim.set_brush_radius(2);
    assert_eq!(sim.apply_brush(10, 10), 25);
    // Queued strokes pick up the same radius
    assert_eq!(sim.brush_at(3, 4), BrushRequest::new(3, 4, 2));
  }

  #[test]
  fn from_config_respects_settings() {
    let config = SimulationConfig::from_toml_str(
      r#"
      [grid]
      width = 30
      height = 20

      [workers]
      threads = 3

      [seed]
      rng_seed = 99

      [brush]
      radius = 2
      "#,
    )
    .unwrap();

    let a = Simulation::from_config(&config).unwrap();
    let b = Simulation::from_config(&config).unwrap();
    assert_eq!(a.grid().width(), 30);
    assert_eq!(a.grid().height(), 20);
    assert_eq!(a.workers(), 3);
    assert_eq!(a.brush_radius(), 2);
    assert_eq!(a.current_view(), b.current_view());
  }
}
