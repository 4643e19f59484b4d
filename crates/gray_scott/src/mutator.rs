//! External perturbations applied between steps.
//!
//! Input handlers never touch the buffers directly. They either call
//! [`adjust_parameter`] / [`apply_brush`] while holding the simulation
//! exclusively, or push a [`Mutation`] through a [`MutationSender`] from
//! anywhere; queued mutations are drained right before the next step starts
//! and never mid-step.

use async_channel::{Receiver, Sender, TryRecvError};

use crate::blitter::Blitter;
use crate::cell::Cell;
use crate::coords::GridRect;
use crate::error::ParameterError;
use crate::grid::Grid;
use crate::params::{Parameter, SimulationParams};

/// Localized overwrite of the activator around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrushRequest {
  pub center_x: i64,
  pub center_y: i64,
  /// Half-width of the square stroke. Negative values act as 0.
  pub radius: i64,
}

impl BrushRequest {
  pub const fn new(center_x: i64, center_y: i64, radius: i64) -> Self {
    Self {
      center_x,
      center_y,
      radius,
    }
  }

  /// Square covered by this stroke, before clipping to the grid.
  pub fn window(&self) -> GridRect {
    let radius = self.radius.clamp(0, u32::MAX as i64 / 2 - 1) as u32;
    GridRect::centered(self.center_x, self.center_y, radius)
  }
}

/// Adds `delta` to the parameter named `name`, returning its new value.
pub fn adjust_parameter(
  params: &mut SimulationParams,
  name: &str,
  delta: f64,
) -> Result<f64, ParameterError> {
  let param: Parameter = name.parse()?;
  Ok(adjust_logged(params, param, delta))
}

fn adjust_logged(params: &mut SimulationParams, param: Parameter, delta: f64) -> f64 {
  let old = params.get(param);
  let new = params.adjust(param, delta);
  log::debug!("{param}: {old} -> {new}");
  new
}

/// Forces `a = 0, b = 1` on every in-grid cell of the stroke, directly in
/// the current buffer. Returns the number of cells written.
pub fn apply_brush(grid: &mut Grid, request: BrushRequest) -> u64 {
  let Some(rect) = request.window().clamped_to(grid.width(), grid.height()) else {
    return 0;
  };
  Blitter::new(grid.current_mut()).fill(rect, Cell::ACTIVATED);
  u64::from(rect.width) * u64::from(rect.height)
}

/// A deferred perturbation.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
  Adjust { param: Parameter, delta: f64 },
  Brush(BrushRequest),
}

impl Mutation {
  /// Applies the mutation immediately.
  pub fn apply(&self, grid: &mut Grid, params: &mut SimulationParams) {
    match *self {
      Mutation::Adjust { param, delta } => {
        adjust_logged(params, param, delta);
      }
      Mutation::Brush(request) => {
        apply_brush(grid, request);
      }
    }
  }
}

/// Receiving side of the mutation channel, owned by the simulation.
#[derive(Debug)]
pub struct MutationQueue {
  tx: Sender<Mutation>,
  rx: Receiver<Mutation>,
}

impl MutationQueue {
  pub fn new() -> Self {
    let (tx, rx) = async_channel::unbounded();
    Self { tx, rx }
  }

  /// Returns a handle that input code can clone and push through.
  pub fn sender(&self) -> MutationSender {
    MutationSender {
      tx: self.tx.clone(),
    }
  }

  /// Number of queued mutations.
  pub fn len(&self) -> usize {
    self.rx.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rx.is_empty()
  }

  /// Removes everything queued so far, in arrival order.
  ///
  /// Mutations pushed while draining are left for the next drain.
  pub fn drain(&self) -> Vec<Mutation> {
    let pending = self.rx.len();
    let mut out = Vec::with_capacity(pending);
    for _ in 0..pending {
      match self.rx.try_recv() {
        Ok(mutation) => out.push(mutation),
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
      }
    }
    out
  }
}

impl Default for MutationQueue {
  fn default() -> Self {
    Self::new()
  }
}

/// Cloneable handle for submitting mutations from input code.
#[derive(Clone, Debug)]
pub struct MutationSender {
  tx: Sender<Mutation>,
}

impl MutationSender {
  /// Queues a mutation for the next step. Returns `false` if the simulation
  /// has been dropped.
  pub fn send(&self, mutation: Mutation) -> bool {
    self.tx.try_send(mutation).is_ok()
  }

  pub fn adjust(&self, param: Parameter, delta: f64) -> bool {
    self.send(Mutation::Adjust { param, delta })
  }

  pub fn brush(&self, request: BrushRequest) -> bool {
    self.send(Mutation::Brush(request))
  }
}
