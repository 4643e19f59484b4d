//! Tracy profiler hookup for the simulation spans.

use tracing_subscriber::prelude::*;
use tracing_tracy::TracyLayer;

/// Routes `run_step` and `Simulation::tick` spans to Tracy.
///
/// Call once at startup, before the first step.
pub fn init_tracy() {
  tracing_subscriber::registry()
    .with(TracyLayer::default())
    .init();
}
