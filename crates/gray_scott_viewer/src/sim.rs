//! Drives the simulation from the Bevy frame loop.
//!
//! Every frame runs in three chained phases:
//!
//! ```text
//! Input -> Step -> Present
//! ```
//!
//! Input systems only queue mutations; they are applied by the step itself,
//! so nothing touches the grid while a step is running.

use bevy::prelude::*;
use gray_scott::{MutationSender, Simulation};

use crate::config::RenderSettings;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerSet {
  /// Keyboard and mouse handling.
  Input,
  /// Simulation ticks.
  Step,
  /// Texture upload and overlay.
  Present,
}

/// The running simulation.
#[derive(Resource, Deref, DerefMut)]
pub struct SimulationState(pub Simulation);

/// Queue handle shared by the input systems.
#[derive(Resource, Deref)]
pub struct Mutations(pub MutationSender);

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
  fn build(&self, app: &mut App) {
    app
      .configure_sets(
        Update,
        (ViewerSet::Input, ViewerSet::Step, ViewerSet::Present).chain(),
      )
      .add_systems(Update, step_simulation.in_set(ViewerSet::Step));
  }
}

fn step_simulation(mut sim: ResMut<SimulationState>, settings: Res<RenderSettings>) {
  for _ in 0..settings.steps_per_frame {
    sim.tick();
  }
}
