mod config;
mod hud;
mod input;
mod render;
mod sim;

use std::error::Error;
use std::path::PathBuf;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use clap::Parser;
use gray_scott::Simulation;

use crate::config::{ColorMode, InputSettings, RenderSettings, ViewerConfig};

/// Interactive Gray-Scott reaction-diffusion viewer.
///
/// Arrows tune kill/feed, 1/2 the time step, Q/A and W/S the diffusion
/// rates. Moving the cursor paints activator. C cycles colors, H toggles the
/// overlay, +/- change steps per frame.
#[derive(Parser, Debug)]
#[command(name = "gray-scott", version)]
struct Args {
  /// Viewer config file.
  #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
  config: PathBuf,
  /// Worker threads; 0 uses every hardware thread.
  #[arg(long)]
  threads: Option<usize>,
  #[arg(long)]
  width: Option<u32>,
  #[arg(long)]
  height: Option<u32>,
  /// Fixed seed for the initial random texture.
  #[arg(long)]
  seed: Option<u64>,
  #[arg(long, value_enum)]
  color: Option<ColorMode>,
}

impl Args {
  fn apply(&self, config: &mut ViewerConfig) {
    let sim = &mut config.simulation;
    if let Some(threads) = self.threads {
      sim.workers.threads = threads;
    }
    if let Some(width) = self.width {
      sim.grid.width = width;
    }
    if let Some(height) = self.height {
      sim.grid.height = height;
    }
    if let Some(seed) = self.seed {
      sim.seed.rng_seed = Some(seed);
    }
    if let Some(color) = self.color {
      config.render.color_mode = color;
    }
  }
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();

  let mut config = ViewerConfig::load(&args.config)?;
  args.apply(&mut config);
  config.validate()?;

  let grid = config.simulation.grid;
  let scale = config.window.scale;
  let window_width = (grid.width as f32 * scale).round() as u32;
  let window_height = (grid.height as f32 * scale).round() as u32;

  let plugins = DefaultPlugins
    .set(ImagePlugin::default_nearest())
    .set(WindowPlugin {
      primary_window: Some(Window {
        resolution: WindowResolution::new(window_width, window_height),
        title: config.window.title.clone(),
        present_mode: PresentMode::AutoVsync,
        resizable: false,
        ..default()
      }),
      ..default()
    });

  // Tracy owns the global subscriber
  #[cfg(feature = "tracy")]
  let plugins = {
    gray_scott::init_tracy();
    plugins.disable::<bevy::log::LogPlugin>()
  };

  let mut app = App::new();
  app.add_plugins(plugins);

  // Built after the log plugin so pool and grid setup are logged
  let simulation = Simulation::from_config(&config.simulation)?;
  let mutations = simulation.sender();

  app
    .insert_resource(sim::SimulationState(simulation))
    .insert_resource(sim::Mutations(mutations))
    .insert_resource(RenderSettings {
      color_mode: config.render.color_mode,
      steps_per_frame: config.render.steps_per_frame,
      scale,
    })
    .insert_resource(InputSettings {
      paint_requires_button: config.input.paint_requires_button,
    })
    .init_resource::<input::BrushState>()
    .add_plugins((
      sim::SimulationPlugin,
      input::ViewerInputPlugin,
      render::FieldRenderPlugin,
      hud::HudPlugin,
    ))
    .run();

  Ok(())
}
