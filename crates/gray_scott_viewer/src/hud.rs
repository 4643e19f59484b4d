//! Text overlay with the live parameters and step timing.

use bevy::prelude::*;

use crate::config::RenderSettings;
use crate::sim::{SimulationState, ViewerSet};

#[derive(Component)]
struct HudText;

#[derive(Resource, Debug)]
pub struct HudVisible(pub bool);

pub struct HudPlugin;

impl Plugin for HudPlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(HudVisible(true))
      .add_systems(Startup, spawn_hud)
      .add_systems(Update, (toggle_hud, update_hud).chain().in_set(ViewerSet::Present));
  }
}

fn spawn_hud(mut commands: Commands) {
  commands.spawn((
    HudText,
    Text::new(""),
    TextFont {
      font_size: 14.0,
      ..default()
    },
    TextColor(Color::srgb(1.0, 0.85, 0.2)),
    Node {
      position_type: PositionType::Absolute,
      top: Val::Px(8.0),
      left: Val::Px(8.0),
      ..default()
    },
  ));
}

fn toggle_hud(keys: Res<ButtonInput<KeyCode>>, mut visible: ResMut<HudVisible>) {
  if keys.just_pressed(KeyCode::KeyH) {
    visible.0 = !visible.0;
  }
}

fn update_hud(
  mut sim: ResMut<SimulationState>,
  visible: Res<HudVisible>,
  settings: Res<RenderSettings>,
  mut query: Query<(&mut Text, &mut Visibility), With<HudText>>,
) {
  let Ok((mut text, mut visibility)) = query.single_mut() else {
    return;
  };

  if !visible.0 {
    *visibility = Visibility::Hidden;
    return;
  }
  *visibility = Visibility::Inherited;

  let params = *sim.params();
  let workers = sim.workers();
  let brush_radius = sim.brush_radius();
  let metrics = sim.metrics_mut();
  let step_ms = metrics.step_time.current().unwrap_or(0.0);
  let (min_ms, max_ms, avg_ms) = (
    metrics.step_time.min(),
    metrics.step_time.max(),
    metrics.step_time.avg(),
  );
  let mutation_ms = metrics.mutation_time.avg();

  text.0 = format!(
    "KILL: {:.4}\nFEED: {:.4}\nDT: {:.2}\nDa: {:.4}  Db: {:.4}\n\
     step: {step_ms:.2} ms (min {min_ms:.2} / avg {avg_ms:.2} / max {max_ms:.2})\n\
     mutations: {mutation_ms:.3} ms avg\n\
     steps: {}  x{}/frame  workers: {workers}\n\
     brush: {brush_radius}  color: {:?}",
    params.kill_rate,
    params.feed_rate,
    params.time_step,
    params.diffusion_rate_a,
    params.diffusion_rate_b,
    metrics.steps,
    settings.steps_per_frame,
    settings.color_mode,
  );
}
