//! Keyboard parameter tuning and mouse painting.
//!
//! Both only queue mutations; [`crate::sim`] applies them before the next
//! step.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use gray_scott::Parameter;

use crate::config::{InputSettings, RenderSettings};
use crate::render::ViewerCamera;
use crate::sim::{Mutations, SimulationState, ViewerSet};

pub const MAX_RADIUS: i64 = 100;

/// Key, parameter and direction of each tuning binding.
const PARAMETER_KEYS: [(KeyCode, Parameter, f64); 10] = [
  (KeyCode::ArrowUp, Parameter::KillRate, 1.0),
  (KeyCode::ArrowDown, Parameter::KillRate, -1.0),
  (KeyCode::ArrowRight, Parameter::FeedRate, 1.0),
  (KeyCode::ArrowLeft, Parameter::FeedRate, -1.0),
  (KeyCode::Digit2, Parameter::TimeStep, 1.0),
  (KeyCode::Digit1, Parameter::TimeStep, -1.0),
  (KeyCode::KeyQ, Parameter::DiffusionRateA, 1.0),
  (KeyCode::KeyA, Parameter::DiffusionRateA, -1.0),
  (KeyCode::KeyW, Parameter::DiffusionRateB, 1.0),
  (KeyCode::KeyS, Parameter::DiffusionRateB, -1.0),
];

/// Cell under the cursor, if the cursor is over the window. The stroke
/// radius lives on the simulation itself.
#[derive(Resource, Debug, Default)]
pub struct BrushState {
  pub cell: Option<(i64, i64)>,
}

pub struct ViewerInputPlugin;

impl Plugin for ViewerInputPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (parameter_keys, view_keys, brush_input, paint.after(brush_input)).in_set(ViewerSet::Input),
    );
  }
}

/// Converts a world-space point to grid coordinates.
///
/// The field sprite is centered on the origin with `scale` world units per
/// cell; grid row 0 is the top of the sprite.
pub fn world_to_cell(world: Vec2, width: u32, height: u32, scale: f32) -> (i64, i64) {
  let x = world.x / scale + width as f32 / 2.0;
  let y = height as f32 / 2.0 - world.y / scale;
  (x.floor() as i64, y.floor() as i64)
}

fn parameter_keys(keys: Res<ButtonInput<KeyCode>>, sim: Res<SimulationState>, mutations: Res<Mutations>) {
  for &(key, param, direction) in &PARAMETER_KEYS {
    if keys.just_pressed(key) {
      let delta = direction * sim.steps().for_parameter(param);
      mutations.adjust(param, delta);
      info!("{param} {delta:+} (now {})", sim.params().get(param) + delta);
    }
  }
}

fn view_keys(keys: Res<ButtonInput<KeyCode>>, mut settings: ResMut<RenderSettings>) {
  if keys.just_pressed(KeyCode::KeyC) {
    settings.color_mode = settings.color_mode.next();
    info!("Color mode: {:?}", settings.color_mode);
  }
  if keys.just_pressed(KeyCode::Equal) {
    settings.steps_per_frame = (settings.steps_per_frame + 1).min(64);
  }
  if keys.just_pressed(KeyCode::Minus) {
    settings.steps_per_frame = settings.steps_per_frame.saturating_sub(1);
  }
}

fn brush_input(
  mut brush: ResMut<BrushState>,
  mut scroll_events: MessageReader<MouseWheel>,
  mut sim: ResMut<SimulationState>,
  settings: Res<RenderSettings>,
  window_query: Query<&Window, With<PrimaryWindow>>,
  camera_query: Query<(&Camera, &GlobalTransform), With<ViewerCamera>>,
) {
  for event in scroll_events.read() {
    let delta = match event.unit {
      MouseScrollUnit::Line => event.y as i64,
      MouseScrollUnit::Pixel => (event.y / 10.0) as i64,
    };
    if delta != 0 {
      let radius = scrolled_radius(sim.brush_radius(), delta);
      sim.set_brush_radius(radius);
    }
  }

  let Ok(window) = window_query.single() else {
    return;
  };
  let Ok((camera, camera_transform)) = camera_query.single() else {
    return;
  };

  brush.cell = window
    .cursor_position()
    .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok())
    .map(|world| world_to_cell(world, sim.grid().width(), sim.grid().height(), settings.scale));
}

/// Brush radius after a wheel movement of `delta` lines.
pub fn scrolled_radius(radius: i64, delta: i64) -> i64 {
  radius.saturating_add(delta).clamp(0, MAX_RADIUS)
}

fn paint(
  brush: Res<BrushState>,
  sim: Res<SimulationState>,
  input: Res<InputSettings>,
  mouse_buttons: Res<ButtonInput<MouseButton>>,
  mut cursor_moves: MessageReader<CursorMoved>,
  mutations: Res<Mutations>,
) {
  let moved = cursor_moves.read().count() > 0;
  let held = mouse_buttons.pressed(MouseButton::Left);
  let painting = if input.paint_requires_button {
    held
  } else {
    moved || held
  };
  if !painting {
    return;
  }

  if let Some((x, y)) = brush.cell {
    mutations.brush(sim.brush_at(x, y));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn world_origin_is_grid_center() {
    assert_eq!(world_to_cell(Vec2::ZERO, 800, 600, 1.0), (400, 300));
  }

  #[test]
  fn scrolling_stays_within_radius_bounds() {
    assert_eq!(scrolled_radius(4, 1), 5);
    assert_eq!(scrolled_radius(1, -3), 0);
    assert_eq!(scrolled_radius(MAX_RADIUS, 2), MAX_RADIUS);
  }

  #[test]
  fn top_left_corner_maps_to_first_cell() {
    let top_left = Vec2::new(-400.0 + 0.5, 300.0 - 0.5);
    assert_eq!(world_to_cell(top_left, 800, 600, 1.0), (0, 0));
  }

  #[test]
  fn scale_divides_world_units() {
    // Two screen pixels per cell: 10 world units right of center is 5 cells
    assert_eq!(world_to_cell(Vec2::new(10.0, -10.0), 100, 100, 2.0), (55, 55));
  }

  #[test]
  fn outside_points_map_outside_the_grid() {
    let (x, y) = world_to_cell(Vec2::new(-1000.0, 1000.0), 100, 100, 1.0);
    assert!(x < 0 && y < 0);
  }
}
