//! Rasterizes the current field into a texture shown on a single sprite.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use gray_scott::{Cell, CellSurface, Surface};
use palette::{Hsl, IntoColor, Srgb};
use rayon::prelude::*;

use crate::config::{ColorMode, RenderSettings};
use crate::sim::{SimulationState, ViewerSet};

/// RGBA pixel with 8 bits per channel.
pub type Rgba = palette::Srgba<u8>;

/// Hue of a cell fully taken over by the activator, in degrees.
const ACTIVATOR_HUE: f32 = 0.0;
/// Hue of resting substrate, in degrees.
const SUBSTRATE_HUE: f32 = 240.0;

/// Marks the camera used for cursor picking.
#[derive(Component)]
pub struct ViewerCamera;

/// Texture mirroring the grid, plus its CPU-side staging pixels.
#[derive(Resource)]
pub struct FieldTexture {
  pub handle: Handle<Image>,
  pixels: Surface<Rgba>,
}

pub struct FieldRenderPlugin;

impl Plugin for FieldRenderPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, setup_field)
      .add_systems(Update, upload_field.in_set(ViewerSet::Present));
  }
}

/// Maps a cell to a display color.
pub fn shade(cell: Cell, mode: ColorMode) -> Rgba {
  match mode {
    ColorMode::Grayscale => {
      let value = ((cell.a - cell.b) * 255.0).clamp(0.0, 255.0) as u8;
      Rgba::new(value, value, value, 255)
    }
    ColorMode::Hue => {
      let t = (cell.a - cell.b).clamp(0.0, 1.0) as f32;
      let hue = ACTIVATOR_HUE + (SUBSTRATE_HUE - ACTIVATOR_HUE) * t;
      let hsl: Hsl = Hsl::new(hue, 0.85, 0.2 + 0.35 * (1.0 - t));
      let rgb: Srgb = hsl.into_color();
      let rgb: Srgb<u8> = rgb.into_format();
      Rgba::new(rgb.red, rgb.green, rgb.blue, 255)
    }
  }
}

/// Shades every cell of `field` into `pixels`, one row per rayon task.
pub fn rasterize(field: &CellSurface, pixels: &mut Surface<Rgba>, mode: ColorMode) {
  let width = field.width() as usize;
  pixels
    .as_mut_slice()
    .par_chunks_mut(width)
    .zip(field.as_slice().par_chunks(width))
    .for_each(|(out, row)| {
      for (px, &cell) in out.iter_mut().zip(row) {
        *px = shade(cell, mode);
      }
    });
}

/// Creates an RGBA8 texture with nearest-neighbor sampling.
fn create_texture(images: &mut Assets<Image>, width: u32, height: u32) -> Handle<Image> {
  let size = Extent3d {
    width,
    height,
    depth_or_array_layers: 1,
  };

  let mut image = Image::new_fill(
    size,
    TextureDimension::D2,
    &[0, 0, 0, 255],
    TextureFormat::Rgba8UnormSrgb,
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
  );
  image.sampler = ImageSampler::nearest();

  images.add(image)
}

/// Copies staged pixels into the texture. Sizes must match.
fn upload_pixels(pixels: &Surface<Rgba>, image: &mut Image) {
  let bytes = pixels.as_bytes();
  if let Some(ref mut data) = image.data {
    data.copy_from_slice(bytes);
  }
}

fn setup_field(
  mut commands: Commands,
  mut images: ResMut<Assets<Image>>,
  sim: Res<SimulationState>,
  settings: Res<RenderSettings>,
) {
  let (width, height) = (sim.grid().width(), sim.grid().height());
  let handle = create_texture(&mut images, width, height);

  commands.spawn((
    ViewerCamera,
    Camera2d,
    Camera {
      clear_color: ClearColorConfig::Custom(Color::BLACK),
      ..default()
    },
  ));
  commands.spawn((
    Sprite {
      image: handle.clone(),
      ..default()
    },
    Transform::from_scale(Vec3::new(settings.scale, settings.scale, 1.0)),
  ));

  info!("Field texture {width}x{height} at scale {}", settings.scale);
  commands.insert_resource(FieldTexture {
    handle,
    pixels: Surface::new(width, height),
  });
}

#[cfg_attr(feature = "tracy", tracing::instrument(skip_all))]
fn upload_field(
  sim: Res<SimulationState>,
  settings: Res<RenderSettings>,
  mut texture: ResMut<FieldTexture>,
  mut images: ResMut<Assets<Image>>,
) {
  let FieldTexture { handle, pixels } = &mut *texture;
  rasterize(sim.current_view(), pixels, settings.color_mode);
  if let Some(image) = images.get_mut(&*handle) {
    upload_pixels(pixels, image);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grayscale_matches_substrate_minus_activator() {
    assert_eq!(shade(Cell::RESTING, ColorMode::Grayscale), Rgba::new(255, 255, 255, 255));
    assert_eq!(shade(Cell::ACTIVATED, ColorMode::Grayscale), Rgba::new(0, 0, 0, 255));
    assert_eq!(shade(Cell::new(0.5, 0.25), ColorMode::Grayscale), Rgba::new(63, 63, 63, 255));
  }

  #[test]
  fn hue_separates_species() {
    let rest = shade(Cell::RESTING, ColorMode::Hue);
    let active = shade(Cell::ACTIVATED, ColorMode::Hue);
    assert!(rest.blue > rest.red);
    assert!(active.red > active.blue);
    assert_eq!(rest.alpha, 255);
  }

  #[test]
  fn rasterize_covers_every_cell() {
    let mut field = CellSurface::filled(5, 3, Cell::RESTING);
    field.set(4, 2, Cell::ACTIVATED);
    let mut pixels = Surface::new(5, 3);
    rasterize(&field, &mut pixels, ColorMode::Grayscale);
    assert_eq!(pixels[(0, 0)], Rgba::new(255, 255, 255, 255));
    assert_eq!(pixels[(4, 2)], Rgba::new(0, 0, 0, 255));
    assert_eq!(pixels.as_bytes().len(), 5 * 3 * 4);
  }
}
