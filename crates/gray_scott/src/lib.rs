//! Gray-Scott - double-buffered reaction-diffusion simulation core.
//!
//! This crate advances a two-species Gray-Scott system over a fixed 2D grid.
//! Each tick drains pending mutations, evaluates a 9-point stencil and the
//! reaction terms for every interior cell across a persistent worker pool,
//! then swaps the current and next buffers.
//!
//! Presentation (windowing, rasterizing, overlays) lives outside this crate
//! and only talks to it through [`Simulation`].

pub mod blitter;
pub mod cell;
pub mod config;
pub mod coords;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod mutator;
pub mod params;
pub mod scheduling;
pub mod seeding;
pub mod simulation;
pub mod stencil;
pub mod surface;
#[cfg(feature = "tracy")]
mod tracy_init;

pub use blitter::{Blitter, Rect};
pub use cell::{Cell, CellSurface, Species};
pub use config::SimulationConfig;
pub use coords::{CellPos, GridRect};
pub use diagnostics::{StepMetrics, TimeSeries};
pub use error::{ConfigError, GridError, ParameterError, WorkerPoolError};
pub use grid::Grid;
pub use integrator::integrate_cell;
pub use mutator::{BrushRequest, Mutation, MutationQueue, MutationSender, adjust_parameter, apply_brush};
pub use params::{Parameter, ParameterSteps, SimulationParams};
pub use scheduling::{RowBand, StepReport, WorkerPool, partition_rows, run_step};
pub use seeding::{CenterSquareSeeder, GridSeeder, UniformSeeder};
pub use simulation::{Simulation, initialize, initialize_with, step};
pub use stencil::{laplacian, laplacian_pair};
pub use surface::Surface;
#[cfg(feature = "tracy")]
pub use tracy_init::init_tracy;
