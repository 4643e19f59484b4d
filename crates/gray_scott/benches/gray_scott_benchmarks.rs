use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gray_scott::{
  CenterSquareSeeder, Grid, SimulationParams, WorkerPool, initialize_with, laplacian_pair, step,
};

const GRID_SIZES: &[u32] = &[128, 256, 512];

fn seeded_grid(size: u32) -> Grid {
  initialize_with(size, size, &CenterSquareSeeder::default().with_rng_seed(7)).unwrap()
}

fn bench_step(c: &mut Criterion) {
  let mut group = c.benchmark_group("step");
  let pool = WorkerPool::new(0).unwrap();
  let params = SimulationParams::default();

  for &size in GRID_SIZES {
    let cell_count = (size as u64) * (size as u64);
    group.throughput(Throughput::Elements(cell_count));

    group.bench_with_input(BenchmarkId::new("grid", size), &size, |b, &size| {
      let mut grid = seeded_grid(size);
      b.iter(|| step(&mut grid, &params, &pool));
    });
  }

  group.finish();
}

fn bench_stencil(c: &mut Criterion) {
  let mut group = c.benchmark_group("stencil");
  let size = 256u32;
  let interior = (size as u64 - 2) * (size as u64 - 2);
  group.throughput(Throughput::Elements(interior));

  group.bench_function("laplacian_pair", |b| {
    let grid = seeded_grid(size);
    let field = grid.current_view();
    b.iter(|| {
      let mut acc = 0.0;
      for y in 1..size - 1 {
        for x in 1..size - 1 {
          let (lap_a, lap_b) = laplacian_pair(field, x, y);
          acc += lap_a + lap_b;
        }
      }
      acc
    });
  });

  group.finish();
}

fn bench_parallel_scaling(c: &mut Criterion) {
  let mut group = c.benchmark_group("parallel_scaling");

  let size = 512u32;
  let cell_count = (size as u64) * (size as u64);
  group.throughput(Throughput::Elements(cell_count));
  let params = SimulationParams::default();

  for threads in [1, 2, 4, 8] {
    let id = BenchmarkId::new("threads", threads);

    group.bench_with_input(id, &threads, |b, &threads| {
      let pool = WorkerPool::new(threads).unwrap();
      let mut grid = seeded_grid(size);

      b.iter(|| step(&mut grid, &params, &pool));
    });
  }

  group.bench_function("inline", |b| {
    let pool = WorkerPool::inline();
    let mut grid = seeded_grid(size);
    b.iter(|| step(&mut grid, &params, &pool));
  });

  group.finish();
}

criterion_group!(benches, bench_step, bench_stencil, bench_parallel_scaling);
criterion_main!(benches);
