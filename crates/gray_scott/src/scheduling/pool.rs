//! Persistent worker pool.
//!
//! The pool is built once and reused for every step. [`WorkerPool::run_all`]
//! is the step barrier: it returns only after every job has finished.

use std::num::NonZeroUsize;

use crate::error::WorkerPoolError;

enum Backend {
  Threads(rayon::ThreadPool),
  /// Jobs run one after another on the calling thread.
  Inline,
}

/// Fixed-size pool of OS threads that runs one batch of jobs per step.
pub struct WorkerPool {
  backend: Backend,
  workers: usize,
}

impl WorkerPool {
  /// Builds a pool of `threads` workers. `0` means one worker per available
  /// hardware thread.
  pub fn new(threads: usize) -> Result<Self, WorkerPoolError> {
    let workers = if threads == 0 {
      available_workers()
    } else {
      threads
    };

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(workers)
      .thread_name(|i| format!("gray-scott-worker-{i}"))
      .build()
      .map_err(WorkerPoolError)?;

    log::info!("Worker pool ready with {workers} threads");
    Ok(Self {
      backend: Backend::Threads(pool),
      workers,
    })
  }

  /// Like [`WorkerPool::new`], but falls back to running on the calling
  /// thread if the pool cannot be built.
  pub fn with_fallback(threads: usize) -> Self {
    match Self::new(threads) {
      Ok(pool) => pool,
      Err(e) => {
        log::warn!("{e}; falling back to single-threaded stepping");
        Self::inline()
      }
    }
  }

  /// A pool that runs every job on the calling thread.
  pub fn inline() -> Self {
    Self {
      backend: Backend::Inline,
      workers: 1,
    }
  }

  /// Number of workers jobs are spread over.
  #[inline]
  pub fn workers(&self) -> usize {
    self.workers
  }

  /// Runs `f` once per job and blocks until all of them have completed.
  ///
  /// No job's side effects are observable by the caller before this returns.
  pub fn run_all<J, F>(&self, jobs: Vec<J>, f: F)
  where
    J: Send,
    F: Fn(J) + Sync,
  {
    match &self.backend {
      Backend::Threads(pool) => pool.scope(|scope| {
        let f = &f;
        for job in jobs {
          scope.spawn(move |_| f(job));
        }
      }),
      Backend::Inline => jobs.into_iter().for_each(f),
    }
  }
}

impl std::fmt::Debug for WorkerPool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let backend = match self.backend {
      Backend::Threads(_) => "threads",
      Backend::Inline => "inline",
    };
    f.debug_struct("WorkerPool")
      .field("backend", &backend)
      .field("workers", &self.workers)
      .finish()
  }
}

/// Hardware threads reported by the OS, or 1 if that cannot be determined.
pub fn available_workers() -> usize {
  match std::thread::available_parallelism() {
    Ok(n) => n.get(),
    Err(e) => {
      log::warn!("Could not query available parallelism ({e}); using 1 worker");
      NonZeroUsize::MIN.get()
    }
  }
}
