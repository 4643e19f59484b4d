//! Error types.

use std::path::PathBuf;

/// Failure to create the grid buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
  /// Width or height is zero.
  EmptyDimensions { width: u32, height: u32 },
  /// The allocator could not provide a buffer of `cells` cells.
  Allocation { cells: u64 },
}

impl std::fmt::Display for GridError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      GridError::EmptyDimensions { width, height } => {
        write!(f, "grid dimensions must be non-zero, got {width}x{height}")
      }
      GridError::Allocation { cells } => {
        write!(f, "failed to allocate grid buffer of {cells} cells")
      }
    }
  }
}

impl std::error::Error for GridError {}

/// A parameter name that does not match any tunable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
  UnknownParameter(String),
}

impl std::fmt::Display for ParameterError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ParameterError::UnknownParameter(name) => write!(f, "unknown parameter: {name:?}"),
    }
  }
}

impl std::error::Error for ParameterError {}

/// Failure to load or validate a configuration file.
#[derive(Debug)]
pub enum ConfigError {
  Io {
    path: PathBuf,
    source: std::io::Error,
  },
  Parse(toml::de::Error),
  Invalid(String),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ConfigError::Io { path, source } => {
        write!(f, "failed to read config {}: {source}", path.display())
      }
      ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
      ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ConfigError::Io { source, .. } => Some(source),
      ConfigError::Parse(e) => Some(e),
      ConfigError::Invalid(_) => None,
    }
  }
}

impl From<toml::de::Error> for ConfigError {
  fn from(e: toml::de::Error) -> Self {
    ConfigError::Parse(e)
  }
}

/// Failure to build the worker thread pool.
#[derive(Debug)]
pub struct WorkerPoolError(pub rayon::ThreadPoolBuildError);

impl std::fmt::Display for WorkerPoolError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "failed to build worker pool: {}", self.0)
  }
}

impl std::error::Error for WorkerPoolError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    Some(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn allocation_error_names_requested_size() {
    let msg = GridError::Allocation { cells: 640_000 }.to_string();
    assert!(msg.contains("640000"));
  }

  #[test]
  fn unknown_parameter_quotes_name() {
    let msg = ParameterError::UnknownParameter("viscosity".into()).to_string();
    assert_eq!(msg, "unknown parameter: \"viscosity\"");
  }
}
