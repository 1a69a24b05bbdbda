use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A core data source (decomposition data, dictionary) can't be opened.
  /// Nothing useful can be generated without it, so the run stops here.
  #[error("{what} is required but not available at {}. \
           Download it and point `{key}` in the config file at it.\n\
           Original error: {source}", path.display())]
  MissingDependency {
    what: &'static str,
    key: &'static str,
    path: PathBuf,
    source: io::Error,
  },

  #[error("I/O error on {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),

  #[error("config file error: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("invalid config value for '{field}': {reason}")]
  InvalidConfig { field: &'static str, reason: String },
}

impl Error {
  pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
    Error::Io { path: path.into(), source: source }
  }
}

pub type Result<T> = std::result::Result<T, Error>;
