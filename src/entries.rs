use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Entries of one HSK level, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelList {
  pub level: u32,
  pub entries: Vec<String>,
}

pub fn parse_entries(text: &str) -> Vec<String> {
  text
      .lines()
      .map(|line| line.trim())
      .filter(|line| !line.is_empty())
      // strip a byte order mark some exported lists carry
      .map(|line| line.trim_start_matches('\u{feff}').to_string())
      .filter(|line| !line.is_empty())
      .collect()
}

/// Non-blank, trimmed lines of `path`, or `None` if the file doesn't exist.
pub fn read_entries(path: &Path) -> Result<Option<Vec<String>>> {
  match fs::read_to_string(path) {
    Ok(text) => Ok(Some(parse_entries(&text))),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!("skipping missing list {}", path.display());
      Ok(None)
    },
    Err(e) => Err(Error::io(path, e)),
  }
}

/// Reads one list per level. Levels whose file is missing contribute nothing.
pub fn read_level_lists<F>(levels: &[u32], path_for: F) -> Result<Vec<LevelList>>
    where F: Fn(u32) -> PathBuf {
  let mut rv = Vec::new();
  for &level in levels {
    if let Some(entries) = read_entries(&path_for(level))? {
      rv.push(LevelList { level: level, entries: entries });
    }
  }
  Ok(rv)
}

/// Drops a homograph marker like the `1` in `会1`.
pub fn strip_variant_suffix(word: &str) -> &str {
  word.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// Keeps the first occurrence of each item.
pub fn dedup_in_order<I, S>(items: I) -> Vec<String>
    where I: IntoIterator<Item = S>, S: Into<String> {
  let mut rv: Vec<String> = Vec::new();
  for item in items {
    let item = item.into();
    if !rv.contains(&item) {
      rv.push(item);
    }
  }
  rv
}
