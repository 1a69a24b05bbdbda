//! Character decomposition backed by the cjk-decomp data file.
//!
//! Lines look like `好:a(女,子)`: the character, a composition type, and the
//! direct components. Components without a Unicode code point are written as
//! numeric ids, which have lines of their own.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::entries::dedup_in_order;
use crate::error::{Error, Result};
use crate::lookup::Decomposer;

/// Marker some decomposition data uses for components with no glyph.
pub const NO_GLYPH: &str = "No glyph available";

const MAX_DEPTH: usize = 16;

static DECOMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^:\s]+):([^(\s]*)(?:\(([^)]*)\))?\s*$").unwrap());

pub fn is_placeholder(component: &str) -> bool {
  component.is_empty()
      || component == NO_GLYPH
      || component.chars().all(|c| c.is_ascii_digit())
}

#[derive(Default)]
pub struct CjkDecomp {
  parts: HashMap<String, Vec<String>>,
  names: HashMap<String, String>,
}

impl CjkDecomp {
  pub fn parse(decomp: &str, radical_names: &str) -> CjkDecomp {
    let mut rv = CjkDecomp::default();
    for line in decomp.lines() {
      if let Some(cap) = DECOMP_RE.captures(line.trim()) {
        let parts: Vec<String> = match cap.get(3) {
          Some(m) => m
              .as_str()
              .split(',')
              .map(|p| p.trim().to_string())
              .filter(|p| !p.is_empty())
              .collect(),
          None => Vec::new(),
        };
        rv.parts.insert(cap[1].to_string(), parts);
      }
    }
    for line in radical_names.lines() {
      if line.starts_with('#') {
        continue;
      }
      let mut fields = line.splitn(2, '\t');
      match (fields.next().map(str::trim), fields.next().map(str::trim)) {
        (Some(radical), Some(name)) if !radical.is_empty() => {
          rv.names.insert(radical.to_string(), name.to_string());
        },
        _ => (),
      }
    }
    rv
  }

  /// The decomposition file is required; the radical name table is not.
  pub fn from_files(decomp_path: &Path, names_path: &Path) -> Result<CjkDecomp> {
    let decomp = fs::read_to_string(decomp_path).map_err(|e| Error::MissingDependency {
      what: "the cjk-decomp decomposition data",
      key: "decomposition_file",
      path: decomp_path.to_path_buf(),
      source: e,
    })?;
    let names = match fs::read_to_string(names_path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!("no radical names at {}", names_path.display());
        String::new()
      },
      Err(e) => return Err(Error::io(names_path, e)),
    };
    Ok(CjkDecomp::parse(&decomp, &names))
  }

  pub fn is_radical(&self, component: &str) -> bool {
    self.names.contains_key(component)
  }

  fn collect(&self, hanzi: &str, depth: usize, rv: &mut Vec<String>) {
    let parts = match self.parts.get(hanzi) {
      Some(parts) => parts,
      None => return,
    };
    for part in parts {
      if self.is_radical(part) {
        rv.push(part.clone());
        continue;
      }
      let expandable = self.parts.get(part).map_or(false, |p| !p.is_empty());
      if expandable && depth < MAX_DEPTH {
        self.collect(part, depth + 1, rv);
      } else if !is_placeholder(part) {
        rv.push(part.clone());
      }
    }
  }
}

impl Decomposer for CjkDecomp {
  fn components(&self, hanzi: &str) -> Vec<String> {
    if self.is_radical(hanzi) {
      return vec![hanzi.to_string()];
    }
    let mut found = Vec::new();
    self.collect(hanzi, 0, &mut found);
    if found.is_empty() && self.parts.contains_key(hanzi) && !is_placeholder(hanzi) {
      // a primitive is its own only component
      return vec![hanzi.to_string()];
    }
    dedup_in_order(found)
  }

  fn radical_name(&self, radical: &str) -> Option<String> {
    self.names.get(radical).filter(|n| !n.is_empty()).cloned()
  }
}
