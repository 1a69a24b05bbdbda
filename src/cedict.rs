use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::lookup::Dictionary;

static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+) (\S+) \[(.+?)\] /(.+)/\s*$").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
  pub trad: String,
  pub simp: String,
  /// Numbered, e.g. `xue2 xi2`. Proper names start with a capital.
  pub pinyin: String,
  pub defs: Vec<String>,
}

impl Entry {
  pub fn is_archaic(&self) -> bool {
    self.defs.iter().any(|d| d.to_lowercase().contains("archaic"))
  }

  pub fn is_name(&self) -> bool {
    self.pinyin.chars().next().map_or(false, |c| c.is_uppercase())
  }
}

/// Definitions that only point at another entry.
pub fn is_cross_reference(def: &str) -> bool {
  def.starts_with("variant of ")
      || def.starts_with("old variant of ")
      || def.starts_with("also written ")
}

pub fn parse_entry(entry_str: &str) -> Option<Entry> {
  if entry_str.starts_with('#') {
    return None;
  }
  ENTRY_RE.captures(entry_str).map(|cap| {
    let defs = cap[4]
        .split('/')
        .map(|d| d.trim())
        // classifiers and Taiwan readings aren't meanings
        .filter(|d| !d.is_empty() && !d.starts_with("CL:") && !d.starts_with("Taiwan pr. "))
        .map(|d| d.to_string())
        .collect();
    Entry {
      trad: cap[1].to_string(),
      simp: cap[2].to_string(),
      pinyin: cap[3].to_string(),
      defs: defs,
    }
  })
}

pub struct Dict {
  entries: Vec<Entry>,
  simp_idx: HashMap<String, Vec<usize>>,
}

impl Dict {
  pub fn parse(text: &str) -> Dict {
    let mut rv = Dict { entries: Vec::new(), simp_idx: HashMap::new() };
    for line in text.lines() {
      if let Some(ent) = parse_entry(line) {
        rv.simp_idx.entry(ent.simp.clone()).or_insert_with(Vec::new).push(rv.entries.len());
        rv.entries.push(ent);
      }
    }
    rv
  }

  /// Loads a CC-CEDICT file. Without it no readings can be produced, so a
  /// missing file is a hard error.
  pub fn from_file(path: &Path) -> Result<Dict> {
    let text = fs::read_to_string(path).map_err(|e| Error::MissingDependency {
      what: "the CC-CEDICT dictionary",
      key: "cedict_file",
      path: path.to_path_buf(),
      source: e,
    })?;
    Ok(Dict::parse(&text))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn search_simp(&self, simp: &str) -> Vec<Entry> {
    match self.simp_idx.get(simp) {
      Some(idxs) => idxs.iter().map(|&i| self.entries[i].clone()).collect(),
      None => Vec::new(),
    }
  }
}

impl Dictionary for Dict {
  fn entries(&self, hanzi: &str) -> Vec<Entry> {
    self.search_simp(hanzi)
  }

  fn fallback_pinyin(&self, hanzi: &str) -> Option<String> {
    // prefer a common-noun reading even if it's archaic
    let entries = self.search_simp(hanzi);
    entries
        .iter()
        .find(|e| !e.is_name())
        .or(entries.first())
        .map(|e| e.pinyin.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SAMPLE: &str = "\
# CC-CEDICT
# comment lines are skipped
好 好 [hao3] /good/well/proper/CL:個|个[ge4]/
好 好 [hao4] /to be fond of/to have a tendency to/
李 李 [Li3] /surname Li/
李 李 [li3] /plum/
乂 乂 [yi4] /(archaic) to regulate/to govern/
著 着 [zhe5] /aspect particle/Taiwan pr. [zhuo2]/
";

  #[test]
  fn parses_entries_and_drops_classifiers() {
    let dict = Dict::parse(SAMPLE);
    assert_eq!(dict.len(), 6);
    let hao = dict.search_simp("好");
    assert_eq!(hao.len(), 2);
    assert_eq!(hao[0].pinyin, "hao3");
    assert_eq!(hao[0].defs, vec!["good", "well", "proper"]);
    assert_eq!(dict.search_simp("着")[0].defs, vec!["aspect particle"]);
  }

  #[test]
  fn names_and_archaic_entries() {
    let dict = Dict::parse(SAMPLE);
    let li = dict.search_simp("李");
    assert!(li[0].is_name());
    assert!(!li[1].is_name());
    assert!(dict.search_simp("乂")[0].is_archaic());
    assert!(!li[1].is_archaic());
  }

  #[test]
  fn fallback_prefers_lowercase_reading() {
    let dict = Dict::parse(SAMPLE);
    assert_eq!(dict.fallback_pinyin("李"), Some("li3".to_string()));
    assert_eq!(dict.fallback_pinyin("乂"), Some("yi4".to_string()));
    assert_eq!(dict.fallback_pinyin("龘"), None);
  }

  #[test]
  fn cross_references() {
    assert!(is_cross_reference("variant of 好[hao3]"));
    assert!(is_cross_reference("old variant of 李[li3]"));
    assert!(!is_cross_reference("good"));
  }

  #[test]
  fn missing_file_is_a_missing_dependency() {
    let dir = tempfile::tempdir().unwrap();
    match Dict::from_file(&dir.path().join("cedict_ts.u8")) {
      Err(Error::MissingDependency { key, .. }) => assert_eq!(key, "cedict_file"),
      _ => panic!("expected MissingDependency"),
    }
  }
}
