//! Level lookup for arbitrary terms, backing `define_tian_level`.

use std::collections::HashMap;

use crate::config::Config;
use crate::entries::read_level_lists;
use crate::error::Result;
use crate::tables::read_level_table;

pub const USAGE: &str = "Usage: define_tian_level [options] <term1> [<term2> ...]";

/// The terms to look up, or the usage line when there are none.
pub fn require_terms(terms: &[String]) -> std::result::Result<&[String], &'static str> {
  if terms.is_empty() {
    Err(USAGE)
  } else {
    Ok(terms)
  }
}

/// Term -> level. Generated tables give tian levels; terms they don't cover
/// fall back to the HSK level of the list they appear in.
pub struct LevelIndex {
  levels: HashMap<String, u32>,
}

impl LevelIndex {
  pub fn build(config: &Config) -> Result<LevelIndex> {
    let mut levels = HashMap::new();
    let tables = [
      (config.vocab_csv(), "vocab"),
      (config.hanzi_csv(), "hanzi"),
      (config.radicals_csv(), "radical"),
    ];
    for (path, key) in &tables {
      for (term, level) in read_level_table(path, key)? {
        levels.entry(term).or_insert(level);
      }
    }
    let words = read_level_lists(&config.levels, |l| config.words_list(l))?;
    let hanzi = read_level_lists(&config.levels, |l| config.hanzi_list(l))?;
    for list in words.iter().chain(hanzi.iter()) {
      for term in &list.entries {
        levels.entry(term.clone()).or_insert(list.level);
      }
    }
    Ok(LevelIndex { levels: levels })
  }

  pub fn get(&self, term: &str) -> Option<u32> {
    self.levels.get(term).copied()
  }

  /// `term: level`, or `term: not found`.
  pub fn describe(&self, term: &str) -> String {
    match self.get(term) {
      Some(level) => format!("{}: {}", term, level),
      None => format!("{}: not found", term),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn at_least_one_term_is_needed() {
    assert_eq!(require_terms(&[]), Err(USAGE));
    let terms = vec!["你好".to_string()];
    assert_eq!(require_terms(&terms), Ok(&terms[..]));
  }

  #[test]
  fn tables_win_over_lists() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::rooted_at(dir.path());
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::create_dir_all(&config.words_dir).unwrap();
    fs::create_dir_all(&config.hanzi_dir).unwrap();
    fs::write(config.hanzi_csv(), "hanzi,tian_level\n好,12\n").unwrap();
    fs::write(config.hanzi_list(1), "好\n你\n").unwrap();
    fs::write(config.words_list(2), "你好\n").unwrap();
    fs::write(config.words_list(3), "你好\n").unwrap();

    let index = LevelIndex::build(&config).unwrap();
    assert_eq!(index.get("好"), Some(12));
    assert_eq!(index.get("你"), Some(1));
    assert_eq!(index.get("你好"), Some(2));
    assert_eq!(index.describe("猫"), "猫: not found");
    assert_eq!(index.describe("好"), "好: 12");
  }
}
