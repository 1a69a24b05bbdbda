use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::cedict::{is_cross_reference, Entry};
use crate::config::Config;
use crate::entries::{dedup_in_order, read_level_lists, LevelList};
use crate::error::Result;
use crate::lookup::{first_some, non_empty, Decomposer, Dictionary};
use crate::pinyin::numbered_to_marks;
use crate::radicals::extract_radicals;
use crate::tables::{read_level_table, write_csv};

pub const COLUMNS: [&str; 11] = [
  "hanzi",
  "tian_level",
  "hsk_level",
  "pinyin",
  "primary_reading",
  "simple_meaning",
  "meaning",
  "meaning_mnemonic",
  "reading_mnemonic",
  "components",
  "in_names",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HanziRow {
  pub hanzi: String,
  pub tian_level: u32,
  pub hsk_level: u32,
  pub pinyin: String,
  pub primary_reading: String,
  pub simple_meaning: String,
  pub meaning: String,
  pub meaning_mnemonic: String,
  pub reading_mnemonic: String,
  pub components: String,
  pub in_names: bool,
}

/// What the dictionary says about one character.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Readings {
  /// Diacritic readings, de-duplicated, proper-name readings excluded.
  pub pinyin: Vec<String>,
  pub meanings: Vec<String>,
  pub in_names: bool,
}

/// Largest known level among `components`, or `own_level` if none is known.
pub fn derive_level(components: &[String], levels: &HashMap<String, u32>, own_level: u32) -> u32 {
  components
      .iter()
      .filter_map(|c| levels.get(c).copied())
      .max()
      .unwrap_or(own_level)
}

pub fn readings(hanzi: &str, dictionary: &dyn Dictionary) -> Readings {
  let current: Vec<Entry> =
      dictionary.entries(hanzi).into_iter().filter(|e| !e.is_archaic()).collect();
  let raw = first_some::<Vec<String>>(&[
      &|| non_empty(current.iter().map(|e| e.pinyin.clone()).collect()),
      &|| dictionary.fallback_pinyin(hanzi).map(|p| vec![p]),
  ])
  .unwrap_or_default();

  let in_names = raw.iter().any(|p| p.chars().next().map_or(false, |c| c.is_uppercase()));
  let pinyin = dedup_in_order(
      raw.iter()
          .filter(|p| !p.chars().next().map_or(false, |c| c.is_uppercase()))
          .map(|p| numbered_to_marks(p))
          .filter(|p| !p.is_empty()));
  let meanings = dedup_in_order(
      current
          .iter()
          .filter(|e| !e.is_name())
          .flat_map(|e| e.defs.iter())
          .filter(|d| !is_cross_reference(d))
          .cloned());

  Readings { pinyin: pinyin, meanings: meanings, in_names: in_names }
}

/// Builds one row per listed character, sorted by tian level, HSK level,
/// then character.
pub fn level_hanzi(lists: &[LevelList],
                   decomposer: &dyn Decomposer,
                   dictionary: &dyn Dictionary,
                   radical_levels: &HashMap<String, u32>)
                   -> Vec<HanziRow> {
  let mut rv = Vec::new();
  for list in lists {
    for hanzi in &list.entries {
      let components = extract_radicals(hanzi, decomposer);
      let readings = readings(hanzi, dictionary);
      if readings.pinyin.is_empty() && !readings.in_names {
        warn!("{} has no reading in the dictionary", hanzi);
      }
      rv.push(HanziRow {
        hanzi: hanzi.clone(),
        tian_level: derive_level(&components, radical_levels, list.level),
        hsk_level: list.level,
        pinyin: readings.pinyin.join(";"),
        primary_reading: readings.pinyin.first().cloned().unwrap_or_default(),
        simple_meaning: readings.meanings.first().cloned().unwrap_or_default(),
        meaning: readings.meanings.join("; "),
        meaning_mnemonic: String::new(),
        reading_mnemonic: String::new(),
        components: components.join(";"),
        in_names: readings.in_names,
      });
    }
  }
  rv.sort_by(|a, b| {
    (a.tian_level, a.hsk_level, &a.hanzi).cmp(&(b.tian_level, b.hsk_level, &b.hanzi))
  });
  rv
}

/// Reads the radicals table written by the radical generator; without it
/// every character falls back to its HSK level.
pub fn build_hanzi_csv(config: &Config,
                       decomposer: &dyn Decomposer,
                       dictionary: &dyn Dictionary)
                       -> Result<usize> {
  let radical_levels = read_level_table(&config.radicals_csv(), "radical")?;
  if radical_levels.is_empty() {
    warn!("no radical levels found; characters keep their HSK level");
  }
  let lists = read_level_lists(&config.levels, |l| config.hanzi_list(l))?;
  let rows = level_hanzi(&lists, decomposer, dictionary, &radical_levels);
  let path = config.hanzi_csv();
  write_csv(&path, &COLUMNS, &rows)?;
  info!("wrote {} characters to {}", rows.len(), path.display());
  Ok(rows.len())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cedict::Dict;
  use pretty_assertions::assert_eq;

  const CEDICT: &str = "\
好 好 [hao3] /good/well/
好 好 [hao4] /to be fond of/
好 好 [hao3] /variant of 好[hao3]/
李 李 [Li3] /surname Li/
李 李 [li3] /plum/
乂 乂 [yi4] /(archaic) to regulate/
乂 乂 [ai4] /(archaic) to mow/
丌 丌 [Ji1] /surname Ji/
";

  #[test]
  fn readings_are_deduped_and_marked() {
    let dict = Dict::parse(CEDICT);
    let r = readings("好", &dict);
    assert_eq!(r.pinyin, vec!["hǎo", "hào"]);
    assert_eq!(r.meanings, vec!["good", "well", "to be fond of"]);
    assert!(!r.in_names);
  }

  #[test]
  fn name_readings_only_set_the_flag() {
    let r = readings("李", &Dict::parse(CEDICT));
    assert_eq!(r.pinyin, vec!["lǐ"]);
    assert_eq!(r.meanings, vec!["plum"]);
    assert!(r.in_names);

    let r = readings("丌", &Dict::parse(CEDICT));
    assert!(r.pinyin.is_empty());
    assert!(r.in_names);
  }

  #[test]
  fn archaic_only_uses_the_fallback_reading() {
    let r = readings("乂", &Dict::parse(CEDICT));
    assert_eq!(r.pinyin, vec!["yì"]);
    assert!(r.meanings.is_empty());
  }

  #[test]
  fn unknown_character() {
    assert_eq!(readings("龘", &Dict::parse(CEDICT)), Readings::default());
  }

  #[test]
  fn level_is_max_of_known_components() {
    let levels = HashMap::from([("女".to_string(), 3), ("子".to_string(), 7)]);
    let comps = vec!["女".to_string(), "子".to_string(), "?".to_string()];
    assert_eq!(derive_level(&comps, &levels, 1), 7);
    assert_eq!(derive_level(&["?".to_string()], &levels, 2), 2);
    assert_eq!(derive_level(&[], &levels, 3), 3);
  }
}
