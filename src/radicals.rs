//! Radical productivity and the radical tian levels.
//!
//! Radicals are introduced one at a time, most productive first. A character
//! unlocks once every one of its components has been introduced, and the raw
//! level of a radical is how many threshold-sized batches of characters are
//! unlocked by the time it arrives. Raw levels are then stretched onto the
//! fixed tian band.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::decomp::is_placeholder;
use crate::entries::{dedup_in_order, read_level_lists, LevelList};
use crate::error::Result;
use crate::lookup::Decomposer;
use crate::tables::write_csv;

pub const COLUMNS: [&str; 7] = [
  "radical",
  "tian_level",
  "radical_name",
  "hsk1_occurance",
  "hsk2_occurance",
  "hsk3_occurance",
  "productivity score",
];

/// Occurrences of one radical among the characters of levels 1-3.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RadicalRecord {
  pub counts: [u32; 3],
}

impl RadicalRecord {
  pub fn productivity(&self) -> u32 {
    5 * self.counts[0] + 3 * self.counts[1] + self.counts[2]
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RadicalRow {
  pub radical: String,
  pub tian_level: u32,
  pub radical_name: String,
  pub hsk1_occurance: u32,
  pub hsk2_occurance: u32,
  pub hsk3_occurance: u32,
  #[serde(rename = "productivity score")]
  pub productivity: u32,
}

/// Components of `hanzi` with placeholders removed, first-seen order.
pub fn extract_radicals(hanzi: &str, decomposer: &dyn Decomposer) -> Vec<String> {
  dedup_in_order(decomposer.components(hanzi).into_iter().filter(|c| !is_placeholder(c)))
}

/// Per-radical occurrence counts, plus the components of every distinct
/// character in the order first seen.
pub fn tally(lists: &[LevelList], decomposer: &dyn Decomposer)
    -> (BTreeMap<String, RadicalRecord>, Vec<(String, Vec<String>)>) {
  let mut counts: BTreeMap<String, RadicalRecord> = BTreeMap::new();
  let mut characters = Vec::new();
  let mut seen = HashSet::new();
  for list in lists {
    let slot = match list.level {
      1..=3 => (list.level - 1) as usize,
      other => {
        warn!("ignoring radical counts for level {}", other);
        continue;
      },
    };
    for hanzi in &list.entries {
      let radicals = extract_radicals(hanzi, decomposer);
      for radical in &radicals {
        counts.entry(radical.clone()).or_default().counts[slot] += 1;
      }
      if seen.insert(hanzi.clone()) {
        characters.push((hanzi.clone(), radicals));
      }
    }
  }
  (counts, characters)
}

/// Radicals in introduction order: productivity descending, then radical.
pub fn introduction_order(counts: &BTreeMap<String, RadicalRecord>) -> Vec<String> {
  let mut rv: Vec<(&String, u32)> = counts.iter().map(|(r, rec)| (r, rec.productivity())).collect();
  rv.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
  rv.into_iter().map(|(r, _)| r.clone()).collect()
}

/// Raw level of each radical in `order`, from simulating character unlocks.
pub fn raw_levels(order: &[String], characters: &[(String, Vec<String>)], threshold: u32)
    -> Vec<u32> {
  let threshold = threshold.max(1) as usize;
  // components still missing per character, and which characters wait on
  // each radical
  let mut missing: Vec<usize> = Vec::with_capacity(characters.len());
  let mut waiting: HashMap<&str, Vec<usize>> = HashMap::new();
  for (i, (_, components)) in characters.iter().enumerate() {
    missing.push(components.len());
    for c in components {
      waiting.entry(c.as_str()).or_default().push(i);
    }
  }

  let mut introduced: HashSet<&str> = HashSet::new();
  let mut unlocked: usize = 0;
  let mut rv = Vec::with_capacity(order.len());
  for radical in order {
    if introduced.insert(radical.as_str()) {
      for &i in waiting.get(radical.as_str()).map(Vec::as_slice).unwrap_or(&[]) {
        missing[i] -= 1;
        if missing[i] == 0 {
          unlocked += 1;
        }
      }
    }
    rv.push(unlocked.div_ceil(threshold).max(1) as u32);
  }
  rv
}

/// Stretches `raw` from `[1, max_raw]` onto `[1, bands]`.
pub fn rescale(raw: u32, max_raw: u32, bands: u32) -> u32 {
  if max_raw <= 1 {
    return 1;
  }
  let bands = bands.max(1) as u64;
  let scaled = (raw.max(1) as u64 - 1) * (bands - 1) / (max_raw as u64 - 1) + 1;
  scaled.clamp(1, bands) as u32
}

/// Levels every radical found in `lists` and returns the rows in output
/// order: tian level, then productivity descending, then radical.
pub fn level_radicals(lists: &[LevelList], decomposer: &dyn Decomposer, config: &Config)
    -> Vec<RadicalRow> {
  let (counts, characters) = tally(lists, decomposer);
  let order = introduction_order(&counts);
  let raw = raw_levels(&order, &characters, config.unlock_threshold);
  let max_raw = raw.iter().copied().max().unwrap_or(1);

  let mut rv: Vec<RadicalRow> = order
      .iter()
      .zip(raw)
      .map(|(radical, raw)| {
        let record = counts[radical];
        RadicalRow {
          radical: radical.clone(),
          tian_level: rescale(raw, max_raw, config.tian_bands),
          radical_name: decomposer.radical_name(radical).unwrap_or_default(),
          hsk1_occurance: record.counts[0],
          hsk2_occurance: record.counts[1],
          hsk3_occurance: record.counts[2],
          productivity: record.productivity(),
        }
      })
      .collect();
  rv.sort_by(|a, b| {
    a.tian_level
        .cmp(&b.tian_level)
        .then_with(|| b.productivity.cmp(&a.productivity))
        .then_with(|| a.radical.cmp(&b.radical))
  });
  rv
}

pub fn build_radicals_csv(config: &Config, decomposer: &dyn Decomposer) -> Result<usize> {
  let lists = read_level_lists(&config.levels, |l| config.hanzi_list(l))?;
  let rows = level_radicals(&lists, decomposer, config);
  let path = config.radicals_csv();
  write_csv(&path, &COLUMNS, &rows)?;
  info!("wrote {} radicals to {}", rows.len(), path.display());
  Ok(rows.len())
}
