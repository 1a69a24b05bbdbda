use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::anki_export::{ExportIndex, ExportNote};
use crate::config::Config;
use crate::entries::{dedup_in_order, read_level_lists, strip_variant_suffix, LevelList};
use crate::error::Result;
use crate::lookup::first_some;
use crate::pinyin::{join_syllables, numbered_to_marks};
use crate::tables::{read_level_table, write_csv};

pub const COLUMNS: [&str; 11] = [
  "vocab",
  "tian_level",
  "hsk_level",
  "pinyin",
  "pinyin_spaced",
  "meaning",
  "simple_meaning",
  "meaning_mnemonic",
  "reading_mnemonic",
  "components",
  "example_sentences",
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VocabRow {
  pub vocab: String,
  pub tian_level: u32,
  pub hsk_level: u32,
  pub pinyin: String,
  pub pinyin_spaced: String,
  pub meaning: String,
  pub simple_meaning: String,
  pub meaning_mnemonic: String,
  pub reading_mnemonic: String,
  pub components: String,
  pub example_sentences: String,
}

/// Distinct characters of a word, homograph suffix removed.
pub fn characters(word: &str) -> Vec<String> {
  dedup_in_order(strip_variant_suffix(word).chars().map(String::from))
}

/// Export note for `word`, trying the bare word before the literal entry.
pub fn find_note<'a>(word: &str, export: &'a ExportIndex) -> Option<&'a ExportNote> {
  let bare = strip_variant_suffix(word);
  first_some::<&ExportNote>(&[&|| export.get(bare), &|| export.get(word)])
}

/// Builds one row per listed word, sorted by tian level, HSK level, then
/// word.
pub fn level_vocab(lists: &[LevelList],
                   hanzi_levels: &HashMap<String, u32>,
                   export: &ExportIndex)
                   -> Vec<VocabRow> {
  let mut rv = Vec::new();
  for list in lists {
    for word in &list.entries {
      let chars = characters(word);
      let tian_level = chars
          .iter()
          .filter_map(|c| hanzi_levels.get(c).copied())
          .max()
          .unwrap_or(list.level);
      let (pinyin_spaced, meanings) = match find_note(word, export) {
        Some(note) => (numbered_to_marks(&note.pinyin), note.meanings.clone()),
        None => (String::new(), Vec::new()),
      };
      rv.push(VocabRow {
        vocab: word.clone(),
        tian_level: tian_level,
        hsk_level: list.level,
        pinyin: join_syllables(&pinyin_spaced),
        pinyin_spaced: pinyin_spaced,
        meaning: meanings.join("; "),
        simple_meaning: meanings.first().cloned().unwrap_or_default(),
        meaning_mnemonic: String::new(),
        reading_mnemonic: String::new(),
        components: chars.join(";"),
        example_sentences: String::new(),
      });
    }
  }
  rv.sort_by(|a, b| {
    (a.tian_level, a.hsk_level, &a.vocab).cmp(&(b.tian_level, b.hsk_level, &b.vocab))
  });
  rv
}

/// Reads the hanzi table and the Anki exports; both are optional.
pub fn build_vocabulary_csv(config: &Config) -> Result<usize> {
  let hanzi_levels = read_level_table(&config.hanzi_csv(), "hanzi")?;
  if hanzi_levels.is_empty() {
    warn!("no hanzi levels found; words keep their HSK level");
  }
  let export_paths: Vec<_> = config.levels.iter().map(|&l| config.export_file(l)).collect();
  let export = ExportIndex::load(export_paths.iter().map(|p| p.as_path()))?;
  if export.is_empty() {
    warn!("no Anki export notes found; pinyin and meanings will be empty");
  }
  let lists = read_level_lists(&config.levels, |l| config.words_list(l))?;
  let rows = level_vocab(&lists, &hanzi_levels, &export);
  let path = config.vocab_csv();
  write_csv(&path, &COLUMNS, &rows)?;
  info!("wrote {} words to {}", rows.len(), path.display());
  Ok(rows.len())
}
