//! Paths and tunables shared by every generator.
//!
//! Everything has a default that matches the layout of the reference data
//! checkout, so running a generator from the repository root with no config
//! file works. A YAML file passed with `--config` overrides any subset of the
//! fields; relative paths in it are taken relative to the file itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

pub const RADICALS_CSV: &str = "radicals_levels_1_3.csv";
pub const HANZI_CSV: &str = "hanzi_levels_1_3.csv";
pub const VOCAB_CSV: &str = "vocabulary_levels_1_3.csv";

const DATA_DIR: &str = "references/HSK-3.0/New HSK (2025)";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub levels: Vec<u32>,
  pub hanzi_dir: PathBuf,
  pub words_dir: PathBuf,
  pub export_dir: PathBuf,
  pub output_dir: PathBuf,
  pub decomposition_file: PathBuf,
  pub radical_names_file: PathBuf,
  pub cedict_file: PathBuf,
  /// Characters that have to unlock before the raw radical level goes up.
  pub unlock_threshold: u32,
  /// Number of tian levels the raw radical levels are stretched over.
  pub tian_bands: u32,
}

impl Default for Config {
  fn default() -> Config {
    let data = Path::new(DATA_DIR);
    Config {
      levels: vec![1, 2, 3],
      hanzi_dir: data.join("HSK Hanzi"),
      words_dir: data.join("HSK Words"),
      export_dir: data.join("Anki Export"),
      output_dir: PathBuf::from("output"),
      decomposition_file: PathBuf::from("data/cjk-decomp.txt"),
      radical_names_file: PathBuf::from("data/radicals.tsv"),
      cedict_file: PathBuf::from("data/cedict_ts.u8"),
      unlock_threshold: 15,
      tian_bands: 60,
    }
  }
}

impl Config {
  /// Loads `path` if given, otherwise returns the defaults.
  pub fn load(path: Option<&Path>) -> Result<Config> {
    let rv = match path {
      Some(path) => {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Config::from_yaml(&text)?;
        match path.parent() {
          Some(base) if !base.as_os_str().is_empty() => config.rebased(base),
          _ => config,
        }
      },
      None => Config::default(),
    };
    rv.validate()?;
    Ok(rv)
  }

  pub fn from_yaml(text: &str) -> Result<Config> {
    // an empty file deserializes to unit, not to an empty mapping
    if text.trim().is_empty() {
      return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(text)?)
  }

  /// Config rooted at `base`, for scratch directories and tests.
  pub fn rooted_at(base: &Path) -> Config {
    Config::default().rebased(base)
  }

  fn rebased(self, base: &Path) -> Config {
    let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
    Config {
      hanzi_dir: join(self.hanzi_dir),
      words_dir: join(self.words_dir),
      export_dir: join(self.export_dir),
      output_dir: join(self.output_dir),
      decomposition_file: join(self.decomposition_file),
      radical_names_file: join(self.radical_names_file),
      cedict_file: join(self.cedict_file),
      ..self
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.levels.is_empty() {
      return Err(Error::InvalidConfig {
        field: "levels",
        reason: "at least one level is needed".to_string(),
      });
    }
    if let Some(level) = self.levels.iter().find(|&&l| l < 1 || l > 3) {
      return Err(Error::InvalidConfig {
        field: "levels",
        reason: format!("level {} is outside 1-3", level),
      });
    }
    if self.unlock_threshold == 0 {
      return Err(Error::InvalidConfig {
        field: "unlock_threshold",
        reason: "must be at least 1".to_string(),
      });
    }
    if self.tian_bands == 0 {
      return Err(Error::InvalidConfig {
        field: "tian_bands",
        reason: "must be at least 1".to_string(),
      });
    }
    Ok(())
  }

  pub fn hanzi_list(&self, level: u32) -> PathBuf {
    self.hanzi_dir.join(format!("HSK_Level_{}_hanzi.txt", level))
  }

  pub fn words_list(&self, level: u32) -> PathBuf {
    self.words_dir.join(format!("HSK_Level_{}_words.txt", level))
  }

  pub fn export_file(&self, level: u32) -> PathBuf {
    self.export_dir.join(format!("HSK_Level_{}_anki.txt", level))
  }

  pub fn radicals_csv(&self) -> PathBuf {
    self.output_dir.join(RADICALS_CSV)
  }

  pub fn hanzi_csv(&self) -> PathBuf {
    self.output_dir.join(HANZI_CSV)
  }

  pub fn vocab_csv(&self) -> PathBuf {
    self.output_dir.join(VOCAB_CSV)
  }
}
