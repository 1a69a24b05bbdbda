//! Per-level Anki note exports used for vocabulary pinyin and meanings.
//!
//! Each export is tab separated: simplified, traditional, pinyin, then any
//! number of fields, with an HTML detail blob last. The blob lists meanings
//! as `<li>` items.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::Result;
use crate::tables::error_line;

const MIN_FIELDS: usize = 4;

static LI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li\s*>").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub struct ExportNote {
  pub pinyin: String,
  pub meanings: Vec<String>,
}

fn unescape(s: &str) -> String {
  s.replace("&nbsp;", " ")
      .replace("&lt;", "<")
      .replace("&gt;", ">")
      .replace("&quot;", "\"")
      .replace("&#39;", "'")
      .replace("&amp;", "&")
}

/// Undoes the quoting Anki applies to fields holding tabs or quotes.
fn unquote(field: &str) -> String {
  let field = field.trim();
  if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
    field[1..field.len() - 1].replace("\"\"", "\"")
  } else {
    field.to_string()
  }
}

/// Plain text of every `<li>` item in `html`, in order, empties dropped.
pub fn list_items(html: &str) -> Vec<String> {
  LI_RE
      .captures_iter(html)
      .map(|cap| {
        let text = unescape(&TAG_RE.replace_all(&cap[1], " "));
        SPACE_RE.replace_all(text.trim(), " ").into_owned()
      })
      .filter(|item| !item.is_empty())
      .collect()
}

#[derive(Default)]
pub struct ExportIndex {
  notes: HashMap<String, ExportNote>,
}

impl ExportIndex {
  /// Adds the notes of one export. The first note seen for a word wins.
  ///
  /// Every physical line is one note; quotes are stripped per field, so a
  /// stray quote can't pull the following lines into its field.
  pub fn add_export<R: io::Read>(&mut self, source: R, name: &str) {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .from_reader(source);
    for record in rdr.records() {
      let record = match record {
        Ok(record) => record,
        Err(e) => {
          warn!("{}: skipping unreadable line {}: {}", name, error_line(&e), e);
          continue;
        },
      };
      let line = record.position().map_or(0, |p| p.line());
      if record.len() < MIN_FIELDS {
        warn!("{}: skipping line {} with {} fields", name, line, record.len());
        continue;
      }
      let simp = unquote(&record[0]);
      if simp.is_empty() {
        continue;
      }
      let note = ExportNote {
        pinyin: unquote(&record[2]),
        meanings: list_items(&unquote(&record[record.len() - 1])),
      };
      self.notes.entry(simp).or_insert(note);
    }
  }

  /// Loads the exports at `paths`, skipping ones that don't exist.
  pub fn load<'a, I>(paths: I) -> Result<ExportIndex>
      where I: IntoIterator<Item = &'a Path> {
    let mut rv = ExportIndex::default();
    for path in paths {
      match std::fs::File::open(path) {
        Ok(file) => rv.add_export(file, &path.display().to_string()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
          debug!("skipping missing export {}", path.display());
        },
        Err(e) => return Err(crate::error::Error::io(path, e)),
      }
    }
    Ok(rv)
  }

  pub fn get(&self, word: &str) -> Option<&ExportNote> {
    self.notes.get(word)
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn list_items_strip_markup() {
    let html = "<div><ol><li><b>good</b>;&nbsp;well</li>\n<li class=\"x\"> to be <i>fond</i> of </li><li> </li></ol></div>";
    assert_eq!(list_items(html), vec!["good ; well", "to be fond of"]);
  }

  #[test]
  fn no_list_items() {
    assert!(list_items("<div>plain</div>").is_empty());
  }

  #[test]
  fn rows_are_indexed_by_simplified() {
    let export = "\
#separator:tab
#html:true
你好\t你好\tni3 hao3\t<ol><li>hello</li><li>hi</li></ol>
爱\t愛\tai4\textra\t<ol><li>to love</li></ol>
短\t短
";
    let mut index = ExportIndex::default();
    index.add_export(export.as_bytes(), "test");
    assert_eq!(index.len(), 2);
    assert_eq!(
        index.get("你好"),
        Some(&ExportNote {
          pinyin: "ni3 hao3".to_string(),
          meanings: vec!["hello".to_string(), "hi".to_string()],
        }));
    assert_eq!(index.get("爱").unwrap().meanings, vec!["to love"]);
    assert_eq!(index.get("短"), None);
  }

  #[test]
  fn first_export_wins() {
    let mut index = ExportIndex::default();
    index.add_export("会\t會\thui4\t<li>can</li>\n".as_bytes(), "one");
    index.add_export("会\t會\tkuai4\t<li>accounting</li>\n".as_bytes(), "two");
    assert_eq!(index.get("会").unwrap().pinyin, "hui4");
  }

  #[test]
  fn stray_quote_only_costs_its_own_line() {
    let export = "\
坏\t壞\thuai4\t\"<li>bad</li>
你好\t你好\tni3 hao3\t<ol><li>hello</li></ol>
爱\t愛\tai4\t<ol><li>to love</li></ol>
";
    let mut index = ExportIndex::default();
    index.add_export(export.as_bytes(), "test");
    assert_eq!(index.len(), 3);
    assert_eq!(index.get("坏").unwrap().meanings, vec!["bad"]);
    assert_eq!(index.get("你好").unwrap().meanings, vec!["hello"]);
    assert_eq!(index.get("爱").unwrap().meanings, vec!["to love"]);
  }

  #[test]
  fn quoted_fields_are_unquoted() {
    let mut index = ExportIndex::default();
    index.add_export(
        "\"说\"\t說\t\"shuo1\"\t\"<li>to say \"\"hi\"\"</li>\"\n".as_bytes(),
        "test");
    let note = index.get("说").unwrap();
    assert_eq!(note.pinyin, "shuo1");
    assert_eq!(note.meanings, vec!["to say \"hi\""]);
  }

  #[test]
  fn missing_exports_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("HSK_Level_1_anki.txt");
    assert!(ExportIndex::load([missing.as_path()]).unwrap().is_empty());
  }
}
