use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Writes `rows` under a fixed header row. The header is written even when
/// there are no rows, and every row has to serialize to the same columns.
pub fn write_csv<R: Serialize>(path: &Path, headers: &[&str], rows: &[R]) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
  }
  let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
  wtr.write_record(headers)?;
  for row in rows {
    wtr.serialize(row)?;
  }
  wtr.flush().map_err(|e| Error::io(path, e))?;
  Ok(())
}

/// File line a CSV error points at, 0 when it carries no position.
pub fn error_line(e: &csv::Error) -> u64 {
  e.position().map_or(0, |p| p.line())
}

/// Reads `key_column -> tian_level` from a table written earlier.
///
/// A missing file gives an empty map. Rows whose level doesn't parse are
/// skipped; the first row for a key wins.
pub fn read_level_table(path: &Path, key_column: &str) -> Result<HashMap<String, u32>> {
  let mut rdr = match csv::Reader::from_path(path) {
    Ok(rdr) => rdr,
    Err(e) => {
      if let csv::ErrorKind::Io(io_err) = e.kind() {
        if io_err.kind() == io::ErrorKind::NotFound {
          debug!("no level table at {}", path.display());
          return Ok(HashMap::new());
        }
      }
      return Err(e.into());
    },
  };

  let headers = rdr.headers()?.clone();
  let key_idx = headers.iter().position(|h| h == key_column);
  let level_idx = headers.iter().position(|h| h == "tian_level");
  let (key_idx, level_idx) = match (key_idx, level_idx) {
    (Some(k), Some(l)) => (k, l),
    _ => {
      warn!("{} has no {} / tian_level columns; ignoring it", path.display(), key_column);
      return Ok(HashMap::new());
    },
  };

  let mut rv = HashMap::new();
  for record in rdr.records() {
    let record = match record {
      Ok(record) => record,
      Err(e) => {
        warn!("{}: skipping unreadable line {}: {}", path.display(), error_line(&e), e);
        continue;
      },
    };
    let line = record.position().map_or(0, |p| p.line());
    let key = record.get(key_idx).unwrap_or("").trim();
    let level = record.get(level_idx).unwrap_or("").trim();
    match level.parse::<u32>() {
      Ok(level) if !key.is_empty() => {
        rv.entry(key.to_string()).or_insert(level);
      },
      _ => warn!("{}: skipping line {} with level {:?}", path.display(), line, level),
    }
  }
  Ok(rv)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[derive(Serialize)]
  struct Row {
    name: &'static str,
    tian_level: u32,
  }

  #[test]
  fn header_is_written_without_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/empty.csv");
    write_csv::<Row>(&path, &["name", "tian_level"], &[]).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "name,tian_level\n");
  }

  #[test]
  fn written_table_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.csv");
    let rows = [Row { name: "女", tian_level: 1 }, Row { name: "马", tian_level: 4 }];
    write_csv(&path, &["name", "tian_level"], &rows).unwrap();
    let table = read_level_table(&path, "name").unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table["马"], 4);
  }

  #[test]
  fn bad_levels_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.csv");
    fs::write(&path, "hanzi,tian_level\n你,2\n好,abc\n我,\n你,9\n").unwrap();
    let table = read_level_table(&path, "hanzi").unwrap();
    assert_eq!(table, HashMap::from([("你".to_string(), 2)]));
  }

  #[test]
  fn error_lines_are_file_lines() {
    let mut rdr = csv::Reader::from_reader("hanzi,tian_level\n你,2\n好,3,extra\n".as_bytes());
    let records: Vec<_> = rdr.records().collect();
    assert_eq!(records[0].as_ref().unwrap().position().unwrap().line(), 2);
    assert_eq!(error_line(records[1].as_ref().unwrap_err()), 3);
  }

  #[test]
  fn missing_table_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_level_table(&dir.path().join("nope.csv"), "hanzi").unwrap().is_empty());
  }
}
