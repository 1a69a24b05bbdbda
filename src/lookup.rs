//! The two lookup-by-character capabilities the generators depend on.
//!
//! Production code backs them with [`crate::decomp::CjkDecomp`] and
//! [`crate::cedict::Dict`]; tests substitute small in-memory tables.

use crate::cedict::Entry;

pub trait Decomposer {
  /// Radical-level components of `hanzi`, placeholders already removed.
  fn components(&self, hanzi: &str) -> Vec<String>;

  /// English name of a radical, if known.
  fn radical_name(&self, radical: &str) -> Option<String>;
}

pub trait Dictionary {
  /// All dictionary entries whose simplified form is `hanzi`, in file order.
  fn entries(&self, hanzi: &str) -> Vec<Entry>;

  /// A single reading to use when no usable entry is left.
  fn fallback_pinyin(&self, hanzi: &str) -> Option<String>;
}

/// Tries each source in order and returns the first hit.
pub fn first_some<T>(sources: &[&dyn Fn() -> Option<T>]) -> Option<T> {
  sources.iter().find_map(|source| source())
}

/// `Some(items)` unless `items` is empty, for chaining with [`first_some`].
pub fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
  if items.is_empty() {
    None
  } else {
    Some(items)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  #[test]
  fn first_hit_wins_and_later_sources_are_not_called() {
    let called = Cell::new(false);
    let rv = first_some::<u32>(&[
        &|| None,
        &|| Some(2),
        &|| {
          called.set(true);
          Some(3)
        },
    ]);
    assert_eq!(rv, Some(2));
    assert!(!called.get());
  }

  #[test]
  fn all_empty() {
    assert_eq!(first_some::<u32>(&[&|| None, &|| None]), None);
    assert_eq!(non_empty(Vec::<u32>::new()), None);
  }
}
