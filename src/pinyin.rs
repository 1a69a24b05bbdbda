const MARKS: [(char, [char; 4]); 6] = [
  ('a', ['ā', 'á', 'ǎ', 'à']),
  ('e', ['ē', 'é', 'ě', 'è']),
  ('i', ['ī', 'í', 'ǐ', 'ì']),
  ('o', ['ō', 'ó', 'ǒ', 'ò']),
  ('u', ['ū', 'ú', 'ǔ', 'ù']),
  // written u: in CC-CEDICT
  ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

fn toned_char(c: char, tone: usize) -> char {
  MARKS
      .iter()
      .find(|(bare, _)| *bare == c)
      .map_or(c, |(_, marks)| marks[tone - 1])
}

fn is_vowel(c: char) -> bool {
  "aeiouü".contains(c)
}

fn find_pair(lower: &[char], first: char, second: char) -> Option<usize> {
  lower.windows(2).position(|w| w[0] == first && w[1] == second)
}

/// Index (in chars) of the vowel that carries the tone mark.
fn mark_index(lower: &[char]) -> Option<usize> {
  if let Some(i) = lower.iter().position(|&c| c == 'a' || c == 'e') {
    return Some(i);
  }
  if let Some(i) = find_pair(lower, 'o', 'u') {
    return Some(i);
  }
  if let Some(i) = find_pair(lower, 'i', 'u') {
    return Some(i + 1);
  }
  if let Some(i) = find_pair(lower, 'u', 'i') {
    return Some(i + 1);
  }
  lower.iter().rposition(|&c| is_vowel(c))
}

fn convert_syllable(syl: &str) -> String {
  if syl.is_empty() {
    return String::new();
  }
  let syl = syl.replace("u:", "ü").replace("U:", "Ü");

  let mut chars: Vec<char> = syl.chars().collect();
  let tone = match chars.last().and_then(|c| c.to_digit(10)) {
    Some(d @ 0..=5) => {
      chars.pop();
      d as usize
    },
    // 6-9 aren't tones; leave the text alone
    Some(_) => return syl,
    None => 5,
  };
  if tone == 0 || tone == 5 {
    return chars.into_iter().collect();
  }

  let lower: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase()).collect();
  if lower.len() != chars.len() {
    // lowercasing changed the length, so indexes wouldn't line up
    return chars.into_iter().collect();
  }
  let i = match mark_index(&lower) {
    Some(i) => i,
    None => return chars.into_iter().collect(),
  };

  let marked = toned_char(lower[i], tone);
  chars[i] = if chars[i].is_uppercase() {
    marked.to_uppercase().next().unwrap_or(marked)
  } else {
    marked
  };
  chars.into_iter().collect()
}

/// Converts numbered pinyin (`xue3`, `lu:4 se4`) to tone marks (`xuě`,
/// `lǜ sè`). Syllables are rejoined with single spaces. Text without a tone
/// digit, including already-marked pinyin, comes back as it went in.
pub fn numbered_to_marks(pinyin: &str) -> String {
  pinyin
      .split_whitespace()
      .map(convert_syllable)
      .collect::<Vec<_>>()
      .join(" ")
}

/// `nǐ hǎo` -> `nǐhǎo`
pub fn join_syllables(pinyin: &str) -> String {
  pinyin.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tone_goes_on_a_or_e() {
    assert_eq!(numbered_to_marks("xue3"), "xuě");
    assert_eq!(numbered_to_marks("hao3"), "hǎo");
    assert_eq!(numbered_to_marks("mei2"), "méi");
  }

  #[test]
  fn ou_iu_ui() {
    assert_eq!(numbered_to_marks("gou3"), "gǒu");
    assert_eq!(numbered_to_marks("liu4"), "liù");
    assert_eq!(numbered_to_marks("gui4"), "guì");
  }

  #[test]
  fn last_vowel_otherwise() {
    assert_eq!(numbered_to_marks("ni3"), "nǐ");
    assert_eq!(numbered_to_marks("zhong1"), "zhōng");
    assert_eq!(numbered_to_marks("shuo1"), "shuō");
  }

  #[test]
  fn neutral_tone_just_drops_digit() {
    assert_eq!(numbered_to_marks("ma5"), "ma");
    assert_eq!(numbered_to_marks("ma0"), "ma");
    assert_eq!(numbered_to_marks("ma"), "ma");
  }

  #[test]
  fn umlaut() {
    assert_eq!(numbered_to_marks("lu:4"), "lǜ");
    assert_eq!(numbered_to_marks("nu:3"), "nǚ");
    assert_eq!(numbered_to_marks("LU:4"), "LǛ");
  }

  #[test]
  fn case_of_marked_vowel_is_kept() {
    assert_eq!(numbered_to_marks("Ai4"), "Ài");
    assert_eq!(numbered_to_marks("Li3"), "Lǐ");
    assert_eq!(numbered_to_marks("OU1"), "ŌU");
  }

  #[test]
  fn syllables_are_rejoined_with_single_spaces() {
    assert_eq!(numbered_to_marks("he1  dian3\tlu:4 cha2 ba5"), "hē diǎn lǜ chá ba");
  }

  #[test]
  fn odd_input_passes_through() {
    assert_eq!(numbered_to_marks(""), "");
    assert_eq!(numbered_to_marks("m2"), "m");
    assert_eq!(numbered_to_marks("r5"), "r");
    assert_eq!(numbered_to_marks("xuě"), "xuě");
    assert_eq!(numbered_to_marks("nǐ hǎo"), "nǐ hǎo");
    assert_eq!(numbered_to_marks("ma7"), "ma7");
  }

  #[test]
  fn joined() {
    assert_eq!(join_syllables(&numbered_to_marks("ni3 hao3")), "nǐhǎo");
  }
}
