//! Word tokenization shared by indexing and querying.
//!
//! Both sides of the search index must normalize identically, otherwise a
//! query could miss a message it should match. Everything that turns text
//! into tokens goes through [`tokenize`].

use serde::{Deserialize, Serialize};

/// How multiple query words combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
  /// A message must contain every word (intersection).
  #[default]
  All,
  /// A message must contain at least one word (union).
  Any,
}

/// Split `text` into distinct, case-folded word tokens.
///
/// Words are maximal runs of alphanumeric characters or `_`; everything else
/// (whitespace, punctuation, symbols) is a delimiter. Tokens keep the order of
/// their first occurrence.
pub fn tokenize(text: &str) -> Vec<String> {
  let mut tokens: Vec<String> = Vec::new();
  for word in text.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
    if word.is_empty() {
      continue;
    }
    let token = word.to_lowercase();
    if !tokens.contains(&token) {
      tokens.push(token);
    }
  }
  tokens
}

/// Tokenize every query word and merge the results, de-duplicated.
///
/// A single query word may yield several tokens (`"don't"` → `don`, `t`) or
/// none at all (`"!!"`).
pub fn tokenize_query<S: AsRef<str>>(words: &[S]) -> Vec<String> {
  let mut tokens: Vec<String> = Vec::new();
  for word in words {
    for token in tokenize(word.as_ref()) {
      if !tokens.contains(&token) {
        tokens.push(token);
      }
    }
  }
  tokens
}
