//! Inverted word index over message text.

use std::collections::{BTreeSet, HashMap};

use parley_core::{content::Content, id::Seq, search::tokenize};

/// Maps each token to the posting set of messages containing it.
#[derive(Debug, Default)]
pub(crate) struct SearchIndex {
  postings: HashMap<String, BTreeSet<Seq>>,
}

impl SearchIndex {
  /// Add `seq` to the posting set of every token in `content`.
  ///
  /// Content without text contributes nothing. Returns the number of distinct
  /// tokens indexed.
  pub fn index_message(&mut self, seq: Seq, content: &Content) -> usize {
    let Some(text) = content.as_text() else {
      return 0;
    };
    let tokens = tokenize(text);
    for token in &tokens {
      self.postings.entry(token.clone()).or_default().insert(seq);
    }
    tokens.len()
  }

  /// Intersection of the posting sets of all `tokens`.
  ///
  /// `tokens` must already be normalized. An empty slice matches nothing.
  pub fn search_all(&self, tokens: &[String]) -> BTreeSet<Seq> {
    let mut sets = Vec::with_capacity(tokens.len());
    for token in tokens {
      match self.postings.get(token) {
        Some(set) => sets.push(set),
        None => return BTreeSet::new(),
      }
    }
    // Walk the smallest set and probe the others.
    sets.sort_by_key(|s| s.len());
    let Some((smallest, rest)) = sets.split_first() else {
      return BTreeSet::new();
    };
    smallest
      .iter()
      .filter(|seq| rest.iter().all(|s| s.contains(*seq)))
      .copied()
      .collect()
  }

  /// Union of the posting sets of all `tokens`.
  pub fn search_any(&self, tokens: &[String]) -> BTreeSet<Seq> {
    tokens
      .iter()
      .filter_map(|t| self.postings.get(t))
      .flatten()
      .copied()
      .collect()
  }

  /// Number of distinct tokens in the index.
  pub fn token_count(&self) -> usize { self.postings.len() }
}
