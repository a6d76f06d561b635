//! Runtime configuration for the [`Messenger`](crate::messenger::Messenger)
//! facade, deserialised from the `[search]` table of `parley.toml` or from
//! `PARLEY_*` environment variables.

use serde::Deserialize;

use crate::search::SearchMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessengerConfig {
  #[serde(default)]
  pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
  /// Combination used by `Messenger::search_messages`.
  #[serde(default)]
  pub mode:        SearchMode,
  /// Upper bound on returned messages; `None` returns everything.
  #[serde(default)]
  pub max_results: Option<usize>,
}
