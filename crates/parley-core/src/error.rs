//! Error types for `parley-core`.

use thiserror::Error;

use crate::id::{ChatId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("unknown user: {0}")]
  UnknownUser(UserId),

  #[error("unknown group chat: {0}")]
  UnknownChat(ChatId),

  #[error("invalid search query: {0}")]
  InvalidQuery(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
