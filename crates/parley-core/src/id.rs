//! Opaque identifiers.
//!
//! Users and group chats are keyed by random UUIDs wrapped in distinct
//! newtypes so the two can never be confused. Messages are keyed by their
//! global [`Seq`], which doubles as the ordering key.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Users and chats ─────────────────────────────────────────────────────────

/// Stable identifier of a registered user.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
  /// Allocate a fresh random identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for UserId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for UserId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Stable identifier of a group chat.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ChatId(Uuid);

impl ChatId {
  /// Allocate a fresh random identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for ChatId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ChatId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ChatId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

// ─── Messages ────────────────────────────────────────────────────────────────

/// Global message sequence number.
///
/// Private and group messages share one counter, so two messages are always
/// comparable regardless of where they were sent. The first issued value is
/// [`Seq::FIRST`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Seq(u64);

impl Seq {
  pub const FIRST: Seq = Seq(1);

  pub const fn new(value: u64) -> Self { Self(value) }

  pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for Seq {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}
