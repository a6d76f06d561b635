//! Users and group chats: the records owned by the identity registry.
//!
//! Other components refer to these records by [`UserId`] and [`ChatId`] only.
//! Values returned to callers are snapshots; renaming a user later does not
//! change a `User` already handed out.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{ChatId, UserId};

/// A registered messenger user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:    UserId,
  /// Display name; may be changed after registration.
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

/// A group chat together with a snapshot of its member set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupChat {
  pub chat_id:    ChatId,
  pub name:       String,
  /// Members at the moment the snapshot was taken. Only registered users,
  /// never duplicated.
  pub members:    BTreeSet<UserId>,
  pub created_at: DateTime<Utc>,
}

impl GroupChat {
  pub fn is_member(&self, user_id: UserId) -> bool {
    self.members.contains(&user_id)
  }
}
