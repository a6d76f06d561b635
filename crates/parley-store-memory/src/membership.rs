//! Membership index: chat → member set.

use std::collections::{BTreeSet, HashMap};

use parley_core::id::{ChatId, UserId};

#[derive(Debug, Default)]
pub(crate) struct Membership {
  members: HashMap<ChatId, BTreeSet<UserId>>,
}

impl Membership {
  pub fn insert_chat(&mut self, chat_id: ChatId, members: BTreeSet<UserId>) {
    self.members.insert(chat_id, members);
  }

  /// Returns `true` if the user was not already a member.
  pub fn add(&mut self, chat_id: ChatId, user_id: UserId) -> bool {
    self.members.entry(chat_id).or_default().insert(user_id)
  }

  /// Returns `true` if the user was a member.
  pub fn remove(&mut self, chat_id: ChatId, user_id: UserId) -> bool {
    self
      .members
      .get_mut(&chat_id)
      .is_some_and(|set| set.remove(&user_id))
  }

  /// Snapshot of the member set; empty for a chat with no entry.
  pub fn members(&self, chat_id: ChatId) -> BTreeSet<UserId> {
    self.members.get(&chat_id).cloned().unwrap_or_default()
  }
}
