//! Identity registry: canonical user and group-chat records.
//!
//! Records are kept in registration order alongside a position index, so
//! enumeration is stable and lookup is O(1). Nothing is ever removed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parley_core::{
  Error, Result,
  id::{ChatId, UserId},
  identity::User,
};

/// A chat as the registry knows it. Members live in the membership index.
#[derive(Debug, Clone)]
pub(crate) struct ChatRecord {
  pub chat_id:    ChatId,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub(crate) struct Registry {
  users:      Vec<User>,
  user_slots: HashMap<UserId, usize>,
  chats:      Vec<ChatRecord>,
  chat_slots: HashMap<ChatId, usize>,
}

impl Registry {
  // ── Users ─────────────────────────────────────────────────────────────

  pub fn insert_user(&mut self, name: String) -> User {
    let user = User { user_id: UserId::new(), name, created_at: Utc::now() };
    self.user_slots.insert(user.user_id, self.users.len());
    self.users.push(user.clone());
    user
  }

  pub fn user(&self, user_id: UserId) -> Option<&User> {
    self.user_slots.get(&user_id).map(|&slot| &self.users[slot])
  }

  pub fn user_mut(&mut self, user_id: UserId) -> Option<&mut User> {
    let slot = *self.user_slots.get(&user_id)?;
    Some(&mut self.users[slot])
  }

  pub fn has_user(&self, user_id: UserId) -> bool {
    self.user_slots.contains_key(&user_id)
  }

  /// Fail with [`Error::UnknownUser`] unless `user_id` is registered.
  pub fn require_user(&self, user_id: UserId) -> Result<()> {
    if self.has_user(user_id) { Ok(()) } else { Err(Error::UnknownUser(user_id)) }
  }

  pub fn users(&self) -> &[User] { &self.users }

  // ── Chats ─────────────────────────────────────────────────────────────

  pub fn insert_chat(&mut self, name: String) -> ChatRecord {
    let chat = ChatRecord { chat_id: ChatId::new(), name, created_at: Utc::now() };
    self.chat_slots.insert(chat.chat_id, self.chats.len());
    self.chats.push(chat.clone());
    chat
  }

  pub fn chat(&self, chat_id: ChatId) -> Option<&ChatRecord> {
    self.chat_slots.get(&chat_id).map(|&slot| &self.chats[slot])
  }

  pub fn chat_mut(&mut self, chat_id: ChatId) -> Option<&mut ChatRecord> {
    let slot = *self.chat_slots.get(&chat_id)?;
    Some(&mut self.chats[slot])
  }

  /// Fail with [`Error::UnknownChat`] unless `chat_id` is registered.
  pub fn require_chat(&self, chat_id: ChatId) -> Result<()> {
    if self.chat_slots.contains_key(&chat_id) {
      Ok(())
    } else {
      Err(Error::UnknownChat(chat_id))
    }
  }

  pub fn chats(&self) -> &[ChatRecord] { &self.chats }
}
