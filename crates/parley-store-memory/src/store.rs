//! [`MemoryStore`], the in-memory implementation of [`MessengerStore`].

use std::{
  collections::BTreeSet,
  sync::atomic::{AtomicU64, Ordering},
};

use chrono::Utc;
use parking_lot::RwLock;
use parley_core::{
  Error, Result,
  content::Content,
  id::{ChatId, Seq, UserId},
  identity::{GroupChat, User},
  message::{GroupMessage, Message, PrivateMessage},
  store::MessengerStore,
};

use crate::{
  journal::Journal,
  membership::Membership,
  registry::{ChatRecord, Registry},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Parley message store held entirely in process memory.
///
/// Three independently locked parts make up the store: the identity
/// registry, the membership index and the journal (message log + search
/// index). Locks are always taken in that order and never held across an
/// `.await`. Membership changes therefore never wait on message appends.
///
/// Share it between tasks with `Arc<MemoryStore>`.
#[derive(Debug)]
pub struct MemoryStore {
  registry:   RwLock<Registry>,
  membership: RwLock<Membership>,
  journal:    RwLock<Journal>,
  /// Next sequence number to issue. Only advanced under the journal write
  /// lock, so log order and sequence order agree.
  next_seq:   AtomicU64,
}

/// Point-in-time counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
  pub users:    usize,
  pub chats:    usize,
  pub messages: usize,
  /// Distinct tokens in the search index.
  pub tokens:   usize,
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      registry:   RwLock::new(Registry::default()),
      membership: RwLock::new(Membership::default()),
      journal:    RwLock::new(Journal::default()),
      next_seq:   AtomicU64::new(Seq::FIRST.get()),
    }
  }

  /// The sequence number of the most recently appended message, if any.
  ///
  /// Sequence numbers are only allocated under the journal write lock, so
  /// holding the read lock keeps this in step with the log.
  pub fn last_seq(&self) -> Option<Seq> {
    let _journal = self.journal.read();
    match self.next_seq.load(Ordering::Acquire) {
      n if n > Seq::FIRST.get() => Some(Seq::new(n - 1)),
      _ => None,
    }
  }

  pub fn stats(&self) -> StoreStats {
    let (users, chats) = {
      let registry = self.registry.read();
      (registry.users().len(), registry.chats().len())
    };
    let journal = self.journal.read();
    StoreStats {
      users,
      chats,
      messages: journal.len(),
      tokens: journal.index().token_count(),
    }
  }

  fn allocate_seq(&self) -> Seq {
    Seq::new(self.next_seq.fetch_add(1, Ordering::AcqRel))
  }

  fn chat_view(&self, record: &ChatRecord) -> GroupChat {
    GroupChat {
      chat_id:    record.chat_id,
      name:       record.name.clone(),
      members:    self.membership.read().members(record.chat_id),
      created_at: record.created_at,
    }
  }

  /// Validate that a chat and a user both exist, chat first.
  ///
  /// Nothing is ever deregistered, so the answer stays true after the
  /// registry guard is released.
  fn require_chat_and_user(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
    let registry = self.registry.read();
    registry.require_chat(chat_id)?;
    registry.require_user(user_id)
  }
}

// ─── MessengerStore impl ─────────────────────────────────────────────────────

impl MessengerStore for MemoryStore {
  type Error = Error;

  // ── Identity registry ─────────────────────────────────────────────────────

  async fn create_user(&self, name: String) -> Result<User> {
    let user = self.registry.write().insert_user(name);
    tracing::debug!(user_id = %user.user_id, name = %user.name, "registered user");
    Ok(user)
  }

  async fn rename_user(&self, user_id: UserId, name: String) -> Result<User> {
    let mut registry = self.registry.write();
    let user = registry.user_mut(user_id).ok_or(Error::UnknownUser(user_id))?;
    user.name = name;
    tracing::debug!(%user_id, name = %user.name, "renamed user");
    Ok(user.clone())
  }

  async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
    Ok(self.registry.read().user(user_id).cloned())
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    Ok(self.registry.read().users().to_vec())
  }

  async fn create_group_chat(
    &self,
    name:    String,
    members: BTreeSet<UserId>,
  ) -> Result<GroupChat> {
    let mut registry = self.registry.write();
    if let Some(&unknown) = members.iter().find(|&&id| !registry.has_user(id)) {
      return Err(Error::UnknownUser(unknown));
    }

    let record = registry.insert_chat(name);
    // Still under the registry write lock: no reader can see the chat
    // before its member set exists.
    self.membership.write().insert_chat(record.chat_id, members.clone());

    tracing::debug!(
      chat_id = %record.chat_id,
      name = %record.name,
      members = members.len(),
      "created group chat"
    );
    Ok(GroupChat {
      chat_id: record.chat_id,
      name: record.name,
      members,
      created_at: record.created_at,
    })
  }

  async fn rename_group_chat(&self, chat_id: ChatId, name: String) -> Result<GroupChat> {
    let mut registry = self.registry.write();
    let record = registry.chat_mut(chat_id).ok_or(Error::UnknownChat(chat_id))?;
    record.name = name;
    tracing::debug!(%chat_id, name = %record.name, "renamed group chat");
    let record = record.clone();
    Ok(self.chat_view(&record))
  }

  async fn get_group_chat(&self, chat_id: ChatId) -> Result<Option<GroupChat>> {
    let registry = self.registry.read();
    Ok(registry.chat(chat_id).map(|record| self.chat_view(record)))
  }

  async fn list_group_chats(&self) -> Result<Vec<GroupChat>> {
    let registry = self.registry.read();
    Ok(registry.chats().iter().map(|record| self.chat_view(record)).collect())
  }

  // ── Membership ────────────────────────────────────────────────────────────

  async fn add_member(&self, chat_id: ChatId, user_id: UserId) -> Result<bool> {
    self.require_chat_and_user(chat_id, user_id)?;
    let added = self.membership.write().add(chat_id, user_id);
    tracing::debug!(%chat_id, %user_id, added, "add member");
    Ok(added)
  }

  async fn remove_member(&self, chat_id: ChatId, user_id: UserId) -> Result<bool> {
    self.require_chat_and_user(chat_id, user_id)?;
    let removed = self.membership.write().remove(chat_id, user_id);
    tracing::debug!(%chat_id, %user_id, removed, "remove member");
    Ok(removed)
  }

  async fn list_members(&self, chat_id: ChatId) -> Result<BTreeSet<UserId>> {
    self.registry.read().require_chat(chat_id)?;
    Ok(self.membership.read().members(chat_id))
  }

  // ── Messages — append-only writes ─────────────────────────────────────────

  async fn append_private_message(
    &self,
    sender:   UserId,
    receiver: UserId,
    content:  Content,
  ) -> Result<PrivateMessage> {
    {
      let registry = self.registry.read();
      registry.require_user(sender)?;
      registry.require_user(receiver)?;
    }

    let mut journal = self.journal.write();
    let message = PrivateMessage {
      seq: self.allocate_seq(),
      sender,
      receiver,
      content,
      sent_at: Utc::now(),
    };
    let tokens = journal.append_private(message.clone());
    drop(journal);

    tracing::debug!(
      seq = message.seq.get(),
      %sender,
      %receiver,
      kind = message.content.kind(),
      tokens,
      "appended private message"
    );
    Ok(message)
  }

  async fn append_group_message(
    &self,
    sender:  UserId,
    chat_id: ChatId,
    content: Content,
  ) -> Result<GroupMessage> {
    self.require_chat_and_user(chat_id, sender)?;

    let mut journal = self.journal.write();
    let message = GroupMessage {
      seq: self.allocate_seq(),
      sender,
      chat_id,
      content,
      sent_at: Utc::now(),
    };
    let tokens = journal.append_group(message.clone());
    drop(journal);

    tracing::debug!(
      seq = message.seq.get(),
      %sender,
      %chat_id,
      kind = message.content.kind(),
      tokens,
      "appended group message"
    );
    Ok(message)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_private_messages_for_user(
    &self,
    user_id: UserId,
  ) -> Result<Vec<PrivateMessage>> {
    self.registry.read().require_user(user_id)?;
    Ok(self.journal.read().private_for_user(user_id))
  }

  async fn list_private_messages_between(
    &self,
    a: UserId,
    b: UserId,
  ) -> Result<Vec<PrivateMessage>> {
    {
      let registry = self.registry.read();
      registry.require_user(a)?;
      registry.require_user(b)?;
    }
    Ok(self.journal.read().private_between(a, b))
  }

  async fn list_group_messages(&self, chat_id: ChatId) -> Result<Vec<GroupMessage>> {
    self.registry.read().require_chat(chat_id)?;
    Ok(self.journal.read().group(chat_id))
  }

  async fn get_messages(&self, seqs: &BTreeSet<Seq>) -> Result<Vec<Message>> {
    Ok(self.journal.read().messages(seqs))
  }

  // ── Search ────────────────────────────────────────────────────────────────

  async fn search_words(&self, words: &[String]) -> Result<BTreeSet<Seq>> {
    let tokens = parley_core::search::tokenize_query(words);
    let hits = self.journal.read().index().search_all(&tokens);
    tracing::trace!(?tokens, hits = hits.len(), "search all");
    Ok(hits)
  }

  async fn search_any(&self, words: &[String]) -> Result<BTreeSet<Seq>> {
    let tokens = parley_core::search::tokenize_query(words);
    let hits = self.journal.read().index().search_any(&tokens);
    tracing::trace!(?tokens, hits = hits.len(), "search any");
    Ok(hits)
  }
}
