//! The journal: append-only message log plus its search index.
//!
//! Both live behind one lock in [`MemoryStore`](crate::MemoryStore) so that a
//! message and its postings become visible together.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use parley_core::{
  id::{ChatId, Seq, UserId},
  message::{GroupMessage, Message, PrivateMessage},
};

use crate::index::SearchIndex;

#[derive(Debug, Default)]
pub(crate) struct Journal {
  log:     BTreeMap<Seq, Message>,
  /// Private messages per participant, ascending.
  by_user: HashMap<UserId, Vec<Seq>>,
  /// Group messages per chat, ascending.
  by_chat: HashMap<ChatId, Vec<Seq>>,
  index:   SearchIndex,
}

impl Journal {
  // ── Writes ────────────────────────────────────────────────────────────

  /// Append and index a private message.
  ///
  /// `message.seq` must exceed every sequence number already in the log.
  pub fn append_private(&mut self, message: PrivateMessage) -> usize {
    let seq = message.seq;
    self.by_user.entry(message.sender).or_default().push(seq);
    if message.receiver != message.sender {
      self.by_user.entry(message.receiver).or_default().push(seq);
    }
    self.append(Message::Private(message))
  }

  /// Append and index a group message.
  pub fn append_group(&mut self, message: GroupMessage) -> usize {
    self.by_chat.entry(message.chat_id).or_default().push(message.seq);
    self.append(Message::Group(message))
  }

  fn append(&mut self, message: Message) -> usize {
    let seq = message.seq();
    debug_assert!(
      self.log.last_key_value().is_none_or(|(last, _)| *last < seq),
      "sequence numbers must be appended in order"
    );
    let tokens = self.index.index_message(seq, message.content());
    self.log.insert(seq, message);
    tokens
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn private_for_user(&self, user_id: UserId) -> Vec<PrivateMessage> {
    self.private_where(user_id, |_| true)
  }

  pub fn private_between(&self, a: UserId, b: UserId) -> Vec<PrivateMessage> {
    self.private_where(a, |m| m.is_between(a, b))
  }

  fn private_where(
    &self,
    user_id: UserId,
    keep: impl Fn(&PrivateMessage) -> bool,
  ) -> Vec<PrivateMessage> {
    let Some(seqs) = self.by_user.get(&user_id) else {
      return Vec::new();
    };
    seqs
      .iter()
      .filter_map(|seq| match self.log.get(seq) {
        Some(Message::Private(m)) if keep(m) => Some(m.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn group(&self, chat_id: ChatId) -> Vec<GroupMessage> {
    let Some(seqs) = self.by_chat.get(&chat_id) else {
      return Vec::new();
    };
    seqs
      .iter()
      .filter_map(|seq| match self.log.get(seq) {
        Some(Message::Group(m)) => Some(m.clone()),
        _ => None,
      })
      .collect()
  }

  pub fn messages(&self, seqs: &BTreeSet<Seq>) -> Vec<Message> {
    seqs.iter().filter_map(|seq| self.log.get(seq).cloned()).collect()
  }

  pub fn index(&self) -> &SearchIndex { &self.index }

  pub fn len(&self) -> usize { self.log.len() }
}
