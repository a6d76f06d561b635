//! Message records.
//!
//! Messages are immutable once appended. The store assigns the [`Seq`] and the
//! `sent_at` timestamp; callers never supply either.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  content::Content,
  id::{ChatId, Seq, UserId},
};

/// A direct message from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessage {
  pub seq:      Seq,
  pub sender:   UserId,
  pub receiver: UserId,
  pub content:  Content,
  /// Advisory wall-clock time; ordering always uses `seq`.
  pub sent_at:  DateTime<Utc>,
}

impl PrivateMessage {
  /// Whether `user_id` sent or received this message.
  pub fn involves(&self, user_id: UserId) -> bool {
    self.sender == user_id || self.receiver == user_id
  }

  /// Whether this message was exchanged between `a` and `b`, in either
  /// direction.
  pub fn is_between(&self, a: UserId, b: UserId) -> bool {
    (self.sender == a && self.receiver == b)
      || (self.sender == b && self.receiver == a)
  }
}

/// A message posted to a group chat.
///
/// The sender does not have to be a current member of the chat; history
/// outlives membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMessage {
  pub seq:     Seq,
  pub sender:  UserId,
  pub chat_id: ChatId,
  pub content: Content,
  pub sent_at: DateTime<Utc>,
}

/// Either kind of message; the element type of search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
  Private(PrivateMessage),
  Group(GroupMessage),
}

impl Message {
  pub fn seq(&self) -> Seq {
    match self {
      Self::Private(m) => m.seq,
      Self::Group(m) => m.seq,
    }
  }

  pub fn sender(&self) -> UserId {
    match self {
      Self::Private(m) => m.sender,
      Self::Group(m) => m.sender,
    }
  }

  pub fn content(&self) -> &Content {
    match self {
      Self::Private(m) => &m.content,
      Self::Group(m) => &m.content,
    }
  }

  pub fn sent_at(&self) -> DateTime<Utc> {
    match self {
      Self::Private(m) => m.sent_at,
      Self::Group(m) => m.sent_at,
    }
  }
}

impl From<PrivateMessage> for Message {
  fn from(m: PrivateMessage) -> Self { Self::Private(m) }
}

impl From<GroupMessage> for Message {
  fn from(m: GroupMessage) -> Self { Self::Group(m) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn private(sender: UserId, receiver: UserId) -> PrivateMessage {
    PrivateMessage {
      seq: Seq::FIRST,
      sender,
      receiver,
      content: Content::text("Hi, Ratsoa"),
      sent_at: Utc::now(),
    }
  }

  #[test]
  fn private_message_participants() {
    let (max, ratsoa, kate) = (UserId::new(), UserId::new(), UserId::new());
    let msg = private(max, ratsoa);

    assert!(msg.involves(max));
    assert!(msg.involves(ratsoa));
    assert!(!msg.involves(kate));

    assert!(msg.is_between(ratsoa, max));
    assert!(!msg.is_between(max, kate));
  }

  #[test]
  fn message_accessors_cover_both_kinds() {
    let (alex, ratsoa) = (UserId::new(), UserId::new());
    let direct = private(alex, ratsoa);
    let posted = GroupMessage {
      seq:     Seq::new(2),
      sender:  alex,
      chat_id: ChatId::new(),
      content: Content::text("Hello everyone"),
      sent_at: Utc::now(),
    };

    let a = Message::from(direct.clone());
    let b = Message::from(posted.clone());

    assert_eq!((a.seq(), b.seq()), (Seq::FIRST, Seq::new(2)));
    assert_eq!((a.sender(), b.sender()), (alex, alex));
    assert_eq!(a.sent_at(), direct.sent_at);
    assert_eq!(b.sent_at(), posted.sent_at);
    assert_eq!(b.content().as_text(), Some("Hello everyone"));
  }
}
