//! The `MessengerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `parley-store-memory`).
//! The [`Messenger`](crate::messenger::Messenger) facade and any transport
//! layered on top depend on this abstraction, not on a concrete backend.

use std::{collections::BTreeSet, future::Future};

use crate::{
  content::Content,
  id::{ChatId, Seq, UserId},
  identity::{GroupChat, User},
  message::{GroupMessage, Message, PrivateMessage},
};

/// Abstraction over a Parley message store backend.
///
/// Messages are append-only. Every append assigns the next value of a single
/// global [`Seq`] counter shared by private and group messages, and indexes
/// the message's text before the call returns: a reader that can see a
/// message can also find it by search.
///
/// All list operations return a consistent snapshot in ascending `Seq`
/// order; a concurrent append is either entirely in the snapshot or entirely
/// absent.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait MessengerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identity registry ─────────────────────────────────────────────────

  /// Register a new user. Never fails for a well-formed store.
  fn create_user(
    &self,
    name: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Change a user's display name.
  fn rename_user(
    &self,
    user_id: UserId,
    name: String,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not registered.
  fn get_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// All registered users, oldest first.
  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Create a group chat with an initial member set.
  ///
  /// Fails without creating anything if any initial member is unknown.
  fn create_group_chat(
    &self,
    name: String,
    members: BTreeSet<UserId>,
  ) -> impl Future<Output = Result<GroupChat, Self::Error>> + Send + '_;

  /// Change a group chat's name.
  fn rename_group_chat(
    &self,
    chat_id: ChatId,
    name: String,
  ) -> impl Future<Output = Result<GroupChat, Self::Error>> + Send + '_;

  /// Retrieve a group chat (with a member snapshot). `None` if unknown.
  fn get_group_chat(
    &self,
    chat_id: ChatId,
  ) -> impl Future<Output = Result<Option<GroupChat>, Self::Error>> + Send + '_;

  /// All group chats, oldest first.
  fn list_group_chats(
    &self,
  ) -> impl Future<Output = Result<Vec<GroupChat>, Self::Error>> + Send + '_;

  // ── Membership ────────────────────────────────────────────────────────

  /// Add `user_id` to the chat. Idempotent; returns `true` only if the
  /// member set changed.
  fn add_member(
    &self,
    chat_id: ChatId,
    user_id: UserId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove `user_id` from the chat. Idempotent; returns `true` only if the
  /// member set changed. Messages already sent are unaffected.
  fn remove_member(
    &self,
    chat_id: ChatId,
    user_id: UserId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// The current member set of a chat.
  fn list_members(
    &self,
    chat_id: ChatId,
  ) -> impl Future<Output = Result<BTreeSet<UserId>, Self::Error>> + Send + '_;

  // ── Messages — append-only writes ─────────────────────────────────────

  /// Append a private message. `seq` and `sent_at` are set by the store.
  fn append_private_message(
    &self,
    sender: UserId,
    receiver: UserId,
    content: Content,
  ) -> impl Future<Output = Result<PrivateMessage, Self::Error>> + Send + '_;

  /// Append a group message. The sender need not be a member of the chat.
  fn append_group_message(
    &self,
    sender: UserId,
    chat_id: ChatId,
    content: Content,
  ) -> impl Future<Output = Result<GroupMessage, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Private messages sent or received by `user_id`.
  fn list_private_messages_for_user(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<PrivateMessage>, Self::Error>> + Send + '_;

  /// Private messages exchanged between `a` and `b` in either direction.
  fn list_private_messages_between(
    &self,
    a: UserId,
    b: UserId,
  ) -> impl Future<Output = Result<Vec<PrivateMessage>, Self::Error>> + Send + '_;

  /// Messages posted to a group chat.
  fn list_group_messages(
    &self,
    chat_id: ChatId,
  ) -> impl Future<Output = Result<Vec<GroupMessage>, Self::Error>> + Send + '_;

  /// Resolve sequence numbers to messages. Numbers that were never issued
  /// are skipped.
  fn get_messages<'a>(
    &'a self,
    seqs: &'a BTreeSet<Seq>,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + 'a;

  // ── Search ────────────────────────────────────────────────────────────

  /// Sequence numbers of messages containing every token of `words`.
  /// Empty input matches nothing.
  fn search_words<'a>(
    &'a self,
    words: &'a [String],
  ) -> impl Future<Output = Result<BTreeSet<Seq>, Self::Error>> + Send + 'a;

  /// Sequence numbers of messages containing at least one token of `words`.
  /// Empty input matches nothing.
  fn search_any<'a>(
    &'a self,
    words: &'a [String],
  ) -> impl Future<Output = Result<BTreeSet<Seq>, Self::Error>> + Send + 'a;
}
