//! [`Messenger`], the facade callers use to send, list and search.
//!
//! The facade owns no state of its own beyond configuration. Validation and
//! atomicity live in the [`MessengerStore`] backend; the facade adds query
//! normalization, search-result materialization and the roster view.

use std::{collections::BTreeSet, sync::Arc};

use crate::{
  config::MessengerConfig,
  content::Content,
  error::Error,
  id::{ChatId, Seq, UserId},
  identity::{GroupChat, User},
  message::{GroupMessage, Message, PrivateMessage},
  search::{SearchMode, tokenize_query},
  store::MessengerStore,
};

/// High-level messenger operations over any [`MessengerStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct Messenger<S> {
  store:  Arc<S>,
  config: MessengerConfig,
}

impl<S> Clone for Messenger<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), config: self.config.clone() }
  }
}

impl<S> Messenger<S>
where
  S: MessengerStore,
  S::Error: From<Error>,
{
  pub fn new(store: Arc<S>, config: MessengerConfig) -> Self {
    Self { store, config }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn config(&self) -> &MessengerConfig { &self.config }

  // ── Identity ──────────────────────────────────────────────────────────

  pub async fn register_user(
    &self,
    name: impl Into<String>,
  ) -> Result<User, S::Error> {
    self.store.create_user(name.into()).await
  }

  pub async fn rename_user(
    &self,
    user_id: UserId,
    name: impl Into<String>,
  ) -> Result<User, S::Error> {
    self.store.rename_user(user_id, name.into()).await
  }

  /// Look up a user, failing with [`Error::UnknownUser`] if absent.
  pub async fn user(&self, user_id: UserId) -> Result<User, S::Error> {
    self
      .store
      .get_user(user_id)
      .await?
      .ok_or_else(|| Error::UnknownUser(user_id).into())
  }

  pub async fn users(&self) -> Result<Vec<User>, S::Error> {
    self.store.list_users().await
  }

  pub async fn create_group_chat(
    &self,
    name: impl Into<String>,
    members: impl IntoIterator<Item = UserId>,
  ) -> Result<GroupChat, S::Error> {
    let members: BTreeSet<UserId> = members.into_iter().collect();
    self.store.create_group_chat(name.into(), members).await
  }

  pub async fn rename_group_chat(
    &self,
    chat_id: ChatId,
    name: impl Into<String>,
  ) -> Result<GroupChat, S::Error> {
    self.store.rename_group_chat(chat_id, name.into()).await
  }

  /// Look up a group chat, failing with [`Error::UnknownChat`] if absent.
  pub async fn group_chat(&self, chat_id: ChatId) -> Result<GroupChat, S::Error> {
    self
      .store
      .get_group_chat(chat_id)
      .await?
      .ok_or_else(|| Error::UnknownChat(chat_id).into())
  }

  pub async fn group_chats(&self) -> Result<Vec<GroupChat>, S::Error> {
    self.store.list_group_chats().await
  }

  // ── Membership ────────────────────────────────────────────────────────

  pub async fn add_member(
    &self,
    chat_id: ChatId,
    user_id: UserId,
  ) -> Result<bool, S::Error> {
    self.store.add_member(chat_id, user_id).await
  }

  pub async fn remove_member(
    &self,
    chat_id: ChatId,
    user_id: UserId,
  ) -> Result<bool, S::Error> {
    self.store.remove_member(chat_id, user_id).await
  }

  pub async fn members(&self, chat_id: ChatId) -> Result<BTreeSet<UserId>, S::Error> {
    self.store.list_members(chat_id).await
  }

  /// The chat's members as full user records, sorted by name.
  pub async fn roster(&self, chat_id: ChatId) -> Result<Vec<User>, S::Error> {
    let members = self.store.list_members(chat_id).await?;
    let mut roster: Vec<User> = self
      .store
      .list_users()
      .await?
      .into_iter()
      .filter(|u| members.contains(&u.user_id))
      .collect();
    roster.sort_by(|a, b| a.name.cmp(&b.name).then(a.user_id.cmp(&b.user_id)));
    Ok(roster)
  }

  // ── Messaging ─────────────────────────────────────────────────────────

  pub async fn send_private(
    &self,
    sender: UserId,
    receiver: UserId,
    content: Content,
  ) -> Result<PrivateMessage, S::Error> {
    self.store.append_private_message(sender, receiver, content).await
  }

  pub async fn send_group(
    &self,
    sender: UserId,
    chat_id: ChatId,
    content: Content,
  ) -> Result<GroupMessage, S::Error> {
    self.store.append_group_message(sender, chat_id, content).await
  }

  /// Every private message `user_id` sent or received, oldest first.
  pub async fn private_history(
    &self,
    user_id: UserId,
  ) -> Result<Vec<PrivateMessage>, S::Error> {
    self.store.list_private_messages_for_user(user_id).await
  }

  /// The private conversation between `a` and `b`, oldest first.
  pub async fn conversation(
    &self,
    a: UserId,
    b: UserId,
  ) -> Result<Vec<PrivateMessage>, S::Error> {
    self.store.list_private_messages_between(a, b).await
  }

  pub async fn group_history(
    &self,
    chat_id: ChatId,
  ) -> Result<Vec<GroupMessage>, S::Error> {
    self.store.list_group_messages(chat_id).await
  }

  // ── Search ────────────────────────────────────────────────────────────

  /// Search with the configured [`SearchMode`].
  pub async fn search_messages<W>(&self, words: &[W]) -> Result<Vec<Message>, S::Error>
  where
    W: AsRef<str> + Sync,
  {
    self.search_messages_with(words, self.config.search.mode).await
  }

  /// Find messages by word, oldest first.
  ///
  /// Fails with [`Error::InvalidQuery`] if `words` contain nothing
  /// searchable.
  pub async fn search_messages_with<W>(
    &self,
    words: &[W],
    mode: SearchMode,
  ) -> Result<Vec<Message>, S::Error>
  where
    W: AsRef<str> + Sync,
  {
    let tokens = tokenize_query(words);
    if tokens.is_empty() {
      let reason = "query contains no searchable words".to_owned();
      return Err(Error::InvalidQuery(reason).into());
    }

    let mut seqs = match mode {
      SearchMode::All => self.store.search_words(&tokens).await?,
      SearchMode::Any => self.store.search_any(&tokens).await?,
    };
    if let Some(max) = self.config.search.max_results {
      seqs = seqs.into_iter().take(max).collect::<BTreeSet<Seq>>();
    }

    tracing::trace!(?tokens, ?mode, hits = seqs.len(), "search");
    self.store.get_messages(&seqs).await
  }
}
