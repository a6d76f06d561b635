//! parley-demo: replays a short conversation against an in-memory store.
//!
//! Registers a handful of users, exchanges private and group messages, then
//! prints histories, the group roster and (optionally) search results.
//!
//! # Usage
//!
//! ```sh
//! parley-demo
//! parley-demo --search hello karl
//! parley-demo --search hello karl --any
//! PARLEY_SEARCH__MODE=any parley-demo --config ./parley.toml --search hi
//! ```

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use parley_core::{
  config::MessengerConfig,
  content::Content,
  id::{ChatId, UserId},
  message::Message,
  messenger::Messenger,
  search::SearchMode,
};
use parley_store_memory::MemoryStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type Demo = Messenger<MemoryStore>;

#[derive(Parser)]
#[command(author, version, about = "Parley in-memory messenger demo")]
struct Cli {
  /// Path to an optional TOML configuration file.
  #[arg(short, long, default_value = "parley.toml")]
  config: PathBuf,

  /// Words to search for once the conversation has been replayed.
  #[arg(long, num_args = 1.., value_name = "WORD")]
  search: Vec<String>,

  /// Match messages containing any of the words instead of all of them.
  #[arg(long, requires = "search")]
  any: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(
      config::Environment::with_prefix("PARLEY")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let messenger_cfg: MessengerConfig = settings
    .try_deserialize()
    .context("failed to deserialise MessengerConfig")?;

  let messenger = Messenger::new(Arc::new(MemoryStore::new()), messenger_cfg);

  let max = replay_private(&messenger).await?;
  println!("Private messages of Max:");
  let names = user_names(&messenger).await?;
  for message in messenger.private_history(max).await? {
    println!(
      "'{}' -> '{}':\t {}",
      name_of(&names, message.sender),
      name_of(&names, message.receiver),
      message.content
    );
  }

  let chat_id = replay_group(&messenger).await?;
  let chat = messenger.group_chat(chat_id).await?;
  let roster: Vec<String> = messenger
    .roster(chat_id)
    .await?
    .into_iter()
    .map(|u| u.name)
    .collect();
  println!();
  println!("Group chat '{}' ({}):", chat.name, roster.join(", "));
  let names = user_names(&messenger).await?;
  for message in messenger.group_history(chat_id).await? {
    println!("'{}':\t {}", name_of(&names, message.sender), message.content);
  }

  if !cli.search.is_empty() {
    let mode = if cli.any { SearchMode::Any } else { messenger.config().search.mode };
    let hits = messenger
      .search_messages_with(cli.search.as_slice(), mode)
      .await
      .context("search failed")?;
    let chats = chat_names(&messenger).await?;

    println!();
    println!("Search {:?} ({mode:?}): {} hit(s)", cli.search, hits.len());
    for message in &hits {
      println!("  {}", describe(message, &names, &chats));
    }
  }

  let stats = messenger.store().stats();
  tracing::info!(
    users = stats.users,
    chats = stats.chats,
    messages = stats.messages,
    tokens = stats.tokens,
    "demo finished"
  );

  Ok(())
}

/// Max and Ratsoa greet each other. Returns Max's id.
async fn replay_private(messenger: &Demo) -> anyhow::Result<UserId> {
  let max = messenger.register_user("Max").await?.user_id;
  let ratsoa = messenger.register_user("Ratsoa").await?.user_id;

  messenger
    .send_private(max, ratsoa, Content::text("Hi, Ratsoa"))
    .await?;
  messenger
    .send_private(ratsoa, max, Content::text("Hi, Max :)"))
    .await?;
  messenger
    .send_private(ratsoa, max, Content::text("How are you?"))
    .await?;

  Ok(max)
}

/// Alex, Victor and Karl open a chat; Kate joins and both Alex and Kate post.
async fn replay_group(messenger: &Demo) -> anyhow::Result<ChatId> {
  let alex = messenger.register_user("Alex").await?.user_id;
  let victor = messenger.register_user("Victor").await?.user_id;
  let karl = messenger.register_user("Karl").await?.user_id;

  let chat = messenger
    .create_group_chat("Old friends", [alex, victor, karl])
    .await?
    .chat_id;

  let kate = messenger.register_user("Kate").await?.user_id;
  messenger.add_member(chat, kate).await?;

  messenger
    .send_group(alex, chat, Content::text("Hello everyone"))
    .await?;
  messenger
    .send_group(kate, chat, Content::text("Hello Karl, long time no see"))
    .await?;

  Ok(chat)
}

async fn user_names(messenger: &Demo) -> anyhow::Result<HashMap<UserId, String>> {
  Ok(
    messenger
      .users()
      .await?
      .into_iter()
      .map(|u| (u.user_id, u.name))
      .collect(),
  )
}

async fn chat_names(messenger: &Demo) -> anyhow::Result<HashMap<ChatId, String>> {
  Ok(
    messenger
      .group_chats()
      .await?
      .into_iter()
      .map(|c| (c.chat_id, c.name))
      .collect(),
  )
}

fn name_of(names: &HashMap<UserId, String>, user_id: UserId) -> &str {
  names.get(&user_id).map(String::as_str).unwrap_or("?")
}

fn describe(
  message: &Message,
  users:   &HashMap<UserId, String>,
  chats:   &HashMap<ChatId, String>,
) -> String {
  let target = match message {
    Message::Private(m) => format!("-> '{}'", name_of(users, m.receiver)),
    Message::Group(m) => {
      format!("@ '{}'", chats.get(&m.chat_id).map(String::as_str).unwrap_or("?"))
    }
  };
  format!(
    "{} '{}' {target}:\t {}",
    message.seq(),
    name_of(users, message.sender()),
    message.content()
  )
}
