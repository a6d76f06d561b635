//! In-memory backend for the Parley messenger.
//!
//! [`MemoryStore`] keeps users, chats, messages and the word index in process
//! memory behind `parking_lot` read/write locks. Nothing is persisted.

mod index;
mod journal;
mod membership;
mod registry;
mod store;

pub use store::{MemoryStore, StoreStats};
