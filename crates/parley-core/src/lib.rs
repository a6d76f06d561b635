//! Core types and trait definitions for the Parley messenger.
//!
//! This crate is deliberately free of storage and transport code. Backends
//! implement [`store::MessengerStore`]; callers talk to
//! [`messenger::Messenger`].

pub mod config;
pub mod content;
pub mod error;
pub mod id;
pub mod identity;
pub mod message;
pub mod messenger;
pub mod search;
pub mod store;

pub use error::{Error, Result};
