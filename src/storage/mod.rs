//! Storage layer for mypa.
//!
//! This module provides the string-keyed persistence port and its SQLite
//! backend. Documents stored through it:
//! - Task list
//! - Focus session history and stats
//! - Auto Plan undo snapshot

mod database;
mod kv;
mod migrations;

pub use database::Database;
pub use kv::{load_optional, load_or_default, remove_logged, save_logged, KeyValueStore, MemoryStore};

#[cfg(test)]
pub use kv::MockKeyValueStore;
