//! Storage abstraction and implementations for Runmap.
//!
//! This crate provides a trait-based key-value interface with an in-memory
//! store and a JSON-file reference implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;
#[cfg(feature = "json")]
pub mod json_storage;

pub use trait_::{KeyValueStore, StorageError, Result, read_json, write_json};
pub use memory::MemoryStore;
#[cfg(feature = "json")]
pub use json_storage::JsonFileStore;
