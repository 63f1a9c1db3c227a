//! Storage layer for Walletline
//!
//! JSON files written atomically, and the preference store built on them.

pub mod file_io;
pub mod preferences;

pub use preferences::{JsonPreferenceStore, MemoryPreferenceStore, PreferenceKey, PreferenceStore};
