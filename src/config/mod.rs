//! Configuration module for Walletline
//!
//! - Data directory resolution
//! - Application settings persistence

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::Settings;
